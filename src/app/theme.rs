//! Colors for every screen, resolved once from settings and the terminal's color support.

use crate::services::settings::ThemeSettings;
use crate::ui::core::style::{Color, Mod, Style};
use crate::ui::widgets::{SelectStyles, TextFieldStyles};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub accent_fg: Color,
    pub focus_border: Color,
    pub inactive_border: Color,
    pub muted_fg: Color,
    pub nav_bg: Color,
    pub nav_fg: Color,
    pub nav_active_bg: Color,
    pub nav_active_fg: Color,
    pub field_bg: Color,
    pub panel_bg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub marker_fg: Color,
    pub ok_fg: Color,
    pub warn_fg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

/// `OBRAS_COLOR_SUPPORT` wins; otherwise `COLORTERM`/`TERM` are sniffed.
pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("OBRAS_COLOR_SUPPORT") {
        match value.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    color_support_from(&colorterm, &term)
}

fn color_support_from(colorterm: &str, term: &str) -> TerminalColorSupport {
    let truecolor = ["truecolor", "24bit", "direct"];
    if truecolor
        .iter()
        .any(|tag| colorterm.contains(tag) || term.contains(tag))
    {
        return TerminalColorSupport::TrueColor;
    }
    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }
    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            accent_fg: Color::Indexed(3),
            focus_border: Color::Indexed(6),
            inactive_border: Color::Indexed(8),
            muted_fg: Color::Indexed(8),
            nav_bg: Color::Reset,
            nav_fg: Color::Indexed(7),
            nav_active_bg: Color::Indexed(4),
            nav_active_fg: Color::Indexed(15),
            field_bg: Color::Rgb(0x1e, 0x24, 0x30),
            panel_bg: Color::Rgb(0x16, 0x1b, 0x24),
            selected_bg: Color::Indexed(8),
            selected_fg: Color::Indexed(15),
            marker_fg: Color::Indexed(9),
            ok_fg: Color::Indexed(2),
            warn_fg: Color::Indexed(3),
        }
    }
}

impl UiTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();
        theme.apply_settings(settings);
        theme
    }

    /// Unparseable color strings keep the current color.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let slots: [(&mut Color, &Option<String>); 15] = [
            (&mut self.accent_fg, &settings.accent_fg),
            (&mut self.focus_border, &settings.focus_border),
            (&mut self.inactive_border, &settings.inactive_border),
            (&mut self.muted_fg, &settings.muted_fg),
            (&mut self.nav_bg, &settings.nav_bg),
            (&mut self.nav_fg, &settings.nav_fg),
            (&mut self.nav_active_bg, &settings.nav_active_bg),
            (&mut self.nav_active_fg, &settings.nav_active_fg),
            (&mut self.field_bg, &settings.field_bg),
            (&mut self.panel_bg, &settings.panel_bg),
            (&mut self.selected_bg, &settings.selected_bg),
            (&mut self.selected_fg, &settings.selected_fg),
            (&mut self.marker_fg, &settings.marker_fg),
            (&mut self.ok_fg, &settings.ok_fg),
            (&mut self.warn_fg, &settings.warn_fg),
        ];
        for (slot, value) in slots {
            let Some(value) = value.as_deref() else {
                continue;
            };
            match Color::parse(value) {
                Some(color) => *slot = color,
                None => tracing::warn!(value, "ignoring unknown theme color"),
            }
        }
    }

    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    pub fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }
        for color in [
            &mut self.accent_fg,
            &mut self.focus_border,
            &mut self.inactive_border,
            &mut self.muted_fg,
            &mut self.nav_bg,
            &mut self.nav_fg,
            &mut self.nav_active_bg,
            &mut self.nav_active_fg,
            &mut self.field_bg,
            &mut self.panel_bg,
            &mut self.selected_bg,
            &mut self.selected_fg,
            &mut self.marker_fg,
            &mut self.ok_fg,
            &mut self.warn_fg,
        ] {
            *color = map_color_for_support(*color, support);
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent_fg).add_mod(Mod::BOLD)
    }

    pub fn label(&self) -> Style {
        Style::default().add_mod(Mod::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_fg)
    }

    pub fn border(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus_border
        } else {
            self.inactive_border
        };
        Style::default().fg(color)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selected_bg).fg(self.selected_fg)
    }

    pub fn nav(&self, active: bool) -> Style {
        if active {
            Style::default()
                .bg(self.nav_active_bg)
                .fg(self.nav_active_fg)
                .add_mod(Mod::BOLD)
        } else {
            Style::default().bg(self.nav_bg).fg(self.nav_fg)
        }
    }

    pub fn ok(&self) -> Style {
        Style::default().fg(self.ok_fg)
    }

    pub fn warn(&self) -> Style {
        Style::default().fg(self.warn_fg)
    }

    pub fn select_styles(&self) -> SelectStyles {
        SelectStyles {
            base: Style::default().bg(self.field_bg),
            focused: Style::default().fg(self.focus_border),
            placeholder: self.muted(),
            border: Style::default().fg(self.focus_border).bg(self.panel_bg),
            muted: self.muted(),
            highlighted: self.selected(),
            marker: Style::default().fg(self.marker_fg).add_mod(Mod::BOLD),
        }
    }

    pub fn text_field_styles(&self) -> TextFieldStyles {
        TextFieldStyles {
            base: Style::default().bg(self.field_bg),
            focused: Style::default().add_mod(Mod::UNDERLINE),
            placeholder: self.muted(),
            marker: Style::default().fg(self.marker_fg).add_mod(Mod::BOLD),
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, c) | (_, c @ Color::Reset) => c,
        (TerminalColorSupport::Ansi256, Color::Rgb(r, g, b)) => {
            Color::Indexed(nearest(r, g, b, (0u8..=255).map(ansi256_to_rgb)))
        }
        (TerminalColorSupport::Ansi256, c @ Color::Indexed(_)) => c,
        (TerminalColorSupport::Ansi16, Color::Rgb(r, g, b)) => {
            Color::Indexed(nearest(r, g, b, ANSI16_RGB.iter().copied()))
        }
        (TerminalColorSupport::Ansi16, c @ Color::Indexed(i)) if i <= 15 => c,
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) => {
            let (r, g, b) = ansi256_to_rgb(i);
            Color::Indexed(nearest(r, g, b, ANSI16_RGB.iter().copied()))
        }
    }
}

/// Index of the palette entry closest to `(r, g, b)` by squared RGB distance.
fn nearest(r: u8, g: u8, b: u8, palette: impl Iterator<Item = (u8, u8, u8)>) -> u8 {
    let dist = |(pr, pg, pb): (u8, u8, u8)| {
        let dr = i32::from(r) - i32::from(pr);
        let dg = i32::from(g) - i32::from(pg);
        let db = i32::from(b) - i32::from(pb);
        dr * dr + dg * dg + db * db
    };
    palette
        .enumerate()
        .min_by_key(|(_, rgb)| dist(*rgb))
        .map(|(idx, _)| idx as u8)
        .unwrap_or(0)
}

fn ansi256_to_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => ANSI16_RGB[index as usize],
        16..=231 => {
            let level = [0u8, 95, 135, 175, 215, 255];
            let offset = index - 16;
            (
                level[(offset / 36) as usize],
                level[((offset / 6) % 6) as usize],
                level[(offset % 6) as usize],
            )
        }
        _ => {
            let gray = 8 + (index - 232) * 10;
            (gray, gray, gray)
        }
    }
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
