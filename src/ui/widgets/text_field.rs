use crate::core::event::{KeyCode, KeyEvent};
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::id::IdPath;
use crate::ui::core::style::Style;
use crate::ui::core::tree::{Node, NodeKind, Sense, LAYER_BASE};
use crate::ui::core::widget::{Ui, Widget};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextFieldStyles {
    pub base: Style,
    pub focused: Style,
    pub placeholder: Style,
    pub marker: Style,
}

/// Applies an editing key to a single-line value. Returns `true` when `value` changed.
///
/// Only appending and grapheme-wise backspace are supported; the caret always sits at the end.
pub fn edit_text(value: &mut String, key: &KeyEvent) -> bool {
    if !key.is_press() {
        return false;
    }
    match key.code {
        KeyCode::Backspace => match value.grapheme_indices(true).next_back() {
            Some((idx, _)) => {
                value.truncate(idx);
                true
            }
            None => false,
        },
        _ => match key.text_char() {
            Some(ch) => {
                value.push(ch);
                true
            }
            None => false,
        },
    }
}

/// Appends pasted text to a single-line value, line breaks become spaces and other control
/// characters are dropped. Returns `true` when `value` changed.
pub fn paste_text(value: &mut String, text: &str) -> bool {
    let before = value.len();
    value.extend(
        text.chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .filter(|c| !c.is_control()),
    );
    value.len() != before
}

/// One-row text input. Long values scroll so the tail stays visible.
pub struct TextField<'a> {
    pub field: u32,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
    pub focused: bool,
    pub styles: TextFieldStyles,
}

impl Widget for TextField<'_> {
    fn ui(&mut self, ui: &mut Ui) {
        let rect = Rect::new(ui.rect.x, ui.rect.y, ui.rect.w, ui.rect.h.min(1));
        if rect.is_empty() {
            return;
        }

        ui.tree.push(Node {
            id: IdPath::root("text_field")
                .push_u64(self.field as u64)
                .finish(),
            rect,
            layer: LAYER_BASE,
            z: 0,
            sense: Sense::CLICK | Sense::HOVER,
            kind: NodeKind::TextField { field: self.field },
        });

        let base = if self.focused {
            self.styles.base.patch(self.styles.focused)
        } else {
            self.styles.base
        };
        ui.painter.fill_rect(rect, base);

        // One cell of padding on the left, two on the right for the marker.
        let text_w = rect.w.saturating_sub(3) as usize;
        let text_pos = Pos::new(rect.x.saturating_add(1), rect.y);
        let clip = Rect::new(text_pos.x, rect.y, text_w as u16, 1);

        if self.value.is_empty() {
            if !self.focused {
                ui.painter.text_clipped(
                    text_pos,
                    self.placeholder,
                    base.patch(self.styles.placeholder),
                    clip,
                );
            }
        } else {
            let shown = tail_fitting(self.value, text_w.saturating_sub(1));
            ui.painter.text_clipped(text_pos, shown, base, clip);
        }

        if self.focused {
            let typed = tail_fitting(self.value, text_w.saturating_sub(1)).width();
            let x = text_pos.x.saturating_add(typed as u16);
            ui.painter.set_cursor(Pos::new(x, rect.y));
        }

        if self.required && self.value.is_empty() && rect.w >= 3 {
            ui.painter.text(
                Pos::new(rect.right() - 2, rect.y),
                "*",
                base.patch(self.styles.marker),
            );
        }
    }
}

/// Longest suffix of `s` made of whole graphemes whose display width fits in `width`.
fn tail_fitting(s: &str, width: usize) -> &str {
    let mut used = 0usize;
    let mut start = s.len();
    for (idx, g) in s.grapheme_indices(true).rev() {
        let w = g.width();
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/text_field.rs"]
mod tests;
