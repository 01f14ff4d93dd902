use super::dashboard::Dashboard;
use super::execution::ExecutionBoard;
use super::intake::IntakeForm;
use super::theme::UiTheme;
use super::{Screen, ScreenResponse};
use crate::core::event::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crate::services::settings::Settings;
use crate::ui::backend::Backend;
use crate::ui::core::geom::{Insets, Pos, Rect};
use crate::ui::core::id::IdPath;
use crate::ui::core::input::UiEvent;
use crate::ui::core::painter::Painter;
use crate::ui::core::runtime::UiRuntime;
use crate::ui::core::tree::{Node, NodeKind, Sense, UiTree, LAYER_BASE};
use crate::ui::core::widget::Ui;
use crate::ui::widgets::SelectCx;
use std::time::Instant;

pub const NAV_W: u16 = 20;
pub const HINT: &str = "1-3: telas · Tab: foco · Ctrl+S: enviar · q: sair";

/// Top-level state: which screen is showing, the last frame's hit-test tree, and the status line.
pub struct App {
    screen: Screen,
    theme: UiTheme,
    dashboard: Dashboard,
    intake: IntakeForm,
    execution: ExecutionBoard,
    runtime: UiRuntime,
    painter: Painter,
    tree: UiTree,
    viewport: Rect,
    status: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let config = settings.select.to_config();
        let rows = settings.select.panel_rows();
        Self {
            screen: Screen::default(),
            theme: UiTheme::from_settings(&settings.theme),
            dashboard: Dashboard::new(),
            intake: IntakeForm::new(config, rows),
            execution: ExecutionBoard::new(config, rows),
            runtime: UiRuntime::new(),
            painter: Painter::new(),
            tree: UiTree::new(),
            viewport: Rect::default(),
            status: None,
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn theme_mut(&mut self) -> &mut UiTheme {
        &mut self.theme
    }

    pub fn intake(&self) -> &IntakeForm {
        &self.intake
    }

    pub fn execution(&self) -> &ExecutionBoard {
        &self.execution
    }

    /// Hit-test tree of the last rendered frame.
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// Number of selects currently listening for outside presses.
    pub fn outside_press_watchers(&self) -> usize {
        self.runtime.outside_press().len()
    }

    pub fn switch_to(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        let outside_press = self.runtime.outside_press();
        self.intake.close_overlays(outside_press);
        self.execution.close_overlays(outside_press);
        self.runtime.reset_pointer_state();
        tracing::debug!(from = ?self.screen, to = ?screen, "switch screen");
        self.screen = screen;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        [self.intake.next_deadline(), self.execution.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Publishes due search terms. Returns `true` when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let intake = self.intake.tick(now);
        let execution = self.execution.tick(now);
        intake || execution
    }

    /// Returns `true` when the screen should be redrawn.
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(key, now),
            InputEvent::Mouse(_) => self.handle_pointer(event, now),
            InputEvent::Paste(text) => self.handle_paste(text, now),
            InputEvent::Resize(w, h) => {
                self.viewport = Rect::new(0, 0, *w, *h);
                true
            }
            InputEvent::FocusGained | InputEvent::FocusLost => false,
        }
    }

    pub fn render(&mut self, backend: &mut dyn Backend, area: Rect) {
        self.viewport = area;
        self.painter.clear();
        self.tree.clear();

        {
            let mut ui = Ui::new(area, &mut self.painter, &mut self.tree);
            let (body, status_row) = area.split_top(area.h.saturating_sub(1));
            let (nav, content) = body.split_left(NAV_W);

            render_nav(&mut ui, nav, self.screen, &self.theme);
            render_status(&mut ui, status_row, self.status.as_deref(), &self.theme);

            let content = content.inset(Insets {
                left: 2,
                right: 1,
                top: 1,
                bottom: 0,
            });
            ui.with_rect(content, |ui| match self.screen {
                Screen::Dashboard => self.dashboard.render(ui, &self.theme),
                Screen::Intake => self.intake.render(ui, area, &self.theme),
                Screen::Execution => self.execution.render(ui, area, &self.theme),
            });
        }

        backend.draw(area, self.painter.cmds());
        backend.set_cursor(self.painter.cursor());
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if !key.is_press() {
            return false;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            tracing::info!("quit requested");
            self.quit = true;
            return false;
        }

        let capturing = match self.screen {
            Screen::Dashboard => false,
            Screen::Intake => self.intake.captures_text(),
            Screen::Execution => self.execution.captures_text(),
        };
        if !capturing {
            match key.text_char() {
                Some('q') => {
                    tracing::info!("quit requested");
                    self.quit = true;
                    return false;
                }
                Some(ch @ '1'..='3') => {
                    let index = ch as usize - '1' as usize;
                    if let Some(screen) = Screen::from_index(index) {
                        self.switch_to(screen);
                    }
                    return true;
                }
                _ => {}
            }
        }

        let cx = SelectCx {
            tree: &self.tree,
            viewport: self.viewport,
            outside_press: self.runtime.outside_press(),
            now,
        };
        let response = match self.screen {
            Screen::Dashboard => ScreenResponse::ignored(),
            Screen::Intake => self.intake.handle_key(key, &cx),
            Screen::Execution => self.execution.handle_key(key, &cx),
        };
        self.apply(response)
    }

    fn handle_paste(&mut self, text: &str, now: Instant) -> bool {
        let cx = SelectCx {
            tree: &self.tree,
            viewport: self.viewport,
            outside_press: self.runtime.outside_press(),
            now,
        };
        let response = match self.screen {
            Screen::Dashboard => ScreenResponse::ignored(),
            Screen::Intake => self.intake.handle_paste(text, &cx),
            Screen::Execution => self.execution.handle_paste(text, &cx),
        };
        self.apply(response)
    }

    fn handle_pointer(&mut self, event: &InputEvent, now: Instant) -> bool {
        let out = self.runtime.on_input(event, &self.tree);
        let mut redraw = out.needs_redraw;

        for ui_event in &out.events {
            if let UiEvent::Click { id, .. } = ui_event {
                let nav = self.tree.node(*id).and_then(|n| match n.kind {
                    NodeKind::NavItem { index } => Screen::from_index(index),
                    _ => None,
                });
                if let Some(screen) = nav {
                    self.switch_to(screen);
                    redraw = true;
                    continue;
                }
            }

            let cx = SelectCx {
                tree: &self.tree,
                viewport: self.viewport,
                outside_press: self.runtime.outside_press(),
                now,
            };
            let response = match self.screen {
                Screen::Dashboard => ScreenResponse::ignored(),
                Screen::Intake => self.intake.handle_ui_event(ui_event, &cx),
                Screen::Execution => self.execution.handle_ui_event(ui_event, &cx),
            };
            redraw |= self.apply(response);
        }
        redraw
    }

    fn apply(&mut self, response: ScreenResponse) -> bool {
        match response.status {
            Some(status) => {
                self.status = Some(status);
                true
            }
            None => response.redraw,
        }
    }
}

fn render_nav(ui: &mut Ui, area: Rect, active: Screen, theme: &UiTheme) {
    if area.is_empty() {
        return;
    }
    ui.painter.fill_rect(area, theme.nav(false));
    let inner = Rect::new(area.x, area.y, area.w.saturating_sub(1), area.h);
    ui.painter
        .text_clipped(Pos::new(inner.x + 1, inner.y), "OBRAS", theme.title(), inner);
    ui.painter.text_clipped(
        Pos::new(inner.x + 1, inner.y + 1),
        "Secretaria de Obras",
        theme.nav(false).patch(theme.muted()),
        inner,
    );

    for screen in Screen::ALL {
        let y = inner.y + 3 + screen.index() as u16;
        if y >= inner.bottom() {
            break;
        }
        let row = Rect::new(inner.x, y, inner.w, 1);
        ui.tree.push(Node {
            id: IdPath::root("nav")
                .push_u64(screen.index() as u64)
                .finish(),
            rect: row,
            layer: LAYER_BASE,
            z: 0,
            sense: Sense::CLICK | Sense::HOVER,
            kind: NodeKind::NavItem {
                index: screen.index(),
            },
        });
        let style = theme.nav(screen == active);
        ui.painter.fill_rect(row, style);
        ui.painter.text_clipped(
            Pos::new(row.x + 1, y),
            format!("{}  {}", screen.index() + 1, screen.nav_label()),
            style,
            row,
        );
    }

    let sep_x = area.right().saturating_sub(1);
    for y in area.y..area.bottom() {
        ui.painter
            .text(Pos::new(sep_x, y), "│", theme.border(false));
    }
}

fn render_status(ui: &mut Ui, row: Rect, status: Option<&str>, theme: &UiTheme) {
    if row.is_empty() {
        return;
    }
    ui.painter.fill_rect(row, theme.nav(false));
    let (text, style) = match status {
        Some(status) => (status, theme.title()),
        None => (HINT, theme.muted()),
    };
    ui.painter
        .text_clipped(Pos::new(row.x + 1, row.y), text, style, row);
}

#[cfg(test)]
#[path = "../../tests/unit/app/shell.rs"]
mod tests;
