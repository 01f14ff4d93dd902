//! Searchable select: a one-row trigger plus an overlay panel with a search line and options.
//!
//! The trigger is painted in the normal pass; the panel must be painted after everything else on
//! the screen so it covers neighbouring fields.

use crate::core::event::{KeyCode, KeyEvent};
use crate::kernel::select::{
    find_selected, DropPosition, SelectAction, SelectConfig, SelectEffect, SelectOption,
    SelectState, VerticalSpace,
};
use crate::ui::core::geom::{Insets, Pos, Rect};
use crate::ui::core::id::IdPath;
use crate::ui::core::input::UiEvent;
use crate::ui::core::painter::BorderKind;
use crate::ui::core::runtime::{OutsidePressGuard, OutsidePressRegistry};
use crate::ui::core::style::Style;
use crate::ui::core::tree::{Node, NodeKind, Sense, UiTree, LAYER_BASE, LAYER_OVERLAY};
use crate::ui::core::widget::{Ui, Widget};
use crate::ui::widgets::text_field::paste_text;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

pub const EMPTY_RESULTS_TEXT: &str = "Nenhum resultado";
pub const SEARCH_PLACEHOLDER: &str = "Buscar...";
const PAGE_ROWS: isize = 5;
const MIN_PANEL_WIDTH: u16 = 24;
const MIN_PANEL_HEIGHT: u16 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectStyles {
    pub base: Style,
    pub focused: Style,
    pub placeholder: Style,
    pub border: Style,
    pub muted: Style,
    pub highlighted: Style,
    pub marker: Style,
}

/// What a select needs from the surrounding frame to react to input.
pub struct SelectCx<'a> {
    pub tree: &'a UiTree,
    pub viewport: Rect,
    pub outside_press: &'a OutsidePressRegistry,
    pub now: Instant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectResponse {
    /// The event was meant for this control; nobody else should handle it.
    pub consumed: bool,
    pub redraw: bool,
    /// Value of the option the user chose. The caller stores it.
    pub changed: Option<String>,
}

impl SelectResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }
}

/// One mounted select: its interaction state plus the outside-press watch it holds while open.
#[derive(Debug)]
pub struct SelectControl {
    id: u32,
    state: SelectState,
    outside_press: Option<OutsidePressGuard>,
}

impl SelectControl {
    pub fn new(id: u32, config: SelectConfig) -> Self {
        Self {
            id,
            state: SelectState::new(config),
            outside_press: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> &SelectState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_watching_outside_press(&self) -> bool {
        self.outside_press.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.next_deadline()
    }

    pub fn dispatch(
        &mut self,
        action: SelectAction,
        options: &[SelectOption],
        outside_press: &OutsidePressRegistry,
    ) -> SelectResponse {
        let result = self.state.dispatch(action, options);
        let mut response = SelectResponse {
            consumed: true,
            redraw: result.state_changed,
            changed: None,
        };
        for effect in result.effects {
            match effect {
                SelectEffect::Changed(value) => {
                    tracing::debug!(select = self.id, value = %value, "select value chosen");
                    response.changed = Some(value);
                }
                SelectEffect::WatchOutsidePress => {
                    self.outside_press = Some(outside_press.subscribe(self.id));
                }
                SelectEffect::ReleaseOutsidePress => {
                    self.outside_press = None;
                }
            }
        }
        response
    }

    pub fn toggle(&mut self, options: &[SelectOption], cx: &SelectCx<'_>) -> SelectResponse {
        let space = self.space(cx);
        self.dispatch(SelectAction::Toggle { space }, options, cx.outside_press)
    }

    pub fn close(
        &mut self,
        options: &[SelectOption],
        outside_press: &OutsidePressRegistry,
    ) -> SelectResponse {
        self.dispatch(SelectAction::Close, options, outside_press)
    }

    /// Publishes a due search term. Returns `true` when the visible list changed.
    pub fn tick(&mut self, now: Instant, options: &[SelectOption]) -> bool {
        self.state
            .dispatch(SelectAction::Tick { now }, options)
            .state_changed
    }

    /// Keys for a focused select. While open the control is modal and swallows everything except
    /// `Tab`/`BackTab`, which close it and fall through so focus can move on.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        options: &[SelectOption],
        cx: &SelectCx<'_>,
    ) -> SelectResponse {
        if !key.is_press() {
            return SelectResponse::ignored();
        }

        if !self.state.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ') => {
                    let space = self.space(cx);
                    self.dispatch(SelectAction::Open { space }, options, cx.outside_press)
                }
                _ => SelectResponse::ignored(),
            };
        }

        let now = cx.now;
        let action = match key.code {
            KeyCode::Esc => SelectAction::Close,
            KeyCode::Tab | KeyCode::BackTab => {
                let mut response = self.close(options, cx.outside_press);
                response.consumed = false;
                return response;
            }
            KeyCode::Enter => SelectAction::ChooseHighlighted,
            KeyCode::Up => SelectAction::MoveHighlight { delta: -1 },
            KeyCode::Down => SelectAction::MoveHighlight { delta: 1 },
            KeyCode::PageUp => SelectAction::MoveHighlight { delta: -PAGE_ROWS },
            KeyCode::PageDown => SelectAction::MoveHighlight { delta: PAGE_ROWS },
            KeyCode::Home => SelectAction::MoveHighlight {
                delta: isize::MIN / 2,
            },
            KeyCode::End => SelectAction::MoveHighlight {
                delta: isize::MAX / 2,
            },
            KeyCode::Backspace => SelectAction::SearchBackspace { now },
            _ => match key.text_char() {
                Some(ch) => SelectAction::SearchAppend { ch, now },
                None => return SelectResponse::consumed(),
            },
        };
        self.dispatch(action, options, cx.outside_press)
    }

    /// Pasted text extends the search term of an open panel.
    pub fn handle_paste(
        &mut self,
        text: &str,
        options: &[SelectOption],
        cx: &SelectCx<'_>,
    ) -> SelectResponse {
        if !self.state.is_open() {
            return SelectResponse::ignored();
        }
        let mut term = self.state.search_term().to_string();
        paste_text(&mut term, text);
        self.dispatch(
            SelectAction::SetSearch { term, now: cx.now },
            options,
            cx.outside_press,
        )
    }

    /// Pointer events routed from the UI runtime.
    pub fn handle_ui_event(
        &mut self,
        event: &UiEvent,
        options: &[SelectOption],
        cx: &SelectCx<'_>,
    ) -> SelectResponse {
        match event {
            UiEvent::OutsidePress { owner, .. } if *owner == self.id => {
                // The press still belongs to whatever was under the pointer.
                let mut response = self.close(options, cx.outside_press);
                response.consumed = false;
                response
            }
            UiEvent::Click { id, .. } => {
                let Some(node) = cx.tree.node(*id) else {
                    return SelectResponse::ignored();
                };
                match node.kind {
                    NodeKind::SelectTrigger { select } if select == self.id => {
                        self.toggle(options, cx)
                    }
                    NodeKind::SelectOption { select, index } if select == self.id => {
                        self.dispatch(SelectAction::Choose { index }, options, cx.outside_press)
                    }
                    NodeKind::SelectPanel { select } if select == self.id => {
                        SelectResponse::consumed()
                    }
                    _ => SelectResponse::ignored(),
                }
            }
            UiEvent::Scroll { id, delta, .. } => {
                let over_panel = cx.tree.node(*id).is_some_and(|n| {
                    n.kind == NodeKind::SelectPanel { select: self.id }
                });
                if !over_panel {
                    return SelectResponse::ignored();
                }
                self.dispatch(
                    SelectAction::MoveHighlight { delta: *delta },
                    options,
                    cx.outside_press,
                )
            }
            _ => SelectResponse::ignored(),
        }
    }

    fn space(&self, cx: &SelectCx<'_>) -> VerticalSpace {
        cx.tree
            .select_trigger(self.id)
            .map(|trigger| trigger.vertical_space_in(cx.viewport))
            .unwrap_or_default()
    }

    fn id_path(&self) -> IdPath {
        IdPath::root("select").push_u64(self.id as u64)
    }
}

/// The closed-state face of a select, one row tall.
pub struct SelectTrigger<'a> {
    pub control: &'a SelectControl,
    pub options: &'a [SelectOption],
    pub value: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
    pub focused: bool,
    pub styles: SelectStyles,
}

impl Widget for SelectTrigger<'_> {
    fn ui(&mut self, ui: &mut Ui) {
        let rect = Rect::new(ui.rect.x, ui.rect.y, ui.rect.w, ui.rect.h.min(1));
        if rect.is_empty() {
            return;
        }

        let select = self.control.id();
        ui.tree.push(Node {
            id: self.control.id_path().push_str("trigger").finish(),
            rect,
            layer: LAYER_BASE,
            z: 0,
            sense: Sense::CLICK | Sense::HOVER,
            kind: NodeKind::SelectTrigger { select },
        });

        let base = if self.focused || self.control.is_open() {
            self.styles.base.patch(self.styles.focused)
        } else {
            self.styles.base
        };
        ui.painter.fill_rect(rect, base);

        // Layout: " <text…> * ▾" with the marker and arrow pinned to the right edge.
        let text_clip = rect.inset(Insets {
            left: 1,
            right: 4,
            top: 0,
            bottom: 0,
        });
        let text_pos = Pos::new(text_clip.x, rect.y);
        match find_selected(self.options, self.value) {
            Some(option) => {
                let text = match option.icon {
                    Some(glyph) => format!("{} {}", glyph.symbol(), option.label),
                    None => option.label.clone(),
                };
                ui.painter.text_clipped(text_pos, text, base, text_clip);
            }
            None => {
                let style = base.patch(self.styles.placeholder);
                ui.painter
                    .text_clipped(text_pos, self.placeholder, style, text_clip);
            }
        }

        if rect.w < 4 {
            return;
        }
        let state = self.control.state();
        if state.shows_required_marker(self.required, self.value) {
            ui.painter.text(
                Pos::new(rect.right() - 3, rect.y),
                "*",
                base.patch(self.styles.marker),
            );
        }
        let arrow = match (state.is_open(), state.drop_position()) {
            (true, DropPosition::Up) => "▴",
            _ => "▾",
        };
        ui.painter
            .text(Pos::new(rect.right() - 2, rect.y), arrow, base);
    }
}

/// The open panel: search line plus the filtered, capped option rows. Paints nothing when the
/// control is closed.
pub struct SelectPanel<'a> {
    pub control: &'a SelectControl,
    pub options: &'a [SelectOption],
    pub anchor: Rect,
    pub max_rows: u16,
    pub styles: SelectStyles,
}

impl SelectPanel<'_> {
    fn panel_rect(&self, screen: Rect, rows: u16) -> Rect {
        let width = self.anchor.w.max(MIN_PANEL_WIDTH).min(screen.w);
        let height = rows.saturating_add(3);
        let x = self
            .anchor
            .x
            .min(screen.right().saturating_sub(width))
            .max(screen.x);

        let below = Rect::new(x, self.anchor.bottom(), width, height).intersect(screen);
        match self.control.state().drop_position() {
            DropPosition::Down => below,
            DropPosition::Up => {
                let y = self.anchor.y.saturating_sub(height).max(screen.y);
                let h = self.anchor.y.saturating_sub(y);
                // Border, search line and one option row at least.
                if h < MIN_PANEL_HEIGHT {
                    return below;
                }
                Rect::new(x, y, width, h)
            }
        }
    }
}

impl Widget for SelectPanel<'_> {
    fn ui(&mut self, ui: &mut Ui) {
        let state = self.control.state();
        if !state.is_open() || ui.rect.is_empty() {
            return;
        }

        let visible = state.visible(self.options);
        let rows = (visible.len() as u16).clamp(1, self.max_rows.max(1));
        let panel = self.panel_rect(ui.rect, rows);
        if panel.w < 4 || panel.h < 3 {
            return;
        }

        let select = self.control.id();
        let ids = self.control.id_path();
        ui.tree.push(Node {
            id: ids.push_str("panel").finish(),
            rect: panel,
            layer: LAYER_OVERLAY,
            z: 0,
            sense: Sense::CLICK | Sense::SCROLL,
            kind: NodeKind::SelectPanel { select },
        });

        ui.painter.fill_rect(panel, self.styles.base);
        ui.painter
            .border(panel, self.styles.border, BorderKind::Rounded);

        let inner = panel.inset(Insets::all(1));
        let (search_row, list) = inner.split_top(1);

        let prefix = "⌕ ";
        let search_pos = Pos::new(search_row.x, search_row.y);
        if state.search_term().is_empty() {
            ui.painter.text_clipped(
                search_pos,
                format!("{prefix}{SEARCH_PLACEHOLDER}"),
                self.styles.base.patch(self.styles.muted),
                search_row,
            );
        } else {
            ui.painter.text_clipped(
                search_pos,
                format!("{prefix}{}", state.search_term()),
                self.styles.base,
                search_row,
            );
        }
        let typed_w = (prefix.width() + state.search_term().width()).min(u16::MAX as usize) as u16;
        let cursor_x = search_row
            .x
            .saturating_add(typed_w)
            .min(search_row.right().saturating_sub(1));
        ui.painter.set_cursor(Pos::new(cursor_x, search_row.y));

        if list.is_empty() {
            return;
        }

        if visible.is_empty() {
            ui.painter.text_clipped(
                Pos::new(list.x, list.y),
                EMPTY_RESULTS_TEXT,
                self.styles.base.patch(self.styles.muted),
                list,
            );
            return;
        }

        let shown = list.h as usize;
        let highlighted = state.highlighted();
        let offset = highlighted.saturating_sub(shown.saturating_sub(1));
        for (row, (index, option)) in visible
            .iter()
            .enumerate()
            .skip(offset)
            .take(shown)
            .enumerate()
        {
            let row_rect = Rect::new(list.x, list.y + row as u16, list.w, 1);
            ui.tree.push(Node {
                id: ids.push_str("option").push_u64(index as u64).finish(),
                rect: row_rect,
                layer: LAYER_OVERLAY,
                z: 0,
                sense: Sense::CLICK | Sense::HOVER,
                kind: NodeKind::SelectOption { select, index },
            });

            let style = if index == highlighted {
                self.styles.base.patch(self.styles.highlighted)
            } else {
                self.styles.base
            };
            ui.painter.fill_rect(row_rect, style);

            let icon = option.icon.map(|g| g.symbol()).unwrap_or(' ');
            let label = format!("{icon} {}", option.label);
            let label_w = label.width();
            ui.painter
                .text_clipped(Pos::new(row_rect.x, row_rect.y), label, style, row_rect);

            if let Some(subtext) = option.subtext.as_deref() {
                let x = row_rect
                    .x
                    .saturating_add(label_w.min(u16::MAX as usize) as u16)
                    .saturating_add(2);
                ui.painter.text_clipped(
                    Pos::new(x, row_rect.y),
                    subtext,
                    style.patch(self.styles.muted),
                    row_rect,
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/select.rs"]
mod tests;
