use super::mock::{self, OrderStatus, WorkOrder, ALL_STATUSES};
use super::theme::UiTheme;
use super::ScreenResponse;
use crate::core::event::{KeyCode, KeyEvent};
use crate::kernel::select::{SelectConfig, SelectOption};
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::id::IdPath;
use crate::ui::core::input::UiEvent;
use crate::ui::core::runtime::OutsidePressRegistry;
use crate::ui::core::style::{Mod, Style};
use crate::ui::core::tree::{Node, NodeKind, Sense, LAYER_BASE};
use crate::ui::core::widget::{Ui, Widget};
use crate::ui::widgets::{SelectControl, SelectCx, SelectPanel, SelectTrigger};
use std::time::Instant;

pub const TITLE: &str = "Ordens em Execução";
pub const SELECT_STATUS: u32 = 4;
pub const EMPTY_LIST_TEXT: &str = "Nenhuma ordem com este status";

const FILTER_W: u16 = 32;
const CODE_W: u16 = 9;
const TEAM_W: u16 = 20;
const STATUS_W: u16 = 16;
const BAR_W: u16 = 10;
const PROGRESS_W: u16 = BAR_W + 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionFocus {
    Filter,
    List,
}

/// Work orders in the field, filterable by status.
pub struct ExecutionBoard {
    orders: Vec<WorkOrder>,
    status_options: Vec<SelectOption>,
    status_filter: String,
    status_select: SelectControl,
    highlighted: usize,
    focus: ExecutionFocus,
    panel_rows: u16,
    anchor: Rect,
}

impl ExecutionBoard {
    pub fn new(config: SelectConfig, panel_rows: u16) -> Self {
        Self {
            orders: mock::work_orders(),
            status_options: mock::status_filter_options(),
            status_filter: ALL_STATUSES.to_string(),
            status_select: SelectControl::new(SELECT_STATUS, config),
            highlighted: 0,
            focus: ExecutionFocus::List,
            panel_rows,
            anchor: Rect::default(),
        }
    }

    pub fn focus(&self) -> ExecutionFocus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: ExecutionFocus) {
        self.focus = focus;
    }

    pub fn status_filter(&self) -> &str {
        &self.status_filter
    }

    pub fn status_select(&self) -> &SelectControl {
        &self.status_select
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn visible_orders(&self) -> Vec<&WorkOrder> {
        self.orders
            .iter()
            .filter(|o| {
                self.status_filter.is_empty()
                    || self.status_filter == ALL_STATUSES
                    || o.status.value() == self.status_filter
            })
            .collect()
    }

    pub fn captures_text(&self) -> bool {
        self.status_select.is_open()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.status_select.tick(now, &self.status_options)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.status_select.next_deadline()
    }

    pub fn close_overlays(&mut self, outside_press: &OutsidePressRegistry) {
        self.status_select
            .close(&self.status_options, outside_press);
    }

    pub fn handle_key(&mut self, key: &KeyEvent, cx: &SelectCx<'_>) -> ScreenResponse {
        if !key.is_press() {
            return ScreenResponse::ignored();
        }

        let mut out = ScreenResponse::ignored();
        if self.focus == ExecutionFocus::Filter {
            let response = self
                .status_select
                .handle_key(key, &self.status_options, cx);
            if let Some(value) = response.changed.clone() {
                self.apply_filter(value);
            }
            out.merge_select(&response);
            if out.consumed {
                return out;
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    ExecutionFocus::Filter => ExecutionFocus::List,
                    ExecutionFocus::List => ExecutionFocus::Filter,
                };
                return ScreenResponse::handled();
            }
            _ if self.focus == ExecutionFocus::Filter => return out,
            _ => {}
        }

        let delta: isize = match key.code {
            KeyCode::Up => -1,
            KeyCode::Down => 1,
            KeyCode::PageUp => -5,
            KeyCode::PageDown => 5,
            KeyCode::Home => isize::MIN / 2,
            KeyCode::End => isize::MAX / 2,
            KeyCode::Enter => {
                let visible = self.visible_orders();
                return match visible.get(self.highlighted) {
                    Some(order) => ScreenResponse::with_status(describe(order)),
                    None => out,
                };
            }
            _ => return out,
        };
        self.move_highlight(delta);
        ScreenResponse::handled()
    }

    pub fn handle_paste(&mut self, text: &str, cx: &SelectCx<'_>) -> ScreenResponse {
        let response = self
            .status_select
            .handle_paste(text, &self.status_options, cx);
        let mut out = ScreenResponse::ignored();
        out.merge_select(&response);
        out
    }

    pub fn handle_ui_event(&mut self, event: &UiEvent, cx: &SelectCx<'_>) -> ScreenResponse {
        let response = self
            .status_select
            .handle_ui_event(event, &self.status_options, cx);
        if let Some(value) = response.changed.clone() {
            self.apply_filter(value);
        }
        let mut out = ScreenResponse::ignored();
        out.merge_select(&response);
        if response.consumed {
            self.focus = ExecutionFocus::Filter;
            return out;
        }

        match event {
            UiEvent::Click { id, .. } => {
                if let Some(NodeKind::ListRow { index }) = cx.tree.node(*id).map(|n| n.kind) {
                    self.highlighted = index;
                    self.focus = ExecutionFocus::List;
                    return ScreenResponse::handled();
                }
            }
            UiEvent::Scroll { id, delta, .. } => {
                if let Some(NodeKind::ListRow { .. }) = cx.tree.node(*id).map(|n| n.kind) {
                    self.move_highlight(*delta);
                    return ScreenResponse::handled();
                }
            }
            _ => {}
        }
        out
    }

    pub fn render(&mut self, ui: &mut Ui, overlay: Rect, theme: &UiTheme) {
        let area = ui.rect;
        if area.is_empty() {
            return;
        }

        let (header, body) = area.split_top(3);
        ui.painter
            .text_clipped(Pos::new(header.x, header.y), TITLE, theme.title(), header);
        ui.painter.text_clipped(
            Pos::new(header.x, header.y + 1),
            "Tab: filtro/lista · ↑↓: navegar · Enter: detalhes",
            theme.muted(),
            header,
        );

        let (filter_row, body) = body.split_top(2);
        let (label, trigger) = filter_row.split_top(1).0.split_left(8);
        ui.painter
            .text_clipped(Pos::new(label.x, label.y), "Status", theme.label(), label);
        self.anchor = Rect::new(trigger.x, trigger.y, trigger.w.min(FILTER_W), 1);
        let anchor = self.anchor;
        ui.with_rect(anchor, |ui| {
            SelectTrigger {
                control: &self.status_select,
                options: &self.status_options,
                value: &self.status_filter,
                placeholder: "Filtrar por status",
                required: false,
                focused: self.focus == ExecutionFocus::Filter,
                styles: theme.select_styles(),
            }
            .ui(ui)
        });

        self.render_table(ui, body, theme);

        ui.with_rect(overlay, |ui| {
            SelectPanel {
                control: &self.status_select,
                options: &self.status_options,
                anchor,
                max_rows: self.panel_rows,
                styles: theme.select_styles(),
            }
            .ui(ui)
        });
    }

    fn render_table(&self, ui: &mut Ui, area: Rect, theme: &UiTheme) {
        let (head, mut rows) = area.split_top(1);
        let show_team = area.w >= CODE_W + TEAM_W + STATUS_W + PROGRESS_W + 20;
        let head_style = theme.muted().add_mod(Mod::BOLD);
        for (text, x) in [
            ("Código", 0),
            ("Serviço", CODE_W),
            ("Status", area.w.saturating_sub(PROGRESS_W + STATUS_W)),
            ("Progresso", area.w.saturating_sub(PROGRESS_W)),
        ] {
            ui.painter
                .text_clipped(Pos::new(head.x + x, head.y), text, head_style, head);
        }
        if show_team {
            let x = area.w.saturating_sub(PROGRESS_W + STATUS_W + TEAM_W);
            ui.painter
                .text_clipped(Pos::new(head.x + x, head.y), "Equipe", head_style, head);
        }

        let visible = self.visible_orders();
        if visible.is_empty() {
            ui.painter.text_clipped(
                Pos::new(rows.x, rows.y),
                EMPTY_LIST_TEXT,
                theme.muted(),
                rows,
            );
            return;
        }

        for (index, order) in visible.iter().enumerate() {
            if rows.is_empty() {
                break;
            }
            let (row, rest) = rows.split_top(1);
            rows = rest;

            ui.tree.push(Node {
                id: IdPath::root("execution")
                    .push_str(order.code)
                    .finish(),
                rect: row,
                layer: LAYER_BASE,
                z: 0,
                sense: Sense::CLICK | Sense::HOVER | Sense::SCROLL,
                kind: NodeKind::ListRow { index },
            });

            let base = if index == self.highlighted {
                let style = theme.selected();
                if self.focus == ExecutionFocus::List {
                    style.add_mod(Mod::BOLD)
                } else {
                    style
                }
            } else {
                Style::default()
            };
            ui.painter.fill_rect(row, base);

            let status_x = row.x + row.w.saturating_sub(PROGRESS_W + STATUS_W);
            let progress_x = row.x + row.w.saturating_sub(PROGRESS_W);
            let title_end = if show_team {
                status_x.saturating_sub(TEAM_W)
            } else {
                status_x
            };

            ui.painter
                .text_clipped(Pos::new(row.x, row.y), order.code, base, row);
            let title_clip = Rect::new(
                row.x + CODE_W,
                row.y,
                title_end.saturating_sub(row.x + CODE_W + 1),
                1,
            );
            ui.painter.text_clipped(
                Pos::new(title_clip.x, row.y),
                format!("{} · {}", order.title, order.bairro),
                base,
                title_clip,
            );
            if show_team {
                let team_clip = Rect::new(title_end, row.y, TEAM_W - 1, 1);
                ui.painter.text_clipped(
                    Pos::new(title_end, row.y),
                    order.team,
                    base.patch(theme.muted()),
                    team_clip,
                );
            }
            ui.painter.text_clipped(
                Pos::new(status_x, row.y),
                status_badge(order.status),
                base.patch(status_style(order.status, theme)),
                row,
            );
            ui.painter.text_clipped(
                Pos::new(progress_x, row.y),
                format!("{} {:>3}%", progress_bar(order.progress, BAR_W), order.progress),
                base,
                row,
            );
        }
    }

    fn apply_filter(&mut self, value: String) {
        tracing::debug!(status = %value, "work order filter changed");
        self.status_filter = value;
        self.highlighted = 0;
    }

    fn move_highlight(&mut self, delta: isize) {
        let max = self.visible_orders().len().saturating_sub(1) as isize;
        self.highlighted = (self.highlighted as isize)
            .saturating_add(delta)
            .clamp(0, max) as usize;
    }
}

/// `filled` cells of `█` followed by `░`, `width` cells in total.
pub fn progress_bar(percent: u8, width: u16) -> String {
    let percent = u32::from(percent.min(100));
    let filled = (percent * u32::from(width) / 100) as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width as usize - filled));
    bar
}

pub fn status_badge(status: OrderStatus) -> String {
    format!("{} {}", status.glyph().symbol(), status.label())
}

fn status_style(status: OrderStatus, theme: &UiTheme) -> Style {
    match status {
        OrderStatus::Waiting => theme.muted(),
        OrderStatus::InProgress => Style::default().fg(theme.accent_fg),
        OrderStatus::Paused => theme.warn(),
        OrderStatus::Done => theme.ok(),
    }
}

fn describe(order: &WorkOrder) -> String {
    format!(
        "{}: {} ({}, {}) · {} · {}%",
        order.code,
        order.title,
        order.bairro,
        order.team,
        order.status.label(),
        order.progress
    )
}

#[cfg(test)]
#[path = "../../tests/unit/app/execution.rs"]
mod tests;
