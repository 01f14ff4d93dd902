use super::mock::{self, Metric};
use super::theme::UiTheme;
use crate::ui::core::geom::{Insets, Pos, Rect};
use crate::ui::core::painter::BorderKind;
use crate::ui::core::widget::Ui;

pub const TITLE: &str = "Painel de Obras";
const CARD_H: u16 = 5;
const NAME_W: u16 = 18;

/// Read-only overview: metric cards and a per-neighbourhood request table.
pub struct Dashboard {
    metrics: Vec<Metric>,
    by_bairro: Vec<(&'static str, u32)>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            metrics: mock::metrics(),
            by_bairro: mock::requests_by_bairro(),
        }
    }

    pub fn render(&self, ui: &mut Ui, theme: &UiTheme) {
        let area = ui.rect;
        if area.is_empty() {
            return;
        }

        let (header, rest) = area.split_top(3);
        ui.painter
            .text_clipped(Pos::new(header.x, header.y), TITLE, theme.title(), header);
        ui.painter.text_clipped(
            Pos::new(header.x, header.y + 1),
            "Visão geral das solicitações e ordens de serviço",
            theme.muted(),
            header,
        );

        let per_row: u16 = if rest.w >= 72 { 4 } else { 2 };
        let card_rows = (self.metrics.len() as u16).div_ceil(per_row);
        let (cards_area, rest) = rest.split_top(card_rows * CARD_H);
        for (i, metric) in self.metrics.iter().enumerate() {
            let row = i as u16 / per_row;
            let line = Rect::new(cards_area.x, cards_area.y + row * CARD_H, cards_area.w, CARD_H)
                .intersect(cards_area);
            let cols = line.columns(per_row, 1);
            if let Some(card) = cols.get(i % per_row as usize) {
                metric_card(ui, *card, metric, theme);
            }
        }

        let table = rest.inset(Insets {
            left: 0,
            right: 0,
            top: 1,
            bottom: 0,
        });
        self.render_table(ui, table, theme);
    }

    fn render_table(&self, ui: &mut Ui, area: Rect, theme: &UiTheme) {
        let (title, mut rows) = area.split_top(2);
        ui.painter.text_clipped(
            Pos::new(title.x, title.y),
            "Solicitações por bairro",
            theme.label(),
            title,
        );

        let max = self.by_bairro.iter().map(|(_, n)| *n).max().unwrap_or(0);
        let bar_w = area.w.saturating_sub(NAME_W + 5);
        for (name, count) in &self.by_bairro {
            if rows.is_empty() {
                break;
            }
            let (row, rest) = rows.split_top(1);
            rows = rest;

            ui.painter
                .text_clipped(Pos::new(row.x, row.y), *name, Default::default(), row);
            let len = bar_len(*count, max, bar_w);
            let bar_x = row.x.saturating_add(NAME_W);
            if len > 0 {
                ui.painter
                    .hline(Pos::new(bar_x, row.y), len, '█', theme.title());
            }
            ui.painter.text_clipped(
                Pos::new(bar_x.saturating_add(len).saturating_add(1), row.y),
                count.to_string(),
                theme.muted(),
                row,
            );
        }
    }
}

/// Cells of a bar for `value` when `max` fills `width`. Non-zero values get at least one cell.
pub fn bar_len(value: u32, max: u32, width: u16) -> u16 {
    if max == 0 || value == 0 || width == 0 {
        return 0;
    }
    let len = (u64::from(value) * u64::from(width) / u64::from(max)) as u16;
    len.clamp(1, width)
}

fn metric_card(ui: &mut Ui, rect: Rect, metric: &Metric, theme: &UiTheme) {
    if rect.w < 4 || rect.h < 3 {
        return;
    }
    ui.painter
        .border(rect, theme.border(false), BorderKind::Rounded);
    let inner = rect.inset(Insets::xy(2, 1));
    let lines = [
        (metric.label, theme.muted()),
        (metric.value, theme.title()),
        (metric.detail, theme.muted()),
    ];
    for (dy, (text, style)) in lines.into_iter().enumerate() {
        let y = inner.y + dy as u16;
        if y >= inner.bottom() {
            break;
        }
        ui.painter
            .text_clipped(Pos::new(inner.x, y), text, style, inner);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/dashboard.rs"]
mod tests;
