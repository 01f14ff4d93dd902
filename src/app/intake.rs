use super::mock::{self, ATTACHMENT_NAMES};
use super::theme::UiTheme;
use super::ScreenResponse;
use crate::core::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::kernel::select::{find_selected, SelectConfig, SelectOption};
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::id::IdPath;
use crate::ui::core::input::UiEvent;
use crate::ui::core::runtime::OutsidePressRegistry;
use crate::ui::core::tree::{Node, NodeKind, Sense, LAYER_BASE};
use crate::ui::core::widget::{Ui, Widget};
use crate::ui::widgets::{edit_text, paste_text, SelectControl, SelectCx, SelectPanel, SelectTrigger, TextField};
use std::time::Instant;

pub const TITLE: &str = "Nova Solicitação";
pub const SELECT_TIPO: u32 = 1;
pub const SELECT_BAIRRO: u32 = 2;
pub const SELECT_PRIORIDADE: u32 = 3;

/// Inputs of the request form, in focus order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntakeField {
    Nome,
    Endereco,
    Tipo,
    Bairro,
    Prioridade,
    Descricao,
    Anexos,
}

impl IntakeField {
    pub const ORDER: [IntakeField; 7] = [
        IntakeField::Nome,
        IntakeField::Endereco,
        IntakeField::Tipo,
        IntakeField::Bairro,
        IntakeField::Prioridade,
        IntakeField::Descricao,
        IntakeField::Anexos,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IntakeField::Nome => "Nome do solicitante",
            IntakeField::Endereco => "Endereço",
            IntakeField::Tipo => "Tipo de serviço",
            IntakeField::Bairro => "Bairro",
            IntakeField::Prioridade => "Prioridade",
            IntakeField::Descricao => "Descrição",
            IntakeField::Anexos => "Anexos",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            IntakeField::Nome => "Quem está solicitando",
            IntakeField::Endereco => "Rua, número e referência",
            IntakeField::Tipo => "Selecione o serviço",
            IntakeField::Bairro => "Selecione o bairro",
            IntakeField::Prioridade => "Selecione a prioridade",
            IntakeField::Descricao => "Descreva o problema",
            IntakeField::Anexos => "",
        }
    }

    pub fn required(self) -> bool {
        !matches!(self, IntakeField::Descricao | IntakeField::Anexos)
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            IntakeField::Nome | IntakeField::Endereco | IntakeField::Descricao
        )
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Node id for text fields and the attachment list.
    pub fn node_field(self) -> u32 {
        self.index() as u32
    }

    fn from_node_field(field: u32) -> Option<Self> {
        Self::ORDER.get(field as usize).copied()
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

const SELECT_FIELDS: [IntakeField; 3] = [
    IntakeField::Tipo,
    IntakeField::Bairro,
    IntakeField::Prioridade,
];

/// The "Nova Solicitação" form. Submitting only summarises the request into the status line.
pub struct IntakeForm {
    nome: String,
    endereco: String,
    descricao: String,
    tipo: String,
    bairro: String,
    prioridade: String,
    anexos: Vec<String>,
    next_attachment: usize,
    focus: IntakeField,
    tipo_select: SelectControl,
    bairro_select: SelectControl,
    prioridade_select: SelectControl,
    tipos: Vec<SelectOption>,
    bairros: Vec<SelectOption>,
    prioridades: Vec<SelectOption>,
    panel_rows: u16,
    anchors: [Rect; 3],
}

impl IntakeForm {
    pub fn new(config: SelectConfig, panel_rows: u16) -> Self {
        Self {
            nome: String::new(),
            endereco: String::new(),
            descricao: String::new(),
            tipo: String::new(),
            bairro: String::new(),
            prioridade: String::new(),
            anexos: Vec::new(),
            next_attachment: 0,
            focus: IntakeField::Nome,
            tipo_select: SelectControl::new(SELECT_TIPO, config),
            bairro_select: SelectControl::new(SELECT_BAIRRO, config),
            prioridade_select: SelectControl::new(SELECT_PRIORIDADE, config),
            tipos: mock::service_types(),
            bairros: mock::bairros(),
            prioridades: mock::prioridades(),
            panel_rows,
            anchors: [Rect::default(); 3],
        }
    }

    pub fn focus(&self) -> IntakeField {
        self.focus
    }

    pub fn set_focus(&mut self, field: IntakeField) {
        self.focus = field;
    }

    pub fn value(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::Nome => &self.nome,
            IntakeField::Endereco => &self.endereco,
            IntakeField::Tipo => &self.tipo,
            IntakeField::Bairro => &self.bairro,
            IntakeField::Prioridade => &self.prioridade,
            IntakeField::Descricao => &self.descricao,
            IntakeField::Anexos => "",
        }
    }

    pub fn attachments(&self) -> &[String] {
        &self.anexos
    }

    pub fn select(&self, field: IntakeField) -> Option<&SelectControl> {
        match field {
            IntakeField::Tipo => Some(&self.tipo_select),
            IntakeField::Bairro => Some(&self.bairro_select),
            IntakeField::Prioridade => Some(&self.prioridade_select),
            _ => None,
        }
    }

    /// Text input has the keyboard, so single-letter shortcuts must not fire.
    pub fn captures_text(&self) -> bool {
        self.focus.is_text() || self.open_select().is_some()
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        IntakeField::ORDER
            .iter()
            .filter(|f| f.required() && self.value(**f).is_empty())
            .map(|f| f.label())
            .collect()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for field in SELECT_FIELDS {
            if let Some((control, options, _)) = self.select_parts(field) {
                changed |= control.tick(now, options);
            }
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        SELECT_FIELDS
            .iter()
            .filter_map(|f| self.select(*f).and_then(SelectControl::next_deadline))
            .min()
    }

    pub fn close_overlays(&mut self, outside_press: &OutsidePressRegistry) {
        for field in SELECT_FIELDS {
            if let Some((control, options, _)) = self.select_parts(field) {
                control.close(options, outside_press);
            }
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, cx: &SelectCx<'_>) -> ScreenResponse {
        if !key.is_press() {
            return ScreenResponse::ignored();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            self.close_overlays(cx.outside_press);
            return self.submit();
        }

        let focus = self.focus;
        let mut out = ScreenResponse::ignored();
        if let Some((control, options, value)) = self.select_parts(focus) {
            let response = control.handle_key(key, options, cx);
            if let Some(chosen) = &response.changed {
                *value = chosen.clone();
            }
            out.merge_select(&response);
            if out.consumed {
                return out;
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = focus.next();
                return ScreenResponse::handled();
            }
            KeyCode::BackTab => {
                self.focus = focus.prev();
                return ScreenResponse::handled();
            }
            _ => {}
        }

        match focus {
            IntakeField::Nome | IntakeField::Endereco | IntakeField::Descricao => {
                if key.code == KeyCode::Enter {
                    self.focus = focus.next();
                    return ScreenResponse::handled();
                }
                if let Some(text) = self.text_mut(focus) {
                    if edit_text(text, key) {
                        return ScreenResponse::handled();
                    }
                }
                out
            }
            IntakeField::Anexos => match key.code {
                KeyCode::Char('a') => {
                    self.attach_next();
                    ScreenResponse::handled()
                }
                KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
                    if self.anexos.pop().is_some() {
                        ScreenResponse::handled()
                    } else {
                        ScreenResponse {
                            consumed: true,
                            ..ScreenResponse::ignored()
                        }
                    }
                }
                _ => out,
            },
            IntakeField::Tipo | IntakeField::Bairro | IntakeField::Prioridade => out,
        }
    }

    /// Pasted text goes into an open select's search line, else into the focused text field
    /// with line breaks flattened.
    pub fn handle_paste(&mut self, text: &str, cx: &SelectCx<'_>) -> ScreenResponse {
        let mut out = ScreenResponse::ignored();
        if let Some(field) = self.open_select() {
            if let Some((control, options, _)) = self.select_parts(field) {
                out.merge_select(&control.handle_paste(text, options, cx));
            }
            return out;
        }
        match self.text_mut(self.focus) {
            Some(target) => {
                if paste_text(target, text) {
                    ScreenResponse::handled()
                } else {
                    out
                }
            }
            None => out,
        }
    }

    pub fn handle_ui_event(&mut self, event: &UiEvent, cx: &SelectCx<'_>) -> ScreenResponse {
        let mut out = ScreenResponse::ignored();
        for field in SELECT_FIELDS {
            let Some((control, options, value)) = self.select_parts(field) else {
                continue;
            };
            let response = control.handle_ui_event(event, options, cx);
            if let Some(chosen) = &response.changed {
                *value = chosen.clone();
            }
            out.merge_select(&response);
            if response.consumed {
                self.focus = field;
            }
        }
        if out.consumed {
            return out;
        }

        if let UiEvent::Click { id, .. } = event {
            let target = match cx.tree.node(*id).map(|n| n.kind) {
                Some(NodeKind::TextField { field }) => IntakeField::from_node_field(field),
                Some(NodeKind::AttachmentList { .. }) => Some(IntakeField::Anexos),
                _ => None,
            };
            if let Some(field) = target {
                self.focus = field;
                return ScreenResponse::handled();
            }
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
            "Tab: próximo campo · Ctrl+S: enviar · a/x: anexar/remover foto",
            theme.muted(),
            header,
        );

        let columns: Vec<(Rect, Vec<IntakeField>)> = if body.w >= 60 {
            let cols = body.columns(2, 3);
            vec![
                (
                    cols[0],
                    vec![
                        IntakeField::Nome,
                        IntakeField::Endereco,
                        IntakeField::Descricao,
                        IntakeField::Anexos,
                    ],
                ),
                (cols[1], SELECT_FIELDS.to_vec()),
            ]
        } else {
            vec![(body, IntakeField::ORDER.to_vec())]
        };

        for (column, fields) in columns {
            let mut rest = column;
            for field in fields {
                if rest.h < 2 {
                    break;
                }
                let (label_row, after_label) = rest.split_top(1);
                let label_style = if field == self.focus {
                    theme.label().fg(theme.focus_border)
                } else {
                    theme.label()
                };
                let label = match field {
                    IntakeField::Anexos => format!("{} ({})", field.label(), self.anexos.len()),
                    _ => field.label().to_string(),
                };
                ui.painter.text_clipped(
                    Pos::new(label_row.x, label_row.y),
                    label,
                    label_style,
                    label_row,
                );

                if field == IntakeField::Anexos {
                    self.render_attachments(ui, after_label, theme);
                    break;
                }

                let (input, after_input) = after_label.split_top(1);
                self.render_input(ui, field, input, theme);
                rest = after_input.split_top(1).1;
            }
        }

        // Panels last so they cover the fields below them.
        let styles = theme.select_styles();
        for (slot, field) in SELECT_FIELDS.into_iter().enumerate() {
            let (Some(control), options) = (self.select(field), self.options(field)) else {
                continue;
            };
            let anchor = self.anchors[slot];
            ui.with_rect(overlay, |ui| {
                SelectPanel {
                    control,
                    options,
                    anchor,
                    max_rows: self.panel_rows,
                    styles,
                }
                .ui(ui)
            });
        }
    }

    fn render_input(&mut self, ui: &mut Ui, field: IntakeField, rect: Rect, theme: &UiTheme) {
        let focused = field == self.focus;
        if let Some(slot) = SELECT_FIELDS.iter().position(|f| *f == field) {
            self.anchors[slot] = rect;
            let Some(control) = self.select(field) else {
                return;
            };
            ui.with_rect(rect, |ui| {
                SelectTrigger {
                    control,
                    options: self.options(field),
                    value: self.value(field),
                    placeholder: field.placeholder(),
                    required: field.required(),
                    focused,
                    styles: theme.select_styles(),
                }
                .ui(ui)
            });
            return;
        }

        ui.with_rect(rect, |ui| {
            TextField {
                field: field.node_field(),
                value: self.value(field),
                placeholder: field.placeholder(),
                required: field.required(),
                focused,
                styles: theme.text_field_styles(),
            }
            .ui(ui)
        });
    }

    fn render_attachments(&self, ui: &mut Ui, area: Rect, theme: &UiTheme) {
        if area.is_empty() {
            return;
        }
        ui.tree.push(Node {
            id: IdPath::root("intake")
                .push_str("attachments")
                .finish(),
            rect: area,
            layer: LAYER_BASE,
            z: 0,
            sense: Sense::CLICK,
            kind: NodeKind::AttachmentList {
                field: IntakeField::Anexos.node_field(),
            },
        });

        if self.anexos.is_empty() {
            ui.painter.text_clipped(
                Pos::new(area.x, area.y),
                "Nenhuma foto anexada",
                theme.muted(),
                area,
            );
            return;
        }
        for (i, name) in self.anexos.iter().enumerate().take(area.h as usize) {
            let y = area.y + i as u16;
            ui.painter
                .text_clipped(Pos::new(area.x, y), format!("• {name}"), Default::default(), area);
        }
    }

    fn options(&self, field: IntakeField) -> &[SelectOption] {
        match field {
            IntakeField::Tipo => &self.tipos,
            IntakeField::Bairro => &self.bairros,
            IntakeField::Prioridade => &self.prioridades,
            _ => &[],
        }
    }

    fn select_parts(
        &mut self,
        field: IntakeField,
    ) -> Option<(&mut SelectControl, &[SelectOption], &mut String)> {
        match field {
            IntakeField::Tipo => Some((&mut self.tipo_select, self.tipos.as_slice(), &mut self.tipo)),
            IntakeField::Bairro => Some((
                &mut self.bairro_select,
                self.bairros.as_slice(),
                &mut self.bairro,
            )),
            IntakeField::Prioridade => Some((
                &mut self.prioridade_select,
                self.prioridades.as_slice(),
                &mut self.prioridade,
            )),
            _ => None,
        }
    }

    fn open_select(&self) -> Option<IntakeField> {
        SELECT_FIELDS
            .into_iter()
            .find(|f| self.select(*f).is_some_and(SelectControl::is_open))
    }

    fn text_mut(&mut self, field: IntakeField) -> Option<&mut String> {
        match field {
            IntakeField::Nome => Some(&mut self.nome),
            IntakeField::Endereco => Some(&mut self.endereco),
            IntakeField::Descricao => Some(&mut self.descricao),
            _ => None,
        }
    }

    fn attach_next(&mut self) {
        let name = ATTACHMENT_NAMES[self.next_attachment % ATTACHMENT_NAMES.len()];
        self.next_attachment += 1;
        self.anexos.push(name.to_string());
    }

    fn submit(&mut self) -> ScreenResponse {
        let missing = self.missing_required();
        if !missing.is_empty() {
            tracing::debug!(?missing, "request not submitted");
            return ScreenResponse::with_status(format!(
                "Preencha os campos obrigatórios: {}",
                missing.join(", ")
            ));
        }

        let label = |options: &[SelectOption], value: &str| {
            find_selected(options, value)
                .map(|o| o.label.clone())
                .unwrap_or_default()
        };
        let summary = format!(
            "Solicitação registrada: {} em {} ({}), {} anexo(s)",
            label(&self.tipos, &self.tipo),
            label(&self.bairros, &self.bairro),
            label(&self.prioridades, &self.prioridade),
            self.anexos.len()
        );
        tracing::info!(
            tipo = %self.tipo,
            bairro = %self.bairro,
            prioridade = %self.prioridade,
            anexos = self.anexos.len(),
            "request submitted"
        );
        self.clear();
        ScreenResponse::with_status(summary)
    }

    fn clear(&mut self) {
        for text in [
            &mut self.nome,
            &mut self.endereco,
            &mut self.descricao,
            &mut self.tipo,
            &mut self.bairro,
            &mut self.prioridade,
        ] {
            text.clear();
        }
        self.anexos.clear();
        self.focus = IntakeField::Nome;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/intake.rs"]
mod tests;
