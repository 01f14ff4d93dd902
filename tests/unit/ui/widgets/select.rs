use super::*;
use crate::core::event::{InputEvent, MouseButton, MouseEvent, MouseEventKind};
use crate::kernel::select::Glyph;
use crate::ui::backend::test::TestBackend;
use crate::ui::backend::Backend;
use crate::ui::core::painter::Painter;
use crate::ui::core::runtime::UiRuntime;
use std::time::Duration;

const SCREEN: Rect = Rect::new(0, 0, 40, 20);
const SELECT: u32 = 7;

fn prioridades() -> Vec<SelectOption> {
    vec![
        SelectOption::new("b", "Baixa"),
        SelectOption::new("n", "Normal"),
        SelectOption::new("a", "Alta").icon(Glyph::Alert),
        SelectOption::new("u", "Urgente").subtext("risco imediato"),
    ]
}

fn config() -> SelectConfig {
    SelectConfig {
        flip_threshold: 8,
        search_delay: Duration::ZERO,
        ..SelectConfig::default()
    }
}

struct Harness {
    control: SelectControl,
    options: Vec<SelectOption>,
    value: String,
    required: bool,
    anchor: Rect,
    runtime: UiRuntime,
    tree: UiTree,
    backend: TestBackend,
}

impl Harness {
    fn at(anchor: Rect) -> Self {
        let mut h = Self {
            control: SelectControl::new(SELECT, config()),
            options: prioridades(),
            value: String::new(),
            required: false,
            anchor,
            runtime: UiRuntime::new(),
            tree: UiTree::new(),
            backend: TestBackend::new(SCREEN.w, SCREEN.h),
        };
        h.render();
        h
    }

    fn new() -> Self {
        Self::at(Rect::new(2, 1, 30, 1))
    }

    fn render(&mut self) {
        let mut painter = Painter::new();
        self.tree.clear();
        {
            let mut ui = Ui::new(self.anchor, &mut painter, &mut self.tree);
            SelectTrigger {
                control: &self.control,
                options: &self.options,
                value: &self.value,
                placeholder: "Selecione a prioridade",
                required: self.required,
                focused: true,
                styles: SelectStyles::default(),
            }
            .ui(&mut ui);
        }
        {
            let mut ui = Ui::new(SCREEN, &mut painter, &mut self.tree);
            SelectPanel {
                control: &self.control,
                options: &self.options,
                anchor: self.anchor,
                max_rows: 10,
                styles: SelectStyles::default(),
            }
            .ui(&mut ui);
        }
        self.backend.reset();
        self.backend.draw(SCREEN, painter.cmds());
        self.backend.set_cursor(painter.cursor());
    }

    fn apply(&mut self, response: &SelectResponse) {
        if let Some(value) = &response.changed {
            self.value = value.clone();
        }
    }

    fn mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) -> Vec<SelectResponse> {
        let input = InputEvent::Mouse(MouseEvent::new(kind, x, y));
        let out = self.runtime.on_input(&input, &self.tree);
        let mut responses = Vec::new();
        for event in &out.events {
            let cx = SelectCx {
                tree: &self.tree,
                viewport: SCREEN,
                outside_press: self.runtime.outside_press(),
                now: Instant::now(),
            };
            let response = self.control.handle_ui_event(event, &self.options, &cx);
            responses.push(response);
        }
        for response in &responses {
            self.apply(response);
        }
        self.render();
        responses
    }

    fn click(&mut self, x: u16, y: u16) -> Vec<SelectResponse> {
        let mut responses = self.mouse(MouseEventKind::Down(MouseButton::Left), x, y);
        responses.extend(self.mouse(MouseEventKind::Up(MouseButton::Left), x, y));
        responses
    }

    fn key(&mut self, code: KeyCode) -> SelectResponse {
        let cx = SelectCx {
            tree: &self.tree,
            viewport: SCREEN,
            outside_press: self.runtime.outside_press(),
            now: Instant::now(),
        };
        let response = self
            .control
            .handle_key(&KeyEvent::plain(code), &self.options, &cx);
        self.apply(&response);
        self.render();
        response
    }

    fn paste(&mut self, text: &str) -> SelectResponse {
        let cx = SelectCx {
            tree: &self.tree,
            viewport: SCREEN,
            outside_press: self.runtime.outside_press(),
            now: Instant::now(),
        };
        let response = self.control.handle_paste(text, &self.options, &cx);
        self.render();
        response
    }

    fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(KeyCode::Char(ch));
        }
    }

    fn row(&self, y: u16) -> String {
        self.backend.buffer().row_text(y)
    }

    fn panel_rect(&self) -> Option<Rect> {
        self.tree
            .nodes()
            .iter()
            .find(|n| n.kind == NodeKind::SelectPanel { select: SELECT })
            .map(|n| n.rect)
    }

    fn option_rows(&self) -> usize {
        self.tree
            .nodes()
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::SelectOption { .. }))
            .count()
    }
}

#[test]
fn trigger_shows_the_selected_label_with_its_glyph() {
    let mut h = Harness::new();
    h.value = "a".to_string();
    h.render();
    assert!(h.row(1).contains("! Alta"));
    assert!(h.row(1).contains('▾'));
}

#[test]
fn trigger_shows_placeholder_for_an_unknown_value() {
    let mut h = Harness::new();
    h.value = "nope".to_string();
    h.render();
    assert!(h.row(1).contains("Selecione a prioridade"));
}

#[test]
fn required_marker_is_shown_only_while_closed_and_empty() {
    let mut h = Harness::new();
    h.required = true;
    h.render();
    assert_eq!(h.backend.buffer().cell(29, 1).unwrap().symbol, "*");

    h.click(5, 1);
    assert!(h.control.is_open());
    assert!(!h.row(1).contains('*'));

    h.key(KeyCode::Esc);
    h.value = "n".to_string();
    h.render();
    assert!(!h.row(1).contains('*'));
}

#[test]
fn clicking_the_trigger_toggles_the_panel_and_outside_watch() {
    let mut h = Harness::new();
    assert!(h.panel_rect().is_none());

    h.click(5, 1);
    assert!(h.control.is_open());
    assert!(h.control.is_watching_outside_press());
    assert!(h.runtime.outside_press().is_watching(SELECT));
    assert!(h.panel_rect().is_some());
    assert_eq!(h.option_rows(), 4);

    h.click(5, 1);
    assert!(!h.control.is_open());
    assert!(h.runtime.outside_press().is_empty());
    assert!(h.panel_rect().is_none());
}

#[test]
fn clicking_an_option_reports_its_value_and_closes() {
    let mut h = Harness::new();
    h.click(5, 1);

    let panel = h.panel_rect().unwrap();
    assert_eq!(panel.y, 2);
    // Border, search line, then options.
    assert!(h.row(4).contains("Baixa"));
    assert!(h.row(5).contains("Normal"));

    let responses = h.click(8, 5);
    let changed: Vec<_> = responses.iter().filter_map(|r| r.changed.clone()).collect();
    assert_eq!(changed, vec!["n".to_string()]);
    assert_eq!(h.value, "n");
    assert!(!h.control.is_open());
    assert!(h.runtime.outside_press().is_empty());
    assert!(h.row(1).contains("Normal"));
}

#[test]
fn pressing_outside_closes_without_consuming_the_press() {
    let mut h = Harness::new();
    h.click(5, 1);
    h.type_str("al");

    let responses = h.mouse(MouseEventKind::Down(MouseButton::Left), 39, 19);
    let closing: Vec<_> = responses.iter().filter(|r| r.redraw).collect();
    assert_eq!(closing.len(), 1);
    assert!(!closing[0].consumed);
    assert!(closing[0].changed.is_none());
    assert!(!h.control.is_open());
    assert_eq!(h.control.state().search_term(), "");
    assert!(h.runtime.outside_press().is_empty());
    assert_eq!(h.value, "");
}

#[test]
fn pressing_inside_the_panel_does_not_close_it() {
    let mut h = Harness::new();
    h.click(5, 1);
    // Search line.
    h.click(10, 3);
    assert!(h.control.is_open());
}

#[test]
fn typing_filters_the_rows_and_shows_the_search_cursor() {
    let mut h = Harness::new();
    h.click(5, 1);
    h.type_str("al");

    assert!(h.row(3).contains("⌕ al"));
    assert_eq!(h.option_rows(), 2);
    assert!(h.row(4).contains("Normal"));
    assert!(h.row(5).contains("Alta"));
    assert_eq!(h.backend.cursor(), Some(Pos::new(7, 3)));
}

#[test]
fn subtext_is_rendered_after_the_label() {
    let mut h = Harness::new();
    h.click(5, 1);
    h.type_str("risco");
    assert!(h.row(4).contains("Urgente  risco imediato"));
}

#[test]
fn no_match_shows_the_empty_state() {
    let mut h = Harness::new();
    h.click(5, 1);
    h.type_str("zzz");
    assert_eq!(h.option_rows(), 0);
    assert!(h.row(4).contains(EMPTY_RESULTS_TEXT));
}

#[test]
fn panel_drops_up_when_the_trigger_is_near_the_bottom() {
    let mut h = Harness::at(Rect::new(2, 18, 30, 1));
    h.click(5, 18);
    assert_eq!(h.control.state().drop_position(), DropPosition::Up);

    let panel = h.panel_rect().unwrap();
    assert_eq!(panel.bottom(), 18);
    assert!(h.row(18).contains('▴'));
}

#[test]
fn panel_drops_down_when_there_is_room_below() {
    let mut h = Harness::new();
    h.click(5, 1);
    assert_eq!(h.control.state().drop_position(), DropPosition::Down);
    assert_eq!(h.panel_rect().unwrap().y, h.anchor.bottom());
}

#[test]
fn upward_panel_without_room_for_a_row_opens_below() {
    let options = prioridades();
    let registry = OutsidePressRegistry::new();
    let mut control = SelectControl::new(
        SELECT,
        SelectConfig {
            flip_threshold: 2,
            ..config()
        },
    );
    control.dispatch(
        SelectAction::Open {
            space: VerticalSpace { above: 2, below: 1 },
        },
        &options,
        &registry,
    );
    assert_eq!(control.state().drop_position(), DropPosition::Up);

    let mut painter = Painter::new();
    let mut tree = UiTree::new();
    let mut ui = Ui::new(SCREEN, &mut painter, &mut tree);
    SelectPanel {
        control: &control,
        options: &options,
        anchor: Rect::new(2, 2, 30, 1),
        max_rows: 4,
        styles: SelectStyles::default(),
    }
    .ui(&mut ui);

    let panel = tree
        .nodes()
        .iter()
        .find(|n| n.kind == NodeKind::SelectPanel { select: SELECT })
        .map(|n| n.rect)
        .unwrap();
    assert_eq!(panel.y, 3);
    let rows = tree
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::SelectOption { .. }))
        .count();
    assert_eq!(rows, 4);
}

#[test]
fn panel_never_renders_more_than_max_results_rows() {
    let options: Vec<_> = (0..120)
        .map(|i| SelectOption::new(format!("b{i}"), format!("Bairro {i}")))
        .collect();
    let registry = OutsidePressRegistry::new();
    let mut control = SelectControl::new(1, SelectConfig::default());
    control.dispatch(
        SelectAction::Open {
            space: VerticalSpace {
                above: 0,
                below: 500,
            },
        },
        &options,
        &registry,
    );

    let mut painter = Painter::new();
    let mut tree = UiTree::new();
    let mut ui = Ui::new(Rect::new(0, 0, 40, 200), &mut painter, &mut tree);
    SelectPanel {
        control: &control,
        options: &options,
        anchor: Rect::new(0, 0, 30, 1),
        max_rows: 100,
        styles: SelectStyles::default(),
    }
    .ui(&mut ui);

    let rows = tree
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::SelectOption { .. }))
        .count();
    assert_eq!(rows, 50);
}

#[test]
fn keyboard_opens_filters_and_chooses() {
    let mut h = Harness::new();
    assert!(h.key(KeyCode::Enter).consumed);
    assert!(h.control.is_open());

    h.type_str("urg");
    let response = h.key(KeyCode::Enter);
    assert_eq!(response.changed.as_deref(), Some("u"));
    assert!(!h.control.is_open());
    assert!(h.runtime.outside_press().is_empty());
}

#[test]
fn arrow_keys_move_the_highlight() {
    let mut h = Harness::new();
    h.key(KeyCode::Down);
    assert!(h.control.is_open());
    h.key(KeyCode::Down);
    h.key(KeyCode::Down);
    assert_eq!(h.control.state().highlighted(), 2);
    h.key(KeyCode::Up);
    let response = h.key(KeyCode::Enter);
    assert_eq!(response.changed.as_deref(), Some("n"));
}

#[test]
fn closed_select_ignores_text_keys() {
    let mut h = Harness::new();
    let response = h.key(KeyCode::Char('x'));
    assert!(!response.consumed);
    assert!(!h.control.is_open());
}

#[test]
fn tab_closes_and_lets_focus_move() {
    let mut h = Harness::new();
    h.key(KeyCode::Enter);
    let response = h.key(KeyCode::Tab);
    assert!(!response.consumed);
    assert!(!h.control.is_open());
    assert!(h.runtime.outside_press().is_empty());
}

#[test]
fn wheel_over_the_panel_moves_the_highlight() {
    let mut h = Harness::new();
    h.click(5, 1);
    h.mouse(MouseEventKind::ScrollDown, 10, 5);
    assert_eq!(h.control.state().highlighted(), 1);
}

#[test]
fn dropping_an_open_control_releases_its_outside_watch() {
    let mut h = Harness::new();
    h.click(5, 1);
    assert_eq!(h.runtime.outside_press().len(), 1);

    let Harness {
        control, runtime, ..
    } = h;
    drop(control);
    assert!(runtime.outside_press().is_empty());
}

#[test]
fn paste_extends_the_search_of_an_open_panel() {
    let mut h = Harness::new();
    h.click(5, 1);
    h.type_str("u");

    let response = h.paste("rg\nente");
    assert!(response.consumed);
    assert!(response.redraw);
    assert_eq!(h.control.state().search_term(), "urg ente");
    assert_eq!(h.option_rows(), 0);
    assert!(h.row(3).contains("⌕ urg ente"));

    h.key(KeyCode::Backspace);
    h.key(KeyCode::Backspace);
    h.key(KeyCode::Backspace);
    h.key(KeyCode::Backspace);
    h.key(KeyCode::Backspace);
    assert_eq!(h.control.state().search_term(), "urg");
    assert_eq!(h.option_rows(), 1);
    assert!(h.row(4).contains("Urgente"));
}

#[test]
fn paste_is_ignored_while_closed() {
    let mut h = Harness::new();
    let response = h.paste("alta");
    assert!(!response.consumed);
    assert!(!h.control.is_open());
    assert_eq!(h.control.state().search_term(), "");
}
