use super::*;
use crate::ui::backend::test::TestBackend;
use crate::ui::backend::Backend;
use crate::ui::core::painter::Painter;
use crate::ui::core::tree::UiTree;

fn render(w: u16, h: u16) -> TestBackend {
    let mut painter = Painter::new();
    let mut tree = UiTree::new();
    let mut ui = Ui::new(Rect::new(0, 0, w, h), &mut painter, &mut tree);
    Dashboard::new().render(&mut ui, &UiTheme::default());

    let mut backend = TestBackend::new(w, h);
    backend.draw(backend.area(), painter.cmds());
    backend
}

#[test]
fn shows_title_cards_and_table() {
    let backend = render(100, 30);
    let buf = backend.buffer();
    assert_eq!(buf.find_row(TITLE), Some(0));
    assert!(buf.find_row("Solicitações abertas").is_some());
    assert!(buf.find_row("4,2 dias").is_some());
    assert!(buf.find_row("Solicitações por bairro").is_some());
}

#[test]
fn four_cards_share_one_row_on_wide_screens() {
    let backend = render(100, 30);
    let buf = backend.buffer();
    let y = buf.find_row("Solicitações abertas").unwrap();
    assert_eq!(buf.find_row("Tempo médio"), Some(y));
}

#[test]
fn narrow_screens_wrap_cards_into_two_rows() {
    let backend = render(60, 30);
    let buf = backend.buffer();
    let first = buf.find_row("Solicitações abertas").unwrap();
    let third = buf.find_row("Concluídas no mês").unwrap();
    assert_eq!(third, first + CARD_H);
}

#[test]
fn the_busiest_bairro_gets_the_full_bar() {
    let backend = render(100, 30);
    let buf = backend.buffer();
    let y = buf.find_row("Centro").unwrap();
    let row = buf.row_text(y);
    let full = (100 - NAME_W - 5) as usize;
    assert_eq!(row.matches('█').count(), full);
    assert!(row.contains("31"));
}

#[test]
fn bar_len_is_proportional_and_never_hides_non_zero_values() {
    assert_eq!(bar_len(31, 31, 40), 40);
    assert_eq!(bar_len(0, 31, 40), 0);
    assert_eq!(bar_len(1, 1000, 40), 1);
    assert_eq!(bar_len(10, 20, 40), 20);
    assert_eq!(bar_len(5, 0, 40), 0);
}
