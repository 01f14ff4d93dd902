use super::*;

#[test]
fn parse_accepts_hex_and_names() {
    assert_eq!(Color::parse("#1e90ff"), Some(Color::Rgb(0x1e, 0x90, 0xff)));
    assert_eq!(Color::parse(" Cyan "), Some(Color::Indexed(6)));
    assert_eq!(Color::parse("dark_gray"), Some(Color::Indexed(8)));
    assert_eq!(Color::parse("reset"), Some(Color::Reset));
}

#[test]
fn parse_rejects_garbage() {
    assert_eq!(Color::parse(""), None);
    assert_eq!(Color::parse("#12345"), None);
    assert_eq!(Color::parse("#zzzzzz"), None);
    assert_eq!(Color::parse("teal-ish"), None);
}

#[test]
fn patch_overrides_colors_and_merges_mods() {
    let base = Style::default()
        .fg(Color::Indexed(7))
        .bg(Color::Indexed(0))
        .add_mod(Mod::BOLD);
    let top = Style::default().fg(Color::Indexed(6)).add_mod(Mod::REVERSE);
    let merged = base.patch(top);

    assert_eq!(merged.fg, Some(Color::Indexed(6)));
    assert_eq!(merged.bg, Some(Color::Indexed(0)));
    assert!(merged.mods.contains(Mod::BOLD));
    assert!(merged.mods.contains(Mod::REVERSE));
}
