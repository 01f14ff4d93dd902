use super::*;

#[test]
fn key_events_keep_code_modifiers_and_kind() {
    let mut raw = ct::KeyEvent::new(ct::KeyCode::Char('s'), ct::KeyModifiers::CONTROL);
    raw.kind = ct::KeyEventKind::Release;

    let key: KeyEvent = raw.into();
    assert_eq!(key.code, KeyCode::Char('s'));
    assert!(key.modifiers.contains(KeyModifiers::CONTROL));
    assert_eq!(key.kind, KeyEventKind::Release);
    assert!(!key.is_press());
}

#[test]
fn combined_modifiers_are_all_mapped() {
    let mods: KeyModifiers = (ct::KeyModifiers::SHIFT | ct::KeyModifiers::ALT).into();
    assert!(mods.contains(KeyModifiers::SHIFT));
    assert!(mods.contains(KeyModifiers::ALT));
    assert!(!mods.contains(KeyModifiers::CONTROL));
}

#[test]
fn nul_is_ctrl_space() {
    let key: KeyEvent = ct::KeyEvent::new(ct::KeyCode::Null, ct::KeyModifiers::NONE).into();
    assert_eq!(key.code, KeyCode::Char(' '));
    assert!(key.modifiers.contains(KeyModifiers::CONTROL));
}

#[test]
fn unsupported_keys_map_to_unknown() {
    let key: KeyEvent = ct::KeyEvent::new(ct::KeyCode::CapsLock, ct::KeyModifiers::NONE).into();
    assert_eq!(key.code, KeyCode::Unknown);
}

#[test]
fn mouse_events_keep_position_and_button() {
    let raw = ct::Event::Mouse(ct::MouseEvent {
        kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
        column: 12,
        row: 4,
        modifiers: ct::KeyModifiers::NONE,
    });
    let event: InputEvent = raw.into();
    assert_eq!(
        event,
        InputEvent::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 12, 4))
    );
}

#[test]
fn resize_and_paste_pass_through() {
    assert_eq!(
        InputEvent::from(ct::Event::Resize(80, 24)),
        InputEvent::Resize(80, 24)
    );
    assert_eq!(
        InputEvent::from(ct::Event::Paste("Rua das Flores".to_string())),
        InputEvent::Paste("Rua das Flores".to_string())
    );
}
