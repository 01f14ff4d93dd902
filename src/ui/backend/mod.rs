//! Rendering backends.
//!
//! Screens only produce `PaintCmd`s; a backend replays them onto a concrete surface.

use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::PaintCmd;

pub trait Backend {
    fn draw(&mut self, area: Rect, cmds: &[PaintCmd]);

    fn set_cursor(&mut self, pos: Option<Pos>);
}

/// Box-drawing glyphs for a border kind: (top-left, top-right, bottom-left, bottom-right,
/// horizontal, vertical).
pub(crate) fn border_glyphs(
    kind: crate::ui::core::painter::BorderKind,
) -> (char, char, char, char, char, char) {
    use crate::ui::core::painter::BorderKind;
    match kind {
        BorderKind::Plain => ('┌', '┐', '└', '┘', '─', '│'),
        BorderKind::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
    }
}

// The terminal backend is the only module that names ratatui types.
#[cfg(feature = "tui")]
#[path = "ratatui.rs"]
pub mod terminal;
