use super::geom::Pos;
use super::id::Id;
use crate::core::event::MouseButton;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    HoverChanged {
        from: Option<Id>,
        to: Option<Id>,
        pos: Pos,
    },
    Click {
        id: Id,
        button: MouseButton,
        pos: Pos,
    },
    Scroll {
        id: Id,
        delta: isize,
        pos: Pos,
    },
    /// A pointer press landed outside every region of a select that is watching for it.
    OutsidePress {
        owner: u32,
        pos: Pos,
    },
}
