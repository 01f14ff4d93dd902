/// Which side of the trigger the option panel opens on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropPosition {
    Up,
    #[default]
    Down,
}

/// Free space around a trigger inside the viewport, in the viewport's units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalSpace {
    pub above: u16,
    pub below: u16,
}

/// Opens upward only when the space below is short of `threshold` and the space above is not.
pub fn drop_position(space: VerticalSpace, threshold: u16) -> DropPosition {
    if space.below < threshold && space.above >= threshold {
        DropPosition::Up
    } else {
        DropPosition::Down
    }
}
