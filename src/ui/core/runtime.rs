use super::geom::Pos;
use super::id::Id;
use super::input::UiEvent;
use super::tree::{Sense, UiTree};
use crate::core::event::{InputEvent, MouseButton, MouseEventKind};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone)]
pub struct UiRuntimeOutput {
    pub events: Vec<UiEvent>,
    pub needs_redraw: bool,
}

impl UiRuntimeOutput {
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            needs_redraw: false,
        }
    }
}

/// Owners currently interested in presses that land outside their region.
///
/// Entries exist only while an [`OutsidePressGuard`] is alive; dropping the guard removes the
/// entry, so closed or dropped controls never leave a listener behind.
#[derive(Debug, Clone, Default)]
pub struct OutsidePressRegistry {
    owners: Rc<RefCell<Vec<u32>>>,
}

impl OutsidePressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, owner: u32) -> OutsidePressGuard {
        self.owners.borrow_mut().push(owner);
        tracing::trace!(owner, "outside press watch registered");
        OutsidePressGuard {
            owner,
            owners: Rc::downgrade(&self.owners),
        }
    }

    pub fn len(&self) -> usize {
        self.owners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.borrow().is_empty()
    }

    pub fn is_watching(&self, owner: u32) -> bool {
        self.owners.borrow().contains(&owner)
    }

    fn snapshot(&self) -> Vec<u32> {
        self.owners.borrow().clone()
    }
}

#[derive(Debug)]
pub struct OutsidePressGuard {
    owner: u32,
    owners: Weak<RefCell<Vec<u32>>>,
}

impl OutsidePressGuard {
    pub fn owner(&self) -> u32 {
        self.owner
    }
}

impl Drop for OutsidePressGuard {
    fn drop(&mut self) {
        let Some(owners) = self.owners.upgrade() else {
            return;
        };
        let mut owners = owners.borrow_mut();
        if let Some(idx) = owners.iter().position(|o| *o == self.owner) {
            owners.swap_remove(idx);
            tracing::trace!(owner = self.owner, "outside press watch released");
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PressedState {
    button: MouseButton,
    click: Option<Id>,
}

/// Turns raw mouse input into widget-level events by hit-testing the last frame's tree.
#[derive(Debug, Default)]
pub struct UiRuntime {
    hovered: Option<Id>,
    pressed: Option<PressedState>,
    last_pos: Option<Pos>,
    outside_press: OutsidePressRegistry,
}

impl UiRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }

    pub fn last_pos(&self) -> Option<Pos> {
        self.last_pos
    }

    pub fn outside_press(&self) -> &OutsidePressRegistry {
        &self.outside_press
    }

    pub fn reset_pointer_state(&mut self) {
        self.pressed = None;
    }

    pub fn on_input(&mut self, input: &InputEvent, tree: &UiTree) -> UiRuntimeOutput {
        let mut out = UiRuntimeOutput::empty();

        let InputEvent::Mouse(me) = input else {
            return out;
        };

        let pos = Pos::new(me.column, me.row);
        self.last_pos = Some(pos);

        let next_hover = tree.hit_test_with_sense(pos, Sense::HOVER).map(|n| n.id);
        if next_hover != self.hovered {
            out.events.push(UiEvent::HoverChanged {
                from: self.hovered,
                to: next_hover,
                pos,
            });
            self.hovered = next_hover;
            out.needs_redraw = true;
        }

        match me.kind {
            MouseEventKind::Down(button) => {
                // Outside presses are reported before anything else reacts to the press.
                for owner in self.outside_press.snapshot() {
                    if !tree.select_region_contains(owner, pos) {
                        out.events.push(UiEvent::OutsidePress { owner, pos });
                        out.needs_redraw = true;
                    }
                }

                let click = tree.hit_test_with_sense(pos, Sense::CLICK).map(|n| n.id);
                self.pressed = Some(PressedState { button, click });
            }
            MouseEventKind::Up(button) => {
                if let Some(pressed) = self.pressed.take() {
                    if pressed.button == button {
                        if let Some(id) = pressed.click {
                            out.events.push(UiEvent::Click { id, button, pos });
                            out.needs_redraw = true;
                        }
                    }
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let delta = if me.kind == MouseEventKind::ScrollUp {
                    -1
                } else {
                    1
                };
                if let Some(node) = tree.hit_test_with_sense(pos, Sense::SCROLL) {
                    out.events.push(UiEvent::Scroll {
                        id: node.id,
                        delta,
                        pos,
                    });
                    out.needs_redraw = true;
                }
            }
            MouseEventKind::Drag(_)
            | MouseEventKind::Moved
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => {}
        }

        out
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/runtime.rs"]
mod tests;
