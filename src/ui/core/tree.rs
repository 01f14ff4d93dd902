use super::geom::{Pos, Rect};
use super::id::Id;
use std::ops::{BitOr, BitOrAssign};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Sense(u16);

impl Sense {
    pub const NONE: Self = Self(0);
    pub const HOVER: Self = Self(1 << 0);
    pub const CLICK: Self = Self(1 << 1);
    pub const SCROLL: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for Sense {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Sense {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Hit-test layers. The open select panel sits above everything else.
pub const LAYER_BASE: u8 = 0;
pub const LAYER_OVERLAY: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Unknown,
    NavItem { index: usize },
    TextField { field: u32 },
    AttachmentList { field: u32 },
    ListRow { index: usize },
    SelectTrigger { select: u32 },
    SelectPanel { select: u32 },
    SelectOption { select: u32, index: usize },
}

impl NodeKind {
    /// The select control a node belongs to, if any. Together these nodes form the region an
    /// outside press is measured against.
    pub fn select_owner(self) -> Option<u32> {
        match self {
            NodeKind::SelectTrigger { select }
            | NodeKind::SelectPanel { select }
            | NodeKind::SelectOption { select, .. } => Some(select),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: Id,
    pub rect: Rect,
    pub layer: u8,
    pub z: u32,
    pub sense: Sense,
    pub kind: NodeKind,
}

impl Node {
    pub fn contains(&self, p: Pos) -> bool {
        self.rect.contains(p)
    }
}

#[derive(Clone, Debug, Default)]
pub struct UiTree {
    nodes: Vec<Node>,
}

impl UiTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn push(&mut self, mut node: Node) {
        // Default z-order: insertion order within the same layer.
        if node.z == 0 {
            node.z = self.nodes.len() as u32;
        }
        self.nodes.push(node);
    }

    pub fn hit_test(&self, p: Pos) -> Option<&Node> {
        // Highest layer wins; within a layer, higher z wins.
        self.nodes
            .iter()
            .filter(|n| n.contains(p))
            .max_by(|a, b| (a.layer, a.z).cmp(&(b.layer, b.z)))
    }

    pub fn hit_test_with_sense(&self, p: Pos, required: Sense) -> Option<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.sense.contains(required) && n.contains(p))
            .max_by(|a, b| (a.layer, a.z).cmp(&(b.layer, b.z)))
    }

    /// The trigger rect a select registered in the last frame.
    pub fn select_trigger(&self, select: u32) -> Option<Rect> {
        self.nodes
            .iter()
            .find(|n| n.kind == NodeKind::SelectTrigger { select })
            .map(|n| n.rect)
    }

    /// Whether `p` falls on any region owned by `select` (trigger, panel or option rows).
    pub fn select_region_contains(&self, select: u32, p: Pos) -> bool {
        self.nodes
            .iter()
            .any(|n| n.kind.select_owner() == Some(select) && n.contains(p))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/tree.rs"]
mod tests;
