use super::*;

fn node(id: u64, rect: Rect, layer: u8, z: u32, sense: Sense) -> Node {
    Node {
        id: Id::raw(id),
        rect,
        layer,
        z,
        sense,
        kind: NodeKind::Unknown,
    }
}

#[test]
fn hit_test_prefers_higher_layer() {
    let mut tree = UiTree::new();
    let r = Rect::new(0, 0, 10, 10);
    tree.push(node(1, r, LAYER_BASE, 1, Sense::CLICK));
    tree.push(node(2, r, LAYER_OVERLAY, 0, Sense::CLICK));

    let hit = tree.hit_test(Pos::new(5, 5)).unwrap();
    assert_eq!(hit.id, Id::raw(2));
}

#[test]
fn hit_test_prefers_higher_z_within_same_layer() {
    let mut tree = UiTree::new();
    let r = Rect::new(0, 0, 10, 10);
    tree.push(node(1, r, 0, 1, Sense::CLICK));
    tree.push(node(2, r, 0, 2, Sense::CLICK));

    let hit = tree.hit_test(Pos::new(5, 5)).unwrap();
    assert_eq!(hit.id, Id::raw(2));
}

#[test]
fn hit_test_with_sense_filters_nodes() {
    let mut tree = UiTree::new();
    let r = Rect::new(0, 0, 10, 10);
    tree.push(node(1, r, 0, 1, Sense::CLICK));
    tree.push(node(2, r, 0, 2, Sense::HOVER));

    assert_eq!(
        tree.hit_test_with_sense(Pos::new(5, 5), Sense::CLICK)
            .unwrap()
            .id,
        Id::raw(1)
    );
    assert!(tree
        .hit_test_with_sense(Pos::new(5, 5), Sense::SCROLL)
        .is_none());
}

#[test]
fn select_region_covers_trigger_panel_and_options() {
    let mut tree = UiTree::new();
    tree.push(Node {
        id: Id::raw(1),
        rect: Rect::new(0, 0, 10, 1),
        layer: LAYER_BASE,
        z: 0,
        sense: Sense::CLICK,
        kind: NodeKind::SelectTrigger { select: 4 },
    });
    tree.push(Node {
        id: Id::raw(2),
        rect: Rect::new(0, 1, 10, 5),
        layer: LAYER_OVERLAY,
        z: 0,
        sense: Sense::SCROLL,
        kind: NodeKind::SelectPanel { select: 4 },
    });
    tree.push(Node {
        id: Id::raw(3),
        rect: Rect::new(20, 0, 10, 1),
        layer: LAYER_BASE,
        z: 0,
        sense: Sense::CLICK,
        kind: NodeKind::SelectTrigger { select: 5 },
    });

    assert!(tree.select_region_contains(4, Pos::new(3, 0)));
    assert!(tree.select_region_contains(4, Pos::new(3, 4)));
    assert!(!tree.select_region_contains(4, Pos::new(3, 8)));
    assert!(!tree.select_region_contains(4, Pos::new(22, 0)));
    assert_eq!(tree.select_trigger(5), Some(Rect::new(20, 0, 10, 1)));
    assert_eq!(tree.select_trigger(6), None);
}
