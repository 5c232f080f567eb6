//! Property-based tests using proptest.
//!
//! These tests verify invariants that must hold for *any* input, catching
//! edge cases that hand-written tests miss.

use proptest::prelude::*;

use crate::config::CanvasConfig;
use crate::core::block::{snap_coord, PlacedBlock};
use crate::core::geometry::{resolve_attachment, FlowDirection, Point, Rect};
use crate::core::template::BlockTemplate;
use crate::core::BlockId;
use crate::manager::{ClickOutcome, ConnectionManager};
use crate::scene::{MemoryScene, RectVisual, Scene};

fn add_gate(manager: &mut ConnectionManager, scene: &mut MemoryScene, x: f64, y: f64) -> BlockId {
    let id = BlockId::new();
    let position = Point::new(x, y);
    let visual = RectVisual {
        rect: Rect::new(x, y, 75.0, 75.0),
        corner_radius: 10.0,
        fill: "#2083fc".into(),
        stroke_width: 0.0,
        opacity: 1.0,
        visible: true,
        highlighted: false,
    };
    let block = PlacedBlock::new(
        id,
        BlockTemplate::gate("AND", "#2083fc"),
        position,
        scene.add_rect(visual.clone()),
        scene.add_rect(visual),
    );
    manager.add_block(block).unwrap();
    id
}

// ---------------------------------------------------------------------------
// Snapping
// ---------------------------------------------------------------------------

proptest! {
    /// Snapping is idempotent: snapping a snapped value changes nothing.
    #[test]
    fn snap_is_idempotent(value in -10_000.0..10_000.0f64, grid in 1.0..500.0f64) {
        let once = snap_coord(value, grid);
        prop_assert_eq!(snap_coord(once, grid), once);
    }

    /// A snapped value is always a whole number of grid cells.
    #[test]
    fn snapped_values_sit_on_the_grid(value in -10_000.0..10_000.0f64, grid in 1.0..500.0f64) {
        let snapped = snap_coord(value, grid);
        let cells = snapped / grid;
        prop_assert!((cells - cells.round()).abs() < 1e-9);
    }

    /// Snapping never moves a value further than half a cell.
    #[test]
    fn snap_moves_at_most_half_a_cell(value in -10_000.0..10_000.0f64, grid in 1.0..500.0f64) {
        let snapped = snap_coord(value, grid);
        prop_assert!((snapped - value).abs() <= grid / 2.0 + 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Face resolution
// ---------------------------------------------------------------------------

proptest! {
    /// The chosen source anchor always lies on the source rectangle's
    /// boundary, and the target anchor on the target's.
    #[test]
    fn anchors_lie_on_the_rectangle_boundaries(
        ax in -1_000.0..1_000.0f64,
        ay in -1_000.0..1_000.0f64,
        bx in -1_000.0..1_000.0f64,
        by in -1_000.0..1_000.0f64,
    ) {
        let a = Rect::new(ax, ay, 75.0, 75.0);
        let b = Rect::new(bx, by, 75.0, 75.0);
        let attachment = resolve_attachment(&a, &b, FlowDirection::Auto);

        let on_boundary = |rect: &Rect, p: Point| {
            let on_x = (p.x - rect.x).abs() < 1e-9 || (p.x - (rect.x + rect.width)).abs() < 1e-9;
            let on_y = (p.y - rect.y).abs() < 1e-9 || (p.y - (rect.y + rect.height)).abs() < 1e-9;
            (on_x && p.y >= rect.y && p.y <= rect.y + rect.height)
                || (on_y && p.x >= rect.x && p.x <= rect.x + rect.width)
        };
        prop_assert!(on_boundary(&a, attachment.from));
        prop_assert!(on_boundary(&b, attachment.to));
    }

    /// Resolution is deterministic: the same inputs give the same face.
    #[test]
    fn resolution_is_deterministic(
        ax in -1_000.0..1_000.0f64,
        ay in -1_000.0..1_000.0f64,
        bx in -1_000.0..1_000.0f64,
        by in -1_000.0..1_000.0f64,
    ) {
        let a = Rect::new(ax, ay, 75.0, 75.0);
        let b = Rect::new(bx, by, 75.0, 75.0);
        let first = resolve_attachment(&a, &b, FlowDirection::Auto);
        let second = resolve_attachment(&a, &b, FlowDirection::Auto);
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Spanning rectangles
// ---------------------------------------------------------------------------

proptest! {
    /// A spanning rectangle always has non-negative extent and contains
    /// both of its defining corners. Containment is checked with a small
    /// tolerance: reassembling `x + width` can land one ulp short of the
    /// far corner.
    #[test]
    fn spanning_normalizes_any_quadrant(
        ox in -1_000.0..1_000.0f64,
        oy in -1_000.0..1_000.0f64,
        cx in -1_000.0..1_000.0f64,
        cy in -1_000.0..1_000.0f64,
    ) {
        let rect = Rect::spanning(Point::new(ox, oy), Point::new(cx, cy));
        prop_assert!(rect.width >= 0.0);
        prop_assert!(rect.height >= 0.0);

        let eps = 1e-9;
        let contains = |p: Point| {
            p.x >= rect.x - eps
                && p.x <= rect.x + rect.width + eps
                && p.y >= rect.y - eps
                && p.y <= rect.y + rect.height + eps
        };
        prop_assert!(contains(Point::new(ox, oy)));
        prop_assert!(contains(Point::new(cx, cy)));
    }
}

// ---------------------------------------------------------------------------
// Pairing toggle
// ---------------------------------------------------------------------------

proptest! {
    /// An even number of click pairs on the same two blocks always lands
    /// back at zero connections; an odd number at exactly one.
    #[test]
    fn click_pair_parity_holds(rounds in 1..20u32) {
        let mut manager = ConnectionManager::new(CanvasConfig::default());
        let mut scene = MemoryScene::new();
        let a = add_gate(&mut manager, &mut scene, 0.0, 0.0);
        let b = add_gate(&mut manager, &mut scene, 225.0, 0.0);

        for round in 0..rounds {
            prop_assert_eq!(
                manager.on_block_clicked(a, &mut scene),
                ClickOutcome::SourceSelected(a)
            );
            let outcome = manager.on_block_clicked(b, &mut scene);
            if round % 2 == 0 {
                prop_assert!(matches!(outcome, ClickOutcome::Connected(_)));
            } else {
                prop_assert!(matches!(outcome, ClickOutcome::Disconnected(_)));
            }
        }

        let expected = (rounds % 2) as usize;
        prop_assert_eq!(manager.connection_count(), expected);
        prop_assert_eq!(scene.wire_count(), expected);
    }
}
