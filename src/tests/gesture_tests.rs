//! Gesture tests: drag coordinator, ghost handling, box selection, and
//! the shared interaction flags.

use crate::config::CanvasConfig;
use crate::core::geometry::Point;
use crate::editor::CanvasEditor;
use crate::interaction::box_select::BoxSelect;
use crate::interaction::InteractionFlags;
use crate::manager::{ClickOutcome, ConnectionManager};
use crate::scene::MemoryScene;

fn editor() -> CanvasEditor<MemoryScene> {
    let editor = CanvasEditor::new(MemoryScene::new(), CanvasConfig::default());
    editor.templates().register_builtin_gates().unwrap();
    editor
}

// ── Placement and snapping ──────────────────────────────────────────────

#[test]
fn placement_snaps_to_the_grid() {
    let mut editor = editor();
    let id = editor.place_block("AND", Point::new(110.0, 40.0)).unwrap();

    let block = editor.manager().get_block(id).unwrap();
    assert_eq!(block.position(), Point::new(75.0, 75.0));
}

#[test]
fn placing_from_an_unknown_template_fails() {
    let mut editor = editor();
    assert!(editor.place_block("NAND", Point::new(0.0, 0.0)).is_err());
}

// ── Click vs drag ───────────────────────────────────────────────────────

#[test]
fn press_and_release_without_movement_is_a_click() {
    let mut editor = editor();
    let id = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(10.0, 10.0));
    let outcome = editor.pointer_up();

    assert_eq!(outcome, Some(ClickOutcome::SourceSelected(id)));
    // No movement means no position change.
    assert_eq!(
        editor.manager().get_block(id).unwrap().position(),
        Point::new(0.0, 0.0)
    );
}

#[test]
fn press_move_release_is_a_drag_not_a_click() {
    let mut editor = editor();
    let id = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(160.0, 85.0));
    let outcome = editor.pointer_up();

    assert_eq!(outcome, None);
    // Cursor delta (150, 75) applied, then snapped.
    assert_eq!(
        editor.manager().get_block(id).unwrap().position(),
        Point::new(150.0, 75.0)
    );
    assert_eq!(editor.manager().pending_source(), None);
}

#[test]
fn single_move_drag_commits_the_full_displacement() {
    let mut editor = editor();
    let id = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    // One move event only: the displacement from the press point must
    // survive into the commit.
    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(85.0, 85.0));
    editor.pointer_up();

    assert_eq!(
        editor.manager().get_block(id).unwrap().position(),
        Point::new(75.0, 75.0)
    );
}

#[test]
fn dragging_the_pending_source_abandons_the_pairing() {
    let mut editor = editor();
    let a = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();
    let b = editor.place_block("OR", Point::new(300.0, 0.0)).unwrap();

    // Select a as the pairing source, then drag it away.
    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_up();
    assert_eq!(editor.manager().pending_source(), Some(a));

    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(10.0, 85.0));
    editor.pointer_up();
    assert_eq!(editor.manager().pending_source(), None);

    // The next click starts a fresh pairing instead of completing one.
    editor.pointer_down(Point::new(310.0, 10.0));
    assert_eq!(editor.pointer_up(), Some(ClickOutcome::SourceSelected(b)));
    assert_eq!(editor.manager().connection_count(), 0);
}

// ── Ghost drag ──────────────────────────────────────────────────────────

#[test]
fn ghost_tracks_the_cursor_while_the_block_stays_put() {
    let mut editor = editor();
    let id = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(110.0, 60.0));

    let block = editor.manager().get_block(id).unwrap();
    assert!(block.ghost_visible());
    assert_eq!(block.ghost_position(), Point::new(100.0, 50.0));
    assert_eq!(block.position(), Point::new(0.0, 0.0));
}

#[test]
fn release_commits_the_ghost_and_hides_it() {
    let mut editor = editor();
    let id = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(110.0, 60.0));
    editor.pointer_up();

    let block = editor.manager().get_block(id).unwrap();
    assert!(!block.ghost_visible());
    // Ghost at (100, 50) snapped to the 75 grid.
    assert_eq!(block.position(), Point::new(75.0, 75.0));
}

// ── Interaction flags ───────────────────────────────────────────────────

#[test]
fn flags_open_and_close_around_a_drag() {
    let mut editor = editor();
    editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(10.0, 10.0));
    assert!(!editor.flags().moving_block());

    editor.pointer_move(Point::new(100.0, 100.0));
    assert!(editor.flags().moving_block());

    editor.pointer_up();
    assert!(!editor.flags().moving_block());
    assert!(!editor.flags().moving_block_selection());
}

#[test]
fn hover_flag_follows_the_cursor() {
    let mut editor = editor();
    editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_move(Point::new(10.0, 10.0));
    assert!(editor.flags().hovering_over_block());

    editor.pointer_move(Point::new(500.0, 500.0));
    assert!(!editor.flags().hovering_over_block());
}

// ── Box selection ───────────────────────────────────────────────────────

#[test]
fn box_selection_picks_up_overlapping_blocks() {
    let mut editor = editor();
    let a = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();
    let b = editor.place_block("OR", Point::new(150.0, 0.0)).unwrap();
    let far = editor.place_block("NOT", Point::new(600.0, 600.0)).unwrap();

    editor.pointer_down(Point::new(-20.0, -20.0));
    editor.pointer_move(Point::new(240.0, 100.0));
    editor.pointer_up();

    let manager = editor.manager();
    assert!(manager.get_block(a).unwrap().is_selected());
    assert!(manager.get_block(b).unwrap().is_selected());
    assert!(!manager.get_block(far).unwrap().is_selected());
    assert_eq!(manager.get_block(a).unwrap().drag_group(), &[a, b]);
    assert_eq!(manager.get_block(b).unwrap().drag_group(), &[a, b]);
}

#[test]
fn box_selection_normalizes_negative_spans() {
    let mut editor = editor();
    let a = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    // Drag up-left from below the block.
    editor.pointer_down(Point::new(240.0, 100.0));
    editor.pointer_move(Point::new(-20.0, -20.0));
    editor.pointer_up();

    assert!(editor.manager().get_block(a).unwrap().is_selected());
}

#[test]
fn empty_region_selects_nothing() {
    let mut editor = editor();
    let a = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(500.0, 500.0));
    editor.pointer_move(Point::new(600.0, 600.0));
    editor.pointer_up();

    assert!(!editor.manager().get_block(a).unwrap().is_selected());
}

#[test]
fn empty_canvas_click_clears_a_live_selection() {
    let mut editor = editor();
    let a = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(-20.0, -20.0));
    editor.pointer_move(Point::new(100.0, 100.0));
    editor.pointer_up();
    assert!(editor.manager().get_block(a).unwrap().is_selected());

    editor.pointer_down(Point::new(500.0, 500.0));
    editor.pointer_up();

    let block = editor.manager().get_block(a).unwrap();
    assert!(!block.is_selected());
    assert!(block.drag_group().is_empty());
}

#[test]
fn group_drag_moves_all_members_rigidly() {
    let mut editor = editor();
    let a = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();
    let b = editor.place_block("OR", Point::new(150.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(-20.0, -20.0));
    editor.pointer_move(Point::new(240.0, 100.0));
    editor.pointer_up();

    // Grab a and drag the whole selection by (300, 0).
    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(310.0, 10.0));
    editor.pointer_up();

    let manager = editor.manager();
    assert_eq!(manager.get_block(a).unwrap().position(), Point::new(300.0, 0.0));
    assert_eq!(manager.get_block(b).unwrap().position(), Point::new(450.0, 0.0));
    // The group dissolves once the move commits.
    assert!(manager.get_block(a).unwrap().drag_group().is_empty());
    assert!(!manager.get_block(a).unwrap().is_selected());
}

#[test]
fn group_drag_raises_the_selection_flag() {
    let mut editor = editor();
    editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();
    editor.place_block("OR", Point::new(150.0, 0.0)).unwrap();

    editor.pointer_down(Point::new(-20.0, -20.0));
    editor.pointer_move(Point::new(240.0, 100.0));
    editor.pointer_up();

    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(100.0, 100.0));
    assert!(editor.flags().moving_block_selection());

    editor.pointer_up();
    assert!(!editor.flags().moving_block_selection());
}

#[test]
fn selection_can_be_disabled() {
    let mut editor = editor();
    let a = editor.place_block("AND", Point::new(0.0, 0.0)).unwrap();

    editor.set_selection_enabled(false);
    editor.pointer_down(Point::new(-20.0, -20.0));
    editor.pointer_move(Point::new(240.0, 100.0));
    editor.pointer_up();

    assert!(!editor.manager().get_block(a).unwrap().is_selected());
}

// ── Flag gating on the raw state machine ────────────────────────────────

#[test]
fn box_select_refuses_to_start_over_a_block_or_mid_move() {
    let mut manager = ConnectionManager::new(CanvasConfig::default());
    let mut scene = MemoryScene::new();
    let flags = InteractionFlags::default();
    let style = CanvasConfig::default().selection;
    let mut select = BoxSelect::new();

    flags.set_hovering_over_block(true);
    select.pointer_down(Point::new(0.0, 0.0), &mut manager, &mut scene, &flags, &style);
    assert!(!select.is_dragging());

    flags.set_hovering_over_block(false);
    flags.set_moving_block(true);
    select.pointer_down(Point::new(0.0, 0.0), &mut manager, &mut scene, &flags, &style);
    assert!(!select.is_dragging());

    flags.set_moving_block(false);
    flags.set_moving_block_selection(true);
    select.pointer_down(Point::new(0.0, 0.0), &mut manager, &mut scene, &flags, &style);
    assert!(!select.is_dragging());

    flags.set_moving_block_selection(false);
    select.pointer_down(Point::new(0.0, 0.0), &mut manager, &mut scene, &flags, &style);
    assert!(select.is_dragging());
}

#[test]
fn rubber_band_visual_is_removed_on_release() {
    let mut editor = editor();

    editor.pointer_down(Point::new(0.0, 0.0));
    editor.pointer_move(Point::new(100.0, 100.0));
    let during = editor.scene().shape_count();
    editor.pointer_up();

    assert_eq!(editor.scene().shape_count(), during - 1);
}
