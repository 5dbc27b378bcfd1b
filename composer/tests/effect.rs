//! Per-strip segment ownership and source-over compositing (C3).

use tapelight_composer::{Effect, PaletteBook, Rgb, SegmentConfig};

#[test]
fn render_with_no_segments_is_all_black() {
    let effect = Effect::new(1, 10, 60);
    let book = PaletteBook::new();
    let frame = effect.render(&book);
    assert_eq!(frame.len(), 10);
    assert!(frame.iter().all(|c| *c == Rgb { r: 0, g: 0, b: 0 }));
}

#[test]
fn render_clips_positions_outside_led_count() {
    let mut effect = Effect::new(1, 5, 60);
    effect.add_segment(
        1,
        SegmentConfig {
            color: [1, 1, 1, 1],
            length: [1, 1, 1],
            initial_position: 100.0,
            move_range: [0.0, 200.0],
            ..Default::default()
        },
    );
    let book = PaletteBook::new();
    let frame = effect.render(&book);
    // Segment sits entirely outside [0,5): frame stays black.
    assert!(frame.iter().all(|c| *c == Rgb { r: 0, g: 0, b: 0 }));
}

#[test]
fn render_composites_overlapping_segments_in_ascending_id_order() {
    let mut effect = Effect::new(1, 3, 60);
    effect.add_segment(
        2,
        SegmentConfig {
            color: [2, 2, 2, 2],
            transparency: [0.5, 0.5, 0.5, 0.5],
            length: [0, 3, 0],
            initial_position: 1.0,
            move_range: [0.0, 2.0],
            ..Default::default()
        },
    );
    effect.add_segment(
        1,
        SegmentConfig {
            color: [1, 1, 1, 1],
            transparency: [1.0, 1.0, 1.0, 1.0],
            length: [0, 3, 0],
            initial_position: 1.0,
            move_range: [0.0, 2.0],
            ..Default::default()
        },
    );
    let book = PaletteBook::new();
    let frame = effect.render(&book);
    // Segment 1 (red, opaque) lays down first; segment 2 (green, 50%)
    // composites on top, blending toward green but not replacing it.
    for px in &frame {
        assert!(px.r > 0 && px.g > 0, "expected a red/green blend, got {px:?}");
    }
}

#[test]
fn advance_all_advances_every_segment() {
    let mut effect = Effect::new(1, 20, 60);
    effect.add_segment(
        1,
        SegmentConfig {
            move_speed: 1.0,
            move_range: [0.0, 19.0],
            initial_position: 0.0,
            ..Default::default()
        },
    );
    effect.advance_all(1.0);
    assert_eq!(effect.segment(1).unwrap().current_position(), 1.0);
}

#[test]
fn remove_segment_is_idempotent() {
    let mut effect = Effect::new(1, 10, 60);
    effect.add_segment(1, SegmentConfig::default());
    effect.remove_segment(1);
    effect.remove_segment(1);
    assert!(effect.segment(1).is_none());
}
