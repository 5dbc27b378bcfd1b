//! Top-level scene ownership: effects, the shared palette book, current
//! selection (C4).

use tapelight_composer::{PaletteName, Scene, SegmentConfig};

#[test]
fn first_added_effect_becomes_current() {
    let mut scene = Scene::new(1);
    scene.add_effect(5, 10, 60);
    assert_eq!(scene.current_effect_id(), Some(5));
}

#[test]
fn removing_current_effect_promotes_lowest_remaining() {
    let mut scene = Scene::new(1);
    scene.add_effect(3, 10, 60);
    scene.add_effect(1, 10, 60);
    scene.switch_effect(3);
    scene.remove_effect(3);
    assert_eq!(scene.current_effect_id(), Some(1));
}

#[test]
fn removing_last_effect_clears_current() {
    let mut scene = Scene::new(1);
    scene.add_effect(1, 10, 60);
    scene.remove_effect(1);
    assert_eq!(scene.current_effect_id(), None);
}

#[test]
fn render_with_no_current_effect_is_empty() {
    let scene = Scene::new(1);
    assert!(scene.render().is_empty());
}

#[test]
fn set_palette_fans_out_to_all_effects() {
    let mut scene = Scene::new(1);
    scene.add_effect(1, 10, 60);
    scene.add_effect(2, 10, 60);
    scene.set_palette(PaletteName::C);
    assert_eq!(
        scene.effect(1).unwrap().current_palette_name(),
        PaletteName::C
    );
    assert_eq!(
        scene.effect(2).unwrap().current_palette_name(),
        PaletteName::C
    );
}

#[test]
fn effect_or_create_materializes_missing_effect() {
    let mut scene = Scene::new(1);
    let effect = scene.effect_or_create(9, 225, 60);
    assert_eq!(effect.led_count(), 225);
    assert_eq!(effect.fps(), 60);
}

#[test]
fn update_advances_only_current_effect() {
    let mut scene = Scene::new(1);
    scene.add_effect(1, 20, 60);
    scene.add_effect(2, 20, 60);
    scene.effect_mut(1).unwrap().add_segment(
        1,
        SegmentConfig {
            move_speed: 1.0,
            move_range: [0.0, 19.0],
            ..Default::default()
        },
    );
    scene.effect_mut(2).unwrap().add_segment(
        1,
        SegmentConfig {
            move_speed: 1.0,
            move_range: [0.0, 19.0],
            ..Default::default()
        },
    );
    scene.update(1.0);
    assert_eq!(
        scene.effect(1).unwrap().segment(1).unwrap().current_position(),
        1.0
    );
    assert_eq!(
        scene.effect(2).unwrap().segment(1).unwrap().current_position(),
        0.0
    );
}
