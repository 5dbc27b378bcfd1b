//! Address-grammar, value-coercion, and init-reply integration tests,
//! exercising the parser/coercion/reply-builder functions directly without
//! a live socket.

use rosc::OscType;
use tapelight_composer::{Effect, PaletteName, Scene, SegmentConfig, ValidationError};
use tapelight_server::error::OscError;
use tapelight_server::osc::address::{self, Address};
use tapelight_server::osc::coerce;
use tapelight_server::osc::init_reply;

fn effect_with_segment() -> Effect {
    let mut effect = Effect::new(1, 20, 60);
    effect.add_segment(1, SegmentConfig::default());
    effect
}

#[test]
fn address_grammar_recognizes_all_four_families() {
    assert_eq!(
        address::parse("/effect/3/segment/4/color"),
        Some(Address::SegmentParam {
            effect_id: 3,
            segment_id: 4,
            param: "color".into(),
        })
    );
    assert_eq!(
        address::parse("/effect/3/object/4/color"),
        Some(Address::ObjectParam {
            effect_id: 3,
            segment_id: 4,
            param: "color".into(),
        })
    );
    assert_eq!(address::parse("/palette/E"), Some(Address::Palette(PaletteName::E)));
    assert_eq!(address::parse("/request/init"), Some(Address::RequestInit));
    assert_eq!(address::parse("/not/a/real/thing/at/all"), None);
}

#[test]
fn address_grammar_rejects_unknown_palette_letter() {
    assert_eq!(address::parse("/palette/Z"), None);
}

#[test]
fn address_grammar_rejects_malformed_shapes() {
    assert_eq!(address::parse("/effect/1/segment/2"), None);
    assert_eq!(address::parse("/effect/x/segment/2/color"), None);
}

#[test]
fn coerce_scalar_move_speed_applies_directly() {
    let mut effect = effect_with_segment();
    coerce::apply(&mut effect, 1, "move_speed", &[OscType::Float(12.5)]).unwrap();
    assert_eq!(effect.segment(1).unwrap().move_speed(), 12.5);
}

#[test]
fn coerce_json_encoded_string_color_dict_updates_colors_and_speed() {
    let mut effect = effect_with_segment();
    let json = r#"{"colors":[1,3,4,2],"speed":20,"gradient":0}"#;
    coerce::apply(&mut effect, 1, "color", &[OscType::String(json.to_string())]).unwrap();
    let segment = effect.segment(1).unwrap();
    assert_eq!(segment.color(), [1, 3, 4, 2]);
    assert_eq!(segment.move_speed(), 20.0);
    assert!(!segment.gradient());
}

#[test]
fn coerce_bare_list_color_updates_directly() {
    let mut effect = effect_with_segment();
    coerce::apply(
        &mut effect,
        1,
        "color",
        &[OscType::Array(rosc::OscArray {
            content: vec![OscType::Int(0), OscType::Int(1), OscType::Int(2), OscType::Int(3)],
        })],
    )
    .unwrap();
    assert_eq!(effect.segment(1).unwrap().color(), [0, 1, 2, 3]);
}

#[test]
fn coerce_position_dict_sets_both_initial_and_current_position() {
    let mut effect = effect_with_segment();
    let json = r#"{"initial_position":10,"speed":15,"range":[0,224],"interval":10}"#;
    coerce::apply(&mut effect, 1, "position", &[OscType::String(json.to_string())]).unwrap();
    let segment = effect.segment(1).unwrap();
    assert_eq!(segment.initial_position(), 10.0);
    assert_eq!(segment.current_position(), 10.0);
    assert_eq!(segment.move_range(), [0.0, 224.0]);
}

#[test]
fn coerce_span_group_divides_span_by_three() {
    let mut effect = effect_with_segment();
    let json = r#"{"span":9,"fade":1}"#;
    coerce::apply(&mut effect, 1, "span", &[OscType::String(json.to_string())]).unwrap();
    let segment = effect.segment(1).unwrap();
    assert_eq!(segment.length(), [3, 3, 3]);
    assert!(segment.fade());
}

#[test]
fn coerce_applies_a_json_encoded_span_group_in_key_order() {
    let mut effect = Effect::new(1, 20, 60);
    effect.add_segment(1, SegmentConfig::default());

    let json = r#"{"span":12,"range":[0,99],"speed":5,"interval":20,"gradient_colors":[1,0,2],"fade":1}"#;
    coerce::apply(&mut effect, 1, "span", &[OscType::String(json.to_string())]).unwrap();

    let segment = effect.segment(1).unwrap();
    assert_eq!(segment.length(), [4, 4, 4]);
    assert_eq!(segment.span_range(), [0.0, 99.0]);
    assert_eq!(segment.span_speed(), 5.0);
    assert_eq!(segment.span_interval(), 20);
    assert_eq!(segment.gradient_colors(), [1, 0, 2]);
    assert!(segment.fade());
}

#[test]
fn coerce_direct_bool_param_accepts_zero_one_ints() {
    let mut effect = effect_with_segment();
    coerce::apply(&mut effect, 1, "is_edge_reflect", &[OscType::Int(1)]).unwrap();
    assert!(effect.segment(1).unwrap().is_edge_reflect());
    coerce::apply(&mut effect, 1, "fade", &[OscType::Int(0)]).unwrap();
    assert!(!effect.segment(1).unwrap().fade());
}

#[test]
fn coerce_unknown_parameter_name_is_rejected() {
    let mut effect = effect_with_segment();
    let err = coerce::apply(&mut effect, 1, "not_a_real_param", &[OscType::Int(1)]).unwrap_err();
    assert!(matches!(err, OscError::Validation(ValidationError::UnknownParameter(_))));
}

#[test]
fn init_reply_emits_a_palette_message_per_palette() {
    let scene = Scene::new(1);
    let messages = init_reply::build(&scene);
    let palette_messages: Vec<_> = messages.iter().filter(|m| m.addr.starts_with("/palette/")).collect();
    assert_eq!(palette_messages.len(), 5);
}

#[test]
fn init_reply_emits_both_segment_and_object_variants() {
    let mut scene = Scene::new(1);
    scene.add_effect(1, 20, 60);
    scene.effect_mut(1).unwrap().add_segment(2, SegmentConfig::default());

    let messages = init_reply::build(&scene);
    assert!(messages.iter().any(|m| m.addr == "/effect/1/segment/2/color"));
    assert!(messages.iter().any(|m| m.addr == "/effect/1/object/2/color"));
    assert!(messages.iter().any(|m| m.addr == "/effect/1/segment/2/transparency"));
}

#[test]
fn init_reply_round_trips_through_the_wire_format() {
    let mut scene = Scene::new(1);
    scene.add_effect(1, 10, 60);
    scene.effect_mut(1).unwrap().add_segment(1, SegmentConfig::default());

    let messages = init_reply::build(&scene);
    let color_message = messages
        .iter()
        .find(|m| m.addr == "/effect/1/segment/1/color")
        .expect("color message present");

    let OscType::String(json) = &color_message.args[0] else {
        panic!("color message should carry a JSON string");
    };
    let decoded: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(decoded["colors"], serde_json::json!([0, 1, 2, 3]));
}
