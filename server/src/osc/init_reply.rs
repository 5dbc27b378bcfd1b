//! `/request/init` snapshot reply assembly (§4.6.4/§4.6.7).

use rosc::{OscMessage, OscType};
use serde_json::json;
use tapelight_composer::{PaletteName, Scene};

/// Build every message the init-reply sends, in the order the source emits
/// them: one `/palette/{X}` per palette, then for every effect/segment one
/// `color`/`position`/`span`/`transparency` message under both
/// `/effect/{E}/segment/{S}/...` and `/effect/{E}/object/{S}/...`.
#[must_use]
pub fn build(scene: &Scene) -> Vec<OscMessage> {
    let mut messages = Vec::new();

    for name in PaletteName::ALL {
        let colors = scene.palettes().get(name);
        let args = colors
            .iter()
            .flat_map(|c| [OscType::Int(i32::from(c.r)), OscType::Int(i32::from(c.g)), OscType::Int(i32::from(c.b))])
            .collect();
        messages.push(OscMessage {
            addr: format!("/palette/{}", name.as_str()),
            args,
        });
    }

    for effect in scene.effects() {
        for segment in effect.segments() {
            for kind in ["segment", "object"] {
                let prefix = format!("/effect/{}/{}/{}", effect.id(), kind, segment.id());

                let color_json = json!({
                    "colors": segment.color(),
                    "speed": segment.move_speed(),
                    "gradient": i32::from(segment.gradient()),
                })
                .to_string();
                messages.push(OscMessage {
                    addr: format!("{prefix}/color"),
                    args: vec![OscType::String(color_json)],
                });

                let position_json = json!({
                    "initial_position": segment.initial_position(),
                    "speed": segment.move_speed(),
                    "range": segment.move_range(),
                    "interval": segment.position_interval(),
                })
                .to_string();
                messages.push(OscMessage {
                    addr: format!("{prefix}/position"),
                    args: vec![OscType::String(position_json)],
                });

                let length = segment.length();
                let span_json = json!({
                    "span": length[0] + length[1] + length[2],
                    "range": segment.span_range(),
                    "speed": segment.span_speed(),
                    "interval": segment.span_interval(),
                    "gradient_colors": segment.gradient_colors(),
                    "fade": i32::from(segment.fade()),
                })
                .to_string();
                messages.push(OscMessage {
                    addr: format!("{prefix}/span"),
                    args: vec![OscType::String(span_json)],
                });

                let transparency = segment.transparency();
                messages.push(OscMessage {
                    addr: format!("{prefix}/transparency"),
                    args: transparency.iter().map(|t| OscType::Float(*t)).collect(),
                });
            }
        }
    }

    messages
}
