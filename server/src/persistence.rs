//! JSON scene persistence (C7, spec §4.7).
//!
//! A `Scene` has no `Serialize`/`Deserialize` of its own — the wire
//! document's shape (string-keyed effect/segment maps, `current_palette`
//! as a bare letter) doesn't match the in-memory model 1:1, so this module
//! owns the translation in both directions.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tapelight_composer::{Effect, ParameterUpdate, PaletteBook, PaletteName, Scene, SegmentConfig};

use crate::error::PersistError;

#[derive(Debug, Serialize, Deserialize)]
struct SceneDocument {
    #[serde(rename = "scene_ID")]
    scene_id: u32,
    #[serde(rename = "current_effect_ID")]
    current_effect_id: Option<u32>,
    current_palette: String,
    palettes: BTreeMap<String, Vec<[u8; 3]>>,
    effects: BTreeMap<String, EffectDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EffectDocument {
    #[serde(rename = "effect_ID")]
    effect_id: u32,
    led_count: u32,
    fps: u32,
    segments: BTreeMap<String, SegmentDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SegmentDocument {
    #[serde(rename = "segment_ID")]
    segment_id: u32,
    color: [i32; 4],
    transparency: [f32; 4],
    length: [u32; 3],
    move_speed: f32,
    move_range: [f32; 2],
    initial_position: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_position: Option<f32>,
    is_edge_reflect: bool,
    dimmer_time: [u32; 5],
    #[serde(skip_serializing_if = "Option::is_none")]
    gradient: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gradient_colors: Option<[i32; 3]>,
}

/// Only palette data, for the `save_palettes_to_json`/`load_palettes_from_json`
/// pair carried over from the source's persistence surface (SPEC_FULL.md §9).
#[derive(Debug, Serialize, Deserialize)]
struct PalettesDocument {
    palettes: BTreeMap<String, Vec<[u8; 3]>>,
    current_palette: String,
}

/// Serialize a scene to its JSON document form.
#[must_use]
pub fn to_json(scene: &Scene) -> String {
    let document = build_document(scene);
    serde_json::to_string_pretty(&document).expect("SceneDocument always serializes")
}

/// Write a scene's JSON document to `path`.
pub fn save(scene: &Scene, path: &Path) -> Result<(), PersistError> {
    let json = to_json(scene);
    std::fs::write(path, json).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a scene from a JSON document at `path`.
///
/// Rebuilds bottom-up: palettes, then segments, then effects, then the
/// scene itself, restoring `current_position` when present and falling
/// back to `initial_position` otherwise (§4.7).
pub fn load(path: &Path) -> Result<Scene, PersistError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: SceneDocument = serde_json::from_str(&raw)?;
    Ok(build_scene(document))
}

/// Save only the palette book, per the source's supplemental
/// `save_palettes_to_json`.
pub fn save_palettes(scene: &Scene, path: &Path) -> Result<(), PersistError> {
    let document = PalettesDocument {
        palettes: encode_palettes(scene.palettes()),
        current_palette: scene.current_palette_name().as_str().to_string(),
    };
    let json = serde_json::to_string_pretty(&document).expect("PalettesDocument always serializes");
    std::fs::write(path, json).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load only the palette book into an existing scene, per the source's
/// supplemental `load_palettes_from_json`.
pub fn load_palettes(scene: &mut Scene, path: &Path) -> Result<(), PersistError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: PalettesDocument = serde_json::from_str(&raw)?;
    for (name, colors) in document.palettes {
        if let Some(parsed) = PaletteName::parse(&name) {
            let flat: Vec<i32> = colors
                .into_iter()
                .flat_map(|c| c.into_iter().map(i32::from))
                .collect();
            let _ = scene.update_palette(parsed, &flat);
        }
    }
    if let Some(current) = PaletteName::parse(&document.current_palette) {
        scene.set_palette(current);
    }
    Ok(())
}

fn encode_palettes(book: &PaletteBook) -> BTreeMap<String, Vec<[u8; 3]>> {
    PaletteName::ALL
        .into_iter()
        .map(|name| {
            let colors = book
                .get(name)
                .iter()
                .map(|c| [c.r, c.g, c.b])
                .collect();
            (name.as_str().to_string(), colors)
        })
        .collect()
}

fn build_document(scene: &Scene) -> SceneDocument {
    let effects = scene
        .effects()
        .map(|effect| (effect.id().to_string(), build_effect_document(effect)))
        .collect();

    SceneDocument {
        scene_id: scene.scene_id(),
        current_effect_id: scene.current_effect_id(),
        current_palette: scene.current_palette_name().as_str().to_string(),
        palettes: encode_palettes(scene.palettes()),
        effects,
    }
}

fn build_effect_document(effect: &Effect) -> EffectDocument {
    let segments = effect
        .segments()
        .map(|segment| {
            (
                segment.id().to_string(),
                SegmentDocument {
                    segment_id: segment.id(),
                    color: segment.color(),
                    transparency: segment.transparency(),
                    length: segment.length(),
                    move_speed: segment.move_speed(),
                    move_range: segment.move_range(),
                    initial_position: segment.initial_position(),
                    current_position: Some(segment.current_position()),
                    is_edge_reflect: segment.is_edge_reflect(),
                    dimmer_time: segment.dimmer_time(),
                    gradient: Some(segment.gradient()),
                    fade: Some(segment.fade()),
                    gradient_colors: Some(segment.gradient_colors()),
                },
            )
        })
        .collect();

    EffectDocument {
        effect_id: effect.id(),
        led_count: effect.led_count(),
        fps: effect.fps(),
        segments,
    }
}

fn build_scene(document: SceneDocument) -> Scene {
    let mut scene = Scene::new(document.scene_id);

    for (name, colors) in document.palettes {
        if let Some(parsed) = PaletteName::parse(&name) {
            let flat: Vec<i32> = colors
                .into_iter()
                .flat_map(|c| c.into_iter().map(i32::from))
                .collect();
            let _ = scene.update_palette(parsed, &flat);
        }
    }
    if let Some(current) = PaletteName::parse(&document.current_palette) {
        scene.set_palette(current);
    }

    for (effect_id_str, effect_doc) in document.effects {
        let effect_id = effect_id_str.parse().unwrap_or(effect_doc.effect_id);
        scene.add_effect(effect_id, effect_doc.led_count, effect_doc.fps);
        let Some(effect) = scene.effect_mut(effect_id) else {
            continue;
        };

        for (segment_id_str, seg_doc) in effect_doc.segments {
            let segment_id = segment_id_str.parse().unwrap_or(seg_doc.segment_id);
            effect.add_segment(
                segment_id,
                SegmentConfig {
                    color: seg_doc.color,
                    transparency: seg_doc.transparency,
                    length: seg_doc.length,
                    move_speed: seg_doc.move_speed,
                    move_range: seg_doc.move_range,
                    initial_position: seg_doc.initial_position,
                    is_edge_reflect: seg_doc.is_edge_reflect,
                    dimmer_time: seg_doc.dimmer_time,
                },
            );
            let Some(segment) = effect.segment_mut(segment_id) else {
                continue;
            };
            if let Some(position) = seg_doc.current_position {
                let _ = segment.apply(ParameterUpdate::CurrentPosition(position));
            }
            if let Some(gradient) = seg_doc.gradient {
                let _ = segment.apply(ParameterUpdate::Gradient(gradient));
            }
            if let Some(fade) = seg_doc.fade {
                let _ = segment.apply(ParameterUpdate::Fade(fade));
            }
            if let Some(gradient_colors) = seg_doc.gradient_colors {
                let _ = segment.apply(ParameterUpdate::GradientColors(gradient_colors));
            }
        }
    }

    if let Some(current) = document.current_effect_id {
        scene.switch_effect(current);
    }

    scene
}
