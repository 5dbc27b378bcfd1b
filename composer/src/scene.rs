//! The top-level model: a scene id, every effect, and the shared palette book (C4).

use std::collections::BTreeMap;

use crate::color::Rgb;
use crate::effect::Effect;
use crate::error::ValidationError;
use crate::palette::{PaletteBook, PaletteName};

/// The root of the data model. One `Scene` is shared behind the
/// application's exclusive lock (see `server`'s clock/OSC tasks).
#[derive(Debug, Clone)]
pub struct Scene {
    scene_id: u32,
    effects: BTreeMap<u32, Effect>,
    palettes: PaletteBook,
    current_palette_name: PaletteName,
    current_effect_id: Option<u32>,
}

impl Scene {
    #[must_use]
    pub fn new(scene_id: u32) -> Self {
        Self {
            scene_id,
            effects: BTreeMap::new(),
            palettes: PaletteBook::new(),
            current_palette_name: PaletteName::default(),
            current_effect_id: None,
        }
    }

    #[must_use]
    pub const fn scene_id(&self) -> u32 {
        self.scene_id
    }

    #[must_use]
    pub const fn current_effect_id(&self) -> Option<u32> {
        self.current_effect_id
    }

    #[must_use]
    pub const fn current_palette_name(&self) -> PaletteName {
        self.current_palette_name
    }

    #[must_use]
    pub const fn palettes(&self) -> &PaletteBook {
        &self.palettes
    }

    #[must_use]
    pub fn effect(&self, id: u32) -> Option<&Effect> {
        self.effects.get(&id)
    }

    #[must_use]
    pub fn effect_mut(&mut self, id: u32) -> Option<&mut Effect> {
        self.effects.get_mut(&id)
    }

    #[must_use]
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.values()
    }

    /// Insert an effect (replacing any existing one with the same id). If
    /// this is the first effect in the scene, it becomes current.
    pub fn add_effect(&mut self, id: u32, led_count: u32, fps: u32) {
        let mut effect = Effect::new(id, led_count, fps);
        effect.set_palette_name(self.current_palette_name);
        self.effects.insert(id, effect);
        if self.current_effect_id.is_none() {
            self.current_effect_id = Some(id);
        }
    }

    /// Fetch-or-create: used by the OSC `object` address family, which
    /// auto-materializes missing effects (§4.6.2).
    pub fn effect_or_create(&mut self, id: u32, default_led_count: u32, default_fps: u32) -> &mut Effect {
        if !self.effects.contains_key(&id) {
            self.add_effect(id, default_led_count, default_fps);
        }
        self.effects.get_mut(&id).expect("just inserted")
    }

    /// Remove an effect. If it was current, promote the lowest-id remaining
    /// effect; if none remain, clear `current_effect_id` (§4.4).
    pub fn remove_effect(&mut self, id: u32) {
        self.effects.remove(&id);
        if self.current_effect_id == Some(id) {
            self.current_effect_id = self.effects.keys().next().copied();
        }
    }

    /// Switch which effect is current. A no-op (returns `false`) if `id`
    /// doesn't exist.
    pub fn switch_effect(&mut self, id: u32) -> bool {
        if self.effects.contains_key(&id) {
            self.current_effect_id = Some(id);
            true
        } else {
            false
        }
    }

    /// Set the active palette name on the scene and fan it out to every
    /// effect (§4.4).
    pub fn set_palette(&mut self, name: PaletteName) {
        self.current_palette_name = name;
        for effect in self.effects.values_mut() {
            effect.set_palette_name(name);
        }
    }

    /// Replace a palette's colors (`/palette/{X}` wire write).
    pub fn update_palette(&mut self, name: PaletteName, flat: &[i32]) -> Result<(), ValidationError> {
        self.palettes.apply_flat_update(name, flat)
    }

    /// Advance only the current effect (source variant semantics, §4.4).
    pub fn update(&mut self, dt: f32) {
        if let Some(id) = self.current_effect_id {
            if let Some(effect) = self.effects.get_mut(&id) {
                effect.advance_all(dt);
            }
        }
    }

    /// Render the current effect's frame, or an empty frame if there is none.
    #[must_use]
    pub fn render(&self) -> Vec<Rgb> {
        match self.current_effect_id.and_then(|id| self.effects.get(&id)) {
            Some(effect) => effect.render(&self.palettes),
            None => Vec::new(),
        }
    }
}
