//! A per-LED-strip rendering target holding many segments (C3).

use std::collections::BTreeMap;

use crate::color::Rgb;
use crate::error::ValidationError;
use crate::palette::{PaletteBook, PaletteName};
use crate::segment::{ParameterUpdate, Segment, SegmentConfig};

/// A single addressable LED strip: its segments, and the palette it renders
/// against.
#[derive(Debug, Clone)]
pub struct Effect {
    id: u32,
    led_count: u32,
    fps: u32,
    // `BTreeMap` keeps ascending-id iteration order for free, which is
    // exactly what `render`'s compositing pass requires (§4.3.1).
    segments: BTreeMap<u32, Segment>,
    current_palette_name: PaletteName,
}

impl Effect {
    #[must_use]
    pub fn new(id: u32, led_count: u32, fps: u32) -> Self {
        Self {
            id,
            led_count,
            fps,
            segments: BTreeMap::new(),
            current_palette_name: PaletteName::default(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub const fn led_count(&self) -> u32 {
        self.led_count
    }

    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps
    }

    #[must_use]
    pub const fn current_palette_name(&self) -> PaletteName {
        self.current_palette_name
    }

    pub fn set_palette_name(&mut self, name: PaletteName) {
        self.current_palette_name = name;
    }

    #[must_use]
    pub fn segment(&self, id: u32) -> Option<&Segment> {
        self.segments.get(&id)
    }

    #[must_use]
    pub fn segment_mut(&mut self, id: u32) -> Option<&mut Segment> {
        self.segments.get_mut(&id)
    }

    #[must_use]
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Insert a segment, replacing any existing one with the same id.
    pub fn add_segment(&mut self, id: u32, config: SegmentConfig) {
        self.segments.insert(id, Segment::new(id, config));
    }

    /// Remove a segment; a no-op if it doesn't exist.
    pub fn remove_segment(&mut self, id: u32) {
        self.segments.remove(&id);
    }

    /// Apply a named parameter update to segment `id`.
    pub fn update_segment_param(
        &mut self,
        id: u32,
        update: ParameterUpdate,
    ) -> Result<(), ValidationError> {
        let Some(segment) = self.segments.get_mut(&id) else {
            return Err(ValidationError::UnknownParameter(format!(
                "segment {id} does not exist"
            )));
        };
        segment.apply(update)
    }

    /// Advance every segment's motion and envelope clock by `dt` seconds.
    /// No cross-segment coupling (§4.3.2).
    pub fn advance_all(&mut self, dt: f32) {
        for segment in self.segments.values_mut() {
            segment.advance(dt);
        }
    }

    /// Composite every segment into one frame, source-over, in ascending
    /// `segment_id` order (§4.3.1).
    #[must_use]
    pub fn render(&self, book: &PaletteBook) -> Vec<Rgb> {
        let mut out = vec![Rgb { r: 0, g: 0, b: 0 }; self.led_count as usize];
        let mut opacity = vec![0.0f32; self.led_count as usize];

        for segment in self.segments.values() {
            for (p, rgb, alpha) in segment.light_data(self.current_palette_name, book) {
                if alpha <= 0.0 || p < 0 || p as u32 >= self.led_count {
                    continue;
                }
                let idx = p as usize;

                if opacity[idx] == 0.0 {
                    out[idx] = rgb;
                    opacity[idx] = alpha;
                    continue;
                }

                let existing_opacity = opacity[idx];
                let w_new = alpha * (1.0 - existing_opacity);
                let total = existing_opacity + w_new;
                if total > 0.0 {
                    out[idx] = Rgb {
                        r: blend_channel(out[idx].r, existing_opacity, rgb.r, w_new, total),
                        g: blend_channel(out[idx].g, existing_opacity, rgb.g, w_new, total),
                        b: blend_channel(out[idx].b, existing_opacity, rgb.b, w_new, total),
                    };
                    opacity[idx] = 1.0 - (1.0 - existing_opacity) * (1.0 - alpha);
                }
            }
        }

        out
    }
}

fn blend_channel(existing: u8, existing_opacity: f32, incoming: u8, w_new: f32, total: f32) -> u8 {
    let blended = (f32::from(existing) * existing_opacity + f32::from(incoming) * w_new) / total;
    blended.round().clamp(0.0, 255.0) as u8
}
