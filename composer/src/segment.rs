//! A single moving, color-gradient light object (C2).

use crate::color::{lerp_alpha, lerp_rgb, Rgb};
use crate::error::ValidationError;
use crate::palette::{PaletteBook, PaletteName};

/// `[enable, idxL, idxR]` as described in spec §3/§4.2.4.
pub type GradientColors = [i32; 3];

/// One moving light object: color indices, geometry, motion, fade envelope.
///
/// See spec.md §3 for the full attribute table and invariants.
#[derive(Debug, Clone)]
pub struct Segment {
    id: u32,
    color: [i32; 4],
    transparency: [f32; 4],
    length: [u32; 3],
    move_speed: f32,
    move_range: [f32; 2],
    initial_position: f32,
    current_position: f32,
    is_edge_reflect: bool,
    dimmer_time: [u32; 5],
    gradient: bool,
    gradient_colors: GradientColors,
    fade: bool,
    time: f32,

    // Passthrough fields: never consumed by rendering, only round-tripped
    // through OSC's `/request/init` reply and JSON persistence (see
    // SPEC_FULL.md §4.2.8).
    position_interval: u32,
    span_range: [f32; 2],
    span_speed: f32,
    span_interval: u32,
}

/// Construction parameters for a new [`Segment`].
///
/// Grouped into its own type so `Segment::new` doesn't take a dozen
/// positional arguments.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    pub color: [i32; 4],
    pub transparency: [f32; 4],
    pub length: [u32; 3],
    pub move_speed: f32,
    pub move_range: [f32; 2],
    pub initial_position: f32,
    pub is_edge_reflect: bool,
    pub dimmer_time: [u32; 5],
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            color: [0, 1, 2, 3],
            transparency: [1.0, 1.0, 1.0, 1.0],
            length: [1, 1, 1],
            move_speed: 0.0,
            move_range: [0.0, 224.0],
            initial_position: 0.0,
            is_edge_reflect: false,
            dimmer_time: [0, 0, 0, 0, 0],
        }
    }
}

/// A single named-parameter update, replacing the source's duck-typed
/// `update_param(name, value)` per the REDESIGN FLAGS in spec.md §9.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterUpdate {
    Color([i32; 4]),
    Transparency([f32; 4]),
    Length([u32; 3]),
    MoveSpeed(f32),
    MoveRange([f32; 2]),
    InitialPosition(f32),
    CurrentPosition(f32),
    IsEdgeReflect(bool),
    DimmerTime([u32; 5]),
    Gradient(bool),
    GradientColors(GradientColors),
    Fade(bool),
    PositionInterval(u32),
    SpanRange([f32; 2]),
    SpanSpeed(f32),
    SpanInterval(u32),
}

impl Segment {
    /// Create a new segment from its id and configuration.
    #[must_use]
    pub fn new(id: u32, config: SegmentConfig) -> Self {
        let mut move_range = config.move_range;
        if move_range[0] > move_range[1] {
            move_range[1] = move_range[0] + 1.0;
        }
        let current_position = config.initial_position.clamp(move_range[0], move_range[1]);
        Self {
            id,
            color: config.color,
            transparency: config.transparency,
            length: config.length,
            move_speed: config.move_speed,
            move_range,
            initial_position: config.initial_position,
            current_position,
            is_edge_reflect: config.is_edge_reflect,
            dimmer_time: config.dimmer_time,
            gradient: false,
            gradient_colors: [0, -1, -1],
            fade: false,
            time: 0.0,
            position_interval: 10,
            span_range: move_range,
            span_speed: config.move_speed,
            span_interval: 10,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub const fn color(&self) -> [i32; 4] {
        self.color
    }

    #[must_use]
    pub const fn transparency(&self) -> [f32; 4] {
        self.transparency
    }

    #[must_use]
    pub const fn length(&self) -> [u32; 3] {
        self.length
    }

    #[must_use]
    pub const fn move_speed(&self) -> f32 {
        self.move_speed
    }

    #[must_use]
    pub const fn move_range(&self) -> [f32; 2] {
        self.move_range
    }

    #[must_use]
    pub const fn initial_position(&self) -> f32 {
        self.initial_position
    }

    #[must_use]
    pub const fn current_position(&self) -> f32 {
        self.current_position
    }

    #[must_use]
    pub const fn is_edge_reflect(&self) -> bool {
        self.is_edge_reflect
    }

    #[must_use]
    pub const fn dimmer_time(&self) -> [u32; 5] {
        self.dimmer_time
    }

    #[must_use]
    pub const fn gradient(&self) -> bool {
        self.gradient
    }

    #[must_use]
    pub const fn gradient_colors(&self) -> GradientColors {
        self.gradient_colors
    }

    #[must_use]
    pub const fn fade(&self) -> bool {
        self.fade
    }

    #[must_use]
    pub const fn position_interval(&self) -> u32 {
        self.position_interval
    }

    #[must_use]
    pub const fn span_range(&self) -> [f32; 2] {
        self.span_range
    }

    #[must_use]
    pub const fn span_speed(&self) -> f32 {
        self.span_speed
    }

    #[must_use]
    pub const fn span_interval(&self) -> u32 {
        self.span_interval
    }

    /// Apply a single parameter update.
    ///
    /// `color` needs no RGB cache invalidation step here: unlike the
    /// source, nothing caches resolved RGB across frames — [`Segment::light_data`]
    /// resolves against the palette fresh every call, so a stale cache can
    /// never exist in the first place.
    pub fn apply(&mut self, update: ParameterUpdate) -> Result<(), ValidationError> {
        match update {
            ParameterUpdate::Color(c) => self.color = c,
            ParameterUpdate::Transparency(t) => self.transparency = t,
            ParameterUpdate::Length(l) => self.length = l,
            ParameterUpdate::MoveSpeed(s) => self.move_speed = s,
            ParameterUpdate::MoveRange(mut range) => {
                if range[0] > range[1] {
                    range[1] = range[0] + 1.0;
                }
                self.move_range = range;
                self.current_position = self.current_position.clamp(range[0], range[1]);
            }
            ParameterUpdate::InitialPosition(p) => self.initial_position = p,
            ParameterUpdate::CurrentPosition(p) => {
                self.current_position = p.clamp(self.move_range[0], self.move_range[1]);
            }
            ParameterUpdate::IsEdgeReflect(v) => self.is_edge_reflect = v,
            ParameterUpdate::DimmerTime(d) => self.dimmer_time = d,
            ParameterUpdate::Gradient(v) => self.gradient = v,
            ParameterUpdate::GradientColors(g) => self.gradient_colors = g,
            ParameterUpdate::Fade(v) => self.fade = v,
            ParameterUpdate::PositionInterval(v) => self.position_interval = v,
            ParameterUpdate::SpanRange(v) => self.span_range = v,
            ParameterUpdate::SpanSpeed(v) => self.span_speed = v,
            ParameterUpdate::SpanInterval(v) => self.span_interval = v,
        }
        Ok(())
    }

    /// Convenience: set `initial_position` and seed `current_position` from
    /// it in one call, matching the `position.initial_position` OSC dict key
    /// (§4.6.3), which writes both fields.
    pub fn set_initial_position(&mut self, p: f32) {
        self.initial_position = p;
        self.current_position = p.clamp(self.move_range[0], self.move_range[1]);
    }

    /// Advance motion by `dt` seconds and tick the envelope clock.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        self.current_position += self.move_speed * dt;
        self.normalize_position();
    }

    fn normalize_position(&mut self) {
        let [lo, hi] = self.move_range;
        if self.is_edge_reflect {
            if hi <= lo {
                self.current_position = lo;
                return;
            }
            loop {
                if self.current_position < lo {
                    let overshoot = lo - self.current_position;
                    self.current_position = lo + overshoot;
                    self.move_speed = self.move_speed.abs();
                } else if self.current_position > hi {
                    let overshoot = self.current_position - hi;
                    self.current_position = hi - overshoot;
                    self.move_speed = -self.move_speed.abs();
                } else {
                    break;
                }
            }
        } else {
            let span = hi - lo + 1.0;
            if span <= 0.0 {
                self.current_position = lo;
                return;
            }
            if self.current_position < lo {
                let over = (lo - self.current_position).rem_euclid(span);
                self.current_position = hi - over;
            } else if self.current_position > hi {
                let over = (self.current_position - hi).rem_euclid(span);
                self.current_position = lo + over;
            }
        }
    }

    /// The four control points `x0..x3` along the strip (§4.2.3).
    #[must_use]
    pub fn control_points(&self) -> [f32; 4] {
        let total_length = (self.length[0] + self.length[1] + self.length[2]) as f32;
        let x0 = self.current_position - total_length / 2.0;
        let x1 = x0 + self.length[0] as f32;
        let x2 = x1 + self.length[1] as f32;
        let x3 = x2 + self.length[2] as f32;
        [x0, x1, x2, x3]
    }

    /// The four control-point colors, resolving gradient overrides (§4.2.4).
    #[must_use]
    pub fn control_colors(&self, palette_name: PaletteName, book: &PaletteBook) -> [Rgb; 4] {
        if self.gradient && self.gradient_colors[0] == 1 {
            let c0 = book.resolve(palette_name, self.gradient_colors[1]);
            let c3 = book.resolve(palette_name, self.gradient_colors[2]);
            let c1 = lerp_rgb(c0, c3, 1.0 / 3.0);
            let c2 = lerp_rgb(c0, c3, 2.0 / 3.0);
            [c0, c1, c2, c3]
        } else {
            [
                book.resolve(palette_name, self.color[0]),
                book.resolve(palette_name, self.color[1]),
                book.resolve(palette_name, self.color[2]),
                book.resolve(palette_name, self.color[3]),
            ]
        }
    }

    /// The dimmer/fade envelope brightness factor at the segment's current
    /// `time`, per §4.2.6.
    #[must_use]
    pub fn brightness(&self) -> f32 {
        let cycle_ms = self.dimmer_time[4];
        if !self.fade || cycle_ms == 0 {
            return 1.0;
        }

        let t = (self.time * 1000.0).rem_euclid(cycle_ms as f32);
        let f0 = self.dimmer_time[0] as f32;
        let f1 = self.dimmer_time[1] as f32;
        let f2 = self.dimmer_time[2] as f32;
        let f3 = self.dimmer_time[3] as f32;

        if t < f0 {
            0.0
        } else if t < f1 {
            if f1 > f0 {
                (t - f0) / (f1 - f0)
            } else {
                1.0
            }
        } else if t < f2 {
            1.0
        } else if t < f3 {
            if f3 > f2 {
                1.0 - (t - f2) / (f3 - f2)
            } else {
                0.0
            }
        } else {
            0.0
        }
    }

    /// Per-LED sampled contributions of this segment: sparse
    /// `(led_position, color, alpha)` triples, per §4.2.5/§4.2.7.
    ///
    /// Positions are not yet filtered against an effect's `led_count` —
    /// [`crate::effect::Effect::render`] does that, matching spec §4.3.1
    /// ("skip if... p not in [0, led_count)").
    #[must_use]
    pub fn light_data(&self, palette_name: PaletteName, book: &PaletteBook) -> Vec<(i32, Rgb, f32)> {
        let points = self.control_points();
        let colors = self.control_colors(palette_name, book);
        let brightness = self.brightness();

        let [lo, hi] = self.move_range;
        let start = points[0].floor() as i32;
        let end = points[3].ceil() as i32;

        let mut out = Vec::with_capacity((end - start + 1).max(0) as usize);
        for p in start..=end {
            let pf = p as f32;
            if pf < lo || pf > hi {
                continue;
            }

            let Some(i) = Self::locate_subsegment(&points, pf) else {
                continue;
            };

            let span = (points[i + 1] - points[i]).max(1.0);
            let t = ((pf - points[i]) / span).clamp(0.0, 1.0);

            let rgb = lerp_rgb(colors[i], colors[i + 1], t);
            let alpha = lerp_alpha(self.transparency[i], self.transparency[i + 1], t) * brightness;

            out.push((p, rgb, alpha));
        }
        out
    }

    /// Find the sub-segment `i` such that `points[i] <= p <= points[i+1]`,
    /// ties going to the lower index, per §4.2.5 step 1.
    fn locate_subsegment(points: &[f32; 4], p: f32) -> Option<usize> {
        for i in 0..3 {
            if points[i] <= p && p <= points[i + 1] {
                return Some(i);
            }
        }
        None
    }
}
