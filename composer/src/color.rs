//! Color primitives shared by the palette, segment, and compositor.

use smart_leds::RGB8;

/// An 8-bit-per-channel RGB color.
///
/// Reused from `smart_leds` rather than redefined, matching how LED driver
/// consumers expect to receive output.
pub type Rgb = RGB8;

/// Linearly interpolate a single channel, floor-rounded.
///
/// `t` is clamped to `[0, 1]` before interpolating.
#[must_use]
pub fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    let a = f32::from(a);
    let b = f32::from(b);
    (a + (b - a) * t).floor() as u8
}

/// Linearly interpolate two colors channel-wise.
#[must_use]
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb {
        r: lerp_channel(a.r, b.r, t),
        g: lerp_channel(a.g, b.g, t),
        b: lerp_channel(a.b, b.b, t),
    }
}

/// Linearly interpolate two alpha values, clamped to `[0, 1]`.
#[must_use]
pub fn lerp_alpha(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (a + (b - a) * t).clamp(0.0, 1.0)
}
