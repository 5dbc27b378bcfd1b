//! Named color palettes (C1).
//!
//! Five palettes `"A".."E"` exist for the lifetime of a [`Scene`](crate::scene::Scene).
//! Each starts with 6 colors but may be resized by a `/palette/X` wire update
//! (§4.1): the new length is simply the number of RGB triples received.

use crate::color::Rgb;
use crate::error::ValidationError;

/// Color shown for an out-of-range positive index (§3: "implementations
/// SHOULD treat this as a validation warning").
pub const ERROR_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };

/// The six default colors every palette starts with.
const DEFAULT_COLORS: [Rgb; 6] = [
    Rgb { r: 0, g: 0, b: 0 },
    Rgb { r: 255, g: 0, b: 0 },
    Rgb { r: 0, g: 255, b: 0 },
    Rgb { r: 0, g: 0, b: 255 },
    Rgb {
        r: 255,
        g: 255,
        b: 0,
    },
    Rgb {
        r: 0,
        g: 255,
        b: 255,
    },
];

/// One of the five always-present palette slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PaletteName {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
}

impl PaletteName {
    /// All five names, in order.
    pub const ALL: [PaletteName; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Parse a single-letter palette name (`"A"`..`"E"`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            _ => None,
        }
    }

    /// Render as the single-letter name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

impl Default for PaletteName {
    fn default() -> Self {
        Self::A
    }
}

/// The five named palettes, indexable by [`PaletteName`].
#[derive(Debug, Clone)]
pub struct PaletteBook {
    slots: [Vec<Rgb>; 5],
}

impl Default for PaletteBook {
    fn default() -> Self {
        Self {
            slots: core::array::from_fn(|_| DEFAULT_COLORS.to_vec()),
        }
    }
}

impl PaletteBook {
    /// Create a book with every palette set to the 6 default colors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the colors of a palette.
    #[must_use]
    pub fn get(&self, name: PaletteName) -> &[Rgb] {
        &self.slots[name as usize]
    }

    /// Replace a palette's colors entirely.
    pub fn set(&mut self, name: PaletteName, colors: Vec<Rgb>) {
        self.slots[name as usize] = colors;
    }

    /// Decode and apply a `/palette/X` wire update: a flat `[r,g,b,r,g,b,...]`
    /// list. Rejects (leaving the palette unchanged) if the length is not a
    /// multiple of 3; each channel is clamped to `0..=255` before grouping.
    pub fn apply_flat_update(
        &mut self,
        name: PaletteName,
        flat: &[i32],
    ) -> Result<(), ValidationError> {
        if flat.len() % 3 != 0 {
            return Err(ValidationError::PaletteLengthNotMultipleOfThree { len: flat.len() });
        }
        let colors = flat
            .chunks_exact(3)
            .map(|c| Rgb {
                r: c[0].clamp(0, 255) as u8,
                g: c[1].clamp(0, 255) as u8,
                b: c[2].clamp(0, 255) as u8,
            })
            .collect();
        self.set(name, colors);
        Ok(())
    }

    /// Resolve a color index against a palette, following §3's rules:
    /// `-1` is the "unset" sentinel and resolves to black; an index outside
    /// `0..len` is a validation warning and resolves to [`ERROR_COLOR`].
    #[must_use]
    pub fn resolve(&self, name: PaletteName, index: i32) -> Rgb {
        if index == -1 {
            return Rgb { r: 0, g: 0, b: 0 };
        }
        let palette = self.get(name);
        match usize::try_from(index) {
            Ok(i) if i < palette.len() => palette[i],
            _ => ERROR_COLOR,
        }
    }

    /// Resolve against palette `name`, falling back to `"A"` if `name` is
    /// somehow not one of the five known slots (defensive; `PaletteName` is
    /// closed, so this only matters if callers parse an unknown letter and
    /// mistakenly proceed rather than rejecting upstream).
    #[must_use]
    pub fn resolve_or_a(&self, name: Option<PaletteName>, index: i32) -> Rgb {
        self.resolve(name.unwrap_or(PaletteName::A), index)
    }
}
