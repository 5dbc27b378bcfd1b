//! Data model for a real-time LED tape light effect engine: named color
//! palettes, moving light segments, per-strip compositing, and the scene
//! that ties them together.
//!
//! This crate is pure model: no sockets, no clock, no I/O. The `server`
//! binary crate drives it with an OSC control plane and a tick loop.

pub mod color;
pub mod effect;
pub mod error;
pub mod palette;
pub mod scene;
pub mod segment;

pub use color::Rgb;
pub use effect::Effect;
pub use error::ValidationError;
pub use palette::{PaletteBook, PaletteName};
pub use scene::Scene;
pub use segment::{ParameterUpdate, Segment, SegmentConfig};
