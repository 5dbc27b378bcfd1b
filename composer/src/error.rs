//! Validation errors for model mutations.
//!
//! These are never fatal: callers (the OSC dispatcher, scene loader) log
//! and discard on `Err`, leaving the model unchanged, per spec §7.

/// A rejected mutation to the data model.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A palette update's flat RGB list was not a multiple of 3.
    #[error("palette color list length {len} is not a multiple of 3")]
    PaletteLengthNotMultipleOfThree {
        /// Length of the rejected flat list.
        len: usize,
    },

    /// An unrecognized OSC/update parameter name.
    #[error("unknown parameter name: {0}")]
    UnknownParameter(String),
}
