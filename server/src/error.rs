//! Error types for the OSC control plane and persistence layer.

use std::path::PathBuf;

/// A rejected or malformed OSC message.
#[derive(Debug, thiserror::Error)]
pub enum OscError {
    #[error("message to {address:?} carried no arguments")]
    MissingArgument { address: String },

    #[error("could not coerce argument for param {param:?}: {reason}")]
    Coercion { param: String, reason: String },

    #[error("failed to decode OSC packet: {0}")]
    Decode(#[from] rosc::OscError),

    #[error(transparent)]
    Validation(#[from] tapelight_composer::ValidationError),
}

/// A failure loading or saving a scene document.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene document: {0}")]
    Decode(#[from] serde_json::Error),
}
