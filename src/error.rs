//! Crate error types

use thiserror::Error;

/// Errors surfaced at the crate boundary.
///
/// Applying a well-typed action and all queries are total; only board
/// parsing, snapshot decoding, scenario generation, config loading, and
/// serialization can fail.
#[derive(Debug, Error)]
pub enum CraftworldError {
    /// Board description is structurally invalid
    #[error("malformed board description: {0}")]
    MalformedBoard(String),

    /// An element code outside the known vocabulary
    #[error("unknown element code {0}")]
    UnknownElement(i64),

    /// Goal code outside the primitive/craftable bands
    #[error("goal code {0} is not a collectible or craftable element")]
    InvalidGoal(i64),

    /// Snapshot fields are inconsistent or out of range
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Scenario generation could not place a required element
    #[error("scenario generation failed: {0}")]
    Generation(String),

    /// Generator configuration failed to parse
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON encode/decode failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Image buffer assembly failure
    #[error("render error: {0}")]
    Render(String),

    /// PNG encode/write failure
    #[cfg(feature = "png")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
