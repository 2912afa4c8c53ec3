use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting an annotation set between formats.
///
/// Any malformed record aborts the whole conversion; a silently skipped
/// detection would corrupt evaluation results downstream.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON annotations: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read CSV annotations: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error("malformed record in {path}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("cannot extract a frame index from '{token}' (expected frame<index>)")]
    BadFrameToken { token: String },

    #[error("label '{0}' not found in the class-name table")]
    UnknownLabel(String),

    #[error("table index {index} cannot be mapped to a class id (table length {len}, background offset {offset})")]
    BadTableIndex { index: u32, len: usize, offset: u32 },

    #[error("class id {0} has no entry in the class-name table")]
    UnknownClassId(u32),

    #[error("the '{0}' format uses relative coordinates; supply the frame resolution with --width and --height")]
    MissingResolution(&'static str),
}
