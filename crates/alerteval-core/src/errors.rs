use std::path::PathBuf;
use thiserror::Error;

/// Typed failures for the evaluation pipeline.
///
/// Everything here is fatal for the run except where a caller
/// explicitly recovers (the judge's structured-parse fallback never
/// surfaces as an error at all).
#[derive(Debug, Error)]
pub enum EvalError {
    /// Required configuration (e.g. the API credential) is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// No prompt resource exists for the requested version.
    #[error("prompt not found at {}", .0.display())]
    PromptNotFound(PathBuf),

    /// The inference service returned no usable text.
    #[error("no text block found in judge response")]
    EmptyResponse,

    /// A dataset column held a value outside its enum domain.
    #[error("invalid {field} value: {value:?}")]
    EnumParse { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
