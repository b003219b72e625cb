use thiserror::Error;

/// Why a parse-and-highlight pass produced no output.
///
/// Parsing and highlighting themselves are total; these cover the guards
/// around a pass and the machinery that runs it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    #[error("document is {len} bytes, over the {limit} byte limit")]
    InputTooLarge { len: usize, limit: usize },

    #[error("pass for version {version} panicked: {message}")]
    Panicked { version: u64, message: String },

    #[error("pass worker is no longer running")]
    WorkerGone,
}
