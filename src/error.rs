use std::path::PathBuf;
use thiserror::Error;

/// Everything the harness can fail with. No local recovery anywhere: callers
/// propagate with `?` and the message carries the script-level detail.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("example directory not found: {path}")]
    MissingDirectory { path: PathBuf },

    #[error("bad filename pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to spawn example '{script}': {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    // Aggregate outcome: every failing script is named, not just the first.
    #[error("{} example(s) failed: {}", .failed.len(), .failed.join(", "))]
    ExamplesFailed { failed: Vec<String> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
