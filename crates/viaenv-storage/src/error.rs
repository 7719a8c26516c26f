//! Repository error types.
//!
//! Every variant names the source it failed on so a startup failure can be
//! diagnosed from the log line alone.

/// Errors that can occur while reading dashboard data.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot at '{path}': {reason}")]
    Read { path: String, reason: String },

    /// The snapshot file is not valid JSON or does not match the schema.
    #[error("failed to parse snapshot at '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// The snapshot parsed but violates a dataset invariant.
    #[error("invalid snapshot at '{path}': {reason}")]
    Invalid { path: String, reason: String },
}
