//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input data.
///
/// The flattener itself never fails; these are raised while assembling a
/// data source from external input.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("dataset defines both `nodes` and `groups`")]
    AmbiguousDataSource,

    #[error("invalid node in {context}: {message}")]
    InvalidNode { context: String, message: String },
}
