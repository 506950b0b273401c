//! Errors that abort a generation run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatError;

/// Fatal errors of a generation run.
///
/// Malformed table fields are not listed here: the parser defaults them
/// to `0` and carries on.
#[derive(Debug, Error)]
pub enum GenopError {
    #[error("opcode table unavailable ({resource}): {source}")]
    ResourceUnavailable {
        resource: String,
        #[source]
        source: io::Error,
    },

    #[error("could not determine package name: {0}")]
    PackageResolutionFailed(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to write {}: {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
