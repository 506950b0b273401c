//! Canonical formatting of generated source.
//!
//! The text is parsed with `syn` and printed back with `prettyplease`. The
//! parse doubles as the syntax check: emitted text that is not valid Rust is
//! a generator defect and is reported, never passed through.

use proc_macro2::LineColumn;
use thiserror::Error;

/// Errors produced while rendering or formatting generated source.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("generated source is not valid Rust at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to render generated source")]
    Render(#[from] std::fmt::Error),
}

/// Format Rust source text into canonical layout.
///
/// Formatting is a fixed point: formatting the output again returns it unchanged.
pub fn format_source(source: &str) -> Result<String, FormatError> {
    let file = syn::parse_file(source).map_err(|err| {
        let LineColumn { line, column } = err.span().start();
        FormatError::Syntax {
            line,
            column: column + 1,
            message: err.to_string(),
        }
    })?;
    Ok(prettyplease::unparse(&file))
}
