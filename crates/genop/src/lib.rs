//! Opcode table parser and Rust code generator.
//!
//! Reads a BEAM-style opcode table and generates a Rust module declaring the
//! opcodes as typed constants for a given package.
//!
//! # Table format
//!
//! ```text
//! # comment
//! BEAM_FORMAT_NUMBER=0
//! 1: label/1
//! 2: func_info/3
//! ```
//!
//! # Pipeline
//!
//! [`parse`] the text into an [`OpcodeTable`], emit source with
//! [`generate_source`], then canonicalize it with [`format_source`].
//! [`generate`] does all three; [`run`] also reads the inputs through a
//! [`TableSource`] and a [`PackageResolver`] and writes `<package>_gen.rs`.

mod error;
mod table;
mod format;
pub mod codegen;
pub mod source;
pub mod driver;

pub use codegen::{GenerationContext, generate_source};
pub use driver::{generate, output_file_name, render, run, write_output};
pub use error::GenopError;
pub use format::{FormatError, format_source};
pub use source::{
    EMBEDDED_TABLE, EmbeddedTable, FileTable, FixedPackage, ManifestResolver, PackageResolver,
    TableSource,
};
pub use table::{FORMAT_NUMBER_MARKER, Lenient, Opcode, OpcodeTable, parse};
