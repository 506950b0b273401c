//! Code generation from a parsed opcode table.
//!
//! The generated module has a fixed shape that downstream code relies on:
//! - `BEAM_FORMAT_NUMBER`: the table's format version
//! - `Opcode`: a struct with `Id`, `Name` and `Arity` fields
//! - `op`: a const constructor taking the fields positionally
//! - `Opcodes`: every opcode in table order, sentinel first
//!
//! The text written here is not laid out carefully; [`crate::format_source`]
//! canonicalizes it.

use crate::error::GenopError;
use crate::table::{Opcode, OpcodeTable};
use std::fmt::Write as FmtWrite;

/// Settings supplied by the caller for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    package_name: String,
}

impl GenerationContext {
    /// Build a context for the given package.
    ///
    /// Cargo package names are normalized the way cargo names crates
    /// (`beam-vm` becomes `beam_vm`). The result must be a plain identifier.
    pub fn new(package_name: &str) -> Result<Self, GenopError> {
        let name = package_name.trim().replace('-', "_");
        if !is_identifier(&name) {
            return Err(GenopError::PackageResolutionFailed(format!(
                "`{}` is not a valid package name",
                package_name
            )));
        }
        Ok(Self { package_name: name })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Generate the unformatted source of the opcode module.
pub fn generate_source(
    ctx: &GenerationContext,
    table: &OpcodeTable,
) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    // Module header
    writeln!(&mut output, "//! Opcode table for the `{}` package.", ctx.package_name())?;
    writeln!(&mut output, "//!")?;
    writeln!(&mut output, "//! This module is auto-generated by genop.")?;
    writeln!(&mut output, "//! Do not edit manually.")?;
    writeln!(&mut output)?;

    writeln!(
        &mut output,
        "pub const BEAM_FORMAT_NUMBER: i64 = {};",
        table.format_version()
    )?;
    writeln!(&mut output)?;

    writeln!(&mut output, "#[allow(non_snake_case)]")?;
    writeln!(&mut output, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(&mut output, "pub struct Opcode {{")?;
    writeln!(&mut output, "  pub Id: i64,")?;
    writeln!(&mut output, "  pub Name: &'static str,")?;
    writeln!(&mut output, "  pub Arity: u64,")?;
    writeln!(&mut output, "}}")?;
    writeln!(&mut output)?;

    writeln!(&mut output, "const fn op(id: i64, name: &'static str, arity: u64) -> Opcode {{")?;
    writeln!(&mut output, "  Opcode {{ Id: id, Name: name, Arity: arity }}")?;
    writeln!(&mut output, "}}")?;
    writeln!(&mut output)?;

    writeln!(&mut output, "#[allow(non_upper_case_globals)]")?;
    writeln!(&mut output, "pub static Opcodes: &[Opcode] = &[")?;
    for opcode in table.opcodes() {
        generate_entry(&mut output, opcode)?;
    }
    writeln!(&mut output, "];")?;

    Ok(output)
}

/// Generate the `op(...)` call for one opcode.
fn generate_entry(output: &mut String, opcode: &Opcode) -> Result<(), std::fmt::Error> {
    writeln!(
        output,
        "  op({}, {}, {}),",
        opcode.id,
        string_literal(&opcode.name),
        opcode.arity
    )
}

/// Quote a table name as a Rust string literal.
///
/// Names come straight from the table, so quotes, backslashes and control
/// characters are escaped here.
fn string_literal(value: &str) -> String {
    format!("\"{}\"", value.escape_default())
}
