//! One generation run: read, parse, emit, format, write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codegen::{GenerationContext, generate_source};
use crate::error::GenopError;
use crate::format::{FormatError, format_source};
use crate::source::{PackageResolver, TableSource};
use crate::table::parse;

/// Turn raw table text into formatted source for the given package.
pub fn generate(ctx: &GenerationContext, raw: &str) -> Result<String, FormatError> {
    let table = parse(raw);
    let source = generate_source(ctx, &table)?;
    debug!(bytes = source.len(), "emitted source");
    format_source(&source)
}

/// File name of the generated module, `<package>_gen.rs`.
pub fn output_file_name(ctx: &GenerationContext) -> String {
    format!("{}_gen.rs", ctx.package_name())
}

/// Read the table, resolve the package and render the formatted module.
///
/// Nothing is written; callers decide where the text goes.
pub fn render(
    table: &dyn TableSource,
    resolver: &dyn PackageResolver,
) -> Result<(GenerationContext, String), GenopError> {
    let raw = table.read_table()?;
    debug!(source = %table.describe(), bytes = raw.len(), "read opcode table");

    let ctx = GenerationContext::new(&resolver.resolve()?)?;
    debug!(package = ctx.package_name(), "resolved package");

    let source = generate(&ctx, &raw)?;
    Ok((ctx, source))
}

/// Write generated source to `<out_dir>/<package>_gen.rs`, replacing any existing file.
pub fn write_output(
    out_dir: &Path,
    ctx: &GenerationContext,
    source: &str,
) -> Result<PathBuf, GenopError> {
    let path = out_dir.join(output_file_name(ctx));
    fs::write(&path, source).map_err(|source| GenopError::OutputWriteFailed {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "wrote generated opcodes");
    Ok(path)
}

/// Run the whole pipeline and return the path of the written file.
///
/// Any failure before the write leaves the output directory untouched.
pub fn run(
    table: &dyn TableSource,
    resolver: &dyn PackageResolver,
    out_dir: &Path,
) -> Result<PathBuf, GenopError> {
    let (ctx, source) = render(table, resolver)?;
    write_output(out_dir, &ctx, &source)
}
