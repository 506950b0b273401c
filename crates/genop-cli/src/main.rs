//! genop CLI entry point.
//!
//! Run with no arguments from a crate directory to write `<crate>_gen.rs`
//! from the bundled opcode table:
//!
//! ```sh
//! cd my-vm && genop
//! ```

use std::path::PathBuf;

use clap::Parser;
use rhizome_genop::{
    EmbeddedTable, FileTable, FixedPackage, ManifestResolver, PackageResolver, TableSource,
    render, write_output,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "genop")]
#[command(about = "Generate a Rust opcode module from an opcode table")]
struct Cli {
    /// Opcode table to read instead of the bundled one
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Package name to generate for (default: read from Cargo.toml)
    #[arg(short, long)]
    package: Option<String>,

    /// Directory containing the Cargo.toml to read the package name from
    #[arg(long, default_value = ".")]
    manifest_dir: PathBuf,

    /// Directory to write <package>_gen.rs into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Write to stdout instead of file
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("genop=info".parse()?)
                .add_directive("rhizome_genop=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let table: Box<dyn TableSource> = match cli.table {
        Some(path) => Box::new(FileTable::new(path)),
        None => Box::new(EmbeddedTable),
    };
    let resolver: Box<dyn PackageResolver> = match cli.package {
        Some(name) => Box::new(FixedPackage(name)),
        None => Box::new(ManifestResolver::new(&cli.manifest_dir)),
    };

    info!("Generating opcodes from {}", table.describe());
    let (ctx, source) = render(table.as_ref(), resolver.as_ref())?;

    if cli.stdout {
        print!("{}", source);
    } else {
        let path = write_output(&cli.out_dir, &ctx, &source)?;
        println!("{}", path.display());
    }

    Ok(())
}
