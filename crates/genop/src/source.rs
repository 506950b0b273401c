//! Providers for the two inputs of a run: the table text and the package name.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::GenopError;

/// The opcode table bundled with this crate.
pub const EMBEDDED_TABLE: &str = include_str!("../genop.tab");

/// Supplies raw opcode table text.
pub trait TableSource {
    /// Short description used in diagnostics.
    fn describe(&self) -> String;

    fn read_table(&self) -> Result<String, GenopError>;
}

/// The table compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTable;

impl TableSource for EmbeddedTable {
    fn describe(&self) -> String {
        "embedded genop.tab".to_string()
    }

    fn read_table(&self) -> Result<String, GenopError> {
        Ok(EMBEDDED_TABLE.to_string())
    }
}

/// A table read from disk.
#[derive(Debug, Clone)]
pub struct FileTable {
    path: PathBuf,
}

impl FileTable {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TableSource for FileTable {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_table(&self) -> Result<String, GenopError> {
        debug!(path = %self.path.display(), "reading opcode table");
        fs::read_to_string(&self.path).map_err(|source| GenopError::ResourceUnavailable {
            resource: self.describe(),
            source,
        })
    }
}

/// Supplies the name of the package the output is generated for.
pub trait PackageResolver {
    fn resolve(&self) -> Result<String, GenopError>;
}

/// A package name given up front.
#[derive(Debug, Clone)]
pub struct FixedPackage(pub String);

impl PackageResolver for FixedPackage {
    fn resolve(&self) -> Result<String, GenopError> {
        Ok(self.0.clone())
    }
}

/// Reads `[package].name` from the `Cargo.toml` in a directory.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    name: String,
}

impl ManifestResolver {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join("Cargo.toml")
    }
}

impl PackageResolver for ManifestResolver {
    fn resolve(&self) -> Result<String, GenopError> {
        let path = self.manifest_path();
        debug!(path = %path.display(), "resolving package name");

        let contents = fs::read_to_string(&path).map_err(|err| {
            GenopError::PackageResolutionFailed(format!("{}: {}", path.display(), err))
        })?;
        let manifest: Manifest = toml::from_str(&contents).map_err(|err| {
            GenopError::PackageResolutionFailed(format!("{}: {}", path.display(), err))
        })?;

        manifest.package.map(|package| package.name).ok_or_else(|| {
            GenopError::PackageResolutionFailed(format!(
                "package not found in {}",
                path.display()
            ))
        })
    }
}
