//! Audit manifests: groups, ignores and test groups in one file.
//!
//! A manifest is plain data read by an outer layer; the audit core never
//! touches the filesystem. TOML needs the `config-file` feature, JSON is
//! always available.
//!
//! ```toml
//! ignore = ["Edge.Exceptions#edgeRemovalNotSupported"]
//!
//! [[group]]
//! name = "Edge.Exceptions"
//! operations = ["edgeRemovalNotSupported", "edgeAdditionsNotSupported"]
//!
//! [[test_group]]
//! name = "EdgeTest"
//!
//! [[test_group.covers]]
//! group = "Edge.Exceptions"
//! operations = ["edgeAdditionsNotSupported"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audit::{AuditResult, run_audit};
use crate::coverage::{TestGroup, scan_coverage};
use crate::error::ConfigError;
use crate::ignore::IgnoreList;
use crate::taxonomy::{ErrorGroup, TaxonomyRegistry, extract_operations};
use crate::tracing_compat::debug;

/// Errors from loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid TOML or does not match the schema.
    #[error("failed to parse TOML manifest: {message}")]
    Toml {
        /// Parser message.
        message: String,
    },

    /// The manifest is not valid JSON or does not match the schema.
    #[error("failed to parse JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported manifest format `{extension}`; expected `.toml` or `.json`")]
    UnsupportedFormat {
        /// The extension found, or an empty string.
        extension: String,
    },

    /// The manifest parsed but describes an invalid audit.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Serialized description of one audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditManifest {
    /// Error groups to audit.
    #[serde(default, rename = "group")]
    pub groups: Vec<ErrorGroup>,
    /// Canonical `group#operation` entries exempted from the audit.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Test groups carrying coverage declarations.
    #[serde(default, rename = "test_group")]
    pub test_groups: Vec<TestGroup>,
}

impl AuditManifest {
    /// Parses a TOML manifest.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(input: &str) -> Result<Self, ManifestError> {
        toml::from_str(input).map_err(|e| ManifestError::Toml {
            message: e.to_string(),
        })
    }

    /// Parses a JSON manifest.
    pub fn from_json_str(input: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Reads a manifest, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parse: fn(&str) -> Result<Self, ManifestError> = match extension.as_str() {
            #[cfg(feature = "config-file")]
            "toml" => Self::from_toml_str,
            "json" => Self::from_json_str,
            _ => return Err(ManifestError::UnsupportedFormat { extension }),
        };

        let input = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = parse(&input)?;
        debug!(
            path = %path.display(),
            groups = manifest.groups.len(),
            test_groups = manifest.test_groups.len(),
            "loaded audit manifest"
        );
        Ok(manifest)
    }

    /// Builds the registry described by the manifest.
    pub fn registry(&self) -> Result<TaxonomyRegistry, ConfigError> {
        TaxonomyRegistry::new(self.groups.iter().cloned())
    }

    /// Builds the ignore list described by the manifest.
    pub fn ignore_list(&self) -> Result<IgnoreList, ConfigError> {
        IgnoreList::from_entries(&self.ignore)
    }

    /// Checks the configuration without computing coverage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let registry = self.registry()?;
        self.ignore_list()?;
        for group in registry.groups() {
            extract_operations(group)?;
        }
        scan_coverage(&self.test_groups)?;
        Ok(())
    }

    /// Runs the audit the manifest describes.
    pub fn run(&self) -> Result<AuditResult, ConfigError> {
        run_audit(&self.registry()?, &self.ignore_list()?, &self.test_groups)
    }
}

/// Loads a manifest from disk and runs its audit.
pub fn audit_file(path: impl AsRef<Path>) -> Result<AuditResult, ManifestError> {
    Ok(AuditManifest::load(path)?.run()?)
}
