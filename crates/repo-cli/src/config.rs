//! Manifest loading
//!
//! A manifest lists the working copies a job needs. Format is chosen by
//! file extension:
//! - `.toml` -> TOML
//! - `.json` -> JSON
//! - `.yaml`, `.yml` -> YAML

use std::path::{Path, PathBuf};

use repo_sync::SyncRequest;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Parsed manifest file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub git: GitSettings,

    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

/// `[git]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitSettings {
    /// Git executable; the one on PATH when unset
    pub path: Option<PathBuf>,
}

impl GitSettings {
    /// The configured executable with a relative path resolved against
    /// `base`. A bare name such as `git` is left for the PATH lookup.
    pub fn resolved_path(&self, base: &Path) -> Option<PathBuf> {
        self.path.as_ref().map(|path| {
            if path.is_relative() && path.components().count() > 1 {
                base.join(path)
            } else {
                path.clone()
            }
        })
    }
}

/// One `[[repositories]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryEntry {
    /// Target directory, relative to the manifest's directory unless absolute
    pub location: PathBuf,

    pub url: String,

    #[serde(rename = "ref")]
    pub reference: String,
}

impl Manifest {
    /// Load a manifest from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error(path, "TOML", e)),
            "json" => serde_json::from_str(&content).map_err(|e| parse_error(path, "JSON", e)),
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(path, "YAML", e))
            }
            _ => Err(CliError::UnsupportedFormat { extension }),
        }
    }

    /// Sync requests for every entry, with relative locations resolved
    /// against `base`.
    pub fn requests(&self, base: &Path) -> Vec<SyncRequest> {
        self.repositories
            .iter()
            .map(|entry| {
                SyncRequest::new(
                    base.join(&entry.location),
                    entry.url.clone(),
                    entry.reference.clone(),
                )
            })
            .collect()
    }
}

/// Directory that relative manifest locations resolve against.
pub fn manifest_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn parse_error(path: &Path, format: &str, err: impl std::fmt::Display) -> CliError {
    CliError::Config {
        path: path.to_path_buf(),
        format: format.into(),
        message: err.to_string(),
    }
}
