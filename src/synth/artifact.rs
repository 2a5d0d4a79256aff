//! Debug artifacts for synthesized types.
//!
//! Every synthesized type definition is written as pretty JSON to
//! `<directory>/<generatedTypeName>` for offline inspection. The write is
//! not on the correctness path: failures are logged and swallowed unless
//! `fail_on_error` is set.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ArtifactSettings;
use crate::error::{ReportError, ReportResult};

/// Writes type definitions to disk.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: Option<PathBuf>,
    fail_on_error: bool,
}

impl ArtifactStore {
    /// Build a store from settings. A disabled store writes nothing.
    pub fn from_settings(settings: &ArtifactSettings) -> ReportResult<Self> {
        let directory = if settings.enabled {
            Some(settings.resolved_directory()?)
        } else {
            None
        };
        Ok(Self {
            directory,
            fail_on_error: settings.fail_on_error,
        })
    }

    /// A store that writes into `directory`.
    pub fn at(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            fail_on_error: false,
        }
    }

    pub fn disabled() -> Self {
        Self {
            directory: None,
            fail_on_error: false,
        }
    }

    pub fn fail_on_error(mut self, fail: bool) -> Self {
        self.fail_on_error = fail;
        self
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Path an artifact for `type_name` is written to.
    pub fn path_for(&self, type_name: &str) -> Option<PathBuf> {
        self.directory.as_ref().map(|dir| dir.join(type_name))
    }

    /// Persist one type definition.
    pub fn persist<T: Serialize>(&self, type_name: &str, definition: &T) -> ReportResult<()> {
        let Some(path) = self.path_for(type_name) else {
            return Ok(());
        };

        match write_json(&path, definition) {
            Ok(()) => {
                tracing::debug!(type_name, path = %path.display(), "wrote type artifact");
                Ok(())
            }
            Err(err) if self.fail_on_error => Err(err),
            Err(err) => {
                tracing::warn!(type_name, path = %path.display(), error = %err, "failed to write type artifact");
                Ok(())
            }
        }
    }
}

fn write_json<T: Serialize>(path: &Path, definition: &T) -> ReportResult<()> {
    let json = serde_json::to_vec_pretty(definition)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ReportError::Artifact)?;
    }
    fs::write(path, json).map_err(ReportError::Artifact)
}
