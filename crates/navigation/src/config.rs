//! Per-deployment navigation configuration.
//!
//! Each tenant deployment differs only in its landing priority list, its
//! special (deep-link only) pages and its fallback page. One
//! [`DeploymentConfig`] value carries those three knobs; the resolver and the
//! guard take it as input instead of hard-coding them.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dashgate_core::{DomainError, PageId};

use crate::presets;

/// Environment variable naming a JSON deployment file.
pub const DEPLOYMENT_FILE_ENV: &str = "DASHGATE_DEPLOYMENT_FILE";

/// Environment variable naming a built-in preset (`standard`, `vital`, `core`).
pub const DEPLOYMENT_PRESET_ENV: &str = "DASHGATE_DEPLOYMENT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read deployment file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed deployment file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown deployment preset '{0}'")]
    UnknownPreset(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Navigation knobs for one deployment.
///
/// # Invariants
/// - `name` is non-empty.
/// - `priority` contains no duplicates (its order is the landing tie-break).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentConfig {
    name: String,
    priority: Vec<PageId>,
    special_pages: BTreeSet<PageId>,
    fallback: PageId,
}

/// On-disk shape of a deployment file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeploymentFile {
    name: String,
    priority: Vec<PageId>,
    #[serde(default)]
    special_pages: Vec<PageId>,
    #[serde(default)]
    fallback: Option<PageId>,
}

impl DeploymentConfig {
    pub fn builder(name: impl Into<String>) -> DeploymentConfigBuilder {
        DeploymentConfigBuilder {
            name: name.into(),
            priority: Vec::new(),
            special_pages: BTreeSet::new(),
            fallback: None,
        }
    }

    /// Construct without validation; only for the literal lists in [`presets`].
    pub(crate) fn from_trusted_parts(
        name: &str,
        priority: Vec<PageId>,
        special_pages: BTreeSet<PageId>,
        fallback: PageId,
    ) -> Self {
        Self {
            name: name.to_string(),
            priority,
            special_pages,
            fallback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Landing pages in preference order.
    pub fn priority(&self) -> &[PageId] {
        &self.priority
    }

    pub fn special_pages(&self) -> &BTreeSet<PageId> {
        &self.special_pages
    }

    pub fn is_special(&self, page: &str) -> bool {
        self.special_pages.contains(page)
    }

    /// Default page when nothing is enabled; also the safe view shown while a
    /// redirect is pending.
    pub fn fallback(&self) -> &PageId {
        &self.fallback
    }

    /// Look up a built-in preset by name.
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            presets::STANDARD => Ok(presets::standard()),
            presets::VITAL => Ok(presets::vital()),
            presets::CORE => Ok(presets::core()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let file: DeploymentFile = serde_json::from_str(raw)?;
        let mut builder = Self::builder(file.name)
            .priority(file.priority)
            .special(file.special_pages);
        if let Some(fallback) = file.fallback {
            builder = builder.fallback(fallback);
        }
        builder.build()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Load the deployment from the process environment.
    ///
    /// `DASHGATE_DEPLOYMENT_FILE` wins over `DASHGATE_DEPLOYMENT`; with neither
    /// set the `standard` preset is used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`DeploymentConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DEPLOYMENT_FILE_ENV).filter(|p| !p.is_empty()) {
            let config = Self::from_path(&path)?;
            tracing::info!(deployment = %config.name, path = %path, "loaded deployment file");
            return Ok(config);
        }

        match lookup(DEPLOYMENT_PRESET_ENV).filter(|p| !p.is_empty()) {
            Some(preset) => Self::preset(&preset),
            None => {
                tracing::warn!(
                    "{DEPLOYMENT_PRESET_ENV} not set; using '{}' deployment",
                    presets::STANDARD
                );
                Ok(presets::standard())
            }
        }
    }
}

pub struct DeploymentConfigBuilder {
    name: String,
    priority: Vec<PageId>,
    special_pages: BTreeSet<PageId>,
    fallback: Option<PageId>,
}

impl DeploymentConfigBuilder {
    /// Append pages to the priority list, in order.
    pub fn priority(mut self, pages: impl IntoIterator<Item = PageId>) -> Self {
        self.priority.extend(pages);
        self
    }

    pub fn special(mut self, pages: impl IntoIterator<Item = PageId>) -> Self {
        self.special_pages.extend(pages);
        self
    }

    /// Defaults to [`presets::DASHBOARD`].
    pub fn fallback(mut self, page: PageId) -> Self {
        self.fallback = Some(page);
        self
    }

    pub fn build(self) -> Result<DeploymentConfig, ConfigError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("deployment name must not be empty").into());
        }

        let mut seen: HashSet<&PageId> = HashSet::with_capacity(self.priority.len());
        if let Some(dup) = self.priority.iter().find(|p| !seen.insert(*p)) {
            return Err(DomainError::validation(format!(
                "duplicate page '{dup}' in priority list of deployment '{}'",
                self.name
            ))
            .into());
        }

        Ok(DeploymentConfig {
            name: self.name,
            priority: self.priority,
            special_pages: self.special_pages,
            fallback: self.fallback.unwrap_or(presets::DASHBOARD),
        })
    }
}
