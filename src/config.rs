// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Match configuration.
//!
//! Three layers, later ones win: built-in defaults, an optional JSON file, and
//! `VERBATIM_*` environment variables. The CLI applies its own flags on top.
//!
//! ```json
//! {
//!   "mode": "contiguous",
//!   "normalize": { "case_sensitive": false, "fold_diacritics": false }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::tokenize::NormalizeOptions;
use crate::types::MatchMode;

/// Environment variable selecting the match mode.
pub const ENV_MODE: &str = "VERBATIM_MODE";
/// Environment variable toggling case-sensitive comparison.
pub const ENV_CASE_SENSITIVE: &str = "VERBATIM_CASE_SENSITIVE";
/// Environment variable toggling diacritic folding.
pub const ENV_FOLD_DIACRITICS: &str = "VERBATIM_FOLD_DIACRITICS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub mode: MatchMode,
    pub normalize: NormalizeOptions,
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// Config file is not valid JSON for `MatchConfig`.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Environment variable holds a value we cannot interpret.
    InvalidEnv { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {}", path.display(), source)
            }
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "invalid value '{}' for {}", value, var)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::InvalidEnv { .. } => None,
        }
    }
}

impl MatchConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `VERBATIM_*` overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_vars(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment, in practice).
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MODE) {
            self.mode = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MODE,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_CASE_SENSITIVE) {
            self.normalize.case_sensitive = parse_flag(ENV_CASE_SENSITIVE, &value)?;
        }
        if let Some(value) = lookup(ENV_FOLD_DIACRITICS) {
            self.normalize.fold_diacritics = parse_flag(ENV_FOLD_DIACRITICS, &value)?;
        }
        Ok(self)
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}
