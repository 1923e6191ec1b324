// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! User configuration loaded from a TOML file.
//!
//! Lookup order: `$SAGGER_CONFIG`, then `sagger.toml` in the working
//! directory, then built-in defaults. A file that exists but cannot be
//! read or parsed is reported and replaced by the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::curve::CurveStyle;
use crate::layout::RotationMode;
use crate::settings;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SAGGER_CONFIG";

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "sagger.toml";

/// Errors produced while loading the config file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaggerConfig {
    /// Initial sag weight, clamped to the supported range on load
    pub weight: f64,
    pub style: CurveStyle,
    /// `analytic` or `central_difference`
    pub rotation: RotationMode,
    pub font_size: f64,
    pub blink_interval_ms: u64,
    /// Space reserved below the deepest sag
    pub bottom_padding: f64,
    /// Lines recomputed eagerly after a change; the rest fill in lazily
    pub eager_line_budget: usize,
}

impl Default for SaggerConfig {
    fn default() -> Self {
        Self {
            weight: settings::weight::DEFAULT,
            style: CurveStyle::default(),
            rotation: RotationMode::default(),
            font_size: settings::layout::FONT_SIZE,
            blink_interval_ms: settings::caret::BLINK_MS,
            bottom_padding: settings::layout::BOTTOM_PADDING,
            eager_line_budget: settings::performance::EAGER_LINE_BUDGET,
        }
    }
}

impl SaggerConfig {
    /// Parse a config from TOML text and sanitize it.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: SaggerConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Read and parse the config file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load the config from the first location that exists, falling back
    /// to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = Self::locate() else {
            tracing::debug!("No config file found, using defaults");
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Clamp every field into a range the editor can work with.
    pub fn sanitized(mut self) -> Self {
        self.weight = settings::weight::sanitize(self.weight);
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            self.font_size = settings::layout::FONT_SIZE;
        }
        if !(self.bottom_padding.is_finite() && self.bottom_padding >= 0.0) {
            self.bottom_padding = settings::layout::BOTTOM_PADDING;
        }
        self
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }
}
