use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::collector::{CollectOptions, DEFAULT_SAMPLE_FALLBACK, DEFAULT_SAMPLE_LENGTH};
use crate::fonts::{FontName, DEFAULT_FONT_LOAD_TIMEOUT};
use crate::Viewport;

/// Family used for titles, labels and detail lines.
pub const DEFAULT_LABEL_FAMILY: &str = "Inter";
pub const DEFAULT_PAGE_NAME: &str = "Auto Design System";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: Viewport,
    pub fonts: FontConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Fonts the host can provide without scanning a directory.
    pub available: Vec<FontName>,
    /// Optional directory of `Family-Style.ttf` files to register.
    pub directory: Option<PathBuf>,
    #[serde(with = "humantime_serde")]
    pub load_timeout: Duration,
}

impl Default for FontConfig {
    fn default() -> Self {
        let families: [(&str, &[&str]); 2] = [
            (DEFAULT_LABEL_FAMILY, &["Regular", "Medium", "SemiBold", "Bold"]),
            ("Roboto", &["Regular", "Medium", "Bold"]),
        ];
        Self {
            available: families
                .iter()
                .flat_map(|(family, styles)| {
                    styles.iter().map(move |style| FontName::new(*family, *style))
                })
                .collect(),
            directory: None,
            load_timeout: DEFAULT_FONT_LOAD_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub page_name: String,
    pub label_family: String,
    pub sample_length: usize,
    pub sample_fallback: String,
    /// Sample size for styles whose font size is mixed.
    pub mixed_size_fallback: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_name: DEFAULT_PAGE_NAME.to_string(),
            label_family: DEFAULT_LABEL_FAMILY.to_string(),
            sample_length: DEFAULT_SAMPLE_LENGTH,
            sample_fallback: DEFAULT_SAMPLE_FALLBACK.to_string(),
            mixed_size_fallback: 16.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            fonts: FontConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// `~/.config/dsg/config.toml`, if a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("dsg").join("config.toml"))
    }

    /// Priority: explicit path > central config (if present) > defaults.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigLoadError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::central_config_path().filter(|p| p.is_file()) {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };
        let content = std::fs::read_to_string(&path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err("viewport dimensions must be positive".to_string());
        }
        if self.report.label_family.trim().is_empty() {
            return Err("report.label_family must not be empty".to_string());
        }
        if self.report.sample_length == 0 {
            return Err("report.sample_length must be at least 1".to_string());
        }
        if self.report.mixed_size_fallback.is_nan() || self.report.mixed_size_fallback <= 0.0 {
            return Err("report.mixed_size_fallback must be positive".to_string());
        }
        if self.fonts.load_timeout.is_zero() {
            return Err("fonts.load_timeout must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            sample_length: self.report.sample_length,
            sample_fallback: self.report.sample_fallback.clone(),
        }
    }
}
