//! Font resolution.
//!
//! Text nodes can only be created with a [`LoadedFont`], which is minted by a
//! [`FontRegistry`] once the host's [`FontLoader`] has confirmed the font is
//! available. Resolution is an explicit, fallible step: callers receive
//! `Err(FontError)` as a value and decide whether to abort or skip.

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

use crate::config::FontConfig;

/// Default upper bound on a single font resolution.
pub const DEFAULT_FONT_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "woff", "woff2"];

/// A font family plus style label, e.g. `Inter` / `Bold`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// Capability token proving that a font was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFont {
    name: FontName,
}

impl LoadedFont {
    pub fn name(&self) -> &FontName {
        &self.name
    }
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("Font unavailable: {0}")]
    Unavailable(FontName),

    #[error("Timed out after {timeout:?} loading font {font}")]
    Timeout { font: FontName, timeout: Duration },

    #[error("Failed to scan font directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Host hook that makes a font available for text creation.
pub trait FontLoader: Send + Sync {
    fn load_font<'a>(&'a self, font: &'a FontName) -> BoxFuture<'a, Result<(), FontError>>;
}

/// In-memory set of fonts the host can provide.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    available: HashSet<FontName>,
}

impl FontCatalog {
    pub fn new(fonts: impl IntoIterator<Item = FontName>) -> Self {
        Self {
            available: fonts.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, font: FontName) -> bool {
        self.available.insert(font)
    }

    pub fn contains(&self, font: &FontName) -> bool {
        self.available.contains(font)
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Register every `Family-Style.{ttf,otf,woff,woff2}` file found in `dir`.
    ///
    /// Returns the number of newly registered fonts.
    pub async fn scan_dir(&mut self, dir: &Path) -> Result<usize, FontError> {
        let scan_err = |source| FontError::Scan {
            path: dir.to_path_buf(),
            source,
        };
        let mut entries = tokio::fs::read_dir(dir).await.map_err(scan_err)?;
        let mut added = 0;
        while let Some(entry) = entries.next_entry().await.map_err(scan_err)? {
            if let Some(font) = font_name_from_path(&entry.path()) {
                debug!(font = %font, "registered font file");
                if self.insert(font) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }
}

impl FontCatalog {
    /// Catalog holding the configured fonts plus any found in the font directory.
    pub async fn from_config(config: &FontConfig) -> Result<Self, FontError> {
        let mut catalog = Self::new(config.available.iter().cloned());
        if let Some(dir) = &config.directory {
            let added = catalog.scan_dir(dir).await?;
            debug!(dir = %dir.display(), added, "scanned font directory");
        }
        Ok(catalog)
    }
}

impl FontLoader for FontCatalog {
    fn load_font<'a>(&'a self, font: &'a FontName) -> BoxFuture<'a, Result<(), FontError>> {
        async move {
            tokio::task::yield_now().await;
            if self.contains(font) {
                Ok(())
            } else {
                Err(FontError::Unavailable(font.clone()))
            }
        }
        .boxed()
    }
}

/// Parse `Roboto Mono-Bold.ttf` into `Roboto Mono` / `Bold`.
pub fn font_name_from_path(path: &Path) -> Option<FontName> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !FONT_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (family, style) = stem.rsplit_once('-')?;
    let (family, style) = (family.trim(), style.trim());
    if family.is_empty() || style.is_empty() {
        return None;
    }
    Some(FontName::new(family, style))
}

/// Resolves fonts through a loader, bounded by a timeout, caching successes.
pub struct FontRegistry<'l> {
    loader: &'l dyn FontLoader,
    timeout: Duration,
    loaded: HashMap<FontName, LoadedFont>,
}

impl<'l> FontRegistry<'l> {
    pub fn new(loader: &'l dyn FontLoader, timeout: Duration) -> Self {
        Self {
            loader,
            timeout,
            loaded: HashMap::new(),
        }
    }

    pub async fn resolve(&mut self, font: &FontName) -> Result<LoadedFont, FontError> {
        if let Some(token) = self.loaded.get(font) {
            return Ok(token.clone());
        }

        debug!(font = %font, "resolving font");
        match timeout(self.timeout, self.loader.load_font(font)).await {
            Ok(Ok(())) => {
                let token = LoadedFont { name: font.clone() };
                self.loaded.insert(font.clone(), token.clone());
                Ok(token)
            }
            Ok(Err(err)) => Err(err),
            Err(_) => Err(FontError::Timeout {
                font: font.clone(),
                timeout: self.timeout,
            }),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_token(name: FontName) -> LoadedFont {
    LoadedFont { name }
}
