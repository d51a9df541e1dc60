//! Configuration management
//!
//! Settings live in `<data dir>/settings.json`:
//! ```json
//! {
//!   "app": {
//!     "demoMode": false,
//!     "catalogUrl": "https://...",
//!     "pageSize": 6,
//!     "colorMode": "auto"
//!   }
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::fakestore::{CATALOG_URL_ENV, FAKESTORE_PRODUCTS_URL};
use crate::services::DEFAULT_PAGE_SIZE;

/// Environment variable forcing demo mode on or off
pub const DEMO_MODE_ENV: &str = "CLIPKART_DEMO_MODE";

const SETTINGS_FILE: &str = "settings.json";

/// Terminal colour preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Follow the terminal (`NO_COLOR`, `CLICOLOR`, tty detection)
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn is_auto(&self) -> bool {
        *self == ColorMode::Auto
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    catalog_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "ColorMode::is_auto")]
    color_mode: ColorMode,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Effective configuration after env overrides
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub catalog_url: String,
    pub page_size: usize,
    pub color_mode: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            catalog_url: FAKESTORE_PRODUCTS_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            color_mode: ColorMode::Auto,
        }
    }
}

fn parse_bool_env(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true" | "1" | "yes" | "TRUE" | "YES") => Some(true),
        Some("false" | "0" | "no" | "FALSE" | "NO") => Some(false),
        _ => None,
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    // A corrupt file falls back to defaults rather than blocking startup
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

impl Config {
    /// Load config from the data directory
    ///
    /// `CLIPKART_DEMO_MODE` and `CLIPKART_CATALOG_URL` override the file.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let demo_mode = parse_bool_env(std::env::var(DEMO_MODE_ENV).ok().as_deref())
            .unwrap_or(raw.app.demo_mode);

        let catalog_url = std::env::var(CATALOG_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .or(raw.app.catalog_url)
            .unwrap_or_else(|| FAKESTORE_PRODUCTS_URL.to_string());

        let page_size = raw.app.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        Ok(Self {
            demo_mode,
            catalog_url,
            page_size,
            color_mode: raw.app.color_mode,
        })
    }

    /// Persist demo mode and colour mode, leaving every other key as found on disk
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let mut settings = read_settings(data_dir)?;
        settings.app.demo_mode = self.demo_mode;
        settings.app.color_mode = self.color_mode;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}
