// ============================================================================
// Configuration
// ============================================================================
// Stored as JSON with kebab-case keys. Every option has a default, so a
// partial file (or no file at all) always resolves to a complete Config.
// Values are not validated: a bad `atleast` string goes to wallhaven as-is.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WallpaperError};

// Request-time fallbacks for empty strings in the config
const FALLBACK_QUERY: &str = "landscape";
const FALLBACK_RATIOS: &str = "16x9,16x10";
const FALLBACK_ATLEAST: &str = "1920x1080";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Remote,
    Local,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" | "wallhaven" => Ok(SourceKind::Remote),
            "local" => Ok(SourceKind::Local),
            other => Err(format!("unknown source '{}', use remote or local", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub tags: Vec<String>,
    pub output: Vec<String>,
    pub ratios: String,
    pub atleast: String,
    pub apikey: String,
    pub refresh_on_startup: bool,
    pub save_path: String,
    pub source: SourceKind,
    pub local_path: PathBuf,
    pub interval: i64, // minutes, 0 or less disables the timer
    pub icon: String,
    pub icon_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tags: vec!["landscape".to_string()],
            output: Vec::new(),
            ratios: "16x9,16x10".to_string(),
            atleast: "2560x1440".to_string(),
            apikey: String::new(),
            refresh_on_startup: true,
            save_path: String::new(),
            source: SourceKind::Remote,
            local_path: PathBuf::from("/usr/share/backgrounds/nwg-shell"),
            interval: 1,
            icon: "preferences-desktop-wallpaper".to_string(),
            icon_size: 16,
        }
    }
}

impl Config {
    /// Fill every key missing from `partial` with its default.
    pub fn resolve(partial: serde_json::Value) -> Result<Config> {
        if partial.is_null() {
            return Ok(Config::default());
        }
        Ok(serde_json::from_value(partial)?)
    }

    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|e| WallpaperError::io(path, e))?;
        let partial: serde_json::Value = serde_json::from_str(&content)?;
        Config::resolve(partial)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| WallpaperError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| WallpaperError::io(path, e))?;
        Ok(())
    }

    pub fn output_target(&self) -> Option<&str> {
        self.output
            .iter()
            .map(|o| o.trim())
            .find(|o| !o.is_empty())
    }

    pub fn api_key(&self) -> Option<&str> {
        if self.apikey.is_empty() {
            None
        } else {
            Some(&self.apikey)
        }
    }

    pub fn query(&self) -> String {
        if self.tags.is_empty() {
            FALLBACK_QUERY.to_string()
        } else {
            self.tags.join(" ")
        }
    }

    pub fn ratios(&self) -> &str {
        if self.ratios.is_empty() {
            FALLBACK_RATIOS
        } else {
            &self.ratios
        }
    }

    pub fn atleast(&self) -> &str {
        if self.atleast.is_empty() {
            FALLBACK_ATLEAST
        } else {
            &self.atleast
        }
    }

    /// Timer interval in minutes, negative values count as 0
    pub fn interval_minutes(&self) -> u64 {
        u64::try_from(self.interval).unwrap_or(0)
    }

    /// Configured save directory, if any
    pub fn save_dir(&self) -> Option<PathBuf> {
        if self.save_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.save_path))
        }
    }
}
