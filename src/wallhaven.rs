// ============================================================================
// Wallhaven API Integration
// ============================================================================
// Base URL: https://wallhaven.cc/api/v1
// API Key: optional, only needed for NSFW / account-filtered results
// One cycle = one search request (sorting=random) + one image download.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{Result, Stage, WallpaperError};
use crate::http::HttpClient;

pub const SEARCH_URL: &str = "https://wallhaven.cc/api/v1/search";
pub const SORTING: &str = "random";

// ============================================================================
// API Response Structures
// ============================================================================
// Records are kept as raw JSON maps: the whole record is shown by the info
// view, so nothing is dropped by a typed model.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<Map<String, Value>>,
}

/// Full wallhaven record of the most recently fetched image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetadata(Map<String, Value>);

impl ImageMetadata {
    pub fn new(record: Map<String, Value>) -> Self {
        ImageMetadata(record)
    }

    /// Wallhaven ids are strings ("94x38z"), but accept numbers too
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Direct download URL of the full image
    pub fn path(&self) -> Option<&str> {
        self.0.get("path").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Result of a successful remote fetch
#[derive(Debug)]
pub struct Download {
    pub path: PathBuf,
    pub metadata: ImageMetadata,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build the search URL from the configured tags, ratios and resolution
pub fn build_search_url(config: &Config) -> String {
    let mut url = format!(
        "{}?q={}&ratios={}&atleast={}&sorting={}",
        SEARCH_URL,
        urlencoding::encode(&config.query()),
        urlencoding::encode(config.ratios()),
        urlencoding::encode(config.atleast()),
        SORTING
    );
    if let Some(key) = config.api_key() {
        url.push_str("&apikey=");
        url.push_str(&urlencoding::encode(key));
    }
    url
}

/// Search wallhaven, download the first hit and write it to `dest`.
///
/// `dest` is only touched once both requests answered 200. The bytes go to a
/// sibling `.part` file first and are renamed over `dest`, so a failed write
/// never leaves a truncated wallpaper behind.
pub fn fetch(client: &dyn HttpClient, config: &Config, dest: &Path) -> Result<Download> {
    log::info!(
        "Fetching random image from wallhaven.cc, tags: '{}', ratios: '{}', atleast: '{}', API key: {}",
        config.query(),
        config.ratios(),
        config.atleast(),
        if config.api_key().is_some() { "set" } else { "unset" }
    );

    let search = client.get(&build_search_url(config))?;
    if !search.is_ok() {
        return Err(WallpaperError::Network {
            stage: Stage::Search,
            status: search.status,
        });
    }

    let response: SearchResponse = serde_json::from_slice(&search.body)?;
    let record = response
        .data
        .into_iter()
        .next()
        .ok_or(WallpaperError::NoResults)?;
    let metadata = ImageMetadata::new(record);
    let image_url = metadata
        .path()
        .ok_or(WallpaperError::MissingField("path"))?
        .to_string();

    log::debug!("Downloading {}", image_url);
    let image = client.get(&image_url)?;
    if !image.is_ok() {
        return Err(WallpaperError::Network {
            stage: Stage::Download,
            status: image.status,
        });
    }

    write_atomically(dest, &image.body)?;
    log::info!("Wallhaven image saved as {}", dest.display());

    Ok(Download {
        path: dest.to_path_buf(),
        metadata,
    })
}

fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| WallpaperError::io(parent, e))?;
    }
    let mut part = dest.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    fs::write(&part, bytes).map_err(|e| WallpaperError::io(&part, e))?;
    fs::rename(&part, dest).map_err(|e| {
        let _ = fs::remove_file(&part);
        WallpaperError::io(dest, e)
    })
}
