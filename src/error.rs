// ============================================================================
// Error Types
// ============================================================================
// Every failure inside a fetch-apply cycle ends up here. The cycle logs the
// error and aborts; nothing is retried.
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WallpaperError>;

/// Which of the two wallhaven requests failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Download,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Search => write!(f, "search"),
            Stage::Download => write!(f, "download"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WallpaperError {
    /// Non-200 answer from wallhaven
    #[error("wallhaven {stage} request failed with HTTP {status}")]
    Network { stage: Stage, status: u16 },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("wallhaven returned no wallpapers for this query")]
    NoResults,

    #[error("wallhaven record has no '{0}' field")]
    MissingField(&'static str),

    #[error("no wallhaven image info available (fetch a remote wallpaper first)")]
    MissingMetadata,

    #[error("{}: {reason}", .path.display())]
    Filesystem { path: PathBuf, reason: String },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WallpaperError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        WallpaperError::Filesystem {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WallpaperError::Io {
            path: path.into(),
            source,
        }
    }
}
