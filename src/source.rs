// ============================================================================
// Image Sources
// ============================================================================

use std::path::{Path, PathBuf};

use crate::config::{Config, SourceKind};
use crate::error::Result;
use crate::http::HttpClient;
use crate::local;
use crate::wallhaven::{self, ImageMetadata};

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// wallhaven.cc search, saved over the wallpaper file
    Remote,
    /// random entry of a local directory, used in place
    Local(PathBuf),
}

/// The image to apply, plus its wallhaven record when there is one
#[derive(Debug)]
pub struct Fetched {
    pub path: PathBuf,
    pub metadata: Option<ImageMetadata>,
}

impl Source {
    pub fn from_config(config: &Config) -> Self {
        match config.source {
            SourceKind::Remote => Source::Remote,
            SourceKind::Local => Source::Local(config.local_path.clone()),
        }
    }

    pub fn fetch(
        &self,
        client: &dyn HttpClient,
        config: &Config,
        wallpaper_file: &Path,
    ) -> Result<Fetched> {
        match self {
            Source::Remote => {
                let download = wallhaven::fetch(client, config, wallpaper_file)?;
                Ok(Fetched {
                    path: download.path,
                    metadata: Some(download.metadata),
                })
            }
            Source::Local(dir) => {
                let path = local::pick(dir)?;
                log::info!("Picked local wallpaper {}", path.display());
                Ok(Fetched {
                    path,
                    metadata: None,
                })
            }
        }
    }
}
