// ============================================================================
// Filesystem Layout
// ============================================================================
// config:    $XDG_CONFIG_HOME/random-wallpaper/config.json
// wallpaper: $XDG_DATA_HOME/random-wallpaper/wallpaper.jpg
// log:       $XDG_DATA_HOME/random-wallpaper/random-wallpaper.log
// ============================================================================

use std::path::PathBuf;

pub const APP_DIR: &str = "random-wallpaper";
pub const WALLPAPER_FILE: &str = "wallpaper.jpg";
pub const LOG_FILE: &str = "random-wallpaper.log";

pub fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join("config.json"))
}

/// Per-user data directory holding the wallpaper file and the log
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_DIR))
}

pub fn wallpaper_file() -> Option<PathBuf> {
    data_dir().map(|p| p.join(WALLPAPER_FILE))
}

pub fn log_file() -> Option<PathBuf> {
    data_dir().map(|p| p.join(LOG_FILE))
}

/// Fallback destination for saved wallpapers
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}
