// ============================================================================
// Save Current Wallpaper
// ============================================================================
// Copies the wallpaper file to <dir>/wallhaven-<id>.jpg and pops a desktop
// notification. Only meaningful after a remote fetch: the file name comes
// from the wallhaven record.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use crate::compositor::shell_quote;
use crate::error::{Result, WallpaperError};
use crate::launcher::CommandLauncher;
use crate::wallhaven::ImageMetadata;

pub const NOTIFY_ICON: &str = "preferences-desktop-wallpaper";

pub fn file_name(metadata: &ImageMetadata) -> Result<String> {
    let id = metadata.id().ok_or(WallpaperError::MissingField("id"))?;
    Ok(format!("wallhaven-{}.jpg", id))
}

pub fn save_current(
    wallpaper_file: &Path,
    metadata: Option<&ImageMetadata>,
    dest_dir: &Path,
    launcher: &dyn CommandLauncher,
) -> Result<PathBuf> {
    let metadata = metadata.ok_or(WallpaperError::MissingMetadata)?;
    let name = file_name(metadata)?;
    let dest = dest_dir.join(&name);

    fs::copy(wallpaper_file, &dest).map_err(|e| WallpaperError::io(&dest, e))?;
    log::info!("Saved {} to {}", name, dest_dir.display());

    launcher.launch(&format!(
        "notify-send {} {} -i {}",
        shell_quote(&name),
        shell_quote(&format!("Saved to {}", dest_dir.display())),
        NOTIFY_ICON
    ));
    Ok(dest)
}
