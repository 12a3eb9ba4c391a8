// ============================================================================
// Wallpaper Applier
// ============================================================================
// swaybg [-o <output>] -i <image> -m fill
// The swaybg the new one replaces is stopped first so cycles don't stack
// background processes: every instance for a global apply, only the one on
// the same output for a scoped apply. Then the command goes through the
// compositor and is launched without waiting.
// ============================================================================

use std::path::Path;

use crate::compositor::{shell_quote, Compositor};
use crate::error::{Result, WallpaperError};
use crate::launcher::CommandLauncher;

pub const BACKGROUND_TOOL: &str = "swaybg";

pub struct Applier<'a> {
    launcher: &'a dyn CommandLauncher,
    compositor: Compositor,
}

impl<'a> Applier<'a> {
    pub fn new(launcher: &'a dyn CommandLauncher, compositor: Compositor) -> Self {
        Applier {
            launcher,
            compositor,
        }
    }

    /// Set `image` as background, on `output` only when given.
    ///
    /// Returns the launched command line. A missing image aborts before
    /// anything is launched.
    pub fn apply(&self, image: &Path, output: Option<&str>) -> Result<String> {
        if !image.is_file() {
            return Err(WallpaperError::filesystem(image, "image not found"));
        }

        let command = format!(
            "{}; {}",
            stop_command(output),
            self.compositor.wrap(&background_command(image, output))
        );
        self.launcher.launch(&command);
        Ok(command)
    }
}

/// Kill the swaybg instances a new `background_command(_, output)` replaces
pub fn stop_command(output: Option<&str>) -> String {
    match output {
        Some(output) => format!(
            "pkill -f {}",
            shell_quote(&format!("^{} -o {} ", BACKGROUND_TOOL, output))
        ),
        None => format!("pkill -x {}", BACKGROUND_TOOL),
    }
}

pub fn background_command(image: &Path, output: Option<&str>) -> String {
    let image = shell_quote(&image.to_string_lossy());
    match output {
        Some(output) => format!(
            "{} -o {} -i {} -m fill",
            BACKGROUND_TOOL,
            shell_quote(output),
            image
        ),
        None => format!("{} -i {} -m fill", BACKGROUND_TOOL, image),
    }
}
