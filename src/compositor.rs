// ============================================================================
// Compositor Adaptation
// ============================================================================
// Commands are handed to the running compositor instead of being spawned by
// us, so the background process belongs to the session and not to this
// program. Detection looks at the IPC variables each compositor exports.
// ============================================================================

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    Sway,
    Hyprland,
    Other,
}

impl Compositor {
    pub fn detect() -> Self {
        Self::detect_with(|key| std::env::var_os(key).is_some())
    }

    pub fn detect_with<F: Fn(&str) -> bool>(is_set: F) -> Self {
        if is_set("SWAYSOCK") {
            Compositor::Sway
        } else if is_set("HYPRLAND_INSTANCE_SIGNATURE") {
            Compositor::Hyprland
        } else {
            Compositor::Other
        }
    }

    /// Rewrite `cmd` so the compositor executes it
    pub fn wrap(&self, cmd: &str) -> String {
        match self {
            Compositor::Sway => format!("swaymsg exec {}", shell_quote(cmd)),
            Compositor::Hyprland => format!("hyprctl dispatch exec {}", shell_quote(cmd)),
            Compositor::Other => cmd.to_string(),
        }
    }
}

impl fmt::Display for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compositor::Sway => write!(f, "sway"),
            Compositor::Hyprland => write!(f, "Hyprland"),
            Compositor::Other => write!(f, "other"),
        }
    }
}

/// Single-quote `s` for `sh`
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
