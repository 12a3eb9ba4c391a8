// ============================================================================
// Command Launcher
// ============================================================================
// Fire-and-forget: the child is spawned through `sh -c` and never waited on.
// Its exit status is not observed; only a failure to spawn is logged.
// ============================================================================

use std::process::{Command, Stdio};

pub trait CommandLauncher {
    fn launch(&self, command: &str);
}

pub struct ShellLauncher;

impl CommandLauncher for ShellLauncher {
    fn launch(&self, command: &str) {
        log::info!("Executing: {}", command);
        let spawned = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            // reap in the background so long runs don't pile up zombies
            Ok(mut child) => {
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => log::error!("Failed to launch '{}': {}", command, e),
        }
    }
}
