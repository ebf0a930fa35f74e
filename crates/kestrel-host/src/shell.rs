//! OS shell integration

use std::path::Path;

/// OS-level surfaces the download layer touches on completion.
pub trait Shell: Send + Sync {
    /// Reveal the file in the OS file manager.
    fn reveal_in_folder(&self, path: &Path);

    /// Notify the host's dock/taskbar that a download landed at `path`.
    /// Only hosts with a dock surface override this.
    fn download_finished(&self, _path: &Path) {}
}

/// Shell implementation that shells out to the platform file manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn reveal_in_folder(&self, path: &Path) {
        #[cfg(target_os = "macos")]
        {
            if let Err(e) = std::process::Command::new("open").arg("-R").arg(path).spawn() {
                tracing::error!(path = %path.display(), "Failed to open Finder: {}", e);
            }
        }
        #[cfg(target_os = "windows")]
        {
            if let Some(parent) = path.parent() {
                if let Err(e) = std::process::Command::new("explorer").arg(parent).spawn() {
                    tracing::error!(path = %path.display(), "Failed to open Explorer: {}", e);
                }
            }
        }
        #[cfg(target_os = "linux")]
        {
            if let Some(parent) = path.parent() {
                if let Err(e) = std::process::Command::new("xdg-open").arg(parent).spawn() {
                    tracing::error!(path = %path.display(), "Failed to open file manager: {}", e);
                }
            }
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            tracing::debug!(path = %path.display(), "No file manager on this platform");
        }
    }
}
