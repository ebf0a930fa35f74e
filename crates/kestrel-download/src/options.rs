//! Download options and user-facing message templates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::observer::DownloadObserver;

/// Templates for the messages surfaced when a download fails. `{filename}`
/// is substituted with the download's original suggested filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    /// Title embedders may use for an error dialog
    pub error_title: String,
    pub error_message: String,
    pub canceled_message: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            error_title: "Download Error".to_string(),
            error_message: "The download of {filename} was interrupted".to_string(),
            canceled_message: "The download of {filename} was canceled".to_string(),
        }
    }
}

impl MessageTemplates {
    pub fn interrupted(&self, filename: &str) -> String {
        render(&self.error_message, filename)
    }

    pub fn canceled(&self, filename: &str) -> String {
        render(&self.canceled_message, filename)
    }
}

fn render(template: &str, filename: &str) -> String {
    template.replace("{filename}", filename)
}

/// Per-registration download behavior.
#[derive(Clone, Default)]
pub struct DownloadOptions {
    /// Directory downloads land in; platform download dir when unset
    pub directory: Option<PathBuf>,
    /// Explicit filename override; joined with the directory verbatim,
    /// skipping extension inference and collision avoidance
    pub filename: Option<String>,
    /// Leave path choice to the host's native save dialog
    pub save_as: bool,
    /// Reveal the file in the OS file manager on completion
    pub open_folder_when_done: bool,
    /// Detach the listener after its first completed download
    pub unregister_when_done: bool,
    pub observer: Option<Arc<dyn DownloadObserver>>,
    pub messages: MessageTemplates,
}

impl fmt::Debug for DownloadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadOptions")
            .field("directory", &self.directory)
            .field("filename", &self.filename)
            .field("save_as", &self.save_as)
            .field("open_folder_when_done", &self.open_folder_when_done)
            .field("unregister_when_done", &self.unregister_when_done)
            .field("observer", &self.observer.is_some())
            .field("messages", &self.messages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messages_interpolate_filename() {
        let messages = MessageTemplates::default();
        assert_eq!(
            messages.interrupted("report.pdf"),
            "The download of report.pdf was interrupted"
        );
        assert_eq!(
            messages.canceled("report.pdf"),
            "The download of report.pdf was canceled"
        );
    }

    #[test]
    fn test_custom_template() {
        let messages = MessageTemplates {
            error_message: "{filename} failed ({filename})".to_string(),
            ..Default::default()
        };
        assert_eq!(messages.interrupted("a.txt"), "a.txt failed (a.txt)");
    }

    #[test]
    fn test_templates_deserialize_with_defaults() {
        let messages: MessageTemplates =
            serde_json::from_str(r#"{"canceled_message": "stopped {filename}"}"#).unwrap();
        assert_eq!(messages.canceled("a.txt"), "stopped a.txt");
        assert_eq!(messages.error_title, "Download Error");
    }
}
