//! Kestrel Download Layer
//!
//! Native download handling for the Kestrel shell:
//! - assigns collision-free save paths, inferring an extension from the
//!   MIME type when the suggested filename has none
//! - mirrors progress onto the owning window and registered observers
//! - reports every download as a tagged [`DownloadResult`]
//! - [`download`] drives a single programmatic download to completion
//!
//! The host runtime feeds events in through the `kestrel-host` seam; this
//! crate never performs network I/O itself.

mod download;
mod error;
mod listener;
mod manager;
mod observer;
mod options;
mod resolve;

pub use download::{download, DownloadResult};
pub use error::DownloadError;
pub use listener::{DoneCallback, DownloadListener};
pub use manager::DownloadManager;
pub use observer::DownloadObserver;
pub use options::{DownloadOptions, MessageTemplates};
pub use resolve::{
    default_download_dir, resolve_save_path, sanitize_file_name, unused_path,
    with_inferred_extension,
};

// Re-export the host seam so embedders depend on one crate
pub use kestrel_host::{
    DownloadItem, DownloadSession, DownloadSnapshot, DownloadStarter, DownloadState, FinishState,
    HostError, ListenerId, NullStarter, SessionListener, Shell, SystemShell, Window,
};

pub type Result<T> = std::result::Result<T, DownloadError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
