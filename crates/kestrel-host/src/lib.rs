//! Kestrel Host Seam
//!
//! Abstractions the embedding runtime implements so the download layer can
//! observe downloads without owning network or UI code:
//! - [`DownloadItem`]: handle for one in-flight download
//! - [`Window`]: progress-indicator state for the owning window
//! - [`DownloadSession`]: scopes downloads, fans events out to listeners
//! - [`Shell`] / [`DownloadStarter`]: OS and runtime integration points

mod error;
mod item;
mod session;
mod shell;
mod window;

pub use error::HostError;
pub use item::{DownloadItem, DownloadSnapshot, DownloadState, FinishState};
pub use session::{DownloadSession, DownloadStarter, ListenerId, NullStarter, SessionListener};
pub use shell::{Shell, SystemShell};
pub use window::Window;

pub type Result<T> = std::result::Result<T, HostError>;
