//! Download error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    /// The host runtime interrupted the download; carries the rendered
    /// user-facing message.
    #[error("{0}")]
    Interrupted(String),

    /// The download was cancelled; carries the rendered user-facing message.
    #[error("{0}")]
    Cancelled(String),

    #[error("Host error: {0}")]
    Host(#[from] kestrel_host::HostError),

    #[error("Download listener dropped before completion")]
    ListenerDropped,
}
