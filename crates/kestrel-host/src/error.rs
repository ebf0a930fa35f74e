//! Host seam error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Download start rejected: {0}")]
    StartRejected(String),

    #[error("Host runtime does not support starting downloads")]
    StartUnsupported,
}
