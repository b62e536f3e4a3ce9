//! Typed failures for PCM socket ingest (§7: transient I/O retries, never fatal).

/// Errors surfaced by [`crate::source::PcmSocketSource`] and the driver loop.
///
/// All variants are transient from the caller's perspective: the driver loop
/// logs and retries rather than propagating these out of the task.
#[derive(Debug, thiserror::Error)]
pub enum AudioIoError {
    #[error("connecting to PCM source {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("reading PCM chunk from socket failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("PCM source closed the connection")]
    Closed,
}

pub type AudioIoResult<T> = Result<T, AudioIoError>;
