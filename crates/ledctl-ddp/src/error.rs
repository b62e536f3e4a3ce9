//! Error types for DDP transmission and sink session management.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DdpError {
    #[error("failed to resolve address for '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("send to {addr} failed: {source}")]
    Send {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("snapshot request to '{sink}' failed: {source}")]
    SnapshotRequest {
        sink: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("live-mode activation POST to '{sink}' failed: {source}")]
    ActivatePost {
        sink: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("restore POST to '{sink}' failed: {source}")]
    RestorePost {
        sink: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("snapshot body from '{sink}' was not valid JSON: {source}")]
    InvalidSnapshot {
        sink: String,
        #[source]
        source: serde_json::Error,
    },
}
