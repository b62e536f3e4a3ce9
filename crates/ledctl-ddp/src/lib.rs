//! ledctl-ddp - the distributed display protocol transmitter and the
//! session manager around remote sinks' live-mode windows.
//!
//! - [`wire`] - header assembly and 1440-byte chunking
//! - [`addr_cache`] - per-host address cache with TTL and failure invalidation
//! - [`stats`] - process-wide tx byte counters
//! - [`transmitter`] - [`transmitter::DdpTransmitter`], the send entry point
//! - [`session`] - [`session::SessionManager`], snapshot-and-restore around remote sinks
//! - [`error`] - typed failures for both halves of this crate

pub mod addr_cache;
pub mod error;
pub mod session;
pub mod stats;
pub mod transmitter;
pub mod wire;

pub use addr_cache::AddressCache;
pub use error::{DdpError, SessionError};
pub use session::SessionManager;
pub use stats::{DdpStats, DdpStatsSnapshot};
pub use transmitter::DdpTransmitter;
pub use wire::{Chunk, MAX_CHUNK_BYTES, SequenceCounter, chunk_frame};
