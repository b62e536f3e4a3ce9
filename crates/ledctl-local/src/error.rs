//! Typed failures for the local pixel driver (§4.4, §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("render buffer too small: need at least {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    #[error("channel (pin {pin}, index {channel}) is not initialized")]
    NotInitialized { pin: u32, channel: u8 },

    #[error("hardware channel allocation refused for pin {pin}: {reason}")]
    ChannelRefused { pin: u32, reason: String },

    #[error("sync manager requires 1-4 channels, got {count}")]
    InvalidSyncGroup { count: usize },
}
