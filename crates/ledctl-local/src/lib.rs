//! ledctl-local - the timed-pulse local pixel driver: per-chipset bit
//! encoding, per-output channel lifecycle and an optional multi-output
//! sync manager.
//!
//! - [`encoder`] - the resumable bit/reset-pulse state machine (§4.4, §6.2)
//! - [`backend`] - the hardware transmit boundary ([`backend::NullTransmitter`] by default)
//! - [`sync`] - the 1-4 channel sync group
//! - [`driver`] - [`driver::LocalDriver`], the channel-record table and lifecycle
//! - [`error`] - typed failures

pub mod backend;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod sync;

pub use backend::{NullTransmitter, PixelTransmitter};
pub use driver::LocalDriver;
pub use encoder::{FrameEncoder, Symbol};
pub use error::DriverError;
pub use sync::SyncManager;
