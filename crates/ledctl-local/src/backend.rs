//! The hardware transmit boundary. A real build swaps in a platform-specific
//! RMT/SPI backend; tests and this repo's default build use [`NullTransmitter`],
//! which records the last latched buffer per channel instead of driving pins.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::DriverError;

/// Dispatches a fully-encoded channel buffer to hardware. Implementations
/// must be non-blocking: queue the buffer and return, the same contract the
/// chipset's own transmit queue gives the caller.
pub trait PixelTransmitter: Send + Sync {
    fn transmit(&self, key: (u32, u8), buffer: &[u8]) -> Result<(), DriverError>;
}

/// Records the last buffer "latched" per channel. Used as the default
/// backend and by tests asserting what a channel would have sent.
#[derive(Default)]
pub struct NullTransmitter {
    latched: Mutex<HashMap<(u32, u8), Vec<u8>>>,
}

impl NullTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_buffer(&self, key: (u32, u8)) -> Option<Vec<u8>> {
        self.latched.lock().expect("latched buffer mutex poisoned").get(&key).cloned()
    }
}

impl PixelTransmitter for NullTransmitter {
    fn transmit(&self, key: (u32, u8), buffer: &[u8]) -> Result<(), DriverError> {
        self.latched
            .lock()
            .expect("latched buffer mutex poisoned")
            .insert(key, buffer.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_transmitter_latches_the_full_buffer() {
        let backend = NullTransmitter::new();
        backend.transmit((2, 0), &[1, 2, 3]).unwrap();
        assert_eq!(backend.last_buffer((2, 0)), Some(vec![1, 2, 3]));
        assert_eq!(backend.last_buffer((3, 0)), None);
    }
}
