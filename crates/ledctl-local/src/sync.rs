//! Multi-output synchronizer: binds 1-4 channels so their transmits latch together.

use crate::error::DriverError;

/// Binds a small group of channels for bit-exact simultaneous transmit.
/// A driver holds at most one sync manager at a time; re-initializing
/// replaces it.
#[derive(Debug, Clone)]
pub struct SyncManager {
    channels: Vec<(u32, u8)>,
}

impl SyncManager {
    pub fn new(channels: Vec<(u32, u8)>) -> Result<Self, DriverError> {
        if channels.is_empty() || channels.len() > 4 {
            return Err(DriverError::InvalidSyncGroup { count: channels.len() });
        }
        Ok(Self { channels })
    }

    pub fn channels(&self) -> &[(u32, u8)] {
        &self.channels
    }

    pub fn contains(&self, key: (u32, u8)) -> bool {
        self.channels.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_or_oversized_groups() {
        assert!(SyncManager::new(vec![]).is_err());
        assert!(SyncManager::new(vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]).is_err());
        assert!(SyncManager::new(vec![(1, 0), (2, 0)]).is_ok());
    }
}
