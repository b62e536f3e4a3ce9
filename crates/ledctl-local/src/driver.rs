//! The channel-record table and `init`/`render`/`deinit` lifecycle (§4.4).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ledctl_core::{Chipset, ColorOrder, process_pixel};

use crate::backend::{NullTransmitter, PixelTransmitter};
use crate::encoder::FrameEncoder;
use crate::error::DriverError;
use crate::sync::SyncManager;

struct ChannelRecord {
    chipset: Chipset,
    color_order: ColorOrder,
    bytes_per_pixel: u8,
    led_count: u32,
    buffer: Vec<u8>,
    initialized: bool,
    gamma_color: f32,
    gamma_brightness: f32,
    apply_gamma: bool,
}

/// Owns every initialized output channel and, optionally, one sync manager
/// binding a subset of them. A single mutex guards the channel table;
/// pixel processing happens on a caller-local scratch buffer outside the lock.
pub struct LocalDriver {
    channels: Mutex<HashMap<(u32, u8), ChannelRecord>>,
    sync: Mutex<Option<SyncManager>>,
    backend: Arc<dyn PixelTransmitter>,
}

impl Default for LocalDriver {
    fn default() -> Self {
        Self::with_backend(Arc::new(NullTransmitter::new()))
    }
}

impl LocalDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(backend: Arc<dyn PixelTransmitter>) -> Self {
        Self { channels: Mutex::new(HashMap::new()), sync: Mutex::new(None), backend }
    }

    /// Allocates (or reuses) the channel at `(pin, channel)` for `chipset`.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &self,
        pin: u32,
        channel: u8,
        chipset: Chipset,
        color_order: ColorOrder,
        led_count: u32,
        gamma_color: f32,
        gamma_brightness: f32,
        apply_gamma: bool,
    ) -> Result<(), DriverError> {
        let mut channels = self.channels.lock().expect("channel table mutex poisoned");
        let key = (pin, channel);

        if let Some(existing) = channels.get(&key) {
            if existing.initialized {
                return Ok(());
            }
        }

        let bytes_per_pixel = chipset.bytes_per_pixel();
        channels.insert(
            key,
            ChannelRecord {
                chipset,
                color_order,
                bytes_per_pixel,
                led_count,
                buffer: vec![0u8; bytes_per_pixel as usize * led_count as usize],
                initialized: true,
                gamma_color,
                gamma_brightness,
                apply_gamma,
            },
        );
        Ok(())
    }

    /// Writes `length` RGB pixels from `rgb_bytes` into the channel's buffer
    /// starting at `start_pixel`, then dispatches a non-blocking transmit of
    /// the whole buffer (chipsets latch a full frame, never a partial write).
    pub fn render(
        &self,
        pin: u32,
        channel: u8,
        rgb_bytes: &[u8],
        start_pixel: u32,
        length: u32,
    ) -> Result<(), DriverError> {
        let needed = 3 * length as usize;
        if rgb_bytes.len() < needed {
            return Err(DriverError::BufferTooSmall { needed, got: rgb_bytes.len() });
        }

        let (buffer_snapshot, key);
        {
            let mut channels = self.channels.lock().expect("channel table mutex poisoned");
            key = (pin, channel);
            let record = channels
                .get_mut(&key)
                .ok_or(DriverError::NotInitialized { pin, channel })?;

            let led_end = start_pixel + length;
            if led_end > record.led_count {
                let new_len = record.bytes_per_pixel as usize * led_end as usize;
                record.buffer.resize(new_len, 0);
                record.led_count = led_end;
            }

            let bpp = record.bytes_per_pixel as usize;
            let mut scratch = [0u8; 4];
            for i in 0..length as usize {
                let src = [rgb_bytes[i * 3], rgb_bytes[i * 3 + 1], rgb_bytes[i * 3 + 2]];
                process_pixel(
                    src,
                    &mut scratch[..bpp],
                    record.color_order,
                    record.gamma_color,
                    record.gamma_brightness,
                    record.apply_gamma,
                );
                let dst_offset = (start_pixel as usize + i) * bpp;
                record.buffer[dst_offset..dst_offset + bpp].copy_from_slice(&scratch[..bpp]);
            }

            buffer_snapshot = record.buffer.clone();
        }

        self.backend.transmit(key, &buffer_snapshot)
    }

    /// Encodes a channel's latched buffer into its chipset's symbol stream.
    /// Exposed for backends that drive real timed hardware rather than the
    /// default [`NullTransmitter`].
    pub fn encode(&self, pin: u32, channel: u8) -> Result<Vec<crate::encoder::Symbol>, DriverError> {
        let channels = self.channels.lock().expect("channel table mutex poisoned");
        let record = channels
            .get(&(pin, channel))
            .ok_or(DriverError::NotInitialized { pin, channel })?;
        let timing = record.chipset.info().timing;
        Ok(FrameEncoder::new(&record.buffer, timing).drain())
    }

    pub fn deinit(&self, pin: u32, channel: u8) {
        let mut channels = self.channels.lock().expect("channel table mutex poisoned");
        channels.remove(&(pin, channel));
        let mut sync = self.sync.lock().expect("sync manager mutex poisoned");
        if sync.as_ref().is_some_and(|s| s.contains((pin, channel))) {
            *sync = None;
        }
    }

    pub fn deinit_all(&self) {
        self.channels.lock().expect("channel table mutex poisoned").clear();
        *self.sync.lock().expect("sync manager mutex poisoned") = None;
    }

    /// Binds 1-4 initialized channels into a single sync group, replacing any
    /// existing group.
    pub fn bind_sync(&self, keys: Vec<(u32, u8)>) -> Result<(), DriverError> {
        let manager = SyncManager::new(keys)?;
        *self.sync.lock().expect("sync manager mutex poisoned") = Some(manager);
        Ok(())
    }

    pub fn is_initialized(&self, pin: u32, channel: u8) -> bool {
        self.channels
            .lock()
            .expect("channel table mutex poisoned")
            .get(&(pin, channel))
            .map(|r| r.initialized)
            .unwrap_or(false)
    }
}
