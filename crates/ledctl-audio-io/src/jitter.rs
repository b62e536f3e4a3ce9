//! Bounded jitter buffer with a PLL-style drift nudger (§4.6).
//!
//! Holds interleaved `i16` PCM frames (1 or 2 channels) for up to one second.
//! Callers push raw socket chunks in and drain fixed-size analysis windows
//! out; [`JitterBuffer::on_samples_received`] performs both the periodic
//! drift nudge and the coarser overfill/underfill convergence described in
//! §4.6, keeping buffered duration within `[min_ms, max_ms]` in steady state.

use std::collections::VecDeque;

/// One drained analysis window, already converted to mono float samples with
/// per-channel RMS energy accumulated alongside the conversion (§4.6 step 2/6).
pub struct DrainedFrame {
    pub mono: Vec<f32>,
    pub energy_left: f32,
    pub energy_right: f32,
}

pub struct JitterBuffer {
    sample_rate: u32,
    channels: usize,
    samples: VecDeque<i16>,
    capacity_samples: usize,
    min_ms: f64,
    max_ms: f64,
    target_ms: f64,
    last_nudge_us: u64,
    samples_since_nudge: u64,
}

impl JitterBuffer {
    pub fn new(sample_rate: u32, stereo: bool, latency_ms: u32) -> Self {
        let channels = if stereo { 2 } else { 1 };
        let capacity_samples = sample_rate as usize * channels;
        Self {
            sample_rate,
            channels,
            samples: VecDeque::with_capacity(capacity_samples),
            capacity_samples,
            min_ms: f64::from(latency_ms).max(0.0) - 12.0,
            max_ms: f64::from(latency_ms) + 12.0,
            target_ms: f64::from(latency_ms),
            last_nudge_us: 0,
            samples_since_nudge: 0,
        }
    }

    fn buffered_frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Buffered duration in milliseconds.
    pub fn buffered_ms(&self) -> f64 {
        self.buffered_frames() as f64 * 1000.0 / f64::from(self.sample_rate)
    }

    /// Appends one socket chunk (interleaved `i16`) and runs the PLL nudger
    /// plus the coarser overfill/underfill convergence. `now_us` is the
    /// caller's wall clock, used only to pace the 10 ms nudge interval.
    pub fn on_samples_received(&mut self, chunk: &[i16], now_us: u64) {
        for &s in chunk {
            if self.samples.len() >= self.capacity_samples {
                self.samples.pop_front();
            }
            self.samples.push_back(s);
        }
        self.samples_since_nudge += chunk.len() as u64;

        if self.last_nudge_us == 0 {
            self.last_nudge_us = now_us;
        }
        if now_us.saturating_sub(self.last_nudge_us) >= 10_000 {
            self.nudge();
            self.last_nudge_us = now_us;
            self.samples_since_nudge = 0;
        }

        self.converge();
    }

    fn nudge(&mut self) {
        let expected = f64::from(self.sample_rate) * self.channels as f64 * 0.01;
        if expected <= 0.0 {
            return;
        }
        let drift = (self.samples_since_nudge as f64 - expected) / expected;
        if drift > 0.02 {
            for _ in 0..self.channels {
                self.samples.pop_front();
            }
        }
    }

    fn converge(&mut self) {
        let buffered_ms = self.buffered_ms();
        if buffered_ms > self.max_ms {
            let drop_frames = self.buffered_frames() / 4;
            for _ in 0..(drop_frames * self.channels) {
                self.samples.pop_front();
            }
        } else if buffered_ms < self.min_ms {
            let target_frames = (self.target_ms * f64::from(self.sample_rate) / 1000.0) as usize;
            let need_frames = target_frames.saturating_sub(self.buffered_frames());
            if let Some(tail_start) = self.samples.len().checked_sub(self.channels) {
                let tail: Vec<i16> = self.samples.range(tail_start..).copied().collect();
                if !tail.is_empty() {
                    for _ in 0..need_frames {
                        self.samples.extend(tail.iter().copied());
                    }
                }
            }
        }
    }

    /// Drains one `fft_size`-frame analysis window if enough is buffered and
    /// the buffer isn't below `min_ms`, converting to mono float and
    /// accumulating per-channel RMS energy (clamped to `[0, 1]`) alongside.
    pub fn try_drain_frame(&mut self, fft_size: usize) -> Option<DrainedFrame> {
        if self.buffered_ms() < self.min_ms || self.buffered_frames() < fft_size {
            return None;
        }

        let mut mono = Vec::with_capacity(fft_size);
        let mut energy_left = 0.0f64;
        let mut energy_right = 0.0f64;

        for _ in 0..fft_size {
            if self.channels == 2 {
                let l = self.samples.pop_front().unwrap_or(0);
                let r = self.samples.pop_front().unwrap_or(0);
                let lf = f32::from(l) / i16::MAX as f32;
                let rf = f32::from(r) / i16::MAX as f32;
                energy_left += f64::from(lf) * f64::from(lf);
                energy_right += f64::from(rf) * f64::from(rf);
                mono.push((lf + rf) * 0.5);
            } else {
                let s = self.samples.pop_front().unwrap_or(0);
                let sf = f32::from(s) / i16::MAX as f32;
                energy_left += f64::from(sf) * f64::from(sf);
                energy_right = energy_left;
                mono.push(sf);
            }
        }

        let n = fft_size.max(1) as f64;
        let rms_left = (energy_left / n).sqrt().min(1.0) as f32;
        let rms_right = (energy_right / n).sqrt().min(1.0) as f32;

        Some(DrainedFrame { mono, energy_left: rms_left, energy_right: rms_right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overfill_converges_back_within_window() {
        let mut buf = JitterBuffer::new(48000, true, 100);
        let chunk = vec![1000i16; 2 * 10_000];
        buf.on_samples_received(&chunk, 0);
        assert!(buf.buffered_ms() > buf.max_ms);

        let mut now = 10_000;
        for _ in 0..20 {
            buf.on_samples_received(&[], now);
            now += 10_000;
            if buf.buffered_ms() <= buf.max_ms {
                break;
            }
        }
        assert!(buf.buffered_ms() <= buf.max_ms + 1.0);
    }

    #[test]
    fn underfill_pads_toward_target() {
        let mut buf = JitterBuffer::new(48000, false, 100);
        let chunk = vec![500i16; 100];
        buf.on_samples_received(&chunk, 0);
        assert!(buf.buffered_ms() < buf.min_ms);
        assert!(buf.buffered_ms() >= 100.0 - 12.0 - 5.0);
    }

    #[test]
    fn drain_produces_requested_frame_length() {
        let mut buf = JitterBuffer::new(48000, true, 100);
        let chunk = vec![1000i16; 2 * 4800];
        buf.on_samples_received(&chunk, 0);
        let frame = buf.try_drain_frame(1024).expect("frame available");
        assert_eq!(frame.mono.len(), 1024);
        assert!(frame.energy_left >= 0.0 && frame.energy_left <= 1.0);
    }

    #[test]
    fn drain_returns_none_when_starved() {
        let mut buf = JitterBuffer::new(48000, true, 100);
        assert!(buf.try_drain_frame(1024).is_none());
    }
}
