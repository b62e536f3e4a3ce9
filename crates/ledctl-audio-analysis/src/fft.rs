//! Hann-windowed FFT with a cached plan and window table.

use rustfft::{FftPlanner, num_complex::Complex32};
use std::sync::Arc;

/// Computes and caches the Hann window and FFT plan for a given size, so that
/// repeated analysis frames at a stable `fft_size` don't replan or recompute
/// the window every call.
pub struct Analyzer {
    fft: Arc<dyn rustfft::Fft<f32>>,
    window: Vec<f32>,
    size: usize,
}

impl Analyzer {
    /// Creates an analyzer for `size` samples. `size` should already be a
    /// power of two in `[64, 4096]`; see [`clamp_fft_size`].
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, window: hann_window(size), size }
    }

    /// Resizes the cached plan and window if `size` changed.
    pub fn resize(&mut self, size: usize) {
        if size != self.size {
            *self = Self::new(size);
        }
    }

    /// FFT size this analyzer was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Applies the Hann window to `samples` in place. `samples.len()` must equal
    /// [`Analyzer::size`].
    pub fn apply_window(&self, samples: &mut [f32]) {
        for (s, w) in samples.iter_mut().zip(self.window.iter()) {
            *s *= w;
        }
    }

    /// Computes the magnitude spectrum (length `size / 2`) of a windowed,
    /// real-valued `size`-sample buffer, normalized by `1 / size`.
    pub fn magnitude_spectrum(&self, windowed: &[f32]) -> Vec<f32> {
        let mut buf: Vec<Complex32> = windowed.iter().map(|&s| Complex32::new(s, 0.0)).collect();
        self.fft.process(&mut buf);
        let norm = 1.0 / self.size as f32;
        buf[..self.size / 2].iter().map(|c| c.norm() * norm).collect()
    }
}

/// Precomputes the Hann window coefficients for `size` samples.
fn hann_window(size: usize) -> Vec<f32> {
    if size <= 1 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos()))
        .collect()
}

/// Clamps a requested FFT size to the nearest power of two in `[64, 4096]`,
/// rounding up.
pub fn clamp_fft_size(requested: usize) -> usize {
    let mut size = requested.max(64);
    let mut pow2 = 64usize;
    while pow2 < size && pow2 < 4096 {
        pow2 *= 2;
    }
    size = pow2.min(4096);
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_rounds_up_to_power_of_two() {
        assert_eq!(clamp_fft_size(1000), 1024);
        assert_eq!(clamp_fft_size(1), 64);
        assert_eq!(clamp_fft_size(5000), 4096);
        assert_eq!(clamp_fft_size(1024), 1024);
    }

    #[test]
    fn magnitude_spectrum_has_half_length() {
        let analyzer = Analyzer::new(256);
        let mut samples = vec![1.0f32; 256];
        analyzer.apply_window(&mut samples);
        let spectrum = analyzer.magnitude_spectrum(&samples);
        assert_eq!(spectrum.len(), 128);
    }

    #[test]
    fn dc_signal_peaks_at_bin_zero() {
        let analyzer = Analyzer::new(128);
        let samples = vec![1.0f32; 128]; // unwindowed DC, bypassing apply_window
        let spectrum = analyzer.magnitude_spectrum(&samples);
        assert!(spectrum[0] > spectrum[1]);
    }
}
