//! Forward FFT producing the same byte spectrum an `AnalyserNode` hands out:
//! Hann-windowed magnitudes mapped through the decibel range [-100, -30]
//! into 0..=255.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::sync::Arc;
use viz_core::constants::{FFT_SIZE, SPECTRUM_BINS};
use viz_core::spectrum::SpectrumFrame;

const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;

pub struct FftProcessor {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    buffer: Vec<Complex<f32>>,
}

impl FftProcessor {
    pub fn new() -> Self {
        let size = FFT_SIZE;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch_len = fft.get_inplace_scratch_len();

        // Hann window reduces spectral leakage at chunk boundaries
        let window: Vec<f32> = (0..size)
            .map(|i| {
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos())
            })
            .collect();

        Self {
            fft,
            size,
            window,
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            buffer: Vec::with_capacity(size),
        }
    }

    /// Fill `frame` with the byte spectrum of the most recent window of
    /// samples. Short input is zero-padded.
    pub fn process(&mut self, samples: &[f32], frame: &mut SpectrumFrame) {
        self.buffer.clear();
        self.buffer.extend(
            samples
                .iter()
                .take(self.size)
                .zip(self.window.iter())
                .map(|(&s, &w)| Complex::new(s * w, 0.0)),
        );
        self.buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        // Positive frequencies only: fftSize/2 bins.
        for bin in 0..SPECTRUM_BINS {
            let magnitude = self.buffer[bin].norm() / self.size as f32;
            frame.set(bin, byte_of_magnitude(magnitude));
        }
    }
}

impl Default for FftProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_of_magnitude(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let normalized = (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS);
    (normalized.clamp(0.0, 1.0) * 255.0) as u8
}
