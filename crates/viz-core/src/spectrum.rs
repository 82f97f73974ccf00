//! Frequency frame and the volume-to-scale mapping.
//!
//! A [`SpectrumFrame`] is the per-refresh snapshot of frequency-magnitude
//! bytes produced by the analysis stage; bin `i` drives visual entity `i`.

use crate::constants::{SPECTRUM_BINS, VOLUME_AMPLIFICATION};

#[derive(Clone)]
pub struct SpectrumFrame {
    bytes: [u8; SPECTRUM_BINS],
}

impl SpectrumFrame {
    pub fn new() -> Self {
        Self {
            bytes: [0; SPECTRUM_BINS],
        }
    }

    pub fn from_bytes(bytes: [u8; SPECTRUM_BINS]) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw storage, refreshed in place once per frame by the frontend.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn set(&mut self, bin: usize, value: u8) {
        if let Some(b) = self.bytes.get_mut(bin) {
            *b = value;
        }
    }

    /// Normalized magnitude in `[0, 1]`; out-of-range bins read as silent.
    pub fn volume(&self, bin: usize) -> f32 {
        self.bytes.get(bin).copied().unwrap_or(0) as f32 / 255.0
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for SpectrumFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Peak scale an entity can reach at the given normalized volume.
#[inline]
pub fn max_scale_for_volume(base: f32, volume: f32) -> f32 {
    base + volume * VOLUME_AMPLIFICATION
}

/// Scale applied this frame: below the threshold the entity snaps back to
/// its resting scale instead of scaling continuously, which keeps a quiet
/// floor visually still rather than jittering with quantization noise.
#[inline]
pub fn scale_for_volume(base: f32, volume: f32, threshold: f32) -> f32 {
    if volume > threshold {
        max_scale_for_volume(base, volume)
    } else {
        base
    }
}
