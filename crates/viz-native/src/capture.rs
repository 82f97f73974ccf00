//! Microphone capture. The cpal callback downmixes to mono and appends to a
//! shared ring buffer that the render loop drains each frame.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Large enough to hold several FFT windows worth of data.
pub const MAX_BUFFER_SIZE: usize = 2048 * 4;

pub type SharedBuffer = Arc<Mutex<VecDeque<f32>>>;

pub fn new_shared_buffer() -> SharedBuffer {
    Arc::new(Mutex::new(VecDeque::with_capacity(MAX_BUFFER_SIZE)))
}

/// Start capturing from the default input device. The returned stream must
/// be kept alive for the duration of capture.
pub fn start_input_capture(buffer: SharedBuffer) -> anyhow::Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow::anyhow!("no input device available"))?;
    log::info!(
        "capturing from: {}",
        device.name().unwrap_or_else(|_| "<unnamed>".into())
    );

    let supported = device.default_input_config()?;
    let channels = supported.channels() as usize;
    let config: cpal::StreamConfig = supported.into();

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            push_samples(data, channels, &buffer);
        },
        |err| log::error!("audio input error: {err}"),
        None,
    )?;
    stream.play()?;
    Ok(stream)
}

/// Push interleaved multi-channel samples into the ring buffer as mono.
fn push_samples(data: &[f32], channels: usize, buffer: &SharedBuffer) {
    let Ok(mut buf) = buffer.lock() else { return };
    if channels > 1 {
        for chunk in data.chunks(channels) {
            let mono: f32 = chunk.iter().sum::<f32>() / channels as f32;
            buf.push_back(mono);
        }
    } else {
        for &s in data {
            buf.push_back(s);
        }
    }
    while buf.len() > MAX_BUFFER_SIZE {
        buf.pop_front();
    }
}
