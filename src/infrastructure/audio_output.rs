// SPDX-License-Identifier: MPL-2.0
//! Glitch voice output through cpal.
//!
//! The synth lives behind a mutex shared with the device callback. Commands
//! from the deck lock it briefly; the callback renders one mono sample per
//! frame and copies it to every channel.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use crate::application::port::{GlitchCommand, GlitchSink};
use crate::config::{checked, GlitchConfig, DEFAULT_GLITCH_NOISE_BUFFER_SECS};
use crate::error::{Error, Result};
use crate::feedback::GlitchSynth;

const NOISE_SEED: u32 = 0x9E37_79B9;
const MAX_NOISE_BUFFER_SECS: f64 = 10.0;

/// Glitch sink playing on the default output device.
pub struct CpalGlitchOutput {
    synth: Arc<Mutex<GlitchSynth>>,
    sample_rate: u32,
    channels: u16,

    /// Kept alive for as long as the output exists.
    _stream: cpal::Stream,
}

impl CpalGlitchOutput {
    /// Opens the default output device and starts a silent stream.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no output device, its configuration
    /// cannot be read, or the stream fails to start.
    pub fn new(config: &GlitchConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;

        let supported_config = device.default_output_config()?;
        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();

        let buffer_secs = checked(
            "glitch.noise_buffer_secs",
            config.noise_buffer_secs,
            DEFAULT_GLITCH_NOISE_BUFFER_SECS,
            |v| v > 0.0 && v <= MAX_NOISE_BUFFER_SECS,
        );
        let synth = Arc::new(Mutex::new(GlitchSynth::new(sample_rate, buffer_secs, NOISE_SEED)));
        let shared = Arc::clone(&synth);

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &supported_config.into(), shared)?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &supported_config.into(), shared)?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &supported_config.into(), shared)?
            }
            other => {
                return Err(Error::Audio(format!("Unsupported sample format {other}")));
            }
        };
        stream.play()?;

        log::info!("Glitch output open at {sample_rate} Hz, {channels} channel(s)");
        Ok(Self {
            synth,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        synth: Arc<Mutex<GlitchSynth>>,
    ) -> Result<cpal::Stream> {
        let channels = usize::from(config.channels.max(1));
        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let Ok(mut synth) = synth.lock() else {
                    data.fill(T::from_sample(0.0f32));
                    return;
                };
                for frame in data.chunks_mut(channels) {
                    // Just under 1.0 so i16 conversion cannot overflow.
                    let value = synth.next_sample().clamp(-1.0, 0.999_999_9);
                    frame.fill(T::from_sample(value));
                }
            },
            |err| log::error!("Audio output error: {err}"),
            None,
        )?;
        Ok(stream)
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl GlitchSink for CpalGlitchOutput {
    fn send(&mut self, command: GlitchCommand) {
        match self.synth.lock() {
            Ok(mut synth) => synth.handle(command),
            Err(_) => log::warn!("Glitch synth lock poisoned, dropping {command:?}"),
        }
    }
}
