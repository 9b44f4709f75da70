// SPDX-License-Identifier: MPL-2.0
//! Sample-level rendering of the glitch voice.
//!
//! A looped white-noise buffer is read at a variable rate, passed through a
//! band-pass biquad and scaled by a gain that glides exponentially towards
//! its target. Only one voice exists; a new `Start` restarts the buffer read
//! and filter state but keeps the gain gliding from where it was.

use crate::application::port::{GlitchCommand, GlitchVoice};
use std::f64::consts::PI;

/// Band-pass biquad with 0 dB peak gain.
#[derive(Debug, Clone, Default)]
struct BandPass {
    b0: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BandPass {
    fn configure(&mut self, center_hz: f64, q: f64, sample_rate: f64) {
        let nyquist = sample_rate / 2.0;
        let center = center_hz.clamp(10.0, nyquist * 0.99);
        let q = q.max(1e-3);
        let w0 = 2.0 * PI * center / sample_rate;
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;
        self.b0 = alpha / a0;
        self.b2 = -alpha / a0;
        self.a1 = -2.0 * w0.cos() / a0;
        self.a2 = (1.0 - alpha) / a0;
    }

    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.b2 * self.x2 - self.a1 * self.y1 - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Mono renderer for the glitch voice.
#[derive(Debug, Clone)]
pub struct GlitchSynth {
    sample_rate: f64,
    noise: Vec<f32>,
    position: f64,
    rate: f64,
    filter: BandPass,
    gain: f64,
    target_gain: f64,
    gain_coef: f64,
    playing: bool,
    stop_in: Option<u64>,
}

impl GlitchSynth {
    /// Creates a silent synth with `buffer_secs` of noise at `sample_rate`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn new(sample_rate: u32, buffer_secs: f64, seed: u32) -> Self {
        let sample_rate = f64::from(sample_rate.max(1));
        let len = ((sample_rate * buffer_secs).round() as usize).max(1);
        let mut rng = fastrand::Rng::with_seed(u64::from(seed));
        let noise = (0..len).map(|_| rng.f32() * 2.0 - 1.0).collect();
        Self {
            sample_rate,
            noise,
            position: 0.0,
            rate: 1.0,
            filter: BandPass::default(),
            gain: 0.0,
            target_gain: 0.0,
            gain_coef: 1.0,
            playing: false,
            stop_in: None,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    fn glide_to(&mut self, target: f64, time_constant: f64) {
        self.target_gain = target;
        self.gain_coef = if time_constant > 0.0 {
            1.0 - (-1.0 / (time_constant * self.sample_rate)).exp()
        } else {
            1.0
        };
    }

    fn start(&mut self, voice: GlitchVoice) {
        self.position = 0.0;
        self.rate = voice.playback_rate.max(0.0);
        self.filter.configure(voice.filter_hz, voice.filter_q, self.sample_rate);
        self.filter.reset();
        self.glide_to(voice.target_gain, voice.attack_secs);
        self.playing = true;
        self.stop_in = None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn handle(&mut self, command: GlitchCommand) {
        match command {
            GlitchCommand::Start(voice) => self.start(voice),
            GlitchCommand::Release {
                release_secs,
                stop_after,
            } => {
                self.glide_to(0.0, release_secs);
                if self.playing {
                    self.stop_in = Some((stop_after.as_secs_f64() * self.sample_rate) as u64);
                }
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn next_sample(&mut self) -> f32 {
        self.gain += (self.target_gain - self.gain) * self.gain_coef;

        match self.stop_in {
            Some(0) => {
                self.playing = false;
                self.stop_in = None;
            }
            Some(ref mut remaining) => *remaining -= 1,
            None => {}
        }
        if !self.playing {
            return 0.0;
        }

        let len = self.noise.len();
        let index = self.position as usize % len;
        let frac = self.position.fract();
        let a = f64::from(self.noise[index]);
        let b = f64::from(self.noise[(index + 1) % len]);
        let raw = a + (b - a) * frac;

        self.position += self.rate;
        if self.position >= len as f64 {
            self.position %= len as f64;
        }

        (self.filter.process(raw) * self.gain) as f32
    }

    /// Fills `out` with mono samples.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
