// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the per-sample scrub path.
//!
//! Measures the performance of:
//! - Angle-to-time scrubbing of one drag
//! - Groove pulse generation
//! - Glitch voice rendering (one device buffer)

use criterion::{criterion_group, criterion_main, Criterion};
use spin_deck::application::port::GlitchCommand;
use spin_deck::domain::newtypes::SecondsPerRotation;
use spin_deck::domain::rotation::RotationState;
use spin_deck::domain::session::{PlaybackSession, SourceMode};
use spin_deck::feedback::{GlitchSynth, GlitchTuning, GrooveHaptics, GrooveTuning};
use spin_deck::scrub::ScrubTranslator;
use std::hint::black_box;
use std::time::{Duration, Instant};

const SAMPLES: u32 = 240;
const FRAME: Duration = Duration::from_millis(16);

/// A drag wobbling back and forth around the disc.
fn drag_angles() -> Vec<f64> {
    (0..SAMPLES)
        .map(|i| {
            let t = f64::from(i) / f64::from(SAMPLES);
            (t * 1440.0 + 40.0 * (t * 20.0).sin()) % 360.0 - 180.0
        })
        .collect()
}

fn bench_scrub(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrub");
    let angles = drag_angles();

    group.bench_function("translate_drag", |b| {
        b.iter(|| {
            let start = Instant::now();
            let mut scrub = ScrubTranslator::new(SecondsPerRotation::default());
            let mut rotation = RotationState::new();
            let mut session = PlaybackSession::new();
            session.begin(SourceMode::LocalFile);
            session.report_times(60.0, Some(240.0));

            scrub.begin(angles[0], start);
            for (i, angle) in angles.iter().enumerate() {
                let now = start + FRAME * (i as u32 + 1);
                black_box(scrub.apply(*angle, now, &mut rotation, &mut session, None));
            }
            black_box(session.current_time());
        });
    });

    group.finish();
}

fn bench_groove(c: &mut Criterion) {
    let mut group = c.benchmark_group("groove");
    let angles = drag_angles();
    let deltas: Vec<f64> = angles
        .windows(2)
        .map(|w| spin_deck::domain::geometry::normalize_delta(w[0], w[1]))
        .collect();

    group.bench_function("pulses_for_drag", |b| {
        b.iter(|| {
            let start = Instant::now();
            let mut groove = GrooveHaptics::new(GrooveTuning::default());
            groove.begin(start);
            let mut pulses = 0usize;
            for (i, delta) in deltas.iter().enumerate() {
                let now = start + FRAME * (i as u32 + 1);
                pulses += usize::from(groove.sample(*delta, now).is_some());
            }
            black_box(pulses);
        });
    });

    group.finish();
}

fn bench_glitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("glitch");
    let tuning = GlitchTuning::default();

    group.bench_function("render_512_frames", |b| {
        let mut synth = GlitchSynth::new(48_000, 0.5, 7);
        synth.handle(GlitchCommand::Start(tuning.voice(0.8)));
        let mut buffer = vec![0.0f32; 512];
        b.iter(|| {
            synth.render(&mut buffer);
            black_box(&buffer);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_scrub, bench_groove, bench_glitch);
criterion_main!(benches);
