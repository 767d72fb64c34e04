//! Synthetic Test Records
//!
//! Builds the three-burst demonstration record: quiet Gaussian-like
//! background with 5 Hz bursts at 10, 30, and 50 seconds plus a 40 Hz
//! contamination tone for the filtering stage to remove.

use std::f64::consts::PI;

use seismic_record::{Component, ComponentId, Record, RecordMetadata};

/// Burst onsets of the synthetic record, seconds
pub const BURST_TIMES_S: [f64; 3] = [10.0, 30.0, 50.0];
/// Burst carrier frequency, Hz
pub const BURST_FREQUENCY_HZ: f64 = 5.0;
/// Contamination tone frequency, Hz
pub const CONTAMINATION_HZ: f64 = 40.0;

/// Deterministic Gaussian-like noise (sum of twelve uniforms)
fn background(n: usize, std: f64, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut uniform = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    };
    (0..n)
        .map(|_| (0..12).map(|_| uniform()).sum::<f64>() * std)
        .collect()
}

fn burst_trace(fs: f64, n: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut signal = background(n, 0.1, seed);
    for (i, slot) in signal.iter_mut().enumerate() {
        let t = i as f64 / fs;
        *slot += 0.05 * (2.0 * PI * CONTAMINATION_HZ * t).sin();
        for &t0 in &BURST_TIMES_S {
            if t >= t0 && t < t0 + 1.0 {
                *slot += amplitude * (2.0 * PI * BURST_FREQUENCY_HZ * t).sin();
            }
        }
    }
    signal
}

/// Triaxial three-burst record of the given duration.
///
/// Horizontal components carry full-amplitude bursts; the vertical
/// component is weaker, as real vertical channels usually are.
pub fn three_burst_record(fs: f64, duration_s: f64) -> Record {
    let n = (duration_s * fs) as usize;
    let time: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
    let metadata = RecordMetadata {
        sampling_rate: fs,
        ..RecordMetadata::default()
    };

    let mut record = Record::new("synthetic-three-burst", time, metadata)
        .expect("synthetic time vector is valid");
    record
        .add_component(Component::new(ComponentId::East, burst_trace(fs, n, 2.0, 11)))
        .expect("fresh record accepts East");
    record
        .add_component(Component::new(ComponentId::North, burst_trace(fs, n, 1.8, 23)))
        .expect("fresh record accepts North");
    record
        .add_component(Component::new(
            ComponentId::Vertical,
            burst_trace(fs, n, 0.9, 37),
        ))
        .expect("fresh record accepts Vertical");
    record
}
