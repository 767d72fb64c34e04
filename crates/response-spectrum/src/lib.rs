//! Structural Response Spectrum Solver
//!
//! Integrates a unit-mass single-degree-of-freedom oscillator through a
//! ground acceleration history at each period of a grid, recording peak
//! displacement, velocity, and (pseudo-)acceleration. Periods are
//! independent, so the grid is computed in parallel; long runs can be
//! cancelled between periods.

mod cancel;
mod combination;
mod config;
mod error;
mod grid;
mod solver;

pub use cancel::CancelToken;
pub use config::{CombinationMethod, SaFormulation, SolverConfig};
pub use error::SpectrumError;
pub use grid::{
    default_periods, log_spaced, DEFAULT_MAX_PERIOD_S, DEFAULT_MIN_PERIOD_S, DEFAULT_PERIOD_COUNT,
};

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Spectral ordinates over a period grid, one triple per period
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSpectrum {
    /// Natural periods in seconds
    pub periods: Vec<f64>,
    /// Spectral (pseudo-)acceleration per period
    pub sa: Vec<f64>,
    /// Peak relative velocity per period
    pub sv: Vec<f64>,
    /// Peak relative displacement per period
    pub sd: Vec<f64>,
}

/// Per-axis spectra plus their combination
#[derive(Debug, Clone, Serialize)]
pub struct CombinedResponse {
    /// Combination rule that produced the combined arrays
    pub method: CombinationMethod,
    /// Natural periods shared by every spectrum
    pub periods: Vec<f64>,
    /// Combined spectral acceleration
    pub sa: Vec<f64>,
    /// Combined spectral velocity
    pub sv: Vec<f64>,
    /// Combined spectral displacement
    pub sd: Vec<f64>,
    /// East-West axis spectrum
    pub east: ResponseSpectrum,
    /// North-South axis spectrum
    pub north: ResponseSpectrum,
    /// Vertical axis spectrum
    pub vertical: ResponseSpectrum,
}

/// Response spectrum over a period grid.
///
/// Equivalent to [`response_spectrum_cancellable`] with a token that is
/// never raised.
pub fn response_spectrum(
    acceleration: &[f64],
    time: &[f64],
    periods: &[f64],
    config: &SolverConfig,
) -> Result<ResponseSpectrum, SpectrumError> {
    response_spectrum_cancellable(acceleration, time, periods, config, &CancelToken::new())
}

/// Response spectrum with best-effort cancellation.
///
/// The period grid is solved in parallel; the token is checked before
/// each period and a raised flag aborts with [`SpectrumError::Cancelled`].
pub fn response_spectrum_cancellable(
    acceleration: &[f64],
    time: &[f64],
    periods: &[f64],
    config: &SolverConfig,
    token: &CancelToken,
) -> Result<ResponseSpectrum, SpectrumError> {
    validate_input(acceleration, time)?;
    validate_parameters(periods, config)?;
    let dt = time[1] - time[0];

    debug!(
        "solving {} periods over {} samples (damping {})",
        periods.len(),
        acceleration.len(),
        config.damping_ratio
    );

    let peaks: Vec<_> = periods
        .par_iter()
        .map(|&period| {
            if token.is_cancelled() {
                return Err(SpectrumError::Cancelled);
            }
            Ok(solver::sdof_peaks(acceleration, dt, period, config))
        })
        .collect::<Result<_, _>>()?;

    let mut sa = Vec::with_capacity(peaks.len());
    let mut sv = Vec::with_capacity(peaks.len());
    let mut sd = Vec::with_capacity(peaks.len());
    for p in &peaks {
        sa.push(p.sa);
        sv.push(p.sv);
        sd.push(p.sd);
    }

    Ok(ResponseSpectrum {
        periods: periods.to_vec(),
        sa,
        sv,
        sd,
    })
}

/// Per-axis spectra on a shared grid, combined by the given rule
pub fn combined_response(
    acc_east: &[f64],
    acc_north: &[f64],
    acc_vertical: &[f64],
    time: &[f64],
    periods: &[f64],
    method: CombinationMethod,
    config: &SolverConfig,
) -> Result<CombinedResponse, SpectrumError> {
    let east = response_spectrum(acc_east, time, periods, config)?;
    let north = response_spectrum(acc_north, time, periods, config)?;
    let vertical = response_spectrum(acc_vertical, time, periods, config)?;

    let (sa, sv, sd) = combination::combine_spectra(method, &east, &north, &vertical);

    Ok(CombinedResponse {
        method,
        periods: periods.to_vec(),
        sa,
        sv,
        sd,
        east,
        north,
        vertical,
    })
}

fn validate_input(acceleration: &[f64], time: &[f64]) -> Result<(), SpectrumError> {
    if acceleration.is_empty() {
        return Err(SpectrumError::EmptySignal);
    }
    if acceleration.len() != time.len() {
        return Err(SpectrumError::LengthMismatch {
            signal_len: acceleration.len(),
            time_len: time.len(),
        });
    }
    if time.len() < 2 {
        return Err(SpectrumError::TimeTooShort { len: time.len() });
    }
    Ok(())
}

fn validate_parameters(periods: &[f64], config: &SolverConfig) -> Result<(), SpectrumError> {
    if !config.damping_ratio.is_finite() || config.damping_ratio < 0.0 {
        return Err(SpectrumError::InvalidDamping {
            value: config.damping_ratio,
        });
    }
    if periods.is_empty() {
        return Err(SpectrumError::EmptyPeriods);
    }
    for (index, &value) in periods.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(SpectrumError::InvalidPeriod { index, value });
        }
    }
    Ok(())
}
