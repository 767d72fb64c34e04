//! Pipeline Errors
//!
//! Engine errors pass through unchanged; the pipeline adds only the
//! conditions it can detect itself, like a missing component.

use thiserror::Error;

/// Errors surfaced by the analysis workflow
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("record error: {0}")]
    Record(#[from] seismic_record::RecordError),

    #[error("filter error: {0}")]
    Filter(#[from] filter_engine::FilterError),

    #[error("integration error: {0}")]
    Integration(#[from] signal_processor::ProcessError),

    #[error("spectral analysis error: {0}")]
    Spectral(#[from] spectral_engine::SpectralError),

    #[error("response spectrum error: {0}")]
    ResponseSpectrum(#[from] response_spectrum::SpectrumError),

    #[error("event detection error: {0}")]
    Detection(#[from] event_detector::DetectError),

    #[error("record has no {code} component")]
    MissingComponent { code: &'static str },
}
