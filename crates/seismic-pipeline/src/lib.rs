//! Strong-Motion Analysis Pipeline
//!
//! Orchestrates the engines over a [`Record`]: raw-count ingestion,
//! optional filtering, integration to velocity and displacement,
//! spectral characterization, response spectra with multi-component
//! combination, and event detection. Engine errors propagate unchanged.

mod error;
pub mod synthetic;

pub use error::PipelineError;

use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use event_detector::{EventDetector, EventFeatures, StaLtaConfig, DEFAULT_FEATURE_WINDOW_S};
use filter_engine::SignalFilter;
use response_spectrum::{
    combined_response, default_periods, CombinationMethod, CombinedResponse, SolverConfig,
};
use seismic_record::{
    record_from_counts, ChannelCalibration, ComponentId, FilterSpec, Record, RecordMetadata,
};
use signal_processor::SignalProcessor;
use spectral_engine::{
    PowerSpectrum, SpectralAnalyzer, Spectrum, WindowKind, DEFAULT_SEGMENT_LENGTH,
};

/// Install the process-wide log subscriber. Call once at startup.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to set tracing subscriber");
}

/// Workflow parameters, every stage tunable explicitly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Filter applied to each component before integration, if any
    pub filter: Option<FilterSpec>,
    /// Window for the averaged FFT
    pub window: WindowKind,
    /// Segment length for the averaged FFT
    pub segment_length: usize,
    /// STA/LTA trigger parameters
    pub sta_lta: StaLtaConfig,
    /// SDOF solver parameters
    pub solver: SolverConfig,
    /// Multi-component combination rule
    pub combination: CombinationMethod,
    /// Component the event detector listens to
    pub detection_component: ComponentId,
    /// Feature window around each trigger, seconds
    pub feature_window_s: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter: None,
            window: WindowKind::Hann,
            segment_length: DEFAULT_SEGMENT_LENGTH,
            sta_lta: StaLtaConfig::default(),
            solver: SolverConfig::default(),
            combination: CombinationMethod::Srss,
            detection_component: ComponentId::East,
            feature_window_s: DEFAULT_FEATURE_WINDOW_S,
        }
    }
}

/// Frequency-domain characterization of one component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentSpectra {
    /// Channel code
    pub component: String,
    /// Block-averaged spectrum
    pub spectrum: Spectrum,
    /// One-sided power spectrum
    pub power: PowerSpectrum,
}

/// Per-component scalars of a completed analysis
#[derive(Debug, Clone, Serialize)]
pub struct ComponentSummary {
    /// Channel code
    pub component: String,
    /// Peak ground acceleration
    pub pga: Option<f64>,
    /// Peak ground velocity, present after integration
    pub pgv: Option<f64>,
    /// Peak ground displacement, present after integration
    pub pgd: Option<f64>,
    /// Frequency of the strongest power-spectrum bin above DC
    pub dominant_frequency_hz: f64,
    /// Power at that bin
    pub peak_power: f64,
}

/// Machine-readable summary of a full workflow run
#[derive(Debug, Clone, Serialize)]
pub struct RecordAnalysis {
    /// Name of the analyzed record
    pub record_name: String,
    /// Sampling rate in Hz
    pub sampling_rate_hz: f64,
    /// Record duration in seconds
    pub duration_s: f64,
    /// Per-component peaks and dominant frequencies
    pub components: Vec<ComponentSummary>,
    /// STA/LTA trigger times in seconds
    pub trigger_times_s: Vec<f64>,
    /// Features around each trigger
    pub events: Vec<EventFeatures>,
    /// Combination rule of the response spectra
    pub combination_method: CombinationMethod,
    /// Peak combined spectral acceleration over the period grid
    pub peak_combined_sa: f64,
}

/// Analysis workflow bound to one sampling rate
pub struct AnalysisPipeline {
    fs: f64,
    filter: SignalFilter,
    processor: SignalProcessor,
    analyzer: SpectralAnalyzer,
    detector: EventDetector,
}

impl AnalysisPipeline {
    /// Create a pipeline for records sampled at `sampling_rate` Hz
    pub fn new(sampling_rate: f64) -> Result<Self, PipelineError> {
        Ok(Self {
            fs: sampling_rate,
            filter: SignalFilter::new(sampling_rate)?,
            processor: SignalProcessor::new(sampling_rate)?,
            analyzer: SpectralAnalyzer::new(sampling_rate)?,
            detector: EventDetector::new(sampling_rate)?,
        })
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.fs
    }

    /// Build a calibrated record from a decoded count buffer
    pub fn ingest_counts(
        &self,
        name: &str,
        counts: &[i32],
        calibrations: [ChannelCalibration; 3],
        metadata: RecordMetadata,
    ) -> Result<Record, PipelineError> {
        info!("ingesting {} raw counts as record '{}'", counts.len(), name);
        Ok(record_from_counts(name, counts, self.fs, calibrations, metadata)?)
    }

    /// Filter every component in place, recording the applied spec
    pub fn filter_record(&self, record: &mut Record, spec: FilterSpec) -> Result<(), PipelineError> {
        info!(
            "filtering record '{}' with {} (order {})",
            record.name,
            spec.kind_name(),
            spec.order()
        );
        for component in record.components_mut() {
            let filtered = self.filter.apply(component.acceleration(), &spec)?;
            component.set_filtered_acceleration(filtered, spec);
        }
        Ok(())
    }

    /// Integrate every component to velocity and displacement
    pub fn derive_motion(&self, record: &mut Record) -> Result<(), PipelineError> {
        info!("integrating record '{}'", record.name);
        self.processor.process_record(record)?;
        Ok(())
    }

    /// Averaged FFT and power spectrum for every component
    pub fn spectral_summary(
        &mut self,
        record: &Record,
        window: WindowKind,
        segment_length: usize,
    ) -> Result<Vec<ComponentSpectra>, PipelineError> {
        let mut spectra = Vec::with_capacity(record.components().len());
        for component in record.components() {
            let acc = component.acceleration();
            spectra.push(ComponentSpectra {
                component: component.id().code().to_string(),
                spectrum: self.analyzer.averaged_fft(acc, window, segment_length)?,
                power: self.analyzer.power_spectrum(acc)?,
            });
        }
        Ok(spectra)
    }

    /// Response spectra per axis plus their combination.
    ///
    /// Requires all three components; the standard period grid is used.
    pub fn response_spectra(
        &self,
        record: &Record,
        method: CombinationMethod,
        config: &SolverConfig,
    ) -> Result<CombinedResponse, PipelineError> {
        let east = component_acceleration(record, ComponentId::East)?;
        let north = component_acceleration(record, ComponentId::North)?;
        let vertical = component_acceleration(record, ComponentId::Vertical)?;
        info!(
            "computing response spectra for record '{}' ({:?})",
            record.name, method
        );
        let periods = default_periods();
        Ok(combined_response(
            east,
            north,
            vertical,
            record.time(),
            &periods,
            method,
            config,
        )?)
    }

    /// STA/LTA events on one component, with features per trigger
    pub fn detect_events(
        &self,
        record: &Record,
        component: ComponentId,
        config: &StaLtaConfig,
        feature_window_s: f64,
    ) -> Result<Vec<EventFeatures>, PipelineError> {
        let signal = component_acceleration(record, component)?;
        Ok(self.detector.detect_events(signal, config, feature_window_s)?)
    }

    /// Run the full workflow and summarize it.
    ///
    /// Stages: optional filtering, integration, spectral summary,
    /// response spectra, event detection.
    pub fn analyze(
        &mut self,
        record: &mut Record,
        config: &AnalysisConfig,
    ) -> Result<RecordAnalysis, PipelineError> {
        if let Some(spec) = config.filter {
            self.filter_record(record, spec)?;
        }
        self.derive_motion(record)?;

        let spectra = self.spectral_summary(record, config.window, config.segment_length)?;
        let combined = self.response_spectra(record, config.combination, &config.solver)?;

        let detection_signal = component_acceleration(record, config.detection_component)?;
        let sta_lta = self.detector.sta_lta(detection_signal, &config.sta_lta)?;
        let events = sta_lta
            .trigger_times_s
            .iter()
            .map(|&t| {
                self.detector
                    .event_features(detection_signal, t, config.feature_window_s)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let components = record
            .components()
            .iter()
            .zip(spectra.iter())
            .map(|(component, spectra)| {
                let (dominant_frequency_hz, peak_power) = dominant_bin(&spectra.power);
                ComponentSummary {
                    component: component.id().code().to_string(),
                    pga: component.pga(),
                    pgv: component.pgv(),
                    pgd: component.pgd(),
                    dominant_frequency_hz,
                    peak_power,
                }
            })
            .collect();

        let peak_combined_sa = combined.sa.iter().fold(0.0f64, |m, &v| m.max(v));
        info!(
            "analysis of '{}' complete: {} triggers, peak combined Sa {:.4}",
            record.name,
            events.len(),
            peak_combined_sa
        );

        Ok(RecordAnalysis {
            record_name: record.name.clone(),
            sampling_rate_hz: self.fs,
            duration_s: record.duration(),
            components,
            trigger_times_s: sta_lta.trigger_times_s,
            events,
            combination_method: config.combination,
            peak_combined_sa,
        })
    }
}

fn component_acceleration(
    record: &Record,
    id: ComponentId,
) -> Result<&[f64], PipelineError> {
    record
        .component(id)
        .map(|c| c.acceleration())
        .ok_or(PipelineError::MissingComponent { code: id.code() })
}

/// Strongest power-spectrum bin above DC
fn dominant_bin(power: &PowerSpectrum) -> (f64, f64) {
    power
        .frequencies_hz
        .iter()
        .zip(power.power.iter())
        .skip(1)
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(&f, &p)| (f, p))
        .unwrap_or((0.0, 0.0))
}
