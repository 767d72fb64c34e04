//! Strong-Motion Record Model
//!
//! Typed records, components, and metadata for accelerograph data, plus
//! raw-count conversion, series validation, statistics, and resampling.

mod component;
mod counts;
mod error;
mod filter_spec;
mod metadata;
mod record;
mod series;

pub use component::{Component, ComponentId};
pub use counts::{
    record_from_counts, ChannelCalibration, DEFAULT_SAMPLING_RATE_HZ, STANDARD_GRAVITY,
};
pub use error::RecordError;
pub use filter_spec::FilterSpec;
pub use metadata::RecordMetadata;
pub use record::Record;
pub use series::{resample, validate_series, SignalStats};
