//! Record Metadata

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event, station, and instrument metadata attached to a record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Event name or identifier
    pub event_name: String,
    /// Origin time of the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    /// Human-readable event location
    pub event_location: String,
    /// Event magnitude, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_magnitude: Option<f64>,
    /// Hypocentral depth (km)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_depth_km: Option<f64>,

    /// Recording station name
    pub station_name: String,
    /// Station location description
    pub station_location: String,
    /// Station latitude (degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_latitude: Option<f64>,
    /// Station longitude (degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_longitude: Option<f64>,
    /// Station elevation (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_elevation_m: Option<f64>,

    /// Instrument type
    pub instrument_type: String,
    /// Instrument serial number
    pub instrument_serial: String,
    /// Sensor type
    pub sensor_type: String,
    /// Sampling rate (Hz)
    pub sampling_rate: f64,
    /// Physical units of the acceleration series
    pub units: String,
    /// Recording gain
    pub gain: f64,
    /// Sensor sensitivity (V/g)
    pub sensitivity: f64,

    /// Reader-supplied keys that have no dedicated field
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Default for RecordMetadata {
    fn default() -> Self {
        Self {
            event_name: String::new(),
            event_date: None,
            event_location: String::new(),
            event_magnitude: None,
            event_depth_km: None,
            station_name: String::new(),
            station_location: String::new(),
            station_latitude: None,
            station_longitude: None,
            station_elevation_m: None,
            instrument_type: String::new(),
            instrument_serial: String::new(),
            sensor_type: String::new(),
            sampling_rate: 0.0,
            units: "m/s^2".to_string(),
            gain: 1.0,
            sensitivity: 1.0,
            extra: BTreeMap::new(),
        }
    }
}
