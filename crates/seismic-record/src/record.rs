//! Triaxial Record Container

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentId};
use crate::error::RecordError;
use crate::metadata::RecordMetadata;

/// A named collection of components sharing one time vector and metadata.
///
/// Components are owned exclusively by the record; every component series
/// matches the time vector length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Record name, usually derived from the source file
    pub name: String,
    time: Vec<f64>,
    components: Vec<Component>,
    /// Event, station, and instrument metadata
    pub metadata: RecordMetadata,
}

impl Record {
    /// Create an empty record over a validated time vector.
    ///
    /// The time vector must be non-empty and strictly increasing.
    pub fn new(
        name: impl Into<String>,
        time: Vec<f64>,
        metadata: RecordMetadata,
    ) -> Result<Self, RecordError> {
        if time.is_empty() {
            return Err(RecordError::EmptySeries);
        }
        for i in 1..time.len() {
            if time[i] <= time[i - 1] {
                return Err(RecordError::TimeNotIncreasing { index: i });
            }
        }
        Ok(Self {
            name: name.into(),
            time,
            components: Vec::new(),
            metadata,
        })
    }

    /// Shared time vector (seconds)
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Number of samples per component
    pub fn sample_count(&self) -> usize {
        self.time.len()
    }

    /// Sampling interval, when at least two samples exist
    pub fn dt(&self) -> Option<f64> {
        if self.time.len() < 2 {
            None
        } else {
            Some(self.time[1] - self.time[0])
        }
    }

    /// Record duration in seconds
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Add a component whose series matches the time vector
    pub fn add_component(&mut self, component: Component) -> Result<(), RecordError> {
        if component.acceleration().len() != self.time.len() {
            return Err(RecordError::LengthMismatch {
                expected: self.time.len(),
                actual: component.acceleration().len(),
            });
        }
        if self.components.iter().any(|c| c.id() == component.id()) {
            return Err(RecordError::DuplicateComponent {
                code: component.id().code(),
            });
        }
        self.components.push(component);
        Ok(())
    }

    /// Look up a component by channel
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    /// Mutable component lookup
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    /// All components in insertion order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Mutable iterator over components
    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.components.iter_mut()
    }
}
