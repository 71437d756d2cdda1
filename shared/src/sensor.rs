//! Sensor reading sources
//!
//! [`SimulatedSensor`] lets the pipeline run without field hardware. A
//! telemetry adapter for real probes implements [`SensorSource`] the same way.

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::SensorReading;
use crate::types::{round_to, ValueRange};

/// Anything that can report the current soil and air conditions
pub trait SensorSource: Send + Sync {
    fn read(&self) -> SensorReading;
}

/// Bounds for simulated readings
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct SensorBounds {
    pub moisture: ValueRange,
    pub temperature: ValueRange,
    pub humidity: ValueRange,
}

impl Default for SensorBounds {
    fn default() -> Self {
        Self {
            moisture: ValueRange::new(30.0, 90.0),
            temperature: ValueRange::new(15.0, 40.0),
            humidity: ValueRange::new(40.0, 90.0),
        }
    }
}

impl SensorBounds {
    fn is_valid(&self) -> bool {
        self.moisture.is_ordered() && self.temperature.is_ordered() && self.humidity.is_ordered()
    }
}

/// Uniformly random readings within [`SensorBounds`]
#[derive(Debug, Clone, Default)]
pub struct SimulatedSensor {
    bounds: SensorBounds,
}

impl SimulatedSensor {
    pub fn new(bounds: SensorBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &SensorBounds {
        &self.bounds
    }

    /// Generate a reading from the given random source.
    ///
    /// Unusable bounds yield [`SensorReading::FALLBACK`].
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SensorReading {
        if !self.bounds.is_valid() {
            warn!(bounds = ?self.bounds, "Invalid sensor bounds, using fallback reading");
            return SensorReading::FALLBACK;
        }

        let reading = SensorReading {
            soil_moisture: sample(rng, self.bounds.moisture),
            temperature: sample(rng, self.bounds.temperature),
            humidity: sample(rng, self.bounds.humidity),
        };
        debug!(?reading, "Simulated sensor reading");
        reading
    }

    pub fn generate(&self) -> SensorReading {
        self.generate_with(&mut rand::thread_rng())
    }
}

impl SensorSource for SimulatedSensor {
    fn read(&self) -> SensorReading {
        self.generate()
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: ValueRange) -> f64 {
    // Rounding a value inside [min, max] to one decimal can step past a bound
    // that is not itself a multiple of 0.1
    round_to(rng.gen_range(range.min..=range.max), 1).clamp(range.min, range.max)
}
