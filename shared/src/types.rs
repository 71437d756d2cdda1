//! Common types used across the system

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Closed interval `[min, max]`, serialized as a two-element array
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl From<[f64; 2]> for ValueRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<ValueRange> for [f64; 2] {
    fn from(range: ValueRange) -> Self {
        [range.min, range.max]
    }
}

/// Round to a fixed number of decimal places, ties to even
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_serializes_as_pair() {
        let range = ValueRange::new(60.0, 70.0);
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "[60.0,70.0]");

        let parsed: ValueRange = serde_json::from_str("[18, 24]").unwrap();
        assert_eq!(parsed, ValueRange::new(18.0, 24.0));
    }

    #[test]
    fn test_value_range_contains() {
        let range = ValueRange::new(20.0, 28.0);
        assert!(range.contains(20.0));
        assert!(range.contains(28.0));
        assert!(!range.contains(28.1));
        assert!(!ValueRange::new(5.0, 1.0).is_ordered());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.3125, 2), 1.31);
        assert_eq!(round_to(2.3333, 1), 2.3);
        assert_eq!(round_to(64.96, 1), 65.0);
    }

    #[test]
    fn test_round_to_ties_go_to_even() {
        assert_eq!(round_to(2.25, 1), 2.2);
        assert_eq!(round_to(2.35, 1), 2.4);
        assert_eq!(round_to(24.25, 1), 24.2);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(-2.25, 1), -2.2);
    }
}
