//! In-memory decision history and CSV export

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::config::HistoryConfig;
use crate::error::{AppError, AppResult};
use crate::models::IrrigationLog;

/// Column headers for exported history
pub const CSV_HEADERS: [&str; 14] = [
    "Timestamp",
    "Crop Type",
    "Soil Type",
    "Latitude",
    "Longitude",
    "Soil Moisture (%)",
    "Sensor Temp (°C)",
    "Sensor Humidity (%)",
    "Weather Temp (°C)",
    "Weather Humidity (%)",
    "Rain Probability (%)",
    "Water Amount (L/h)",
    "Duration (h)",
    "Status",
];

/// Bounded log of past decisions, oldest evicted first
#[derive(Debug)]
pub struct HistoryStore {
    records: RwLock<VecDeque<IrrigationLog>>,
    max_records: usize,
    default_limit: usize,
}

impl HistoryStore {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            max_records: config.max_records.max(1),
            default_limit: config.default_limit,
        }
    }

    pub fn record(&self, log: IrrigationLog) {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        while records.len() >= self.max_records {
            records.pop_front();
        }
        records.push_back(log);
    }

    /// Newest records first, optionally restricted to one crop
    pub fn list(&self, limit: Option<usize>, crop_type: Option<&str>) -> Vec<IrrigationLog> {
        let limit = limit.unwrap_or(self.default_limit);
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records
            .iter()
            .rev()
            .filter(|log| crop_type.map_or(true, |crop| log.crop_type == crop))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Every stored record, newest first
    pub fn all(&self) -> Vec<IrrigationLog> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render history records as CSV with a header row
pub fn export_to_csv(logs: &[IrrigationLog]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADERS)
        .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;

    for log in logs {
        wtr.write_record([
            log.timestamp.to_rfc3339(),
            log.crop_type.clone(),
            log.soil_type.clone(),
            log.latitude.to_string(),
            log.longitude.to_string(),
            log.sensor_data.soil_moisture.to_string(),
            log.sensor_data.temperature.to_string(),
            log.sensor_data.humidity.to_string(),
            log.weather_data.temperature.to_string(),
            log.weather_data.humidity.to_string(),
            log.weather_data.rain_probability.to_string(),
            log.decision.water_amount.to_string(),
            log.decision.duration.to_string(),
            log.decision.status.to_string(),
        ])
        .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }

    let csv_data = String::from_utf8(
        wtr.into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
    )
    .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        IrrigationDecision, IrrigationStatus, SensorReading, WeatherOrigin, WeatherReading,
    };
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn log(crop: &str, minutes: i64) -> IrrigationLog {
        IrrigationLog {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap() + Duration::minutes(minutes),
            user: "guest".to_string(),
            crop_type: crop.to_string(),
            soil_type: "Red Soil".to_string(),
            latitude: 12.97,
            longitude: 77.59,
            sensor_data: SensorReading {
                soil_moisture: 50.0,
                temperature: 22.0,
                humidity: 61.5,
            },
            weather_data: WeatherReading::FALLBACK,
            weather_source: WeatherOrigin::Fallback,
            decision: IrrigationDecision {
                water_amount: 1.31,
                duration: 2.3,
                status: IrrigationStatus::Active,
            },
        }
    }

    fn store(max_records: usize) -> HistoryStore {
        HistoryStore::new(&HistoryConfig {
            max_records,
            default_limit: 50,
        })
    }

    #[test]
    fn test_list_newest_first_with_filter() {
        let history = store(100);
        history.record(log("tomato", 0));
        history.record(log("rice", 1));
        history.record(log("tomato", 2));

        let all = history.list(None, None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].crop_type, "tomato");
        assert!(all[0].timestamp > all[1].timestamp);

        let tomatoes = history.list(None, Some("tomato"));
        assert_eq!(tomatoes.len(), 2);
        assert!(tomatoes.iter().all(|l| l.crop_type == "tomato"));

        assert_eq!(history.list(Some(1), None).len(), 1);
    }

    #[test]
    fn test_oldest_records_evicted() {
        let history = store(2);
        let first = log("tomato", 0);
        let first_id = first.id;
        history.record(first);
        history.record(log("rice", 1));
        history.record(log("maize", 2));

        assert_eq!(history.len(), 2);
        assert!(history.all().iter().all(|l| l.id != first_id));
    }

    #[test]
    fn test_export_csv_layout() {
        let csv = export_to_csv(&[log("tomato", 0)]).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Timestamp,Crop Type,Soil Type"));
        assert!(header.ends_with("Duration (h),Status"));

        let row = lines.next().unwrap();
        assert!(row.contains(",tomato,Red Soil,12.97,77.59,50,22,61.5,"));
        assert!(row.ends_with(",1.31,2.3,Active"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_export_empty_history_has_header_only() {
        let csv = export_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
