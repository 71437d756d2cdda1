//! Business logic services for the Smart Irrigation System

pub mod catalog;
pub mod history;
pub mod irrigation;

pub use catalog::{InMemoryCatalog, ReferenceData};
pub use history::HistoryStore;
pub use irrigation::IrrigationService;
