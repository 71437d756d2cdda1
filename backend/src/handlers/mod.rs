//! HTTP handlers for the Smart Irrigation System API

pub mod catalog;
pub mod health;
pub mod irrigation;

pub use catalog::*;
pub use health::*;
pub use irrigation::*;
