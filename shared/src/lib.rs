//! Shared types and models for the Smart Irrigation System
//!
//! This crate contains the decision engine and the types shared between the
//! backend, the frontend (via WASM), and other components of the system.

pub mod engine;
pub mod models;
pub mod sensor;
pub mod types;
pub mod validation;

pub use engine::*;
pub use models::*;
pub use sensor::*;
pub use types::*;
pub use validation::*;
