//! Domain models for the Smart Irrigation System

mod crop;
mod decision;
mod sensor;
mod weather;

pub use crop::*;
pub use decision::*;
pub use sensor::*;
pub use weather::*;
