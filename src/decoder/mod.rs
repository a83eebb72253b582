//! Decoding modules
//!
//! This module turns measured bars into a validated digit string:
//! - Half-height measurement about the midline
//! - Self-calibration from the reference bars
//! - Digit mapping and reference validation

/// Reference-bar calibration of the unit step
pub mod calibration;
/// Tunable pipeline constants and environment overrides
pub mod config;
/// Half-height to digit mapping
pub mod mapping;
/// Half-height measurement
pub mod measure;

pub use calibration::{CalibrationStep, calibrate};
pub use config::DecodeParams;
pub use mapping::map_digits;
pub use measure::measure;
