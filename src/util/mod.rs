//! Utility types and functions for the scene-index library.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - [`SampleTime`] - Time coordinate for sampled data sources

mod error;

pub use error::*;

/// Time coordinate for sampled values (seconds, or a shutter offset
/// relative to the current frame, depending on the pipeline stage).
pub type SampleTime = f64;
