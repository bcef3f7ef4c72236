//! Seam for the external image-to-calorie estimation service.
//!
//! The core never talks to the network itself; it hands a meal photo to an
//! injected estimator and stores the resulting integer. A failed estimate
//! simply leaves the calorie field unset. Not queued, not retried.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a calorie estimator. Carries a human-readable
/// message only; the store logs it and moves on.
#[derive(Debug)]
pub struct EstimatorError {
    message: String,
}

impl EstimatorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for EstimatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "calorie estimation failed: {}", self.message)
    }
}

impl Error for EstimatorError {}

/// Vision service boundary: image payload in, calorie estimate out.
pub trait CalorieEstimator {
    fn estimate(&self, image: &str) -> Result<u32, EstimatorError>;
}
