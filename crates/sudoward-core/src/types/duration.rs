//! Grant duration in hours.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Hard ceiling on any grant (ten years), independent of configuration.
pub const ABSOLUTE_MAX_HOURS: i64 = 24 * 365 * 10;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A validated, strictly positive grant length.
///
/// Fractional hours are allowed; the length is kept to millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantDuration(f64);

impl GrantDuration {
    /// Validate an hour count against an optional upper bound.
    pub fn hours(hours: f64, max_hours: Option<i64>) -> Result<Self, AppError> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(AppError::invalid_duration(format!(
                "Duration must be a positive number of hours, got {hours}"
            )));
        }
        if hours > ABSOLUTE_MAX_HOURS as f64 {
            return Err(AppError::invalid_duration(format!(
                "Duration of {hours}h exceeds the hard limit of {ABSOLUTE_MAX_HOURS}h"
            )));
        }
        if let Some(max) = max_hours {
            if hours > max as f64 {
                return Err(AppError::invalid_duration(format!(
                    "Duration of {hours}h exceeds the maximum of {max}h"
                )));
            }
        }
        if (hours * MILLIS_PER_HOUR).round() < 1.0 {
            return Err(AppError::invalid_duration(format!(
                "Duration of {hours}h is shorter than one millisecond"
            )));
        }
        Ok(Self(hours))
    }

    /// Number of hours.
    pub fn as_hours(&self) -> f64 {
        self.0
    }

    /// The duration as a chrono offset, rounded to the millisecond.
    pub fn as_chrono(&self) -> Duration {
        Duration::milliseconds((self.0 * MILLIS_PER_HOUR).round() as i64)
    }
}
