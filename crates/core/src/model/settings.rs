use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection reasons for the opt-in strict mode.
///
/// The permissive path never produces these; it lets degenerate numbers flow
/// through to the output instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("maximum width ({max_px}px) must be greater than minimum width ({min_px}px)")]
    EmptyWidthRange { min_px: f64, max_px: f64 },
}

/// Pixels-per-rem ratio and the viewport range the interpolation spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub pixels_per_rem: f64,
    pub min_width_px: f64,
    pub max_width_px: f64,
}

impl ViewportConfig {
    pub const DEFAULT_PIXELS_PER_REM: f64 = 16.0;
    pub const DEFAULT_MIN_WIDTH_PX: f64 = 360.0;
    pub const DEFAULT_MAX_WIDTH_PX: f64 = 840.0;

    pub fn new(pixels_per_rem: f64, min_width_px: f64, max_width_px: f64) -> Self {
        Self {
            pixels_per_rem,
            min_width_px,
            max_width_px,
        }
    }

    pub fn set_pixels_per_rem(&mut self, value: f64) {
        self.pixels_per_rem = value;
    }

    pub fn set_min_width_px(&mut self, value: f64) {
        self.min_width_px = value;
    }

    pub fn set_max_width_px(&mut self, value: f64) {
        self.max_width_px = value;
    }

    /// Minimum viewport width in rem.
    pub fn min_width_rem(&self) -> f64 {
        self.min_width_px / self.pixels_per_rem
    }

    /// Maximum viewport width in rem.
    pub fn max_width_rem(&self) -> f64 {
        self.max_width_px / self.pixels_per_rem
    }

    /// Check that the configuration describes a non-empty, positive range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("pixels per rem", self.pixels_per_rem)?;
        positive("minimum width", self.min_width_px)?;
        positive("maximum width", self.max_width_px)?;
        if self.max_width_px <= self.min_width_px {
            return Err(ValidationError::EmptyWidthRange {
                min_px: self.min_width_px,
                max_px: self.max_width_px,
            });
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PIXELS_PER_REM,
            Self::DEFAULT_MIN_WIDTH_PX,
            Self::DEFAULT_MAX_WIDTH_PX,
        )
    }
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}
