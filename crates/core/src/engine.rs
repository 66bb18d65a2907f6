//! Linear interpolation between two `(viewport width, value)` points and its
//! rendering as a CSS `clamp()` expression.
//!
//! All functions are pure and total: equal widths divide by zero and the
//! resulting `NaN`/`Infinity` flows into the output instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ValidationError, ValuePair, ViewportConfig};
use crate::number;

/// Fractional digits printed for the intercept and the `vw` coefficient.
pub const PRECISION: usize = 4;

/// Rate of change of the value per rem of viewport width.
pub fn slope(min: f64, max: f64, min_width_rem: f64, max_width_rem: f64) -> f64 {
    (max - min) / (max_width_rem - min_width_rem)
}

/// Value of the interpolation line at a viewport width of zero.
pub fn y_axis_intersection(min: f64, max: f64, min_width_rem: f64, max_width_rem: f64) -> f64 {
    -min_width_rem * slope(min, max, min_width_rem, max_width_rem) + min
}

/// `clamp(<min>rem, <intercept>rem + <slope*100>vw, <max>rem)`.
pub fn format_clamp(min: f64, max: f64, min_width_rem: f64, max_width_rem: f64) -> String {
    ClampExpression::new(min, max, min_width_rem, max_width_rem).to_string()
}

/// Slope and intercept of the line through both breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interpolation {
    pub slope: f64,
    pub intercept: f64,
}

impl Interpolation {
    pub fn between(min: f64, max: f64, min_width_rem: f64, max_width_rem: f64) -> Self {
        Self {
            slope: slope(min, max, min_width_rem, max_width_rem),
            intercept: y_axis_intersection(min, max, min_width_rem, max_width_rem),
        }
    }

    /// Coefficient of the `vw` term: one `vw` is a hundredth of the viewport width.
    pub fn vw_coefficient(&self) -> f64 {
        self.slope * 100.0
    }
}

/// A computed `clamp()` expression, kept numeric until displayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampExpression {
    pub min: f64,
    pub max: f64,
    pub line: Interpolation,
}

impl ClampExpression {
    pub fn new(min: f64, max: f64, min_width_rem: f64, max_width_rem: f64) -> Self {
        Self {
            min,
            max,
            line: Interpolation::between(min, max, min_width_rem, max_width_rem),
        }
    }

    pub fn from_pair(pair: &ValuePair, config: &ViewportConfig) -> Self {
        Self::new(
            pair.min,
            pair.max,
            config.min_width_rem(),
            config.max_width_rem(),
        )
    }

    /// Whether every number in the expression is finite, i.e. it is valid CSS.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.line.intercept.is_finite()
            && self.line.vw_coefficient().is_finite()
    }
}

impl fmt::Display for ClampExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "clamp({}rem, {}rem + {}vw, {}rem)",
            number::display(self.min),
            number::to_fixed(self.line.intercept, PRECISION),
            number::to_fixed(self.line.vw_coefficient(), PRECISION),
            number::display(self.max),
        )
    }
}

/// Clamp expression for a value pair under a viewport configuration.
///
/// Degenerate configurations are not rejected; see
/// [`try_compute_clamp_expression`] for the validating variant.
pub fn compute_clamp_expression(pair: &ValuePair, config: &ViewportConfig) -> String {
    ClampExpression::from_pair(pair, config).to_string()
}

/// Like [`compute_clamp_expression`], but rejects configurations or values
/// that would produce non-finite output.
pub fn try_compute_clamp_expression(
    pair: &ValuePair,
    config: &ViewportConfig,
) -> Result<String, ValidationError> {
    config.validate()?;
    pair.validate()?;
    Ok(compute_clamp_expression(pair, config))
}
