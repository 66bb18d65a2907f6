use fluid_clamp_protocol::{Bound, Metric};
use serde::{Deserialize, Serialize};

use super::settings::{ValidationError, ViewportConfig, finite};
use crate::engine::compute_clamp_expression;

/// A property's value at the minimum and maximum viewport, in rem.
///
/// `max` may be smaller than `min`; the expression then shrinks as the
/// viewport grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePair {
    pub min: f64,
    pub max: f64,
}

impl ValuePair {
    pub const DEFAULT_MIN: f64 = 1.0;
    pub const DEFAULT_MAX: f64 = 3.5;

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn get(&self, bound: Bound) -> f64 {
        match bound {
            Bound::Min => self.min,
            Bound::Max => self.max,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        finite("minimum value", self.min)?;
        finite("maximum value", self.max)?;
        Ok(())
    }
}

impl Default for ValuePair {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

/// Explicitly passed computation context for value groups.
///
/// Borrowing the viewport configuration keeps groups independent of each
/// other: the only shared state they see is this read-only snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ClampContext<'a> {
    config: &'a ViewportConfig,
}

impl<'a> ClampContext<'a> {
    pub fn new(config: &'a ViewportConfig) -> Self {
        Self { config }
    }

    pub fn clamp(&self, pair: &ValuePair) -> String {
        compute_clamp_expression(pair, self.config)
    }
}

/// Inputs for one responsive metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueGroup {
    pub metric: Metric,
    pub pair: ValuePair,
}

impl ValueGroup {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            pair: ValuePair::default(),
        }
    }

    pub fn set_min(&mut self, value: f64) {
        self.pair.min = value;
    }

    pub fn set_max(&mut self, value: f64) {
        self.pair.max = value;
    }

    /// The computed expression, or `None` when no context is available and
    /// the group only collects input.
    pub fn expression(&self, ctx: Option<&ClampContext<'_>>) -> Option<String> {
        ctx.map(|ctx| ctx.clamp(&self.pair))
    }
}
