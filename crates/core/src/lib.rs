//! Fluid typography core: computes CSS `clamp()` expressions that scale a
//! value linearly between two viewport widths.
//!
//! ```
//! use fluid_clamp_core::model::{ValuePair, ViewportConfig};
//!
//! let config = ViewportConfig::new(16.0, 360.0, 840.0);
//! let css = fluid_clamp_core::compute_clamp_expression(&ValuePair::new(1.0, 3.5), &config);
//! assert_eq!(css, "clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)");
//! ```

pub mod clipboard;
pub mod engine;
pub mod input;
pub mod model;
pub mod number;
pub mod views;

pub use engine::{compute_clamp_expression, try_compute_clamp_expression};
