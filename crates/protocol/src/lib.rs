pub mod commands;
pub mod theme;
pub mod types;

pub use commands::FormCommand;
pub use theme::ThemeToken;
pub use types::{Bound, FieldId, Metric, ParseFieldError, ParseMetricError, Unit};
