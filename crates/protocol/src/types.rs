use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A responsive property whose value is interpolated between two viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    FontSize,
    LineHeight,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::FontSize, Metric::LineHeight];

    /// Heading shown above the metric's input group.
    pub fn title(self) -> &'static str {
        match self {
            Metric::FontSize => "Responsive font size",
            Metric::LineHeight => "Responsive line height",
        }
    }

    pub fn label(self, bound: Bound) -> &'static str {
        match (self, bound) {
            (Metric::FontSize, Bound::Min) => "Minimum font size =",
            (Metric::FontSize, Bound::Max) => "Maximum font size =",
            (Metric::LineHeight, Bound::Min) => "Minimum line height =",
            (Metric::LineHeight, Bound::Max) => "Maximum line height =",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::FontSize => "fontSize",
            Metric::LineHeight => "lineHeight",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric: {0:?}")]
pub struct ParseMetricError(pub String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fontSize" | "font-size" => Ok(Metric::FontSize),
            "lineHeight" | "line-height" => Ok(Metric::LineHeight),
            other => Err(ParseMetricError(other.to_owned())),
        }
    }
}

/// Which end of the viewport range a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    Min,
    Max,
}

/// Identifies one editable numeric input.
///
/// The string form matches the ids used by HTML front-ends
/// (`pixelsPerRem`, `minFs`, `maxLh`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    PixelsPerRem,
    MinWidthPx,
    MaxWidthPx,
    Value(Metric, Bound),
}

impl FieldId {
    /// Every field in display order.
    pub const ALL: [FieldId; 7] = [
        FieldId::PixelsPerRem,
        FieldId::MinWidthPx,
        FieldId::MaxWidthPx,
        FieldId::Value(Metric::FontSize, Bound::Min),
        FieldId::Value(Metric::FontSize, Bound::Max),
        FieldId::Value(Metric::LineHeight, Bound::Min),
        FieldId::Value(Metric::LineHeight, Bound::Max),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::PixelsPerRem => "pixelsPerRem",
            FieldId::MinWidthPx => "minWidthPx",
            FieldId::MaxWidthPx => "maxWidthPx",
            FieldId::Value(Metric::FontSize, Bound::Min) => "minFs",
            FieldId::Value(Metric::FontSize, Bound::Max) => "maxFs",
            FieldId::Value(Metric::LineHeight, Bound::Min) => "minLh",
            FieldId::Value(Metric::LineHeight, Bound::Max) => "maxLh",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::PixelsPerRem => "Pixels / rem ratio",
            FieldId::MinWidthPx => "Minimum screen width =",
            FieldId::MaxWidthPx => "Maximum screen width =",
            FieldId::Value(metric, bound) => metric.label(bound),
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            FieldId::PixelsPerRem | FieldId::MinWidthPx | FieldId::MaxWidthPx => Unit::Px,
            FieldId::Value(..) => Unit::Rem,
        }
    }

    /// The metric group this field feeds, if any.
    pub fn metric(self) -> Option<Metric> {
        match self {
            FieldId::Value(metric, _) => Some(metric),
            _ => None,
        }
    }

    /// Next field in display order, wrapping around.
    pub fn next(self) -> FieldId {
        let idx = Self::index_of(self);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field in display order, wrapping around.
    pub fn prev(self) -> FieldId {
        let idx = Self::index_of(self);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index_of(field: FieldId) -> usize {
        Self::ALL.iter().position(|f| *f == field).unwrap_or(0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field id: {0:?}")]
pub struct ParseFieldError(pub String);

impl FromStr for FieldId {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ParseFieldError(s.to_owned()))
    }
}

/// Length unit shown next to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Px,
    Rem,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Rem => "rem",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_ids_round_trip_through_strings() {
        for field in FieldId::ALL {
            let parsed: FieldId = field.as_str().parse().unwrap();
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn unknown_field_id_is_rejected() {
        let err = "fontSize".parse::<FieldId>().unwrap_err();
        assert_eq!(err, ParseFieldError("fontSize".into()));
    }

    #[test]
    fn focus_order_wraps() {
        assert_eq!(FieldId::PixelsPerRem.prev(), FieldId::Value(Metric::LineHeight, Bound::Max));
        assert_eq!(FieldId::Value(Metric::LineHeight, Bound::Max).next(), FieldId::PixelsPerRem);
        assert_eq!(FieldId::MaxWidthPx.next(), FieldId::Value(Metric::FontSize, Bound::Min));
    }

    #[test]
    fn units_follow_field_kind() {
        assert_eq!(FieldId::MinWidthPx.unit(), Unit::Px);
        assert_eq!(FieldId::Value(Metric::FontSize, Bound::Min).unit(), Unit::Rem);
        assert_eq!(FieldId::PixelsPerRem.metric(), None);
    }

    #[test]
    fn metric_accepts_css_spelling() {
        assert_eq!("line-height".parse::<Metric>().unwrap(), Metric::LineHeight);
        assert!("margin".parse::<Metric>().is_err());
    }
}
