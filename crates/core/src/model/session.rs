use fluid_clamp_protocol::{Bound, FieldId, Metric};
use serde::{Deserialize, Serialize};

use super::settings::{ValidationError, ViewportConfig};
use super::value_group::{ClampContext, ValueGroup};
use crate::engine::try_compute_clamp_expression;
use crate::input::coerce_number;

/// All form state for one session: the viewport configuration plus one
/// value group per metric.
///
/// Every setter marks the session dirty; renderers poll [`Session::take_dirty`]
/// to decide when to rebuild their view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    config: ViewportConfig,
    groups: Vec<ValueGroup>,
    #[serde(skip)]
    dirty: bool,
}

impl Session {
    /// Create a session with default settings and values.
    pub fn new() -> Self {
        Self {
            config: ViewportConfig::default(),
            groups: Metric::ALL.into_iter().map(ValueGroup::new).collect(),
            dirty: true,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn groups(&self) -> &[ValueGroup] {
        &self.groups
    }

    pub fn group(&self, metric: Metric) -> Option<&ValueGroup> {
        self.groups.iter().find(|g| g.metric == metric)
    }

    fn group_mut(&mut self, metric: Metric) -> Option<&mut ValueGroup> {
        self.groups.iter_mut().find(|g| g.metric == metric)
    }

    /// The context value groups render against.
    pub fn context(&self) -> ClampContext<'_> {
        ClampContext::new(&self.config)
    }

    /// Current numeric value of a field.
    pub fn field_value(&self, field: FieldId) -> f64 {
        match field {
            FieldId::PixelsPerRem => self.config.pixels_per_rem,
            FieldId::MinWidthPx => self.config.min_width_px,
            FieldId::MaxWidthPx => self.config.max_width_px,
            FieldId::Value(metric, bound) => self
                .group(metric)
                .map_or(f64::NAN, |g| g.pair.get(bound)),
        }
    }

    /// Store a number into a field and mark the session dirty.
    pub fn set_field(&mut self, field: FieldId, value: f64) {
        match field {
            FieldId::PixelsPerRem => self.config.set_pixels_per_rem(value),
            FieldId::MinWidthPx => self.config.set_min_width_px(value),
            FieldId::MaxWidthPx => self.config.set_max_width_px(value),
            FieldId::Value(metric, bound) => {
                let Some(group) = self.group_mut(metric) else {
                    return;
                };
                match bound {
                    Bound::Min => group.set_min(value),
                    Bound::Max => group.set_max(value),
                }
            }
        }
        tracing::debug!(%field, value, "field updated");
        self.dirty = true;
    }

    /// Coerce raw text the way a number input would and store it.
    ///
    /// Unparseable text becomes `NaN` rather than an error.
    pub fn input(&mut self, field: FieldId, raw: &str) -> f64 {
        let value = coerce_number(raw);
        if value.is_nan() {
            tracing::debug!(%field, raw, "input coerced to NaN");
        }
        self.set_field(field, value);
        value
    }

    /// Clamp expression for a metric, computed permissively.
    pub fn clamp_expression(&self, metric: Metric) -> Option<String> {
        let ctx = self.context();
        self.group(metric).and_then(|g| g.expression(Some(&ctx)))
    }

    /// Clamp expression for a metric, rejecting degenerate input.
    pub fn strict_clamp_expression(&self, metric: Metric) -> Result<String, ValidationError> {
        let pair = self
            .group(metric)
            .map(|g| g.pair)
            .unwrap_or_default();
        try_compute_clamp_expression(&pair, &self.config)
    }

    /// Return whether anything changed since the last call, and reset the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN_FS: FieldId = FieldId::Value(Metric::FontSize, Bound::Min);
    const MAX_FS: FieldId = FieldId::Value(Metric::FontSize, Bound::Max);
    const MAX_LH: FieldId = FieldId::Value(Metric::LineHeight, Bound::Max);

    #[test]
    fn defaults() {
        let session = Session::new();
        assert_eq!(session.field_value(FieldId::PixelsPerRem), 16.0);
        assert_eq!(session.field_value(FieldId::MinWidthPx), 360.0);
        assert_eq!(session.field_value(FieldId::MaxWidthPx), 840.0);
        assert_eq!(session.field_value(MIN_FS), 1.0);
        assert_eq!(session.field_value(MAX_LH), 3.5);
        assert_eq!(session.groups().len(), 2);
    }

    #[test]
    fn groups_are_independent() {
        let mut session = Session::new();
        session.set_field(MAX_FS, 2.0);
        assert_eq!(session.field_value(MAX_FS), 2.0);
        assert_eq!(session.field_value(MAX_LH), 3.5);
        assert_eq!(
            session.clamp_expression(Metric::LineHeight).as_deref(),
            Some("clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)")
        );
    }

    #[test]
    fn settings_changes_reach_every_group() {
        let mut session = Session::new();
        session.set_field(FieldId::MaxWidthPx, 1200.0);
        // 360/16 = 22.5, 1200/16 = 75, slope = 2.5 / 52.5
        for metric in Metric::ALL {
            assert_eq!(
                session.clamp_expression(metric).as_deref(),
                Some("clamp(1rem, -0.0714rem + 4.7619vw, 3.5rem)")
            );
        }
    }

    #[test]
    fn input_coerces_text() {
        let mut session = Session::new();
        assert_eq!(session.input(MIN_FS, " 0.75 "), 0.75);
        assert!(session.input(MAX_FS, "big").is_nan());
        let expr = session.clamp_expression(Metric::FontSize).unwrap();
        assert!(expr.contains("NaN"));
        assert!(expr.starts_with("clamp(0.75rem, "));
    }

    #[test]
    fn dirty_flag_tracks_mutations() {
        let mut session = Session::new();
        assert!(session.take_dirty());
        assert!(!session.take_dirty());
        session.input(FieldId::PixelsPerRem, "10");
        assert!(session.take_dirty());
        let _ = session.clamp_expression(Metric::FontSize);
        assert!(!session.take_dirty());
    }

    #[test]
    fn strict_mode_reports_degenerate_config() {
        let mut session = Session::new();
        assert!(session.strict_clamp_expression(Metric::FontSize).is_ok());

        session.set_field(FieldId::MinWidthPx, 400.0);
        session.set_field(FieldId::MaxWidthPx, 400.0);
        assert!(matches!(
            session.strict_clamp_expression(Metric::FontSize),
            Err(ValidationError::EmptyWidthRange { .. })
        ));
        // The permissive path still answers.
        assert!(session.clamp_expression(Metric::FontSize).is_some());
    }

    #[test]
    fn serializes_state_without_dirty_flag() {
        let session = Session::new();
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["config"]["pixels_per_rem"], 16.0);
        assert_eq!(json["groups"][1]["metric"], "LineHeight");
        assert!(json.get("dirty").is_none());
    }
}
