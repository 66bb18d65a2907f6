use std::sync::{LazyLock, Mutex, MutexGuard};

use fluid_clamp_core::model::{Session, ValuePair, ViewportConfig};
use fluid_clamp_core::views::render_form;
use fluid_clamp_protocol::{FieldId, Metric};
use wasm_bindgen::prelude::*;

static SESSION: LazyLock<Mutex<Session>> = LazyLock::new(|| Mutex::new(Session::new()));

fn session() -> MutexGuard<'static, Session> {
    // A panic mid-update leaves plain numbers behind; keep serving them.
    SESSION.lock().unwrap_or_else(|e| e.into_inner())
}

/// Stateless computation: values in rem, settings in px.
#[wasm_bindgen]
pub fn compute_clamp_expression(
    min: f64,
    max: f64,
    pixels_per_rem: f64,
    min_width_px: f64,
    max_width_px: f64,
) -> String {
    let config = ViewportConfig::new(pixels_per_rem, min_width_px, max_width_px);
    fluid_clamp_core::compute_clamp_expression(&ValuePair::new(min, max), &config)
}

/// Feed raw input text into a field of the shared session. Returns the
/// coerced number (NaN for unparseable text).
#[wasm_bindgen]
pub fn set_field(id: &str, raw: &str) -> Result<f64, JsError> {
    let field: FieldId = id.parse()?;
    Ok(session().input(field, raw))
}

/// Current numeric value of a field.
#[wasm_bindgen]
pub fn get_field(id: &str) -> Result<f64, JsError> {
    let field: FieldId = id.parse()?;
    Ok(session().field_value(field))
}

/// Expression for `fontSize` or `lineHeight`.
#[wasm_bindgen]
pub fn clamp_expression(metric: &str) -> Result<String, JsError> {
    let metric: Metric = metric.parse()?;
    session()
        .clamp_expression(metric)
        .ok_or_else(|| JsError::new(&format!("no value group for {metric}")))
}

/// The whole form as JSON-encoded `FormCommand`s.
#[wasm_bindgen]
pub fn form_commands() -> Result<String, JsError> {
    let session = session();
    serde_json::to_string(&render_form(&session, None)).map_err(|e| JsError::new(&e.to_string()))
}

/// Restore every field to its default value.
#[wasm_bindgen]
pub fn reset_session() {
    *session() = Session::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    // JsError can only be constructed inside a JS host, so native tests stay
    // on the success paths.

    #[test]
    fn stateless_reference_scenarios() {
        assert_eq!(
            compute_clamp_expression(1.0, 3.5, 16.0, 360.0, 840.0),
            "clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)"
        );
        assert_eq!(
            compute_clamp_expression(1.0, 3.5, 16.0, 360.0, 1200.0),
            "clamp(1rem, -0.0714rem + 4.7619vw, 3.5rem)"
        );
    }

    #[test]
    fn shared_session_flow() {
        reset_session();
        assert_eq!(get_field("pixelsPerRem").ok(), Some(16.0));
        assert_eq!(set_field("minFs", "1.125").ok(), Some(1.125));
        assert_eq!(set_field("maxFs", "2").ok(), Some(2.0));
        assert_eq!(
            clamp_expression("fontSize").ok().as_deref(),
            Some("clamp(1.125rem, 0.4688rem + 2.9167vw, 2rem)")
        );
        assert_eq!(
            clamp_expression("lineHeight").ok().as_deref(),
            Some("clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)")
        );

        let json = form_commands().ok().unwrap_or_default();
        let commands: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(commands.as_array().map(Vec::len), Some(15));
        reset_session();
        assert_eq!(get_field("minFs").ok(), Some(1.0));
    }
}
