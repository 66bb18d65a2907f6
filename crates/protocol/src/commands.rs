use serde::{Deserialize, Serialize};

use crate::types::{FieldId, Metric, Unit};

/// A single, stateless form instruction.
///
/// The core emits a `Vec<FormCommand>` describing the whole form. Renderers
/// consume the list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormCommand {
    /// Begin a titled input group.
    BeginGroup { title: String },

    /// One numeric input. `value` is already formatted for display.
    Field {
        id: FieldId,
        label: String,
        value: String,
        unit: Unit,
        focused: bool,
    },

    /// Read-only computed expression for a metric group, with a copy affordance.
    Output { metric: Metric, expression: String },

    /// End the current group.
    EndGroup,
}

impl FormCommand {
    /// The field id, if this command is a `Field`.
    pub fn field_id(&self) -> Option<FieldId> {
        match self {
            FormCommand::Field { id, .. } => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bound;

    #[test]
    fn commands_serialize_with_variant_tags() {
        let cmd = FormCommand::Field {
            id: FieldId::Value(Metric::FontSize, Bound::Min),
            label: "Minimum font size =".into(),
            value: "1".into(),
            unit: Unit::Rem,
            focused: false,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["Field"]["value"], "1");
        assert_eq!(json["Field"]["unit"], "Rem");

        let back: FormCommand = serde_json::from_value(json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn field_id_only_on_fields() {
        assert_eq!(FormCommand::EndGroup.field_id(), None);
        let out = FormCommand::Output {
            metric: Metric::LineHeight,
            expression: String::new(),
        };
        assert_eq!(out.field_id(), None);
    }
}
