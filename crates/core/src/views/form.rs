use fluid_clamp_protocol::{Bound, FieldId, FormCommand};

use crate::model::{ClampContext, Session};
use crate::number;

pub const SETTINGS_TITLE: &str = "Required settings";

const SETTINGS_FIELDS: [FieldId; 3] = [
    FieldId::PixelsPerRem,
    FieldId::MinWidthPx,
    FieldId::MaxWidthPx,
];

/// Render the whole form: the settings group first (input only), then one
/// group per metric with its computed expression.
pub fn render_form(session: &Session, focus: Option<FieldId>) -> Vec<FormCommand> {
    let mut commands = Vec::with_capacity(4 + session.groups().len() * 5);

    render_group(
        &mut commands,
        session,
        SETTINGS_TITLE,
        &SETTINGS_FIELDS,
        None,
        focus,
    );

    let ctx = session.context();
    for group in session.groups() {
        let fields = [
            FieldId::Value(group.metric, Bound::Min),
            FieldId::Value(group.metric, Bound::Max),
        ];
        render_group(
            &mut commands,
            session,
            group.metric.title(),
            &fields,
            Some(&ctx),
            focus,
        );
    }

    commands
}

fn render_group(
    commands: &mut Vec<FormCommand>,
    session: &Session,
    title: &str,
    fields: &[FieldId],
    ctx: Option<&ClampContext<'_>>,
    focus: Option<FieldId>,
) {
    commands.push(FormCommand::BeginGroup {
        title: title.to_owned(),
    });

    for &id in fields {
        commands.push(FormCommand::Field {
            id,
            label: id.label().to_owned(),
            value: number::display(session.field_value(id)),
            unit: id.unit(),
            focused: focus == Some(id),
        });
    }

    let metric = fields.iter().copied().find_map(FieldId::metric);
    if let Some(metric) = metric
        && let Some(expression) = session
            .group(metric)
            .and_then(|g| g.expression(ctx))
    {
        commands.push(FormCommand::Output { metric, expression });
    }

    commands.push(FormCommand::EndGroup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluid_clamp_protocol::{Metric, Unit};

    fn outputs(commands: &[FormCommand]) -> Vec<(Metric, &str)> {
        commands
            .iter()
            .filter_map(|c| match c {
                FormCommand::Output { metric, expression } => Some((*metric, expression.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn layout_has_settings_then_metric_groups() {
        let session = Session::new();
        let commands = render_form(&session, None);

        let titles: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                FormCommand::BeginGroup { title } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            titles,
            ["Required settings", "Responsive font size", "Responsive line height"]
        );

        let field_ids: Vec<FieldId> = commands.iter().filter_map(FormCommand::field_id).collect();
        assert_eq!(field_ids, FieldId::ALL);

        let begins = commands
            .iter()
            .filter(|c| matches!(c, FormCommand::BeginGroup { .. }))
            .count();
        let ends = commands
            .iter()
            .filter(|c| matches!(c, FormCommand::EndGroup))
            .count();
        assert_eq!(begins, ends);
    }

    #[test]
    fn settings_group_has_no_output() {
        let session = Session::new();
        let commands = render_form(&session, None);
        let first_end = commands
            .iter()
            .position(|c| matches!(c, FormCommand::EndGroup))
            .unwrap();
        assert!(
            commands[..first_end]
                .iter()
                .all(|c| !matches!(c, FormCommand::Output { .. }))
        );
        assert_eq!(
            outputs(&commands),
            [
                (Metric::FontSize, "clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)"),
                (Metric::LineHeight, "clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)"),
            ]
        );
    }

    #[test]
    fn field_values_units_and_focus() {
        let mut session = Session::new();
        session.input(FieldId::Value(Metric::LineHeight, Bound::Min), "1.25");
        let focus = FieldId::Value(Metric::LineHeight, Bound::Min);
        let commands = render_form(&session, Some(focus));

        let focused: Vec<&FormCommand> = commands
            .iter()
            .filter(|c| matches!(c, FormCommand::Field { focused: true, .. }))
            .collect();
        assert_eq!(focused.len(), 1);
        let FormCommand::Field {
            id, value, unit, ..
        } = focused[0]
        else {
            unreachable!()
        };
        assert_eq!(*id, focus);
        assert_eq!(value, "1.25");
        assert_eq!(*unit, Unit::Rem);

        let px_field = commands
            .iter()
            .find(|c| c.field_id() == Some(FieldId::MinWidthPx))
            .unwrap();
        assert!(matches!(
            px_field,
            FormCommand::Field { unit: Unit::Px, value, .. } if value == "360"
        ));
    }

    #[test]
    fn degenerate_settings_still_render() {
        let mut session = Session::new();
        session.input(FieldId::MinWidthPx, "400");
        session.input(FieldId::MaxWidthPx, "400");
        let commands = render_form(&session, None);
        for (_, expression) in outputs(&commands) {
            assert!(expression.contains("Infinity") || expression.contains("NaN"));
        }
    }
}
