use std::collections::HashMap;

use egui::{RichText, Stroke};
use fluid_clamp_protocol::{FieldId, FormCommand, Metric, ThemeToken};

use crate::theme::{self, ThemeMode};

const INPUT_WIDTH: f32 = 64.0;

/// User interaction produced while rendering the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The draft text of a field changed.
    Edited(FieldId),
    /// The copy button of a metric group was pressed.
    Copy(Metric),
}

/// One `BeginGroup`..`EndGroup` span of the command list.
struct Group<'a> {
    title: &'a str,
    body: Vec<&'a FormCommand>,
}

fn split_groups(commands: &[FormCommand]) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    let mut current: Option<Group<'_>> = None;
    for cmd in commands {
        match cmd {
            FormCommand::BeginGroup { title } => {
                current = Some(Group {
                    title,
                    body: Vec::new(),
                });
            }
            FormCommand::EndGroup => groups.extend(current.take()),
            other => {
                if let Some(group) = current.as_mut() {
                    group.body.push(other);
                }
            }
        }
    }
    groups
}

/// Render a list of `FormCommand` as egui widgets.
///
/// `drafts` holds the text the user is typing per field; entries are created
/// from the command's formatted value on first sight.
pub fn render_form_commands(
    ui: &mut egui::Ui,
    commands: &[FormCommand],
    drafts: &mut HashMap<FieldId, String>,
    mode: ThemeMode,
) -> Vec<FormEvent> {
    let mut events = Vec::new();

    for group in split_groups(commands) {
        ui.add_space(16.0);
        ui.label(
            RichText::new(group.title)
                .heading()
                .color(theme::resolve(ThemeToken::GroupHeading, mode)),
        );

        egui::Grid::new(group.title)
            .num_columns(3)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for cmd in &group.body {
                    let FormCommand::Field {
                        id,
                        label,
                        value,
                        unit,
                        ..
                    } = cmd
                    else {
                        continue;
                    };
                    ui.label(
                        RichText::new(label.as_str())
                            .color(theme::resolve(ThemeToken::FieldLabel, mode)),
                    );
                    let draft = drafts.entry(*id).or_insert_with(|| value.clone());
                    let response = ui.add(
                        egui::TextEdit::singleline(draft)
                            .id_salt(id.as_str())
                            .desired_width(INPUT_WIDTH),
                    );
                    if response.changed() {
                        events.push(FormEvent::Edited(*id));
                    }
                    if response.lost_focus() {
                        // Show the canonical number once editing stops.
                        *draft = value.clone();
                    }
                    ui.label(
                        RichText::new(unit.suffix())
                            .color(theme::resolve(ThemeToken::UnitText, mode)),
                    );
                    ui.end_row();
                }
            });

        for cmd in &group.body {
            if let FormCommand::Output { metric, expression } = cmd
                && render_output(ui, expression, mode)
            {
                events.push(FormEvent::Copy(*metric));
            }
        }
    }

    events
}

/// Result box with a copy button. Returns whether the button was clicked.
fn render_output(ui: &mut egui::Ui, expression: &str, mode: ThemeMode) -> bool {
    let mut clicked = false;
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(1.0, theme::resolve(ThemeToken::OutputBorder, mode)))
        .corner_radius(egui::CornerRadius::same(5))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(expression)
                        .monospace()
                        .color(theme::resolve(ThemeToken::OutputText, mode)),
                );
                ui.add_space(24.0);
                let button = egui::Button::new(
                    RichText::new("Copy").color(theme::resolve(ThemeToken::CopyButtonText, mode)),
                )
                .fill(theme::resolve(ThemeToken::CopyButton, mode));
                clicked = ui.add(button).clicked();
            });
        });
    clicked
}
