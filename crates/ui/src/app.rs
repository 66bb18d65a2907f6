use std::collections::HashMap;
use std::time::Duration;

use eframe::egui;
use fluid_clamp_core::clipboard::{ClipboardError, ClipboardSink, CopyOutcome, copy_expression};
use fluid_clamp_core::model::Session;
use fluid_clamp_core::views::render_form;
use fluid_clamp_protocol::{FieldId, FormCommand, ThemeToken};

use crate::renderer::{self, FormEvent};
use crate::theme::{self, ThemeMode};

/// Seconds a toast stays visible.
const TOAST_SECONDS: f64 = 2.5;

/// Clipboard writes go through egui's platform integration.
struct EguiClipboard<'a> {
    ctx: &'a egui::Context,
}

impl ClipboardSink for EguiClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.copy_text(text.to_owned());
        Ok(())
    }
}

struct Toast {
    message: String,
    token: ThemeToken,
    shown_at: f64,
}

/// Main application state.
pub struct ClampApp {
    session: Session,
    /// Cached form description (rebuilt when the session is dirty).
    commands: Vec<FormCommand>,
    /// Raw text per input, so partially typed numbers survive redraws.
    drafts: HashMap<FieldId, String>,
    theme_mode: ThemeMode,
    toast: Option<Toast>,
}

impl ClampApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme_mode = ThemeMode::Dark;
        cc.egui_ctx.set_visuals(theme_mode.visuals());
        theme::apply_typography(&cc.egui_ctx);

        Self {
            session: Session::new(),
            commands: Vec::new(),
            drafts: HashMap::new(),
            theme_mode,
            toast: None,
        }
    }

    fn handle_event(&mut self, ctx: &egui::Context, event: FormEvent) {
        match event {
            FormEvent::Edited(field) => {
                if let Some(raw) = self.drafts.get(&field) {
                    self.session.input(field, raw);
                }
            }
            FormEvent::Copy(metric) => {
                let mut clipboard = EguiClipboard { ctx };
                if let Some(outcome) = copy_expression(&self.session, metric, Some(&mut clipboard))
                {
                    let token = match outcome {
                        CopyOutcome::Copied(_) => ThemeToken::StatusOk,
                        _ => {
                            tracing::warn!(
                                %metric,
                                message = %outcome.message(),
                                "copy did not reach clipboard"
                            );
                            ThemeToken::StatusError
                        }
                    };
                    self.toast = Some(Toast {
                        message: outcome.message(),
                        token,
                        shown_at: ctx.input(|i| i.time),
                    });
                }
            }
        }
    }

    fn expire_toast(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        if let Some(toast) = &self.toast {
            if now - toast.shown_at > TOAST_SECONDS {
                self.toast = None;
            } else {
                ctx.request_repaint_after(Duration::from_millis(250));
            }
        }
    }
}

impl eframe::App for ClampApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.take_dirty() || self.commands.is_empty() {
            self.commands = render_form(&self.session, None);
        }
        self.expire_toast(ctx);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("fluid-clamp")
                        .heading()
                        .color(theme::resolve(ThemeToken::TextPrimary, self.theme_mode)),
                );
                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Dark",
                    ThemeMode::Light => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    tracing::debug!(mode = ?self.theme_mode, "theme toggled");
                    ctx.set_visuals(self.theme_mode.visuals());
                }
            });
        });

        // Toast area
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| match &self.toast {
                Some(toast) => {
                    ui.colored_label(
                        theme::resolve(toast.token, self.theme_mode),
                        toast.message.as_str(),
                    );
                }
                None => {
                    ui.label(
                        egui::RichText::new("Edit a value; the expression updates as you type")
                            .small()
                            .color(theme::resolve(ThemeToken::TextMuted, self.theme_mode)),
                    );
                }
            });
        });

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| {
                        renderer::render_form_commands(
                            ui,
                            &self.commands,
                            &mut self.drafts,
                            self.theme_mode,
                        )
                    })
                    .inner
            })
            .inner;

        for event in events {
            self.handle_event(ctx, event);
        }
        if self.session.take_dirty() {
            self.commands = render_form(&self.session, None);
            ctx.request_repaint();
        }
    }
}
