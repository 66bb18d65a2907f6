use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fluid_clamp_core::clipboard::{ClipboardSink, CopyOutcome, copy_expression};
use fluid_clamp_core::model::Session;
use fluid_clamp_core::number;
use fluid_clamp_core::views::render_form;
use fluid_clamp_protocol::{FieldId, FormCommand, ThemeToken};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::clipboard::SystemClipboard;

/// How long a status message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(3);
const LABEL_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 10;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::GroupHeading => Color::White,
        ThemeToken::FieldLabel => Color::Gray,
        ThemeToken::FieldValue => Color::White,
        ThemeToken::FieldFocus => Color::Rgb(75, 77, 104),
        ThemeToken::UnitText => Color::DarkGray,
        ThemeToken::OutputBorder => Color::Rgb(75, 77, 104),
        ThemeToken::OutputText => Color::Cyan,
        ThemeToken::CopyButton => Color::Rgb(75, 77, 104),
        ThemeToken::CopyButtonText => Color::White,
        ThemeToken::StatusOk => Color::Green,
        ThemeToken::StatusError => Color::Red,
    }
}

fn fg(token: ThemeToken) -> Style {
    Style::default().fg(theme_to_color(token))
}

/// Starting text when a field gains focus. Non-finite values start empty so
/// typed digits replace them.
fn draft_for(value: f64) -> String {
    if value.is_finite() {
        number::display(value)
    } else {
        String::new()
    }
}

/// Restores the terminal when dropped, including on early setup failures.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Interactive form state owned by the event loop.
struct FormState {
    session: Session,
    clipboard: Option<SystemClipboard>,
    focus: FieldId,
    /// Text being typed into the focused field.
    draft: String,
    commands: Vec<FormCommand>,
    status: Option<(String, ThemeToken, Instant)>,
}

enum Action {
    Continue,
    Quit,
}

impl FormState {
    fn new(session: Session, clipboard: Option<SystemClipboard>) -> Self {
        let focus = FieldId::PixelsPerRem;
        let draft = draft_for(session.field_value(focus));
        let mut state = Self {
            session,
            clipboard,
            focus,
            draft,
            commands: Vec::new(),
            status: None,
        };
        state.refresh();
        state
    }

    fn refresh(&mut self) {
        self.session.take_dirty();
        self.commands = render_form(&self.session, Some(self.focus));
    }

    fn move_focus(&mut self, to: FieldId) {
        self.focus = to;
        self.draft = draft_for(self.session.field_value(to));
        self.refresh();
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) {
        change(&mut self.draft);
        self.session.input(self.focus, &self.draft);
        if self.session.take_dirty() {
            self.commands = render_form(&self.session, Some(self.focus));
        }
    }

    fn copy_focused(&mut self) {
        let Some(metric) = self.focus.metric() else {
            self.set_status("Nothing to copy for required settings", ThemeToken::StatusError);
            return;
        };
        let sink = self
            .clipboard
            .as_mut()
            .map(|c| c as &mut dyn ClipboardSink);
        if let Some(outcome) = copy_expression(&self.session, metric, sink) {
            let token = match outcome {
                CopyOutcome::Copied(_) => ThemeToken::StatusOk,
                _ => ThemeToken::StatusError,
            };
            self.set_status(outcome.message(), token);
        }
    }

    fn set_status(&mut self, message: impl Into<String>, token: ThemeToken) {
        self.status = Some((message.into(), token, Instant::now()));
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Tab | KeyCode::Down => self.move_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focus.prev()),
            KeyCode::Enter => self.copy_focused(),
            KeyCode::Backspace => self.edit(|d| {
                d.pop();
            }),
            KeyCode::Char(c) if !c.is_control() => self.edit(|d| d.push(c)),
            _ => {}
        }
        Action::Continue
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.commands.len() + 8);
        for cmd in &self.commands {
            match cmd {
                FormCommand::BeginGroup { title } => {
                    lines.push(Line::from(Span::styled(
                        title.clone(),
                        fg(ThemeToken::GroupHeading).add_modifier(Modifier::BOLD),
                    )));
                }
                FormCommand::Field {
                    label,
                    value,
                    unit,
                    focused,
                    ..
                } => {
                    let shown = if *focused { &self.draft } else { value };
                    let value_style = if *focused {
                        fg(ThemeToken::FieldValue)
                            .bg(theme_to_color(ThemeToken::FieldFocus))
                            .add_modifier(Modifier::BOLD)
                    } else {
                        fg(ThemeToken::FieldValue)
                    };
                    lines.push(Line::from(vec![
                        Span::styled(format!("{label:>w$} ", w = LABEL_WIDTH), fg(ThemeToken::FieldLabel)),
                        Span::styled(format!("{shown:<w$}", w = VALUE_WIDTH), value_style),
                        Span::styled(format!(" {}", unit.suffix()), fg(ThemeToken::UnitText)),
                    ]));
                }
                FormCommand::Output { expression, .. } => {
                    lines.push(Line::from(vec![
                        Span::styled("  ▶ ", fg(ThemeToken::OutputBorder)),
                        Span::styled(expression.clone(), fg(ThemeToken::OutputText)),
                        Span::styled(
                            "  [Enter] copy",
                            fg(ThemeToken::CopyButtonText).bg(theme_to_color(ThemeToken::CopyButton)),
                        ),
                    ]));
                }
                FormCommand::EndGroup => lines.push(Line::default()),
            }
        }
        lines
    }

    fn status_line(&mut self) -> Line<'static> {
        if let Some((_, _, at)) = &self.status
            && at.elapsed() > STATUS_TTL
        {
            self.status = None;
        }
        match &self.status {
            Some((message, token, _)) => Line::from(Span::styled(message.clone(), fg(*token))),
            None => Line::from(Span::styled(
                "Tab/↑↓ move | type to edit | Enter copy | Esc quit",
                fg(ThemeToken::TextMuted),
            )),
        }
    }
}

/// Run the interactive form until the user quits.
pub fn run_form(session: Session) -> Result<()> {
    let clipboard = match SystemClipboard::open() {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    };
    let mut state = FormState::new(session, clipboard);

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, &mut state);

    drop(guard);
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut FormState,
) -> Result<()> {
    loop {
        let lines = state.lines();
        let status = state.status_line();
        terminal.draw(|frame| {
            let [body, footer] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

            let form = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(fg(ThemeToken::Border))
                    .title(Line::from(Span::styled(
                        " fluid-clamp ",
                        fg(ThemeToken::TextPrimary),
                    ))),
            );
            frame.render_widget(form, body);
            frame.render_widget(Paragraph::new(status), footer);
        })?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Action::Quit = state.handle_key(key)
            {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluid_clamp_protocol::{Bound, Metric};

    fn press(state: &mut FormState, code: KeyCode) -> Action {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn output(state: &FormState, wanted: Metric) -> String {
        state
            .commands
            .iter()
            .find_map(|c| match c {
                FormCommand::Output { metric, expression } if *metric == wanted => {
                    Some(expression.clone())
                }
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn typing_replaces_value_through_draft() {
        let mut state = FormState::new(Session::new(), None);
        assert_eq!(state.draft, "16");
        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.session.field_value(FieldId::PixelsPerRem), 0.0);
        press(&mut state, KeyCode::Char('1'));
        press(&mut state, KeyCode::Char('6'));
        assert_eq!(state.session.field_value(FieldId::PixelsPerRem), 16.0);
        assert_eq!(
            output(&state, Metric::FontSize),
            "clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)"
        );
    }

    #[test]
    fn focus_cycles_and_resets_draft() {
        let mut state = FormState::new(Session::new(), None);
        for _ in 0..3 {
            press(&mut state, KeyCode::Tab);
        }
        assert_eq!(state.focus, FieldId::Value(Metric::FontSize, Bound::Min));
        assert_eq!(state.draft, "1");
        press(&mut state, KeyCode::Up);
        assert_eq!(state.focus, FieldId::MaxWidthPx);
        assert_eq!(state.draft, "840");
    }

    #[test]
    fn copy_without_clipboard_reports_status() {
        let mut state = FormState::new(Session::new(), None);
        press(&mut state, KeyCode::Enter);
        assert!(state.status.as_ref().is_some_and(|(m, ..)| m.contains("required settings")));

        state.move_focus(FieldId::Value(Metric::LineHeight, Bound::Max));
        press(&mut state, KeyCode::Enter);
        let (message, token, _) = state.status.clone().unwrap();
        assert_eq!(message, "Clipboard not available");
        assert_eq!(token, ThemeToken::StatusError);
    }

    #[test]
    fn quit_keys() {
        let mut state = FormState::new(Session::new(), None);
        assert!(matches!(press(&mut state, KeyCode::Esc), Action::Quit));
        assert!(matches!(
            state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        ));
    }

    #[test]
    fn garbage_input_degrades_to_nan() {
        let mut state = FormState::new(Session::new(), None);
        state.move_focus(FieldId::Value(Metric::FontSize, Bound::Max));
        press(&mut state, KeyCode::Char('x'));
        assert!(output(&state, Metric::FontSize).contains("NaN"));
        assert!(!output(&state, Metric::LineHeight).contains("NaN"));
    }

    #[test]
    fn letters_are_typed_not_commands() {
        let mut state = FormState::new(Session::new(), None);
        state.move_focus(FieldId::Value(Metric::FontSize, Bound::Max));
        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.draft, "");
        for c in "Infinity".chars() {
            assert!(matches!(press(&mut state, KeyCode::Char(c)), Action::Continue));
        }
        assert_eq!(state.draft, "Infinity");
        assert_eq!(
            state.session.field_value(FieldId::Value(Metric::FontSize, Bound::Max)),
            f64::INFINITY
        );
        assert!(state.status.is_none());
    }

    #[test]
    fn non_finite_field_starts_with_empty_draft() {
        let mut state = FormState::new(Session::new(), None);
        let field = FieldId::Value(Metric::LineHeight, Bound::Min);
        state.move_focus(field);
        press(&mut state, KeyCode::Char('x'));
        assert!(state.session.field_value(field).is_nan());

        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::BackTab);
        assert_eq!(state.draft, "");
        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.session.field_value(field), 2.0);
    }

    #[test]
    fn terminal_guard_leaves_raw_mode_off() {
        // Without a tty `enter` fails; with one, dropping the guard restores.
        drop(TerminalGuard::enter());
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap_or(false));
    }
}
