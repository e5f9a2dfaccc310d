//! Blocking modal dialogs.
//!
//! A dialog takes over input until it resolves. [`run_modal`] runs a nested
//! event loop that keeps drawing the application underneath and keeps the
//! session ticker serviced, but hands every input event to the dialog only.

use crate::{
    app::{hit, App},
    error::Result,
    events::{EventSource, INPUT_POLL},
    theme::Palette,
};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use log::debug;
use ratatui::{
    layout::Margin,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::{Input, Key, TextArea};

const SOFT_RED: (Color, Color) = (Color::Rgb(0xFF, 0xCC, 0xCC), Color::Rgb(0x80, 0x00, 0x00));
const SOFT_TEAL: (Color, Color) = (Color::Rgb(0xCC, 0xDD, 0xDD), Color::Rgb(0x00, 0x33, 0x33));
pub(crate) const LAVENDER: (Color, Color) = (Color::Rgb(0xCC, 0xCC, 0xE6), Color::Rgb(0x33, 0x33, 0x66));
const MAX_WIDTH: u16 = 60;
const BUTTON_WIDTH: u16 = 20;

pub(crate) trait Modal {
    type Output;

    fn render(&mut self, frame: &mut Frame);

    /// Returns the dialog's answer once the event resolves it.
    fn handle(&mut self, event: &Event) -> Option<Self::Output>;
}

pub(crate) fn run_modal<B, E, M>(
    term: &mut Terminal<B>,
    events: &mut E,
    app: &mut App,
    mut modal: M,
) -> Result<M::Output>
where
    B: Backend,
    E: EventSource,
    M: Modal,
{
    loop {
        term.draw(|frame| {
            app.draw(frame);
            modal.render(frame);
        })?;
        if let Some(event) = events.next_event(INPUT_POLL)? {
            if let Some(output) = modal.handle(&event) {
                return Ok(output);
            }
        }
        app.service_ticker();
    }
}

fn is_press(event: &Event) -> bool {
    !matches!(event, Event::Key(key) if key.kind != KeyEventKind::Press)
}

fn clicked(event: &Event) -> Option<(u16, u16)> {
    match event {
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some((mouse.column, mouse.row))
        }
        _ => None,
    }
}

fn message_height(message: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    message
        .lines()
        .map(|l| l.chars().count().max(1).div_ceil(width))
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

struct Button<'a> {
    label: &'a str,
    colors: (Color, Color),
    focused: bool,
}

/// Draws two buttons side by side, centered in `area`, and returns their rects.
/// Nothing is drawn into an empty area.
fn render_buttons(frame: &mut Frame, area: Rect, buttons: [Button; 2]) -> [Rect; 2] {
    if area.width == 0 || area.height == 0 {
        return [Rect::default(); 2];
    }
    let width = BUTTON_WIDTH.min(area.width / 2);
    let start = area.x + area.width.saturating_sub(width * 2 + 2) / 2;
    let mut rects = [Rect::default(); 2];
    for (i, button) in buttons.into_iter().enumerate() {
        let rect = Rect {
            x: start + (width + 2) * i as u16,
            y: area.y,
            width,
            height: 1,
        }
        .intersection(area);
        rects[i] = rect;
        if rect.area() == 0 {
            continue;
        }
        let (bg, fg) = button.colors;
        let mut style = Style::default().fg(fg).bg(bg);
        if button.focused {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        frame.render_widget(
            Paragraph::new(button.label)
                .style(style)
                .alignment(Alignment::Center),
            rect,
        );
    }
    rects
}

/// Draws the dialog frame and message. Returns the area below the message.
fn render_frame(
    frame: &mut Frame,
    title: &str,
    message: &str,
    palette: &Palette,
    body_height: u16,
) -> Rect {
    let area = frame.size();
    let width = MAX_WIDTH.min(area.width.saturating_sub(4)).max(10);
    let text_height = message_height(message, width - 4);
    let dialog = centered(
        area,
        width,
        text_height.saturating_add(body_height).saturating_add(4),
    );
    let style = Style::default().fg(palette.title_fg).bg(palette.main_bg);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(style);
    let inner = block.inner(dialog).inner(&Margin {
        horizontal: 1,
        vertical: 1,
    });
    frame.render_widget(Clear, dialog);
    frame.render_widget(block, dialog);
    frame.render_widget(
        Paragraph::new(message).style(style).wrap(Wrap { trim: false }),
        Rect {
            height: text_height.min(inner.height),
            ..inner
        },
    );
    Rect {
        y: inner.y + text_height.min(inner.height),
        height: inner.height.saturating_sub(text_height),
        ..inner
    }
}

/// Yes/no question. Dismissing the dialog counts as "no".
pub(crate) struct ConfirmDialog {
    title: String,
    message: String,
    labels: (String, String),
    palette: Palette,
    affirmative_focused: bool,
    buttons: [Rect; 2],
}

impl ConfirmDialog {
    pub(crate) fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        labels: (&str, &str),
        palette: Palette,
    ) -> Self {
        ConfirmDialog {
            title: title.into(),
            message: message.into(),
            labels: (labels.0.to_string(), labels.1.to_string()),
            palette,
            affirmative_focused: true,
            buttons: [Rect::default(); 2],
        }
    }
}

impl Modal for ConfirmDialog {
    type Output = bool;

    fn render(&mut self, frame: &mut Frame) {
        let body = render_frame(frame, &self.title, &self.message, &self.palette, 1);
        self.buttons = render_buttons(
            frame,
            body,
            [
                Button {
                    label: &self.labels.0,
                    colors: SOFT_RED,
                    focused: self.affirmative_focused,
                },
                Button {
                    label: &self.labels.1,
                    colors: SOFT_TEAL,
                    focused: !self.affirmative_focused,
                },
            ],
        );
    }

    fn handle(&mut self, event: &Event) -> Option<bool> {
        if !is_press(event) {
            return None;
        }
        if let Some((column, row)) = clicked(event) {
            return if hit(self.buttons[0], column, row) {
                Some(true)
            } else if hit(self.buttons[1], column, row) {
                Some(false)
            } else {
                None
            };
        }
        let Event::Key(key) = event else {
            return None;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.code == KeyCode::Char('c')).then_some(false);
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.affirmative_focused = !self.affirmative_focused;
                None
            }
            KeyCode::Enter => Some(self.affirmative_focused),
            _ => None,
        }
    }
}

/// Single-line text prompt. Cancelling or submitting blank text gives `None`.
pub(crate) struct PromptDialog {
    title: String,
    message: String,
    submit: String,
    palette: Palette,
    editor: TextArea<'static>,
    buttons: [Rect; 2],
}

impl PromptDialog {
    pub(crate) fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        submit: &str,
        palette: Palette,
    ) -> Self {
        let mut editor = TextArea::default();
        editor.set_style(Style::default().fg(palette.default_fg).bg(palette.list_bg));
        editor.set_cursor_line_style(Style::default());
        editor.set_block(Block::default().borders(Borders::ALL));
        PromptDialog {
            title: title.into(),
            message: message.into(),
            submit: submit.to_string(),
            palette,
            editor,
            buttons: [Rect::default(); 2],
        }
    }

    fn submit(&self) -> Option<String> {
        let text = self.editor.lines().join(" ");
        let text = text.trim();
        debug!("Prompt submitted {text:?}");
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl Modal for PromptDialog {
    type Output = Option<String>;

    fn render(&mut self, frame: &mut Frame) {
        let body = render_frame(frame, &self.title, &self.message, &self.palette, 4);
        // Short terminals leave less room than the input and buttons need.
        let input = Rect { height: 3, ..body }.intersection(body);
        let buttons = Rect {
            y: body.y.saturating_add(3),
            height: 1,
            ..body
        }
        .intersection(body);
        if input.height == 3 {
            frame.render_widget(self.editor.widget(), input);
        }
        self.buttons = render_buttons(
            frame,
            buttons,
            [
                Button {
                    label: &self.submit,
                    colors: LAVENDER,
                    focused: false,
                },
                Button {
                    label: "Cancel",
                    colors: SOFT_RED,
                    focused: false,
                },
            ],
        );
    }

    fn handle(&mut self, event: &Event) -> Option<Option<String>> {
        if !is_press(event) {
            return None;
        }
        if let Some((column, row)) = clicked(event) {
            return if hit(self.buttons[0], column, row) {
                Some(self.submit())
            } else if hit(self.buttons[1], column, row) {
                Some(None)
            } else {
                None
            };
        }
        if !matches!(event, Event::Key(_)) {
            return None;
        }
        match Input::from(event.clone()) {
            Input { key: Key::Esc, .. }
            | Input {
                key: Key::Char('c'),
                ctrl: true,
                ..
            } => Some(None),
            Input {
                key: Key::Enter, ..
            } => Some(self.submit()),
            // Newline shortcuts; the prompt is single-line.
            Input {
                key: Key::Char('m' | 'j'),
                ctrl: true,
                ..
            } => None,
            input => {
                self.editor.input(input);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeRegistry;
    use crossterm::event::{KeyEvent, MouseEvent};
    use ratatui::backend::TestBackend;

    fn palette() -> Palette {
        *ThemeRegistry::builtin().palette()
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn confirm() -> ConfirmDialog {
        ConfirmDialog::new(
            "Confirm Delete",
            "Are you sure you want to delete task 'x'?",
            ("Yes, Delete", "No, Keep It"),
            palette(),
        )
    }

    #[test]
    fn confirm_keys() {
        assert_eq!(confirm().handle(&press(KeyCode::Char('y'))), Some(true));
        assert_eq!(confirm().handle(&press(KeyCode::Char('n'))), Some(false));
        assert_eq!(confirm().handle(&press(KeyCode::Esc)), Some(false));
        assert_eq!(confirm().handle(&press(KeyCode::Enter)), Some(true));

        let mut dialog = confirm();
        assert_eq!(dialog.handle(&press(KeyCode::Tab)), None);
        assert_eq!(dialog.handle(&press(KeyCode::Enter)), Some(false));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(confirm().handle(&ctrl_c), Some(false));
        assert_eq!(confirm().handle(&press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn confirm_buttons_are_clickable() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut dialog = confirm();
        terminal.draw(|f| dialog.render(f)).unwrap();
        let [yes, no] = dialog.buttons;
        assert!(yes.width > 0 && no.x > yes.x);

        let buffer = terminal.backend().buffer();
        let row: String = (0..80).map(|x| buffer.get(x, yes.y).symbol()).collect();
        assert!(row.contains("Yes, Delete") && row.contains("No, Keep It"), "{row}");

        assert_eq!(dialog.handle(&click(0, 0)), None);
        assert_eq!(dialog.handle(&click(no.x, no.y)), Some(false));
        assert_eq!(dialog.handle(&click(yes.x + 1, yes.y)), Some(true));
    }

    #[test]
    fn prompt_returns_trimmed_text() {
        let mut dialog = PromptDialog::new("Add Task", "Enter the new task:", "Add", palette());
        for c in " Buy milk ".chars() {
            assert_eq!(dialog.handle(&press(KeyCode::Char(c))), None);
        }
        assert_eq!(
            dialog.handle(&press(KeyCode::Enter)),
            Some(Some("Buy milk".to_string()))
        );
    }

    #[test]
    fn prompt_blank_or_cancelled_is_none() {
        let mut dialog = PromptDialog::new("Add Task", "Enter the new task:", "Add", palette());
        dialog.handle(&press(KeyCode::Char(' ')));
        assert_eq!(dialog.handle(&press(KeyCode::Enter)), Some(None));

        let mut dialog = PromptDialog::new("Add Task", "Enter the new task:", "Add", palette());
        dialog.handle(&press(KeyCode::Char('x')));
        assert_eq!(dialog.handle(&press(KeyCode::Esc)), Some(None));
    }

    #[test]
    fn prompt_cancel_button() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut dialog = PromptDialog::new("Set List Name", "Enter the new title:", "OK", palette());
        dialog.handle(&press(KeyCode::Char('x')));
        terminal.draw(|f| dialog.render(f)).unwrap();
        let [ok, cancel] = dialog.buttons;
        assert_eq!(dialog.handle(&click(cancel.x, cancel.y)), Some(None));
        assert_eq!(dialog.handle(&click(ok.x, ok.y)), Some(Some("x".to_string())));
    }

    #[test]
    fn dialog_uses_palette_captured_at_open() {
        let mut themes = ThemeRegistry::builtin();
        let mut dialog = confirm();
        themes.select("dark").unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| dialog.render(f)).unwrap();
        let calm = palette();
        let [yes, _] = dialog.buttons;
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.get(yes.x, yes.y - 2).bg, calm.main_bg);
    }

    #[test]
    fn dialogs_fit_any_terminal_size() {
        for width in [10, 29, 80, 200] {
            for height in 1..15 {
                let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
                let screen = Rect::new(0, 0, width, height);
                let mut prompt =
                    PromptDialog::new("Add Task", "Enter the new task:", "Add", palette());
                terminal.draw(|f| prompt.render(f)).unwrap();
                let mut dialog = confirm();
                terminal.draw(|f| dialog.render(f)).unwrap();
                for button in prompt.buttons.iter().chain(&dialog.buttons) {
                    assert!(
                        button.area() == 0 || button.intersection(screen) == *button,
                        "{width}x{height}: {button:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn huge_message_does_not_overflow_height() {
        let message = "x\n".repeat(70_000);
        assert_eq!(message_height(&message, 56), u16::MAX);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut dialog = ConfirmDialog::new("Big", message, ("Yes", "No"), palette());
        terminal.draw(|f| dialog.render(f)).unwrap();
    }

    #[test]
    fn wrapped_message_height() {
        assert_eq!(message_height("short", 20), 1);
        assert_eq!(message_height(&"x".repeat(41), 20), 3);
        assert_eq!(message_height("a\n\nb", 20), 3);
    }
}
