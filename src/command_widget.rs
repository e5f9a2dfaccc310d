use crate::{
    commands::{parse_command, Command},
    error::Result,
    theme::Palette,
};
use ratatui::{
    prelude::{Rect, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::{Input, Key, TextArea};

const HINTS: &str =
    "a add | space toggle | d delete | r rename | t theme | : command | q done";

pub(crate) enum CommandMode {
    Idle,
    Editing,
}

/// Outcome of feeding one input to the command bar while editing.
#[derive(Debug)]
pub(crate) enum CommandInput {
    Pending,
    Cancelled,
    Submitted(Result<Command>),
}

pub(crate) struct CommandWidget {
    mode: CommandMode,
    editor: TextArea<'static>,
    notice: Option<String>,
}

impl Default for CommandWidget {
    fn default() -> Self {
        CommandWidget {
            mode: CommandMode::Idle,
            editor: TextArea::default(),
            notice: None,
        }
    }
}

impl CommandWidget {
    pub(crate) fn is_editing(&self) -> bool {
        matches!(self.mode, CommandMode::Editing)
    }

    pub(crate) fn focus(&mut self) {
        self.mode = CommandMode::Editing;
        self.notice = None;
    }

    /// Shows a one-line message until the next command starts.
    pub(crate) fn notify(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    #[cfg(test)]
    pub(crate) fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn input(&mut self, input: Input) -> CommandInput {
        match input {
            Input { key: Key::Esc, .. }
            | Input {
                key: Key::Char('c'),
                ctrl: true,
                ..
            } => {
                self.reset();
                CommandInput::Cancelled
            }
            Input {
                key: Key::Enter, ..
            } => {
                let line = self.editor.lines().join(" ");
                self.reset();
                CommandInput::Submitted(parse_command(&line))
            }
            // Single-line editor.
            Input {
                key: Key::Char('m'),
                ctrl: true,
                ..
            } => CommandInput::Pending,
            input => {
                self.editor.input(input);
                CommandInput::Pending
            }
        }
    }

    fn reset(&mut self) {
        self.mode = CommandMode::Idle;
        self.editor = TextArea::default();
    }

    pub(crate) fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let style = Style::default().fg(palette.title_fg).bg(palette.main_bg);
        let placeholder = match (&self.mode, &self.notice) {
            (CommandMode::Editing, _) => "Enter a command...".to_string(),
            (CommandMode::Idle, Some(notice)) => notice.clone(),
            (CommandMode::Idle, None) => HINTS.to_string(),
        };
        self.editor.set_style(style);
        self.editor.set_cursor_line_style(Style::default());
        self.editor.set_placeholder_style(style);
        self.editor.set_placeholder_text(placeholder);
        let title = if self.is_editing() { ":" } else { "" };
        self.editor
            .set_block(Block::default().title(title).borders(Borders::ALL).style(style));
        frame.render_widget(self.editor.widget(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn key(key: Key) -> Input {
        Input {
            key,
            ..Input::default()
        }
    }

    fn type_line(widget: &mut CommandWidget, text: &str) -> CommandInput {
        widget.focus();
        for c in text.chars() {
            assert!(matches!(
                widget.input(key(Key::Char(c))),
                CommandInput::Pending
            ));
        }
        widget.input(key(Key::Enter))
    }

    #[test]
    fn submit_parses_the_line() {
        let mut widget = CommandWidget::default();
        match type_line(&mut widget, "a Buy milk") {
            CommandInput::Submitted(Ok(command)) => {
                assert_eq!(command, Command::Add("Buy milk".into()))
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!widget.is_editing());
    }

    #[test]
    fn submit_reports_parse_errors() {
        let mut widget = CommandWidget::default();
        assert!(matches!(
            type_line(&mut widget, "bogus"),
            CommandInput::Submitted(Err(Error::Command(_)))
        ));
    }

    #[test]
    fn escape_discards_the_line() {
        let mut widget = CommandWidget::default();
        widget.focus();
        widget.input(key(Key::Char('q')));
        assert!(matches!(
            widget.input(key(Key::Esc)),
            CommandInput::Cancelled
        ));
        widget.focus();
        assert!(matches!(
            widget.input(key(Key::Enter)),
            CommandInput::Submitted(Err(_))
        ));
    }

    #[test]
    fn notices_clear_on_focus() {
        let mut widget = CommandWidget::default();
        widget.notify("Unknown theme 'x'");
        assert_eq!(widget.notice(), Some("Unknown theme 'x'"));
        widget.focus();
        assert_eq!(widget.notice(), None);
    }
}
