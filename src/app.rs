use crate::{
    clock::{Clock, ElapsedMode, SessionClock, SessionStats},
    command_widget::{CommandInput, CommandWidget},
    commands::Command,
    config::Config,
    error::Result,
    store::TaskStore,
    theme::{Palette, ThemeRegistry},
    types::Task,
    views::{
        home::draw_home,
        list::{build_rows, RowHit, Scroll, TaskListView},
    },
};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use ratatui::{layout::Rect, Frame};
use tui_textarea::Input;

/// Something the user asked for, however they asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Add,
    AddText(String),
    Toggle(usize),
    Delete(usize),
    Rename,
    RenameTo(String),
    SelectTheme(String),
    CycleTheme,
    Select(usize),
    Scroll(Scroll),
    Exit,
}

/// Clickable controls outside the task list, as laid out by the last draw.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct HitRegions {
    pub(crate) rename: Rect,
    pub(crate) theme: Rect,
    pub(crate) add: Rect,
    pub(crate) exit: Rect,
}

pub(crate) fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

pub(crate) struct App {
    pub(crate) store: TaskStore,
    pub(crate) themes: ThemeRegistry,
    pub(crate) title: String,
    pub(crate) list: TaskListView,
    pub(crate) stats: String,
    pub(crate) command: CommandWidget,
    pub(crate) hits: HitRegions,
    clock: Box<dyn Clock>,
    ticker: SessionClock,
    elapsed: ElapsedMode,
}

impl App {
    pub(crate) fn new(config: &Config, clock: Box<dyn Clock>, ticker: SessionClock) -> Result<App> {
        let mut themes = ThemeRegistry::builtin();
        let theme = themes.select(&config.theme)?;
        let title = config
            .title
            .clone()
            .unwrap_or_else(|| default_title(theme.name));
        let mut app = App {
            store: TaskStore::new(),
            themes,
            title,
            list: TaskListView::default(),
            stats: String::new(),
            command: CommandWidget::default(),
            hits: HitRegions::default(),
            clock,
            ticker,
            elapsed: config.elapsed,
        };
        app.rebuild();
        app.refresh_stats();
        Ok(app)
    }

    pub(crate) fn palette(&self) -> Palette {
        *self.themes.palette()
    }

    /// Recreates every visible row from the store and the current palette.
    pub(crate) fn rebuild(&mut self) {
        self.list
            .rebuild(build_rows(self.store.tasks(), self.themes.palette()));
    }

    pub(crate) fn session_stats(&self) -> SessionStats {
        SessionStats::collect(&self.store, self.clock.now(), self.elapsed)
    }

    pub(crate) fn refresh_stats(&mut self) {
        self.stats = self.session_stats().to_string();
    }

    /// Refreshes the statistics line if the ticker fired. Never rebuilds rows.
    pub(crate) fn service_ticker(&mut self) {
        if self.ticker.poll() {
            self.refresh_stats();
        }
    }

    pub(crate) fn task(&self, index: usize) -> Option<&Task> {
        self.store.get(index)
    }

    pub(crate) fn add_task(&mut self, description: &str) -> bool {
        match self.store.add(description, self.clock.now()) {
            Some(index) => {
                self.rebuild();
                self.list.select(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn toggle(&mut self, index: usize) {
        if self.store.toggle(index, self.clock.now()).is_some() {
            self.rebuild();
        }
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Task> {
        let task = self.store.remove(index)?;
        self.rebuild();
        Some(task)
    }

    pub(crate) fn rename(&mut self, title: &str) {
        let title = title.trim();
        if !title.is_empty() {
            info!("List renamed to {title:?}");
            self.title = title.to_string();
        }
    }

    pub(crate) fn select_theme(&mut self, name: &str) -> Result<()> {
        let theme = self.themes.select(name)?;
        self.title = default_title(theme.name);
        self.rebuild();
        Ok(())
    }

    pub(crate) fn cycle_theme(&mut self) {
        let theme = self.themes.cycle();
        self.title = default_title(theme.name);
        self.rebuild();
    }

    pub(crate) fn notify(&mut self, notice: impl Into<String>) {
        self.command.notify(notice);
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        draw_home(frame, self);
    }

    /// Translates raw input into an action. Command bar editing is handled here.
    pub(crate) fn action_for(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Press => None,
            Event::Key(_) if self.command.is_editing() => self.command_input(event),
            Event::Key(key) => self.key_action(key),
            Event::Mouse(mouse) => self.mouse_action(mouse),
            _ => None,
        }
    }

    fn command_input(&mut self, event: Event) -> Option<Action> {
        match self.command.input(Input::from(event)) {
            CommandInput::Pending | CommandInput::Cancelled => None,
            CommandInput::Submitted(Ok(command)) => {
                debug!("Command {command:?}");
                match command {
                    Command::Add(text) => Some(Action::AddText(text)),
                    Command::Toggle(row) => Command::index(row).map(Action::Toggle),
                    Command::Delete(row) => Command::index(row).map(Action::Delete),
                    Command::Rename(text) => Some(Action::RenameTo(text)),
                    Command::Theme(name) => Some(Action::SelectTheme(name)),
                    Command::Exit => Some(Action::Exit),
                }
            }
            CommandInput::Submitted(Err(e)) => {
                self.notify(e.to_string());
                None
            }
        }
    }

    fn key_action(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Exit),
                _ => None,
            };
        }
        let selected = self.list.selected();
        match key.code {
            KeyCode::Char('a') | KeyCode::Char('+') => Some(Action::Add),
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                selected.map(Action::Toggle)
            }
            KeyCode::Char('d') | KeyCode::Delete => selected.map(Action::Delete),
            KeyCode::Char('r') => Some(Action::Rename),
            KeyCode::Char('t') => Some(Action::CycleTheme),
            KeyCode::Char(':') => {
                self.command.focus();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Scroll(Scroll::Up)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Scroll(Scroll::Down)),
            KeyCode::PageUp => Some(Action::Scroll(Scroll::PageUp)),
            KeyCode::PageDown => Some(Action::Scroll(Scroll::PageDown)),
            KeyCode::Home => Some(Action::Scroll(Scroll::Top)),
            KeyCode::End => Some(Action::Scroll(Scroll::Bottom)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Exit),
            _ => None,
        }
    }

    fn mouse_action(&self, mouse: MouseEvent) -> Option<Action> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::Scroll(Scroll::Up)),
            MouseEventKind::ScrollDown => Some(Action::Scroll(Scroll::Down)),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row_hit) = self.list.row_at(column, row) {
                    return Some(match row_hit {
                        RowHit::Toggle(i) => Action::Toggle(i),
                        RowHit::Delete(i) => Action::Delete(i),
                        RowHit::Select(i) => Action::Select(i),
                    });
                }
                let hits = self.hits;
                if hit(hits.add, column, row) {
                    Some(Action::Add)
                } else if hit(hits.rename, column, row) {
                    Some(Action::Rename)
                } else if hit(hits.theme, column, row) {
                    Some(Action::CycleTheme)
                } else if hit(hits.exit, column, row) {
                    Some(Action::Exit)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

fn default_title(theme_name: &str) -> String {
    format!("{theme_name} To-Do List")
}
