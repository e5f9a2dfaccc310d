use crate::{
    app::{Action, App, HitRegions},
    error::Result,
    events::{EventSource, INPUT_POLL},
    views::dialog::{run_modal, ConfirmDialog, PromptDialog, LAVENDER},
};
use log::{debug, info};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
    Frame,
};

const SET_NAME: &str = " Set Name ";
const ADD_LABEL: &str = "Add Task: ";
const ADD_BUTTON: &str = " + ";
const EXIT_LABEL: &str = "Done with all the tasks";

enum Flow {
    Continue,
    Exit,
}

/// Runs the main screen until the user confirms the exit dialog.
pub(crate) fn run<B, E>(term: &mut Terminal<B>, events: &mut E, app: &mut App) -> Result<()>
where
    B: Backend,
    E: EventSource,
{
    loop {
        term.draw(|frame| app.draw(frame))?;
        if let Some(event) = events.next_event(INPUT_POLL)? {
            if let Some(action) = app.action_for(event) {
                debug!("Dispatching {action:?}");
                if let Flow::Exit = dispatch(term, events, app, action)? {
                    break;
                }
            }
        }
        app.service_ticker();
    }
    info!("Session ended");
    Ok(())
}

fn dispatch<B, E>(
    term: &mut Terminal<B>,
    events: &mut E,
    app: &mut App,
    action: Action,
) -> Result<Flow>
where
    B: Backend,
    E: EventSource,
{
    match action {
        Action::Add => {
            let dialog = PromptDialog::new("Add Task", "Enter the new task:", "Add", app.palette());
            if let Some(text) = run_modal(term, events, app, dialog)? {
                app.add_task(&text);
            }
        }
        Action::AddText(text) => {
            if !app.add_task(&text) {
                app.notify("Nothing to add");
            }
        }
        Action::Toggle(index) => app.toggle(index),
        Action::Delete(index) => {
            let Some(task) = app.task(index) else {
                return Ok(Flow::Continue);
            };
            let dialog = ConfirmDialog::new(
                "Confirm Delete",
                format!(
                    "Are you sure you want to delete task '{}'?",
                    task.description
                ),
                ("Yes, Delete", "No, Keep It"),
                app.palette(),
            );
            if run_modal(term, events, app, dialog)? {
                app.remove(index);
            }
        }
        Action::Rename => {
            let dialog = PromptDialog::new(
                "Set List Name",
                "Enter the new title for your To-Do List:",
                "OK",
                app.palette(),
            );
            if let Some(title) = run_modal(term, events, app, dialog)? {
                app.rename(&title);
            }
        }
        Action::RenameTo(title) => app.rename(&title),
        Action::SelectTheme(name) => {
            if let Err(e) = app.select_theme(&name) {
                let names: Vec<_> = app.themes.names().collect();
                app.notify(format!("{e}. Themes: {}", names.join(", ")));
            }
        }
        Action::CycleTheme => app.cycle_theme(),
        Action::Select(index) => app.list.select(index),
        Action::Scroll(scroll) => app.list.scroll(scroll),
        Action::Exit => {
            let stats = app.session_stats();
            let dialog = ConfirmDialog::new(
                "Session Complete & Exit",
                stats.summary(),
                ("Yes, End Session", "Cancel"),
                app.palette(),
            );
            if run_modal(term, events, app, dialog)? {
                return Ok(Flow::Exit);
            }
        }
    }
    Ok(Flow::Continue)
}

pub(crate) fn draw_home(frame: &mut Frame, app: &mut App) {
    let palette = app.palette();
    let area = frame.size();
    let base = Style::default().fg(palette.title_fg).bg(palette.main_bg);
    frame.render_widget(Block::default().style(base), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let theme_label = format!(" Theme: {} ", app.themes.current().name);
    let title_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(SET_NAME.len() as u16),
            Constraint::Length(1),
            Constraint::Length(theme_label.chars().count() as u16),
        ])
        .split(chunks[0]);
    frame.render_widget(
        Paragraph::new(app.title.as_str()).style(base.add_modifier(Modifier::BOLD)),
        title_row[0],
    );
    let (bg, fg) = LAVENDER;
    frame.render_widget(
        Paragraph::new(SET_NAME).style(Style::default().fg(fg).bg(bg)),
        title_row[1],
    );
    frame.render_widget(
        Paragraph::new(theme_label).style(base.add_modifier(Modifier::UNDERLINED)),
        title_row[3],
    );

    frame.render_widget(Paragraph::new(app.stats.as_str()).style(base), chunks[1]);

    let add_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(ADD_LABEL.len() as u16),
            Constraint::Length(ADD_BUTTON.len() as u16),
        ])
        .split(chunks[2]);
    frame.render_widget(Paragraph::new(ADD_LABEL).style(base), add_row[1]);
    frame.render_widget(
        Paragraph::new(ADD_BUTTON).style(
            Style::default()
                .fg(palette.title_fg)
                .bg(palette.add_btn_bg)
                .add_modifier(Modifier::BOLD),
        ),
        add_row[2],
    );

    app.list.render(frame, chunks[3], &palette);

    frame.render_widget(
        Paragraph::new(EXIT_LABEL)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.exit_btn_fg).bg(palette.exit_btn_bg)),
        chunks[4],
    );

    app.command.render(frame, chunks[5], &palette);

    app.hits = HitRegions {
        rename: title_row[1],
        theme: title_row[3],
        add: add_row[2],
        exit: chunks[4],
    };
}
