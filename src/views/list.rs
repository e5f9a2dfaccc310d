use crate::{theme::Palette, types::Task};
use log::debug;
use ratatui::{
    layout::Margin,
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation,
        ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DELETE_GLYPH: &str = " ✕ ";
const CHECKBOX_WIDTH: u16 = 4;
const DELETE_WIDTH: u16 = 3;

/// Everything needed to draw one task, resolved against a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TaskRow {
    pub(crate) number: usize,
    pub(crate) text: String,
    pub(crate) done: bool,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

pub(crate) fn build_rows(tasks: &[Task], palette: &Palette) -> Vec<TaskRow> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let (fg, bg) = if t.is_done() {
                (palette.done_fg, palette.done_bg)
            } else {
                (palette.default_fg, palette.list_bg)
            };
            TaskRow {
                number: i + 1,
                text: t.description.clone(),
                done: t.is_done(),
                fg,
                bg,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowHit {
    Toggle(usize),
    Delete(usize),
    Select(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scroll {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// The rendered task list. Rows are replaced wholesale on every rebuild.
#[derive(Debug, Default)]
pub(crate) struct TaskListView {
    rows: Vec<TaskRow>,
    state: ListState,
    extent: usize,
    area: Rect,
    rebuilds: u64,
}

impl TaskListView {
    pub(crate) fn rebuild(&mut self, rows: Vec<TaskRow>) {
        self.rows = rows;
        self.extent = self.rows.len();
        self.rebuilds += 1;
        let selected = match (self.state.selected(), self.rows.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.state.select(selected);
        debug!("Rebuilt {} rows", self.extent);
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    #[cfg(test)]
    pub(crate) fn extent(&self) -> usize {
        self.extent
    }

    #[cfg(test)]
    pub(crate) fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub(crate) fn select(&mut self, index: usize) {
        if index < self.rows.len() {
            self.state.select(Some(index));
        }
    }

    pub(crate) fn scroll(&mut self, scroll: Scroll) {
        let Some(last) = self.rows.len().checked_sub(1) else {
            return;
        };
        let page = usize::from(self.area.height.max(1));
        let current = self.state.selected().unwrap_or(0);
        let next = match scroll {
            Scroll::Up => current.saturating_sub(1),
            Scroll::Down => current + 1,
            Scroll::PageUp => current.saturating_sub(page),
            Scroll::PageDown => current + page,
            Scroll::Top => 0,
            Scroll::Bottom => last,
        };
        self.state.select(Some(next.min(last)));
    }

    /// Maps a screen position from the last render to a row control.
    pub(crate) fn row_at(&self, column: u16, row: u16) -> Option<RowHit> {
        let area = self.area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let index = self.state.offset() + usize::from(row - area.y);
        if index >= self.rows.len() {
            return None;
        }
        let column = column - area.x;
        Some(if column < CHECKBOX_WIDTH {
            RowHit::Toggle(index)
        } else if column >= area.width.saturating_sub(DELETE_WIDTH) {
            RowHit::Delete(index)
        } else {
            RowHit::Select(index)
        })
    }

    pub(crate) fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(palette.title_fg).bg(palette.list_bg));
        self.area = block.inner(area);
        let width = usize::from(self.area.width);
        let items: Vec<ListItem> = self.rows.iter().map(|r| row_item(r, width)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.state);

        let mut scrollbar = ScrollbarState::new(self.extent).position(self.state.offset());
        frame.render_stateful_widget(
            Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight),
            area.inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar,
        );
    }
}

fn row_item(row: &TaskRow, width: usize) -> ListItem<'static> {
    let base = Style::default().fg(row.fg).bg(row.bg);
    let text_style = if row.done {
        base.add_modifier(Modifier::CROSSED_OUT)
    } else {
        base
    };
    let checkbox = if row.done { "[x] " } else { "[ ] " };
    let room = width.saturating_sub(usize::from(CHECKBOX_WIDTH + DELETE_WIDTH));
    let text = truncate_with_ellipsis(&row.text, room);
    let used = checkbox.width() + text.width() + DELETE_GLYPH.width();
    let padding = " ".repeat(width.saturating_sub(used));
    let line = Line::from(vec![
        Span::styled(checkbox, base),
        Span::styled(text, text_style),
        Span::styled(padding, base),
        Span::styled(DELETE_GLYPH, base.fg(Color::Rgb(0x80, 0x00, 0x00))),
    ]);
    ListItem::new(line).style(base)
}

/// Cuts `text` to at most `max_width` terminal columns, marking the cut with `…`.
fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let next = used + ch.width().unwrap_or(0);
        if next + 1 > max_width {
            break;
        }
        truncated.push(ch);
        used = next;
    }
    truncated.push('…');
    truncated
}
