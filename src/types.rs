use std::fmt::Display;

use chrono::{DateTime, Utc};

/// Completion state of a task. A completion time exists only for done tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum TaskStatus {
    #[default]
    Pending,
    Done(DateTime<Utc>),
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            TaskStatus::Pending => ' ',
            TaskStatus::Done(_) => 'x',
        };
        write!(f, "[{c}]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Task {
    pub(crate) description: String,
    pub(crate) status: TaskStatus,
    pub(crate) created: DateTime<Utc>,
}

impl Task {
    pub(crate) fn new(description: String, created: DateTime<Utc>) -> Self {
        Task {
            description,
            status: TaskStatus::Pending,
            created,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        matches!(self.status, TaskStatus::Done(_))
    }

    #[cfg(test)]
    pub(crate) fn completed(&self) -> Option<DateTime<Utc>> {
        match self.status {
            TaskStatus::Done(at) => Some(at),
            TaskStatus::Pending => None,
        }
    }

    /// Flips the status. The completion time never precedes `created`.
    pub(crate) fn toggle(&mut self, now: DateTime<Utc>) {
        self.status = match self.status {
            TaskStatus::Pending => TaskStatus::Done(now.max(self.created)),
            TaskStatus::Done(_) => TaskStatus::Pending,
        };
    }
}
