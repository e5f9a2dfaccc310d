use crate::types::Task;
use chrono::{DateTime, Utc};
use log::debug;

/// Ordered, in-memory task list. Positions are the only task identity, so
/// removing a task shifts every later index down by one.
#[derive(Debug, Default)]
pub(crate) struct TaskStore {
    tasks: Vec<Task>,
    high_water: usize,
    first_created: Option<DateTime<Utc>>,
}

impl TaskStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a pending task. Blank descriptions are declined with `None`.
    pub(crate) fn add(&mut self, description: &str, now: DateTime<Utc>) -> Option<usize> {
        let description = description.trim_end_matches(['\r', '\n']);
        if description.trim().is_empty() {
            debug!("Declined blank task description");
            return None;
        }
        self.tasks.push(Task::new(description.to_string(), now));
        self.high_water = self.high_water.max(self.tasks.len());
        self.first_created.get_or_insert(now);
        let index = self.tasks.len() - 1;
        debug!("Added task {index}: {description:?}");
        Some(index)
    }

    pub(crate) fn toggle(&mut self, index: usize, now: DateTime<Utc>) -> Option<&Task> {
        let task = self.tasks.get_mut(index)?;
        task.toggle(now);
        debug!("Toggled task {index}, now {}", task.status);
        Some(task)
    }

    /// Removes the task at `index`. Callers confirm with the user first.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            return None;
        }
        let task = self.tasks.remove(index);
        debug!("Removed task {index}: {:?}", task.description);
        Some(task)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_done()).count()
    }

    /// Earliest creation time among the tasks currently present.
    pub(crate) fn earliest_created(&self) -> Option<DateTime<Utc>> {
        self.tasks.iter().map(|t| t.created).min()
    }

    /// Creation time of the first task added this session, even if deleted.
    pub(crate) fn first_created(&self) -> Option<DateTime<Utc>> {
        self.first_created
    }

    /// Largest number of tasks held at once during this session.
    pub(crate) fn high_water(&self) -> usize {
        self.high_water
    }
}
