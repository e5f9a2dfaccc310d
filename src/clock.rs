use std::{fmt::Display, time::Duration as StdDuration, time::Instant};

use crate::store::TaskStore;
use chrono::{DateTime, Duration, Utc};
use crossbeam::channel::{never, tick, Receiver};
use serde::Deserialize;

pub(crate) trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Which creation time the elapsed counter measures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ElapsedMode {
    /// Earliest task still in the list. Drops to zero once the list is empty.
    #[default]
    Present,
    /// First task added this session, whether or not it still exists.
    Session,
}

/// Fixed-rate ticker driving the statistics line. The next tick is due one
/// period after the previous one fired.
pub(crate) struct SessionClock {
    ticker: Receiver<Instant>,
}

impl SessionClock {
    pub(crate) fn every(period: StdDuration) -> Self {
        SessionClock {
            ticker: tick(period),
        }
    }

    pub(crate) fn paused() -> Self {
        SessionClock { ticker: never() }
    }

    /// Returns true once per elapsed period. Missed ticks collapse into one.
    pub(crate) fn poll(&self) -> bool {
        self.ticker.try_recv().is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionStats {
    pub(crate) completed: usize,
    pub(crate) total: usize,
    pub(crate) max_added: usize,
    pub(crate) elapsed: Duration,
}

impl SessionStats {
    pub(crate) fn collect(store: &TaskStore, now: DateTime<Utc>, mode: ElapsedMode) -> Self {
        let since = match mode {
            ElapsedMode::Present => store.earliest_created(),
            ElapsedMode::Session => store.first_created(),
        };
        let elapsed = since
            .map(|start| (now - start).max(Duration::zero()))
            .unwrap_or_else(Duration::zero);
        SessionStats {
            completed: store.completed_count(),
            total: store.len(),
            max_added: store.high_water(),
            elapsed,
        }
    }

    pub(crate) fn summary(&self) -> String {
        format!(
            "Session Summary:\n\nTasks added (Max): {}\nTotal session duration: {}\n\nAre you sure you want to end the session?",
            self.max_added,
            format_elapsed(self.elapsed)
        )
    }
}

impl Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Completed: {} / {} | Elapsed: {}",
            self.completed,
            self.total,
            format_elapsed(self.elapsed)
        )
    }
}

pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}


#[cfg(test)]
mod tests {
    use super::{testing::ManualClock, *};

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(Duration::zero()), "00:00:00");
        assert_eq!(format_elapsed(Duration::seconds(3_725)), "01:02:05");
        assert_eq!(format_elapsed(Duration::hours(101)), "101:00:00");
        assert_eq!(format_elapsed(Duration::seconds(-4)), "00:00:00");
    }

    #[test]
    fn stats_line_counts_completed_tasks() {
        let clock = ManualClock::new();
        let mut store = TaskStore::new();
        store.add("a", clock.now());
        clock.advance(10);
        store.add("b", clock.now());
        store.toggle(1, clock.now());
        clock.advance(65);
        let stats = SessionStats::collect(&store, clock.now(), ElapsedMode::Present);
        assert_eq!(stats.to_string(), "Completed: 1 / 2 | Elapsed: 00:01:15");
        assert_eq!(stats.max_added, 2);
    }

    #[test]
    fn present_mode_resets_when_list_empties() {
        let clock = ManualClock::new();
        let mut store = TaskStore::new();
        store.add("a", clock.now());
        clock.advance(42);
        store.remove(0);
        let stats = SessionStats::collect(&store, clock.now(), ElapsedMode::Present);
        assert_eq!(stats.elapsed, Duration::zero());
        assert_eq!(stats.max_added, 1);
    }

    #[test]
    fn session_mode_survives_deletion() {
        let clock = ManualClock::new();
        let mut store = TaskStore::new();
        store.add("a", clock.now());
        clock.advance(42);
        store.remove(0);
        let stats = SessionStats::collect(&store, clock.now(), ElapsedMode::Session);
        assert_eq!(stats.elapsed, Duration::seconds(42));
    }

    #[test]
    fn summary_lists_high_water_and_duration() {
        let clock = ManualClock::new();
        let mut store = TaskStore::new();
        store.add("a", clock.now());
        store.add("b", clock.now());
        store.remove(0);
        clock.advance(5);
        let summary = SessionStats::collect(&store, clock.now(), ElapsedMode::Present).summary();
        assert!(summary.contains("Tasks added (Max): 2"));
        assert!(summary.contains("Total session duration: 00:00:05"));
    }

    #[test]
    fn paused_clock_never_ticks() {
        assert!(!SessionClock::paused().poll());
    }

    #[test]
    fn running_clock_ticks_after_period() {
        let clock = SessionClock::every(StdDuration::from_millis(10));
        std::thread::sleep(StdDuration::from_millis(25));
        assert!(clock.poll());
        assert!(!clock.poll());
    }
}
