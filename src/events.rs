use crate::error::Result;
use crossterm::event::{self, Event};
use std::time::Duration;

/// Upper bound on how long the UI waits for input before servicing the ticker.
pub(crate) const INPUT_POLL: Duration = Duration::from_millis(100);

pub(crate) trait EventSource {
    /// Waits up to `timeout` for the next input event.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

pub(crate) struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{testing::ScriptedEvents, EventSource, INPUT_POLL};
    use crate::error::Error;
    use crossterm::event::KeyCode;
    use std::io::ErrorKind;

    #[test]
    fn scripted_events_replay_then_fail_with_eof() {
        let mut events = ScriptedEvents::new().key(KeyCode::Char('q'));
        assert!(matches!(events.next_event(INPUT_POLL), Ok(Some(_))));
        assert_eq!(events.remaining(), 0);
        assert!(matches!(
            events.next_event(INPUT_POLL),
            Err(Error::Io(e)) if e.kind() == ErrorKind::UnexpectedEof
        ));
    }
}
