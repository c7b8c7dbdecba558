use std::cell::Cell;
use std::rc::Rc;

use itertools::Itertools;

/// Something that changed in a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { displayed: Vec<String> },
    InputChanged { input: String },
    Matched { index: usize, word: String },
    Reshuffled { displayed: Vec<String> },
    ClockTick { wpm: f64 },
}

/// Receives every session change synchronously, before the mutating call returns
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

/// Marks the screen dirty whenever the session changes.
///
/// Clones share the flag; the event loop keeps one and redraws when it is set.
#[derive(Clone, Debug, Default)]
pub struct RedrawFlag {
    dirty: Rc<Cell<bool>>,
}

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) {
        self.dirty.set(true);
    }

    /// Returns whether a redraw was requested and clears the request
    pub fn take(&self) -> bool {
        self.dirty.replace(false)
    }
}

impl SessionObserver for RedrawFlag {
    fn on_event(&mut self, _event: &SessionEvent) {
        self.mark();
    }
}

/// Writes session changes to the log
#[derive(Debug, Default)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Started { displayed } => {
                log::info!("session started with [{}]", displayed.iter().join(", "));
            }
            SessionEvent::InputChanged { input } => log::trace!("input {:?}", input),
            SessionEvent::Matched { index, word } => {
                log::debug!("matched {:?} at slot {}", word, index);
            }
            SessionEvent::Reshuffled { displayed } => {
                log::debug!("idle reshuffle -> [{}]", displayed.iter().join(", "));
            }
            SessionEvent::ClockTick { wpm } => log::trace!("tick, {:.2} wpm", wpm),
        }
    }
}
