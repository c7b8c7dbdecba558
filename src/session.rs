use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::clock::{Clock, Millis, SystemClock};
use crate::matcher::{self, Match};
use crate::metrics;
use crate::observer::{SessionEvent, SessionObserver};
use crate::pool::WordPool;
use crate::reshuffle::IdlePolicy;

pub const DEFAULT_DISPLAY_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// How many target words are on screen at once
    pub display_size: usize,
    pub idle: IdlePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            display_size: DEFAULT_DISPLAY_SIZE,
            idle: IdlePolicy::default(),
        }
    }
}

/// What a finished run amounted to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub matches: u64,
    pub elapsed_ms: Millis,
    pub wpm: f64,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} words in {:.1}s ({:.1} wpm)",
            self.matches,
            self.elapsed_ms.max(0) as f64 / 1000.0,
            self.wpm
        )
    }
}

/// The word-session state machine.
///
/// Owns the displayed words, the input buffer, the match count and the
/// timestamps. Every mutation goes through one of the `on_*` methods and is
/// reported to subscribed observers before the method returns.
pub struct Session<R = StdRng, C = SystemClock> {
    pool: WordPool,
    displayed: Vec<String>,
    input: String,
    match_count: u64,
    started_at: Millis,
    now: Millis,
    last_activity: Millis,
    idle: IdlePolicy,
    rng: R,
    clock: C,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl<R: Rng, C: Clock> Session<R, C> {
    pub fn new(pool: WordPool, config: &SessionConfig, mut rng: R, clock: C) -> Self {
        let displayed = pool.sample(&mut rng, config.display_size);
        let started_at = clock.now_ms();

        Self {
            pool,
            displayed,
            input: String::new(),
            match_count: 0,
            started_at,
            now: started_at,
            last_activity: started_at,
            idle: config.idle,
            rng,
            clock,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It is immediately sent a `Started` snapshot of
    /// the current words so late subscribers render the same state.
    pub fn subscribe<O: SessionObserver + 'static>(&mut self, observer: O) {
        let mut observer = Box::new(observer);
        observer.on_event(&SessionEvent::Started {
            displayed: self.displayed.clone(),
        });
        self.observers.push(observer);
    }

    /// Full content of the input field after a keystroke
    pub fn on_text_changed(&mut self, text: &str) -> Option<Match> {
        self.input.clear();
        self.input.push_str(text);
        self.last_activity = self.clock.now_ms();
        self.notify(SessionEvent::InputChanged {
            input: self.input.clone(),
        });

        let found = matcher::evaluate(&self.input, &self.displayed)?;
        self.complete_at(found.index);
        Some(found)
    }

    /// Retire the first displayed occurrence of `word`, returning its slot.
    /// Nothing changes when the word is not on screen.
    pub fn on_match(&mut self, word: &str) -> Option<usize> {
        let index = self.displayed.iter().position(|w| w == word)?;
        self.complete_at(index);
        Some(index)
    }

    /// Replace every displayed word with an independent random pick.
    /// Repeats are possible; this is not a permutation of the old set.
    pub fn on_idle_reshuffle(&mut self) {
        let pool = &self.pool;
        let rng = &mut self.rng;
        for slot in self.displayed.iter_mut() {
            *slot = pool.pick(rng);
        }
        self.notify(SessionEvent::Reshuffled {
            displayed: self.displayed.clone(),
        });
    }

    /// Periodic idle check; returns whether the words were reshuffled
    pub fn on_reshuffle_tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        if self
            .idle
            .should_reshuffle(&self.input, self.last_activity, now, self.displayed.len())
        {
            self.on_idle_reshuffle();
            true
        } else {
            false
        }
    }

    /// Periodic clock refresh driving the wpm display
    pub fn on_clock_tick(&mut self) {
        // displayed time never runs backwards
        self.now = self.now.max(self.clock.now_ms());
        self.notify(SessionEvent::ClockTick { wpm: self.wpm() });
    }

    pub fn wpm(&self) -> f64 {
        metrics::wpm(self.match_count, self.started_at, self.now)
    }

    pub fn summary(&self) -> SessionSummary {
        let end = self.now.max(self.clock.now_ms());
        SessionSummary {
            matches: self.match_count,
            elapsed_ms: end - self.started_at,
            wpm: metrics::wpm(self.match_count, self.started_at, end),
        }
    }

    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn match_count(&self) -> u64 {
        self.match_count
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn last_activity(&self) -> Millis {
        self.last_activity
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    /// How often `on_reshuffle_tick` should be called
    pub fn reshuffle_period(&self) -> Duration {
        self.idle.period
    }

    fn complete_at(&mut self, index: usize) {
        let word = self.displayed.remove(index);
        let replacement = self.pool.pick(&mut self.rng);
        self.displayed.push(replacement);
        self.match_count += 1;
        self.input.clear();
        self.notify(SessionEvent::Matched { index, word });
    }

    fn notify(&mut self, event: SessionEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(&event);
        }
    }
}

impl<R, C> fmt::Debug for Session<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("displayed", &self.displayed)
            .field("input", &self.input)
            .field("match_count", &self.match_count)
            .field("started_at", &self.started_at)
            .field("now", &self.now)
            .field("last_activity", &self.last_activity)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
