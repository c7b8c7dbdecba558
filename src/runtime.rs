use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Which periodic activity fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum TimerKind {
    Clock,
    Reshuffle,
}

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick(TimerKind),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(AppEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    log::error!("terminal event reader stopped: {}", e);
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

#[derive(Clone, Copy, Debug)]
struct PeriodicTimer {
    kind: TimerKind,
    period: Duration,
    next_due: Instant,
}

/// Independent repeating timers sharing one event loop
#[derive(Clone, Debug)]
pub struct Schedule {
    timers: Vec<PeriodicTimer>,
}

impl Schedule {
    /// Each timer first fires one full period after `start`
    pub fn new(timers: &[(TimerKind, Duration)], start: Instant) -> Self {
        Self {
            timers: timers
                .iter()
                .map(|&(kind, period)| PeriodicTimer {
                    kind,
                    period,
                    next_due: start + period,
                })
                .collect(),
        }
    }

    /// The most overdue timer at `now`, re-armed for its next period.
    ///
    /// A timer that fell several periods behind fires once and is re-armed
    /// relative to `now`; missed ticks are not replayed.
    pub fn poll(&mut self, now: Instant) -> Option<TimerKind> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due <= now)
            .min_by_key(|t| t.next_due)?;

        timer.next_due += timer.period;
        if timer.next_due <= now {
            timer.next_due = now + timer.period;
        }
        Some(timer.kind)
    }

    /// How long until the next timer is due; `None` with no timers
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.next_due.saturating_duration_since(now))
            .min()
    }
}

// Upper bound on a single wait when no timer is configured
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    schedule: Schedule,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, schedule: Schedule) -> Self {
        Self {
            event_source,
            schedule,
        }
    }

    /// Blocks until the next input event or timer deadline, whichever comes first
    pub fn step(&mut self) -> AppEvent {
        loop {
            let now = Instant::now();
            if let Some(kind) = self.schedule.poll(now) {
                return AppEvent::Tick(kind);
            }

            let timeout = self.schedule.until_next(now).unwrap_or(IDLE_WAIT);
            match self.event_source.recv_timeout(timeout) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Timeout) => {}
                // input is gone; keep the timers running
                Err(RecvTimeoutError::Disconnected) => std::thread::sleep(timeout),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_kind_names() {
        assert_eq!(TimerKind::Clock.to_string(), "Clock");
        assert_eq!(TimerKind::Reshuffle.to_string(), "Reshuffle");
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let schedule = Schedule::new(
            &[(TimerKind::Clock, Duration::from_millis(1))],
            Instant::now(),
        );
        let mut runner = Runner::new(es, schedule);

        match runner.step() {
            AppEvent::Tick(TimerKind::Clock) => {}
            other => panic!("expected clock tick, got {other:?}"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let schedule = Schedule::new(
            &[(TimerKind::Clock, Duration::from_secs(10))],
            Instant::now(),
        );
        let mut runner = Runner::new(es, schedule);

        match runner.step() {
            AppEvent::Resize => {}
            other => panic!("expected Resize event, got {other:?}"),
        }
    }

    #[test]
    fn step_survives_disconnected_source() {
        let (tx, rx) = mpsc::channel();
        drop(tx);
        let schedule = Schedule::new(
            &[(TimerKind::Reshuffle, Duration::from_millis(2))],
            Instant::now(),
        );
        let mut runner = Runner::new(TestEventSource::new(rx), schedule);
        assert!(matches!(runner.step(), AppEvent::Tick(TimerKind::Reshuffle)));
    }

    #[test]
    fn timers_fire_independently() {
        let start = Instant::now();
        let mut schedule = Schedule::new(
            &[
                (TimerKind::Clock, Duration::from_millis(1_000)),
                (TimerKind::Reshuffle, Duration::from_millis(5_000)),
            ],
            start,
        );

        let mut fired = Vec::new();
        for ms in (0..=10_000u64).step_by(500) {
            let now = start + Duration::from_millis(ms);
            while let Some(kind) = schedule.poll(now) {
                fired.push(kind);
            }
        }

        let clocks = fired.iter().filter(|k| **k == TimerKind::Clock).count();
        let reshuffles = fired.iter().filter(|k| **k == TimerKind::Reshuffle).count();
        assert_eq!(clocks, 10);
        assert_eq!(reshuffles, 2);
    }

    #[test]
    fn nothing_due_before_first_period() {
        let start = Instant::now();
        let mut schedule = Schedule::new(&[(TimerKind::Clock, Duration::from_secs(1))], start);
        assert_eq!(schedule.poll(start + Duration::from_millis(999)), None);
        assert_eq!(
            schedule.until_next(start + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn late_timer_fires_once() {
        let start = Instant::now();
        let mut schedule = Schedule::new(&[(TimerKind::Clock, Duration::from_secs(1))], start);
        let late = start + Duration::from_secs(10);
        assert_eq!(schedule.poll(late), Some(TimerKind::Clock));
        assert_eq!(schedule.poll(late), None);
        assert_eq!(schedule.until_next(late), Some(Duration::from_secs(1)));
    }

    #[test]
    fn empty_schedule_has_no_deadline() {
        let schedule = Schedule::new(&[], Instant::now());
        assert_eq!(schedule.until_next(Instant::now()), None);
    }
}
