use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::Rng;

use crate::clock::{Clock, SystemClock};
use crate::observer::{LogObserver, RedrawFlag};
use crate::runtime::{AppEvent, TimerKind};
use crate::session::Session;

/// The typing screen: a session plus the bits of UI state around it
#[derive(Debug)]
pub struct App<R = StdRng, C = SystemClock> {
    pub session: Session<R, C>,
    redraw: RedrawFlag,
    should_quit: bool,
}

impl<R: Rng, C: Clock> App<R, C> {
    pub fn new(mut session: Session<R, C>) -> Self {
        let redraw = RedrawFlag::new();
        session.subscribe(redraw.clone());
        session.subscribe(LogObserver);

        Self {
            session,
            redraw,
            should_quit: false,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        if let AppEvent::Tick(kind) = event {
            log::trace!("{kind} tick");
        }
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize => self.redraw.mark(),
            AppEvent::Tick(TimerKind::Clock) => self.session.on_clock_tick(),
            AppEvent::Tick(TimerKind::Reshuffle) => {
                self.session.on_reshuffle_tick();
            }
        }
    }

    /// Translate a key press into the new full content of the input field
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let mut text = self.session.input().to_string();

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            // ctrl+u clears the field
            KeyCode::Char('u') if ctrl => text.clear(),
            KeyCode::Char(_) if ctrl => return,
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return,
        }

        // the field only reports real changes
        if text != self.session.input() {
            self.session.on_text_changed(&text);
        }
    }

    /// Whether anything changed since the last call
    pub fn needs_redraw(&self) -> bool {
        self.redraw.take()
    }

    pub fn request_redraw(&self) {
        self.redraw.mark();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
