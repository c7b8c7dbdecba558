use std::time::Duration;

use crate::clock::Millis;

pub const DEFAULT_IDLE_THRESHOLD_MS: u64 = 3_000;
pub const DEFAULT_RESHUFFLE_INTERVAL_MS: u64 = 5_000;

/// When an idle user gets a fresh set of words.
///
/// The check is level-triggered: every tick looks at the current input and
/// the last activity time, nothing is remembered between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdlePolicy {
    /// Idle time that must be exceeded before a reshuffle
    pub threshold: Duration,
    /// How often the policy is checked; drives the reshuffle timer
    pub period: Duration,
}

impl Default for IdlePolicy {
    fn default() -> Self {
        Self {
            threshold: Duration::from_millis(DEFAULT_IDLE_THRESHOLD_MS),
            period: Duration::from_millis(DEFAULT_RESHUFFLE_INTERVAL_MS),
        }
    }
}

impl IdlePolicy {
    pub fn should_reshuffle(
        &self,
        input: &str,
        last_activity: Millis,
        now: Millis,
        displayed_len: usize,
    ) -> bool {
        let idle_ms = now.saturating_sub(last_activity);
        input.is_empty() && idle_ms > self.threshold_ms() && displayed_len > 0
    }

    /// The threshold in clock units, saturating for durations past `Millis::MAX`
    pub fn threshold_ms(&self) -> Millis {
        Millis::try_from(self.threshold.as_millis()).unwrap_or(Millis::MAX)
    }
}
