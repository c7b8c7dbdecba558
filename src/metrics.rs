use crate::clock::Millis;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Words per minute for `match_count` completed words between `start` and `now`.
///
/// Zero when no time has passed or the clock ran backwards. The value is not
/// rounded; see [`format_wpm`] for display.
pub fn wpm(match_count: u64, start: Millis, now: Millis) -> f64 {
    let elapsed_minutes = (now - start) as f64 / MS_PER_MINUTE;
    if elapsed_minutes <= 0.0 {
        return 0.0;
    }
    match_count as f64 / elapsed_minutes
}

/// Title-bar rendering of a wpm value, one decimal place
pub fn format_wpm(wpm: f64) -> String {
    format!("Typing Speed: {:.1} WPM", wpm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_minute() {
        assert_eq!(wpm(30, 0, 60_000), 30.0);
    }

    #[test]
    fn test_half_minute() {
        assert_eq!(wpm(30, 0, 30_000), 60.0);
    }

    #[test]
    fn test_zero_elapsed() {
        assert_eq!(wpm(5, 0, 0), 0.0);
    }

    #[test]
    fn test_clock_moved_backwards() {
        assert_eq!(wpm(5, 10_000, 4_000), 0.0);
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(wpm(0, 0, 90_000), 0.0);
    }

    #[test]
    fn test_not_rounded() {
        let v = wpm(1, 0, 7_000);
        assert!((v - 60.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_shorter_elapsed_means_higher_wpm() {
        let slow = wpm(10, 0, 60_000);
        let fast = wpm(10, 0, 20_000);
        assert!(fast > slow);
    }

    #[test]
    fn test_absolute_timestamps() {
        let start = 1_700_000_000_000;
        assert_eq!(wpm(12, start, start + 120_000), 6.0);
    }

    #[test]
    fn test_format_wpm() {
        assert_eq!(format_wpm(0.0), "Typing Speed: 0.0 WPM");
        assert_eq!(format_wpm(42.06), "Typing Speed: 42.1 WPM");
    }
}
