use std::time::Duration;

use crate::types::MAX_RECONNECT_DELAY;

/// Capped exponential backoff schedule for reconnection.
///
/// Attempt `n` (1-based) waits `min(interval * 2^(n-1), 30_000)` ms.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    interval_ms: u64,
}

impl Backoff {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    /// Delay for the given 1-based attempt number.
    pub fn delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(63);
        let raw = self
            .interval_ms
            .checked_shl(exp)
            .unwrap_or(MAX_RECONNECT_DELAY);
        Duration::from_millis(raw.min(MAX_RECONNECT_DELAY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_until_cap() {
        let backoff = Backoff::new(3_000);
        let delays: Vec<u64> = (1..=7).map(|n| backoff.delay(n).as_millis() as u64).collect();
        assert_eq!(delays, vec![3_000, 6_000, 12_000, 24_000, 30_000, 30_000, 30_000]);
    }

    #[test]
    fn test_backoff_small_base() {
        let backoff = Backoff::new(1_000);
        assert_eq!(backoff.delay(1), Duration::from_millis(1_000));
        assert_eq!(backoff.delay(2), Duration::from_millis(2_000));
        assert_eq!(backoff.delay(6), Duration::from_millis(30_000));
    }

    #[test]
    fn test_backoff_large_attempt_does_not_overflow() {
        let backoff = Backoff::new(3_000);
        assert_eq!(backoff.delay(u32::MAX), Duration::from_millis(30_000));
    }
}
