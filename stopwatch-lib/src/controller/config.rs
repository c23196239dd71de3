use std::time::Duration;

use crate::error::{Error, Result};

/// Default delay between display refreshes while running.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Runtime settings for a [`Stopwatch`](super::Stopwatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopwatchConfig {
    pub tick_interval: Duration,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl StopwatchConfig {
    /// Override the tick interval.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(Error::InvalidInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_is_fifty_ms() {
        let config = StopwatchConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_interval() {
        let config = StopwatchConfig::default().with_tick_interval(Duration::ZERO);
        assert!(matches!(config.validate(), Err(Error::InvalidInterval)));
    }
}
