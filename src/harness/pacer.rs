//! Pacing between classify calls.

use std::thread;
use std::time::Duration;

/// Called once after every attempt, whatever its outcome.
pub trait Pacer {
    fn pause(&mut self);
}

/// Blocks the calling thread for a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Delay used when none is configured.
    pub const DEFAULT: Duration = Duration::from_millis(500);

    pub fn new(delay: Duration) -> Self {
        FixedDelay { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Pacer for FixedDelay {
    fn pause(&mut self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self) {}
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_fixed_delay_blocks() {
        let mut pacer = FixedDelay::from_millis(20);
        let start = Instant::now();
        pacer.pause();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(FixedDelay::default().delay(), Duration::from_millis(500));
    }
}
