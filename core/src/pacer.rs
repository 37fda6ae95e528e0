use std::time::{Duration, Instant};

/// # Pacer
/// A periodic trigger measured against a monotonic clock.
///
/// The host asks it whether a tick is due each time around its loop, however often that is.
/// It fires at most once per `poll`; a host that has fallen more than a whole interval behind
/// is resynchronised to `now` rather than being handed a burst of ticks.
pub struct Pacer {
    interval: Duration,
    deadline: Instant,
}

impl Pacer {
    /// # Arguments
    /// * `interval` time between ticks
    /// * `start` when counting begins; the first tick is due one interval later
    pub fn new(interval: Duration, start: Instant) -> Self {
        Pacer {
            interval,
            deadline: start + interval,
        }
    }

    /// A pacer ticking `hz` times a second from `start`
    pub fn with_frequency(hz: u32, start: Instant) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1), start)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if a tick is due at `now`, and schedules the next one
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        self.deadline += self.interval;
        if self.deadline <= now {
            self.deadline = now + self.interval;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_not_due_before_interval() {
        let start = Instant::now();
        let mut pacer = Pacer::new(10 * MS, start);
        assert!(!pacer.poll(start));
        assert!(!pacer.poll(start + 9 * MS));
    }

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let mut pacer = Pacer::new(10 * MS, start);
        assert!(pacer.poll(start + 10 * MS));
        assert!(!pacer.poll(start + 10 * MS));
        assert!(!pacer.poll(start + 15 * MS));
        assert!(pacer.poll(start + 20 * MS));
    }

    #[test]
    fn test_late_poll_keeps_cadence() {
        let start = Instant::now();
        let mut pacer = Pacer::new(10 * MS, start);
        assert!(pacer.poll(start + 13 * MS));
        // The next deadline is still 20ms, not 23ms
        assert!(pacer.poll(start + 20 * MS));
    }

    #[test]
    fn test_resynchronises_without_burst() {
        let start = Instant::now();
        let mut pacer = Pacer::new(10 * MS, start);
        assert!(pacer.poll(start + 55 * MS));
        assert!(!pacer.poll(start + 56 * MS));
        assert!(!pacer.poll(start + 64 * MS));
        assert!(pacer.poll(start + 65 * MS));
    }

    #[test]
    fn test_sixty_hertz() {
        let pacer = Pacer::with_frequency(60, Instant::now());
        assert_eq!(pacer.interval().as_micros(), 16_666);
    }
}
