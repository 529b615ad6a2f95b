use std::time::Instant;

/// Source of elapsed time for the frame loop.
///
/// `update` latches the time once per frame; `elapsed` and `delta` then return
/// the latched values until the next `update`, so every system ticking in the
/// same frame sees the same instant.
pub trait Clock {
    fn update(&mut self);

    /// Seconds since the clock started, as of the last `update`.
    fn elapsed(&self) -> f32;

    /// Seconds between the last two `update` calls.
    fn delta(&self) -> f32;
}

/// Wall clock backed by a monotonic [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
    elapsed: f32,
    delta: f32,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: 0.0,
            delta: 0.0,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn update(&mut self) {
        let now = self.start.elapsed().as_secs_f32();
        self.delta = now - self.elapsed;
        self.elapsed = now;
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn delta(&self) -> f32 {
        self.delta
    }
}

/// Clock driven by hand, for feeding synthetic times to the loop.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: f32,
    elapsed: f32,
    delta: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `update` will report `elapsed` seconds.
    pub fn set(&mut self, elapsed: f32) {
        self.pending = elapsed;
    }

    /// Moves the pending time forward by `seconds`.
    pub fn advance(&mut self, seconds: f32) {
        self.pending += seconds;
    }
}

impl Clock for ManualClock {
    fn update(&mut self) {
        self.delta = self.pending - self.elapsed;
        self.elapsed = self.pending;
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn delta(&self) -> f32 {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_latches_on_update() {
        let mut clock = ManualClock::new();
        clock.set(2.0);
        assert_eq!(clock.elapsed(), 0.0);
        clock.update();
        assert_eq!(clock.elapsed(), 2.0);
        assert_eq!(clock.delta(), 2.0);

        clock.advance(0.5);
        clock.update();
        assert_eq!(clock.elapsed(), 2.5);
        assert_eq!(clock.delta(), 0.5);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let mut previous = clock.elapsed();
        for _ in 0..100 {
            clock.update();
            assert!(clock.elapsed() >= previous);
            assert!(clock.delta() >= 0.0);
            previous = clock.elapsed();
        }
    }
}
