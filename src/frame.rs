use std::time::{
    Duration,
    Instant,
};

/// Measures the time between frames.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start : Instant,
    last : Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start : Instant) -> Self {
        Self {
            start,
            last : None,
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// The first tick returns 0. Never negative, an instant earlier than
    /// the previous tick counts as no time passing.
    pub fn tick_at(&mut self, now : Instant) -> f32 {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };

        self.last = Some(now);
        delta.as_secs_f32()
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now : Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }
}
