//! Time-driven text animations for the hero headline and stat counters.
//!
//! Both are pure functions of elapsed time, so any surface can redraw them
//! at its own frame rate.

use std::time::Duration;

/// Default reveal speed of the headline, one character per step.
pub const DEFAULT_TYPEWRITER_STEP: Duration = Duration::from_millis(100);
/// Default count-up duration of the stat counters.
pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Reveals a string one character per `step`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    step: Duration,
    char_count: usize,
}

impl Typewriter {
    #[must_use]
    pub fn new(text: impl Into<String>, step: Duration) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            step,
            char_count,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters shown after `elapsed`.
    #[must_use]
    pub fn visible_chars(&self, elapsed: Duration) -> usize {
        if self.step.is_zero() {
            return self.char_count;
        }
        let steps = elapsed.as_nanos() / self.step.as_nanos();
        usize::try_from(steps).map_or(self.char_count, |n| n.min(self.char_count))
    }

    /// Revealed prefix after `elapsed`, always cut on a char boundary.
    #[must_use]
    pub fn visible(&self, elapsed: Duration) -> &str {
        let shown = self.visible_chars(elapsed);
        match self.text.char_indices().nth(shown) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }

    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        self.visible_chars(elapsed) == self.char_count
    }

    /// Time until the whole text is shown.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.step
            .saturating_mul(u32::try_from(self.char_count).unwrap_or(u32::MAX))
    }
}

/// Linear count from zero up to `end` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUp {
    end: u64,
    duration: Duration,
}

impl CountUp {
    #[must_use]
    pub const fn new(end: u64, duration: Duration) -> Self {
        Self { end, duration }
    }

    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Fraction of the animation done, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// `floor(progress * end)`.
    #[must_use]
    pub fn value(&self, elapsed: Duration) -> u64 {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return self.end;
        }
        (progress * self.end as f64).floor() as u64
    }
}
