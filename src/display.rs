//! Count-up animation for the predicted AQI readout.
//!
//! The UI calls [`CountUp::tick`] once per frame with the time since the
//! previous frame.  The value climbs linearly from `0` to the target over
//! the configured duration, then holds.
//!
//! ```text
//!   value = floor(min(elapsed / duration, 1) · target)
//! ```

/// Default animation length, in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 900;

/// Linear 0 → target counter.
#[derive(Debug, Clone)]
pub struct CountUp {
    duration_ms: u32,
    elapsed_ms: u32,
    target: Option<u32>,
}

impl CountUp {
    /// A zero duration is treated as 1 ms (jump straight to the target).
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms: duration_ms.max(1),
            elapsed_ms: 0,
            target: None,
        }
    }

    /// Restart from `0` towards `target`.  Supersedes any running count.
    pub fn start(&mut self, target: u32) {
        self.target = Some(target);
        self.elapsed_ms = 0;
    }

    /// Stop and show `0`.
    pub fn reset(&mut self) {
        self.target = None;
        self.elapsed_ms = 0;
    }

    /// Advance by `delta_ms` and return the value to display.
    pub fn tick(&mut self, delta_ms: u32) -> u32 {
        if self.target.is_some() {
            self.elapsed_ms = self
                .elapsed_ms
                .saturating_add(delta_ms)
                .min(self.duration_ms);
        }
        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> u32 {
        let Some(target) = self.target else {
            return 0;
        };
        let progress = f64::from(self.elapsed_ms) / f64::from(self.duration_ms);
        (progress.min(1.0) * f64::from(target)).floor() as u32
    }

    /// True once the value has reached its target (or nothing is running).
    pub fn is_finished(&self) -> bool {
        self.target.is_none() || self.elapsed_ms >= self.duration_ms
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }
}

impl Default for CountUp {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}
