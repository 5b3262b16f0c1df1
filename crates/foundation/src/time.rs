/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    /// Seconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn offset(self, seconds: f64) -> Self {
        Time(self.0 + seconds)
    }
}

/// Normalized progress of a span that started at `start` and lasts `duration_s`.
///
/// Zero or negative durations complete immediately.
pub fn progress(start: Time, now: Time, duration_s: f64) -> f64 {
    if duration_s.is_nan() || duration_s <= 0.0 {
        return 1.0;
    }
    (now.since(start) / duration_s).clamp(0.0, 1.0)
}

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
