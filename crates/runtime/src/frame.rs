use std::time::Instant;

use foundation::time::Time;

/// Largest delta a single frame may integrate (seconds).
pub const MAX_FRAME_DT_S: f64 = 0.25;

/// Frame metadata handed to every per-frame system.
///
/// `dt_s` is the measured delta since the previous frame, not a fixed step:
/// anything that animates over a duration must scale by it (or sample `time`)
/// to stay frame-rate independent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Measured delta time (seconds), sanitized and capped.
    pub dt_s: f64,
    /// Accumulated measured time at this frame (seconds), never capped.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64, time: Time) -> Self {
        Self { index, dt_s, time }
    }
}

/// Produces `Frame`s from measured deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    next_index: u64,
    time: Time,
    last_instant: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            next_index: 0,
            time: Time::ZERO,
            last_instant: None,
        }
    }

    pub fn time(&self) -> Time {
        self.time
    }

    /// Advances by an externally measured delta.
    ///
    /// `time` follows the full delta so duration-based animations finish on
    /// schedule after a stall; only the integration step `dt_s` is capped.
    pub fn advance(&mut self, dt_s: f64) -> Frame {
        let elapsed_s = sanitize_dt(dt_s);
        self.time = self.time.offset(elapsed_s);
        let frame = Frame::new(self.next_index, elapsed_s.min(MAX_FRAME_DT_S), self.time);
        self.next_index += 1;
        frame
    }

    /// Advances by the wall-clock time since the previous call.
    ///
    /// The first call yields a zero delta.
    pub fn advance_to(&mut self, now: Instant) -> Frame {
        let dt_s = match self.last_instant {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.last_instant = Some(now);
        self.advance(dt_s)
    }
}

fn sanitize_dt(dt_s: f64) -> f64 {
    if !dt_s.is_finite() || dt_s < 0.0 {
        return 0.0;
    }
    dt_s
}
