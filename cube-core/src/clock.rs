/// Frame timing from host refresh timestamps

/// Gaps longer than this (seconds) are treated as a stall
pub const LAG_THRESHOLD: f32 = 0.5;

/// Delta substituted for a stalled frame (seconds)
pub const LAG_STEP: f32 = 0.033;

/// Turns millisecond timestamps into per-frame deltas in seconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Seconds since the previous tick; 0 on the first tick
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }

        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        if dt > LAG_THRESHOLD {
            LAG_STEP
        } else {
            dt
        }
    }
}
