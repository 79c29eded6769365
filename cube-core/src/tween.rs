/// Time-bounded interpolation of a vector toward a target
use nalgebra::Vector3;

/// Easing curve applied to tween progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out: fast start, gentle arrival
    #[default]
    QuadOut,
    QuadInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: Vector3<f32>,
    to: Vector3<f32>,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    pub fn new(from: Vector3<f32>, to: Vector3<f32>, duration: f32) -> Self {
        Self::with_ease(from, to, duration, Ease::default())
    }

    /// A non-positive or non-finite duration completes immediately
    pub fn with_ease(from: Vector3<f32>, to: Vector3<f32>, duration: f32, ease: Ease) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            ease,
        }
    }

    pub fn target(&self) -> Vector3<f32> {
        self.to
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn value(&self) -> Vector3<f32> {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, self.ease.apply(self.progress()))
    }

    /// Move forward by `dt` seconds and return the new value
    pub fn advance(&mut self, dt: f32) -> Vector3<f32> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.value()
    }
}
