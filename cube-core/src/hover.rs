/// Hover-driven scale animation for a cube surface
use nalgebra::Vector3;

use crate::error::Result;
use crate::transform::MeshTransform;
use crate::tween::Tween;

pub const HOVER_SCALE: f32 = 1.2;
pub const REST_SCALE: f32 = 1.0;
/// Seconds
pub const HOVER_DURATION: f32 = 0.3;

/// Tweens the mesh scale toward the hover or rest size
///
/// Each trigger restarts the tween from the current scale, so the most recent
/// enter/leave always decides where the animation ends.
#[derive(Debug, Clone)]
pub struct HoverAnimator {
    hover_scale: f32,
    duration: f32,
    target: Vector3<f32>,
    tween: Option<Tween>,
}

impl HoverAnimator {
    pub fn new(hover_scale: f32, duration: f32) -> Self {
        Self {
            hover_scale,
            duration,
            target: Vector3::repeat(REST_SCALE),
            tween: None,
        }
    }

    pub fn pointer_enter(&mut self, current: Vector3<f32>) {
        self.retarget(current, Vector3::repeat(self.hover_scale));
    }

    pub fn pointer_leave(&mut self, current: Vector3<f32>) {
        self.retarget(current, Vector3::repeat(REST_SCALE));
    }

    fn retarget(&mut self, current: Vector3<f32>, target: Vector3<f32>) {
        self.target = target;
        self.tween = Some(Tween::new(current, target, self.duration));
    }

    /// Where the scale is headed (or rests, once the tween is done)
    pub fn target(&self) -> Vector3<f32> {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the running tween by `dt` seconds and write the scale
    pub fn step(&mut self, dt: f32, transform: &mut MeshTransform) -> Result<()> {
        let Some(tween) = self.tween.as_mut() else {
            return Ok(());
        };

        transform.set_scale(tween.advance(dt))?;
        if tween.is_finished() {
            self.tween = None;
        }
        Ok(())
    }
}

impl Default for HoverAnimator {
    fn default() -> Self {
        Self::new(HOVER_SCALE, HOVER_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_grows_to_hover_scale() {
        let mut animator = HoverAnimator::default();
        let mut transform = MeshTransform::new();

        animator.pointer_enter(transform.scale());
        assert!(animator.is_animating());
        for _ in 0..30 {
            animator.step(1.0 / 60.0, &mut transform).unwrap();
        }

        assert!((transform.scale() - Vector3::repeat(HOVER_SCALE)).norm() < 1e-5);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_leave_supersedes_enter() {
        let mut animator = HoverAnimator::default();
        let mut transform = MeshTransform::new();

        animator.pointer_enter(transform.scale());
        animator.step(0.1, &mut transform).unwrap();
        let midway = transform.scale();
        assert!(midway.x > REST_SCALE && midway.x < HOVER_SCALE);

        animator.pointer_leave(transform.scale());
        assert_eq!(animator.target(), Vector3::repeat(REST_SCALE));

        // Restarts from where the enter tween left off
        animator.step(0.0, &mut transform).unwrap();
        assert!((transform.scale() - midway).norm() < 1e-6);

        animator.step(HOVER_DURATION, &mut transform).unwrap();
        assert!((transform.scale() - Vector3::repeat(REST_SCALE)).norm() < 1e-5);
    }

    #[test]
    fn test_idle_step_leaves_scale_alone() {
        let mut animator = HoverAnimator::default();
        let mut transform = MeshTransform::new();
        animator.step(1.0, &mut transform).unwrap();
        assert_eq!(transform.scale(), Vector3::repeat(REST_SCALE));
    }
}
