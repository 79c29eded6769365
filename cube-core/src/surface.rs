/// Render surface: one rotating wireframe cube bound to a host viewport
///
/// The surface owns its scene state and drives a host through the
/// acquire/draw/release cycle. Hosts (a DOM canvas, a terminal region, a test
/// double) only provide the resources; ordering and teardown live here.
use log::{debug, info};
use nalgebra::Matrix4;

use crate::clock::FrameClock;
use crate::error::{CoreError, Result};
use crate::geometry::{Mesh, Wireframe};
use crate::hover::{HoverAnimator, HOVER_DURATION, HOVER_SCALE};
use crate::projection::Camera;
use crate::transform::{MeshTransform, Transform};

/// Fixed parameters of a cube surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Width and height of the drawing surface in pixels
    pub size: u32,
    /// Radians added to both rotation axes every frame
    pub rotation_step: f32,
    pub camera_distance: f32,
    pub fov_degrees: f32,
    /// `0xRRGGBB`
    pub wire_color: u32,
    pub hover_scale: f32,
    /// Seconds
    pub hover_duration: f32,
}

impl SurfaceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(CoreError::InvalidConfig("size must be non-zero".into()));
        }
        let positive = [
            ("rotation_step", self.rotation_step),
            ("camera_distance", self.camera_distance),
            ("fov_degrees", self.fov_degrees),
            ("hover_scale", self.hover_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if self.fov_degrees >= 180.0 {
            return Err(CoreError::InvalidConfig("fov_degrees must be below 180".into()));
        }
        if !self.hover_duration.is_finite() || self.hover_duration < 0.0 {
            return Err(CoreError::InvalidConfig(
                "hover_duration must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Wire colour as linear `[r, g, b]` in `0.0..=1.0`
    pub fn wire_rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| ((self.wire_color >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            size: 200,
            rotation_step: 0.01,
            camera_distance: 2.0,
            fov_degrees: 75.0,
            wire_color: 0x00ff00,
            hover_scale: HOVER_SCALE,
            hover_duration: HOVER_DURATION,
        }
    }
}

/// Everything a host needs to draw one frame
pub struct Frame<'a> {
    pub model: Matrix4<f32>,
    pub camera: &'a Camera,
    pub wireframe: &'a Wireframe,
    pub color: [f32; 3],
}

impl Frame<'_> {
    pub fn mvp(&self) -> Matrix4<f32> {
        Transform::mvp_matrix(&self.model, &self.camera.view_projection())
    }
}

/// Per-instance scene state, never shared between surfaces
#[derive(Debug, Clone)]
pub struct SurfaceScene {
    config: SurfaceConfig,
    camera: Camera,
    wireframe: Wireframe,
    transform: MeshTransform,
    hover: HoverAnimator,
    clock: FrameClock,
}

impl SurfaceScene {
    pub fn new(config: SurfaceConfig) -> Result<Self> {
        config.validate()?;
        let camera = Camera::new(config.size, config.size)
            .at_distance(config.camera_distance)
            .with_fov_degrees(config.fov_degrees);

        Ok(Self {
            camera,
            wireframe: Mesh::cube(1.0).wireframe(),
            transform: MeshTransform::new(),
            hover: HoverAnimator::new(config.hover_scale, config.hover_duration),
            clock: FrameClock::new(),
            config,
        })
    }

    /// Per-frame update: spin, then advance any hover tween
    pub fn tick(&mut self, now_ms: f64) -> Result<()> {
        let dt = self.clock.tick(now_ms);
        self.transform.advance_rotation(self.config.rotation_step);
        self.hover.step(dt, &mut self.transform)
    }

    pub fn pointer_enter(&mut self) {
        self.hover.pointer_enter(self.transform.scale());
    }

    pub fn pointer_leave(&mut self) {
        self.hover.pointer_leave(self.transform.scale());
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            model: self.transform.model_matrix(),
            camera: &self.camera,
            wireframe: &self.wireframe,
            color: self.config.wire_rgb(),
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn wireframe(&self) -> &Wireframe {
        &self.wireframe
    }

    pub fn transform(&self) -> &MeshTransform {
        &self.transform
    }

    pub fn hover(&self) -> &HoverAnimator {
        &self.hover
    }
}

/// Resources a platform lends to a mounted surface
///
/// Every `acquire`/`attach`/`request` is matched by exactly one
/// `release`/`detach`/`cancel` (or by the frame firing) before the surface is
/// gone.
pub trait SurfaceHost {
    /// Where the surface is mounted
    type Container;
    /// Drawing context bound to the surface's pixels
    type Context;
    /// Registered pointer listeners
    type Listeners;
    /// A scheduled refresh callback
    type FrameHandle;

    fn acquire_context(
        &mut self,
        container: &Self::Container,
        config: &SurfaceConfig,
        wireframe: &Wireframe,
    ) -> Result<Self::Context>;

    fn release_context(&mut self, container: &Self::Container, context: Self::Context);

    fn attach_listeners(&mut self, container: &Self::Container) -> Result<Self::Listeners>;

    fn detach_listeners(&mut self, container: &Self::Container, listeners: Self::Listeners);

    fn request_frame(&mut self) -> Result<Self::FrameHandle>;

    fn cancel_frame(&mut self, handle: Self::FrameHandle);

    fn draw(&mut self, context: &mut Self::Context, frame: &Frame<'_>) -> Result<()>;
}

/// A surface mounted on a host; dropping it releases everything it acquired
pub struct RenderSurface<H: SurfaceHost> {
    host: H,
    container: H::Container,
    context: Option<H::Context>,
    listeners: Option<H::Listeners>,
    pending: Option<H::FrameHandle>,
    scene: SurfaceScene,
}

impl<H: SurfaceHost> RenderSurface<H> {
    /// Mount into `container`, or do nothing at all when there is none
    pub fn mount(
        mut host: H,
        container: Option<H::Container>,
        config: SurfaceConfig,
    ) -> Result<Option<Self>> {
        let Some(container) = container else {
            debug!("no container to mount into, skipping surface");
            return Ok(None);
        };

        let scene = SurfaceScene::new(config)?;
        let context = host.acquire_context(&container, scene.config(), scene.wireframe())?;

        // From here on Drop releases whatever has been acquired
        let mut surface = Self {
            host,
            container,
            context: Some(context),
            listeners: None,
            pending: None,
            scene,
        };
        surface.listeners = Some(surface.host.attach_listeners(&surface.container)?);
        surface.render()?;
        surface.pending = Some(surface.host.request_frame()?);

        info!("mounted {0}x{0} cube surface", surface.scene.config().size);
        Ok(Some(surface))
    }

    /// Refresh callback: advance the scene, draw, and schedule the next frame
    pub fn on_frame(&mut self, now_ms: f64) -> Result<()> {
        // The handle that just fired is spent
        self.pending = None;

        self.scene.tick(now_ms)?;
        self.render()?;
        self.pending = Some(self.host.request_frame()?);
        Ok(())
    }

    pub fn pointer_enter(&mut self) {
        self.scene.pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.scene.pointer_leave();
    }

    pub fn scene(&self) -> &SurfaceScene {
        &self.scene
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn container(&self) -> &H::Container {
        &self.container
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Explicit teardown; same as dropping the surface
    pub fn unmount(self) {
        drop(self);
    }

    fn render(&mut self) -> Result<()> {
        match self.context.as_mut() {
            Some(context) => self.host.draw(context, &self.scene.frame()),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        if let Some(listeners) = self.listeners.take() {
            self.host.detach_listeners(&self.container, listeners);
        }
        if let Some(context) = self.context.take() {
            self.host.release_context(&self.container, context);
        }
    }
}

impl<H: SurfaceHost> Drop for RenderSurface<H> {
    fn drop(&mut self) {
        self.release();
        debug!("cube surface released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_default_config_is_valid() {
        let config = SurfaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size, 200);
        assert_eq!(config.wire_rgb(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_invalid_config() {
        let config = SurfaceConfig {
            size: 0,
            ..SurfaceConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));

        let config = SurfaceConfig {
            rotation_step: f32::NAN,
            ..SurfaceConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_scene_tick_rotates_by_step() {
        let mut scene = SurfaceScene::new(SurfaceConfig::default()).unwrap();
        scene.tick(0.0).unwrap();
        scene.tick(16.0).unwrap();
        assert!((scene.transform().rotation.x - 0.02).abs() < 1e-6);
        assert!((scene.transform().rotation.y - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_scene_hover_enter_then_leave_targets_rest() {
        let mut scene = SurfaceScene::new(SurfaceConfig::default()).unwrap();
        scene.pointer_enter();
        scene.pointer_leave();
        assert_eq!(scene.hover().target(), Vector3::repeat(1.0));
    }

    #[test]
    fn test_frame_mvp_keeps_cube_in_view() {
        let scene = SurfaceScene::new(SurfaceConfig::default()).unwrap();
        let frame = scene.frame();
        let size = scene.config().size;
        for (a, _) in frame.wireframe.segments() {
            let (x, y, _) = frame
                .camera
                .project_to_screen(&a, &frame.model, size, size)
                .unwrap();
            assert!(x > 0.0 && x < size as f32);
            assert!(y > 0.0 && y < size as f32);
        }
    }
}
