/// Terminal surface host: a cell region of the shared screen buffer
use std::cell::RefCell;
use std::rc::Rc;

use cube_core::geometry::Wireframe;
use cube_core::{CoreError, Frame, Result, SurfaceConfig, SurfaceHost};

use crate::layout::Viewport;
use crate::renderer::AsciiRenderer;

/// Scheduling and hover hit-testing for one surface
///
/// The app's main loop plays the role of the display refresh: each pass it
/// fires the surfaces whose frame is due.
pub struct TermHost {
    screen: Rc<RefCell<AsciiRenderer>>,
    next_frame: u64,
    pending: Option<u64>,
    hover_region: Option<Viewport>,
}

pub struct TermContext {
    region: Viewport,
}

impl TermHost {
    pub fn new(screen: Rc<RefCell<AsciiRenderer>>) -> Self {
        Self {
            screen,
            next_frame: 0,
            pending: None,
            hover_region: None,
        }
    }

    pub fn frame_due(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the pointer at a cell is over this surface's listeners
    pub fn hit(&self, col: usize, row: usize) -> bool {
        self.hover_region
            .is_some_and(|region| region.contains(col, row))
    }
}

impl SurfaceHost for TermHost {
    type Container = Viewport;
    type Context = TermContext;
    type Listeners = Viewport;
    type FrameHandle = u64;

    fn acquire_context(
        &mut self,
        container: &Viewport,
        _config: &SurfaceConfig,
        _wireframe: &Wireframe,
    ) -> Result<TermContext> {
        let screen = self.screen.borrow();
        if container.right() > screen.width() || container.bottom() > screen.height() {
            return Err(CoreError::Host(format!(
                "region {container:?} does not fit a {}x{} screen",
                screen.width(),
                screen.height()
            )));
        }
        Ok(TermContext { region: *container })
    }

    fn release_context(&mut self, _container: &Viewport, context: TermContext) {
        self.screen.borrow_mut().clear_region(context.region);
    }

    fn attach_listeners(&mut self, container: &Viewport) -> Result<Viewport> {
        self.hover_region = Some(*container);
        Ok(*container)
    }

    fn detach_listeners(&mut self, _container: &Viewport, _listeners: Viewport) {
        self.hover_region = None;
    }

    fn request_frame(&mut self) -> Result<u64> {
        self.next_frame += 1;
        self.pending = Some(self.next_frame);
        Ok(self.next_frame)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn draw(&mut self, context: &mut TermContext, frame: &Frame<'_>) -> Result<()> {
        let mut screen = self.screen.borrow_mut();
        screen.clear_region(context.region);
        screen.draw_wireframe(context.region, frame);
        Ok(())
    }
}
