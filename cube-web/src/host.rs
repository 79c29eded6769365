/// DOM surface host: a canvas inside the widget container, drawn with WebGL2
/// and driven by `requestAnimationFrame`
use std::cell::RefCell;
use std::rc::Weak;

use cube_core::geometry::Wireframe;
use cube_core::{CoreError, Frame, RenderSurface, Result, SurfaceConfig, SurfaceHost};
use log::{error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlCanvasElement, WebGl2RenderingContext as GL, WebglLoseContext, Window};

use crate::dom::{append, host_err, set_attributes};
use crate::gl::WireProgram;

/// Where a widget keeps its mounted surface; empty once unmounted
pub type SurfaceSlot = RefCell<Option<RenderSurface<DomHost>>>;

pub struct DomHost {
    window: Window,
    on_frame: Closure<dyn FnMut(f64)>,
    on_enter: Closure<dyn FnMut()>,
    on_leave: Closure<dyn FnMut()>,
}

pub struct DomContext {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WireProgram,
}

impl DomHost {
    /// Callbacks reach the surface through `slot` and do nothing once it is gone
    pub fn new(window: Window, slot: Weak<SurfaceSlot>) -> Self {
        let frame_slot = slot.clone();
        let on_frame = Closure::wrap(Box::new(move |now: f64| {
            with_surface(&frame_slot, |surface| {
                if let Err(err) = surface.on_frame(now) {
                    error!("cube surface stopped animating: {err}");
                }
            });
        }) as Box<dyn FnMut(f64)>);

        let enter_slot = slot.clone();
        let on_enter = Closure::wrap(Box::new(move || {
            with_surface(&enter_slot, RenderSurface::pointer_enter);
        }) as Box<dyn FnMut()>);

        let on_leave = Closure::wrap(Box::new(move || {
            with_surface(&slot, RenderSurface::pointer_leave);
        }) as Box<dyn FnMut()>);

        Self {
            window,
            on_frame,
            on_enter,
            on_leave,
        }
    }

    fn create_canvas(&self, config: &SurfaceConfig) -> Result<HtmlCanvasElement> {
        let document = self
            .window
            .document()
            .ok_or_else(|| CoreError::Host("window has no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| host_err("create canvas", e))?
            .dyn_into()
            .map_err(|e| host_err("canvas element", e.into()))?;

        canvas.set_width(config.size);
        canvas.set_height(config.size);
        set_attributes(
            &canvas,
            &[(
                "style",
                &format!("display:block;width:{0}px;height:{0}px", config.size),
            )],
        )?;
        Ok(canvas)
    }
}

fn init_gl(canvas: &HtmlCanvasElement, size: u32, wireframe: &Wireframe) -> Result<(GL, WireProgram)> {
    let options = js_sys::Object::new();
    for flag in ["antialias", "alpha"] {
        js_sys::Reflect::set(&options, &JsValue::from_str(flag), &JsValue::TRUE)
            .map_err(|e| host_err("context options", e))?;
    }

    let gl: GL = canvas
        .get_context_with_context_options("webgl2", &options)
        .map_err(|e| host_err("get webgl2 context", e))?
        .ok_or_else(|| CoreError::Host("WebGL2 not supported".into()))?
        .dyn_into()
        .map_err(|e| host_err("webgl2 context", e.into()))?;

    gl.viewport(0, 0, size as i32, size as i32);
    let program = WireProgram::new(&gl, &wireframe.line_list())?;
    Ok((gl, program))
}

/// Run `f` against the mounted surface, if there still is one
fn with_surface(slot: &Weak<SurfaceSlot>, f: impl FnOnce(&mut RenderSurface<DomHost>)) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let Ok(mut guard) = slot.try_borrow_mut() else {
        warn!("cube surface callback re-entered, skipping");
        return;
    };
    if let Some(surface) = guard.as_mut() {
        f(surface);
    }
}

impl SurfaceHost for DomHost {
    type Container = Element;
    type Context = DomContext;
    type Listeners = ();
    type FrameHandle = i32;

    fn acquire_context(
        &mut self,
        container: &Element,
        config: &SurfaceConfig,
        wireframe: &Wireframe,
    ) -> Result<DomContext> {
        let canvas = self.create_canvas(config)?;
        append(container, &canvas)?;

        match init_gl(&canvas, config.size, wireframe) {
            Ok((gl, program)) => Ok(DomContext {
                canvas,
                gl,
                program,
            }),
            Err(err) => {
                canvas.remove();
                Err(err)
            }
        }
    }

    fn release_context(&mut self, _container: &Element, context: DomContext) {
        let DomContext {
            canvas,
            gl,
            program,
        } = context;

        program.delete(&gl);
        match gl.get_extension("WEBGL_lose_context") {
            Ok(Some(ext)) => ext.unchecked_into::<WebglLoseContext>().lose_context(),
            Ok(None) => {}
            Err(err) => warn!("could not release WebGL context: {err:?}"),
        }
        canvas.remove();
    }

    fn attach_listeners(&mut self, container: &Element) -> Result<()> {
        container
            .add_event_listener_with_callback("mouseenter", self.on_enter.as_ref().unchecked_ref())
            .map_err(|e| host_err("add mouseenter listener", e))?;

        if let Err(err) = container
            .add_event_listener_with_callback("mouseleave", self.on_leave.as_ref().unchecked_ref())
        {
            let _ = container.remove_event_listener_with_callback(
                "mouseenter",
                self.on_enter.as_ref().unchecked_ref(),
            );
            return Err(host_err("add mouseleave listener", err));
        }
        Ok(())
    }

    fn detach_listeners(&mut self, container: &Element, _listeners: ()) {
        let pairs = [("mouseenter", &self.on_enter), ("mouseleave", &self.on_leave)];
        for (event, callback) in pairs {
            if let Err(err) =
                container.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            {
                warn!("could not remove {event} listener: {err:?}");
            }
        }
    }

    fn request_frame(&mut self) -> Result<i32> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map_err(|e| host_err("request animation frame", e))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            warn!("could not cancel animation frame {handle}: {err:?}");
        }
    }

    fn draw(&mut self, context: &mut DomContext, frame: &Frame<'_>) -> Result<()> {
        context.program.draw(&context.gl, &frame.mvp(), frame.color);
        Ok(())
    }
}
