/// Cube widget: a clickable container hosting one render surface
use std::cell::RefCell;
use std::rc::Rc;

use cube_core::{RenderSurface, Result, SurfaceConfig};
use log::{error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::dom::{append, element, host_err};
use crate::host::{DomHost, SurfaceSlot};

pub struct CubeWidget {
    container: Element,
    surface: Rc<SurfaceSlot>,
    on_click: Closure<dyn FnMut()>,
}

impl CubeWidget {
    /// Append a widget to `parent`; `on_click` fires for every click on it
    pub fn mount(
        window: &Window,
        document: &Document,
        parent: &Element,
        config: SurfaceConfig,
        on_click: impl FnMut() + 'static,
    ) -> Result<Self> {
        let container = element(
            document,
            "div",
            &[
                ("class", "cube-widget"),
                (
                    "style",
                    &format!("width:{0}px;height:{0}px;cursor:pointer", config.size),
                ),
            ],
        )?;
        append(parent, &container)?;

        // Dropping the widget from here on undoes whatever got set up
        let widget = Self {
            container,
            surface: Rc::new(RefCell::new(None)),
            on_click: Closure::wrap(Box::new(on_click) as Box<dyn FnMut()>),
        };
        widget
            .container
            .add_event_listener_with_callback("click", widget.on_click.as_ref().unchecked_ref())
            .map_err(|e| host_err("add click listener", e))?;

        let host = DomHost::new(window.clone(), Rc::downgrade(&widget.surface));
        match RenderSurface::mount(host, Some(widget.container.clone()), config) {
            Ok(mounted) => *widget.surface.borrow_mut() = mounted,
            Err(err) => warn!("cube surface unavailable, widget stays clickable: {err}"),
        }
        Ok(widget)
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn is_animating(&self) -> bool {
        self.surface
            .try_borrow()
            .map(|slot| slot.as_ref().is_some_and(RenderSurface::has_pending_frame))
            .unwrap_or(false)
    }
}

impl Drop for CubeWidget {
    fn drop(&mut self) {
        let _ = self
            .container
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());

        match self.surface.try_borrow_mut().map(|mut slot| slot.take()) {
            Ok(surface) => drop(surface),
            Err(_) => error!("cube surface still in use while unmounting"),
        }
        self.container.remove();
    }
}
