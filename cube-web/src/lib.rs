//! Cube display in the browser
//!
//! Compiled to wasm with `wasm-pack build --target web`. The host page
//! constructs a [`CubeApp`], which mounts the page matching
//! `location.pathname` into `<body>`, and frees it on `pagehide`.

mod dom;
mod gl;
mod host;
mod page_view;
mod shell;
mod widget;

use std::cell::RefCell;
use std::rc::Rc;

use cube_core::{CoreError, Route};
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::dom::host_err;

pub use host::{DomHost, SurfaceSlot};
pub use page_view::PageView;
pub use widget::CubeWidget;

/// The mounted page, shared with the history listener
type ViewSlot = RefCell<Option<PageView>>;

#[wasm_bindgen]
pub struct CubeApp {
    window: Window,
    view: Rc<ViewSlot>,
    on_popstate: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl CubeApp {
    /// Mount the page for the current location and follow back/forward
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CubeApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let view = Rc::new(RefCell::new(None));

        let on_popstate = {
            let window = window.clone();
            let view = Rc::downgrade(&view);
            Closure::wrap(Box::new(move || {
                let Some(view) = view.upgrade() else {
                    return;
                };
                if let Err(err) = follow_location(&window, &view) {
                    error!("could not follow history navigation: {err}");
                }
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;

        // Dropping the app from here on removes the listener
        let app = CubeApp {
            window,
            view,
            on_popstate,
        };
        follow_location(&app.window, &app.view).map_err(to_js)?;
        Ok(app)
    }

    /// Name of the mounted page, if any
    pub fn route(&self) -> Option<String> {
        let slot = self.view.try_borrow().ok()?;
        slot.as_ref().map(|view| view.route().name().to_string())
    }

    /// Push `path` onto the history and mount its page in place of the current one
    pub fn navigate(&mut self, path: &str) -> Result<(), JsValue> {
        let route = Route::parse(path)
            .ok_or_else(|| to_js(CoreError::UnknownRoute(path.to_string())))?;

        self.window
            .history()?
            .push_state_with_url(&JsValue::NULL, "", Some(route.path()))?;
        mount_route(&self.window, &self.view, route).map_err(to_js)
    }

    /// Stop every cube and remove the page from the document
    pub fn unmount(&mut self) {
        match self.view.try_borrow_mut() {
            Ok(mut slot) => drop(slot.take()),
            Err(_) => warn!("page is busy, not unmounting"),
        }
    }
}

impl Drop for CubeApp {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("popstate", self.on_popstate.as_ref().unchecked_ref())
        {
            warn!("could not remove popstate listener: {err:?}");
        }
        self.unmount();
    }
}

/// Mount the page for `location.pathname` unless it is already showing
fn follow_location(window: &Window, view: &ViewSlot) -> cube_core::Result<()> {
    let path = window
        .location()
        .pathname()
        .map_err(|e| host_err("read location", e))?;
    let route = resolve_route(&path);

    let showing = view
        .try_borrow()
        .ok()
        .and_then(|slot| slot.as_ref().map(PageView::route));
    if showing == Some(route) {
        return Ok(());
    }
    mount_route(window, view, route)
}

/// Replace the mounted page with a fresh one for `route`
fn mount_route(window: &Window, view: &ViewSlot, route: Route) -> cube_core::Result<()> {
    let mut slot = view
        .try_borrow_mut()
        .map_err(|_| CoreError::Host("page is busy".into()))?;
    // The old page unmounts before the new one exists
    slot.take();

    let body = window
        .document()
        .and_then(|document| document.body())
        .ok_or_else(|| CoreError::Host("document has no <body>".into()))?;
    *slot = Some(PageView::mount(window, &body, route)?);
    Ok(())
}

/// Unknown paths fall back to the viewer page
pub fn resolve_route(path: &str) -> Route {
    Route::parse(path).unwrap_or_else(|| {
        info!("no page at {path}, showing the viewer");
        Route::Viewer
    })
}

fn to_js(err: CoreError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn log_level() -> log::Level {
    option_env!("CUBE_LOG_LEVEL")
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::Level::Info)
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second init (e.g. under the test runner) keeps the first logger
    let _ = console_log::init_with_level(log_level());
    Ok(())
}
