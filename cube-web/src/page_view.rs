/// DOM rendering of the viewer and developer pages
use std::cell::RefCell;
use std::rc::Rc;

use cube_core::{
    CoreError, CubeId, LogUploadSink, Page, Result, Route, Selection, SurfaceConfig, UploadSink,
};
use log::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use crate::dom::{append, element, host_err};
use crate::shell::apply_head;
use crate::widget::CubeWidget;

const ROOT_STYLE: &str = "min-height:100vh;background:#111827;display:flex;\
    flex-direction:column;align-items:center;justify-content:center";
const HEADING_STYLE: &str = "font-size:2.25rem;font-weight:bold;color:white;margin-bottom:2rem";
const ROW_STYLE: &str = "display:flex;gap:1rem;margin-bottom:2rem";
const MEDIA_HEADING_STYLE: &str = "font-size:1.5rem;font-weight:bold;color:white;margin-bottom:1rem";
const BUTTON_STYLE: &str = "margin-top:1rem;padding:0.5rem 1rem;background:#3b82f6;\
    color:white;border:none;border-radius:0.25rem;cursor:pointer";

/// A mounted page; dropping it unmounts every widget
pub struct PageView {
    root: Element,
    widgets: Vec<CubeWidget>,
    state: Rc<PageState>,
}

struct PageState {
    page: RefCell<Page>,
    media: Element,
    sink: RefCell<Box<dyn UploadSink>>,
    on_upload: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl PageView {
    pub fn mount(window: &Window, parent: &Element, route: Route) -> Result<Self> {
        Self::mount_with_sink(window, parent, route, Box::new(LogUploadSink))
    }

    pub fn mount_with_sink(
        window: &Window,
        parent: &Element,
        route: Route,
        sink: Box<dyn UploadSink>,
    ) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| CoreError::Host("window has no document".into()))?;
        let page = Page::new(route);
        apply_head(&document, page.head())?;

        let root = element(
            &document,
            "main",
            &[("style", ROOT_STYLE), ("data-route", route.name())],
        )?;
        let heading = element(&document, "h1", &[("style", HEADING_STYLE)])?;
        heading.set_text_content(Some(page.heading()));
        let row = element(&document, "div", &[("style", ROW_STYLE)])?;
        let media = element(&document, "div", &[("class", "media-panel")])?;

        append(&root, &heading)?;
        append(&root, &row)?;
        append(&root, &media)?;
        append(parent, &root)?;

        let cubes = page.cubes();
        let mut view = Self {
            root,
            widgets: Vec::with_capacity(cubes.len()),
            state: Rc::new(PageState {
                page: RefCell::new(page),
                media,
                sink: RefCell::new(sink),
                on_upload: RefCell::new(None),
            }),
        };

        for cube in cubes {
            let state = Rc::downgrade(&view.state);
            let widget = CubeWidget::mount(
                window,
                &document,
                &row,
                SurfaceConfig::default(),
                move || {
                    if let Some(state) = state.upgrade() {
                        select(&state, cube);
                    }
                },
            )?;
            view.widgets.push(widget);
        }

        info!("mounted {route} page");
        Ok(view)
    }

    pub fn route(&self) -> Route {
        self.state.page.borrow().route()
    }

    pub fn selection(&self) -> Selection {
        self.state.page.borrow().selection()
    }

    pub fn widgets(&self) -> &[CubeWidget] {
        &self.widgets
    }
}

impl Drop for PageView {
    fn drop(&mut self) {
        self.widgets.clear();
        self.state.on_upload.borrow_mut().take();
        self.root.remove();
        info!("unmounted {} page", self.route());
    }
}

fn select(state: &Rc<PageState>, cube: CubeId) {
    state.page.borrow_mut().select(cube);
    if let Err(err) = render_media(state) {
        error!("could not render media panel: {err}");
    }
}

fn render_media(state: &Rc<PageState>) -> Result<()> {
    state.media.set_inner_html("");
    state.on_upload.borrow_mut().take();

    let page = state.page.borrow();
    let Some(panel) = page.media_panel() else {
        return Ok(());
    };
    let document = state
        .media
        .owner_document()
        .ok_or_else(|| CoreError::Host("media panel is detached".into()))?;

    let heading = element(&document, "h2", &[("style", MEDIA_HEADING_STYLE)])?;
    heading.set_text_content(Some(&panel.heading));
    append(&state.media, &heading)?;

    let width = panel.width.to_string();
    let height = panel.height.to_string();
    let image = element(
        &document,
        "img",
        &[
            ("src", panel.src.as_str()),
            ("alt", &panel.alt),
            ("width", &width),
            ("height", &height),
        ],
    )?;
    append(&state.media, &image)?;

    if page.upload_action_visible() {
        let button = element(
            &document,
            "button",
            &[("type", "button"), ("class", "upload"), ("style", BUTTON_STYLE)],
        )?;
        button.set_text_content(Some("Upload Media"));

        let weak = Rc::downgrade(state);
        let on_upload = Closure::wrap(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                upload(&state);
            }
        }) as Box<dyn FnMut()>);
        button
            .add_event_listener_with_callback("click", on_upload.as_ref().unchecked_ref())
            .map_err(|e| host_err("add upload listener", e))?;
        append(&state.media, &button)?;
        *state.on_upload.borrow_mut() = Some(on_upload);
    }
    Ok(())
}

fn upload(state: &PageState) {
    let page = state.page.borrow();
    let mut sink = state.sink.borrow_mut();
    if let Err(err) = page.upload(&mut **sink) {
        warn!("upload ignored: {err}");
    }
}
