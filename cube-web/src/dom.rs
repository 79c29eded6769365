/// Small DOM helpers shared by the page, widget and shell code
use cube_core::{CoreError, Result};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Wrap a JS exception as a host error
pub fn host_err(context: &str, err: JsValue) -> CoreError {
    CoreError::Host(format!("{context}: {err:?}"))
}

/// Create `<tag>` with the given attributes
pub fn element(document: &Document, tag: &str, attrs: &[(&str, &str)]) -> Result<Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| host_err("create element", e))?;
    set_attributes(&el, attrs)?;
    Ok(el)
}

pub fn set_attributes(el: &Element, attrs: &[(&str, &str)]) -> Result<()> {
    for (name, value) in attrs {
        el.set_attribute(name, value)
            .map_err(|e| host_err("set attribute", e))?;
    }
    Ok(())
}

pub fn append(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| host_err("append child", e))
}
