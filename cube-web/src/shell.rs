/// Document head for every page
use cube_core::{CoreError, DocumentHead, Result};
use web_sys::{Document, Element};

use crate::dom::{append, element, host_err, set_attributes};

pub fn apply_head(document: &Document, head: &DocumentHead) -> Result<()> {
    document.set_title(&head.title);

    let head_el = document
        .head()
        .ok_or_else(|| CoreError::Host("document has no <head>".into()))?;

    upsert(
        document,
        &head_el,
        "meta[name=\"description\"]",
        "meta",
        &[("name", "description"), ("content", &head.description)],
    )?;
    upsert(
        document,
        &head_el,
        "link[rel=\"icon\"]",
        "link",
        &[("rel", "icon"), ("href", &head.favicon)],
    )?;
    Ok(())
}

fn upsert(
    document: &Document,
    head_el: &Element,
    selector: &str,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let existing = document
        .query_selector(selector)
        .map_err(|e| host_err("query head", e))?;

    match existing {
        Some(el) => set_attributes(&el, attrs),
        None => {
            let el = element(document, tag, attrs)?;
            append(head_el, &el)
        }
    }
}
