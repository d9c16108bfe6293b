//! Browser entry point of the registration form enhancer.
//!
//! Built as a `cdylib` for `wasm32-unknown-unknown`; the page loads the
//! module and [`start`] wires the form once the DOM is ready.

use form_paciente::{
    BedControl, EventKind, FormDocument, FormError, FormResult, Listener, initialize,
    mask_birth_date, render_bed_control,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

/// [`FormDocument`] over the live page
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one
    pub fn global() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    fn element(&self, id: &str) -> FormResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| FormError::MissingElement(id.to_string()))
    }
}

fn dom_error(err: JsValue) -> FormError {
    FormError::Dom(format!("{:?}", err))
}

fn unsupported(id: &str, element: &Element) -> FormError {
    FormError::UnsupportedElement {
        id: id.to_string(),
        tag: element.tag_name().to_lowercase(),
    }
}

impl FormDocument for WebDocument {
    fn class_attribute(&self, class_name: &str, attribute: &str) -> Option<String> {
        self.document
            .query_selector(&format!(".{}", class_name))
            .ok()
            .flatten()?
            .get_attribute(attribute)
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn value(&self, id: &str) -> FormResult<String> {
        let element = self.element(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(input.value());
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Ok(select.value());
        }
        Err(unsupported(id, &element))
    }

    fn set_value(&mut self, id: &str, value: &str) -> FormResult<()> {
        let element = self.element(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
            return Ok(());
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
            return Ok(());
        }
        Err(unsupported(id, &element))
    }

    fn replace_bed_control(&mut self, container_id: &str, control: &BedControl) -> FormResult<()> {
        // Assigning innerHTML detaches the old control, listeners included.
        self.element(container_id)?.set_inner_html(&control.to_html());
        Ok(())
    }

    fn add_listener(&mut self, id: &str, event: EventKind, listener: Listener<Self>) -> FormResult<()> {
        let element = self.element(id)?;
        let mut doc = self.clone();
        let closure = Closure::<dyn FnMut()>::new(move || listener(&mut doc));
        element
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        // Page-lifetime listener.
        closure.forget();
        Ok(())
    }
}

/// Wires the form now, or on `DOMContentLoaded` while the page is still
/// loading
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    // A second module instance on the page already owns the logger.
    let _ = console_log::init_with_level(level);

    let Some(doc) = WebDocument::global() else {
        log::warn!("No document available, form enhancer not started");
        return Ok(());
    };

    if doc.document.ready_state() == "loading" {
        let target = doc.document.clone();
        let mut doc = doc;
        let on_ready = Closure::once(move || enhance(&mut doc));
        target.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        let mut doc = doc;
        enhance(&mut doc);
    }
    Ok(())
}

fn enhance(doc: &mut WebDocument) {
    let report = initialize(doc);
    log::debug!("Form enhancer started: {:?}", report);
}

/// Date mask for hosts that drive the field themselves
#[wasm_bindgen(js_name = maskBirthDate)]
pub fn mask_birth_date_js(raw: &str) -> String {
    mask_birth_date(raw)
}

/// Bed control markup for hosts that render the container themselves
#[wasm_bindgen(js_name = renderBedControl)]
pub fn render_bed_control_js(unit: &str, current_bed: &str) -> String {
    render_bed_control(unit, current_bed).to_html()
}
