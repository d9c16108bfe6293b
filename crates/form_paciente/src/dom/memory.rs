use super::{EventKind, FormDocument, Listener};
use crate::errors::{FormError, FormResult};
use crate::models::bed_control::BedControl;
use crate::models::config::{
    DEFAULT_BED_CONTAINER_ID, DEFAULT_BIRTH_DATE_ID, DEFAULT_FORM_CONTAINER_CLASS,
    DEFAULT_PATIENT_ATTRIBUTE, DEFAULT_UNIT_SELECT_ID,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Element of a [`MemoryDocument`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub value: String,
    /// Id of the parent element, if the parent has one
    pub parent: Option<String>,
    pub inner_html: String,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.classes.push(class_name.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent = Some(parent_id.to_string());
        self
    }

    /// Whether the element is a form control with a value
    pub fn has_value(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "select" | "textarea")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// In-memory page used to drive the enhancer without a browser.
///
/// Events are dispatched synchronously: [`MemoryDocument::dispatch`] runs
/// every listener of the target to completion before returning.
#[derive(Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    listeners: HashMap<(String, EventKind), Vec<Listener<Self>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration page as the server renders it: the form container with
    /// the patient data, the unit select, the empty bed container and the
    /// date-of-birth input
    pub fn registration_page(patient_json: Option<&str>, unit: &str) -> Self {
        let mut container = MemoryElement::new("div")
            .with_id("form-paciente")
            .with_class(DEFAULT_FORM_CONTAINER_CLASS);
        if let Some(json) = patient_json {
            container = container.with_attribute(DEFAULT_PATIENT_ATTRIBUTE, json);
        }

        Self::new()
            .with_element(container)
            .with_element(
                MemoryElement::new("select")
                    .with_id(DEFAULT_UNIT_SELECT_ID)
                    .with_attribute("name", "unidade")
                    .with_value(unit)
                    .with_parent("form-paciente"),
            )
            .with_element(
                MemoryElement::new("div")
                    .with_id(DEFAULT_BED_CONTAINER_ID)
                    .with_parent("form-paciente"),
            )
            .with_element(
                MemoryElement::new("input")
                    .with_id(DEFAULT_BIRTH_DATE_ID)
                    .with_attribute("type", "text")
                    .with_attribute("name", "data_nascimento")
                    .with_parent("form-paciente"),
            )
    }

    pub fn with_element(mut self, element: MemoryElement) -> Self {
        self.insert(element);
        self
    }

    pub fn insert(&mut self, element: MemoryElement) {
        self.elements.push(element);
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements
            .iter()
            .find(|element| element.id.as_deref() == Some(id))
    }

    fn element_mut(&mut self, id: &str) -> FormResult<&mut MemoryElement> {
        self.elements
            .iter_mut()
            .find(|element| element.id.as_deref() == Some(id))
            .ok_or_else(|| FormError::MissingElement(id.to_string()))
    }

    /// Number of elements carrying `id`; anything above one is a stale copy
    pub fn count_with_id(&self, id: &str) -> usize {
        self.elements
            .iter()
            .filter(|element| element.id.as_deref() == Some(id))
            .count()
    }

    pub fn children(&self, parent_id: &str) -> Vec<&MemoryElement> {
        self.elements
            .iter()
            .filter(|element| element.parent.as_deref() == Some(parent_id))
            .collect()
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.element(id).map(|element| element.inner_html.as_str())
    }

    pub fn listener_count(&self, id: &str, event: EventKind) -> usize {
        self.listeners
            .get(&(id.to_string(), event))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Runs every listener registered for `event` on `id`
    pub fn dispatch(&mut self, id: &str, event: EventKind) {
        let listeners = self
            .listeners
            .get(&(id.to_string(), event))
            .cloned()
            .unwrap_or_default();
        for listener in listeners {
            listener(&mut *self);
        }
    }

    /// Picks `value` in a select and fires `change`, as a user would
    pub fn select_option(&mut self, id: &str, value: &str) -> FormResult<()> {
        self.set_value(id, value)?;
        self.dispatch(id, EventKind::Change);
        Ok(())
    }

    /// Types `text` one character at a time, firing `input` after each
    /// keystroke
    pub fn type_text(&mut self, id: &str, text: &str) -> FormResult<()> {
        for c in text.chars() {
            let mut current = self.value(id)?;
            current.push(c);
            self.set_value(id, &current)?;
            self.dispatch(id, EventKind::Input);
        }
        Ok(())
    }

    /// Replaces the whole value at once, firing a single `input`
    pub fn paste(&mut self, id: &str, text: &str) -> FormResult<()> {
        self.set_value(id, text)?;
        self.dispatch(id, EventKind::Input);
        Ok(())
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("elements", &self.elements)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FormDocument for MemoryDocument {
    fn class_attribute(&self, class_name: &str, attribute: &str) -> Option<String> {
        self.elements
            .iter()
            .find(|element| element.classes.iter().any(|class| class == class_name))
            .and_then(|element| element.attribute(attribute))
            .map(str::to_string)
    }

    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn value(&self, id: &str) -> FormResult<String> {
        let element = self
            .element(id)
            .ok_or_else(|| FormError::MissingElement(id.to_string()))?;
        if !element.has_value() {
            return Err(FormError::UnsupportedElement {
                id: id.to_string(),
                tag: element.tag.clone(),
            });
        }
        Ok(element.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) -> FormResult<()> {
        let element = self.element_mut(id)?;
        if !element.has_value() {
            return Err(FormError::UnsupportedElement {
                id: id.to_string(),
                tag: element.tag.clone(),
            });
        }
        element.value = value.to_string();
        Ok(())
    }

    fn replace_bed_control(&mut self, container_id: &str, control: &BedControl) -> FormResult<()> {
        if !self.has_element(container_id) {
            return Err(FormError::MissingElement(container_id.to_string()));
        }

        let stale: Vec<String> = self
            .children(container_id)
            .iter()
            .filter_map(|element| element.id.clone())
            .collect();
        self.elements
            .retain(|element| element.parent.as_deref() != Some(container_id));
        self.listeners
            .retain(|(target, _), _| !stale.contains(target));

        let mut mounted = MemoryElement::new(control.tag())
            .with_id(control.id())
            .with_attribute("name", control.name())
            .with_attribute("required", "")
            .with_value(control.displayed_value())
            .with_parent(container_id);
        if let BedControl::Text { .. } = control {
            mounted = mounted.with_attribute("type", "text");
        }

        self.element_mut(container_id)?.inner_html = control.to_html();
        self.insert(mounted);
        Ok(())
    }

    fn add_listener(&mut self, id: &str, event: EventKind, listener: Listener<Self>) -> FormResult<()> {
        if !self.has_element(id) {
            return Err(FormError::MissingElement(id.to_string()));
        }
        self.listeners
            .entry((id.to_string(), event))
            .or_default()
            .push(listener);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bed_control::render_bed_control;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_registration_page_layout() {
        let doc = MemoryDocument::registration_page(Some(r#"{"leito": "3"}"#), "UTI");
        assert_eq!(doc.value("unidade").unwrap(), "UTI");
        assert_eq!(doc.value("data_nascimento").unwrap(), "");
        assert_eq!(
            doc.class_attribute("form-container", "data-paciente").as_deref(),
            Some(r#"{"leito": "3"}"#)
        );
        assert!(doc.children("leito-container").is_empty());
    }

    #[test]
    fn test_value_of_container_is_unsupported() {
        let doc = MemoryDocument::registration_page(None, "");
        assert!(matches!(
            doc.value("leito-container"),
            Err(FormError::UnsupportedElement { .. })
        ));
        assert!(matches!(doc.value("nope"), Err(FormError::MissingElement(_))));
    }

    #[test]
    fn test_replace_drops_previous_control_and_its_listeners() {
        let mut doc = MemoryDocument::registration_page(None, "");
        doc.replace_bed_control("leito-container", &render_bed_control("", "7"))
            .unwrap();
        doc.add_listener("leito", EventKind::Input, Rc::new(|_: &mut MemoryDocument| {}))
            .unwrap();
        assert_eq!(doc.listener_count("leito", EventKind::Input), 1);

        doc.replace_bed_control("leito-container", &render_bed_control("UTI", "7"))
            .unwrap();
        assert_eq!(doc.count_with_id("leito"), 1);
        assert_eq!(doc.element("leito").unwrap().tag, "select");
        assert_eq!(doc.listener_count("leito", EventKind::Input), 0);
    }

    #[test]
    fn test_dispatch_runs_listeners_in_order() {
        let mut doc = MemoryDocument::registration_page(None, "");
        let calls = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let calls = Rc::clone(&calls);
            doc.add_listener(
                "unidade",
                EventKind::Change,
                Rc::new(move |_: &mut MemoryDocument| calls.set(calls.get() + 1)),
            )
            .unwrap();
        }

        doc.select_option("unidade", "UTI").unwrap();
        assert_eq!(calls.get(), 2);
        doc.dispatch("unidade", EventKind::Input);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_listener_on_missing_element() {
        let mut doc = MemoryDocument::new();
        let result = doc.add_listener("unidade", EventKind::Change, Rc::new(|_: &mut MemoryDocument| {}));
        assert!(matches!(result, Err(FormError::MissingElement(_))));
    }
}
