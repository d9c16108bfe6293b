//! Document seam between the enhancer and a page.
//!
//! The enhancer only talks to [`FormDocument`]. The browser binding crate
//! implements it over `web_sys::Document`; [`MemoryDocument`] implements it
//! in memory so the whole flow runs in plain tests.

pub mod memory;

pub use memory::{MemoryDocument, MemoryElement};

use crate::errors::FormResult;
use crate::models::bed_control::BedControl;
use std::rc::Rc;

/// DOM events the enhancer listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Input,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Input => "input",
        }
    }
}

/// Event handler; it receives the document it was registered on
pub type Listener<D> = Rc<dyn Fn(&mut D)>;

pub trait FormDocument: Sized + 'static {
    /// Reads `attribute` from the first element, in document order, that
    /// carries `class_name`
    fn class_attribute(&self, class_name: &str, attribute: &str) -> Option<String>;

    fn has_element(&self, id: &str) -> bool;

    /// Current value of an input or select
    fn value(&self, id: &str) -> FormResult<String>;

    fn set_value(&mut self, id: &str, value: &str) -> FormResult<()>;

    /// Removes every child of the container and mounts `control` as its
    /// only child
    fn replace_bed_control(&mut self, container_id: &str, control: &BedControl) -> FormResult<()>;

    /// Registers a page-lifetime listener on the element with `id`
    fn add_listener(&mut self, id: &str, event: EventKind, listener: Listener<Self>) -> FormResult<()>;
}
