//! Page-load wiring of the bed field renderer and the date-of-birth mask.

use crate::dom::{EventKind, FormDocument};
use crate::errors::{FormError, FormResult};
use crate::models::bed_control::{BedControl, render_bed_control};
use crate::models::config::FormConfig;
use crate::models::date_mask::mask_birth_date;
use crate::models::patient::{Patient, stored_bed};
use std::rc::Rc;

/// Re-renders the bed control whenever the unit changes.
///
/// Holds the patient's stored bed, read once at page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedFieldRenderer {
    stored_bed: String,
    unit_select_id: String,
    container_id: String,
}

impl BedFieldRenderer {
    pub fn new(patient: Option<&Patient>, config: &FormConfig) -> Self {
        Self {
            stored_bed: stored_bed(patient),
            unit_select_id: config.unit_select_id.clone(),
            container_id: config.bed_container_id.clone(),
        }
    }

    pub fn stored_bed(&self) -> &str {
        &self.stored_bed
    }

    pub fn render(&self, unit: &str) -> BedControl {
        render_bed_control(unit, &self.stored_bed)
    }

    /// Reads the selected unit and swaps the bed control to match it
    pub fn refresh<D: FormDocument>(&self, doc: &mut D) -> FormResult<BedControl> {
        let unit = doc.value(&self.unit_select_id)?;
        let control = self.render(&unit);
        doc.replace_bed_control(&self.container_id, &control)?;
        log::debug!(
            "Rendered {:?} bed control for unit {:?} (selected: {:?})",
            control.kind(),
            unit,
            control.selected_value()
        );
        Ok(control)
    }
}

/// Keeps the date-of-birth field in `DD/MM/YYYY` shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMask {
    field_id: String,
}

impl DateMask {
    pub fn new(field_id: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
        }
    }

    /// Masks the field's current content and writes it back
    pub fn apply<D: FormDocument>(&self, doc: &mut D) -> FormResult<String> {
        let raw = doc.value(&self.field_id)?;
        let masked = mask_birth_date(&raw);
        doc.set_value(&self.field_id, &masked)?;
        Ok(masked)
    }
}

/// What [`initialize`] managed to wire on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhancerReport {
    pub bed_field_wired: bool,
    pub date_mask_wired: bool,
    /// Control rendered for the unit selected when the page loaded
    pub initial_bed_control: Option<BedControl>,
}

/// Wires both behaviors with the default page layout.
///
/// Never fails: a behavior whose elements are missing is skipped and
/// reported as not wired.
pub fn initialize<D: FormDocument>(doc: &mut D) -> EnhancerReport {
    initialize_with_config(doc, &FormConfig::default())
}

pub fn initialize_with_config<D: FormDocument>(doc: &mut D, config: &FormConfig) -> EnhancerReport {
    let patient = read_patient(doc, config);
    initialize_with_patient(doc, patient.as_ref(), config)
}

/// Reads the patient embedded in the form container; `None` when the
/// container, the attribute or valid JSON is missing
pub fn read_patient<D: FormDocument>(doc: &D, config: &FormConfig) -> Option<Patient> {
    let raw = doc.class_attribute(&config.form_container_class, &config.patient_attribute);
    if raw.is_none() {
        log::debug!(
            "No {} found on .{}",
            config.patient_attribute,
            config.form_container_class
        );
    }
    Patient::from_data_attribute(raw.as_deref())
}

/// Wires both behaviors for an already parsed patient
pub fn initialize_with_patient<D: FormDocument>(
    doc: &mut D,
    patient: Option<&Patient>,
    config: &FormConfig,
) -> EnhancerReport {
    let mut report = EnhancerReport::default();

    match wire_bed_field(doc, BedFieldRenderer::new(patient, config)) {
        Ok(control) => {
            report.bed_field_wired = true;
            report.initial_bed_control = Some(control);
        }
        Err(e) => log::warn!("Bed field not wired: {}", e),
    }

    match wire_date_mask(doc, DateMask::new(&config.birth_date_id)) {
        Ok(()) => report.date_mask_wired = true,
        Err(e) => log::warn!("Date mask not wired: {}", e),
    }

    log::debug!(
        "Form enhancer ready (bed field: {}, date mask: {})",
        report.bed_field_wired,
        report.date_mask_wired
    );
    report
}

fn wire_bed_field<D: FormDocument>(doc: &mut D, renderer: BedFieldRenderer) -> FormResult<BedControl> {
    for id in [&renderer.unit_select_id, &renderer.container_id] {
        if !doc.has_element(id) {
            return Err(FormError::MissingElement(id.clone()));
        }
    }

    let renderer = Rc::new(renderer);
    let on_change = Rc::clone(&renderer);
    doc.add_listener(
        &renderer.unit_select_id,
        EventKind::Change,
        Rc::new(move |doc: &mut D| {
            if let Err(e) = on_change.refresh(doc) {
                log::warn!("Failed to refresh bed control: {}", e);
            }
        }),
    )?;

    renderer.refresh(doc)
}

fn wire_date_mask<D: FormDocument>(doc: &mut D, mask: DateMask) -> FormResult<()> {
    if !doc.has_element(&mask.field_id) {
        return Err(FormError::MissingElement(mask.field_id));
    }

    let field_id = mask.field_id.clone();
    doc.add_listener(
        &field_id,
        EventKind::Input,
        Rc::new(move |doc: &mut D| {
            if let Err(e) = mask.apply(doc) {
                log::warn!("Failed to mask birth date: {}", e);
            }
        }),
    )
}
