use crate::errors::FormResult;
use serde::{Deserialize, Serialize};

/// Id of the unit select
pub const DEFAULT_UNIT_SELECT_ID: &str = "unidade";

/// Id of the element that receives the bed control
pub const DEFAULT_BED_CONTAINER_ID: &str = "leito-container";

/// Id of the date-of-birth text input
pub const DEFAULT_BIRTH_DATE_ID: &str = "data_nascimento";

/// Class of the element carrying the patient data
pub const DEFAULT_FORM_CONTAINER_CLASS: &str = "form-container";

/// Attribute holding the JSON-encoded patient
pub const DEFAULT_PATIENT_ATTRIBUTE: &str = "data-paciente";

/// Element ids and attributes the enhancer looks for on the page.
///
/// The defaults match the registration template; hosts embedding the form
/// elsewhere can override any field from JSON, missing fields keep their
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub unit_select_id: String,
    pub bed_container_id: String,
    pub birth_date_id: String,
    pub form_container_class: String,
    pub patient_attribute: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            unit_select_id: DEFAULT_UNIT_SELECT_ID.to_string(),
            bed_container_id: DEFAULT_BED_CONTAINER_ID.to_string(),
            birth_date_id: DEFAULT_BIRTH_DATE_ID.to_string(),
            form_container_class: DEFAULT_FORM_CONTAINER_CLASS.to_string(),
            patient_attribute: DEFAULT_PATIENT_ATTRIBUTE.to_string(),
        }
    }
}

impl FormConfig {
    pub fn from_json(json: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
