pub mod bed_control;
pub mod config;
pub mod date_mask;
pub mod patient;
pub mod units;

pub use bed_control::{BedControl, BedOption, ControlKind, render_bed_control, BED_FIELD_ID, BED_FIELD_NAME, BED_LABEL_PREFIX};
pub use config::{FormConfig, DEFAULT_BED_CONTAINER_ID, DEFAULT_BIRTH_DATE_ID, DEFAULT_UNIT_SELECT_ID};
pub use date_mask::{digits_only, mask_birth_date, MAX_DATE_DIGITS};
pub use patient::{BedValue, Patient, PatientStatus, stored_bed};
pub use units::{BedCatalog, Unit, known_units, BED_CATALOGS, PRIMEIRA_ENFERMARIA, UTI};
