use crate::models::units::Unit;
use serde::Serialize;
use std::fmt::Write;

/// Element id of the bed control, whichever variant is rendered
pub const BED_FIELD_ID: &str = "leito";

/// Form field name the server reads the bed from
pub const BED_FIELD_NAME: &str = "leito";

/// Prefix of every dropdown option label
pub const BED_LABEL_PREFIX: &str = "Leito ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Dropdown,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Declarative description of the bed control.
///
/// Produced by [`render_bed_control`] and applied to a page by a
/// [`crate::dom::FormDocument`]. Both variants are `required` and carry the
/// id and name `leito`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BedControl {
    Dropdown { options: Vec<BedOption> },
    Text { value: String },
}

impl BedControl {
    pub fn kind(&self) -> ControlKind {
        match self {
            Self::Dropdown { .. } => ControlKind::Dropdown,
            Self::Text { .. } => ControlKind::Text,
        }
    }

    pub fn id(&self) -> &'static str {
        BED_FIELD_ID
    }

    pub fn name(&self) -> &'static str {
        BED_FIELD_NAME
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Dropdown { .. } => "select",
            Self::Text { .. } => "input",
        }
    }

    pub fn options(&self) -> &[BedOption] {
        match self {
            Self::Dropdown { options } => options.as_slice(),
            Self::Text { .. } => &[],
        }
    }

    /// The pre-selected option of a dropdown, or the text of a text input
    pub fn selected_value(&self) -> Option<&str> {
        match self {
            Self::Dropdown { options } => options
                .iter()
                .find(|option| option.selected)
                .map(|option| option.value.as_str()),
            Self::Text { value } => Some(value.as_str()),
        }
    }

    /// Value the browser shows once the control is mounted. A dropdown with
    /// no pre-selected option shows its first option.
    pub fn displayed_value(&self) -> &str {
        match self {
            Self::Dropdown { options } => self
                .selected_value()
                .or_else(|| options.first().map(|option| option.value.as_str()))
                .unwrap_or(""),
            Self::Text { value } => value.as_str(),
        }
    }

    /// Markup of the control, ready to become the only child of the bed
    /// container
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            Self::Dropdown { options } => {
                let _ = write!(
                    html,
                    r#"<select id="{}" name="{}" required>"#,
                    BED_FIELD_ID, BED_FIELD_NAME
                );
                for option in options {
                    let _ = write!(
                        html,
                        r#"<option value="{}"{}>{}</option>"#,
                        escape_html(&option.value),
                        if option.selected { " selected" } else { "" },
                        escape_html(&option.label)
                    );
                }
                html.push_str("</select>");
            }
            Self::Text { value } => {
                let _ = write!(
                    html,
                    r#"<input type="text" id="{}" name="{}" value="{}" required>"#,
                    BED_FIELD_ID,
                    BED_FIELD_NAME,
                    escape_html(value)
                );
            }
        }
        html
    }
}

/// Renders the bed control for the selected unit.
///
/// Units with a bed catalog get a dropdown whose option equal to
/// `current_bed` is selected; every other unit, the empty one included, gets
/// a text input pre-filled with `current_bed`.
///
/// # Example
/// ```rust
/// use form_paciente::models::bed_control::{render_bed_control, ControlKind};
///
/// let control = render_bed_control("UTI", "3");
/// assert_eq!(control.kind(), ControlKind::Dropdown);
/// assert_eq!(control.selected_value(), Some("3"));
///
/// let control = render_bed_control("2ª Enfermaria", "201-A");
/// assert_eq!(control.kind(), ControlKind::Text);
/// assert_eq!(control.selected_value(), Some("201-A"));
/// ```
pub fn render_bed_control(unit: &str, current_bed: &str) -> BedControl {
    match Unit::parse(unit).bed_catalog() {
        Some(catalog) => BedControl::Dropdown {
            options: catalog
                .values()
                .map(|value| BedOption {
                    label: format!("{}{}", BED_LABEL_PREFIX, value),
                    selected: value == current_bed,
                    value,
                })
                .collect(),
        },
        None => BedControl::Text {
            value: current_bed.to_string(),
        },
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
