use crate::errors::FormResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Bed identifier as stored on the patient record.
///
/// Beds in catalog units are stored as numbers by some pages and as strings
/// by others, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BedValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl BedValue {
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(bed) => write!(f, "{}", bed),
            Self::Decimal(bed) => write!(f, "{}", bed),
            Self::Text(bed) => write!(f, "{}", bed),
        }
    }
}

impl From<i64> for BedValue {
    fn from(bed: i64) -> Self {
        Self::Integer(bed)
    }
}

impl From<String> for BedValue {
    fn from(bed: String) -> Self {
        Self::Text(bed)
    }
}

impl From<&str> for BedValue {
    fn from(bed: &str) -> Self {
        Self::Text(bed.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    #[default]
    Ativo,
    Inativo,
}

/// Patient record embedded in the registration page.
///
/// Only `leito` drives the form; the other columns of the `pacientes` table
/// are carried so the same JSON round-trips between the page and the server.
/// A column holding an unexpected type (`"idade": ""` for an age left blank)
/// reads as absent instead of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub idade: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leito: Option<BedValue>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub unidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub diagnostico: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub status: Option<PatientStatus>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub motivo_inativacao: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value::<Option<T>>(value.clone()) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            log::debug!("Ignoring patient column value {}: {}", value, e);
            Ok(None)
        }
    }
}

impl Patient {
    pub fn with_bed<B: Into<BedValue>>(bed: B) -> Self {
        Self {
            leito: Some(bed.into()),
            ..Self::default()
        }
    }

    /// Parses the JSON carried by the page. A literal `null` is a new
    /// patient and yields `Ok(None)`.
    ///
    /// # Example
    /// ```rust
    /// use form_paciente::models::patient::Patient;
    ///
    /// let patient = Patient::from_json(r#"{"leito": 105}"#).unwrap().unwrap();
    /// assert_eq!(patient.stored_bed(), "105");
    /// assert!(Patient::from_json("null").unwrap().is_none());
    /// ```
    pub fn from_json(json: &str) -> FormResult<Option<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lenient variant of [`Patient::from_json`] for the raw data attribute.
    /// Missing or malformed data is treated as "no patient".
    pub fn from_data_attribute(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }

        match Self::from_json(raw) {
            Ok(patient) => patient,
            Err(e) => {
                log::warn!("Ignoring unreadable patient data: {}", e);
                None
            }
        }
    }

    /// Serializes the record into the JSON a host page embeds in its data
    /// attribute
    pub fn to_data_attribute(&self) -> FormResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Bed value as the form compares it, empty when unknown
    pub fn stored_bed(&self) -> String {
        self.leito
            .as_ref()
            .map(BedValue::as_text)
            .unwrap_or_default()
    }

    pub fn status(&self) -> PatientStatus {
        self.status.unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.status() == PatientStatus::Ativo
    }
}

/// Bed value for an optional patient; empty for new patients
pub fn stored_bed(patient: Option<&Patient>) -> String {
    patient.map(Patient::stored_bed).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bed_as_string_or_number() {
        let text = Patient::from_json(r#"{"leito": "105"}"#).unwrap().unwrap();
        assert_eq!(text.stored_bed(), "105");

        let number = Patient::from_json(r#"{"leito": 105}"#).unwrap().unwrap();
        assert_eq!(number.leito, Some(BedValue::Integer(105)));
        assert_eq!(number.stored_bed(), "105");

        let free_text = Patient::from_json(r#"{"leito": "UTI-05"}"#).unwrap().unwrap();
        assert_eq!(free_text.stored_bed(), "UTI-05");
    }

    #[test]
    fn test_missing_or_null_bed_is_empty() {
        let no_bed = Patient::from_json(r#"{"nome": "José da Silva"}"#).unwrap().unwrap();
        assert_eq!(no_bed.stored_bed(), "");

        let null_bed = Patient::from_json(r#"{"leito": null}"#).unwrap().unwrap();
        assert_eq!(null_bed.stored_bed(), "");

        assert_eq!(stored_bed(None), "");
    }

    #[test]
    fn test_full_record() {
        let json = r#"{
            "id": 2,
            "nome": "Maria Oliveira",
            "idade": 75,
            "leito": "UTI-05",
            "unidade": "UTI",
            "diagnostico": "Pós-operatório de cirurgia cardíaca",
            "status": "Ativo",
            "motivo_inativacao": null,
            "atendimentos_hoje": {"manha": false, "tarde": true}
        }"#;
        let patient = Patient::from_json(json).unwrap().unwrap();
        assert_eq!(patient.id, Some(2));
        assert_eq!(patient.nome.as_deref(), Some("Maria Oliveira"));
        assert_eq!(patient.unidade.as_deref(), Some("UTI"));
        assert!(patient.is_active());
    }

    #[test]
    fn test_inactive_status() {
        let patient = Patient::from_json(r#"{"status": "Inativo", "motivo_inativacao": "Alta"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(patient.status(), PatientStatus::Inativo);
        assert!(!patient.is_active());
    }

    #[test]
    fn test_from_data_attribute_degrades() {
        assert!(Patient::from_data_attribute(None).is_none());
        assert!(Patient::from_data_attribute(Some("")).is_none());
        assert!(Patient::from_data_attribute(Some("null")).is_none());
        assert!(Patient::from_data_attribute(Some("{not json")).is_none());
        assert!(Patient::from_data_attribute(Some(r#"{"leito": [1, 2]}"#)).is_none());

        let patient = Patient::from_data_attribute(Some(r#" {"leito": "3"} "#)).unwrap();
        assert_eq!(patient.stored_bed(), "3");
    }

    #[test]
    fn test_unexpected_column_types_keep_the_bed() {
        for json in [
            r#"{"leito": "105", "idade": ""}"#,
            r#"{"leito": "105", "idade": "75 anos"}"#,
            r#"{"leito": "105", "status": "Alta"}"#,
            r#"{"leito": "105", "nome": 42}"#,
        ] {
            let patient = Patient::from_data_attribute(Some(json)).unwrap();
            assert_eq!(patient.stored_bed(), "105", "{}", json);
        }

        let patient = Patient::from_json(r#"{"nome": "Ana", "idade": "", "status": "Alta"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(patient.nome.as_deref(), Some("Ana"));
        assert_eq!(patient.idade, None);
        assert_eq!(patient.status, None);
    }

    #[test]
    fn test_absent_columns_are_not_serialized() {
        let raw = Patient::with_bed("3").to_data_attribute().unwrap();
        assert_eq!(raw, r#"{"leito":"3"}"#);
    }

    #[test]
    fn test_data_attribute_round_trip() {
        let patient = Patient {
            nome: Some("José da Silva".to_string()),
            ..Patient::with_bed("201-A")
        };
        let raw = patient.to_data_attribute().unwrap();
        assert_eq!(Patient::from_data_attribute(Some(&raw)), Some(patient));
    }
}
