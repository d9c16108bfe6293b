use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the first ward, as submitted by the unit select
pub const PRIMEIRA_ENFERMARIA: &str = "1ª Enfermaria";

/// Name of the intensive care unit, as submitted by the unit select
pub const UTI: &str = "UTI";

/// Fixed bed numbering of a hospital unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BedCatalog {
    pub unit: &'static str, // e.g. "UTI"
    pub first: u16,         // e.g. 1
    pub last: u16,          // e.g. 6, inclusive
}

impl BedCatalog {
    /// Bed identifiers in ascending order, as strings
    pub fn values(&self) -> impl Iterator<Item = String> {
        (self.first..=self.last).map(|bed| bed.to_string())
    }

    pub fn len(&self) -> usize {
        usize::from(self.last - self.first) + 1
    }

    pub fn contains(&self, bed: &str) -> bool {
        bed.parse::<u16>()
            .map(|n| (self.first..=self.last).contains(&n) && n.to_string() == bed)
            .unwrap_or(false)
    }
}

/// Units with a fixed bed catalog. Every other unit takes a free-text bed.
pub const BED_CATALOGS: &[BedCatalog] = &[
    BedCatalog {
        unit: PRIMEIRA_ENFERMARIA,
        first: 101,
        last: 114,
    },
    BedCatalog {
        unit: UTI,
        first: 1,
        last: 6,
    },
];

/// Hospital unit (unidade) a patient is assigned to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    PrimeiraEnfermaria,
    Uti,
    Other(String),
}

impl Unit {
    /// Parses the value submitted by the unit select.
    ///
    /// Matching is exact: no trimming and no case folding, so `"uti"` is
    /// `Unit::Other`.
    ///
    /// # Example
    /// ```rust
    /// use form_paciente::models::units::Unit;
    ///
    /// assert_eq!(Unit::parse("UTI"), Unit::Uti);
    /// assert_eq!(Unit::parse("uti"), Unit::Other("uti".to_string()));
    /// ```
    pub fn parse(value: &str) -> Self {
        match value {
            PRIMEIRA_ENFERMARIA => Self::PrimeiraEnfermaria,
            UTI => Self::Uti,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PrimeiraEnfermaria => PRIMEIRA_ENFERMARIA,
            Self::Uti => UTI,
            Self::Other(name) => name.as_str(),
        }
    }

    /// The fixed catalog for this unit, if it has one
    pub fn bed_catalog(&self) -> Option<&'static BedCatalog> {
        let name = match self {
            Self::PrimeiraEnfermaria => PRIMEIRA_ENFERMARIA,
            Self::Uti => UTI,
            Self::Other(_) => return None,
        };
        BED_CATALOGS.iter().find(|catalog| catalog.unit == name)
    }

    pub fn has_bed_catalog(&self) -> bool {
        self.bed_catalog().is_some()
    }

    /// Candidate beds for this unit; empty for free-text units
    pub fn bed_values(&self) -> Vec<String> {
        self.bed_catalog()
            .map(|catalog| catalog.values().collect())
            .unwrap_or_default()
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Unit {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Units that have a fixed bed catalog, in catalog order
pub fn known_units() -> Vec<Unit> {
    BED_CATALOGS
        .iter()
        .map(|catalog| Unit::parse(catalog.unit))
        .collect()
}
