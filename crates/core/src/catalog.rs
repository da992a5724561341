//! Fixed option catalogs offered by the report form.
//!
//! Sustainability goals (ODS), intervention types, identity document types and
//! geographic scopes. Stored values are the exact labels below, so changing a
//! label orphans every row that already carries it.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sustainability goals
// ---------------------------------------------------------------------------

/// The ten sustainability goals a project may align with, in display order.
pub const ODS_OPTIONS: [&str; 10] = [
    "ODS 1: Fin de la Pobreza",
    "ODS 3: Salud y Bienestar",
    "ODS 4: Educacion de Calidad",
    "ODS 6: Agua Limpia y Saneamiento",
    "ODS 7: Energia Asequible",
    "ODS 9: Industria, Innovacion e Infraestructura",
    "ODS 10: Reduccion de las Desigualdades",
    "ODS 11: Ciudades Sostenibles",
    "ODS 12: Produccion Responsable",
    "ODS 13: Accion por el Clima",
];

/// Short radar-axis labels, index-aligned with [`ODS_OPTIONS`].
pub const ODS_SHORT_LABELS: [&str; 10] = [
    "Pobreza",
    "Salud",
    "Educacion",
    "Agua",
    "Energia",
    "Industria",
    "Desigualdades",
    "Ciudades",
    "Produccion",
    "Clima",
];

/// Whether `label` is one of the catalog goals.
pub fn is_known_goal(label: &str) -> bool {
    ODS_OPTIONS.contains(&label)
}

// ---------------------------------------------------------------------------
// Intervention types
// ---------------------------------------------------------------------------

/// The six intervention types; a project carries at most one.
pub const INTERVENTION_TYPES: [&str; 6] = [
    "Transferencia tecnologica",
    "Capacitacion",
    "Desarrollo de prototipos",
    "Consultoria tecnica",
    "Investigacion aplicada",
    "Acompañamiento comunitario",
];

/// Validate an intervention type. The empty string means "not selected".
pub fn validate_intervention_type(value: &str) -> Result<(), String> {
    if value.is_empty() || INTERVENTION_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid intervention type '{value}'. Must be one of: {}",
            INTERVENTION_TYPES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

/// Identity document presented by the report's responsible student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Cedula de Ciudadania (national ID).
    #[serde(rename = "CC")]
    NationalId,
    /// Cedula de Extranjeria (foreign resident ID).
    #[serde(rename = "CE")]
    ForeignId,
    /// Tarjeta de Identidad (minor ID).
    #[serde(rename = "TI")]
    MinorId,
    /// Pasaporte.
    #[serde(rename = "PP")]
    Passport,
    /// NIT (tax ID).
    #[serde(rename = "NIT")]
    TaxId,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        Self::NationalId,
        Self::ForeignId,
        Self::MinorId,
        Self::Passport,
        Self::TaxId,
    ];

    /// Convert from the stored code.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Invalid document type '{s}'. Must be one of: CC, CE, TI, PP, NIT"))
    }

    /// The stored code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "CC",
            Self::ForeignId => "CE",
            Self::MinorId => "TI",
            Self::Passport => "PP",
            Self::TaxId => "NIT",
        }
    }

    /// Label shown in the document selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NationalId => "Cedula de Ciudadania (CC)",
            Self::ForeignId => "Cedula de Extranjeria (CE)",
            Self::MinorId => "Tarjeta de Identidad (TI)",
            Self::Passport => "Pasaporte (PP)",
            Self::TaxId => "NIT",
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Geographic reach of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Nacional,
    Internacional,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Self::Nacional, Self::Internacional];

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "Nacional" => Ok(Self::Nacional),
            "Internacional" => Ok(Self::Internacional),
            _ => Err(format!(
                "Invalid scope '{s}'. Must be one of: Nacional, Internacional"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nacional => "Nacional",
            Self::Internacional => "Internacional",
        }
    }
}
