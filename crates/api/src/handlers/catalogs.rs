//! Fixed option lists used to render the report form.

use axum::Json;
use impacto_core::catalog::{DocumentType, Scope, INTERVENTION_TYPES, ODS_OPTIONS, ODS_SHORT_LABELS};
use impacto_core::form::FormSection;
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct GoalOption {
    pub label: &'static str,
    pub short_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocumentTypeOption {
    pub code: DocumentType,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SectionOption {
    pub section: FormSection,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Catalogs {
    pub goals: Vec<GoalOption>,
    pub intervention_types: &'static [&'static str],
    pub document_types: Vec<DocumentTypeOption>,
    pub scopes: &'static [Scope],
    pub sections: Vec<SectionOption>,
}

/// GET /api/v1/catalogs (no session required)
pub async fn get_catalogs() -> Json<DataResponse<Catalogs>> {
    let goals = ODS_OPTIONS
        .iter()
        .zip(ODS_SHORT_LABELS.iter())
        .map(|(&label, &short_label)| GoalOption { label, short_label })
        .collect();

    let document_types = DocumentType::ALL
        .iter()
        .map(|&code| DocumentTypeOption {
            code,
            label: code.label(),
        })
        .collect();

    let sections = FormSection::ALL
        .iter()
        .map(|&section| SectionOption {
            section,
            label: section.label(),
        })
        .collect();

    Json(DataResponse {
        data: Catalogs {
            goals,
            intervention_types: &INTERVENTION_TYPES,
            document_types,
            scopes: &Scope::ALL,
            sections,
        },
    })
}
