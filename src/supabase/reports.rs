use serde_json::json;
use uuid::Uuid;

use super::client::{StoreError, Supabase};
use crate::portal_logic::models::SymptomReport;

/// Inserta un reporte de síntomas del formulario del portal y devuelve el
/// id de la fila creada.
pub async fn submit_report(store: &Supabase, report: &SymptomReport) -> Result<Uuid, StoreError> {
    if report.description.trim().is_empty() {
        return Err(StoreError::Invalid("el reporte necesita una descripción".into()));
    }

    let row = store
        .insert(
            "symptom_reports",
            json!({
                "patient_id": report.patient_id,
                "institution_id": report.institution_id,
                "description": report.description,
                "severity": report.severity,
                "onset_date": report.onset_date,
            }),
        )
        .await?;

    row["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| StoreError::Malformed("reporte sin id de retorno".into()))
}
