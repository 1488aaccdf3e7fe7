use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiReply, AppState};
use crate::portal_logic::models::{
    Appointment, Patient, PatientDocument, PatientDraft, SymptomReport,
};
use crate::supabase::{self, AppointmentScope, StoreError};

fn error_status(e: &StoreError) -> StatusCode {
    match e {
        StoreError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    pub institution_id: Option<Uuid>,
}

/// GET /patients — directorio de pacientes, acotable por institución.
pub async fn handle_list_patients(
    State(state): State<AppState>,
    Query(params): Query<DirectoryQuery>,
) -> Json<ApiReply<Vec<Patient>>> {
    match supabase::fetch_patients(&state.store, params.institution_id).await {
        Ok(pacientes) => Json(ApiReply::ok(pacientes)),
        Err(e) => {
            tracing::error!("no se pudo traer el directorio: {}", e);
            Json(ApiReply::fail(Vec::new(), e))
        }
    }
}

/// POST /patients — alta en dos pasos contra el backend.
pub async fn handle_create_patient(
    State(state): State<AppState>,
    Json(draft): Json<PatientDraft>,
) -> (StatusCode, Json<ApiReply<Option<Uuid>>>) {
    match supabase::create_patient(&state.store, &draft).await {
        Ok(id) => (StatusCode::CREATED, Json(ApiReply::ok(Some(id)))),
        Err(e) => {
            tracing::error!("alta de paciente fallida: {}", e);
            (error_status(&e), Json(ApiReply::fail(None, e)))
        }
    }
}

/// GET /patients/:id/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Json<ApiReply<Vec<PatientDocument>>> {
    match supabase::fetch_documents(&state.store, patient_id).await {
        Ok(docs) => Json(ApiReply::ok(docs)),
        Err(e) => {
            tracing::error!("no se pudieron traer los documentos: {}", e);
            Json(ApiReply::fail(Vec::new(), e))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub kind: String,
    pub filename: String,
    pub institution_id: Option<Uuid>,
}

/// POST /patients/:id/documents — el cuerpo es el archivo tal cual; tipo y
/// nombre viajan en la query.
pub async fn handle_upload_document(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Query(params): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<ApiReply<Option<PatientDocument>>>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    match supabase::upload_document(
        &state.store,
        patient_id,
        params.institution_id,
        &params.kind,
        &params.filename,
        content_type,
        body.to_vec(),
    )
    .await
    {
        Ok(doc) => (StatusCode::CREATED, Json(ApiReply::ok(Some(doc)))),
        Err(e) => {
            tracing::error!("carga de documento fallida: {}", e);
            (error_status(&e), Json(ApiReply::fail(None, e)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppointmentsQuery {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
}

/// GET /appointments — citas del paciente o del doctor según la query.
pub async fn handle_list_appointments(
    State(state): State<AppState>,
    Query(params): Query<AppointmentsQuery>,
) -> (StatusCode, Json<ApiReply<Vec<Appointment>>>) {
    let scope = match (params.patient_id, params.doctor_id) {
        (Some(p), _) => AppointmentScope::Patient(p),
        (_, Some(d)) => AppointmentScope::Doctor(d),
        _ => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiReply::fail(
                    Vec::new(),
                    "se requiere patient_id o doctor_id",
                )),
            )
        }
    };

    match supabase::fetch_appointments(&state.store, scope).await {
        Ok(citas) => (StatusCode::OK, Json(ApiReply::ok(citas))),
        Err(e) => {
            tracing::error!("no se pudieron traer las citas: {}", e);
            (StatusCode::OK, Json(ApiReply::fail(Vec::new(), e)))
        }
    }
}

/// POST /reports — formulario de reporte de síntomas.
pub async fn handle_submit_report(
    State(state): State<AppState>,
    Json(report): Json<SymptomReport>,
) -> (StatusCode, Json<ApiReply<Option<Uuid>>>) {
    match supabase::submit_report(&state.store, &report).await {
        Ok(id) => (StatusCode::CREATED, Json(ApiReply::ok(Some(id)))),
        Err(e) => {
            tracing::error!("reporte de síntomas fallido: {}", e);
            (error_status(&e), Json(ApiReply::fail(None, e)))
        }
    }
}
