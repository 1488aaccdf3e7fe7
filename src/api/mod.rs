// Módulos
pub mod patients;
pub mod pharmacy;

// Re-exportar los handlers que registra main
pub use patients::{
    handle_create_patient, handle_list_appointments, handle_list_documents, handle_list_patients,
    handle_submit_report, handle_upload_document,
};
pub use pharmacy::{
    handle_add_cart_item, handle_checkout_advance, handle_checkout_back, handle_checkout_reset,
    handle_clear_cart, handle_get_cart, handle_list_notices, handle_list_products,
    handle_update_cart_item,
};

use std::sync::Arc;

use axum::http::HeaderMap;
use serde::Serialize;

use crate::portal_logic::SessionStore;
use crate::supabase::Supabase;

/// Estado compartido de los handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Supabase,
    pub sessions: Arc<SessionStore>,
}

/// Encabezado con el id de sesión que manda el portal
pub const SESSION_HEADER: &str = "x-session-id";

/// Sesión del pedido; sin encabezado se cae a una sesión anónima común.
pub fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonima")
        .to_string()
}

/// Respuesta uniforme del API: datos más un error opcional en texto, el
/// mismo triple datos/error que consume el portal.
#[derive(Debug, Serialize)]
pub struct ApiReply<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T> ApiReply<T> {
    pub fn ok(data: T) -> Self {
        ApiReply { data, error: None }
    }

    pub fn fail(data: T, error: impl std::fmt::Display) -> Self {
        ApiReply {
            data,
            error: Some(error.to_string()),
        }
    }
}
