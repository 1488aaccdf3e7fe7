use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Modelo para producto del catálogo de farmacia.
/// Inmutable una vez traído del backend; la fuente de verdad es externa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    /// Precio ya formateado para mostrar ("$ 1.234,56")
    pub price_display: String,
    pub old_price: Option<Decimal>,
    pub image: String,
    pub availability: Availability,
}

/// Etiqueta de disponibilidad derivada del stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Disponible,
    Agotado,
}

/// Modelo para paciente del directorio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub institution_id: Option<Uuid>,
    pub status: PatientStatus,
    /// Avance del tratamiento en porcentaje (0..=100)
    pub treatment_progress: i32,
    pub financial_status: String,
    /// Fecha de alta ya formateada (DD/MM/AAAA)
    pub registration_date: String,
    pub avatar: Option<String>,
    pub national_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Pending,
    Inactive,
}

impl PatientStatus {
    /// Mapea el valor crudo del backend; cualquier cosa desconocida queda pendiente.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "active" => PatientStatus::Active,
            "inactive" => PatientStatus::Inactive,
            _ => PatientStatus::Pending,
        }
    }
}

/// Sub-registro de dirección del paciente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Datos para el alta de un paciente nuevo.
/// El backend crea la identidad con email + contraseña (o el documento
/// de identidad como respaldo) y aquí viajan los campos extendidos.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: Option<String>,
    pub national_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub institution_id: Option<Uuid>,
}

/// Modelo para cita médica
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor: String,
    pub specialty: String,
    /// Fecha y hora ya formateadas (DD/MM/AAAA HH:MM)
    pub scheduled_at: String,
    pub status: String,
    pub notes: Option<String>,
}

/// Modelo para documento clínico vinculado a un paciente
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientDocument {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub institution_id: Option<Uuid>,
    pub kind: String,
    pub file_url: String,
    pub uploaded_at: String,
}

/// Reporte de síntomas enviado desde el formulario del portal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomReport {
    pub patient_id: Uuid,
    pub institution_id: Option<Uuid>,
    pub description: String,
    pub severity: String,
    pub onset_date: Option<NaiveDate>,
}
