use chrono::DateTime;
use serde_json::Value;
use uuid::Uuid;

use super::client::{eq, StoreError, Supabase};
use crate::portal_logic::models::Appointment;

/// Citas visibles para un portal: las del paciente o las del doctor.
#[derive(Debug, Clone, Copy)]
pub enum AppointmentScope {
    Patient(Uuid),
    Doctor(Uuid),
}

pub async fn fetch_appointments(
    store: &Supabase,
    scope: AppointmentScope,
) -> Result<Vec<Appointment>, StoreError> {
    let filters = match scope {
        AppointmentScope::Patient(id) => [("patient_id", eq(id))],
        AppointmentScope::Doctor(id) => [("doctor_id", eq(id))],
    };
    let rows = store.select("appointments", &filters).await?;
    Ok(rows.iter().map(normalize_appointment).collect())
}

fn normalize_appointment(row: &Value) -> Appointment {
    Appointment {
        id: row["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or(Uuid::nil()),
        patient_id: row["patient_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or(Uuid::nil()),
        doctor: row["doctor_name"].as_str().unwrap_or("").to_string(),
        specialty: row["specialty"].as_str().unwrap_or("").to_string(),
        scheduled_at: row["scheduled_at"]
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default(),
        status: row["status"].as_str().unwrap_or("pendiente").to_string(),
        notes: row["notes"].as_str().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normaliza_la_cita_con_fecha_formateada() {
        let fila = json!({
            "id": "5b7a9d30-11aa-4f6e-9a5e-2f8a33b9c002",
            "patient_id": "9c0d1e2f-33bb-4c5d-8e9f-0a1b2c3d4e5f",
            "doctor_name": "Dra. Salas",
            "specialty": "Cardiología",
            "scheduled_at": "2026-08-20T15:30:00+00:00",
            "status": "confirmada",
        });
        let cita = normalize_appointment(&fila);
        assert_eq!(cita.doctor, "Dra. Salas");
        assert_eq!(cita.scheduled_at, "20/08/2026 15:30");
        assert!(cita.notes.is_none());
    }

    #[test]
    fn la_fecha_ilegible_queda_vacia() {
        let fila = json!({ "scheduled_at": "mañana" });
        assert_eq!(normalize_appointment(&fila).scheduled_at, "");
    }
}
