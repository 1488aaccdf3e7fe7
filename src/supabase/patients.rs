use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::{json, Value};
use uuid::Uuid;

use super::client::{eq, StoreError, Supabase};
use crate::portal_logic::models::{Address, Patient, PatientDraft, PatientStatus};

/// Trae los perfiles con rol paciente, opcionalmente acotados a una
/// institución, y los normaliza con valores por defecto.
pub async fn fetch_patients(
    store: &Supabase,
    institution: Option<Uuid>,
) -> Result<Vec<Patient>, StoreError> {
    let mut filters = vec![("role", eq("patient"))];
    if let Some(inst) = institution {
        filters.push(("institution_id", eq(inst)));
    }
    let rows = store.select("profiles", &filters).await?;
    Ok(rows.iter().map(normalize_patient).collect())
}

/// Alta de paciente en dos pasos: primero la identidad (email + contraseña,
/// o el documento de identidad como respaldo) y después el PATCH del perfil
/// que el alta crea sola. Si el segundo paso falla, la identidad queda
/// huérfana; no hay transacción compensatoria.
pub async fn create_patient(store: &Supabase, draft: &PatientDraft) -> Result<Uuid, StoreError> {
    validate_email(&draft.email)?;

    let password = match (&draft.password, &draft.national_id) {
        (Some(p), _) if !p.is_empty() => p.clone(),
        (_, Some(doc)) if !doc.is_empty() => doc.clone(),
        _ => {
            return Err(StoreError::Invalid(
                "se requiere contraseña o documento de identidad".into(),
            ))
        }
    };

    // 1. Registrar la identidad con los metadatos básicos
    let user_id = store
        .sign_up(
            &draft.email,
            &password,
            json!({ "name": draft.name, "phone": draft.phone, "role": "patient" }),
        )
        .await?;

    // 2. Completar el perfil auto-creado con los campos extendidos
    store
        .update(
            "profiles",
            &[("id", eq(user_id))],
            json!({
                "national_id": draft.national_id,
                "birth_date": draft.birth_date,
                "street": draft.street,
                "city": draft.city,
                "state": draft.state,
                "postal_code": draft.postal_code,
                "institution_id": draft.institution_id,
            }),
        )
        .await?;

    Ok(user_id)
}

fn validate_email(email: &str) -> Result<(), StoreError> {
    let re = Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(StoreError::Invalid(format!("correo inválido: {}", email)))
    }
}

/// Convierte una fila cruda de perfil en Patient. Los campos ausentes caen
/// a cadenas vacías y la fecha de alta se formatea para mostrar.
fn normalize_patient(row: &Value) -> Patient {
    let address = match (
        row["street"].as_str().unwrap_or(""),
        row["city"].as_str().unwrap_or(""),
    ) {
        ("", "") => None,
        (street, city) => Some(Address {
            street: street.to_string(),
            city: city.to_string(),
            state: row["state"].as_str().unwrap_or("").to_string(),
            postal_code: row["postal_code"].as_str().unwrap_or("").to_string(),
        }),
    };

    Patient {
        id: row["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or(Uuid::nil()),
        name: row["name"].as_str().unwrap_or("").to_string(),
        email: row["email"].as_str().unwrap_or("").to_string(),
        phone: row["phone"].as_str().unwrap_or("").to_string(),
        institution_id: row["institution_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok()),
        status: PatientStatus::from_raw(row["status"].as_str().unwrap_or("")),
        treatment_progress: row["treatment_progress"].as_i64().unwrap_or(0) as i32,
        financial_status: row["financial_status"].as_str().unwrap_or("").to_string(),
        registration_date: format_registration_date(row["created_at"].as_str().unwrap_or("")),
        avatar: row["avatar"].as_str().map(str::to_string),
        national_id: row["national_id"].as_str().map(str::to_string),
        birth_date: row["birth_date"]
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
        address,
    }
}

fn format_registration_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normaliza_un_perfil_completo() {
        let fila = json!({
            "id": "5b7a9d30-11aa-4f6e-9a5e-2f8a33b9c002",
            "name": "Ana Ruiz",
            "email": "ana@example.com",
            "phone": "5512345678",
            "institution_id": "9c0d1e2f-33bb-4c5d-8e9f-0a1b2c3d4e5f",
            "status": "active",
            "treatment_progress": 60,
            "financial_status": "al día",
            "created_at": "2026-03-15T10:30:00+00:00",
            "national_id": "RUIA900101",
            "birth_date": "1990-01-01",
            "street": "Av. Reforma 100",
            "city": "CDMX",
            "state": "CDMX",
            "postal_code": "06600",
        });

        let p = normalize_patient(&fila);
        assert_eq!(p.name, "Ana Ruiz");
        assert_eq!(p.status, PatientStatus::Active);
        assert_eq!(p.registration_date, "15/03/2026");
        assert_eq!(p.treatment_progress, 60);
        let dir = p.address.expect("debe traer dirección");
        assert_eq!(dir.city, "CDMX");
    }

    #[test]
    fn los_campos_ausentes_caen_a_valores_por_defecto() {
        let fila = json!({ "id": "5b7a9d30-11aa-4f6e-9a5e-2f8a33b9c002" });
        let p = normalize_patient(&fila);

        assert_eq!(p.name, "");
        assert_eq!(p.email, "");
        assert_eq!(p.status, PatientStatus::Pending);
        assert_eq!(p.registration_date, "");
        assert!(p.address.is_none());
        assert!(p.birth_date.is_none());
    }

    #[test]
    fn el_estado_desconocido_queda_pendiente() {
        assert_eq!(PatientStatus::from_raw("archived"), PatientStatus::Pending);
        assert_eq!(PatientStatus::from_raw("inactive"), PatientStatus::Inactive);
    }

    #[test]
    fn valida_el_formato_del_correo() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("sin-arroba").is_err());
        assert!(validate_email("a@b").is_err());
    }
}
