use serde_json::{json, Value};
use uuid::Uuid;

use super::client::{eq, StoreError, Supabase};
use crate::portal_logic::models::PatientDocument;

/// Bucket del almacén de archivos clínicos
const BUCKET: &str = "patient-assets";

/// Sube el archivo bajo una ruta aleatoria, obtiene su URL pública e
/// inserta la fila que vincula paciente, institución y tipo de documento.
/// El primer paso que falla aborta; los efectos previos no se deshacen.
pub async fn upload_document(
    store: &Supabase,
    patient_id: Uuid,
    institution_id: Option<Uuid>,
    kind: &str,
    filename: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<PatientDocument, StoreError> {
    if bytes.is_empty() {
        return Err(StoreError::Invalid("archivo vacío".into()));
    }

    // 1. Subir el archivo con un prefijo aleatorio para evitar colisiones
    let path = format!(
        "{}/{}-{}",
        patient_id,
        Uuid::new_v4(),
        sanitize_filename(filename)
    );
    let file_url = store.upload_object(BUCKET, &path, content_type, bytes).await?;

    // 2. Insertar la fila de vínculo
    let row = store
        .insert(
            "patient_documents",
            json!({
                "patient_id": patient_id,
                "institution_id": institution_id,
                "kind": kind,
                "file_url": file_url,
            }),
        )
        .await?;

    Ok(normalize_document(&row))
}

/// Documentos ya cargados de un paciente.
pub async fn fetch_documents(
    store: &Supabase,
    patient_id: Uuid,
) -> Result<Vec<PatientDocument>, StoreError> {
    let rows = store
        .select("patient_documents", &[("patient_id", eq(patient_id))])
        .await?;
    Ok(rows.iter().map(normalize_document).collect())
}

fn normalize_document(row: &Value) -> PatientDocument {
    PatientDocument {
        id: row["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or(Uuid::nil()),
        patient_id: row["patient_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or(Uuid::nil()),
        institution_id: row["institution_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok()),
        kind: row["kind"].as_str().unwrap_or("").to_string(),
        file_url: row["file_url"].as_str().unwrap_or("").to_string(),
        uploaded_at: row["created_at"].as_str().unwrap_or("").to_string(),
    }
}

/// Deja solo caracteres seguros para la ruta del bucket.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn limpia_nombres_de_archivo() {
        assert_eq!(sanitize_filename("receta médica.pdf"), "receta_m_dica.pdf");
        assert_eq!(sanitize_filename("examen-2026_v1.png"), "examen-2026_v1.png");
    }

    #[test]
    fn normaliza_la_fila_de_documento() {
        let fila = json!({
            "id": "5b7a9d30-11aa-4f6e-9a5e-2f8a33b9c002",
            "patient_id": "9c0d1e2f-33bb-4c5d-8e9f-0a1b2c3d4e5f",
            "institution_id": null,
            "kind": "receta",
            "file_url": "https://demo/storage/v1/object/public/patient-assets/x.pdf",
            "created_at": "2026-04-01T09:00:00+00:00",
        });
        let doc = normalize_document(&fila);
        assert_eq!(doc.kind, "receta");
        assert!(doc.institution_id.is_none());
        assert!(doc.file_url.ends_with("x.pdf"));
    }
}
