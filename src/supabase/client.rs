use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

/// Errores al hablar con el backend externo
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("error de red: {0}")]
    Network(#[from] reqwest::Error),
    #[error("el servicio respondió {status}: {body}")]
    Service { status: u16, body: String },
    #[error("respuesta ilegible: {0}")]
    Malformed(String),
    #[error("datos inválidos: {0}")]
    Invalid(String),
}

/// Arma un filtro de igualdad en la sintaxis del API de filas ("eq.valor")
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Cliente del backend externo: API de filas estilo PostgREST, alta de
/// identidades y almacenamiento de archivos, todo bajo una misma URL base.
#[derive(Debug, Clone)]
pub struct Supabase {
    http: Client,
    base_url: String,
    api_key: String,
}

impl Supabase {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Supabase {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// GET de filas con filtros. Devuelve las filas crudas; la
    /// normalización a tipos propios ocurre en cada módulo.
    pub async fn select(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let mut req = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*")]);
        for (col, filtro) in filters {
            req = req.query(&[(*col, filtro.as_str())]);
        }
        let resp = Self::ok_or_service_error(req.send().await?).await?;
        Ok(resp.json::<Vec<Value>>().await?)
    }

    /// Inserta una fila y devuelve la representación que guardó el backend.
    pub async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        let resp = Self::ok_or_service_error(resp).await?;
        let mut rows = resp.json::<Vec<Value>>().await?;
        if rows.is_empty() {
            return Err(StoreError::Malformed("insert sin fila de retorno".into()));
        }
        Ok(rows.remove(0))
    }

    /// PATCH sobre las filas que cumplan los filtros.
    pub async fn update(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: Value,
    ) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let mut req = self
            .http
            .patch(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&patch);
        for (col, filtro) in filters {
            req = req.query(&[(*col, filtro.as_str())]);
        }
        Self::ok_or_service_error(req.send().await?).await?;
        Ok(())
    }

    /// Alta de identidad con email/contraseña y metadatos libres.
    /// Devuelve el id de la identidad creada.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<Uuid, StoreError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let body = json!({ "email": email, "password": password, "data": metadata });
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = Self::ok_or_service_error(resp).await?;
        let value = resp.json::<Value>().await?;

        // Según la configuración, la identidad llega en la raíz o bajo "user"
        let id = value["id"]
            .as_str()
            .or_else(|| value["user"]["id"].as_str())
            .ok_or_else(|| StoreError::Malformed("alta sin id de identidad".into()))?;
        Uuid::parse_str(id).map_err(|_| StoreError::Malformed(format!("id inválido: {}", id)))
    }

    /// Sube un archivo al bucket y devuelve su URL pública.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;
        Self::ok_or_service_error(resp).await?;
        Ok(self.public_url(bucket, path))
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    async fn ok_or_service_error(
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, StoreError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(StoreError::Service { status, body })
    }
}
