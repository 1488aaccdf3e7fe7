use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::client::{eq, StoreError, Supabase};
use crate::portal_logic::models::{Availability, Product};
use crate::portal_logic::money::{format_display_price, parse_display_price};

/// Imagen usada cuando el producto no trae una propia
pub const PLACEHOLDER_IMAGE: &str = "/assets/product-placeholder.png";

/// Trae el catálogo visible y lo normaliza. Una fila que no se puede
/// interpretar se descarta con un aviso en el log; no hay reintentos.
pub async fn fetch_products(store: &Supabase) -> Result<Vec<Product>, StoreError> {
    let rows = store.select("products", &[("visible", eq("true"))]).await?;

    let mut products = Vec::with_capacity(rows.len());
    for row in rows {
        match normalize_product(&row) {
            Ok(p) => products.push(p),
            Err(motivo) => tracing::warn!("fila de producto descartada: {}", motivo),
        }
    }
    Ok(products)
}

/// Convierte una fila cruda en Product. El precio puede venir como número
/// o como cadena de pantalla ("R$ 1.234,56"); la imagen ausente cae al
/// placeholder y la disponibilidad se deriva del stock.
fn normalize_product(row: &Value) -> Result<Product, String> {
    let id = row["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| format!("id inválido: {}", row["id"]))?;

    let name = row["name"].as_str().unwrap_or("").to_string();
    if name.is_empty() {
        return Err(format!("producto {} sin nombre", id));
    }

    let price = coerce_price(&row["price"]).map_err(|e| format!("precio de {}: {}", name, e))?;
    let old_price = match &row["old_price"] {
        Value::Null => None,
        v => coerce_price(v).ok(),
    };

    let image = match row["image"].as_str() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER_IMAGE.to_string(),
    };

    let stock = row["stock"].as_i64().unwrap_or(0);

    Ok(Product {
        id,
        name,
        category: row["category"].as_str().unwrap_or("General").to_string(),
        price_display: format_display_price(price),
        price,
        old_price,
        image,
        availability: if stock > 0 {
            Availability::Disponible
        } else {
            Availability::Agotado
        },
    })
}

fn coerce_price(v: &Value) -> Result<Decimal, String> {
    match v {
        // El número JSON se reparsea como texto para no pasar por f64
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .map_err(|e| e.to_string()),
        Value::String(s) => parse_display_price(s).map_err(|e| e.to_string()),
        otro => Err(format!("tipo inesperado: {}", otro)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn fila_base() -> Value {
        json!({
            "id": "7f2c1b1e-42aa-4f6e-9a5e-2f8a33b9c001",
            "name": "Paracetamol 500mg",
            "category": "Analgésicos",
            "price": 19.9,
            "old_price": null,
            "image": "/img/paracetamol.png",
            "stock": 12,
        })
    }

    #[test]
    fn normaliza_una_fila_completa() {
        let p = normalize_product(&fila_base()).unwrap();
        assert_eq!(p.name, "Paracetamol 500mg");
        assert_eq!(p.price, dec!(19.9));
        assert_eq!(p.price_display, "$ 19,90");
        assert_eq!(p.availability, Availability::Disponible);
        assert_eq!(p.image, "/img/paracetamol.png");
    }

    #[test]
    fn el_precio_puede_llegar_como_cadena() {
        let mut fila = fila_base();
        fila["price"] = json!("R$ 1.234,56");
        let p = normalize_product(&fila).unwrap();
        assert_eq!(p.price, dec!(1234.56));
    }

    #[test]
    fn la_imagen_ausente_cae_al_placeholder() {
        let mut fila = fila_base();
        fila["image"] = json!(null);
        assert_eq!(normalize_product(&fila).unwrap().image, PLACEHOLDER_IMAGE);

        fila["image"] = json!("");
        assert_eq!(normalize_product(&fila).unwrap().image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn sin_stock_queda_agotado() {
        let mut fila = fila_base();
        fila["stock"] = json!(0);
        assert_eq!(
            normalize_product(&fila).unwrap().availability,
            Availability::Agotado
        );

        fila["stock"] = json!(null);
        assert_eq!(
            normalize_product(&fila).unwrap().availability,
            Availability::Agotado
        );
    }

    #[test]
    fn rechaza_filas_sin_id_o_sin_precio_legible() {
        let mut fila = fila_base();
        fila["id"] = json!("no-es-uuid");
        assert!(normalize_product(&fila).is_err());

        let mut fila = fila_base();
        fila["price"] = json!("a convenir");
        assert!(normalize_product(&fila).is_err());
    }

    #[test]
    fn conserva_el_precio_anterior_cuando_existe() {
        let mut fila = fila_base();
        fila["old_price"] = json!(24.5);
        assert_eq!(normalize_product(&fila).unwrap().old_price, Some(dec!(24.5)));
    }
}
