use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{session_id, ApiReply, AppState};
use crate::portal_logic::models::Product;
use crate::portal_logic::money::format_display_price;
use crate::portal_logic::search::filter_products;
use crate::portal_logic::{CartItem, Notice, PortalSession};
use crate::supabase;

/// Vista del carrito que consume el portal
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub subtotal_display: String,
    pub stage: String,
}

fn cart_view(sesion: &PortalSession) -> CartView {
    let subtotal = sesion.cart.subtotal();
    CartView {
        items: sesion.cart.items().to_vec(),
        subtotal_display: format_display_price(subtotal),
        subtotal,
        stage: sesion.stage.to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
}

/// GET /products — catálogo visible, con filtro opcional en memoria.
/// Si el backend falla se registra y el catálogo queda vacío, sin reintentos.
pub async fn handle_list_products(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Json<ApiReply<Vec<Product>>> {
    match supabase::fetch_products(&state.store).await {
        Ok(productos) => {
            let data = match params.q.as_deref() {
                Some(q) => filter_products(&productos, q).into_iter().cloned().collect(),
                None => productos,
            };
            Json(ApiReply::ok(data))
        }
        Err(e) => {
            tracing::error!("no se pudo traer el catálogo: {}", e);
            Json(ApiReply::fail(Vec::new(), e))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemBody {
    pub product: Product,
    #[serde(default = "una_unidad")]
    pub quantity: i32,
}

fn una_unidad() -> i32 {
    1
}

/// POST /cart/items — agrega el producto a la sesión.
pub async fn handle_add_cart_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AddItemBody>,
) -> Json<ApiReply<CartView>> {
    let sid = session_id(&headers);
    let view = state.sessions.with_session(&sid, |s| {
        s.add_to_cart(&body.product, body.quantity);
        cart_view(s)
    });
    Json(ApiReply::ok(view))
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    pub delta: i32,
}

/// PATCH /cart/items/:name — ajusta la cantidad de una línea.
pub async fn handle_update_cart_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateItemBody>,
) -> Json<ApiReply<CartView>> {
    let sid = session_id(&headers);
    let view = state.sessions.with_session(&sid, |s| {
        s.update_cart_quantity(&name, body.delta);
        cart_view(s)
    });
    Json(ApiReply::ok(view))
}

/// GET /cart
pub async fn handle_get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiReply<CartView>> {
    let sid = session_id(&headers);
    let view = state.sessions.with_session(&sid, |s| cart_view(s));
    Json(ApiReply::ok(view))
}

/// DELETE /cart
pub async fn handle_clear_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiReply<CartView>> {
    let sid = session_id(&headers);
    let view = state.sessions.with_session(&sid, |s| {
        s.clear_cart();
        cart_view(s)
    });
    Json(ApiReply::ok(view))
}

/// POST /checkout/advance — carrito → checkout → pago exitoso.
pub async fn handle_checkout_advance(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiReply<CartView>> {
    let sid = session_id(&headers);
    let view = state.sessions.with_session(&sid, |s| {
        s.advance_checkout();
        cart_view(s)
    });
    Json(ApiReply::ok(view))
}

/// POST /checkout/back — regreso de checkout al carrito.
pub async fn handle_checkout_back(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiReply<CartView>> {
    let sid = session_id(&headers);
    let view = state.sessions.with_session(&sid, |s| {
        s.back_checkout();
        cart_view(s)
    });
    Json(ApiReply::ok(view))
}

/// POST /checkout/reset — vuelta al carrito para una orden nueva.
pub async fn handle_checkout_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiReply<CartView>> {
    let sid = session_id(&headers);
    let view = state.sessions.with_session(&sid, |s| {
        s.reset_checkout();
        cart_view(s)
    });
    Json(ApiReply::ok(view))
}

/// GET /notices — notificaciones vigentes de la sesión.
pub async fn handle_list_notices(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiReply<Vec<Notice>>> {
    let sid = session_id(&headers);
    let avisos = state
        .sessions
        .with_session(&sid, |s| s.notices.active().to_vec());
    Json(ApiReply::ok(avisos))
}
