mod api;
mod portal_logic;
mod supabase;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tracing_subscriber::EnvFilter;

use api::AppState;
use portal_logic::SessionStore;
use supabase::Supabase;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_url = std::env::var("SUPABASE_URL")?;
    let api_key = std::env::var("SUPABASE_KEY")?;
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // Conexión centralizada al backend externo
    let store = Supabase::new(base_url, api_key);
    tracing::info!("✅ Backend Vitalia configurado");

    let state = AppState {
        store,
        sessions: Arc::new(SessionStore::new()),
    };

    let app = Router::new()
        .route("/products", get(api::handle_list_products))
        .route("/cart", get(api::handle_get_cart))
        .route("/cart", delete(api::handle_clear_cart))
        .route("/cart/items", post(api::handle_add_cart_item))
        .route("/cart/items/:name", patch(api::handle_update_cart_item))
        .route("/checkout/advance", post(api::handle_checkout_advance))
        .route("/checkout/back", post(api::handle_checkout_back))
        .route("/checkout/reset", post(api::handle_checkout_reset))
        .route("/notices", get(api::handle_list_notices))
        .route("/patients", get(api::handle_list_patients))
        .route("/patients", post(api::handle_create_patient))
        .route("/patients/:id/documents", get(api::handle_list_documents))
        .route("/patients/:id/documents", post(api::handle_upload_document))
        .route("/appointments", get(api::handle_list_appointments))
        .route("/reports", post(api::handle_submit_report))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🚀 Portal Vitalia corriendo en http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
