use std::collections::HashMap;
use std::sync::Mutex;

use super::cart::Cart;
use super::checkout::CheckoutStage;
use super::models::Product;
use super::notify::{NoticeLevel, NoticeQueue};

/// Estado en memoria de una sesión del portal: carrito, etapa de compra y
/// notificaciones. Se pierde al reiniciar, igual que el carrito del
/// navegador al recargar la página.
#[derive(Debug, Default)]
pub struct PortalSession {
    pub cart: Cart,
    pub stage: CheckoutStage,
    pub notices: NoticeQueue,
}

impl PortalSession {
    pub fn add_to_cart(&mut self, product: &Product, qty: i32) {
        self.cart.add_item(product, qty);
        self.notices.push(
            NoticeLevel::Success,
            format!("✅ *{}* añadido al carrito.", product.name),
        );
    }

    pub fn update_cart_quantity(&mut self, name: &str, delta: i32) {
        if let Some(0) = self.cart.update_quantity(name, delta) {
            self.notices.push(
                NoticeLevel::Info,
                format!("🗑️ *{}* eliminado del carrito.", name),
            );
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.notices.push(NoticeLevel::Info, "🛒 Carrito vacío.");
    }

    /// Avanza el flujo de compra. Completar la transición de Checkout a
    /// PagoExitoso vacía el carrito como efecto de la transición misma,
    /// no de entrar a la etapa.
    pub fn advance_checkout(&mut self) -> CheckoutStage {
        let desde = self.stage;
        self.stage = self.stage.next();
        if desde == CheckoutStage::Checkout && self.stage.is_terminal() {
            self.cart.clear();
            self.notices.push(
                NoticeLevel::Success,
                "🎉 ¡Pago confirmado! Gracias por tu compra.",
            );
        }
        self.stage
    }

    pub fn back_checkout(&mut self) -> CheckoutStage {
        self.stage = self.stage.back();
        self.stage
    }

    /// Vuelve al carrito para empezar una orden nueva.
    pub fn reset_checkout(&mut self) -> CheckoutStage {
        self.stage = CheckoutStage::Cart;
        self.stage
    }
}

/// Mapa de sesiones del portal compartido entre handlers. Dos pedidos casi
/// simultáneos sobre la misma sesión se serializan en el mutex, el análogo
/// de la cola de eventos única del navegador.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, PortalSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ejecuta `f` sobre la sesión indicada, creándola si no existe.
    pub fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut PortalSession) -> T) -> T {
        let mut map = self.sessions.lock().expect("mutex de sesiones envenenado");
        let session = map.entry(id.to_string()).or_default();
        f(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal_logic::models::Availability;
    use rust_decimal_macros::dec;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn producto(nombre: &str, precio: Decimal) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: nombre.to_string(),
            category: "General".to_string(),
            price: precio,
            price_display: format!("$ {}", precio),
            old_price: None,
            image: "/assets/product-placeholder.png".to_string(),
            availability: Availability::Disponible,
        }
    }

    #[test]
    fn completar_la_compra_vacia_el_carrito() {
        let mut sesion = PortalSession::default();
        sesion.add_to_cart(&producto("Paracetamol", dec!(19.9)), 2);

        assert_eq!(sesion.advance_checkout(), CheckoutStage::Checkout);
        assert!(!sesion.cart.is_empty());

        assert_eq!(sesion.advance_checkout(), CheckoutStage::PaymentSuccess);
        assert!(sesion.cart.is_empty());
    }

    #[test]
    fn regresar_desde_checkout_conserva_el_carrito() {
        let mut sesion = PortalSession::default();
        sesion.add_to_cart(&producto("Paracetamol", dec!(19.9)), 1);
        sesion.advance_checkout();

        assert_eq!(sesion.back_checkout(), CheckoutStage::Cart);
        assert_eq!(sesion.cart.item_count(), 1);
    }

    #[test]
    fn quitar_toda_la_cantidad_avisa_la_eliminacion() {
        let mut sesion = PortalSession::default();
        sesion.add_to_cart(&producto("Ibuprofeno", dec!(25)), 2);
        sesion.update_cart_quantity("Ibuprofeno", -2);

        assert!(sesion.cart.is_empty());
        let avisos = sesion.notices.active();
        assert!(avisos
            .iter()
            .any(|n| n.message.contains("eliminado del carrito")));
    }

    #[test]
    fn el_store_crea_sesiones_bajo_demanda() {
        let store = SessionStore::new();
        let subtotal = store.with_session("abc", |s| {
            s.add_to_cart(&producto("A", dec!(100)), 1);
            s.cart.subtotal()
        });
        assert_eq!(subtotal, dec!(100));

        // La misma sesión conserva su estado; otra sesión arranca vacía
        assert_eq!(store.with_session("abc", |s| s.cart.item_count()), 1);
        assert!(store.with_session("otra", |s| s.cart.is_empty()));
    }
}
