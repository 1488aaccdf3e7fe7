use rust_decimal::Decimal;
use serde::Serialize;

use super::models::Product;

/// Línea del carrito, identificada por nombre de producto.
/// Invariante: quantity > 0; una línea que llega a cero se elimina.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub name: String,
    pub price: Decimal,
    pub price_display: String,
    pub image: String,
    pub category: String,
    pub quantity: i32,
}

/// Carrito de compras en memoria de la sesión.
/// Conserva el orden de inserción para mostrarlo tal cual.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Agrega `qty` unidades del producto. Si ya existe una línea con el
    /// mismo nombre solo suma la cantidad; no se duplican líneas.
    pub fn add_item(&mut self, product: &Product, qty: i32) {
        let qty = qty.max(1);
        if let Some(item) = self.items.iter_mut().find(|i| i.name == product.name) {
            item.quantity += qty;
            return;
        }
        self.items.push(CartItem {
            name: product.name.clone(),
            price: product.price,
            price_display: product.price_display.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            quantity: qty,
        });
    }

    /// Ajusta la cantidad de una línea. El resultado se recorta en cero y
    /// en ese caso la línea se elimina. Devuelve la cantidad resultante,
    /// o None si el nombre no estaba en el carrito.
    pub fn update_quantity(&mut self, name: &str, delta: i32) -> Option<i32> {
        let pos = self.items.iter().position(|i| i.name == name)?;
        let nueva = (self.items[pos].quantity + delta).max(0);
        if nueva == 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = nueva;
        }
        Some(nueva)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total del carrito; se recalcula en cada lectura, sin cache.
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
