// Módulos
pub mod cart;
pub mod checkout;
pub mod models;
pub mod money;
pub mod notify;
pub mod search;
pub mod sessions;

// Re-exportar los tipos principales
pub use cart::{Cart, CartItem};
pub use checkout::CheckoutStage;
pub use notify::{Notice, NoticeLevel, NoticeQueue};
pub use sessions::{PortalSession, SessionStore};
