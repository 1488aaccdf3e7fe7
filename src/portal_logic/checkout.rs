use std::str::FromStr;

/// Etapas del flujo de compra
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutStage {
    #[default]
    Cart,
    Checkout,
    PaymentSuccess,
}

impl CheckoutStage {
    /// Siguiente etapa del flujo lineal. PagoExitoso es terminal.
    pub fn next(self) -> CheckoutStage {
        match self {
            CheckoutStage::Cart => CheckoutStage::Checkout,
            CheckoutStage::Checkout => CheckoutStage::PaymentSuccess,
            CheckoutStage::PaymentSuccess => CheckoutStage::PaymentSuccess,
        }
    }

    /// Retroceso permitido únicamente desde Checkout hacia el carrito.
    pub fn back(self) -> CheckoutStage {
        match self {
            CheckoutStage::Checkout => CheckoutStage::Cart,
            otra => otra,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == CheckoutStage::PaymentSuccess
    }
}

impl ToString for CheckoutStage {
    fn to_string(&self) -> String {
        match self {
            CheckoutStage::Cart => "CARRITO".to_string(),
            CheckoutStage::Checkout => "CHECKOUT".to_string(),
            CheckoutStage::PaymentSuccess => "PAGO_EXITOSO".to_string(),
        }
    }
}

impl FromStr for CheckoutStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARRITO" => Ok(CheckoutStage::Cart),
            "CHECKOUT" => Ok(CheckoutStage::Checkout),
            "PAGO_EXITOSO" => Ok(CheckoutStage::PaymentSuccess),
            _ => Err(format!("Etapa desconocida: {}", s)),
        }
    }
}
