use rust_decimal::Decimal;
use thiserror::Error;

/// Errores al interpretar un precio mostrado
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("precio sin dígitos")]
    Empty,
    #[error("precio ilegible: {0}")]
    Malformed(String),
}

/// Convierte un precio de pantalla ("R$ 1.234,56", "$ 19,90") a Decimal.
/// El formato es el de la tienda: '.' agrupa miles y ',' es el decimal.
/// Una cadena que no encaje se rechaza; nunca se convierte en cero.
pub fn parse_display_price(raw: &str) -> Result<Decimal, PriceError> {
    let normalized: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return Err(PriceError::Empty);
    }
    normalized
        .parse::<Decimal>()
        .map_err(|_| PriceError::Malformed(raw.to_string()))
}

/// Formatea un monto como precio de pantalla: "$ 1.234,56"
pub fn format_display_price(value: Decimal) -> String {
    let raw = value.round_dp(2).to_string();
    let (entero, decimales) = match raw.split_once('.') {
        Some((e, d)) => (e.to_string(), format!("{:0<2}", d)),
        None => (raw, "00".to_string()),
    };

    let negativo = entero.starts_with('-');
    let digitos = entero.trim_start_matches('-');

    // Agrupar de a tres desde la derecha
    let mut agrupado = String::new();
    for (i, c) in digitos.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }
    let entero: String = agrupado.chars().rev().collect();

    format!("$ {}{},{}", if negativo { "-" } else { "" }, entero, decimales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn interpreta_precio_con_miles_y_simbolo() {
        assert_eq!(parse_display_price("R$ 1.234,56"), Ok(dec!(1234.56)));
    }

    #[test]
    fn interpreta_precio_simple() {
        assert_eq!(parse_display_price("$ 19,90"), Ok(dec!(19.90)));
        assert_eq!(parse_display_price("19,9"), Ok(dec!(19.9)));
        assert_eq!(parse_display_price("250"), Ok(dec!(250)));
    }

    #[test]
    fn rechaza_precio_sin_digitos() {
        assert_eq!(parse_display_price("a convenir"), Err(PriceError::Empty));
        assert_eq!(parse_display_price(""), Err(PriceError::Empty));
    }

    #[test]
    fn rechaza_precio_con_basura() {
        assert!(matches!(
            parse_display_price("$ 12,34,56"),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            parse_display_price("10 unidades"),
            Err(PriceError::Malformed(_))
        ));
    }

    #[test]
    fn formatea_con_miles_y_dos_decimales() {
        assert_eq!(format_display_price(dec!(1234.5)), "$ 1.234,50");
        assert_eq!(format_display_price(dec!(19.9)), "$ 19,90");
        assert_eq!(format_display_price(dec!(0)), "$ 0,00");
        assert_eq!(format_display_price(dec!(1000000)), "$ 1.000.000,00");
    }

    #[test]
    fn formato_e_interpretacion_coinciden() {
        let precio = dec!(9876.54);
        assert_eq!(parse_display_price(&format_display_price(precio)), Ok(precio));
    }
}
