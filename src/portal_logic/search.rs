use super::models::Product;

/// Filtro en memoria del catálogo: coincide por nombre o categoría,
/// sin distinguir mayúsculas. Una consulta vacía devuelve todo.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&q) || p.category.to_lowercase().contains(&q))
        .collect()
}
