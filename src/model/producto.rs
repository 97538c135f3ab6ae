use serde::{Deserialize, Serialize};

use crate::validators::{self, ValidationError};

/// A pizza (or combo) offered for sale.
///
/// Created through the admin panel; everywhere else it is read-only
/// reference data loaded into [`AppState`](crate::state::AppState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub tipo_pizza: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio: f64,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
}

fn activo_por_defecto() -> bool {
    true
}

impl Producto {
    /// Creates a new active Producto.
    pub fn new(id: i64, tipo_pizza: impl Into<String>, descripcion: impl Into<String>, precio: f64) -> Self {
        Self {
            id,
            tipo_pizza: tipo_pizza.into(),
            descripcion: descripcion.into(),
            precio,
            activo: true,
        }
    }
}

/// Raw admin-form input for creating or editing a product.
///
/// `precio` is kept as typed so that `"$ 1,500"` style input can be
/// validated before it becomes a number.
#[derive(Debug, Clone, Default)]
pub struct ProductoForm {
    pub tipo_pizza: String,
    pub descripcion: Option<String>,
    pub precio: String,
    pub activo: Option<bool>,
}

/// Body sent to the product endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductoPayload {
    pub tipo_pizza: String,
    pub descripcion: String,
    pub precio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

impl ProductoForm {
    /// Converts validated input into the wire payload.
    pub fn to_payload(&self) -> Result<ProductoPayload, ValidationError> {
        let precio = validators::parse_price(&self.precio).ok_or_else(|| {
            ValidationError::new("Precio", "Precio debe ser un precio válido (ej: 123.45)")
        })?;
        Ok(ProductoPayload {
            tipo_pizza: self.tipo_pizza.trim().to_string(),
            descripcion: self.descripcion.clone().unwrap_or_default(),
            precio,
            activo: self.activo,
        })
    }
}
