use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Cliente, Producto, Vendedor, VentaRegistrada};

/// Reference data returned by the `/data` endpoint at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatosIniciales {
    #[serde(default)]
    pub productos: Vec<Producto>,
    #[serde(default)]
    pub vendedores: Vec<Vendedor>,
    #[serde(rename = "clientesPorVendedor", default)]
    pub clientes_por_vendedor: HashMap<String, Vec<Cliente>>,
}

/// Server-side summary of the sales, as returned by `/estadisticas-sheet`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Estadisticas {
    #[serde(default)]
    pub resumen: crate::stats::Resumen,
    #[serde(default)]
    pub vendedores: Vec<VendedorStats>,
    #[serde(default)]
    pub ventas: Vec<VentaRegistrada>,
}

/// Per-seller totals computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendedorStats {
    pub nombre: String,
    #[serde(default, alias = "cantidad_ventas")]
    pub cantidad: u32,
    #[serde(default, alias = "sin_pagar")]
    pub deuda: f64,
    #[serde(default)]
    pub pagado: f64,
    #[serde(default)]
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_datos_iniciales_tolerates_missing_sections() {
        let datos: DatosIniciales = serde_json::from_value(json!({
            "vendedores": ["Juan"],
            "clientesPorVendedor": {"Juan": ["Maria"]}
        }))
        .unwrap();
        assert!(datos.productos.is_empty());
        assert_eq!(datos.vendedores[0].nombre, "Juan");
        assert_eq!(datos.clientes_por_vendedor["Juan"][0].nombre, "Maria");
    }

    #[test]
    fn test_datos_iniciales_rejects_malformed_product() {
        let result: Result<DatosIniciales, _> = serde_json::from_value(json!({
            "productos": [{"id": "uno", "tipo_pizza": "Muzza", "precio": 100}]
        }));
        assert!(result.is_err());
    }
}
