use std::collections::HashMap;

use crate::model::{Cliente, DatosIniciales, Producto, Vendedor, Venta, VentaRegistrada};

/// Everything the screens need between requests.
///
/// Owned by the [`StateActor`](super::StateActor); other code only sees clones
/// handed out through [`StateClient`](super::StateClient).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub productos: Vec<Producto>,
    pub vendedores: Vec<Vendedor>,
    pub clientes_por_vendedor: HashMap<String, Vec<Cliente>>,
    pub venta_actual: Option<Venta>,
    pub ventas_listado: Vec<VentaRegistrada>,
}

impl AppState {
    /// Replaces the reference data wholesale.
    pub fn cargar_datos(&mut self, datos: DatosIniciales) {
        self.productos = datos.productos;
        self.vendedores = datos.vendedores;
        self.clientes_por_vendedor = datos.clientes_por_vendedor;
    }

    /// Starts a fresh, empty order, discarding any order in progress.
    pub fn crear_venta(&mut self) -> &Venta {
        self.venta_actual.insert(Venta::default())
    }

    pub fn limpiar_venta(&mut self) {
        self.venta_actual = None;
    }

    pub fn set_ventas(&mut self, ventas: Vec<VentaRegistrada>) {
        self.ventas_listado = ventas;
    }

    pub fn producto(&self, id: i64) -> Option<&Producto> {
        self.productos.iter().find(|p| p.id == id)
    }

    /// Customers of a seller; unknown sellers have none.
    pub fn clientes_de(&self, vendedor: &str) -> &[Cliente] {
        self.clientes_por_vendedor
            .get(vendedor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductoItem;

    fn datos() -> DatosIniciales {
        let mut clientes = HashMap::new();
        clientes.insert(
            "Juan".to_string(),
            vec![Cliente { id: 1, nombre: "Maria".into(), telefono: None }],
        );
        DatosIniciales {
            productos: vec![Producto::new(1, "Muzza", "", 5000.0)],
            vendedores: vec![Vendedor::new(1, "Juan")],
            clientes_por_vendedor: clientes,
        }
    }

    #[test]
    fn test_cargar_datos_replaces_reference_data() {
        let mut state = AppState::default();
        state.cargar_datos(datos());
        state.cargar_datos(DatosIniciales {
            productos: vec![Producto::new(9, "Fugazzeta", "", 7000.0)],
            ..Default::default()
        });

        assert_eq!(state.productos.len(), 1);
        assert_eq!(state.productos[0].id, 9);
        assert!(state.vendedores.is_empty());
        assert!(state.clientes_de("Juan").is_empty());
    }

    #[test]
    fn test_crear_venta_replaces_order_in_progress() {
        let mut state = AppState::default();
        state.crear_venta();
        if let Some(venta) = state.venta_actual.as_mut() {
            venta.agregar_item(ProductoItem::new(1, "Muzza", 1, 5000.0));
        }

        let fresh = state.crear_venta();
        assert!(fresh.is_empty());

        state.limpiar_venta();
        assert!(state.venta_actual.is_none());
    }

    #[test]
    fn test_lookups() {
        let mut state = AppState::default();
        state.cargar_datos(datos());
        assert_eq!(state.producto(1).map(|p| p.tipo_pizza.as_str()), Some("Muzza"));
        assert!(state.producto(2).is_none());
        assert_eq!(state.clientes_de("Juan")[0].nombre, "Maria");
        assert!(state.clientes_de("Pedro").is_empty());
    }
}
