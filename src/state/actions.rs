//! Edits applied to the order in progress.
//!
//! These are the order form's equivalent of a resource action: each variant is
//! one user gesture, applied by the state actor to [`AppState::venta_actual`](super::AppState).

use crate::model::{EstadoVenta, PaymentMethod, ProductoItem, TipoEntrega, Venta};

#[derive(Debug, Clone, PartialEq)]
pub enum VentaEdit {
    AgregarItem(ProductoItem),
    /// Out-of-range indexes are ignored.
    EliminarItem(usize),
    SetVendedor(String),
    SetCliente(String),
    SetTelefono(Option<i64>),
    SetPaymentMethod(PaymentMethod),
    SetTipoEntrega(TipoEntrega),
    SetEstado(EstadoVenta),
}

impl Venta {
    pub fn apply(&mut self, edit: VentaEdit) {
        match edit {
            VentaEdit::AgregarItem(item) => self.agregar_item(item),
            VentaEdit::EliminarItem(index) => {
                self.eliminar_item(index);
            }
            VentaEdit::SetVendedor(vendedor) => {
                // Customers belong to a seller, so switching sellers drops the customer.
                if vendedor != self.vendedor {
                    self.cliente.clear();
                    self.telefono_cliente = None;
                }
                self.vendedor = vendedor;
            }
            VentaEdit::SetCliente(cliente) => self.cliente = cliente,
            VentaEdit::SetTelefono(telefono) => self.telefono_cliente = telefono,
            VentaEdit::SetPaymentMethod(method) => self.payment_method = method,
            VentaEdit::SetTipoEntrega(tipo) => self.tipo_entrega = tipo,
            VentaEdit::SetEstado(estado) => self.estado = estado,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_vendedor_clears_cliente() {
        let mut venta = Venta::new("Juan", "Maria");
        venta.telefono_cliente = Some(1123456789);

        venta.apply(VentaEdit::SetVendedor("Juan".into()));
        assert_eq!(venta.cliente, "Maria");

        venta.apply(VentaEdit::SetVendedor("Ana".into()));
        assert_eq!(venta.vendedor, "Ana");
        assert!(venta.cliente.is_empty());
        assert_eq!(venta.telefono_cliente, None);
    }

    #[test]
    fn test_item_edits() {
        let mut venta = Venta::default();
        venta.apply(VentaEdit::AgregarItem(ProductoItem::new(1, "Muzza", 2, 100.0)));
        venta.apply(VentaEdit::EliminarItem(5));
        assert_eq!(venta.total(), 200.0);
        venta.apply(VentaEdit::EliminarItem(0));
        assert!(venta.is_empty());
    }
}
