//! Composite validators for whole forms.
//!
//! Each one applies the single-field [`rules`](super::rules) in order and stops
//! at the first failure.

use super::rules::*;
use super::ValidationError;
use crate::model::{
    EstadoVenta, LoginForm, PaymentMethod, ProductoForm, ProductoItem, UsuarioForm, VendedorForm,
    Venta, VentaUpdate,
};

pub fn validate_producto(form: &ProductoForm) -> Rule {
    required(&form.tipo_pizza, "Tipo de pizza")?;
    min_length(&form.tipo_pizza, 2, "Tipo de pizza")?;
    max_length(&form.tipo_pizza, 100, "Tipo de pizza")?;

    price(&form.precio, "Precio")?;

    if let Some(descripcion) = form.descripcion.as_deref().filter(|d| !d.is_empty()) {
        max_length(descripcion, 500, "Descripción")?;
    }
    Ok(())
}

pub fn validate_vendedor(form: &VendedorForm) -> Rule {
    required(&form.nombre, "Nombre del vendedor")?;
    min_length(&form.nombre, 2, "Nombre del vendedor")?;
    max_length(&form.nombre, 100, "Nombre del vendedor")?;

    if let Some(value) = present(&form.email) {
        email(value, "Email")?;
    }
    if let Some(value) = present(&form.telefono) {
        phone(value, "Teléfono")?;
    }
    if let Some(value) = present(&form.cuit) {
        cuit(value, "CUIT")?;
    }
    Ok(())
}

pub fn validate_venta(venta: &Venta) -> Rule {
    required(&venta.vendedor, "Vendedor")?;
    required(&venta.cliente, "Cliente")?;
    not_empty_array(venta.items(), "Productos")?;
    validate_items(venta.items())
}

/// Edits to an existing sale: statuses the backend would not recognise are
/// rejected, then every replacement row is checked.
pub fn validate_venta_update(update: &VentaUpdate) -> Rule {
    if update.estado == Some(EstadoVenta::Otro) {
        return Err(ValidationError::new("Estado", "Estado no válido"));
    }
    if update.payment_method == Some(PaymentMethod::Otro) {
        return Err(ValidationError::new("Método de pago", "Método de pago no válido"));
    }

    for (index, detalle) in update.productos.iter().enumerate() {
        let field = format!("Producto {}", index + 1);
        if detalle.producto_id == 0 {
            return Err(ValidationError::new(&field, format!("{field}: ID requerido")));
        }
        if detalle.cantidad == 0 {
            return Err(ValidationError::new(
                &field,
                format!("{field}: Cantidad debe ser mayor a 0"),
            ));
        }
    }
    Ok(())
}

fn validate_items(items: &[ProductoItem]) -> Rule {
    for (index, item) in items.iter().enumerate() {
        let field = format!("Producto {}", index + 1);
        if item.product_id == 0 {
            return Err(ValidationError::new(&field, format!("{field}: ID requerido")));
        }
        if item.cantidad == 0 {
            return Err(ValidationError::new(
                &field,
                format!("{field}: Cantidad debe ser mayor a 0"),
            ));
        }
    }
    Ok(())
}

pub fn validate_login(form: &LoginForm) -> Rule {
    required(&form.username, "Usuario")?;
    min_length(&form.username, 3, "Usuario")?;

    required(&form.password, "Contraseña")?;
    min_length(&form.password, 4, "Contraseña")?;
    Ok(())
}

/// `creating` makes the password mandatory; on update a blank password
/// means "keep the current one".
pub fn validate_usuario(form: &UsuarioForm, creating: bool) -> Rule {
    required(&form.username, "Usuario")?;
    min_length(&form.username, 3, "Usuario")?;
    required(&form.rol, "Rol")?;

    if creating || !form.password.is_empty() {
        required(&form.password, "Contraseña")?;
        min_length(&form.password, 4, "Contraseña")?;
    }
    Ok(())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
