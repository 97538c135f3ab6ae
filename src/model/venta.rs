//! Orders ("ventas") and their line items.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validators::ValidationError;

/// How the customer pays.
///
/// Listed sales are decoded leniently: casing is ignored and values this
/// client does not know become [`PaymentMethod::Otro`] instead of failing
/// the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Efectivo,
    Tarjeta,
    Transferencia,
    Qr,
    Otro,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Tarjeta => "tarjeta",
            PaymentMethod::Transferencia => "transferencia",
            PaymentMethod::Qr => "qr",
            PaymentMethod::Otro => "otro",
        }
    }

    fn from_wire(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "efectivo" => PaymentMethod::Efectivo,
            "tarjeta" => PaymentMethod::Tarjeta,
            "transferencia" => PaymentMethod::Transferencia,
            "qr" => PaymentMethod::Qr,
            _ => PaymentMethod::Otro,
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match PaymentMethod::from_wire(s) {
            PaymentMethod::Otro => Err(ValidationError::new("Método de pago", "Método de pago no válido")),
            method => Ok(method),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map_or_else(PaymentMethod::default, |v| PaymentMethod::from_wire(&v)))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick-up at the store or home delivery.
///
/// Anything that is not `retiro` decodes as delivery, which is what rows
/// written before pickup existed were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoEntrega {
    #[default]
    Retiro,
    Delivery,
}

impl TipoEntrega {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoEntrega::Retiro => "retiro",
            TipoEntrega::Delivery => "delivery",
        }
    }
}

impl FromStr for TipoEntrega {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "retiro" => Ok(TipoEntrega::Retiro),
            "delivery" | "envio" => Ok(TipoEntrega::Delivery),
            _ => Err(ValidationError::new("Tipo de entrega", "Tipo de entrega no válido")),
        }
    }
}

impl<'de> Deserialize<'de> for TipoEntrega {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.trim().eq_ignore_ascii_case("retiro") {
            Ok(TipoEntrega::Retiro)
        } else {
            Ok(TipoEntrega::Delivery)
        }
    }
}

impl fmt::Display for TipoEntrega {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status as tracked by the backend.
///
/// The backend's update endpoint only accepts `"sin pagar"` with a space, so
/// that is what goes out; `sin_pagar` is still read. Unknown statuses decode
/// as [`EstadoVenta::Otro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoVenta {
    #[default]
    Pendiente,
    #[serde(rename = "sin pagar")]
    SinPagar,
    EnProceso,
    Pagada,
    Entregada,
    Cancelada,
    Otro,
}

impl EstadoVenta {
    /// Paid orders count toward collected money.
    pub fn is_cobrada(&self) -> bool {
        matches!(self, EstadoVenta::Pagada | EstadoVenta::Entregada)
    }

    fn from_wire(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pendiente" => EstadoVenta::Pendiente,
            "sin_pagar" | "sin pagar" => EstadoVenta::SinPagar,
            "en_proceso" | "en proceso" => EstadoVenta::EnProceso,
            "pagada" => EstadoVenta::Pagada,
            "entregada" => EstadoVenta::Entregada,
            "cancelada" => EstadoVenta::Cancelada,
            _ => EstadoVenta::Otro,
        }
    }
}

impl FromStr for EstadoVenta {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match EstadoVenta::from_wire(s) {
            EstadoVenta::Otro => Err(ValidationError::new("Estado", "Estado no válido")),
            estado => Ok(estado),
        }
    }
}

impl<'de> Deserialize<'de> for EstadoVenta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map_or_else(EstadoVenta::default, |v| EstadoVenta::from_wire(&v)))
    }
}

/// One line of an order.
///
/// The total is derived from quantity and unit price and is never stored;
/// lines are removed and re-added rather than edited.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductoItem {
    /// Row id in the backend detail table, present only on read-back.
    #[serde(default)]
    pub detalle_id: Option<i64>,
    #[serde(default, alias = "tipo_pizza")]
    pub tipo: String,
    pub product_id: i64,
    pub cantidad: u32,
    pub precio: f64,
}

impl ProductoItem {
    pub fn new(product_id: i64, tipo: impl Into<String>, cantidad: u32, precio: f64) -> Self {
        Self {
            detalle_id: None,
            tipo: tipo.into(),
            product_id,
            cantidad,
            precio,
        }
    }

    pub fn total(&self) -> f64 {
        f64::from(self.cantidad) * self.precio
    }
}

impl Serialize for ProductoItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.detalle_id.is_some() { 6 } else { 5 };
        let mut s = serializer.serialize_struct("ProductoItem", len)?;
        if let Some(detalle_id) = self.detalle_id {
            s.serialize_field("detalle_id", &detalle_id)?;
        }
        s.serialize_field("tipo", &self.tipo)?;
        s.serialize_field("product_id", &self.product_id)?;
        s.serialize_field("cantidad", &self.cantidad)?;
        s.serialize_field("precio", &self.precio)?;
        s.serialize_field("total", &self.total())?;
        s.end()
    }
}

/// An order being built in the order form.
///
/// Items are only reachable through [`agregar_item`](Venta::agregar_item) and
/// [`eliminar_item`](Venta::eliminar_item), so [`total`](Venta::total) always
/// reflects the current lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Venta {
    pub vendedor: String,
    pub cliente: String,
    pub telefono_cliente: Option<i64>,
    items: Vec<ProductoItem>,
    pub payment_method: PaymentMethod,
    pub tipo_entrega: TipoEntrega,
    pub estado: EstadoVenta,
}

/// Wire shape of a submitted order.
#[derive(Serialize)]
struct VentaPayload<'a> {
    vendedor: &'a str,
    cliente: &'a str,
    items: &'a [ProductoItem],
    payment_method: PaymentMethod,
    tipo_entrega: TipoEntrega,
    estado: EstadoVenta,
    #[serde(skip_serializing_if = "Option::is_none")]
    telefono_cliente: Option<i64>,
}

impl Venta {
    pub fn new(vendedor: impl Into<String>, cliente: impl Into<String>) -> Self {
        Self {
            vendedor: vendedor.into(),
            cliente: cliente.into(),
            ..Default::default()
        }
    }

    pub fn items(&self) -> &[ProductoItem] {
        &self.items
    }

    pub fn agregar_item(&mut self, item: ProductoItem) {
        self.items.push(item);
    }

    /// Removes the line at `index`. Out-of-range indexes leave the order
    /// untouched and return `None`.
    pub fn eliminar_item(&mut self, index: usize) -> Option<ProductoItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn total(&self) -> f64 {
        self.items.iter().fold(0.0, |acc, item| acc + item.total())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Projects the order to the body expected by the submit endpoint.
    pub fn to_json(&self) -> serde_json::Value {
        let payload = VentaPayload {
            vendedor: &self.vendedor,
            cliente: &self.cliente,
            items: &self.items,
            payment_method: self.payment_method,
            tipo_entrega: self.tipo_entrega,
            estado: self.estado,
            telefono_cliente: self.telefono_cliente,
        };
        // Every field is a plain string, number or enum.
        serde_json::to_value(payload).unwrap_or(serde_json::Value::Null)
    }
}

/// A sale as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentaRegistrada {
    pub id: i64,
    pub vendedor: String,
    pub cliente: String,
    #[serde(default)]
    pub telefono_cliente: Option<i64>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub estado: EstadoVenta,
    /// Missing on old rows; those count as delivery.
    #[serde(default)]
    pub tipo_entrega: Option<TipoEntrega>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<ProductoItem>,
}

/// One detail row in an update: an existing row (with `detalle_id`) gets its
/// quantity replaced, a row without one is added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetalleUpdate {
    pub detalle_id: Option<i64>,
    pub producto_id: i64,
    pub cantidad: u32,
}

impl From<&ProductoItem> for DetalleUpdate {
    fn from(item: &ProductoItem) -> Self {
        Self {
            detalle_id: item.detalle_id,
            producto_id: item.product_id,
            cantidad: item.cantidad,
        }
    }
}

/// Partial update sent when editing an existing sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VentaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<EstadoVenta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_entrega: Option<TipoEntrega>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono_cliente: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub productos: Vec<DetalleUpdate>,
    /// Detail rows to drop.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub productos_eliminar: Vec<i64>,
}
