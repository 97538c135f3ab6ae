//! Dashboard aggregates computed from the sales list.
//!
//! Cancelled sales never count. A sale is *cobrada* once it is `pagada` or
//! `entregada`; anything else still owes money.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{EstadoVenta, PaymentMethod, Producto, TipoEntrega, VentaRegistrada};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resumen {
    pub efectivo_cobrado: f64,
    pub transferencia_cobrada: f64,
    pub pendiente_cobro: f64,
    pub total_cobrado: f64,
    pub ventas_sin_pagar: u32,
    pub ventas_pagadas: u32,
    pub ventas_entregadas: u32,
    pub ventas_totales: u32,
    /// Units sent out for delivery.
    pub total_delivery: u32,
    /// Units picked up at the store.
    pub total_retiro: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnidadesProducto {
    pub producto_id: i64,
    pub tipo_pizza: String,
    pub unidades: u32,
}

/// How many pizzas of each type every catalogue product stands for.
///
/// The default is the current menu: two pizza types, sold alone or in
/// combos. Products missing from the map count only when their name is
/// itself one of the types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboMap {
    pub tipos: Vec<String>,
    /// Product name to pizzas per type.
    #[serde(default)]
    pub productos: BTreeMap<String, BTreeMap<String, u32>>,
}

const MUZZA: &str = "Muzza";
const MUZZA_JAMON: &str = "Muzza y Jamón";

impl Default for ComboMap {
    fn default() -> Self {
        let productos: BTreeMap<String, BTreeMap<String, u32>> = [
            ("Muzza", 1, 0),
            ("Muzza y Jamón", 0, 1),
            ("La dupla | 1 Muzza + 1 Muzza y Jamón", 1, 1),
            ("Mix Familia grande | 2 Muzza + 1 Muzza y Jamón", 2, 1),
            ("Mix Juntada amigos | 3 Muzza + 2 Muzza y jamón", 3, 2),
        ]
        .into_iter()
        .map(|(combo, muzza, jamon)| {
            let pizzas = BTreeMap::from([(MUZZA.to_string(), muzza), (MUZZA_JAMON.to_string(), jamon)]);
            (combo.to_string(), pizzas)
        })
        .collect();

        Self {
            tipos: vec![MUZZA.to_string(), MUZZA_JAMON.to_string()],
            productos,
        }
    }
}

impl ComboMap {
    /// Adds the pizzas in `cantidad` units of product `nombre` to `conteo`,
    /// which is indexed like [`tipos`](ComboMap::tipos).
    fn sumar(&self, nombre: &str, cantidad: u32, conteo: &mut [u32]) {
        if let Some(pizzas) = self.productos.get(nombre) {
            for (tipo, total) in self.tipos.iter().zip(conteo.iter_mut()) {
                *total += pizzas.get(tipo).copied().unwrap_or(0) * cantidad;
            }
        } else if let Some(index) = self.tipos.iter().position(|tipo| tipo == nombre) {
            conteo[index] += cantidad;
        }
    }

    fn contar<'a>(&self, ventas: impl Iterator<Item = &'a VentaRegistrada>) -> Vec<PizzasPorTipo> {
        let mut conteo = vec![0; self.tipos.len()];
        for item in ventas.flat_map(|v| v.items.iter()) {
            self.sumar(&item.tipo, item.cantidad, &mut conteo);
        }
        self.tipos
            .iter()
            .zip(conteo)
            .map(|(tipo, pizzas)| PizzasPorTipo {
                tipo: tipo.clone(),
                pizzas,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PizzasPorTipo {
    pub tipo: String,
    pub pizzas: u32,
}

/// Money owed to and collected by one seller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesgloseVendedor {
    pub nombre: String,
    pub cantidad_ventas: u32,
    /// Pizzas sold, combos broken down by type.
    pub pizzas: Vec<PizzasPorTipo>,
    pub deuda_efectivo: f64,
    pub deuda_transferencia: f64,
    pub deuda_total: f64,
    pub pagado_efectivo: f64,
    pub pagado_transferencia: f64,
    pub pagado_total: f64,
    pub sin_pagar: Vec<VentaRegistrada>,
}

fn vigentes(ventas: &[VentaRegistrada]) -> impl Iterator<Item = &VentaRegistrada> {
    ventas.iter().filter(|v| v.estado != EstadoVenta::Cancelada)
}

fn unidades(venta: &VentaRegistrada) -> u32 {
    venta.items.iter().map(|item| item.cantidad).sum()
}

pub fn resumir(ventas: &[VentaRegistrada]) -> Resumen {
    let mut resumen = Resumen::default();

    for venta in vigentes(ventas) {
        resumen.ventas_totales += 1;

        match venta.estado {
            EstadoVenta::Pagada => resumen.ventas_pagadas += 1,
            EstadoVenta::Entregada => resumen.ventas_entregadas += 1,
            _ => resumen.ventas_sin_pagar += 1,
        }

        if venta.estado.is_cobrada() {
            resumen.total_cobrado += venta.total;
            match venta.payment_method {
                PaymentMethod::Efectivo => resumen.efectivo_cobrado += venta.total,
                PaymentMethod::Transferencia => resumen.transferencia_cobrada += venta.total,
                _ => {}
            }
        } else {
            resumen.pendiente_cobro += venta.total;
        }

        match venta.tipo_entrega {
            Some(TipoEntrega::Retiro) => resumen.total_retiro += unidades(venta),
            // Rows written before pickup existed were all deliveries.
            Some(TipoEntrega::Delivery) | None => resumen.total_delivery += unidades(venta),
        }
    }

    resumen
}

/// Units sold per catalogue product, in catalogue order.
pub fn unidades_por_producto(
    productos: &[Producto],
    ventas: &[VentaRegistrada],
) -> Vec<UnidadesProducto> {
    productos
        .iter()
        .map(|producto| {
            let unidades = vigentes(ventas)
                .flat_map(|v| v.items.iter())
                .filter(|item| item.product_id == producto.id)
                .map(|item| item.cantidad)
                .sum();
            UnidadesProducto {
                producto_id: producto.id,
                tipo_pizza: producto.tipo_pizza.clone(),
                unidades,
            }
        })
        .collect()
}

/// Pizzas sold per type over every non-cancelled sale.
pub fn pizzas_por_tipo(ventas: &[VentaRegistrada], combos: &ComboMap) -> Vec<PizzasPorTipo> {
    combos.contar(vigentes(ventas))
}

pub fn desglose_vendedor(
    nombre: &str,
    ventas: &[VentaRegistrada],
    combos: &ComboMap,
) -> DesgloseVendedor {
    let mut desglose = DesgloseVendedor {
        nombre: nombre.to_string(),
        pizzas: combos.contar(vigentes(ventas).filter(|v| v.vendedor == nombre)),
        ..Default::default()
    };

    for venta in vigentes(ventas).filter(|v| v.vendedor == nombre) {
        desglose.cantidad_ventas += 1;

        if venta.estado.is_cobrada() {
            desglose.pagado_total += venta.total;
            match venta.payment_method {
                PaymentMethod::Efectivo => desglose.pagado_efectivo += venta.total,
                PaymentMethod::Transferencia => desglose.pagado_transferencia += venta.total,
                _ => {}
            }
        } else {
            desglose.deuda_total += venta.total;
            match venta.payment_method {
                PaymentMethod::Efectivo => desglose.deuda_efectivo += venta.total,
                PaymentMethod::Transferencia => desglose.deuda_transferencia += venta.total,
                _ => {}
            }
            desglose.sin_pagar.push(venta.clone());
        }
    }

    desglose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductoItem;

    fn venta(
        id: i64,
        vendedor: &str,
        estado: EstadoVenta,
        payment_method: PaymentMethod,
        tipo_entrega: Option<TipoEntrega>,
        cantidad: u32,
    ) -> VentaRegistrada {
        let item = ProductoItem::new(1, "Muzza", cantidad, 1000.0);
        VentaRegistrada {
            id,
            vendedor: vendedor.into(),
            cliente: format!("cliente {id}"),
            telefono_cliente: None,
            total: item.total(),
            payment_method,
            estado,
            tipo_entrega,
            created_at: None,
            items: vec![item],
        }
    }

    fn ventas() -> Vec<VentaRegistrada> {
        use EstadoVenta::*;
        use PaymentMethod::*;
        vec![
            venta(1, "Juan", Pagada, Efectivo, Some(TipoEntrega::Retiro), 2),
            venta(2, "Juan", SinPagar, Transferencia, Some(TipoEntrega::Delivery), 1),
            venta(3, "Ana", Entregada, Transferencia, None, 3),
            venta(4, "Ana", Cancelada, Efectivo, Some(TipoEntrega::Retiro), 10),
            venta(5, "Juan", Pendiente, Efectivo, Some(TipoEntrega::Retiro), 1),
        ]
    }

    #[test]
    fn test_resumir_excludes_canceladas() {
        let resumen = resumir(&ventas());

        assert_eq!(resumen.ventas_totales, 4);
        assert_eq!(resumen.ventas_pagadas, 1);
        assert_eq!(resumen.ventas_entregadas, 1);
        assert_eq!(resumen.ventas_sin_pagar, 2);
        assert_eq!(resumen.efectivo_cobrado, 2000.0);
        assert_eq!(resumen.transferencia_cobrada, 3000.0);
        assert_eq!(resumen.total_cobrado, 5000.0);
        assert_eq!(resumen.pendiente_cobro, 2000.0);
        assert_eq!(resumen.total_retiro, 3);
        assert_eq!(resumen.total_delivery, 4);
    }

    #[test]
    fn test_resumir_empty() {
        assert_eq!(resumir(&[]), Resumen::default());
    }

    #[test]
    fn test_unidades_por_producto() {
        let productos = vec![
            Producto::new(1, "Muzza", "", 1000.0),
            Producto::new(2, "Fugazzeta", "", 1200.0),
        ];
        let conteo = unidades_por_producto(&productos, &ventas());

        assert_eq!(conteo[0].unidades, 7);
        assert_eq!(conteo[1].tipo_pizza, "Fugazzeta");
        assert_eq!(conteo[1].unidades, 0);
    }

    #[test]
    fn test_desglose_vendedor() {
        let desglose = desglose_vendedor("Juan", &ventas(), &ComboMap::default());

        assert_eq!(desglose.cantidad_ventas, 3);
        assert_eq!(desglose.pagado_efectivo, 2000.0);
        assert_eq!(desglose.deuda_transferencia, 1000.0);
        assert_eq!(desglose.deuda_efectivo, 1000.0);
        assert_eq!(desglose.deuda_total, 2000.0);
        assert_eq!(
            desglose.sin_pagar.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![2, 5]
        );
        assert_eq!(desglose.pizzas[0].pizzas, 4);
        assert_eq!(desglose.pizzas[1].pizzas, 0);
    }

    fn con_items(id: i64, vendedor: &str, estado: EstadoVenta, items: Vec<ProductoItem>) -> VentaRegistrada {
        VentaRegistrada {
            items,
            ..venta(id, vendedor, estado, PaymentMethod::Efectivo, None, 0)
        }
    }

    #[test]
    fn test_pizzas_por_tipo_expands_combos() {
        let ventas = vec![
            con_items(
                1,
                "Juan",
                EstadoVenta::Pagada,
                vec![
                    ProductoItem::new(3, "Mix Familia grande | 2 Muzza + 1 Muzza y Jamón", 2, 15000.0),
                    ProductoItem::new(2, "Muzza y Jamón", 1, 6000.0),
                ],
            ),
            con_items(
                2,
                "Ana",
                EstadoVenta::SinPagar,
                vec![
                    ProductoItem::new(4, "La dupla | 1 Muzza + 1 Muzza y Jamón", 1, 10000.0),
                    ProductoItem::new(9, "Fugazzeta", 5, 7000.0),
                ],
            ),
            con_items(
                3,
                "Ana",
                EstadoVenta::Cancelada,
                vec![ProductoItem::new(1, "Muzza", 10, 5000.0)],
            ),
        ];
        let combos = ComboMap::default();

        assert_eq!(
            pizzas_por_tipo(&ventas, &combos),
            vec![
                PizzasPorTipo { tipo: "Muzza".into(), pizzas: 5 },
                PizzasPorTipo { tipo: "Muzza y Jamón".into(), pizzas: 4 },
            ]
        );

        let ana = desglose_vendedor("Ana", &ventas, &combos);
        assert_eq!(ana.pizzas.iter().map(|p| p.pizzas).collect::<Vec<_>>(), vec![1, 1]);
    }

    #[test]
    fn test_combo_map_from_toml() {
        let combos: ComboMap = toml::from_str(
            r#"
            tipos = ["Napo"]

            [productos."Promo Napo x2"]
            Napo = 2
            "#,
        )
        .unwrap();
        let ventas = vec![con_items(
            1,
            "Juan",
            EstadoVenta::Pagada,
            vec![
                ProductoItem::new(7, "Promo Napo x2", 3, 9000.0),
                ProductoItem::new(8, "Napo", 1, 5000.0),
                ProductoItem::new(1, "Muzza", 4, 5000.0),
            ],
        )];

        assert_eq!(pizzas_por_tipo(&ventas, &combos)[0].pizzas, 7);
    }

    #[test]
    fn test_resumen_accepts_partial_backend_payload() {
        let resumen: Resumen =
            serde_json::from_value(serde_json::json!({"total_cobrado": 150.5, "ventas_totales": 3}))
                .unwrap();
        assert_eq!(resumen.total_cobrado, 150.5);
        assert_eq!(resumen.ventas_totales, 3);
        assert_eq!(resumen.total_delivery, 0);
    }
}
