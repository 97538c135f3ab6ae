use serde::{Deserialize, Serialize};

/// A seller. Reference data loaded at startup.
///
/// Older payloads list sellers as bare names; those decode with `id == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VendedorRaw")]
pub struct Vendedor {
    pub id: i64,
    pub nombre: String,
}

impl Vendedor {
    pub fn new(id: i64, nombre: impl Into<String>) -> Self {
        Self { id, nombre: nombre.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VendedorRaw {
    Nombre(String),
    Completo {
        #[serde(default)]
        id: i64,
        nombre: String,
    },
}

impl From<VendedorRaw> for Vendedor {
    fn from(raw: VendedorRaw) -> Self {
        match raw {
            VendedorRaw::Nombre(nombre) => Vendedor::new(0, nombre),
            VendedorRaw::Completo { id, nombre } => Vendedor::new(id, nombre),
        }
    }
}

/// A customer attached to a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ClienteRaw")]
pub struct Cliente {
    pub id: i64,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClienteRaw {
    Nombre(String),
    Completo {
        #[serde(default)]
        id: i64,
        nombre: String,
        #[serde(default)]
        telefono: Option<i64>,
    },
}

impl From<ClienteRaw> for Cliente {
    fn from(raw: ClienteRaw) -> Self {
        match raw {
            ClienteRaw::Nombre(nombre) => Cliente { id: 0, nombre, telefono: None },
            ClienteRaw::Completo { id, nombre, telefono } => Cliente {
                id,
                nombre,
                // The backend stores 0 for "no phone".
                telefono: telefono.filter(|t| *t != 0),
            },
        }
    }
}

/// Raw admin-form input for a seller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VendedorForm {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuit: Option<String>,
}

impl VendedorForm {
    pub fn new(nombre: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cliente_accepts_legacy_string() {
        let clientes: Vec<Cliente> =
            serde_json::from_str(r#"["Maria", {"id": 4, "nombre": "Pedro", "telefono": 1123456789}, {"id": 5, "nombre": "Luz", "telefono": 0}]"#)
                .unwrap();
        assert_eq!(clientes[0], Cliente { id: 0, nombre: "Maria".into(), telefono: None });
        assert_eq!(clientes[1].telefono, Some(1123456789));
        assert_eq!(clientes[2].telefono, None);
    }

    #[test]
    fn test_vendedor_accepts_legacy_string() {
        let vendedores: Vec<Vendedor> = serde_json::from_str(r#"["Juan", {"id": 2, "nombre": "Ana"}]"#).unwrap();
        assert_eq!(vendedores, vec![Vendedor::new(0, "Juan"), Vendedor::new(2, "Ana")]);
    }
}
