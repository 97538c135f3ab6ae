//! Typed records exchanged with the backend and built by the order form.
//!
//! Everything that arrives over the wire is decoded with `serde` into these
//! types; a payload that does not fit is rejected at the boundary instead of
//! producing a half-filled record.

pub mod datos;
pub mod producto;
pub mod usuario;
pub mod vendedor;
pub mod venta;

pub use datos::*;
pub use producto::*;
pub use usuario::*;
pub use vendedor::*;
pub use venta::*;
