//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// They are immutable: to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Preco { preco_lista: f64, preco_desconto: f64 }
///
/// impl ValueObject for Preco {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
