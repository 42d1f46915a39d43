//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and never change after construction: a new
/// value replaces the old one. `Summary` in `stockroom-inventory` is one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Totals { count: usize, value: f64 }
///
/// impl ValueObject for Totals {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
