//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A unit of measure is the typical example here: two `Uom`s with the same
/// symbol and digits round quantities identically, so they are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
