//! Entity trait: identity that survives field edits.

/// Entity marker + minimal interface.
///
/// Sale lines and packages are entities: editing a quantity does not make a
/// line a different line.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
