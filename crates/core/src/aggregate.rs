//! Aggregate roots: the consistency boundary a document's rules run inside.

/// Aggregate root marker + minimal interface.
///
/// A sale and all of its lines form one aggregate; line edits and state
/// transitions always go through the root so validation sees the whole
/// document.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Number of accepted mutations (line edits, transitions) so far.
    fn version(&self) -> u64;
}
