//! Aggregate root trait for the catalog domain models.

/// Aggregate root marker + minimal interface.
///
/// Identity and version are assigned by the persistence collaborator after the
/// aggregate has been validated, so both are optional until then. The domain
/// carries `version` for optimistic concurrency but never enforces it.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier, if it has been persisted.
    fn id(&self) -> Option<&Self::Id>;

    /// Version counter as last assigned by persistence.
    fn version(&self) -> Option<u64>;

    /// True once persistence has assigned an identifier.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
