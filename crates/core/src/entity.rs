//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities owned by an aggregate (e.g. kit items) get their identifier from
/// persistence too, so it may be absent.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if assigned.
    fn id(&self) -> Option<&Self::Id>;
}
