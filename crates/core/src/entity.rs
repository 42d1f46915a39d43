//! Entity trait: an identity that stays put while the other fields change.

/// Anything the domain tracks by identity rather than by value.
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// True when both values refer to the same entity, whatever their other fields hold.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
