//! Entity trait: identity that survives edits.

/// Record with a stable identifier.
///
/// Catalog items and ledger records are both stored as insertion-ordered
/// lists; lookups go through [`position_of`].
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Index of the entity with `id` in an insertion-ordered list.
pub fn position_of<E: Entity>(entities: &[E], id: &E::Id) -> Option<usize> {
    entities.iter().position(|e| e.id() == id)
}

/// True when no two entities in the list share an identifier.
pub fn ids_unique<E: Entity>(entities: &[E]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(entities.len());
    entities.iter().all(|e| seen.insert(e.id().clone()))
}
