//! Aliases for the hash-set implementation used throughout this crate.

/// Hashset using [`hashbrown::HashSet`].
pub type HashSet<K> = hashbrown::HashSet<K>;
