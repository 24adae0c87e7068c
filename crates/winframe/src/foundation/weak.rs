//! Non-owning references into slot-map arenas

use std::fmt;
use std::hash::{Hash, Hasher};

use slotmap::{Key, SlotMap};

/// Weak reference to an arena slot
///
/// Holds a slot key and nothing else: it never keeps the slot alive and never
/// takes part in teardown. Two references are equal when they name the same
/// slot, and the empty reference equals only another empty one. Because slot
/// keys carry a generation, resolving a reference whose slot has since been
/// removed yields `None` rather than some unrelated value.
pub struct WeakRef<K: Key> {
    key: Option<K>,
}

impl<K: Key> WeakRef<K> {
    /// Reference to the slot `key`
    pub const fn new(key: K) -> Self {
        Self { key: Some(key) }
    }

    /// Reference to nothing
    pub const fn none() -> Self {
        Self { key: None }
    }

    /// Whether this refers to nothing
    pub const fn is_none(&self) -> bool {
        self.key.is_none()
    }

    /// Whether this refers to some slot (live or not)
    pub const fn is_some(&self) -> bool {
        self.key.is_some()
    }

    /// Resolve against `arena`; `None` for the empty reference or a removed slot
    pub fn upgrade<'a, V>(&self, arena: &'a SlotMap<K, V>) -> Option<&'a V> {
        arena.get(self.key?)
    }

    /// Mutable [`WeakRef::upgrade`]
    pub fn upgrade_mut<'a, V>(&self, arena: &'a mut SlotMap<K, V>) -> Option<&'a mut V> {
        arena.get_mut(self.key?)
    }

    /// Clear the reference
    pub fn reset(&mut self) {
        self.key = None;
    }
}

impl<K: Key> Clone for WeakRef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Key> Copy for WeakRef<K> {}

impl<K: Key> Default for WeakRef<K> {
    fn default() -> Self {
        Self::none()
    }
}

impl<K: Key> PartialEq for WeakRef<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Key> Eq for WeakRef<K> {}

impl<K: Key> Hash for WeakRef<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<K: Key> From<K> for WeakRef<K> {
    fn from(key: K) -> Self {
        Self::new(key)
    }
}

impl<K: Key> fmt::Debug for WeakRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(key) => f.debug_tuple("WeakRef").field(&key).finish(),
            None => f.write_str("WeakRef(none)"),
        }
    }
}
