//! Specialized collection types

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Stable handle of an entity inside a scene graph
    pub struct EntityId;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;

/// Index handle tagged with the type it points at
///
/// Used for values stored in plain vectors that are never removed
/// (lights), where a generational key would be overkill.
#[derive(Debug)]
pub struct TypedIndex<T> {
    index: usize,
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T> TypedIndex<T> {
    /// Create a new typed index
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get the underlying index
    pub const fn index(&self) -> usize {
        self.index
    }
}

// Manual impls so that `T` does not need to be Copy/Eq itself.
impl<T> Clone for TypedIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedIndex<T> {}

impl<T> PartialEq for TypedIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for TypedIndex<T> {}

impl<T> std::hash::Hash for TypedIndex<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
