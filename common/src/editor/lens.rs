use std::fmt;

use super::collection::Collection;

/// Names one collection inside an aggregate configuration `C`.
///
/// `replace` copies the aggregate and swaps only that collection, so siblings
/// are passed through unchanged.
pub struct Lens<C, T> {
    pub name: &'static str,
    pub get: fn(&C) -> &Collection<T>,
    pub set: fn(&mut C, Collection<T>),
}

impl<C, T> Lens<C, T> {
    pub fn view<'a>(&self, config: &'a C) -> &'a Collection<T> {
        (self.get)(config)
    }

    pub fn replace(&self, config: &C, collection: Collection<T>) -> C
    where
        C: Clone,
    {
        let mut next = config.clone();
        (self.set)(&mut next, collection);
        next
    }
}

impl<C, T> Clone for Lens<C, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, T> Copy for Lens<C, T> {}

// Two lenses over the same aggregate are equal when they name the same collection.
impl<C, T> PartialEq for Lens<C, T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<C, T> fmt::Debug for Lens<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens").field("name", &self.name).finish()
    }
}
