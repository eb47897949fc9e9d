#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Typed Index Arena
//!
//! Values are pushed into a growable store and addressed by [`Id`] handles instead of references.
//! A whole arena can be moved into another one with [`Corral::absorb`], the moved values rewrite their own handles through [`Relocate`].

mod handle;

use std::ops::{Index, IndexMut};

pub use crate::handle::{Id, Relocate, Shift};

/// Slot count reserved by [`Corral::new`] when no hint is given.
pub const DEFAULT_CAPACITY: usize = 1 << 4;

/// Growable arena of values of a single type.
/// Nothing is freed until the whole arena is dropped, handles stay valid for its entire life.
#[derive(Debug, Clone)]
pub struct Corral<T> {
    fighters: Vec<T>,
}

impl<T> Corral<T> {
    /// Creates an empty arena with room for `capacity_hint` values, [`DEFAULT_CAPACITY`] if none is given.
    pub fn new(capacity_hint: Option<usize>) -> Self {
        Self {
            fighters: Vec::with_capacity(capacity_hint.unwrap_or(DEFAULT_CAPACITY)),
        }
    }

    /// Moves the value into the arena and returns its handle.
    pub fn alloc(&mut self, fighter: T) -> Id<T> {
        let id = Id::new(self.fighters.len());
        self.fighters.push(fighter);
        id
    }

    /// Returns the value behind the handle, None if the handle belongs to a bigger arena.
    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.fighters.get(id.index())
    }

    /// Mutable version of [`Corral::get`].
    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        self.fighters.get_mut(id.index())
    }

    /// Number of values allocated so far.
    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    /// True if nothing was allocated yet.
    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    /// Iterates over all values together with their handles, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
        self.fighters
            .iter()
            .enumerate()
            .map(|(index, fighter)| (Id::new(index), fighter))
    }
}

impl<T: Relocate> Corral<T> {
    /// Takes every value out of `other` and appends it to this arena.
    /// Moved values are relocated, the returned [`Shift`] translates handles which were minted by `other`.
    pub fn absorb(&mut self, other: Corral<T>) -> Shift {
        let shift = Shift::new(self.fighters.len());
        self.fighters.reserve(other.fighters.len());
        self.fighters.extend(other.fighters.into_iter().map(|mut fighter| {
            fighter.relocate(shift);
            fighter
        }));
        shift
    }
}

impl<T> Default for Corral<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> Index<Id<T>> for Corral<T> {
    type Output = T;

    fn index(&self, id: Id<T>) -> &T {
        &self.fighters[id.index()]
    }
}

impl<T> IndexMut<Id<T>> for Corral<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.fighters[id.index()]
    }
}
