use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A handle to a value living in a [`Corral`](crate::Corral).
/// Handles are only minted by the arena, so a handle obtained from one arena always names a live slot in it.
pub struct Id<T> {
    index: usize,
    _boo: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            _boo: PhantomData,
        }
    }

    /// Position of the slot inside its arena.
    pub fn index(self) -> usize {
        self.index
    }
}

// Manual impls, derives would put the bounds on T.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Maps handles of an absorbed arena onto their new slots. MARK: Shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    offset: usize,
}

impl Shift {
    pub(crate) fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Rewrites a handle of the donor arena into a handle of the receiving arena.
    pub fn apply<T>(self, id: Id<T>) -> Id<T> {
        Id::new(id.index + self.offset)
    }
}

/// Values which hold handles into their own arena.
/// Called on every value moved by [`Corral::absorb`](crate::Corral::absorb), so the stored handles keep pointing at the same neighbours.
pub trait Relocate {
    /// Rewrites every stored handle with the given shift.
    fn relocate(&mut self, shift: Shift);
}
