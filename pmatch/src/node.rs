//! NFA states and their transitions.

use std::fmt::{self, Display};

use corral::{Id, Relocate, Shift};
use smallvec::SmallVec;

/// Handle to a [`Node`] inside the arena of an [`Nfa`](crate::Nfa).
pub type NodeId<Σ> = Id<Node<Σ>>;

/// Most nodes built by the combinators carry at most two epsilon edges.
const EPSILON_EDGES_HINT: usize = 2;

/// A state in the NFA.
/// Holds at most one transition consuming a symbol and any number of epsilon transitions, never both.
#[derive(Debug, Clone)]
pub struct Node<Σ> {
    accepting: bool,
    symbol_edge: Option<(NodeId<Σ>, Σ)>,
    epsilon_edges: SmallVec<[NodeId<Σ>; EPSILON_EDGES_HINT]>,
}

impl<Σ> Node<Σ> {
    /// Creates a node without any transitions.
    pub fn new(accepting: bool) -> Self {
        Self {
            accepting,
            symbol_edge: None,
            epsilon_edges: SmallVec::new(),
        }
    }

    /// Sets the accept flag.
    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Returns the accept flag.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Replaces the transition consuming `symbol`.
    pub fn set_symbol_edge(&mut self, target: NodeId<Σ>, symbol: Σ) {
        debug_assert!(self.epsilon_edges.is_empty(), "node already has epsilon transitions");
        self.symbol_edge = Some((target, symbol));
    }

    /// Returns the transition consuming a symbol, if any.
    pub fn symbol_edge(&self) -> Option<(NodeId<Σ>, &Σ)> {
        self.symbol_edge.as_ref().map(|(target, symbol)| (*target, symbol))
    }

    /// Adds an epsilon transition, a target which is already present is ignored.
    pub fn add_epsilon_edge(&mut self, target: NodeId<Σ>) {
        debug_assert!(self.symbol_edge.is_none(), "node already has a symbol transition");
        if !self.epsilon_edges.contains(&target) {
            self.epsilon_edges.push(target);
        }
    }

    /// Targets of the epsilon transitions.
    pub fn epsilon_edges(&self) -> &[NodeId<Σ>] {
        &self.epsilon_edges
    }

    /// True if the node can move without consuming input.
    pub fn has_epsilon_edges(&self) -> bool {
        !self.epsilon_edges.is_empty()
    }
}

impl<Σ> Relocate for Node<Σ> {
    fn relocate(&mut self, shift: Shift) {
        if let Some((target, _)) = self.symbol_edge.as_mut() {
            *target = shift.apply(*target);
        }
        for target in self.epsilon_edges.iter_mut() {
            *target = shift.apply(*target);
        }
    }
}

impl<Σ: Display> Display for Node<Σ> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accepting {
            write!(f, " accept")?;
        }
        if let Some((target, symbol)) = &self.symbol_edge {
            write!(f, " '{symbol}' -> {target}")?;
        }
        for target in &self.epsilon_edges {
            write!(f, " ε -> {target}")?;
        }
        Ok(())
    }
}
