//! Automaton construction from Thompson combinators.

use std::fmt::{self, Display};

use corral::Corral;
use log::debug;

use crate::error::{NfaError, Result};
use crate::node::{Node, NodeId};

/// A non-deterministic finite automaton with a single start and a single end node.
///
/// Automatons are built from atoms ([`Nfa::symbol`], [`Nfa::epsilon`]) and grown with the
/// Thompson combinators. Every combinator consumes its operands and hands back the combined
/// automaton, so a consumed operand can not be touched again.
///
/// ```
/// use pmatch::Nfa;
///
/// let nfa = Nfa::symbol('a').concat(Nfa::symbol('b').closure());
/// assert_eq!(nfa.match_slice(&['a', 'b', 'b', 'c']), Some(3));
/// assert_eq!(nfa.match_slice(&['b']), None);
/// ```
#[derive(Debug, Clone)]
pub struct Nfa<Σ> {
    pub(crate) nodes: Corral<Node<Σ>>,
    pub(crate) start: NodeId<Σ>,
    pub(crate) end: NodeId<Σ>,
}

impl<Σ> Nfa<Σ> {
    /// Creates the two node automaton for a single symbol, None stands for epsilon.
    pub fn new(symbol: Option<Σ>) -> Self {
        let mut nodes = Corral::new(None);
        let start = nodes.alloc(Node::new(false));
        let end = nodes.alloc(Node::new(true));
        match symbol {
            Some(symbol) => nodes[start].set_symbol_edge(end, symbol),
            None => nodes[start].add_epsilon_edge(end),
        }

        Self { nodes, start, end }
    }

    /// Automaton accepting exactly one `symbol`.
    pub fn symbol(symbol: Σ) -> Self {
        Self::new(Some(symbol))
    }

    /// Automaton accepting the empty sequence.
    pub fn epsilon() -> Self {
        Self::new(None)
    }

    /// Concatenation of one atom per symbol, in order.
    pub fn literal(symbols: impl IntoIterator<Item = Σ>) -> Result<Self> {
        let mut symbols = symbols.into_iter();
        let first = symbols.next().ok_or(NfaError::EmptyLiteral)?;

        Ok(symbols.fold(Self::symbol(first), |nfa, symbol| nfa.concat(Self::symbol(symbol))))
    }

    /// Union of one atom per symbol, accepts any single one of them.
    pub fn one_of(symbols: impl IntoIterator<Item = Σ>) -> Result<Self> {
        let mut symbols = symbols.into_iter();
        let first = symbols.next().ok_or(NfaError::EmptyAlternation)?;

        Ok(symbols.fold(Self::symbol(first), |nfa, symbol| nfa.union(Self::symbol(symbol))))
    }

    // MARK: Combinators

    /// Sequential composition, accepts a match of `self` followed by a match of `other`.
    /// No node is allocated, the old end is linked to the start of `other`.
    pub fn concat(mut self, other: Self) -> Self {
        let shift = self.nodes.absorb(other.nodes);

        let end = &mut self.nodes[self.end];
        end.set_accepting(false);
        end.add_epsilon_edge(shift.apply(other.start));
        self.end = shift.apply(other.end);

        debug!("concat: {} nodes", self.nodes.len());
        self
    }

    /// Alternation, accepts anything either automaton accepts.
    pub fn union(mut self, other: Self) -> Self {
        let shift = self.nodes.absorb(other.nodes);
        let (other_start, other_end) = (shift.apply(other.start), shift.apply(other.end));

        let new_start = self.nodes.alloc(Node::new(false));
        let new_end = self.nodes.alloc(Node::new(true));

        for old_end in [self.end, other_end] {
            let old_end = &mut self.nodes[old_end];
            old_end.set_accepting(false);
            old_end.add_epsilon_edge(new_end);
        }
        self.nodes[new_start].add_epsilon_edge(self.start);
        self.nodes[new_start].add_epsilon_edge(other_start);

        self.start = new_start;
        self.end = new_end;

        debug!("union: {} nodes", self.nodes.len());
        self
    }

    /// Zero or more repetitions (`*`).
    pub fn closure(self) -> Self {
        self.wrap(true, true)
    }

    /// One or more repetitions (`+`).
    pub fn semi_closure(self) -> Self {
        self.wrap(false, true)
    }

    /// Zero or one repetition (`?`).
    pub fn optional(self) -> Self {
        self.wrap(true, false)
    }

    /// Puts a fresh start and end around the body.
    /// `add_skip` links the new start straight to the new end, `add_cycle` links the old end back to the old start.
    fn wrap(mut self, add_skip: bool, add_cycle: bool) -> Self {
        let new_start = self.nodes.alloc(Node::new(false));
        let new_end = self.nodes.alloc(Node::new(true));

        if add_skip {
            self.nodes[new_start].add_epsilon_edge(new_end);
        }
        self.nodes[new_start].add_epsilon_edge(self.start);

        let old_end = &mut self.nodes[self.end];
        old_end.set_accepting(false);
        old_end.add_epsilon_edge(new_end);
        if add_cycle {
            old_end.add_epsilon_edge(self.start);
        }

        self.start = new_start;
        self.end = new_end;

        debug!("wrap (skip: {add_skip}, cycle: {add_cycle}): {} nodes", self.nodes.len());
        self
    }

    // MARK: Inspection

    /// Entry node.
    pub fn start(&self) -> NodeId<Σ> {
        self.start
    }

    /// Exit node, the only accepting node of a freshly combined automaton.
    pub fn end(&self) -> NodeId<Σ> {
        self.end
    }

    /// Returns the node behind the handle, None for handles of another automaton.
    pub fn node(&self, id: NodeId<Σ>) -> Option<&Node<Σ>> {
        self.nodes.get(id)
    }

    /// All nodes owned by this automaton.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId<Σ>, &Node<Σ>)> {
        self.nodes.iter()
    }

    /// Number of owned nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, an automaton owns at least its start and end.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<Σ: Display> Display for Nfa<Σ> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start {}, end {}", self.start, self.end)?;
        for (id, node) in self.nodes.iter() {
            writeln!(f, "{id}:{node}")?;
        }
        Ok(())
    }
}
