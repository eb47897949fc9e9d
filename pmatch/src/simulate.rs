use std::borrow::Borrow;

use hashbrown::HashSet;
use log::trace;
use smallvec::{SmallVec, smallvec};

use crate::nfa::Nfa;
use crate::node::NodeId;

/// A set of NFA states. Sets produced by the simulation only hold nodes without epsilon transitions.
pub type StateSet<Σ> = HashSet<NodeId<Σ>>;

impl<Σ> Nfa<Σ> {
    /// Nodes without epsilon transitions reachable from `node` through epsilon transitions only.
    /// A node which has epsilon transitions is never part of the result, even if it is accepting.
    pub fn epsilon_closure(&self, node: NodeId<Σ>) -> StateSet<Σ> {
        self.epsilon_closure_of([node])
    }

    /// Union of the epsilon closures of all `nodes`.
    pub fn epsilon_closure_of(&self, nodes: impl IntoIterator<Item = NodeId<Σ>>) -> StateSet<Σ> {
        let mut states = StateSet::new();
        let mut visited = HashSet::new();
        for node in nodes {
            self.extend_closure(node, &mut states, &mut visited);
        }
        states
    }

    /// Depth first walk over the epsilon transitions, adding the reached leaves to `states`.
    /// Every node in `visited` was already fully walked, so the set can be shared by the closures of one step.
    fn extend_closure(&self, node: NodeId<Σ>, states: &mut StateSet<Σ>, visited: &mut HashSet<NodeId<Σ>>) {
        if !visited.insert(node) {
            return;
        }
        let mut stack: SmallVec<[NodeId<Σ>; 16]> = smallvec![node];

        while let Some(id) = stack.pop() {
            let Some(state) = self.nodes.get(id) else {
                continue;
            };

            if state.has_epsilon_edges() {
                for &next in state.epsilon_edges() {
                    if visited.insert(next) {
                        stack.push(next);
                    }
                }
            } else {
                states.insert(id);
            }
        }
    }

    fn any_accepting(&self, states: &StateSet<Σ>) -> bool {
        states.iter().any(|&id| self.nodes[id].is_accepting())
    }
}

impl<Σ: PartialEq> Nfa<Σ> {
    /// Runs the automaton over the start of `input`.
    /// Returns the length of the longest accepted prefix, Some(0) if only the empty prefix is accepted and None if nothing is.
    pub fn match_iter<I>(&self, input: I) -> Option<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<Σ>,
    {
        let mut current_states = self.epsilon_closure(self.start);
        let mut next_states = StateSet::new();
        let mut visited = HashSet::new();
        let mut best = self.any_accepting(&current_states).then_some(0);

        for (consumed, symbol) in (1..).zip(input) {
            let symbol = symbol.borrow();

            for &id in current_states.iter() {
                if let Some((target, label)) = self.nodes[id].symbol_edge() {
                    if label == symbol {
                        self.extend_closure(target, &mut next_states, &mut visited);
                    }
                }
            }
            std::mem::swap(&mut current_states, &mut next_states);
            next_states.clear();
            visited.clear();
            trace!("consumed {consumed}: {} active states", current_states.len());

            // Nothing can be accepted past this point.
            if current_states.is_empty() {
                break;
            }
            if self.any_accepting(&current_states) {
                best = Some(consumed);
            }
        }

        best
    }

    /// Runs the automaton over the start of `input`, see [`Nfa::match_iter`].
    pub fn match_slice(&self, input: &[Σ]) -> Option<usize> {
        self.match_iter(input)
    }

    /// True if the whole `input` is accepted.
    pub fn accepts(&self, input: &[Σ]) -> bool {
        self.match_slice(input) == Some(input.len())
    }
}

//MARK: Tests
#[cfg(test)]
mod test {
    use std::time::Instant;

    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn run(nfa: &Nfa<char>, s: &str) -> isize {
        nfa.match_iter(s.chars()).map_or(-1, |len| len as isize)
    }

    fn lit(s: &str) -> Nfa<char> {
        Nfa::literal(s.chars()).unwrap()
    }

    #[test]
    fn test_atoms() {
        let a = Nfa::symbol('a');
        assert_eq!(run(&a, "a"), 1);
        assert_eq!(run(&a, "ab"), 1);
        assert_eq!(run(&a, "b"), -1);
        assert_eq!(run(&a, ""), -1);

        let empty = Nfa::<char>::epsilon();
        assert_eq!(run(&empty, ""), 0);
        assert_eq!(run(&empty, "xyz"), 0);
    }

    #[test]
    fn test_concat() {
        let ab = lit("ab").concat(lit("cde"));
        assert_eq!(run(&ab, "abcde"), 5);
        assert_eq!(run(&ab, "abcdefg"), 5);
        assert_eq!(run(&ab, "ab"), -1);
        assert_eq!(run(&ab, "cde"), -1);
    }

    #[test]
    fn test_union_is_max() {
        let build_a = || lit("a").concat(lit("a"));
        let build_b = || lit("a");
        let union = build_a().union(build_b());
        for s in ["", "a", "aa", "aaa", "b", "ab"] {
            assert_eq!(run(&union, s), run(&build_a(), s).max(run(&build_b(), s)), "{s}");
        }

        let union = build_b().union(build_a());
        assert_eq!(run(&union, "a"), 1);
        assert_eq!(run(&union, "aa"), 2);
        assert_eq!(run(&union, "aaa"), 2);
    }

    #[test]
    fn test_or_complex() {
        let nfa = lit("ab").union(lit("b"));
        assert_eq!(run(&nfa, "a"), -1);
        assert_eq!(run(&nfa, "b"), 1);
        assert_eq!(run(&nfa, "ab"), 2);

        let nfa = Nfa::one_of("abc".chars()).unwrap();
        assert_eq!(run(&nfa, "a"), 1);
        assert_eq!(run(&nfa, "b"), 1);
        assert_eq!(run(&nfa, "c"), 1);
        assert_eq!(run(&nfa, "d"), -1);
    }

    #[test]
    fn test_optional() {
        let nfa = lit("a").concat(lit("b").optional()).concat(lit("a"));
        assert_eq!(run(&nfa, "a"), -1);
        assert_eq!(run(&nfa, "aa"), 2);
        assert_eq!(run(&nfa, "aba"), 3);
        assert_eq!(run(&nfa, "abba"), -1);
        assert_eq!(run(&nfa, "ab"), -1);

        let b = lit("b").optional();
        assert_eq!(run(&b, ""), 0);
        assert_eq!(run(&b, "b"), 1);
        assert_eq!(run(&b, "bb"), 1);
    }

    #[test]
    fn test_closure() {
        let nfa = lit("a").concat(lit("b").closure()).concat(lit("a"));
        assert_eq!(run(&nfa, "a"), -1);
        assert_eq!(run(&nfa, "aa"), 2);
        assert_eq!(run(&nfa, "aba"), 3);
        assert_eq!(run(&nfa, "abba"), 4);
        assert_eq!(run(&nfa, "ab"), -1);

        let xy = lit("xy").closure();
        assert_eq!(run(&xy, ""), 0);
        for k in 1..6 {
            assert_eq!(run(&xy, &"xy".repeat(k)), 2 * k as isize);
        }
        assert_eq!(run(&xy, "xyx"), 2);
    }

    #[test]
    fn test_semi_closure() {
        let nfa = lit("a").concat(lit("b").semi_closure()).concat(lit("a"));
        assert_eq!(run(&nfa, "a"), -1);
        assert_eq!(run(&nfa, "aa"), -1);
        assert_eq!(run(&nfa, "aba"), 3);
        assert_eq!(run(&nfa, "abba"), 4);
        assert_eq!(run(&nfa, "ab"), -1);

        let xy = lit("xy").semi_closure();
        assert_eq!(run(&xy, ""), -1);
        assert_eq!(run(&xy, "xyxy"), 4);
    }

    #[test]
    fn test_or_and_some() {
        let nfa = lit("aa").union(lit("a")).semi_closure();
        assert_eq!(run(&nfa, ""), -1);
        for k in 1..=8 {
            assert_eq!(run(&nfa, &"a".repeat(k)), k as isize);
        }
    }

    #[test]
    fn test_epsilon_cycles() {
        // Loops made only of epsilon transitions must not hang the closure.
        let nfa = Nfa::<char>::epsilon().closure().semi_closure().closure();
        assert_eq!(run(&nfa, ""), 0);
        assert_eq!(run(&nfa, "a"), 0);

        let nfa = Nfa::epsilon().union(lit("a")).closure().concat(lit("b"));
        assert_eq!(run(&nfa, "b"), 1);
        assert_eq!(run(&nfa, "aaab"), 4);
        assert_eq!(run(&nfa, "aaa"), -1);
    }

    #[test]
    fn test_longest_prefix() {
        let nfa = lit("a").concat(lit("b").closure()).union(lit("abc"));
        let input = chars("abcbb");
        let best = nfa.match_slice(&input).unwrap();
        assert_eq!(best, 3);
        assert!(nfa.accepts(&input[..best]));
        for longer in best + 1..=input.len() {
            assert!(!nfa.accepts(&input[..longer]));
        }
    }

    #[test]
    fn test_closure_idempotent() {
        let nfa = lit("ab").union(Nfa::epsilon()).closure().concat(lit("c").optional());
        let closure = nfa.epsilon_closure(nfa.start());
        assert!(!closure.is_empty());
        assert_eq!(nfa.epsilon_closure_of(closure.iter().copied()), closure);
        for &id in closure.iter() {
            assert!(!nfa.node(id).unwrap().has_epsilon_edges());
        }
    }

    #[test]
    fn test_closure_skips_epsilon_nodes() {
        let nfa = Nfa::symbol('a').closure();
        let closure = nfa.epsilon_closure(nfa.start());
        // The body start (symbol edge) and the new end.
        assert_eq!(closure.len(), 2);
        assert!(closure.contains(&nfa.end()));
        assert!(!closure.contains(&nfa.start()));
    }

    #[test]
    fn test_foreign_closure() {
        let big = lit("abcdef");
        let small = Nfa::symbol('a');
        assert!(small.epsilon_closure(big.end()).is_empty());
    }

    #[test]
    fn test_non_char_symbols() {
        let nfa = Nfa::one_of([1u8, 0u8]).unwrap().semi_closure().concat(Nfa::symbol(2u8));
        assert_eq!(nfa.match_slice(&[1, 0, 0, 1, 2, 2]), Some(5));
        assert_eq!(nfa.match_slice(&[2]), None);
        assert_eq!(nfa.match_iter(vec![0u8, 2]), Some(2));
    }

    #[test]
    pub fn test_big() {
        // (0|1)* 1 (0|1) (0|1) (0|1), the fourth symbol from the end of the match is a 1.
        let bit = || Nfa::one_of([0u8, 1]).unwrap();
        let nfa = bit()
            .closure()
            .concat(Nfa::symbol(1))
            .concat(bit())
            .concat(bit())
            .concat(bit());

        let mut test = vec![1; 100_000];
        test.extend([0, 0, 0]);

        let start = Instant::now();
        assert_eq!(nfa.match_slice(&test), Some(test.len()));
        test.extend([0, 0, 0, 0]);
        assert_eq!(nfa.match_slice(&test), Some(100_003));

        println!("Big Input {:?}", start.elapsed());
    }
}
