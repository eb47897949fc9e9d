//! URL shaped prefix matcher, built directly from pmatch combinators without any pattern syntax.

use log::debug;
use pmatch::{Nfa, Result};

/// Symbols accepted inside host names and path segments.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

fn alphanumeric() -> Result<Nfa<char>> {
    Nfa::one_of(ALPHANUMERIC.chars())
}

/// Builds `http s? :// [a-z0-9]+ (\. [a-z0-9]+)* (/ [a-z0-9]*)*`.
/// Every use of the character class gets its own automaton, combinators consume their operands.
pub fn url_automaton() -> Result<Nfa<char>> {
    let host_label = Nfa::symbol('.').concat(alphanumeric()?.semi_closure());
    let path_segment = Nfa::symbol('/').concat(alphanumeric()?.closure());

    let nfa = Nfa::literal("http".chars())?
        .concat(Nfa::symbol('s').optional())
        .concat(Nfa::literal("://".chars())?)
        .concat(alphanumeric()?.semi_closure())
        .concat(host_label.closure())
        .concat(path_segment.closure());

    debug!("url automaton: {} nodes", nfa.len());
    Ok(nfa)
}

/// Length of the longest URL shaped prefix of `input`, -1 if there is none.
pub fn prefix_len(nfa: &Nfa<char>, input: &str) -> isize {
    match nfa.match_iter(input.chars()) {
        Some(len) => len as isize,
        None => -1,
    }
}
