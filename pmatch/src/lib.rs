#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Thompson NFA construction and simulation.
//!
//! Automatons are built bottom up from single symbol atoms with [`Nfa::concat`], [`Nfa::union`],
//! [`Nfa::closure`], [`Nfa::semi_closure`] and [`Nfa::optional`], then run against the start of
//! an input sequence to find the longest accepted prefix.
//!
//! ```
//! use pmatch::Nfa;
//!
//! // ab(c|d)+
//! let nfa = Nfa::literal("ab".chars())?
//!     .concat(Nfa::one_of("cd".chars())?.semi_closure());
//!
//! assert_eq!(nfa.match_iter("abcdcx".chars()), Some(5));
//! assert_eq!(nfa.match_iter("ab".chars()), None);
//! # Ok::<(), pmatch::NfaError>(())
//! ```

mod error;
pub mod nfa;
pub mod node;
mod simulate;

pub use crate::error::{NfaError, Result};
pub use crate::nfa::Nfa;
pub use crate::node::{Node, NodeId};
pub use crate::simulate::StateSet;
