use thiserror::Error;

/// Errors from the convenience constructors of [`Nfa`](crate::Nfa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NfaError {
    /// [`Nfa::literal`](crate::Nfa::literal) was given no symbols.
    #[error("a literal needs at least one symbol")]
    EmptyLiteral,

    /// [`Nfa::one_of`](crate::Nfa::one_of) was given no symbols.
    #[error("an alternation needs at least one symbol")]
    EmptyAlternation,
}

/// Result type for NFA construction.
pub type Result<T> = std::result::Result<T, NfaError>;

#[cfg(test)]
mod test {
    use super::NfaError;

    #[test]
    fn test_error_display() {
        assert_eq!(NfaError::EmptyLiteral.to_string(), "a literal needs at least one symbol");
        assert_eq!(NfaError::EmptyAlternation.to_string(), "an alternation needs at least one symbol");
    }
}
