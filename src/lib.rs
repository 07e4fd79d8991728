//! tabrex: regular expressions compiled to dense, fixed-size DFA tables.
//!
//! A pattern goes through one eager pipeline: concat normalization, a
//! shunting-yard Thompson construction into an arena-owned NFA, subset
//! construction into a DFA, and a freeze into flat arrays. The result,
//! [`FixedDfa`], holds nothing but those arrays; matching is a pure table
//! walk, linear in the input, with no allocation when `pre_index` is on.
//!
//! Matching is whole-input membership: no captures, no anchors, no partial
//! matches. Supported syntax is ASCII literals, `\`-escapes for operator
//! bytes, `[...]` classes with `-` ranges, `*` `+` `?`, `|`, and `(...)`.
//!
//! ```
//! let dfa = tabrex::compile("(a|b)*ab").unwrap();
//! assert!(dfa.is_match(b"ababab"));
//! assert!(!dfa.is_match(b"abba"));
//! ```
//!
//! The compiled automaton is immutable plain data, so it can be built once
//! and shared across threads:
//!
//! ```
//! use std::sync::Arc;
//!
//! let dfa = Arc::new(tabrex::compile("[a-z]+").unwrap());
//! let handle = Arc::clone(&dfa);
//! std::thread::spawn(move || assert!(handle.is_match(b"hello")))
//!     .join()
//!     .unwrap();
//! ```

mod automaton;
mod regexp;

pub use automaton::{
    dfa_count, Dfa, DfaBuilder, DfaState, FixedDfa, Options, UniqueQueue, DEFAULT_ALPHABET_SIZE,
};
pub use regexp::{Nfa, NfaArena, NfaParser, NfaState, PatternError, StateId};

/// Errors that can occur while compiling a pattern.
///
/// Matching never errors; every failure happens at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern is syntactically invalid.
    Pattern(PatternError),
    /// Two distinct pattern characters share a column under
    /// `byte mod alphabet_size`; raise `alphabet_size` above the larger
    /// character value.
    AlphabetCollision { first: u8, second: u8, column: usize },
    /// The DFA has more states than the `u16` table entries can number.
    TooManyStates(usize),
    /// `alphabet_size` must be positive.
    InvalidAlphabetSize(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Pattern(e) => write!(f, "invalid pattern: {}", e),
            Error::AlphabetCollision {
                first,
                second,
                column,
            } => write!(
                f,
                "characters {:?} and {:?} both map to column {} of the alphabet",
                *first as char, *second as char, column
            ),
            Error::TooManyStates(n) => {
                write!(f, "DFA has {} states, more than the tables can index", n)
            }
            Error::InvalidAlphabetSize(n) => write!(f, "invalid alphabet size {}", n),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PatternError> for Error {
    fn from(e: PatternError) -> Self {
        Error::Pattern(e)
    }
}

/// Compile `pattern` into a [`FixedDfa`] with default [`Options`].
pub fn compile(pattern: &str) -> Result<FixedDfa, Error> {
    FixedDfa::compile(pattern)
}

/// Compile `pattern` with explicit [`Options`].
pub fn compile_with(pattern: &str, options: Options) -> Result<FixedDfa, Error> {
    FixedDfa::compile_with(pattern, options)
}

/// One-shot convenience: compile `pattern` and test `input` against it.
///
/// Equivalent to `compile(pattern)?.is_match(input.as_bytes())`. Compile
/// once and reuse the automaton when matching more than one input.
pub fn is_match(pattern: &str, input: &str) -> Result<bool, Error> {
    Ok(compile(pattern)?.is_match(input.as_bytes()))
}
