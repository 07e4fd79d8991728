//! Freezing a DFA into dense fixed-size tables, and the table matcher.
//!
//! The walkable [`Dfa`] is hash-map-shaped; the matcher wants flat arrays.
//! Freezing reads the final dimensions off the built automaton, allocates
//! every table at exactly that size, fills them, and drops the automaton.
//! What remains is four arrays and no pointers:
//!
//! - `chs[j-1]`: the distinct transition characters, first-seen order
//! - `ch_index[b mod A]`: 1-based column for a byte, 0 = unacceptable
//!   (stored only when `pre_index` is on; otherwise rebuilt per match)
//! - `transitions[no-1][j-1]`: destination state number, 0 = no edge
//! - `is_end[no-1]`: accept bits
//!
//! Columns are found by `byte mod alphabet_size`. Two distinct pattern
//! characters landing on the same column would corrupt the map, so that
//! case is rejected at freeze time; pick an `alphabet_size` larger than
//! the biggest character value in the pattern to rule it out.

use crate::regexp::NfaParser;
use crate::Error;

use super::dfa::Dfa;
use super::subset::DfaBuilder;

/// Covers every printable-ASCII pattern without column collisions.
pub const DEFAULT_ALPHABET_SIZE: usize = 128;

/// Freezing knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Store the byte-to-column map in the frozen automaton. Matching
    /// skips rebuilding it, at the cost of `alphabet_size` extra bytes.
    pub pre_index: bool,
    /// Modulus for the byte-to-column map. Must exceed the largest
    /// character value used by the pattern to guarantee no collisions.
    pub alphabet_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pre_index: false,
            alphabet_size: DEFAULT_ALPHABET_SIZE,
        }
    }
}

/// Build the DFA for `pattern` and report `(state count, char count)`,
/// discarding the automaton.
///
/// This is the count pass of count-then-fill: callers baking tables into
/// fixed-size static storage run this first to learn the dimensions, then
/// compile for real. [`FixedDfa::compile_with`] sizes its own heap tables
/// directly, so it builds only once.
pub fn dfa_count(pattern: &str) -> Result<(usize, usize), Error> {
    let nfa = NfaParser::parse(pattern)?;
    let dfa = DfaBuilder::new(&nfa).build();
    Ok((dfa.size(), dfa.char_count()))
}

/// A DFA frozen into dense lookup tables.
///
/// Immutable after construction and plain data throughout, so it is
/// `Send + Sync` and freely shareable; matching is a pure `&self` walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedDfa {
    n_states: usize,
    n_chars: usize,
    alphabet_size: usize,
    chs: Box<[u8]>,
    ch_index: Option<Box<[u8]>>,
    /// Row-major `[n_states][n_chars]`, entries are destination `no`.
    transitions: Box<[u16]>,
    is_end: Box<[bool]>,
}

impl FixedDfa {
    /// Compile `pattern` with default [`Options`].
    pub fn compile(pattern: &str) -> Result<Self, Error> {
        Self::compile_with(pattern, Options::default())
    }

    /// Compile `pattern`: parse to NFA, build the DFA, freeze the tables.
    /// All intermediate automata are released before this returns.
    pub fn compile_with(pattern: &str, options: Options) -> Result<Self, Error> {
        if options.alphabet_size == 0 {
            return Err(Error::InvalidAlphabetSize(0));
        }
        let nfa = NfaParser::parse(pattern)?;
        let dfa = DfaBuilder::new(&nfa).build();
        Self::freeze(&dfa, options)
    }

    fn freeze(dfa: &Dfa, options: Options) -> Result<Self, Error> {
        let n_states = dfa.size();
        if n_states > u16::MAX as usize {
            return Err(Error::TooManyStates(n_states));
        }
        // At most 255 distinct non-NUL bytes exist, so columns fit a u8.
        let n_chars = dfa.char_count();
        debug_assert!(n_chars <= u8::MAX as usize);

        let a = options.alphabet_size;
        let mut tmp = vec![0u8; a];
        let mut chs = vec![0u8; n_chars].into_boxed_slice();
        for (i, &ch) in dfa.chars().iter().enumerate() {
            chs[i] = ch;
            let column = ch as usize % a;
            if tmp[column] != 0 {
                return Err(Error::AlphabetCollision {
                    first: chs[tmp[column] as usize - 1],
                    second: ch,
                    column,
                });
            }
            tmp[column] = i as u8 + 1;
        }

        let mut transitions = vec![0u16; n_states * n_chars].into_boxed_slice();
        let mut is_end = vec![false; n_states].into_boxed_slice();
        for st in dfa.states() {
            let row = (st.no - 1) as usize;
            for (&ch, &to) in &st.transitions {
                let j = tmp[ch as usize % a] as usize;
                if let Some(target) = dfa.state(to) {
                    transitions[row * n_chars + (j - 1)] = target.no as u16;
                }
            }
            if st.is_end {
                is_end[row] = true;
            }
        }

        let ch_index = options.pre_index.then(|| tmp.into_boxed_slice());
        Ok(Self {
            n_states,
            n_chars,
            alphabet_size: a,
            chs,
            ch_index,
            transitions,
            is_end,
        })
    }

    /// Number of DFA states.
    pub fn size(&self) -> usize {
        self.n_states
    }

    /// Number of distinct characters the automaton can consume.
    pub fn char_count(&self) -> usize {
        self.n_chars
    }

    /// Whether the byte-to-column map was stored at freeze time.
    pub fn is_pre_indexed(&self) -> bool {
        self.ch_index.is_some()
    }

    fn column_map(&self) -> Box<[u8]> {
        let mut t = vec![0u8; self.alphabet_size];
        for (i, &ch) in self.chs.iter().enumerate() {
            t[ch as usize % self.alphabet_size] = i as u8 + 1;
        }
        t.into_boxed_slice()
    }

    /// Whole-input membership test. Never errors: a byte the automaton
    /// does not know, or a missing edge, is simply a non-match.
    pub fn is_match(&self, input: &[u8]) -> bool {
        let built;
        let t: &[u8] = match &self.ch_index {
            Some(stored) => stored,
            None => {
                built = self.column_map();
                &built
            }
        };

        let mut st: usize = 1;
        for &b in input {
            let j = t[b as usize % self.alphabet_size] as usize;
            if j == 0 {
                return false;
            }
            let next = self.transitions[(st - 1) * self.n_chars + (j - 1)];
            if next == 0 {
                return false;
            }
            st = next as usize;
        }
        self.is_end[st - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pass_matches_fill_pass() {
        for p in ["(a|b)*ab", "[a-zA-Z0-9]+", "(ab)?c", "a*", ""] {
            let (n_states, n_chars) = dfa_count(p).unwrap();
            let fixed = FixedDfa::compile(p).unwrap();
            assert_eq!(fixed.size(), n_states, "state count for {:?}", p);
            assert_eq!(fixed.char_count(), n_chars, "char count for {:?}", p);
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let a = FixedDfa::compile("(a|b)*ab").unwrap();
        let b = FixedDfa::compile("(a|b)*ab").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pre_index_changes_storage_not_semantics() {
        let plain = FixedDfa::compile("(a|b)*ab").unwrap();
        let indexed = FixedDfa::compile_with(
            "(a|b)*ab",
            Options {
                pre_index: true,
                ..Options::default()
            },
        )
        .unwrap();
        assert!(!plain.is_pre_indexed());
        assert!(indexed.is_pre_indexed());
        for input in ["ab", "ababab", "abb", "", "xyz"] {
            assert_eq!(
                plain.is_match(input.as_bytes()),
                indexed.is_match(input.as_bytes()),
                "inputs disagree on {:?}",
                input
            );
        }
    }

    #[test]
    fn test_alphabet_collision_is_rejected() {
        // With a modulus of 1, any two distinct characters share column 0.
        let err = FixedDfa::compile_with(
            "ab",
            Options {
                pre_index: false,
                alphabet_size: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::AlphabetCollision { .. }), "{:?}", err);
    }

    #[test]
    fn test_zero_alphabet_size_is_rejected() {
        let err = FixedDfa::compile_with(
            "a",
            Options {
                pre_index: false,
                alphabet_size: 0,
            },
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidAlphabetSize(0));
    }

    #[test]
    fn test_larger_alphabet_resolves_collisions() {
        // 'a' (97) and 'b' (98) collide mod 1 but not mod 256.
        let fixed = FixedDfa::compile_with(
            "ab",
            Options {
                pre_index: false,
                alphabet_size: 256,
            },
        )
        .unwrap();
        assert!(fixed.is_match(b"ab"));
        assert!(!fixed.is_match(b"a"));
    }

    #[test]
    fn test_unknown_byte_fails_the_match() {
        let fixed = FixedDfa::compile("ab").unwrap();
        assert!(!fixed.is_match(b"aX"));
        assert!(!fixed.is_match(b"\x00"));
    }

    #[test]
    fn test_empty_pattern_tables() {
        let fixed = FixedDfa::compile("").unwrap();
        assert_eq!(fixed.size(), 1);
        assert_eq!(fixed.char_count(), 0);
        assert!(fixed.is_match(b""));
        assert!(!fixed.is_match(b"a"));
    }
}
