//! Pattern parsing and NFA construction.
//!
//! This side of the pipeline turns a literal pattern into a Thompson NFA:
//!
//! - `syntax`: the operator table and the concat-normalization pre-pass
//! - `nfa`: arena-owned NFA states with stable integer ids
//! - `parser`: shunting-yard scheduling over the normalized pattern,
//!   emitting Thompson fragments
//!
//! Supported syntax: ASCII literals, `\`-escapes for the operator bytes,
//! `[...]` classes with `-` ranges, `*` `+` `?` postfix quantifiers, `|`
//! alternation, and `(...)` grouping. Matching is whole-input membership;
//! there are no anchors or captures.

mod nfa;
mod parser;
mod syntax;

pub use nfa::{Fragment, Nfa, NfaArena, NfaState, StateId};
pub use parser::{NfaParser, PatternError};
pub use syntax::{normalize, Op, EPSILON, ESCAPE};

#[cfg(test)]
mod tests {
    use super::*;

    // Cross-checks between the normalizer and the parser: every byte the
    // normalizer emits must be something the scan loop consumes.

    #[test]
    fn test_parse_accepts_normalizer_output() {
        for p in [
            "a", "ab", "a|b", "(a|b)*ab", "[a-zA-Z0-9]+", "(ab)?c", r"\*",
            "a*", "", "[]", "x[0-9]y",
        ] {
            let normalized = normalize(p.as_bytes());
            assert!(
                NfaParser::parse(p).is_ok(),
                "pattern {:?} (normalized {:?}) failed to parse",
                p,
                String::from_utf8_lossy(&normalized),
            );
        }
    }

    #[test]
    fn test_fragment_terminal_flags_after_parse() {
        for p in ["a", "ab", "a|b", "(a|b)*ab", "a+", "(ab)?c"] {
            let nfa = NfaParser::parse(p).unwrap();
            assert!(
                !nfa.arena[nfa.start()].is_end(),
                "{:?}: start must not accept",
                p
            );
            assert!(nfa.arena[nfa.end()].is_end(), "{:?}: end must accept", p);
        }
    }

    #[test]
    fn test_exactly_one_accepting_state_per_parse() {
        // Every intermediate fragment end picked up an outgoing edge when
        // it was spliced, clearing its flag; only the overall end remains.
        for p in ["a", "ab", "a|b", "(a|b)*ab", "a+", "[a-z]*"] {
            let nfa = NfaParser::parse(p).unwrap();
            let accepting = nfa.arena.iter().filter(|(_, st)| st.is_end()).count();
            assert_eq!(accepting, 1, "{:?} should have one accepting state", p);
            let (id, _) = nfa
                .arena
                .iter()
                .find(|(_, st)| st.is_end())
                .expect("accepting state");
            assert_eq!(id, nfa.end());
        }
    }
}
