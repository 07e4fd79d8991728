//! DFA construction and freezing.
//!
//! This side of the pipeline turns a Thompson NFA into something cheap to
//! run:
//!
//! - `worklist`: the ever-seen-rejecting FIFO driving the build
//! - `subset`: subset construction with ε-closure memoization and
//!   fingerprint-based state identity
//! - `dfa`: the walkable deterministic automaton
//! - `fixed`: the table freezer and the dense-table matcher
//!
//! # Module Organization
//!
//! `DfaBuilder` borrows the NFA and produces a `Dfa`; `FixedDfa` runs the
//! whole pipeline and keeps only flat arrays. `dfa_count` is the count
//! pass for callers sizing their own storage.

mod dfa;
mod fixed;
mod subset;
mod worklist;

pub use dfa::{Dfa, DfaState};
pub use fixed::{dfa_count, FixedDfa, Options, DEFAULT_ALPHABET_SIZE};
pub use subset::DfaBuilder;
pub use worklist::UniqueQueue;
