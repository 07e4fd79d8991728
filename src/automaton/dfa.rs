//! The deterministic automaton produced by subset construction.
//!
//! States are keyed by the fingerprint of the NFA subset they stand for
//! and numbered densely in allocation order; transitions are id-to-id, so
//! the `Dfa` owns every state outright and there are no cycles to tear
//! down.

use rustc_hash::FxHashMap;

/// One deterministic state.
///
/// `id` is the 32-bit fingerprint of the ε-closed NFA subset this state
/// represents; equal subsets always produce equal ids. `no` is the dense
/// 1-based sequence number used by the frozen tables; the start state is
/// always `no == 1`.
#[derive(Clone, Debug)]
pub struct DfaState {
    pub id: u32,
    pub no: u32,
    pub is_end: bool,
    /// The canonical sorted NFA-id subset behind `id`, retained so a
    /// fingerprint collision is detectable rather than silent.
    pub subset: Box<[u32]>,
    /// Per-character successor, by fingerprint id. At most one edge per
    /// character by construction.
    pub transitions: FxHashMap<u8, u32>,
}

/// A deterministic finite automaton over bytes.
#[derive(Clone, Debug, Default)]
pub struct Dfa {
    start: u32,
    states: FxHashMap<u32, DfaState>,
    /// Fingerprints in allocation (`no`) order.
    order: Vec<u32>,
    /// Distinct transition characters in first-seen order.
    chs: Vec<u8>,
}

impl Dfa {
    pub(crate) fn new(
        start: u32,
        states: FxHashMap<u32, DfaState>,
        order: Vec<u32>,
        chs: Vec<u8>,
    ) -> Self {
        Self {
            start,
            states,
            order,
            chs,
        }
    }

    /// Fingerprint id of the start state.
    pub fn start_id(&self) -> u32 {
        self.start
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.order.len()
    }

    /// Number of distinct characters appearing on any transition.
    pub fn char_count(&self) -> usize {
        self.chs.len()
    }

    /// The distinct transition characters, in first-seen order.
    pub fn chars(&self) -> &[u8] {
        &self.chs
    }

    /// Look up a state by fingerprint id.
    pub fn state(&self, id: u32) -> Option<&DfaState> {
        self.states.get(&id)
    }

    /// Whether the automaton contains a state with this id.
    pub fn contains(&self, id: u32) -> bool {
        self.states.contains_key(&id)
    }

    /// Iterate over states in `no` order.
    pub fn states(&self) -> impl Iterator<Item = &DfaState> {
        self.order.iter().filter_map(|id| self.states.get(id))
    }

    /// Walk the automaton over `input`, reporting whole-input membership.
    ///
    /// This is the un-frozen twin of `FixedDfa::is_match`: same semantics,
    /// hash lookups instead of dense tables.
    pub fn is_match(&self, input: &[u8]) -> bool {
        let mut st = match self.states.get(&self.start) {
            Some(st) => st,
            None => return false,
        };
        for &b in input {
            st = match st.transitions.get(&b).and_then(|id| self.states.get(id)) {
                Some(next) => next,
                None => return false,
            };
        }
        st.is_end
    }
}
