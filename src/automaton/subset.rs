//! Subset construction: NFA to DFA.
//!
//! Each DFA state stands for an ε-closed set of NFA states. The set's
//! identity is a 32-bit FNV-1a fingerprint over its sorted ids, which
//! turns subset equality into a key comparison. Three caches carry the
//! build, all monotone and keyed by fingerprint:
//!
//! - `fanout`: per-DFA-state union of the constituent NFA states' non-ε
//!   edges, grouped by character
//! - `closure_cache`: pre-closure fingerprint → resulting DFA state, so a
//!   repeated move set skips both the closure and the re-hash
//! - the state table itself
//!
//! The worklist is a [`UniqueQueue`], so every state is processed exactly
//! once even when transitions loop back.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::regexp::{Nfa, StateId, EPSILON};

use super::dfa::{Dfa, DfaState};
use super::worklist::UniqueQueue;

const FNV_SEED: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a over the little-endian bytes of each id, in order.
pub(crate) fn fingerprint(ids: &[u32]) -> u32 {
    let mut h = FNV_SEED;
    for &id in ids {
        for b in id.to_le_bytes() {
            h ^= u32::from(b);
            h = h.wrapping_mul(FNV_PRIME);
        }
    }
    h
}

/// The subset's ids, sorted: the canonical form behind every fingerprint.
fn sorted_ids(set: &FxHashSet<StateId>) -> SmallVec<[u32; 16]> {
    let mut ids: SmallVec<[u32; 16]> = set.iter().map(|s| s.get()).collect();
    ids.sort_unstable();
    ids
}

fn subset_fingerprint(set: &FxHashSet<StateId>) -> u32 {
    fingerprint(&sorted_ids(set))
}

/// Expand `set` in place to its ε-closure: the least superset closed under
/// ε-transitions. Idempotent.
pub(crate) fn epsilon_closure(nfa: &Nfa, set: &mut FxHashSet<StateId>) {
    let mut stack: SmallVec<[StateId; 16]> = set.iter().copied().collect();
    while let Some(s) = stack.pop() {
        if let Some(targets) = nfa.arena[s].next_states(EPSILON) {
            for &t in targets {
                if set.insert(t) {
                    stack.push(t);
                }
            }
        }
    }
}

/// Builds a [`Dfa`] from an [`Nfa`] by subset construction.
pub struct DfaBuilder<'n> {
    nfa: &'n Nfa,
    states: FxHashMap<u32, DfaState>,
    order: Vec<u32>,
    /// DFA state id → character → union of the subset's non-ε targets.
    fanout: FxHashMap<u32, FxHashMap<u8, FxHashSet<StateId>>>,
    /// Pre-closure fingerprint → DFA state id.
    closure_cache: FxHashMap<u32, u32>,
}

impl<'n> DfaBuilder<'n> {
    pub fn new(nfa: &'n Nfa) -> Self {
        Self {
            nfa,
            states: FxHashMap::default(),
            order: Vec::new(),
            fanout: FxHashMap::default(),
            closure_cache: FxHashMap::default(),
        }
    }

    /// Run the construction. Consumes the builder; the NFA is only
    /// borrowed and can be dropped by the caller afterwards.
    pub fn build(mut self) -> Dfa {
        let mut n0: FxHashSet<StateId> = FxHashSet::default();
        n0.insert(self.nfa.start());
        epsilon_closure(self.nfa, &mut n0);
        let start = subset_fingerprint(&n0);
        self.new_state(&n0, start);

        let mut queue = UniqueQueue::new();
        queue.push(start);

        let mut chs: Vec<u8> = Vec::new();
        let mut chs_seen = [false; 256];

        while let Some(sid) = queue.pop() {
            // Move sets for this state, in sorted character order so the
            // construction is deterministic end to end.
            let mut moves: Vec<(u8, FxHashSet<StateId>)> = match self.fanout.get(&sid) {
                Some(fan) => fan.iter().map(|(&c, n)| (c, n.clone())).collect(),
                None => Vec::new(),
            };
            moves.sort_unstable_by_key(|(c, _)| *c);

            for (c, n) in moves {
                let tid = self.mov(&n);
                if let Some(st) = self.states.get_mut(&sid) {
                    st.transitions.insert(c, tid);
                }
                queue.push(tid);
                if !chs_seen[c as usize] {
                    chs_seen[c as usize] = true;
                    chs.push(c);
                }
            }
        }

        Dfa::new(start, self.states, self.order, chs)
    }

    /// The DFA state reached on one move set: ε-close it, then find or
    /// allocate the state for the closed subset. The pre-closure
    /// fingerprint memoizes the whole step.
    fn mov(&mut self, n: &FxHashSet<StateId>) -> u32 {
        let kid = subset_fingerprint(n);
        if let Some(&tid) = self.closure_cache.get(&kid) {
            return tid;
        }
        let mut closed = n.clone();
        epsilon_closure(self.nfa, &mut closed);
        let tid = subset_fingerprint(&closed);
        if !self.states.contains_key(&tid) {
            self.new_state(&closed, tid);
        } else if let Some(existing) = self.states.get(&tid) {
            debug_assert_eq!(
                existing.subset[..],
                sorted_ids(&closed)[..],
                "fingerprint collision between distinct NFA subsets",
            );
        }
        self.closure_cache.insert(kid, tid);
        tid
    }

    /// Allocate the DFA state for an ε-closed subset: accept flag, dense
    /// number, canonical subset, and the non-ε fanout table used later by
    /// the build loop.
    fn new_state(&mut self, subset: &FxHashSet<StateId>, id: u32) {
        let arena = &self.nfa.arena;
        let is_end = subset.iter().any(|&s| arena[s].is_end());

        let fan = self.fanout.entry(id).or_default();
        for &s in subset {
            for (c, targets) in arena[s].transitions() {
                if c != EPSILON {
                    fan.entry(c).or_default().extend(targets.iter().copied());
                }
            }
        }

        let no = self.order.len() as u32 + 1;
        self.states.insert(
            id,
            DfaState {
                id,
                no,
                is_end,
                subset: sorted_ids(subset).into_vec().into_boxed_slice(),
                transitions: FxHashMap::default(),
            },
        );
        self.order.push(id);
    }
}
