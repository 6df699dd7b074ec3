//! Lock-striped transposition table with bounded linear probing.
//!
//! One `Mutex` per slot; a probe window of [`HASH_DEPTH`] consecutive slots
//! is scanned with the locks acquired in probe order and released together
//! when the verdict is known. A slot is `Empty`, `Resolved`, or reserved
//! `InProgress` by a worker that is still computing it. Reserved slots are
//! never overwritten and never satisfy a probe, so the table acts as a
//! best-effort cache: callers that get no usable answer simply search
//! without storing, and no cross-thread race can corrupt a result.
//!
//! The table length is prime, which spreads the multiplicative hash; a key
//! may therefore live in any of its five window slots and equality is
//! always re-checked on the full key.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::compress::Key;

/// Bounded linear-probe window length.
pub const HASH_DEPTH: usize = 5;

/// Smallest usable table length. Keeps the probe window well under the
/// table size so wrapped windows cannot interleave lock orders.
const MIN_SLOTS: usize = 11;

/// Result of probing the table for a key at a requested depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A resolved entry of sufficient depth was found.
    Hit(i32),
    /// No entry; a slot was reserved for the caller to [`store`](TranspositionTable::store) into.
    Miss(usize),
    /// Another worker is already computing this key: search, don't store.
    InProgress,
    /// Every window slot is reserved: search, don't store.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Empty,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    key: Key,
    evaluation: i32,
    depth: u8,
    state: SlotState,
}

impl Slot {
    const EMPTY: Slot = Slot {
        key: Key { white: 0, black: 0, meta: 0 },
        evaluation: 0,
        depth: 0,
        state: SlotState::Empty,
    };
}

/// Shared evaluation cache for one engine response.
///
/// All method receivers are `&self`; the table is safe to share across the
/// root workers by reference.
pub struct TranspositionTable {
    slots: Box<[Mutex<Slot>]>,
    probes: AtomicU64,
    hits: AtomicU64,
}

impl TranspositionTable {
    /// Create a table of the largest prime length not exceeding
    /// `max_slots` (floored at a small minimum).
    pub fn new(max_slots: usize) -> TranspositionTable {
        let len = largest_prime_leq(max_slots.max(MIN_SLOTS));
        let slots: Box<[Mutex<Slot>]> = (0..len).map(|_| Mutex::new(Slot::EMPTY)).collect();
        TranspositionTable {
            slots,
            probes: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// Return the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` if the table has no slots. Never true in practice.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reset every slot and the probe counters.
    pub fn clear(&self) {
        for slot in &self.slots {
            *self.lock(slot) = Slot::EMPTY;
        }
        self.probes.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
    }

    /// Return `(probes, hits)` since the last clear.
    pub fn stats(&self) -> (u64, u64) {
        (self.probes.load(Ordering::Relaxed), self.hits.load(Ordering::Relaxed))
    }

    /// Count resolved entries. Diagnostic; locks each slot briefly.
    pub fn resolved_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| self.lock(slot).state == SlotState::Resolved)
            .count()
    }

    /// Count resolved entries holding `key`. Test support.
    #[cfg(test)]
    pub(crate) fn resolved_entries_for(&self, key: Key) -> usize {
        self.slots
            .iter()
            .filter(|slot| {
                let slot = self.lock(slot);
                slot.state == SlotState::Resolved && slot.key == key
            })
            .count()
    }

    /// Probe for `key` at the requested `depth`.
    ///
    /// Scans the probe window in order, holding the locks of the
    /// non-reserved slots until the verdict is known:
    ///
    /// - a resolved slot with the same key and depth ≥ `depth` is a
    ///   [`Lookup::Hit`];
    /// - otherwise, a reserved slot holding the same key means another
    ///   worker is on it: [`Lookup::InProgress`], no second reservation;
    /// - otherwise the shallowest non-reserved slot is upgraded to a
    ///   reservation for the caller: [`Lookup::Miss`];
    /// - with the whole window reserved there is no room: [`Lookup::Full`].
    ///
    /// Deeper cached entries answer shallower requests; a same-key entry of
    /// insufficient depth is no hit but remains an eviction candidate.
    pub fn check(&self, key: Key, depth: u8) -> Lookup {
        self.probes.fetch_add(1, Ordering::Relaxed);
        let base = self.index_of(key);

        let mut guards = Vec::with_capacity(HASH_DEPTH);
        let mut candidate: Option<usize> = None;
        let mut candidate_depth = u8::MAX;
        let mut reserved_elsewhere = false;

        for i in 0..HASH_DEPTH {
            let index = (base + i) % self.slots.len();
            let guard = self.lock(&self.slots[index]);
            if guard.state == SlotState::InProgress {
                reserved_elsewhere |= guard.key == key;
                continue;
            }
            if guard.state == SlotState::Resolved && guard.key == key && guard.depth >= depth {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Lookup::Hit(guard.evaluation);
            }
            if guard.depth < candidate_depth {
                candidate_depth = guard.depth;
                candidate = Some(guards.len());
            }
            guards.push((index, guard));
        }

        if reserved_elsewhere {
            return Lookup::InProgress;
        }
        if let Some(position) = candidate {
            let (index, guard) = &mut guards[position];
            guard.key = key;
            guard.state = SlotState::InProgress;
            return Lookup::Miss(*index);
        }
        Lookup::Full
    }

    /// Resolve a previously reserved slot with a computed evaluation.
    pub fn store(&self, index: usize, key: Key, evaluation: i32, depth: u8) {
        let mut slot = self.lock(&self.slots[index]);
        *slot = Slot { key, evaluation, depth, state: SlotState::Resolved };
    }

    fn index_of(&self, key: Key) -> usize {
        let len = self.slots.len() as u64;
        let white = key.white as u64 % len;
        let black = key.black as u64 % len;
        ((white * black * key.meta as u64) % len) as usize
    }

    fn lock<'a>(&self, slot: &'a Mutex<Slot>) -> std::sync::MutexGuard<'a, Slot> {
        // A poisoned slot means a sibling worker panicked mid-search;
        // nothing can be salvaged.
        slot.lock().expect("transposition slot mutex poisoned")
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("slots", &self.slots.len())
            .field("probes", &self.probes.load(Ordering::Relaxed))
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .finish()
    }
}

/// Return the largest prime ≤ `n` (assuming `n ≥ 2`).
fn largest_prime_leq(n: usize) -> usize {
    fn is_prime(n: usize) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }
    (2..=n).rev().find(|&p| is_prime(p)).unwrap_or(2)
}
