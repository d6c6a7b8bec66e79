//! Per-doctor certificate validity, stored as the set of windows during
//! which the certificate is invalid.
//!
//! Windows are kept exactly as written: they may overlap, touch, repeat or
//! arrive in any order. Revoking is an append. Restoring subtracts a range
//! from every stored window eagerly, so a validity query is a plain
//! containment scan.

use crate::ContractError;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

const WINDOWS: Symbol = symbol_short!("WINDOWS");

/// `end` value marking a window that never closes.
pub const UNBOUNDED: u64 = 0;

/// Half-open range `[start, end)` of logical time, or `[start, +inf)` when
/// `end` is [`UNBOUNDED`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidWindow {
    pub start: u64,
    pub end: u64,
}

impl InvalidWindow {
    /// Builds a window, rejecting a finite `end` that does not lie after `start`.
    pub fn new(start: u64, end: u64) -> Result<Self, ContractError> {
        if end != UNBOUNDED && end <= start {
            return Err(ContractError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    pub fn is_unbounded(&self) -> bool {
        self.end == UNBOUNDED
    }

    /// Exclusive upper bound, `None` for an unbounded window.
    fn upper(&self) -> Option<u64> {
        if self.is_unbounded() {
            None
        } else {
            Some(self.end)
        }
    }

    pub fn contains(&self, time: u64) -> bool {
        self.start <= time && self.upper().map_or(true, |end| time < end)
    }

    pub fn intersects(&self, other: &InvalidWindow) -> bool {
        let starts_before_other_ends = other.upper().map_or(true, |end| self.start < end);
        let other_starts_before_end = self.upper().map_or(true, |end| other.start < end);
        starts_before_other_ends && other_starts_before_end
    }
}

/// Removes every point of `range` from `windows`.
///
/// A window untouched by the range is kept as is, one covered by it is
/// dropped, one overlapping an edge is truncated, and one strictly
/// containing it is split in two.
pub fn subtract(
    env: &Env,
    windows: &Vec<InvalidWindow>,
    range: &InvalidWindow,
) -> Vec<InvalidWindow> {
    let mut remaining = Vec::new(env);

    for window in windows.iter() {
        if !window.intersects(range) {
            remaining.push_back(window);
            continue;
        }

        // Part of the window left of the range. `range.start > window.start`
        // here, so the piece is non-empty and its end is never the sentinel.
        if window.start < range.start {
            remaining.push_back(InvalidWindow {
                start: window.start,
                end: range.start,
            });
        }

        // Part right of the range, only possible when the range is finite.
        if let Some(range_end) = range.upper() {
            let extends_past = window.upper().map_or(true, |end| range_end < end);
            if extends_past {
                remaining.push_back(InvalidWindow {
                    start: range_end,
                    end: window.end,
                });
            }
        }
    }

    remaining
}

/// True when no window covers `time`.
pub fn is_valid_in(windows: &Vec<InvalidWindow>, time: u64) -> bool {
    !windows.iter().any(|window| window.contains(time))
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn windows_key(doctor: &Address) -> (Symbol, Address) {
    (WINDOWS, doctor.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn store(env: &Env, doctor: &Address, windows: &Vec<InvalidWindow>) {
    let key = windows_key(doctor);
    env.storage().persistent().set(&key, windows);
    extend_ttl(env, &key);
}

/// Starts an empty timeline: the certificate is valid at every point.
pub fn open(env: &Env, doctor: &Address) {
    store(env, doctor, &Vec::new(env));
}

/// Drops the doctor's timeline entirely.
pub fn discard(env: &Env, doctor: &Address) {
    env.storage().persistent().remove(&windows_key(doctor));
}

pub fn windows(env: &Env, doctor: &Address) -> Vec<InvalidWindow> {
    env.storage()
        .persistent()
        .get(&windows_key(doctor))
        .unwrap_or(Vec::new(env))
}

/// Appends `window` verbatim. A `limit` of zero means no cap.
pub fn revoke(
    env: &Env,
    doctor: &Address,
    window: InvalidWindow,
    limit: u32,
) -> Result<(), ContractError> {
    let mut current = windows(env, doctor);
    if limit != 0 && current.len() >= limit {
        return Err(ContractError::WindowLimitReached);
    }
    current.push_back(window);
    store(env, doctor, &current);
    Ok(())
}

pub fn restore(env: &Env, doctor: &Address, range: &InvalidWindow) {
    let current = windows(env, doctor);
    store(env, doctor, &subtract(env, &current, range));
}

pub fn is_valid_at(env: &Env, doctor: &Address, time: u64) -> bool {
    is_valid_in(&windows(env, doctor), time)
}
