//! Hashing collection aliases used throughout the analysis engine.
//! `FxHashMap`/`FxHashSet` trade DoS-resistance for speed — fine here since
//! keys are derived from source we already trust (our own parse output),
//! never from untrusted network input.

use rustc_hash::FxHashMap as RawFxHashMap;
use rustc_hash::FxHashSet as RawFxHashSet;

pub type FxHashMap<K, V> = RawFxHashMap<K, V>;
pub type FxHashSet<T> = RawFxHashSet<T>;
