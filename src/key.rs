#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyHeightMap<K> = HashMap<K, f64>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyHeightMap<K> = BTreeMap<K, f64>;

/// Bound for item keys produced by `key_of`.
///
/// With `std` this is `Hash + Eq` (keys live in a `HashMap`); without it, `Ord` (`BTreeMap`).
#[cfg(feature = "std")]
pub trait ListKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> ListKey for K {}

#[cfg(not(feature = "std"))]
pub trait ListKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> ListKey for K {}
