//! Bounds shared by state and event names.

use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for anything usable as a state or event name.
///
/// Names are compared and hashed to look up transition tables, cloned into
/// snapshots, and shared with effects running on other tasks. Any type
/// meeting the bounds qualifies: `&'static str`, `String`, or a fieldless
/// enum generated with [`name_enum!`](crate::name_enum).
pub trait Identifier: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Identifier for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
