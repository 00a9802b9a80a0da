//! Provides an n-gram count trie and depth-bounded iterators over it.
//!
//! An n-gram is a sequence of symbol identifiers. Identifiers are opaque
//! integers handed out by a vocabulary which lives outside this crate;
//! they must support the [`crate::trie::Symbol`] trait, which also names
//! the "no-symbol" sentinel used to terminate key buffers. Counts must
//! support the [`crate::trie::CountValue`] trait.
//!
//! Counts of every order share one [`crate::trie::NgramTrie`]. To read
//! the counts of a single order, bind an iterator to the trie and that
//! order. The iterator walks the trie depth first in ascending symbol
//! order and yields each counted n-gram of that order exactly once.
//!
//! Examples:
//! * trie : [`crate::trie`]
//! * iterator : [`crate::iterator`]
//!
//! Typical usages for this data structure:
//!  - Accumulating n-gram statistics over a corpus
//!  - Writing counts out one order at a time
//!  - Rescaling or filtering the counts of one order in place
//!
//! The `serde` feature derives `Serialize` and `Deserialize` for the trie.

#[cfg(feature = "serde")]
extern crate serde_crate;

pub mod error;

pub mod iterator;

pub mod trie;

pub use error::{Error, Result};
