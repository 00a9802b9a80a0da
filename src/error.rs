//! Error types for n-gram tries and their iterators.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid arguments passed to a trie or iterator.
///
/// Running out of n-grams is not an error: iterators signal it with `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A path must name at least one symbol, its length is the n-gram order
    #[error("n-gram path must contain at least one symbol")]
    EmptyPath,

    /// The no-symbol sentinel terminates key buffers and cannot be stored
    #[error("symbol at position {position} is the reserved no-symbol sentinel")]
    ReservedSymbol { position: usize },

    /// The key buffer for this order could not be allocated
    #[error("order {order} cannot be represented by a key buffer")]
    OrderTooLarge { order: usize },

    /// Serialized trie data which does not describe a valid trie
    #[error("malformed trie: {0}")]
    Malformed(String),
}
