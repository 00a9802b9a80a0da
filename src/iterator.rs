//! Provides depth-bounded iterators over an NgramTrie.
//!
//! Both iterators walk the trie depth first, in ascending symbol order,
//! and only stop at nodes exactly `order` symbols below the root which
//! carry a count. Shallower branches which never reach `order` are
//! backtracked past. Nodes at the right depth which were only created on
//! the way to a longer n-gram carry no count and are skipped.
//!
//! The current n-gram is kept in a key buffer of `order + 1` symbols. The
//! last slot always holds [`Symbol::NONE`], so the buffer can be handed to
//! consumers which expect a terminated key.
//!
//! [`Ngrams`] shares the trie and implements [`Iterator`]. [`NgramCursor`]
//! borrows the trie exclusively and hands out mutable counts.
//!
//! ```
//! use ngram_trie::trie::NgramTrie;
//!
//! let mut trie: NgramTrie = NgramTrie::new();
//! trie.count_sequence(&[3, 1, 3, 2], 2, 1).unwrap();
//!
//! let bigrams: Vec<(Vec<u32>, u64)> = trie
//!     .ngrams(2)
//!     .unwrap()
//!     .map(|kv| (kv.key, *kv.value))
//!     .collect();
//! assert_eq!(
//!     bigrams,
//!     vec![(vec![1, 3], 1), (vec![3, 1], 1), (vec![3, 2], 1)]
//! );
//!
//! // Double every unigram count
//! let mut cursor = trie.cursor(1).unwrap();
//! while let Some(count) = cursor.advance() {
//!     *count *= 2;
//! }
//! assert_eq!(trie.lookup([3]).unwrap(), Some(&4));
//! ```
use std::iter::FusedIterator;

use tracing::trace;

use crate::error::{Error, Result};
use crate::trie::{CountValue, NgramTrie, Node, Symbol};

/// Iterator Item
#[derive(Debug)]
pub struct KeyValueRef<'a, S, C> {
    pub key: Vec<S>,
    pub value: &'a C,
}

// Allocate a key buffer of order + 1 symbols, terminated by Symbol::NONE
fn key_buffer<S: Symbol>(order: usize) -> Result<Vec<S>> {
    let len = order
        .checked_add(1)
        .ok_or(Error::OrderTooLarge { order })?;
    let mut keys = Vec::new();
    keys.try_reserve_exact(len)
        .map_err(|_| Error::OrderTooLarge { order })?;
    keys.resize(len, S::NONE);
    Ok(keys)
}

/// Depth first walk state shared by both iterators.
///
/// `positions[d]` is the index of the next untried child of the node at
/// depth `d` on the current path. The node at depth `d` is found by
/// following `positions[i] - 1` for every `i < d`.
#[derive(Clone, Debug)]
struct Traversal {
    order: usize,
    positions: Vec<usize>,
    exhausted: bool,
    yielded: usize,
}

impl Traversal {
    fn new(order: usize) -> Self {
        let mut traversal = Self {
            order,
            positions: Vec::new(),
            exhausted: false,
            yielded: 0,
        };
        traversal.reset();
        traversal
    }

    fn reset(&mut self) {
        self.positions.clear();
        self.positions.push(0);
        self.exhausted = false;
        self.yielded = 0;
    }

    // Child indices leading from the root to the last yielded node
    fn path(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().map(|p| p - 1)
    }

    fn node_at<'n, S: Symbol, C>(
        root: &'n Node<S, C>,
        positions: &[usize],
    ) -> Option<&'n Node<S, C>> {
        let mut node = root;
        for position in positions {
            node = node.child_at(position - 1)?;
        }
        Some(node)
    }

    fn finish(&mut self) {
        self.exhausted = true;
        trace!(order = self.order, yielded = self.yielded, "n-gram traversal exhausted");
    }

    /// Move to the next counted node at depth `order`, writing its path
    /// into `keys`.
    fn step<'n, S: Symbol, C>(
        &mut self,
        root: &'n Node<S, C>,
        keys: &mut [S],
    ) -> Option<&'n Node<S, C>> {
        if self.exhausted {
            return None;
        }
        if self.order == 0 {
            self.finish();
            return root.value().map(|_| {
                self.yielded += 1;
                root
            });
        }
        loop {
            let depth = self.positions.len() - 1;
            let node = Self::node_at(root, &self.positions[..depth])?;
            match node.child_at(self.positions[depth]) {
                Some(child) => {
                    self.positions[depth] += 1;
                    keys[depth] = child.symbol();
                    if depth + 1 == self.order {
                        if child.value().is_some() {
                            self.yielded += 1;
                            return Some(child);
                        }
                    } else if child.has_children() {
                        self.positions.push(0);
                    }
                }
                None => {
                    self.positions.pop();
                    if self.positions.is_empty() {
                        self.finish();
                        return None;
                    }
                }
            }
        }
    }
}

/// Read-only iterator over the n-grams of one order.
#[derive(Clone, Debug)]
pub struct Ngrams<'a, S, C> {
    trie: &'a NgramTrie<S, C>,
    keys: Vec<S>,
    traversal: Traversal,
}

impl<'a, S: Symbol, C: CountValue> Ngrams<'a, S, C> {
    /// Bind a new iterator to `trie`, positioned before the first n-gram.
    pub fn new(trie: &'a NgramTrie<S, C>, order: usize) -> Result<Self> {
        let keys = key_buffer(order)?;
        trace!(order, "n-gram iterator created");
        Ok(Self {
            trie,
            keys,
            traversal: Traversal::new(order),
        })
    }

    /// Restart from the first n-gram.
    pub fn init(&mut self) {
        self.traversal.reset();
    }

    /// The order this iterator walks.
    pub fn order(&self) -> usize {
        self.traversal.order
    }

    /// Advance to the next n-gram and return its count. The n-gram itself
    /// is available from [`Ngrams::ngram`] until the next advance.
    pub fn advance(&mut self) -> Option<&'a C> {
        let trie = self.trie;
        self.traversal
            .step(&trie.root, &mut self.keys)
            .and_then(Node::value)
    }

    /// The whole key buffer, terminated by [`Symbol::NONE`].
    pub fn current_key(&self) -> &[S] {
        &self.keys
    }

    /// The symbols of the current n-gram.
    pub fn ngram(&self) -> &[S] {
        &self.keys[..self.traversal.order]
    }
}

impl<'a, S: Symbol, C: CountValue> Iterator for Ngrams<'a, S, C> {
    type Item = KeyValueRef<'a, S, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.advance()?;
        Some(KeyValueRef {
            key: self.ngram().to_vec(),
            value,
        })
    }
}

impl<'a, S: Symbol, C: CountValue> FusedIterator for Ngrams<'a, S, C> {}

/// Cursor over the n-grams of one order which hands out mutable counts.
///
/// The cursor borrows the trie exclusively, so no n-gram can be inserted
/// while a pass is in progress. Drop the cursor to insert more, then
/// create a new one.
#[derive(Debug)]
pub struct NgramCursor<'a, S, C> {
    trie: &'a mut NgramTrie<S, C>,
    keys: Vec<S>,
    traversal: Traversal,
}

impl<'a, S: Symbol, C: CountValue> NgramCursor<'a, S, C> {
    /// Bind a new cursor to `trie`, positioned before the first n-gram.
    pub fn new(trie: &'a mut NgramTrie<S, C>, order: usize) -> Result<Self> {
        let keys = key_buffer(order)?;
        trace!(order, "n-gram cursor created");
        Ok(Self {
            trie,
            keys,
            traversal: Traversal::new(order),
        })
    }

    /// Restart from the first n-gram, discarding any progress.
    pub fn init(&mut self) {
        self.traversal.reset();
    }

    /// The order this cursor walks.
    pub fn order(&self) -> usize {
        self.traversal.order
    }

    /// Advance to the next n-gram and return a mutable reference to its
    /// count. Returns `None` once every n-gram has been visited, and keeps
    /// doing so until [`NgramCursor::init`] is called.
    pub fn advance(&mut self) -> Option<&mut C> {
        self.traversal.step(&self.trie.root, &mut self.keys)?;
        self.trie
            .root
            .descend_mut(self.traversal.path())
            .and_then(|node| node.value.as_mut())
    }

    /// Like [`NgramCursor::advance`] but also returns the n-gram.
    pub fn next_entry(&mut self) -> Option<(&[S], &mut C)> {
        self.traversal.step(&self.trie.root, &mut self.keys)?;
        let value = self
            .trie
            .root
            .descend_mut(self.traversal.path())
            .and_then(|node| node.value.as_mut())?;
        Some((&self.keys[..self.traversal.order], value))
    }

    /// The whole key buffer, terminated by [`Symbol::NONE`].
    pub fn current_key(&self) -> &[S] {
        &self.keys
    }

    /// The symbols of the current n-gram.
    pub fn ngram(&self) -> &[S] {
        &self.keys[..self.traversal.order]
    }
}
