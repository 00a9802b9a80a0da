//! Provides an n-gram count trie. Each path of symbols from the root is
//! an n-gram and the node it reaches may carry a count for it.
//!
//! Symbols must support the [`Symbol`] trait. Counts must support the
//! [`CountValue`] trait.
//!
//! Counts of every order live side by side in the same tree: the count
//! for `[a]` sits at depth 1, the count for `[a, b]` at depth 2 and so
//! on. Depth is never stored in a node, it is the length of the path
//! used to reach it. This means the same trie can be walked once per
//! order with a depth-bounded iterator (see [`crate::iterator`]).
//!
//! Example 1
//! ```
//! use ngram_trie::trie::NgramTrie;
//!
//! let mut trie: NgramTrie = NgramTrie::new();
//! *trie.insert_or_get([1, 2]).unwrap() += 3;
//! assert_eq!(trie.increment([1, 2], 2).unwrap(), 5);
//! assert_eq!(trie.lookup([1, 2]).unwrap(), Some(&5));
//!
//! // [1] was created on the way to [1, 2] but was never counted
//! assert_eq!(trie.lookup([1]).unwrap(), None);
//! assert!(trie.lookup(std::iter::empty()).is_err());
//! ```
//!
//! Example 2
//! ```
//! use ngram_trie::trie::NgramTrie;
//!
//! // Count every unigram and bigram of a sequence of symbol ids
//! let mut trie: NgramTrie<u16, u32> = NgramTrie::new();
//! trie.count_sequence(&[7, 8, 7, 8], 2, 1).unwrap();
//! assert_eq!(trie.lookup([7]).unwrap(), Some(&2));
//! assert_eq!(trie.lookup([7, 8]).unwrap(), Some(&2));
//! assert_eq!(trie.lookup([8, 7]).unwrap(), Some(&1));
//! assert_eq!(trie.max_order(), 2);
//! ```

use std::ops::AddAssign;

use tracing::trace;

use crate::error::{Error, Result};
use crate::iterator::{NgramCursor, Ngrams};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};

/// Symbols which we wish to store in an NgramTrie must implement
/// Symbol.
///
/// `NONE` is the "no-symbol" sentinel which terminates iterator key
/// buffers. It can never appear inside a stored path.
pub trait Symbol: Copy + Ord {
    const NONE: Self;
}

macro_rules! impl_symbol {
    ($($t:ty),*) => {
        $(
            impl Symbol for $t {
                const NONE: Self = <$t>::MAX;
            }
        )*
    };
}

impl_symbol!(u8, u16, u32, u64, usize);

/// The default symbol identifier type.
pub type VocabIndex = u32;

/// Counts which we wish to store in an NgramTrie must implement
/// CountValue. `Default` provides the zero of a new count.
pub trait CountValue: Copy + Default + AddAssign {}

// Blanket implementation which satisfies the compiler
impl<C> CountValue for C
where
    C: Copy + Default + AddAssign,
{
    // Nothing to implement, since C already supports the other traits.
}

pub(crate) struct Node<S, C> {
    symbol: S,
    pub(crate) value: Option<C>,
    // Sorted by symbol, no duplicates
    children: Vec<Node<S, C>>,
}

// Paths can be far deeper than the stack, so nodes are torn down from a
// work list instead of recursively.
impl<S, C> Drop for Node<S, C> {
    fn drop(&mut self) {
        let mut nodes = std::mem::take(&mut self.children);
        while let Some(mut node) = nodes.pop() {
            nodes.append(&mut node.children);
        }
    }
}

impl<S, C> Node<S, C> {
    // Depth (relative to this node) of the deepest descendant carrying a
    // value, 0 if there is none
    fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Self, usize)> = self.children.iter().map(|n| (n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            if node.value.is_some() {
                deepest = deepest.max(depth);
            }
            stack.extend(node.children.iter().map(|n| (n, depth + 1)));
        }
        deepest
    }
}

impl<S: Symbol, C> Node<S, C> {
    fn new(symbol: S) -> Self {
        Self {
            symbol,
            value: None,
            children: vec![],
        }
    }

    pub(crate) fn symbol(&self) -> S {
        self.symbol
    }

    pub(crate) fn value(&self) -> Option<&C> {
        self.value.as_ref()
    }

    pub(crate) fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Child in ascending symbol order.
    pub(crate) fn child_at(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    pub(crate) fn child(&self, symbol: S) -> Option<&Self> {
        self.children
            .binary_search_by_key(&symbol, |n| n.symbol)
            .ok()
            .map(|i| &self.children[i])
    }

    fn child_mut(&mut self, symbol: S) -> Option<&mut Self> {
        match self.children.binary_search_by_key(&symbol, |n| n.symbol) {
            Ok(i) => self.children.get_mut(i),
            Err(_) => None,
        }
    }

    fn child_or_insert(&mut self, symbol: S) -> &mut Self {
        let index = match self.children.binary_search_by_key(&symbol, |n| n.symbol) {
            Ok(i) => i,
            Err(i) => {
                self.children.insert(i, Node::new(symbol));
                i
            }
        };
        &mut self.children[index]
    }

    /// Follow a path of child indices down from this node.
    pub(crate) fn descend_mut<I: IntoIterator<Item = usize>>(
        &mut self,
        indices: I,
    ) -> Option<&mut Self> {
        let mut node = self;
        for index in indices {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }
}

/// Stores n-gram counts keyed by sequences of symbols.
pub struct NgramTrie<S = VocabIndex, C = u64> {
    pub(crate) root: Node<S, C>,
    len: usize,
}

impl<S: Symbol, C> Default for NgramTrie<S, C> {
    fn default() -> Self {
        Self {
            root: Node::new(S::NONE),
            len: 0,
        }
    }
}

impl<S: Symbol, C: Clone> Clone for NgramTrie<S, C> {
    fn clone(&self) -> Self {
        let copy = |node: &Node<S, C>| Node {
            symbol: node.symbol,
            value: node.value.clone(),
            children: Vec::with_capacity(node.children.len()),
        };
        // Source nodes on the current path with their next child to copy,
        // and the copies of those nodes still being filled in
        let mut sources: Vec<(&Node<S, C>, usize)> = vec![(&self.root, 0)];
        let mut copies: Vec<Node<S, C>> = vec![copy(&self.root)];
        while let Some(&(source, next)) = sources.last() {
            if let Some(child) = source.children.get(next) {
                if let Some(top) = sources.last_mut() {
                    top.1 += 1;
                }
                sources.push((child, 0));
                copies.push(copy(child));
                continue;
            }
            sources.pop();
            if copies.len() > 1 {
                if let Some(done) = copies.pop() {
                    if let Some(parent) = copies.last_mut() {
                        parent.children.push(done);
                    }
                }
            }
        }
        match copies.pop() {
            Some(root) => Self {
                root,
                len: self.len,
            },
            None => Self::default(),
        }
    }
}

impl<S: Symbol, C: PartialEq> PartialEq for NgramTrie<S, C> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut pairs = vec![(&self.root, &other.root)];
        while let Some((a, b)) = pairs.pop() {
            if a.symbol != b.symbol || a.value != b.value || a.children.len() != b.children.len() {
                return false;
            }
            pairs.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl<S, C> std::fmt::Debug for NgramTrie<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NgramTrie")
            .field("len", &self.len)
            .field("max_order", &self.root.max_depth())
            .finish()
    }
}

// The serialized form is a flat pre-order list of nodes, each tagged with
// its depth. Reading it back rebuilds the tree and checks that siblings
// are strictly ascending.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
struct NodeRecord<S, C> {
    depth: usize,
    symbol: S,
    value: Option<C>,
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
struct TrieRecords<S, C> {
    root: Option<C>,
    nodes: Vec<NodeRecord<S, C>>,
}

#[cfg(feature = "serde")]
impl<S: Symbol, C> NgramTrie<S, C> {
    fn records(&self) -> TrieRecords<S, &C> {
        let mut nodes = vec![];
        let mut stack: Vec<(&Node<S, C>, usize)> =
            self.root.children.iter().rev().map(|n| (n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            nodes.push(NodeRecord {
                depth,
                symbol: node.symbol,
                value: node.value.as_ref(),
            });
            stack.extend(node.children.iter().rev().map(|n| (n, depth + 1)));
        }
        TrieRecords {
            root: self.root.value.as_ref(),
            nodes,
        }
    }

    fn from_records(records: TrieRecords<S, C>) -> Result<Self> {
        let mut root = Node::new(S::NONE);
        root.value = records.root;
        // path[d] is the node at depth d still waiting for children
        let mut path = vec![root];
        let mut len = 0;
        for record in records.nodes {
            if record.depth == 0 || record.depth > path.len() {
                return Err(Error::Malformed(format!(
                    "node at depth {} cannot follow depth {}",
                    record.depth,
                    path.len() - 1
                )));
            }
            if record.symbol == S::NONE {
                return Err(Error::ReservedSymbol {
                    position: record.depth - 1,
                });
            }
            while path.len() > record.depth {
                Self::attach(&mut path)?;
            }
            if record.value.is_some() {
                len += 1;
            }
            path.push(Node {
                symbol: record.symbol,
                value: record.value,
                children: vec![],
            });
        }
        while path.len() > 1 {
            Self::attach(&mut path)?;
        }
        match path.pop() {
            Some(root) => Ok(Self { root, len }),
            None => Err(Error::Malformed("missing root".to_string())),
        }
    }

    // Move the deepest node on the path into its parent's children
    fn attach(path: &mut Vec<Node<S, C>>) -> Result<()> {
        let node = match path.pop() {
            Some(node) => node,
            None => return Ok(()),
        };
        let parent = match path.last_mut() {
            Some(parent) => parent,
            None => return Err(Error::Malformed("missing root".to_string())),
        };
        if let Some(last) = parent.children.last() {
            if last.symbol >= node.symbol {
                return Err(Error::Malformed(
                    "sibling symbols are not strictly ascending".to_string(),
                ));
            }
        }
        parent.children.push(node);
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<S: Symbol + Serialize, C: Serialize> Serialize for NgramTrie<S, C> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> std::result::Result<Z::Ok, Z::Error> {
        self.records().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, S, C> Deserialize<'de> for NgramTrie<S, C>
where
    S: Symbol + Deserialize<'de>,
    C: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let records = TrieRecords::<S, C>::deserialize(deserializer)?;
        Self::from_records(records).map_err(<D::Error as serde_crate::de::Error>::custom)
    }
}

impl<S: Symbol, C: CountValue> NgramTrie<S, C> {
    /// Create a new NgramTrie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the NgramTrie, dropping every node.
    pub fn clear(&mut self) {
        self.root = Node::new(S::NONE);
        self.len = 0;
    }

    /// How many n-grams (of any order >= 1) carry a count?
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the NgramTrie empty?
    pub fn is_empty(&self) -> bool {
        !self.root.has_children()
    }

    /// The order of the longest n-gram carrying a count, 0 if there are none.
    pub fn max_order(&self) -> usize {
        self.root.max_depth()
    }

    /// Get a mutable reference to the count for `path`, creating the path
    /// (and a zero count) if it is missing. Nodes created on the way to
    /// the end of `path` carry no count.
    pub fn insert_or_get<P: IntoIterator<Item = S>>(&mut self, path: P) -> Result<&mut C> {
        let path = Self::validate(path)?;
        let mut node = &mut self.root;
        for symbol in path {
            node = node.child_or_insert(symbol);
        }
        if node.value.is_none() {
            self.len += 1;
        }
        Ok(node.value.get_or_insert_with(C::default))
    }

    /// Add `weight` to the count for `path` and return the new count.
    pub fn increment<P: IntoIterator<Item = S>>(&mut self, path: P, weight: C) -> Result<C> {
        let count = self.insert_or_get(path)?;
        *count += weight;
        Ok(*count)
    }

    /// Get a reference to the count for `path`, if it has one.
    pub fn lookup<P: IntoIterator<Item = S>>(&self, path: P) -> Result<Option<&C>> {
        let mut node = &self.root;
        let mut depth = 0;
        for symbol in path {
            depth += 1;
            match node.child(symbol) {
                Some(n) => node = n,
                None => return Ok(None),
            }
        }
        if depth == 0 {
            return Err(Error::EmptyPath);
        }
        Ok(node.value())
    }

    /// Get a mutable reference to the count for `path`, if it has one.
    pub fn lookup_mut<P: IntoIterator<Item = S>>(&mut self, path: P) -> Result<Option<&mut C>> {
        let mut node = &mut self.root;
        let mut depth = 0;
        for symbol in path {
            depth += 1;
            match node.child_mut(symbol) {
                Some(n) => node = n,
                None => return Ok(None),
            }
        }
        if depth == 0 {
            return Err(Error::EmptyPath);
        }
        Ok(node.value.as_mut())
    }

    /// Add `weight` to every n-gram of length `1..=order` found in
    /// `symbols`. An order of 0 counts nothing.
    pub fn count_sequence(&mut self, symbols: &[S], order: usize, weight: C) -> Result<()> {
        if let Some(position) = symbols.iter().position(|s| *s == S::NONE) {
            return Err(Error::ReservedSymbol { position });
        }
        trace!(symbols = symbols.len(), order, "counting sequence");
        for start in 0..symbols.len() {
            let mut node = &mut self.root;
            for &symbol in symbols[start..].iter().take(order) {
                node = node.child_or_insert(symbol);
                if node.value.is_none() {
                    self.len += 1;
                }
                *node.value.get_or_insert_with(C::default) += weight;
            }
        }
        Ok(())
    }

    /// The order 0 count, held by the root.
    pub fn root_count(&self) -> Option<&C> {
        self.root.value()
    }

    /// A mutable reference to the order 0 count, created as zero if missing.
    pub fn root_count_mut(&mut self) -> &mut C {
        self.root.value.get_or_insert_with(C::default)
    }

    /// How many n-grams of exactly `order` carry a count?
    pub fn num_ngrams(&self, order: usize) -> Result<usize> {
        let mut ngrams = self.ngrams(order)?;
        let mut count = 0;
        while ngrams.advance().is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Create a read-only iterator over the n-grams of exactly `order`.
    pub fn ngrams(&self, order: usize) -> Result<Ngrams<'_, S, C>> {
        Ngrams::new(self, order)
    }

    /// Create a cursor over the n-grams of exactly `order` which hands out
    /// mutable counts.
    pub fn cursor(&mut self, order: usize) -> Result<NgramCursor<'_, S, C>> {
        NgramCursor::new(self, order)
    }

    fn validate<P: IntoIterator<Item = S>>(path: P) -> Result<Vec<S>> {
        let path: Vec<S> = path.into_iter().collect();
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        match path.iter().position(|s| *s == S::NONE) {
            Some(position) => Err(Error::ReservedSymbol { position }),
            None => Ok(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use std::collections::HashMap;

    #[test]
    fn it_can_create_an_empty_trie() {
        let trie: NgramTrie = NgramTrie::new();
        assert!(trie.is_empty());
        assert_eq!(0, trie.len());
        assert_eq!(0, trie.max_order());
        assert_eq!(None, trie.root_count());
    }

    #[test]
    fn it_inserts_new_path_with_zero_count() {
        let mut trie: NgramTrie = NgramTrie::new();
        assert_eq!(*trie.insert_or_get([1, 2, 3]).unwrap(), 0);
        assert_eq!(trie.lookup([1, 2, 3]).unwrap(), Some(&0));
        assert_eq!(1, trie.len());
    }

    #[test]
    fn it_returns_existing_count() {
        let mut trie: NgramTrie = NgramTrie::new();
        *trie.insert_or_get([4, 5]).unwrap() = 9;
        assert_eq!(*trie.insert_or_get([4, 5]).unwrap(), 9);
        assert_eq!(1, trie.len());
    }

    #[test]
    fn it_leaves_intermediate_nodes_uncounted() {
        let mut trie: NgramTrie = NgramTrie::new();
        trie.insert_or_get([1, 2, 3]).unwrap();
        assert_eq!(trie.lookup([1]).unwrap(), None);
        assert_eq!(trie.lookup([1, 2]).unwrap(), None);
        assert_eq!(trie.lookup_mut([1, 2]).unwrap(), None);
    }

    #[test]
    fn it_cannot_find_longer_or_missing_path() {
        let mut trie: NgramTrie = NgramTrie::new();
        trie.increment([1, 2], 1).unwrap();
        assert_eq!(trie.lookup([1, 2, 3]).unwrap(), None);
        assert_eq!(trie.lookup([2]).unwrap(), None);
        assert_eq!(trie.lookup([2, 1]).unwrap(), None);
    }

    #[test]
    fn it_rejects_empty_paths() {
        let mut trie: NgramTrie = NgramTrie::new();
        assert_eq!(trie.insert_or_get([]).unwrap_err(), Error::EmptyPath);
        assert_eq!(trie.increment([], 1).unwrap_err(), Error::EmptyPath);
        assert_eq!(trie.lookup([]).unwrap_err(), Error::EmptyPath);
        assert_eq!(trie.lookup_mut([]).unwrap_err(), Error::EmptyPath);
        assert!(trie.is_empty());
    }

    #[test]
    fn it_rejects_the_sentinel_without_creating_nodes() {
        let mut trie: NgramTrie = NgramTrie::new();
        assert_eq!(
            trie.insert_or_get([1, VocabIndex::NONE, 2]).unwrap_err(),
            Error::ReservedSymbol { position: 1 }
        );
        assert_eq!(
            trie.count_sequence(&[3, VocabIndex::NONE], 2, 1)
                .unwrap_err(),
            Error::ReservedSymbol { position: 1 }
        );
        assert!(trie.is_empty());
        assert_eq!(trie.lookup([1, VocabIndex::NONE]).unwrap(), None);
    }

    #[test]
    fn it_increments_counts() {
        let mut trie: NgramTrie<u16, u32> = NgramTrie::new();
        assert_eq!(trie.increment([1], 3).unwrap(), 3);
        assert_eq!(trie.increment([1], 4).unwrap(), 7);
        if let Some(count) = trie.lookup_mut([1]).unwrap() {
            *count += 1;
        }
        assert_eq!(trie.lookup([1]).unwrap(), Some(&8));
    }

    #[test]
    fn it_counts_sequences_at_every_order() {
        let mut trie: NgramTrie<u8, usize> = NgramTrie::new();
        trie.count_sequence(&[1, 2, 1, 2, 3], 3, 1).unwrap();
        assert_eq!(trie.lookup([1]).unwrap(), Some(&2));
        assert_eq!(trie.lookup([3]).unwrap(), Some(&1));
        assert_eq!(trie.lookup([1, 2]).unwrap(), Some(&2));
        assert_eq!(trie.lookup([2, 1]).unwrap(), Some(&1));
        assert_eq!(trie.lookup([1, 2, 1]).unwrap(), Some(&1));
        assert_eq!(trie.lookup([1, 2, 3]).unwrap(), Some(&1));
        assert_eq!(trie.lookup([1, 2, 1, 2]).unwrap(), None);
        // 3 unigrams, 3 bigrams, 3 trigrams
        assert_eq!(9, trie.len());
        assert_eq!(3, trie.max_order());
    }

    #[test]
    fn it_counts_nothing_at_order_zero() {
        let mut trie: NgramTrie = NgramTrie::new();
        trie.count_sequence(&[1, 2, 3], 0, 1).unwrap();
        assert!(trie.is_empty());
        trie.count_sequence(&[], 3, 1).unwrap();
        assert!(trie.is_empty());
    }

    #[test]
    fn it_supports_fractional_counts() {
        let mut trie: NgramTrie<u32, f64> = NgramTrie::new();
        trie.count_sequence(&[5, 6], 2, 0.5).unwrap();
        trie.count_sequence(&[5, 6], 2, 0.25).unwrap();
        assert_eq!(trie.lookup([5, 6]).unwrap(), Some(&0.75));
    }

    #[test]
    fn it_holds_a_root_count() {
        let mut trie: NgramTrie = NgramTrie::new();
        *trie.root_count_mut() += 42;
        assert_eq!(trie.root_count(), Some(&42));
        assert_eq!(0, trie.len());
    }

    #[test]
    fn it_finds_max_order_of_counted_paths() {
        let mut trie: NgramTrie = NgramTrie::new();
        trie.increment([1], 1).unwrap();
        trie.insert_or_get([2, 3]).unwrap();
        assert_eq!(2, trie.max_order());
        trie.insert_or_get([1, 2, 3, 4]).unwrap();
        assert_eq!(4, trie.max_order());
    }

    #[test]
    fn it_can_clear_a_trie() {
        let mut trie: NgramTrie = NgramTrie::new();
        trie.count_sequence(&[1, 2, 3], 2, 1).unwrap();
        *trie.root_count_mut() = 3;
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(0, trie.len());
        assert_eq!(None, trie.root_count());
        assert_eq!(trie.lookup([1]).unwrap(), None);
    }

    #[test]
    fn it_keeps_children_sorted() {
        let mut trie: NgramTrie = NgramTrie::new();
        for symbol in [9, 3, 7, 1, 5] {
            trie.insert_or_get([symbol]).unwrap();
        }
        let symbols: Vec<VocabIndex> = trie.root.children.iter().map(|n| n.symbol()).collect();
        assert_eq!(vec![1, 3, 5, 7, 9], symbols);
    }

    #[test]
    fn it_matches_a_hashmap_of_random_increments() {
        static POPULATION_SIZE: usize = 1000;
        let mut trie: NgramTrie<u16, u64> = NgramTrie::new();
        let mut expected: HashMap<Vec<u16>, u64> = HashMap::new();
        for _i in 0..POPULATION_SIZE {
            let path: Vec<u16> = (0..thread_rng().gen_range(1..=4))
                .map(|_| thread_rng().gen_range(0..8))
                .collect();
            let weight = thread_rng().gen_range(1..10);
            trie.increment(path.iter().copied(), weight).unwrap();
            *expected.entry(path).or_default() += weight;
        }
        assert_eq!(expected.len(), trie.len());
        for (path, count) in &expected {
            assert_eq!(trie.lookup(path.iter().copied()).unwrap(), Some(count));
        }
    }

    #[test]
    fn it_handles_very_deep_paths() {
        static DEPTH: usize = 200_000;
        let mut trie: NgramTrie<u8, u64> = NgramTrie::new();
        trie.increment((0..DEPTH).map(|i| (i % 7) as u8), 1).unwrap();
        assert_eq!(DEPTH, trie.max_order());
        let copy = trie.clone();
        assert_eq!(trie, copy);
        assert_eq!(format!("{:?}", copy), "NgramTrie { len: 1, max_order: 200000 }");
        drop(copy);
        trie.clear();
        assert!(trie.is_empty());
        trie.insert_or_get((0..DEPTH).map(|i| (i % 5) as u8)).unwrap();
        drop(trie);
    }

    #[test]
    fn it_clones_and_compares_tries() {
        let mut t1: NgramTrie = NgramTrie::new();
        t1.count_sequence(&[4, 2, 4, 1, 2], 3, 1).unwrap();
        *t1.root_count_mut() = 5;
        let mut t2 = t1.clone();
        assert_eq!(t1, t2);
        assert_eq!(t1.lookup([4, 2]).unwrap(), t2.lookup([4, 2]).unwrap());
        t2.increment([4, 2], 1).unwrap();
        assert_ne!(t1, t2);
    }

    // serialization test
    #[cfg(feature = "serde")]
    #[test]
    fn it_rejects_unsorted_children_from_json() {
        let json = r#"{"root":null,"nodes":[
            {"depth":1,"symbol":9,"value":1},
            {"depth":1,"symbol":1,"value":1}
        ]}"#;
        let result: std::result::Result<NgramTrie, _> = serde_json::from_str(json);
        assert!(result.is_err());
        let json = r#"{"root":null,"nodes":[
            {"depth":1,"symbol":1,"value":1},
            {"depth":2,"symbol":3,"value":1},
            {"depth":2,"symbol":3,"value":2}
        ]}"#;
        let result: std::result::Result<NgramTrie, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn it_rejects_depth_jumps_and_sentinels_from_json() {
        let json = r#"{"root":null,"nodes":[{"depth":2,"symbol":1,"value":1}]}"#;
        let result: std::result::Result<NgramTrie, _> = serde_json::from_str(json);
        assert!(result.is_err());
        let json = r#"{"root":null,"nodes":[{"depth":1,"symbol":4294967295,"value":1}]}"#;
        let result: std::result::Result<NgramTrie, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn it_rebuilds_counts_from_json() {
        let json = r#"{"root":7,"nodes":[
            {"depth":1,"symbol":1,"value":null},
            {"depth":2,"symbol":2,"value":4},
            {"depth":2,"symbol":5,"value":null},
            {"depth":3,"symbol":6,"value":2},
            {"depth":1,"symbol":9,"value":1}
        ]}"#;
        let trie: NgramTrie = serde_json::from_str(json).expect("deserializing");
        assert_eq!(3, trie.len());
        assert_eq!(trie.root_count(), Some(&7));
        assert_eq!(trie.lookup([9]).unwrap(), Some(&1));
        assert_eq!(trie.lookup([1, 2]).unwrap(), Some(&4));
        assert_eq!(trie.lookup([1, 5, 6]).unwrap(), Some(&2));
        assert_eq!(trie.lookup([1]).unwrap(), None);
        assert_eq!(3, trie.max_order());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn it_serializes_deep_tries_to_json() {
        let mut t1: NgramTrie<u8, u64> = NgramTrie::new();
        t1.increment((0..50_000).map(|i| (i % 3) as u8), 2).unwrap();
        let t_str = serde_json::to_string(&t1).expect("serializing");
        let t2: NgramTrie<u8, u64> = serde_json::from_str(&t_str).expect("deserializing");
        assert_eq!(t1, t2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn it_serializes_trie_to_json() {
        let mut t1: NgramTrie = NgramTrie::new();
        t1.count_sequence(&[0, 1, 2, 3, 1, 2], 3, 1).unwrap();
        // Round trip via serde to create a new trie and then
        // check for equality
        let t_str = serde_json::to_string(&t1).expect("serializing");
        let t2: NgramTrie = serde_json::from_str(&t_str).expect("deserializing");
        assert_eq!(t1, t2);
        assert_eq!(t1.len(), t2.len());
    }
}
