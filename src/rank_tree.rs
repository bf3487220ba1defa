use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;

use crate::item::Item;
use crate::raw::{Handle, RawRankTree};

mod diagram;
pub mod iter;

pub use iter::{Iter, RangeIter};

/// An ordered, key-addressable collection with O(log n) rank queries.
///
/// `RankTree` joins two structures into one abstraction: an augmented
/// red-black tree ordered by [`Item::less`], and a dictionary mapping
/// each external key to its tree position. The dictionary makes
/// [`get`](RankTree::get), [`contains_key`](RankTree::contains_key), and
/// the lookup half of every mutation O(1) even though the tree is
/// ordered by value, not by key; the tree's subtree-size counters make
/// [`rank`](RankTree::rank) and [`range`](RankTree::range) O(log n).
///
/// The two stay transactionally consistent inside every call: a key is
/// in the dictionary exactly when a node holding it is in the tree.
/// Callers only ever see keys, items, and ranks - never nodes.
///
/// Ties under [`Item::less`] are kept in an unspecified relative order
/// and are never broken by key.
///
/// # Examples
///
/// ```
/// use rank_tree::{Item, RankTree};
///
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// # struct Score(i64);
/// # impl Item for Score {
/// #     fn key(&self) -> String { self.0.to_string() }
/// #     fn less(&self, than: &Self) -> bool { self.0 < than.0 }
/// # }
/// let mut board = RankTree::new();
/// board.upsert("alice", Score(100));
/// board.upsert("bob", Score(85));
/// board.upsert("carol", Score(92));
///
/// assert_eq!(board.rank("bob", false), Some(1));
/// assert_eq!(board.rank("alice", true), Some(1));
///
/// board.remove("bob");
/// assert_eq!(board.rank("carol", false), Some(1));
/// ```
pub struct RankTree<I> {
    tree: RawRankTree<I>,
    dict: HashMap<Box<str>, Handle>,
}

impl<I> RankTree<I> {
    /// Node-pool capacity used by [`new`](RankTree::new).
    pub const DEFAULT_POOL_CAPACITY: usize = 32;

    /// Creates an empty collection with the default node-pool capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::RankTree;
    ///
    /// let tree: RankTree<i64> = RankTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_pool_capacity(Self::DEFAULT_POOL_CAPACITY)
    }

    /// Creates an empty collection whose node pool is pre-sized for
    /// `capacity` elements.
    ///
    /// The pool grows past this on demand; the capacity only controls
    /// how many node slots exist before the first reallocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::RankTree;
    ///
    /// let tree: RankTree<i64> = RankTree::with_pool_capacity(1024);
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self {
            tree: RawRankTree::with_pool_capacity(capacity),
            dict: HashMap::new(),
        }
    }

    /// Returns the number of elements.
    ///
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the collection holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` is present.
    ///
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.dict.contains_key(key)
    }

    /// Returns a reference to the item stored under `key`.
    ///
    ///
    /// # Complexity
    ///
    /// O(1) - a pure dictionary lookup; the tree is not searched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{Item, RankTree};
    ///
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// # struct Score(i64);
    /// # impl Item for Score {
    /// #     fn key(&self) -> String { self.0.to_string() }
    /// #     fn less(&self, than: &Self) -> bool { self.0 < than.0 }
    /// # }
    /// let mut board = RankTree::new();
    /// board.upsert("alice", Score(100));
    ///
    /// assert_eq!(board.get("alice"), Some(&Score(100)));
    /// assert_eq!(board.get("bob"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&I> {
        let &n = self.dict.get(key)?;
        Some(self.tree.node(n).item())
    }

    /// Returns the minimum-ordered entry, or `None` when empty.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &I)> {
        let x = self.tree.minimum(self.tree.root());
        (x != self.tree.nil()).then(|| {
            let node = self.tree.node(x);
            (&*node.key, node.item())
        })
    }

    /// Returns the maximum-ordered entry, or `None` when empty.
    #[must_use]
    pub fn last(&self) -> Option<(&str, &I)> {
        let x = self.tree.maximum(self.tree.root());
        (x != self.tree.nil()).then(|| {
            let node = self.tree.node(x);
            (&*node.key, node.item())
        })
    }

    /// Returns an ascending iterator over all entries.
    ///
    /// Items are yielded in [`Item::less`] order, smallest first, in
    /// amortized constant time per step.
    pub fn iter(&self) -> Iter<'_, I> {
        Iter::new(&self.tree)
    }
}

impl<I: Item> RankTree<I> {
    /// Inserts `item` under `key`, replacing any previous item.
    ///
    /// When `key` is already present and the new item's order does not
    /// cross either immediate neighbor - it is not strictly less than
    /// the predecessor's item and the successor's item is not strictly
    /// less than it - the item is swapped in place with no rebalancing.
    /// Otherwise the old node is deleted and a fresh one inserted, with
    /// the key's presence continuous throughout the call.
    ///
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{Item, RankTree};
    ///
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// # struct Score(i64);
    /// # impl Item for Score {
    /// #     fn key(&self) -> String { self.0.to_string() }
    /// #     fn less(&self, than: &Self) -> bool { self.0 < than.0 }
    /// # }
    /// let mut board = RankTree::new();
    /// board.upsert("alice", Score(100));
    /// board.upsert("bob", Score(85));
    ///
    /// // Same key, new value: rank moves with the new order.
    /// board.upsert("bob", Score(120));
    /// assert_eq!(board.rank("bob", true), Some(1));
    /// ```
    pub fn upsert(&mut self, key: &str, item: I) {
        if let Some(&n) = self.dict.get(key) {
            if let Err(item) = self.tree.update_item(n, item) {
                // The new order crosses a neighbor: delete and
                // re-insert, reusing the node's stored key allocation.
                let (stored_key, _old) = self.tree.delete(n);
                let handle = self.tree.insert(stored_key, item);
                *self.dict.get_mut(key).expect("`RankTree::upsert()` - dictionary entry vanished!") = handle;
            }
        } else {
            let stored_key: Box<str> = key.into();
            let handle = self.tree.insert(stored_key.clone(), item);
            self.dict.insert(stored_key, handle);
        }
    }

    /// Removes `key`, returning its item.
    ///
    /// An absent key is not an error; the call returns `None` and the
    /// collection is unchanged.
    ///
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: &str) -> Option<I> {
        let n = self.dict.remove(key)?;
        let (_key, item) = self.tree.delete(n);
        Some(item)
    }

    /// Returns the 1-based rank of `key`, or `None` if absent.
    ///
    /// With `reverse` false the minimum item has rank 1; with `reverse`
    /// true the maximum does. Whenever a rank is returned,
    /// `rank(k, false) + rank(k, true) == len() + 1`.
    ///
    /// A *present* key whose item ties with others may also answer
    /// `None`: the rank descent steers by [`Item::less`], and ties give
    /// it no signal, so rebalancing can leave a tied node unreachable by
    /// ordering. Tied items still count toward every other element's
    /// rank and appear in iteration and ranges as normal. Give items a
    /// total order if every key must be rankable.
    ///
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{Item, RankTree};
    ///
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// # struct Score(i64);
    /// # impl Item for Score {
    /// #     fn key(&self) -> String { self.0.to_string() }
    /// #     fn less(&self, than: &Self) -> bool { self.0 < than.0 }
    /// # }
    /// let mut board = RankTree::new();
    /// board.upsert("alice", Score(100));
    /// board.upsert("bob", Score(85));
    /// board.upsert("carol", Score(92));
    ///
    /// assert_eq!(board.rank("carol", false), Some(2));
    /// assert_eq!(board.rank("carol", true), Some(2));
    /// assert_eq!(board.rank("dave", false), None);
    /// ```
    #[must_use]
    pub fn rank(&self, key: &str, reverse: bool) -> Option<usize> {
        let &n = self.dict.get(key)?;
        let less = self.tree.less_count(n)?;
        Some(if reverse { self.tree.len() - less } else { less + 1 })
    }

    /// Visits the elements occupying positions `[start, end]`.
    ///
    /// Bounds are normalized like a Python slice over a sequence of
    /// `len()` elements: negative indices count from the end, the start
    /// is clamped to 0 and the end to `len() - 1`, and an empty or
    /// inverted range visits nothing. With `reverse` true, position 0 is
    /// the maximum item and the walk runs descending.
    ///
    /// `visit` receives each element's key, item, and 1-based rank in
    /// walk direction; returning `false` stops the walk early - a
    /// normal outcome, after which the tree is not touched again.
    ///
    ///
    /// # Complexity
    ///
    /// O(log n + k) for k visited elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{Item, RankTree};
    ///
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// # struct Score(i64);
    /// # impl Item for Score {
    /// #     fn key(&self) -> String { self.0.to_string() }
    /// #     fn less(&self, than: &Self) -> bool { self.0 < than.0 }
    /// # }
    /// let mut board = RankTree::new();
    /// board.upsert("a", Score(1));
    /// board.upsert("b", Score(2));
    /// board.upsert("c", Score(3));
    ///
    /// let mut seen = Vec::new();
    /// board.range(0, 1, true, |key, _item, rank| {
    ///     seen.push((key.to_owned(), rank));
    ///     true
    /// });
    /// assert_eq!(seen, [("c".to_owned(), 1), ("b".to_owned(), 2)]);
    /// ```
    pub fn range<'a, F>(&'a self, start: isize, end: isize, reverse: bool, mut visit: F)
    where
        F: FnMut(&'a str, &'a I, usize) -> bool,
    {
        let Some((start, end)) = normalize_bounds(self.len(), start, end) else {
            return;
        };
        let count = end - start + 1;

        let mut x = if reverse {
            self.tree.node_at_ordinal(self.len() - 1 - start)
        } else {
            self.tree.node_at_ordinal(start)
        };
        for i in 1..=count {
            let node = self.tree.node(x);
            if !visit(&node.key, node.item(), start + i) {
                break;
            }
            x = if reverse { self.tree.predecessor(x) } else { self.tree.successor(x) };
        }
    }

    /// Returns a resumable cursor over positions `[start, end]`.
    ///
    /// Bounds are normalized exactly as in [`range`](RankTree::range);
    /// out-of-bounds ranges yield an immediately exhausted iterator.
    /// Each step costs an O(log n) neighbor walk in the worst case,
    /// amortized constant, so [`range`](RankTree::range) is the faster
    /// choice when a callback fits the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{Item, RankTree};
    ///
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// # struct Score(i64);
    /// # impl Item for Score {
    /// #     fn key(&self) -> String { self.0.to_string() }
    /// #     fn less(&self, than: &Self) -> bool { self.0 < than.0 }
    /// # }
    /// let mut board = RankTree::new();
    /// board.upsert("a", Score(1));
    /// board.upsert("b", Score(2));
    /// board.upsert("c", Score(3));
    ///
    /// let keys: Vec<&str> = board.range_iter(-2, -1, false).map(|(key, _, _)| key).collect();
    /// assert_eq!(keys, ["b", "c"]);
    /// ```
    #[must_use]
    pub fn range_iter(&self, start: isize, end: isize, reverse: bool) -> RangeIter<'_, I> {
        match normalize_bounds(self.len(), start, end) {
            Some((start, end)) => RangeIter::new(&self.tree, start, end, reverse),
            None => RangeIter::empty(&self.tree),
        }
    }
}

/// Rebases and clamps a `[start, end]` bound pair against a sequence of
/// `len` elements, Python-slice style. `None` means the range selects
/// nothing.
fn normalize_bounds(len: usize, start: isize, end: isize) -> Option<(usize, usize)> {
    let n = isize::try_from(len).expect("`RankTree` - length exceeds `isize::MAX`!");
    let mut start = if start < 0 { n + start } else { start };
    let end = if end < 0 { n + end } else { end };
    if start < 0 {
        start = 0;
    }
    if start > end || start >= n {
        return None;
    }
    let end = end.min(n - 1);
    // Both bounds are within [0, n) here.
    Some((usize::try_from(start).expect("normalized start"), usize::try_from(end).expect("normalized end")))
}

impl<I> Default for RankTree<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, I> IntoIterator for &'a RankTree<I> {
    type Item = (&'a str, &'a I);
    type IntoIter = Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I: fmt::Debug> fmt::Debug for RankTree<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
