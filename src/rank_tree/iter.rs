use core::iter::FusedIterator;

use crate::raw::{Handle, RawRankTree};

/// An ascending iterator over the entries of a [`RankTree`].
///
/// Created by [`RankTree::iter`]. Yields `(key, item)` pairs in
/// [`Item::less`] order, smallest first.
///
/// [`RankTree`]: crate::RankTree
/// [`RankTree::iter`]: crate::RankTree::iter
/// [`Item::less`]: crate::Item::less
pub struct Iter<'a, I> {
    tree: &'a RawRankTree<I>,
    x: Handle,
}

impl<'a, I> Iter<'a, I> {
    pub(crate) fn new(tree: &'a RawRankTree<I>) -> Self {
        Self {
            tree,
            x: tree.minimum(tree.root()),
        }
    }
}

impl<'a, I> Iterator for Iter<'a, I> {
    type Item = (&'a str, &'a I);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x == self.tree.nil() {
            return None;
        }
        let node = self.tree.node(self.x);
        self.x = self.tree.successor(self.x);
        Some((&node.key, node.item()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The cursor does not track how far along it is; only the upper
        // bound is known.
        (0, Some(self.tree.len()))
    }
}

impl<I> FusedIterator for Iter<'_, I> {}

/// A resumable cursor over a rank range of a [`RankTree`].
///
/// Created by [`RankTree::range_iter`]. Yields `(key, item, rank)`
/// triples, where `rank` is the element's 1-based position counted in
/// walk direction, and stops after the normalized range is exhausted.
///
/// [`RankTree`]: crate::RankTree
/// [`RankTree::range_iter`]: crate::RankTree::range_iter
pub struct RangeIter<'a, I> {
    tree: &'a RawRankTree<I>,
    node: Handle,
    /// Rank the next yielded element carries.
    rank: usize,
    remaining: usize,
    reverse: bool,
}

impl<'a, I> RangeIter<'a, I> {
    /// `start`/`end` are zero-based ordinals, already normalized and
    /// in-bounds.
    pub(crate) fn new(tree: &'a RawRankTree<I>, start: usize, end: usize, reverse: bool) -> Self {
        let node = if reverse {
            tree.node_at_ordinal(tree.len() - 1 - start)
        } else {
            tree.node_at_ordinal(start)
        };
        Self {
            tree,
            node,
            rank: start + 1,
            remaining: end - start + 1,
            reverse,
        }
    }

    /// An exhausted cursor, for ranges that normalize to nothing.
    pub(crate) fn empty(tree: &'a RawRankTree<I>) -> Self {
        Self {
            tree,
            node: tree.nil(),
            rank: 0,
            remaining: 0,
            reverse: false,
        }
    }
}

impl<'a, I> Iterator for RangeIter<'a, I> {
    type Item = (&'a str, &'a I, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.node == self.tree.nil() {
            return None;
        }
        let node = self.tree.node(self.node);
        let rank = self.rank;

        self.remaining -= 1;
        self.rank += 1;
        if self.remaining > 0 {
            self.node = if self.reverse {
                self.tree.predecessor(self.node)
            } else {
                self.tree.successor(self.node)
            };
        }

        Some((&node.key, node.item(), rank))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<I> ExactSizeIterator for RangeIter<'_, I> {}

impl<I> FusedIterator for RangeIter<'_, I> {}
