use alloc::boxed::Box;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};
use crate::item::Item;

/// The augmented red-black tree backing `RankTree`.
///
/// The tree is ordered by `Item::less` and knows nothing about the key
/// dictionary; it stores each node's key only so the composition layer
/// can hand both back to callers. Every node carries a subtree-size
/// count, which is what turns the ordinary search-tree operations into
/// order-statistic queries.
///
/// Slot 0 of the arena always holds the shared sentinel: one BLACK node
/// with count 0 standing in for every absent child and for the parent of
/// the root. All absence tests below are handle comparisons against it.
pub(crate) struct RawRankTree<I> {
    /// Arena holding the sentinel and every live node: the node pool.
    nodes: Arena<Node<I>>,
    root: Handle,
    nil: Handle,
}

impl<I> RawRankTree<I> {
    pub(crate) fn with_pool_capacity(capacity: usize) -> Self {
        // One extra slot so the configured capacity is available for
        // real nodes after the sentinel claims slot 0.
        let mut nodes = Arena::with_capacity(capacity + 1);
        let nil = nodes.alloc(Node::sentinel());
        debug_assert_eq!(nil.to_index(), 0);
        Self { nodes, root: nil, nil }
    }

    #[inline]
    pub(crate) const fn nil(&self) -> Handle {
        self.nil
    }

    #[inline]
    pub(crate) fn root(&self) -> Handle {
        self.root
    }

    /// Number of live nodes, read straight off the root's subtree count.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count(self.root)
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<I> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<I> {
        self.nodes.get_mut(handle)
    }

    // Link/field shorthands; the structural routines read much closer to
    // their textbook form with these than with chained accessors.

    #[inline]
    fn left(&self, x: Handle) -> Handle {
        self.nodes.get(x).left
    }

    #[inline]
    fn right(&self, x: Handle) -> Handle {
        self.nodes.get(x).right
    }

    #[inline]
    fn parent(&self, x: Handle) -> Handle {
        self.nodes.get(x).parent
    }

    #[inline]
    fn color(&self, x: Handle) -> Color {
        self.nodes.get(x).color
    }

    #[inline]
    fn count(&self, x: Handle) -> usize {
        self.nodes.get(x).count
    }

    /// Leftmost node of the subtree rooted at `x`; `x` itself when the
    /// subtree is empty (the sentinel self-links, so this terminates).
    pub(crate) fn minimum(&self, mut x: Handle) -> Handle {
        while self.left(x) != self.nil {
            x = self.left(x);
        }
        x
    }

    /// Rightmost node of the subtree rooted at `x`.
    pub(crate) fn maximum(&self, mut x: Handle) -> Handle {
        while self.right(x) != self.nil {
            x = self.right(x);
        }
        x
    }

    /// In-order successor of `x`, or the sentinel past the maximum.
    pub(crate) fn successor(&self, mut x: Handle) -> Handle {
        if self.right(x) != self.nil {
            return self.minimum(self.right(x));
        }
        let mut y = self.parent(x);
        while y != self.nil && x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    /// In-order predecessor of `x`, or the sentinel before the minimum.
    pub(crate) fn predecessor(&self, mut x: Handle) -> Handle {
        if self.left(x) != self.nil {
            return self.maximum(self.left(x));
        }
        let mut y = self.parent(x);
        while y != self.nil && x == self.left(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    /// Node occupying the zero-based ordinal `index` in ascending order,
    /// or the sentinel when `index >= len()`. A pure count descent; the
    /// items themselves are never compared.
    pub(crate) fn node_at_ordinal(&self, mut index: usize) -> Handle {
        let mut x = self.root;
        while x != self.nil {
            let left_count = self.count(self.left(x));
            if left_count < index {
                index = index - left_count - 1;
                x = self.right(x);
            } else if left_count > index {
                x = self.left(x);
            } else {
                return x;
            }
        }
        x
    }
}

impl<I: Item> RawRankTree<I> {
    /// Rotates the edge between `x` and its right child left.
    ///
    /// ```text
    ///   x               y
    ///  / \             / \
    /// a   y    ->     x   c
    ///    / \         / \
    ///   b   c       a   b
    /// ```
    ///
    /// Counts are recomputed first, while both nodes still see their
    /// pre-rotation children: the demoted node's new count derives from
    /// the subtrees it will end up with (`a` and `b`), the promoted
    /// node's from the demoted node and `c`. Every rank query depends on
    /// these four reads landing in this order.
    fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x);

        let x_count = self.count(self.left(x)) + self.count(self.left(y)) + 1;
        let y_count = x_count + self.count(self.right(y)) + 1;
        self.node_mut(x).count = x_count;
        self.node_mut(y).count = y_count;

        // y's left subtree becomes x's right subtree.
        let b = self.left(y);
        self.node_mut(x).right = b;
        if b != self.nil {
            self.node_mut(b).parent = x;
        }

        // x becomes y's left child.
        self.node_mut(y).left = x;
        let p = self.parent(x);
        if p == self.nil {
            self.root = y;
        } else if self.left(p) == x {
            self.node_mut(p).left = y;
        } else {
            self.node_mut(p).right = y;
        }
        self.node_mut(y).parent = p;
        self.node_mut(x).parent = y;
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    ///
    /// ```text
    ///     y           x
    ///    / \         / \
    ///   x   c  ->   a   y
    ///  / \             / \
    /// a   b           b   c
    /// ```
    fn rotate_right(&mut self, y: Handle) {
        let x = self.left(y);

        let y_count = self.count(self.right(x)) + self.count(self.right(y)) + 1;
        let x_count = self.count(self.left(x)) + y_count + 1;
        self.node_mut(y).count = y_count;
        self.node_mut(x).count = x_count;

        // x's right subtree becomes y's left subtree.
        let b = self.right(x);
        self.node_mut(y).left = b;
        if b != self.nil {
            self.node_mut(b).parent = y;
        }

        // y becomes x's right child.
        self.node_mut(x).right = y;
        let p = self.parent(y);
        if p == self.nil {
            self.root = x;
        } else if self.left(p) == y {
            self.node_mut(p).left = x;
        } else {
            self.node_mut(p).right = x;
        }
        self.node_mut(x).parent = p;
        self.node_mut(y).parent = x;
    }

    /// Inserts `item` under `key` as a RED leaf and rebalances.
    ///
    /// The descent bumps each visited node's count as it passes: the new
    /// node lands somewhere below every node the search touches, so the
    /// O(log n) path update rides along with the comparisons.
    pub(crate) fn insert(&mut self, key: Box<str>, item: I) -> Handle {
        let mut y = self.nil;
        let mut insert_left = true;
        let mut x = self.root;
        while x != self.nil {
            y = x;
            self.node_mut(x).count += 1;
            if self.node(x).item().less(&item) {
                x = self.right(x);
                insert_left = false;
            } else {
                x = self.left(x);
                insert_left = true;
            }
        }

        let z = self.nodes.alloc(Node::new_leaf(key, item, self.nil));
        self.node_mut(z).parent = y;
        if y == self.nil {
            self.root = z;
        } else if insert_left {
            self.node_mut(y).left = z;
        } else {
            self.node_mut(y).right = z;
        }

        self.insert_fixup(z);
        z
    }

    /// Restores the red-black properties after an insertion.
    ///
    /// The classic six cases, three per side: a red uncle recolors and
    /// ascends; a black uncle with `z` as near nephew rotates into the
    /// far-nephew shape; a black uncle with `z` as far nephew recolors
    /// and rotates the grandparent, terminating.
    fn insert_fixup(&mut self, mut z: Handle) {
        while self.color(self.parent(z)) == Color::Red {
            let p = self.parent(z);
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.color(uncle) == Color::Red {
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    z = g;
                } else {
                    if z == self.right(p) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.color(uncle) == Color::Red {
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    z = g;
                } else {
                    if z == self.left(p) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    /// Replaces the subtree rooted at `u` with the one rooted at `v`.
    ///
    /// When `v` is the sentinel this writes the sentinel's parent link;
    /// `delete_fixup` depends on that to walk upward from an empty slot.
    fn transplant(&mut self, u: Handle, v: Handle) {
        let p = self.parent(u);
        if p == self.nil {
            self.root = v;
        } else if self.left(p) == u {
            self.node_mut(p).left = v;
        } else {
            self.node_mut(p).right = v;
        }
        self.node_mut(v).parent = p;
    }

    /// Walks `p`'s ancestor chain (inclusive) decrementing counts.
    fn decrement_counts(&mut self, mut p: Handle) {
        while p != self.nil {
            self.node_mut(p).count -= 1;
            p = self.parent(p);
        }
    }

    /// Unlinks `z`, returns its slot to the pool, and yields its entry.
    ///
    /// Three structural cases: splice in the right child when there is
    /// no left child, the left child when there is no right child, or
    /// splice out the in-order successor and transplant it into `z`'s
    /// position carrying `z`'s color and count. Counts along the path to
    /// the true removal point are decremented during the splice; if the
    /// physically removed node was BLACK, the fixup restores balance.
    pub(crate) fn delete(&mut self, z: Handle) -> (Box<str>, I) {
        let mut removed_color = self.color(z);
        let x: Handle;

        if self.left(z) == self.nil {
            x = self.right(z);
            self.transplant(z, x);
            let p = self.parent(x);
            self.decrement_counts(p);
        } else if self.right(z) == self.nil {
            x = self.left(z);
            self.transplant(z, x);
            let p = self.parent(x);
            self.decrement_counts(p);
        } else {
            // Two children: the successor y of z is the true removal
            // point. Its ancestors (z included) each lose one node; the
            // count z held is then handed to y along with z's color.
            let y = self.minimum(self.right(z));
            removed_color = self.color(y);
            x = self.right(y);
            let p = self.parent(y);
            self.decrement_counts(p);

            if self.parent(y) == z {
                // x may be the sentinel; its parent must still point at
                // y for the fixup's upward walk.
                self.node_mut(x).parent = y;
            } else {
                self.transplant(y, x);
                let zr = self.right(z);
                self.node_mut(y).right = zr;
                self.node_mut(zr).parent = y;
            }
            self.transplant(z, y);
            let zl = self.left(z);
            self.node_mut(y).left = zl;
            self.node_mut(zl).parent = y;

            let (z_color, z_count) = {
                let zn = self.node(z);
                (zn.color, zn.count)
            };
            let yn = self.node_mut(y);
            yn.color = z_color;
            yn.count = z_count;
        }

        let removed = self.nodes.take(z);

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }
        removed.into_entry()
    }

    /// Restores the red-black properties after deleting a BLACK node.
    ///
    /// Four cases per side: a red sibling rotates into the black-sibling
    /// shape; a black sibling with two black children recolors and
    /// ascends; a black sibling with a red near child rotates into the
    /// far-red-child shape; a black sibling with a red far child
    /// recolors, rotates the parent, and terminates.
    fn delete_fixup(&mut self, mut x: Handle) {
        while x != self.root && self.color(x) == Color::Black {
            let p = self.parent(x);
            if x == self.left(p) {
                let mut w = self.right(p);
                if self.color(w) == Color::Red {
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_left(p);
                    w = self.right(self.parent(x));
                }
                if self.color(self.left(w)) == Color::Black && self.color(self.right(w)) == Color::Black {
                    self.node_mut(w).color = Color::Red;
                    x = self.parent(x);
                } else {
                    if self.color(self.right(w)) == Color::Black {
                        let wl = self.left(w);
                        self.node_mut(wl).color = Color::Black;
                        self.node_mut(w).color = Color::Red;
                        self.rotate_right(w);
                        w = self.right(self.parent(x));
                    }
                    let p = self.parent(x);
                    self.node_mut(w).color = self.color(p);
                    self.node_mut(p).color = Color::Black;
                    let wr = self.right(w);
                    self.node_mut(wr).color = Color::Black;
                    self.rotate_left(p);
                    x = self.root;
                }
            } else {
                let mut w = self.left(p);
                if self.color(w) == Color::Red {
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_right(p);
                    w = self.left(self.parent(x));
                }
                if self.color(self.left(w)) == Color::Black && self.color(self.right(w)) == Color::Black {
                    self.node_mut(w).color = Color::Red;
                    x = self.parent(x);
                } else {
                    if self.color(self.left(w)) == Color::Black {
                        let wr = self.right(w);
                        self.node_mut(wr).color = Color::Black;
                        self.node_mut(w).color = Color::Red;
                        self.rotate_left(w);
                        w = self.left(self.parent(x));
                    }
                    let p = self.parent(x);
                    self.node_mut(w).color = self.color(p);
                    self.node_mut(p).color = Color::Black;
                    let wl = self.left(w);
                    self.node_mut(wl).color = Color::Black;
                    self.rotate_right(p);
                    x = self.root;
                }
            }
        }
        self.node_mut(x).color = Color::Black;
    }

    /// Attempts the upsert fast path: swap the item in place when its
    /// order does not cross either immediate neighbor. Hands the item
    /// back when the adjacency check fails and the caller must delete
    /// and re-insert instead.
    ///
    /// The check is deliberately local - strict `less` against the
    /// immediate successor and predecessor only, never a re-validation
    /// against the whole tree.
    pub(crate) fn update_item(&mut self, x: Handle, item: I) -> Result<(), I> {
        let successor = self.successor(x);
        if successor != self.nil && self.node(successor).item().less(&item) {
            return Err(item);
        }
        let predecessor = self.predecessor(x);
        if predecessor != self.nil && item.less(self.node(predecessor).item()) {
            return Err(item);
        }
        *self.node_mut(x).item_mut() = item;
        Ok(())
    }

    /// Number of items strictly ordered before `n`, found by descending
    /// from the root toward `n`: every right turn confirms the turned
    /// node and its left subtree as "less". `None` if the descent misses
    /// `n`, which happens when rebalancing has moved a node tied with
    /// `n`'s item onto the descent path - ties give `less` no signal to
    /// steer by, so the walk commits to one side.
    pub(crate) fn less_count(&self, n: Handle) -> Option<usize> {
        let mut count = 0;
        let mut x = self.root;
        while x != self.nil {
            if x == n {
                return Some(count + self.count(self.left(x)));
            }
            if self.node(x).item().less(self.node(n).item()) {
                count += self.count(x) - self.count(self.right(x));
                x = self.right(x);
            } else {
                x = self.left(x);
            }
        }
        None
    }
}
