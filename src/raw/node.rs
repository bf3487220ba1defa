use alloc::boxed::Box;

use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black tree node living in an arena slot.
///
/// `left` and `right` are slot-ownership edges; `parent` is a plain
/// back-reference used for the upward walks in rotation, fixup, and
/// successor/predecessor computation. Absent children and the root's
/// parent all point at the shared sentinel (slot 0).
pub(crate) struct Node<I> {
    pub(crate) color: Color,
    /// Size of the subtree rooted here, including this node.
    /// `count(left) + count(right) + 1` on every node at rest; zero only
    /// on the sentinel.
    pub(crate) count: usize,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) parent: Handle,
    /// Copy of the owning item's external key, for companion lookup.
    pub(crate) key: Box<str>,
    // `None` only on the sentinel.
    item: Option<I>,
}

impl<I> Node<I> {
    /// The shared absence marker: BLACK, empty, self-linked at slot 0.
    pub(crate) fn sentinel() -> Self {
        let nil = Handle::from_index(0);
        Self {
            color: Color::Black,
            count: 0,
            left: nil,
            right: nil,
            parent: nil,
            key: Box::default(),
            item: None,
        }
    }

    /// A freshly inserted leaf: RED, count 1, all links at the sentinel
    /// until the tree wires it in.
    pub(crate) fn new_leaf(key: Box<str>, item: I, nil: Handle) -> Self {
        Self {
            color: Color::Red,
            count: 1,
            left: nil,
            right: nil,
            parent: nil,
            key,
            item: Some(item),
        }
    }

    #[inline]
    pub(crate) fn item(&self) -> &I {
        self.item.as_ref().expect("`Node::item()` - the sentinel holds no item!")
    }

    #[inline]
    pub(crate) fn item_mut(&mut self) -> &mut I {
        self.item.as_mut().expect("`Node::item_mut()` - the sentinel holds no item!")
    }

    /// Consumes the node, yielding its key and item. Called only on
    /// nodes just vacated from the arena.
    pub(crate) fn into_entry(self) -> (Box<str>, I) {
        let item = self.item.expect("`Node::into_entry()` - the sentinel holds no item!");
        (self.key, item)
    }
}
