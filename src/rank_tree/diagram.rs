use alloc::string::String;
use core::fmt::Write;

use super::RankTree;
use crate::raw::{Color, Handle};

impl<I> RankTree<I> {
    /// Renders the tree shape for troubleshooting.
    ///
    /// The tree is drawn sideways: the right subtree above its parent,
    /// the left below, one node per line indented by depth. Each line is
    /// the node's key followed by its color (`R`/`B`) and subtree size.
    /// Purely a read-only diagnostic; the output format is not stable.
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
    /// let diagram = board.diagram();
    /// assert!(diagram.contains("b (B 3)"));
    /// ```
    #[must_use]
    pub fn diagram(&self) -> String {
        let mut out = String::new();
        self.render(self.tree.root(), 0, &mut out);
        out
    }

    fn render(&self, x: Handle, depth: usize, out: &mut String) {
        if x == self.tree.nil() {
            return;
        }
        let node = self.tree.node(x);
        self.render(node.right, depth + 1, out);
        for _ in 0..depth {
            out.push_str("    ");
        }
        let color = match node.color {
            Color::Red => 'R',
            Color::Black => 'B',
        };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} ({} {})", node.key, color, node.count);
        self.render(node.left, depth + 1, out);
    }
}
