//! A key-addressable ranking collection for Rust.
//!
//! This crate provides [`RankTree`], the data-structure core of "ranking
//! list" / sorted-set semantics (leaderboards, priority indices). Every
//! element carries a unique external key and a comparable value, and the
//! collection answers two questions in O(log n):
//!
//! - [`rank`](RankTree::rank) - What is this key's 1-based position among
//!   all elements, ascending or descending?
//! - [`range`](RankTree::range) / [`range_iter`](RankTree::range_iter) -
//!   Which elements occupy positions `[start, end]`?
//!
//! # Example
//!
//! ```
//! use rank_tree::{Item, RankTree};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! struct Score(i64);
//!
//! impl Item for Score {
//!     fn key(&self) -> String {
//!         self.0.to_string()
//!     }
//!     fn less(&self, than: &Self) -> bool {
//!         self.0 < than.0
//!     }
//! }
//!
//! let mut board = RankTree::new();
//! board.upsert("alice", Score(100));
//! board.upsert("bob", Score(85));
//! board.upsert("carol", Score(92));
//!
//! // O(1) membership and lookup through the key dictionary.
//! assert_eq!(board.get("bob"), Some(&Score(85)));
//! assert_eq!(board.len(), 3);
//!
//! // O(log n) rank queries, 1-based in both directions.
//! assert_eq!(board.rank("alice", false), Some(3));
//! assert_eq!(board.rank("alice", true), Some(1));
//!
//! // Bounded ranges with Python-slice index normalization.
//! let mut top: Vec<&str> = Vec::new();
//! board.range(0, 1, true, |key, _item, _rank| {
//!     top.push(key);
//!     true
//! });
//! assert_eq!(top, ["alice", "carol"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library
//!   dependency
//! - **O(1) key lookup** - A hash dictionary maps external keys to tree
//!   positions, so updates and deletes never search by value
//! - **O(log n) rank operations** - Subtree-size augmentation on every
//!   tree node
//! - **Allocation reuse** - Tree nodes live in an arena whose vacated
//!   slots are recycled under insert/delete churn
//!
//! # Implementation
//!
//! The collection is an augmented red-black tree (each node tracks the
//! size of its subtree, enabling rank queries without traversal) joined
//! with a key dictionary mapping each external key to the arena slot of
//! its node. A single shared sentinel slot stands in for every absent
//! child and the root's parent, so the structural routines contain no
//! null checks, only handle comparisons.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod item;
mod raw;

pub mod rank_tree;

pub use item::Item;
pub use rank_tree::RankTree;
pub use rank_tree::iter::{Iter, RangeIter};
