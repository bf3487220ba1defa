use alloc::string::String;

/// The capability set a value must provide to live in a [`RankTree`].
///
/// An item contributes two independent dimensions to the collection: an
/// identity dimension (its external key) and an ordering dimension (its
/// position among all items).
///
/// [`RankTree`]: crate::RankTree
///
/// # Contract
///
/// - [`key`](Item::key) must be stable and unique per logical element.
/// - [`less`](Item::less) must be a strict weak ordering: irreflexive,
///   transitive, and total up to ties. Two items tie exactly when
///   neither is `less` than the other; ties are never broken by key, so
///   the relative order of tied items is unspecified.
///
/// # Examples
///
/// ```
/// use rank_tree::Item;
///
/// #[derive(Debug, Clone, Copy)]
/// struct Score(i64);
///
/// impl Item for Score {
///     fn key(&self) -> String {
///         self.0.to_string()
///     }
///     fn less(&self, than: &Self) -> bool {
///         self.0 < than.0
///     }
/// }
/// ```
pub trait Item {
    /// Returns the stable external key identifying this item.
    fn key(&self) -> String;

    /// Returns true if `self` orders strictly before `than`.
    fn less(&self, than: &Self) -> bool;
}
