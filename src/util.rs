/// Which child slot of a parent a node hangs from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// The slot holding keys less than the parent's.
    Left,
    /// The slot holding keys greater than the parent's.
    Right,
}

impl Side {
    /// The mirror image of this side. Successor walks use `Right` where predecessor walks use
    /// `Left` and vice versa, so most navigation is written once and flipped with this.
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
