use crate::shallow::ShallowEq;

/// A contiguous range of logical item indexes to materialize, overscan included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl WindowRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// One windowed slice entry handed to the reconciler: the application item plus the
/// index/offset/height snapshot taken from the metadata store at slicing time.
///
/// Offsets and heights are estimates until the index has been rendered and measured at least
/// once, so two snapshots of the same item can legitimately differ across passes.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowItem<T> {
    pub item: T,
    pub index: usize,
    /// Cumulative vertical offset of the item's top edge, in px.
    pub offset_top: u64,
    /// Height in px (estimated or measured).
    pub height: u32,
}

impl<T: ShallowEq> ShallowEq for WindowItem<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.offset_top == other.offset_top
            && self.height == other.height
            && self.item.shallow_eq(&other.item)
    }
}
