//! Primal face to dual point lookup.

use crate::mesh::{CellId, MeshIndex, PointId};

/// Maps each primal face to the dual point created for it.
///
/// Cell ids are dense and never reused, so the table is a flat vector
/// indexed by cell id with unset entries for cells that got no dual point.
#[derive(Debug, Clone)]
pub struct DualPointTable<I: MeshIndex = u32> {
    entries: Vec<PointId<I>>,
    len: usize,
}

impl<I: MeshIndex> DualPointTable<I> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty table sized for `num_cells` primal cells.
    pub fn with_capacity(num_cells: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_cells),
            len: 0,
        }
    }

    /// Record the dual point of `cell`, returning the previous one if any.
    pub fn insert(&mut self, cell: CellId<I>, dual: PointId<I>) -> Option<PointId<I>> {
        let index = cell.index();
        if index >= self.entries.len() {
            self.entries.resize(index + 1, PointId::invalid());
        }

        let previous = std::mem::replace(&mut self.entries[index], dual);
        if previous.is_valid() {
            Some(previous)
        } else {
            self.len += 1;
            None
        }
    }

    /// Look up the dual point of `cell`.
    pub fn get(&self, cell: CellId<I>) -> Option<PointId<I>> {
        self.entries
            .get(cell.index())
            .copied()
            .filter(|p| p.is_valid())
    }

    /// Check whether `cell` has a dual point.
    pub fn contains(&self, cell: CellId<I>) -> bool {
        self.get(cell).is_some()
    }

    /// Number of recorded cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over `(cell, dual point)` pairs in cell id order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId<I>, PointId<I>)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_valid())
            .map(|(i, &p)| (CellId::new(i), p))
    }
}

impl<I: MeshIndex> Default for DualPointTable<I> {
    fn default() -> Self {
        Self::new()
    }
}
