//! A fixed-capacity destination list that avoids heap allocations.

use crate::constants::{NO_POSITION, Position};
use std::ops::Index;

/// Destinations produced by one generator, sized to that piece's maximum.
/// Unused slots hold `NO_POSITION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionList<const N: usize> {
    positions: [Position; N],
    count: usize,
}

impl<const N: usize> PositionList<N> {
    pub fn new() -> Self {
        Self {
            positions: [NO_POSITION; N],
            count: 0,
        }
    }

    pub fn add(&mut self, pos: Position) {
        if self.count < N {
            self.positions[self.count] = pos;
            self.count += 1;
        } else {
            log::warn!("destination list full ({}), dropping square {}", N, pos);
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.as_slice().contains(&pos)
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.positions[0..self.count]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.as_slice().iter()
    }

    /// Keeps the destinations for which `keep` holds, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(Position) -> bool) {
        let mut kept = 0;
        for i in 0..self.count {
            let pos = self.positions[i];
            if keep(pos) {
                self.positions[kept] = pos;
                kept += 1;
            }
        }
        self.positions[kept..self.count].fill(NO_POSITION);
        self.count = kept;
    }

    /// Copies into a list of a different capacity. Extra entries are dropped.
    pub fn widen<const M: usize>(&self) -> PositionList<M> {
        let mut out = PositionList::new();
        for &pos in self.iter() {
            out.add(pos);
        }
        out
    }
}

impl<const N: usize> Default for PositionList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Index<usize> for PositionList<N> {
    type Output = Position;

    fn index(&self, index: usize) -> &Self::Output {
        &self.positions[index]
    }
}

impl<'a, const N: usize> IntoIterator for &'a PositionList<N> {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
