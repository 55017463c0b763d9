use std::{ops::Index, slice::ChunksExact};

/// The positions visited by a walk, one row per step.
///
/// Row `i` is the position after step `i` has been applied, so the first row
/// is already one unit away from the origin on every axis. Coordinates are
/// stored row-major in a single buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    dimensions: usize,
    coords: Vec<i64>,
}

impl Path {
    /// Accumulates row-major `steps` into positions.
    ///
    /// `steps.len()` must be a multiple of `dimensions`.
    pub(crate) fn from_steps(dimensions: usize, mut steps: Vec<i64>) -> Self {
        debug_assert!(dimensions > 0);
        debug_assert_eq!(steps.len() % dimensions, 0);

        for i in dimensions..steps.len() {
            steps[i] += steps[i - dimensions];
        }

        Self {
            dimensions,
            coords: steps,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of positions, which equals the number of steps taken.
    pub fn len(&self) -> usize {
        self.coords.len() / self.dimensions
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[i64]> {
        let start = index.checked_mul(self.dimensions)?;
        let end = start.checked_add(self.dimensions)?;
        self.coords.get(start..end)
    }

    pub fn first(&self) -> Option<&[i64]> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&[i64]> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> ChunksExact<'_, i64> {
        self.coords.chunks_exact(self.dimensions)
    }

    /// All coordinates along one axis, in step order.
    pub fn axis(&self, axis: usize) -> impl Iterator<Item = i64> + '_ {
        assert!(axis < self.dimensions, "axis {axis} out of range");
        self.coords
            .iter()
            .skip(axis)
            .step_by(self.dimensions)
            .copied()
    }

    pub fn as_flat(&self) -> &[i64] {
        &self.coords
    }
}

impl Index<usize> for Path {
    type Output = [i64];

    fn index(&self, index: usize) -> &Self::Output {
        let start = index * self.dimensions;
        &self.coords[start..start + self.dimensions]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a [i64];
    type IntoIter = ChunksExact<'a, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
