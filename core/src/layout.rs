use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the mines are, independent of any play state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLayout {
    size: Coord2,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            size,
            mine_mask: Array2::default(grid_index(size)),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            layout.place(layout.validate_coords(coords)?);
        }
        Ok(layout)
    }

    /// Puts a mine on `coords`, returning `false` when one was already there.
    pub(crate) fn place(&mut self, coords: Coord2) -> bool {
        let slot = &mut self.mine_mask[grid_index(coords)];
        if *slot {
            return false;
        }
        *slot = true;
        self.mine_count += 1;
        true
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size;
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::IndexOutOfRange {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mined positions in row-major order.
    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        let (rows, cols) = self.size;
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .fold(0, |count, pos| count + u8::from(self[pos]))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[grid_index(coords)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_coords_counts_distinct_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2), (0, 0)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((0, 0)));
        assert!(layout.contains_mine((2, 2)));
        assert!(!layout.contains_mine((1, 1)));
        assert_eq!(layout.mine_positions().collect::<Vec<_>>(), vec![(0, 0), (2, 2)]);
    }

    #[test]
    fn from_coords_rejects_out_of_range() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::IndexOutOfRange { row: 3, col: 0 })
        );
    }

    #[test]
    fn adjacent_counts_clip_at_edges() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 1), (1, 0), (1, 1)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((0, 0)), 3);
        assert_eq!(layout.adjacent_mine_count((2, 2)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 2);
    }
}
