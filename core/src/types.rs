use core::slice;

/// Single axis of a board position, used for row and column indices and board dimensions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Index into the ndarray grids backing the board.
pub(crate) const fn grid_index((row, col): Coord2) -> [usize; 2] {
    [row as usize, col as usize]
}

/// Number of cells on a `rows` by `cols` board. Two `u16` axes always fit.
pub const fn area(rows: Coord, cols: Coord) -> CellCount {
    rows as CellCount * cols as CellCount
}

/// Row and column steps to the eight surrounding cells, clockwise from the top-left.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Moves one axis by `delta`, staying within `0..len`.
fn step(at: Coord, delta: i8, len: Coord) -> Option<Coord> {
    at.checked_add_signed(delta.into()).filter(|&next| next < len)
}

/// Iterates the up to eight positions surrounding `center`, clipped at the board edges.
///
/// Every adjacency question on the board goes through this iterator, so counting and
/// flood-fill always agree on which cells touch.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: OFFSETS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (row, col) = self.center;
        let (rows, cols) = self.bounds;
        self.offsets
            .find_map(|&(dr, dc)| Some((step(row, dr, rows)?, step(col, dc, cols)?)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}
