use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Size of a 2-D array as board coordinates.
///
/// Arrays are only ever allocated from a [`Coord2`] size, so both axes fit.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (x, y) = grid.dim();
    (x as Coord, y as Coord)
}

/// Iterates the up to 8 in-bounds neighbors of a cell, row by row. Neighbors past
/// an edge are skipped, never wrapped around.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    // position in the 3x3 block around `center`, 4 is the center itself
    step: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            step: 0,
        }
    }

    fn offset(axis: Coord, delta: u8, bound: Coord) -> Option<Coord> {
        axis.checked_add(delta)?.checked_sub(1).filter(|&next| next < bound)
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let step = self.step;
            self.step += 1;
            if step == 4 {
                continue;
            }

            let (x, y) = self.center;
            let (width, height) = self.bounds;
            let neighbor = Self::offset(x, step % 3, width)
                .zip(Self::offset(y, step / 3, height));
            if neighbor.is_some() {
                return neighbor;
            }
        }
        None
    }
}
