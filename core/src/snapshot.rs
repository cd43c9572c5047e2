use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Closed,
    Flag,
    Mine,
    Empty,
    Count(u8),
}

impl Glyph {
    pub const fn of(cell: Cell) -> Self {
        if cell.is_open() {
            Self::disclosed(cell)
        } else if cell.is_flagged() {
            Self::Flag
        } else {
            Self::Closed
        }
    }

    /// Glyph the cell would show if it were open.
    pub const fn disclosed(cell: Cell) -> Self {
        match cell.kind() {
            CellKind::Mine => Self::Mine,
            CellKind::Counter(0) => Self::Empty,
            CellKind::Counter(count) => Self::Count(count),
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("[ ]"),
            Self::Flag => f.write_str("[F]"),
            Self::Mine => f.write_str("[*]"),
            Self::Empty => f.write_str("   "),
            Self::Count(count) => write!(f, "[{}]", count),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub glyph: Glyph,
    pub is_open: bool,
    pub is_flagged: bool,
    /// Only known once the cell is open.
    pub is_mine: Option<bool>,
}

impl CellView {
    pub const fn from_cell(cell: Cell) -> Self {
        Self {
            glyph: Glyph::of(cell),
            is_open: cell.is_open(),
            is_flagged: cell.is_flagged(),
            is_mine: if cell.is_open() {
                Some(cell.is_mine())
            } else {
                None
            },
        }
    }
}

/// Player-visible copy of a board, indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board) -> Self {
        Self::build(board, CellView::from_cell)
    }

    /// Every cell drawn as if open, hidden state included. For debugging.
    pub fn disclosed(board: &Board) -> Self {
        Self::build(board, |cell| CellView {
            glyph: Glyph::disclosed(cell),
            is_mine: Some(cell.is_mine()),
            ..CellView::from_cell(cell)
        })
    }

    fn build(board: &Board, view: impl Fn(Cell) -> CellView) -> Self {
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::from_cell(Cell::default()));
        for (coords, cell) in board.iter_cells() {
            cells[coords.to_nd_index()] = view(cell);
        }

        Self {
            size,
            mine_count: board.mine_count(),
            cells,
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&CellView> {
        self.cells.get(coords.to_nd_index())
    }
}

/// One row per `y`, glyphs left to right by `x`.
impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x_end, y_end) = self.size;
        for y in 0..y_end {
            for x in 0..x_end {
                write!(f, "{}", self.cells[(x, y).to_nd_index()].glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
