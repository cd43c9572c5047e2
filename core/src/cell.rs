use serde::{Deserialize, Serialize};

use crate::{ConfigIssue, GameError};

/// What a cell is. Fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    /// Safe cell carrying the number of adjacent mines.
    Counter(u8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellRepr")]
pub struct Cell {
    kind: CellKind,
    is_open: bool,
    is_flagged: bool,
}

#[derive(Deserialize)]
struct CellRepr {
    kind: CellKind,
    is_open: bool,
    is_flagged: bool,
}

impl TryFrom<CellRepr> for Cell {
    type Error = GameError;

    fn try_from(repr: CellRepr) -> Result<Self, Self::Error> {
        if repr.is_open && repr.is_flagged {
            return Err(ConfigIssue::OpenFlaggedCell.into());
        }
        Ok(Self {
            kind: repr.kind,
            is_open: repr.is_open,
            is_flagged: repr.is_flagged,
        })
    }
}

impl Cell {
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            is_open: false,
            is_flagged: false,
        }
    }

    pub const fn mine() -> Self {
        Self::new(CellKind::Mine)
    }

    pub const fn counter(adjacency: u8) -> Self {
        Self::new(CellKind::Counter(adjacency))
    }

    pub const fn kind(self) -> CellKind {
        self.kind
    }

    pub const fn is_mine(self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    /// Adjacent mine count, `None` for mines.
    pub const fn adjacency(self) -> Option<u8> {
        match self.kind {
            CellKind::Mine => None,
            CellKind::Counter(count) => Some(count),
        }
    }

    pub const fn is_open(self) -> bool {
        self.is_open
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Opening is one-way and clears any flag.
    pub(crate) fn open(&mut self) {
        self.is_open = true;
        self.is_flagged = false;
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.is_flagged = !self.is_flagged;
        self.is_flagged
    }

    pub(crate) fn set_adjacency(&mut self, adjacency: u8) {
        if let CellKind::Counter(_) = self.kind {
            self.kind = CellKind::Counter(adjacency);
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::counter(0)
    }
}
