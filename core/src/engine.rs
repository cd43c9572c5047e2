use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A single game from the first reveal to a win or a loss.
///
/// Owns its board outright; renderers issue commands through this type and pull
/// [`BoardSnapshot`]s to redraw.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    board: Board,
    status: GameStatus,
    flag_count: CellCount,
}

impl GameState {
    pub fn new_game(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        Ok(Self::from_board(Board::new(width, height, mine_count)?))
    }

    pub fn new_game_with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        log::debug!("seed: {}", seed);
        Ok(Self::from_board(Board::with_seed(config, seed)?))
    }

    /// Wraps a board, picking up any play already recorded on it: an open mine
    /// means the game was lost, every safe cell open means it was won.
    pub fn from_board(board: Board) -> Self {
        let flag_count = board
            .iter_cells()
            .filter(|(_, cell)| cell.is_flagged())
            .count() as CellCount;
        let status = if board
            .iter_cells()
            .any(|(_, cell)| cell.is_mine() && cell.is_open())
        {
            GameStatus::Lost
        } else if board.all_safe_open() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };
        log::debug!(
            "New game {:?} with {} mines, {:?}",
            board.size(),
            board.mine_count(),
            status
        );
        Self {
            board,
            status,
            flag_count,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative with excess flags.
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flag_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.board.cell_at(coords)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(&self.board)
    }

    /// Reveals a cell. Does nothing once the game has ended.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Outcome> {
        if self.status.is_terminal() {
            return Ok(Outcome::Continue);
        }

        Ok(match reveal(&mut self.board, coords)? {
            RevealResult::HitMine => {
                self.board.disclose_mines();
                self.end_game(GameStatus::Lost);
                Outcome::Lost
            }
            RevealResult::Opened(_) if self.board.all_safe_open() => {
                self.end_game(GameStatus::Won);
                Outcome::Won
            }
            RevealResult::Opened(_) => Outcome::Continue,
        })
    }

    /// Flips the flag on a closed cell and returns whether it is now flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.board.validate_coords(coords)?;
        self.check_in_progress()?;

        if self.board.cell(coords).is_open() {
            return Err(GameError::InvalidOperation);
        }

        let flagged = self.board.toggle_flag_at(coords);
        if flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        log::trace!("Flag at {:?} now {}", coords, flagged);
        Ok(flagged)
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_terminal() {
            return;
        }
        log::debug!("Game ended: {:?}", status);
        self.status = status;
        // disclosure opens flagged mines too
        self.flag_count = self
            .board
            .iter_cells()
            .filter(|(_, cell)| cell.is_flagged())
            .count() as CellCount;
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_terminal() {
            Err(GameError::InvalidOperation)
        } else {
            Ok(())
        }
    }
}
