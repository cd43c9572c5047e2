use crate::*;
pub use random::*;

mod random;

/// Chooses mine positions for a fresh board.
///
/// Implementations must return a layout of `config.size` holding exactly
/// `config.mines` mines; [`Board::generate`] rejects anything else.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}
