use super::*;

/// Uniformly random placement, reproducible from a seed.
///
/// Positions are drawn without replacement, so the requested count is always met
/// exactly and no two mines share a cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use rand::seq::index;

        let total_cells = usize::from(config.total_cells());
        let height = usize::from(config.size.1);
        let mines = usize::from(config.mines);

        if mines > total_cells {
            log::warn!(
                "Minefield cannot hold requested mines, requested {} but only fits {}",
                mines,
                total_cells
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for place in index::sample(&mut rng, total_cells, mines.min(total_cells)) {
            mine_mask[[place / height, place % height]] = true;
        }

        log::trace!("Placed {} mines with seed {}", mines, self.seed);
        MineLayout::from_mine_mask(mine_mask)
    }
}
