use ndarray::Array2;

use crate::*;

/// Rectangular grid of cells with a fixed set of mines.
///
/// Cell kinds and adjacency counts are settled at construction; afterwards only
/// the open and flag state of individual cells changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    open_safe_count: CellCount,
}

impl Board {
    /// Random board seeded from entropy.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        let config = GameConfig::new((width, height), mine_count)?;
        let generator = RandomMineGenerator::from_entropy();
        log::debug!("seed: {}", generator.seed());
        Self::generate(config, generator)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::generate(config, RandomMineGenerator::new(seed))
    }

    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        config.validate()?;

        let mut board = Self::blank(config.size);
        board.place_mines(config, generator)?;
        board.compute_adjacency();
        Ok(board)
    }

    /// Board with mines exactly where `layout` puts them.
    pub fn from_layout(layout: &MineLayout) -> Result<Self> {
        layout.game_config().validate()?;

        let mut board = Self::blank(layout.size());
        board.apply_layout(layout);
        board.compute_adjacency();
        Ok(board)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        Self::from_layout(&MineLayout::from_mine_coords(size, mine_coords)?)
    }

    fn blank(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
            open_safe_count: 0,
        }
    }

    fn place_mines(&mut self, config: GameConfig, generator: impl MineGenerator) -> Result<()> {
        let layout = generator.generate(config);

        if layout.size() != config.size || layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield mismatch, actual: {:?} with {} mines, requested: {:?} with {}",
                layout.size(),
                layout.mine_count(),
                config.size,
                config.mines
            );
            return Err(ConfigIssue::MineCountMismatch.into());
        }

        self.apply_layout(&layout);
        Ok(())
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            if layout.contains_mine((x as Coord, y as Coord)) {
                *cell = Cell::mine();
            }
        }
        self.mine_count = layout.mine_count();
    }

    fn compute_adjacency(&mut self) {
        let (x_end, y_end) = self.size();
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                let count = self.count_adjacent_mines(coords);
                self.cells[coords.to_nd_index()].set_adjacency(count);
            }
        }
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
            .count() as u8
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn open_safe_count(&self) -> CellCount {
        self.open_safe_count
    }

    pub fn all_safe_open(&self) -> bool {
        self.open_safe_count == self.safe_cell_count()
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Number of mines around `coords`, counted from the grid rather than the
    /// cached counter.
    pub fn adjacency_of(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_adjacent_mines(coords))
    }

    /// Overwrites a cell as-is, for setup and debugging.
    ///
    /// The mine total and open tally follow the new cell, but neighbor
    /// adjacency counts are left untouched.
    pub fn set_cell(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        let old = self.cells[coords.to_nd_index()];

        if old.is_mine() {
            self.mine_count -= 1;
        } else if old.is_open() {
            self.open_safe_count -= 1;
        }
        if cell.is_mine() {
            self.mine_count += 1;
        } else if cell.is_open() {
            self.open_safe_count += 1;
        }

        self.cells[coords.to_nd_index()] = cell;
        Ok(())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells with their coordinates, column by column.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    /// Opens a cell that is known to be in bounds. Returns whether it changed.
    pub(crate) fn open_cell(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_open() {
            return false;
        }
        cell.open();
        if !cell.is_mine() {
            self.open_safe_count += 1;
        }
        true
    }

    pub(crate) fn toggle_flag_at(&mut self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].toggle_flag()
    }

    /// Opens every mine, flagged or not.
    pub(crate) fn disclose_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            cell.open();
        }
    }

    pub(crate) fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency_grid(board: &Board) -> Array2<Option<u8>> {
        board.cells.map(|cell| cell.adjacency())
    }

    #[test]
    fn corner_mine_adjacency() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap();

        assert_eq!(board.mine_count(), 1);
        let grid = adjacency_grid(&board);
        assert_eq!(grid[[0, 0]], None);
        assert_eq!(grid[[0, 1]], Some(1));
        assert_eq!(grid[[1, 0]], Some(1));
        assert_eq!(grid[[1, 1]], Some(1));
        let zeros: [Coord2; 5] = [(2, 0), (2, 1), (2, 2), (0, 2), (1, 2)];
        for coords in zeros {
            assert_eq!(grid[coords.to_nd_index()], Some(0), "at {:?}", coords);
        }
    }

    #[test]
    fn adjacency_of_counts_mine_neighbors() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2), (1, 0)]).unwrap();

        assert_eq!(board.adjacency_of((1, 1)), Ok(3));
        assert_eq!(board.adjacency_of((0, 1)), Ok(2));
        assert_eq!(board.adjacency_of((2, 0)), Ok(1));
        assert_eq!(board.adjacency_of((3, 0)), Err(GameError::OutOfRange));
    }

    #[test]
    fn new_rejects_invalid_config() {
        assert_eq!(
            Board::new(0, 5, 1),
            Err(GameError::InvalidConfig(ConfigIssue::ZeroWidth))
        );
        assert_eq!(
            Board::new(5, 0, 1),
            Err(GameError::InvalidConfig(ConfigIssue::ZeroHeight))
        );
        assert_eq!(
            Board::new(2, 2, 4),
            Err(GameError::InvalidConfig(ConfigIssue::TooManyMines))
        );
    }

    #[test]
    fn new_places_requested_mines() {
        let board = Board::new(10, 8, 20).unwrap();

        assert_eq!(board.size(), (10, 8));
        assert_eq!(board.mine_count(), 20);
        assert_eq!(board.iter_cells().filter(|(_, cell)| cell.is_mine()).count(), 20);
        assert!(board.iter_cells().all(|(_, cell)| !cell.is_open() && !cell.is_flagged()));
    }

    #[test]
    fn full_layout_is_rejected() {
        assert_eq!(
            Board::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::InvalidConfig(ConfigIssue::TooManyMines))
        );
    }

    #[test]
    fn mismatched_generator_is_rejected() {
        struct Liar;

        impl MineGenerator for Liar {
            fn generate(self, config: GameConfig) -> MineLayout {
                MineLayout::from_mine_coords(config.size, &[(0, 0)]).unwrap()
            }
        }

        let config = GameConfig::new((4, 4), 3).unwrap();
        assert_eq!(
            Board::generate(config, Liar),
            Err(GameError::InvalidConfig(ConfigIssue::MineCountMismatch))
        );
    }

    #[test]
    fn cell_access_is_bounds_checked() {
        let mut board = Board::from_mine_coords((2, 3), &[]).unwrap();

        assert!(board.in_bounds((1, 2)));
        assert!(!board.in_bounds((2, 0)));
        assert!(!board.in_bounds((0, 3)));
        assert_eq!(board.cell_at((0, 3)), Err(GameError::OutOfRange));
        assert_eq!(board.set_cell((5, 5), Cell::mine()), Err(GameError::OutOfRange));
    }

    #[test]
    fn set_cell_keeps_tallies() {
        let mut board = Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap();

        board.set_cell((2, 2), Cell::mine()).unwrap();
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.cell_at((2, 2)), Ok(Cell::mine()));

        board.set_cell((0, 0), Cell::counter(0)).unwrap();
        assert_eq!(board.mine_count(), 1);
        // neighbors keep their stale counts
        assert_eq!(board.cell_at((1, 1)).unwrap().adjacency(), Some(1));
    }

    #[test]
    fn disclosing_mines_leaves_counters_closed() {
        let mut board = Board::from_mine_coords((3, 1), &[(0, 0), (2, 0)]).unwrap();
        board.toggle_flag_at((2, 0));

        board.disclose_mines();

        assert!(board.cell((0, 0)).is_open());
        assert!(board.cell((2, 0)).is_open());
        assert!(!board.cell((2, 0)).is_flagged());
        assert!(!board.cell((1, 0)).is_open());
        assert_eq!(board.open_safe_count(), 0);
    }
}
