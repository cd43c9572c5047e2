use alloc::collections::BTreeSet;
use alloc::vec;
use ndarray::Array2;

use crate::*;

/// What a single reveal did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    /// Safe cells opened by this call, empty when nothing changed.
    Opened(BTreeSet<Coord2>),
    /// The target was a mine; only that cell was opened.
    HitMine,
}

impl RevealResult {
    pub fn has_update(&self) -> bool {
        match self {
            Self::Opened(opened) => !opened.is_empty(),
            Self::HitMine => true,
        }
    }
}

/// Reveals the cell at `coords`, cascading through zero-adjacency cells.
///
/// Flagged and already-open targets are left alone. A zero cell opens its whole
/// 8-connected zero region plus the numbered cells bordering it; numbered cells
/// are opened but do not spread further. Mines and flagged cells are never
/// opened by the cascade.
pub fn reveal(board: &mut Board, coords: Coord2) -> Result<RevealResult> {
    use RevealResult::*;

    let coords = board.validate_coords(coords)?;
    let cell = board.cell(coords);

    if cell.is_flagged() || cell.is_open() {
        log::trace!("Reveal at {:?} ignored, cell is flagged or open", coords);
        return Ok(Opened(BTreeSet::new()));
    }

    Ok(match cell.kind() {
        CellKind::Mine => {
            board.open_cell(coords);
            log::debug!("Hit mine at {:?}", coords);
            HitMine
        }
        CellKind::Counter(count) if count > 0 => {
            board.open_cell(coords);
            log::debug!("Open cell at {:?}, mine count: {}", coords, count);
            Opened(BTreeSet::from([coords]))
        }
        CellKind::Counter(_) => Opened(flood_fill(board, coords)),
    })
}

fn flood_fill(board: &mut Board, start: Coord2) -> BTreeSet<Coord2> {
    let mut opened = BTreeSet::new();
    let mut visited: Array2<bool> = Array2::default(board.size().to_nd_index());
    let mut to_visit = vec![start];
    visited[start.to_nd_index()] = true;

    log::trace!("Starting flood-fill from {:?}", start);

    while let Some(visit_coords) = to_visit.pop() {
        let cell = board.cell(visit_coords);

        // skip flagged or already opened cells
        if cell.is_open() || cell.is_flagged() || cell.is_mine() {
            log::trace!("Skipping cell at {:?}", visit_coords);
            continue;
        }

        board.open_cell(visit_coords);
        opened.insert(visit_coords);
        log::trace!(
            "Flood opened cell at {:?}, mine count: {:?}",
            visit_coords,
            cell.adjacency()
        );

        // only zero cells spread
        if cell.adjacency() != Some(0) {
            continue;
        }

        for pos in board.iter_neighbors(visit_coords) {
            let neighbor = board.cell(pos);
            if visited[pos.to_nd_index()] || neighbor.is_mine() || neighbor.is_open() {
                continue;
            }
            visited[pos.to_nd_index()] = true;
            to_visit.push(pos);
        }
    }

    log::debug!("Flood-fill from {:?} opened {} cells", start, opened.len());
    opened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn opened(coords: &[Coord2]) -> RevealResult {
        RevealResult::Opened(coords.iter().copied().collect())
    }

    #[test]
    fn flood_from_far_corner_opens_everything_but_the_mine() {
        let mut board = board((3, 3), &[(0, 0)]);

        let result = reveal(&mut board, (2, 2)).unwrap();

        assert_eq!(
            result,
            opened(&[(0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)])
        );
        assert!(!board.cell_at((0, 0)).unwrap().is_open());
        assert!(board.all_safe_open());
    }

    #[test]
    fn flood_stops_at_numbered_border() {
        let mut board = board((5, 1), &[(2, 0)]);

        let result = reveal(&mut board, (0, 0)).unwrap();

        assert_eq!(result, opened(&[(0, 0), (1, 0)]));
        assert!(!board.cell_at((3, 0)).unwrap().is_open());
        assert!(!board.cell_at((4, 0)).unwrap().is_open());
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(reveal(&mut board, (1, 1)).unwrap(), opened(&[(1, 1)]));
        assert_eq!(board.open_safe_count(), 1);
    }

    #[test]
    fn mine_opens_only_itself() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(reveal(&mut board, (0, 0)).unwrap(), RevealResult::HitMine);
        assert!(board.cell_at((0, 0)).unwrap().is_open());
        assert!(!board.cell_at((2, 2)).unwrap().is_open());
        assert_eq!(board.open_safe_count(), 0);
    }

    #[test]
    fn flagged_target_is_protected() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.toggle_flag_at((2, 2));
        let before = board.clone();

        let result = reveal(&mut board, (2, 2)).unwrap();

        assert_eq!(result, opened(&[]));
        assert!(!result.has_update());
        assert_eq!(board, before);
    }

    #[test]
    fn flood_skips_flagged_cells() {
        let mut board = board((4, 1), &[]);
        board.toggle_flag_at((2, 0));

        let result = reveal(&mut board, (0, 0)).unwrap();

        assert_eq!(result, opened(&[(0, 0), (1, 0)]));
        let flagged = board.cell_at((2, 0)).unwrap();
        assert!(flagged.is_flagged());
        assert!(!flagged.is_open());
        assert!(!board.cell_at((3, 0)).unwrap().is_open());
    }

    #[test]
    fn second_reveal_changes_nothing() {
        let mut board = board((4, 4), &[(3, 3)]);

        assert!(reveal(&mut board, (0, 0)).unwrap().has_update());
        let before = board.clone();
        assert_eq!(reveal(&mut board, (0, 0)).unwrap(), opened(&[]));
        assert_eq!(reveal(&mut board, (2, 2)).unwrap(), opened(&[]));
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut board = board((2, 2), &[]);
        let before = board.clone();

        assert_eq!(reveal(&mut board, (2, 0)), Err(GameError::OutOfRange));
        assert_eq!(reveal(&mut board, (0, 2)), Err(GameError::OutOfRange));
        assert_eq!(board, before);
    }

    #[test]
    fn flood_passes_diagonally() {
        // zero regions connect through corners
        let mut board = board((3, 3), &[(1, 0), (0, 1), (2, 1), (1, 2)]);
        board.set_cell((1, 1), Cell::counter(0)).unwrap();

        let result = reveal(&mut board, (1, 1)).unwrap();

        assert_eq!(result, opened(&[(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]));
    }
}
