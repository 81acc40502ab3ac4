use super::Player;

/// Smallest supported board dimension.
pub const MIN_DIM: usize = 1;
/// Largest supported board dimension.
pub const MAX_DIM: usize = 20;

/// A single board cell: an orb count and the player owning those orbs.
///
/// Invariant: `owner` is `None` if and only if `orbs == 0`. The constructors
/// and the mutation paths on [`Board`] maintain this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    orbs: u32,
    owner: Option<Player>,
}

impl Cell {
    /// An empty cell: no orbs, no owner.
    pub fn empty() -> Cell {
        Cell {
            orbs: 0,
            owner: None,
        }
    }

    /// A cell holding `orbs` orbs for `owner`. `orbs` must be positive.
    pub fn occupied(orbs: u32, owner: Player) -> Cell {
        debug_assert!(orbs > 0, "occupied cell must hold at least one orb");
        Cell {
            orbs,
            owner: Some(owner),
        }
    }

    pub fn orbs(self) -> u32 {
        self.orbs
    }

    pub fn owner(self) -> Option<Player> {
        self.owner
    }

    pub fn is_empty(self) -> bool {
        self.orbs == 0
    }
}

/// A position on the board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    OutOfRange { rows: usize, cols: usize },
}

/// Rectangular grid of cells. Dimensions are fixed for the life of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Both dimensions must be in `MIN_DIM..=MAX_DIM`.
    pub fn new(rows: usize, cols: usize) -> Result<Board, DimensionError> {
        if !(MIN_DIM..=MAX_DIM).contains(&rows) || !(MIN_DIM..=MAX_DIM).contains(&cols) {
            return Err(DimensionError::OutOfRange { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
        })
    }

    /// Rebuild a board from already-parsed cells. The caller guarantees the
    /// dimensions were validated against an existing board.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Board {
        debug_assert_eq!(cells.len(), rows * cols);
        Board { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn idx(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.idx(pos)]
    }

    /// Orb threshold at which the cell at `pos` explodes: 2 for corners,
    /// 3 for other border cells, 4 for interior cells. On degenerate 1xN or
    /// Mx1 boards every cell sits on both collapsed borders and counts as a
    /// corner.
    pub fn critical_mass(&self, pos: Position) -> u32 {
        let on_row_edge = pos.row == 0 || pos.row == self.rows - 1;
        let on_col_edge = pos.col == 0 || pos.col == self.cols - 1;
        match (on_row_edge, on_col_edge) {
            (true, true) => 2,
            (true, false) | (false, true) => 3,
            (false, false) => 4,
        }
    }

    /// Orthogonally adjacent in-bounds positions, in row-major order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let deltas: [(i64, i64); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
        deltas.into_iter().filter_map(move |(dr, dc)| {
            let row = pos.row as i64 + dr;
            let col = pos.col as i64 + dc;
            if row >= 0 && col >= 0 {
                let p = Position::new(row as usize, col as usize);
                self.in_bounds(p).then_some(p)
            } else {
                None
            }
        })
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// A move is valid on an empty cell or on a cell the player already owns
    pub fn is_valid_move(&self, pos: Position, player: Player) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let cell = self.get(pos);
        cell.owner().is_none() || cell.owner() == Some(player)
    }

    /// Raw orb placement: adds one orb and takes ownership of the cell.
    /// Does not run the cascade; callers go through `GameSession::apply_move`.
    pub(crate) fn place_orb(&mut self, pos: Position, player: Player) {
        let idx = self.idx(pos);
        self.cells[idx].orbs += 1;
        self.cells[idx].owner = Some(player);
    }

    /// Remove `count` orbs from an exploding cell, clearing ownership when
    /// the cell empties.
    pub(crate) fn remove_orbs(&mut self, pos: Position, count: u32) {
        let idx = self.idx(pos);
        self.cells[idx].orbs = self.cells[idx].orbs.saturating_sub(count);
        if self.cells[idx].orbs == 0 {
            self.cells[idx].owner = None;
        }
    }

    /// Count cells holding at least one orb for `player`.
    pub fn live_cells(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| c.owner() == Some(player))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_dimensions() {
        assert!(Board::new(0, 5).is_err());
        assert!(Board::new(5, 0).is_err());
        assert!(Board::new(21, 5).is_err());
        assert!(Board::new(5, 21).is_err());
        assert!(Board::new(1, 1).is_ok());
        assert!(Board::new(20, 20).is_ok());
    }

    #[test]
    fn test_critical_mass_3x3() {
        let board = Board::new(3, 3).unwrap();
        // Corners
        for pos in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert_eq!(board.critical_mass(Position::new(pos.0, pos.1)), 2);
        }
        // Edges
        for pos in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            assert_eq!(board.critical_mass(Position::new(pos.0, pos.1)), 3);
        }
        // Interior
        assert_eq!(board.critical_mass(Position::new(1, 1)), 4);
    }

    #[test]
    fn test_critical_mass_degenerate_boards() {
        // On a 1xN board every cell is a corner.
        let strip = Board::new(1, 5).unwrap();
        for col in 0..5 {
            assert_eq!(strip.critical_mass(Position::new(0, col)), 2);
        }
        let column = Board::new(5, 1).unwrap();
        for row in 0..5 {
            assert_eq!(column.critical_mass(Position::new(row, 0)), 2);
        }
        let single = Board::new(1, 1).unwrap();
        assert_eq!(single.critical_mass(Position::new(0, 0)), 2);
    }

    #[test]
    fn test_neighbors_clipped_at_borders() {
        let board = Board::new(3, 3).unwrap();
        let corner: Vec<_> = board.neighbors(Position::new(0, 0)).collect();
        assert_eq!(corner, vec![Position::new(0, 1), Position::new(1, 0)]);
        let interior: Vec<_> = board.neighbors(Position::new(1, 1)).collect();
        assert_eq!(interior.len(), 4);
        let single = Board::new(1, 1).unwrap();
        assert_eq!(single.neighbors(Position::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_move_validity() {
        let mut board = Board::new(2, 2).unwrap();
        let pos = Position::new(0, 0);
        assert!(board.is_valid_move(pos, Player::Red));
        assert!(board.is_valid_move(pos, Player::Blue));

        board.place_orb(pos, Player::Red);
        assert!(board.is_valid_move(pos, Player::Red));
        assert!(!board.is_valid_move(pos, Player::Blue));
        assert!(!board.is_valid_move(Position::new(5, 5), Player::Red));
    }

    #[test]
    fn test_owner_cleared_when_cell_empties() {
        let mut board = Board::new(2, 2).unwrap();
        let pos = Position::new(0, 0);
        board.place_orb(pos, Player::Red);
        board.place_orb(pos, Player::Red);
        assert_eq!(board.get(pos).orbs(), 2);

        board.remove_orbs(pos, 2);
        assert!(board.get(pos).is_empty());
        assert_eq!(board.get(pos).owner(), None);
    }

    #[test]
    fn test_live_cells() {
        let mut board = Board::new(2, 3).unwrap();
        board.place_orb(Position::new(0, 0), Player::Red);
        board.place_orb(Position::new(0, 1), Player::Red);
        board.place_orb(Position::new(1, 2), Player::Blue);
        assert_eq!(board.live_cells(Player::Red), 2);
        assert_eq!(board.live_cells(Player::Blue), 1);
    }
}
