use crate::error::CascadeError;

use super::{Board, Player, Position};

/// Default ceiling on cascade rounds before giving up. Generous: real games
/// end when one color is wiped out, long before this.
pub const DEFAULT_ROUND_LIMIT: usize = 10_000;

/// Counters describing a resolved cascade, for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    pub rounds: usize,
    pub explosions: usize,
}

/// Run the cascade until the board is stable: no cell at or above its
/// critical mass.
///
/// Explosions are resolved in simultaneous rounds, not one cell at a time:
/// the set of exploding cells is fixed from the board state at the start of
/// each round, every cell in the set sheds its critical mass, and each
/// orthogonal neighbor gains one orb and is captured by the exploder. A cell
/// pushed over its threshold mid-round only joins the next round's set.
///
/// Within a round the exploding set is applied in row-major order; when two
/// exploders share a neighbor in the same round, the later one in row-major
/// order keeps ownership. This is the deterministic tie-break.
///
/// The cascade also stops as soon as it eliminates a color that was alive
/// when it began: the game is decided at that point, and because non-corner
/// explosions conserve orbs a fully captured board can re-trigger itself
/// forever. Termination of the remaining cases is still not guaranteed by
/// the rules, so the loop is additionally bounded by `round_limit` and
/// reports `DidNotStabilize` past it.
pub fn resolve(board: &mut Board, round_limit: usize) -> Result<CascadeReport, CascadeError> {
    let alive_at_entry: Vec<Player> = [Player::Red, Player::Blue]
        .into_iter()
        .filter(|&p| board.live_cells(p) > 0)
        .collect();

    let mut report = CascadeReport::default();
    loop {
        let critical: Vec<Position> = board
            .positions()
            .filter(|&pos| board.get(pos).orbs() >= board.critical_mass(pos))
            .collect();
        if critical.is_empty() {
            return Ok(report);
        }
        let wiped_out = alive_at_entry
            .iter()
            .any(|&p| board.live_cells(p) == 0);
        if wiped_out {
            return Ok(report);
        }
        if report.rounds >= round_limit {
            return Err(CascadeError::DidNotStabilize {
                rounds: report.rounds,
            });
        }
        report.rounds += 1;
        report.explosions += explode_round(board, &critical);
    }
}

/// Apply one round of explosions for the given critical set.
fn explode_round(board: &mut Board, critical: &[Position]) -> usize {
    let mut explosions = 0;
    for &pos in critical {
        let Some(owner) = board.get(pos).owner() else {
            // A critical cell holds orbs and therefore has an owner; no
            // exploder removes orbs from another cell within a round.
            continue;
        };
        explosions += 1;
        board.remove_orbs(pos, board.critical_mass(pos));
        let neighbors: Vec<Position> = board.neighbors(pos).collect();
        for neighbor in neighbors {
            board.place_orb(neighbor, owner);
        }
    }
    explosions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};

    fn stable(board: &Board) -> bool {
        board
            .positions()
            .all(|pos| board.get(pos).orbs() < board.critical_mass(pos))
    }

    #[test]
    fn test_single_orb_never_explodes() {
        let mut board = Board::new(1, 1).unwrap();
        board.place_orb(Position::new(0, 0), Player::Red);
        let report = resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();
        assert_eq!(report.rounds, 0);
        assert_eq!(board.get(Position::new(0, 0)).orbs(), 1);
    }

    #[test]
    fn test_1x1_explodes_on_second_orb() {
        // Mass 2, no neighbors: both orbs vanish off the board.
        let mut board = Board::new(1, 1).unwrap();
        let pos = Position::new(0, 0);
        board.place_orb(pos, Player::Red);
        board.place_orb(pos, Player::Red);
        let report = resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();
        assert_eq!(report.explosions, 1);
        assert!(board.get(pos).is_empty());
    }

    #[test]
    fn test_corner_explosion_3x3() {
        // Two red orbs at a corner explode into (0,1) and (1,0).
        let mut board = Board::new(3, 3).unwrap();
        let corner = Position::new(0, 0);
        board.place_orb(corner, Player::Red);
        resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();
        board.place_orb(corner, Player::Red);
        let report = resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();

        assert_eq!(report.rounds, 1);
        assert!(board.get(corner).is_empty());
        for pos in [Position::new(0, 1), Position::new(1, 0)] {
            assert_eq!(board.get(pos).orbs(), 1);
            assert_eq!(board.get(pos).owner(), Some(Player::Red));
        }
    }

    #[test]
    fn test_explosion_captures_opponent_cells() {
        let mut board = Board::new(3, 3).unwrap();
        board.place_orb(Position::new(0, 1), Player::Blue);
        board.place_orb(Position::new(0, 0), Player::Red);
        board.place_orb(Position::new(0, 0), Player::Red);
        resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();

        let captured = board.get(Position::new(0, 1));
        assert_eq!(captured.owner(), Some(Player::Red));
        assert_eq!(captured.orbs(), 2);
    }

    #[test]
    fn test_row_major_tie_break_for_shared_neighbor() {
        // (0,1) red and (1,0) blue both explode in the same round and both
        // feed (1,1). Row-major order applies (0,1) first, so blue's (1,0)
        // writes last and owns the shared neighbor.
        let mut cells = vec![Cell::empty(); 16];
        cells[1] = Cell::occupied(3, Player::Red); // (0,1), edge, mass 3
        cells[4] = Cell::occupied(3, Player::Blue); // (1,0), edge, mass 3
        let mut board = Board::from_cells(4, 4, cells);

        let critical: Vec<Position> = board
            .positions()
            .filter(|&pos| board.get(pos).orbs() >= board.critical_mass(pos))
            .collect();
        assert_eq!(critical, vec![Position::new(0, 1), Position::new(1, 0)]);
        explode_round(&mut board, &critical);

        let shared = board.get(Position::new(1, 1));
        assert_eq!(shared.orbs(), 2);
        assert_eq!(shared.owner(), Some(Player::Blue));
    }

    #[test]
    fn test_cascade_ends_stable_or_decided() {
        // Drive a chain through the whole 2x2 board. Every resolved cascade
        // either reaches a stable board or has wiped out one color (at which
        // point the game is over and the cascade is cut short).
        let mut board = Board::new(2, 2).unwrap();
        let moves = [
            (Position::new(0, 0), Player::Red),
            (Position::new(1, 1), Player::Blue),
            (Position::new(0, 0), Player::Red),
            (Position::new(1, 1), Player::Blue),
        ];
        for (pos, player) in moves {
            if board.is_valid_move(pos, player) {
                board.place_orb(pos, player);
                resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();
            }
            let red = board.live_cells(Player::Red);
            let blue = board.live_cells(Player::Blue);
            assert!(stable(&board) || red == 0 || blue == 0);
        }
        // Blue's second placement captures the whole board.
        assert_eq!(board.live_cells(Player::Red), 0);
        assert!(board.live_cells(Player::Blue) > 0);
    }

    #[test]
    fn test_cascade_stops_once_a_color_is_wiped_out() {
        // Four same-color orbs on a 2x2 board are conserved by every
        // explosion and would cycle forever; elimination ends the cascade.
        let mut board = Board::new(2, 2).unwrap();
        board.place_orb(Position::new(0, 0), Player::Red);
        board.place_orb(Position::new(1, 1), Player::Blue);
        resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();
        board.place_orb(Position::new(0, 0), Player::Red);
        resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();
        board.place_orb(Position::new(1, 1), Player::Blue);
        board.place_orb(Position::new(1, 1), Player::Blue);

        let report = resolve(&mut board, DEFAULT_ROUND_LIMIT).unwrap();
        assert!(report.rounds < 10);
        assert_eq!(board.live_cells(Player::Red), 0);
    }

    #[test]
    fn test_round_limit_is_enforced() {
        let mut board = Board::new(2, 2).unwrap();
        let pos = Position::new(0, 0);
        board.place_orb(pos, Player::Red);
        board.place_orb(pos, Player::Red);
        let err = resolve(&mut board, 0).unwrap_err();
        assert_eq!(err, CascadeError::DidNotStabilize { rounds: 0 });
    }
}
