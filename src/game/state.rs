use crate::error::CascadeError;

use super::cascade::{self, CascadeReport};
use super::{Board, DimensionError, Player, Position};

/// Which kinds of opponents the session was started with. Fixed at session
/// start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HumanVsAi,
    HumanVsHuman,
    AiVsAi,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::HumanVsAi => "AI vs Human",
            GameMode::HumanVsHuman => "Human vs Human",
            GameMode::AiVsAi => "AI vs AI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    OpponentCell,
    GameOver,
    CascadeDidNotStabilize { rounds: usize },
}

/// Decide whether a stable board has a winner.
///
/// No winner is declared before two moves have been played (grace period:
/// after the very first placement the opponent trivially holds zero cells).
/// After that, a color with zero live cells loses to one with any.
pub fn winner(board: &Board, moves_played: u32) -> Option<Player> {
    if moves_played < 2 {
        return None;
    }
    let red = board.live_cells(Player::Red);
    let blue = board.live_cells(Player::Blue);
    if red == 0 && blue > 0 {
        Some(Player::Blue)
    } else if blue == 0 && red > 0 {
        Some(Player::Red)
    } else {
        None
    }
}

/// One game from mode/size selection to a detected winner.
///
/// Owns the board and turn bookkeeping; moves enter either through
/// [`GameSession::apply_move`] (local placements) or
/// [`GameSession::apply_remote_move`] (boards parsed from the shared file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    mode: GameMode,
    current_player: Player,
    moves_played: u32,
    winner: Option<Player>,
    cascade_round_limit: usize,
}

impl GameSession {
    /// Start a session on an empty board. Red always moves first.
    pub fn new(rows: usize, cols: usize, mode: GameMode) -> Result<GameSession, DimensionError> {
        Ok(GameSession {
            board: Board::new(rows, cols)?,
            mode,
            current_player: Player::Red,
            moves_played: 0,
            winner: None,
            cascade_round_limit: cascade::DEFAULT_ROUND_LIMIT,
        })
    }

    pub fn with_cascade_round_limit(mut self, limit: usize) -> GameSession {
        self.cascade_round_limit = limit;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether the current player may place an orb at `pos`.
    pub fn is_valid_move(&self, pos: Position) -> bool {
        !self.is_terminal() && self.board.is_valid_move(pos, self.current_player)
    }

    /// Place an orb for the current player, run the cascade to stability,
    /// then update the winner and hand the turn to the opponent.
    pub fn apply_move(&mut self, pos: Position) -> Result<CascadeReport, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.board.in_bounds(pos) {
            return Err(MoveError::OutOfBounds);
        }
        if !self.board.is_valid_move(pos, self.current_player) {
            return Err(MoveError::OpponentCell);
        }

        self.board.place_orb(pos, self.current_player);
        let report = cascade::resolve(&mut self.board, self.cascade_round_limit).map_err(
            |CascadeError::DidNotStabilize { rounds }| MoveError::CascadeDidNotStabilize { rounds },
        )?;

        self.moves_played += 1;
        self.winner = winner(&self.board, self.moves_played);
        self.current_player = self.current_player.opponent();
        Ok(report)
    }

    /// Adopt a stable board written by the opposite side, counting it as one
    /// completed move by `mover`.
    ///
    /// A snapshot identical to the current board is ignored: it is either the
    /// initial handoff or a stale re-read, not a move.
    pub fn apply_remote_move(&mut self, board: Board, mover: Player) {
        if board == self.board {
            return;
        }
        self.board = board;
        self.moves_played += 1;
        self.winner = winner(&self.board, self.moves_played);
        self.current_player = mover.opponent();
    }
}
