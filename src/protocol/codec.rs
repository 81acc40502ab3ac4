//! Text codec for the shared game-state file.
//!
//! The format is a fixed five-part grammar, fully rewritten on every handoff:
//!
//! ```text
//! Board Size: <m> <n>
//! <header line>
//! Next Move: <token>
//! <m rows of n space-separated cell tokens>
//! ```
//!
//! A cell token is `0` (empty) or `<orbs><R|B>`, e.g. `2R`. The header and
//! next-move lines say which side wrote the file and which side should act,
//! so a reader can never mistake its own write for a reply.

use std::fmt::Write as _;

use crate::error::ProtocolError;
use crate::game::{Board, Cell, GameMode, Player};

const SIZE_PREFIX: &str = "Board Size:";
const NEXT_MOVE_PREFIX: &str = "Next Move:";

/// Second line of the file: which side produced this snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireHeader {
    HumanMove,
    AiMove,
    AiVsAiMove,
}

impl WireHeader {
    pub fn as_str(self) -> &'static str {
        match self {
            WireHeader::HumanMove => "Human Move:",
            WireHeader::AiMove => "AI Move:",
            WireHeader::AiVsAiMove => "AI vs AI Move:",
        }
    }
}

/// Third-line token: which side is expected to move next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToken {
    Human,
    Ai,
    AiRed,
    AiBlue,
}

impl MoveToken {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveToken::Human => "Human",
            MoveToken::Ai => "AI",
            MoveToken::AiRed => "AI Red",
            MoveToken::AiBlue => "AI Blue",
        }
    }

    /// The AI-vs-AI token naming `player` as the next mover.
    pub fn for_ai(player: Player) -> MoveToken {
        match player {
            Player::Red => MoveToken::AiRed,
            Player::Blue => MoveToken::AiBlue,
        }
    }

    /// The player an AI-vs-AI token names, if it names one.
    pub fn ai_player(self) -> Option<Player> {
        match self {
            MoveToken::AiRed => Some(Player::Red),
            MoveToken::AiBlue => Some(Player::Blue),
            MoveToken::Human | MoveToken::Ai => None,
        }
    }
}

/// A fully parsed game-state file.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub header: WireHeader,
    pub next_move: MoveToken,
    pub board: Board,
}

/// What a reader accepts: one header and a set of next-move tokens. Anything
/// else is "not written for us yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireExpectation {
    pub header: WireHeader,
    pub tokens: &'static [MoveToken],
}

impl WireExpectation {
    /// What the UI side waits for in each mode. Human-vs-human plays without
    /// the file entirely.
    pub fn ui_read(mode: GameMode) -> Option<WireExpectation> {
        match mode {
            GameMode::HumanVsAi => Some(WireExpectation {
                header: WireHeader::AiMove,
                tokens: &[MoveToken::Human],
            }),
            GameMode::AiVsAi => Some(WireExpectation {
                header: WireHeader::AiVsAiMove,
                tokens: &[MoveToken::AiRed, MoveToken::AiBlue],
            }),
            GameMode::HumanVsHuman => None,
        }
    }

    /// The mirror of [`WireExpectation::ui_read`]: what an external agent
    /// waits for.
    pub fn agent_read(mode: GameMode) -> Option<WireExpectation> {
        match mode {
            GameMode::HumanVsAi => Some(WireExpectation {
                header: WireHeader::HumanMove,
                tokens: &[MoveToken::Ai],
            }),
            GameMode::AiVsAi => Some(WireExpectation {
                header: WireHeader::AiVsAiMove,
                tokens: &[MoveToken::AiRed, MoveToken::AiBlue],
            }),
            GameMode::HumanVsHuman => None,
        }
    }

    /// Narrow the accepted tokens to a single one. Used when the reader
    /// knows exactly whose turn comes next.
    pub fn expecting_token(self, token: MoveToken) -> WireExpectation {
        debug_assert!(self.tokens.contains(&token));
        WireExpectation {
            header: self.header,
            tokens: match token {
                MoveToken::Human => &[MoveToken::Human],
                MoveToken::Ai => &[MoveToken::Ai],
                MoveToken::AiRed => &[MoveToken::AiRed],
                MoveToken::AiBlue => &[MoveToken::AiBlue],
            },
        }
    }
}

/// Render a board snapshot in the wire format.
pub fn serialize(board: &Board, header: WireHeader, next_move: MoveToken) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} {}", SIZE_PREFIX, board.rows(), board.cols());
    let _ = writeln!(out, "{}", header.as_str());
    let _ = writeln!(out, "{} {}", NEXT_MOVE_PREFIX, next_move.as_str());
    for row in 0..board.rows() {
        let mut tokens = Vec::with_capacity(board.cols());
        for col in 0..board.cols() {
            let cell = board.get(crate::game::Position::new(row, col));
            tokens.push(match cell.owner() {
                None => "0".to_string(),
                Some(player) => format!("{}{}", cell.orbs(), player.letter()),
            });
        }
        let _ = writeln!(out, "{}", tokens.join(" "));
    }
    out
}

/// Parse and validate a game-state file against the expected dimensions and
/// header/token combination.
///
/// Every failure maps to a [`ProtocolError`] variant naming the check; none
/// of them are fatal to the caller, which treats them all as "retry later".
pub fn deserialize(
    text: &str,
    rows: usize,
    cols: usize,
    expect: WireExpectation,
) -> Result<Snapshot, ProtocolError> {
    let lines: Vec<&str> = text.lines().collect();

    let size_line = format!("{} {} {}", SIZE_PREFIX, rows, cols);
    match lines.first() {
        Some(&line) if line.trim_end() == size_line => {}
        other => {
            return Err(ProtocolError::MalformedHeader {
                expected: size_line,
                found: other.unwrap_or(&"").trim_end().to_string(),
            });
        }
    }

    match lines.get(1) {
        Some(&line) if line.trim_end() == expect.header.as_str() => {}
        other => {
            return Err(ProtocolError::MalformedHeader {
                expected: expect.header.as_str().to_string(),
                found: other.unwrap_or(&"").trim_end().to_string(),
            });
        }
    }

    let next_move_line = lines.get(2).map(|l| l.trim_end()).unwrap_or("");
    let next_move = expect
        .tokens
        .iter()
        .copied()
        .find(|token| next_move_line == format!("{} {}", NEXT_MOVE_PREFIX, token.as_str()))
        .ok_or_else(|| ProtocolError::MalformedHeader {
            expected: format!(
                "{} {}",
                NEXT_MOVE_PREFIX,
                expect
                    .tokens
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(" | ")
            ),
            found: next_move_line.to_string(),
        })?;

    let board_lines = &lines[3.min(lines.len())..];
    if board_lines.len() != rows {
        return Err(ProtocolError::RowCountMismatch {
            expected: rows,
            found: board_lines.len(),
        });
    }

    let mut cells = Vec::with_capacity(rows * cols);
    for (row, line) in board_lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != cols {
            return Err(ProtocolError::ColumnCountMismatch {
                row,
                expected: cols,
                found: tokens.len(),
            });
        }
        for (col, token) in tokens.iter().enumerate() {
            cells.push(parse_cell(token, row, col)?);
        }
    }

    Ok(Snapshot {
        header: expect.header,
        next_move,
        board: Board::from_cells(rows, cols, cells),
    })
}

fn parse_cell(token: &str, row: usize, col: usize) -> Result<Cell, ProtocolError> {
    if token == "0" {
        return Ok(Cell::empty());
    }
    let invalid = || ProtocolError::InvalidCellToken {
        row,
        col,
        token: token.to_string(),
    };

    let mut chars = token.chars();
    let letter = chars.next_back().ok_or_else(invalid)?;
    let owner = Player::from_letter(letter).ok_or_else(invalid)?;
    let digits = chars.as_str();
    let orbs: u32 = digits.parse().map_err(|_| invalid())?;
    if orbs == 0 {
        return Err(invalid());
    }
    Ok(Cell::occupied(orbs, owner))
}
