use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ProtocolError;
use crate::game::Board;

use super::codec::{self, MoveToken, Snapshot, WireExpectation, WireHeader};

/// The shared game-state file.
///
/// This is a best-effort mailbox, not a transactional channel: each write
/// plainly overwrites the file with no locking or rename discipline, and
/// readers treat any parse failure (including a torn half-write from the
/// other process) as "no reply yet".
#[derive(Debug, Clone)]
pub struct Mailbox {
    path: PathBuf,
}

impl Mailbox {
    pub fn new(path: impl Into<PathBuf>) -> Mailbox {
        Mailbox { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with a snapshot of `board`.
    pub fn write(
        &self,
        board: &Board,
        header: WireHeader,
        next_move: MoveToken,
    ) -> Result<(), ProtocolError> {
        fs::write(&self.path, codec::serialize(board, header, next_move))?;
        Ok(())
    }

    /// Read and validate the current file contents.
    pub fn read(
        &self,
        rows: usize,
        cols: usize,
        expect: WireExpectation,
    ) -> Result<Snapshot, ProtocolError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ProtocolError::MissingFile(self.path.clone())
            } else {
                ProtocolError::Io(e)
            }
        })?;
        codec::deserialize(&text, rows, cols, expect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameMode, Player, Position};

    fn mailbox_in(dir: &Path) -> Mailbox {
        Mailbox::new(dir.join("gamestate.txt"))
    }

    #[test]
    fn test_missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mailbox = mailbox_in(dir.path());
        let expect = WireExpectation::agent_read(GameMode::HumanVsAi).unwrap();
        let err = mailbox.read(2, 2, expect).unwrap_err();
        assert!(matches!(err, ProtocolError::MissingFile(_)));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mailbox = mailbox_in(dir.path());

        let mut board = Board::new(2, 2).unwrap();
        board.place_orb(Position::new(0, 0), Player::Red);
        mailbox
            .write(&board, WireHeader::HumanMove, MoveToken::Ai)
            .unwrap();

        let expect = WireExpectation::agent_read(GameMode::HumanVsAi).unwrap();
        let snapshot = mailbox.read(2, 2, expect).unwrap();
        assert_eq!(snapshot.board, board);
    }

    #[test]
    fn test_write_fully_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mailbox = mailbox_in(dir.path());
        let expect = WireExpectation::ui_read(GameMode::AiVsAi).unwrap();

        let board = Board::new(2, 2).unwrap();
        mailbox
            .write(&board, WireHeader::AiVsAiMove, MoveToken::AiRed)
            .unwrap();
        mailbox
            .write(&board, WireHeader::AiVsAiMove, MoveToken::AiBlue)
            .unwrap();

        let snapshot = mailbox.read(2, 2, expect).unwrap();
        assert_eq!(snapshot.next_move, MoveToken::AiBlue);
    }

    #[test]
    fn test_garbage_file_is_a_recoverable_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let mailbox = mailbox_in(dir.path());
        std::fs::write(mailbox.path(), "not a snapshot").unwrap();

        let expect = WireExpectation::agent_read(GameMode::HumanVsAi).unwrap();
        let err = mailbox.read(2, 2, expect).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedHeader { .. }));
    }
}
