use crate::game::{GameMode, GameSession, Player};
use crate::protocol::{MoveToken, WireExpectation, WireHeader};

/// Which side the session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingLocalMove,
    AwaitingRemoteMove,
    GameOver,
}

/// A snapshot the UI owes the shared file: the mirror header plus the token
/// naming the next expected mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handoff {
    pub header: WireHeader,
    pub token: MoveToken,
}

/// Tracks whose turn it is and which side the shared file is waiting on.
///
/// The board itself lives on [`GameSession`]; the coordinator only decides
/// when control crosses the file boundary and what gets written there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnCoordinator {
    mode: GameMode,
    phase: TurnPhase,
}

impl TurnCoordinator {
    /// HumanVsAi and HumanVsHuman open on a local move (Red is local and
    /// moves first); AiVsAi opens waiting on the red agent.
    pub fn new(mode: GameMode) -> TurnCoordinator {
        let phase = match mode {
            GameMode::HumanVsAi | GameMode::HumanVsHuman => TurnPhase::AwaitingLocalMove,
            GameMode::AiVsAi => TurnPhase::AwaitingRemoteMove,
        };
        TurnCoordinator { mode, phase }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_local_turn(&self) -> bool {
        self.phase == TurnPhase::AwaitingLocalMove
    }

    pub fn is_awaiting_remote(&self) -> bool {
        self.phase == TurnPhase::AwaitingRemoteMove
    }

    /// The write that opens the session, if the mode needs one: AiVsAi
    /// seeds the file with the empty board and "AI Red" so the red agent
    /// knows to open.
    pub fn initial_handoff(&self) -> Option<Handoff> {
        match self.mode {
            GameMode::AiVsAi => Some(Handoff {
                header: WireHeader::AiVsAiMove,
                token: MoveToken::AiRed,
            }),
            GameMode::HumanVsAi | GameMode::HumanVsHuman => None,
        }
    }

    /// What the UI polls for while a remote side is thinking. In AiVsAi the
    /// token is narrowed to the one that can only appear after the current
    /// mover has finished, so a stale file (or our own seed write) never
    /// reads as a move.
    pub fn remote_expectation(&self, session: &GameSession) -> Option<WireExpectation> {
        let expect = WireExpectation::ui_read(self.mode)?;
        match self.mode {
            GameMode::AiVsAi => {
                let after_move = MoveToken::for_ai(session.current_player().opponent());
                Some(expect.expecting_token(after_move))
            }
            _ => Some(expect),
        }
    }

    /// The player whose move a snapshot matching `remote_expectation`
    /// carries.
    pub fn remote_mover(&self, session: &GameSession) -> Player {
        match self.mode {
            // The remote side of HumanVsAi is always the blue AI.
            GameMode::HumanVsAi => Player::Blue,
            _ => session.current_player(),
        }
    }

    /// Advance after a validated local move. Returns the snapshot to write,
    /// if control is handed to a remote side.
    pub fn on_local_move(&mut self, session: &GameSession) -> Option<Handoff> {
        if session.is_terminal() {
            self.phase = TurnPhase::GameOver;
            return None;
        }
        match self.mode {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsAi => {
                self.phase = TurnPhase::AwaitingRemoteMove;
                Some(Handoff {
                    header: WireHeader::HumanMove,
                    token: MoveToken::Ai,
                })
            }
            // The UI never moves in AiVsAi.
            GameMode::AiVsAi => None,
        }
    }

    /// Advance after a parsed remote snapshot has been applied.
    pub fn on_remote_move(&mut self, session: &GameSession) {
        if session.is_terminal() {
            self.phase = TurnPhase::GameOver;
            return;
        }
        match self.mode {
            GameMode::HumanVsAi => self.phase = TurnPhase::AwaitingLocalMove,
            // Agents hand the file to each other directly; the UI keeps
            // watching.
            GameMode::AiVsAi => self.phase = TurnPhase::AwaitingRemoteMove,
            GameMode::HumanVsHuman => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameSession, Position};

    #[test]
    fn test_initial_phase_per_mode() {
        assert!(TurnCoordinator::new(GameMode::HumanVsAi).is_local_turn());
        assert!(TurnCoordinator::new(GameMode::HumanVsHuman).is_local_turn());
        assert!(TurnCoordinator::new(GameMode::AiVsAi).is_awaiting_remote());
    }

    #[test]
    fn test_human_vs_ai_handoff_cycle() {
        let mut session = GameSession::new(3, 3, GameMode::HumanVsAi).unwrap();
        let mut coordinator = TurnCoordinator::new(GameMode::HumanVsAi);

        session.apply_move(Position::new(0, 0)).unwrap();
        let handoff = coordinator.on_local_move(&session).unwrap();
        assert_eq!(handoff.header, WireHeader::HumanMove);
        assert_eq!(handoff.token, MoveToken::Ai);
        assert!(coordinator.is_awaiting_remote());
        assert_eq!(coordinator.remote_mover(&session), Player::Blue);

        let mut remote = session.board().clone();
        remote.place_orb(Position::new(2, 2), Player::Blue);
        session.apply_remote_move(remote, Player::Blue);
        coordinator.on_remote_move(&session);
        assert!(coordinator.is_local_turn());
    }

    #[test]
    fn test_human_vs_human_never_hands_off() {
        let mut session = GameSession::new(3, 3, GameMode::HumanVsHuman).unwrap();
        let mut coordinator = TurnCoordinator::new(GameMode::HumanVsHuman);
        assert_eq!(coordinator.remote_expectation(&session), None);

        session.apply_move(Position::new(0, 0)).unwrap();
        assert_eq!(coordinator.on_local_move(&session), None);
        assert!(coordinator.is_local_turn());
    }

    #[test]
    fn test_ai_vs_ai_expectation_tracks_mover() {
        let session = GameSession::new(3, 3, GameMode::AiVsAi).unwrap();
        let coordinator = TurnCoordinator::new(GameMode::AiVsAi);

        let seed = coordinator.initial_handoff().unwrap();
        assert_eq!(seed.token, MoveToken::AiRed);

        // Red is about to move; the file only counts once it says "AI Blue".
        let expect = coordinator.remote_expectation(&session).unwrap();
        assert_eq!(expect.header, WireHeader::AiVsAiMove);
        assert_eq!(expect.tokens, &[MoveToken::AiBlue][..]);
        assert_eq!(coordinator.remote_mover(&session), Player::Red);
    }

    #[test]
    fn test_winner_moves_to_game_over() {
        let mut session = GameSession::new(1, 2, GameMode::HumanVsHuman).unwrap();
        let mut coordinator = TurnCoordinator::new(GameMode::HumanVsHuman);
        session.apply_move(Position::new(0, 0)).unwrap();
        session.apply_move(Position::new(0, 1)).unwrap();
        session.apply_move(Position::new(0, 0)).unwrap();
        assert!(session.is_terminal());

        coordinator.on_local_move(&session);
        assert_eq!(coordinator.phase(), TurnPhase::GameOver);
    }
}
