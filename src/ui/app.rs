use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::config::AppConfig;
use crate::game::{GameMode, GameSession, MoveError, Position};
use crate::protocol::Mailbox;
use crate::sync::{Handoff, PollOutcome, SyncPoller, TurnCoordinator};

const MODES: [GameMode; 3] = [
    GameMode::HumanVsAi,
    GameMode::HumanVsHuman,
    GameMode::AiVsAi,
];

const TICK: Duration = Duration::from_millis(50);

pub(crate) enum Screen {
    Menu { selected: usize },
    SizeEntry(SizeEntry),
    Game(Box<GameScreen>),
}

pub(crate) struct SizeEntry {
    pub mode: GameMode,
    pub rows: String,
    pub cols: String,
    pub editing_cols: bool,
}

pub(crate) struct GameScreen {
    pub session: GameSession,
    pub coordinator: TurnCoordinator,
    pub mailbox: Option<Mailbox>,
    pub poller: SyncPoller,
    pub cursor: Position,
    pub message: Option<String>,
    last_poll: Instant,
    gave_up: bool,
}

pub struct App {
    config: AppConfig,
    screen: Screen,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            config,
            screen: Screen::Menu { selected: 0 },
            should_quit: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.on_tick();
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let mut quit = false;
        let mut next_screen: Option<Screen> = None;

        match &mut self.screen {
            Screen::Menu { selected } => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => quit = true,
                KeyCode::Up => *selected = selected.checked_sub(1).unwrap_or(MODES.len() - 1),
                KeyCode::Down => *selected = (*selected + 1) % MODES.len(),
                KeyCode::Enter => {
                    next_screen = Some(Screen::SizeEntry(SizeEntry {
                        mode: MODES[*selected],
                        rows: self.config.default_rows.to_string(),
                        cols: self.config.default_cols.to_string(),
                        editing_cols: false,
                    }));
                }
                _ => {}
            },
            Screen::SizeEntry(entry) => match key.code {
                KeyCode::Esc => next_screen = Some(Screen::Menu { selected: 0 }),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let field = if entry.editing_cols {
                        &mut entry.cols
                    } else {
                        &mut entry.rows
                    };
                    if field.len() < 2 {
                        field.push(c);
                    }
                }
                KeyCode::Backspace => {
                    let field = if entry.editing_cols {
                        &mut entry.cols
                    } else {
                        &mut entry.rows
                    };
                    field.pop();
                }
                KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                    entry.editing_cols = !entry.editing_cols;
                }
                KeyCode::Enter => {
                    if entry.editing_cols {
                        next_screen = start_game(entry, &self.config);
                    } else {
                        entry.editing_cols = true;
                    }
                }
                _ => {}
            },
            Screen::Game(game) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => quit = true,
                // End the session and return to mode selection.
                KeyCode::Char('r') => next_screen = Some(Screen::Menu { selected: 0 }),
                KeyCode::Up => game.move_cursor(-1, 0),
                KeyCode::Down => game.move_cursor(1, 0),
                KeyCode::Left => game.move_cursor(0, -1),
                KeyCode::Right => game.move_cursor(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => game.place_at_cursor(),
                _ => {}
            },
        }

        if quit {
            self.should_quit = true;
        }
        if let Some(screen) = next_screen {
            self.screen = screen;
        }
    }

    fn on_tick(&mut self) {
        if let Screen::Game(game) = &mut self.screen {
            game.poll_remote();
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.screen);
    }
}

/// Parse the size-entry fields and open a game screen; stays on the entry
/// screen when the input is not a valid size.
fn start_game(entry: &SizeEntry, config: &AppConfig) -> Option<Screen> {
    let rows = entry.rows.parse::<usize>().ok()?;
    let cols = entry.cols.parse::<usize>().ok()?;
    let game = GameScreen::new(entry.mode, rows, cols, config).ok()?;
    Some(Screen::Game(Box::new(game)))
}

impl GameScreen {
    fn new(
        mode: GameMode,
        rows: usize,
        cols: usize,
        config: &AppConfig,
    ) -> Result<GameScreen, crate::game::DimensionError> {
        let session = GameSession::new(rows, cols, mode)?
            .with_cascade_round_limit(config.cascade_round_limit);
        let coordinator = TurnCoordinator::new(mode);

        // Human-vs-human plays entirely locally; the other modes talk to an
        // external agent through the shared file.
        let mailbox = match mode {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsAi | GameMode::AiVsAi => Some(Mailbox::new(&config.state_file)),
        };

        let mut game = GameScreen {
            session,
            coordinator,
            mailbox,
            poller: SyncPoller::new(
                Duration::from_millis(config.poll_interval_ms),
                config.max_poll_attempts,
            ),
            cursor: Position::new(0, 0),
            message: None,
            last_poll: Instant::now(),
            gave_up: false,
        };

        if let Some(handoff) = game.coordinator.initial_handoff() {
            game.write_handoff(handoff);
        }
        Ok(game)
    }

    pub(crate) fn waiting_status(&self) -> Option<String> {
        if !self.coordinator.is_awaiting_remote() || self.session.is_terminal() {
            return None;
        }
        let attempts = self.poller.attempts();
        if attempts > 0 {
            Some(format!("Waiting for the opponent... ({attempts} polls)"))
        } else {
            Some("Waiting for the opponent...".to_string())
        }
    }

    fn move_cursor(&mut self, dr: i64, dc: i64) {
        let rows = self.session.board().rows() as i64;
        let cols = self.session.board().cols() as i64;
        let row = (self.cursor.row as i64 + dr).clamp(0, rows - 1);
        let col = (self.cursor.col as i64 + dc).clamp(0, cols - 1);
        self.cursor = Position::new(row as usize, col as usize);
    }

    fn place_at_cursor(&mut self) {
        self.message = None;

        if self.session.is_terminal() {
            self.message = Some("Game over! Press 'r' for a new game.".to_string());
            return;
        }
        if !self.coordinator.is_local_turn() {
            self.message = Some("It is not your turn.".to_string());
            return;
        }

        match self.session.apply_move(self.cursor) {
            Ok(_) => {
                if let Some(handoff) = self.coordinator.on_local_move(&self.session) {
                    self.write_handoff(handoff);
                    self.poller.reset();
                    self.last_poll = Instant::now();
                }
                self.announce_winner();
            }
            Err(MoveError::OpponentCell) => {
                self.message = Some("That cell belongs to the opponent!".to_string());
            }
            Err(MoveError::OutOfBounds) => {
                self.message = Some("Outside the board!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
            Err(MoveError::CascadeDidNotStabilize { rounds }) => {
                self.message = Some(format!("Cascade did not stabilize after {rounds} rounds"));
            }
        }
    }

    /// One cooperative poll step; called from the app tick.
    fn poll_remote(&mut self) {
        if self.gave_up || !self.coordinator.is_awaiting_remote() {
            return;
        }
        if self.last_poll.elapsed() < self.poller.interval() {
            return;
        }
        self.last_poll = Instant::now();

        let Some(mailbox) = self.mailbox.clone() else {
            return;
        };
        let Some(expect) = self.coordinator.remote_expectation(&self.session) else {
            return;
        };

        let rows = self.session.board().rows();
        let cols = self.session.board().cols();
        match self.poller.poll(&mailbox, rows, cols, expect) {
            PollOutcome::Ready(snapshot) => {
                let mover = self.coordinator.remote_mover(&self.session);
                self.session.apply_remote_move(snapshot.board, mover);
                self.coordinator.on_remote_move(&self.session);
                self.announce_winner();
            }
            PollOutcome::NotReady => {}
            PollOutcome::GaveUp => {
                self.gave_up = true;
                self.message = Some(format!(
                    "No reply from the opponent after {} attempts",
                    self.poller.attempts()
                ));
            }
        }
    }

    fn write_handoff(&mut self, handoff: Handoff) {
        let Some(mailbox) = &self.mailbox else {
            return;
        };
        if let Err(err) = mailbox.write(self.session.board(), handoff.header, handoff.token) {
            self.message = Some(format!("Failed to write game state: {err}"));
        }
    }

    fn announce_winner(&mut self) {
        if let Some(player) = self.session.winner() {
            self.message = Some(format!("{} wins!", player.name()));
        }
    }
}
