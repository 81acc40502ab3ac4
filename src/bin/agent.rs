//! Headless agent process: the "other side" of the shared game-state file.
//!
//! Polls the mailbox until the file says it is this agent's turn, plays a
//! uniformly random valid cell, and writes the resulting board back. Any
//! process honoring the same text format can stand in for it.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use chain_reaction::config::AppConfig;
use chain_reaction::game::{GameMode, GameSession, Player, Position};
use chain_reaction::protocol::{Mailbox, MoveToken, WireExpectation, WireHeader};
use chain_reaction::sync::{PollOutcome, SyncPoller};

/// Play Chain Reaction over the shared game-state file.
#[derive(Parser)]
#[command(name = "agent", about = "Headless Chain Reaction agent")]
struct Cli {
    /// Game mode: human-vs-ai or ai-vs-ai
    #[arg(long, default_value = "human-vs-ai")]
    mode: String,

    /// Color played in ai-vs-ai mode: red or blue
    #[arg(long, default_value = "blue")]
    color: String,

    /// Board rows; must match the UI session (default from config)
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns; must match the UI session (default from config)
    #[arg(long)]
    cols: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// RNG seed for reproducible play
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mode = match cli.mode.as_str() {
        "human-vs-ai" => GameMode::HumanVsAi,
        "ai-vs-ai" => GameMode::AiVsAi,
        other => bail!("unknown mode '{}' (expected 'human-vs-ai' or 'ai-vs-ai')", other),
    };
    let me = match mode {
        // The file-facing side of human-vs-ai is always the blue AI.
        GameMode::HumanVsAi => Player::Blue,
        _ => match cli.color.as_str() {
            "red" => Player::Red,
            "blue" => Player::Blue,
            other => bail!("unknown color '{}' (expected 'red' or 'blue')", other),
        },
    };

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let rows = cli.rows.unwrap_or(config.default_rows);
    let cols = cli.cols.unwrap_or(config.default_cols);

    let mut session = match GameSession::new(rows, cols, mode) {
        Ok(session) => session.with_cascade_round_limit(config.cascade_round_limit),
        Err(_) => bail!("board dimensions {}x{} are out of range", rows, cols),
    };

    let base = WireExpectation::agent_read(mode)
        .context("mode has no file protocol")?;
    let expect = match mode {
        // In ai-vs-ai both agents see the same header; the token says whose
        // turn it is.
        GameMode::AiVsAi => base.expecting_token(MoveToken::for_ai(me)),
        _ => base,
    };

    let mailbox = Mailbox::new(&config.state_file);
    let mut poller = SyncPoller::new(
        Duration::from_millis(config.poll_interval_ms),
        config.max_poll_attempts,
    );
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    tracing::info!(
        mode = mode.label(),
        color = me.name(),
        rows,
        cols,
        file = %mailbox.path().display(),
        "agent started"
    );

    loop {
        match poller.poll(&mailbox, rows, cols, expect) {
            PollOutcome::Ready(snapshot) => {
                session.apply_remote_move(snapshot.board, me.opponent());
                if let Some(winner) = session.winner() {
                    tracing::info!(winner = winner.name(), "game over");
                    break;
                }
                play_turn(&mut session, &mailbox, mode, me, &mut rng)?;
                if let Some(winner) = session.winner() {
                    tracing::info!(winner = winner.name(), "game over");
                    break;
                }
            }
            PollOutcome::NotReady => {}
            PollOutcome::GaveUp => bail!(
                "no turn-appropriate game state after {} attempts: {}",
                poller.attempts(),
                poller
                    .last_error()
                    .map(|e| e.to_string())
                    .unwrap_or_default()
            ),
        }
        thread::sleep(poller.interval());
    }
    Ok(())
}

/// Pick a uniformly random valid cell, apply it, and hand the file back.
fn play_turn(
    session: &mut GameSession,
    mailbox: &Mailbox,
    mode: GameMode,
    me: Player,
    rng: &mut StdRng,
) -> Result<()> {
    let valid: Vec<Position> = session
        .board()
        .positions()
        .filter(|&pos| session.board().is_valid_move(pos, me))
        .collect();
    if valid.is_empty() {
        bail!("no valid moves left for {}", me.name());
    }
    let pos = valid[rng.random_range(0..valid.len())];

    let report = session
        .apply_move(pos)
        .map_err(|e| anyhow::anyhow!("move at ({}, {}) rejected: {:?}", pos.row, pos.col, e))?;
    tracing::info!(
        row = pos.row,
        col = pos.col,
        rounds = report.rounds,
        explosions = report.explosions,
        "played move"
    );

    let (header, token) = match mode {
        GameMode::HumanVsAi => (WireHeader::AiMove, MoveToken::Human),
        GameMode::AiVsAi => (WireHeader::AiVsAiMove, MoveToken::for_ai(me.opponent())),
        GameMode::HumanVsHuman => unreachable!("no agent in human-vs-human"),
    };
    mailbox
        .write(session.board(), header, token)
        .context("writing game state file")?;
    Ok(())
}
