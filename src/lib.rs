//! # Chain Reaction
//!
//! The Chain Reaction board game: orbs placed on a grid explode when they
//! reach a position-dependent critical mass, cascading in simultaneous waves
//! and capturing neighboring cells. Two independently running processes (the
//! TUI here and one or more external AI agents) alternate moves by exchanging
//! board snapshots through a single shared text file.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, the explosion cascade, session state machine
//! - [`protocol`] — Shared-file wire format and mailbox I/O
//! - [`sync`] — Turn coordination and the cooperative mailbox poller
//! - [`ui`] — Terminal UI: mode menu, size entry, game grid
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod sync;
pub mod ui;
