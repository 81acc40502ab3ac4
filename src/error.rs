use std::path::PathBuf;

/// Errors raised while reading the shared game-state file.
///
/// Every variant is recoverable by retry: a malformed or missing file is
/// indistinguishable from "the other side has not written yet", so the
/// poller treats all of these as "not ready".
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("game state file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("malformed header: expected {expected:?}, found {found:?}")]
    MalformedHeader { expected: String, found: String },

    #[error("expected {expected} board rows, found {found}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell token {token:?} at ({row}, {col})")]
    InvalidCellToken {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("I/O error on game state file: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised when a cascade fails to reach a stable board within the
/// round ceiling. The rules do not formally rule this out, so it is
/// surfaced as a distinguishable condition instead of looping forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CascadeError {
    #[error("cascade did not stabilize after {rounds} rounds")]
    DidNotStabilize { rounds: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
