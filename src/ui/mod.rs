//! Terminal UI: mode menu, board-size entry, and the in-game grid view.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
