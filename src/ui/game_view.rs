use crate::game::Player;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{GameScreen, Screen, SizeEntry};
use super::board_widget;

pub(crate) fn render(frame: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Menu { selected } => render_menu(frame, *selected),
        Screen::SizeEntry(entry) => render_size_entry(frame, entry),
        Screen::Game(game) => render_game(frame, game),
    }
}

fn render_menu(frame: &mut Frame, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Options
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let title = Paragraph::new("Chain Reaction")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let labels = ["AI vs Human", "Human vs Human", "AI vs AI"];
    let lines: Vec<Line> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == selected {
                Line::styled(
                    format!("> {}", label),
                    Style::default().add_modifier(Modifier::REVERSED),
                )
            } else {
                Line::raw(format!("  {}", label))
            }
        })
        .collect();
    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Game Mode"));
    frame.render_widget(menu, chunks[1]);

    render_controls(frame, "Up/Down: select  |  Enter: choose  |  q: quit", chunks[2]);
}

fn render_size_entry(frame: &mut Frame, entry: &SizeEntry) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(format!("Board Size  |  {}", entry.mode.label()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let marker = |active: bool| if active { ">" } else { " " };
    let lines = vec![
        Line::raw(format!(
            "{} Rows (1-20): {}",
            marker(!entry.editing_cols),
            entry.rows
        )),
        Line::raw(format!(
            "{} Cols (1-20): {}",
            marker(entry.editing_cols),
            entry.cols
        )),
    ];
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, chunks[1]);

    render_controls(
        frame,
        "digits: edit  |  Tab: switch field  |  Enter: start  |  Esc: back",
        chunks[2],
    );
}

fn render_game(frame: &mut Frame, game: &GameScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                    // Header
            Constraint::Min(game.session.board().rows() as u16 + 2), // Board
            Constraint::Length(3),                                    // Message
            Constraint::Length(3),                                    // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    board_widget::render_board(
        frame,
        game.session.board(),
        Some(game.cursor),
        inset(chunks[1]),
    );
    render_message(frame, game, chunks[2]);
    render_controls(
        frame,
        "arrows: move  |  Enter: place orb  |  r: new game  |  q: quit",
        chunks[3],
    );
}

fn render_header(frame: &mut Frame, game: &GameScreen, area: Rect) {
    let session = &game.session;
    let (status, color) = if let Some(player) = session.winner() {
        (format!("{} wins!", player.name()), player_color(player))
    } else {
        let player = session.current_player();
        (
            format!("{} to move", player.name()),
            player_color(player),
        )
    };

    let header = Paragraph::new(format!("{}  |  {}", status, session.mode().label()))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Chain Reaction"));
    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, game: &GameScreen, area: Rect) {
    let text = game
        .message
        .clone()
        .or_else(|| game.waiting_status())
        .unwrap_or_default();
    let message = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, area);
}

fn render_controls(frame: &mut Frame, text: &str, area: Rect) {
    let controls = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, area);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Blue => Color::Blue,
    }
}

fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    }
}
