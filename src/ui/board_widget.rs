use crate::game::{Board, Position};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the orb grid into the given area, highlighting the cursor cell.
pub fn render_board(frame: &mut Frame, board: &Board, cursor: Option<Position>, area: Rect) {
    let mut lines = Vec::new();

    for row in 0..board.rows() {
        let mut spans = Vec::new();
        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            let cell = board.get(pos);
            let (symbol, color) = match cell.owner() {
                None => (" . ".to_string(), Color::DarkGray),
                Some(player) => {
                    let color = match player {
                        crate::game::Player::Red => Color::Red,
                        crate::game::Player::Blue => Color::Blue,
                    };
                    (format!("{:^3}", cell.orbs()), color)
                }
            };
            let mut style = Style::default().fg(color);
            if cursor == Some(pos) {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines);
    frame.render_widget(widget, area);
}
