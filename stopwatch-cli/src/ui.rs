use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::controls::StatusSnapshot;

const LOG_PANEL_HEIGHT: u16 = 8;

pub fn draw_status(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    status: &StatusSnapshot,
    log_lines: &[String],
) {
    // Title, controls, elapsed, laps, logs.
    let _ = terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(3),
                Constraint::Length(LOG_PANEL_HEIGHT),
            ])
            .split(f.size());

        let title = Paragraph::new("Stopwatch").style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(title, chunks[0]);

        let controls = Paragraph::new(status.help.as_str())
            .style(Style::default().fg(Color::Blue))
            .block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, chunks[1]);

        let elapsed = Paragraph::new(status.text.as_str())
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title("Elapsed"));
        f.render_widget(elapsed, chunks[2]);

        // Newest lap on top; older ones fall off the bottom.
        let laps_height = chunks[3].height.saturating_sub(2) as usize;
        let laps_text = if status.laps.is_empty() {
            "No laps yet.".to_string()
        } else {
            status
                .laps
                .iter()
                .take(laps_height)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n")
        };
        let laps = Paragraph::new(laps_text)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Laps"));
        f.render_widget(laps, chunks[3]);

        let log_height = chunks[4].height.saturating_sub(2) as usize;
        let start = log_lines.len().saturating_sub(log_height);
        let log_text = if log_lines.is_empty() {
            "No logs yet.".to_string()
        } else {
            log_lines[start..].join("\n")
        };

        let log_widget = Paragraph::new(log_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Logs"));
        f.render_widget(log_widget, chunks[4]);
    });
}
