use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::csc364::snapshot::Snapshot;

use super::App;

pub(super) fn render_header(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(area);

    let title = Paragraph::new(Line::from(" CSC 364 Emulator").bold());
    f.render_widget(title, halves[0]);

    let clock = Paragraph::new(format!("Clock {:>12}", snapshot.clock)).right_aligned();
    f.render_widget(clock, halves[1]);
}

pub(super) fn render_status(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let (state, color) = if snapshot.halted() {
        ("HALTED", Color::Red)
    } else if app.started {
        ("RUNNING", Color::Green)
    } else {
        ("READY", Color::Yellow)
    };

    let line = Line::from(vec![
        Span::styled(state, Style::default().fg(color).bold()),
        Span::raw(format!("   speed {}", app.speed.get())),
        Span::raw("   <Enter> start   q quit"),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Controls");
    f.render_widget(Paragraph::new(line).block(block), area);
}
