use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::csc364::snapshot::Snapshot;

/// Twelve ROM words around the PC, the active address highlighted.
pub(super) fn render_rom(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let lines: Vec<Line> = snapshot
        .rom_window
        .iter()
        .map(|entry| {
            let text = format!(" {:05} | {:04X} ", entry.address, entry.word);
            if entry.active {
                Line::from(text).style(Style::default().bg(Color::Green).fg(Color::Black))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("ROM");
    f.render_widget(Paragraph::new(lines).block(block), area);
}
