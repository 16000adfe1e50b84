use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::csc364::arch::{REG_INPUT, REG_OUT1, REG_OUT2, REG_PC};
use crate::csc364::snapshot::Snapshot;

fn label(index: u8) -> String {
    match index {
        REG_INPUT => "INPUT".to_string(),
        REG_OUT1 => "OUT 1".to_string(),
        REG_OUT2 => "OUT 2".to_string(),
        REG_PC => "PROGC".to_string(),
        other => format!("REG {other:X}"),
    }
}

pub(super) fn render_registers(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let mut lines = Vec::with_capacity(8);
    for i in 0..8u8 {
        lines.push(Line::from(format!(
            " {}  | {:04X} | {}  | {:04X}",
            label(i),
            snapshot.registers[i as usize],
            label(i + 8),
            snapshot.registers[i as usize + 8],
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Registers");
    f.render_widget(Paragraph::new(lines).block(block), area);
}
