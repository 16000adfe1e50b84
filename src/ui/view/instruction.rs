use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::csc364::snapshot::Snapshot;

pub(super) fn render_instruction(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let lines = match snapshot.current {
        Some(instr) => vec![
            Line::from(format!(
                "  {:X}    {:X}    {:X}    {:X}",
                instr.op.nibble(),
                instr.dest,
                instr.a,
                instr.b
            )),
            Line::from(format!("  {instr}")),
        ],
        None => vec![Line::from("  -    -    -    -"), Line::from("  halted")],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Instruction");
    f.render_widget(Paragraph::new(lines).block(block), area);
}
