use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::csc364::snapshot::Snapshot;

/// 16x8 monochrome bitmap: column `i` is byte `i`, rows scan the bits
/// from bit 7 (top) down.
pub(super) fn render_screen(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let mut lines = Vec::with_capacity(8);
    for row in 0..8u8 {
        let bit = 0x80u8 >> row;
        let text: String = snapshot
            .screen
            .iter()
            .map(|column| if column & bit != 0 { '\u{2588}' } else { ' ' })
            .collect();
        lines.push(Line::from(text));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Screen");
    let para = Paragraph::new(lines)
        .style(Style::default().fg(Color::Green))
        .block(block);
    f.render_widget(para, area);
}
