use ratatui::prelude::*;
use ratatui::Frame;

use crate::csc364::snapshot::Snapshot;

use super::app::App;

mod instruction;
mod registers;
mod rom;
mod screen;
mod status;

use instruction::render_instruction;
use registers::render_registers;
use rom::render_rom;
use screen::render_screen;
use status::{render_header, render_status};

pub(super) fn draw(f: &mut Frame, app: &App, snapshot: &Snapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(14),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(f.area());

    render_header(f, rows[0], snapshot);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Length(34),
            Constraint::Min(18),
        ])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Length(4)])
        .split(columns[0]);
    render_screen(f, left[0], snapshot);
    render_instruction(f, left[1], snapshot);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(columns[1]);
    render_registers(f, middle[0], snapshot);

    render_rom(f, columns[2], snapshot);

    render_status(f, rows[2], app, snapshot);
}
