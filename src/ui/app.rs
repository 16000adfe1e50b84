use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use crate::csc364::exec::{self, SharedMachine};
use crate::csc364::snapshot::Snapshot;
use crate::csc364::{Machine, StepSpeed};

use super::input::handle_key;
use super::view::draw;

const FRAME: Duration = Duration::from_millis(33);

pub struct App {
    pub(super) machine: SharedMachine,
    pub(super) speed: StepSpeed,
    pub(super) started: bool,
    pub(super) should_quit: bool,
    stop: Arc<AtomicBool>,
    cycles: Receiver<()>,
    cycle_tx: Sender<()>,
    worker: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(machine: Machine, speed: StepSpeed) -> Self {
        let (cycle_tx, cycles) = mpsc::channel();
        App {
            machine: Arc::new(Mutex::new(machine)),
            speed,
            started: false,
            should_quit: false,
            stop: Arc::new(AtomicBool::new(false)),
            cycles,
            cycle_tx,
            worker: None,
        }
    }

    /// Spawns the CPU loop. Pressing Enter again is a no-op.
    pub(super) fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let machine = Arc::clone(&self.machine);
        let stop = Arc::clone(&self.stop);
        let cycles = self.cycle_tx.clone();
        let speed = self.speed;
        self.worker = Some(std::thread::spawn(move || {
            exec::run(machine, speed, stop, cycles);
        }));
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        self.machine.lock().unwrap().snapshot()
    }

    /// Coalesces pending cycle notifications into one redraw request.
    fn drain_cycles(&self) -> bool {
        let mut any = false;
        while self.cycles.try_recv().is_ok() {
            any = true;
        }
        any
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Opens the terminal, runs the event loop, and always restores the
/// terminal before returning.
pub fn run(machine: Machine, speed: StepSpeed) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, App::new(machine, speed));
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: App) -> io::Result<()> {
    let mut dirty = true;
    let mut last_draw: Option<Instant> = None;

    loop {
        if event::poll(Duration::from_millis(10))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(&mut app, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
        if app.should_quit {
            break;
        }

        if app.drain_cycles() {
            dirty = true;
        }
        if dirty && last_draw.map_or(true, |at| at.elapsed() >= FRAME) {
            let snapshot = app.snapshot();
            terminal.draw(|f| draw(f, &app, &snapshot))?;
            last_draw = Some(Instant::now());
            dirty = false;
        }
    }

    app.shutdown();
    Ok(())
}
