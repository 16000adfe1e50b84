use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

use log::{debug, trace};

use crate::csc364::arch::{
    Machine, StepSpeed, CTRL_SCREEN, CTRL_WRITE, REG_INPUT, REG_OUT1, REG_OUT2, REG_PC, ROM_WORDS,
};
use crate::csc364::instruction::{Instruction, OpCode};

/// A machine shared between the CPU worker and the UI. The worker is the
/// sole writer; readers take the same lock for a consistent view.
pub type SharedMachine = Arc<Mutex<Machine>>;

impl Machine {
    /// The program has run off the end of ROM.
    pub fn halted(&self) -> bool {
        usize::from(self.registers.pc()) >= ROM_WORDS
    }

    /// One full cycle: sample the input register, fetch and execute the
    /// word at the PC, emit through the output side-channel, update the
    /// PC, advance the clock.
    pub fn step(&mut self) {
        if self.halted() {
            return;
        }

        if self.registers.get(REG_OUT1) & CTRL_WRITE == 0 {
            self.sample_input();
        }

        let word = self.rom.word(self.registers.pc());
        let instr = Instruction::decode(word);
        trace!("cycle {}: pc={:04X} {}", self.clock, self.registers.pc(), instr);
        let wrote = self.execute(instr);

        if self.registers.get(REG_OUT1) & CTRL_WRITE != 0 {
            self.emit_output();
        }

        // The PC advances unless this instruction actually wrote it; a
        // conditional op that did not fire advances like any other.
        if !(wrote && instr.dest == REG_PC) {
            let next = self.registers.pc().wrapping_add(1);
            self.registers.set_pc(next);
        }

        self.clock += 1;
    }

    /// Loads the low byte of the input register from RAM or the screen,
    /// depending on the channel bit. The high byte is preserved.
    fn sample_input(&mut self) {
        let address = self.registers.get(REG_OUT2);
        let byte = if self.registers.get(REG_OUT1) & CTRL_SCREEN == 0 {
            self.ram.get(address)
        } else {
            self.screen.get(address)
        };
        let high = self.registers.get(REG_INPUT) & 0xFF00;
        self.registers.set(REG_INPUT, high | u16::from(byte));
    }

    /// Writes the low byte of output-1 to RAM or the screen at the
    /// address held in output-2.
    fn emit_output(&mut self) {
        let address = self.registers.get(REG_OUT2);
        let payload = (self.registers.get(REG_OUT1) & 0x00FF) as u8;
        if self.registers.get(REG_OUT1) & CTRL_SCREEN == 0 {
            self.ram.set(address, payload);
        } else {
            self.screen.set(address, payload);
        }
    }

    /// Applies one operation. Returns whether the destination register
    /// was written; conditional operations report `false` when their
    /// condition does not fire.
    fn execute(&mut self, instr: Instruction) -> bool {
        use OpCode::*;
        let Instruction { op, dest, a, b } = instr;
        let regs = &mut self.registers;
        match op {
            Mov => {
                regs.set(dest, regs.get(a));
                true
            }
            Not => {
                regs.set(dest, !regs.get(a));
                true
            }
            And => {
                regs.set(dest, regs.get(a) & regs.get(b));
                true
            }
            Or => {
                regs.set(dest, regs.get(a) | regs.get(b));
                true
            }
            Add => {
                regs.set(dest, regs.get(a).wrapping_add(regs.get(b)));
                true
            }
            Sub => {
                regs.set(dest, regs.get(a).wrapping_sub(regs.get(b)));
                true
            }
            Addi => {
                regs.set(dest, regs.get(a).wrapping_add(u16::from(b)));
                true
            }
            Subi => {
                regs.set(dest, regs.get(a).wrapping_sub(u16::from(b)));
                true
            }
            Set => {
                regs.set(dest, ((u16::from(a) << 4) | u16::from(b)) & 0x00FF);
                true
            }
            Seth => {
                // Packed in 16-bit width so the shift cannot truncate.
                let high = (((u16::from(a) << 4) | u16::from(b)) << 8) & 0xFF00;
                regs.set(dest, (regs.get(dest) & 0x00FF) | high);
                true
            }
            Inciz => {
                if regs.get(b) == 0 {
                    regs.set(dest, regs.get(dest).wrapping_add(u16::from(a)));
                    true
                } else {
                    false
                }
            }
            Decin => {
                if regs.get(b) & 0x8000 != 0 {
                    regs.set(dest, regs.get(dest).wrapping_sub(u16::from(a)));
                    true
                } else {
                    false
                }
            }
            Movez => {
                if regs.get(b) == 0 {
                    regs.set(dest, regs.get(a));
                    true
                } else {
                    false
                }
            }
            Movex => {
                if regs.get(b) != 0 {
                    regs.set(dest, regs.get(a));
                    true
                } else {
                    false
                }
            }
            Movep => {
                if regs.get(b) & 0x8000 == 0 {
                    regs.set(dest, regs.get(a));
                    true
                } else {
                    false
                }
            }
            Moven => {
                if regs.get(b) & 0x8000 != 0 {
                    regs.set(dest, regs.get(a));
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Drives the shared machine until it halts, the stop flag is raised, or
/// the notification channel closes. The throttle sleep happens outside
/// the lock so readers are never blocked by it.
pub fn run(machine: SharedMachine, speed: StepSpeed, stop: Arc<AtomicBool>, cycles: Sender<()>) {
    debug!("cpu loop starting at speed {}", speed.get());
    while !stop.load(Ordering::Relaxed) {
        let delay = speed.delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        let halted = {
            let mut m = machine.lock().unwrap();
            if m.halted() {
                true
            } else {
                m.step();
                false
            }
        };
        if halted {
            debug!("cpu loop halted at the ROM boundary");
            break;
        }
        if cycles.send(()).is_err() {
            break;
        }
    }
}
