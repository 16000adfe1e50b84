use crate::csc364::arch::{Machine, REGISTER_COUNT, ROM_WORDS, SCREEN_BYTES};
use crate::csc364::instruction::Instruction;

/// Rows shown in the ROM panel, centered on the PC.
pub const ROM_WINDOW: usize = 12;

pub struct RomEntry {
    pub address: u16,
    pub word: u16,
    pub active: bool,
}

/// A read-only copy of everything the front-end renders, taken in one
/// piece so a frame never mixes two cycles.
pub struct Snapshot {
    pub registers: [u16; REGISTER_COUNT],
    pub screen: [u8; SCREEN_BYTES],
    pub clock: u64,
    pub current: Option<Instruction>,
    pub rom_window: Vec<RomEntry>,
}

impl Snapshot {
    pub fn pc(&self) -> u16 {
        self.registers[REGISTER_COUNT - 1]
    }

    pub fn halted(&self) -> bool {
        usize::from(self.pc()) >= ROM_WORDS
    }
}

impl Machine {
    pub fn snapshot(&self) -> Snapshot {
        let pc = usize::from(self.registers.pc());

        let half = ROM_WINDOW / 2;
        let start = if pc < half {
            0
        } else if pc > ROM_WORDS - half {
            ROM_WORDS - ROM_WINDOW
        } else {
            pc - half
        };
        let rom_window = (start..start + ROM_WINDOW)
            .map(|address| RomEntry {
                address: address as u16,
                word: self.rom.word(address as u16),
                active: address == pc,
            })
            .collect();

        Snapshot {
            registers: *self.registers.values(),
            screen: *self.screen.columns(),
            clock: self.clock,
            current: (pc < ROM_WORDS).then(|| Instruction::decode(self.rom.word(pc as u16))),
            rom_window,
        }
    }
}
