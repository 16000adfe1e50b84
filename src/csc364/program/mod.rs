pub mod loader;

pub use loader::{load_rom, load_rom_reader};
