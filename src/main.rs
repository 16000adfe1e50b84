mod csc364;
mod ui;

use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::info;

use csc364::program::load_rom;
use csc364::{asm, Machine, StepSpeed};

/// Emulator and assembler toolchain for the CSC 364 16-bit
/// educational microcontroller.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate plaintext assembly into an I8HEX machine image
    Assemble {
        /// Source file; standard input when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Destination file; standard output when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Load an I8HEX machine image and run it in the terminal emulator
    Run {
        /// Machine image produced by `assemble`
        #[arg(long, short)]
        input: PathBuf,

        /// Step speed, 1 (slowest) to 10 (no delay); clamped into range
        #[arg(long, short, default_value_t = 5)]
        speed: u8,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Command::Assemble { input, output } => assemble(input, output),
        Command::Run { input, speed } => run(input, StepSpeed::new(speed)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn assemble(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let count = asm::assemble(reader, &mut writer)?;
    writer.flush()?;
    info!("assembled {count} instructions");
    Ok(())
}

fn run(input: PathBuf, speed: StepSpeed) -> Result<(), Box<dyn Error>> {
    let image = fs::read_to_string(&input)?;
    let mut machine = Machine::new();
    let words = load_rom(&mut machine, &image)?;
    info!("loaded {words} words from {}", input.display());

    ui::run(machine, speed)?;
    Ok(())
}
