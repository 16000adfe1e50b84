use thiserror::Error;

/// Assembly failures, each tagged with the one-based source line and the
/// offending token so the message alone locates the problem.
#[derive(Debug, Error)]
pub enum AsmError {
    #[error("line {line}: unknown mnemonic '{token}'")]
    UnknownMnemonic { line: usize, token: String },

    #[error("line {line}: unknown register '{token}'")]
    UnknownRegister { line: usize, token: String },

    #[error("line {line}: bad literal '{token}'")]
    BadLiteral { line: usize, token: String },

    #[error("line {line}: {mnemonic} expects {expected} operands, {found} provided")]
    WrongOperandCount {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("hex output: {0}")]
    Hex(#[from] ihex::WriterError),
}
