use thiserror::Error;

/// Errors raised while ingesting a machine image into ROM. The loader
/// fails fast: nothing partial is reported as a success.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A data record that does not carry exactly one instruction.
    #[error("record {record}: unexpected data size {size} (expected 2)")]
    MalformedRecordSize { record: usize, size: usize },

    /// A data record addressed past the end of ROM.
    #[error("record {record}: address {address} is outside ROM")]
    AddressOutOfRange { record: usize, address: u16 },

    /// The underlying I8HEX reader rejected a record.
    #[error("record {record}: {source}")]
    Hex {
        record: usize,
        source: ihex::ReaderError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
