use std::io::{BufRead, Write};

use ihex::{create_object_file_representation, Record};
use log::debug;

mod errors;
mod parser;

#[cfg(test)]
mod tests;

pub use errors::AsmError;

// ---------- API ----------

/// Translates plaintext assembly into an I8HEX machine image, one data
/// record per instruction at sequential word addresses, terminated by an
/// end-of-file record. Stops at the first error, which carries the
/// one-based source line. Returns the number of instructions emitted.
pub fn assemble<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<usize, AsmError> {
    let mut records = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if let Some(bytes) = parser::parse_line(index + 1, &line)? {
            records.push(Record::Data {
                offset: records.len() as u16,
                value: bytes.to_vec(),
            });
        }
    }

    let count = records.len();
    records.push(Record::EndOfFile);
    let image = create_object_file_representation(&records)?;
    output.write_all(image.as_bytes())?;
    output.write_all(b"\n")?;

    debug!("assembled {count} instructions");
    Ok(count)
}
