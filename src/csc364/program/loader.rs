use std::io::Read;

use ihex::{Reader, Record};
use log::debug;

use crate::csc364::arch::{Machine, ROM_WORDS};
use crate::csc364::errors::LoadError;

/// Bytes per data record: exactly one instruction word.
pub const RECORD_BYTES: usize = 2;

/// Populates ROM from an I8HEX stream. Data records carry one big-endian
/// instruction word each, addressed by ROM word index; loading stops at
/// the end-of-file record and other record types are ignored. Returns
/// the number of words stored.
pub fn load_rom(machine: &mut Machine, image: &str) -> Result<usize, LoadError> {
    let mut loaded = 0;

    for (index, parsed) in Reader::new(image).enumerate() {
        let record = index + 1;
        match parsed {
            Ok(Record::Data { offset, value }) => {
                if value.len() != RECORD_BYTES {
                    return Err(LoadError::MalformedRecordSize {
                        record,
                        size: value.len(),
                    });
                }
                if usize::from(offset) >= ROM_WORDS {
                    return Err(LoadError::AddressOutOfRange {
                        record,
                        address: offset,
                    });
                }
                let word = (u16::from(value[0]) << 8) | u16::from(value[1]);
                machine.rom.set_word(offset, word);
                loaded += 1;
            }
            Ok(Record::EndOfFile) => break,
            Ok(_) => {}
            Err(source) => return Err(LoadError::Hex { record, source }),
        }
    }

    debug!("loaded {loaded} words into ROM");
    Ok(loaded)
}

/// Reads a whole I8HEX stream from `reader` and loads it.
pub fn load_rom_reader<R: Read>(machine: &mut Machine, mut reader: R) -> Result<usize, LoadError> {
    let mut image = String::new();
    reader.read_to_string(&mut image)?;
    load_rom(machine, &image)
}

#[cfg(test)]
mod tests {
    use ihex::create_object_file_representation;

    use super::*;

    fn image_of(mut records: Vec<Record>) -> String {
        records.push(Record::EndOfFile);
        create_object_file_representation(&records).unwrap()
    }

    #[test]
    fn data_records_land_at_their_word_address() {
        let image = image_of(vec![
            Record::Data {
                offset: 0,
                value: vec![0x81, 0x23],
            },
            Record::Data {
                offset: 1,
                value: vec![0x91, 0x45],
            },
            Record::Data {
                offset: 100,
                value: vec![0x0F, 0x00],
            },
        ]);

        let mut machine = Machine::new();
        let loaded = load_rom(&mut machine, &image).unwrap();
        assert_eq!(loaded, 3);
        assert_eq!(machine.rom.word(0), 0x8123);
        assert_eq!(machine.rom.word(1), 0x9145);
        assert_eq!(machine.rom.word(100), 0x0F00);
        assert_eq!(machine.rom.word(2), 0x0000);
    }

    #[test]
    fn oversized_data_record_is_rejected() {
        let image = image_of(vec![Record::Data {
            offset: 0,
            value: vec![0x81, 0x23, 0x45],
        }]);

        let mut machine = Machine::new();
        match load_rom(&mut machine, &image) {
            Err(LoadError::MalformedRecordSize { record: 1, size: 3 }) => {}
            other => panic!("expected MalformedRecordSize, got {other:?}"),
        }
    }

    #[test]
    fn address_past_the_rom_is_rejected() {
        let image = image_of(vec![Record::Data {
            offset: 0xFFFF,
            value: vec![0x81, 0x23],
        }]);

        let mut machine = Machine::new();
        match load_rom(&mut machine, &image) {
            Err(LoadError::AddressOutOfRange {
                record: 1,
                address: 0xFFFF,
            }) => {}
            other => panic!("expected AddressOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn loading_stops_at_the_end_of_file_record() {
        let records = [
            Record::Data {
                offset: 0,
                value: vec![0x00, 0x12],
            },
            Record::EndOfFile,
            Record::Data {
                offset: 1,
                value: vec![0x00, 0x34],
            },
            Record::EndOfFile,
        ];
        let image: String = records
            .iter()
            .map(|r| format!("{}\n", r.to_record_string().unwrap()))
            .collect();

        let mut machine = Machine::new();
        let loaded = load_rom(&mut machine, &image).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(machine.rom.word(1), 0x0000);
    }

    #[test]
    fn corrupt_record_surfaces_the_reader_error() {
        let mut machine = Machine::new();
        match load_rom(&mut machine, ":zz\n") {
            Err(LoadError::Hex { record: 1, .. }) => {}
            other => panic!("expected Hex error, got {other:?}"),
        }
    }

    #[test]
    fn reader_source_round_trips() {
        let image = image_of(vec![Record::Data {
            offset: 7,
            value: vec![0x63, 0x45],
        }]);
        let mut machine = Machine::new();
        load_rom_reader(&mut machine, image.as_bytes()).unwrap();
        assert_eq!(machine.rom.word(7), 0x6345);
    }
}
