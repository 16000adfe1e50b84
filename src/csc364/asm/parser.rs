use crate::csc364::instruction::{Instruction, OpCode};

use super::errors::AsmError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Register,
    Literal,
}

/// Operand shape per opcode: which slots hold registers and which hold
/// packed 4-bit literals. The count must match exactly.
fn operand_kinds(op: OpCode) -> &'static [TokenKind] {
    use TokenKind::*;
    match op {
        OpCode::Mov | OpCode::Not => &[Register, Register],
        OpCode::Set | OpCode::Seth => &[Register, Literal, Literal],
        OpCode::Inciz | OpCode::Decin => &[Register, Literal, Register],
        _ => &[Register, Register, Register],
    }
}

/// Parses one source line into the two instruction bytes. Blank lines
/// and `#` comments produce nothing. `number` is the one-based line
/// used in errors.
pub(super) fn parse_line(number: usize, line: &str) -> Result<Option<[u8; 2]>, AsmError> {
    let lowered = line.trim().to_lowercase();
    let tokens: Vec<&str> = lowered.split_ascii_whitespace().collect();

    let Some((&mnemonic, operands)) = tokens.split_first() else {
        return Ok(None);
    };
    if mnemonic.starts_with('#') {
        return Ok(None);
    }

    let op = OpCode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
        line: number,
        token: mnemonic.to_string(),
    })?;

    let kinds = operand_kinds(op);
    if operands.len() != kinds.len() {
        return Err(AsmError::WrongOperandCount {
            line: number,
            mnemonic: mnemonic.to_string(),
            expected: kinds.len(),
            found: operands.len(),
        });
    }

    // Absent operands (the two-operand forms) leave their nibble zero.
    let mut nibbles = [0u8; 3];
    for (slot, (kind, token)) in kinds.iter().zip(operands).enumerate() {
        nibbles[slot] = match kind {
            TokenKind::Register => parse_register(number, token)?,
            TokenKind::Literal => parse_literal(number, token)? & 0x0F,
        };
    }

    let instr = Instruction {
        op,
        dest: nibbles[0],
        a: nibbles[1],
        b: nibbles[2],
    };
    Ok(Some(instr.bytes()))
}

fn parse_register(line: usize, token: &str) -> Result<u8, AsmError> {
    if let Some(index) = register_index(token) {
        return Ok(index);
    }
    // A bare number is accepted in a register slot; the immediate forms
    // (addi, subi, incz, decn) route their literal through one.
    match literal_value(token) {
        Some(value) => Ok(value & 0x0F),
        None => Err(AsmError::UnknownRegister {
            line,
            token: token.to_string(),
        }),
    }
}

fn register_index(token: &str) -> Option<u8> {
    Some(match token {
        "r0" => 0,
        "r1" => 1,
        "r2" => 2,
        "r3" => 3,
        "r4" => 4,
        "r5" => 5,
        "r6" | "in" => 6,
        "r7" => 7,
        "r8" => 8,
        "r9" => 9,
        "ra" | "r10" => 10,
        "rb" | "r11" => 11,
        "rc" | "r12" => 12,
        "rd" | "r13" | "out0" => 13,
        "re" | "r14" | "out1" => 14,
        "rf" | "r15" | "pc" => 15,
        _ => return None,
    })
}

fn parse_literal(line: usize, token: &str) -> Result<u8, AsmError> {
    literal_value(token).ok_or_else(|| AsmError::BadLiteral {
        line,
        token: token.to_string(),
    })
}

/// `0x`-prefixed hex fitting 8 bits, or signed 8-bit decimal.
fn literal_value(token: &str) -> Option<u8> {
    if let Some(digits) = token.strip_prefix("0x") {
        if digits.is_empty() {
            return None;
        }
        return u8::from_str_radix(digits, 16).ok();
    }
    token.parse::<i8>().ok().map(|value| value as u8)
}
