use std::io::Cursor;

use super::parser::parse_line;
use super::*;
use crate::csc364::program::load_rom;
use crate::csc364::Machine;

fn bytes_of(line: &str) -> [u8; 2] {
    parse_line(1, line).unwrap().expect("line should emit")
}

fn word_of(line: &str) -> u16 {
    let [high, low] = bytes_of(line);
    (u16::from(high) << 8) | u16::from(low)
}

#[test]
fn three_register_forms() {
    assert_eq!(word_of("and r1 r2 r3"), 0x2123);
    assert_eq!(word_of("or r1 r2 r3"), 0x3123);
    assert_eq!(word_of("add r1 r2 r3"), 0x4123);
    assert_eq!(word_of("sub r1 r2 r3"), 0x5123);
    assert_eq!(word_of("movz r1 r2 r3"), 0xC123);
    assert_eq!(word_of("movx r1 r2 r3"), 0xD123);
    assert_eq!(word_of("movp r1 r2 r3"), 0xE123);
    assert_eq!(word_of("movn r1 r2 r3"), 0xF123);
}

#[test]
fn two_operand_forms_leave_b_zero() {
    assert_eq!(word_of("mov r1 r2"), 0x0120);
    assert_eq!(word_of("not r1 r2"), 0x1120);
}

#[test]
fn addi_takes_a_bare_immediate_in_the_register_slot() {
    assert_eq!(bytes_of("addi r3 r4 5"), [0x63, 0x45]);
}

#[test]
fn mov_to_the_pc() {
    assert_eq!(bytes_of("mov pc r0"), [0x0F, 0x00]);
}

#[test]
fn set_and_seth_take_two_literals() {
    assert_eq!(word_of("set r1 0x2 0x3"), 0x8123);
    assert_eq!(word_of("seth r1 4 5"), 0x9145);
    // nibbles above four bits are dropped
    assert_eq!(word_of("set r1 0x12 0x13"), 0x8123);
}

#[test]
fn incz_and_decn_take_literal_then_register() {
    assert_eq!(word_of("incz r1 3 r2"), 0xA132);
    assert_eq!(word_of("decn r1 3 r2"), 0xB132);
    assert_eq!(word_of("inciz r1 3 r2"), 0xA132);
    assert_eq!(word_of("decin r1 3 r2"), 0xB132);
}

#[test]
fn long_spellings_match_the_short_ones() {
    assert_eq!(word_of("move r1 r2"), word_of("mov r1 r2"));
    assert_eq!(word_of("movez r1 r2 r3"), word_of("movz r1 r2 r3"));
    assert_eq!(word_of("moven r1 r2 r3"), word_of("movn r1 r2 r3"));
}

#[test]
fn register_names_and_aliases() {
    assert_eq!(word_of("mov ra rf"), 0x0AF0);
    assert_eq!(word_of("mov r10 r15"), 0x0AF0);
    assert_eq!(word_of("mov in r0"), 0x0600);
    assert_eq!(word_of("mov out0 r0"), 0x0D00);
    assert_eq!(word_of("mov out1 r0"), 0x0E00);
    assert_eq!(word_of("mov pc r0"), 0x0F00);
}

#[test]
fn tokens_are_case_insensitive() {
    assert_eq!(word_of("MOV R1 R2"), 0x0120);
    assert_eq!(word_of("Set PC 0xF 0xF"), 0x8FFF);
}

#[test]
fn negative_decimal_literals_wrap_into_the_nibble() {
    // -1 is 0xFF as a signed byte; the packed nibble keeps the low four bits
    assert_eq!(word_of("set r0 0 -1"), 0x800F);
}

#[test]
fn comments_and_blank_lines_emit_nothing() {
    assert_eq!(parse_line(1, "").unwrap(), None);
    assert_eq!(parse_line(2, "   ").unwrap(), None);
    assert_eq!(parse_line(3, "# mov r1 r2").unwrap(), None);
    assert_eq!(parse_line(4, "  #comment").unwrap(), None);
}

#[test]
fn unknown_mnemonic_reports_line_and_token() {
    match parse_line(7, "jmp r1 r2") {
        Err(AsmError::UnknownMnemonic { line: 7, token }) => assert_eq!(token, "jmp"),
        other => panic!("expected UnknownMnemonic, got {other:?}"),
    }
}

#[test]
fn unknown_register_reports_line_and_token() {
    match parse_line(3, "mov r1 rx") {
        Err(AsmError::UnknownRegister { line: 3, token }) => assert_eq!(token, "rx"),
        other => panic!("expected UnknownRegister, got {other:?}"),
    }
}

#[test]
fn bad_literal_reports_line_and_token() {
    match parse_line(9, "set r1 0x 3") {
        Err(AsmError::BadLiteral { line: 9, token }) => assert_eq!(token, "0x"),
        other => panic!("expected BadLiteral, got {other:?}"),
    }
    assert!(parse_line(9, "set r1 0x100 3").is_err());
}

#[test]
fn operand_count_must_match_exactly() {
    match parse_line(2, "mov r1 r2 r3") {
        Err(AsmError::WrongOperandCount {
            line: 2,
            expected: 2,
            found: 3,
            ..
        }) => {}
        other => panic!("expected WrongOperandCount, got {other:?}"),
    }
    assert!(parse_line(2, "add r1 r2").is_err());
    assert!(parse_line(2, "set r1 0x2").is_err());
}

#[test]
fn source_with_comments_assembles_to_one_instruction() {
    let source = "# hello\n\n   mov r1 r2\n";
    let mut out = Vec::new();
    let count = assemble(Cursor::new(source), &mut out).unwrap();
    assert_eq!(count, 1);

    let image = String::from_utf8(out).unwrap();
    let mut machine = Machine::new();
    assert_eq!(load_rom(&mut machine, &image).unwrap(), 1);
    assert_eq!(machine.rom.word(0), 0x0012);
}

#[test]
fn assembled_programs_load_densely_into_rom() {
    let source = "set r1 0x2 0x3\nseth r1 4 5\naddi r3 r4 5\nmov pc r0\n";
    let mut out = Vec::new();
    assert_eq!(assemble(Cursor::new(source), &mut out).unwrap(), 4);

    let image = String::from_utf8(out).unwrap();
    let mut machine = Machine::new();
    assert_eq!(load_rom(&mut machine, &image).unwrap(), 4);
    assert_eq!(machine.rom.word(0), 0x8123);
    assert_eq!(machine.rom.word(1), 0x9145);
    assert_eq!(machine.rom.word(2), 0x6345);
    assert_eq!(machine.rom.word(3), 0x0F00);
}

#[test]
fn assembled_program_runs_and_lights_the_screen() {
    // Same program as demos/stripe.s364: lights the top row column by
    // column through the output side-channel, then jumps past ROM.
    let source = "\
set  out0 0x8 0x0
seth out0 0xc 0x0
set  r1 0x0 0x0
set  r2 0x1 0x0
mov  out1 r1
addi r1 r1 1
sub  r3 r1 r2
set  r4 0x0 0x4
movx pc r4 r3
set  r4 0xf 0xf
seth r4 0xf 0xf
mov  pc r4
";
    let mut out = Vec::new();
    assert_eq!(assemble(Cursor::new(source), &mut out).unwrap(), 12);

    let image = String::from_utf8(out).unwrap();
    let mut machine = Machine::new();
    load_rom(&mut machine, &image).unwrap();

    let mut fuel = 200;
    while !machine.halted() && fuel > 0 {
        machine.step();
        fuel -= 1;
    }
    assert!(machine.halted());
    assert!(machine.screen().columns().iter().all(|&column| column == 0x80));
}

#[test]
fn errors_stop_the_assembly() {
    let source = "mov r1 r2\nbogus r1\n";
    let mut out = Vec::new();
    match assemble(Cursor::new(source), &mut out) {
        Err(AsmError::UnknownMnemonic { line: 2, .. }) => {}
        other => panic!("expected UnknownMnemonic, got {other:?}"),
    }
    assert!(out.is_empty());
}
