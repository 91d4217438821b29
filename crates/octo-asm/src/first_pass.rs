//! First pass: builds the program vector and the two symbol tables.
//!
//! Symbols referenced in operands are resolved eagerly if already defined;
//! otherwise the record is marked unresolved and retains the symbol name
//! for the second pass to patch in.

use octo_core::isa::{self, AddrMode};

use crate::error::{AssemblerError, Result};
use crate::lexer::{mnemonic_matches, parse_literal, take_indexable_token, take_token};
use crate::record::{OpMode, OpRecord};
use crate::symbols::{Resolved, SymbolTables};

pub struct FirstPassOutput {
    pub program: Vec<OpRecord>,
    pub symbols: SymbolTables,
}

pub fn run(source: &str) -> Result<FirstPassOutput> {
    let mut symbols = SymbolTables::default();
    let mut program = Vec::new();
    let mut user_ram_offset: u16 = 0;
    let mut current_byte: u32 = 0;

    for (idx, raw_line) in source.split('\n').enumerate() {
        let line_no = (idx + 1) as u32;
        let content = raw_line.trim_end_matches('\r');
        if content.is_empty() {
            continue;
        }

        let first = content.chars().next().unwrap();
        if first == ' ' || first == '\t' {
            let rest = content.trim_start_matches([' ', '\t']);
            if rest.is_empty() || rest.starts_with(';') {
                continue;
            }
            if let Some(directive) = rest.strip_prefix('.') {
                handle_directive(directive, line_no, &mut program, &mut user_ram_offset, &mut current_byte)?;
            } else {
                handle_instruction(rest, line_no, &symbols, &mut program, &mut current_byte)?;
            }
        } else if first == ';' {
            continue;
        } else {
            handle_symbol_def(content, line_no, &mut symbols, user_ram_offset, current_byte)?;
        }
    }

    Ok(FirstPassOutput { program, symbols })
}

fn handle_directive(
    directive: &str,
    line_no: u32,
    program: &mut Vec<OpRecord>,
    user_ram_offset: &mut u16,
    current_byte: &mut u32,
) -> Result<()> {
    if directive.len() >= 3 && &directive[..3] == "org" {
        let arg = directive[3..].trim_start_matches([' ', '\t']);
        let (token, _) = take_token(arg);
        let value =
            parse_literal(token).ok_or_else(|| AssemblerError::syntax(line_no, ".org has invalid argument"))?;
        *user_ram_offset = value as u16;
        return Ok(());
    }

    if directive.len() >= 6 && &directive[..6] == "incbin" {
        let arg = directive[6..].trim_start_matches([' ', '\t']);
        let path = arg
            .strip_prefix('"')
            .and_then(|rest| rest.find('"').map(|end| &rest[..end]))
            .ok_or_else(|| AssemblerError::syntax(line_no, ".incbin expects file"))?;
        let bytes = std::fs::read(path).map_err(|_| AssemblerError::Include {
            line: line_no,
            path: path.to_string(),
        })?;
        for byte in bytes {
            program.push(OpRecord::resolved(byte, OpMode::None, 0, line_no));
            *current_byte += 1;
        }
        return Ok(());
    }

    if directive.len() >= 2 && (&directive[..2] == "db" || &directive[..2] == "dw") {
        // Reserved but unimplemented: recognized, emits no bytes.
        return Ok(());
    }

    tracing::warn!(line = line_no, directive, "unrecognized directive, ignoring");
    Ok(())
}

fn handle_symbol_def(
    content: &str,
    line_no: u32,
    symbols: &mut SymbolTables,
    user_ram_offset: u16,
    current_byte: u32,
) -> Result<()> {
    let end = content
        .find([' ', '\t', '=', ':'])
        .unwrap_or(content.len());
    let name = &content[..end];
    let rest = &content[end..];

    if let Some(label_rest) = rest.strip_prefix(|c| c == ' ' || c == '\t') {
        return handle_symbol_def(&format!("{name}{}", label_rest.trim_start()), line_no, symbols, user_ram_offset, current_byte);
    }

    if rest.starts_with(':') {
        symbols.insert_label(line_no, name, user_ram_offset.wrapping_add(current_byte as u16))?;
        return Ok(());
    }

    if let Some(assign) = rest.strip_prefix('=') {
        let assign = assign.trim_start_matches([' ', '\t']);
        let (token, _) = take_token(assign);
        let value = parse_literal(token)
            .ok_or_else(|| AssemblerError::syntax(line_no, "constant expected a literal value"))?;
        symbols.insert_constant(line_no, name, value as u16)?;
        return Ok(());
    }

    Err(AssemblerError::syntax(
        line_no,
        "symbol definition line ends before : or = is seen",
    ))
}

fn handle_instruction(
    rest: &str,
    line_no: u32,
    symbols: &SymbolTables,
    program: &mut Vec<OpRecord>,
    current_byte: &mut u32,
) -> Result<()> {
    if rest.len() < 3 {
        return Err(AssemblerError::UnknownOpcode { line: line_no });
    }
    let mnemonic = &rest[..3];
    let opcode = (0..isa::OP_COUNT as u8)
        .find(|&op| mnemonic_matches(mnemonic, isa::OPCODES[op as usize].mnemonic))
        .ok_or(AssemblerError::UnknownOpcode { line: line_no })?;

    let info = &isa::OPCODES[opcode as usize];
    let operand = rest[3..].trim_start_matches([' ', '\t']);

    let record = match info.mode {
        AddrMode::None => OpRecord::resolved(opcode, OpMode::None, 0, line_no),
        AddrMode::Addr | AddrMode::RelX | AddrMode::RelY => {
            parse_address_operand(opcode, operand, line_no, symbols)?
        }
        AddrMode::Val => parse_value_operand(opcode, operand, line_no, symbols)?,
    };

    *current_byte += record.byte_len();
    program.push(record);
    Ok(())
}

fn parse_address_operand(opcode: u8, operand: &str, line_no: u32, symbols: &SymbolTables) -> Result<OpRecord> {
    if operand.starts_with('#') {
        return Err(AssemblerError::syntax(
            line_no,
            "opcode expected address as its argument",
        ));
    }
    let (token, _) = take_token(operand);
    if let Some(value) = parse_literal(token) {
        return Ok(OpRecord::resolved(opcode, OpMode::Addr, value as u16, line_no));
    }
    if token.is_empty() {
        return Err(AssemblerError::MissingArgument { line: line_no });
    }
    match symbols.resolve(token) {
        Resolved::Both => Err(AssemblerError::Redefinition {
            line: line_no,
            name: token.to_string(),
        }),
        Resolved::Constant(v) | Resolved::Label(v) => Ok(OpRecord::resolved(opcode, OpMode::Addr, v, line_no)),
        Resolved::None => Ok(OpRecord::unresolved(opcode, OpMode::UnresolvedAddr, token.to_string(), line_no)),
    }
}

fn parse_value_operand(opcode: u8, operand: &str, line_no: u32, symbols: &SymbolTables) -> Result<OpRecord> {
    if let Some(rest) = operand.strip_prefix('#') {
        return parse_immediate_value(opcode, rest, line_no, symbols);
    }
    // Only LDA's value-mode variant accepts a non-immediate operand; every
    // other value-mode opcode requires an explicit `#`.
    if opcode != isa::OPIV_LDA {
        return Err(AssemblerError::syntax(
            line_no,
            "opcode expected value as its argument",
        ));
    }
    parse_lda_non_immediate(operand, line_no, symbols)
}

fn parse_immediate_value(opcode: u8, operand: &str, line_no: u32, symbols: &SymbolTables) -> Result<OpRecord> {
    let (token, _) = take_token(operand);
    if let Some(value) = parse_literal(token) {
        return Ok(OpRecord::resolved(opcode, OpMode::Val, (value as u16) & 0xFF, line_no));
    }
    if token.is_empty() {
        return Err(AssemblerError::MissingArgument { line: line_no });
    }
    match symbols.resolve(token) {
        Resolved::Both => Err(AssemblerError::Redefinition {
            line: line_no,
            name: token.to_string(),
        }),
        Resolved::Constant(v) => {
            if v & 0xFF00 != 0 {
                return Err(AssemblerError::ImmediateTooLarge {
                    line: line_no,
                    name: token.to_string(),
                });
            }
            Ok(OpRecord::resolved(opcode, OpMode::Val, v, line_no))
        }
        Resolved::Label(_) | Resolved::None => Err(AssemblerError::UnresolvedSymbol {
            line: line_no,
            name: token.to_string(),
        }),
    }
}

/// Handles every non-`#` `LDA` operand shape: bare address, `,x`/`,y`
/// indexed address, and `<name`/`>name` byte-select — each may be a
/// literal, an already-defined symbol, or a forward reference.
fn parse_lda_non_immediate(operand: &str, line_no: u32, symbols: &SymbolTables) -> Result<OpRecord> {
    let (fetch_high_low, operand): (i8, &str) = match operand.chars().next() {
        Some('<') => (1, &operand[1..]),
        Some('>') => (-1, &operand[1..]),
        _ => (0, operand),
    };

    let (token, remainder) = take_indexable_token(operand);

    if let Some(value) = parse_literal(token) {
        return if fetch_high_low == 0 {
            Ok(OpRecord::resolved(isa::OPIA_LDA, OpMode::Addr, value as u16, line_no))
        } else {
            let byte = if fetch_high_low == 1 { (value >> 8) & 0xFF } else { value & 0xFF };
            Ok(OpRecord::resolved(isa::OPIV_LDA, OpMode::Val, byte as u16, line_no))
        };
    }

    if token.is_empty() {
        return Err(AssemblerError::MissingArgument { line: line_no });
    }

    let mut opcode = if fetch_high_low == 0 { isa::OPIA_LDA } else { isa::OPIV_LDA };
    if fetch_high_low == 0 {
        if let Some(suffix) = remainder.strip_prefix(',') {
            opcode = match suffix.chars().next() {
                Some('x') | Some('X') => isa::OPRAX_LDA,
                Some('y') | Some('Y') => isa::OPRAY_LDA,
                _ => return Err(AssemblerError::syntax(line_no, "opcode expected second argument")),
            };
        }
    }

    match symbols.resolve(token) {
        Resolved::Both => Err(AssemblerError::Redefinition {
            line: line_no,
            name: token.to_string(),
        }),
        Resolved::Constant(v) | Resolved::Label(v) => {
            if fetch_high_low == 0 {
                Ok(OpRecord::resolved(opcode, OpMode::Addr, v, line_no))
            } else {
                let byte = if fetch_high_low == 1 { (v >> 8) & 0xFF } else { v & 0xFF };
                Ok(OpRecord::resolved(isa::OPIV_LDA, OpMode::Val, byte, line_no))
            }
        }
        Resolved::None => {
            if fetch_high_low == 0 {
                Ok(OpRecord::unresolved(opcode, OpMode::UnresolvedAddr, token.to_string(), line_no))
            } else {
                let prefix = if fetch_high_low == 1 { "<" } else { ">" };
                Ok(OpRecord::unresolved(
                    isa::OPIV_LDA,
                    OpMode::UnresolvedVal,
                    format!("{prefix}{token}"),
                    line_no,
                ))
            }
        }
    }
}
