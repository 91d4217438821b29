//! Second pass: patches every unresolved record and emits the final ROM bytes.

use crate::error::{AssemblerError, Result};
use crate::record::{OpMode, OpRecord};
use crate::symbols::{Resolved, SymbolTables};

/// Walks the program vector, resolving any record still carrying a symbol
/// name, then serializes the whole thing to bytes in program order.
pub fn run(program: &[OpRecord], symbols: &SymbolTables) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for record in program {
        match record.mode {
            OpMode::None => out.push(record.code),
            OpMode::Addr => emit_addr(&mut out, record.code, record.argument),
            OpMode::Val => emit_val(&mut out, record.code, record.argument),
            OpMode::UnresolvedAddr => {
                let value = resolve(&record.arg_id, symbols, record.line)?;
                emit_addr(&mut out, record.code, value);
            }
            OpMode::UnresolvedVal => {
                let (name, select) = split_byte_select(&record.arg_id);
                let value = resolve(name, symbols, record.line)?;
                let byte = match select {
                    Some(true) => (value >> 8) & 0xFF,
                    Some(false) => value & 0xFF,
                    None => value,
                };
                if byte & 0xFF00 != 0 {
                    return Err(AssemblerError::ImmediateTooLarge {
                        line: record.line,
                        name: name.to_string(),
                    });
                }
                emit_val(&mut out, record.code, byte);
            }
        }
    }

    Ok(out)
}

/// Splits a deferred `arg_id` into its bare symbol name and an optional
/// high(`true`)/low(`false`) byte-select flag.
fn split_byte_select(arg_id: &str) -> (&str, Option<bool>) {
    match arg_id.chars().next() {
        Some('<') => (&arg_id[1..], Some(true)),
        Some('>') => (&arg_id[1..], Some(false)),
        _ => (arg_id, None),
    }
}

fn resolve(name: &str, symbols: &SymbolTables, line: u32) -> Result<u16> {
    match symbols.resolve(name) {
        Resolved::Both => Err(AssemblerError::Redefinition {
            line,
            name: name.to_string(),
        }),
        Resolved::Constant(v) | Resolved::Label(v) => Ok(v),
        Resolved::None => Err(AssemblerError::UnresolvedSymbol {
            line,
            name: name.to_string(),
        }),
    }
}

fn emit_addr(out: &mut Vec<u8>, code: u8, value: u16) {
    out.push(code);
    out.push((value >> 8) as u8);
    out.push(value as u8);
}

fn emit_val(out: &mut Vec<u8>, code: u8, value: u16) {
    out.push(code);
    out.push(value as u8);
}
