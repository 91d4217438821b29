//! Turns raw ROM bytes back into assembly text.
//!
//! One line per instruction: three spaces, uppercase mnemonic, a space,
//! then the operand. `Val`-mode operands are printed as `#0x` followed by
//! the raw byte in hex; `RelX`/`RelY` variants of `LDA` get a trailing
//! `,x`/`,y`. Bytes that don't land on an opcode boundary (because a
//! preceding multi-byte instruction ran past them) are skipped, matching
//! how the original decoder simply advances past each instruction's width.

use std::fmt::Write as _;

use octo_core::isa::{self, AddrMode};

/// Disassembles `rom` into one line of text per decoded instruction.
pub fn disassemble(rom: &[u8]) -> String {
    let mut out = String::new();
    let mut i = 0usize;

    while i < rom.len() {
        let op = rom[i];
        let Some(info) = isa::opcode_info(op) else {
            i += 1;
            continue;
        };

        let width = info.mode.operand_width();
        if i + width >= rom.len() && width > 0 {
            break;
        }

        let _ = write!(out, "   {} ", info.mnemonic);

        match info.mode {
            AddrMode::None => {}
            AddrMode::Val => {
                let _ = write!(out, "#0x{:02x}", rom[i + 1]);
            }
            AddrMode::Addr | AddrMode::RelX | AddrMode::RelY => {
                let _ = write!(out, "{:02x}{:02x}", rom[i + 1], rom[i + 2]);
                match op {
                    x if x == isa::OPRAX_LDA => out.push_str(",x"),
                    x if x == isa::OPRAY_LDA => out.push_str(",y"),
                    _ => {}
                }
            }
        }

        out.push('\n');
        i += 1 + width;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disassembles_nop() {
        assert_eq!(disassemble(&[isa::OP_NOP]), "   NOP \n");
    }

    #[test]
    fn disassembles_immediate_lda() {
        assert_eq!(disassemble(&[isa::OPIV_LDA, 0x2a]), "   LDA #0x2a\n");
    }

    #[test]
    fn disassembles_indexed_lda() {
        assert_eq!(disassemble(&[isa::OPRAX_LDA, 0x01, 0x00]), "   LDA 0100,x\n");
    }

    #[test]
    fn skips_unknown_bytes() {
        assert_eq!(disassemble(&[0xFF, isa::OP_NOP]), "   NOP \n");
    }
}
