//! Two-pass assembler and disassembler for the octo-8bit instruction set.

pub mod disassembler;
pub mod error;
pub mod first_pass;
pub mod lexer;
pub mod record;
pub mod second_pass;
pub mod symbols;

pub use disassembler::disassemble;
pub use error::{AssemblerError, Result};
pub use symbols::SymbolTables;

/// Assembles source text into ROM bytes, running both passes.
pub fn assemble(source: &str) -> Result<Vec<u8>> {
    let first_pass::FirstPassOutput { program, symbols } = first_pass::run(source)?;
    second_pass::run(&program, &symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_nop() {
        assert_eq!(assemble("   NOP\n").unwrap(), vec![0x00]);
    }

    #[test]
    fn assembles_immediate_lda() {
        assert_eq!(assemble("   LDA #42\n").unwrap(), vec![0x05, 42]);
    }

    #[test]
    fn assembles_forward_label_reference() {
        let source = "   JMP target\ntarget:\n   NOP\n";
        let bytes = assemble(source).unwrap();
        assert_eq!(bytes, vec![0x15, 0x00, 0x03, 0x00]);
    }

    #[test]
    fn assembles_constant_then_use() {
        let source = "FOO = $10\n   LDA #FOO\n";
        assert_eq!(assemble(source).unwrap(), vec![0x05, 0x10]);
    }

    #[test]
    fn lda_indexed_by_x_rewrites_opcode() {
        let source = "target = $0100\n   LDA target,x\n";
        assert_eq!(assemble(source).unwrap(), vec![0x1D, 0x01, 0x00]);
    }

    #[test]
    fn lda_literal_address_ignores_index_suffix() {
        let source = "   LDA $0100,x\n";
        assert_eq!(assemble(source).unwrap(), vec![0x1A, 0x01, 0x00]);
    }

    #[test]
    fn lda_high_byte_select_on_label() {
        let source = "   LDA <target\ntarget:\n   NOP\n";
        let bytes = assemble(source).unwrap();
        assert_eq!(bytes, vec![0x05, 0x00, 0x00]);
    }

    #[test]
    fn redefinition_across_tables_errors() {
        let source = "FOO = $10\nFOO:\n   NOP\n";
        assert!(assemble(source).is_err());
    }

    #[test]
    fn unknown_opcode_errors() {
        assert!(assemble("   ZZZ\n").is_err());
    }

    #[test]
    fn immediate_constant_too_large_errors() {
        let source = "FOO = $0200\n   LDA #FOO\n";
        assert!(matches!(assemble(source), Err(AssemblerError::ImmediateTooLarge { .. })));
    }

    #[test]
    fn disassemble_roundtrips_nop_and_immediate() {
        let bytes = assemble("   NOP\n   LDA #42\n").unwrap();
        let text = disassemble(&bytes);
        assert_eq!(text, "   NOP \n   LDA #0x2a\n");
    }
}
