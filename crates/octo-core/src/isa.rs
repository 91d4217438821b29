//! The instruction set architecture descriptor table.
//!
//! This is the single authoritative source for opcode numbers, mnemonics,
//! addressing modes, argument widths, and cycle counts. The assembler's
//! parser, the CPU's dispatcher, and the disassembler all read from this
//! table rather than keeping their own copies — any drift here breaks
//! every ROM the assembler produces.

/// Addressing mode of an opcode, fixed at table-construction time.
///
/// `Rel` variants are operand-width/layout-identical to `Addr` at runtime
/// (both carry a 16-bit big-endian address); the distinction exists only
/// so the disassembler can print `,x`/`,y` on the right mnemonic variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// No operand.
    None,
    /// 8-bit immediate value.
    Val,
    /// 16-bit immediate address.
    Addr,
    /// 16-bit address relative to X (disassembly-only distinction from `Addr`).
    RelX,
    /// 16-bit address relative to Y (disassembly-only distinction from `Addr`).
    RelY,
}

impl AddrMode {
    /// Number of operand bytes this mode contributes to an encoded instruction.
    pub const fn operand_width(self) -> usize {
        match self {
            AddrMode::None => 0,
            AddrMode::Val => 1,
            AddrMode::Addr | AddrMode::RelX | AddrMode::RelY => 2,
        }
    }
}

/// One row of the ISA table: mnemonic, addressing mode, argument width, cycles.
#[derive(Debug, Clone, Copy)]
pub struct OpInfo {
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub cycles: u8,
}

macro_rules! isa_table {
    ($($code:expr => $name:ident, $mnemonic:literal, $mode:expr, $cycles:expr;)*) => {
        $(pub const $name: u8 = $code;)*

        pub const OP_COUNT: usize = 0x2F;

        pub const OPCODES: [OpInfo; OP_COUNT] = [
            $(OpInfo { mnemonic: $mnemonic, mode: $mode, cycles: $cycles },)*
        ];
    };
}

isa_table! {
    0x00 => OP_NOP,     "NOP", AddrMode::None, 2;

    0x01 => OP_ADX,     "ADX", AddrMode::None, 3;
    0x02 => OP_ADY,     "ADY", AddrMode::None, 3;
    0x03 => OP_SUX,     "SUX", AddrMode::None, 3;
    0x04 => OP_SUY,     "SUY", AddrMode::None, 3;
    0x05 => OPIV_LDA,   "LDA", AddrMode::Val,  3;
    0x06 => OPIA_STA,   "STA", AddrMode::Addr, 3;
    0x07 => OPIV_ADD,   "ADD", AddrMode::Val,  4;
    0x08 => OPIV_SUB,   "SUB", AddrMode::Val,  4;

    0x09 => OP_INA,     "INA", AddrMode::None, 2;
    0x0A => OP_INX,     "INX", AddrMode::None, 2;
    0x0B => OP_INY,     "INY", AddrMode::None, 2;
    0x0C => OP_DEA,     "DEA", AddrMode::None, 2;
    0x0D => OP_DEX,     "DEX", AddrMode::None, 2;
    0x0E => OP_DEY,     "DEY", AddrMode::None, 2;
    0x0F => OP_PUA,     "PUA", AddrMode::None, 3;
    0x10 => OP_PPA,     "PPA", AddrMode::None, 3;

    0x11 => OP_CMP,     "CMP", AddrMode::Val,  4;
    0x12 => OP_BIE,     "BIE", AddrMode::Addr, 2;
    0x13 => OP_BIN,     "BIN", AddrMode::Addr, 2;
    0x14 => OP_BIP,     "BIP", AddrMode::Addr, 2;
    0x15 => OP_JMP,     "JMP", AddrMode::Addr, 2;
    0x16 => OP_CAL,     "CAL", AddrMode::Addr, 3;
    0x17 => OP_RET,     "RET", AddrMode::None, 3;
    0x18 => OP_XOR,     "XOR", AddrMode::Val,  3;

    0x19 => OP_INT,     "INT", AddrMode::Val,  2;
    0x1A => OPIA_LDA,   "LDA", AddrMode::Addr, 3;
    0x1B => OPIV_LDX,   "LDX", AddrMode::Val,  3;
    0x1C => OPIV_LDY,   "LDY", AddrMode::Val,  3;
    0x1D => OPRAX_LDA,  "LDA", AddrMode::RelX, 4;
    0x1E => OPRAY_LDA,  "LDA", AddrMode::RelY, 4;
    0x1F => OP_TXA,     "TXA", AddrMode::None, 2;
    0x20 => OP_TYA,     "TYA", AddrMode::None, 2;

    0x21 => OP_AND,     "AND", AddrMode::Val,  3;
    0x22 => OP_INV,     "INV", AddrMode::None, 3;
    0x23 => OP_SAL,     "SAL", AddrMode::Val,  3;
    0x24 => OP_SAR,     "SAR", AddrMode::Val,  3;
    0x25 => OP_ROR,     "ROL", AddrMode::None, 3;
    0x26 => OP_ROL,     "ROR", AddrMode::None, 3;
    0x27 => OP_TAX,     "TAX", AddrMode::None, 2;
    0x28 => OP_TAY,     "TAY", AddrMode::None, 2;

    0x29 => OP_TXY,     "TXY", AddrMode::None, 2;
    0x2A => OP_TYX,     "TYX", AddrMode::None, 2;
    0x2B => OP_CMX,     "CMX", AddrMode::Val,  4;
    0x2C => OP_CMY,     "CMY", AddrMode::Val,  4;
    0x2D => OP_BNE,     "BNE", AddrMode::Addr, 2;
    0x2E => OP_AOR,     "AOR", AddrMode::Val,  3;
}

/// Looks up an opcode's descriptor row, if it names a real instruction.
pub fn opcode_info(opcode: u8) -> Option<&'static OpInfo> {
    OPCODES.get(opcode as usize)
}

/// Finds every opcode whose mnemonic matches (case-insensitively), in
/// ascending opcode-number order. Used by the parser to narrow a mnemonic
/// to a single opcode once the operand shape is known.
pub fn variants_for(mnemonic: &str) -> impl Iterator<Item = u8> {
    let mnemonic = mnemonic.to_ascii_uppercase();
    (0u8..OP_COUNT as u8).filter(move |&op| OPCODES[op as usize].mnemonic == mnemonic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lda_has_four_variants() {
        let count = variants_for("lda").count();
        assert_eq!(count, 4);
    }

    #[test]
    fn opiv_lda_is_opcode_five() {
        assert_eq!(OPIV_LDA, 0x05);
        assert_eq!(OPCODES[0x05].mnemonic, "LDA");
        assert_eq!(OPCODES[0x05].mode, AddrMode::Val);
    }

    #[test]
    fn operand_widths_match_mode() {
        assert_eq!(AddrMode::None.operand_width(), 0);
        assert_eq!(AddrMode::Val.operand_width(), 1);
        assert_eq!(AddrMode::Addr.operand_width(), 2);
        assert_eq!(AddrMode::RelX.operand_width(), 2);
    }
}
