//! Per-opcode execution semantics.

use std::io::Write;

use octo_core::isa;
use octo_core::{MemoryBus, Result};

use super::Cpu;

impl<M: MemoryBus> Cpu<M> {
    /// Executes one already-fetched opcode. Unknown opcodes are silent
    /// no-ops (§7) -- a finished ROM is expected to be well-formed.
    pub(super) fn dispatch(&mut self, opcode: u8) -> Result<()> {
        match opcode {
            isa::OP_NOP => {}

            isa::OP_ADX => {
                self.set_overflow(self.a, self.x);
                self.a = self.a.wrapping_add(self.x);
                self.set_zero(self.a);
            }
            isa::OP_ADY => {
                self.set_overflow(self.a, self.y);
                self.a = self.a.wrapping_add(self.y);
                self.set_zero(self.a);
            }
            isa::OP_SUX => {
                self.set_underflow(self.a, self.x);
                self.a = self.a.wrapping_sub(self.x);
                self.set_zero(self.a);
            }
            isa::OP_SUY => {
                self.set_underflow(self.a, self.y);
                self.a = self.a.wrapping_sub(self.y);
                self.set_zero(self.a);
            }
            isa::OPIV_LDA => {
                self.a = self.fetch_byte();
                self.set_zero(self.a);
            }
            isa::OPIA_STA => {
                let addr = self.fetch_addr();
                self.bus.write(addr, self.a);
            }
            isa::OPIV_ADD => {
                let arg = self.fetch_byte();
                self.set_overflow(self.a, arg);
                self.a = self.a.wrapping_add(arg);
                self.set_zero(self.a);
            }
            isa::OPIV_SUB => {
                let arg = self.fetch_byte();
                self.set_underflow(self.a, arg);
                self.a = self.a.wrapping_sub(arg);
                self.set_zero(self.a);
            }

            isa::OP_INA => {
                self.set_overflow(self.a, 1);
                self.a = self.a.wrapping_add(1);
                self.set_zero(self.a);
            }
            isa::OP_INX => {
                self.set_overflow(self.x, 1);
                self.x = self.x.wrapping_add(1);
                self.set_zero(self.x);
            }
            isa::OP_INY => {
                self.set_overflow(self.y, 1);
                self.y = self.y.wrapping_add(1);
                self.set_zero(self.y);
            }
            isa::OP_DEA => {
                self.set_underflow(self.a, 1);
                self.a = self.a.wrapping_sub(1);
                self.set_zero(self.a);
            }
            isa::OP_DEX => {
                self.set_underflow(self.x, 1);
                self.x = self.x.wrapping_sub(1);
                self.set_zero(self.x);
            }
            isa::OP_DEY => {
                self.set_underflow(self.y, 1);
                self.y = self.y.wrapping_sub(1);
                self.set_zero(self.y);
            }
            isa::OP_PUA => self.push(self.a),
            isa::OP_PPA => {
                self.a = self.pop();
                self.set_zero(self.a);
            }

            isa::OP_CMP => {
                let arg = self.fetch_byte();
                self.set_underflow(self.a, arg);
                self.set_zero(self.a.wrapping_sub(arg));
            }
            isa::OP_BIE => self.branch_if(self.flags.contains(super::Flags::ZERO)),
            isa::OP_BNE => self.branch_if(!self.flags.contains(super::Flags::ZERO)),
            isa::OP_BIN => self.branch_if(self.flags.contains(super::Flags::UNDERFLOW)),
            isa::OP_BIP => self.branch_if(!self.flags.contains(super::Flags::UNDERFLOW)),
            isa::OP_JMP => {
                let addr = self.fetch_addr();
                self.pc = addr;
            }

            isa::OP_CAL => {
                let addr = self.fetch_addr();
                self.push((self.pc >> 8) as u8);
                self.push((self.pc & 0xFF) as u8);
                self.pc = addr;
            }
            isa::OP_RET => {
                let lo = self.pop() as u16;
                let hi = self.pop() as u16;
                self.pc = (hi << 8) | lo;
            }

            isa::OP_XOR => {
                let arg = self.fetch_byte();
                self.a ^= arg;
                self.set_zero(self.a);
            }

            isa::OP_INT => {
                let arg = self.fetch_byte();
                match arg {
                    0x01 => self.flags.insert(super::Flags::TERMINATE),
                    0x10 => {
                        let _ = std::io::stdout().write_all(&[self.a]);
                    }
                    _ => {}
                }
            }

            isa::OPIA_LDA => {
                let addr = self.fetch_addr();
                self.a = self.bus.read(addr);
                self.set_zero(self.a);
            }
            isa::OPIV_LDX => {
                self.x = self.fetch_byte();
                self.set_zero(self.x);
            }
            isa::OPIV_LDY => {
                self.y = self.fetch_byte();
                self.set_zero(self.y);
            }
            isa::OPRAX_LDA => {
                let addr = self.fetch_addr().wrapping_add(self.x as u16);
                self.a = self.bus.read(addr);
                self.set_zero(self.a);
            }
            isa::OPRAY_LDA => {
                let addr = self.fetch_addr().wrapping_add(self.y as u16);
                self.a = self.bus.read(addr);
                self.set_zero(self.a);
            }
            isa::OP_TXA => {
                self.a = self.x;
                self.set_zero(self.a);
            }
            isa::OP_TYA => {
                self.a = self.y;
                self.set_zero(self.a);
            }

            isa::OP_AND => {
                let arg = self.fetch_byte();
                self.a &= arg;
                self.set_zero(self.a);
            }
            isa::OP_INV => {
                self.a = !self.a;
                self.set_zero(self.a);
            }
            isa::OP_SAL => {
                let arg = self.fetch_byte();
                self.a = self.a.wrapping_shl(arg as u32);
                self.set_zero(self.a);
            }
            isa::OP_SAR => {
                let arg = self.fetch_byte();
                self.a = self.a.wrapping_shr(arg as u32);
                self.set_zero(self.a);
            }
            isa::OP_ROR => {
                self.a = (self.a << 7) | (self.a >> 1);
                self.set_zero(self.a);
            }
            isa::OP_ROL => {
                self.a = (self.a >> 7) | (self.a << 1);
                self.set_zero(self.a);
            }
            isa::OP_TAX => {
                self.x = self.a;
                self.set_zero(self.x);
            }
            isa::OP_TAY => {
                self.y = self.a;
                self.set_zero(self.y);
            }

            isa::OP_TXY => {
                self.y = self.x;
                self.set_zero(self.y);
            }
            isa::OP_TYX => {
                self.x = self.y;
                self.set_zero(self.x);
            }
            isa::OP_CMX => {
                let arg = self.fetch_byte();
                self.set_underflow(self.x, arg);
                self.set_zero(self.x.wrapping_sub(arg));
            }
            isa::OP_CMY => {
                let arg = self.fetch_byte();
                self.set_underflow(self.y, arg);
                self.set_zero(self.y.wrapping_sub(arg));
            }
            isa::OP_AOR => {
                let arg = self.fetch_byte();
                self.a |= arg;
                self.set_zero(self.a);
            }

            _ => {
                // Byte doesn't name a real instruction; silently ignored.
            }
        }
        Ok(())
    }

    #[inline]
    fn branch_if(&mut self, take: bool) {
        if take {
            self.pc = self.fetch_addr();
        } else {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}
