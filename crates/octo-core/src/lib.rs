//! Core traits and types shared by the assembler and the machine runtime.
//!
//! This crate owns the one thing both halves of the toolchain must agree
//! on byte-for-byte: the ISA descriptor table. It also carries the small
//! set of abstractions (`MemoryBus`, `Cpu`, `Emulator`, controller state)
//! that the concrete machine crate implements.

pub mod error;
pub mod isa;
pub mod memory_bus;
pub mod traits;
pub mod types;

pub use error::{EmulatorError, Result};
pub use isa::{opcode_info, variants_for, AddrMode, OpInfo, OPCODES, OP_COUNT};
pub use memory_bus::MemoryBus;
pub use traits::{Cpu, Emulator};
pub use types::{Button, ControllerState};
