//! Error types shared by the machine runtime.

use thiserror::Error;

/// Result type for emulator operations.
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Errors that can occur while loading or running a ROM.
///
/// Only ROM loading is fatal. Unmapped memory accesses, unknown opcodes,
/// and stack wrap are silent at runtime by design — a finished ROM is
/// expected to be well-formed and the CPU has no trap mechanism beyond
/// `INT`.
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("invalid memory address: 0x{0:04X}")]
    InvalidAddress(u16),

    #[error("invalid opcode: 0x{0:02X}")]
    InvalidOpcode(u8),

    #[error("ROM loading error: {0}")]
    RomLoadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("emulation error: {0}")]
    Other(String),
}
