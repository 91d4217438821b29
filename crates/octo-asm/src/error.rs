//! Assembler error taxonomy.
//!
//! All errors are fatal: the first one encountered is printed and the
//! process exits with status 1. There is no recovery and no accumulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssemblerError>;

#[derive(Error, Debug)]
pub enum AssemblerError {
    #[error("error [line: {line}]: {message}")]
    Syntax { line: u32, message: String },

    #[error("error [line: {line}]: unknown opcode")]
    UnknownOpcode { line: u32 },

    #[error("error [line: {line}]: opcode expected argument")]
    MissingArgument { line: u32 },

    #[error("error [line: {line}]: found same identifier for label and a macro: {name}")]
    Redefinition { line: u32, name: String },

    #[error("error [line: {line}]: opcode uses undefined symbol: {name}")]
    UnresolvedSymbol { line: u32, name: String },

    #[error("error [line: {line}]: opcode argument is too big [max: 255]: {name}")]
    ImmediateTooLarge { line: u32, name: String },

    #[error("error [line: {line}]: cannot include file: {path}")]
    Include { line: u32, path: String },
}

impl AssemblerError {
    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}
