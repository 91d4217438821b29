//! The two disjoint symbol tables: constants and labels.

use std::collections::HashMap;

use crate::error::{AssemblerError, Result};

/// Outcome of looking a name up across both tables at once.
pub enum Resolved {
    Constant(u16),
    Label(u16),
    /// The name is registered in both tables — always an error to use.
    Both,
    None,
}

#[derive(Debug, Default)]
pub struct SymbolTables {
    pub constants: HashMap<String, u16>,
    pub labels: HashMap<String, u16>,
}

impl SymbolTables {
    pub fn resolve(&self, name: &str) -> Resolved {
        match (self.constants.get(name), self.labels.get(name)) {
            (Some(_), Some(_)) => Resolved::Both,
            (Some(&v), None) => Resolved::Constant(v),
            (None, Some(&v)) => Resolved::Label(v),
            (None, None) => Resolved::None,
        }
    }

    pub fn insert_constant(&mut self, line: u32, name: &str, value: u16) -> Result<()> {
        if self.labels.contains_key(name) {
            return Err(AssemblerError::Redefinition {
                line,
                name: name.to_string(),
            });
        }
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    pub fn insert_label(&mut self, line: u32, name: &str, value: u16) -> Result<()> {
        if self.constants.contains_key(name) {
            return Err(AssemblerError::Redefinition {
                line,
                name: name.to_string(),
            });
        }
        self.labels.insert(name.to_string(), value);
        Ok(())
    }
}
