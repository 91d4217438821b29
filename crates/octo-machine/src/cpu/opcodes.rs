//! Re-exports of the ISA descriptor table the dispatcher switches on.
//!
//! `octo-core` owns the authoritative table; nothing here duplicates it.

pub use octo_core::isa::*;
