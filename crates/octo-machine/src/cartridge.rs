//! ROM loading and the trivial cartridge paging scheme.
//!
//! A ROM has no header (§6). The first 32 KiB load straight into the
//! `0x7FFF..=0xFFFF` window; anything past that sits in an off-map buffer,
//! addressed by the bus's `cart_page` register when it is nonzero. Nothing
//! in this instruction set currently writes that register — bank switching
//! is wired up but inert until a future opcode or MMIO port drives it.

use octo_core::{EmulatorError, Result};

pub const ROM_START: u16 = 0x7FFF;
pub const ROM_PAGE_SIZE: usize = 0x8000;

/// A loaded ROM image, split into its RAM-resident first page and any
/// additional pages held off-map.
#[derive(Debug, Default)]
pub struct Cartridge {
    /// Bytes of the first `ROM_PAGE_SIZE`, to be copied into the bus's RAM
    /// window at `ROM_START`.
    pub first_page: Vec<u8>,
    /// Remaining bytes, indexed by `address + ROM_PAGE_SIZE * (page - 1)`
    /// when `cart_page != 0`.
    pub extra_pages: Vec<u8>,
}

impl Cartridge {
    /// Splits a flat ROM image into its resident page and paged buffer.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(EmulatorError::RomLoadError("ROM file is empty".into()));
        }
        if bytes.len() > ROM_PAGE_SIZE {
            let (first, rest) = bytes.split_at(ROM_PAGE_SIZE);
            Ok(Self {
                first_page: first.to_vec(),
                extra_pages: rest.to_vec(),
            })
        } else {
            Ok(Self {
                first_page: bytes.to_vec(),
                extra_pages: Vec::new(),
            })
        }
    }

    pub fn page_count(&self) -> u8 {
        (1 + self.extra_pages.len() / ROM_PAGE_SIZE) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_rom_has_no_extra_pages() {
        let cart = Cartridge::load(&[1, 2, 3]).unwrap();
        assert_eq!(cart.first_page, vec![1, 2, 3]);
        assert!(cart.extra_pages.is_empty());
    }

    #[test]
    fn oversized_rom_splits_at_page_boundary() {
        let bytes = vec![0xAB; ROM_PAGE_SIZE + 10];
        let cart = Cartridge::load(&bytes).unwrap();
        assert_eq!(cart.first_page.len(), ROM_PAGE_SIZE);
        assert_eq!(cart.extra_pages.len(), 10);
    }

    #[test]
    fn empty_rom_errors() {
        assert!(Cartridge::load(&[]).is_err());
    }
}
