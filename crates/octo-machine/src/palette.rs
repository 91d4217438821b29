//! The fixed 64-color VGA-style palette.
//!
//! Every pixel the PPU emits is a palette index in `0..64`; this table is
//! the only place those indices turn into RGBA8888. The default-background
//! color derived from the GPU control register (§4.4) indexes into this
//! same table.

/// 64 colors, packed `0xRRGGBBAA`, in palette-index order.
pub const VGA_PALETTE: [u32; 64] = [
    0x464646ff, 0x00065aff, 0x000678ff, 0x020673ff,
    0x35034cff, 0x57000eff, 0x5a0000ff, 0x410000ff,
    0x120200ff, 0x001400ff, 0x001e00ff, 0x001e00ff,
    0x001521ff, 0x000000ff, 0x000000ff, 0x000000ff,
    0x9d9d9dff, 0x004ab9ff, 0x0530e1ff, 0x5718daff,
    0x9f07a7ff, 0xcc0255ff, 0xcf0b00ff, 0xa42300ff,
    0x5c3f00ff, 0x0b5800ff, 0x006600ff, 0x006713ff,
    0x005e6eff, 0x000000ff, 0x000000ff, 0x000000ff,
    0xfeffffff, 0x1f9effff, 0x5376ffff, 0x9865ffff,
    0xfc67ffff, 0xff6cb3ff, 0xff7466ff, 0xff8014ff,
    0xc49a00ff, 0x71b300ff, 0x28c421ff, 0x00c874ff,
    0x00bfd0ff, 0x2b2b2bff, 0x000000ff, 0x000000ff,
    0xfeffffff, 0x9ed5ffff, 0xafc0ffff, 0xd0b8ffff,
    0xfebfffff, 0xffc0e0ff, 0xffc3bdff, 0xffca9cff,
    0xe7d58bff, 0xc5df8eff, 0xa6e6a3ff, 0x94e8c5ff,
    0x92e4ebff, 0xa7a7a7ff, 0x000000ff, 0x000000ff,
];

/// Default-background color, indexed by the low 3 bits of the GPU control
/// register: black, white, red, green, blue, light blue, yellow, magenta.
pub const DEFAULT_BG_COLORS: [u8; 8] = [13, 46, 21, 41, 33, 47, 53, 34];

/// Unpacks a palette index into `(r, g, b, a)`.
pub fn rgba(index: u8) -> (u8, u8, u8, u8) {
    let packed = VGA_PALETTE[index as usize & 0x3F];
    (
        (packed >> 24) as u8,
        (packed >> 16) as u8,
        (packed >> 8) as u8,
        packed as u8,
    )
}

/// Packs a palette index into a `0x00RRGGBB` word, the layout `minifb`
/// expects for its window buffer.
pub fn to_0rgb(index: u8) -> u32 {
    let (r, g, b, _a) = rgba(index);
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_64_entries() {
        assert_eq!(VGA_PALETTE.len(), 64);
    }

    #[test]
    fn black_is_default_for_ctrl_zero() {
        assert_eq!(DEFAULT_BG_COLORS[0], 13);
    }
}
