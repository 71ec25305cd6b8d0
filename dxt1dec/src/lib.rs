#![no_std]
//! A safe, no_std, pure Rust DXT1 (BC1) color block decoder.
//!
//! Endpoints are expanded from 565 by shifting only, without replicating the high bits,
//! and the two interpolated colors use truncating integer division.
//! Blocks are always decoded in the opaque 4 color mode.
//! The 3 color punch-through alpha mode selected by `c0 <= c1` is not supported.

/// The size of a compressed DXT1 block in bytes.
pub const BYTES_PER_BLOCK: usize = 8;

/// The number of bytes written for each decoded texel.
pub const BYTES_PER_TEXEL: usize = 3;

/// Expand a packed RGB565 `color` to 8 bits per channel as `[r, g, b]`.
pub fn unpack_565(color: u16) -> [u8; 3] {
    let b = ((color & 0x1F) as u32) << 3;
    let g = (((color >> 5) & 0x3F) as u32) << 2;
    let r = (((color >> 11) & 0x1F) as u32) << 3;

    // Clamp to the 8 bit range.
    [r.min(255) as u8, g.min(255) as u8, b.min(255) as u8]
}

/// Build the 4 entry palette for the endpoints `c0` and `c1`.
///
/// Entries 2 and 3 are 2/3 and 1/3 of the way from `c1` to `c0`.
pub fn palette(c0: u16, c1: u16) -> [[u8; 3]; 4] {
    let color0 = unpack_565(c0);
    let color1 = unpack_565(c1);

    let mut ref_colors = [color0, color1, [0u8; 3], [0u8; 3]];
    for c in 0..3 {
        let a = color0[c] as u32;
        let b = color1[c] as u32;
        // color_2 = 2/3*color_0 + 1/3*color_1
        ref_colors[2][c] = ((2 * a + b) / 3) as u8;
        // color_3 = 1/3*color_0 + 2/3*color_1
        ref_colors[3][c] = ((a + 2 * b) / 3) as u8;
    }
    ref_colors
}

/// Read the 2 bit palette index for the texel at column `x` and row `y`.
pub fn texel_index(indices: u32, x: usize, y: usize) -> usize {
    ((indices >> (2 * (y * 4 + x))) & 0x03) as usize
}

/// Decode a single 8 byte block to RGB8 texels.
///
/// Each row of 4 texels is written to `decompressed_block` starting at a multiple
/// of `destination_pitch` bytes.
///
/// # Panics
/// Panics if `decompressed_block` is shorter than `3 * destination_pitch + 12` bytes.
pub fn bc1_rgb(
    compressed_block: &[u8; BYTES_PER_BLOCK],
    decompressed_block: &mut [u8],
    destination_pitch: usize,
) {
    let c0 = u16::from_le_bytes([compressed_block[0], compressed_block[1]]);
    let c1 = u16::from_le_bytes([compressed_block[2], compressed_block[3]]);
    let ref_colors = palette(c0, c1);

    let mut color_indices = u32::from_le_bytes([
        compressed_block[4],
        compressed_block[5],
        compressed_block[6],
        compressed_block[7],
    ]);

    for i in 0..4 {
        for j in 0..4 {
            let idx = (color_indices & 0x03) as usize;
            let start = i * destination_pitch + j * BYTES_PER_TEXEL;
            decompressed_block[start..start + BYTES_PER_TEXEL].copy_from_slice(&ref_colors[idx]);
            color_indices >>= 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(c0: u16, c1: u16, indices: u32) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..2].copy_from_slice(&c0.to_le_bytes());
        bytes[2..4].copy_from_slice(&c1.to_le_bytes());
        bytes[4..8].copy_from_slice(&indices.to_le_bytes());
        bytes
    }

    #[test]
    fn unpack_565_primaries() {
        assert_eq!([248, 0, 0], unpack_565(0xF800));
        assert_eq!([0, 252, 0], unpack_565(0x07E0));
        assert_eq!([0, 0, 248], unpack_565(0x001F));
        assert_eq!([248, 252, 248], unpack_565(0xFFFF));
        assert_eq!([0, 0, 0], unpack_565(0x0000));
    }

    #[test]
    fn unpack_565_does_not_replicate_bits() {
        // 0b00001_000001_00001 would expand to 8, 4, 8 with bit replication.
        assert_eq!([8, 4, 8], unpack_565(0b00001_000001_00001));
        assert_eq!([56, 0, 0], unpack_565(0x3800));
    }

    #[test]
    fn palette_truncates() {
        // Red channel: 248 and 0.
        // (2 * 248 + 0) / 3 = 165.33, (248 + 0) / 3 = 82.67
        let p = palette(0xF800, 0x0000);
        assert_eq!([248, 0, 0], p[0]);
        assert_eq!([0, 0, 0], p[1]);
        assert_eq!([165, 0, 0], p[2]);
        assert_eq!([82, 0, 0], p[3]);
    }

    #[test]
    fn palette_ignores_endpoint_order() {
        // c0 <= c1 would select the 3 color mode in the full format.
        let p = palette(0x0000, 0xF800);
        assert_eq!([82, 0, 0], p[2]);
        assert_eq!([165, 0, 0], p[3]);
    }

    #[test]
    fn texel_index_bit_offsets() {
        let indices = 0b11_10_01_00;
        assert_eq!(0, texel_index(indices, 0, 0));
        assert_eq!(1, texel_index(indices, 1, 0));
        assert_eq!(2, texel_index(indices, 2, 0));
        assert_eq!(3, texel_index(indices, 3, 0));
        assert_eq!(3, texel_index(0xC000_0000, 3, 3));
    }

    #[test]
    fn bc1_rgb_all_endpoint_a() {
        let mut decompressed = [0u8; 48];
        bc1_rgb(&block(0xF800, 0x001F, 0), &mut decompressed, 12);
        for texel in decompressed.chunks_exact(3) {
            assert_eq!([248, 0, 0], texel);
        }
    }

    #[test]
    fn bc1_rgb_all_index_3() {
        let mut decompressed = [0u8; 48];
        bc1_rgb(&block(0xF800, 0x001F, 0xFFFF_FFFF), &mut decompressed, 12);
        for texel in decompressed.chunks_exact(3) {
            assert_eq!([82, 0, 165], texel);
        }
    }

    #[test]
    fn bc1_rgb_pitch() {
        // Decode into the left half of an 8 texel wide row.
        let mut decompressed = [0u8; 24 * 4];
        bc1_rgb(&block(0xFFFF, 0xFFFF, 0), &mut decompressed, 24);
        for row in decompressed.chunks_exact(24) {
            assert!(row[..12].iter().all(|b| *b != 0));
            assert!(row[12..].iter().all(|b| *b == 0));
        }
    }
}
