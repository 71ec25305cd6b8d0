//! Typed access to DXT1 blocks.
//!
//! The bit level decoding lives in [dxt1dec].
//! This module wraps it with block and color types that are easier to work with.
use bytemuck::{Pod, Zeroable};

/// The width of a DXT1 block in texels.
pub const BLOCK_WIDTH: usize = 4;
/// The height of a DXT1 block in texels.
pub const BLOCK_HEIGHT: usize = 4;
/// The number of texels in a single block.
pub const TEXELS_PER_BLOCK: usize = BLOCK_WIDTH * BLOCK_HEIGHT;

pub use dxt1dec::BYTES_PER_BLOCK;

/// An RGB color with 8 bits per channel.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// The 16 decoded texels of a block in row-major order.
pub type DecodedBlock = [[Rgb8; BLOCK_WIDTH]; BLOCK_HEIGHT];

/// A single compressed 8 byte block.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedBlock {
    /// The first RGB565 endpoint.
    pub endpoint_a: u16,
    /// The second RGB565 endpoint.
    pub endpoint_b: u16,
    /// Sixteen 2 bit palette indices.
    /// The texel at column `x` and row `y` uses bits `2 * (y * 4 + x)` and up.
    pub indices: u32,
}

impl PackedBlock {
    /// Read a block from its little-endian byte representation.
    pub fn from_bytes(bytes: [u8; BYTES_PER_BLOCK]) -> Self {
        Self {
            endpoint_a: u16::from_le_bytes([bytes[0], bytes[1]]),
            endpoint_b: u16::from_le_bytes([bytes[2], bytes[3]]),
            indices: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    pub fn to_bytes(self) -> [u8; BYTES_PER_BLOCK] {
        let mut bytes = [0u8; BYTES_PER_BLOCK];
        bytes[0..2].copy_from_slice(&self.endpoint_a.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.endpoint_b.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.indices.to_le_bytes());
        bytes
    }

    /// The 2 bit palette index for the texel at column `x` and row `y`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        dxt1dec::texel_index(self.indices, x, y)
    }

    /// The endpoints followed by the two interpolated colors.
    pub fn palette(&self) -> [Rgb8; 4] {
        dxt1dec::palette(self.endpoint_a, self.endpoint_b).map(Rgb8::from)
    }

    pub fn decode(&self) -> DecodedBlock {
        decode_block(self)
    }
}

/// Expand a packed RGB565 `color` to 8 bits per channel by shifting.
pub fn unpack_565(color: u16) -> Rgb8 {
    dxt1dec::unpack_565(color).into()
}

/// Decode the 16 texels of `block` using the opaque 4 color mode.
pub fn decode_block(block: &PackedBlock) -> DecodedBlock {
    let mut decompressed = [[Rgb8::default(); BLOCK_WIDTH]; BLOCK_HEIGHT];

    dxt1dec::bc1_rgb(
        &block.to_bytes(),
        bytemuck::cast_slice_mut(&mut decompressed),
        BLOCK_WIDTH * dxt1dec::BYTES_PER_TEXEL,
    );

    decompressed
}
