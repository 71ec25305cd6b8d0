use crate::{
    bc1::{decode_block, DecodedBlock, PackedBlock, Rgb8, BLOCK_HEIGHT, BLOCK_WIDTH, BYTES_PER_BLOCK},
    error::SurfaceError,
};

/// A single DXT1 compressed mip level.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MipLevel<T> {
    /// The width of the mip level in texels.
    pub width: u32,
    /// The height of the mip level in texels.
    pub height: u32,
    /// The compressed blocks in row-major order without additional padding.
    ///
    /// Dimensions smaller than a block still use a single block,
    /// so a 2x1 mip level has exactly 8 bytes of data.
    pub data: T,
}

impl<T: AsRef<[u8]>> MipLevel<T> {
    /// The number of blocks in each row of the block grid.
    pub fn blocks_wide(&self) -> u32 {
        block_count_1d(self.width)
    }

    /// The number of rows in the block grid.
    pub fn blocks_high(&self) -> u32 {
        block_count_1d(self.height)
    }

    /// The texel coordinates of the top left corner of the block at `index`.
    pub fn block_position(&self, index: usize) -> (u32, u32) {
        block_position(index, self.blocks_wide() as usize)
    }

    /// Check that the data length matches the block grid exactly.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSizedSurface { width, height });
        }

        let expected = mip_size_in_bytes(width, height)
            .ok_or(SurfaceError::PixelCountWouldOverflow { width, height })?;

        let actual = self.data.as_ref().len();
        if actual != expected {
            return Err(SurfaceError::InvalidBlockData {
                width,
                height,
                expected,
                actual,
            });
        }

        Ok(())
    }

    /// Read every block in row-major order.
    pub fn packed_blocks(&self) -> Result<Vec<PackedBlock>, SurfaceError> {
        self.validate()?;

        Ok(self
            .data
            .as_ref()
            .chunks_exact(BYTES_PER_BLOCK)
            .map(|chunk| {
                let mut bytes = [0u8; BYTES_PER_BLOCK];
                bytes.copy_from_slice(chunk);
                PackedBlock::from_bytes(bytes)
            })
            .collect())
    }

    /// Decode every block in row-major order.
    pub fn decoded_blocks(&self) -> Result<Vec<DecodedBlock>, SurfaceError> {
        Ok(self.packed_blocks()?.iter().map(decode_block).collect())
    }
}

/// An uncompressed RGB8 surface with 3 bytes per pixel.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceRgb8<T> {
    /// The width of the surface in pixels.
    pub width: u32,
    /// The height of the surface in pixels.
    pub height: u32,
    /// The pixels in row-major order starting from the top left corner.
    pub data: T,
}

impl SurfaceRgb8<Vec<u8>> {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 3],
        }
    }

    /// Convert the surface to an [image::RgbImage].
    #[cfg(feature = "image")]
    pub fn into_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data)
    }
}

impl<T: AsRef<[u8]>> SurfaceRgb8<T> {
    /// Get the pixel at column `x` and row `y` or [None] if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 3;
        let pixel = self.data.as_ref().get(index..index + 3)?;
        Some(Rgb8::new(pixel[0], pixel[1], pixel[2]))
    }
}

/// Place a decoded 4x4 block into `surface` with its top left corner at texel `x`, `y`.
///
/// Blocks along the edges of surfaces smaller than 4x4 are clipped.
pub(crate) fn put_rgb_block(
    surface: &mut SurfaceRgb8<Vec<u8>>,
    pixels: &DecodedBlock,
    x: usize,
    y: usize,
) {
    let width = surface.width as usize;
    let height = surface.height as usize;
    if x >= width || y >= height {
        return;
    }

    let elements_per_row = 3 * BLOCK_WIDTH.min(width - x);

    for (row, row_pixels) in pixels.iter().enumerate().take(BLOCK_HEIGHT.min(height - y)) {
        let surface_index = ((y + row) * width + x) * 3;
        let row_bytes: &[u8] = bytemuck::cast_slice(row_pixels);
        surface.data[surface_index..surface_index + elements_per_row]
            .copy_from_slice(&row_bytes[..elements_per_row]);
    }
}

/// Blocks are counted after clamping each dimension to a single block.
pub(crate) fn block_count_1d(dimension: u32) -> u32 {
    (dimension / BLOCK_WIDTH as u32).max(1)
}

pub(crate) fn block_position(index: usize, blocks_per_row: usize) -> (u32, u32) {
    let x = (index % blocks_per_row) * BLOCK_WIDTH;
    let y = (index / blocks_per_row) * BLOCK_HEIGHT;
    (x as u32, y as u32)
}

/// The size in bytes of the blocks for a `width` x `height` mip level.
///
/// Returns [None] if the size would overflow.
pub fn mip_size_in_bytes(width: u32, height: u32) -> Option<usize> {
    (block_count_1d(width) as usize)
        .checked_mul(block_count_1d(height) as usize)?
        .checked_mul(BYTES_PER_BLOCK)
}
