use tracing::trace;

use crate::{
    bc1::decode_block,
    error::SurfaceError,
    surface::{put_rgb_block, MipLevel, SurfaceRgb8},
};

impl<T: AsRef<[u8]>> MipLevel<T> {
    /// Decode all blocks to an RGB8 surface with the same dimensions as the mip level.
    pub fn decompress(&self) -> Result<SurfaceRgb8<Vec<u8>>, SurfaceError> {
        decompress(self)
    }
}

/// Decode all blocks of `mip` to an RGB8 surface of `mip.width` x `mip.height` pixels.
///
/// Blocks extending past the edges of mip levels smaller than 4x4 are clipped.
pub fn decompress<T: AsRef<[u8]>>(mip: &MipLevel<T>) -> Result<SurfaceRgb8<Vec<u8>>, SurfaceError> {
    let blocks = mip.packed_blocks()?;
    trace!(
        "decompressing {} blocks for {}x{} mip",
        blocks.len(),
        mip.width,
        mip.height
    );

    let mut surface = SurfaceRgb8::new(mip.width, mip.height);

    // DXT1 lays out blocks in row-major order.
    for (i, block) in blocks.iter().enumerate() {
        let (x, y) = mip.block_position(i);
        put_rgb_block(&mut surface, &decode_block(block), x as usize, y as usize);
    }

    Ok(surface)
}
