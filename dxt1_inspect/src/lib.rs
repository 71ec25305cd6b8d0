//! Decode and inspect DXT1 (BC1) compressed textures.
//!
//! Mip levels are represented as [MipLevel] with the raw block data.
//! The same mip can be decompressed to RGB8 with [MipLevel::decompress],
//! split into endpoint and index images with [MipLevel::visualize],
//! or compared block by block with [MipLevel::analyze].
//!
//! Only the opaque 4 color mode is decoded.
//! Blocks with `endpoint_a <= endpoint_b` still use interpolated colors instead of 1 bit alpha.
//!
//! ```rust no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = std::io::BufReader::new(std::fs::File::open("texture.dds")?);
//! let mips = dxt1_inspect::read_dds(reader)?;
//!
//! let report = mips[0].analyze()?;
//! println!("{} identical blocks", report.duplicate_count());
//!
//! let rgb = mips[0].decompress()?;
//! dxt1_inspect::save_tga("texture.tga", &rgb)?;
//! # Ok(())
//! # }
//! ```
pub mod analyze;
pub mod bc1;
pub mod visualize;

mod decode;
mod error;
mod surface;
mod tga;

#[cfg(feature = "ddsfile")]
mod dds;
#[cfg(feature = "ddsfile")]
pub use dds::*;
#[cfg(feature = "ddsfile")]
pub use ddsfile;

pub use analyze::{analyze, psnr, AnalysisReport, BlockSimilarity, PsnrHistogram};
pub use bc1::{decode_block, unpack_565, DecodedBlock, PackedBlock, Rgb8};
pub use decode::decompress;
pub use error::SurfaceError;
pub use surface::{mip_size_in_bytes, MipLevel, SurfaceRgb8};
pub use tga::{save_tga, write_tga, WriteTgaError};
pub use visualize::{visualize, BlockVisualization, RedundancyStats};

/// The number of mip levels in a full chain down to 1x1 for a base size of `max_dimension`.
pub fn max_mipmap_count(max_dimension: u32) -> u32 {
    // log2(x) + 1
    u32::BITS - max_dimension.leading_zeros()
}

/// The size of `base_dimension` at `mipmap`, never smaller than 1.
pub fn mip_dimension(base_dimension: u32, mipmap: u32) -> u32 {
    base_dimension.checked_shr(mipmap).unwrap_or(0).max(1)
}
