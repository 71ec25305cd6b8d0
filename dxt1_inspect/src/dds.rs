use std::io::Read;

use ddsfile::{D3DFormat, DxgiFormat};
use thiserror::Error;
use tracing::debug;

use crate::{
    bc1::BLOCK_WIDTH, error::SurfaceError, max_mipmap_count, mip_dimension,
    surface::mip_size_in_bytes, MipLevel,
};

#[derive(Debug, Error)]
pub enum ReadDdsError {
    #[error("error reading DDS")]
    Dds(#[from] ddsfile::Error),

    #[error("the DDS does not contain DXT1 data")]
    UnsupportedFormat,

    #[error("DDS dimensions {width} x {height} are not multiples of 4")]
    NonIntegralDimensions { width: u32, height: u32 },

    #[error("volume textures with depth {depth} are not supported")]
    VolumeTexture { depth: u32 },

    #[error("{mipmaps} mipmaps exceeds the maximum expected mipmap count of {max_mipmaps}")]
    UnexpectedMipmapCount { mipmaps: u32, max_mipmaps: u32 },

    #[error("expected mipmap {mipmap} to have {expected} bytes but only {actual} remain")]
    NotEnoughData {
        mipmap: u32,
        expected: usize,
        actual: usize,
    },

    #[error("invalid mipmap data")]
    Surface(#[from] SurfaceError),
}

/// Read a DXT1 DDS file and split its first array layer into mip levels.
pub fn read_dds<R: Read>(reader: R) -> Result<Vec<MipLevel<Vec<u8>>>, ReadDdsError> {
    let dds = ddsfile::Dds::read(reader)?;
    Ok(mip_levels_from_dds(&dds)?
        .into_iter()
        .map(|mip| MipLevel {
            width: mip.width,
            height: mip.height,
            data: mip.data.to_vec(),
        })
        .collect())
}

/// Split the first array layer of `dds` into mip levels.
///
/// Only DXT1 data with a base size that is a multiple of 4 is supported.
pub fn mip_levels_from_dds(dds: &ddsfile::Dds) -> Result<Vec<MipLevel<&[u8]>>, ReadDdsError> {
    if !is_dxt1(dds) {
        return Err(ReadDdsError::UnsupportedFormat);
    }

    let width = dds.get_width();
    let height = dds.get_height();
    let depth = dds.get_depth();
    let mipmaps = dds.get_num_mipmap_levels();
    debug!("DDS {width}x{height}x{depth} with {mipmaps} mipmaps");

    if width % BLOCK_WIDTH as u32 != 0 || height % BLOCK_WIDTH as u32 != 0 {
        return Err(ReadDdsError::NonIntegralDimensions { width, height });
    }

    if depth != 1 {
        return Err(ReadDdsError::VolumeTexture { depth });
    }

    let max_mipmaps = max_mipmap_count(width.max(height));
    if mipmaps > max_mipmaps {
        return Err(ReadDdsError::UnexpectedMipmapCount {
            mipmaps,
            max_mipmaps,
        });
    }

    let mut mip_levels = Vec::new();
    let mut offset = 0;
    for mipmap in 0..mipmaps {
        let mip_width = mip_dimension(width, mipmap);
        let mip_height = mip_dimension(height, mipmap);

        let size = mip_size_in_bytes(mip_width, mip_height).ok_or(
            SurfaceError::PixelCountWouldOverflow {
                width: mip_width,
                height: mip_height,
            },
        )?;

        let data = dds
            .data
            .get(offset..offset + size)
            .ok_or(ReadDdsError::NotEnoughData {
                mipmap,
                expected: size,
                actual: dds.data.len().saturating_sub(offset),
            })?;
        debug!("mip {mipmap}: {mip_width}x{mip_height}, {size} bytes");

        let mip = MipLevel {
            width: mip_width,
            height: mip_height,
            data,
        };
        mip.validate()?;
        mip_levels.push(mip);

        offset += size;
    }

    Ok(mip_levels)
}

fn is_dxt1(dds: &ddsfile::Dds) -> bool {
    // The format can be DXGI or D3D with the D3D format derived from the FOURCC.
    matches!(
        dds.get_dxgi_format(),
        Some(DxgiFormat::BC1_Typeless | DxgiFormat::BC1_UNorm | DxgiFormat::BC1_UNorm_sRGB)
    ) || dds.get_d3d_format() == Some(D3DFormat::DXT1)
}
