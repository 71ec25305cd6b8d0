//! Synth command - generate DXT1 DDS files that cover every endpoint value of a channel
//!
//! Each file pairs every value of one RGB565 channel with every other value.
//! Decoding these with another tool and comparing against [dxt1_inspect::decompress]
//! checks the endpoint expansion and palette interpolation.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;
use dxt1_inspect::{
    ddsfile::{D3DFormat, Dds, NewD3dParams},
    MipLevel, PackedBlock,
};
use tracing::info;

/// Arguments for the synth command
#[derive(Args)]
pub struct SynthArgs {
    /// Directory for the generated DDS files
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Execute the synth command
pub fn execute(args: SynthArgs) -> Result<()> {
    for (name, mip) in [
        ("dxt1_r.dds", dxt1_r()),
        ("dxt1_g.dds", dxt1_g()),
        ("dxt1_b.dds", dxt1_b()),
    ] {
        let path = args.output_dir.join(name);
        let dds = dds_from_mip(&mip)?;

        let mut writer = BufWriter::new(
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?,
        );
        dds.write(&mut writer)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writer.flush()?;

        info!("Saved {} ({}x{})", path.display(), mip.width, mip.height);
    }

    Ok(())
}

fn dds_from_mip(mip: &MipLevel<Vec<u8>>) -> Result<Dds> {
    let mut dds = Dds::new_d3d(NewD3dParams {
        height: mip.height,
        width: mip.width,
        depth: None,
        format: D3DFormat::DXT1,
        mipmap_levels: None,
        caps2: None,
    })
    .context("Failed to create DDS header")?;
    dds.data = mip.data.clone();
    Ok(dds)
}

fn dxt1_r() -> MipLevel<Vec<u8>> {
    // 5 bit independent R channel for the end points.
    endpoint_pairs(5, |i, j| rgb_block(i, 0, 0, j, 0, 0))
}

fn dxt1_g() -> MipLevel<Vec<u8>> {
    // 6 bit independent G channel for the end points.
    endpoint_pairs(6, |i, j| rgb_block(0, i, 0, 0, j, 0))
}

fn dxt1_b() -> MipLevel<Vec<u8>> {
    // 5 bit independent B channel for the end points.
    endpoint_pairs(5, |i, j| rgb_block(0, 0, i, 0, 0, j))
}

/// A square grid of blocks where block `(j, i)` uses channel values `i` and `j`.
fn endpoint_pairs<F>(bits: u32, block: F) -> MipLevel<Vec<u8>>
where
    F: Fn(u16, u16) -> PackedBlock,
{
    let blocks = 1u16 << bits;

    let mut data = Vec::new();
    for i in 0..blocks {
        for j in 0..blocks {
            data.extend_from_slice(&block(i, j).to_bytes());
        }
    }

    MipLevel {
        width: blocks as u32 * 4,
        height: blocks as u32 * 4,
        data,
    }
}

fn rgb_block(r0: u16, g0: u16, b0: u16, r1: u16, g1: u16, b1: u16) -> PackedBlock {
    PackedBlock {
        endpoint_a: (r0 << 11) | (g0 << 5) | b0,
        endpoint_b: (r1 << 11) | (g1 << 5) | b1,
        // Use each unique 2 bit value for the 4x4 indices.
        indices: bit_indices(4 * 4, 2),
    }
}

fn bit_indices(count: u32, bits: u32) -> u32 {
    // Repeat unique bit patterns for count.
    let mut indices = 0;
    for i in 0..count {
        indices |= (i % (1 << bits)) << (i * bits);
    }
    indices
}
