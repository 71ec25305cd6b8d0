//! Pairwise block similarity using PSNR.
//!
//! Every block is compared against every other block in the mip level,
//! so the cost grows quadratically with the block count.
//! Rows are computed in parallel and collected in block order.
use rayon::prelude::*;
use tracing::debug;

use crate::{
    bc1::{DecodedBlock, TEXELS_PER_BLOCK},
    error::SurfaceError,
    surface::{block_position, MipLevel},
};

/// The number of histogram buckets covering whole decibel values `0..=51`.
pub const HISTOGRAM_BUCKETS: usize = 52;

/// The PSNR of two blocks with no error in any channel.
pub const PSNR_IDENTICAL: f64 = f64::INFINITY;

/// The similarity of a single block to the other blocks in the same mip level.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockSimilarity {
    /// The index of the block in row-major order.
    pub index: usize,
    /// The texel column of the top left corner of the block.
    pub x: u32,
    /// The texel row of the top left corner of the block.
    pub y: u32,
    /// The PSNR of the least similar other block.
    /// This is [None] if there are no other blocks.
    pub min_psnr: Option<f64>,
    /// The PSNR of the most similar other block.
    /// This is [None] if there are no other blocks.
    pub max_psnr: Option<f64>,
    /// The index of the most similar other block or [index](#structfield.index)
    /// if there are no other blocks.
    ///
    /// Ties are resolved in favor of the block with the highest index.
    pub best_match_index: usize,
    pub best_match_x: u32,
    pub best_match_y: u32,
}

/// Counts of the best match PSNR for each block rounded to the nearest decibel.
///
/// Values are clamped to the last bucket, so identical blocks are counted in bucket 51.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PsnrHistogram(pub [u32; HISTOGRAM_BUCKETS]);

impl Default for PsnrHistogram {
    fn default() -> Self {
        Self([0; HISTOGRAM_BUCKETS])
    }
}

impl PsnrHistogram {
    /// The bucket for `psnr` after rounding and clamping to `0..=51`.
    pub fn bucket(psnr: f64) -> usize {
        psnr.round().clamp(0.0, (HISTOGRAM_BUCKETS - 1) as f64) as usize
    }

    pub fn add(&mut self, psnr: f64) {
        self.0[Self::bucket(psnr)] += 1;
    }

    /// The sum of all bucket counts.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|c| *c as u64).sum()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PsnrHistogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// The result of comparing every block against every other block.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnalysisReport {
    /// One entry for each block in row-major order.
    pub blocks: Vec<BlockSimilarity>,
    pub histogram: PsnrHistogram,
}

impl AnalysisReport {
    /// The number of blocks with at least one identical block elsewhere in the mip level.
    pub fn duplicate_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.max_psnr == Some(PSNR_IDENTICAL))
            .count()
    }
}

impl<T: AsRef<[u8]>> MipLevel<T> {
    /// Decode all blocks and compare them pairwise with [analyze].
    pub fn analyze(&self) -> Result<AnalysisReport, SurfaceError> {
        let blocks = self.decoded_blocks()?;
        analyze(&blocks, self.blocks_wide() as usize)
    }
}

/// Calculate the peak signal to noise ratio between `a` and `b` in decibels.
///
/// Each channel is scored separately and the lowest channel PSNR is returned.
/// Identical blocks return [PSNR_IDENTICAL].
pub fn psnr(a: &DecodedBlock, b: &DecodedBlock) -> f64 {
    let mut squared_error = [0u32; 3];
    for (pa, pb) in a.iter().flatten().zip(b.iter().flatten()) {
        for (c, (ca, cb)) in pa.to_array().into_iter().zip(pb.to_array()).enumerate() {
            let difference = ca.abs_diff(cb) as u32;
            squared_error[c] += difference * difference;
        }
    }

    squared_error
        .into_iter()
        .map(channel_psnr)
        .fold(PSNR_IDENTICAL, f64::min)
}

fn channel_psnr(squared_error: u32) -> f64 {
    if squared_error == 0 {
        PSNR_IDENTICAL
    } else {
        let mse = squared_error as f64 / TEXELS_PER_BLOCK as f64;
        10.0 * (255.0 * 255.0 / mse).log10()
    }
}

/// Compare each block in `blocks` against every other block.
///
/// The blocks are assumed to form a row-major grid with `blocks_per_row` blocks in each row.
/// This is only used to compute the texel coordinates in the report.
pub fn analyze(
    blocks: &[DecodedBlock],
    blocks_per_row: usize,
) -> Result<AnalysisReport, SurfaceError> {
    if blocks.is_empty() {
        return Err(SurfaceError::EmptyInput);
    }
    if blocks_per_row == 0 {
        return Err(SurfaceError::ZeroBlocksPerRow);
    }

    debug!(
        "comparing {} blocks with {} blocks per row",
        blocks.len(),
        blocks_per_row
    );

    let rows: Vec<_> = (0..blocks.len())
        .into_par_iter()
        .map(|i| compare_block(blocks, i, blocks_per_row))
        .collect();

    let mut histogram = PsnrHistogram::default();
    for max_psnr in rows.iter().filter_map(|r| r.max_psnr) {
        histogram.add(max_psnr);
    }

    debug!("analyzed {} blocks", rows.len());

    Ok(AnalysisReport {
        blocks: rows,
        histogram,
    })
}

fn compare_block(blocks: &[DecodedBlock], index: usize, blocks_per_row: usize) -> BlockSimilarity {
    let block = &blocks[index];

    let mut min_psnr: Option<f64> = None;
    let mut max_psnr: Option<f64> = None;
    let mut best_match_index = index;

    for (j, other) in blocks.iter().enumerate() {
        if j == index {
            continue;
        }

        let value = psnr(block, other);
        if min_psnr.map_or(true, |min| value < min) {
            min_psnr = Some(value);
        }
        // Later blocks replace earlier blocks with the same PSNR.
        if max_psnr.map_or(true, |max| value >= max) {
            max_psnr = Some(value);
            best_match_index = j;
        }
    }

    let (x, y) = block_position(index, blocks_per_row);
    let (best_match_x, best_match_y) = block_position(best_match_index, blocks_per_row);

    BlockSimilarity {
        index,
        x,
        y,
        min_psnr,
        max_psnr,
        best_match_index,
        best_match_x,
        best_match_y,
    }
}
