//! Debug views of the raw block data.
//!
//! Endpoints are shown at one pixel per block and indices at full resolution.
use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    bc1::{unpack_565, DecodedBlock, PackedBlock, Rgb8, BLOCK_HEIGHT, BLOCK_WIDTH},
    error::SurfaceError,
    surface::{put_rgb_block, MipLevel, SurfaceRgb8},
};

/// Grayscale ramp for the 2 bit index codes.
/// One of the red or green channels is later zeroed to tell neighboring blocks apart.
const INDEX_COLORS: [Rgb8; 4] = [
    Rgb8::new(0x00, 0x40, 0x40),
    Rgb8::new(0x55, 0x80, 0x80),
    Rgb8::new(0xAA, 0xC0, 0xC0),
    Rgb8::new(0xFF, 0xFF, 0xFF),
];

/// Separate images for each part of the compressed block data.
#[derive(Debug, PartialEq, Clone)]
pub struct BlockVisualization {
    /// The first endpoint of each block with one pixel per block.
    pub endpoints_a: SurfaceRgb8<Vec<u8>>,
    /// The second endpoint of each block with one pixel per block.
    pub endpoints_b: SurfaceRgb8<Vec<u8>>,
    /// The index codes for each texel in a checkerboard of red and green tinted blocks.
    pub indices: SurfaceRgb8<Vec<u8>>,
    pub stats: RedundancyStats,
}

/// How often the same endpoint and index values repeat across blocks.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedundancyStats {
    pub block_count: usize,
    /// Occurrences of each raw RGB565 endpoint value.
    ///
    /// The first and second endpoints share a single table,
    /// so equal values from both endpoints count towards the same entry.
    pub endpoint_counts: BTreeMap<u16, u32>,
    /// Occurrences of each raw 32 bit index value.
    pub index_counts: BTreeMap<u32, u32>,
}

impl RedundancyStats {
    pub fn from_blocks(blocks: &[PackedBlock]) -> Self {
        let mut endpoint_counts = BTreeMap::new();
        let mut index_counts = BTreeMap::new();
        for block in blocks {
            *endpoint_counts.entry(block.endpoint_a).or_insert(0) += 1;
            *endpoint_counts.entry(block.endpoint_b).or_insert(0) += 1;
            *index_counts.entry(block.indices).or_insert(0) += 1;
        }

        Self {
            block_count: blocks.len(),
            endpoint_counts,
            index_counts,
        }
    }

    /// The size of each of the two endpoint arrays in bytes.
    pub fn endpoint_size_in_bytes(&self) -> usize {
        self.block_count * 2
    }

    /// The size of the index data in bytes.
    pub fn index_size_in_bytes(&self) -> usize {
        self.block_count * 4
    }

    /// The block count minus the number of distinct endpoint values.
    ///
    /// This can be negative since each block contributes two endpoints.
    pub fn shared_endpoint_blocks(&self) -> i64 {
        self.block_count as i64 - self.endpoint_counts.len() as i64
    }

    /// The block count minus the number of distinct index values.
    pub fn shared_index_blocks(&self) -> i64 {
        self.block_count as i64 - self.index_counts.len() as i64
    }

    pub fn shared_endpoint_percentage(&self) -> f64 {
        percentage(self.shared_endpoint_blocks(), self.block_count)
    }

    pub fn shared_index_percentage(&self) -> f64 {
        percentage(self.shared_index_blocks(), self.block_count)
    }
}

fn percentage(count: i64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

impl<T: AsRef<[u8]>> MipLevel<T> {
    /// Split the blocks into endpoint and index images with [visualize].
    pub fn visualize(&self) -> Result<BlockVisualization, SurfaceError> {
        visualize(self)
    }
}

/// Create separate images for the endpoints and indices of `mip`
/// and count how often their values repeat.
pub fn visualize<T: AsRef<[u8]>>(mip: &MipLevel<T>) -> Result<BlockVisualization, SurfaceError> {
    let blocks = mip.packed_blocks()?;

    let blocks_wide = mip.blocks_wide();
    let blocks_high = mip.blocks_high();

    let mut endpoints_a = SurfaceRgb8::new(blocks_wide, blocks_high);
    let mut endpoints_b = SurfaceRgb8::new(blocks_wide, blocks_high);
    let mut indices = SurfaceRgb8::new(mip.width, mip.height);

    for (i, block) in blocks.iter().enumerate() {
        let start = i * 3;
        endpoints_a.data[start..start + 3].copy_from_slice(&unpack_565(block.endpoint_a).to_array());
        endpoints_b.data[start..start + 3].copy_from_slice(&unpack_565(block.endpoint_b).to_array());

        let block_x = i % blocks_wide as usize;
        let block_y = i / blocks_wide as usize;
        put_rgb_block(
            &mut indices,
            &index_block(block, block_x, block_y),
            block_x * BLOCK_WIDTH,
            block_y * BLOCK_HEIGHT,
        );
    }

    let stats = RedundancyStats::from_blocks(&blocks);
    debug!(
        "{} blocks, {} distinct endpoints, {} distinct indices",
        stats.block_count,
        stats.endpoint_counts.len(),
        stats.index_counts.len()
    );

    Ok(BlockVisualization {
        endpoints_a,
        endpoints_b,
        indices,
        stats,
    })
}

fn index_block(block: &PackedBlock, block_x: usize, block_y: usize) -> DecodedBlock {
    let mut pixels = [[Rgb8::default(); BLOCK_WIDTH]; BLOCK_HEIGHT];
    for (y, row) in pixels.iter_mut().enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            let mut color = INDEX_COLORS[block.index(x, y)];
            if (block_x + block_y) % 2 == 0 {
                color.r = 0;
            } else {
                color.g = 0;
            }
            *pixel = color;
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mip_from_blocks(width: u32, height: u32, blocks: &[PackedBlock]) -> MipLevel<Vec<u8>> {
        MipLevel {
            width,
            height,
            data: blocks.iter().flat_map(|b| b.to_bytes()).collect(),
        }
    }

    #[test]
    fn visualize_endpoint_maps() {
        let blocks = [
            PackedBlock {
                endpoint_a: 0xF800,
                endpoint_b: 0x001F,
                indices: 0,
            },
            PackedBlock {
                endpoint_a: 0x07E0,
                endpoint_b: 0xFFFF,
                indices: 0,
            },
        ];
        let result = visualize(&mip_from_blocks(8, 4, &blocks)).unwrap();

        assert_eq!((2, 1), (result.endpoints_a.width, result.endpoints_a.height));
        assert_eq!(vec![248, 0, 0, 0, 252, 0], result.endpoints_a.data);
        assert_eq!(vec![0, 0, 248, 248, 252, 248], result.endpoints_b.data);
        assert_eq!((8, 4), (result.indices.width, result.indices.height));
    }

    #[test]
    fn visualize_index_checkerboard() {
        // All 4 codes in the first row of each block.
        let block = PackedBlock {
            endpoint_a: 0,
            endpoint_b: 0,
            indices: 0b11_10_01_00,
        };
        let result = visualize(&mip_from_blocks(8, 8, &[block; 4])).unwrap();
        let indices = &result.indices;

        // Even blocks have red zeroed.
        assert_eq!(Some(Rgb8::new(0x00, 0x40, 0x40)), indices.get(0, 0));
        assert_eq!(Some(Rgb8::new(0x00, 0x80, 0x80)), indices.get(1, 0));
        assert_eq!(Some(Rgb8::new(0x00, 0xC0, 0xC0)), indices.get(2, 0));
        assert_eq!(Some(Rgb8::new(0x00, 0xFF, 0xFF)), indices.get(3, 0));
        // Odd blocks have green zeroed.
        assert_eq!(Some(Rgb8::new(0x00, 0x00, 0x40)), indices.get(4, 0));
        assert_eq!(Some(Rgb8::new(0x55, 0x00, 0x80)), indices.get(5, 0));
        assert_eq!(Some(Rgb8::new(0xAA, 0x00, 0xC0)), indices.get(2, 4));
        assert_eq!(Some(Rgb8::new(0xFF, 0x00, 0xFF)), indices.get(3, 4));
        // The diagonal block is even again.
        assert_eq!(Some(Rgb8::new(0x00, 0x80, 0x80)), indices.get(5, 4));
        assert_eq!(Some(Rgb8::new(0x00, 0x40, 0x40)), indices.get(4, 5));
    }

    #[test]
    fn redundancy_all_unique() {
        let blocks: Vec<_> = (0..4u16)
            .map(|i| PackedBlock {
                endpoint_a: i,
                endpoint_b: 100 + i,
                indices: i as u32,
            })
            .collect();
        let stats = RedundancyStats::from_blocks(&blocks);
        assert_eq!(4, stats.block_count);
        assert_eq!(8, stats.endpoint_counts.len());
        assert_eq!(-4, stats.shared_endpoint_blocks());
        assert_eq!(0, stats.shared_index_blocks());
        assert_eq!(-100.0, stats.shared_endpoint_percentage());
        assert_eq!(0.0, stats.shared_index_percentage());
        assert_eq!(8, stats.endpoint_size_in_bytes());
        assert_eq!(16, stats.index_size_in_bytes());
    }

    #[test]
    fn redundancy_endpoints_collide_across_a_and_b() {
        // Endpoint B of the first block equals endpoint A of the second.
        let blocks = [
            PackedBlock {
                endpoint_a: 1,
                endpoint_b: 2,
                indices: 7,
            },
            PackedBlock {
                endpoint_a: 2,
                endpoint_b: 3,
                indices: 7,
            },
        ];
        let stats = RedundancyStats::from_blocks(&blocks);
        assert_eq!(Some(&2), stats.endpoint_counts.get(&2));
        assert_eq!(3, stats.endpoint_counts.len());
        assert_eq!(-1, stats.shared_endpoint_blocks());
        assert_eq!(1, stats.shared_index_blocks());
        assert_eq!(50.0, stats.shared_index_percentage());
    }

    #[test]
    fn redundancy_identical_blocks() {
        let block = PackedBlock {
            endpoint_a: 0xF800,
            endpoint_b: 0x001F,
            indices: 0x12345678,
        };
        let stats = visualize(&mip_from_blocks(8, 8, &[block; 4])).unwrap().stats;
        assert_eq!(2, stats.shared_endpoint_blocks());
        assert_eq!(3, stats.shared_index_blocks());
        assert_eq!(75.0, stats.shared_index_percentage());
    }

    #[test]
    fn visualize_smaller_than_block() {
        let block = PackedBlock {
            endpoint_a: 0xF800,
            endpoint_b: 0,
            indices: 0xFFFFFFFF,
        };
        let result = visualize(&mip_from_blocks(2, 2, &[block])).unwrap();
        assert_eq!((1, 1), (result.endpoints_a.width, result.endpoints_a.height));
        assert_eq!(vec![248, 0, 0], result.endpoints_a.data);
        assert_eq!([0x00, 0xFF, 0xFF].repeat(4), result.indices.data);
    }

    #[test]
    fn visualize_invalid_data() {
        let mip = MipLevel {
            width: 4,
            height: 4,
            data: vec![0u8; 7],
        };
        assert!(matches!(
            visualize(&mip),
            Err(SurfaceError::InvalidBlockData { .. })
        ));
    }
}
