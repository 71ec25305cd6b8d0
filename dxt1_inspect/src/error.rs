use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface dimensions {width} x {height} contain no pixels")]
    ZeroSizedSurface { width: u32, height: u32 },

    #[error("surface pixel count {width} x {height} would overflow")]
    PixelCountWouldOverflow { width: u32, height: u32 },

    #[error("expected a {width} x {height} surface to have exactly {expected} bytes of block data but found {actual}")]
    InvalidBlockData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("expected at least one block to analyze")]
    EmptyInput,

    #[error("the block grid must have at least one block per row")]
    ZeroBlocksPerRow,
}
