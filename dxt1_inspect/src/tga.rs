//! Minimal uncompressed truecolor TGA output for inspecting surfaces.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use thiserror::Error;

use crate::surface::SurfaceRgb8;

const HEADER_SIZE: usize = 18;
const IMAGE_TYPE_TRUECOLOR: u8 = 2;
/// Image descriptor bit 5 marks the first row as the top of the image.
const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

#[derive(Debug, Error)]
pub enum WriteTgaError {
    #[error("error writing TGA data")]
    Io(#[from] std::io::Error),

    #[error("surface dimensions {width} x {height} exceed the TGA maximum of 65535 x 65535")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("expected surface to have exactly {expected} bytes but found {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

fn header(width: u16, height: u16) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    // ID length, color map type, and color map specification are all zero.
    header[2] = IMAGE_TYPE_TRUECOLOR;
    // The x and y origin at offsets 8 and 10 are zero.
    header[12..14].copy_from_slice(&width.to_le_bytes());
    header[14..16].copy_from_slice(&height.to_le_bytes());
    header[16] = 24;
    header[17] = DESCRIPTOR_TOP_LEFT;
    header
}

/// Write `surface` as a 24 bit uncompressed TGA with a top left origin.
pub fn write_tga<W: Write, T: AsRef<[u8]>>(
    writer: &mut W,
    surface: &SurfaceRgb8<T>,
) -> Result<(), WriteTgaError> {
    let (width, height) = (surface.width, surface.height);
    let (Ok(tga_width), Ok(tga_height)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(WriteTgaError::DimensionsTooLarge { width, height });
    };

    let data = surface.data.as_ref();
    let expected = width as usize * height as usize * 3;
    if data.len() != expected {
        return Err(WriteTgaError::InvalidPixelData {
            expected,
            actual: data.len(),
        });
    }

    writer.write_all(&header(tga_width, tga_height))?;

    // TGA stores pixels as BGR.
    let bgr: Vec<u8> = data
        .chunks_exact(3)
        .flat_map(|rgb| [rgb[2], rgb[1], rgb[0]])
        .collect();
    writer.write_all(&bgr)?;

    Ok(())
}

/// Write `surface` to a TGA file at `path` using [write_tga].
pub fn save_tga<P: AsRef<Path>, T: AsRef<[u8]>>(
    path: P,
    surface: &SurfaceRgb8<T>,
) -> Result<(), WriteTgaError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_tga(&mut writer, surface)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_tga_header_and_pixels() {
        let surface = SurfaceRgb8 {
            width: 2,
            height: 1,
            data: vec![1u8, 2, 3, 4, 5, 6],
        };
        let mut bytes = Vec::new();
        write_tga(&mut bytes, &surface).unwrap();

        assert_eq!(
            vec![
                0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 1, 0, 24, 0x20, 3, 2, 1, 6, 5, 4
            ],
            bytes
        );
    }

    #[test]
    fn write_tga_large_dimensions() {
        let surface = SurfaceRgb8 {
            width: 300,
            height: 258,
            data: vec![0u8; 300 * 258 * 3],
        };
        let mut bytes = Vec::new();
        write_tga(&mut bytes, &surface).unwrap();
        assert_eq!([44u8, 1, 2, 1], bytes[12..16]);
        assert_eq!(HEADER_SIZE + 300 * 258 * 3, bytes.len());
    }

    #[test]
    fn write_tga_too_large() {
        let surface = SurfaceRgb8 {
            width: 65536,
            height: 1,
            data: Vec::new(),
        };
        let result = write_tga(&mut Vec::new(), &surface);
        assert!(matches!(
            result,
            Err(WriteTgaError::DimensionsTooLarge {
                width: 65536,
                height: 1
            })
        ));
    }

    #[test]
    fn write_tga_invalid_pixel_data() {
        let surface = SurfaceRgb8 {
            width: 2,
            height: 2,
            data: vec![0u8; 11],
        };
        let result = write_tga(&mut Vec::new(), &surface);
        assert!(matches!(
            result,
            Err(WriteTgaError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
    }
}
