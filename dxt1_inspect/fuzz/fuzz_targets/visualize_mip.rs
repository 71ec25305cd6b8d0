#![no_main]

use arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
pub struct ValidMip {
    mip: dxt1_inspect::MipLevel<Vec<u8>>,
}

impl<'a> Arbitrary<'a> for ValidMip {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let width = u.int_in_range(1..=256)?;
        let height = u.int_in_range(1..=256)?;
        let size = dxt1_inspect::mip_size_in_bytes(width, height).unwrap();
        let data = u.bytes(size)?.to_vec();
        Ok(ValidMip {
            mip: dxt1_inspect::MipLevel {
                width,
                height,
                data,
            },
        })
    }
}

fuzz_target!(|input: ValidMip| {
    let result = input.mip.visualize().unwrap();
    assert_eq!(input.mip.blocks_wide(), result.endpoints_a.width);
    assert_eq!(input.mip.width, result.indices.width);

    let rgb = input.mip.decompress().unwrap();
    assert_eq!(rgb.data.len(), result.indices.data.len());
});
