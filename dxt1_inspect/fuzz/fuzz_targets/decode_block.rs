#![no_main]

use dxt1_inspect::{analyze::PSNR_IDENTICAL, decode_block, psnr, PackedBlock};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|blocks: (PackedBlock, PackedBlock)| {
    let (a, b) = blocks;
    let decoded_a = decode_block(&a);
    let decoded_b = decode_block(&b);

    assert_eq!(PSNR_IDENTICAL, psnr(&decoded_a, &decoded_a));
    assert_eq!(psnr(&decoded_a, &decoded_b), psnr(&decoded_b, &decoded_a));
});
