#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|blocks: Vec<dxt1_inspect::PackedBlock>| {
    // Keep the quadratic comparison small.
    if blocks.len() < 2 || blocks.len() > 64 {
        return;
    }

    let decoded: Vec<_> = blocks.iter().map(dxt1_inspect::decode_block).collect();
    let report = dxt1_inspect::analyze(&decoded, 4).unwrap();

    assert_eq!(blocks.len() as u64, report.histogram.total());
    for row in &report.blocks {
        assert_ne!(row.index, row.best_match_index);
        assert!(row.min_psnr <= row.max_psnr);
    }
});
