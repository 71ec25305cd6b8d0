use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dxt1_inspect::MipLevel;

fn criterion_benchmark(c: &mut Criterion) {
    // 64x64 texels is 256 blocks and 65280 comparisons.
    let data: Vec<u8> = (0..256u32)
        .flat_map(|i| {
            let endpoint = (i * 257) as u16;
            let mut block = [0u8; 8];
            block[0..2].copy_from_slice(&endpoint.to_le_bytes());
            block[4..8].copy_from_slice(&i.wrapping_mul(2654435761).to_le_bytes());
            block
        })
        .collect();
    let mip = MipLevel {
        width: 64,
        height: 64,
        data,
    };

    c.bench_function("analyze_blocks", |b| b.iter(|| black_box(&mip).analyze()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
