//! Inspect command - report block redundancy and similarity for a DDS file

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use dxt1_inspect::{
    analyze::HISTOGRAM_BUCKETS, save_tga, AnalysisReport, MipLevel, RedundancyStats,
    SurfaceRgb8,
};
use tracing::info;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// DXT1 DDS file to inspect
    pub input: PathBuf,

    /// Directory for the generated TGA images
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Mip level to inspect
    #[arg(long, default_value_t = 0, conflicts_with = "all_mips")]
    pub mip: u32,

    /// Inspect every mip level
    #[arg(long)]
    pub all_mips: bool,

    /// Skip the pairwise block similarity analysis
    #[arg(long)]
    pub no_analyze: bool,

    /// Skip writing TGA images
    #[arg(long)]
    pub no_images: bool,

    /// Print the best match for every block
    #[arg(long)]
    pub matches: bool,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let mips = dxt1_inspect::read_dds(BufReader::new(file))
        .with_context(|| format!("Failed to read DXT1 data from {}", args.input.display()))?;

    let base = mips.first().context("DDS file has no mip levels")?;
    println!("Width: {}", base.width);
    println!("Height: {}", base.height);
    println!("MipCount: {}", mips.len());
    println!();

    for (i, mip) in mips.iter().enumerate() {
        println!(
            "mip#{i}, {}x{} [{}x{}], size {} bytes",
            mip.width,
            mip.height,
            mip.blocks_wide(),
            mip.blocks_high(),
            mip.data.len()
        );
    }

    let selected: Vec<u32> = if args.all_mips {
        (0..mips.len() as u32).collect()
    } else {
        vec![args.mip]
    };

    for index in selected {
        let mip = mips.get(index as usize).with_context(|| {
            format!("Mip {index} not found, the file has {} mip levels", mips.len())
        })?;
        inspect_mip(&args, index, mip)?;
    }

    println!();
    println!("Done.");

    Ok(())
}

fn inspect_mip(args: &InspectArgs, index: u32, mip: &MipLevel<Vec<u8>>) -> Result<()> {
    let visualization = mip
        .visualize()
        .with_context(|| format!("Failed to split mip {index}"))?;

    println!();
    println!("mip#{index}");
    print_stats(&visualization.stats);

    if !args.no_images {
        save(args, &format!("mip{index}_colorA.tga"), &visualization.endpoints_a)?;
        save(args, &format!("mip{index}_colorB.tga"), &visualization.endpoints_b)?;
        save(args, &format!("mip{index}_indices.tga"), &visualization.indices)?;

        let rgb = mip
            .decompress()
            .with_context(|| format!("Failed to decompress mip {index}"))?;
        save(args, &format!("mip{index}_rgb.tga"), &rgb)?;
    }

    if !args.no_analyze {
        info!(
            "Comparing {} blocks pairwise",
            visualization.stats.block_count
        );
        let report = mip
            .analyze()
            .with_context(|| format!("Failed to analyze mip {index}"))?;
        print_report(&report, args.matches);
    }

    Ok(())
}

fn save(args: &InspectArgs, name: &str, surface: &SurfaceRgb8<Vec<u8>>) -> Result<()> {
    let path = args.output_dir.join(name);
    println!("Saving '{}'", path.display());
    save_tga(&path, surface).with_context(|| format!("Failed to write {}", path.display()))
}

fn print_stats(stats: &RedundancyStats) {
    println!(
        "End-points-A data size = {} bytes (25%)",
        stats.endpoint_size_in_bytes()
    );
    println!(
        "End-points-B data size = {} bytes (25%)",
        stats.endpoint_size_in_bytes()
    );
    println!(
        "Indices data size = {} bytes (50%)",
        stats.index_size_in_bytes()
    );
    println!("Number of blocks: {}", stats.block_count);
    println!(
        "Shared color blocks: {} ({:3.2}%)",
        stats.shared_endpoint_blocks(),
        stats.shared_endpoint_percentage()
    );
    println!(
        "Shared indices blocks: {} ({:3.2}%)",
        stats.shared_index_blocks(),
        stats.shared_index_percentage()
    );
}

fn print_report(report: &AnalysisReport, matches: bool) {
    if matches {
        println!();
        for row in &report.blocks {
            println!(
                "block #{} ({}, {}): best #{} ({}, {}) PSNR {}, worst PSNR {}",
                row.index,
                row.x,
                row.y,
                row.best_match_index,
                row.best_match_x,
                row.best_match_y,
                format_psnr(row.max_psnr),
                format_psnr(row.min_psnr)
            );
        }
    }

    println!();
    println!("Identical blocks: {}", report.duplicate_count());
    println!("Best match PSNR histogram:");
    for (bucket, count) in report.histogram.0.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let suffix = if bucket == HISTOGRAM_BUCKETS - 1 { "+" } else { "" };
        println!("  {bucket:>2}{suffix} dB: {count}");
    }
}

fn format_psnr(psnr: Option<f64>) -> String {
    match psnr {
        Some(value) if value.is_infinite() => "inf".to_string(),
        Some(value) => format!("{value:.2}"),
        None => "-".to_string(),
    }
}
