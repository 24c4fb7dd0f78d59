use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::prediction::PredictionRecord;
use crate::core::profile::{write_profiles, ProfileBlock};
use crate::parsing;

#[derive(Args)]
pub struct ProfileArgs {
    /// CAMI profile file (plain text or gzip-compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Write the profile in standardized CAMI form to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only report the sample with this ID
    #[arg(long)]
    pub sample: Option<String>,
}

pub fn run(args: ProfileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut blocks = parsing::cami::parse_profile_file(&args.input)
        .with_context(|| format!("Failed to parse CAMI profile {}", args.input.display()))?;

    if let Some(sample) = &args.sample {
        blocks.retain(|b| &b.sample_id == sample);
        if blocks.is_empty() {
            anyhow::bail!(
                "Sample '{}' not found in {}",
                sample,
                args.input.display()
            );
        }
    }

    if verbose {
        eprintln!(
            "Parsed {} sample(s), {} prediction(s) from {}",
            blocks.len(),
            blocks.iter().map(|b| b.predictions.len()).sum::<usize>(),
            args.input.display()
        );
    }

    if let Some(output) = &args.output {
        // The output directory must already exist
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                anyhow::bail!("Output directory {} does not exist", parent.display());
            }
        }
        std::fs::write(output, write_profiles(&blocks))
            .with_context(|| format!("Failed to write {}", output.display()))?;
        if verbose {
            eprintln!("Wrote standardized profile to {}", output.display());
        }
    }

    match format {
        OutputFormat::Text => print_text_summary(&args, &blocks),
        OutputFormat::Json => print_json(&blocks)?,
        OutputFormat::Tsv => print_tsv(&blocks),
    }

    Ok(())
}

fn print_text_summary(args: &ProfileArgs, blocks: &[ProfileBlock]) {
    println!("CAMI Profile: {}", args.input.display());
    println!("{}", "=".repeat(60));

    for block in blocks {
        println!("\nSample: {}", block.sample_id);
        println!("  Program: {}", block.program());
        for (key, value) in block.header.iter() {
            println!("  @{key}: {value}");
        }
        println!("  Predictions: {}", block.predictions.len());
        if let Some(depth) = block
            .predictions
            .iter()
            .map(PredictionRecord::taxpath_depth)
            .max()
        {
            println!("  Deepest taxpath: {depth}");
        }

        let totals = block.rank_totals();
        if !totals.is_empty() {
            println!("  Abundance by rank:");
            for (rank, total) in &totals {
                println!("    {:<14} {:>9.4}%", rank.as_str(), total);
            }
        }

        let unknown = block.unknown_rank_count();
        if unknown > 0 {
            println!("  Rows with unrecognized rank: {unknown}");
        }
    }
}

fn print_json(blocks: &[ProfileBlock]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(blocks)?);
    Ok(())
}

fn print_tsv(blocks: &[ProfileBlock]) {
    println!("sample_id\trank\ttaxid\tpercentage\ttaxpath\ttaxpathsn");
    for block in blocks {
        for p in &block.predictions {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                block.sample_id,
                p.rank,
                p.taxid,
                p.percentage,
                p.taxpath,
                p.taxpathsn.as_deref().unwrap_or("")
            );
        }
    }
}
