use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::sketch::loader::load_signature;
use crate::sketch::signature::Signature;

#[derive(Args)]
pub struct CompareArgs {
    /// First signature container
    #[arg(required = true)]
    pub input_a: PathBuf,

    /// Second signature container
    #[arg(required = true)]
    pub input_b: PathBuf,

    /// K-mer size to compare at
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub ksize: u32,
}

/// Overlap estimates between two signatures
struct Overlap {
    jaccard: f64,
    a_in_b: f64,
    b_in_a: f64,
    max_containment: f64,
}

impl Overlap {
    fn calculate(a: &Signature, b: &Signature) -> anyhow::Result<Self> {
        Ok(Self {
            jaccard: a.jaccard(b)?,
            a_in_b: a.contained_by(b)?,
            b_in_a: b.contained_by(a)?,
            max_containment: a.max_containment(b)?,
        })
    }
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let sig_a = load_signature(&args.input_a, args.ksize)?;
    let sig_b = load_signature(&args.input_b, args.ksize)?;

    if verbose {
        eprintln!(
            "Input A: {} ({} hashes)",
            sig_a.display_name(),
            sig_a.minhash.len()
        );
        eprintln!(
            "Input B: {} ({} hashes)",
            sig_b.display_name(),
            sig_b.minhash.len()
        );
    }

    let overlap = Overlap::calculate(&sig_a, &sig_b)?;

    match format {
        OutputFormat::Text => print_text_comparison(&args, &sig_a, &sig_b, &overlap),
        OutputFormat::Json => print_json_comparison(&args, &sig_a, &sig_b, &overlap)?,
        OutputFormat::Tsv => print_tsv_comparison(&overlap),
    }

    Ok(())
}

fn print_text_comparison(args: &CompareArgs, a: &Signature, b: &Signature, overlap: &Overlap) {
    println!("Comparison Results (k={})", args.ksize);
    println!("{}", "=".repeat(60));

    println!("\nInput A: {}", args.input_a.display());
    println!("  Name: {}", a.display_name());
    println!("  Hashes: {}", a.minhash.len());

    println!("\nInput B: {}", args.input_b.display());
    println!("  Name: {}", b.display_name());
    println!("  Hashes: {}", b.minhash.len());

    println!("\nSimilarity Scores:");
    println!("  Jaccard: {:.4}", overlap.jaccard);
    println!("  A contained by B: {:.4}", overlap.a_in_b);
    println!("  B contained by A: {:.4}", overlap.b_in_a);
    println!("  Max containment: {:.4}", overlap.max_containment);
}

fn print_json_comparison(
    args: &CompareArgs,
    a: &Signature,
    b: &Signature,
    overlap: &Overlap,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "ksize": args.ksize,
        "input_a": {
            "path": args.input_a.display().to_string(),
            "name": a.display_name(),
            "hashes": a.minhash.len(),
        },
        "input_b": {
            "path": args.input_b.display().to_string(),
            "name": b.display_name(),
            "hashes": b.minhash.len(),
        },
        "score": {
            "jaccard": overlap.jaccard,
            "a_contained_by_b": overlap.a_in_b,
            "b_contained_by_a": overlap.b_in_a,
            "max_containment": overlap.max_containment,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_comparison(overlap: &Overlap) {
    println!("jaccard\ta_contained_by_b\tb_contained_by_a\tmax_containment");
    println!(
        "{:.4}\t{:.4}\t{:.4}\t{:.4}",
        overlap.jaccard, overlap.a_in_b, overlap.b_in_a, overlap.max_containment,
    );
}
