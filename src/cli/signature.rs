use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::sketch::loader::load_signature;
use crate::sketch::signature::Signature;

#[derive(Args)]
pub struct SignatureArgs {
    /// Signature container (.sig, .sig.gz, or .zip)
    #[arg(required = true)]
    pub input: PathBuf,

    /// K-mer size of the signature to load
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub ksize: u32,
}

pub fn run(args: SignatureArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let signature = load_signature(&args.input, args.ksize)?;

    if verbose {
        eprintln!(
            "Loaded '{}' (k={}) from {}",
            signature.display_name(),
            signature.ksize(),
            args.input.display()
        );
    }

    match format {
        OutputFormat::Text => print_text(&args, &signature),
        OutputFormat::Json => print_json(&signature)?,
        OutputFormat::Tsv => print_tsv(&signature),
    }

    Ok(())
}

fn print_text(args: &SignatureArgs, signature: &Signature) {
    let mh = &signature.minhash;

    println!("Signature: {}", signature.display_name());
    println!("{}", "=".repeat(60));
    println!("  Source: {}", args.input.display());
    if let Some(filename) = &signature.filename {
        println!("  Filename: {filename}");
    }
    println!("  K-mer size: {}", mh.ksize);
    println!("  Molecule: {}", mh.molecule);
    if mh.max_hash > 0 {
        println!("  Scaled: {}", mh.scaled());
    } else {
        println!("  Num: {}", mh.num);
    }
    println!("  Hashes: {}", mh.len());
    println!("  Abundance tracked: {}", mh.abundances.is_some());
    println!("  MD5: {}", signature.md5sum());
}

fn print_json(signature: &Signature) -> anyhow::Result<()> {
    let mh = &signature.minhash;
    let output = serde_json::json!({
        "name": signature.display_name(),
        "filename": signature.filename,
        "ksize": mh.ksize,
        "molecule": mh.molecule,
        "scaled": mh.scaled(),
        "num": mh.num,
        "hashes": mh.len(),
        "track_abundance": mh.abundances.is_some(),
        "md5sum": signature.md5sum(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(signature: &Signature) {
    let mh = &signature.minhash;
    println!("name\tksize\tmolecule\tscaled\thashes\tmd5sum");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        signature.display_name(),
        mh.ksize,
        mh.molecule,
        mh.scaled(),
        mh.len(),
        signature.md5sum()
    );
}
