// src/main.rs
mod logger;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huff", version)]
#[command(about = "A canonical Huffman file compressor.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Encode { input: PathBuf, output: PathBuf },
    /// Decompress a file
    Decode { input: PathBuf, output: PathBuf },
}

fn main() -> huff::Result<()> {
    logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { input, output } => {
            let summary = huff::encode_file(&input, &output)?;
            tracing::info!(
                original_bytes = summary.original_bytes,
                packed_bytes = summary.packed_bytes,
                output_bytes = summary.output_bytes(),
                ratio = summary.ratio(),
                "encoded {} to {}",
                input.display(),
                output.display()
            );
        }
        Commands::Decode { input, output } => {
            huff::decode_file(&input, &output)?;
            tracing::info!("decoded {} to {}", input.display(), output.display());
        }
    }
    Ok(())
}
