use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdfpress::{
    compress_file, inspect_file, output_name, ArchiveWriter, CompressOptions, ARCHIVE_NAME,
    DEFAULT_LEVEL,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pdfpress",
    about = "Strip PDF metadata and repack documents with object streams",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress one PDF, or several into a ZIP archive
    Compress {
        /// Input PDF files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output path (defaults to compressed_<name> or compressed_pdfs.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression level hint
        #[arg(short, long, default_value = DEFAULT_LEVEL)]
        level: String,

        /// Target size hint in megabytes
        #[arg(long)]
        max_mb: Option<f64>,
    },

    /// Show version, page count and metadata of a PDF file
    Info {
        /// Input PDF file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compress {
            files,
            output,
            level,
            max_mb,
        } => {
            let options = CompressOptions::default()
                .with_level(level)
                .with_max_mb(max_mb);

            if let [single] = files.as_slice() {
                compress_single(single, output, &options)?;
            } else {
                compress_batch(&files, output, &options)?;
            }
        }

        Commands::Info { input } => {
            let summary = inspect_file(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;

            println!("PDF Information for: {}", input.display());
            println!("==========================================");
            println!("PDF Version: {}", summary.version);
            println!("Pages: {}", summary.pages);
            println!("Encrypted: {}", if summary.encrypted { "yes" } else { "no" });
            for (field, value) in summary.metadata.fields() {
                match value {
                    Some(value) => println!("{field}: {value}"),
                    None => println!("{field}: (not set)"),
                }
            }
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid file name: {}", path.display()))
}

fn compress_single(input: &Path, output: Option<PathBuf>, options: &CompressOptions) -> Result<()> {
    let name = file_name(input)?;
    let output = output.unwrap_or_else(|| PathBuf::from(output_name(name)));

    let original = std::fs::metadata(input)
        .with_context(|| format!("failed to read {}", input.display()))?
        .len();
    let compressed = compress_file(input, options)
        .with_context(|| format!("failed to compress {}", input.display()))?;
    std::fs::write(&output, &compressed)
        .with_context(|| format!("failed to write {}", output.display()))?;

    print_summary(name, original, compressed.len() as u64);
    println!("Wrote {}", output.display());
    Ok(())
}

fn compress_batch(inputs: &[PathBuf], output: Option<PathBuf>, options: &CompressOptions) -> Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(ARCHIVE_NAME));
    let sink = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut archive = ArchiveWriter::new(BufWriter::new(sink));

    for input in inputs {
        let name = file_name(input)?;
        let original = std::fs::metadata(input)
            .with_context(|| format!("failed to read {}", input.display()))?
            .len();
        let compressed = compress_file(input, options)
            .with_context(|| format!("failed to compress {}", input.display()))?;

        let stored = archive.append(&output_name(name), &compressed)?;
        debug!(entry = %stored, "archive entry written");
        print_summary(name, original, compressed.len() as u64);
    }

    archive.finish()?;
    println!("Wrote {} ({} files)", output.display(), inputs.len());
    Ok(())
}

fn print_summary(name: &str, original: u64, compressed: u64) {
    let change = if original == 0 {
        0.0
    } else {
        (compressed as f64 - original as f64) / original as f64 * 100.0
    };
    println!("{name}: {original} -> {compressed} bytes ({change:+.1}%)");
}
