//! Compress or decompress a single file.
//!
//! ## Usage
//!
//! ```bash
//! # compress
//! huffman c input.txt output.huff
//!
//! # decompress
//! huffman d output.huff input.txt
//!
//! # show every coded symbol
//! huffman --log-level trace c input.txt output.huff
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use adaptive_huffman::compression::{decompress_with, write_compressed};
use adaptive_huffman::prelude::{FieldWidth, ReadOptions, WriteOptions};


#[derive(Parser, Debug)]
#[command(name = "huffman")]
#[command(version)]
#[command(about = "Adaptive Huffman file compression", long_about = None)]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", value_parser = parse_log_level)]
    log_level: Level,
}

#[derive(Subcommand, Debug)]
enum Mode {

    /// Compress the input file into the output file
    #[command(name = "c")]
    Compress {
        input: PathBuf,
        output: PathBuf,

        /// Use at least this many bytes per frequency in the header (1, 2, 4 or 8)
        #[arg(long, default_value = "1", value_parser = parse_field_width)]
        field_width: FieldWidth,
    },

    /// Decompress the input file into the output file
    #[command(name = "d")]
    Decompress {
        input: PathBuf,
        output: PathBuf,

        /// Reject trailing bytes and non-zero padding bits
        #[arg(long)]
        pedantic: bool,
    },
}

fn parse_log_level(text: &str) -> Result<Level, String> {
    Level::from_str(text).map_err(|error| format!("{}", error))
}

fn parse_field_width(text: &str) -> Result<FieldWidth, String> {
    let byte_size: u8 = text.parse().map_err(|error| format!("{}", error))?;
    FieldWidth::from_byte_size(byte_size).map_err(|_| String::from("must be one of 1, 2, 4 or 8"))
}


fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let result = match args.mode {
        Mode::Compress { input, output, field_width } =>
            compress(&input, &output, WriteOptions::default().with_minimum_field_width(field_width)),

        Mode::Decompress { input, output, pedantic } =>
            decompress(&input, &output, ReadOptions { pedantic }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn initialize_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // only fails if a subscriber was already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn compress(input: &Path, output: &Path, options: WriteOptions) -> Result<(), String> {
    let mut read = BufReader::new(File::open(input)
        .map_err(|error| format!("could not open input file {}: {}", input.display(), error))?);

    let write = BufWriter::new(File::create(output)
        .map_err(|error| format!("could not open output file {}: {}", output.display(), error))?);

    info!(input = %input.display(), output = %output.display(), "compressing");

    write_compressed(&mut read, write, options).map_err(|error| {
        // do not leave a partially written file behind
        let _ = std::fs::remove_file(output);
        format!("could not compress {}: {}", input.display(), error)
    })
}

fn decompress(input: &Path, output: &Path, options: ReadOptions) -> Result<(), String> {
    let mut read = File::open(input)
        .map_err(|error| format!("could not open input file {}: {}", input.display(), error))?;

    let mut compressed = Vec::new();
    read.read_to_end(&mut compressed)
        .map_err(|error| format!("could not read input file {}: {}", input.display(), error))?;

    info!(input = %input.display(), output = %output.display(), "decompressing");

    let decompressed = decompress_with(&compressed, options)
        .map_err(|error| format!("could not decompress {}: {}", input.display(), error))?;

    std::fs::write(output, decompressed)
        .map_err(|error| format!("could not open output file {}: {}", output.display(), error))
}
