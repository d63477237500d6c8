//! Print the header and the raw bit stream of a compressed file.
//! Does not decompress anything.
//!
//! ```bash
//! readhuff output.huff
//! readhuff --codes output.huff
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use adaptive_huffman::inspect;


#[derive(Parser, Debug)]
#[command(name = "readhuff")]
#[command(version)]
#[command(about = "Show the header and bits of an adaptive Huffman file", long_about = None)]
struct Args {

    /// The compressed file
    input: PathBuf,

    /// Also print the codes used for the first symbol
    #[arg(long)]
    codes: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let compressed = match std::fs::read(&args.input) {
        Ok(bytes) => bytes,
        Err(error) => {
            eprintln!("could not open input file {}: {}", args.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let description = inspect::describe(&compressed).and_then(|description| {
        if args.codes { Ok(inspect::describe_first_codes(&compressed)? + "\n" + &description) }
        else { Ok(description) }
    });

    match description {
        Ok(description) => {
            print!("{}", description);
            ExitCode::SUCCESS
        },

        Err(error) => {
            eprintln!("could not read header of {}: {}", args.input.display(), error);
            ExitCode::FAILURE
        }
    }
}
