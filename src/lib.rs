
//! Compress and decompress byte streams with an adaptive Huffman code.
//!
//! The compressed file starts with the number of occurrences of each byte value.
//! Encoder and decoder then rebuild the whole Huffman tree before every symbol,
//! using only the occurrences that have not been processed yet.
//! Frequent symbols thus get shorter codes, and symbols that cannot occur anymore
//! do not waste any code space for the rest of the file.
//!
//! ```
//! use adaptive_huffman::prelude::*;
//!
//! let compressed = compress(b"abracadabra")?;
//! let decompressed = decompress(&compressed)?;
//! assert_eq!(decompressed, b"abracadabra");
//! # Ok::<(), adaptive_huffman::error::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    unused_must_use,
    missing_debug_implementations,
    clippy::all,
)]

pub mod io;
pub mod meta;
pub mod compression;
pub mod options;
pub mod inspect;
pub mod error;


use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use crate::error::UnitResult;
use crate::options::{ReadOptions, WriteOptions};


pub mod prelude {
    // main exports
    pub use crate::compression::{compress, decompress, compress_with, decompress_with};
    pub use crate::{compress_file, decompress_file};

    // secondary data types
    pub use crate::options::{ReadOptions, WriteOptions};
    pub use crate::meta::FrequencyTable;
    pub use crate::meta::header::{Header, FieldWidth};
    pub use crate::compression::tree::HuffmanTree;
    pub use crate::compression::code::Code;
    pub use crate::error;
    pub use crate::error::Error;
}


/// Compress a file into another file.
/// The input file is read twice.
pub fn compress_file(input: impl AsRef<Path>, output: impl AsRef<Path>, options: WriteOptions) -> UnitResult {
    let mut input = BufReader::new(File::open(input)?);
    let output = BufWriter::new(File::create(output)?);
    compression::write_compressed(&mut input, output, options)
}

/// Decompress a file into another file.
/// The output file is only created if decompression succeeded.
pub fn decompress_file(input: impl AsRef<Path>, output: impl AsRef<Path>, options: ReadOptions) -> UnitResult {
    let compressed = std::fs::read(input)?;
    let decompressed = compression::decompress_with(&compressed, options)?;
    std::fs::write(output, decompressed)?;
    Ok(())
}
