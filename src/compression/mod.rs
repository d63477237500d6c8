
//! Compress and decompress with the adaptive Huffman code.
//!
//! Both directions start from the frequency table of the whole file.
//! Before each symbol, a fresh tree is built from the occurrences that remain,
//! and after each symbol, the occurrence count of that symbol is decremented.
//! The decoder performs the very same steps in the very same order,
//! so its n-th tree equals the n-th tree of the encoder.
//! The end of the data is reached when no occurrences remain,
//! so neither the number of symbols nor the number of padding bits is stored.


pub mod tree;
pub mod code;
pub mod bits;


use std::io::{BufReader, Cursor, Read, Seek, SeekFrom, Write};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result, UnitResult, u64_to_usize};
use crate::io::Tracking;
use crate::meta::FrequencyTable;
use crate::meta::header::Header;
use crate::options::{ReadOptions, WriteOptions};
use self::bits::{BitReader, BitWriter};
use self::tree::HuffmanTree;


/// A byte vector.
pub type ByteVec = Vec<u8>;

/// A byte slice.
pub type Bytes<'s> = &'s [u8];


const NOT_ENOUGH_DATA: &'static str =
    "compressed data ends before the last symbol";
const INVALID_CODE: &'static str =
    "code refers to a node that does not exist";
const FREQUENCY_OVERFLOW: &'static str =
    "sum of all frequencies in the header is too large";
const TOO_LARGE: &'static str =
    "decompressed size does not fit into memory";
const INPUT_CHANGED: &'static str =
    "input data changed between counting and encoding";

/// Do not preallocate more than this many bytes,
/// as the header may claim an arbitrarily large size.
const SOFT_MAX_CAPACITY: usize = 1 << 24;


/// Compress the bytes, using the smallest possible header.
pub fn compress(uncompressed: Bytes<'_>) -> Result<ByteVec> {
    compress_with(uncompressed, WriteOptions::default())
}

/// Compress the bytes with the specified header options.
pub fn compress_with(uncompressed: Bytes<'_>, options: WriteOptions) -> Result<ByteVec> {
    let mut compressed = Vec::with_capacity(uncompressed.len() / 2 + 1024);
    write_compressed(&mut Cursor::new(uncompressed), &mut compressed, options)?;
    Ok(compressed)
}

/// Decompress the bytes, ignoring any padding after the last symbol.
pub fn decompress(compressed: Bytes<'_>) -> Result<ByteVec> {
    decompress_with(compressed, ReadOptions::default())
}

/// Compress all bytes from the current position of the reader to its end.
///
/// The input is read twice: once to count the symbols for the header,
/// and once more after seeking back, to encode each symbol.
pub fn write_compressed(read: &mut (impl Read + Seek), write: impl Write, options: WriteOptions) -> UnitResult {
    let start = read.stream_position()?;
    let mut frequencies = count_frequencies(&mut *read)?;
    read.seek(SeekFrom::Start(start))?;

    let header = Header::with_minimum_field_width(frequencies.clone(), options.minimum_field_width);
    debug!(
        symbols = frequencies.total().unwrap_or(u64::MAX),
        distinct = frequencies.live_count(),
        field_width = header.field_width.byte_size(),
        "compressing"
    );

    let mut write = Tracking::new(write);
    header.write(&mut write)?;

    let mut bits = BitWriter::new(&mut write);
    for byte in BufReader::new(read).bytes() {
        encode_symbol(&mut frequencies, byte?, &mut bits)?;
    }

    if !frequencies.is_empty() {
        return Err(Error::invalid(INPUT_CHANGED));
    }

    let bit_count = bits.bit_count();
    bits.finish()?;
    write.flush()?;

    debug!(bits = bit_count, bytes = write.byte_position(), "compressed");
    Ok(())
}

/// Decompress the bytes.
/// Fails if the header is damaged, or if the data ends before all symbols are decoded.
pub fn decompress_with(compressed: Bytes<'_>, options: ReadOptions) -> Result<ByteVec> {
    let mut remaining = compressed;
    let header = Header::read(&mut remaining)?;
    let mut frequencies = header.frequencies;

    let total = frequencies.total().ok_or_else(|| Error::invalid(FREQUENCY_OVERFLOW))?;
    let expected_size = u64_to_usize(total, TOO_LARGE)?;

    debug!(
        symbols = total,
        distinct = frequencies.live_count(),
        field_width = header.field_width.byte_size(),
        "decompressing"
    );

    let mut bits = BitReader::new(remaining);
    // every symbol takes at least one bit
    let available_bits = remaining.len().saturating_mul(8);
    let mut decompressed = Vec::with_capacity(expected_size.min(available_bits).min(SOFT_MAX_CAPACITY));

    // the remaining count decides when to stop, never the end of the input
    let mut symbols_left = total;
    while symbols_left > 0 {
        let symbol = decode_symbol(&frequencies, &mut bits)?;
        frequencies.decrement(symbol);
        symbols_left -= 1;
        decompressed.push(symbol);
    }

    if options.pedantic {
        bits.validate_end()?;
    }
    else if !bits.remaining_bytes().is_empty() {
        warn!(bytes = bits.remaining_bytes().len(), "ignoring trailing bytes after the last symbol");
    }

    debug!(bits = bits.bit_position(), bytes = decompressed.len(), "decompressed");
    Ok(decompressed)
}

/// Decompress all bytes from the reader into the writer.
/// Nothing is written unless the whole input was decoded successfully.
pub fn read_decompressed(mut read: impl Read, mut write: impl Write, options: ReadOptions) -> UnitResult {
    let mut compressed = Vec::new();
    read.read_to_end(&mut compressed)?;

    let decompressed = decompress_with(&compressed, options)?;
    write.write_all(&decompressed)?;
    write.flush()?;
    Ok(())
}


fn count_frequencies(read: impl Read) -> Result<FrequencyTable> {
    let mut frequencies = FrequencyTable::new();

    for byte in BufReader::new(read).bytes() {
        frequencies.increment(byte?);
    }

    Ok(frequencies)
}

/// Code the symbol against the remaining occurrences, then remove one occurrence.
fn encode_symbol(frequencies: &mut FrequencyTable, symbol: u8, bits: &mut BitWriter<impl Write>) -> UnitResult {
    let tree = HuffmanTree::build(frequencies);
    let code = tree.code_of(symbol).ok_or_else(|| Error::invalid(INPUT_CHANGED))?;

    trace!(symbol, %code, "encode");
    bits.write_code(&code)?;

    frequencies.decrement(symbol);
    Ok(())
}

/// Follow the bits from the root of a fresh tree until a leaf is reached.
fn decode_symbol(frequencies: &FrequencyTable, bits: &mut BitReader<'_>) -> Result<u8> {
    let tree = HuffmanTree::build(frequencies);
    let mut node = tree.root().ok_or_else(|| Error::invalid(NOT_ENOUGH_DATA))?;

    loop {
        if let Some(symbol) = tree.symbol(node) {
            trace!(symbol, "decode");
            return Ok(symbol);
        }

        let bit = bits.read_bit().ok_or_else(|| Error::invalid(NOT_ENOUGH_DATA))?;
        node = tree.child(node, bit).ok_or_else(|| Error::invalid(INVALID_CODE))?;
    }
}
