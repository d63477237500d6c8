
//! Human readable dumps of compressed files, for debugging.
//! Nothing is decoded here: only the header is interpreted,
//! and the bit stream is printed as it is.

use std::fmt::{self, Write};
use crate::compression::tree::HuffmanTree;
use crate::error::{Error, Result};
use crate::meta::header::Header;


/// Print the header and the raw bit stream.
///
/// ```text
/// === HEADER ===
/// freq. size in bytes: 1
///
/// byte    freq
/// [ 97] - 3
/// [ 98] - 1
///
/// === COMPRESSED FILE ===
/// 00000000
/// ```
pub fn describe(compressed: &[u8]) -> Result<String> {
    let mut remaining = compressed;
    let header = Header::read(&mut remaining)?;

    let mut text = String::with_capacity(64 + remaining.len() * 8);
    write_header(&mut text, &header).map_err(format_error)?;

    text.push_str("\n=== COMPRESSED FILE ===\n");
    for &byte in remaining {
        push_binary(&mut text, byte).map_err(format_error)?;
    }

    text.push('\n');
    Ok(text)
}

/// Print the codes that the first symbol of the file would be coded with.
pub fn describe_first_codes(compressed: &[u8]) -> Result<String> {
    let mut remaining = compressed;
    let header = Header::read(&mut remaining)?;

    let mut text = String::from("=== HUFFMAN TABLE ===\nsym   freq   code\n");
    write_code_table(&mut text, &HuffmanTree::build(&header.frequencies)).map_err(format_error)?;
    Ok(text)
}

fn write_header(text: &mut String, header: &Header) -> fmt::Result {
    writeln!(text, "=== HEADER ===")?;
    writeln!(text, "freq. size in bytes: {}\n", header.field_width.byte_size())?;

    writeln!(text, "byte    freq")?;
    for (symbol, frequency) in header.frequencies.live_symbols() {
        writeln!(text, "[{:3}] - {}", symbol, frequency)?;
    }

    Ok(())
}

fn write_code_table(text: &mut String, tree: &HuffmanTree) -> fmt::Result {
    for (symbol, frequency, code) in tree.code_table() {
        writeln!(text, "[{:3}] - {:4} - {}", symbol, frequency, code)?;
    }

    Ok(())
}

fn push_binary(text: &mut String, byte: u8) -> fmt::Result {
    write!(text, "{:08b}", byte)
}

fn format_error(_: fmt::Error) -> Error {
    Error::invalid("description could not be formatted")
}
