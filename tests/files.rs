//! Compress real files from disk.
//! Uses the source code of this crate as test data.

extern crate adaptive_huffman;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use adaptive_huffman::prelude::*;


fn source_files() -> impl Iterator<Item=PathBuf> {
    walkdir::WalkDir::new("src").into_iter().map(std::result::Result::unwrap)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("rs")))
        .map(walkdir::DirEntry::into_path)
}

/// A path in the temporary directory that no other test uses.
fn temporary_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("adaptive-huffman-{}-{}", std::process::id(), name))
}

#[test]
fn roundtrip_all_source_files(){
    let files: Vec<PathBuf> = source_files().collect();
    assert!(!files.is_empty(), "no source files found");

    files.into_par_iter().for_each(|path| {
        let original = std::fs::read(&path).unwrap();
        let compressed = compress(&original).unwrap();

        let header_size = Header::read(&mut compressed.as_slice()).unwrap().byte_size();
        assert!(
            compressed.len() - header_size < original.len(),
            "{:?} grew from {} to {} bytes", path, original.len(), compressed.len()
        );

        let decompressed = decompress_with(&compressed, ReadOptions::default().pedantic()).unwrap();
        assert!(decompressed == original, "{:?} did not survive compression", path);
    });
}

#[test]
fn compress_and_decompress_file(){
    let input = Path::new("src/lib.rs");
    let compressed = temporary_path("lib.rs.huff");
    let decompressed = temporary_path("lib.rs");

    compress_file(input, &compressed, WriteOptions::default()).unwrap();
    decompress_file(&compressed, &decompressed, ReadOptions::default().pedantic()).unwrap();

    assert_eq!(std::fs::read(input).unwrap(), std::fs::read(&decompressed).unwrap());

    std::fs::remove_file(compressed).unwrap();
    std::fs::remove_file(decompressed).unwrap();
}

#[test]
fn failed_decompression_creates_no_file(){
    let damaged = temporary_path("damaged.huff");
    let output = temporary_path("damaged.out");

    let mut compressed = compress(b"some text to damage").unwrap();
    compressed.truncate(compressed.len() - 1);
    std::fs::write(&damaged, compressed).unwrap();

    let result = decompress_file(&damaged, &output, ReadOptions::default());
    assert!(matches!(result, Err(Error::Invalid(_))));
    assert!(!output.exists());

    std::fs::remove_file(damaged).unwrap();
}

#[test]
fn missing_input_file(){
    let result = compress_file("does/not/exist.txt", temporary_path("never.huff"), WriteOptions::default());
    assert!(matches!(result, Err(Error::Io(_))));
}
