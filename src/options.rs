
//! How to read and write compressed files.

use crate::meta::header::FieldWidth;


/// Controls how strictly compressed data is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {

    /// If false, data after the last decoded symbol is ignored,
    /// as long as the header and the codes themselves are intact.
    /// If true, non-zero padding bits and trailing bytes are rejected.
    pub pedantic: bool,
}

impl ReadOptions {

    /// Reject any data that was not produced by this encoder.
    pub fn pedantic(self) -> Self { Self { pedantic: true, ..self } }
}


/// Controls the layout of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {

    /// The header uses at least this many bytes per frequency,
    /// or more if the largest frequency requires it.
    pub minimum_field_width: FieldWidth,
}

impl WriteOptions {

    /// Use at least the specified width for each frequency.
    pub fn with_minimum_field_width(self, minimum_field_width: FieldWidth) -> Self {
        Self { minimum_field_width, ..self }
    }
}
