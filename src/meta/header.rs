
//! The header at the start of each compressed file.
//! Contains the frequency of each symbol in the original file.

use crate::error::{Error, Result, UnitResult};
use crate::io::{Data, Read, Write};
use crate::meta::{FrequencyTable, ALPHABET_SIZE};


/// The number of bytes used for each frequency in the header.
/// The header uses the smallest width that can hold the largest frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldWidth {

    /// One byte per frequency, for files where no symbol occurs more than 255 times.
    U8,

    /// Two bytes per frequency.
    U16,

    /// Four bytes per frequency.
    U32,

    /// Eight bytes per frequency.
    U64,
}

impl FieldWidth {

    /// The smallest width that can store the specified frequency.
    pub fn for_max_frequency(max_frequency: u64) -> Self {
        if max_frequency <= u64::from(u8::MAX) { FieldWidth::U8 }
        else if max_frequency <= u64::from(u16::MAX) { FieldWidth::U16 }
        else if max_frequency <= u64::from(u32::MAX) { FieldWidth::U32 }
        else { FieldWidth::U64 }
    }

    /// Number of bytes per frequency.
    pub fn byte_size(self) -> usize {
        match self {
            FieldWidth::U8 => u8::BYTE_SIZE,
            FieldWidth::U16 => u16::BYTE_SIZE,
            FieldWidth::U32 => u32::BYTE_SIZE,
            FieldWidth::U64 => u64::BYTE_SIZE,
        }
    }

    /// Largest frequency that fits into this width.
    pub fn max_frequency(self) -> u64 {
        match self {
            FieldWidth::U8 => u8::MAX.into(),
            FieldWidth::U16 => u16::MAX.into(),
            FieldWidth::U32 => u32::MAX.into(),
            FieldWidth::U64 => u64::MAX,
        }
    }

    /// Interpret the first header byte.
    pub fn from_byte_size(byte_size: u8) -> Result<Self> {
        match byte_size {
            1 => Ok(FieldWidth::U8),
            2 => Ok(FieldWidth::U16),
            4 => Ok(FieldWidth::U32),
            8 => Ok(FieldWidth::U64),
            _ => Err(Error::invalid("frequency field width")),
        }
    }

    /// Read a single frequency with this width.
    pub fn read_frequency(self, read: &mut impl Read) -> Result<u64> {
        Ok(match self {
            FieldWidth::U8 => u8::read(read)?.into(),
            FieldWidth::U16 => u16::read(read)?.into(),
            FieldWidth::U32 => u32::read(read)?.into(),
            FieldWidth::U64 => u64::read(read)?,
        })
    }

    /// Write a single frequency with this width.
    /// Fails if the value does not fit.
    pub fn write_frequency(self, frequency: u64, write: &mut impl Write) -> UnitResult {
        if frequency > self.max_frequency() {
            return Err(Error::invalid("frequency too large for field width"));
        }

        // the range check above makes these casts lossless
        match self {
            FieldWidth::U8 => (frequency as u8).write(write),
            FieldWidth::U16 => (frequency as u16).write(write),
            FieldWidth::U32 => (frequency as u32).write(write),
            FieldWidth::U64 => frequency.write(write),
        }
    }
}

impl Default for FieldWidth {
    fn default() -> Self { FieldWidth::U8 }
}


/// Describes the original file: how often each byte value occurs.
/// Written once, directly followed by the packed bit stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {

    /// Number of bytes per frequency in the table.
    pub field_width: FieldWidth,

    /// Occurrence count per symbol in the whole original file.
    pub frequencies: FrequencyTable,
}

impl Header {

    /// Use the smallest field width that can hold all frequencies.
    pub fn new(frequencies: FrequencyTable) -> Self {
        Self::with_minimum_field_width(frequencies, FieldWidth::U8)
    }

    /// Use the smallest field width that can hold all frequencies,
    /// but not less than the specified width.
    pub fn with_minimum_field_width(frequencies: FrequencyTable, minimum: FieldWidth) -> Self {
        let field_width = FieldWidth::for_max_frequency(frequencies.max()).max(minimum);
        Header { field_width, frequencies }
    }

    /// Number of bytes this header occupies in a file.
    pub fn byte_size(&self) -> usize {
        u8::BYTE_SIZE + ALPHABET_SIZE * self.field_width.byte_size()
    }

    /// Read the field width and all 256 frequencies.
    /// Returns `Error::Invalid` for unknown widths, a table that ends early,
    /// or frequencies that sum up to more than 64 bits can hold.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        let field_width = FieldWidth::from_byte_size(u8::read(read)?)?;

        let mut counts = [0_u64; ALPHABET_SIZE];
        for count in counts.iter_mut() {
            *count = field_width.read_frequency(read)?;
        }

        Ok(Header { field_width, frequencies: FrequencyTable::from_counts(counts)? })
    }

    /// Write the field width and all 256 frequencies.
    pub fn write(&self, write: &mut impl Write) -> UnitResult {
        (self.field_width.byte_size() as u8).write(write)?;

        for &frequency in self.frequencies.counts() {
            self.field_width.write_frequency(frequency, write)?;
        }

        Ok(())
    }
}
