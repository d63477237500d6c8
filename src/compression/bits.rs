
//! Packs codes into bytes and reads them back, most significant bit first.

use bit_field::BitField;
use crate::error::{Error, Result, UnitResult};
use crate::io::{Data, Write};
use super::code::Code;


/// The largest number of bits packed in one step.
const MAX_CHUNK_BITS: usize = 32;


/// Collects bits into a byte and writes each byte as soon as it is full.
#[derive(Debug)]
pub struct BitWriter<W> {
    write: W,

    /// The byte being filled, starting at the most significant bit.
    buffer: u8,

    /// Unwritten bit positions in the buffer, eight for an empty buffer.
    free_bits: u8,

    bit_count: u64,
}

impl<W: Write> BitWriter<W> {

    /// Start with an empty buffer.
    pub fn new(write: W) -> Self {
        BitWriter { write, buffer: 0, free_bits: 8, bit_count: 0 }
    }

    /// Append the lowest `count` bits of the value, most significant first.
    /// If they do not fit into the buffer, the high bits fill the buffer,
    /// which is then written, and the remaining low bits are packed into the next byte.
    pub fn write_bits(&mut self, count: usize, value: u64) -> UnitResult {
        debug_assert!(count <= MAX_CHUNK_BITS, "too many bits in one step");

        let mut remaining = count;
        while remaining > 0 {
            let free_bits = usize::from(self.free_bits);

            if remaining < free_bits {
                self.buffer |= ((value & low_bits(remaining)) << (free_bits - remaining)) as u8;
                self.free_bits -= remaining as u8;
                break;
            }

            remaining -= free_bits;
            self.buffer |= ((value >> remaining) & low_bits(free_bits)) as u8;
            self.buffer.write(&mut self.write)?;

            self.buffer = 0;
            self.free_bits = 8;
        }

        self.bit_count += count as u64;
        Ok(())
    }

    /// Append all bits of the code.
    pub fn write_code(&mut self, code: &Code) -> UnitResult {
        for chunk in code.bits().chunks(MAX_CHUNK_BITS) {
            let value = chunk.iter().fold(0_u64, |value, &bit| (value << 1) | u64::from(bit));
            self.write_bits(chunk.len(), value)?;
        }

        Ok(())
    }

    /// Number of bits appended so far, not counting padding.
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Write the last partially filled byte, if any.
    /// Its unused low bits are zero. The number of padding bits is not recorded.
    pub fn finish(mut self) -> Result<W> {
        if self.free_bits < 8 {
            self.buffer.write(&mut self.write)?;
        }

        Ok(self.write)
    }
}

#[inline]
fn low_bits(count: usize) -> u64 {
    debug_assert!(count < 64);
    (1_u64 << count) - 1
}


/// Hands out the bits of a byte slice, most significant bit first.
#[derive(Debug, Clone)]
pub struct BitReader<'b> {
    bytes: &'b [u8],
    byte_index: usize,

    /// Zero for the most significant bit.
    bit_index: usize,
}

impl<'b> BitReader<'b> {

    /// Start at the most significant bit of the first byte.
    pub fn new(bytes: &'b [u8]) -> Self {
        BitReader { bytes, byte_index: 0, bit_index: 0 }
    }

    /// The next bit, or `None` if all bytes have been consumed.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.bytes.get(self.byte_index)?;
        let bit = byte.get_bit(7 - self.bit_index);

        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.byte_index += 1;
        }

        Some(bit)
    }

    /// Number of bits consumed so far.
    pub fn bit_position(&self) -> u64 {
        self.byte_index as u64 * 8 + self.bit_index as u64
    }

    /// The unread low bits of a partially consumed byte, and how many there are.
    /// Returns zero bits if the reader is at a byte boundary.
    pub fn padding(&self) -> (u8, usize) {
        match self.bytes.get(self.byte_index) {
            Some(byte) if self.bit_index != 0 => {
                let count = 8 - self.bit_index;
                (byte.get_bits(0 .. count), count)
            },

            _ => (0, 0),
        }
    }

    /// The bytes after the partially consumed byte.
    pub fn remaining_bytes(&self) -> &'b [u8] {
        let start = self.byte_index + if self.bit_index == 0 { 0 } else { 1 };
        self.bytes.get(start ..).unwrap_or(&[])
    }

    /// Fail if any data follows the consumed bits, apart from zero padding.
    pub fn validate_end(&self) -> UnitResult {
        let (padding, _) = self.padding();
        if padding != 0 {
            return Err(Error::invalid("non-zero padding bits"));
        }

        if !self.remaining_bytes().is_empty() {
            return Err(Error::invalid("trailing bytes after the last symbol"));
        }

        Ok(())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn pack(codes: &[(usize, u64)]) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        for &(count, value) in codes { writer.write_bits(count, value).unwrap(); }
        writer.finish().unwrap()
    }

    #[test]
    fn codes_that_fit_share_a_byte(){
        assert_eq!(pack(&[ (1, 0b1), (2, 0b01), (3, 0b110) ]), vec![ 0b1011_1000 ]);
    }

    #[test]
    fn codes_are_split_across_bytes(){
        assert_eq!(pack(&[ (6, 0b111111), (4, 0b0101) ]), vec![ 0b1111_1101, 0b0100_0000 ]);
        assert_eq!(pack(&[ (3, 0b101), (13, 0b1_1001_1100_0011) ]), vec![ 0b1011_1001, 0b1100_0011 ]);
    }

    #[test]
    fn exact_fill_writes_the_byte(){
        assert_eq!(pack(&[ (8, 0xA5) ]), vec![ 0xA5 ]);
        assert_eq!(pack(&[ (4, 0xA), (4, 0x5) ]), vec![ 0xA5 ]);
        assert_eq!(pack(&[]), Vec::<u8>::new());
    }

    #[test]
    fn long_codes(){
        let bits: Vec<bool> = (0 .. 70).map(|index| index % 3 == 0).collect();
        let code = Code::from_bits(&bits);

        let mut writer = BitWriter::new(Vec::new());
        writer.write_code(&code).unwrap();
        assert_eq!(writer.bit_count(), 70);

        let bytes = writer.finish().unwrap();
        assert_eq!(bytes.len(), 9);

        let mut reader = BitReader::new(&bytes);
        let read: Vec<bool> = (0 .. 70).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(read, bits);
        assert_eq!(reader.padding(), (0, 2));
    }

    #[test]
    fn read_most_significant_first(){
        let mut reader = BitReader::new(&[ 0b1000_0001, 0b0100_0000 ]);

        assert_eq!(reader.read_bit(), Some(true));
        for _ in 0 .. 6 { assert_eq!(reader.read_bit(), Some(false)); }
        assert_eq!(reader.read_bit(), Some(true));

        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.bit_position(), 10);
        assert_eq!(reader.padding(), (0, 6));
        assert!(reader.validate_end().is_ok());

        for _ in 0 .. 6 { reader.read_bit().unwrap(); }
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn detect_trailing_data(){
        let mut reader = BitReader::new(&[ 0b1010_0000, 0 ]);
        reader.read_bit();
        assert!(reader.validate_end().is_err());

        reader.read_bit();
        reader.read_bit();
        assert_eq!(reader.remaining_bytes(), &[ 0 ]);
        assert!(reader.validate_end().is_err());

        let mut reader = BitReader::new(&[ 0b1010_0001 ]);
        for _ in 0 .. 3 { reader.read_bit(); }
        assert_eq!(reader.padding(), (1, 5));
        assert!(reader.validate_end().is_err());
    }
}
