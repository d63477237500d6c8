
//! Specialized binary input and output.
//! Uses the error handling for this crate.

pub use ::std::io::{Read, Write};
use lebe::prelude::*;
use crate::error::{Result, UnitResult, IoResult};


/// Keep track of how many bytes have been written.
/// Used to report the compressed size without requiring a seekable output.
#[derive(Debug)]
pub struct Tracking<T> {

    /// Do not expose to prevent writing without updating position
    inner: T,

    position: usize,
}

impl<T: Write> Write for Tracking<T> {
    fn write(&mut self, buffer: &[u8]) -> IoResult<usize> {
        let count = self.inner.write(buffer)?;
        self.position += count;
        Ok(count)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.inner.flush()
    }
}

impl<T> Tracking<T> {

    /// Start counting at zero bytes.
    pub fn new(inner: T) -> Self {
        Tracking { inner, position: 0 }
    }

    /// Current number of bytes written.
    pub fn byte_position(&self) -> usize {
        self.position
    }
}


/// Generic trait that defines common binary operations such as reading and writing for this type.
/// All values are stored in little endian byte order.
pub trait Data: Sized + Default + Clone {
    const BYTE_SIZE: usize = ::std::mem::size_of::<Self>();

    /// Read a value of type `Self`.
    /// Returns `Error::Invalid` if the reader ends before the value is complete.
    fn read(read: &mut impl Read) -> Result<Self>;

    /// Write this value to the writer.
    fn write(self, write: &mut impl Write) -> UnitResult;
}


macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            #[inline]
            fn read(read: &mut impl Read) -> Result<Self> {
                Ok(read.read_from_little_endian()?)
            }

            #[inline]
            fn write(self, write: &mut impl Write) -> Result<()> {
                write.write_as_little_endian(&self)?;
                Ok(())
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(u16);
implement_data_for_primitive!(u32);
implement_data_for_primitive!(u64);
