
//! Error type definitions.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::io::ErrorKind;
pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;


/// A result that may contain a compression error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains a compression error.
pub type UnitResult = Result<()>;


/// An error that may happen while compressing or decompressing.
/// Distinguishes between three types of errors:
/// unsupported features, invalid data, and file system errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {

    /// The contents of the stream are valid,
    /// but cannot be represented on this platform.
    #[error("not supported: {0}")]
    NotSupported(Cow<'static, str>),

    /// The compressed stream is damaged.
    /// For example, the header is malformed or the bit stream ends too early.
    #[error("invalid: {0}")]
    Invalid(Cow<'static, str>),

    /// The underlying byte stream could not be read or written.
    #[error("io error: {0}")]
    Io(#[source] IoError),
}


impl Error {

    /// Create an error of the variant `Invalid`.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }

    /// Create an error of the variant `NotSupported`.
    pub(crate) fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Error::NotSupported(message.into())
    }
}

/// Enable using the `?` operator on `std::io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        if error.kind() == ErrorKind::UnexpectedEof {
            Error::invalid("reference to missing bytes")
        }
        else {
            Error::Io(error)
        }
    }
}


/// Convert a symbol count to `usize`, returning an error if it does not fit on this platform.
#[inline]
pub(crate) fn u64_to_usize(value: u64, error_message: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::unsupported(error_message))
}
