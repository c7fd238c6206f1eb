//! The `errors` module defines the common error types.

use std::error;
use std::fmt;
use std::io;

use super::Result;

/// `Error` provides an enumeration of all possible errors reported by the codec.
#[derive(Debug)]
pub enum Error {
    /// An IO error occurred while reading or writing the compressed stream.
    IoError(io::Error),
    /// The stream contained malformed data and could not be parsed.
    ParseError(String),
    /// A caller-supplied argument violated a precondition of the API.
    InvalidArgument(&'static str),
    /// Clean end-of-stream: no bytes remain at a block boundary.
    Eof,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => err.fmt(f),
            Error::ParseError(ref msg) => write!(f, "fpc data invalid: {}", msg),
            Error::InvalidArgument(ref msg) => write!(f, "invalid argument: {}", msg),
            Error::Eof => write!(f, "end of stream"),
        }
    }
}

impl error::Error for Error {
    fn cause(&self) -> Option<&dyn error::Error> {
        match *self {
            Error::IoError(ref err) => Some(err),
            Error::ParseError(_) => None,
            Error::InvalidArgument(_) => None,
            Error::Eof => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Eof
        } else {
            Error::IoError(err)
        }
    }
}

/// Creates a parse (format) error.
pub fn parse_error<T>(desc: impl Into<String>) -> Result<T> {
    Err(Error::ParseError(desc.into()))
}

/// Creates an invalid-argument error.
pub fn invalid_argument<T>(desc: &'static str) -> Result<T> {
    Err(Error::InvalidArgument(desc))
}
