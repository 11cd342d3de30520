//! Error types shared by every GameCube/Wii format reader
//!

use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(binrw::Error),

    /// The data does not describe the expected format (magic, version or header size mismatch)
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The source ran out of bytes in the middle of a read
    #[error("unexpected end of data")]
    UnexpectedEndOfData,

    /// Offsets or lengths inside the data contradict each other
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// The caller passed an unusable argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfData,
            _ => Error::IOError(value),
        }
    }
}

impl From<binrw::Error> for Error {
    fn from(value: binrw::Error) -> Self {
        match value {
            binrw::Error::Backtrace(backtrace) => Error::from(*backtrace.error),
            binrw::Error::BadMagic { pos, .. } => {
                Error::InvalidFormat(format!("bad magic at {pos:#x}"))
            }
            binrw::Error::AssertFail { pos, message } => {
                Error::InvalidFormat(format!("{message} at {pos:#x}"))
            }
            binrw::Error::Io(e) => Error::from(e),
            other => Error::BinRWError(other),
        }
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use std::io::{self, Cursor};

    use binrw::BinRead;

    use crate::error::Error;

    #[derive(BinRead, Debug)]
    #[br(magic = b"TEST", big)]
    struct Tagged {
        _value: u32,
    }

    #[test]
    fn eof_maps_to_unexpected_end() {
        let err = Error::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(matches!(err, Error::UnexpectedEndOfData));

        let err = Error::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::IOError(_)));
    }

    #[test]
    fn binrw_magic_maps_to_invalid_format() {
        let err = Tagged::read(&mut Cursor::new(b"NOPE\0\0\0\0")).unwrap_err();
        assert!(matches!(Error::from(err), Error::InvalidFormat(_)));
    }

    #[test]
    fn binrw_eof_maps_to_unexpected_end() {
        let err = Tagged::read(&mut Cursor::new(b"TEST\0\0")).unwrap_err();
        assert!(matches!(Error::from(err), Error::UnexpectedEndOfData));
    }
}
