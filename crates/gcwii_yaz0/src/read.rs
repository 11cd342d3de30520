//! Functions for decompressing Yaz0 data
//!

use std::{
    fs::File,
    io::{Cursor, Read},
    path::Path,
};

use gcwii_io::{ByteOrder, EndianStream, Error, Result};
use tracing::{debug, instrument, trace};

use crate::types::{Yaz0Header, HEADER_SIZE};

/// Magic word at the start of every Yaz0 stream
pub const MAGIC: &[u8; 4] = b"Yaz0";

// One input byte never expands to more than a maximum length run.
const MAX_RUN: usize = 0xFF + 0x12;

/// Whether `data` starts with the Yaz0 magic word
pub fn has_magic(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

/// Read only the header of a Yaz0 stream
pub fn read_header(input: &[u8]) -> Result<Yaz0Header> {
    EndianStream::new(Cursor::new(input), ByteOrder::BigEndian).read_type()
}

/// Decompress a complete Yaz0 stream held in memory
///
/// ```
/// #[rustfmt::skip]
/// let input = [
///     b'Y', b'a', b'z', b'0', 0x00, 0x00, 0x00, 0x03,
///     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
///     0xE0, b'a', b'b', b'c',
/// ];
///
/// assert_eq!(gcwii_yaz0::decompress(&input).unwrap(), b"abc");
/// ```
#[instrument(skip_all, fields(input = input.len()), err)]
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let header = read_header(input)?;
    debug!(
        decompressed_size = header.decompressed_size,
        "decoding yaz0 stream"
    );

    decode(&input[HEADER_SIZE..], header.decompressed_size as usize)
}

/// Decompress a Yaz0 file from disk
#[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
pub fn decompress_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = existing_file(path.as_ref())?;
    decompress(&std::fs::read(path)?)
}

/// Check whether a file is Yaz0 compressed by looking at its first four bytes
///
/// Files shorter than the magic word are reported as not compressed.
#[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
pub fn is_compressed(path: impl AsRef<Path>) -> Result<bool> {
    let path = existing_file(path.as_ref())?;

    let mut magic = Vec::with_capacity(MAGIC.len());
    File::open(path)?
        .take(MAGIC.len() as u64)
        .read_to_end(&mut magic)?;

    Ok(has_magic(&magic))
}

fn existing_file(path: &Path) -> Result<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::InvalidArgument(format!(
            "{} does not exist",
            path.display()
        )))
    }
}

/// Run the decoder over the encoded stream that follows the header
///
/// Each control byte is consumed MSB first: a set bit copies one literal byte, a clear bit
/// starts a back-reference into the output produced so far. Back-references may overlap the
/// bytes they are writing, so runs are copied one byte at a time.
fn decode(encoded: &[u8], size: usize) -> Result<Vec<u8>> {
    let mut src = encoded.iter().copied();
    let mut next_byte = || src.next().ok_or(Error::UnexpectedEndOfData);

    let mut out = Vec::with_capacity(size.min(encoded.len().saturating_mul(MAX_RUN)));
    let mut code = 0u8;
    let mut valid_bits = 0u32;

    while out.len() < size {
        if valid_bits == 0 {
            code = next_byte()?;
            valid_bits = 8;
        }

        if code & 0x80 != 0 {
            out.push(next_byte()?);
        } else {
            let first = next_byte()?;
            let second = next_byte()?;

            let distance = ((((first & 0x0F) as usize) << 8) | second as usize) + 1;
            let length = match first >> 4 {
                0 => next_byte()? as usize + 0x12,
                nibble => nibble as usize + 2,
            };
            trace!(distance, length, at = out.len(), "back-reference");

            let start = out.len().checked_sub(distance).ok_or_else(|| {
                Error::CorruptData(format!(
                    "back-reference {distance} bytes behind position {}",
                    out.len()
                ))
            })?;
            if out.len() + length > size {
                return Err(Error::CorruptData(format!(
                    "run of {length} bytes at {} overruns the declared size {size}",
                    out.len()
                )));
            }

            for i in start..start + length {
                let byte = out[i];
                out.push(byte);
            }
        }

        code <<= 1;
        valid_bits -= 1;
    }

    Ok(out)
}
