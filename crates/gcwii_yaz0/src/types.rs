//! Base types for the structure of Yaz0 data.

use binrw::BinRead;

/// Size of [`Yaz0Header`] on disk; the encoded stream starts right after it
pub const HEADER_SIZE: usize = 0x10;

/// Yaz0 header
///
/// Always starts with "Yaz0" and stores its fields big-endian.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[br(magic = b"Yaz0", big)]
pub struct Yaz0Header {
    /// Exact size of the data once decompressed
    pub decompressed_size: u32,

    /// Bytes with no known use, zero in files written by the official tools
    pub reserved: [u8; 8],
}
