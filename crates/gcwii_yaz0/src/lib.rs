//! This library handles decompressing **Yaz0** data used by *GameCube* and *Wii* games.
//!
//! # Yaz0 Format Documentation
//!
//! Yaz0 is a byte oriented LZ77 variant. Files compressed with it usually carry the `.szs`
//! extension (a compressed RARC archive) or keep their original extension.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                           |
//! |----------------|------------------------|-------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "Yaz0"                                       |
//! | 0x0004         | Decompressed Size      | 4 bytes: Exact size of the output                     |
//! | 0x0008         | Reserved               | 8 bytes: Zero                                         |
//! | 0x0010         | Data                   | Encoded stream                                        |
//!
//! ### Encoded Stream
//!
//! The stream is a sequence of groups. Each group starts with a control byte whose bits are
//! read from the most significant down:
//!
//! - **Set bit**: copy the next input byte to the output.
//! - **Clear bit**: read a back-reference of two or three bytes.
//!
//! | Bytes              | Layout                 | Meaning                                        |
//! |--------------------|------------------------|------------------------------------------------|
//! | `NR RR`            | `N` != 0               | copy `N + 2` bytes from `R + 1` bytes back     |
//! | `0R RR NN`         |                        | copy `NN + 0x12` bytes from `R + 1` bytes back |
//!
//! The source of a copy may overlap the bytes being written, a distance of one repeats the
//! last byte `length` times. Decoding stops as soon as the output reaches the decompressed
//! size, even if control bits remain.
//!
//! ## Additional Information
//!
//! - **Endianness**: Big-endian for the header
//! - Compression is not supported, only decompression.
//!

pub mod read;
pub mod types;

pub use gcwii_io::{Error, Result};
pub use read::{decompress, decompress_file, has_magic, is_compressed, read_header};
pub use types::Yaz0Header;
