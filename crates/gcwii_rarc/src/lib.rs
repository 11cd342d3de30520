//! This library handles reading **RARC** archives used by *GameCube* and *Wii* games.
//!
//! # RARC Archive Format Documentation
//!
//! RARC is Nintendo's resource archive: a directory tree of files packed into one blob.
//! Archives usually carry the `.arc` extension, or `.szs` when compressed with Yaz0. This
//! crate only reads uncompressed archives, decompress first with `gcwii_yaz0`.
//!
//! ## File Structure
//!
//! A RARC file consists of a header, a node table, an entry table, a string table and the
//! file data. All offsets in the header are relative to 0x20.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "RARC"                                            |
//! | 0x0004         | File Size              | 4 bytes: Size of the whole archive                         |
//! | 0x0008         | Unknown                | 4 bytes                                                    |
//! | 0x000C         | Data Offset            | 4 bytes: Start of the file data                            |
//! | 0x0010         | Unknown                | 16 bytes                                                   |
//! | 0x0020         | Node Count             | 4 bytes: Number of nodes                                   |
//! | 0x0024         | Unknown                | 8 bytes                                                    |
//! | 0x002C         | Entry Offset           | 4 bytes: Start of the entry table                          |
//! | 0x0030         | Unknown                | 4 bytes                                                    |
//! | 0x0034         | String Table Offset    | 4 bytes: Start of the string table                         |
//! | 0x0038         | Unknown                | 8 bytes                                                    |
//!
//! ### Nodes
//!
//! Nodes are directories. They follow the header at 0x40, 16 bytes each, the root first.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Type                   | 4 bytes: "ROOT" for the root, an uppercase tag otherwise|
//! | 0x0004         | Name Offset            | 4 bytes: Offset of the name in the string table         |
//! | 0x0008         | Unknown                | 2 bytes                                                 |
//! | 0x000A         | Entry Count            | 2 bytes: Number of entries owned by the node            |
//! | 0x000C         | First Entry            | 4 bytes: Index of the first entry in the entry table    |
//!
//! ### Entries
//!
//! Entries are 20 bytes each. A node owns `Entry Count` consecutive entries.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Id                     | 2 bytes: File id, 0xFFFF for a directory link           |
//! | 0x0002         | Unknown                | 2 bytes                                                 |
//! | 0x0004         | Unknown                | 2 bytes                                                 |
//! | 0x0006         | Name Offset            | 2 bytes: Offset of the name in the string table         |
//! | 0x0008         | Offset                 | 4 bytes: Data offset, or node index for a link          |
//! | 0x000C         | Size                   | 4 bytes: Size of the file data                          |
//! | 0x0010         | Padding                | 4 bytes: Zero                                           |
//!
//! File data offsets are relative to the data start. Directories normally carry `.` and
//! `..` links back to themselves and their parent.
//!
//! ### String Table
//!
//! Null-terminated Shift-JIS names. Several entries may share one string.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.arc`, `.szs` when compressed
//! - **Endianness**: Big-endian for all multi-byte integers
//!

use std::path::Path;

pub mod read;
pub mod types;

pub use gcwii_io::{Error, Result};
pub use read::{EntryKind, FileEntry, Node, RarcArchive};
pub use types::RarcHeader;

/// Decode the RARC archive at `path`
///
/// Shorthand for [`RarcArchive::open`].
pub fn decode_archive(path: impl AsRef<Path>) -> Result<RarcArchive> {
    RarcArchive::open(path)
}
