//! Base types for structure of RARC file.

use binrw::BinRead;

/// Size of [`RarcHeader`]; the node table starts right after it
pub const HEADER_SIZE: u64 = 0x40;

/// Offsets in the header are stored relative to this position
pub const OFFSET_BASE: u64 = 0x20;

/// Size of a [`NodeRecord`]
pub const NODE_SIZE: u64 = 0x10;

/// Size of an [`EntryRecord`]
pub const ENTRY_SIZE: u64 = 0x14;

/// Entry id marking a link to another node instead of a file
pub const DIRECTORY_ID: u16 = 0xFFFF;

/// RARC file header
///
/// Starts with "RARC". Read big-endian. Fields this library has no use for are kept as
/// they were found.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[br(magic = b"RARC")]
pub struct RarcHeader {
    /// Size of the whole archive in bytes
    pub file_size: u32,

    /// Unknown, kept as read
    pub unknown1: u32,

    /// Start of the file data, relative to [`OFFSET_BASE`]
    pub data_offset: u32,

    /// Unknown, kept as read
    pub unknown2: [u32; 4],

    /// Number of records in the node table
    pub node_count: u32,

    /// Unknown, kept as read
    pub unknown3: [u32; 2],

    /// Start of the entry table, relative to [`OFFSET_BASE`]
    pub entry_offset: u32,

    /// Unknown, kept as read
    pub unknown4: u32,

    /// Start of the string table, relative to [`OFFSET_BASE`]
    pub string_table_offset: u32,

    /// Unknown, kept as read
    pub unknown5: [u32; 2],
}

impl RarcHeader {
    /// Absolute position of the file data
    pub fn data_start(&self) -> u64 {
        self.data_offset as u64 + OFFSET_BASE
    }

    /// Absolute position of the entry table
    pub fn entry_table_start(&self) -> u64 {
        self.entry_offset as u64 + OFFSET_BASE
    }

    /// Absolute position of the string table
    pub fn string_table_start(&self) -> u64 {
        self.string_table_offset as u64 + OFFSET_BASE
    }
}

/// RARC node record, describing one directory
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Four character type, `ROOT` for the first node
    pub node_type: [u8; 4],

    /// Offset of the name in the string table
    pub name_offset: u32,

    /// Unknown, kept as read
    pub unknown: u16,

    /// Number of entries this node owns
    pub entry_count: u16,

    /// Index of the node's first entry in the entry table
    pub first_entry: u32,
}

/// RARC entry record, describing a file or a link to a node
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// File id, [`DIRECTORY_ID`] for node links
    pub id: u16,

    /// Unknown, kept as read
    pub unknown1: u16,

    /// Unknown, kept as read
    pub unknown2: u16,

    /// Offset of the name in the string table
    pub name_offset: u16,

    /// Data offset relative to the data start for files, node index for links
    pub offset: u32,

    /// Size of the file data
    pub size: u32,

    /// Always zero
    pub padding: u32,
}
