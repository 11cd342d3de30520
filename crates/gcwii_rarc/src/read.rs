//! Types for reading RARC archives
//!

use gcwii_io::{text::decode_shift_jis, ByteOrder, EndianStream, Error, Result};
use indexmap::IndexMap;
use std::{
    io::{Read, Seek},
    path::Path,
};
use tracing::{debug, instrument, trace};

use crate::types::{
    EntryRecord, NodeRecord, RarcHeader, DIRECTORY_ID, ENTRY_SIZE, HEADER_SIZE, NODE_SIZE,
};

/// What a [`FileEntry`] points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A link to another node of the archive
    Directory {
        /// Index into [`RarcArchive::nodes`]
        node_index: u32,
    },

    /// A file and its contents
    File {
        /// The file's bytes
        data: Vec<u8>,
    },
}

/// A file or directory link inside a [`Node`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    id: u16,
    unknown1: u16,
    unknown2: u16,
    name: String,
    kind: EntryKind,
    padding: u32,
}

impl FileEntry {
    /// File id, `0xFFFF` for directory links
    pub fn id(&self) -> u16 {
        self.id
    }

    /// First unknown field, as stored in the archive
    pub fn unknown1(&self) -> u16 {
        self.unknown1
    }

    /// Second unknown field, as stored in the archive
    pub fn unknown2(&self) -> u16 {
        self.unknown2
    }

    /// Name of the entry
    ///
    /// # Warnings
    ///
    /// Names come straight from the archive. Check them before using them as paths on disk.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a file or a directory link
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// Trailing padding word, normally zero
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Whether this entry links to another node
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    /// Contents of the file, `None` for directory links
    pub fn data(&self) -> Option<&[u8]> {
        match &self.kind {
            EntryKind::File { data } => Some(data),
            EntryKind::Directory { .. } => None,
        }
    }

    /// Index of the linked node, `None` for files
    ///
    /// The `..` link of the root node holds no valid index, check it with
    /// [`RarcArchive::node`].
    pub fn node_index(&self) -> Option<usize> {
        match self.kind {
            EntryKind::Directory { node_index } => Some(node_index as usize),
            EntryKind::File { .. } => None,
        }
    }

    /// Size of the file in bytes, zero for directory links
    pub fn size(&self) -> u64 {
        self.data().map_or(0, |d| d.len() as u64)
    }
}

/// A directory of the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    node_type: String,
    name: String,
    unknown: u16,
    first_entry: u32,
    entries: Vec<FileEntry>,
}

impl Node {
    /// Four character type of the node, `ROOT` for the first one
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Name of the directory
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unknown field, as stored in the archive
    pub fn unknown(&self) -> u16 {
        self.unknown
    }

    /// Index of the first entry in the archive's flat entry table
    pub fn first_entry(&self) -> u32 {
        self.first_entry
    }

    /// Files and directory links of this node, in table order
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }
}

/// Positions needed while resolving entries
struct Layout {
    strings: u64,
    entries: u64,
    data: u64,
    len: u64,
    node_count: u32,
}

/// RARC archive reader
///
/// The whole archive is decoded up front: every node, every entry name and every file's
/// contents. Nodes are referenced by index, the first node is the root.
///
/// ```no_run
/// fn list_rarc_contents(path: &std::path::Path) -> gcwii_rarc::Result<()> {
///     let rarc = gcwii_rarc::RarcArchive::open(path)?;
///
///     for name in rarc.file_names() {
///         let file = rarc.by_name(name)?;
///         println!("{name}: {} bytes", file.size());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RarcArchive {
    header: RarcHeader,
    nodes: Vec<Node>,
    files: IndexMap<Box<str>, (usize, usize)>,
}

impl RarcArchive {
    /// Decode a RARC archive from a reader positioned anywhere
    #[instrument(skip(reader), err)]
    pub fn new<R: Read + Seek>(reader: R) -> Result<RarcArchive> {
        Self::decode(&mut EndianStream::new(reader, ByteOrder::BigEndian))
    }

    /// Decode a RARC archive from disk
    #[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>) -> Result<RarcArchive> {
        Self::decode(&mut EndianStream::open(path, ByteOrder::BigEndian)?)
    }

    /// The archive's header
    pub fn header(&self) -> &RarcHeader {
        &self.header
    }

    /// Every node of the archive, the root first
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The root node, `None` only for an archive without nodes
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Get a node by index
    pub fn node(&self, index: usize) -> Result<&Node> {
        self.nodes.get(index).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "node {index} is out of range for {} nodes",
                self.nodes.len()
            ))
        })
    }

    /// Number of files reachable from the root
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files are reachable from the root
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total size of the files reachable from the root
    pub fn total_file_size(&self) -> u64 {
        self.files
            .values()
            .map(|&(node, entry)| self.nodes[node].entries[entry].size())
            .sum()
    }

    /// Returns an iterator over the paths of all files, relative to the root
    ///
    /// Paths use `/` as separator and do not include the root's own name. Files come in the
    /// order a depth first walk from the root meets them.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_ref())
    }

    /// Get the index of a file by path, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.files.get_index_of(name)
    }

    /// Get the path of a file by index, if it's present.
    #[inline(always)]
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.files.get_index(index).map(|(name, _)| name.as_ref())
    }

    /// Search for a file by path
    pub fn by_name(&self, name: &str) -> Result<&FileEntry> {
        let Some(index) = self.files.get_index_of(name) else {
            return Err(Error::InvalidArgument(format!("no file named {name}")));
        };
        self.by_index(index)
    }

    /// Get a file by its index in [`RarcArchive::file_names`]
    pub fn by_index(&self, index: usize) -> Result<&FileEntry> {
        let (_, &(node, entry)) = self.files.get_index(index).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "file {index} is out of range for {} files",
                self.files.len()
            ))
        })?;
        Ok(&self.nodes[node].entries[entry])
    }

    fn decode<R: Read + Seek>(stream: &mut EndianStream<R>) -> Result<RarcArchive> {
        let len = stream.len()?;
        stream.seek_to(0)?;

        let header: RarcHeader = stream.read_type()?;
        debug!(
            file_size = header.file_size,
            nodes = header.node_count,
            data = header.data_start(),
            entries = header.entry_table_start(),
            strings = header.string_table_start(),
            "read rarc header"
        );

        if header.file_size as u64 > len {
            return Err(Error::UnexpectedEndOfData);
        }
        if HEADER_SIZE + header.node_count as u64 * NODE_SIZE > len {
            return Err(Error::UnexpectedEndOfData);
        }

        let layout = Layout {
            strings: header.string_table_start(),
            entries: header.entry_table_start(),
            data: header.data_start(),
            len,
            node_count: header.node_count,
        };

        let mut records = Vec::with_capacity(header.node_count as usize);
        for _ in 0..header.node_count {
            let record: NodeRecord = stream.read_type()?;
            let name = Self::read_name(stream, &layout, record.name_offset)?;
            records.push((record, name));
        }

        let mut nodes = Vec::with_capacity(records.len());
        for (record, name) in records {
            let entries = (0..record.entry_count as u64)
                .map(|i| Self::read_entry(stream, &layout, record.first_entry as u64 + i))
                .collect::<Result<Vec<_>>>()?;
            trace!(%name, entries = entries.len(), "read node");

            nodes.push(Node {
                node_type: String::from_utf8_lossy(&record.node_type).into_owned(),
                name,
                unknown: record.unknown,
                first_entry: record.first_entry,
                entries,
            });
        }

        let files = index_files(&nodes);
        debug!(nodes = nodes.len(), files = files.len(), "decoded rarc archive");

        Ok(RarcArchive {
            header,
            nodes,
            files,
        })
    }

    fn read_entry<R: Read + Seek>(
        stream: &mut EndianStream<R>,
        layout: &Layout,
        index: u64,
    ) -> Result<FileEntry> {
        let position = layout.entries + index * ENTRY_SIZE;
        if position + ENTRY_SIZE > layout.len {
            return Err(Error::CorruptData(format!(
                "entry {index} at {position:#x} is past the end of the archive"
            )));
        }

        stream.seek_to(position)?;
        let record: EntryRecord = stream.read_type()?;
        let name = Self::read_name(stream, layout, record.name_offset as u32)?;

        let kind = if record.id == DIRECTORY_ID {
            // the root's ".." points at no node, usually 0xFFFFFFFF
            if record.offset >= layout.node_count && name != ".." {
                return Err(Error::CorruptData(format!(
                    "{name} links to node {} of {}",
                    record.offset, layout.node_count
                )));
            }
            EntryKind::Directory {
                node_index: record.offset,
            }
        } else {
            let start = layout.data + record.offset as u64;
            if start + record.size as u64 > layout.len {
                return Err(Error::CorruptData(format!(
                    "{name} data at {start:#x}+{:#x} is past the end of the archive",
                    record.size
                )));
            }
            EntryKind::File {
                data: stream.read_bytes_at(start, record.size as usize)?,
            }
        };
        trace!(%name, id = record.id, "read entry");

        Ok(FileEntry {
            id: record.id,
            unknown1: record.unknown1,
            unknown2: record.unknown2,
            name,
            kind,
            padding: record.padding,
        })
    }

    fn read_name<R: Read + Seek>(
        stream: &mut EndianStream<R>,
        layout: &Layout,
        offset: u32,
    ) -> Result<String> {
        let position = layout.strings + offset as u64;
        if position >= layout.len {
            return Err(Error::CorruptData(format!(
                "name at {position:#x} is past the end of the archive"
            )));
        }

        Ok(decode_shift_jis(&stream.read_until_at(position, 0)?))
    }
}

/// Map every file reachable from the root to its `(node, entry)` position
///
/// The `.` and `..` links every real directory carries are skipped, and no node is entered
/// twice, so malformed link cycles end the walk instead of looping.
fn index_files(nodes: &[Node]) -> IndexMap<Box<str>, (usize, usize)> {
    let mut files = IndexMap::new();
    if nodes.is_empty() {
        return files;
    }

    let mut visited = vec![false; nodes.len()];
    visited[0] = true;
    let mut pending = vec![(0usize, String::new())];

    while let Some((node_index, prefix)) = pending.pop() {
        let mut children = Vec::new();
        for (entry_index, entry) in nodes[node_index].entries.iter().enumerate() {
            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };

            match entry.kind {
                EntryKind::File { .. } => {
                    files
                        .entry(path.into_boxed_str())
                        .or_insert((node_index, entry_index));
                }
                EntryKind::Directory { node_index: child } => {
                    let child = child as usize;
                    if entry.name == "." || entry.name == ".." || visited[child] {
                        continue;
                    }
                    visited[child] = true;
                    children.push((child, path));
                }
            }
        }
        pending.extend(children.into_iter().rev());
    }

    files
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use gcwii_io::{Error, Result};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::read::{EntryKind, RarcArchive};

    #[rustfmt::skip]
    const MINIMAL: [u8; 0x8C] = [
        // Header (64)
        0x52, 0x41, 0x52, 0x43, 0x00, 0x00, 0x00, 0x8C, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00,
        0x00, 0x68, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00,
        0x00, 0x02, 0x00, 0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x58,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // Nodes (16)
        0x52, 0x4F, 0x4F, 0x54, 0x00, 0x00, 0x00, 0x00, 0x12, 0x34, 0x00, 0x02, 0x00, 0x00,
        0x00, 0x00,
        // Entries (40)
        0x00, 0x00, 0x00, 0x01, 0x11, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x02, 0x02, 0x00, 0x00, 0x0B,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00,
        // Strings (16)
        0x72, 0x6F, 0x6F, 0x74, 0x00, 0x61, 0x2E, 0x74, 0x78, 0x74, 0x00, 0x2E, 0x00, 0x00,
        0x00, 0x00,
        // Data (4)
        0x44, 0x41, 0x54, 0x41,
    ];

    #[traced_test]
    #[test]
    fn read_minimal_archive() -> Result<()> {
        let archive = RarcArchive::new(Cursor::new(MINIMAL))?;

        assert_eq!(archive.nodes().len(), 1);

        let root = archive.root().unwrap();
        assert_eq!(root.node_type(), "ROOT");
        assert_eq!(root.name(), "root");
        assert_eq!(root.unknown(), 0x1234);
        assert_eq!(root.entries().len(), 2);

        let file = &root.entries()[0];
        assert_eq!(file.name(), "a.txt");
        assert_eq!(file.id(), 0);
        assert_eq!(file.unknown1(), 1);
        assert_eq!(file.unknown2(), 0x1100);
        assert_eq!(file.data(), Some(&b"DATA"[..]));

        let dir = &root.entries()[1];
        assert_eq!(dir.name(), ".");
        assert_eq!(dir.kind(), &EntryKind::Directory { node_index: 0 });
        assert!(archive.node(dir.node_index().unwrap()).is_ok());

        assert_eq!(archive.len(), 1);
        assert_eq!(archive.file_names().collect::<Vec<_>>(), vec!["a.txt"]);
        assert_eq!(archive.by_name("a.txt")?, file);
        assert_eq!(archive.total_file_size(), 4);

        Ok(())
    }

    #[test]
    fn read_from_offset_reader() -> Result<()> {
        let mut cursor = Cursor::new(MINIMAL);
        cursor.set_position(0x50);

        assert_eq!(RarcArchive::new(cursor)?.len(), 1);

        Ok(())
    }

    #[test]
    fn read_invalid_magic() {
        let mut input = MINIMAL;
        input[0] = b'X';

        assert!(matches!(
            RarcArchive::new(Cursor::new(input)),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn read_truncated_archive() {
        assert!(matches!(
            RarcArchive::new(Cursor::new(&MINIMAL[..0x88])),
            Err(Error::UnexpectedEndOfData)
        ));
        assert!(matches!(
            RarcArchive::new(Cursor::new(&MINIMAL[..0x30])),
            Err(Error::UnexpectedEndOfData)
        ));
    }

    #[test]
    fn read_bad_directory_link() {
        let mut input = MINIMAL;
        // node index of the "." entry
        input[0x6F] = 0x01;

        assert!(matches!(
            RarcArchive::new(Cursor::new(input)),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn read_bad_data_offset() {
        let mut input = MINIMAL;
        // data offset of "a.txt"
        input[0x5B] = 0x01;

        assert!(matches!(
            RarcArchive::new(Cursor::new(input)),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn read_bad_name_offset() {
        let mut input = MINIMAL;
        // name offset of "a.txt"
        input[0x56] = 0x01;

        assert!(matches!(
            RarcArchive::new(Cursor::new(input)),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn missing_node_and_file() -> Result<()> {
        let archive = RarcArchive::new(Cursor::new(MINIMAL))?;

        assert!(matches!(archive.node(1), Err(Error::InvalidArgument(_))));
        assert!(matches!(archive.by_index(1), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            archive.by_name("b.txt"),
            Err(Error::InvalidArgument(_))
        ));

        Ok(())
    }
}
