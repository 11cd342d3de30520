use std::collections::HashMap;
use std::io::Cursor;

use gcwii_io::{ByteOrder, EndianStream, Result};

/// An entry to lay out in a built archive
pub enum Entry {
    File { name: Vec<u8>, data: Vec<u8> },
    Dir { name: Vec<u8>, node: u32 },
    Raw { name: Vec<u8>, id: u16, offset: u32, size: u32 },
}

pub fn file(name: impl AsRef<[u8]>, data: impl AsRef<[u8]>) -> Entry {
    Entry::File {
        name: name.as_ref().to_vec(),
        data: data.as_ref().to_vec(),
    }
}

pub fn dir(name: impl AsRef<[u8]>, node: u32) -> Entry {
    Entry::Dir {
        name: name.as_ref().to_vec(),
        node,
    }
}

struct NodeSpec {
    node_type: [u8; 4],
    name: Vec<u8>,
    entries: Vec<Entry>,
}

/// Lays out a big-endian RARC archive: header, nodes, entries, strings, data
#[derive(Default)]
pub struct ArchiveBuilder {
    nodes: Vec<NodeSpec>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node_type: &[u8; 4], name: impl AsRef<[u8]>, entries: Vec<Entry>) -> Self {
        self.nodes.push(NodeSpec {
            node_type: *node_type,
            name: name.as_ref().to_vec(),
            entries,
        });
        self
    }

    pub fn build(&self) -> Result<Vec<u8>> {
        let mut strings = Vec::new();
        let mut offsets: HashMap<Vec<u8>, u32> = HashMap::new();
        let mut intern = |name: &[u8]| -> u32 {
            *offsets.entry(name.to_vec()).or_insert_with(|| {
                let offset = strings.len() as u32;
                strings.extend_from_slice(name);
                strings.push(0);
                offset
            })
        };

        let mut data = Vec::new();
        let mut node_records = Vec::new();
        let mut entry_records = Vec::new();
        for node in &self.nodes {
            node_records.push((
                node.node_type,
                intern(&node.name),
                node.entries.len() as u16,
                entry_records.len() as u32,
            ));

            for entry in &node.entries {
                let record = match entry {
                    Entry::File { name, data: contents } => {
                        let offset = data.len() as u32;
                        data.extend_from_slice(contents);
                        (0u16, intern(name), offset, contents.len() as u32)
                    }
                    Entry::Dir { name, node } => (0xFFFF, intern(name), *node, 0x10),
                    Entry::Raw { name, id, offset, size } => (*id, intern(name), *offset, *size),
                };
                entry_records.push(record);
            }
        }

        let entries_start = 0x40 + node_records.len() as u32 * 0x10;
        let strings_start = entries_start + entry_records.len() as u32 * 0x14;
        let data_start = strings_start + strings.len() as u32;
        let file_size = data_start + data.len() as u32;

        let mut out = EndianStream::new(Cursor::new(Vec::new()), ByteOrder::BigEndian);
        out.write_bytes(b"RARC")?;
        out.write_u32(file_size)?;
        out.write_u32(0x20)?;
        out.write_u32(data_start - 0x20)?;
        for _ in 0..4 {
            out.write_u32(0)?;
        }
        out.write_u32(node_records.len() as u32)?;
        out.write_u32(0x20)?;
        out.write_u32(entry_records.len() as u32)?;
        out.write_u32(entries_start - 0x20)?;
        out.write_u32(strings.len() as u32)?;
        out.write_u32(strings_start - 0x20)?;
        out.write_u32(0)?;
        out.write_u32(0)?;

        for (node_type, name, count, first) in node_records {
            out.write_bytes(&node_type)?;
            out.write_u32(name)?;
            out.write_u16(0)?;
            out.write_u16(count)?;
            out.write_u32(first)?;
        }

        for (id, name, offset, size) in entry_records {
            out.write_u16(id)?;
            out.write_u16(0)?;
            out.write_u16(0x1100)?;
            out.write_u16(name as u16)?;
            out.write_u32(offset)?;
            out.write_u32(size)?;
            out.write_u32(0)?;
        }

        out.write_bytes(&strings)?;
        out.write_bytes(&data)?;

        Ok(out.into_inner().into_inner())
    }
}
