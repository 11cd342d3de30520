//! Byte order selection for [`crate::EndianStream`]

/// The order multi-byte values are serialized in
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first
    LittleEndian,

    /// Most significant byte first. GameCube and Wii data is stored this way.
    #[default]
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the machine this library was compiled for
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "little") {
        ByteOrder::LittleEndian
    } else {
        ByteOrder::BigEndian
    };

    /// Whether values in this order can be used without swapping bytes on this machine
    pub const fn is_native(self) -> bool {
        matches!(
            (self, Self::NATIVE),
            (ByteOrder::LittleEndian, ByteOrder::LittleEndian)
                | (ByteOrder::BigEndian, ByteOrder::BigEndian)
        )
    }

    /// The opposite byte order
    pub const fn swapped(self) -> ByteOrder {
        match self {
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
        }
    }
}

impl From<ByteOrder> for binrw::Endian {
    fn from(value: ByteOrder) -> Self {
        match value {
            ByteOrder::LittleEndian => binrw::Endian::Little,
            ByteOrder::BigEndian => binrw::Endian::Big,
        }
    }
}

impl From<binrw::Endian> for ByteOrder {
    fn from(value: binrw::Endian) -> Self {
        match value {
            binrw::Endian::Little => ByteOrder::LittleEndian,
            binrw::Endian::Big => ByteOrder::BigEndian,
        }
    }
}
