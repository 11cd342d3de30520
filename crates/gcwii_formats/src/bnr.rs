//! Types for reading game banners (`opening.bnr`)
//!

use std::{
    io::{Read, Seek},
    path::Path,
};

use gcwii_io::{text::decode_shift_jis, ByteOrder, EndianStream, Error, Result};
use tracing::{debug, instrument};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Position of the banner graphic
pub const GRAPHIC_OFFSET: u64 = 0x20;

/// Size of the 96x32 RGB5A3 banner graphic
pub const GRAPHIC_SIZE: usize = 0x1800;

/// Banner flavour, decided by the magic
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum BannerKind {
    /// `BNR1`, one set of texts (US and JP discs)
    Bnr1,

    /// `BNR2`, one set of texts per language (EU discs)
    Bnr2,
}

impl BannerKind {
    /// The four magic bytes for this kind
    pub fn magic(self) -> &'static [u8; 4] {
        match self {
            BannerKind::Bnr1 => b"BNR1",
            BannerKind::Bnr2 => b"BNR2",
        }
    }
}

impl TryFrom<[u8; 4]> for BannerKind {
    type Error = Error;

    fn try_from(value: [u8; 4]) -> Result<Self> {
        match &value {
            b"BNR1" => Ok(BannerKind::Bnr1),
            b"BNR2" => Ok(BannerKind::Bnr2),
            _ => Err(Error::InvalidFormat(format!(
                "{:02X?} is not a banner magic",
                value
            ))),
        }
    }
}

/// A GameCube banner: the graphic shown in the IPL menu plus the game's texts
///
/// Only the first set of texts is read. On `BNR2` banners that is the English one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Banner {
    /// Which magic the banner carries
    pub kind: BannerKind,

    /// Raw graphic data, [`GRAPHIC_SIZE`] bytes
    #[cfg_attr(
        feature = "serde",
        serde(rename = "graphic_size", serialize_with = "crate::serde::byte_len")
    )]
    pub graphic: Vec<u8>,

    /// Short game title
    pub game_title: String,

    /// Short developer name
    pub developer: String,

    /// Full game title
    pub full_game_title: String,

    /// Full developer name
    pub full_developer: String,

    /// Game description
    pub description: String,
}

impl Banner {
    /// Read a banner starting at the reader's position 0
    #[instrument(skip(reader), err)]
    pub fn new<R: Read + Seek>(reader: R) -> Result<Banner> {
        Self::decode(&mut EndianStream::new(reader, ByteOrder::BigEndian))
    }

    /// Read a banner from disk
    #[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>) -> Result<Banner> {
        Self::decode(&mut EndianStream::open(path, ByteOrder::BigEndian)?)
    }

    /// Read a banner embedded in a larger buffer, starting at `offset`
    pub fn from_bytes(data: &[u8], offset: usize) -> Result<Banner> {
        Self::decode(&mut EndianStream::from_slice_at(
            data,
            offset,
            ByteOrder::BigEndian,
        )?)
    }

    fn decode<R: Read + Seek>(stream: &mut EndianStream<R>) -> Result<Banner> {
        stream.seek_to(0)?;
        let kind = BannerKind::try_from(stream.read_array::<4>()?)?;

        stream.seek_to(GRAPHIC_OFFSET)?;
        let graphic = stream.read_bytes(GRAPHIC_SIZE)?;

        let mut text = |len: usize| -> Result<String> {
            Ok(decode_shift_jis(&stream.read_bytes(len)?))
        };
        let banner = Banner {
            kind,
            graphic,
            game_title: text(0x20)?,
            developer: text(0x20)?,
            full_game_title: text(0x40)?,
            full_developer: text(0x40)?,
            description: text(0x80)?,
        };
        debug!(?kind, title = %banner.game_title, "read banner");

        Ok(banner)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use gcwii_io::{Error, Result};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::bnr::{Banner, BannerKind, GRAPHIC_SIZE};

    fn banner_bytes(magic: &[u8; 4]) -> Vec<u8> {
        let mut data = magic.to_vec();
        data.resize(0x20, 0);
        data.extend((0..GRAPHIC_SIZE).map(|i| i as u8));

        let mut field = |text: &[u8], len: usize| {
            let start = data.len();
            data.extend_from_slice(text);
            data.resize(start + len, 0);
        };
        field(b"Zelda", 0x20);
        field(b"Nintendo", 0x20);
        field(b"The Legend of Zelda", 0x40);
        field(b"Nintendo EAD", 0x40);
        field(&[0x83, 0x5B, 0x83, 0x8B, 0x83, 0x5F], 0x80);
        data
    }

    #[traced_test]
    #[test]
    fn read_banner() -> Result<()> {
        let banner = Banner::new(Cursor::new(banner_bytes(b"BNR1")))?;

        assert_eq!(banner.kind, BannerKind::Bnr1);
        assert_eq!(banner.graphic.len(), GRAPHIC_SIZE);
        assert_eq!(banner.graphic[0x101], 0x01);
        assert_eq!(banner.game_title, "Zelda");
        assert_eq!(banner.developer, "Nintendo");
        assert_eq!(banner.full_game_title, "The Legend of Zelda");
        assert_eq!(banner.full_developer, "Nintendo EAD");
        assert_eq!(banner.description, "ゼルダ");

        Ok(())
    }

    #[test]
    fn read_embedded_banner() -> Result<()> {
        let mut data = vec![0xEE; 0x10];
        data.extend(banner_bytes(b"BNR2"));

        let banner = Banner::from_bytes(&data, 0x10)?;
        assert_eq!(banner.kind, BannerKind::Bnr2);
        assert_eq!(banner.kind.magic(), b"BNR2");
        assert_eq!(banner.game_title, "Zelda");

        assert!(matches!(
            Banner::from_bytes(&data, data.len() + 1),
            Err(Error::InvalidArgument(_))
        ));

        Ok(())
    }

    #[test]
    fn read_bad_magic() {
        assert!(matches!(
            Banner::new(Cursor::new(banner_bytes(b"BNR3"))),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn read_truncated() {
        let mut data = banner_bytes(b"BNR1");
        data.truncate(0x1900);

        assert!(matches!(
            Banner::new(Cursor::new(data)),
            Err(Error::UnexpectedEndOfData)
        ));
    }
}
