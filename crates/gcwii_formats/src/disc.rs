//! Types for reading the header at the start of GameCube and Wii discs
//!

use std::{
    io::{Read, Seek},
    path::Path,
};

use binrw::BinRead;
use gcwii_io::{text::decode_shift_jis, ByteOrder, EndianStream, Error, Result};
use tracing::{debug, instrument};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Magic at 0x18 on Wii discs
pub const WII_MAGIC: u32 = 0x5D1C9EA3;

/// Magic at 0x1C on GameCube discs
pub const GAMECUBE_MAGIC: u32 = 0xC2339F3D;

/// Raw layout of the disc header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(big)]
pub struct DiscHeaderRecord {
    /// Console id, the first character of the game id
    pub console_id: u8,

    /// Two character game code
    pub game_code: [u8; 2],

    /// Region character
    pub region: u8,

    /// Two character maker code
    pub maker_code: [u8; 2],

    /// Disc number of multi disc games, zero based
    pub disc_number: u8,

    /// Revision of the game
    pub version: u8,

    /// Non-zero when audio streaming is enabled
    pub audio_streaming: u8,

    /// Stream buffer size
    pub stream_buffer_size: u8,

    /// Unused
    pub reserved: [u8; 14],

    /// [`WII_MAGIC`] on Wii discs
    pub wii_magic: u32,

    /// [`GAMECUBE_MAGIC`] on GameCube discs
    pub gamecube_magic: u32,

    /// Null padded game title
    pub title: [u8; 64],
}

/// Console a disc is meant for, decided by the header magic
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Platform {
    GameCube,
    Wii,
}

/// Kind of disc, from the console id
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum DiscType {
    /// `G`
    GameCube,
    /// `R` or `S`
    Wii,
    /// `D`
    Demo,
    /// `P`
    Promotional,
    /// `U`
    Utility,
    /// `0`, `1` or `4`, diagnostic and backup discs
    System,
    Other(char),
}

impl From<u8> for DiscType {
    fn from(value: u8) -> Self {
        match value {
            b'G' => DiscType::GameCube,
            b'R' | b'S' => DiscType::Wii,
            b'D' => DiscType::Demo,
            b'P' => DiscType::Promotional,
            b'U' => DiscType::Utility,
            b'0' | b'1' | b'4' => DiscType::System,
            other => DiscType::Other(other as char),
        }
    }
}

/// Region the disc was released for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Region {
    Japan,
    NorthAmerica,
    Europe,
    Germany,
    France,
    Spain,
    Italy,
    Netherlands,
    Australia,
    Korea,
    Taiwan,
    Other(char),
}

impl From<u8> for Region {
    fn from(value: u8) -> Self {
        match value {
            b'J' => Region::Japan,
            b'E' => Region::NorthAmerica,
            b'P' | b'X' | b'Y' => Region::Europe,
            b'D' => Region::Germany,
            b'F' => Region::France,
            b'S' => Region::Spain,
            b'I' => Region::Italy,
            b'H' => Region::Netherlands,
            b'U' => Region::Australia,
            b'K' => Region::Korea,
            b'W' => Region::Taiwan,
            other => Region::Other(other as char),
        }
    }
}

/// The decoded disc header
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DiscHeader {
    pub platform: Platform,
    pub disc_type: DiscType,
    /// Six character id, console id + game code + region + maker code
    pub game_id: String,
    pub game_code: String,
    pub region: Region,
    pub maker_code: String,
    pub disc_number: u8,
    pub version: u8,
    pub audio_streaming: bool,
    pub stream_buffer_size: u8,
    pub title: String,
}

impl DiscHeader {
    /// Read the header of a disc image starting at the reader's position 0
    #[instrument(skip(reader), err)]
    pub fn new<R: Read + Seek>(reader: R) -> Result<DiscHeader> {
        Self::decode(&mut EndianStream::new(reader, ByteOrder::BigEndian))
    }

    /// Read the header of a disc image on disk
    #[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>) -> Result<DiscHeader> {
        Self::decode(&mut EndianStream::open(path, ByteOrder::BigEndian)?)
    }

    fn decode<R: Read + Seek>(stream: &mut EndianStream<R>) -> Result<DiscHeader> {
        stream.seek_to(0)?;
        let record: DiscHeaderRecord = stream.read_type()?;

        let platform = if record.wii_magic == WII_MAGIC {
            Platform::Wii
        } else if record.gamecube_magic == GAMECUBE_MAGIC {
            Platform::GameCube
        } else {
            return Err(Error::InvalidFormat(format!(
                "no disc magic, found {:#010x} and {:#010x}",
                record.wii_magic, record.gamecube_magic
            )));
        };

        let id = [
            record.console_id,
            record.game_code[0],
            record.game_code[1],
            record.region,
            record.maker_code[0],
            record.maker_code[1],
        ];
        let header = DiscHeader {
            platform,
            disc_type: DiscType::from(record.console_id),
            game_id: String::from_utf8_lossy(&id).into_owned(),
            game_code: String::from_utf8_lossy(&record.game_code).into_owned(),
            region: Region::from(record.region),
            maker_code: String::from_utf8_lossy(&record.maker_code).into_owned(),
            disc_number: record.disc_number,
            version: record.version,
            audio_streaming: record.audio_streaming != 0,
            stream_buffer_size: record.stream_buffer_size,
            title: decode_shift_jis(&record.title),
        };
        debug!(?platform, id = %header.game_id, "read disc header");

        Ok(header)
    }
}
