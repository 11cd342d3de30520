//! Types for reading TPL texture palettes
//!

use std::{
    io::{Read, Seek},
    path::Path,
};

use gcwii_io::{ByteOrder, EndianStream, Error, Result};
use tracing::{debug, instrument, trace};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Magic at the start of every TPL file
pub const MAGIC: [u8; 4] = [0x00, 0x20, 0xAF, 0x30];

/// The only header size TPL files are known to use
pub const HEADER_SIZE: u32 = 0x0C;

macro_rules! coded_enum {
    ($name:ident, $what:literal { $($(#[$doc:meta])* $variant:ident = $code:literal,)* }) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(Serialize))]
        #[repr(u32)]
        pub enum $name {
            $($(#[$doc])* $variant = $code,)*
        }

        impl TryFrom<u32> for $name {
            type Error = Error;

            fn try_from(value: u32) -> Result<Self> {
                match value {
                    $($code => Ok($name::$variant),)*
                    _ => Err(Error::CorruptData(format!(
                        concat!("unknown ", $what, " {:#x}"),
                        value
                    ))),
                }
            }
        }
    };
}

coded_enum!(TextureFormat, "texture format" {
    /// 4-bit intensity, 8x8 tiles
    I4 = 0,
    /// 8-bit intensity, 8x4 tiles
    I8 = 1,
    /// 4-bit intensity with 4-bit alpha, 8x4 tiles
    IA4 = 2,
    /// 8-bit intensity with 8-bit alpha, 4x4 tiles
    IA8 = 3,
    /// 4x4 tiles
    RGB565 = 4,
    /// 4x4 tiles, RGB555 or RGB4A3 per pixel
    RGB5A3 = 5,
    /// 4x4 tiles stored as two cache lines, AR then GB
    RGBA8 = 6,
    /// 4-bit color index, 8x8 tiles
    CI4 = 8,
    /// 8-bit color index, 8x4 tiles
    CI8 = 9,
    /// 14-bit color index, 4x4 tiles
    CI14X2 = 10,
    /// S3TC compressed, 2x2 blocks of 4x4 tiles
    CMP = 14,
});

coded_enum!(PaletteFormat, "palette format" {
    /// 8-bit intensity with 8-bit alpha
    IA8 = 0,
    /// 16-bit RGB565
    RGB565 = 1,
    /// 16-bit RGB555 or RGB4A3
    RGB5A3 = 2,
});

coded_enum!(WrapMode, "wrap mode" {
    /// The edge pixel stretches outwards
    Clamp = 0,
    /// The image repeats
    Repeat = 1,
    /// The image repeats mirrored
    Mirror = 2,
});

impl TextureFormat {
    /// Tile width, tile height and bytes per tile
    fn tile(self) -> (u32, u32, u32) {
        match self {
            TextureFormat::I4 | TextureFormat::CI4 | TextureFormat::CMP => (8, 8, 32),
            TextureFormat::I8 | TextureFormat::IA4 | TextureFormat::CI8 => (8, 4, 32),
            TextureFormat::IA8
            | TextureFormat::RGB565
            | TextureFormat::RGB5A3
            | TextureFormat::CI14X2 => (4, 4, 32),
            TextureFormat::RGBA8 => (4, 4, 64),
        }
    }

    /// Size in bytes of a `width` by `height` image, padded out to whole tiles
    pub fn data_size(self, width: u16, height: u16) -> u64 {
        let (tile_width, tile_height, bytes) = self.tile();
        let across = (width as u32).div_ceil(tile_width) as u64;
        let down = (height as u32).div_ceil(tile_height) as u64;
        across * down * bytes as u64
    }
}

/// Palette attached to a color indexed texture
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Palette {
    /// Number of colors
    pub item_count: u16,

    /// Unpacked flag
    pub unpacked: u8,

    /// Padding byte, kept as read
    pub padding: u8,

    /// Color format
    pub format: PaletteFormat,

    /// Colors, two bytes each
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::serde::byte_len"))]
    pub data: Vec<u8>,
}

/// One texture of a TPL file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Texture {
    /// Height in pixels
    pub height: u16,

    /// Width in pixels
    pub width: u16,

    /// Pixel format
    pub format: TextureFormat,

    /// Raw tiled pixel data
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::serde::byte_len"))]
    pub data: Vec<u8>,

    /// Horizontal wrapping
    pub wrap_s: WrapMode,

    /// Vertical wrapping
    pub wrap_t: WrapMode,

    /// Minification filter code
    pub min_filter: u32,

    /// Magnification filter code
    pub mag_filter: u32,

    /// Level of detail bias
    pub lod_bias: f32,

    /// Edge level of detail
    pub edge_lod: u8,

    /// Minimum level of detail
    pub min_lod: u8,

    /// Maximum level of detail
    pub max_lod: u8,

    /// Unpacked flag
    pub unpacked: u8,

    /// Palette, for color indexed formats
    pub palette: Option<Palette>,
}

/// TPL file reader
///
/// ```no_run
/// fn describe(path: &std::path::Path) -> gcwii_formats::Result<()> {
///     let tpl = gcwii_formats::TplFile::open(path)?;
///
///     for texture in tpl.textures() {
///         println!("{}x{} {:?}", texture.width, texture.height, texture.format);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TplFile {
    textures: Vec<Texture>,
}

impl TplFile {
    /// Read a TPL file starting at the reader's position 0
    #[instrument(skip(reader), err)]
    pub fn new<R: Read + Seek>(reader: R) -> Result<TplFile> {
        Self::decode(&mut EndianStream::new(reader, ByteOrder::BigEndian))
    }

    /// Read a TPL file from disk
    #[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>) -> Result<TplFile> {
        Self::decode(&mut EndianStream::open(path, ByteOrder::BigEndian)?)
    }

    /// Textures in table order
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Number of textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the file holds no textures
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn decode<R: Read + Seek>(stream: &mut EndianStream<R>) -> Result<TplFile> {
        let len = stream.len()?;
        stream.seek_to(0)?;

        let magic = stream.read_array::<4>()?;
        if magic != MAGIC {
            return Err(Error::InvalidFormat(format!(
                "{:02X?} is not a TPL magic",
                magic
            )));
        }

        let count = stream.read_u32()?;
        let header_size = stream.read_u32()?;
        if header_size != HEADER_SIZE {
            return Err(Error::InvalidFormat(format!(
                "header size is {header_size:#x}, expected {HEADER_SIZE:#x}"
            )));
        }
        if HEADER_SIZE as u64 + count as u64 * 8 > len {
            return Err(Error::UnexpectedEndOfData);
        }
        debug!(count, "read tpl header");

        let textures = (0..count)
            .map(|_| {
                let texture = stream.read_u32()? as u64;
                let palette = stream.read_u32()? as u64;
                Self::read_texture(stream, len, texture, palette)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TplFile { textures })
    }

    fn read_texture<R: Read + Seek>(
        stream: &mut EndianStream<R>,
        len: u64,
        offset: u64,
        palette_offset: u64,
    ) -> Result<Texture> {
        let height = stream.read_u16_at(offset)?;
        let width = stream.read_u16_at(offset + 0x02)?;
        let format = TextureFormat::try_from(stream.read_u32_at(offset + 0x04)?)?;
        let data_offset = stream.read_u32_at(offset + 0x08)? as u64;
        trace!(width, height, ?format, "read texture header");

        let palette = match palette_offset {
            0 => None,
            offset => Some(Self::read_palette(stream, len, offset)?),
        };

        Ok(Texture {
            height,
            width,
            format,
            data: read_block(stream, len, data_offset, format.data_size(width, height))?,
            wrap_s: WrapMode::try_from(stream.read_u32_at(offset + 0x0C)?)?,
            wrap_t: WrapMode::try_from(stream.read_u32_at(offset + 0x10)?)?,
            min_filter: stream.read_u32_at(offset + 0x14)?,
            mag_filter: stream.read_u32_at(offset + 0x18)?,
            lod_bias: stream.read_f32_at(offset + 0x1C)?,
            edge_lod: stream.read_u8_at(offset + 0x20)?,
            min_lod: stream.read_u8_at(offset + 0x21)?,
            max_lod: stream.read_u8_at(offset + 0x22)?,
            unpacked: stream.read_u8_at(offset + 0x23)?,
            palette,
        })
    }

    fn read_palette<R: Read + Seek>(
        stream: &mut EndianStream<R>,
        len: u64,
        offset: u64,
    ) -> Result<Palette> {
        let item_count = stream.read_u16_at(offset)?;
        let data_offset = stream.read_u32_at(offset + 0x08)? as u64;

        Ok(Palette {
            item_count,
            unpacked: stream.read_u8_at(offset + 0x02)?,
            padding: stream.read_u8_at(offset + 0x03)?,
            format: PaletteFormat::try_from(stream.read_u32_at(offset + 0x04)?)?,
            data: read_block(stream, len, data_offset, item_count as u64 * 2)?,
        })
    }
}

fn read_block<R: Read + Seek>(
    stream: &mut EndianStream<R>,
    len: u64,
    offset: u64,
    size: u64,
) -> Result<Vec<u8>> {
    if offset.saturating_add(size) > len {
        return Err(Error::CorruptData(format!(
            "{size:#x} bytes at {offset:#x} run past the end of the file"
        )));
    }
    stream.read_bytes_at(offset, size as usize)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use gcwii_io::{Error, Result};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::tpl::{PaletteFormat, TextureFormat, TplFile, WrapMode};

    #[rustfmt::skip]
    const CI4_TEXTURE: [u8; 0x6C] = [
        // Header: magic, one texture, header size
        0x00, 0x20, 0xAF, 0x30, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x0C,
        // Table: texture at 0x14, palette at 0x38
        0x00, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00, 0x38,
        // Texture header: 8x8 CI4, data at 0x4C
        0x00, 0x08, 0x00, 0x08, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x4C,
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02,
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
        0x3F, 0x80, 0x00, 0x00,
        0x01, 0x00, 0x03, 0x00,
        // Palette header: 4 RGB5A3 colors, data at 0x44
        0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x44,
        // Palette data
        0x00, 0x00, 0x7F, 0xFF, 0x80, 0x00, 0xFF, 0xFF,
        // Texture data
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB,
        0xCD, 0xEF, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45, 0x67,
        0x89, 0xAB, 0xCD, 0xEF,
    ];

    #[traced_test]
    #[test]
    fn read_indexed_texture() -> Result<()> {
        let tpl = TplFile::new(Cursor::new(CI4_TEXTURE))?;
        assert_eq!(tpl.len(), 1);

        let texture = &tpl.textures()[0];
        assert_eq!((texture.width, texture.height), (8, 8));
        assert_eq!(texture.format, TextureFormat::CI4);
        assert_eq!(texture.data.len(), 32);
        assert_eq!(&texture.data[..4], &[0x01, 0x23, 0x45, 0x67]);
        assert_eq!(texture.wrap_s, WrapMode::Repeat);
        assert_eq!(texture.wrap_t, WrapMode::Mirror);
        assert_eq!((texture.min_filter, texture.mag_filter), (1, 1));
        assert_eq!(texture.lod_bias, 1.0);
        assert_eq!(
            (texture.edge_lod, texture.min_lod, texture.max_lod, texture.unpacked),
            (1, 0, 3, 0)
        );

        let palette = texture.palette.as_ref().unwrap();
        assert_eq!(palette.item_count, 4);
        assert_eq!(palette.format, PaletteFormat::RGB5A3);
        assert_eq!(palette.data, vec![0x00, 0x00, 0x7F, 0xFF, 0x80, 0x00, 0xFF, 0xFF]);

        Ok(())
    }

    #[test]
    fn data_sizes() {
        assert_eq!(TextureFormat::I4.data_size(8, 8), 32);
        assert_eq!(TextureFormat::I4.data_size(9, 8), 64);
        assert_eq!(TextureFormat::I8.data_size(8, 4), 32);
        assert_eq!(TextureFormat::CI8.data_size(8, 8), 64);
        assert_eq!(TextureFormat::RGB5A3.data_size(4, 4), 32);
        assert_eq!(TextureFormat::RGBA8.data_size(4, 4), 64);
        assert_eq!(TextureFormat::CMP.data_size(32, 32), 512);
        assert_eq!(TextureFormat::RGB565.data_size(0, 16), 0);
        assert_eq!(TextureFormat::RGBA8.data_size(0xFFFF, 0xFFFF), 1 << 34);
    }

    #[test]
    fn unknown_codes() {
        assert!(matches!(TextureFormat::try_from(7), Err(Error::CorruptData(_))));
        assert!(matches!(PaletteFormat::try_from(3), Err(Error::CorruptData(_))));
        assert!(matches!(WrapMode::try_from(3), Err(Error::CorruptData(_))));

        let mut input = CI4_TEXTURE;
        input[0x1B] = 0x07;
        assert!(matches!(
            TplFile::new(Cursor::new(input)),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn bad_header() {
        let mut input = CI4_TEXTURE;
        input[3] = 0x31;
        assert!(matches!(
            TplFile::new(Cursor::new(input)),
            Err(Error::InvalidFormat(_))
        ));

        let mut input = CI4_TEXTURE;
        input[0x0B] = 0x10;
        assert!(matches!(
            TplFile::new(Cursor::new(input)),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn data_past_end() {
        assert!(matches!(
            TplFile::new(Cursor::new(&CI4_TEXTURE[..0x60])),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn huge_texture() {
        let mut input = CI4_TEXTURE;
        input[0x14..0x18].copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        input[0x18..0x1C].copy_from_slice(&[0x00, 0x00, 0x00, 0x06]);

        assert!(matches!(
            TplFile::new(Cursor::new(input)),
            Err(Error::CorruptData(_))
        ));
    }
}
