//! Readers for the smaller **GameCube** and **Wii** file formats.
//!
//! # Banners (`bnr`)
//!
//! `opening.bnr` holds the 96x32 image and the texts the IPL menu shows for a game.
//!
//! | Offset (bytes) | Field                  | Description                                           |
//! |----------------|------------------------|-------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "BNR1" (US/JP) or "BNR2" (EU)                |
//! | 0x0004         | Padding                | 28 bytes                                              |
//! | 0x0020         | Graphic                | 0x1800 bytes: RGB5A3, 96x32 pixels                    |
//! | 0x1820         | Game Title             | 0x20 bytes: Shift-JIS                                 |
//! | 0x1840         | Developer              | 0x20 bytes: Shift-JIS                                 |
//! | 0x1860         | Full Game Title        | 0x40 bytes: Shift-JIS                                 |
//! | 0x18A0         | Full Developer         | 0x40 bytes: Shift-JIS                                 |
//! | 0x18E0         | Description            | 0x80 bytes: Shift-JIS                                 |
//!
//! # Textures (`tpl`)
//!
//! | Offset (bytes) | Field                  | Description                                           |
//! |----------------|------------------------|-------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: 00 20 AF 30                                  |
//! | 0x0004         | Texture Count          | 4 bytes                                               |
//! | 0x0008         | Header Size            | 4 bytes: Always 0x0C                                  |
//! | 0x000C         | Texture Table          | 8 bytes per texture: texture and palette offsets      |
//!
//! A palette offset of zero means the texture has no palette. Texture data is stored in
//! tiles, so its size is the image size rounded up to whole tiles of its format.
//!
//! # Disc headers (`disc`)
//!
//! | Offset (bytes) | Field                  | Description                                           |
//! |----------------|------------------------|-------------------------------------------------------|
//! | 0x0000         | Game Id                | 6 bytes: console, game code, region, maker code       |
//! | 0x0006         | Disc Number            | 1 byte                                                |
//! | 0x0007         | Version                | 1 byte                                                |
//! | 0x0008         | Audio Streaming        | 1 byte                                                |
//! | 0x0009         | Stream Buffer Size     | 1 byte                                                |
//! | 0x000A         | Unused                 | 14 bytes                                              |
//! | 0x0018         | Wii Magic              | 4 bytes: 0x5D1C9EA3 on Wii discs                      |
//! | 0x001C         | GameCube Magic         | 4 bytes: 0xC2339F3D on GameCube discs                 |
//! | 0x0020         | Game Title             | 64 bytes                                              |
//!
//! ## Additional Information
//!
//! - **Endianness**: Big-endian for all multi-byte integers
//! - With the `serde` feature every decoded type can be serialized. Pixel and graphic data
//!   serialize as their length.
//!

pub mod bnr;
pub mod disc;
#[cfg(feature = "serde")]
mod serde;
pub mod tpl;

pub use bnr::{Banner, BannerKind};
pub use disc::{DiscHeader, DiscType, Platform, Region};
pub use gcwii_io::{Error, Result};
pub use tpl::{Palette, PaletteFormat, Texture, TextureFormat, TplFile, WrapMode};
