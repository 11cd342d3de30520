//! Shared binary plumbing for the GameCube and Wii format readers.
//!
//! Every decoder in this workspace reads its data through an [`EndianStream`], which wraps
//! any seekable byte source and reads or writes numbers in a caller chosen [`ByteOrder`].
//! Nearly everything on these consoles is big-endian, but the order can be switched at any
//! point for the occasional mixed file.
//!
//! ## Reading
//!
//! - Sequential reads (`read_u16`, `read_f32`, `read_bytes`, ...) consume bytes at the cursor.
//! - Absolute reads (`read_u16_at`, `read_bytes_at`, `read_until_at`, ...) read at an offset
//!   and restore the cursor afterwards, so offset tables can be followed in the middle of a
//!   sequential walk.
//! - [`EndianStream::read_until`] reads null-terminated strings.
//! - [`EndianStream::read_type`] reads any [`binrw::BinRead`] record using the stream's order.
//!
//! Running out of data is always reported as [`Error::UnexpectedEndOfData`]; no read ever
//! hands back part of a value.
//!
//! ## Text
//!
//! Names and titles are Shift-JIS encoded, see [`text::decode_shift_jis`].
//!

pub mod error;
pub mod order;
pub mod stream;
pub mod text;

pub use error::{Error, Result};
pub use order::ByteOrder;
pub use stream::EndianStream;
