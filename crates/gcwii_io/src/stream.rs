//! Types for reading and writing primitives in a selectable byte order
//!

use binrw::BinRead;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::{
    fmt::{self, Debug},
    fs::File,
    io::{self, BufReader, Cursor, Read, Seek, SeekFrom, Write},
    path::Path,
};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    order::ByteOrder,
};

macro_rules! ordered_readers {
    ($($read:ident, $read_at:ident => $ty:ty;)*) => {$(
        #[doc = concat!("Read a `", stringify!($ty), "` at the cursor in the configured byte order")]
        pub fn $read(&mut self) -> Result<$ty> {
            Ok(match self.order {
                ByteOrder::LittleEndian => self.inner.$read::<LittleEndian>()?,
                ByteOrder::BigEndian => self.inner.$read::<BigEndian>()?,
            })
        }

        #[doc = concat!("Read a `", stringify!($ty), "` at an absolute offset without moving the cursor")]
        pub fn $read_at(&mut self, offset: u64) -> Result<$ty> {
            self.peek_at(offset, Self::$read)
        }
    )*};
}

macro_rules! ordered_writers {
    ($($write:ident => $ty:ty;)*) => {$(
        #[doc = concat!("Write a `", stringify!($ty), "` at the cursor in the configured byte order")]
        pub fn $write(&mut self, value: $ty) -> Result<()> {
            match self.order {
                ByteOrder::LittleEndian => self.inner.$write::<LittleEndian>(value)?,
                ByteOrder::BigEndian => self.inner.$write::<BigEndian>(value)?,
            }
            Ok(())
        }
    )*};
}

/// A seekable byte source or sink that reads and writes numbers in a chosen [`ByteOrder`]
///
/// The byte order can be changed at any time with [`EndianStream::set_order`], which is
/// needed for formats mixing both orders. Every `*_at` read restores the cursor afterwards,
/// so fields can be pulled from anywhere in the data while a sequential walk is in progress.
///
/// ```
/// use std::io::Cursor;
/// use gcwii_io::{ByteOrder, EndianStream};
///
/// # fn main() -> gcwii_io::Result<()> {
/// let mut stream = EndianStream::new(Cursor::new(vec![0x12, 0x34, 0x56, 0x78]), ByteOrder::BigEndian);
/// assert_eq!(stream.read_u16_at(2)?, 0x5678);
/// assert_eq!(stream.read_u16()?, 0x1234);
///
/// stream.set_order(ByteOrder::LittleEndian);
/// assert_eq!(stream.read_u16()?, 0x7856);
/// # Ok(())
/// # }
/// ```
pub struct EndianStream<S> {
    inner: S,
    order: ByteOrder,
}

impl<S> Debug for EndianStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EndianStream({:?})", self.order)
    }
}

impl<S> EndianStream<S> {
    /// Wrap a byte source using the given byte order
    pub fn new(inner: S, order: ByteOrder) -> Self {
        EndianStream { inner, order }
    }

    /// Byte order used by the next read or write
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Change the byte order used by subsequent reads and writes
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Get a reference to the wrapped source
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Get a mutable reference to the wrapped source
    ///
    /// Moving the position of the source directly moves the stream's cursor.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap and return the inner source
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl EndianStream<BufReader<File>> {
    /// Open a file for reading in the given byte order
    #[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>, order: ByteOrder) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidArgument(format!(
                "{} does not exist",
                path.display()
            )));
        }

        Ok(EndianStream::new(BufReader::new(File::open(path)?), order))
    }
}

impl<'a> EndianStream<Cursor<&'a [u8]>> {
    /// Read from a buffer as if it started at `offset`
    ///
    /// Position `0` of the returned stream is `data[offset]`.
    pub fn from_slice_at(data: &'a [u8], offset: usize, order: ByteOrder) -> Result<Self> {
        let data = data.get(offset..).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "offset {offset:#x} is past the end of a {:#x} byte buffer",
                data.len()
            ))
        })?;

        Ok(EndianStream::new(Cursor::new(data), order))
    }
}

impl<S: Seek> EndianStream<S> {
    /// Current cursor position from the start of the source
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Move the cursor to an absolute position
    pub fn seek_to(&mut self, position: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Move the cursor forward without reading
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let count = i64::try_from(count)
            .map_err(|_| Error::InvalidArgument(format!("cannot skip {count} bytes")))?;
        self.inner.seek(SeekFrom::Current(count))?;
        Ok(())
    }

    /// Total length of the source in bytes
    pub fn len(&mut self) -> Result<u64> {
        let saved = self.inner.stream_position()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(saved))?;
        Ok(len)
    }

    /// Whether the source holds no bytes at all
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Run `read` with the cursor at `offset`, then put the cursor back where it was
    ///
    /// The cursor is restored whether or not `read` succeeds.
    pub fn peek_at<T>(
        &mut self,
        offset: u64,
        read: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = self.inner.stream_position()?;
        self.inner.seek(SeekFrom::Start(offset))?;
        let result = read(self);
        self.inner.seek(SeekFrom::Start(saved))?;
        result
    }
}

impl<S: Read + Seek> EndianStream<S> {
    ordered_readers! {
        read_u16, read_u16_at => u16;
        read_u32, read_u32_at => u32;
        read_u64, read_u64_at => u64;
        read_i16, read_i16_at => i16;
        read_i32, read_i32_at => i32;
        read_i64, read_i64_at => i64;
        read_f32, read_f32_at => f32;
        read_f64, read_f64_at => f64;
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.inner.read_u8()?)
    }

    /// Read a single byte at an absolute offset without moving the cursor
    pub fn read_u8_at(&mut self, offset: u64) -> Result<u8> {
        self.peek_at(offset, Self::read_u8)
    }

    /// Read a single signed byte
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.inner.read_i8()?)
    }

    /// Read a single signed byte at an absolute offset without moving the cursor
    pub fn read_i8_at(&mut self, offset: u64) -> Result<i8> {
        self.peek_at(offset, Self::read_i8)
    }

    /// Read a byte and treat anything but zero as `true`
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read `count` raw bytes, no byte order is applied
    ///
    /// Only as many bytes as the source can actually supply are ever buffered, so a bogus
    /// count from corrupt data fails without a large allocation.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let read = self
            .inner
            .by_ref()
            .take(count as u64)
            .read_to_end(&mut buffer)?;
        if read < count {
            return Err(Error::UnexpectedEndOfData);
        }
        Ok(buffer)
    }

    /// Read `count` raw bytes at an absolute offset without moving the cursor
    pub fn read_bytes_at(&mut self, offset: u64, count: usize) -> Result<Vec<u8>> {
        self.peek_at(offset, |s| s.read_bytes(count))
    }

    /// Read a fixed number of raw bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buffer = [0u8; N];
        self.inner.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read up to the next `sentinel` byte
    ///
    /// The sentinel is consumed but not returned.
    pub fn read_until(&mut self, sentinel: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        loop {
            let byte = self.inner.read_u8()?;
            if byte == sentinel {
                break;
            }
            buffer.push(byte);
        }
        Ok(buffer)
    }

    /// Read up to the next `sentinel` byte starting at an absolute offset without moving the cursor
    pub fn read_until_at(&mut self, offset: u64, sentinel: u8) -> Result<Vec<u8>> {
        self.peek_at(offset, |s| s.read_until(sentinel))
    }

    /// Read a [`binrw`] record at the cursor in the configured byte order
    ///
    /// Records that pin their own byte order with `#[br(big)]` or `#[br(little)]` ignore the
    /// stream's order.
    pub fn read_type<T>(&mut self) -> Result<T>
    where
        T: BinRead,
        for<'a> T::Args<'a>: Default,
    {
        let endian = self.order.into();
        Ok(T::read_options(&mut self.inner, endian, Default::default())?)
    }
}

impl<S: Write> EndianStream<S> {
    ordered_writers! {
        write_u16 => u16;
        write_u32 => u32;
        write_u64 => u64;
        write_i16 => i16;
        write_i32 => i32;
        write_i64 => i64;
        write_f32 => f32;
        write_f64 => f64;
    }

    /// Write a single byte
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        Ok(self.inner.write_u8(value)?)
    }

    /// Write a single signed byte
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        Ok(self.inner.write_i8(value)?)
    }

    /// Write `true` as `1` and `false` as `0`
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write raw bytes, no byte order is applied
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        Ok(self.inner.write_all(data)?)
    }
}

impl<S: Read> Read for EndianStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<S: Write> Write for EndianStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S: Seek> Seek for EndianStream<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
