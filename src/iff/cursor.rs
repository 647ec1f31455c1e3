//! Bounds-checked reader over a single chunk or sub-chunk payload.

use byteorder::{BigEndian, ByteOrder};

use super::codec::{decode_padded_string, decode_var_index};
use super::format::{Tag, SUB_CHUNK_HEADER_SIZE};
use crate::util::{Error, Result, Vec3};

/// Read position inside a chunk payload.
///
/// Every read is checked against the payload end; overruns become
/// [`Error::UnexpectedEof`] carrying the absolute file offset.
#[derive(Clone, Debug)]
pub struct ChunkCursor<'a> {
    data: &'a [u8],
    pos: usize,
    /// Absolute file offset of `data[0]`, for error reporting.
    base: u64,
}

impl<'a> ChunkCursor<'a> {
    /// Wrap a payload that starts at `base` in the source.
    pub fn new(data: &'a [u8], base: u64) -> Self {
        Self { data, pos: 0, base }
    }

    /// Current position relative to the payload start.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Absolute file offset of the read position.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.base + self.pos as u64
    }

    /// Payload length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True when the whole payload has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn eof(&self, wanted: usize) -> Error {
        Error::UnexpectedEof(self.offset() + wanted as u64)
    }

    /// Take the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.eof(len));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Take everything that is left.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    /// Skip `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.read_bytes(4)?))
    }

    pub fn read_tag(&mut self) -> Result<Tag> {
        Ok(Tag(self.read_u32()?))
    }

    /// Three consecutive floats (`VEC12` / `COL12`).
    pub fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    /// `count` consecutive floats.
    pub fn read_f32_vec(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.read_bytes(count.checked_mul(4).ok_or(Error::UnexpectedEof(u64::MAX))?)?;
        let mut values = vec![0.0f32; count];
        BigEndian::read_f32_into(bytes, &mut values);
        Ok(values)
    }

    /// Variable-length index (`VX`).
    pub fn read_var_index(&mut self) -> Result<u32> {
        let (value, size) = decode_var_index(&self.data[self.pos..]).map_err(|_| self.eof(2))?;
        self.pos += size;
        Ok(value)
    }

    /// NUL-terminated, even-padded string (`S0`).
    pub fn read_padded_string(&mut self) -> Result<String> {
        let (text, size) =
            decode_padded_string(&self.data[self.pos..]).map_err(|_| self.eof(self.remaining() + 1))?;
        if size > self.remaining() {
            return Err(self.eof(size));
        }
        self.pos += size;
        Ok(text)
    }

    /// Read a sub-chunk header (tag + u16 size) and split off its payload.
    pub fn read_sub_chunk(&mut self) -> Result<(Tag, ChunkCursor<'a>)> {
        if self.remaining() < SUB_CHUNK_HEADER_SIZE {
            return Err(self.eof(SUB_CHUNK_HEADER_SIZE));
        }
        let tag = self.read_tag()?;
        let size = self.read_u16()? as usize;
        let base = self.offset();
        let payload = self.read_bytes(size)?;
        Ok((tag, ChunkCursor::new(payload, base)))
    }
}
