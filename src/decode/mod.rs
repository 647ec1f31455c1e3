//! Chunk dispatcher: header validation, the top-level chunk walk and
//! routing of each payload to its variant decoder.
//!
//! Decoding is one synchronous pass. Chunk order matters: points, polygons
//! and tags link to whatever layer/points/polygons were decoded last, so the
//! walk never reorders or parallelizes. Any error aborts the pass and no
//! graph is returned.

mod clip;
mod envelope;
mod geometry;
mod surface;
mod surface_legacy;
mod vmap;

use std::path::Path;

use byteorder::{BigEndian, ByteOrder};

use crate::iff::format::{CHUNK_HEADER_SIZE, FORM_SIZE_ADJUST, HEADER_SIZE};
use crate::iff::{ids, ByteSource, ChunkCursor, FileType, IStreams, Tag};
use crate::object::{Chunk, ChunkData, ObjectGraph, TextChunk};
use crate::util::{Error, Result};

/// Decoder for one (tag, variant) pair. Reads the whole payload through the
/// cursor and appends its record(s) to the graph.
pub(crate) type DecodeFn = fn(&mut ObjectGraph, &mut ChunkCursor<'_>) -> Result<()>;

const ALL: &[FileType] = &[FileType::Lwo2, FileType::Lwob, FileType::Lwlo];
const MODERN: &[FileType] = &[FileType::Lwo2];
const LEGACY: &[FileType] = &[FileType::Lwob, FileType::Lwlo];
const LAYERED_LEGACY: &[FileType] = &[FileType::Lwlo];

/// Dispatch table. Tags missing here (ICON and anything newer) are skipped.
const DECODERS: &[(Tag, &[FileType], DecodeFn)] = &[
    (ids::TAGS, MODERN, geometry::decode_tags),
    (ids::PTAG, MODERN, geometry::decode_poly_tags),
    (ids::LAYR, MODERN, geometry::decode_layer),
    (ids::LAYR, LAYERED_LEGACY, geometry::decode_legacy_layer),
    (ids::BBOX, MODERN, geometry::decode_bbox),
    (ids::PNTS, ALL, geometry::decode_points),
    (ids::POLS, MODERN, geometry::decode_polygons),
    (ids::POLS, LEGACY, geometry::decode_legacy_polygons),
    (ids::CRVS, LEGACY, geometry::decode_legacy_curves),
    (ids::SRFS, LEGACY, surface_legacy::decode_surface_names),
    (ids::SURF, MODERN, surface::decode_surface),
    (ids::SURF, LEGACY, surface_legacy::decode_legacy_surface),
    (ids::ENVL, MODERN, envelope::decode_envelope),
    (ids::CLIP, MODERN, clip::decode_clip),
    (ids::VMAP, MODERN, vmap::decode_vertex_map),
    (ids::VMAD, MODERN, vmap::decode_discontinuous_vertex_map),
    (ids::DESC, ALL, decode_description),
    (ids::TEXT, ALL, decode_comment),
];

/// Find the decoder registered for `tag` in `file_type`.
pub(crate) fn lookup(tag: Tag, file_type: FileType) -> Option<DecodeFn> {
    DECODERS
        .iter()
        .find(|(t, variants, _)| *t == tag && variants.contains(&file_type))
        .map(|&(_, _, decode)| decode)
}

fn decode_description(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    decode_text_chunk(graph, cursor, ids::DESC)
}

fn decode_comment(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    decode_text_chunk(graph, cursor, ids::TEXT)
}

/// DESC / TEXT: one padded string, kept for pass-through.
fn decode_text_chunk(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>, kind: Tag) -> Result<()> {
    let text = cursor.read_padded_string()?;
    graph.append(Chunk::global(kind, ChunkData::Text(TextChunk { text })));
    Ok(())
}

/// Validated container header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_type: FileType,
    /// FORM size field (total length - 8).
    pub declared_size: u64,
}

/// Check the 12-byte FORM header against the source length.
pub fn parse_header<S: ByteSource + ?Sized>(source: &S) -> Result<FileHeader> {
    let total = source.total_size();
    if total < HEADER_SIZE as u64 {
        return Err(Error::UnexpectedEof(total));
    }
    let bytes = source.slice_at(0, HEADER_SIZE)?;

    let magic = Tag(BigEndian::read_u32(&bytes[0..4]));
    if magic != ids::FORM {
        return Err(Error::InvalidMagic(magic));
    }

    let declared_size = BigEndian::read_u32(&bytes[4..8]) as u64;
    let expected = total - FORM_SIZE_ADJUST;
    if declared_size != expected {
        return Err(Error::SizeMismatch { declared: declared_size, expected });
    }

    let type_tag = Tag(BigEndian::read_u32(&bytes[8..12]));
    let file_type = FileType::from_tag(type_tag).ok_or(Error::UnsupportedFileType(type_tag))?;

    Ok(FileHeader { file_type, declared_size })
}

/// Location of one top-level chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: Tag,
    /// Offset of the payload (after the 8-byte header).
    pub offset: u64,
    pub size: u64,
}

/// Walks top-level chunks after the FORM header.
///
/// Yields an error (and then stops) when a header or payload would run past
/// the end of the source.
pub struct ChunkIter<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    offset: u64,
    end: u64,
    failed: bool,
}

impl<'a, S: ByteSource + ?Sized> ChunkIter<'a, S> {
    /// Validate the header and position at the first chunk.
    pub fn new(source: &'a S) -> Result<(FileHeader, Self)> {
        let header = parse_header(source)?;
        let iter = Self {
            source,
            offset: HEADER_SIZE as u64,
            end: header.declared_size + FORM_SIZE_ADJUST,
            failed: false,
        };
        Ok((header, iter))
    }

    fn read_next(&mut self) -> Result<(ChunkHeader, &'a [u8])> {
        let source = self.source;
        let raw = source.slice_at(self.offset, CHUNK_HEADER_SIZE)?;
        let tag = Tag(BigEndian::read_u32(&raw[0..4]));
        let size = BigEndian::read_u32(&raw[4..8]) as u64;

        let offset = self.offset + CHUNK_HEADER_SIZE as u64;
        let remaining = source.total_size().saturating_sub(offset);
        if size > remaining {
            return Err(Error::Truncated { tag, offset, declared: size, remaining });
        }

        let payload = source.slice_at(offset, size as usize)?;
        self.offset = offset + size;
        Ok((ChunkHeader { tag, offset, size }, payload))
    }
}

impl<'a, S: ByteSource + ?Sized> Iterator for ChunkIter<'a, S> {
    type Item = Result<(ChunkHeader, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.end {
            return None;
        }
        let item = self.read_next();
        self.failed = item.is_err();
        Some(item)
    }
}

/// A fully decoded LightWave object.
#[derive(Clone, Debug, PartialEq)]
pub struct LwoObject {
    file_type: FileType,
    graph: ObjectGraph,
}

impl LwoObject {
    /// Open and decode a file (memory-mapped when the `mmap` feature is on).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::decode(&IStreams::open(path)?)
    }

    /// Open and decode a file with optional memory mapping.
    pub fn open_opts(path: impl AsRef<Path>, use_mmap: bool) -> Result<Self> {
        Self::decode(&IStreams::open_opts(path, use_mmap)?)
    }

    /// Decode an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::decode(data)
    }

    /// Decode from any byte source in one pass.
    #[tracing::instrument(skip_all, fields(size = source.total_size()))]
    pub fn decode<S: ByteSource + ?Sized>(source: &S) -> Result<Self> {
        let (header, chunks) = ChunkIter::new(source)?;
        let file_type = header.file_type;
        tracing::debug!(%file_type, declared = header.declared_size, "LWO header");

        let mut graph = ObjectGraph::new();
        for item in chunks {
            let (chunk, payload) = item?;
            let Some(decode) = lookup(chunk.tag, file_type) else {
                tracing::trace!(tag = %chunk.tag, offset = chunk.offset, size = chunk.size, "skipping chunk");
                continue;
            };

            tracing::debug!(tag = %chunk.tag, offset = chunk.offset, size = chunk.size, "decoding chunk");
            let mut cursor = ChunkCursor::new(payload, chunk.offset);
            decode(&mut graph, &mut cursor)?;
            if !cursor.is_empty() {
                tracing::trace!(tag = %chunk.tag, unread = cursor.remaining(), "trailing bytes in chunk");
            }
        }

        Ok(Self { file_type, graph })
    }

    #[inline]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    #[inline]
    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    pub fn into_graph(self) -> ObjectGraph {
        self.graph
    }
}

/// Decode from any byte source; shorthand for [`LwoObject::decode`].
pub fn read_object<S: ByteSource + ?Sized>(source: &S) -> Result<LwoObject> {
    LwoObject::decode(source)
}
