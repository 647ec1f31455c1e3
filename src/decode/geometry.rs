//! Decoders for layers, points, polygons, tags and bounding boxes.

use smallvec::SmallVec;

use crate::iff::{ids, ChunkCursor};
use crate::object::{
    BoundingBox, Chunk, ChunkData, DetailPolygon, Layer, ObjectGraph, Points, PolyTag, PolyTagMapping,
    PolyTagType, PolygonList, PolygonRow, PolygonType, TagNameList,
};
use crate::util::{Error, Result};

/// Low 10 bits of a polygon header hold the vertex count.
const VERTEX_COUNT_MASK: u16 = 0x03FF;
/// High 6 bits of a polygon header hold the flags.
const FLAGS_SHIFT: u16 = 10;
/// Curve continuity bits (first/last point is a control point).
const CURVE_CONTINUITY_MASK: u16 = 0x3;
/// Curve flag bits 2..6.
const CURVE_EXTRA_MASK: u16 = 0x3C;

#[inline]
fn split_count(raw: u16) -> (usize, u16) {
    ((raw & VERTEX_COUNT_MASK) as usize, raw >> FLAGS_SHIFT)
}

/// TAGS: padded strings until the payload ends, indexed from 0.
pub(crate) fn decode_tags(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let mut list = TagNameList::default();
    while !cursor.is_empty() {
        list.names.push(cursor.read_padded_string()?);
    }
    tracing::trace!(count = list.names.len(), "tag names");
    graph.append(Chunk::global(ids::TAGS, ChunkData::TagNames(list)));
    Ok(())
}

/// PTAG: sub-type, then (VX polygon, U2 tag) pairs.
pub(crate) fn decode_poly_tags(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let layer = graph.require_layer(ids::PTAG)?;
    let tag_type = PolyTagType::from_tag(cursor.read_tag()?);

    let mut pairs = Vec::with_capacity(cursor.remaining() / 4);
    while !cursor.is_empty() {
        let polygon = cursor.read_var_index()?;
        let tag = cursor.read_u16()?;
        pairs.push(PolyTag { polygon, tag });
    }

    let context = *graph.context();
    if context.polygons.is_none() {
        tracing::warn!("PTAG without a preceding POLS");
    }
    let mapping = PolyTagMapping { tag_type, polygons: context.polygons, tag_names: context.tag_names, pairs };
    graph.append_to_layer(layer, ids::PTAG, ChunkData::PolyTags(mapping))?;
    Ok(())
}

/// LWO2 LAYR: number, flags, pivot, name and an optional parent.
pub(crate) fn decode_layer(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let number = cursor.read_u16()?;
    let flags = cursor.read_u16()?;
    let pivot = cursor.read_vec3()?;
    let name = cursor.read_padded_string()?;
    let parent = if cursor.is_empty() { None } else { Some(cursor.read_u16()?) };

    let layer = Layer {
        index: graph.next_layer_index(),
        number,
        flags,
        pivot,
        name,
        parent,
        implicit: false,
        members: Vec::new(),
    };
    tracing::trace!(index = layer.index, number, name = %layer.name, "layer");
    graph.append(Chunk::layer_record(layer));
    Ok(())
}

/// LWLO LAYR: number, flags (bit 0 = active) and name; no pivot or parent.
pub(crate) fn decode_legacy_layer(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let number = cursor.read_u16()?;
    let flags = cursor.read_u16()?;
    let name = cursor.read_padded_string()?;

    let mut layer = Layer::implicit(graph.next_layer_index());
    layer.implicit = false;
    layer.number = number;
    layer.flags = flags;
    layer.name = name;
    graph.append(Chunk::layer_record(layer));
    Ok(())
}

/// BBOX: floats sized by payload length / 4.
pub(crate) fn decode_bbox(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let layer = graph.require_layer(ids::BBOX)?;
    let extents = cursor.read_f32_vec(cursor.remaining() / 4)?;
    if extents.len() != 6 {
        tracing::warn!(count = extents.len(), "BBOX does not hold six floats");
    }
    graph.append_to_layer(layer, ids::BBOX, ChunkData::BoundingBox(BoundingBox { extents }))?;
    Ok(())
}

/// PNTS: float triples; creates layer 0 if no layer was declared.
pub(crate) fn decode_points(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    if cursor.remaining() % 12 != 0 {
        tracing::warn!(size = cursor.remaining(), "PNTS size is not a multiple of 12");
    }
    let values = cursor.read_f32_vec(cursor.remaining() / 4)?;
    let layer = graph.ensure_layer();
    graph.append_to_layer(layer, ids::PNTS, ChunkData::Points(Points { values }))?;
    Ok(())
}

/// LWO2 POLS: sub-type tag, then rows of (count+flags, VX indices).
pub(crate) fn decode_polygons(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let type_tag = cursor.read_tag()?;
    let poly_type = PolygonType::from_tag(type_tag).ok_or(Error::UnknownPolygonType(type_tag))?;

    let layer = graph.ensure_layer();
    let mut list = PolygonList::new(poly_type, graph.context().points);

    while !cursor.is_empty() {
        let (count, mut flags) = split_count(cursor.read_u16()?);
        let mut extra_count_bits = 0;
        if poly_type == PolygonType::Curve {
            // extra bits stay separate from the count
            extra_count_bits = (flags & CURVE_EXTRA_MASK) >> 2;
            flags &= CURVE_CONTINUITY_MASK;
        }

        let mut indices = SmallVec::with_capacity(count);
        for _ in 0..count {
            indices.push(cursor.read_var_index()?);
        }
        list.rows.push(PolygonRow { indices, flags, surface: 0, extra_count_bits });
    }

    tracing::trace!(kind = %type_tag, rows = list.rows.len(), "polygons");
    graph.append_to_layer(layer, ids::POLS, ChunkData::Polygons(list))?;
    Ok(())
}

/// One legacy row: count+flags, U2 indices, I2 surface.
/// Returns the row and whether detail polygons follow.
fn read_legacy_row(cursor: &mut ChunkCursor<'_>) -> Result<(PolygonRow, bool)> {
    let (count, flags) = split_count(cursor.read_u16()?);
    let mut indices = SmallVec::with_capacity(count);
    for _ in 0..count {
        indices.push(cursor.read_u16()? as u32);
    }
    let surface = cursor.read_i16()?;
    let row = PolygonRow { indices, flags, surface: surface.unsigned_abs(), extra_count_bits: 0 };
    Ok((row, surface < 0))
}

/// LWOB/LWLO POLS: faces with fixed 2-byte indices and a signed surface.
///
/// A negative surface means a list of detail polygons follows; they are kept
/// in [`PolygonList::details`], not merged into the parent row.
pub(crate) fn decode_legacy_polygons(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let layer = graph.ensure_layer();
    let mut list = PolygonList::new(PolygonType::Face, graph.context().points);

    while !cursor.is_empty() {
        let (row, has_details) = read_legacy_row(cursor)?;
        let parent_row = list.rows.len();
        list.rows.push(row);

        if has_details {
            let count = cursor.read_u16()?;
            for _ in 0..count {
                // detail polygons cannot nest; the sign is dropped
                let (row, _) = read_legacy_row(cursor)?;
                list.details.push(DetailPolygon { parent_row, row });
            }
        }
    }

    if !list.details.is_empty() {
        tracing::debug!(details = list.details.len(), "legacy detail polygons recorded separately");
    }
    graph.append_to_layer(layer, ids::POLS, ChunkData::Polygons(list))?;
    Ok(())
}

/// LWOB/LWLO CRVS: U2 count, U2 indices, U2 surface, U2 continuity flags.
/// Stored as a curve polygon list.
pub(crate) fn decode_legacy_curves(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let layer = graph.ensure_layer();
    let mut list = PolygonList::new(PolygonType::Curve, graph.context().points);

    while !cursor.is_empty() {
        let count = cursor.read_u16()? as usize;
        let mut indices = SmallVec::with_capacity(count);
        for _ in 0..count {
            indices.push(cursor.read_u16()? as u32);
        }
        let surface = cursor.read_u16()?;
        let flags = cursor.read_u16()?;
        list.rows.push(PolygonRow { indices, flags, surface, extra_count_bits: 0 });
    }

    graph.append_to_layer(layer, ids::POLS, ChunkData::Polygons(list))?;
    Ok(())
}
