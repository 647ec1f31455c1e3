//! VMAP / VMAD decoders.

use smallvec::SmallVec;

use crate::iff::{ids, ChunkCursor, Tag};
use crate::object::{ChunkData, ObjectGraph, VertexMap, VertexMapEntry};
use crate::util::Result;

/// VMAP: type, dimension, name, then `(vertex VX, dimension x f32)` tuples.
pub(crate) fn decode_vertex_map(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    decode_map(graph, cursor, ids::VMAP, false)
}

/// VMAD: like VMAP, with a polygon VX after each vertex index.
pub(crate) fn decode_discontinuous_vertex_map(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    decode_map(graph, cursor, ids::VMAD, true)
}

fn decode_map(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>, kind: Tag, discontinuous: bool) -> Result<()> {
    let layer = graph.require_layer(kind)?;

    let map_type = cursor.read_tag()?;
    let dimension = cursor.read_u16()?;
    let name = cursor.read_padded_string()?;

    let mut entries = Vec::new();
    while !cursor.is_empty() {
        let vertex = cursor.read_var_index()?;
        let polygon = if discontinuous { Some(cursor.read_var_index()?) } else { None };
        let mut values = SmallVec::with_capacity(dimension as usize);
        for _ in 0..dimension {
            values.push(cursor.read_f32()?);
        }
        entries.push(VertexMapEntry { vertex, polygon, values });
    }

    tracing::trace!(%kind, %map_type, %name, dimension, entries = entries.len(), "vertex map");
    let map = VertexMap { map_type, dimension, name, discontinuous, points: graph.context().points, entries };
    graph.append_to_layer(layer, kind, ChunkData::VertexMap(map))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_util::Bytes;
    use crate::object::{Chunk, Points};
    use crate::util::Error;

    fn run(graph: &mut ObjectGraph, f: crate::decode::DecodeFn, payload: Bytes) -> Result<()> {
        let data = payload.build();
        f(graph, &mut ChunkCursor::new(&data, 0))
    }

    fn with_points() -> ObjectGraph {
        let mut g = ObjectGraph::new();
        let layer = g.ensure_layer();
        g.append_to_layer(layer, ids::PNTS, ChunkData::Points(Points { values: vec![0.0; 9] }))
            .unwrap();
        g
    }

    #[test]
    fn test_uv_map() -> Result<()> {
        let mut g = with_points();
        let payload = Bytes::new()
            .tag(b"TXUV")
            .u16(2)
            .s0("UVMap")
            .vx(0)
            .f32(0.0)
            .f32(0.0)
            .vx(1)
            .f32(1.0)
            .f32(0.0)
            .vx(2)
            .f32(0.5)
            .f32(1.0);
        run(&mut g, decode_vertex_map, payload)?;

        let chunk = g.chunks().last().unwrap();
        assert_eq!(chunk.kind, ids::VMAP);
        assert_eq!(chunk.layer, Some(0));
        let map = chunk.as_vertex_map().unwrap();
        assert_eq!(map.map_type, Tag::new(b"TXUV"));
        assert_eq!(map.name, "UVMap");
        assert!(!map.discontinuous);
        assert_eq!(map.points, g.context().points);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(2), Some(&[0.5, 1.0][..]));
        assert_eq!(map.get(3), None);
        Ok(())
    }

    #[test]
    fn test_discontinuous_map() -> Result<()> {
        let mut g = with_points();
        let payload = Bytes::new().tag(b"TXUV").u16(2).s0("UVMap").vx(1).vx(0).f32(0.9).f32(0.1).vx(1).vx(4).f32(0.2).f32(0.3);
        run(&mut g, decode_discontinuous_vertex_map, payload)?;

        let map = g.chunks().last().and_then(Chunk::as_vertex_map).unwrap();
        assert!(map.discontinuous);
        assert_eq!(map.entries[1].polygon, Some(4));
        assert_eq!(map.get_for_polygon(1, 4), Some(&[0.2, 0.3][..]));
        assert_eq!(map.get_for_polygon(1, 5), None);
        Ok(())
    }

    #[test]
    fn test_weight_map_dimension_one() -> Result<()> {
        let mut g = with_points();
        run(&mut g, decode_vertex_map, Bytes::new().tag(b"WGHT").u16(1).s0("Weight").vx(0).f32(0.5))?;
        let map = g.chunks().last().and_then(Chunk::as_vertex_map).unwrap();
        assert_eq!(map.get(0), Some(&[0.5][..]));
        Ok(())
    }

    #[test]
    fn test_requires_layer() {
        let mut g = ObjectGraph::new();
        let err = run(&mut g, decode_vertex_map, Bytes::new().tag(b"TXUV").u16(2).s0("UV")).unwrap_err();
        assert!(matches!(err, Error::MissingContext { chunk: ids::VMAP, requires: ids::LAYR }));
        assert!(g.is_empty());
    }

    #[test]
    fn test_partial_tuple_fails() {
        let mut g = with_points();
        // second float of the tuple missing
        let payload = Bytes::new().tag(b"TXUV").u16(2).s0("UV").vx(0).f32(1.0);
        assert!(run(&mut g, decode_vertex_map, payload).unwrap_err().is_truncation());
    }
}
