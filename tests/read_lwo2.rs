//! Integration tests for decoding LWO2 objects.

mod common;

use common::{triangle_lwo2, LwoFile, Payload};
use lwo::decode::ChunkIter;
use lwo::iff::ids;
use lwo::object::{PolyTagType, PolygonType, SurfaceProperty};
use lwo::util::Vec3;
use lwo::{Error, FileType, LwoObject, Result};

#[test]
fn test_triangle_object() -> Result<()> {
    let data = triangle_lwo2();
    let object = LwoObject::from_bytes(&data)?;
    assert_eq!(object.file_type(), FileType::Lwo2);

    let graph = object.graph();
    let kinds: Vec<_> = graph.chunks().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ids::TAGS, ids::LAYR, ids::PNTS, ids::BBOX, ids::VMAP, ids::POLS, ids::PTAG, ids::SURF]
    );

    // one explicit layer owning everything geometric
    let layers: Vec<_> = graph.layers().collect();
    assert_eq!(layers.len(), 1);
    let (layer_id, layer) = layers[0];
    assert_eq!(layer.index, 0);
    assert_eq!(layer.name, "Body");
    assert!(!layer.implicit);
    let owned: Vec<_> = graph.members(layer_id).map(|(_, c)| c.kind).collect();
    assert_eq!(owned, vec![ids::PNTS, ids::BBOX, ids::VMAP, ids::POLS, ids::PTAG, ids::SURF]);

    // exact coordinates
    let points = graph.chunks()[2].as_points().unwrap();
    assert_eq!(points.values, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    assert_eq!(points.get(1), Some(Vec3::X));

    let bbox = graph.chunks()[3].as_bounding_box().and_then(|b| b.bbox()).unwrap();
    assert_eq!(bbox.max, Vec3::new(1.0, 1.0, 0.0));

    let polys = graph.chunks()[5].as_polygons().unwrap();
    assert_eq!(polys.poly_type, PolygonType::Face);
    assert_eq!(polys.rows[0].indices.as_slice(), &[0, 1, 2]);
    assert_eq!(graph.points_of(polys), Some(points));

    // PTAG links back to the polygon list and tag names decoded before it
    let ptag = graph.chunks()[6].as_poly_tags().unwrap();
    assert_eq!(ptag.tag_type, PolyTagType::Surface);
    assert_eq!(ptag.polygons.map(|id| id.index()), Some(5));
    let names = ptag.tag_names.and_then(|id| graph.tag_names(id)).unwrap();
    assert_eq!(names.get(ptag.pairs[0].tag as usize), Some("Default"));

    let surface = graph.surface("Default").unwrap();
    assert_eq!(surface.color().map(|c| c.value), Some(Vec3::new(0.8, 0.2, 0.2)));
    assert!(matches!(surface.properties[1], SurfaceProperty::Scalar { channel: ids::DIFF, .. }));

    let uv = graph.chunks()[4].as_vertex_map().unwrap();
    assert_eq!(uv.get(2), Some(&[0.0, 1.0][..]));

    let s = graph.summary();
    assert_eq!((s.layers, s.points, s.polygons, s.surfaces, s.vertex_maps), (1, 3, 1, 1, 1));
    Ok(())
}

#[test]
fn test_minimal_container() -> Result<()> {
    let data = LwoFile::lwo2()
        .chunk(b"LAYR", Payload::new().u16(0).u16(0).vec3(0.0, 0.0, 0.0).s0("Layer"))
        .chunk(b"PNTS", Payload::new().vec3(-0.5, 0.25, 3.0e-7).vec3(1.5, -2.0, 0.0).vec3(0.1, 0.2, 0.3))
        .chunk(b"POLS", Payload::new().tag(b"FACE").u16(3).vx(0).vx(1).vx(2))
        .chunk(b"TAGS", Payload::new().s0("Skin"))
        .chunk(b"PTAG", Payload::new().tag(b"SURF").vx(0).u16(0))
        .build();
    let graph = LwoObject::from_bytes(&data)?.into_graph();

    let layers: Vec<_> = graph.layers().collect();
    assert_eq!(layers.len(), 1);
    let members: Vec<_> = graph.members(layers[0].0).map(|(_, c)| c.kind).collect();
    assert_eq!(members, vec![ids::PNTS, ids::POLS, ids::PTAG]);

    let points = graph.chunks()[1].as_points().unwrap();
    assert_eq!(points.values, vec![-0.5, 0.25, 3.0e-7, 1.5, -2.0, 0.0, 0.1, 0.2, 0.3]);
    let ptag = graph.chunks()[4].as_poly_tags().unwrap();
    assert_eq!((ptag.pairs[0].polygon, ptag.pairs[0].tag), (0, 0));
    assert_eq!(graph.chunks()[3].layer, None);
    Ok(())
}

#[test]
fn test_decode_is_deterministic() -> Result<()> {
    let data = triangle_lwo2();
    let a = LwoObject::from_bytes(&data)?;
    let b = LwoObject::from_bytes(&data)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_implicit_layer_for_leading_geometry() -> Result<()> {
    let data = LwoFile::lwo2()
        .chunk(b"PNTS", Payload::new().vec3(1.0, 2.0, 3.0))
        .chunk(b"POLS", Payload::new().tag(b"FACE").u16(1).vx(0))
        .chunk(b"LAYR", Payload::new().u16(1).u16(0).vec3(0.0, 0.0, 0.0).s0("Second"))
        .chunk(b"PNTS", Payload::new().vec3(4.0, 5.0, 6.0))
        .build();
    let object = LwoObject::from_bytes(&data)?;
    let graph = object.graph();

    let layers: Vec<_> = graph.layers().map(|(_, l)| (l.index, l.implicit)).collect();
    assert_eq!(layers, vec![(0, true), (1, false)]);
    assert_eq!(graph.chunks()[1].layer, Some(0));
    assert_eq!(graph.chunks()[2].layer, Some(0));
    assert_eq!(graph.chunks()[4].layer, Some(1));
    Ok(())
}

#[test]
fn test_unknown_chunks_are_skipped() -> Result<()> {
    let data = LwoFile::lwo2()
        .chunk(b"ICON", Payload::new().raw(&[0; 10]))
        .chunk(b"ZZZZ", Payload::new())
        .chunk(b"DESC", Payload::new().s0("a teapot"))
        .chunk(b"LAYR", Payload::new().u16(0).u16(0).vec3(0.0, 0.0, 0.0).s0(""))
        .build();
    let object = LwoObject::from_bytes(&data)?;
    let graph = object.graph();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.chunks()[0].as_text().map(|t| t.text.as_str()), Some("a teapot"));

    // the raw walk still sees every chunk
    let (_, iter) = ChunkIter::new(data.as_slice())?;
    let tags: Vec<_> = iter.map(|c| c.map(|(h, _)| h.tag)).collect::<Result<_>>()?;
    assert_eq!(tags.len(), 4);
    assert_eq!(tags[0], ids::ICON);
    Ok(())
}

#[test]
fn test_truncated_file_fails() {
    let mut data = triangle_lwo2();
    // drop the tail and patch the FORM size so only the last chunk is short
    data.truncate(data.len() - 4);
    let form = (data.len() - 8) as u32;
    data[4..8].copy_from_slice(&form.to_be_bytes());

    let err = LwoObject::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::Truncated { tag: ids::SURF, .. }), "got {:?}", err);
}

#[test]
fn test_header_errors() {
    let data = triangle_lwo2();

    let mut bad_magic = data.clone();
    bad_magic[0..4].copy_from_slice(b"RIFF");
    assert!(matches!(LwoObject::from_bytes(&bad_magic), Err(Error::InvalidMagic(_))));

    let mut bad_size = data.clone();
    bad_size.push(0);
    assert!(matches!(LwoObject::from_bytes(&bad_size), Err(Error::SizeMismatch { .. })));

    let mut bad_type = data;
    bad_type[8..12].copy_from_slice(b"ILBM");
    assert!(matches!(LwoObject::from_bytes(&bad_type), Err(Error::UnsupportedFileType(_))));

    assert!(matches!(LwoObject::from_bytes(b"FORM"), Err(Error::UnexpectedEof(4))));
}

#[test]
fn test_missing_layer_context() {
    let data = LwoFile::lwo2().chunk(b"PTAG", Payload::new().tag(b"SURF")).build();
    let err = LwoObject::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::MissingContext { chunk: ids::PTAG, requires: ids::LAYR }));
}

#[test]
fn test_unknown_polygon_type() {
    let data = LwoFile::lwo2().chunk(b"POLS", Payload::new().tag(b"QUAD").u16(0)).build();
    assert!(matches!(LwoObject::from_bytes(&data), Err(Error::UnknownPolygonType(_))));
}

#[test]
fn test_envelopes_and_clips_are_global() -> Result<()> {
    let data = LwoFile::lwo2()
        .chunk(b"LAYR", Payload::new().u16(0).u16(0).vec3(0.0, 0.0, 0.0).s0(""))
        .chunk(
            b"ENVL",
            Payload::new()
                .vx(1)
                .sub(b"KEY ", Payload::new().f32(0.0).f32(0.5))
                .sub(b"KEY ", Payload::new().f32(1.0).f32(1.0)),
        )
        .chunk(b"CLIP", Payload::new().u32(1).sub(b"STIL", Payload::new().s0("wood.png")))
        .build();
    let object = LwoObject::from_bytes(&data)?;
    let graph = object.graph();

    let env = graph.chunks()[1].as_envelope().unwrap();
    assert_eq!(env.keys.iter().map(|k| k.value).collect::<Vec<_>>(), vec![0.5, 1.0]);
    let clip = graph.chunks()[2].as_clip().unwrap();
    assert_eq!(clip.clip_type, Some(ids::STIL));

    assert!(graph.chunks()[1..].iter().all(|c| c.layer.is_none()));
    let (layer, _) = graph.layers().next().unwrap();
    assert_eq!(graph.members(layer).count(), 0);
    Ok(())
}
