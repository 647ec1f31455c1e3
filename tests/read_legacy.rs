//! Integration tests for pre-6.0 LWOB and LWLO objects.

mod common;

use common::{LwoFile, Payload};
use lwo::iff::ids;
use lwo::object::{ChunkData, LegacyProperty, PolygonType};
use lwo::{FileType, LwoObject, Result};

fn lwob_cube_face() -> Vec<u8> {
    LwoFile::new(b"LWOB")
        .chunk(b"PNTS", Payload::new().f32(0.0).f32(0.0).f32(0.0).f32(1.0).f32(0.0).f32(0.0).f32(1.0).f32(1.0).f32(0.0).f32(0.0).f32(1.0).f32(0.0))
        .chunk(b"SRFS", Payload::new().s0("Body").s0("Trim"))
        // quad on surface 1, then a triangle on surface -2 carrying one detail
        .chunk(
            b"POLS",
            Payload::new()
                .u16(4).u16(0).u16(1).u16(2).u16(3).i16(1)
                .u16(3).u16(0).u16(1).u16(2).i16(-2)
                .u16(1)
                .u16(2).u16(2).u16(3).i16(2),
        )
        .chunk(
            b"SURF",
            Payload::new()
                .s0("Body")
                .sub(b"COLR", Payload::new().raw(&[255, 128, 0, 0]))
                .sub(b"DIFF", Payload::new().u16(200))
                .sub(b"CTEX", Payload::new().s0("Planar Image Map"))
                .sub(b"TIMG", Payload::new().s0("body.iff")),
        )
        .build()
}

#[test]
fn test_lwob_object() -> Result<()> {
    let data = lwob_cube_face();
    let object = LwoObject::from_bytes(&data)?;
    assert_eq!(object.file_type(), FileType::Lwob);
    let graph = object.graph();

    // PNTS creates the implicit layer
    let kinds: Vec<_> = graph.chunks().iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ids::LAYR, ids::PNTS, ids::SRFS, ids::POLS, ids::SURF]);
    assert!(graph.chunks()[0].as_layer().unwrap().implicit);
    assert_eq!(graph.chunks()[2].layer, None);

    let polys = graph.chunks()[3].as_polygons().unwrap();
    assert_eq!(polys.poly_type, PolygonType::Face);
    assert_eq!(polys.len(), 2);
    assert_eq!(polys.rows[0].surface, 1);
    assert_eq!(polys.rows[1].surface, 2);
    assert_eq!(polys.details.len(), 1);
    assert_eq!(polys.details[0].parent_row, 1);
    assert_eq!(polys.details[0].row.indices.as_slice(), &[2, 3]);

    let ChunkData::SurfaceNames(names) = &graph.chunks()[2].data else {
        panic!("expected a surface name list");
    };
    assert_eq!(names.by_file_index(polys.rows[1].surface), Some("Trim"));

    let surf = graph.chunks()[4].as_legacy_surface().unwrap();
    assert_eq!(surf.color(), Some([255, 128, 0]));
    assert_eq!(surf.properties[1], LegacyProperty::Integer { channel: ids::DIFF, value: 200 });
    assert_eq!(surf.textures[0].image.as_deref(), Some("body.iff"));

    let s = graph.summary();
    assert_eq!((s.points, s.polygons, s.detail_polygons, s.surfaces), (4, 2, 1, 1));
    Ok(())
}

#[test]
fn test_lwob_curves() -> Result<()> {
    let data = LwoFile::new(b"LWOB")
        .chunk(b"PNTS", Payload::new().f32(0.0).f32(0.0).f32(0.0).f32(1.0).f32(1.0).f32(1.0))
        .chunk(b"CRVS", Payload::new().u16(2).u16(0).u16(1).u16(1).u16(0x3))
        .build();
    let object = LwoObject::from_bytes(&data)?;
    let curves = object.graph().chunks()[2].as_polygons().unwrap();
    assert_eq!(object.graph().chunks()[2].kind, ids::POLS);
    assert_eq!(curves.poly_type, PolygonType::Curve);
    assert_eq!(curves.rows[0].indices.as_slice(), &[0, 1]);
    assert_eq!(curves.rows[0].flags, 3);
    Ok(())
}

#[test]
fn test_lwlo_layers() -> Result<()> {
    let data = LwoFile::new(b"LWLO")
        .chunk(b"LAYR", Payload::new().u16(1).u16(1).s0("Front"))
        .chunk(b"PNTS", Payload::new().f32(0.0).f32(0.0).f32(0.0))
        .chunk(b"LAYR", Payload::new().u16(2).u16(0).s0("Back"))
        .chunk(b"PNTS", Payload::new().f32(1.0).f32(1.0).f32(1.0))
        .chunk(b"POLS", Payload::new().u16(1).u16(0).i16(1))
        .build();
    let object = LwoObject::from_bytes(&data)?;
    assert_eq!(object.file_type(), FileType::Lwlo);
    let graph = object.graph();

    let layers: Vec<_> = graph.layers().map(|(_, l)| (l.index, l.number, l.name.clone(), l.flag_bit0())).collect();
    assert_eq!(layers, vec![(0, 1, "Front".to_string(), true), (1, 2, "Back".to_string(), false)]);

    // polygons link to the points of their own layer
    let polys = graph.chunks()[4].as_polygons().unwrap();
    assert_eq!(graph.chunks()[4].layer, Some(1));
    assert_eq!(graph.points_of(polys).and_then(|p| p.get(0)).map(|v| v.x), Some(1.0));
    Ok(())
}

#[test]
fn test_lwo2_only_chunks_skipped_in_legacy() -> Result<()> {
    // VMAP is not registered for LWOB, so it must not need a layer
    let data = LwoFile::new(b"LWOB")
        .chunk(b"VMAP", Payload::new().tag(b"TXUV").u16(2).s0("UV"))
        .chunk(b"TAGS", Payload::new().s0("x"))
        .build();
    let object = LwoObject::from_bytes(&data)?;
    assert!(object.graph().is_empty());
    Ok(())
}
