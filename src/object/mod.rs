//! Decoded LWO records and the graph that owns them.
//!
//! Every record is a [`Chunk`]: a kind tag, the index of the layer it belongs
//! to (if any) and the typed payload. All chunks live in one arena inside
//! [`ObjectGraph`]; relations between them are [`ChunkId`] handles.

mod envelope;
mod geometry;
mod graph;
mod surface;
mod vmap;

pub use envelope::*;
pub use geometry::*;
pub use graph::*;
pub use surface::*;
pub use vmap::*;

use std::fmt;

use crate::iff::Tag;

/// Handle of a chunk inside an [`ObjectGraph`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub(crate) usize);

impl ChunkId {
    /// Position in decode order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Typed payload of a decoded chunk.
#[derive(Clone, Debug, PartialEq)]
pub enum ChunkData {
    Layer(Layer),
    Points(Points),
    Polygons(PolygonList),
    TagNames(TagNameList),
    PolyTags(PolyTagMapping),
    SurfaceNames(SurfaceNameList),
    Surface(Surface),
    LegacySurface(LegacySurface),
    Envelope(Envelope),
    Clip(Clip),
    VertexMap(VertexMap),
    BoundingBox(BoundingBox),
    Text(TextChunk),
}

/// One decoded record.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub kind: Tag,
    /// Graph-assigned index of the owning layer.
    pub layer: Option<u32>,
    pub data: ChunkData,
}

impl Chunk {
    /// Record not owned by any layer.
    pub fn global(kind: Tag, data: ChunkData) -> Self {
        Self { kind, layer: None, data }
    }

    /// Layer record; a layer owns itself.
    pub fn layer_record(layer: Layer) -> Self {
        Self { kind: crate::iff::ids::LAYR, layer: Some(layer.index), data: ChunkData::Layer(layer) }
    }

    /// Short name of the payload kind, for listings.
    pub fn type_name(&self) -> &'static str {
        match &self.data {
            ChunkData::Layer(_) => "Layer",
            ChunkData::Points(_) => "Points",
            ChunkData::Polygons(_) => "Polygons",
            ChunkData::TagNames(_) => "TagNames",
            ChunkData::PolyTags(_) => "PolyTags",
            ChunkData::SurfaceNames(_) => "SurfaceNames",
            ChunkData::Surface(_) => "Surface",
            ChunkData::LegacySurface(_) => "LegacySurface",
            ChunkData::Envelope(_) => "Envelope",
            ChunkData::Clip(_) => "Clip",
            ChunkData::VertexMap(_) => "VertexMap",
            ChunkData::BoundingBox(_) => "BoundingBox",
            ChunkData::Text(_) => "Text",
        }
    }

    pub fn as_layer(&self) -> Option<&Layer> {
        match &self.data {
            ChunkData::Layer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&Points> {
        match &self.data {
            ChunkData::Points(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_polygons(&self) -> Option<&PolygonList> {
        match &self.data {
            ChunkData::Polygons(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tag_names(&self) -> Option<&TagNameList> {
        match &self.data {
            ChunkData::TagNames(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_poly_tags(&self) -> Option<&PolyTagMapping> {
        match &self.data {
            ChunkData::PolyTags(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_surface(&self) -> Option<&Surface> {
        match &self.data {
            ChunkData::Surface(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_legacy_surface(&self) -> Option<&LegacySurface> {
        match &self.data {
            ChunkData::LegacySurface(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_envelope(&self) -> Option<&Envelope> {
        match &self.data {
            ChunkData::Envelope(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_clip(&self) -> Option<&Clip> {
        match &self.data {
            ChunkData::Clip(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vertex_map(&self) -> Option<&VertexMap> {
        match &self.data {
            ChunkData::VertexMap(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bounding_box(&self) -> Option<&BoundingBox> {
        match &self.data {
            ChunkData::BoundingBox(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextChunk> {
        match &self.data {
            ChunkData::Text(v) => Some(v),
            _ => None,
        }
    }
}
