//! Object graph: ordered arena of decoded chunks.

use super::{Chunk, ChunkData, ChunkId, Layer, Points, PolygonList, Surface, TagNameList};
use crate::iff::{ids, Tag};
use crate::util::{Error, Result};

/// Most recent chunk of each kind that later chunks link to implicitly.
///
/// Updated on every append; always equal to what
/// [`ObjectGraph::find_most_recent`] would return for the same kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Context {
    pub layer: Option<ChunkId>,
    pub points: Option<ChunkId>,
    pub polygons: Option<ChunkId>,
    pub tag_names: Option<ChunkId>,
}

impl Context {
    fn update(&mut self, kind: Tag, id: ChunkId) {
        match kind {
            ids::LAYR => self.layer = Some(id),
            ids::PNTS => self.points = Some(id),
            ids::POLS => self.polygons = Some(id),
            ids::TAGS => self.tag_names = Some(id),
            _ => {}
        }
    }
}

/// Counts over a whole graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub chunks: usize,
    pub layers: usize,
    pub points: usize,
    pub polygon_lists: usize,
    pub polygons: usize,
    pub detail_polygons: usize,
    pub tag_names: usize,
    pub surfaces: usize,
    pub envelopes: usize,
    pub clips: usize,
    pub vertex_maps: usize,
}

/// Owner of every decoded chunk, in decode order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectGraph {
    chunks: Vec<Chunk>,
    next_layer: u32,
    context: Context,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a chunk; O(1).
    pub fn append(&mut self, chunk: Chunk) -> ChunkId {
        let id = ChunkId(self.chunks.len());
        self.context.update(chunk.kind, id);
        self.chunks.push(chunk);
        id
    }

    /// Append a chunk owned by `layer` and record it in the layer's member list.
    pub fn append_to_layer(&mut self, layer: ChunkId, kind: Tag, data: ChunkData) -> Result<ChunkId> {
        let index = self.layer(layer)?.index;
        let id = self.append(Chunk { kind, layer: Some(index), data });
        match self.chunks.get_mut(layer.0).map(|c| &mut c.data) {
            Some(ChunkData::Layer(l)) => l.members.push(id),
            _ => return Err(Error::invalid(format!("chunk {:?} is not a layer", layer))),
        }
        Ok(id)
    }

    /// Reverse scan for the last chunk of `kind`.
    pub fn find_most_recent(&self, kind: Tag) -> Option<ChunkId> {
        self.chunks.iter().rposition(|c| c.kind == kind).map(ChunkId)
    }

    /// Hand out the next layer index; never reused.
    pub fn next_layer_index(&mut self) -> u32 {
        let index = self.next_layer;
        self.next_layer += 1;
        index
    }

    /// Current implicit linkage targets.
    #[inline]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Current layer, creating an implicit one if none was declared yet.
    pub fn ensure_layer(&mut self) -> ChunkId {
        if let Some(id) = self.context.layer {
            return id;
        }
        let index = self.next_layer_index();
        tracing::debug!(index, "no LAYR before geometry, creating implicit layer");
        self.append(Chunk::layer_record(Layer::implicit(index)))
    }

    /// Current layer, or a [`Error::MissingContext`] naming `chunk`.
    pub fn require_layer(&self, chunk: Tag) -> Result<ChunkId> {
        self.context.layer.ok_or(Error::MissingContext { chunk, requires: ids::LAYR })
    }

    // ---- queries ----

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.0)
    }

    /// All chunks in decode order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChunkId, &Chunk)> + '_ {
        self.chunks.iter().enumerate().map(|(i, c)| (ChunkId(i), c))
    }

    /// Chunks of one kind, in decode order.
    pub fn of_kind(&self, kind: Tag) -> impl Iterator<Item = (ChunkId, &Chunk)> + '_ {
        self.iter().filter(move |(_, c)| c.kind == kind)
    }

    pub fn layer(&self, id: ChunkId) -> Result<&Layer> {
        self.get(id)
            .and_then(Chunk::as_layer)
            .ok_or_else(|| Error::invalid(format!("chunk {:?} is not a layer", id)))
    }

    pub fn layers(&self) -> impl Iterator<Item = (ChunkId, &Layer)> + '_ {
        self.iter().filter_map(|(id, c)| c.as_layer().map(|l| (id, l)))
    }

    /// Layer by graph-assigned index.
    pub fn layer_by_index(&self, index: u32) -> Option<(ChunkId, &Layer)> {
        self.layers().find(|(_, l)| l.index == index)
    }

    /// Member chunks of a layer, in attach order.
    pub fn members(&self, layer: ChunkId) -> impl Iterator<Item = (ChunkId, &Chunk)> + '_ {
        let members = self.get(layer).and_then(Chunk::as_layer).map(|l| l.members.as_slice()).unwrap_or(&[]);
        members.iter().filter_map(move |&id| self.get(id).map(|c| (id, c)))
    }

    /// Points record a polygon list refers to.
    pub fn points_of(&self, polygons: &PolygonList) -> Option<&Points> {
        polygons.points.and_then(|id| self.get(id)).and_then(Chunk::as_points)
    }

    /// Tag name list at `id`.
    pub fn tag_names(&self, id: ChunkId) -> Option<&TagNameList> {
        self.get(id).and_then(Chunk::as_tag_names)
    }

    /// LWO2 surface by name (first match).
    pub fn surface(&self, name: &str) -> Option<&Surface> {
        self.chunks.iter().filter_map(Chunk::as_surface).find(|s| s.name == name)
    }

    pub fn summary(&self) -> GraphSummary {
        let mut s = GraphSummary { chunks: self.chunks.len(), ..Default::default() };
        for chunk in &self.chunks {
            match &chunk.data {
                ChunkData::Layer(_) => s.layers += 1,
                ChunkData::Points(p) => s.points += p.len(),
                ChunkData::Polygons(p) => {
                    s.polygon_lists += 1;
                    s.polygons += p.len();
                    s.detail_polygons += p.details.len();
                }
                ChunkData::TagNames(t) => s.tag_names += t.names.len(),
                ChunkData::Surface(_) | ChunkData::LegacySurface(_) => s.surfaces += 1,
                ChunkData::Envelope(_) => s.envelopes += 1,
                ChunkData::Clip(_) => s.clips += 1,
                ChunkData::VertexMap(_) => s.vertex_maps += 1,
                ChunkData::PolyTags(_)
                | ChunkData::SurfaceNames(_)
                | ChunkData::BoundingBox(_)
                | ChunkData::Text(_) => {}
            }
        }
        s
    }
}
