//! Vertex maps (VMAP) and discontinuous vertex maps (VMAD).

use smallvec::SmallVec;

use super::ChunkId;
use crate::iff::Tag;

/// Values for one vertex (or one vertex of one polygon).
#[derive(Clone, Debug, PartialEq)]
pub struct VertexMapEntry {
    pub vertex: u32,
    /// Set only for discontinuous maps.
    pub polygon: Option<u32>,
    pub values: SmallVec<[f32; 4]>,
}

/// Per-vertex auxiliary data such as UVs, weights or morphs.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexMap {
    /// TXUV, WGHT, MORF, RGB, ...
    pub map_type: Tag,
    pub dimension: u16,
    pub name: String,
    pub discontinuous: bool,
    /// Points record that was current when decoded.
    pub points: Option<ChunkId>,
    pub entries: Vec<VertexMapEntry>,
}

impl VertexMap {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry for a vertex, ignoring polygon assignment.
    pub fn get(&self, vertex: u32) -> Option<&[f32]> {
        self.entries.iter().find(|e| e.vertex == vertex).map(|e| e.values.as_slice())
    }

    /// Entry for a vertex as used by a specific polygon (VMAD).
    pub fn get_for_polygon(&self, vertex: u32, polygon: u32) -> Option<&[f32]> {
        self.entries
            .iter()
            .find(|e| e.vertex == vertex && e.polygon == Some(polygon))
            .map(|e| e.values.as_slice())
    }
}
