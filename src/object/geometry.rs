//! Geometry records: layers, points, polygon lists, tags and bounding boxes.

use smallvec::SmallVec;

use super::ChunkId;
use crate::iff::{ids, Tag};
use crate::util::{BBox3f, Vec3};

/// A named group of geometry.
///
/// `index` is assigned by the graph; `number` is whatever the file stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub index: u32,
    pub number: u16,
    pub flags: u16,
    pub pivot: Vec3,
    pub name: String,
    pub parent: Option<u16>,
    /// True when the layer was created because geometry came before any LAYR.
    pub implicit: bool,
    /// Records attached to this layer, in decode order.
    pub members: Vec<ChunkId>,
}

impl Layer {
    /// Layer synthesized for geometry that precedes any layer chunk.
    pub fn implicit(index: u32) -> Self {
        Self {
            index,
            number: 0,
            flags: 0,
            pivot: Vec3::ZERO,
            name: String::new(),
            parent: None,
            implicit: true,
            members: Vec::new(),
        }
    }

    /// Bit 0 of the flags: hidden (LWO2) or active (LWLO).
    #[inline]
    pub fn flag_bit0(&self) -> bool {
        self.flags & 1 != 0
    }
}

/// Vertex coordinates as a flat float array (x, y, z triples).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Points {
    pub values: Vec<f32>,
}

impl Points {
    /// Number of complete vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertices as glam vectors; a trailing partial triple is ignored.
    pub fn positions(&self) -> &[Vec3] {
        bytemuck::cast_slice(&self.values[..self.len() * 3])
    }

    /// Vertex `i`, if present.
    pub fn get(&self, i: usize) -> Option<Vec3> {
        self.positions().get(i).copied()
    }

    /// Bounds of all vertices.
    pub fn bounds(&self) -> BBox3f {
        BBox3f::from_points(self.positions())
    }
}

/// Polygon list sub-type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolygonType {
    Face,
    Curve,
    Patch,
    Metaball,
    Bone,
}

impl PolygonType {
    pub fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            ids::FACE => Some(Self::Face),
            ids::CURV => Some(Self::Curve),
            ids::PTCH => Some(Self::Patch),
            ids::MBAL => Some(Self::Metaball),
            ids::BONE => Some(Self::Bone),
            _ => None,
        }
    }

    pub const fn tag(self) -> Tag {
        match self {
            Self::Face => ids::FACE,
            Self::Curve => ids::CURV,
            Self::Patch => ids::PTCH,
            Self::Metaball => ids::MBAL,
            Self::Bone => ids::BONE,
        }
    }
}

/// One polygon: vertex indices into the referenced points record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonRow {
    pub indices: SmallVec<[u32; 4]>,
    /// High 6 bits of the count field; for curves only the two continuity bits.
    pub flags: u16,
    /// Surface index (1-based in legacy files, 0 when the format has none).
    pub surface: u16,
    /// Curve-only bits 2..6 of the flag field, kept apart from the vertex count.
    pub extra_count_bits: u16,
}

impl PolygonRow {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }
}

/// Detail polygon attached to a legacy polygon row.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailPolygon {
    /// Row in [`PolygonList::rows`] that owns this detail.
    pub parent_row: usize,
    pub row: PolygonRow,
}

/// Polygons of one sub-type.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonList {
    pub poly_type: PolygonType,
    /// Points record that was current when the list was decoded.
    pub points: Option<ChunkId>,
    pub rows: Vec<PolygonRow>,
    /// Legacy detail polygons, never merged into `rows`.
    pub details: Vec<DetailPolygon>,
}

impl PolygonList {
    pub fn new(poly_type: PolygonType, points: Option<ChunkId>) -> Self {
        Self { poly_type, points, rows: Vec::new(), details: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of vertex references over all rows.
    pub fn index_count(&self) -> usize {
        self.rows.iter().map(PolygonRow::vertex_count).sum()
    }
}

/// Tag names, indexed from 0 in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagNameList {
    pub names: Vec<String>,
}

impl TagNameList {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Legacy surface name list. Files refer to it 1-based.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceNameList {
    pub names: Vec<String>,
}

impl SurfaceNameList {
    /// Resolve a 1-based legacy surface index.
    pub fn by_file_index(&self, index: u16) -> Option<&str> {
        let i = (index as usize).checked_sub(1)?;
        self.names.get(i).map(String::as_str)
    }
}

/// What a poly-tag mapping associates polygons with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolyTagType {
    Surface,
    Part,
    SmoothingGroup,
    Other(Tag),
}

impl PolyTagType {
    pub fn from_tag(tag: Tag) -> Self {
        match tag {
            ids::SURF => Self::Surface,
            ids::PART => Self::Part,
            ids::SMGP => Self::SmoothingGroup,
            other => Self::Other(other),
        }
    }

    pub fn tag(self) -> Tag {
        match self {
            Self::Surface => ids::SURF,
            Self::Part => ids::PART,
            Self::SmoothingGroup => ids::SMGP,
            Self::Other(tag) => tag,
        }
    }
}

/// One (polygon, tag) association.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolyTag {
    pub polygon: u32,
    pub tag: u16,
}

/// Polygon to tag-name associations (PTAG).
#[derive(Clone, Debug, PartialEq)]
pub struct PolyTagMapping {
    pub tag_type: PolyTagType,
    /// Polygon list that was current when decoded.
    pub polygons: Option<ChunkId>,
    /// Tag name list that was current when decoded.
    pub tag_names: Option<ChunkId>,
    pub pairs: Vec<PolyTag>,
}

/// Raw layer extents as stored (normally six floats).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub extents: Vec<f32>,
}

impl BoundingBox {
    pub fn bbox(&self) -> Option<BBox3f> {
        BBox3f::from_extents(&self.extents)
    }
}

/// DESC or TEXT chunk contents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextChunk {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_positions() {
        let pts = Points { values: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 9.0] };
        assert_eq!(pts.len(), 2);
        assert_eq!(pts.positions(), &[Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0)]);
        assert_eq!(pts.get(1), Some(Vec3::new(3.0, 4.0, 5.0)));
        assert_eq!(pts.get(2), None);
        assert_eq!(pts.bounds().max, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_polygon_type_tags() {
        for t in [PolygonType::Face, PolygonType::Curve, PolygonType::Patch, PolygonType::Metaball, PolygonType::Bone] {
            assert_eq!(PolygonType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(PolygonType::from_tag(ids::SURF), None);
    }

    #[test]
    fn test_poly_tag_type() {
        assert_eq!(PolyTagType::from_tag(ids::SMGP), PolyTagType::SmoothingGroup);
        let custom = Tag::new(b"COLR");
        assert_eq!(PolyTagType::from_tag(custom), PolyTagType::Other(custom));
        assert_eq!(PolyTagType::Other(custom).tag(), custom);
    }

    #[test]
    fn test_surface_name_list_is_one_based() {
        let list = SurfaceNameList { names: vec!["Body".into(), "Glass".into()] };
        assert_eq!(list.by_file_index(1), Some("Body"));
        assert_eq!(list.by_file_index(2), Some("Glass"));
        assert_eq!(list.by_file_index(0), None);
        assert_eq!(list.by_file_index(3), None);
    }

    #[test]
    fn test_polygon_counts() {
        let mut list = PolygonList::new(PolygonType::Face, None);
        list.rows.push(PolygonRow { indices: SmallVec::from_slice(&[0, 1, 2]), ..Default::default() });
        list.rows.push(PolygonRow { indices: SmallVec::from_slice(&[0, 2, 3, 4]), ..Default::default() });
        assert_eq!(list.len(), 2);
        assert_eq!(list.index_count(), 7);
    }
}
