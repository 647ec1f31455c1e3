//! Surface records for both the LWO2 and the pre-6.0 layouts.

use crate::iff::Tag;
use crate::util::Vec3;

/// A float paired with an envelope index (0 = not animated).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Enveloped<T> {
    pub value: T,
    pub envelope: u32,
}

impl<T> Enveloped<T> {
    pub fn new(value: T, envelope: u32) -> Self {
        Self { value, envelope }
    }
}

/// One decoded LWO2 surface sub-chunk.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceProperty {
    /// COLR
    Color(Enveloped<Vec3>),
    /// Float + envelope channels: DIFF, LUMI, SPEC, REFL, TRAN, TRNL, GLOS,
    /// SHRP, BUMP, RSAN, RBLR, TBLR, RIND, CLRH, CLRF, ADTR, GVAL.
    Scalar { channel: Tag, value: Enveloped<f32> },
    /// SIDE
    Sidedness(u16),
    /// SMAN, radians
    SmoothingAngle(f32),
    /// RFOP
    ReflectionOptions(u16),
    /// RIMG, clip index
    ReflectionImage(u32),
    /// TROP
    TransparencyOptions(u16),
    /// TIMG, clip index
    RefractionImage(u32),
    /// GLOW
    Glow { kind: u16, intensity: Enveloped<f32>, size: Enveloped<f32> },
    /// LINE; size and color are optional in the file
    Line { flags: u16, size: Option<Enveloped<f32>>, color: Option<Enveloped<Vec3>> },
    /// ALPH
    Alpha { mode: u16, value: f32 },
    /// VCOL
    VertexColor { intensity: Enveloped<f32>, map_type: Tag, name: String },
    /// CMNT
    Comment(String),
}

/// Block header kind (first sub-chunk of BLOK).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    ImageMap,
    Procedural,
    Gradient,
    Shader,
    Other(Tag),
}

impl BlockKind {
    pub fn from_tag(tag: Tag) -> Self {
        use crate::iff::ids;
        match tag {
            ids::IMAP => Self::ImageMap,
            ids::PROC => Self::Procedural,
            ids::GRAD => Self::Gradient,
            ids::SHDR => Self::Shader,
            other => Self::Other(other),
        }
    }
}

/// Opacity of a texture layer (OPAC).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Opacity {
    pub mode: u16,
    pub value: Enveloped<f32>,
}

/// Block header attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockHeader {
    pub kind: BlockKind,
    /// Sort key among the surface's blocks.
    pub ordinal: String,
    pub channel: Option<Tag>,
    pub enabled: Option<bool>,
    pub opacity: Option<Opacity>,
    pub axis: Option<u16>,
    pub negative: Option<bool>,
}

/// TMAP falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    pub kind: u16,
    pub vector: Enveloped<Vec3>,
}

/// Texture mapping (TMAP) of a block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextureMapping {
    pub center: Option<Enveloped<Vec3>>,
    pub size: Option<Enveloped<Vec3>>,
    pub rotation: Option<Enveloped<Vec3>>,
    pub reference_object: Option<String>,
    pub falloff: Option<Falloff>,
    pub coord_system: Option<u16>,
}

/// Gradient key (FKEY entry).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientKey {
    pub input: f32,
    pub output: [f32; 4],
}

/// Kind-specific attributes of a block.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockAttribute {
    Projection(u16),
    Axis(u16),
    /// IMAG, clip index
    Image(u32),
    Wrap { width: u16, height: u16 },
    WrapWidth(Enveloped<f32>),
    WrapHeight(Enveloped<f32>),
    /// VMAP, UV map name
    UvMap(String),
    AntiAlias { flags: u16, strength: f32 },
    PixelBlend(u16),
    Sticky { enabled: u16, time: f32 },
    Amplitude(Enveloped<f32>),
    /// VALU, one to four floats
    Value(Vec<f32>),
    /// FUNC, plug-in name and raw parameters
    Function { name: String, data: Vec<u8> },
    ParameterName(String),
    ItemName(String),
    GradientStart(f32),
    GradientEnd(f32),
    GradientRepeat(u16),
    GradientKeys(Vec<GradientKey>),
    /// IKEY interpolation codes
    GradientInterpolation(Vec<u16>),
}

/// Texture/shader layer of a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceBlock {
    pub header: BlockHeader,
    pub mapping: Option<TextureMapping>,
    pub attributes: Vec<BlockAttribute>,
}

/// LWO2 surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub name: String,
    /// Surface this one inherits from; not resolved here.
    pub parent: Option<String>,
    pub properties: Vec<SurfaceProperty>,
    pub blocks: Vec<SurfaceBlock>,
}

impl Surface {
    pub fn new(name: String, parent: Option<String>) -> Self {
        Self { name, parent, properties: Vec::new(), blocks: Vec::new() }
    }

    /// Base color, if stored.
    pub fn color(&self) -> Option<Enveloped<Vec3>> {
        self.properties.iter().find_map(|p| match p {
            SurfaceProperty::Color(c) => Some(*c),
            _ => None,
        })
    }

    /// Float channel such as DIFF or SPEC; missing channels read as zero in LightWave.
    pub fn scalar(&self, channel: Tag) -> Option<Enveloped<f32>> {
        self.properties.iter().find_map(|p| match p {
            SurfaceProperty::Scalar { channel: c, value } if *c == channel => Some(*value),
            _ => None,
        })
    }
}

/// Pre-6.0 surface sub-chunk outside any texture.
#[derive(Clone, Debug, PartialEq)]
pub enum LegacyProperty {
    /// COLR as bytes
    Color([u8; 3]),
    Flags(u16),
    /// LUMI, DIFF, SPEC, REFL, TRAN, GLOS as 0..256 integers
    Integer { channel: Tag, value: u16 },
    /// VLUM, VDIF, VSPC, VRFL, VTRN
    Percent { channel: Tag, value: f32 },
    ReflectionImage(String),
    RefractionImage(String),
    SeamAngle(f32),
    RefractiveIndex(f32),
    EdgeTransparency(f32),
    /// SMAN, degrees
    SmoothingAngle(f32),
}

/// A pre-6.0 texture, opened by one of the xTEX markers.
#[derive(Clone, Debug, PartialEq)]
pub struct LegacyTexture {
    /// CTEX, DTEX, STEX, RTEX, TTEX, LTEX or BTEX
    pub channel: Tag,
    pub texture_type: String,
    pub flags: Option<u16>,
    pub size: Option<Vec3>,
    pub center: Option<Vec3>,
    pub falloff: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub color: Option<[u8; 3]>,
    pub value: Option<u16>,
    pub amplitude: Option<f32>,
    pub frequencies: Option<u16>,
    /// TSP0-2 / TFP0-3 in file order
    pub params: Vec<(Tag, f32)>,
    pub image: Option<String>,
    pub alpha_image: Option<String>,
}

impl LegacyTexture {
    pub fn new(channel: Tag, texture_type: String) -> Self {
        Self {
            channel,
            texture_type,
            flags: None,
            size: None,
            center: None,
            falloff: None,
            velocity: None,
            color: None,
            value: None,
            amplitude: None,
            frequencies: None,
            params: Vec::new(),
            image: None,
            alpha_image: None,
        }
    }
}

/// Pre-6.0 surface.
#[derive(Clone, Debug, PartialEq)]
pub struct LegacySurface {
    pub name: String,
    pub properties: Vec<LegacyProperty>,
    pub textures: Vec<LegacyTexture>,
}

impl LegacySurface {
    pub fn new(name: String) -> Self {
        Self { name, properties: Vec::new(), textures: Vec::new() }
    }

    pub fn color(&self) -> Option<[u8; 3]> {
        self.properties.iter().find_map(|p| match p {
            LegacyProperty::Color(c) => Some(*c),
            _ => None,
        })
    }
}
