//! IFF container constants, four-character tags and LightWave chunk IDs.

use std::fmt;

use super::codec::make_tag;

/// Size of the FORM header: tag, size, file type.
pub const HEADER_SIZE: usize = 12;

/// Size of a top-level chunk header: tag + u32 size.
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Size of a sub-chunk header: tag + u16 size.
pub const SUB_CHUNK_HEADER_SIZE: usize = 6;

/// Number of bytes the FORM size field does not cover (tag + size).
pub const FORM_SIZE_ADJUST: u64 = 8;

/// A four-character chunk identifier packed big-endian into a `u32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tag(pub u32);

impl Tag {
    /// Pack four ASCII characters into a tag.
    #[inline]
    pub const fn new(chars: &[u8; 4]) -> Self {
        Self(make_tag(*chars))
    }

    /// Raw packed value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The four bytes of the tag in file order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            let c = if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

impl From<[u8; 4]> for Tag {
    fn from(chars: [u8; 4]) -> Self {
        Self(make_tag(chars))
    }
}

/// Chunk and sub-chunk identifiers.
pub mod ids {
    use super::Tag;

    // Container
    pub const FORM: Tag = Tag::new(b"FORM");
    pub const LWO2: Tag = Tag::new(b"LWO2");
    pub const LWOB: Tag = Tag::new(b"LWOB");
    pub const LWLO: Tag = Tag::new(b"LWLO");

    // Top-level chunks
    pub const LAYR: Tag = Tag::new(b"LAYR");
    pub const PNTS: Tag = Tag::new(b"PNTS");
    pub const VMAP: Tag = Tag::new(b"VMAP");
    pub const VMAD: Tag = Tag::new(b"VMAD");
    pub const POLS: Tag = Tag::new(b"POLS");
    pub const TAGS: Tag = Tag::new(b"TAGS");
    pub const PTAG: Tag = Tag::new(b"PTAG");
    pub const ENVL: Tag = Tag::new(b"ENVL");
    pub const CLIP: Tag = Tag::new(b"CLIP");
    pub const SURF: Tag = Tag::new(b"SURF");
    pub const BBOX: Tag = Tag::new(b"BBOX");
    pub const DESC: Tag = Tag::new(b"DESC");
    pub const TEXT: Tag = Tag::new(b"TEXT");
    pub const ICON: Tag = Tag::new(b"ICON");
    pub const SRFS: Tag = Tag::new(b"SRFS");
    pub const CRVS: Tag = Tag::new(b"CRVS");

    // Polygon types
    pub const FACE: Tag = Tag::new(b"FACE");
    pub const CURV: Tag = Tag::new(b"CURV");
    pub const PTCH: Tag = Tag::new(b"PTCH");
    pub const MBAL: Tag = Tag::new(b"MBAL");
    pub const BONE: Tag = Tag::new(b"BONE");

    // Polygon tag types
    pub const PART: Tag = Tag::new(b"PART");
    pub const SMGP: Tag = Tag::new(b"SMGP");

    // Clip sub-chunks
    pub const STIL: Tag = Tag::new(b"STIL");
    pub const ISEQ: Tag = Tag::new(b"ISEQ");
    pub const ANIM: Tag = Tag::new(b"ANIM");
    pub const XREF: Tag = Tag::new(b"XREF");
    pub const STCC: Tag = Tag::new(b"STCC");
    pub const TIME: Tag = Tag::new(b"TIME");
    pub const CONT: Tag = Tag::new(b"CONT");
    pub const BRIT: Tag = Tag::new(b"BRIT");
    pub const SATR: Tag = Tag::new(b"SATR");
    pub const HUE: Tag = Tag::new(b"HUE ");
    pub const GAMM: Tag = Tag::new(b"GAMM");
    pub const NEGA: Tag = Tag::new(b"NEGA");
    pub const IFLT: Tag = Tag::new(b"IFLT");
    pub const PFLT: Tag = Tag::new(b"PFLT");

    // Envelope sub-chunks
    pub const PRE: Tag = Tag::new(b"PRE ");
    pub const POST: Tag = Tag::new(b"POST");
    pub const KEY: Tag = Tag::new(b"KEY ");
    pub const SPAN: Tag = Tag::new(b"SPAN");
    pub const CHAN: Tag = Tag::new(b"CHAN");
    pub const NAME: Tag = Tag::new(b"NAME");
    pub const TYPE: Tag = Tag::new(b"TYPE");

    // Surface sub-chunks
    pub const COLR: Tag = Tag::new(b"COLR");
    pub const DIFF: Tag = Tag::new(b"DIFF");
    pub const LUMI: Tag = Tag::new(b"LUMI");
    pub const SPEC: Tag = Tag::new(b"SPEC");
    pub const REFL: Tag = Tag::new(b"REFL");
    pub const TRAN: Tag = Tag::new(b"TRAN");
    pub const TRNL: Tag = Tag::new(b"TRNL");
    pub const GLOS: Tag = Tag::new(b"GLOS");
    pub const SHRP: Tag = Tag::new(b"SHRP");
    pub const BUMP: Tag = Tag::new(b"BUMP");
    pub const SIDE: Tag = Tag::new(b"SIDE");
    pub const SMAN: Tag = Tag::new(b"SMAN");
    pub const RFOP: Tag = Tag::new(b"RFOP");
    pub const RIMG: Tag = Tag::new(b"RIMG");
    pub const RSAN: Tag = Tag::new(b"RSAN");
    pub const RBLR: Tag = Tag::new(b"RBLR");
    pub const RIND: Tag = Tag::new(b"RIND");
    pub const TROP: Tag = Tag::new(b"TROP");
    pub const TIMG: Tag = Tag::new(b"TIMG");
    pub const TBLR: Tag = Tag::new(b"TBLR");
    pub const CLRH: Tag = Tag::new(b"CLRH");
    pub const CLRF: Tag = Tag::new(b"CLRF");
    pub const ADTR: Tag = Tag::new(b"ADTR");
    pub const GLOW: Tag = Tag::new(b"GLOW");
    pub const GVAL: Tag = Tag::new(b"GVAL");
    pub const LINE: Tag = Tag::new(b"LINE");
    pub const ALPH: Tag = Tag::new(b"ALPH");
    pub const VCOL: Tag = Tag::new(b"VCOL");
    pub const CMNT: Tag = Tag::new(b"CMNT");
    pub const BLOK: Tag = Tag::new(b"BLOK");

    // Legacy (LWOB) surface sub-chunks
    pub const FLAG: Tag = Tag::new(b"FLAG");
    pub const VLUM: Tag = Tag::new(b"VLUM");
    pub const VDIF: Tag = Tag::new(b"VDIF");
    pub const VSPC: Tag = Tag::new(b"VSPC");
    pub const VRFL: Tag = Tag::new(b"VRFL");
    pub const VTRN: Tag = Tag::new(b"VTRN");
    pub const EDGE: Tag = Tag::new(b"EDGE");
    pub const CTEX: Tag = Tag::new(b"CTEX");
    pub const DTEX: Tag = Tag::new(b"DTEX");
    pub const STEX: Tag = Tag::new(b"STEX");
    pub const RTEX: Tag = Tag::new(b"RTEX");
    pub const TTEX: Tag = Tag::new(b"TTEX");
    pub const LTEX: Tag = Tag::new(b"LTEX");
    pub const BTEX: Tag = Tag::new(b"BTEX");
    pub const TFLG: Tag = Tag::new(b"TFLG");
    pub const TSIZ: Tag = Tag::new(b"TSIZ");
    pub const TCTR: Tag = Tag::new(b"TCTR");
    pub const TFAL: Tag = Tag::new(b"TFAL");
    pub const TVEL: Tag = Tag::new(b"TVEL");
    pub const TCLR: Tag = Tag::new(b"TCLR");
    pub const TVAL: Tag = Tag::new(b"TVAL");
    pub const TAMP: Tag = Tag::new(b"TAMP");
    pub const TFRQ: Tag = Tag::new(b"TFRQ");
    pub const TALP: Tag = Tag::new(b"TALP");
    pub const TSP0: Tag = Tag::new(b"TSP0");
    pub const TSP1: Tag = Tag::new(b"TSP1");
    pub const TSP2: Tag = Tag::new(b"TSP2");
    pub const TFP0: Tag = Tag::new(b"TFP0");
    pub const TFP1: Tag = Tag::new(b"TFP1");
    pub const TFP2: Tag = Tag::new(b"TFP2");
    pub const TFP3: Tag = Tag::new(b"TFP3");

    // Texture block header
    pub const ENAB: Tag = Tag::new(b"ENAB");
    pub const OPAC: Tag = Tag::new(b"OPAC");
    pub const AXIS: Tag = Tag::new(b"AXIS");

    // Texture mapping
    pub const TMAP: Tag = Tag::new(b"TMAP");
    pub const CNTR: Tag = Tag::new(b"CNTR");
    pub const SIZE: Tag = Tag::new(b"SIZE");
    pub const ROTA: Tag = Tag::new(b"ROTA");
    pub const OREF: Tag = Tag::new(b"OREF");
    pub const FALL: Tag = Tag::new(b"FALL");
    pub const CSYS: Tag = Tag::new(b"CSYS");

    // Image map
    pub const IMAP: Tag = Tag::new(b"IMAP");
    pub const PROJ: Tag = Tag::new(b"PROJ");
    pub const IMAG: Tag = Tag::new(b"IMAG");
    pub const WRAP: Tag = Tag::new(b"WRAP");
    pub const WRPW: Tag = Tag::new(b"WRPW");
    pub const WRPH: Tag = Tag::new(b"WRPH");
    pub const AAST: Tag = Tag::new(b"AAST");
    pub const PIXB: Tag = Tag::new(b"PIXB");
    pub const STCK: Tag = Tag::new(b"STCK");

    // Procedural texture
    pub const PROC: Tag = Tag::new(b"PROC");
    pub const VALU: Tag = Tag::new(b"VALU");
    pub const FUNC: Tag = Tag::new(b"FUNC");

    // Gradient
    pub const GRAD: Tag = Tag::new(b"GRAD");
    pub const PNAM: Tag = Tag::new(b"PNAM");
    pub const INAM: Tag = Tag::new(b"INAM");
    pub const GRST: Tag = Tag::new(b"GRST");
    pub const GREN: Tag = Tag::new(b"GREN");
    pub const GRPT: Tag = Tag::new(b"GRPT");
    pub const FKEY: Tag = Tag::new(b"FKEY");
    pub const IKEY: Tag = Tag::new(b"IKEY");

    // Shader plugin
    pub const SHDR: Tag = Tag::new(b"SHDR");
}

/// The three LightWave object variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileType {
    /// LightWave 6.0 and later: layers, envelopes, clips, vertex maps.
    Lwo2,
    /// Pre-6.0 object without layers.
    Lwob,
    /// Pre-6.0 layered object (Modeler only).
    Lwlo,
}

impl FileType {
    /// Map a FORM type tag to a variant.
    pub fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            ids::LWO2 => Some(Self::Lwo2),
            ids::LWOB => Some(Self::Lwob),
            ids::LWLO => Some(Self::Lwlo),
            _ => None,
        }
    }

    /// The FORM type tag of this variant.
    pub const fn tag(self) -> Tag {
        match self {
            Self::Lwo2 => ids::LWO2,
            Self::Lwob => ids::LWOB,
            Self::Lwlo => ids::LWLO,
        }
    }

    /// True for the two pre-6.0 variants.
    #[inline]
    pub const fn is_legacy(self) -> bool {
        !matches!(self, Self::Lwo2)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
