//! Builders for synthetic LWO files.

#![allow(dead_code)]

/// Big-endian payload builder.
#[derive(Default, Clone)]
pub struct Payload(pub Vec<u8>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, t: &[u8; 4]) -> Self {
        self.0.extend_from_slice(t);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i16(mut self, v: i16) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn f32(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn vec3(self, x: f32, y: f32, z: f32) -> Self {
        self.f32(x).f32(y).f32(z)
    }

    /// Variable-length index: two bytes below 0xFF00, four otherwise.
    pub fn vx(self, v: u32) -> Self {
        if v < 0xFF00 {
            self.u16(v as u16)
        } else {
            self.u32(v | 0xFF00_0000)
        }
    }

    /// NUL-terminated string padded to even length.
    pub fn s0(mut self, s: &str) -> Self {
        self.0.extend_from_slice(s.as_bytes());
        self.0.push(0);
        if self.0.len() % 2 != 0 {
            self.0.push(0);
        }
        self
    }

    pub fn raw(mut self, b: &[u8]) -> Self {
        self.0.extend_from_slice(b);
        self
    }

    /// Sub-chunk: tag, u16 size, body.
    pub fn sub(self, t: &[u8; 4], body: Payload) -> Self {
        self.tag(t).u16(body.0.len() as u16).raw(&body.0)
    }
}

/// Whole-file builder: FORM header plus top-level chunks.
pub struct LwoFile {
    file_type: [u8; 4],
    chunks: Vec<u8>,
}

impl LwoFile {
    pub fn new(file_type: &[u8; 4]) -> Self {
        Self { file_type: *file_type, chunks: Vec::new() }
    }

    pub fn lwo2() -> Self {
        Self::new(b"LWO2")
    }

    pub fn chunk(mut self, tag: &[u8; 4], body: Payload) -> Self {
        self.chunks.extend_from_slice(tag);
        self.chunks.extend_from_slice(&(body.0.len() as u32).to_be_bytes());
        self.chunks.extend_from_slice(&body.0);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.chunks.len());
        out.extend_from_slice(b"FORM");
        out.extend_from_slice(&((self.chunks.len() + 4) as u32).to_be_bytes());
        out.extend_from_slice(&self.file_type);
        out.extend_from_slice(&self.chunks);
        out
    }
}

/// A one-triangle LWO2 object with a named layer, a surface tag and a UV map.
pub fn triangle_lwo2() -> Vec<u8> {
    LwoFile::lwo2()
        .chunk(b"TAGS", Payload::new().s0("Default"))
        .chunk(b"LAYR", Payload::new().u16(0).u16(0).vec3(0.0, 0.0, 0.0).s0("Body"))
        .chunk(b"PNTS", Payload::new().vec3(0.0, 0.0, 0.0).vec3(1.0, 0.0, 0.0).vec3(0.0, 1.0, 0.0))
        .chunk(b"BBOX", Payload::new().vec3(0.0, 0.0, 0.0).vec3(1.0, 1.0, 0.0))
        .chunk(b"VMAP", Payload::new().tag(b"TXUV").u16(2).s0("UVMap").vx(0).f32(0.0).f32(0.0).vx(2).f32(0.0).f32(1.0))
        .chunk(b"POLS", Payload::new().tag(b"FACE").u16(3).vx(0).vx(1).vx(2))
        .chunk(b"PTAG", Payload::new().tag(b"SURF").vx(0).u16(0))
        .chunk(
            b"SURF",
            Payload::new()
                .s0("Default")
                .s0("")
                .sub(b"COLR", Payload::new().vec3(0.8, 0.2, 0.2).vx(0))
                .sub(b"DIFF", Payload::new().f32(1.0).vx(0)),
        )
        .build()
}
