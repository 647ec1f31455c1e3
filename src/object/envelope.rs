//! Envelopes (keyframed curves) and image clips.

use crate::iff::Tag;

/// Interpolation of the span ending at a key (SPAN).
#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    /// TCB, HERM, BEZI, BEZ2, LINE or STEP
    pub kind: Tag,
    pub params: Vec<f32>,
}

/// Envelope keyframe.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvelopeKey {
    pub time: f32,
    pub value: f32,
    pub span: Option<Span>,
}

/// Plug-in channel modifier (CHAN).
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelModifier {
    pub server: String,
    pub flags: u16,
    pub data: Vec<u8>,
}

/// ENVL chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envelope {
    pub index: u32,
    /// TYPE: user format byte and channel type byte
    pub env_type: Option<(u8, u8)>,
    pub pre: Option<u16>,
    pub post: Option<u16>,
    pub keys: Vec<EnvelopeKey>,
    pub channels: Vec<ChannelModifier>,
    pub name: Option<String>,
}

impl Envelope {
    pub fn new(index: u32) -> Self {
        Self { index, ..Default::default() }
    }
}

/// Where a clip gets its pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipSource {
    /// STIL
    Still { path: String },
    /// ISEQ
    ImageSequence {
        digits: u8,
        flags: u8,
        offset: i16,
        start: i16,
        end: i16,
        prefix: String,
        suffix: String,
    },
    /// ANIM
    Animation { path: String, server: String, flags: u16, data: Vec<u8> },
    /// XREF, another clip by index
    Reference { index: u32, name: String },
    /// STCC
    ColorCycle { low: i16, high: i16, path: String },
}

/// Timing of an animated clip (TIME).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipTime {
    pub start: f32,
    pub duration: f32,
    pub frame_rate: f32,
}

/// CONT, BRIT, SATR, HUE or GAMM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipAdjustment {
    pub channel: Tag,
    pub value: f32,
    pub envelope: u32,
}

/// CLIP chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clip {
    pub index: u32,
    /// Tag of the source sub-chunk (STIL, ISEQ, ANIM, XREF, STCC).
    pub clip_type: Option<Tag>,
    pub source: Option<ClipSource>,
    pub time: Option<ClipTime>,
    pub adjustments: Vec<ClipAdjustment>,
    pub negative: bool,
}

impl Clip {
    pub fn new(index: u32) -> Self {
        Self { index, ..Default::default() }
    }

    pub fn adjustment(&self, channel: Tag) -> Option<&ClipAdjustment> {
        self.adjustments.iter().find(|a| a.channel == channel)
    }
}
