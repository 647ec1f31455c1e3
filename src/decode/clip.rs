//! CLIP decoder.

use crate::iff::{ids, ChunkCursor, Tag};
use crate::object::{Chunk, ChunkData, Clip, ClipAdjustment, ClipSource, ClipTime, ObjectGraph};
use crate::util::Result;

/// CLIP: u32 index, then one source sub-chunk and any number of
/// time/adjustment sub-chunks.
///
/// The clip type is the tag of the first source sub-chunk; later ones are
/// ignored.
pub(crate) fn decode_clip(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let mut clip = Clip::new(cursor.read_u32()?);

    while !cursor.is_empty() {
        let (tag, mut sub) = cursor.read_sub_chunk()?;
        match tag {
            ids::STIL | ids::ISEQ | ids::ANIM | ids::XREF | ids::STCC => {
                if let Some(first) = clip.clip_type {
                    tracing::warn!(index = clip.index, %first, %tag, "clip has more than one source, keeping the first");
                    continue;
                }
                clip.source = Some(read_source(tag, &mut sub)?);
                clip.clip_type = Some(tag);
            }
            ids::TIME => {
                clip.time = Some(ClipTime {
                    start: sub.read_f32()?,
                    duration: sub.read_f32()?,
                    frame_rate: sub.read_f32()?,
                })
            }
            ids::CONT | ids::BRIT | ids::SATR | ids::HUE | ids::GAMM => {
                let value = sub.read_f32()?;
                let envelope = sub.read_var_index()?;
                clip.adjustments.push(ClipAdjustment { channel: tag, value, envelope });
            }
            ids::NEGA => clip.negative = sub.read_u16()? != 0,
            _ => tracing::trace!(%tag, "skipping clip sub-chunk"),
        }
    }

    tracing::trace!(index = clip.index, clip_type = ?clip.clip_type, "clip");
    graph.append(Chunk::global(ids::CLIP, ChunkData::Clip(clip)));
    Ok(())
}

fn read_source(tag: Tag, c: &mut ChunkCursor<'_>) -> Result<ClipSource> {
    let source = match tag {
        ids::STIL => ClipSource::Still { path: c.read_padded_string()? },
        ids::ISEQ => {
            let digits = c.read_u8()?;
            let flags = c.read_u8()?;
            let offset = c.read_i16()?;
            c.skip(2)?; // reserved
            ClipSource::ImageSequence {
                digits,
                flags,
                offset,
                start: c.read_i16()?,
                end: c.read_i16()?,
                prefix: c.read_padded_string()?,
                suffix: c.read_padded_string()?,
            }
        }
        ids::ANIM => ClipSource::Animation {
            path: c.read_padded_string()?,
            server: c.read_padded_string()?,
            flags: c.read_u16()?,
            data: c.read_rest().to_vec(),
        },
        ids::XREF => ClipSource::Reference { index: c.read_u32()?, name: c.read_padded_string()? },
        _ => ClipSource::ColorCycle { low: c.read_i16()?, high: c.read_i16()?, path: c.read_padded_string()? },
    };
    Ok(source)
}
