//! ENVL decoder.

use crate::iff::{ids, ChunkCursor};
use crate::object::{ChannelModifier, Chunk, ChunkData, Envelope, EnvelopeKey, ObjectGraph, Span};
use crate::util::Result;

/// ENVL: VX index, then TYPE/PRE/POST/KEY/SPAN/CHAN/NAME sub-chunks.
///
/// Keys keep file order. A SPAN describes the interval ending at the key
/// that precedes it.
pub(crate) fn decode_envelope(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let mut env = Envelope::new(cursor.read_var_index()?);

    while !cursor.is_empty() {
        let (tag, mut sub) = cursor.read_sub_chunk()?;
        match tag {
            ids::TYPE => env.env_type = Some((sub.read_u8()?, sub.read_u8()?)),
            ids::PRE => env.pre = Some(sub.read_u16()?),
            ids::POST => env.post = Some(sub.read_u16()?),
            ids::KEY => {
                let time = sub.read_f32()?;
                let value = sub.read_f32()?;
                env.keys.push(EnvelopeKey { time, value, span: None });
            }
            ids::SPAN => {
                let kind = sub.read_tag()?;
                let params = sub.read_f32_vec(sub.remaining() / 4)?;
                match env.keys.last_mut() {
                    Some(key) => key.span = Some(Span { kind, params }),
                    None => tracing::warn!(index = env.index, %kind, "SPAN before any KEY, skipped"),
                }
            }
            ids::CHAN => {
                let server = sub.read_padded_string()?;
                let flags = sub.read_u16()?;
                env.channels.push(ChannelModifier { server, flags, data: sub.read_rest().to_vec() });
            }
            ids::NAME => env.name = Some(sub.read_padded_string()?),
            _ => tracing::trace!(%tag, "skipping envelope sub-chunk"),
        }
    }

    tracing::trace!(index = env.index, keys = env.keys.len(), "envelope");
    graph.append(Chunk::global(ids::ENVL, ChunkData::Envelope(env)));
    Ok(())
}
