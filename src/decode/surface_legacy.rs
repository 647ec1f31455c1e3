//! Pre-6.0 (LWOB/LWLO) surface list and surface decoders.

use crate::iff::{ids, ChunkCursor, Tag};
use crate::object::{Chunk, ChunkData, LegacyProperty, LegacySurface, LegacyTexture, ObjectGraph, SurfaceNameList};
use crate::util::Result;

/// SRFS: surface names, referenced 1-based by legacy polygon rows.
pub(crate) fn decode_surface_names(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let mut names = Vec::new();
    while !cursor.is_empty() {
        names.push(cursor.read_padded_string()?);
    }
    tracing::trace!(count = names.len(), "surface names");
    graph.append(Chunk::global(ids::SRFS, ChunkData::SurfaceNames(SurfaceNameList { names })));
    Ok(())
}

fn read_color(c: &mut ChunkCursor<'_>) -> Result<[u8; 3]> {
    let rgb = c.read_bytes(3)?;
    // fourth byte is unused
    Ok([rgb[0], rgb[1], rgb[2]])
}

/// SURF (legacy): name, then a flat run of sub-chunks.
///
/// CTEX/DTEX/STEX/RTEX/TTEX/LTEX/BTEX open a texture; the T* attributes that
/// follow apply to the most recently opened one.
pub(crate) fn decode_legacy_surface(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let layer = graph.ensure_layer();
    let mut surface = LegacySurface::new(cursor.read_padded_string()?);

    while !cursor.is_empty() {
        let (tag, mut sub) = cursor.read_sub_chunk()?;
        let c = &mut sub;
        let prop = match tag {
            ids::COLR => Some(LegacyProperty::Color(read_color(c)?)),
            ids::FLAG => Some(LegacyProperty::Flags(c.read_u16()?)),
            ids::LUMI | ids::DIFF | ids::SPEC | ids::REFL | ids::TRAN | ids::GLOS => {
                Some(LegacyProperty::Integer { channel: tag, value: c.read_u16()? })
            }
            ids::VLUM | ids::VDIF | ids::VSPC | ids::VRFL | ids::VTRN => {
                Some(LegacyProperty::Percent { channel: tag, value: c.read_f32()? })
            }
            ids::RIMG => Some(LegacyProperty::ReflectionImage(c.read_padded_string()?)),
            ids::TIMG => match surface.textures.last_mut() {
                Some(tex) => {
                    tex.image = Some(c.read_padded_string()?);
                    None
                }
                None => Some(LegacyProperty::RefractionImage(c.read_padded_string()?)),
            },
            ids::RSAN => Some(LegacyProperty::SeamAngle(c.read_f32()?)),
            ids::RIND => Some(LegacyProperty::RefractiveIndex(c.read_f32()?)),
            ids::EDGE => Some(LegacyProperty::EdgeTransparency(c.read_f32()?)),
            ids::SMAN => Some(LegacyProperty::SmoothingAngle(c.read_f32()?)),
            ids::CTEX | ids::DTEX | ids::STEX | ids::RTEX | ids::TTEX | ids::LTEX | ids::BTEX => {
                surface.textures.push(LegacyTexture::new(tag, c.read_padded_string()?));
                None
            }
            _ => {
                match surface.textures.last_mut() {
                    Some(tex) => {
                        if !read_texture_attribute(tex, tag, c)? {
                            tracing::trace!(%tag, "skipping legacy surface sub-chunk");
                        }
                    }
                    None if is_texture_attribute(tag) => {
                        tracing::warn!(%tag, surface = %surface.name, "texture attribute outside a texture, skipped");
                    }
                    None => tracing::trace!(%tag, "skipping legacy surface sub-chunk"),
                }
                None
            }
        };
        if let Some(prop) = prop {
            surface.properties.push(prop);
        }
    }

    tracing::trace!(
        name = %surface.name,
        properties = surface.properties.len(),
        textures = surface.textures.len(),
        "legacy surface"
    );
    graph.append_to_layer(layer, ids::SURF, ChunkData::LegacySurface(surface))?;
    Ok(())
}

fn is_texture_attribute(tag: Tag) -> bool {
    matches!(
        tag,
        ids::TFLG
            | ids::TSIZ
            | ids::TCTR
            | ids::TFAL
            | ids::TVEL
            | ids::TCLR
            | ids::TVAL
            | ids::TAMP
            | ids::TFRQ
            | ids::TALP
            | ids::TSP0
            | ids::TSP1
            | ids::TSP2
            | ids::TFP0
            | ids::TFP1
            | ids::TFP2
            | ids::TFP3
    )
}

/// Apply one T* sub-chunk; false if `tag` is not a texture attribute.
fn read_texture_attribute(tex: &mut LegacyTexture, tag: Tag, c: &mut ChunkCursor<'_>) -> Result<bool> {
    match tag {
        ids::TFLG => tex.flags = Some(c.read_u16()?),
        ids::TSIZ => tex.size = Some(c.read_vec3()?),
        ids::TCTR => tex.center = Some(c.read_vec3()?),
        ids::TFAL => tex.falloff = Some(c.read_vec3()?),
        ids::TVEL => tex.velocity = Some(c.read_vec3()?),
        ids::TCLR => tex.color = Some(read_color(c)?),
        ids::TVAL => tex.value = Some(c.read_u16()?),
        ids::TAMP => tex.amplitude = Some(c.read_f32()?),
        ids::TFRQ => tex.frequencies = Some(c.read_u16()?),
        ids::TALP => tex.alpha_image = Some(c.read_padded_string()?),
        ids::TSP0 | ids::TSP1 | ids::TSP2 | ids::TFP0 | ids::TFP1 | ids::TFP2 | ids::TFP3 => {
            tex.params.push((tag, c.read_f32()?))
        }
        _ => return Ok(false),
    }
    Ok(true)
}
