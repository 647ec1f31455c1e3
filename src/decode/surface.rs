//! LWO2 SURF decoder, including nested texture blocks.

use crate::iff::{ids, ChunkCursor, Tag};
use crate::object::{
    BlockAttribute, BlockHeader, BlockKind, Chunk, ChunkData, Enveloped, Falloff, GradientKey, ObjectGraph,
    Opacity, Surface, SurfaceBlock, SurfaceProperty, TextureMapping,
};
use crate::util::{Result, Vec3};

/// Float + VX envelope pair used throughout surfaces.
fn read_enveloped_f32(c: &mut ChunkCursor<'_>) -> Result<Enveloped<f32>> {
    Ok(Enveloped::new(c.read_f32()?, c.read_var_index()?))
}

fn read_enveloped_vec3(c: &mut ChunkCursor<'_>) -> Result<Enveloped<Vec3>> {
    Ok(Enveloped::new(c.read_vec3()?, c.read_var_index()?))
}

/// SURF: name, parent name, then property sub-chunks.
///
/// Attached to the current layer when one exists, global otherwise.
pub(crate) fn decode_surface(graph: &mut ObjectGraph, cursor: &mut ChunkCursor<'_>) -> Result<()> {
    let name = cursor.read_padded_string()?;
    let parent = cursor.read_padded_string()?;
    let mut surface = Surface::new(name, (!parent.is_empty()).then_some(parent));

    while !cursor.is_empty() {
        let (tag, mut sub) = cursor.read_sub_chunk()?;
        if tag == ids::BLOK {
            surface.blocks.push(decode_block(&mut sub)?);
            continue;
        }
        match read_property(tag, &mut sub)? {
            Some(prop) => surface.properties.push(prop),
            None => tracing::trace!(%tag, size = sub.len(), "skipping surface sub-chunk"),
        }
    }

    tracing::trace!(
        name = %surface.name,
        properties = surface.properties.len(),
        blocks = surface.blocks.len(),
        "surface"
    );
    let data = ChunkData::Surface(surface);
    match graph.context().layer {
        Some(layer) => {
            graph.append_to_layer(layer, ids::SURF, data)?;
        }
        None => {
            graph.append(Chunk::global(ids::SURF, data));
        }
    }
    Ok(())
}

fn read_property(tag: Tag, c: &mut ChunkCursor<'_>) -> Result<Option<SurfaceProperty>> {
    let prop = match tag {
        ids::COLR => SurfaceProperty::Color(read_enveloped_vec3(c)?),
        ids::DIFF
        | ids::LUMI
        | ids::SPEC
        | ids::REFL
        | ids::TRAN
        | ids::TRNL
        | ids::GLOS
        | ids::SHRP
        | ids::BUMP
        | ids::RSAN
        | ids::RBLR
        | ids::TBLR
        | ids::RIND
        | ids::CLRH
        | ids::CLRF
        | ids::ADTR
        | ids::GVAL => SurfaceProperty::Scalar { channel: tag, value: read_enveloped_f32(c)? },
        ids::SIDE => SurfaceProperty::Sidedness(c.read_u16()?),
        ids::SMAN => SurfaceProperty::SmoothingAngle(c.read_f32()?),
        ids::RFOP => SurfaceProperty::ReflectionOptions(c.read_u16()?),
        ids::RIMG => SurfaceProperty::ReflectionImage(c.read_var_index()?),
        ids::TROP => SurfaceProperty::TransparencyOptions(c.read_u16()?),
        ids::TIMG => SurfaceProperty::RefractionImage(c.read_var_index()?),
        ids::GLOW => SurfaceProperty::Glow {
            kind: c.read_u16()?,
            intensity: read_enveloped_f32(c)?,
            size: read_enveloped_f32(c)?,
        },
        ids::LINE => {
            let flags = c.read_u16()?;
            let size = if c.is_empty() { None } else { Some(read_enveloped_f32(c)?) };
            let color = if c.is_empty() { None } else { Some(read_enveloped_vec3(c)?) };
            SurfaceProperty::Line { flags, size, color }
        }
        ids::ALPH => SurfaceProperty::Alpha { mode: c.read_u16()?, value: c.read_f32()? },
        ids::VCOL => SurfaceProperty::VertexColor {
            intensity: read_enveloped_f32(c)?,
            map_type: c.read_tag()?,
            name: c.read_padded_string()?,
        },
        ids::CMNT => SurfaceProperty::Comment(c.read_padded_string()?),
        _ => return Ok(None),
    };
    Ok(Some(prop))
}

/// BLOK: header sub-chunk (IMAP/PROC/GRAD/SHDR) with ordinal and header
/// attributes, then mapping and kind-specific attributes.
fn decode_block(c: &mut ChunkCursor<'_>) -> Result<SurfaceBlock> {
    let (header_tag, mut hc) = c.read_sub_chunk()?;
    let header = read_block_header(header_tag, &mut hc)?;

    let mut block = SurfaceBlock { header, mapping: None, attributes: Vec::new() };
    if let BlockKind::Other(tag) = block.header.kind {
        tracing::warn!(%tag, "unknown texture block type, attributes skipped");
        c.read_rest();
        return Ok(block);
    }

    while !c.is_empty() {
        let (tag, mut sub) = c.read_sub_chunk()?;
        if tag == ids::TMAP {
            block.mapping = Some(read_texture_mapping(&mut sub)?);
            continue;
        }
        match read_block_attribute(block.header.kind, tag, &mut sub)? {
            Some(attr) => block.attributes.push(attr),
            None => tracing::trace!(%tag, "skipping block attribute"),
        }
    }
    Ok(block)
}

fn read_block_header(tag: Tag, c: &mut ChunkCursor<'_>) -> Result<BlockHeader> {
    let mut header = BlockHeader {
        kind: BlockKind::from_tag(tag),
        ordinal: c.read_padded_string()?,
        channel: None,
        enabled: None,
        opacity: None,
        axis: None,
        negative: None,
    };

    while !c.is_empty() {
        let (tag, mut sub) = c.read_sub_chunk()?;
        match tag {
            ids::CHAN => header.channel = Some(sub.read_tag()?),
            ids::ENAB => header.enabled = Some(sub.read_u16()? != 0),
            ids::OPAC => {
                header.opacity = Some(Opacity { mode: sub.read_u16()?, value: read_enveloped_f32(&mut sub)? })
            }
            ids::AXIS => header.axis = Some(sub.read_u16()?),
            ids::NEGA => header.negative = Some(sub.read_u16()? != 0),
            _ => tracing::trace!(%tag, "skipping block header attribute"),
        }
    }
    Ok(header)
}

fn read_texture_mapping(c: &mut ChunkCursor<'_>) -> Result<TextureMapping> {
    let mut tmap = TextureMapping::default();
    while !c.is_empty() {
        let (tag, mut sub) = c.read_sub_chunk()?;
        match tag {
            ids::CNTR => tmap.center = Some(read_enveloped_vec3(&mut sub)?),
            ids::SIZE => tmap.size = Some(read_enveloped_vec3(&mut sub)?),
            ids::ROTA => tmap.rotation = Some(read_enveloped_vec3(&mut sub)?),
            ids::OREF => tmap.reference_object = Some(sub.read_padded_string()?),
            ids::FALL => {
                tmap.falloff = Some(Falloff { kind: sub.read_u16()?, vector: read_enveloped_vec3(&mut sub)? })
            }
            ids::CSYS => tmap.coord_system = Some(sub.read_u16()?),
            _ => tracing::trace!(%tag, "skipping texture mapping attribute"),
        }
    }
    Ok(tmap)
}

fn read_block_attribute(kind: BlockKind, tag: Tag, c: &mut ChunkCursor<'_>) -> Result<Option<BlockAttribute>> {
    let attr = match (kind, tag) {
        (BlockKind::ImageMap, ids::PROJ) => BlockAttribute::Projection(c.read_u16()?),
        (BlockKind::ImageMap | BlockKind::Procedural, ids::AXIS) => BlockAttribute::Axis(c.read_u16()?),
        (BlockKind::ImageMap, ids::IMAG) => BlockAttribute::Image(c.read_var_index()?),
        (BlockKind::ImageMap, ids::WRAP) => BlockAttribute::Wrap { width: c.read_u16()?, height: c.read_u16()? },
        (BlockKind::ImageMap, ids::WRPW) => BlockAttribute::WrapWidth(read_enveloped_f32(c)?),
        (BlockKind::ImageMap, ids::WRPH) => BlockAttribute::WrapHeight(read_enveloped_f32(c)?),
        (BlockKind::ImageMap, ids::VMAP) => BlockAttribute::UvMap(c.read_padded_string()?),
        (BlockKind::ImageMap, ids::AAST) => BlockAttribute::AntiAlias { flags: c.read_u16()?, strength: c.read_f32()? },
        (BlockKind::ImageMap, ids::PIXB) => BlockAttribute::PixelBlend(c.read_u16()?),
        (BlockKind::ImageMap, ids::STCK) => BlockAttribute::Sticky { enabled: c.read_u16()?, time: c.read_f32()? },
        (BlockKind::ImageMap, ids::TAMP) => BlockAttribute::Amplitude(read_enveloped_f32(c)?),
        (BlockKind::Procedural, ids::VALU) => {
            let count = (c.remaining() / 4).min(4);
            BlockAttribute::Value(c.read_f32_vec(count)?)
        }
        (BlockKind::Procedural | BlockKind::Shader, ids::FUNC) => BlockAttribute::Function {
            name: c.read_padded_string()?,
            data: c.read_rest().to_vec(),
        },
        (BlockKind::Gradient, ids::PNAM) => BlockAttribute::ParameterName(c.read_padded_string()?),
        (BlockKind::Gradient, ids::INAM) => BlockAttribute::ItemName(c.read_padded_string()?),
        (BlockKind::Gradient, ids::GRST) => BlockAttribute::GradientStart(c.read_f32()?),
        (BlockKind::Gradient, ids::GREN) => BlockAttribute::GradientEnd(c.read_f32()?),
        (BlockKind::Gradient, ids::GRPT) => BlockAttribute::GradientRepeat(c.read_u16()?),
        (BlockKind::Gradient, ids::FKEY) => {
            let mut keys = Vec::with_capacity(c.remaining() / 20);
            while !c.is_empty() {
                let input = c.read_f32()?;
                let output = [c.read_f32()?, c.read_f32()?, c.read_f32()?, c.read_f32()?];
                keys.push(GradientKey { input, output });
            }
            BlockAttribute::GradientKeys(keys)
        }
        (BlockKind::Gradient, ids::IKEY) => {
            let mut codes = Vec::with_capacity(c.remaining() / 2);
            while !c.is_empty() {
                codes.push(c.read_u16()?);
            }
            BlockAttribute::GradientInterpolation(codes)
        }
        _ => return Ok(None),
    };
    Ok(Some(attr))
}
