//! Stateless codec primitives for big-endian LightWave data.
//!
//! Everything in an LWO file is big-endian. The `swap*` helpers reverse the
//! byte order of values that were loaded in the wrong order; the `decode_*`
//! helpers read directly from byte slices and report how much they consumed.

use byteorder::{BigEndian, ByteOrder};

use crate::util::{Error, Result};

/// Leading byte that marks a 4-byte variable-length index.
pub const VX_MARKER: u8 = 0xFF;

/// Mask applied to 4-byte variable-length indices.
pub const VX_MASK: u32 = 0x00FF_FFFF;

/// Pack four characters big-endian into one comparable identifier.
#[inline]
pub const fn make_tag(chars: [u8; 4]) -> u32 {
    ((chars[0] as u32) << 24) | ((chars[1] as u32) << 16) | ((chars[2] as u32) << 8) | (chars[3] as u32)
}

/// Reverse the bytes of a 2-byte value.
#[inline]
pub const fn swap2(value: u16) -> u16 {
    value.swap_bytes()
}

/// Reverse the bytes of a 4-byte value.
#[inline]
pub const fn swap4(value: u32) -> u32 {
    value.swap_bytes()
}

/// Reverse the bytes of a float's bit pattern and reinterpret the result.
///
/// Works on the raw bits; a numeric cast would destroy the value.
#[inline]
pub fn swap_float(value: f32) -> f32 {
    f32::from_bits(swap4(value.to_bits()))
}

/// Decode a variable-length index (`VX`).
///
/// A leading `0xFF` byte selects the 4-byte form, whose low 24 bits are the
/// index; otherwise the index is a plain big-endian `u16`. Returns the index
/// and the number of bytes consumed (2 or 4).
pub fn decode_var_index(bytes: &[u8]) -> Result<(u32, usize)> {
    match bytes.first() {
        Some(&VX_MARKER) => {
            if bytes.len() < 4 {
                return Err(Error::UnexpectedEof(bytes.len() as u64));
            }
            Ok((BigEndian::read_u32(bytes) & VX_MASK, 4))
        }
        Some(_) if bytes.len() >= 2 => Ok((BigEndian::read_u16(bytes) as u32, 2)),
        _ => Err(Error::UnexpectedEof(bytes.len() as u64)),
    }
}

/// Decode a NUL-terminated, even-padded string (`S0`).
///
/// An even-length string is followed by two NULs, an odd-length one by a
/// single NUL, so the consumed size is always even. The padding byte itself
/// is not checked here; callers bound the consumed size against their chunk.
pub fn decode_padded_string(bytes: &[u8]) -> Result<(String, usize)> {
    let len = bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::UnexpectedEof(bytes.len() as u64))?;
    let text = String::from_utf8_lossy(&bytes[..len]).into_owned();
    let consumed = if len % 2 == 0 { len + 2 } else { len + 1 };
    Ok((text, consumed))
}
