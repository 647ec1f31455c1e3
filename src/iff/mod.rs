//! Low-level IFF container access for LightWave objects.
//!
//! File layout (all values big-endian):
//!
//! ```text
//! +------+------+------+------------------------------------------+
//! | FORM | size | type | chunk* ...                               |
//! +------+------+------+------------------------------------------+
//!   4      4      4     size - 4 bytes
//!
//! chunk:      | tag (4) | size u32 (4) | payload (size) |
//! sub-chunk:  | tag (4) | size u16 (2) | payload (size) |   (SURF, CLIP, ENVL, BLOK)
//! ```
//!
//! `size` in the FORM header equals the file length minus 8, and `type` is
//! one of `LWO2`, `LWOB` or `LWLO`.

pub mod codec;
pub mod cursor;
pub mod format;
pub mod reader;

pub use codec::{decode_padded_string, decode_var_index, make_tag, swap2, swap4, swap_float};
pub use cursor::ChunkCursor;
pub use format::{ids, FileType, Tag};
pub use reader::{ByteSource, IStreams};
