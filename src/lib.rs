//! # lwo
//!
//! Reader for LightWave Object files (`.lwo`), the IFF-based mesh format
//! written by LightWave 3D.
//!
//! All three container variants are supported:
//! - `LWO2` - LightWave 6.0 and later (layers, envelopes, clips, vertex maps)
//! - `LWOB` - pre-6.0 objects without layers
//! - `LWLO` - pre-6.0 layered objects
//!
//! A file is decoded in one pass into an [`ObjectGraph`]: an ordered list of
//! chunk records (layers, points, polygons, tags, surfaces, ...) linked by
//! [`ChunkId`](object::ChunkId) handles.
//!
//! ## Modules
//!
//! - [`util`] - Errors and math types
//! - [`iff`] - Container format: tags, byte codecs, cursors, byte sources
//! - [`object`] - Decoded records and the object graph
//! - [`decode`] - Header validation, chunk walk and per-chunk decoders
//!
//! ## Example
//!
//! ```ignore
//! use lwo::LwoObject;
//!
//! let object = LwoObject::open("model.lwo")?;
//! for (id, layer) in object.graph().layers() {
//!     println!("layer {} '{}'", layer.index, layer.name);
//!     for (_, chunk) in object.graph().members(id) {
//!         println!("  {} {}", chunk.kind, chunk.type_name());
//!     }
//! }
//! ```

pub mod util;
pub mod iff;
pub mod object;
pub mod decode;

// Re-export commonly used types
pub use util::{Error, Result};
pub use iff::{ByteSource, FileType, IStreams, Tag};
pub use object::{Chunk, ChunkData, ChunkId, ObjectGraph};
pub use decode::{read_object, LwoObject};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{BBox3f, Error, Result, Vec3};
    pub use crate::iff::{ids, ByteSource, FileType, IStreams, Tag};
    pub use crate::object::*;
    pub use crate::decode::{read_object, LwoObject};
}
