//! Wavefront `.obj` reading and writing for triangle meshes.

pub mod classify;
pub mod parser;
pub(crate) mod scan;
pub mod writer;

pub use classify::{classify, FaceError, FaceRecord};
pub use parser::{parse, read_obj, ParsedObj, RecordCounts, RecordKind};
pub use writer::{
    probe_destination, render_obj, write_arrays, write_obj, Destination, MaterialLibrary,
    Overwrite, WriteOptions,
};
