//! Reading and writing triangulated meshes in Wavefront `.obj` layout.
//!
//! ```no_run
//! use trimesh_obj::{read_obj, write_obj, WriteOptions};
//!
//! let parsed = read_obj("model.obj")?;
//! println!("{} faces", parsed.counts.faces);
//! write_obj(&parsed.mesh, "copy.obj", &WriteOptions::default())?;
//! # Ok::<(), trimesh_obj::ObjError>(())
//! ```

pub mod barycenter;
pub mod error;
pub mod obj;

pub use error::ObjError;
pub use obj::{
    classify, parse, probe_destination, read_obj, render_obj, write_arrays, write_obj,
    Destination, FaceError, FaceRecord, MaterialLibrary, Overwrite, ParsedObj, RecordCounts,
    WriteOptions,
};
pub use trimesh_format as format;
pub use trimesh_format::{Face, FaceLayout, Mesh, MeshArrays, Normal, TexCoord, Table, Vertex};
