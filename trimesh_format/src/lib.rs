//! Data structures for triangulated meshes: the [`Mesh`] model, its host-facing
//! array view and the validation rules both share.

pub mod arrays;
pub mod error;
pub mod mesh;
pub mod validate;

pub use arrays::{MeshArrays, Table};
pub use error::{ArrayKind, Expectation, FormatError, Result, ShapeError};
pub use mesh::{Face, FaceLayout, Mesh, Normal, TexCoord, Vertex};
