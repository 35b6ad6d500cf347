//! Errors returned by the reader and the writer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use trimesh_format::{ArrayKind, Expectation, FaceLayout, ShapeError};

use crate::obj::parser::RecordKind;

/// Every failure aborts the whole read or write; there is no partial result.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("could not open `{path}`: {source}")]
    FileNotFound { path: PathBuf, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: unrecognized face syntax")]
    UnrecognizedFaceSyntax { line: usize },
    #[error("line {line}: mesh is not triangular ({layout:?} face with four corners)")]
    NonTriangularFace { line: usize, layout: FaceLayout },
    #[error("line {line}: malformed `{kind}` record")]
    MalformedRecord { line: usize, kind: RecordKind },
    #[error("mesh does not contain any vertices")]
    EmptyMesh,
    #[error("mesh does not contain any faces")]
    NoFaces,
    #[error("shape mismatch in {array}: {expectation}")]
    ShapeMismatch {
        array: ArrayKind,
        expectation: Expectation,
    },
    #[error("destination already exists: {path}")]
    DestinationExists { path: PathBuf },
}

impl From<ShapeError> for ObjError {
    fn from(err: ShapeError) -> Self {
        match err {
            ShapeError::EmptyMesh => ObjError::EmptyMesh,
            ShapeError::NoFaces => ObjError::NoFaces,
            ShapeError::Mismatch { array, expectation } => {
                ObjError::ShapeMismatch { array, expectation }
            }
        }
    }
}
