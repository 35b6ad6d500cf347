use std::fmt;

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Serialization Error: {0}")]
    Serialization(#[from] Box<bincode::ErrorKind>),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid mesh: {0}")]
    Shape(#[from] ShapeError),
}

/// A violated mesh invariant. Validation reports the first one it finds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("mesh does not contain any vertices")]
    EmptyMesh,
    #[error("mesh does not contain any faces")]
    NoFaces,
    #[error("shape mismatch in {array}: {expectation}")]
    Mismatch {
        array: ArrayKind,
        expectation: Expectation,
    },
}

impl ShapeError {
    pub(crate) fn mismatch(array: ArrayKind, expectation: Expectation) -> Self {
        ShapeError::Mismatch { array, expectation }
    }
}

/// The attribute arrays a mesh is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    Vertices,
    Faces,
    TexCoords,
    TextureFaces,
    Normals,
    NormalFaces,
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArrayKind::Vertices => "vertices",
            ArrayKind::Faces => "faces",
            ArrayKind::TexCoords => "texture coordinates",
            ArrayKind::TextureFaces => "texture faces",
            ArrayKind::Normals => "vertex normals",
            ArrayKind::NormalFaces => "face normals",
        };
        f.write_str(name)
    }
}

/// What an array was expected to look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// At least `min` rows.
    RowCount { min: usize, found: usize },
    /// Every row has exactly `expected` columns; `row` is the first offender.
    ColumnCount {
        expected: usize,
        found: usize,
        row: usize,
    },
    /// One row per face, paired with the `paired` attribute array.
    CrossArrayLength {
        paired: ArrayKind,
        expected: usize,
        found: usize,
    },
    /// A 1-based index of face `face` (0-based position) outside `[1, len]`.
    IndexOutOfRange { face: usize, index: u32, len: usize },
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::RowCount { min, found } => {
                write!(f, "expected at least {} rows, found {}", min, found)
            }
            Expectation::ColumnCount {
                expected,
                found,
                row,
            } => write!(
                f,
                "expected {} columns, found {} in row {}",
                expected, found, row
            ),
            Expectation::CrossArrayLength {
                paired,
                expected,
                found,
            } => write!(
                f,
                "expected {} rows to pair with {}, found {}",
                expected, paired, found
            ),
            Expectation::IndexOutOfRange { face, index, len } => write!(
                f,
                "face {} references index {} outside [1, {}]",
                face, index, len
            ),
        }
    }
}
