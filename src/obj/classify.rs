//! Classification of a single `f` record into one of the four face syntaxes.
//!
//! The syntaxes overlap under scan-style matching (`1/2` starts out like a
//! bare `1`), so they are always attempted in the same order:
//!
//! 1. four corners in each syntax: a match means the face is not a triangle;
//! 2. three corners: `v`, `v/vt`, `v/vt/vn`, `v//vn`, first full match wins.
//!
//! A pattern only matches when every field is present and positive.

use trimesh_format::{Face, FaceLayout};

use super::scan::Scanner;

/// The order syntaxes are attempted in, for quads and triangles alike.
pub const SYNTAX_ORDER: [FaceLayout; 4] = [
    FaceLayout::Bare,
    FaceLayout::Textured,
    FaceLayout::TexturedWithNormals,
    FaceLayout::WithNormals,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceRecord {
    /// `f v v v`
    Bare { vertices: [u32; 3] },
    /// `f v/vt v/vt v/vt`
    TextureOnly {
        vertices: [u32; 3],
        texture: [u32; 3],
    },
    /// `f v//vn v//vn v//vn`
    NormalOnly {
        vertices: [u32; 3],
        normals: [u32; 3],
    },
    /// `f v/vt/vn v/vt/vn v/vt/vn`
    Both {
        vertices: [u32; 3],
        texture: [u32; 3],
        normals: [u32; 3],
    },
}

impl FaceRecord {
    pub fn layout(&self) -> FaceLayout {
        match self {
            FaceRecord::Bare { .. } => FaceLayout::Bare,
            FaceRecord::TextureOnly { .. } => FaceLayout::Textured,
            FaceRecord::NormalOnly { .. } => FaceLayout::WithNormals,
            FaceRecord::Both { .. } => FaceLayout::TexturedWithNormals,
        }
    }

    pub fn vertices(&self) -> [u32; 3] {
        match *self {
            FaceRecord::Bare { vertices }
            | FaceRecord::TextureOnly { vertices, .. }
            | FaceRecord::NormalOnly { vertices, .. }
            | FaceRecord::Both { vertices, .. } => vertices,
        }
    }

    /// Builds the record from the fields of a three-corner match, which come
    /// corner by corner in the order they appear on the line.
    fn from_fields(layout: FaceLayout, fields: &[u32]) -> Self {
        let column = |offset: usize, stride: usize| {
            [
                fields[offset],
                fields[stride + offset],
                fields[2 * stride + offset],
            ]
        };

        match layout {
            FaceLayout::Bare => FaceRecord::Bare {
                vertices: column(0, 1),
            },
            FaceLayout::Textured => FaceRecord::TextureOnly {
                vertices: column(0, 2),
                texture: column(1, 2),
            },
            FaceLayout::WithNormals => FaceRecord::NormalOnly {
                vertices: column(0, 2),
                normals: column(1, 2),
            },
            FaceLayout::TexturedWithNormals => FaceRecord::Both {
                vertices: column(0, 3),
                texture: column(1, 3),
                normals: column(2, 3),
            },
        }
    }
}

impl From<FaceRecord> for Face {
    fn from(record: FaceRecord) -> Self {
        match record {
            FaceRecord::Bare { vertices } => Face::new(vertices),
            FaceRecord::TextureOnly { vertices, texture } => {
                Face::new(vertices).with_texture(texture)
            }
            FaceRecord::NormalOnly { vertices, normals } => {
                Face::new(vertices).with_normals(normals)
            }
            FaceRecord::Both {
                vertices,
                texture,
                normals,
            } => Face::new(vertices)
                .with_texture(texture)
                .with_normals(normals),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceError {
    #[error("face has four corners in {0:?} syntax")]
    NonTriangular(FaceLayout),
    #[error("face matches none of the supported syntaxes")]
    Unrecognized,
}

/// Classifies a whole face line, leading `f` included.
pub fn classify(line: &str) -> Result<FaceRecord, FaceError> {
    if let Some(layout) = SYNTAX_ORDER
        .iter()
        .copied()
        .find(|&layout| scan_corners(line, layout, 4).is_some())
    {
        return Err(FaceError::NonTriangular(layout));
    }

    SYNTAX_ORDER
        .iter()
        .find_map(|&layout| {
            scan_corners(line, layout, 3).map(|fields| FaceRecord::from_fields(layout, &fields))
        })
        .ok_or(FaceError::Unrecognized)
}

/// Matches `f` followed by `corners` corners in `layout` syntax and returns
/// their fields, or `None` unless every field was read and is positive.
/// Anything after the last corner is ignored.
fn scan_corners(line: &str, layout: FaceLayout, corners: usize) -> Option<Vec<u32>> {
    let mut scanner = Scanner::new(line);
    scanner.literal('f')?;

    let mut fields = Vec::with_capacity(corners * 3);
    for _ in 0..corners {
        scanner.whitespace();
        fields.push(scanner.index()?);
        match layout {
            FaceLayout::Bare => {}
            FaceLayout::Textured => {
                scanner.literal('/')?;
                fields.push(scanner.index()?);
            }
            FaceLayout::TexturedWithNormals => {
                scanner.literal('/')?;
                fields.push(scanner.index()?);
                scanner.literal('/')?;
                fields.push(scanner.index()?);
            }
            FaceLayout::WithNormals => {
                scanner.literal('/')?;
                scanner.literal('/')?;
                fields.push(scanner.index()?);
            }
        }
    }

    Some(fields)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify_bare() -> Result<(), FaceError> {
        assert_eq!(
            classify("f 1 2 3")?,
            FaceRecord::Bare {
                vertices: [1, 2, 3]
            }
        );
        assert_eq!(
            classify("f\t7   8 9")?,
            FaceRecord::Bare {
                vertices: [7, 8, 9]
            }
        );
        Ok(())
    }

    #[test]
    fn test_classify_texture_only() -> Result<(), FaceError> {
        assert_eq!(
            classify("f 1/4 2/5 3/6")?,
            FaceRecord::TextureOnly {
                vertices: [1, 2, 3],
                texture: [4, 5, 6],
            }
        );
        Ok(())
    }

    #[test]
    fn test_classify_both() -> Result<(), FaceError> {
        assert_eq!(
            classify("f 1/4/7 2/5/8 3/6/9")?,
            FaceRecord::Both {
                vertices: [1, 2, 3],
                texture: [4, 5, 6],
                normals: [7, 8, 9],
            }
        );
        Ok(())
    }

    #[test]
    fn test_classify_normal_only() -> Result<(), FaceError> {
        assert_eq!(
            classify("f 1//7 2//8 3//9")?,
            FaceRecord::NormalOnly {
                vertices: [1, 2, 3],
                normals: [7, 8, 9],
            }
        );
        Ok(())
    }

    #[test]
    fn test_quads_are_rejected_in_every_syntax() {
        let quads = [
            ("f 1 2 3 4", FaceLayout::Bare),
            ("f 1/1 2/2 3/3 4/4", FaceLayout::Textured),
            ("f 1/1/1 2/2/2 3/3/3 4/4/4", FaceLayout::TexturedWithNormals),
            ("f 1//1 2//2 3//3 4//4", FaceLayout::WithNormals),
        ];

        for (line, layout) in quads.iter() {
            assert_eq!(classify(line), Err(FaceError::NonTriangular(*layout)));
        }
    }

    #[test]
    fn test_fourth_corner_with_zero_index_is_ignored() -> Result<(), FaceError> {
        assert_eq!(
            classify("f 1 2 3 0")?,
            FaceRecord::Bare {
                vertices: [1, 2, 3]
            }
        );
        Ok(())
    }

    #[test]
    fn test_priority_order_decides_trailing_text() -> Result<(), FaceError> {
        // the bare pattern matches first and the rest of the line is ignored
        assert_eq!(
            classify("f 1 2 3/4")?,
            FaceRecord::Bare {
                vertices: [1, 2, 3]
            }
        );
        // the last corner is incomplete for `v/vt`, but `v/vt/vn` is tried later
        assert_eq!(
            classify("f 1/2/3 4/5/6 7/8/9")?.layout(),
            FaceLayout::TexturedWithNormals
        );
        Ok(())
    }

    #[test]
    fn test_classify_is_deterministic() {
        let line = "f 3/1 1/2 2/3";
        let first = classify(line);
        for _ in 0..8 {
            assert_eq!(classify(line), first);
        }
    }

    #[test]
    fn test_unrecognized() {
        let lines = [
            "f 1 2",
            "f 0 1 2",
            "f -1 -2 -3",
            "f 1/1 2 3",
            "f 1//1 2/2 3/3",
            "f a b c",
            "f",
        ];

        for line in lines.iter() {
            assert_eq!(classify(line), Err(FaceError::Unrecognized), "{}", line);
        }
    }

    #[test]
    fn test_record_into_face() -> Result<(), FaceError> {
        let face: Face = classify("f 1/4/7 2/5/8 3/6/9")?.into();
        assert_eq!(face.vertices, [1, 2, 3]);
        assert_eq!(face.texture, Some([4, 5, 6]));
        assert_eq!(face.normals, Some([7, 8, 9]));
        Ok(())
    }
}
