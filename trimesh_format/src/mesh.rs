use crate::arrays::{MeshArrays, Table};
use crate::error::{Result, ShapeError};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::path::Path;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f64; 3],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TexCoord {
    pub uv: [f64; 2],
}

/// Vertex normal. Expected to be near unit length, which is not checked.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    pub direction: [f64; 3],
}

/// A triangle with its per-corner attribute references, all 1-based.
///
/// Texture and normal triples travel with the face they belong to, so the
/// face, texture-face and normal-face sequences can never drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub vertices: [u32; 3],
    pub texture: Option<[u32; 3]>,
    pub normals: Option<[u32; 3]>,
}

impl Face {
    pub fn new(vertices: [u32; 3]) -> Self {
        Face {
            vertices,
            ..Face::default()
        }
    }

    pub fn with_texture(mut self, texture: [u32; 3]) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_normals(mut self, normals: [u32; 3]) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn layout(&self) -> FaceLayout {
        FaceLayout::from_flags(self.texture.is_some(), self.normals.is_some())
    }
}

/// Which optional attribute streams the faces of a mesh carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceLayout {
    Bare,
    Textured,
    WithNormals,
    TexturedWithNormals,
}

impl FaceLayout {
    pub fn from_flags(textured: bool, with_normals: bool) -> Self {
        match (textured, with_normals) {
            (false, false) => FaceLayout::Bare,
            (true, false) => FaceLayout::Textured,
            (false, true) => FaceLayout::WithNormals,
            (true, true) => FaceLayout::TexturedWithNormals,
        }
    }

    pub fn has_texture(self) -> bool {
        matches!(self, FaceLayout::Textured | FaceLayout::TexturedWithNormals)
    }

    pub fn has_normals(self) -> bool {
        matches!(
            self,
            FaceLayout::WithNormals | FaceLayout::TexturedWithNormals
        )
    }
}

/// A validated triangle mesh.
///
/// Every constructor runs [`validate::check_mesh`], so a `Mesh` in hand always
/// has at least three vertices, at least one face, uniformly paired attribute
/// faces and in-range indices. The data is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMesh")]
pub struct Mesh {
    vertices: Vec<Vertex>,
    tex_coords: Vec<TexCoord>,
    normals: Vec<Normal>,
    faces: Vec<Face>,
    material_library: Option<String>,
}

/// Serialized form of a [`Mesh`] before it has been checked.
#[derive(Deserialize)]
struct RawMesh {
    vertices: Vec<Vertex>,
    tex_coords: Vec<TexCoord>,
    normals: Vec<Normal>,
    faces: Vec<Face>,
    material_library: Option<String>,
}

impl TryFrom<RawMesh> for Mesh {
    type Error = ShapeError;

    fn try_from(raw: RawMesh) -> std::result::Result<Self, Self::Error> {
        Mesh::with_attributes(
            raw.vertices,
            raw.tex_coords,
            raw.normals,
            raw.faces,
            raw.material_library,
        )
    }
}

impl Mesh {
    /// A mesh of plain triangles without texture or normal data.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> std::result::Result<Self, ShapeError> {
        Self::with_attributes(vertices, Vec::new(), Vec::new(), faces, None)
    }

    pub fn with_attributes(
        vertices: Vec<Vertex>,
        tex_coords: Vec<TexCoord>,
        normals: Vec<Normal>,
        faces: Vec<Face>,
        material_library: Option<String>,
    ) -> std::result::Result<Self, ShapeError> {
        let mesh = Mesh {
            vertices,
            tex_coords,
            normals,
            faces,
            material_library,
        };
        validate::check_mesh(&mesh)?;
        Ok(mesh)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn tex_coords(&self) -> &[TexCoord] {
        &self.tex_coords
    }

    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn material_library(&self) -> Option<&str> {
        self.material_library.as_deref()
    }

    /// Replaces the material-library reference; it takes no part in validation.
    pub fn with_material_library(mut self, material_library: Option<String>) -> Self {
        self.material_library = material_library;
        self
    }

    /// The layout shared by all faces.
    pub fn face_layout(&self) -> FaceLayout {
        // faces are never empty and validation rejects mixed layouts
        self.faces
            .first()
            .map(Face::layout)
            .unwrap_or(FaceLayout::Bare)
    }

    /// Per-face texture triples, empty when the mesh carries no texture data.
    pub fn texture_faces(&self) -> Vec<[u32; 3]> {
        self.faces.iter().filter_map(|face| face.texture).collect()
    }

    /// Per-face normal triples, empty when the mesh carries no normal data.
    pub fn normal_faces(&self) -> Vec<[u32; 3]> {
        self.faces.iter().filter_map(|face| face.normals).collect()
    }

    /// Splits the mesh into parallel N×k arrays, the shape hosts exchange.
    pub fn to_arrays(&self) -> MeshArrays {
        MeshArrays {
            vertices: Table::from_rows(self.vertices.iter().map(|v| v.position.to_vec())),
            faces: Table::from_rows(self.faces.iter().map(|f| f.vertices.to_vec())),
            tex_coords: Table::from_rows(self.tex_coords.iter().map(|t| t.uv.to_vec())),
            texture_faces: Table::from_rows(self.texture_faces().iter().map(|t| t.to_vec())),
            normals: Table::from_rows(self.normals.iter().map(|n| n.direction.to_vec())),
            normal_faces: Table::from_rows(self.normal_faces().iter().map(|n| n.to_vec())),
            material_library: self.material_library.clone(),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let raw = bincode::deserialize::<RawMesh>(&bytes)?;
        Ok(Mesh::try_from(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Mesh::from_bytes(data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }
}

impl TryFrom<MeshArrays> for Mesh {
    type Error = ShapeError;

    fn try_from(arrays: MeshArrays) -> std::result::Result<Self, Self::Error> {
        validate::check_arrays(&arrays)?;

        let vertices = arrays
            .vertices
            .rows()
            .map(|row| Vertex {
                position: [row[0], row[1], row[2]],
            })
            .collect();
        let tex_coords = arrays
            .tex_coords
            .rows()
            .map(|row| TexCoord {
                uv: [row[0], row[1]],
            })
            .collect();
        let normals = arrays
            .normals
            .rows()
            .map(|row| Normal {
                direction: [row[0], row[1], row[2]],
            })
            .collect();

        let mut texture_faces = arrays.texture_faces.rows();
        let mut normal_faces = arrays.normal_faces.rows();
        let faces = arrays
            .faces
            .rows()
            .map(|row| Face {
                vertices: [row[0], row[1], row[2]],
                texture: texture_faces.next().map(|t| [t[0], t[1], t[2]]),
                normals: normal_faces.next().map(|n| [n[0], n[1], n[2]]),
            })
            .collect();

        Mesh::with_attributes(
            vertices,
            tex_coords,
            normals,
            faces,
            arrays.material_library,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{ArrayKind, Expectation};

    fn unit_triangle() -> Vec<Vertex> {
        vec![
            Vertex {
                position: [0.0, 0.0, 0.0],
            },
            Vertex {
                position: [1.0, 0.0, 0.0],
            },
            Vertex {
                position: [0.0, 1.0, 0.0],
            },
        ]
    }

    fn unit_uvs() -> Vec<TexCoord> {
        vec![
            TexCoord { uv: [0.0, 0.0] },
            TexCoord { uv: [1.0, 0.0] },
            TexCoord { uv: [0.0, 1.0] },
        ]
    }

    #[test]
    fn test_plain_mesh() -> std::result::Result<(), ShapeError> {
        let mesh = Mesh::new(unit_triangle(), vec![Face::new([1, 2, 3])])?;

        assert_eq!(mesh.face_layout(), FaceLayout::Bare);
        assert!(mesh.texture_faces().is_empty());
        assert!(mesh.normal_faces().is_empty());
        assert_eq!(mesh.material_library(), None);
        Ok(())
    }

    #[test]
    fn test_textured_mesh_layout() -> std::result::Result<(), ShapeError> {
        let mesh = Mesh::with_attributes(
            unit_triangle(),
            unit_uvs(),
            Vec::new(),
            vec![Face::new([1, 2, 3]).with_texture([1, 2, 3])],
            Some("unit.mtl".into()),
        )?;

        assert_eq!(mesh.face_layout(), FaceLayout::Textured);
        assert_eq!(mesh.texture_faces(), vec![[1, 2, 3]]);
        assert_eq!(mesh.material_library(), Some("unit.mtl"));
        Ok(())
    }

    #[test]
    fn test_mixed_layout_is_rejected() {
        let result = Mesh::with_attributes(
            unit_triangle(),
            unit_uvs(),
            Vec::new(),
            vec![
                Face::new([1, 2, 3]).with_texture([1, 2, 3]),
                Face::new([3, 2, 1]),
            ],
            None,
        );

        assert_eq!(
            result,
            Err(ShapeError::Mismatch {
                array: ArrayKind::TextureFaces,
                expectation: Expectation::CrossArrayLength {
                    paired: ArrayKind::TexCoords,
                    expected: 2,
                    found: 1,
                },
            })
        );
    }

    #[test]
    fn test_arrays_round_trip() -> std::result::Result<(), ShapeError> {
        let mesh = Mesh::with_attributes(
            unit_triangle(),
            unit_uvs(),
            vec![Normal {
                direction: [0.0, 0.0, 1.0],
            }],
            vec![Face::new([1, 2, 3])
                .with_texture([1, 2, 3])
                .with_normals([1, 1, 1])],
            None,
        )?;

        let arrays = mesh.to_arrays();
        assert_eq!(arrays.faces.row_count(), 1);
        assert_eq!(arrays.tex_coords.column_count(), 2);
        assert_eq!(arrays.normal_faces.row_count(), 1);

        assert_eq!(Mesh::try_from(arrays)?, mesh);
        Ok(())
    }

    #[test]
    fn test_snapshot_round_trip() -> Result<()> {
        let mesh = Mesh::new(unit_triangle(), vec![Face::new([1, 2, 3])])?
            .with_material_library(Some("unit.mtl".into()));

        let bytes = mesh.to_bytes()?;
        assert_eq!(Mesh::from_bytes(bytes)?, mesh);
        Ok(())
    }

    #[test]
    fn test_snapshot_from_file() -> Result<()> {
        let mesh = Mesh::new(unit_triangle(), vec![Face::new([3, 2, 1])])?;
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("unit.tmesh");
        std::fs::write(&path, mesh.to_bytes()?)?;

        assert_eq!(Mesh::from_file(&path)?, mesh);
        assert!(matches!(
            Mesh::from_file(&dir.path().join("missing.tmesh")),
            Err(crate::error::FormatError::Io(_))
        ));
        Ok(())
    }

    #[test]
    fn test_snapshot_is_validated() -> Result<()> {
        let broken = Mesh {
            vertices: unit_triangle(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            faces: vec![Face::new([1, 2, 7])],
            material_library: None,
        };

        let bytes = broken.to_bytes()?;
        assert!(bincode::deserialize::<Mesh>(&bytes).is_err());
        assert!(matches!(
            Mesh::from_bytes(bytes),
            Err(crate::error::FormatError::Shape(ShapeError::Mismatch {
                array: ArrayKind::Faces,
                ..
            }))
        ));
        Ok(())
    }
}
