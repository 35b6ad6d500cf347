//! Shape and index checks shared by every way a [`Mesh`] comes into being.
//!
//! Checks run in a fixed order and stop at the first violation: vertex rows,
//! face rows, column counts, attribute pairing, then index ranges. Nothing is
//! ever repaired or truncated.

use crate::arrays::{MeshArrays, Table};
use crate::error::{ArrayKind, Expectation, ShapeError};
use crate::mesh::Mesh;

type Result = std::result::Result<(), ShapeError>;

pub const MIN_VERTICES: usize = 3;

/// Validates the parallel-array form of a mesh.
pub fn check_arrays(arrays: &MeshArrays) -> Result {
    check_vertex_rows(arrays.vertices.row_count())?;
    check_columns(&arrays.vertices, ArrayKind::Vertices, 3)?;
    check_face_rows(arrays.faces.row_count())?;
    check_columns(&arrays.faces, ArrayKind::Faces, 3)?;

    check_columns(&arrays.tex_coords, ArrayKind::TexCoords, 2)?;
    check_columns(&arrays.texture_faces, ArrayKind::TextureFaces, 3)?;
    check_columns(&arrays.normals, ArrayKind::Normals, 3)?;
    check_columns(&arrays.normal_faces, ArrayKind::NormalFaces, 3)?;

    let faces = arrays.faces.row_count();
    check_pairing(
        ArrayKind::TextureFaces,
        ArrayKind::TexCoords,
        arrays.tex_coords.row_count(),
        faces,
        arrays.texture_faces.row_count(),
    )?;
    check_pairing(
        ArrayKind::NormalFaces,
        ArrayKind::Normals,
        arrays.normals.row_count(),
        faces,
        arrays.normal_faces.row_count(),
    )?;

    let vertices = arrays.vertices.row_count();
    for (i, row) in arrays.faces.rows().enumerate() {
        check_indices(ArrayKind::Faces, i, row, vertices)?;
    }
    let tex_coords = arrays.tex_coords.row_count();
    for (i, row) in arrays.texture_faces.rows().enumerate() {
        check_indices(ArrayKind::TextureFaces, i, row, tex_coords)?;
    }
    let normals = arrays.normals.row_count();
    for (i, row) in arrays.normal_faces.rows().enumerate() {
        check_indices(ArrayKind::NormalFaces, i, row, normals)?;
    }

    Ok(())
}

/// Validates an assembled mesh. Column counts hold by construction here.
pub fn check_mesh(mesh: &Mesh) -> Result {
    let faces = mesh.faces();
    check_vertex_rows(mesh.vertices().len())?;
    check_face_rows(faces.len())?;

    let textured = faces.iter().filter(|f| f.texture.is_some()).count();
    check_pairing(
        ArrayKind::TextureFaces,
        ArrayKind::TexCoords,
        mesh.tex_coords().len(),
        faces.len(),
        textured,
    )?;
    let with_normals = faces.iter().filter(|f| f.normals.is_some()).count();
    check_pairing(
        ArrayKind::NormalFaces,
        ArrayKind::Normals,
        mesh.normals().len(),
        faces.len(),
        with_normals,
    )?;

    for (i, face) in faces.iter().enumerate() {
        check_indices(ArrayKind::Faces, i, &face.vertices, mesh.vertices().len())?;
        if let Some(texture) = &face.texture {
            check_indices(ArrayKind::TextureFaces, i, texture, mesh.tex_coords().len())?;
        }
        if let Some(normals) = &face.normals {
            check_indices(ArrayKind::NormalFaces, i, normals, mesh.normals().len())?;
        }
    }

    Ok(())
}

pub fn check_vertex_rows(rows: usize) -> Result {
    if rows == 0 {
        return Err(ShapeError::EmptyMesh);
    }
    if rows < MIN_VERTICES {
        return Err(ShapeError::mismatch(
            ArrayKind::Vertices,
            Expectation::RowCount {
                min: MIN_VERTICES,
                found: rows,
            },
        ));
    }
    Ok(())
}

pub fn check_face_rows(rows: usize) -> Result {
    if rows == 0 {
        return Err(ShapeError::NoFaces);
    }
    Ok(())
}

fn check_columns<T: Copy>(table: &Table<T>, array: ArrayKind, expected: usize) -> Result {
    match table.rows().position(|row| row.len() != expected) {
        Some(row) => Err(ShapeError::mismatch(
            array,
            Expectation::ColumnCount {
                expected,
                found: table.rows().nth(row).map_or(0, <[T]>::len),
                row,
            },
        )),
        None => Ok(()),
    }
}

/// An attribute-face array must have one row per face while its attribute
/// array has data, and no rows while it has none.
fn check_pairing(
    array: ArrayKind,
    paired: ArrayKind,
    attribute_rows: usize,
    face_rows: usize,
    attribute_face_rows: usize,
) -> Result {
    let expected = if attribute_rows > 0 { face_rows } else { 0 };
    if attribute_face_rows != expected {
        return Err(ShapeError::mismatch(
            array,
            Expectation::CrossArrayLength {
                paired,
                expected,
                found: attribute_face_rows,
            },
        ));
    }
    Ok(())
}

fn check_indices(array: ArrayKind, face: usize, indices: &[u32], len: usize) -> Result {
    match indices
        .iter()
        .find(|&&index| index == 0 || index as usize > len)
    {
        Some(&index) => Err(ShapeError::mismatch(
            array,
            Expectation::IndexOutOfRange { face, index, len },
        )),
        None => Ok(()),
    }
}
