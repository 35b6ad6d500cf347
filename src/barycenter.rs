//! Centroid reductions over a finished mesh.
//!
//! [`barycenter`] averages the face centroids without weighting them by area.
//! The area-weighted variant is kept apart as its own operation.

use trimesh_format::{Face, Mesh};

fn corners(mesh: &Mesh, face: &Face) -> [[f64; 3]; 3] {
    // indices are 1-based and range-checked when the mesh is built
    let vertices = mesh.vertices();
    face.vertices
        .map(|index| vertices[index as usize - 1].position)
}

fn centroid([a, b, c]: [[f64; 3]; 3]) -> [f64; 3] {
    [
        (a[0] + b[0] + c[0]) / 3.0,
        (a[1] + b[1] + c[1]) / 3.0,
        (a[2] + b[2] + c[2]) / 3.0,
    ]
}

fn area([a, b, c]: [[f64; 3]; 3]) -> f64 {
    let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let cross = [
        ab[1] * ac[2] - ab[2] * ac[1],
        ab[2] * ac[0] - ab[0] * ac[2],
        ab[0] * ac[1] - ab[1] * ac[0],
    ];
    0.5 * (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt()
}

/// Centroid of every face, in face order.
pub fn face_centroids(mesh: &Mesh) -> Vec<[f64; 3]> {
    mesh.faces()
        .iter()
        .map(|face| centroid(corners(mesh, face)))
        .collect()
}

/// Area of every face, in face order.
pub fn face_areas(mesh: &Mesh) -> Vec<f64> {
    mesh.faces()
        .iter()
        .map(|face| area(corners(mesh, face)))
        .collect()
}

/// Arithmetic mean of the face centroids.
pub fn barycenter(mesh: &Mesh) -> [f64; 3] {
    let centroids = face_centroids(mesh);
    let count = centroids.len() as f64;
    let sum = centroids.iter().fold([0.0; 3], |acc, c| {
        [acc[0] + c[0], acc[1] + c[1], acc[2] + c[2]]
    });
    sum.map(|value| value / count)
}

/// Mean of the face centroids weighted by face area. `None` when every face is
/// degenerate.
pub fn area_weighted_barycenter(mesh: &Mesh) -> Option<[f64; 3]> {
    let mut total = 0.0;
    let mut sum = [0.0; 3];
    for face in mesh.faces() {
        let corners = corners(mesh, face);
        let weight = area(corners);
        let c = centroid(corners);
        total += weight;
        for axis in 0..3 {
            sum[axis] += c[axis] * weight;
        }
    }

    if total > 0.0 {
        Some(sum.map(|value| value / total))
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use trimesh_format::{ShapeError, Vertex};

    fn vertex(x: f64, y: f64, z: f64) -> Vertex {
        Vertex {
            position: [x, y, z],
        }
    }

    fn assert_close(is: [f64; 3], should: [f64; 3]) {
        for axis in 0..3 {
            assert!(
                (is[axis] - should[axis]).abs() <= 1e-12,
                "is: {:?} should: {:?}",
                is,
                should
            );
        }
    }

    #[test]
    fn test_single_triangle() -> Result<(), ShapeError> {
        let mesh = Mesh::new(
            vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(0.0, 1.0, 0.0),
            ],
            vec![Face::new([1, 2, 3])],
        )?;

        assert_close(barycenter(&mesh), [1.0 / 3.0, 1.0 / 3.0, 0.0]);
        assert_eq!(face_areas(&mesh), vec![0.5]);
        Ok(())
    }

    #[test]
    fn test_barycenter_is_not_area_weighted() -> Result<(), ShapeError> {
        // a unit triangle next to one four times its area
        let mesh = Mesh::new(
            vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(0.0, 1.0, 0.0),
                vertex(2.0, 0.0, 0.0),
                vertex(4.0, 0.0, 0.0),
                vertex(2.0, 2.0, 0.0),
            ],
            vec![Face::new([1, 2, 3]), Face::new([4, 5, 6])],
        )?;

        let small = [1.0 / 3.0, 1.0 / 3.0, 0.0];
        let large = [8.0 / 3.0, 2.0 / 3.0, 0.0];
        assert_close(
            barycenter(&mesh),
            [(small[0] + large[0]) / 2.0, (small[1] + large[1]) / 2.0, 0.0],
        );

        let weighted = area_weighted_barycenter(&mesh).unwrap();
        assert_close(
            weighted,
            [
                (small[0] * 0.5 + large[0] * 2.0) / 2.5,
                (small[1] * 0.5 + large[1] * 2.0) / 2.5,
                0.0,
            ],
        );
        Ok(())
    }

    #[test]
    fn test_degenerate_faces_have_no_weighted_barycenter() -> Result<(), ShapeError> {
        let mesh = Mesh::new(
            vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 1.0, 1.0),
                vertex(2.0, 2.0, 2.0),
            ],
            vec![Face::new([1, 2, 3])],
        )?;

        assert_eq!(area_weighted_barycenter(&mesh), None);
        assert_close(barycenter(&mesh), [1.0, 1.0, 1.0]);
        Ok(())
    }
}
