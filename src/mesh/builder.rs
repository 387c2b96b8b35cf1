//! Mesh construction utilities.
//!
//! This module provides functions for building quad-edge meshes from
//! face-vertex lists, plus a triangulated planar grid generator used as a
//! standard fixture for dual construction.

use nalgebra::Point3;

use super::index::{MeshIndex, PointId};
use super::quadedge::QuadEdgeMesh;
use crate::error::{MeshError, Result};

/// Build a quad-edge mesh from points and triangle faces.
///
/// # Arguments
/// * `points` - List of point positions
/// * `faces` - List of triangle faces, each as [v0, v1, v2] indices
///
/// # Returns
/// A quad-edge mesh, or an error if the input is invalid.
///
/// # Example
/// ```
/// use quadedge::mesh::{build_from_triangles, QuadEdgeMesh};
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: QuadEdgeMesh = build_from_triangles(&points, &faces).unwrap();
/// assert_eq!(mesh.num_points(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    points: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<QuadEdgeMesh<I>> {
    build(points, faces.iter().map(|f| f.as_slice()), faces.len())
}

/// Build a quad-edge mesh from points and polygonal faces of any size.
///
/// Faces are inserted in order; each must have at least three distinct points.
pub fn build_from_polygons<I: MeshIndex>(
    points: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<QuadEdgeMesh<I>> {
    build(points, faces.iter().map(Vec::as_slice), faces.len())
}

fn build<'a, I: MeshIndex>(
    points: &[Point3<f64>],
    faces: impl Iterator<Item = &'a [usize]> + Clone,
    num_faces: usize,
) -> Result<QuadEdgeMesh<I>> {
    if num_faces == 0 {
        return Err(MeshError::EmptyMesh);
    }

    // Validate point indices
    for (fi, face) in faces.clone().enumerate() {
        for &pi in face {
            if pi >= points.len() {
                return Err(MeshError::InvalidPointIndex { face: fi, point: pi });
            }
        }
        // Check for degenerate faces
        let distinct = face
            .iter()
            .enumerate()
            .all(|(i, p)| !face[..i].contains(p));
        if face.len() < 3 || !distinct {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }

    let mut mesh = QuadEdgeMesh::with_capacity(points.len(), num_faces);

    for &pos in points {
        mesh.add_point(pos)?;
    }

    let mut ids: Vec<PointId<I>> = Vec::new();
    for face in faces {
        ids.clear();
        ids.extend(face.iter().map(|&pi| PointId::new(pi)));
        mesh.add_face(&ids)?;
    }

    Ok(mesh)
}

/// Build a planar grid of `nx` by `ny` unit squares, each split into two triangles.
///
/// Points are numbered row by row: the point at column `x`, row `y` has id
/// `y * (nx + 1) + x` and position `(x, y, 0)`. The square with lower-left
/// corner `a` is split along its rising diagonal into `[a, a+1, a+nx+2]` and
/// `[a, a+nx+2, a+nx+1]`, both counter-clockwise.
///
/// # Example
/// ```
/// use quadedge::mesh::{triangulated_grid, QuadEdgeMesh};
///
/// let mesh: QuadEdgeMesh = triangulated_grid(4, 4).unwrap();
/// assert_eq!(mesh.num_points(), 25);
/// assert_eq!(mesh.num_faces(), 32);
/// assert_eq!(mesh.num_edges(), 56);
/// ```
pub fn triangulated_grid<I: MeshIndex>(nx: usize, ny: usize) -> Result<QuadEdgeMesh<I>> {
    let width = nx + 1;

    let mut points = Vec::with_capacity(width * (ny + 1));
    for y in 0..=ny {
        for x in 0..=nx {
            points.push(Point3::new(x as f64, y as f64, 0.0));
        }
    }

    let mut faces = Vec::with_capacity(2 * nx * ny);
    for y in 0..ny {
        for x in 0..nx {
            let a = y * width + x;
            faces.push([a, a + 1, a + width + 1]);
            faces.push([a, a + width + 1, a + width]);
        }
    }

    build_from_triangles(&points, &faces)
}

/// Convert a quad-edge mesh back to a face-vertex representation.
///
/// Returns (points, faces) tuple. Only live faces are emitted, in id order.
pub fn to_face_vertex<I: MeshIndex>(mesh: &QuadEdgeMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let points: Vec<Point3<f64>> = mesh.point_ids().map(|p| *mesh.position(p)).collect();

    let faces: Vec<Vec<usize>> = mesh
        .cells()
        .filter(|(_, c)| c.is_face())
        .map(|(_, c)| c.points().iter().map(|p| p.index()).collect())
        .collect();

    (points, faces)
}
