//! # quadedge
//!
//! Quad-edge surface meshes and boundary-aware dual mesh construction.
//!
//! quadedge provides a quad-edge mesh data structure for 2-manifold surfaces
//! with boundaries, and an algorithm that builds the topological dual of a
//! triangulated surface while stitching its open boundaries shut.
//!
//! ## Features
//!
//! - **Quad-edge data structure**: O(1) `Onext`/`Lnext`/`Sym` navigation with type-safe indices
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Incremental construction**: manifold face and edge insertion, edge and face deletion
//! - **Dual meshes**: barycentric dual points, interior dual faces, boundary fans
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use quadedge::prelude::*;
//!
//! // Define points and faces
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! // Build the mesh
//! let mesh: QuadEdgeMesh = build_from_triangles(&points, &faces).unwrap();
//! assert_eq!(mesh.num_points(), 4);
//! assert_eq!(mesh.num_faces(), 4);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use quadedge::prelude::*;
//!
//! let mesh: QuadEdgeMesh = triangulated_grid(2, 2).unwrap();
//! let center = PointId::new(4);
//!
//! // Walk the edges around a point
//! for e in mesh.point_edges(center) {
//!     println!("{:?} -> {:?}, left face {:?}", e, mesh.destination(e), mesh.left(e).cell);
//! }
//!
//! // Walk the edges around a face
//! let f = CellId::new(0);
//! let corners: Vec<_> = mesh.face_edges(f).map(|e| mesh.origin(e)).collect();
//! assert_eq!(corners, mesh.cell(f).unwrap().points());
//! ```
//!
//! ## Dual Construction
//!
//! ```
//! use quadedge::prelude::*;
//!
//! let mut primal: QuadEdgeMesh = triangulated_grid(4, 4).unwrap();
//! let dual = build_dual(&mut primal, &DualOptions::default()).unwrap();
//!
//! // One dual point per face, one dual face per point
//! assert_eq!(dual.mesh.num_points(), 32 + 16);
//! assert_eq!(dual.mesh.num_faces(), 25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use quadedge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::boundary::{BoundaryLocator, BoundaryLoop};
    pub use crate::algo::dual::{build_dual, DualMesh, DualMeshBuilder, DualOptions};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, to_face_vertex, triangulated_grid, Cell,
        CellId, CellKind, EdgeId, FaceRef, MeshIndex, Point, PointId, QuadEdge, QuadEdgeMesh,
    };
    pub use nalgebra::Point3;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
