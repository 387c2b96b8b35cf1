//! Core mesh data structures.
//!
//! This module provides the quad-edge mesh representation and related types
//! for representing and mutating 2-manifold surface meshes with boundaries.
//!
//! # Overview
//!
//! The primary type is [`QuadEdgeMesh`], which stores every undirected edge as
//! a pair of directed [`QuadEdge`] records. Each record takes part in an
//! `Onext` ring (edges around its origin) and an `Lnext` ring (edges around
//! its left face or hole), giving O(1) adjacency queries in every direction.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`PointId`] - Identifies a point
//! - [`EdgeId`] - Identifies a directed quad-edge
//! - [`CellId`] - Identifies a cell (face or any other cell kind)
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! Meshes are built incrementally with [`QuadEdgeMesh::add_point`] and
//! [`QuadEdgeMesh::add_face`], or from face-vertex lists:
//!
//! ```
//! use quadedge::mesh::{QuadEdgeMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: QuadEdgeMesh = build_from_triangles(&points, &faces).unwrap();
//! ```

mod builder;
mod cell;
mod index;
mod quadedge;
mod topology;

pub use builder::{build_from_polygons, build_from_triangles, to_face_vertex, triangulated_grid};
pub use cell::{Cell, CellKind, FaceRef};
pub use index::{CellId, EdgeId, MeshIndex, PointId};
pub use quadedge::{LnextIter, OnextIter, Point, QuadEdge, QuadEdgeMesh};
