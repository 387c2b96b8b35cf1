//! Mesh processing algorithms.
//!
//! This module contains the algorithms that run on top of a [`QuadEdgeMesh`](crate::mesh::QuadEdgeMesh):
//!
//! - **Boundary**: boundary loop extraction
//! - **Topology**: validation against expected counts and the Euler relation
//! - **Dual**: three-pass dual mesh construction with boundary stitching

pub mod boundary;
pub mod dual;
pub mod progress;
pub mod topology;

pub use progress::Progress;
