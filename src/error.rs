//! Error types for quadedge.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::mesh::CellKind;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face in a face-vertex list references an invalid point index.
    #[error("face {face} references invalid point index {point}")]
    InvalidPointIndex {
        /// The face index.
        face: usize,
        /// The invalid point index.
        point: usize,
    },

    /// A point id is out of range for the mesh.
    #[error("point id {0} is out of range")]
    InvalidPointId(usize),

    /// An edge id is out of range or refers to a deleted edge.
    #[error("edge id {0} is out of range or deleted")]
    InvalidEdgeId(usize),

    /// A cell id is out of range or refers to a deleted cell.
    #[error("cell id {0} is out of range or deleted")]
    InvalidCellId(usize),

    /// A face has fewer than three points or repeats a point.
    #[error("face {face} is degenerate (fewer than 3 points or duplicate points)")]
    DegenerateFace {
        /// The face index (or the id the face would have received).
        face: usize,
    },

    /// The mesh has non-manifold topology.
    #[error("mesh has non-manifold topology: {details}")]
    NonManifold {
        /// Description of the non-manifold condition.
        details: String,
    },

    /// An edge already has a face on the side a new face wants to use.
    #[error("edge ({v0}, {v1}) already has a face on its left side")]
    NonManifoldEdge {
        /// Origin point of the edge.
        v0: usize,
        /// Destination point of the edge.
        v1: usize,
    },

    /// A cell was given the wrong number of points for its kind.
    #[error("{kind:?} cell needs {expected} points, got {got}")]
    InvalidCell {
        /// The requested cell kind.
        kind: CellKind,
        /// Number of points the kind requires.
        expected: usize,
        /// Number of points supplied.
        got: usize,
    },

    /// A primal face has more vertices than dual point generation handles.
    #[error("cell {cell} is a polygon with {points} points; only triangles are handled")]
    UnsupportedFaceShape {
        /// The offending cell.
        cell: usize,
        /// Its number of points.
        points: usize,
    },

    /// A face met during a ring walk has no dual point.
    #[error("cell {cell} has no dual point (edge {edge})")]
    MissingDualPoint {
        /// The face without a dual point (`usize::MAX` if the side has no face).
        cell: usize,
        /// The edge whose side was read.
        edge: usize,
    },

    /// A ring walk did not return to its starting edge.
    #[error("ring starting at edge {edge} does not close")]
    MalformedRing {
        /// The starting edge.
        edge: usize,
    },

    /// Growing the mesh would need ids beyond the range of its index type.
    #[error("mesh cannot hold more than {limit} {element}")]
    CapacityExceeded {
        /// The arena that is full.
        element: &'static str,
        /// The largest number of entries the index type can address.
        limit: usize,
    },

    /// Invalid mesh state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),
}
