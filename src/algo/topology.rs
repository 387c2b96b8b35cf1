//! Topology validation.
//!
//! [`TopologyChecker`] compares a mesh against expected element counts and
//! the Euler relation `V - E + F = 2 - 2g - B` of a connected orientable
//! surface of genus `g` with `B` boundary loops. Run it before dual
//! construction to catch malformed input early.
//!
//! # Example
//!
//! ```
//! use quadedge::prelude::*;
//! use quadedge::algo::topology::TopologyChecker;
//!
//! let mesh: QuadEdgeMesh = triangulated_grid(2, 2).unwrap();
//! let checker = TopologyChecker::new()
//!     .with_points(9)
//!     .with_faces(8)
//!     .with_boundaries(1)
//!     .with_genus(0);
//! assert!(checker.validate(&mesh).is_ok());
//! ```

use crate::algo::boundary::BoundaryLocator;
use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, QuadEdgeMesh};

/// Element counts of a mesh, as seen by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologySummary {
    /// Number of points.
    pub points: usize,
    /// Number of live undirected edges.
    pub edges: usize,
    /// Number of live faces.
    pub faces: usize,
    /// Number of boundary loops.
    pub boundaries: usize,
    /// `V - E + F`.
    pub euler_characteristic: i64,
}

/// Validates mesh topology against optional expectations.
#[derive(Debug, Clone, Default)]
pub struct TopologyChecker {
    /// Expected number of points.
    pub expected_points: Option<usize>,

    /// Expected number of edges.
    pub expected_edges: Option<usize>,

    /// Expected number of faces.
    pub expected_faces: Option<usize>,

    /// Expected number of boundary loops.
    pub expected_boundaries: Option<usize>,

    /// Expected genus; enables the Euler relation check.
    pub expected_genus: Option<usize>,
}

impl TopologyChecker {
    /// Create a checker with no expectations (structural validity only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect this many points.
    pub fn with_points(mut self, n: usize) -> Self {
        self.expected_points = Some(n);
        self
    }

    /// Expect this many edges.
    pub fn with_edges(mut self, n: usize) -> Self {
        self.expected_edges = Some(n);
        self
    }

    /// Expect this many faces.
    pub fn with_faces(mut self, n: usize) -> Self {
        self.expected_faces = Some(n);
        self
    }

    /// Expect this many boundary loops.
    pub fn with_boundaries(mut self, n: usize) -> Self {
        self.expected_boundaries = Some(n);
        self
    }

    /// Expect this genus.
    pub fn with_genus(mut self, g: usize) -> Self {
        self.expected_genus = Some(g);
        self
    }

    /// Count the elements of `mesh`.
    pub fn summarize<I: MeshIndex>(&self, mesh: &QuadEdgeMesh<I>) -> Result<TopologySummary> {
        let boundaries = BoundaryLocator::new().evaluate(mesh)?.len();
        Ok(TopologySummary {
            points: mesh.num_points(),
            edges: mesh.num_edges(),
            faces: mesh.num_faces(),
            boundaries,
            euler_characteristic: mesh.euler_characteristic(),
        })
    }

    /// Check `mesh` against every expectation that was set.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidState`] naming the first failed check, or
    /// [`MeshError::MalformedRing`] if boundary extraction fails.
    pub fn validate<I: MeshIndex>(&self, mesh: &QuadEdgeMesh<I>) -> Result<TopologySummary> {
        if !mesh.is_valid() {
            return Err(MeshError::InvalidState(
                "mesh connectivity is inconsistent".to_string(),
            ));
        }

        let summary = self.summarize(mesh)?;

        let checks = [
            ("points", self.expected_points, summary.points),
            ("edges", self.expected_edges, summary.edges),
            ("faces", self.expected_faces, summary.faces),
            ("boundary loops", self.expected_boundaries, summary.boundaries),
        ];
        for (what, expected, actual) in checks {
            if let Some(expected) = expected {
                if expected != actual {
                    return Err(MeshError::InvalidState(format!(
                        "expected {} {}, found {}",
                        expected, what, actual
                    )));
                }
            }
        }

        if let Some(genus) = self.expected_genus {
            let expected = 2 - 2 * genus as i64 - summary.boundaries as i64;
            if summary.euler_characteristic != expected {
                return Err(MeshError::InvalidState(format!(
                    "Euler characteristic is {}, expected {} for genus {} with {} boundaries",
                    summary.euler_characteristic, expected, genus, summary.boundaries
                )));
            }
        }

        Ok(summary)
    }
}
