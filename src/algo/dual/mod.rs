//! Dual mesh construction.
//!
//! The dual of a surface mesh has one point per primal face, one face per
//! primal point, and one edge crossing each primal edge. This module builds
//! it in three passes over a primal [`QuadEdgeMesh`]:
//!
//! 1. **Dual points**: each triangle gets its barycenter as a dual point.
//!    The dual id is written into the `left` reference of every edge of the
//!    triangle's ring, so later passes read it straight off the edges.
//! 2. **Interior dual faces**: each internal point gets the face formed by
//!    the dual points around its `Onext` ring.
//! 3. **Boundary stitching**: each boundary edge gets a midpoint dual point
//!    tied to the dual point of its face. Every wedge of faces around a
//!    boundary point gets a fan face between the midpoints of the two border
//!    edges that bound it. A point where two loops touch has two wedges and
//!    so two fans.
//!
//! The dual is itself a full [`QuadEdgeMesh`], so it can be traversed and
//! queried exactly like the primal.
//!
//! # Example
//!
//! ```
//! use quadedge::prelude::*;
//! use quadedge::algo::dual::{build_dual, DualOptions};
//!
//! let mut primal: QuadEdgeMesh = triangulated_grid(4, 4).unwrap();
//!
//! // Punch a hole between points 11 and 12
//! let e = primal.find_edge(PointId::new(11), PointId::new(12)).unwrap();
//! primal.light_weight_delete_edge(e).unwrap();
//!
//! let dual = build_dual(&mut primal, &DualOptions::default()).unwrap();
//! assert_eq!(dual.report.dual_points, 30);
//! assert_eq!(dual.report.boundary_loops, 2);
//! assert_eq!(dual.mesh.num_faces(), primal.num_points());
//! ```
//!
//! # Limitations
//!
//! Only triangles produce dual points. A polygon face with more points stops
//! pass 1 with [`MeshError::UnsupportedFaceShape`](crate::error::MeshError::UnsupportedFaceShape);
//! triangulate such input first. Volumetric cells are logged and skipped.
//!
//! The primal must not be mutated between passes.

mod builder;
mod table;

pub use builder::DualMeshBuilder;
pub use table::DualPointTable;

use crate::algo::Progress;
use crate::error::Result;
use crate::mesh::{CellId, CellKind, MeshIndex, QuadEdgeMesh};

/// Options for dual mesh construction.
#[derive(Debug, Clone)]
pub struct DualOptions {
    /// Whether to compute barycenters in parallel (default: true).
    ///
    /// Dual points are still inserted in cell id order, so the output does
    /// not depend on this flag.
    pub parallel: bool,

    /// Whether to run boundary stitching (default: true).
    ///
    /// Without it, the dual has no faces for boundary points.
    pub stitch_boundaries: bool,
}

impl Default for DualOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            stitch_boundaries: true,
        }
    }
}

impl DualOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set whether to stitch boundary loops.
    pub fn with_stitch_boundaries(mut self, stitch: bool) -> Self {
        self.stitch_boundaries = stitch;
        self
    }
}

/// What a dual construction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualReport<I: MeshIndex = u32> {
    /// Dual points created from primal faces.
    pub dual_points: usize,

    /// Dual faces created for internal primal points.
    pub interior_faces: usize,

    /// Boundary loops consumed by stitching.
    pub boundary_loops: usize,

    /// Midpoint dual points, one per boundary edge.
    pub midpoints: usize,

    /// Fan faces created for wedges around boundary points, closing faces included.
    pub fan_faces: usize,

    /// Fan faces that close a boundary loop, one per loop.
    pub closing_faces: usize,

    /// Dual edges added along boundaries (midpoint spokes and the midpoint chain).
    pub boundary_edges: usize,

    /// Cells skipped because their kind has no dual.
    pub unhandled_cells: Vec<(CellId<I>, CellKind)>,
}

impl<I: MeshIndex> Default for DualReport<I> {
    fn default() -> Self {
        Self {
            dual_points: 0,
            interior_faces: 0,
            boundary_loops: 0,
            midpoints: 0,
            fan_faces: 0,
            closing_faces: 0,
            boundary_edges: 0,
            unhandled_cells: Vec::new(),
        }
    }
}

/// The result of dual construction.
#[derive(Debug, Clone)]
pub struct DualMesh<I: MeshIndex = u32> {
    /// The dual mesh.
    pub mesh: QuadEdgeMesh<I>,

    /// Primal face to dual point lookup.
    pub table: DualPointTable<I>,

    /// Counts of what each pass produced.
    pub report: DualReport<I>,
}

/// Build the dual of `primal`.
///
/// Pass 1 annotates the `left` references of the primal edges with dual
/// point ids, so the primal is borrowed mutably. Its topology is not changed.
///
/// # Errors
///
/// Any error raised by one of the three passes; see [`DualMeshBuilder`].
pub fn build_dual<I: MeshIndex>(
    primal: &mut QuadEdgeMesh<I>,
    options: &DualOptions,
) -> Result<DualMesh<I>> {
    let mut builder = DualMeshBuilder::new(primal, options.clone());
    builder.run()?;
    Ok(builder.finish())
}

/// Build the dual of `primal` with progress reporting.
///
/// Reports one step per pass.
pub fn build_dual_with_progress<I: MeshIndex>(
    primal: &mut QuadEdgeMesh<I>,
    options: &DualOptions,
    progress: &Progress,
) -> Result<DualMesh<I>> {
    let mut builder = DualMeshBuilder::new(primal, options.clone());

    progress.report(0, 3, "Generating dual points");
    builder.generate_dual_points()?;

    progress.report(1, 3, "Generating interior dual faces");
    builder.generate_dual_faces()?;

    progress.report(2, 3, "Stitching boundaries");
    builder.stitch_boundaries()?;

    progress.report(3, 3, "Dual mesh complete");
    Ok(builder.finish())
}
