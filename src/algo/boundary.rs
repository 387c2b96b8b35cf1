//! Boundary loop extraction.
//!
//! A boundary loop is the `Lnext` ring of a face-less directed edge. Every
//! edge of a loop has its face on the right, and consecutive edges satisfy
//! `destination(e) == origin(next)`.
//!
//! # Example
//!
//! ```
//! use quadedge::prelude::*;
//! use quadedge::algo::boundary::BoundaryLocator;
//!
//! let mut mesh: QuadEdgeMesh = triangulated_grid(4, 4).unwrap();
//! let loops = BoundaryLocator::new().evaluate(&mesh).unwrap();
//! assert_eq!(loops.len(), 1);
//! assert_eq!(loops[0].len(), 16);
//!
//! // Punch a hole
//! let e = mesh.find_edge(PointId::new(11), PointId::new(12)).unwrap();
//! mesh.light_weight_delete_edge(e).unwrap();
//! let loops = BoundaryLocator::new().evaluate(&mesh).unwrap();
//! assert_eq!(loops.len(), 2);
//! ```

use std::collections::VecDeque;

use crate::error::{MeshError, Result};
use crate::mesh::{EdgeId, MeshIndex, PointId, QuadEdgeMesh};

/// An ordered loop of border edges, each with its face on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryLoop<I: MeshIndex = u32> {
    edges: VecDeque<EdgeId<I>>,
}

impl<I: MeshIndex> BoundaryLoop<I> {
    /// The edges of the loop, in traversal order.
    pub fn edges(&self) -> &VecDeque<EdgeId<I>> {
        &self.edges
    }

    /// Number of edges left in the loop.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check whether every edge has been consumed.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Remove and return the first edge.
    pub fn pop_front(&mut self) -> Option<EdgeId<I>> {
        self.edges.pop_front()
    }

    /// The origins of the loop edges, in traversal order.
    pub fn points(&self, mesh: &QuadEdgeMesh<I>) -> Vec<PointId<I>> {
        self.edges.iter().map(|&e| mesh.origin(e)).collect()
    }
}

impl<I: MeshIndex> IntoIterator for BoundaryLoop<I> {
    type Item = EdgeId<I>;
    type IntoIter = std::collections::vec_deque::IntoIter<EdgeId<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

/// Finds every boundary loop of a mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryLocator;

impl BoundaryLocator {
    /// Create a new locator.
    pub fn new() -> Self {
        Self
    }

    /// Collect the boundary loops of `mesh`.
    ///
    /// Edges are scanned in id order; each border edge is oriented to its
    /// face-less side and its `Lnext` ring becomes one loop. Every border edge
    /// ends up in exactly one loop. Lone edges (no face on either side) are
    /// not border edges of any face and are left out.
    ///
    /// # Errors
    ///
    /// [`MeshError::MalformedRing`] if a hole ring does not close.
    pub fn evaluate<I: MeshIndex>(
        &self,
        mesh: &QuadEdgeMesh<I>,
    ) -> Result<VecDeque<BoundaryLoop<I>>> {
        let mut visited = vec![false; mesh.num_quad_edges()];
        let mut loops = VecDeque::new();

        for e in mesh.edge_ids() {
            if !mesh.is_at_border(e) {
                continue;
            }

            let start = if mesh.is_left_set(e) { e.sym() } else { e };
            if !mesh.is_right_set(start) || visited[start.index()] {
                continue;
            }

            let mut edges = VecDeque::new();
            let mut edge = start;
            let mut steps = 0;
            loop {
                visited[edge.index()] = true;
                if mesh.is_right_set(edge) {
                    edges.push_back(edge);
                }

                edge = mesh.lnext(edge);
                if edge == start {
                    break;
                }

                steps += 1;
                if steps > mesh.num_quad_edges() || !mesh.contains_edge(edge) {
                    return Err(MeshError::MalformedRing {
                        edge: start.index(),
                    });
                }
            }

            log::debug!(
                "boundary loop {} starts at {:?} with {} edges",
                loops.len(),
                start,
                edges.len()
            );
            loops.push_back(BoundaryLoop { edges });
        }

        Ok(loops)
    }
}
