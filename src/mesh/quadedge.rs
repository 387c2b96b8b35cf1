//! Quad-edge mesh data structure.
//!
//! This module provides a quad-edge representation for 2-manifold surface
//! meshes with boundaries. Every undirected edge is stored as a pair of
//! directed [`QuadEdge`] records, and each record carries the two rings the
//! quad-edge algebra is built on.
//!
//! # Structure
//!
//! - Edges are allocated in symmetric pairs: the twin of `e` is `e ^ 1`
//! - Each directed edge knows its **origin**, its **Lnext** and **Lprev**
//!   (next/previous edge around its left face) and a [`FaceRef`] for the
//!   **left** face
//! - **Onext** (next edge counter-clockwise around the origin) is derived as
//!   `Sym(Lprev(e))`, **Right** as `Left(Sym(e))`
//! - Each point stores one outgoing edge
//! - Each face stores its point list (winding order) and one ring edge
//!
//! # Boundary Handling
//!
//! A directed edge with no face on its left belongs to a hole. Hole edges are
//! linked by `Lnext` exactly like face edges, so a boundary loop is simply the
//! `Lnext` ring of a face-less edge. A point on a boundary always stores a
//! face-less outgoing edge, which makes [`QuadEdgeMesh::is_boundary_point`] O(1).

use nalgebra::{Point3, Vector3};

use super::cell::{Cell, FaceRef};
use super::index::{CellId, EdgeId, MeshIndex, PointId};
use crate::error::{MeshError, Result};

/// A point (vertex) in the quad-edge mesh.
#[derive(Debug, Clone)]
pub struct Point<I: MeshIndex = u32> {
    /// The 3D position of this point.
    pub position: Point3<f64>,

    /// One outgoing edge from this point.
    /// For boundary points, this is guaranteed to have no face on its left.
    pub edge: EdgeId<I>,
}

impl<I: MeshIndex> Point<I> {
    /// Create a new, isolated point at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            edge: EdgeId::invalid(),
        }
    }

    /// Create a new point from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// A directed edge record.
#[derive(Debug, Clone, Copy)]
pub struct QuadEdge<I: MeshIndex = u32> {
    /// The point this edge originates from.
    pub origin: PointId<I>,

    /// The next edge around the left face (counter-clockwise).
    pub lnext: EdgeId<I>,

    /// The previous edge around the left face.
    pub lprev: EdgeId<I>,

    /// The face on the left, and its dual point once computed.
    pub left: FaceRef<I>,
}

impl<I: MeshIndex> QuadEdge<I> {
    /// Create a new unlinked edge leaving `origin`.
    pub fn new(origin: PointId<I>) -> Self {
        Self {
            origin,
            lnext: EdgeId::invalid(),
            lprev: EdgeId::invalid(),
            left: FaceRef::unset(),
        }
    }

    /// Whether this record has been deleted.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        !self.origin.is_valid()
    }
}

impl<I: MeshIndex> Default for QuadEdge<I> {
    fn default() -> Self {
        Self::new(PointId::invalid())
    }
}

/// A quad-edge mesh of a 2-manifold surface, possibly with boundaries.
///
/// Points, edges and cells are stored in arenas indexed by dense ids.
/// Ids are assigned in insertion order and never reused; deleted edges and
/// cells leave a dead slot behind.
#[derive(Debug, Clone)]
pub struct QuadEdgeMesh<I: MeshIndex = u32> {
    /// All points in the mesh.
    pub(crate) points: Vec<Point<I>>,

    /// All directed edges, in symmetric pairs.
    pub(crate) edges: Vec<QuadEdge<I>>,

    /// All cells; `None` marks a deleted cell.
    pub(crate) cells: Vec<Option<Cell<I>>>,

    /// Number of deleted edge pairs.
    pub(crate) dead_edges: usize,

    /// Number of deleted cells.
    pub(crate) dead_cells: usize,
}

impl<I: MeshIndex> Default for QuadEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> QuadEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            edges: Vec::new(),
            cells: Vec::new(),
            dead_edges: 0,
            dead_cells: 0,
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_points: usize, num_faces: usize) -> Self {
        // Closed triangle mesh: E = 3F/2, two records per edge
        let num_quad_edges = num_faces * 3 + num_faces / 2;

        Self {
            points: Vec::with_capacity(num_points),
            edges: Vec::with_capacity(num_quad_edges),
            cells: Vec::with_capacity(num_faces),
            dead_edges: 0,
            dead_cells: 0,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Get the number of live undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len() / 2 - self.dead_edges
    }

    /// Get the size of the directed edge arena (live and deleted records).
    ///
    /// This is also the upper bound on the length of any ring.
    #[inline]
    pub fn num_quad_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of live cells of any kind.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len() - self.dead_cells
    }

    /// Get the number of live faces (cells with a quad-edge ring).
    pub fn num_faces(&self) -> usize {
        self.cells().filter(|(_, c)| c.is_face()).count()
    }

    /// Get a point by ID.
    #[inline]
    pub fn point(&self, id: PointId<I>) -> &Point<I> {
        &self.points[id.index()]
    }

    /// Get a mutable point by ID.
    #[inline]
    pub(crate) fn point_mut(&mut self, id: PointId<I>) -> &mut Point<I> {
        &mut self.points[id.index()]
    }

    /// Get a directed edge record by ID.
    #[inline]
    pub fn quad_edge(&self, id: EdgeId<I>) -> &QuadEdge<I> {
        &self.edges[id.index()]
    }

    /// Get a mutable directed edge record by ID.
    #[inline]
    pub(crate) fn quad_edge_mut(&mut self, id: EdgeId<I>) -> &mut QuadEdge<I> {
        &mut self.edges[id.index()]
    }

    /// Get a cell by ID, or `None` if it was deleted or never existed.
    #[inline]
    pub fn cell(&self, id: CellId<I>) -> Option<&Cell<I>> {
        self.cells.get(id.index()).and_then(Option::as_ref)
    }

    /// Get the position of a point.
    #[inline]
    pub fn position(&self, p: PointId<I>) -> &Point3<f64> {
        &self.point(p).position
    }

    /// Set the position of a point.
    #[inline]
    pub fn set_position(&mut self, p: PointId<I>, pos: Point3<f64>) {
        self.point_mut(p).position = pos;
    }

    /// Check whether `id` names a live point.
    #[inline]
    pub fn contains_point(&self, id: PointId<I>) -> bool {
        id.is_valid() && id.index() < self.points.len()
    }

    /// Check whether `id` names a live directed edge.
    #[inline]
    pub fn contains_edge(&self, id: EdgeId<I>) -> bool {
        id.is_valid() && id.index() < self.edges.len() && !self.quad_edge(id).is_deleted()
    }

    // ==================== Quad-edge navigation ====================

    /// The same undirected edge, opposite direction.
    #[inline]
    pub fn sym(&self, e: EdgeId<I>) -> EdgeId<I> {
        e.sym()
    }

    /// Get the origin point of an edge.
    #[inline]
    pub fn origin(&self, e: EdgeId<I>) -> PointId<I> {
        self.quad_edge(e).origin
    }

    /// Get the destination point of an edge.
    #[inline]
    pub fn destination(&self, e: EdgeId<I>) -> PointId<I> {
        self.origin(e.sym())
    }

    /// Get the next edge around the left face.
    #[inline]
    pub fn lnext(&self, e: EdgeId<I>) -> EdgeId<I> {
        self.quad_edge(e).lnext
    }

    /// Get the previous edge around the left face.
    #[inline]
    pub fn lprev(&self, e: EdgeId<I>) -> EdgeId<I> {
        self.quad_edge(e).lprev
    }

    /// Get the next edge counter-clockwise around the origin.
    #[inline]
    pub fn onext(&self, e: EdgeId<I>) -> EdgeId<I> {
        self.lprev(e).sym()
    }

    /// Get the next edge clockwise around the origin.
    #[inline]
    pub fn oprev(&self, e: EdgeId<I>) -> EdgeId<I> {
        self.lnext(e.sym())
    }

    /// Get the face reference on the left of an edge.
    #[inline]
    pub fn left(&self, e: EdgeId<I>) -> FaceRef<I> {
        self.quad_edge(e).left
    }

    /// Get the face reference on the right of an edge.
    #[inline]
    pub fn right(&self, e: EdgeId<I>) -> FaceRef<I> {
        self.left(e.sym())
    }

    /// Overwrite the face reference on the left of an edge.
    #[inline]
    pub fn set_left(&mut self, e: EdgeId<I>, face: FaceRef<I>) {
        self.quad_edge_mut(e).left = face;
    }

    /// Overwrite the face reference on the right of an edge.
    #[inline]
    pub fn set_right(&mut self, e: EdgeId<I>, face: FaceRef<I>) {
        self.quad_edge_mut(e.sym()).left = face;
    }

    /// Check if an edge has a face on its left.
    #[inline]
    pub fn is_left_set(&self, e: EdgeId<I>) -> bool {
        self.left(e).is_set()
    }

    /// Check if an edge has a face on its right.
    #[inline]
    pub fn is_right_set(&self, e: EdgeId<I>) -> bool {
        self.right(e).is_set()
    }

    /// Check if an edge lacks a face on at least one side.
    #[inline]
    pub fn is_at_border(&self, e: EdgeId<I>) -> bool {
        !self.is_left_set(e) || !self.is_right_set(e)
    }

    /// Check if a point has no edges.
    #[inline]
    pub fn is_isolated(&self, p: PointId<I>) -> bool {
        !self.point(p).edge.is_valid()
    }

    /// Check if a point is on a boundary (or isolated).
    ///
    /// Relies on boundary points storing a face-less outgoing edge.
    #[inline]
    pub fn is_boundary_point(&self, p: PointId<I>) -> bool {
        let e = self.point(p).edge;
        !e.is_valid() || !self.is_left_set(e)
    }

    /// Check if a point is internal: it has edges and none of them is at the border.
    pub fn is_internal(&self, p: PointId<I>) -> bool {
        let start = self.point(p).edge;
        if !start.is_valid() {
            return false;
        }
        self.onext_ring(start).all(|e| !self.is_at_border(e))
    }

    /// Find the directed edge from `origin` to `destination`.
    pub fn find_edge(&self, origin: PointId<I>, destination: PointId<I>) -> Option<EdgeId<I>> {
        let start = self.point(origin).edge;
        if !start.is_valid() {
            return None;
        }
        self.onext_ring(start)
            .find(|&e| self.destination(e) == destination)
    }

    // ==================== Iteration ====================

    /// Iterate over all point IDs.
    pub fn point_ids(&self) -> impl Iterator<Item = PointId<I>> + '_ {
        (0..self.points.len()).map(|i| PointId::new(i))
    }

    /// Iterate over all points with their IDs.
    pub fn points(&self) -> impl Iterator<Item = (PointId<I>, &Point<I>)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (PointId::new(i), p))
    }

    /// Iterate over live undirected edges, each as its even directed record.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len())
            .step_by(2)
            .filter(move |&i| !self.edges[i].is_deleted())
            .map(|i| EdgeId::new(i))
    }

    /// Iterate over all live directed edges.
    pub fn quad_edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len())
            .filter(move |&i| !self.edges[i].is_deleted())
            .map(|i| EdgeId::new(i))
    }

    /// Iterate over live cell IDs.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId<I>> + '_ {
        self.cells().map(|(id, _)| id)
    }

    /// Iterate over live cells with their IDs, in id order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId<I>, &Cell<I>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (CellId::new(i), c)))
    }

    /// Iterate over live face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = CellId<I>> + '_ {
        self.cells()
            .filter(|(_, c)| c.is_face())
            .map(|(id, _)| id)
    }

    /// Iterate over the Onext ring that contains `start`.
    pub fn onext_ring(&self, start: EdgeId<I>) -> OnextIter<'_, I> {
        OnextIter::new(self, start)
    }

    /// Iterate over the Lnext ring that contains `start`.
    pub fn lnext_ring(&self, start: EdgeId<I>) -> LnextIter<'_, I> {
        LnextIter::new(self, start)
    }

    /// Iterate over the outgoing edges of a point, counter-clockwise.
    pub fn point_edges(&self, p: PointId<I>) -> OnextIter<'_, I> {
        OnextIter::new(self, self.point(p).edge)
    }

    /// Iterate over points adjacent to a point.
    pub fn point_neighbors(&self, p: PointId<I>) -> impl Iterator<Item = PointId<I>> + '_ {
        self.point_edges(p).map(move |e| self.destination(e))
    }

    /// Iterate over the ring edges of a face, starting at its first point.
    pub fn face_edges(&self, f: CellId<I>) -> LnextIter<'_, I> {
        let start = self.cell(f).map(|c| c.edge).unwrap_or_default();
        LnextIter::new(self, start)
    }

    // ==================== Geometry ====================

    /// Compute the length of an edge.
    pub fn edge_length(&self, e: EdgeId<I>) -> f64 {
        self.edge_vector(e).norm()
    }

    /// Compute the edge vector (from origin to destination).
    pub fn edge_vector(&self, e: EdgeId<I>) -> Vector3<f64> {
        let p0 = self.position(self.origin(e));
        let p1 = self.position(self.destination(e));
        p1 - p0
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, e: EdgeId<I>) -> Point3<f64> {
        let p0 = self.position(self.origin(e));
        let p1 = self.position(self.destination(e));
        Point3::from((p0.coords + p1.coords) * 0.5)
    }

    /// Compute the barycenter (unweighted mean of the points) of a cell.
    ///
    /// Returns `None` for deleted or empty cells.
    pub fn cell_barycenter(&self, c: CellId<I>) -> Option<Point3<f64>> {
        let cell = self.cell(c)?;
        if cell.num_points() == 0 {
            return None;
        }
        let sum: Vector3<f64> = cell
            .points()
            .iter()
            .map(|&p| self.position(p).coords)
            .sum();
        Some(Point3::from(sum / cell.num_points() as f64))
    }

    /// Compute the valence (degree) of a point.
    pub fn valence(&self, p: PointId<I>) -> usize {
        self.point_edges(p).count()
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min = self.points[0].position;
        let mut max = self.points[0].position;

        for p in &self.points {
            for i in 0..3 {
                min[i] = min[i].min(p.position[i]);
                max[i] = max[i].max(p.position[i]);
            }
        }

        Some((min, max))
    }

    /// Compute `V - E + F` over all points, live edges and live faces.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_points() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    // ==================== Construction ====================

    /// Append a new isolated point and return its ID (the current point count).
    ///
    /// # Errors
    ///
    /// [`MeshError::CapacityExceeded`] once every id of `I` is taken.
    pub fn add_point(&mut self, position: Point3<f64>) -> Result<PointId<I>> {
        check_capacity::<I>("points", self.points.len() + 1)?;
        let id = PointId::new(self.points.len());
        self.points.push(Point::new(position));
        Ok(id)
    }

    /// Insert a point at `id`.
    ///
    /// An existing point keeps its topology and only moves; `id` equal to the
    /// point count appends. Any other id is rejected to keep ids dense.
    pub fn set_point(&mut self, id: PointId<I>, position: Point3<f64>) -> Result<()> {
        let index = id.index();
        if !id.is_valid() || index > self.points.len() {
            return Err(MeshError::InvalidPointId(index));
        }
        if index == self.points.len() {
            self.add_point(position)?;
        } else {
            self.set_position(id, position);
        }
        Ok(())
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        // Check points
        for (pid, p) in self.points() {
            if p.edge.is_valid() {
                if !self.contains_edge(p.edge) || self.origin(p.edge) != pid {
                    return false;
                }
                // Boundary points must expose a face-less edge
                if self.is_left_set(p.edge) && !self.is_internal(pid) {
                    return false;
                }
            }
        }

        // Check edges
        for e in self.quad_edge_ids() {
            let qe = self.quad_edge(e);
            if !self.contains_edge(qe.lnext) || !self.contains_edge(qe.lprev) {
                return false;
            }

            // Next/prev consistency
            if self.lprev(qe.lnext) != e || self.lnext(qe.lprev) != e {
                return false;
            }

            // Lnext continues from the destination
            if self.origin(qe.lnext) != self.destination(e) {
                return false;
            }

            // A ring shares one left face
            if self.left(qe.lnext).cell != qe.left.cell {
                return false;
            }

            if qe.left.is_set() && self.cell(qe.left.cell).is_none() {
                return false;
            }
        }

        // Check faces against their point lists
        for (fid, f) in self.cells() {
            if !f.is_face() {
                continue;
            }
            if !self.contains_edge(f.edge) {
                return false;
            }
            let ring: Vec<_> = self.lnext_ring(f.edge).collect();
            if ring.len() != f.num_points() {
                return false;
            }
            for (&e, &p) in ring.iter().zip(f.points()) {
                if self.origin(e) != p || self.left(e).cell != fid {
                    return false;
                }
            }
        }

        true
    }
}

/// Fail if an arena of `len` entries would need ids beyond `I::MAX`.
pub(crate) fn check_capacity<I: MeshIndex>(element: &'static str, len: usize) -> Result<()> {
    let limit = I::MAX.to_usize().saturating_add(1);
    if len > limit {
        return Err(MeshError::CapacityExceeded { element, limit });
    }
    Ok(())
}

/// Iterator over the Onext ring of an edge (edges sharing its origin).
///
/// Stops after [`QuadEdgeMesh::num_quad_edges`] steps even if the ring never
/// closes, so a corrupted mesh cannot hang a traversal.
pub struct OnextIter<'a, I: MeshIndex = u32> {
    mesh: &'a QuadEdgeMesh<I>,
    start: EdgeId<I>,
    current: EdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> OnextIter<'a, I> {
    fn new(mesh: &'a QuadEdgeMesh<I>, start: EdgeId<I>) -> Self {
        Self {
            mesh,
            start,
            current: start,
            remaining: if start.is_valid() { mesh.num_quad_edges() } else { 0 },
        }
    }
}

impl<'a, I: MeshIndex> Iterator for OnextIter<'a, I> {
    type Item = EdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.onext(self.current);
        self.remaining -= 1;

        if self.current == self.start || !self.mesh.contains_edge(self.current) {
            self.remaining = 0;
        }

        Some(result)
    }
}

/// Iterator over the Lnext ring of an edge (edges bounding its left face or hole).
///
/// Bounded the same way as [`OnextIter`].
pub struct LnextIter<'a, I: MeshIndex = u32> {
    mesh: &'a QuadEdgeMesh<I>,
    start: EdgeId<I>,
    current: EdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> LnextIter<'a, I> {
    fn new(mesh: &'a QuadEdgeMesh<I>, start: EdgeId<I>) -> Self {
        Self {
            mesh,
            start,
            current: start,
            remaining: if start.is_valid() { mesh.num_quad_edges() } else { 0 },
        }
    }
}

impl<'a, I: MeshIndex> Iterator for LnextIter<'a, I> {
    type Item = EdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.lnext(self.current);
        self.remaining -= 1;

        if self.current == self.start || !self.mesh.contains_edge(self.current) {
            self.remaining = 0;
        }

        Some(result)
    }
}
