//! Topological mutations of a quad-edge mesh.
//!
//! Every operation here keeps the mesh well formed: `Lnext`/`Lprev` stay
//! mutual inverses, every ring is closed, and a point on a boundary always
//! stores an outgoing edge with no face on its left.

use super::cell::{Cell, CellKind, FaceRef};
use super::index::{CellId, EdgeId, MeshIndex, PointId};
use super::quadedge::{check_capacity, QuadEdge, QuadEdgeMesh};
use crate::error::{MeshError, Result};

impl<I: MeshIndex> QuadEdgeMesh<I> {
    /// Add a polygonal face through existing points, in winding order.
    ///
    /// Edges already joining consecutive points are reused; missing edges are
    /// created. Fans of faces meeting at a point are re-linked so the new face
    /// can close the gap between them.
    ///
    /// # Errors
    ///
    /// - [`MeshError::DegenerateFace`] for fewer than three or repeated points
    /// - [`MeshError::InvalidPointId`] for an out-of-range point
    /// - [`MeshError::NonManifold`] if a point is already surrounded by faces,
    ///   or if no free gap exists to move a fan into
    /// - [`MeshError::NonManifoldEdge`] if an edge already has a face on the
    ///   side this face needs
    /// - [`MeshError::CapacityExceeded`] if the new edges or the new cell
    ///   would need ids beyond the range of `I`
    ///
    /// The mesh is unchanged when an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use quadedge::prelude::*;
    ///
    /// let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
    /// let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0)).unwrap();
    /// let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
    /// let c = mesh.add_point(Point3::new(0.0, 1.0, 0.0)).unwrap();
    /// let f = mesh.add_face(&[a, b, c]).unwrap();
    ///
    /// assert_eq!(mesh.num_faces(), 1);
    /// assert_eq!(mesh.num_edges(), 3);
    /// assert!(mesh.find_edge(a, b).is_some());
    /// assert_eq!(mesh.cell(f).unwrap().points(), &[a, b, c]);
    /// ```
    pub fn add_face(&mut self, points: &[PointId<I>]) -> Result<CellId<I>> {
        let n = points.len();
        let face_index = self.cells.len();

        if n < 3 {
            return Err(MeshError::DegenerateFace { face: face_index });
        }

        for (i, &p) in points.iter().enumerate() {
            if !self.contains_point(p) {
                return Err(MeshError::InvalidPointId(p.index()));
            }
            if points[..i].contains(&p) {
                return Err(MeshError::DegenerateFace { face: face_index });
            }
        }

        for &p in points {
            if !self.is_boundary_point(p) {
                return Err(MeshError::NonManifold {
                    details: format!("point {} is already surrounded by faces", p.index()),
                });
            }
        }

        let mut edges: Vec<EdgeId<I>> = Vec::with_capacity(n);
        let mut is_new: Vec<bool> = Vec::with_capacity(n);

        for i in 0..n {
            let (v0, v1) = (points[i], points[(i + 1) % n]);
            match self.find_edge(v0, v1) {
                Some(e) if self.is_left_set(e) => {
                    return Err(MeshError::NonManifoldEdge {
                        v0: v0.index(),
                        v1: v1.index(),
                    });
                }
                Some(e) => {
                    edges.push(e);
                    is_new.push(false);
                }
                None => {
                    edges.push(EdgeId::invalid());
                    is_new.push(true);
                }
            }
        }

        let num_new = is_new.iter().filter(|&&new| new).count();
        check_capacity::<I>("directed edges", self.edges.len() + 2 * num_new)?;
        check_capacity::<I>("cells", self.cells.len() + 1)?;

        // Links are collected first and applied once every check has passed
        let mut next_cache: Vec<(EdgeId<I>, EdgeId<I>)> = Vec::with_capacity(6 * n);

        // Move fans out of the way where two existing edges must become adjacent
        for i in 0..n {
            let ii = (i + 1) % n;
            if is_new[i] || is_new[ii] {
                continue;
            }

            let inner_prev = edges[i];
            let inner_next = edges[ii];
            if self.lnext(inner_prev) == inner_next {
                continue;
            }

            // Find a free gap around the shared point
            let outer_prev = inner_next.sym();
            let mut boundary_prev = outer_prev;
            let mut steps = 0;
            loop {
                boundary_prev = self.lnext(boundary_prev).sym();
                if !self.is_left_set(boundary_prev) {
                    break;
                }
                steps += 1;
                if steps > self.num_quad_edges() {
                    return Err(MeshError::MalformedRing {
                        edge: outer_prev.index(),
                    });
                }
            }

            if boundary_prev == inner_prev {
                return Err(MeshError::NonManifold {
                    details: format!(
                        "patch re-linking failed at point {}",
                        points[ii].index()
                    ),
                });
            }

            let boundary_next = self.lnext(boundary_prev);
            let patch_start = self.lnext(inner_prev);
            let patch_end = self.lprev(inner_next);

            next_cache.push((boundary_prev, patch_start));
            next_cache.push((patch_end, boundary_next));
            next_cache.push((inner_prev, inner_next));
        }

        // Create missing edges
        for i in 0..n {
            if is_new[i] {
                edges[i] = self.new_edge(points[i], points[(i + 1) % n]);
            }
        }

        let cell = CellId::new(face_index);
        self.cells
            .push(Some(Cell::new(CellKind::Polygon, points.to_vec(), edges[0])));

        let mut needs_adjust = vec![false; n];

        for i in 0..n {
            let ii = (i + 1) % n;
            let vh = points[ii];
            let inner_prev = edges[i];
            let inner_next = edges[ii];

            let outer_prev = inner_next.sym();
            let outer_next = inner_prev.sym();

            match (is_new[i], is_new[ii]) {
                (true, false) => {
                    let boundary_prev = self.lprev(inner_next);
                    next_cache.push((boundary_prev, outer_next));
                    self.point_mut(vh).edge = outer_next;
                    next_cache.push((inner_prev, inner_next));
                }
                (false, true) => {
                    let boundary_next = self.lnext(inner_prev);
                    next_cache.push((outer_prev, boundary_next));
                    self.point_mut(vh).edge = boundary_next;
                    next_cache.push((inner_prev, inner_next));
                }
                (true, true) => {
                    let existing = self.point(vh).edge;
                    if existing.is_valid() {
                        let boundary_next = existing;
                        let boundary_prev = self.lprev(boundary_next);
                        next_cache.push((boundary_prev, outer_next));
                        next_cache.push((outer_prev, boundary_next));
                    } else {
                        self.point_mut(vh).edge = outer_next;
                        next_cache.push((outer_prev, outer_next));
                    }
                    next_cache.push((inner_prev, inner_next));
                }
                (false, false) => {
                    needs_adjust[ii] = self.point(vh).edge == inner_next;
                }
            }

            self.set_left(edges[i], FaceRef::face(cell));
        }

        for (a, b) in next_cache {
            self.link(a, b);
        }

        for (i, &p) in points.iter().enumerate() {
            if needs_adjust[i] {
                self.adjust_point_edge(p);
            }
        }

        Ok(cell)
    }

    /// Add a lone edge from `a` to `b`, with no face on either side.
    ///
    /// Returns the existing edge if `a` and `b` are already joined in this
    /// direction (or the twin of the edge joining them the other way). The
    /// new edge is inserted into a boundary gap at each end.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidPointId`] for an out-of-range point
    /// - [`MeshError::DegenerateFace`] if `a == b`
    /// - [`MeshError::NonManifold`] if an end point is surrounded by faces
    /// - [`MeshError::CapacityExceeded`] if the pair would need ids beyond
    ///   the range of `I`
    pub fn add_edge(&mut self, a: PointId<I>, b: PointId<I>) -> Result<EdgeId<I>> {
        for p in [a, b] {
            if !self.contains_point(p) {
                return Err(MeshError::InvalidPointId(p.index()));
            }
        }
        if a == b {
            return Err(MeshError::DegenerateFace {
                face: self.cells.len(),
            });
        }
        if let Some(e) = self.find_edge(a, b) {
            return Ok(e);
        }
        for p in [a, b] {
            if !self.is_boundary_point(p) {
                return Err(MeshError::NonManifold {
                    details: format!("point {} has no free gap for a new edge", p.index()),
                });
            }
        }

        check_capacity::<I>("directed edges", self.edges.len() + 2)?;

        let e = self.new_edge(a, b);
        let t = e.sym();

        for (v, outgoing, incoming) in [(a, e, t), (b, t, e)] {
            let boundary_next = self.point(v).edge;
            if boundary_next.is_valid() {
                let boundary_prev = self.lprev(boundary_next);
                self.link(boundary_prev, outgoing);
                self.link(incoming, boundary_next);
            } else {
                self.link(incoming, outgoing);
                self.point_mut(v).edge = outgoing;
            }
        }

        Ok(e)
    }

    /// Add a cell of any kind.
    ///
    /// [`CellKind::Polygon`] cells go through [`add_face`](Self::add_face) and
    /// get a quad-edge ring. Other kinds are stored as point lists only.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidCell`] if the point count does not match the kind,
    /// [`MeshError::InvalidPointId`] for an out-of-range point,
    /// [`MeshError::CapacityExceeded`] when no cell id is left, or any error
    /// of [`add_face`](Self::add_face) for polygons.
    pub fn add_cell(&mut self, kind: CellKind, points: &[PointId<I>]) -> Result<CellId<I>> {
        let Some(expected) = kind.point_count() else {
            return self.add_face(points);
        };

        if points.len() != expected {
            return Err(MeshError::InvalidCell {
                kind,
                expected,
                got: points.len(),
            });
        }
        if let Some(&p) = points.iter().find(|&&p| !self.contains_point(p)) {
            return Err(MeshError::InvalidPointId(p.index()));
        }
        check_capacity::<I>("cells", self.cells.len() + 1)?;

        let cell = CellId::new(self.cells.len());
        self.cells
            .push(Some(Cell::new(kind, points.to_vec(), EdgeId::invalid())));
        Ok(cell)
    }

    /// Delete a cell.
    ///
    /// For a face, every ring edge loses its left face but the edges
    /// themselves are kept; the ring becomes part of a hole.
    pub fn delete_face(&mut self, c: CellId<I>) -> Result<()> {
        let cell = self
            .cell(c)
            .ok_or(MeshError::InvalidCellId(c.index()))?;
        let is_face = cell.is_face();
        let points = cell.points().to_vec();

        if is_face {
            let ring: Vec<_> = self.face_edges(c).collect();
            for e in ring {
                self.set_left(e, FaceRef::unset());
            }
        }

        self.cells[c.index()] = None;
        self.dead_cells += 1;

        if is_face {
            for p in points {
                self.adjust_point_edge(p);
            }
        }

        Ok(())
    }

    /// Remove an edge and its twin from the mesh.
    ///
    /// The faces on both sides are deleted first. The pair is then unlinked
    /// from the rings at both end points, which merges the holes on either
    /// side. Points are never removed and no id is renumbered.
    ///
    /// # Example
    ///
    /// ```
    /// use quadedge::prelude::*;
    ///
    /// let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
    /// let p: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
    ///     .iter()
    ///     .map(|&(x, y)| mesh.add_point(Point3::new(x, y, 0.0)).unwrap())
    ///     .collect();
    /// mesh.add_face(&[p[0], p[1], p[2]]).unwrap();
    /// mesh.add_face(&[p[0], p[2], p[3]]).unwrap();
    ///
    /// let diagonal = mesh.find_edge(p[0], p[2]).unwrap();
    /// mesh.light_weight_delete_edge(diagonal).unwrap();
    ///
    /// assert_eq!(mesh.num_faces(), 0);
    /// assert_eq!(mesh.num_edges(), 4);
    /// assert!(mesh.find_edge(p[0], p[2]).is_none());
    /// assert!(mesh.is_valid());
    /// ```
    pub fn light_weight_delete_edge(&mut self, e: EdgeId<I>) -> Result<()> {
        if !self.contains_edge(e) {
            return Err(MeshError::InvalidEdgeId(e.index()));
        }

        let t = e.sym();
        for side in [e, t] {
            let face = self.left(side).cell;
            if face.is_valid() {
                self.delete_face(face)?;
            }
        }

        let a = self.origin(e);
        let b = self.origin(t);

        for (v, out, inc) in [(a, e, t), (b, t, e)] {
            let next_out = self.lnext(inc);
            if next_out == out {
                self.point_mut(v).edge = EdgeId::invalid();
            } else {
                let prev_in = self.lprev(out);
                self.link(prev_in, next_out);
                if self.point(v).edge == out {
                    self.point_mut(v).edge = next_out;
                }
            }
        }

        *self.quad_edge_mut(e) = QuadEdge::default();
        *self.quad_edge_mut(t) = QuadEdge::default();
        self.dead_edges += 1;

        self.adjust_point_edge(a);
        self.adjust_point_edge(b);

        Ok(())
    }

    /// Allocate an unlinked edge pair `a -> b` / `b -> a`.
    ///
    /// Callers check the index range first.
    fn new_edge(&mut self, a: PointId<I>, b: PointId<I>) -> EdgeId<I> {
        let e = EdgeId::new(self.edges.len());
        self.edges.push(QuadEdge::new(a));
        self.edges.push(QuadEdge::new(b));
        e
    }

    /// Make `b` follow `a` around their left face.
    #[inline]
    fn link(&mut self, a: EdgeId<I>, b: EdgeId<I>) {
        self.quad_edge_mut(a).lnext = b;
        self.quad_edge_mut(b).lprev = a;
    }

    /// Point a boundary point at one of its face-less outgoing edges.
    pub(crate) fn adjust_point_edge(&mut self, p: PointId<I>) {
        let start = self.point(p).edge;
        if !start.is_valid() {
            return;
        }
        let free = self.onext_ring(start).find(|&e| !self.is_left_set(e));
        if let Some(free) = free {
            self.point_mut(p).edge = free;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn fan(order: &[usize]) -> (QuadEdgeMesh, PointId, Vec<PointId>) {
        let mut mesh = QuadEdgeMesh::new();
        let center = mesh.add_point(Point3::origin()).unwrap();
        let ring: Vec<PointId> = (0..6)
            .map(|k| {
                let angle = k as f64 * std::f64::consts::PI / 3.0;
                mesh.add_point(Point3::new(angle.cos(), angle.sin(), 0.0)).unwrap()
            })
            .collect();
        for &k in order {
            mesh.add_face(&[center, ring[k], ring[(k + 1) % 6]]).unwrap();
            assert!(mesh.is_valid(), "invalid after adding triangle {}", k);
        }
        (mesh, center, ring)
    }

    #[test]
    fn test_two_triangles_share_edge() {
        let mut mesh = QuadEdgeMesh::<u32>::new();
        let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let c = mesh.add_point(Point3::new(1.0, 1.0, 0.0)).unwrap();
        let d = mesh.add_point(Point3::new(0.0, 1.0, 0.0)).unwrap();

        let f0 = mesh.add_face(&[a, b, c]).unwrap();
        let f1 = mesh.add_face(&[a, c, d]).unwrap();

        assert_eq!(mesh.num_edges(), 5);
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_valid());

        let ac = mesh.find_edge(a, c).unwrap();
        assert_eq!(mesh.left(ac).cell, f1);
        assert_eq!(mesh.right(ac).cell, f0);
        assert!(!mesh.is_at_border(ac));

        // V - E + F for a disk
        assert_eq!(mesh.euler_characteristic(), 1);
    }

    #[test]
    fn test_add_face_errors() {
        let mut mesh = QuadEdgeMesh::<u32>::new();
        let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let c = mesh.add_point(Point3::new(0.0, 1.0, 0.0)).unwrap();

        assert!(matches!(
            mesh.add_face(&[a, b]),
            Err(MeshError::DegenerateFace { .. })
        ));
        assert!(matches!(
            mesh.add_face(&[a, b, a]),
            Err(MeshError::DegenerateFace { .. })
        ));
        assert!(matches!(
            mesh.add_face(&[a, b, PointId::new(10)]),
            Err(MeshError::InvalidPointId(10))
        ));

        mesh.add_face(&[a, b, c]).unwrap();
        assert!(matches!(
            mesh.add_face(&[a, b, c]),
            Err(MeshError::NonManifoldEdge { .. })
        ));

        // Failed insertions leave the mesh untouched
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 3);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_fan_in_order() {
        let (mesh, center, _) = fan(&[0, 1, 2, 3, 4, 5]);
        assert!(mesh.is_internal(center));
        assert_eq!(mesh.valence(center), 6);
        assert_eq!(mesh.num_edges(), 12);
        assert_eq!(mesh.euler_characteristic(), 1);
    }

    #[test]
    fn test_fan_out_of_order() {
        // Triangles 1, 3, 5 each close a gap between two existing fans
        let (mesh, center, ring) = fan(&[0, 2, 4, 1, 3, 5]);
        assert!(mesh.is_internal(center));
        assert_eq!(mesh.valence(center), 6);
        for p in ring {
            assert!(mesh.is_boundary_point(p));
            assert!(!mesh.is_left_set(mesh.point(p).edge));
        }
    }

    #[test]
    fn test_fan_requires_relink() {
        // Three separate fans; triangle 3 joins two of them and has to move
        // the third out of the gap between them first
        let (mesh, center, _) = fan(&[0, 2, 4, 3, 5, 1]);
        assert!(mesh.is_internal(center));
        assert_eq!(mesh.valence(center), 6);
    }

    #[test]
    fn test_relink_search_is_bounded() {
        let (mut mesh, center, ring) = fan(&[0, 2, 4]);
        let inner_next = mesh.find_edge(center, ring[1]).unwrap();
        let outer_prev = inner_next.sym();
        assert!(mesh.is_left_set(outer_prev));

        // Around the center the search now keeps returning to a face edge
        mesh.quad_edge_mut(outer_prev).lnext = inner_next;
        assert!(matches!(
            mesh.add_face(&[center, ring[1], ring[2]]),
            Err(MeshError::MalformedRing { .. })
        ));
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_edges(), 9);
    }

    #[test]
    fn test_surrounded_point_rejected() {
        let (mut mesh, center, ring) = fan(&[0, 1, 2, 3, 4, 5]);
        let extra = mesh.add_point(Point3::new(0.0, 0.0, 1.0)).unwrap();
        assert!(matches!(
            mesh.add_face(&[center, ring[0], extra]),
            Err(MeshError::NonManifold { .. })
        ));
        assert!(matches!(
            mesh.add_edge(center, extra),
            Err(MeshError::NonManifold { .. })
        ));
    }

    #[test]
    fn test_add_edge() {
        let mut mesh = QuadEdgeMesh::<u32>::new();
        let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let c = mesh.add_point(Point3::new(0.0, 1.0, 0.0)).unwrap();

        let ab = mesh.add_edge(a, b).unwrap();
        assert_eq!(mesh.origin(ab), a);
        assert_eq!(mesh.destination(ab), b);
        assert!(!mesh.is_left_set(ab) && !mesh.is_right_set(ab));
        assert_eq!(mesh.lnext(ab), ab.sym());
        assert!(mesh.is_valid());

        // Idempotent in both directions
        assert_eq!(mesh.add_edge(a, b).unwrap(), ab);
        assert_eq!(mesh.add_edge(b, a).unwrap(), ab.sym());
        assert_eq!(mesh.num_edges(), 1);

        // A chain, then a face over it reuses the edges
        mesh.add_edge(b, c).unwrap();
        assert_eq!(mesh.valence(b), 2);
        assert!(mesh.is_valid());

        mesh.add_face(&[a, b, c]).unwrap();
        assert_eq!(mesh.num_edges(), 3);
        assert!(mesh.is_valid());

        assert!(matches!(
            mesh.add_edge(a, a),
            Err(MeshError::DegenerateFace { .. })
        ));
    }

    #[test]
    fn test_add_edge_into_boundary_gap() {
        let mut mesh = QuadEdgeMesh::<u32>::new();
        let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let c = mesh.add_point(Point3::new(0.0, 1.0, 0.0)).unwrap();
        let d = mesh.add_point(Point3::new(-1.0, -1.0, 0.0)).unwrap();
        mesh.add_face(&[a, b, c]).unwrap();

        let ad = mesh.add_edge(a, d).unwrap();
        assert!(mesh.is_valid());
        assert_eq!(mesh.valence(a), 3);
        assert!(mesh.is_at_border(ad));
        assert!(!mesh.is_left_set(mesh.point(a).edge));
    }

    #[test]
    fn test_edge_ids_stay_in_range() {
        let mut mesh = QuadEdgeMesh::<u16>::new();
        let points: Vec<PointId<u16>> = (0..40_000)
            .map(|i| mesh.add_point(Point3::new(i as f64, 0.0, 0.0)).unwrap())
            .collect();

        // 32767 pairs use directed ids up to 65533
        for w in points.windows(2).take(32_767) {
            mesh.add_edge(w[0], w[1]).unwrap();
        }
        assert_eq!(mesh.num_quad_edges(), 65_534);

        assert!(matches!(
            mesh.add_edge(points[35_000], points[35_001]),
            Err(MeshError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            mesh.add_face(&[points[36_000], points[36_001], points[36_002]]),
            Err(MeshError::CapacityExceeded { .. })
        ));
        assert_eq!(mesh.num_quad_edges(), 65_534);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_cell() {
        let mut mesh = QuadEdgeMesh::<u32>::new();
        let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0)).unwrap();

        let line = mesh.add_cell(CellKind::Line, &[a, b]).unwrap();
        let cell = mesh.cell(line).unwrap();
        assert_eq!(cell.kind(), CellKind::Line);
        assert!(!cell.is_face());
        assert_eq!(mesh.num_cells(), 1);
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_edges(), 0);

        assert!(matches!(
            mesh.add_cell(CellKind::Tetrahedron, &[a, b]),
            Err(MeshError::InvalidCell {
                expected: 4,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_delete_face() {
        let (mut mesh, center, _) = fan(&[0, 1, 2, 3, 4, 5]);
        let f = mesh.face_ids().next().unwrap();
        mesh.delete_face(f).unwrap();

        assert_eq!(mesh.num_faces(), 5);
        assert_eq!(mesh.num_edges(), 12);
        assert!(!mesh.is_internal(center));
        assert!(mesh.is_boundary_point(center));
        assert!(mesh.is_valid());

        assert!(matches!(
            mesh.delete_face(f),
            Err(MeshError::InvalidCellId(_))
        ));
    }

    #[test]
    fn test_light_weight_delete_edge() {
        let (mut mesh, center, ring) = fan(&[0, 1, 2, 3, 4, 5]);
        let spoke = mesh.find_edge(center, ring[0]).unwrap();
        mesh.light_weight_delete_edge(spoke).unwrap();

        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_edges(), 11);
        assert_eq!(mesh.valence(center), 5);
        assert!(mesh.find_edge(center, ring[0]).is_none());
        assert!(mesh.is_boundary_point(center));
        assert!(mesh.is_valid());

        // Ids stay stable and the dead slot is skipped
        assert_eq!(mesh.num_quad_edges(), 24);
        assert_eq!(mesh.edge_ids().count(), 11);
        assert!(!mesh.contains_edge(spoke));
        assert!(matches!(
            mesh.light_weight_delete_edge(spoke),
            Err(MeshError::InvalidEdgeId(_))
        ));
    }

    #[test]
    fn test_delete_lone_edge_isolates_points() {
        let mut mesh = QuadEdgeMesh::<u32>::new();
        let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let e = mesh.add_edge(a, b).unwrap();

        mesh.light_weight_delete_edge(e).unwrap();
        assert_eq!(mesh.num_edges(), 0);
        assert!(mesh.is_isolated(a));
        assert!(mesh.is_isolated(b));
        assert!(mesh.is_valid());
    }
}
