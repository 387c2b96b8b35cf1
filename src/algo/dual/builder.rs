//! The three-pass dual mesh builder.

use nalgebra::Point3;
use rayon::prelude::*;

use super::{DualMesh, DualOptions, DualPointTable, DualReport};
use crate::algo::boundary::BoundaryLocator;
use crate::error::{MeshError, Result};
use crate::mesh::{CellId, CellKind, EdgeId, FaceRef, MeshIndex, PointId, QuadEdgeMesh};

/// Where a builder is in its pass sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Created,
    DualPoints,
    DualFaces,
    Stitched,
    Aborted,
}

/// Builds the dual of a primal mesh one pass at a time.
///
/// Passes must run in order: [`generate_dual_points`](Self::generate_dual_points),
/// [`generate_dual_faces`](Self::generate_dual_faces), then
/// [`stitch_boundaries`](Self::stitch_boundaries). [`run`](Self::run) chains
/// all three. A failed pass leaves whatever it produced so far in place and
/// refuses any further pass; [`finish`](Self::finish) still hands it back.
///
/// The builder holds the primal mutably for its whole life, so the primal
/// cannot change between passes.
#[derive(Debug)]
pub struct DualMeshBuilder<'a, I: MeshIndex = u32> {
    primal: &'a mut QuadEdgeMesh<I>,
    dual: QuadEdgeMesh<I>,
    table: DualPointTable<I>,
    report: DualReport<I>,
    options: DualOptions,
    stage: Stage,
}

impl<'a, I: MeshIndex> DualMeshBuilder<'a, I> {
    /// Create a builder over `primal` with an empty dual.
    pub fn new(primal: &'a mut QuadEdgeMesh<I>, options: DualOptions) -> Self {
        let num_faces = primal.num_faces();
        let num_points = primal.num_points();

        Self {
            dual: QuadEdgeMesh::with_capacity(num_faces, num_points),
            table: DualPointTable::with_capacity(num_faces),
            report: DualReport::default(),
            primal,
            options,
            stage: Stage::Created,
        }
    }

    /// The dual built so far.
    pub fn dual(&self) -> &QuadEdgeMesh<I> {
        &self.dual
    }

    /// The primal face to dual point lookup built so far.
    pub fn table(&self) -> &DualPointTable<I> {
        &self.table
    }

    /// Counts of what the passes produced so far.
    pub fn report(&self) -> &DualReport<I> {
        &self.report
    }

    /// Run all three passes.
    pub fn run(&mut self) -> Result<()> {
        self.generate_dual_points()?;
        self.generate_dual_faces()?;
        self.stitch_boundaries()
    }

    /// Consume the builder and return the dual, its lookup table and report.
    pub fn finish(self) -> DualMesh<I> {
        DualMesh {
            mesh: self.dual,
            table: self.table,
            report: self.report,
        }
    }

    /// Pass 1: create one dual point per triangle.
    ///
    /// The dual point is the barycenter of the triangle. Its id is recorded in
    /// the table and written into the `left` reference of every ring edge.
    /// Cells are visited in id order. Non-face cells are skipped; volumetric
    /// cells are also logged and listed in the report.
    ///
    /// # Errors
    ///
    /// [`MeshError::UnsupportedFaceShape`] at the first polygon with more than
    /// three points. Triangles before it keep their dual points.
    pub fn generate_dual_points(&mut self) -> Result<()> {
        self.advance(Stage::Created, Stage::DualPoints, "dual point generation", |b| {
            b.dual_points_pass()
        })
    }

    /// Pass 2: create one dual face per internal primal point.
    ///
    /// The face lists the dual points of the faces around the point, in
    /// `Onext` order. Boundary points are left for stitching.
    ///
    /// # Errors
    ///
    /// [`MeshError::MissingDualPoint`] if a face around an internal point has
    /// no dual point, [`MeshError::MalformedRing`] if a ring does not close.
    pub fn generate_dual_faces(&mut self) -> Result<()> {
        self.advance(Stage::DualPoints, Stage::DualFaces, "dual face generation", |b| {
            b.dual_faces_pass()
        })
    }

    /// Pass 3: close the dual around every boundary loop.
    ///
    /// Each boundary edge gets a midpoint dual point joined to the dual point
    /// of its face. Each wedge of faces around a boundary point gets a fan
    /// face from the midpoint of the border edge opening the wedge, through
    /// the dual points of its faces, to the midpoint of the border edge
    /// closing it. A point shared by two loops has two wedges and gets two
    /// fans. The fan of the loop's first point is emitted last and closes the
    /// loop.
    ///
    /// Does nothing beyond advancing the stage when
    /// [`DualOptions::stitch_boundaries`] is off.
    pub fn stitch_boundaries(&mut self) -> Result<()> {
        self.advance(Stage::DualFaces, Stage::Stitched, "boundary stitching", |b| {
            b.stitch_pass()
        })
    }

    fn advance(
        &mut self,
        from: Stage,
        to: Stage,
        name: &str,
        pass: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        if self.stage != from {
            return Err(MeshError::InvalidState(format!(
                "{} cannot run in stage {:?} (expected {:?})",
                name, self.stage, from
            )));
        }

        match pass(self) {
            Ok(()) => {
                self.stage = to;
                Ok(())
            }
            Err(e) => {
                self.stage = Stage::Aborted;
                Err(e)
            }
        }
    }

    fn dual_points_pass(&mut self) -> Result<()> {
        let mut plan: Vec<CellId<I>> = Vec::new();
        let mut unsupported = None;

        for (id, cell) in self.primal.cells() {
            match cell.kind() {
                CellKind::Vertex
                | CellKind::Line
                | CellKind::Triangle
                | CellKind::Quadrilateral
                | CellKind::QuadraticEdge
                | CellKind::QuadraticTriangle => {}
                CellKind::Polygon if cell.num_points() > 3 => {
                    unsupported = Some((id, cell.num_points()));
                    break;
                }
                CellKind::Polygon => {
                    if cell.is_face() {
                        plan.push(id);
                    }
                }
                CellKind::Tetrahedron | CellKind::Hexahedron => {
                    log::warn!(
                        "cell {} is a {:?}; volumetric cells have no surface dual, skipping",
                        id.index(),
                        cell.kind()
                    );
                    self.report.unhandled_cells.push((id, cell.kind()));
                }
            }
        }

        // Barycenters are read-only; insertion below stays in cell id order
        let primal = &*self.primal;
        let centers: Vec<Option<Point3<f64>>> = if self.options.parallel {
            plan.par_iter().map(|&c| primal.cell_barycenter(c)).collect()
        } else {
            plan.iter().map(|&c| primal.cell_barycenter(c)).collect()
        };

        for (&cell, center) in plan.iter().zip(centers) {
            let center = center.ok_or(MeshError::InvalidCellId(cell.index()))?;

            let ring: Vec<EdgeId<I>> = self.primal.face_edges(cell).collect();
            let expected = self.primal.cell(cell).map_or(0, |c| c.num_points());
            if ring.len() != expected {
                return Err(MeshError::MalformedRing {
                    edge: ring.first().map_or(usize::MAX, |e| e.index()),
                });
            }

            let dual_point = self.dual.add_point(center)?;
            self.table.insert(cell, dual_point);
            for e in ring {
                self.primal.set_left(e, FaceRef::new(cell, dual_point));
            }
            self.report.dual_points += 1;
        }

        if let Some((cell, points)) = unsupported {
            log::warn!(
                "cell {} has {} points; dual point generation only handles triangles and stops here ({} dual points kept)",
                cell.index(),
                points,
                self.report.dual_points
            );
            return Err(MeshError::UnsupportedFaceShape {
                cell: cell.index(),
                points,
            });
        }

        log::debug!("generated {} dual points", self.report.dual_points);
        Ok(())
    }

    fn dual_faces_pass(&mut self) -> Result<()> {
        let primal = &*self.primal;

        for p in primal.point_ids() {
            if !primal.is_internal(p) {
                continue;
            }
            let face = onext_dual_points(primal, primal.point(p).edge)?;
            self.dual.add_face(&face)?;
            self.report.interior_faces += 1;
        }

        log::debug!("generated {} interior dual faces", self.report.interior_faces);
        Ok(())
    }

    fn stitch_pass(&mut self) -> Result<()> {
        if !self.options.stitch_boundaries {
            log::debug!("boundary stitching disabled");
            return Ok(());
        }

        let primal = &*self.primal;
        let mut loops = BoundaryLocator::new().evaluate(primal)?;
        self.report.boundary_loops = loops.len();

        // A wedge at a point shared by two loops ends on an edge of the other
        // loop, so every midpoint exists before the first fan
        let mut midpoints = vec![PointId::invalid(); primal.num_quad_edges()];
        for boundary in &loops {
            for &edge in boundary.edges() {
                midpoints[edge.index()] = self.dual.add_point(primal.edge_midpoint(edge))?;
                self.report.midpoints += 1;
            }
        }

        while let Some(boundary) = loops.pop_front() {
            let edges: Vec<EdgeId<I>> = boundary.into_iter().collect();
            let num_edges = edges.len();

            // The fan of the first edge comes last and closes the loop
            for k in 0..=num_edges {
                if let Some(&edge) = edges.get(k) {
                    let mid = midpoint(&midpoints, edge, edge)?;
                    let face_point = right_dual_point(primal, edge)?;
                    self.dual.add_edge(mid, face_point)?;
                    self.report.boundary_edges += 1;
                }
                if k == 0 {
                    continue;
                }

                let fan = fan_face(primal, edges[k % num_edges], &midpoints)?;
                let (first, last) = (fan[0], fan[fan.len() - 1]);
                if first != last {
                    self.dual.add_edge(first, last)?;
                    self.report.boundary_edges += 1;
                }
                self.dual.add_face(&fan)?;
                self.report.fan_faces += 1;
                if k == num_edges {
                    self.report.closing_faces += 1;
                }
            }

            log::debug!(
                "stitched boundary loop of {} edges ({} loops left)",
                num_edges,
                loops.len()
            );
        }

        Ok(())
    }
}

fn dual_point<I: MeshIndex>(face: FaceRef<I>, e: EdgeId<I>) -> Result<PointId<I>> {
    face.dual_point().ok_or(MeshError::MissingDualPoint {
        cell: if face.is_set() {
            face.cell.index()
        } else {
            usize::MAX
        },
        edge: e.index(),
    })
}

fn left_dual_point<I: MeshIndex>(mesh: &QuadEdgeMesh<I>, e: EdgeId<I>) -> Result<PointId<I>> {
    dual_point(mesh.left(e), e)
}

fn right_dual_point<I: MeshIndex>(mesh: &QuadEdgeMesh<I>, e: EdgeId<I>) -> Result<PointId<I>> {
    dual_point(mesh.right(e), e.sym())
}

/// Dual points of the faces around the origin of `start`, in `Onext` order.
fn onext_dual_points<I: MeshIndex>(
    mesh: &QuadEdgeMesh<I>,
    start: EdgeId<I>,
) -> Result<Vec<PointId<I>>> {
    let mut points = Vec::new();
    let mut e = start;
    loop {
        points.push(left_dual_point(mesh, e)?);
        e = mesh.onext(e);
        if e == start {
            return Ok(points);
        }
        if points.len() > mesh.num_quad_edges() || !mesh.contains_edge(e) {
            return Err(MeshError::MalformedRing {
                edge: start.index(),
            });
        }
    }
}

/// The dual point made for the midpoint of boundary edge `e`.
fn midpoint<I: MeshIndex>(
    midpoints: &[PointId<I>],
    e: EdgeId<I>,
    from: EdgeId<I>,
) -> Result<PointId<I>> {
    midpoints
        .get(e.index())
        .copied()
        .filter(|p| p.is_valid())
        .ok_or(MeshError::MalformedRing { edge: from.index() })
}

/// Fan face of the wedge that follows the hole on the left of `edge`.
///
/// Walks `Onext` from `edge` past any lone edges to the first face, then
/// through the faces of the wedge until the next border edge. The face runs
/// from the midpoint of the border edge opening the wedge, through the dual
/// points of its faces, to the midpoint of the border edge closing it. Where
/// two loops share a point these two edges belong to different loops.
fn fan_face<I: MeshIndex>(
    mesh: &QuadEdgeMesh<I>,
    edge: EdgeId<I>,
    midpoints: &[PointId<I>],
) -> Result<Vec<PointId<I>>> {
    let malformed = || MeshError::MalformedRing {
        edge: edge.index(),
    };
    let limit = mesh.num_quad_edges();
    let mut steps = 0;

    let mut e = mesh.onext(edge);
    loop {
        if !mesh.contains_edge(e) || steps > limit {
            return Err(malformed());
        }
        if mesh.is_left_set(e) {
            break;
        }
        e = mesh.onext(e);
        steps += 1;
    }

    let mut face = vec![midpoint(midpoints, e.sym(), edge)?];
    loop {
        face.push(left_dual_point(mesh, e)?);
        e = mesh.onext(e);
        steps += 1;
        if !mesh.contains_edge(e) || steps > limit {
            return Err(malformed());
        }
        if mesh.is_at_border(e) {
            break;
        }
    }
    face.push(midpoint(midpoints, e, edge)?);
    Ok(face)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::algo::dual::{build_dual, build_dual_with_progress};
    use crate::algo::Progress;
    use crate::mesh::{
        build_from_polygons, build_from_triangles, to_face_vertex, triangulated_grid, Cell,
    };

    fn tetrahedron() -> QuadEdgeMesh {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        build_from_triangles(&points, &faces).unwrap()
    }

    fn octahedron() -> QuadEdgeMesh {
        let points = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ];
        let faces = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];
        build_from_triangles(&points, &faces).unwrap()
    }

    fn grid_with_hole() -> QuadEdgeMesh {
        let mut mesh: QuadEdgeMesh = triangulated_grid(4, 4).unwrap();
        let e = mesh.find_edge(PointId::new(11), PointId::new(12)).unwrap();
        mesh.light_weight_delete_edge(e).unwrap();
        mesh
    }

    fn sequential() -> DualOptions {
        DualOptions::new().with_parallel(false)
    }

    #[test]
    fn test_closed_tetrahedron() {
        let mut primal = tetrahedron();
        let dual = build_dual(&mut primal, &sequential()).unwrap();

        assert_eq!(dual.mesh.num_points(), 4);
        assert_eq!(dual.mesh.num_faces(), 4);
        assert_eq!(dual.mesh.num_edges(), 6);
        assert!(dual.mesh.is_valid());
        assert_eq!(dual.mesh.euler_characteristic(), 2);

        assert_eq!(dual.report.interior_faces, 4);
        assert_eq!(dual.report.boundary_loops, 0);
        assert_eq!(dual.report.midpoints, 0);
        for (_, face) in dual.mesh.cells() {
            assert_eq!(face.num_points(), 3);
        }
    }

    #[test]
    fn test_closed_octahedron() {
        let mut primal = octahedron();
        let dual = build_dual(&mut primal, &DualOptions::default()).unwrap();

        // The dual of an octahedron is a cube
        assert_eq!(dual.mesh.num_points(), primal.num_faces());
        assert_eq!(dual.mesh.num_faces(), primal.num_points());
        assert_eq!(dual.mesh.num_edges(), primal.num_edges());
        assert!(dual.mesh.is_valid());
        for (_, face) in dual.mesh.cells() {
            assert_eq!(face.num_points(), 4);
        }
        for p in dual.mesh.point_ids() {
            assert!(dual.mesh.is_internal(p));
            assert_eq!(dual.mesh.valence(p), 3);
        }
    }

    #[test]
    fn test_dual_points_are_barycenters() {
        let mut primal = grid_with_hole();
        let dual = build_dual(&mut primal, &DualOptions::default()).unwrap();

        assert_eq!(dual.table.len(), primal.num_faces());
        for (cell, point) in dual.table.iter() {
            let expected = primal.cell_barycenter(cell).unwrap();
            let actual = dual.mesh.position(point);
            assert!((expected - actual).norm() < 1e-10);

            // The id is threaded into every edge of the face
            for e in primal.face_edges(cell) {
                assert_eq!(primal.left(e), FaceRef::new(cell, point));
            }
        }
    }

    #[test]
    fn test_interior_faces_match_valence() {
        let mut primal = grid_with_hole();
        let dual = build_dual(&mut primal, &sequential()).unwrap();

        let internal: Vec<PointId> = primal
            .point_ids()
            .filter(|&p| primal.is_internal(p))
            .collect();
        assert_eq!(internal.len(), 5);

        // Interior faces come first, in primal point order
        for (face_id, &p) in dual.mesh.cell_ids().zip(&internal) {
            let face = dual.mesh.cell(face_id).unwrap().points().to_vec();
            assert_eq!(face.len(), primal.valence(p));

            let mut unique = face.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), face.len());
        }
    }

    #[test]
    fn test_grid_with_hole() {
        let mut primal = grid_with_hole();
        assert_eq!(primal.num_faces(), 30);

        let dual = build_dual(&mut primal, &DualOptions::default()).unwrap();
        let report = &dual.report;

        assert_eq!(report.dual_points, 30);
        assert_eq!(report.interior_faces, 5);
        assert_eq!(report.boundary_loops, 2);
        assert_eq!(report.midpoints, 20);
        assert_eq!(report.fan_faces, 20);
        assert_eq!(report.closing_faces, 2);
        assert_eq!(report.boundary_edges, 40);
        assert!(report.unhandled_cells.is_empty());

        // One dual face per primal point
        assert_eq!(
            dual.mesh.num_faces(),
            report.interior_faces + report.midpoints
        );
        assert_eq!(dual.mesh.num_faces(), primal.num_points());
        assert_eq!(dual.mesh.num_points(), 50);
        assert_eq!(dual.mesh.num_edges(), 75);
        assert!(dual.mesh.is_valid());

        // Both are annuli
        assert_eq!(primal.euler_characteristic(), 0);
        assert_eq!(dual.mesh.euler_characteristic(), 0);
    }

    /// 3x3 squares split along the rising diagonal and wound clockwise, with
    /// a hole 1-5-10-6 that touches the outer border at point 1.
    fn loops_sharing_a_point() -> QuadEdgeMesh {
        let w = 4;
        let points: Vec<Point3<f64>> = (0..w * w)
            .map(|i| Point3::new((i % w) as f64, (i / w) as f64, 0.0))
            .collect();
        let mut faces = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                let a = y * w + x;
                faces.push([a, a + w + 1, a + 1]);
                faces.push([a, a + w, a + w + 1]);
            }
        }
        let mut mesh: QuadEdgeMesh = build_from_triangles(&points, &faces).unwrap();
        let e = mesh.find_edge(PointId::new(5), PointId::new(6)).unwrap();
        mesh.light_weight_delete_edge(e).unwrap();
        mesh
    }

    /// The midpoints paired with `center` in its only triangular dual face.
    fn wedge_ends(dual: &DualMesh, center: PointId) -> Vec<Point3<f64>> {
        let wedges: Vec<&Cell> = dual
            .mesh
            .cells()
            .map(|(_, c)| c)
            .filter(|c| c.num_points() == 3 && c.points().contains(&center))
            .collect();
        assert_eq!(wedges.len(), 1);
        wedges[0]
            .points()
            .iter()
            .filter(|&&p| p != center)
            .map(|&p| *dual.mesh.position(p))
            .collect()
    }

    #[test]
    fn test_loops_sharing_a_point() {
        let mut primal = loops_sharing_a_point();
        assert!(primal.is_valid());
        assert!(primal.is_boundary_point(PointId::new(1)));

        let dual = build_dual(&mut primal, &DualOptions::default()).unwrap();
        let report = &dual.report;
        assert_eq!(report.dual_points, 16);
        assert_eq!(report.interior_faces, 1);
        assert_eq!(report.boundary_loops, 2);
        assert_eq!(report.midpoints, 16);
        assert_eq!(report.fan_faces, 16);
        assert_eq!(report.closing_faces, 2);
        assert_eq!(report.boundary_edges, 32);

        // Point 1 has two wedges of one triangle each, and a fan for each
        assert_eq!(dual.mesh.num_faces(), primal.num_points() + 1);
        assert_eq!(dual.mesh.num_points(), 32);
        assert_eq!(dual.mesh.num_edges(), 48);
        assert!(dual.mesh.is_valid());
        assert_eq!(dual.mesh.euler_characteristic(), 1);

        // Each fan runs between the border edges of its own wedge
        let lower_left = dual.table.get(CellId::new(0)).unwrap();
        let ends = wedge_ends(&dual, lower_left);
        assert!(ends.contains(&Point3::new(0.5, 0.0, 0.0)));
        assert!(ends.contains(&Point3::new(1.0, 0.5, 0.0)));

        let lower_right = dual.table.get(CellId::new(2)).unwrap();
        let ends = wedge_ends(&dual, lower_right);
        assert!(ends.contains(&Point3::new(1.5, 0.5, 0.0)));
        assert!(ends.contains(&Point3::new(1.5, 0.0, 0.0)));

        // The two primal loops merge into one dual boundary
        let loops = BoundaryLocator::new().evaluate(&dual.mesh).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 16);
    }

    #[test]
    fn test_lone_edge_on_boundary() {
        let mut primal: QuadEdgeMesh = triangulated_grid(3, 3).unwrap();
        let e = primal.find_edge(PointId::new(1), PointId::new(5)).unwrap();
        primal.light_weight_delete_edge(e).unwrap();

        // Both faces along 0-1 are gone, but the edge stays
        let lone = primal.find_edge(PointId::new(0), PointId::new(1)).unwrap();
        assert!(!primal.is_left_set(lone) && !primal.is_right_set(lone));

        let dual = build_dual(&mut primal, &sequential()).unwrap();
        assert_eq!(dual.report.boundary_loops, 2);
        assert_eq!(dual.report.midpoints, 14);
        assert_eq!(dual.mesh.num_faces(), primal.num_points());
        assert_eq!(dual.mesh.num_points(), 30);
        assert_eq!(dual.mesh.num_edges(), 45);
        assert!(dual.mesh.is_valid());
    }

    #[test]
    fn test_single_triangle() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let mut primal: QuadEdgeMesh = build_from_triangles(&points, &[[0, 1, 2]]).unwrap();
        let dual = build_dual(&mut primal, &sequential()).unwrap();

        assert_eq!(dual.report.dual_points, 1);
        assert_eq!(dual.report.interior_faces, 0);
        assert_eq!(dual.report.midpoints, 3);
        assert_eq!(dual.report.fan_faces, 3);
        assert_eq!(dual.report.closing_faces, 1);

        assert_eq!(dual.mesh.num_points(), 4);
        assert_eq!(dual.mesh.num_edges(), 6);
        assert_eq!(dual.mesh.num_faces(), 3);
        assert!(dual.mesh.is_valid());

        // The center is surrounded by the three fans
        let center = dual.table.get(CellId::new(0)).unwrap();
        assert!(dual.mesh.is_internal(center));
        assert!((dual.mesh.position(center) - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-10);

        // Midpoints sit on the primal edges
        let midpoints: Vec<Point3<f64>> = (1..4)
            .map(|i| *dual.mesh.position(PointId::new(i)))
            .collect();
        assert!(midpoints.contains(&Point3::new(1.5, 0.0, 0.0)));
        assert!(midpoints.contains(&Point3::new(1.5, 1.5, 0.0)));
        assert!(midpoints.contains(&Point3::new(0.0, 1.5, 0.0)));
    }

    #[test]
    fn test_idempotent() {
        let mut primal = grid_with_hole();
        let first = build_dual(&mut primal, &DualOptions::default()).unwrap();
        let second = build_dual(&mut primal, &sequential()).unwrap();

        assert_eq!(first.report, second.report);

        let (points_a, faces_a) = to_face_vertex(&first.mesh);
        let (points_b, faces_b) = to_face_vertex(&second.mesh);
        assert_eq!(faces_a, faces_b);
        for (a, b) in points_a.iter().zip(&points_b) {
            assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn test_aborts_on_polygon() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![1, 3, 4, 2], vec![2, 4, 5]];
        let mut primal: QuadEdgeMesh = build_from_polygons(&points, &faces).unwrap();

        let mut builder = DualMeshBuilder::new(&mut primal, sequential());
        let result = builder.generate_dual_points();
        assert!(matches!(
            result,
            Err(MeshError::UnsupportedFaceShape { cell: 1, points: 4 })
        ));

        // No rollback, and no further passes
        assert_eq!(builder.table().len(), 1);
        assert_eq!(builder.dual().num_points(), 1);
        assert!(matches!(
            builder.generate_dual_faces(),
            Err(MeshError::InvalidState(_))
        ));

        let dual = builder.finish();
        assert_eq!(dual.report.dual_points, 1);
        assert!(dual.table.contains(CellId::new(0)));
        assert!(!dual.table.contains(CellId::new(2)));
    }

    #[test]
    fn test_unhandled_cells_are_skipped() {
        let mut primal = tetrahedron();
        let ids: Vec<PointId> = primal.point_ids().collect();
        let solid = primal.add_cell(CellKind::Tetrahedron, &ids).unwrap();
        primal.add_cell(CellKind::Line, &ids[..2]).unwrap();

        let dual = build_dual(&mut primal, &sequential()).unwrap();
        assert_eq!(
            dual.report.unhandled_cells,
            vec![(solid, CellKind::Tetrahedron)]
        );
        assert_eq!(dual.report.dual_points, 4);
        assert_eq!(dual.mesh.num_faces(), 4);
    }

    #[test]
    fn test_passes_run_in_order() {
        let mut primal = tetrahedron();
        let mut builder = DualMeshBuilder::new(&mut primal, sequential());

        assert!(matches!(
            builder.generate_dual_faces(),
            Err(MeshError::InvalidState(_))
        ));
        assert!(matches!(
            builder.stitch_boundaries(),
            Err(MeshError::InvalidState(_))
        ));

        builder.run().unwrap();
        assert!(matches!(builder.run(), Err(MeshError::InvalidState(_))));
    }

    #[test]
    fn test_without_stitching() {
        let mut primal: QuadEdgeMesh = triangulated_grid(4, 4).unwrap();
        let options = DualOptions::new().with_stitch_boundaries(false);
        let dual = build_dual(&mut primal, &options).unwrap();

        assert_eq!(dual.report.interior_faces, 9);
        assert_eq!(dual.report.midpoints, 0);
        assert_eq!(dual.mesh.num_points(), 32);
        assert_eq!(dual.mesh.num_faces(), 9);
        assert!(dual.mesh.is_valid());
    }

    #[test]
    fn test_missing_dual_point() {
        let mesh = tetrahedron();
        let start = mesh.point(PointId::new(0)).edge;
        assert!(matches!(
            onext_dual_points(&mesh, start),
            Err(MeshError::MissingDualPoint { .. })
        ));
    }

    #[test]
    fn test_open_onext_ring() {
        let mut mesh = tetrahedron();
        let edges: Vec<EdgeId> = mesh.quad_edge_ids().collect();
        for e in edges {
            let cell = mesh.left(e).cell;
            mesh.set_left(e, FaceRef::new(cell, PointId::new(0)));
        }

        // The third edge around point 0 now leads back to the second
        let start = mesh.point(PointId::new(0)).edge;
        let second = mesh.onext(start);
        let third = mesh.onext(second);
        mesh.quad_edge_mut(third).lprev = second.sym();

        assert!(matches!(
            onext_dual_points(&mesh, start),
            Err(MeshError::MalformedRing { .. })
        ));
    }

    #[test]
    fn test_cut_fan_ring() {
        let mut mesh: QuadEdgeMesh = triangulated_grid(1, 1).unwrap();
        let loops = BoundaryLocator::new().evaluate(&mesh).unwrap();
        let edge = loops[0].edges()[0];
        let midpoints = vec![PointId::new(0); mesh.num_quad_edges()];

        mesh.quad_edge_mut(edge).lprev = EdgeId::invalid();
        assert!(matches!(
            fan_face(&mesh, edge, &midpoints),
            Err(MeshError::MalformedRing { .. })
        ));
    }

    #[test]
    fn test_progress() {
        let steps = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&steps);
        let progress = Progress::new(move |current, total, _| {
            sink.lock().unwrap().push((current, total));
        });

        let mut primal = grid_with_hole();
        build_dual_with_progress(&mut primal, &DualOptions::default(), &progress).unwrap();

        assert_eq!(
            *steps.lock().unwrap(),
            vec![(0, 3), (1, 3), (2, 3), (3, 3)]
        );
    }
}
