//! Cell records.
//!
//! Faces inserted with [`QuadEdgeMesh::add_face`](super::QuadEdgeMesh::add_face)
//! are [`CellKind::Polygon`] cells backed by a quad-edge ring, whatever their
//! number of points. The other kinds are stored as plain point lists and take
//! no part in the edge topology.

use super::index::{CellId, EdgeId, MeshIndex, PointId};

/// The shape of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// A single point.
    Vertex,
    /// A straight segment between two points.
    Line,
    /// A stand-alone triangle without edge topology.
    Triangle,
    /// A stand-alone quadrilateral without edge topology.
    Quadrilateral,
    /// A face bounded by a quad-edge ring.
    Polygon,
    /// A curved edge (two end points and a mid point).
    QuadraticEdge,
    /// A curved triangle (three corners and three edge mid points).
    QuadraticTriangle,
    /// A volumetric tetrahedron.
    Tetrahedron,
    /// A volumetric hexahedron.
    Hexahedron,
}

impl CellKind {
    /// Number of points a cell of this kind must have.
    ///
    /// Returns `None` for [`CellKind::Polygon`], which accepts any count of three or more.
    pub fn point_count(self) -> Option<usize> {
        match self {
            CellKind::Vertex => Some(1),
            CellKind::Line => Some(2),
            CellKind::Triangle => Some(3),
            CellKind::Quadrilateral => Some(4),
            CellKind::Polygon => None,
            CellKind::QuadraticEdge => Some(3),
            CellKind::QuadraticTriangle => Some(6),
            CellKind::Tetrahedron => Some(4),
            CellKind::Hexahedron => Some(8),
        }
    }

    /// Whether this kind encloses a volume.
    pub fn is_volumetric(self) -> bool {
        matches!(self, CellKind::Tetrahedron | CellKind::Hexahedron)
    }
}

/// A cell in the mesh.
#[derive(Debug, Clone)]
pub struct Cell<I: MeshIndex = u32> {
    kind: CellKind,

    /// Points in insertion order; for polygons this is the winding order.
    points: Vec<PointId<I>>,

    /// Entry edge of the boundary ring (invalid for cells without topology).
    pub(crate) edge: EdgeId<I>,
}

impl<I: MeshIndex> Cell<I> {
    pub(crate) fn new(kind: CellKind, points: Vec<PointId<I>>, edge: EdgeId<I>) -> Self {
        Self { kind, points, edge }
    }

    /// The shape of this cell.
    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// The points of this cell, in winding order.
    #[inline]
    pub fn points(&self) -> &[PointId<I>] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The entry edge of the boundary ring, whose origin is the first point.
    ///
    /// Invalid for cells that are not faces.
    #[inline]
    pub fn edge(&self) -> EdgeId<I> {
        self.edge
    }

    /// Whether this cell is a face with a quad-edge ring.
    #[inline]
    pub fn is_face(&self) -> bool {
        self.kind == CellKind::Polygon && self.edge.is_valid()
    }
}

/// A face reference stored on one side of a quad-edge.
///
/// Pairs the primal face with the dual point computed for it. Either half
/// may be unset: `cell` is unset on a side with no face, `dual` is unset
/// until dual point generation has visited the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceRef<I: MeshIndex = u32> {
    /// The face on this side.
    pub cell: CellId<I>,
    /// The dual point of that face.
    pub dual: PointId<I>,
}

impl<I: MeshIndex> FaceRef<I> {
    /// A reference to `cell` with a known dual point.
    pub fn new(cell: CellId<I>, dual: PointId<I>) -> Self {
        Self { cell, dual }
    }

    /// A reference to `cell` whose dual point is not computed yet.
    pub fn face(cell: CellId<I>) -> Self {
        Self {
            cell,
            dual: PointId::invalid(),
        }
    }

    /// The empty side.
    pub fn unset() -> Self {
        Self {
            cell: CellId::invalid(),
            dual: PointId::invalid(),
        }
    }

    /// Whether a face lies on this side.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.cell.is_valid()
    }

    /// The dual point, if one has been computed.
    #[inline]
    pub fn dual_point(&self) -> Option<PointId<I>> {
        self.dual.is_valid().then_some(self.dual)
    }
}
