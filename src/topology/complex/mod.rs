//! The simplicial complex container.
//!
//! [`SimplicialComplex`] holds vertices, edges, triangular faces and
//! tetrahedra with their oriented incidence relations. The fundamental data
//! are three signed incidence matrices (edge→vertex, face→edge, tet→face)
//! plus a vertex existence bitset to support isolated vertices; three exact
//! transposes are maintained alongside for efficient deletion and traversal.
//! Dead slots are pooled per kind and reused by later additions.
//!
//! Editing is split across the submodules of this directory: additions with
//! orientation resolution in `add`, orphan-checked deletion in `delete`,
//! read-only queries in `queries`, stateless walkers in `walkers`, and the
//! boundary/manifoldness predicates in `boundary` and `manifold`.

mod add;
mod boundary;
mod delete;
mod manifold;
mod queries;
mod walkers;

use crate::data::property::PropertyRegistry;
use crate::topology::handles::{EdgeHandle, FaceHandle, TetHandle, VertexHandle};
use crate::topology::incidence::IncidenceMatrix;

/// How strictly duplicate simplices are rejected when safe mode is on.
///
/// With safe mode off no duplicate or structural checks run at all. With
/// safe mode on, the structural checks (an edge's vertices distinct, a
/// face's edges closing into a triangle, a tet's faces closing into a
/// tetrahedron) always run, and this mode selects the duplicate policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DuplicateSimplexMode {
    /// Any kind of duplicate is allowed.
    Arbitrary,
    /// Allow simplices that differ in orientation or share some
    /// sub-simplices; reject only an identically oriented duplicate.
    Relaxed,
    /// No duplication at all: reject any simplex sharing two or more
    /// sub-simplices with an existing one, in either orientation.
    #[default]
    None,
}

/// A collection of vertices, edges, faces and tets with oriented
/// connectivity information.
#[derive(Debug, Default)]
pub struct SimplicialComplex {
    // Simplex counts.
    pub(crate) n_verts: usize,
    pub(crate) n_edges: usize,
    pub(crate) n_faces: usize,
    pub(crate) n_tets: usize,

    // Fundamental mesh data (incidence matrix format).
    pub(crate) tf: IncidenceMatrix,
    pub(crate) fe: IncidenceMatrix,
    pub(crate) ev: IncidenceMatrix,
    /// Vertex existence, to support isolated vertices.
    pub(crate) verts: Vec<bool>,

    // Exact transposes, needed for efficient deletion and traversal.
    pub(crate) ft: IncidenceMatrix,
    pub(crate) ef: IncidenceMatrix,
    pub(crate) ve: IncidenceMatrix,

    // Pools of vacated slots, so additions can reuse deleted rows.
    pub(crate) dead_verts: Vec<usize>,
    pub(crate) dead_edges: Vec<usize>,
    pub(crate) dead_faces: Vec<usize>,
    pub(crate) dead_tets: Vec<usize>,

    // Registered property side-tables, per kind, resized on arena growth.
    pub(crate) vert_props: PropertyRegistry,
    pub(crate) edge_props: PropertyRegistry,
    pub(crate) face_props: PropertyRegistry,
    pub(crate) tet_props: PropertyRegistry,

    safe_mode: bool,
    duplicate_mode: DuplicateSimplexMode,
}

impl SimplicialComplex {
    /// Creates an empty complex with safe mode on and the strictest
    /// duplicate policy.
    pub fn new() -> Self {
        Self {
            safe_mode: true,
            ..Self::default()
        }
    }

    /// Toggle the extra structural and duplicate validation performed by
    /// additions.
    pub fn set_safe_mode(&mut self, safe: bool) {
        self.safe_mode = safe;
    }

    /// Whether additions perform extra validation.
    pub fn safe_mode(&self) -> bool {
        self.safe_mode
    }

    /// Select the duplicate policy applied when safe mode is on.
    pub fn set_duplicate_mode(&mut self, mode: DuplicateSimplexMode) {
        self.duplicate_mode = mode;
    }

    /// The active duplicate policy.
    pub fn duplicate_mode(&self) -> DuplicateSimplexMode {
        self.duplicate_mode
    }

    /// Number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.n_verts
    }

    /// Number of live edges.
    pub fn num_edges(&self) -> usize {
        self.n_edges
    }

    /// Number of live faces.
    pub fn num_faces(&self) -> usize {
        self.n_faces
    }

    /// Number of live tets.
    pub fn num_tets(&self) -> usize {
        self.n_tets
    }

    /// Whether `v` refers to a live vertex.
    pub fn vertex_exists(&self, v: VertexHandle) -> bool {
        v.is_valid() && v.index() < self.verts.len() && self.verts[v.index()]
    }

    /// Whether `e` refers to a live edge.
    pub fn edge_exists(&self, e: EdgeHandle) -> bool {
        e.is_valid() && e.index() < self.ev.num_rows() && self.ev.row_len(e.index()) > 0
    }

    /// Whether `f` refers to a live face.
    pub fn face_exists(&self, f: FaceHandle) -> bool {
        f.is_valid() && f.index() < self.fe.num_rows() && self.fe.row_len(f.index()) > 0
    }

    /// Whether `t` refers to a live tet.
    pub fn tet_exists(&self, t: TetHandle) -> bool {
        t.is_valid() && t.index() < self.tf.num_rows() && self.tf.row_len(t.index()) > 0
    }

    // Arena sizes: the number of slots currently allocated per kind, live or
    // dead. Properties are sized to these, not to the live counts.

    #[inline]
    pub(crate) fn vertex_slots(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub(crate) fn edge_slots(&self) -> usize {
        self.ev.num_rows()
    }

    #[inline]
    pub(crate) fn face_slots(&self) -> usize {
        self.fe.num_rows()
    }

    #[inline]
    pub(crate) fn tet_slots(&self) -> usize {
        self.tf.num_rows()
    }

    /// Pop a dead vertex slot or grow the arenas by one, notifying
    /// registered vertex properties.
    pub(crate) fn alloc_vertex_slot(&mut self) -> usize {
        match self.dead_verts.pop() {
            Some(idx) => {
                debug_assert!(!self.verts[idx]);
                self.verts[idx] = true;
                idx
            }
            None => {
                self.ev.add_cols(1);
                self.ve.add_rows(1);
                self.verts.push(true);
                self.vert_props.resize_all(self.verts.len());
                self.verts.len() - 1
            }
        }
    }

    /// Pop a dead edge slot or grow the arenas by one, notifying registered
    /// edge properties.
    pub(crate) fn alloc_edge_slot(&mut self) -> usize {
        match self.dead_edges.pop() {
            Some(idx) => idx,
            None => {
                self.fe.add_cols(1);
                self.ef.add_rows(1);
                self.ev.add_rows(1);
                self.ve.add_cols(1);
                debug_assert_eq!(self.ev.num_rows(), self.ve.num_cols());
                debug_assert_eq!(self.ev.num_cols(), self.ve.num_rows());
                let idx = self.ev.num_rows() - 1;
                self.edge_props.resize_all(self.ev.num_rows());
                idx
            }
        }
    }

    /// Pop a dead face slot or grow the arenas by one, notifying registered
    /// face properties.
    pub(crate) fn alloc_face_slot(&mut self) -> usize {
        match self.dead_faces.pop() {
            Some(idx) => idx,
            None => {
                self.tf.add_cols(1);
                self.ft.add_rows(1);
                self.fe.add_rows(1);
                self.ef.add_cols(1);
                debug_assert_eq!(self.fe.num_rows(), self.ef.num_cols());
                debug_assert_eq!(self.fe.num_cols(), self.ef.num_rows());
                let idx = self.fe.num_rows() - 1;
                self.face_props.resize_all(self.fe.num_rows());
                idx
            }
        }
    }

    /// Pop a dead tet slot or grow the arenas by one, notifying registered
    /// tet properties.
    pub(crate) fn alloc_tet_slot(&mut self) -> usize {
        match self.dead_tets.pop() {
            Some(idx) => idx,
            None => {
                self.tf.add_rows(1);
                self.ft.add_cols(1);
                debug_assert_eq!(self.ft.num_rows(), self.tf.num_cols());
                let idx = self.tf.num_rows() - 1;
                self.tet_props.resize_all(self.tf.num_rows());
                idx
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_complex_is_empty_and_safe() {
        let c = SimplicialComplex::new();
        assert_eq!(c.num_vertices(), 0);
        assert_eq!(c.num_edges(), 0);
        assert_eq!(c.num_faces(), 0);
        assert_eq!(c.num_tets(), 0);
        assert!(c.safe_mode());
        assert_eq!(c.duplicate_mode(), DuplicateSimplexMode::None);
    }

    #[test]
    fn invalid_handles_do_not_exist() {
        let c = SimplicialComplex::new();
        assert!(!c.vertex_exists(VertexHandle::invalid()));
        assert!(!c.edge_exists(EdgeHandle::invalid()));
        assert!(!c.face_exists(FaceHandle::invalid()));
        assert!(!c.tet_exists(TetHandle::invalid()));
    }

    #[test]
    fn out_of_range_handles_do_not_exist() {
        let mut c = SimplicialComplex::new();
        c.add_vertex();
        assert!(!c.vertex_exists(VertexHandle::from_index(5)));
        assert!(!c.edge_exists(EdgeHandle::from_index(0)));
    }
}
