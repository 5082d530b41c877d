//! Read-only queries: orientation, positional access, oriented endpoints,
//! incidence counts and constituent lookups.
//!
//! Dead or out-of-range handles yield 0 / `false` / an invalid handle;
//! position indices out of range are programmer errors and assert in debug
//! builds.

use super::SimplicialComplex;
use crate::topology::handles::{
    EdgeHandle, FaceHandle, Handle, SimplexKind, TetHandle, VertexHandle,
};
use crate::topology::incidence::IncidenceMatrix;

impl SimplicialComplex {
    /// The stored sign of `f` within `t`, or 0 if not incident.
    pub fn tet_face_orientation(&self, t: TetHandle, f: FaceHandle) -> i8 {
        if !t.is_valid()
            || t.index() >= self.tf.num_rows()
            || !f.is_valid()
            || f.index() >= self.tf.num_cols()
        {
            return 0;
        }
        self.tf.get(t.index(), f.index())
    }

    /// The stored sign of `e` within `f`, or 0 if not incident.
    pub fn face_edge_orientation(&self, f: FaceHandle, e: EdgeHandle) -> i8 {
        if !f.is_valid()
            || f.index() >= self.fe.num_rows()
            || !e.is_valid()
            || e.index() >= self.fe.num_cols()
        {
            return 0;
        }
        self.fe.get(f.index(), e.index())
    }

    /// The stored sign of `v` within `e` (-1 at the from vertex, +1 at the
    /// to vertex), or 0 if not incident.
    pub fn edge_vertex_orientation(&self, e: EdgeHandle, v: VertexHandle) -> i8 {
        if !e.is_valid()
            || e.index() >= self.ev.num_rows()
            || !v.is_valid()
            || v.index() >= self.ev.num_cols()
        {
            return 0;
        }
        self.ev.get(e.index(), v.index())
    }

    /// Whether `v` is an endpoint of `e`.
    pub fn is_incident_vertex_edge(&self, v: VertexHandle, e: EdgeHandle) -> bool {
        self.edge_vertex_orientation(e, v) != 0
    }

    /// Whether `e` is an edge of `f`.
    pub fn is_incident_edge_face(&self, e: EdgeHandle, f: FaceHandle) -> bool {
        self.face_edge_orientation(f, e) != 0
    }

    /// Whether `f` is a face of `t`.
    pub fn is_incident_face_tet(&self, f: FaceHandle, t: TetHandle) -> bool {
        self.tet_face_orientation(t, f) != 0
    }

    /// Number of edges incident to `v` (0 for dead handles).
    pub fn vertex_edge_count(&self, v: VertexHandle) -> usize {
        if !v.is_valid() || v.index() >= self.ve.num_rows() {
            return 0;
        }
        self.ve.row_len(v.index())
    }

    /// Number of faces incident to `e` (0 for dead handles).
    pub fn edge_face_count(&self, e: EdgeHandle) -> usize {
        if !e.is_valid() || e.index() >= self.ef.num_rows() {
            return 0;
        }
        self.ef.row_len(e.index())
    }

    /// Number of tets incident to `f` (0 for dead handles).
    pub fn face_tet_count(&self, f: FaceHandle) -> usize {
        if !f.is_valid() || f.index() >= self.ft.num_rows() {
            return 0;
        }
        self.ft.row_len(f.index())
    }

    /// The vertex at row position `index` (0 = from, 1 = to) of `e`. O(1).
    pub fn vertex_of(&self, e: EdgeHandle, index: usize) -> VertexHandle {
        debug_assert!(self.edge_exists(e));
        debug_assert!(index < 2);
        VertexHandle::from_index(self.ev.col_by_index(e.index(), index))
    }

    /// The edge at row position `index` of `f`, in the face's stored cyclic
    /// order. O(1).
    pub fn edge_of(&self, f: FaceHandle, index: usize) -> EdgeHandle {
        debug_assert!(self.face_exists(f));
        debug_assert!(index < 3);
        EdgeHandle::from_index(self.fe.col_by_index(f.index(), index))
    }

    /// The face at row position `index` of `t`. O(1).
    pub fn face_of(&self, t: TetHandle, index: usize) -> FaceHandle {
        debug_assert!(self.tet_exists(t));
        debug_assert!(index < 4);
        FaceHandle::from_index(self.tf.col_by_index(t.index(), index))
    }

    /// The tail vertex of `e`: row position 0, stored with sign -1.
    pub fn from_vertex(&self, e: EdgeHandle) -> VertexHandle {
        debug_assert_eq!(self.ev.row_len(e.index()), 2);
        self.vertex_of(e, 0)
    }

    /// The head vertex of `e`: row position 1, stored with sign +1.
    pub fn to_vertex(&self, e: EdgeHandle) -> VertexHandle {
        debug_assert_eq!(self.ev.row_len(e.index()), 2);
        self.vertex_of(e, 1)
    }

    /// The incident face traversing `e` forwards (sign +1), or invalid.
    /// Assumes a consistently oriented 2D neighbourhood.
    pub fn front_face(&self, e: EdgeHandle) -> FaceHandle {
        debug_assert!(self.edge_exists(e));
        debug_assert!(self.ef.row_len(e.index()) <= 2);
        self.signed_entry_in(&self.ef, e.index(), 1)
    }

    /// The incident face traversing `e` backwards (sign -1), or invalid.
    pub fn back_face(&self, e: EdgeHandle) -> FaceHandle {
        debug_assert!(self.edge_exists(e));
        debug_assert!(self.ef.row_len(e.index()) <= 2);
        self.signed_entry_in(&self.ef, e.index(), -1)
    }

    /// The incident tet on the positive side of `f`, or invalid. Assumes a
    /// consistently oriented neighbourhood.
    pub fn front_tet(&self, f: FaceHandle) -> TetHandle {
        debug_assert!(self.face_exists(f));
        debug_assert!(self.ft.row_len(f.index()) <= 2);
        self.signed_entry_in(&self.ft, f.index(), 1)
    }

    /// The incident tet on the negative side of `f`, or invalid.
    pub fn back_tet(&self, f: FaceHandle) -> TetHandle {
        debug_assert!(self.face_exists(f));
        debug_assert!(self.ft.row_len(f.index()) <= 2);
        self.signed_entry_in(&self.ft, f.index(), -1)
    }

    /// First entry of `row` carrying `sign`, as a handle of kind `K`.
    fn signed_entry_in<K: SimplexKind>(
        &self,
        matrix: &IncidenceMatrix,
        row: usize,
        sign: i8,
    ) -> Handle<K> {
        for k in 0..matrix.row_len(row) {
            if matrix.value_by_index(row, k) == sign {
                return Handle::from_index(matrix.col_by_index(row, k));
            }
        }
        Handle::invalid()
    }

    /// Find the edge joining `v0` and `v1`, ignoring orientation. Walks the
    /// incident edges of `v0`; slow compared to handle-based access.
    pub fn find_edge(&self, v0: VertexHandle, v1: VertexHandle) -> EdgeHandle {
        if !self.vertex_exists(v0) || !self.vertex_exists(v1) {
            return EdgeHandle::invalid();
        }
        for e in self.vertex_edges(v0) {
            if self.from_vertex(e) == v1 || self.to_vertex(e) == v1 {
                return e;
            }
        }
        EdgeHandle::invalid()
    }

    /// Find the face over the given edges, ignoring orientation.
    pub fn find_face(&self, e0: EdgeHandle, e1: EdgeHandle, e2: EdgeHandle) -> FaceHandle {
        if !self.edge_exists(e0) || !self.edge_exists(e1) || !self.edge_exists(e2) {
            return FaceHandle::invalid();
        }
        for f in self.edge_faces(e0) {
            let mut found1 = false;
            let mut found2 = false;
            for e in self.face_edges(f, false) {
                if e == e1 {
                    found1 = true;
                }
                if e == e2 {
                    found2 = true;
                }
            }
            if found1 && found2 {
                return f;
            }
        }
        FaceHandle::invalid()
    }

    /// Find the tet over the given faces, ignoring orientation.
    pub fn find_tet(
        &self,
        f0: FaceHandle,
        f1: FaceHandle,
        f2: FaceHandle,
        f3: FaceHandle,
    ) -> TetHandle {
        if !self.face_exists(f0)
            || !self.face_exists(f1)
            || !self.face_exists(f2)
            || !self.face_exists(f3)
        {
            return TetHandle::invalid();
        }
        for t in self.face_tets(f0) {
            let mut found = [false; 3];
            for f in self.tet_faces(t) {
                if f == f1 {
                    found[0] = true;
                }
                if f == f2 {
                    found[1] = true;
                }
                if f == f3 {
                    found[2] = true;
                }
            }
            if found.iter().all(|&b| b) {
                return t;
            }
        }
        TetHandle::invalid()
    }

    /// The first edge present in both face rows, or invalid.
    pub fn shared_edge(&self, f0: FaceHandle, f1: FaceHandle) -> EdgeHandle {
        debug_assert!(self.face_exists(f0) && self.face_exists(f1));
        for i in 0..self.fe.row_len(f0.index()) {
            let col0 = self.fe.col_by_index(f0.index(), i);
            for j in 0..self.fe.row_len(f1.index()) {
                if col0 == self.fe.col_by_index(f1.index(), j) {
                    return EdgeHandle::from_index(col0);
                }
            }
        }
        EdgeHandle::invalid()
    }

    /// The first face present in both tet rows, or invalid.
    pub fn shared_face(&self, t0: TetHandle, t1: TetHandle) -> FaceHandle {
        debug_assert!(self.tet_exists(t0) && self.tet_exists(t1));
        for i in 0..self.tf.row_len(t0.index()) {
            let col0 = self.tf.col_by_index(t0.index(), i);
            for j in 0..self.tf.row_len(t1.index()) {
                if col0 == self.tf.col_by_index(t1.index(), j) {
                    return FaceHandle::from_index(col0);
                }
            }
        }
        FaceHandle::invalid()
    }
}
