//! Stateless traversal helpers.
//!
//! Global walkers scan an arena cyclically, skipping dead slots; local
//! walkers step through the fixed cyclic order stored in a parent simplex's
//! row. Terser than iterators and safe to interleave with editing, at the
//! cost of a scan per step.

use super::SimplicialComplex;
use crate::topology::handles::{EdgeHandle, FaceHandle, TetHandle, VertexHandle};

impl SimplicialComplex {
    /// The next live vertex after `v` in arena order, wrapping around.
    pub fn next_vertex(&self, v: VertexHandle) -> VertexHandle {
        debug_assert!(self.vertex_exists(v));
        let n = self.vertex_slots();
        let mut idx = v.index();
        loop {
            idx = (idx + 1) % n;
            if self.verts[idx] {
                return VertexHandle::from_index(idx);
            }
        }
    }

    /// The previous live vertex before `v` in arena order, wrapping around.
    pub fn prev_vertex(&self, v: VertexHandle) -> VertexHandle {
        debug_assert!(self.vertex_exists(v));
        let n = self.vertex_slots();
        let mut idx = v.index();
        loop {
            idx = (idx + n - 1) % n;
            if self.verts[idx] {
                return VertexHandle::from_index(idx);
            }
        }
    }

    /// The next live edge after `e` in arena order, wrapping around.
    pub fn next_edge(&self, e: EdgeHandle) -> EdgeHandle {
        debug_assert!(self.edge_exists(e));
        let n = self.edge_slots();
        let mut idx = e.index();
        loop {
            idx = (idx + 1) % n;
            if self.ev.row_len(idx) > 0 {
                return EdgeHandle::from_index(idx);
            }
        }
    }

    /// The previous live edge before `e` in arena order, wrapping around.
    pub fn prev_edge(&self, e: EdgeHandle) -> EdgeHandle {
        debug_assert!(self.edge_exists(e));
        let n = self.edge_slots();
        let mut idx = e.index();
        loop {
            idx = (idx + n - 1) % n;
            if self.ev.row_len(idx) > 0 {
                return EdgeHandle::from_index(idx);
            }
        }
    }

    /// The next live face after `f` in arena order, wrapping around.
    pub fn next_face(&self, f: FaceHandle) -> FaceHandle {
        debug_assert!(self.face_exists(f));
        let n = self.face_slots();
        let mut idx = f.index();
        loop {
            idx = (idx + 1) % n;
            if self.fe.row_len(idx) > 0 {
                return FaceHandle::from_index(idx);
            }
        }
    }

    /// The previous live face before `f` in arena order, wrapping around.
    pub fn prev_face(&self, f: FaceHandle) -> FaceHandle {
        debug_assert!(self.face_exists(f));
        let n = self.face_slots();
        let mut idx = f.index();
        loop {
            idx = (idx + n - 1) % n;
            if self.fe.row_len(idx) > 0 {
                return FaceHandle::from_index(idx);
            }
        }
    }

    /// The next live tet after `t` in arena order, wrapping around.
    pub fn next_tet(&self, t: TetHandle) -> TetHandle {
        debug_assert!(self.tet_exists(t));
        let n = self.tet_slots();
        let mut idx = t.index();
        loop {
            idx = (idx + 1) % n;
            if self.tf.row_len(idx) > 0 {
                return TetHandle::from_index(idx);
            }
        }
    }

    /// The previous live tet before `t` in arena order, wrapping around.
    pub fn prev_tet(&self, t: TetHandle) -> TetHandle {
        debug_assert!(self.tet_exists(t));
        let n = self.tet_slots();
        let mut idx = t.index();
        loop {
            idx = (idx + n - 1) % n;
            if self.tf.row_len(idx) > 0 {
                return TetHandle::from_index(idx);
            }
        }
    }

    /// The other endpoint of `e`.
    pub fn opposite_vertex(&self, e: EdgeHandle, v: VertexHandle) -> VertexHandle {
        debug_assert!(self.edge_exists(e));
        debug_assert!(self.is_incident_vertex_edge(v, e));
        let col0 = self.ev.col_by_index(e.index(), 0);
        if col0 == v.index() {
            VertexHandle::from_index(self.ev.col_by_index(e.index(), 1))
        } else {
            VertexHandle::from_index(col0)
        }
    }

    /// The edge after `e` in the fixed 3-cycle of `f`'s stored row.
    pub fn next_edge_in_face(&self, f: FaceHandle, e: EdgeHandle) -> EdgeHandle {
        debug_assert!(self.face_exists(f) && self.edge_exists(e));
        debug_assert_eq!(self.fe.row_len(f.index()), 3);
        debug_assert!(self.is_incident_edge_face(e, f));
        let row = f.index();
        let col0 = self.fe.col_by_index(row, 0);
        let col1 = self.fe.col_by_index(row, 1);
        if col0 == e.index() {
            EdgeHandle::from_index(col1)
        } else if col1 == e.index() {
            EdgeHandle::from_index(self.fe.col_by_index(row, 2))
        } else {
            EdgeHandle::from_index(col0)
        }
    }

    /// The edge before `e` in the fixed 3-cycle of `f`'s stored row.
    pub fn prev_edge_in_face(&self, f: FaceHandle, e: EdgeHandle) -> EdgeHandle {
        debug_assert!(self.face_exists(f) && self.edge_exists(e));
        debug_assert_eq!(self.fe.row_len(f.index()), 3);
        let row = f.index();
        let col0 = self.fe.col_by_index(row, 0);
        let col2 = self.fe.col_by_index(row, 2);
        if col0 == e.index() {
            EdgeHandle::from_index(col2)
        } else if col2 == e.index() {
            EdgeHandle::from_index(col0)
        } else {
            EdgeHandle::from_index(self.fe.col_by_index(row, 1))
        }
    }

    /// The face after `f` in the fixed 4-cycle of `t`'s stored row.
    pub fn next_face_in_tet(&self, t: TetHandle, f: FaceHandle) -> FaceHandle {
        debug_assert!(self.tet_exists(t) && self.face_exists(f));
        debug_assert_eq!(self.tf.row_len(t.index()), 4);
        debug_assert!(self.is_incident_face_tet(f, t));
        let row = t.index();
        let pos = (0..4)
            .find(|&k| self.tf.col_by_index(row, k) == f.index())
            .unwrap_or(0);
        FaceHandle::from_index(self.tf.col_by_index(row, (pos + 1) % 4))
    }

    /// The face before `f` in the fixed 4-cycle of `t`'s stored row.
    pub fn prev_face_in_tet(&self, t: TetHandle, f: FaceHandle) -> FaceHandle {
        debug_assert!(self.tet_exists(t) && self.face_exists(f));
        debug_assert_eq!(self.tf.row_len(t.index()), 4);
        debug_assert!(self.is_incident_face_tet(f, t));
        let row = t.index();
        let pos = (0..4)
            .find(|&k| self.tf.col_by_index(row, k) == f.index())
            .unwrap_or(0);
        FaceHandle::from_index(self.tf.col_by_index(row, (pos + 3) % 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_walk_skips_dead_slots_and_wraps() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        assert!(c.delete_vertex(v1));
        assert_eq!(c.next_vertex(v0), v2);
        assert_eq!(c.next_vertex(v2), v0);
        assert_eq!(c.prev_vertex(v0), v2);
    }

    #[test]
    fn face_cycle_walkers_invert_each_other() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        let f = c.add_face_from_vertices(v0, v1, v2);
        for k in 0..3 {
            let e = c.edge_of(f, k);
            assert_eq!(c.prev_edge_in_face(f, c.next_edge_in_face(f, e)), e);
        }
    }

    #[test]
    fn tet_face_cycle_has_period_four() {
        let mut c = SimplicialComplex::new();
        let v: Vec<_> = (0..4).map(|_| c.add_vertex()).collect();
        let t = c.add_tet_from_vertices(v[0], v[1], v[2], v[3]);
        let f = c.face_of(t, 2);
        let mut cur = f;
        for _ in 0..4 {
            cur = c.next_face_in_tet(t, cur);
        }
        assert_eq!(cur, f);
        assert_eq!(c.prev_face_in_tet(t, c.next_face_in_tet(t, f)), f);
    }

    #[test]
    fn opposite_vertex_flips_endpoints() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let e = c.add_edge(v0, v1);
        assert_eq!(c.opposite_vertex(e, v0), v1);
        assert_eq!(c.opposite_vertex(e, v1), v0);
    }
}
