//! Boundary predicates.
//!
//! Defined so they remain meaningful on mixed-dimensional complexes: each
//! predicate first decides the local dimension from the highest simplices
//! present in the neighbourhood, then applies that dimension's rule.

use super::SimplicialComplex;
use crate::topology::handles::{EdgeHandle, FaceHandle, VertexHandle};

impl SimplicialComplex {
    /// A face is on the boundary iff it has exactly one incident tet.
    pub fn is_on_boundary_face(&self, f: FaceHandle) -> bool {
        self.face_tet_count(f) == 1
    }

    /// An edge inside a tet-bearing neighbourhood is on the boundary iff
    /// some incident face has exactly one tet. In a pure 2D neighbourhood it
    /// is on the boundary iff it has exactly one incident face. A bare edge
    /// is never on the boundary.
    pub fn is_on_boundary_edge(&self, e: EdgeHandle) -> bool {
        if !self.edge_exists(e) {
            return false;
        }

        let mut part_of_tets = false;
        for f in self.edge_faces(e) {
            let tets = self.face_tet_count(f);
            if tets > 0 {
                part_of_tets = true;
            }
            if tets == 1 {
                return true;
            }
        }
        if part_of_tets {
            // Every incident face is interior to two tets.
            return false;
        }

        self.edge_face_count(e) == 1
    }

    /// A vertex is on the boundary iff its one-ring is incomplete for the
    /// local dimension: some face with a single tet (3D), else some edge
    /// with a single face (2D), else exactly one incident edge (1D). An
    /// isolated vertex is not on the boundary.
    pub fn is_on_boundary_vertex(&self, v: VertexHandle) -> bool {
        if !self.vertex_exists(v) {
            return false;
        }

        let mut part_of_tets = false;
        for e in self.vertex_edges(v) {
            for f in self.edge_faces(e) {
                let tets = self.face_tet_count(f);
                if tets > 0 {
                    part_of_tets = true;
                }
                if tets == 1 {
                    return true;
                }
            }
        }
        if part_of_tets {
            return false;
        }

        let mut part_of_faces = false;
        for e in self.vertex_edges(v) {
            let faces = self.edge_face_count(e);
            if faces > 0 {
                part_of_faces = true;
            }
            if faces == 1 {
                return true;
            }
        }
        if part_of_faces {
            return false;
        }

        self.vertex_edge_count(v) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_triangle_is_all_boundary() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        let f = c.add_face_from_vertices(v0, v1, v2);
        assert!(!c.is_on_boundary_face(f));
        for k in 0..3 {
            assert!(c.is_on_boundary_edge(c.edge_of(f, k)));
        }
        assert!(c.is_on_boundary_vertex(v0));
    }

    #[test]
    fn interior_edge_of_a_face_pair_is_not_boundary() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        let v3 = c.add_vertex();
        let f0 = c.add_face_from_vertices(v0, v1, v2);
        let f1 = c.add_face_from_vertices(v0, v1, v3);
        assert!(f0.is_valid() && f1.is_valid());
        let shared = c.shared_edge(f0, f1);
        assert!(!c.is_on_boundary_edge(shared));
    }

    #[test]
    fn path_endpoints_are_boundary_in_1d() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        c.add_edge(v0, v1);
        c.add_edge(v1, v2);
        assert!(c.is_on_boundary_vertex(v0));
        assert!(!c.is_on_boundary_vertex(v1));
        // An isolated vertex is not on the boundary.
        let v3 = c.add_vertex();
        assert!(!c.is_on_boundary_vertex(v3));
    }

    #[test]
    fn single_tet_is_all_boundary() {
        let mut c = SimplicialComplex::new();
        let v: Vec<_> = (0..4).map(|_| c.add_vertex()).collect();
        let t = c.add_tet_from_vertices(v[0], v[1], v[2], v[3]);
        for k in 0..4 {
            assert!(c.is_on_boundary_face(c.face_of(t, k)));
        }
        for e in c.tet_edges(t) {
            assert!(c.is_on_boundary_edge(e));
        }
        for &v in &v {
            assert!(c.is_on_boundary_vertex(v));
        }
    }

    #[test]
    fn invalid_handles_are_never_boundary() {
        let c = SimplicialComplex::new();
        assert!(!c.is_on_boundary_vertex(VertexHandle::invalid()));
        assert!(!c.is_on_boundary_edge(EdgeHandle::invalid()));
        assert!(!c.is_on_boundary_face(FaceHandle::invalid()));
    }
}
