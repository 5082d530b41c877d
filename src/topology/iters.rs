//! Iterators over simplices and their adjacencies.
//!
//! Three flavours:
//! - **Arena scans** ([`Vertices`], [`Edges`], [`Faces`], [`Tets`]) walk a
//!   slot arena in index order, skipping dead slots.
//! - **Direct adjacency iterators** read one incidence row by position and
//!   are O(1) per step. [`FaceEdges`] and [`EdgeVertices`] can yield either
//!   the stored order or the semantically ordered traversal;
//!   [`FaceVertices`] composes the ordered edge cycle with each edge's sign.
//! - **Set-backed iterators** ([`VertexFaces`], [`VertexTets`],
//!   [`TetVertices`], [`TetEdges`], [`EdgeTets`], [`VertexVertices`])
//!   deduplicate a composed relation: they eagerly build the adjacent set
//!   at construction and drain it in sorted handle order.
//!
//! Direct iterators borrow the complex, so the borrow checker rules out
//! mutation while one is live. Set-backed iterators own their snapshot and
//! survive later mutation, but may then expose handles that have since
//! died.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::marker::PhantomData;

use crate::topology::complex::SimplicialComplex;
use crate::topology::handles::{
    Edge, EdgeHandle, Face, FaceHandle, Handle, SimplexKind, Tet, TetHandle, Vertex, VertexHandle,
};
use crate::topology::incidence::IncidenceMatrix;

// ---------------------------------------------------------------------------
// Arena scans

macro_rules! arena_iter {
    ($name:ident, $kind:ty, $slots:ident, $live:expr, $doc:literal) => {
        #[doc = $doc]
        pub struct $name<'a> {
            complex: &'a SimplicialComplex,
            idx: usize,
        }

        impl<'a> Iterator for $name<'a> {
            type Item = Handle<$kind>;

            fn next(&mut self) -> Option<Self::Item> {
                let live = $live;
                while self.idx < self.complex.$slots() {
                    let idx = self.idx;
                    self.idx += 1;
                    if live(self.complex, idx) {
                        return Some(Handle::from_index(idx));
                    }
                }
                None
            }
        }
    };
}

arena_iter!(
    Vertices,
    Vertex,
    vertex_slots,
    |c: &SimplicialComplex, i: usize| c.verts[i],
    "Iterator over all live vertices in arena order."
);
arena_iter!(
    Edges,
    Edge,
    edge_slots,
    |c: &SimplicialComplex, i: usize| c.ev.row_len(i) > 0,
    "Iterator over all live edges in arena order."
);
arena_iter!(
    Faces,
    Face,
    face_slots,
    |c: &SimplicialComplex, i: usize| c.fe.row_len(i) > 0,
    "Iterator over all live faces in arena order."
);
arena_iter!(
    Tets,
    Tet,
    tet_slots,
    |c: &SimplicialComplex, i: usize| c.tf.row_len(i) > 0,
    "Iterator over all live tets in arena order."
);

// ---------------------------------------------------------------------------
// Direct adjacency iterators

/// Position-indexed walk over one row of an incidence matrix, yielding
/// handles of kind `K`. O(1) per step.
pub struct IncidenceRow<'a, K: SimplexKind> {
    matrix: &'a IncidenceMatrix,
    row: usize,
    pos: usize,
    len: usize,
    _kind: PhantomData<K>,
}

impl<'a, K: SimplexKind> IncidenceRow<'a, K> {
    fn over(matrix: &'a IncidenceMatrix, row: Option<usize>) -> Self {
        let (row, len) = match row {
            Some(r) => (r, matrix.row_len(r)),
            None => (0, 0),
        };
        Self {
            matrix,
            row,
            pos: 0,
            len,
            _kind: PhantomData,
        }
    }
}

impl<'a, K: SimplexKind> Iterator for IncidenceRow<'a, K> {
    type Item = Handle<K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let h = Handle::from_index(self.matrix.col_by_index(self.row, self.pos));
        self.pos += 1;
        Some(h)
    }
}

/// Iterator over the edges incident to a vertex.
pub type VertexEdges<'a> = IncidenceRow<'a, Edge>;
/// Iterator over the faces incident to an edge.
pub type EdgeFaces<'a> = IncidenceRow<'a, Face>;
/// Iterator over the tets incident to a face.
pub type FaceTets<'a> = IncidenceRow<'a, Tet>;
/// Iterator over the four faces of a tet, in stored order.
pub type TetFaces<'a> = IncidenceRow<'a, Face>;

/// Iterator over the two endpoints of an edge. Ordered mode yields the from
/// vertex then the to vertex.
pub struct EdgeVertices<'a> {
    complex: &'a SimplicialComplex,
    edge: EdgeHandle,
    ordered: bool,
    pos: usize,
    len: usize,
}

impl<'a> Iterator for EdgeVertices<'a> {
    type Item = VertexHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let v = if self.ordered {
            if self.pos == 0 {
                self.complex.from_vertex(self.edge)
            } else {
                self.complex.to_vertex(self.edge)
            }
        } else {
            VertexHandle::from_index(self.complex.ev.col_by_index(self.edge.index(), self.pos))
        };
        self.pos += 1;
        Some(v)
    }
}

/// Iterator over the three edges of a face. Ordered mode starts at row
/// position 0 and follows the face's oriented cycle; otherwise entries come
/// out in stored order (which is the same cycle, by the canonical rotation).
pub struct FaceEdges<'a> {
    complex: &'a SimplicialComplex,
    face: FaceHandle,
    ordered: bool,
    cur: EdgeHandle,
    pos: usize,
    len: usize,
}

impl<'a> Iterator for FaceEdges<'a> {
    type Item = EdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let e = if self.ordered {
            let e = self.cur;
            self.cur = self.complex.next_edge_in_face(self.face, e);
            e
        } else {
            EdgeHandle::from_index(self.complex.fe.col_by_index(self.face.index(), self.pos))
        };
        self.pos += 1;
        Some(e)
    }
}

/// Iterator over the three corner vertices of a face, following the
/// oriented edge cycle: each edge contributes its tail within the face
/// (its from vertex when stored with +1, its to vertex when stored with
/// -1).
pub struct FaceVertices<'a> {
    complex: &'a SimplicialComplex,
    face: FaceHandle,
    inner: FaceEdges<'a>,
}

impl<'a> Iterator for FaceVertices<'a> {
    type Item = VertexHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.inner.next()?;
        let direction = self.complex.face_edge_orientation(self.face, e);
        Some(if direction > 0 {
            self.complex.from_vertex(e)
        } else {
            self.complex.to_vertex(e)
        })
    }
}

// ---------------------------------------------------------------------------
// Set-backed iterators

macro_rules! set_iter {
    ($name:ident, $kind:ty, $doc:literal) => {
        #[doc = $doc]
        ///
        /// The adjacent set is built eagerly at construction and yielded in
        /// sorted handle order.
        pub struct $name {
            iter: btree_set::IntoIter<Handle<$kind>>,
        }

        impl Iterator for $name {
            type Item = Handle<$kind>;

            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next()
            }
        }
    };
}

set_iter!(VertexFaces, Face, "Iterator over the distinct faces touching a vertex.");
set_iter!(VertexTets, Tet, "Iterator over the distinct tets touching a vertex.");
set_iter!(TetVertices, Vertex, "Iterator over the four corner vertices of a tet.");
set_iter!(TetEdges, Edge, "Iterator over the six edges of a tet.");
set_iter!(EdgeTets, Tet, "Iterator over the distinct tets touching an edge.");
set_iter!(
    VertexVertices,
    Vertex,
    "Iterator over the distinct vertices joined to a vertex by an edge."
);

// ---------------------------------------------------------------------------
// Constructors on the complex

impl SimplicialComplex {
    /// All live vertices, in arena order.
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices { complex: self, idx: 0 }
    }

    /// All live edges, in arena order.
    pub fn edges(&self) -> Edges<'_> {
        Edges { complex: self, idx: 0 }
    }

    /// All live faces, in arena order.
    pub fn faces(&self) -> Faces<'_> {
        Faces { complex: self, idx: 0 }
    }

    /// All live tets, in arena order.
    pub fn tets(&self) -> Tets<'_> {
        Tets { complex: self, idx: 0 }
    }

    /// The edges incident to `v`, in stored order.
    pub fn vertex_edges(&self, v: VertexHandle) -> VertexEdges<'_> {
        let row = self.vertex_exists(v).then(|| v.index());
        IncidenceRow::over(&self.ve, row)
    }

    /// The faces incident to `e`, in stored order.
    pub fn edge_faces(&self, e: EdgeHandle) -> EdgeFaces<'_> {
        let row = self.edge_exists(e).then(|| e.index());
        IncidenceRow::over(&self.ef, row)
    }

    /// The tets incident to `f`, in stored order.
    pub fn face_tets(&self, f: FaceHandle) -> FaceTets<'_> {
        let row = self.face_exists(f).then(|| f.index());
        IncidenceRow::over(&self.ft, row)
    }

    /// The four faces of `t`, in stored order.
    pub fn tet_faces(&self, t: TetHandle) -> TetFaces<'_> {
        let row = self.tet_exists(t).then(|| t.index());
        IncidenceRow::over(&self.tf, row)
    }

    /// The two endpoints of `e`; ordered yields (from, to).
    pub fn edge_vertices(&self, e: EdgeHandle, ordered: bool) -> EdgeVertices<'_> {
        let len = if self.edge_exists(e) {
            self.ev.row_len(e.index())
        } else {
            0
        };
        EdgeVertices {
            complex: self,
            edge: e,
            ordered,
            pos: 0,
            len,
        }
    }

    /// The three edges of `f`; ordered follows the oriented cycle starting
    /// at row position 0.
    pub fn face_edges(&self, f: FaceHandle, ordered: bool) -> FaceEdges<'_> {
        let len = if self.face_exists(f) {
            self.fe.row_len(f.index())
        } else {
            0
        };
        let cur = if ordered && len > 0 {
            EdgeHandle::from_index(self.fe.col_by_index(f.index(), 0))
        } else {
            EdgeHandle::invalid()
        };
        FaceEdges {
            complex: self,
            face: f,
            ordered,
            cur,
            pos: 0,
            len,
        }
    }

    /// The three corner vertices of `f`, following the oriented edge cycle.
    pub fn face_vertices(&self, f: FaceHandle) -> FaceVertices<'_> {
        FaceVertices {
            complex: self,
            face: f,
            inner: self.face_edges(f, true),
        }
    }

    /// The distinct faces touching `v`.
    pub fn vertex_faces(&self, v: VertexHandle) -> VertexFaces {
        let mut set = BTreeSet::new();
        for e in self.vertex_edges(v) {
            for f in self.edge_faces(e) {
                set.insert(f);
            }
        }
        VertexFaces { iter: set.into_iter() }
    }

    /// The distinct tets touching `v`.
    pub fn vertex_tets(&self, v: VertexHandle) -> VertexTets {
        let mut set = BTreeSet::new();
        for e in self.vertex_edges(v) {
            for f in self.edge_faces(e) {
                for t in self.face_tets(f) {
                    set.insert(t);
                }
            }
        }
        VertexTets { iter: set.into_iter() }
    }

    /// The distinct tets touching `e`.
    pub fn edge_tets(&self, e: EdgeHandle) -> EdgeTets {
        let mut set = BTreeSet::new();
        for f in self.edge_faces(e) {
            for t in self.face_tets(f) {
                set.insert(t);
            }
        }
        EdgeTets { iter: set.into_iter() }
    }

    /// The four corner vertices of `t`.
    pub fn tet_vertices(&self, t: TetHandle) -> TetVertices {
        let mut set = BTreeSet::new();
        for f in self.tet_faces(t) {
            for e in self.face_edges(f, false) {
                for v in self.edge_vertices(e, false) {
                    set.insert(v);
                }
            }
        }
        TetVertices { iter: set.into_iter() }
    }

    /// The six edges of `t`.
    pub fn tet_edges(&self, t: TetHandle) -> TetEdges {
        let mut set = BTreeSet::new();
        for f in self.tet_faces(t) {
            for e in self.face_edges(f, false) {
                set.insert(e);
            }
        }
        TetEdges { iter: set.into_iter() }
    }

    /// The distinct vertices joined to `v` by an edge.
    pub fn vertex_vertices(&self, v: VertexHandle) -> VertexVertices {
        let mut set = BTreeSet::new();
        for e in self.vertex_edges(v) {
            set.insert(self.opposite_vertex(e, v));
        }
        VertexVertices { iter: set.into_iter() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tet(c: &mut SimplicialComplex) -> (Vec<VertexHandle>, TetHandle) {
        let v: Vec<_> = (0..4).map(|_| c.add_vertex()).collect();
        let t = c.add_tet_from_vertices(v[0], v[1], v[2], v[3]);
        (v, t)
    }

    #[test]
    fn arena_scan_skips_dead_slots() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        assert!(c.delete_vertex(v1));
        let live: Vec<_> = c.vertices().collect();
        assert_eq!(live, vec![v0, v2]);
    }

    #[test]
    fn ordered_face_edges_follow_the_cycle() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        let f = c.add_face_from_vertices(v0, v1, v2);
        let stored: Vec<_> = c.face_edges(f, false).collect();
        let ordered: Vec<_> = c.face_edges(f, true).collect();
        assert_eq!(stored.len(), 3);
        // Canonical rotation makes the stored row start on its own cycle.
        assert_eq!(stored, ordered);
        assert_eq!(ordered[1], c.next_edge_in_face(f, ordered[0]));
    }

    #[test]
    fn face_vertices_yield_three_distinct_corners() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        let f = c.add_face_from_vertices(v0, v1, v2);
        let mut corners: Vec<_> = c.face_vertices(f).collect();
        corners.sort_unstable();
        assert_eq!(corners, vec![v0, v1, v2]);
    }

    #[test]
    fn derived_tet_iterators_deduplicate() {
        let mut c = SimplicialComplex::new();
        let (v, t) = tet(&mut c);
        let verts: Vec<_> = c.tet_vertices(t).collect();
        assert_eq!(verts, v);
        assert_eq!(c.tet_edges(t).count(), 6);
        assert_eq!(c.vertex_tets(v[0]).collect::<Vec<_>>(), vec![t]);
        let e = c.find_edge(v[0], v[1]);
        assert_eq!(c.edge_tets(e).collect::<Vec<_>>(), vec![t]);
        assert_eq!(c.vertex_faces(v[0]).count(), 3);
    }

    #[test]
    fn dead_handles_iterate_empty() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let e = c.add_edge(v0, v1);
        assert!(c.delete_edge(e, false));
        assert_eq!(c.edge_faces(e).count(), 0);
        assert_eq!(c.edge_vertices(e, true).count(), 0);
        assert_eq!(c.vertex_edges(VertexHandle::invalid()).count(), 0);
    }

    #[test]
    fn set_backed_iterators_survive_mutation() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        let f = c.add_face_from_vertices(v0, v1, v2);
        let snapshot = c.vertex_faces(v0);
        assert!(c.delete_face(f, false));
        // The snapshot still yields the face handle, now dead.
        let seen: Vec<_> = snapshot.collect();
        assert_eq!(seen, vec![f]);
        assert!(!c.face_exists(f));
    }
}
