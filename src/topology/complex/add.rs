//! Addition primitives and the orientation resolution they perform.
//!
//! Additions never mutate on failure: every check, including orientation
//! resolution, runs before a slot is allocated.

use std::collections::BTreeMap;

use super::{DuplicateSimplexMode, SimplicialComplex};
use crate::topology::_debug_invariants::debug_invariants;
use crate::topology::handles::{EdgeHandle, FaceHandle, TetHandle, VertexHandle};

#[inline]
fn flip_sign(flip: bool) -> i8 {
    if flip { -1 } else { 1 }
}

impl SimplicialComplex {
    /// Add an isolated vertex. Always succeeds.
    pub fn add_vertex(&mut self) -> VertexHandle {
        let idx = self.alloc_vertex_slot();
        self.n_verts += 1;
        debug_invariants!(self);
        VertexHandle::from_index(idx)
    }

    /// Add an edge oriented from `v0` to `v1`.
    ///
    /// Returns an invalid handle if either vertex is dead or `v0 == v1`.
    /// Under safe mode, also rejects duplicates according to the active
    /// [`DuplicateSimplexMode`].
    pub fn add_edge(&mut self, v0: VertexHandle, v1: VertexHandle) -> EdgeHandle {
        if !self.vertex_exists(v0) || !self.vertex_exists(v1) {
            return EdgeHandle::invalid();
        }
        if v0 == v1 {
            return EdgeHandle::invalid();
        }
        if self.safe_mode() && self.edge_is_duplicate(v0, v1) {
            return EdgeHandle::invalid();
        }

        let new_index = self.alloc_edge_slot();

        // Position 0 is the from vertex, position 1 the to vertex.
        self.ev.set_by_index(new_index, 0, v0.index(), -1);
        self.ev.set_by_index(new_index, 1, v1.index(), 1);
        self.ve.set(v0.index(), new_index, -1);
        self.ve.set(v1.index(), new_index, 1);

        self.n_edges += 1;
        debug_invariants!(self);
        EdgeHandle::from_index(new_index)
    }

    /// Add a face over three edges, in the order given.
    ///
    /// The edges need not be consistently oriented: flips are derived so the
    /// edges chain head-to-tail around the face, and the stored row is
    /// cyclically rotated so the smallest edge index sits at position 0.
    ///
    /// Returns an invalid handle if any edge is dead or repeated. Under safe
    /// mode, also rejects duplicates per the active mode and any edge triple
    /// whose endpoints do not close into a triangle.
    pub fn add_face(&mut self, e0: EdgeHandle, e1: EdgeHandle, e2: EdgeHandle) -> FaceHandle {
        if !self.edge_exists(e0) || !self.edge_exists(e1) || !self.edge_exists(e2) {
            return FaceHandle::invalid();
        }
        if e0 == e1 || e1 == e2 || e0 == e2 {
            return FaceHandle::invalid();
        }

        // Signs follow the input ordering; flips make the edge vertices
        // connect properly.
        let signs = self.face_orientation_signs(e0, e1, e2);
        let mut row = [
            (e0.index(), signs[0]),
            (e1.index(), signs[1]),
            (e2.index(), signs[2]),
        ];
        // Canonical rotation: the smallest edge index goes first.
        while !(row[0].0 <= row[1].0 && row[0].0 <= row[2].0) {
            row.rotate_left(1);
        }

        if self.safe_mode() {
            let inputs = [e0, e1, e2];
            match self.duplicate_mode() {
                DuplicateSimplexMode::Arbitrary => {}
                DuplicateSimplexMode::Relaxed => {
                    if self.face_is_exact_duplicate(&row) {
                        return FaceHandle::invalid();
                    }
                }
                DuplicateSimplexMode::None => {
                    // Reject partial matches: a face sharing two or more of
                    // these edges, in either orientation.
                    let mut shared: BTreeMap<usize, u32> = BTreeMap::new();
                    for &e in &inputs {
                        for k in 0..self.ef.row_len(e.index()) {
                            *shared.entry(self.ef.col_by_index(e.index(), k)).or_insert(0) += 1;
                        }
                    }
                    if shared.values().any(|&n| n >= 2) {
                        return FaceHandle::invalid();
                    }
                }
            }

            // The composing edges must share exactly 3 vertices, twice each.
            let mut vert_uses: BTreeMap<usize, u32> = BTreeMap::new();
            for &e in &inputs {
                *vert_uses.entry(self.from_vertex(e).index()).or_insert(0) += 1;
                *vert_uses.entry(self.to_vertex(e).index()).or_insert(0) += 1;
            }
            if vert_uses.len() != 3 || vert_uses.values().any(|&n| n != 2) {
                return FaceHandle::invalid();
            }
        }

        let new_index = self.alloc_face_slot();

        for (pos, &(edge, sign)) in row.iter().enumerate() {
            self.fe.set_by_index(new_index, pos, edge, sign);
            self.ef.set(edge, new_index, sign);
        }

        self.n_faces += 1;
        debug_invariants!(self);
        FaceHandle::from_index(new_index)
    }

    /// Add a tet over four faces. The in/out orientation is anchored on
    /// `f0`, possibly flipped.
    ///
    /// Returns an invalid handle if any face is dead or repeated, or if a
    /// face shares no edge with `f0`. Under safe mode, also rejects
    /// duplicates per the active mode and any face quadruple whose edges do
    /// not close into a tetrahedron.
    pub fn add_tet(
        &mut self,
        f0: FaceHandle,
        f1: FaceHandle,
        f2: FaceHandle,
        f3: FaceHandle,
        flip_face0: bool,
    ) -> TetHandle {
        if !self.face_exists(f0)
            || !self.face_exists(f1)
            || !self.face_exists(f2)
            || !self.face_exists(f3)
        {
            return TetHandle::invalid();
        }
        if f0 == f1 || f0 == f2 || f0 == f3 || f1 == f2 || f1 == f3 || f2 == f3 {
            return TetHandle::invalid();
        }

        let inputs = [f0, f1, f2, f3];
        let Some(signs) = self.tet_orientation_signs(f0, f1, f2, f3, flip_face0) else {
            // A face shares no edge with f0: the quadruple cannot close.
            return TetHandle::invalid();
        };

        if self.safe_mode() {
            match self.duplicate_mode() {
                DuplicateSimplexMode::Arbitrary => {}
                DuplicateSimplexMode::Relaxed => {
                    let oriented = [
                        (f0.index(), signs[0]),
                        (f1.index(), signs[1]),
                        (f2.index(), signs[2]),
                        (f3.index(), signs[3]),
                    ];
                    if self.tet_is_exact_duplicate(&oriented) {
                        return TetHandle::invalid();
                    }
                }
                DuplicateSimplexMode::None => {
                    // Reject tets sharing two or more of these faces; that
                    // cannot happen for distinct tets embedded in 3D.
                    let mut shared: BTreeMap<usize, u32> = BTreeMap::new();
                    for &f in &inputs {
                        for k in 0..self.ft.row_len(f.index()) {
                            *shared.entry(self.ft.col_by_index(f.index(), k)).or_insert(0) += 1;
                        }
                    }
                    if shared.values().any(|&n| n >= 2) {
                        return TetHandle::invalid();
                    }
                }
            }

            // The composing faces must share exactly 6 edges, twice each.
            let mut edge_uses: BTreeMap<usize, u32> = BTreeMap::new();
            for &f in &inputs {
                for k in 0..self.fe.row_len(f.index()) {
                    *edge_uses.entry(self.fe.col_by_index(f.index(), k)).or_insert(0) += 1;
                }
            }
            if edge_uses.len() != 6 || edge_uses.values().any(|&n| n != 2) {
                return TetHandle::invalid();
            }
        }

        let new_index = self.alloc_tet_slot();

        for (pos, (&f, &sign)) in inputs.iter().zip(signs.iter()).enumerate() {
            self.tf.set_by_index(new_index, pos, f.index(), sign);
            self.ft.set(f.index(), new_index, sign);
        }

        self.n_tets += 1;
        debug_invariants!(self);
        TetHandle::from_index(new_index)
    }

    /// Add a face directly from three vertices, creating any missing edges.
    ///
    /// Slower than [`add_face`](Self::add_face): each edge is looked up by
    /// its endpoints first.
    pub fn add_face_from_vertices(
        &mut self,
        v0: VertexHandle,
        v1: VertexHandle,
        v2: VertexHandle,
    ) -> FaceHandle {
        if !self.vertex_exists(v0) || !self.vertex_exists(v1) || !self.vertex_exists(v2) {
            return FaceHandle::invalid();
        }

        let e01 = self.edge_between(v0, v1);
        let e02 = self.edge_between(v2, v0);
        let e12 = self.edge_between(v1, v2);

        self.add_face(e01, e12, e02)
    }

    /// Add a tet directly from four vertices, creating any missing edges and
    /// faces. Slower than [`add_tet`](Self::add_tet).
    pub fn add_tet_from_vertices(
        &mut self,
        v0: VertexHandle,
        v1: VertexHandle,
        v2: VertexHandle,
        v3: VertexHandle,
    ) -> TetHandle {
        if !self.vertex_exists(v0)
            || !self.vertex_exists(v1)
            || !self.vertex_exists(v2)
            || !self.vertex_exists(v3)
        {
            return TetHandle::invalid();
        }

        let e0 = self.edge_between(v0, v1);
        let e1 = self.edge_between(v0, v2);
        let e2 = self.edge_between(v0, v3);
        let e3 = self.edge_between(v1, v2);
        let e4 = self.edge_between(v1, v3);
        let e5 = self.edge_between(v2, v3);

        let f0 = self.face_between(e0, e2, e4);
        let f1 = self.face_between(e3, e4, e5);
        let f2 = self.face_between(e0, e1, e3);
        let f3 = self.face_between(e1, e2, e5);

        self.add_tet(f0, f1, f2, f3, false)
    }

    /// Find the edge joining `v0` and `v1`, creating it if absent.
    fn edge_between(&mut self, v0: VertexHandle, v1: VertexHandle) -> EdgeHandle {
        let found = self.find_edge(v0, v1);
        if found.is_valid() {
            found
        } else {
            self.add_edge(v0, v1)
        }
    }

    /// Find the face over the given edges, creating it if absent.
    fn face_between(&mut self, e0: EdgeHandle, e1: EdgeHandle, e2: EdgeHandle) -> FaceHandle {
        let found = self.find_face(e0, e1, e2);
        if found.is_valid() {
            found
        } else {
            self.add_face(e0, e1, e2)
        }
    }

    /// Derive the three edge flips that chain `e0,e1,e2` head-to-tail
    /// around a face. Pure: reads only endpoint data.
    fn face_orientation_signs(&self, e0: EdgeHandle, e1: EdgeHandle, e2: EdgeHandle) -> [i8; 3] {
        // If the head of e0 matches neither endpoint of e1 it must point the
        // other way, towards e1.
        let flip0 = self.to_vertex(e0) != self.from_vertex(e1) && self.to_vertex(e0) != self.to_vertex(e1);

        // The shared vertex of e0/e1 must sit at e1's tail.
        let shared0 = if flip0 { self.from_vertex(e0) } else { self.to_vertex(e0) };
        let flip1 = shared0 != self.from_vertex(e1);

        // Likewise for e1/e2.
        let shared1 = if flip1 { self.from_vertex(e1) } else { self.to_vertex(e1) };
        let flip2 = shared1 != self.from_vertex(e2);

        [flip_sign(flip0), flip_sign(flip1), flip_sign(flip2)]
    }

    /// Derive the four tet→face signs anchored on `f0`. For each other face
    /// the flip is chosen so the pair traverses the edge it shares with
    /// `f0` in opposite directions once the tet signs are applied; closure
    /// of the four faces then makes every face pair consistent. Returns
    /// `None` when a face shares no edge with `f0`.
    fn tet_orientation_signs(
        &self,
        f0: FaceHandle,
        f1: FaceHandle,
        f2: FaceHandle,
        f3: FaceHandle,
        flip_face0: bool,
    ) -> Option<[i8; 4]> {
        let anchor = flip_sign(!flip_face0);
        let mut signs = [anchor, 0, 0, 0];
        for (i, &fi) in [f1, f2, f3].iter().enumerate() {
            let shared = self.shared_edge(f0, fi);
            if !shared.is_valid() {
                return None;
            }
            let in_f0 = self.fe.get(f0.index(), shared.index());
            let in_fi = self.fe.get(fi.index(), shared.index());
            // anchor * in_f0 must oppose signs[i+1] * in_fi.
            signs[i + 1] = -anchor * in_f0 * in_fi;
        }
        Some(signs)
    }

    /// Whether an edge joining `v0` and `v1` already exists, per the active
    /// duplicate mode.
    fn edge_is_duplicate(&self, v0: VertexHandle, v1: VertexHandle) -> bool {
        match self.duplicate_mode() {
            DuplicateSimplexMode::Arbitrary => false,
            DuplicateSimplexMode::Relaxed => {
                // Only an identically oriented edge counts.
                for k in 0..self.ve.row_len(v0.index()) {
                    let e = self.ve.col_by_index(v0.index(), k);
                    if self.ev.col_by_index(e, 0) == v0.index()
                        && self.ev.col_by_index(e, 1) == v1.index()
                    {
                        return true;
                    }
                }
                false
            }
            DuplicateSimplexMode::None => {
                // Any edge incident to both vertices, regardless of direction.
                for k in 0..self.ve.row_len(v0.index()) {
                    let e = self.ve.col_by_index(v0.index(), k);
                    if self.ev.get(e, v1.index()) != 0 {
                        return true;
                    }
                }
                false
            }
        }
    }

    /// Whether a live face stores exactly this canonical oriented row.
    fn face_is_exact_duplicate(&self, row: &[(usize, i8); 3]) -> bool {
        let anchor = row[0].0;
        for k in 0..self.ef.row_len(anchor) {
            let f = self.ef.col_by_index(anchor, k);
            if self.fe.row_len(f) != 3 {
                continue;
            }
            // Existing rows are canonically rotated too, so positions align.
            let same = (0..3).all(|pos| {
                self.fe.col_by_index(f, pos) == row[pos].0
                    && self.fe.value_by_index(f, pos) == row[pos].1
            });
            if same {
                return true;
            }
        }
        false
    }

    /// Whether a live tet uses exactly these faces with these signs.
    fn tet_is_exact_duplicate(&self, oriented: &[(usize, i8); 4]) -> bool {
        let anchor = oriented[0].0;
        for k in 0..self.ft.row_len(anchor) {
            let t = self.ft.col_by_index(anchor, k);
            if self.tf.row_len(t) != 4 {
                continue;
            }
            if oriented.iter().all(|&(f, s)| self.tf.get(t, f) == s) {
                return true;
            }
        }
        false
    }
}
