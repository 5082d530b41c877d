//! Deletion primitives.
//!
//! A simplex may only be deleted while it has no higher-dimensional
//! incidences; the slot is then pooled for reuse. With `recurse` set, each
//! sub-simplex is offered for deletion afterwards and disappears exactly
//! when the removal left it orphaned.

use super::SimplicialComplex;
use crate::topology::_debug_invariants::debug_invariants;
use crate::topology::handles::{EdgeHandle, FaceHandle, TetHandle, VertexHandle};

impl SimplicialComplex {
    /// Delete an isolated vertex. Fails (returning `false`) if the vertex is
    /// dead or still has incident edges.
    pub fn delete_vertex(&mut self, vertex: VertexHandle) -> bool {
        if !self.vertex_exists(vertex) {
            return false;
        }
        if self.ve.row_len(vertex.index()) != 0 {
            return false;
        }

        self.verts[vertex.index()] = false;
        self.dead_verts.push(vertex.index());
        self.n_verts -= 1;
        debug_invariants!(self);
        true
    }

    /// Delete an edge with no incident faces. Fails (returning `false`) if
    /// the edge is dead or still used by a face. With `recurse`, endpoint
    /// vertices left isolated are deleted too.
    pub fn delete_edge(&mut self, edge: EdgeHandle, recurse: bool) -> bool {
        if !self.edge_exists(edge) {
            return false;
        }
        if self.ef.row_len(edge.index()) != 0 {
            return false;
        }

        let row = edge.index();
        let vert_cols: Vec<usize> = (0..self.ev.row_len(row))
            .map(|k| self.ev.col_by_index(row, k))
            .collect();

        for &v in &vert_cols {
            self.ve.remove(v, row);
        }
        self.ev.zero_row(row);
        self.dead_edges.push(row);
        self.n_edges -= 1;

        if recurse {
            for &v in &vert_cols {
                self.delete_vertex(VertexHandle::from_index(v));
            }
        }
        debug_invariants!(self);
        true
    }

    /// Delete a face with no incident tets. Fails (returning `false`) if the
    /// face is dead or still used by a tet. With `recurse`, composing edges
    /// left orphaned are deleted recursively.
    pub fn delete_face(&mut self, face: FaceHandle, recurse: bool) -> bool {
        if !self.face_exists(face) {
            return false;
        }
        if self.ft.row_len(face.index()) != 0 {
            return false;
        }

        let row = face.index();
        let edge_cols: Vec<usize> = (0..self.fe.row_len(row))
            .map(|k| self.fe.col_by_index(row, k))
            .collect();

        for &e in &edge_cols {
            self.ef.remove(e, row);
        }
        self.fe.zero_row(row);
        self.dead_faces.push(row);
        self.n_faces -= 1;

        if recurse {
            for &e in &edge_cols {
                self.delete_edge(EdgeHandle::from_index(e), recurse);
            }
        }
        debug_invariants!(self);
        true
    }

    /// Delete a tet. There are no higher-dimensional simplices, so this
    /// fails only if the tet is already dead. With `recurse`, composing
    /// faces left orphaned are deleted recursively.
    pub fn delete_tet(&mut self, tet: TetHandle, recurse: bool) -> bool {
        if !self.tet_exists(tet) {
            return false;
        }

        let row = tet.index();
        let face_cols: Vec<usize> = (0..self.tf.row_len(row))
            .map(|k| self.tf.col_by_index(row, k))
            .collect();

        for &f in &face_cols {
            self.ft.remove(f, row);
        }
        self.tf.zero_row(row);
        self.dead_tets.push(row);
        self.n_tets -= 1;

        if recurse {
            for &f in &face_cols {
                self.delete_face(FaceHandle::from_index(f), recurse);
            }
        }
        debug_invariants!(self);
        true
    }
}
