//! Topological surgery: edge collapse, edge split, edge flip.
//!
//! Each operator is composed from the addition/deletion primitives plus
//! in-place relabelling passes over incidence rows, and either fully
//! succeeds or returns without mutating the complex. All three operate on
//! triangle-mesh neighbourhoods: an edge whose faces are pinned by tets is
//! refused up front.
//!
//! Relabelling writes by row position, so the from/to encoding of edge rows
//! and the cyclic order of face rows survive; relabelled face rows are then
//! re-rotated so the smallest edge index is back at position 0.

use std::collections::{BTreeMap, BTreeSet};

use crate::topology::complex::SimplicialComplex;
use crate::topology::handles::{EdgeHandle, FaceHandle, VertexHandle};

impl SimplicialComplex {
    /// Collapse `edge`, removing `vert_to_remove` and fusing it into the
    /// other endpoint. Incident faces are deleted, surviving edges at the
    /// removed vertex are relabelled onto the kept vertex, and edges made
    /// redundant by the fusion are merged (flipping their sign within any
    /// face if the pair pointed in opposite directions).
    ///
    /// Returns the kept vertex. Returns an invalid handle, with no
    /// mutation, if the edge is dead, `vert_to_remove` is not one of its endpoints,
    /// an incident face is pinned by a tet, or the collapse would fold two
    /// faces onto each other (a pair of incident faces whose neighbourhoods
    /// share an edge besides `edge`).
    pub fn collapse_edge(
        &mut self,
        edge: EdgeHandle,
        vert_to_remove: VertexHandle,
    ) -> VertexHandle {
        if !self.edge_exists(edge) {
            return VertexHandle::invalid();
        }
        let from_v = self.from_vertex(edge);
        let to_v = self.to_vertex(edge);
        if vert_to_remove != from_v && vert_to_remove != to_v {
            return VertexHandle::invalid();
        }
        let vert_to_keep = if from_v == vert_to_remove { to_v } else { from_v };

        let faces_to_delete: Vec<FaceHandle> = self.edge_faces(edge).collect();
        for &f in &faces_to_delete {
            if self.face_tet_count(f) > 0 {
                return VertexHandle::invalid();
            }
        }

        // No-fold check: expand each incident face's other edges by their
        // other faces' edges; a repeat means the collapse would merge two
        // faces, which is unacceptable.
        for &f in &faces_to_delete {
            let mut neighbour_edges: BTreeSet<EdgeHandle> = BTreeSet::new();
            for fe in self.face_edges(f, false) {
                if fe == edge {
                    continue;
                }
                for nf in self.edge_faces(fe) {
                    if nf == f {
                        continue;
                    }
                    for ne in self.face_edges(nf, false) {
                        if !neighbour_edges.insert(ne) {
                            return VertexHandle::invalid();
                        }
                    }
                }
            }
        }

        // Delete the faces and then the edge, leaving a hole to be stitched.
        for &f in &faces_to_delete {
            let deleted = self.delete_face(f, false);
            debug_assert!(deleted);
        }
        let deleted = self.delete_edge(edge, false);
        debug_assert!(deleted);

        // Relabel the surviving edges at the removed vertex onto the kept
        // vertex, in place and at the same row position, so each edge keeps
        // its slot (and any property data) and its from/to encoding.
        let vtr = vert_to_remove.index();
        let vtk = vert_to_keep.index();
        let edges_at_removed: Vec<(usize, i8)> = (0..self.ve.row_len(vtr))
            .map(|k| (self.ve.col_by_index(vtr, k), self.ve.value_by_index(vtr, k)))
            .collect();
        for &(e, sign) in &edges_at_removed {
            let Some(pos) = (0..self.ev.row_len(e)).find(|&k| self.ev.col_by_index(e, k) == vtr)
            else {
                continue;
            };
            self.ve.remove(vtr, e);
            self.ev.set_by_index(e, pos, vtk, sign);
            self.ve.set(vtk, e, sign);
        }

        // The fusion can leave pairs of edges joining the same endpoints.
        // Keep the first of each pair and relabel faces off the other.
        let mut first_edge_at: BTreeMap<usize, usize> = BTreeMap::new();
        let mut duplicates: Vec<(usize, usize)> = Vec::new();
        for k in 0..self.ve.row_len(vtk) {
            let e = self.ve.col_by_index(vtk, k);
            let eh = EdgeHandle::from_index(e);
            let other = self.opposite_vertex(eh, vert_to_keep).index();
            match first_edge_at.get(&other) {
                Some(&survivor) => duplicates.push((survivor, e)),
                None => {
                    first_edge_at.insert(other, e);
                }
            }
        }

        for &(survivor, discarded) in &duplicates {
            if !self.edge_exists(EdgeHandle::from_index(discarded)) {
                continue;
            }
            // Opposite directions flip the edge's sign in each face entry.
            let flip: i8 = if self.ev.col_by_index(survivor, 0) == self.ev.col_by_index(discarded, 0)
            {
                1
            } else {
                -1
            };

            let faces_of_discarded: Vec<(usize, i8)> = (0..self.ef.row_len(discarded))
                .map(|k| {
                    (
                        self.ef.col_by_index(discarded, k),
                        self.ef.value_by_index(discarded, k),
                    )
                })
                .collect();
            for &(face, edge_sign) in &faces_of_discarded {
                let new_sign = flip * edge_sign;
                let Some(pos) =
                    (0..self.fe.row_len(face)).find(|&k| self.fe.col_by_index(face, k) == discarded)
                else {
                    continue;
                };
                self.ef.remove(discarded, face);
                self.fe.set_by_index(face, pos, survivor, new_sign);
                self.ef.set(survivor, face, new_sign);
                self.canonicalize_face_row(face);
            }

            let deleted = self.delete_edge(EdgeHandle::from_index(discarded), false);
            debug_assert!(deleted);
        }

        let deleted = self.delete_vertex(vert_to_remove);
        debug_assert!(deleted);

        vert_to_keep
    }

    /// Split `edge` at a new midpoint vertex. Every incident face is
    /// replaced by two faces joined along a new spoke from the face's third
    /// vertex to the midpoint, preserving each face's orientation. The new
    /// face handles are appended to `new_faces` (cleared first).
    ///
    /// Returns the midpoint vertex. Returns an invalid handle, with no
    /// mutation, if the edge is dead or an incident face is pinned by a tet.
    pub fn split_edge(&mut self, edge: EdgeHandle, new_faces: &mut Vec<FaceHandle>) -> VertexHandle {
        new_faces.clear();
        if !self.edge_exists(edge) {
            return VertexHandle::invalid();
        }
        let faces_to_delete: Vec<FaceHandle> = self.edge_faces(edge).collect();
        for &f in &faces_to_delete {
            if self.face_tet_count(f) > 0 {
                return VertexHandle::invalid();
            }
        }

        let from_v = self.from_vertex(edge);
        let to_v = self.to_vertex(edge);

        let mid = self.add_vertex();
        let half_from = self.add_edge(from_v, mid);
        let half_to = self.add_edge(to_v, mid);

        for &fh in &faces_to_delete {
            // The face's third vertex gets a spoke down to the midpoint.
            let corners: Vec<VertexHandle> = self.face_vertices(fh).collect();
            let Some(&other_v) = corners.iter().find(|&&v| v != from_v && v != to_v) else {
                continue;
            };
            let spoke = {
                let found = self.find_edge(other_v, mid);
                if found.is_valid() {
                    found
                } else {
                    self.add_edge(other_v, mid)
                }
            };

            // One new triangle per rim edge, built by walking the old
            // face's cycle and substituting the split edge with the half on
            // the rim edge's side; the remaining edge becomes the spoke.
            // Walking the cycle keeps the new orientation consistent with
            // the old.
            let cycle: Vec<EdgeHandle> = self.face_edges(fh, true).collect();
            for &rim in &cycle {
                if rim == edge {
                    continue;
                }
                let half = if self.from_vertex(rim) == from_v || self.to_vertex(rim) == from_v {
                    half_from
                } else {
                    half_to
                };
                let triple: Vec<EdgeHandle> = cycle
                    .iter()
                    .map(|&e| {
                        if e == rim {
                            rim
                        } else if e == edge {
                            half
                        } else {
                            spoke
                        }
                    })
                    .collect();
                let new_face = self.add_face(triple[0], triple[1], triple[2]);
                new_faces.push(new_face);
            }
        }

        // Drop the originals as a post-process, keeping the walks above
        // clean of dead rows.
        for &f in &faces_to_delete {
            let deleted = self.delete_face(f, false);
            debug_assert!(deleted);
        }
        let deleted = self.delete_edge(edge, false);
        debug_assert!(deleted);

        mid
    }

    /// Flip `edge`: replace the diagonal of the quad formed by its two
    /// incident faces with the opposite diagonal, rebuilding the two faces
    /// around it.
    ///
    /// Returns the new edge. Returns an invalid handle, with no mutation,
    /// if the edge does not have exactly two incident faces, a face is pinned
    /// by a tet, the two off-edge vertices coincide, or an edge between
    /// them already exists.
    pub fn flip_edge(&mut self, edge: EdgeHandle) -> EdgeHandle {
        if !self.edge_exists(edge) {
            return EdgeHandle::invalid();
        }
        if self.edge_face_count(edge) != 2 {
            return EdgeHandle::invalid();
        }
        let from_v = self.from_vertex(edge);
        let to_v = self.to_vertex(edge);

        let faces: Vec<FaceHandle> = self.edge_faces(edge).collect();
        let (fh, fh2) = (faces[0], faces[1]);
        if self.face_tet_count(fh) > 0 || self.face_tet_count(fh2) > 0 {
            return EdgeHandle::invalid();
        }

        let Some(a) = self.third_vertex(fh, from_v, to_v) else {
            return EdgeHandle::invalid();
        };
        let Some(b) = self.third_vertex(fh2, from_v, to_v) else {
            return EdgeHandle::invalid();
        };
        if a == b {
            return EdgeHandle::invalid();
        }
        if self.find_edge(a, b).is_valid() {
            return EdgeHandle::invalid();
        }

        let new_edge = self.add_edge(a, b);
        debug_assert!(new_edge.is_valid());

        // The four perimeter edges in cyclic order, two per old face.
        let e0 = self.next_edge_in_face(fh, edge);
        let e1 = self.next_edge_in_face(fh, e0);
        let mut e2 = self.next_edge_in_face(fh2, edge);
        let mut e3 = self.next_edge_in_face(fh2, e2);

        // Pair the perimeter by shared vertex so each new face closes.
        if !self.edges_share_vertex(e1, e2) {
            std::mem::swap(&mut e2, &mut e3);
        }

        let nf0 = self.add_face(e1, e2, new_edge);
        let nf1 = self.add_face(e3, e0, new_edge);
        debug_assert!(nf0.is_valid() && nf1.is_valid());

        let deleted = self.delete_face(fh, false);
        debug_assert!(deleted);
        let deleted = self.delete_face(fh2, false);
        debug_assert!(deleted);
        let deleted = self.delete_edge(edge, false);
        debug_assert!(deleted);

        new_edge
    }

    /// The corner of `f` that is neither `u` nor `v`.
    fn third_vertex(
        &self,
        f: FaceHandle,
        u: VertexHandle,
        v: VertexHandle,
    ) -> Option<VertexHandle> {
        self.face_vertices(f).find(|&w| w != u && w != v)
    }

    /// Whether two edges have an endpoint in common.
    fn edges_share_vertex(&self, e0: EdgeHandle, e1: EdgeHandle) -> bool {
        let (a, b) = (self.from_vertex(e0), self.to_vertex(e0));
        let (c, d) = (self.from_vertex(e1), self.to_vertex(e1));
        a == c || a == d || b == c || b == d
    }

    /// Rotate a face row until the smallest edge column is back at
    /// position 0.
    fn canonicalize_face_row(&mut self, face: usize) {
        let len = self.fe.row_len(face);
        if len == 0 {
            return;
        }
        let min = (0..len)
            .map(|k| self.fe.col_by_index(face, k))
            .min()
            .unwrap_or(0);
        let mut guard = 0;
        while self.fe.col_by_index(face, 0) != min && guard < len {
            self.fe.cycle_row(face);
            guard += 1;
        }
    }
}
