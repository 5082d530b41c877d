//! Manifoldness predicates.
//!
//! A simplex is manifold when its star forms a (possibly bordered)
//! disk-like neighbourhood of the local dimension. The 3D tests walk the
//! star through (tet, face) adjacencies; the 2D tests walk it through
//! (face, edge) adjacencies. Both must visit every member exactly once:
//! a closed cycle if there is no boundary, a single path otherwise.

use std::collections::{BTreeSet, VecDeque};

use super::SimplicialComplex;
use crate::topology::handles::{EdgeHandle, FaceHandle, TetHandle, VertexHandle};

impl SimplicialComplex {
    /// A face is manifold iff it belongs to at most two tets. In a pure 2D
    /// complex a face is always manifold.
    pub fn is_manifold_face(&self, f: FaceHandle) -> bool {
        if !self.face_exists(f) {
            return false;
        }
        self.face_tet_count(f) <= 2
    }

    /// An edge with tet-incident faces is manifold iff no incident face is
    /// over-shared, no incident face is free of tets, and the walk around
    /// the edge through (tet, face) pairs visits every incident face once.
    /// Otherwise the pure-face rule applies: at most two incident faces.
    pub fn is_manifold_edge(&self, e: EdgeHandle) -> bool {
        if !self.edge_exists(e) {
            return false;
        }

        let mut part_of_tets = false;
        let mut free_face = false;
        let mut boundary_face = FaceHandle::invalid();
        let mut face_set: BTreeSet<FaceHandle> = BTreeSet::new();

        for f in self.edge_faces(e) {
            face_set.insert(f);
            let tets = self.face_tet_count(f);
            if tets == 0 {
                free_face = true;
            } else if tets <= 2 {
                part_of_tets = true;
                if tets == 1 {
                    boundary_face = f;
                }
            } else {
                // A non-manifold face makes the edge non-manifold outright.
                return false;
            }
        }

        if !part_of_tets {
            return self.edge_face_count(e) <= 2;
        }
        if free_face {
            return false;
        }

        // Walk around the edge via tet-face neighbour steps. No face has
        // more than two tets here, so the walk never branches: it either
        // closes into a cycle or runs between the two boundary faces.
        let mut unvisited = face_set.clone();
        let start = if boundary_face.is_valid() {
            boundary_face
        } else {
            match face_set.iter().next() {
                Some(&f) => f,
                None => return true,
            }
        };
        unvisited.remove(&start);

        let mut prev_face = start;
        let mut prev_tet = TetHandle::invalid();
        loop {
            let mut next_tet = TetHandle::invalid();
            for t in self.face_tets(prev_face) {
                if t != prev_tet {
                    next_tet = t;
                    break;
                }
            }
            if !next_tet.is_valid() {
                // Ran out of tets: dead end at a boundary face.
                break;
            }

            let mut next_face = FaceHandle::invalid();
            for f in self.tet_faces(next_tet) {
                if f != prev_face && face_set.contains(&f) {
                    next_face = f;
                    break;
                }
            }
            if !next_face.is_valid() {
                break;
            }

            prev_face = next_face;
            prev_tet = next_tet;
            unvisited.remove(&prev_face);
            if prev_face == start || unvisited.is_empty() {
                break;
            }
        }

        unvisited.is_empty()
    }

    /// A vertex inside a tet-bearing star is manifold iff there is no free
    /// face or free edge in the one-ring, every one-ring face is reachable
    /// from any other via tet-face steps, and the boundary faces around the
    /// vertex connect through its edges into a single closed cycle. In a 2D
    /// star the one-ring edges must form a single path or cycle; in 1D the
    /// vertex must have at most two incident edges.
    pub fn is_manifold_vertex(&self, v: VertexHandle) -> bool {
        if !self.vertex_exists(v) {
            return false;
        }

        let mut part_of_tets = false;
        let mut free_face = false;
        let mut free_edge = false;
        for e in self.vertex_edges(v) {
            if self.edge_face_count(e) == 0 {
                free_edge = true;
            }
            for f in self.edge_faces(e) {
                if self.face_tet_count(f) > 0 {
                    part_of_tets = true;
                } else {
                    free_face = true;
                }
            }
        }

        if part_of_tets {
            if free_face || free_edge {
                return false;
            }
            return self.tet_star_is_manifold(v);
        }

        // 2D: each one-ring edge carries at most two faces, and walking
        // edge -> face -> next-edge must visit every one-ring edge once.
        let mut part_of_faces = false;
        let mut edge_set: BTreeSet<EdgeHandle> = BTreeSet::new();
        let mut boundary_edge = EdgeHandle::invalid();
        for e in self.vertex_edges(v) {
            edge_set.insert(e);
            let faces = self.edge_face_count(e);
            if faces > 0 {
                part_of_faces = true;
            }
            if faces == 1 {
                boundary_edge = e;
            }
            if faces >= 3 {
                return false;
            }
        }

        if part_of_faces {
            if free_edge {
                return false;
            }
            let mut unvisited = edge_set.clone();
            let start = if boundary_edge.is_valid() {
                boundary_edge
            } else {
                match edge_set.iter().next() {
                    Some(&e) => e,
                    None => return true,
                }
            };
            unvisited.remove(&start);

            let mut prev_edge = start;
            let mut prev_face = FaceHandle::invalid();
            loop {
                let mut cur_face = FaceHandle::invalid();
                for f in self.edge_faces(prev_edge) {
                    if f != prev_face {
                        cur_face = f;
                        break;
                    }
                }
                if !cur_face.is_valid() {
                    break;
                }

                let mut next_edge = EdgeHandle::invalid();
                for fe in self.face_edges(cur_face, false) {
                    if fe != prev_edge && edge_set.contains(&fe) {
                        next_edge = fe;
                        break;
                    }
                }
                if !next_edge.is_valid() {
                    break;
                }

                prev_edge = next_edge;
                prev_face = cur_face;
                unvisited.remove(&prev_edge);
                if prev_edge == start || unvisited.is_empty() {
                    break;
                }
            }
            return unvisited.is_empty();
        }

        // 1D.
        self.vertex_edge_count(v) <= 2
    }

    /// 3D clause of the vertex test: (i) all one-ring faces mutually
    /// reachable through tets, (ii) boundary faces form one closed cycle
    /// connected through edges at `v`, with no edge joining more than two
    /// boundary faces.
    fn tet_star_is_manifold(&self, v: VertexHandle) -> bool {
        let mut face_set: BTreeSet<FaceHandle> = BTreeSet::new();
        let mut boundary_faces: BTreeSet<FaceHandle> = BTreeSet::new();
        for e in self.vertex_edges(v) {
            for f in self.edge_faces(e) {
                face_set.insert(f);
                if self.face_tet_count(f) == 1 {
                    boundary_faces.insert(f);
                }
            }
        }
        let Some(&first) = face_set.iter().next() else {
            return true;
        };

        // Flood across tet-face neighbours.
        let mut unvisited = face_set.clone();
        let mut queue: VecDeque<FaceHandle> = VecDeque::new();
        queue.push_back(first);
        while let Some(cur) = queue.pop_front() {
            if !unvisited.remove(&cur) {
                continue;
            }
            for t in self.face_tets(cur) {
                for nbr in self.tet_faces(t) {
                    if nbr == cur || !face_set.contains(&nbr) {
                        continue;
                    }
                    if unvisited.contains(&nbr) {
                        queue.push_back(nbr);
                    }
                }
            }
        }
        let all_reachable = unvisited.is_empty();

        // Two tet fans meeting only at the vertex pass the flood when they
        // share a tet chain elsewhere, so also require the boundary faces to
        // close into a single cycle around v.
        let mut unvisited = boundary_faces.clone();
        if let Some(&start) = boundary_faces.iter().next() {
            let mut prev_face = start;
            let mut prev_edge = EdgeHandle::invalid();
            loop {
                let mut cur_edge = EdgeHandle::invalid();
                for fe in self.face_edges(prev_face, false) {
                    if fe != prev_edge && self.is_incident_vertex_edge(v, fe) {
                        cur_edge = fe;
                        break;
                    }
                }
                if !cur_edge.is_valid() {
                    break;
                }

                let boundary_count = self
                    .edge_faces(cur_edge)
                    .filter(|f| boundary_faces.contains(f))
                    .count();
                if boundary_count > 2 {
                    // Two tets joined through a single edge.
                    return false;
                }

                let mut next_face = FaceHandle::invalid();
                for f in self.edge_faces(cur_edge) {
                    if f != prev_face && boundary_faces.contains(&f) {
                        next_face = f;
                        break;
                    }
                }
                if !next_face.is_valid() {
                    break;
                }

                prev_face = next_face;
                prev_edge = cur_edge;
                unvisited.remove(&prev_face);
                if prev_face == start || unvisited.is_empty() {
                    break;
                }
            }
        }
        let boundary_connected = unvisited.is_empty();

        all_reachable && boundary_connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_of_two_faces_is_manifold() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let v2 = c.add_vertex();
        let v3 = c.add_vertex();
        let f0 = c.add_face_from_vertices(v0, v1, v2);
        let f1 = c.add_face_from_vertices(v0, v1, v3);
        assert!(f0.is_valid() && f1.is_valid());
        let shared = c.shared_edge(f0, f1);
        assert!(c.is_manifold_edge(shared));
        assert!(c.is_manifold_vertex(v0));
        assert!(c.is_manifold_face(f0));
    }

    #[test]
    fn three_faces_on_one_edge_are_non_manifold() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let wings: Vec<_> = (0..3).map(|_| c.add_vertex()).collect();
        for &w in &wings {
            assert!(c.add_face_from_vertices(v0, v1, w).is_valid());
        }
        let shared = c.find_edge(v0, v1);
        assert!(!c.is_manifold_edge(shared));
        assert!(!c.is_manifold_vertex(v0));
    }

    #[test]
    fn bowtie_vertex_is_non_manifold() {
        let mut c = SimplicialComplex::new();
        let center = c.add_vertex();
        let a0 = c.add_vertex();
        let a1 = c.add_vertex();
        let b0 = c.add_vertex();
        let b1 = c.add_vertex();
        assert!(c.add_face_from_vertices(center, a0, a1).is_valid());
        assert!(c.add_face_from_vertices(center, b0, b1).is_valid());
        // Two face fans meeting only at the centre: the edge walk cannot
        // reach the second fan.
        assert!(!c.is_manifold_vertex(center));
        assert!(c.is_manifold_vertex(a0));
    }

    #[test]
    fn lone_tet_is_manifold_everywhere() {
        let mut c = SimplicialComplex::new();
        let v: Vec<_> = (0..4).map(|_| c.add_vertex()).collect();
        let t = c.add_tet_from_vertices(v[0], v[1], v[2], v[3]);
        assert!(t.is_valid());
        for k in 0..4 {
            assert!(c.is_manifold_face(c.face_of(t, k)));
        }
        for e in c.tet_edges(t) {
            assert!(c.is_manifold_edge(e));
        }
        for &vh in &v {
            assert!(c.is_manifold_vertex(vh));
        }
    }

    #[test]
    fn tet_pair_sharing_a_face_keeps_shared_edges_manifold() {
        let mut c = SimplicialComplex::new();
        let v: Vec<_> = (0..5).map(|_| c.add_vertex()).collect();
        let t0 = c.add_tet_from_vertices(v[0], v[1], v[2], v[3]);
        let t1 = c.add_tet_from_vertices(v[0], v[1], v[2], v[4]);
        assert!(t0.is_valid() && t1.is_valid());
        let shared_face = c.shared_face(t0, t1);
        assert!(shared_face.is_valid());
        assert!(!c.is_on_boundary_face(shared_face));
        // An edge of the shared face carries three faces but the tet walk
        // visits them all, so it stays manifold.
        let e = c.edge_of(shared_face, 0);
        assert_eq!(c.edge_face_count(e), 3);
        assert!(c.is_manifold_edge(e));
        assert!(c.is_manifold_vertex(v[0]));
    }

    #[test]
    fn tet_with_dangling_edge_is_non_manifold_at_the_join() {
        let mut c = SimplicialComplex::new();
        let v: Vec<_> = (0..4).map(|_| c.add_vertex()).collect();
        assert!(c.add_tet_from_vertices(v[0], v[1], v[2], v[3]).is_valid());
        let tip = c.add_vertex();
        assert!(c.add_edge(v[0], tip).is_valid());
        assert!(!c.is_manifold_vertex(v[0]));
        assert!(c.is_manifold_vertex(v[1]));
    }
}
