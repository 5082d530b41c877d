//! Rejection behaviour of safe-mode additions, and that a rejected call
//! leaves the complex untouched.

use simplex_mesh::prelude::*;
use simplex_mesh::topology::DuplicateSimplexMode;

fn snapshot(mesh: &SimplicialComplex) -> (usize, usize, usize, usize) {
    (
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_faces(),
        mesh.num_tets(),
    )
}

#[test]
fn duplicate_edge_is_rejected_in_both_directions() {
    let mut mesh = SimplicialComplex::new();
    let v0 = mesh.add_vertex();
    let v1 = mesh.add_vertex();
    let _v2 = mesh.add_vertex();

    assert!(mesh.add_edge(v0, v1).is_valid());
    let before = snapshot(&mesh);
    assert!(!mesh.add_edge(v0, v1).is_valid());
    assert!(!mesh.add_edge(v1, v0).is_valid());
    assert_eq!(snapshot(&mesh), before);
    assert_eq!(validate_complex(&mesh), Ok(()));
}

#[test]
fn duplicate_face_is_rejected_including_reversed() {
    let mut mesh = SimplicialComplex::new();
    let v0 = mesh.add_vertex();
    let v1 = mesh.add_vertex();
    let v2 = mesh.add_vertex();

    assert!(mesh.add_face_from_vertices(v0, v1, v2).is_valid());
    let before = snapshot(&mesh);
    assert!(!mesh.add_face_from_vertices(v0, v1, v2).is_valid());
    assert!(!mesh.add_face_from_vertices(v0, v2, v1).is_valid());
    assert_eq!(snapshot(&mesh), before);
}

#[test]
fn face_over_disconnected_edges_is_rejected() {
    let mut mesh = SimplicialComplex::new();
    let v0 = mesh.add_vertex();
    let v1 = mesh.add_vertex();
    let v2 = mesh.add_vertex();
    let v3 = mesh.add_vertex();
    let e0 = mesh.add_edge(v0, v1);
    let e1 = mesh.add_edge(v1, v2);
    let e2 = mesh.add_edge(v0, v2);
    let e3 = mesh.add_edge(v0, v3);

    assert!(mesh.add_face(e0, e1, e2).is_valid());
    // The endpoint set of {e0,e1,e3} is four vertices, not three.
    let before = snapshot(&mesh);
    assert!(!mesh.add_face(e0, e1, e3).is_valid());
    assert_eq!(snapshot(&mesh), before);
}

#[test]
fn duplicate_tet_is_rejected_in_any_face_order() {
    let mut mesh = SimplicialComplex::new();
    let v: Vec<_> = (0..4).map(|_| mesh.add_vertex()).collect();
    assert!(mesh.add_tet_from_vertices(v[0], v[1], v[2], v[3]).is_valid());
    let before = snapshot(&mesh);
    assert!(!mesh.add_tet_from_vertices(v[0], v[1], v[2], v[3]).is_valid());
    assert!(!mesh.add_tet_from_vertices(v[0], v[1], v[3], v[2]).is_valid());
    assert_eq!(snapshot(&mesh), before);
}

#[test]
fn partial_face_sharing_is_rejected_only_when_strict() {
    // A second face reusing two edges of an existing one, closed by a
    // parallel copy of the third edge. Strict mode rejects it as a partial
    // match; relaxed mode accepts it because the edge sets differ.
    let mut mesh = SimplicialComplex::new();
    mesh.set_duplicate_mode(DuplicateSimplexMode::Relaxed);
    let v0 = mesh.add_vertex();
    let v1 = mesh.add_vertex();
    let v2 = mesh.add_vertex();
    let e0 = mesh.add_edge(v0, v1);
    let e1 = mesh.add_edge(v1, v2);
    let e2 = mesh.add_edge(v2, v0);
    // Reversed duplicate of e2, allowed under relaxed mode.
    let parallel = mesh.add_edge(v0, v2);
    assert!(parallel.is_valid());
    assert!(mesh.add_face(e0, e1, e2).is_valid());

    let second = mesh.add_face(e0, e1, parallel);
    assert!(second.is_valid());
    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(validate_complex(&mesh), Ok(()));

    // The same shape under the strict mode stops at the partial match.
    mesh.set_duplicate_mode(DuplicateSimplexMode::None);
    let before = snapshot(&mesh);
    assert!(!mesh.add_face(e1, e2, e0).is_valid());
    assert_eq!(snapshot(&mesh), before);
}

#[test]
fn unsafe_mode_skips_every_check() {
    let mut mesh = SimplicialComplex::new();
    mesh.set_safe_mode(false);
    let v0 = mesh.add_vertex();
    let v1 = mesh.add_vertex();
    let a = mesh.add_edge(v0, v1);
    let b = mesh.add_edge(v0, v1);
    assert!(a.is_valid() && b.is_valid());
    assert_ne!(a, b);
    assert_eq!(mesh.num_edges(), 2);
    // The structure is still internally consistent.
    assert_eq!(validate_complex(&mesh), Ok(()));
}

#[test]
fn additions_on_dead_input_are_rejected() {
    let mut mesh = SimplicialComplex::new();
    let v0 = mesh.add_vertex();
    let v1 = mesh.add_vertex();
    let e = mesh.add_edge(v0, v1);
    assert!(mesh.delete_edge(e, false));
    let v2 = mesh.add_vertex();
    let e2 = mesh.add_edge(v1, v2);
    // A face over a dead edge handle is refused.
    assert!(!mesh.add_face(e, e2, e2).is_valid());
    assert!(!mesh.add_tet(
        FaceHandle::invalid(),
        FaceHandle::invalid(),
        FaceHandle::invalid(),
        FaceHandle::invalid(),
        false
    )
    .is_valid());
}
