//! Surgery operators keep the complex structurally sound end to end.

use simplex_mesh::prelude::*;

/// A 2x2 triangulated grid patch: nine vertices, interior edges to work on.
fn grid_patch() -> (SimplicialComplex, Vec<VertexHandle>) {
    let mut mesh = SimplicialComplex::new();
    let v: Vec<VertexHandle> = (0..9).map(|_| mesh.add_vertex()).collect();
    // Rows: 0 1 2 / 3 4 5 / 6 7 8; split each cell along its diagonal.
    for (a, b, c, d) in [(0, 1, 3, 4), (1, 2, 4, 5), (3, 4, 6, 7), (4, 5, 7, 8)] {
        assert!(mesh.add_face_from_vertices(v[a], v[b], v[d]).is_valid());
        assert!(mesh.add_face_from_vertices(v[a], v[d], v[c]).is_valid());
    }
    (mesh, v)
}

#[test]
fn grid_patch_is_sound() {
    let (mesh, v) = grid_patch();
    assert_eq!(mesh.num_faces(), 8);
    assert_eq!(mesh.num_vertices(), 9);
    assert_eq!(mesh.num_edges(), 16);
    assert_eq!(validate_complex(&mesh), Ok(()));
    assert!(!mesh.is_on_boundary_vertex(v[4]));
    assert!(mesh.is_manifold_vertex(v[4]));
}

#[test]
fn flip_an_interior_edge_of_the_patch() {
    let (mut mesh, v) = grid_patch();
    let diagonal = mesh.find_edge(v[0], v[4]);
    assert!(diagonal.is_valid());
    let flipped = mesh.flip_edge(diagonal);
    assert!(flipped.is_valid());
    assert_eq!(validate_complex(&mesh), Ok(()));
    // The opposite diagonal of the cell now spans v1-v3.
    let ends = [mesh.from_vertex(flipped), mesh.to_vertex(flipped)];
    assert!(ends.contains(&v[1]) && ends.contains(&v[3]));
    assert_eq!(mesh.num_faces(), 8);
    assert_eq!(mesh.num_edges(), 16);
    assert!(mesh.is_manifold_vertex(v[4]));
}

#[test]
fn split_an_interior_edge_of_the_patch() {
    let (mut mesh, v) = grid_patch();
    let target = mesh.find_edge(v[4], v[5]);
    assert!(target.is_valid());
    let mut new_faces = Vec::new();
    let mid = mesh.split_edge(target, &mut new_faces);
    assert!(mid.is_valid());
    assert_eq!(new_faces.len(), 4);
    assert!(new_faces.iter().all(|f| f.is_valid()));
    assert_eq!(mesh.num_vertices(), 10);
    assert_eq!(mesh.num_faces(), 10);
    assert_eq!(validate_complex(&mesh), Ok(()));
    assert!(mesh.is_manifold_vertex(mid));
    assert!(!mesh.edge_exists(target));
}

#[test]
fn collapse_an_interior_edge_of_the_patch() {
    let (mut mesh, v) = grid_patch();
    let target = mesh.find_edge(v[4], v[5]);
    assert!(target.is_valid());
    let kept = mesh.collapse_edge(target, v[5]);
    assert_eq!(kept, v[4]);
    assert!(!mesh.vertex_exists(v[5]));
    assert_eq!(validate_complex(&mesh), Ok(()));
    assert_eq!(mesh.num_vertices(), 8);
    // Two faces vanish with the edge, and the duplicate rim edges merge.
    assert_eq!(mesh.num_faces(), 6);
    for f in mesh.faces().collect::<Vec<_>>() {
        let corners: Vec<_> = mesh.face_vertices(f).collect();
        assert_eq!(corners.len(), 3);
        assert!(!corners.contains(&v[5]));
    }
}

#[test]
fn surgery_refusals_are_no_ops() {
    let (mut mesh, v) = grid_patch();
    let rim = mesh.find_edge(v[0], v[1]);
    let before = (
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_faces(),
    );
    // A rim edge has one face: flipping needs exactly two.
    assert!(!mesh.flip_edge(rim).is_valid());
    // Collapsing with a non-endpoint is refused.
    assert!(!mesh.collapse_edge(rim, v[8]).is_valid());
    // Splitting a dead edge is refused.
    let mut sink = Vec::new();
    assert!(!mesh.split_edge(EdgeHandle::invalid(), &mut sink).is_valid());
    assert_eq!(
        before,
        (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces())
    );
    assert_eq!(validate_complex(&mesh), Ok(()));
}

#[test]
fn surgery_is_refused_on_tet_pinned_edges() {
    let mut mesh = SimplicialComplex::new();
    let v: Vec<_> = (0..4).map(|_| mesh.add_vertex()).collect();
    let t = mesh.add_tet_from_vertices(v[0], v[1], v[2], v[3]);
    assert!(t.is_valid());
    let e = mesh.find_edge(v[0], v[1]);
    let mut sink = Vec::new();
    assert!(!mesh.collapse_edge(e, v[1]).is_valid());
    assert!(!mesh.split_edge(e, &mut sink).is_valid());
    assert!(!mesh.flip_edge(e).is_valid());
    assert_eq!(mesh.num_tets(), 1);
    assert_eq!(validate_complex(&mesh), Ok(()));
}

#[test]
fn split_then_collapse_round_trips_the_counts() {
    let (mut mesh, v) = grid_patch();
    let target = mesh.find_edge(v[4], v[7]);
    let before = (
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_faces(),
    );
    let mut new_faces = Vec::new();
    let mid = mesh.split_edge(target, &mut new_faces);
    assert!(mid.is_valid());
    // Collapsing either half undoes the split numerically.
    let half = mesh.find_edge(v[4], mid);
    assert!(half.is_valid());
    let kept = mesh.collapse_edge(half, mid);
    assert_eq!(kept, v[4]);
    assert_eq!(
        before,
        (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces())
    );
    assert_eq!(validate_complex(&mesh), Ok(()));
}
