//! Structural validation of a complex.
//!
//! [`validate_complex`] checks every invariant the container promises after
//! a public mutation returns:
//! 1. transpose consistency between each primary matrix and its mirror,
//! 2. row cardinality (live edge rows hold 2 entries, faces 3, tets 4),
//! 3. canonical rotation of face rows,
//! 4. the (from,-1)/(to,+1) encoding of edge rows,
//! 5. count and free-list accounting per arena,
//! 6. registered property tables sized to their arenas.
//!
//! Debug builds (and the `strict-invariants` feature) run this after every
//! public mutation via the `debug_invariants!` hook.

use std::collections::BTreeSet;

use crate::mesh_error::SimplexMeshError;
use crate::topology::complex::SimplicialComplex;
use crate::topology::incidence::IncidenceMatrix;

fn check_transpose(
    a: &IncidenceMatrix,
    b: &IncidenceMatrix,
    name: &'static str,
) -> Result<(), SimplexMeshError> {
    if a.num_rows() != b.num_cols() || a.num_cols() != b.num_rows() {
        return Err(SimplexMeshError::TransposeShape { matrix: name });
    }
    for i in 0..a.num_rows() {
        for k in 0..a.row_len(i) {
            let j = a.col_by_index(i, k);
            if b.get(j, i) != a.value_by_index(i, k) {
                return Err(SimplexMeshError::TransposeMismatch {
                    matrix: name,
                    row: i,
                    col: j,
                });
            }
        }
    }
    Ok(())
}

fn check_arity(
    m: &IncidenceMatrix,
    kind: &'static str,
    expected: usize,
) -> Result<(), SimplexMeshError> {
    for i in 0..m.num_rows() {
        let found = m.row_len(i);
        if found != 0 && found != expected {
            return Err(SimplexMeshError::RowArity {
                kind,
                row: i,
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn check_arena(
    kind: &'static str,
    live: usize,
    free_list: &[usize],
    slots: usize,
    slot_is_dead: impl Fn(usize) -> bool,
) -> Result<(), SimplexMeshError> {
    if live + free_list.len() != slots {
        return Err(SimplexMeshError::SlotAccounting {
            kind,
            live,
            free: free_list.len(),
            slots,
        });
    }
    let mut seen = BTreeSet::new();
    for &slot in free_list {
        if slot >= slots || !slot_is_dead(slot) || !seen.insert(slot) {
            return Err(SimplexMeshError::FreeListCorrupt { kind, slot });
        }
    }
    Ok(())
}

/// Check every structural invariant of `complex`, returning the first
/// violation found.
pub fn validate_complex(complex: &SimplicialComplex) -> Result<(), SimplexMeshError> {
    // 1. Transpose consistency, both directions of each pair.
    check_transpose(&complex.ev, &complex.ve, "EV")?;
    check_transpose(&complex.ve, &complex.ev, "VE")?;
    check_transpose(&complex.fe, &complex.ef, "FE")?;
    check_transpose(&complex.ef, &complex.fe, "EF")?;
    check_transpose(&complex.tf, &complex.ft, "TF")?;
    check_transpose(&complex.ft, &complex.tf, "FT")?;

    // 2. Cardinality of live rows.
    check_arity(&complex.ev, "edge", 2)?;
    check_arity(&complex.fe, "face", 3)?;
    check_arity(&complex.tf, "tet", 4)?;

    // 3. Canonical rotation: the smallest edge column leads each face row.
    for i in 0..complex.fe.num_rows() {
        let len = complex.fe.row_len(i);
        if len == 0 {
            continue;
        }
        let head = complex.fe.col_by_index(i, 0);
        for k in 1..len {
            if complex.fe.col_by_index(i, k) < head {
                return Err(SimplexMeshError::FaceRotation { row: i });
            }
        }
    }

    // 4. Oriented edge encoding: (from,-1) at position 0, (to,+1) at 1.
    for i in 0..complex.ev.num_rows() {
        if complex.ev.row_len(i) == 2
            && (complex.ev.value_by_index(i, 0) != -1 || complex.ev.value_by_index(i, 1) != 1)
        {
            return Err(SimplexMeshError::EdgeEncoding { row: i });
        }
    }

    // 5. Counts and free lists.
    let live_verts = complex.verts.iter().filter(|&&b| b).count();
    if live_verts != complex.n_verts {
        return Err(SimplexMeshError::CountMismatch {
            kind: "vertex",
            counted: live_verts,
            recorded: complex.n_verts,
        });
    }
    let live_rows = |m: &IncidenceMatrix| (0..m.num_rows()).filter(|&i| m.row_len(i) > 0).count();
    for (kind, counted, recorded) in [
        ("edge", live_rows(&complex.ev), complex.n_edges),
        ("face", live_rows(&complex.fe), complex.n_faces),
        ("tet", live_rows(&complex.tf), complex.n_tets),
    ] {
        if counted != recorded {
            return Err(SimplexMeshError::CountMismatch {
                kind,
                counted,
                recorded,
            });
        }
    }
    check_arena(
        "vertex",
        complex.n_verts,
        &complex.dead_verts,
        complex.verts.len(),
        |slot| !complex.verts[slot],
    )?;
    check_arena(
        "edge",
        complex.n_edges,
        &complex.dead_edges,
        complex.ev.num_rows(),
        |slot| complex.ev.row_len(slot) == 0,
    )?;
    check_arena(
        "face",
        complex.n_faces,
        &complex.dead_faces,
        complex.fe.num_rows(),
        |slot| complex.fe.row_len(slot) == 0,
    )?;
    check_arena(
        "tet",
        complex.n_tets,
        &complex.dead_tets,
        complex.tf.num_rows(),
        |slot| complex.tf.row_len(slot) == 0,
    )?;

    // 6. Property alignment.
    for (kind, registry, slots) in [
        ("vertex", &complex.vert_props, complex.verts.len()),
        ("edge", &complex.edge_props, complex.ev.num_rows()),
        ("face", &complex.face_props, complex.fe.num_rows()),
        ("tet", &complex.tet_props, complex.tf.num_rows()),
    ] {
        for found in registry.live_sizes() {
            if found != slots {
                return Err(SimplexMeshError::PropertySize {
                    kind,
                    expected: slots,
                    found,
                });
            }
        }
    }

    Ok(())
}

impl SimplicialComplex {
    /// Panic on the first violated invariant. Compiled into every public
    /// mutation in debug builds and under the `strict-invariants` feature.
    #[cfg(any(debug_assertions, feature = "strict-invariants"))]
    pub(crate) fn debug_assert_invariants(&self) {
        if let Err(err) = validate_complex(self) {
            panic!("simplicial complex invariant violated: {err}");
        }
    }
}
