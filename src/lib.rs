//! # simplex-mesh
//!
//! simplex-mesh is a topological container for 3D meshing: vertices, edges,
//! triangular faces and tetrahedra together with their oriented incidence
//! relations. It supports incremental editing (add/delete of any simplex with
//! slot reuse), consistent traversal, orientation queries, local topological
//! surgery (edge collapse, edge split, edge flip), and user-defined
//! per-simplex data that tracks structural changes automatically.
//!
//! ## Features
//! - Signed sparse incidence matrices kept mutually transpose-consistent
//! - Opaque typed handles with an invalid sentinel and O(1) slot reuse
//! - Orientation arithmetic that yields globally consistent signs from
//!   arbitrary input order
//! - Boundary and manifoldness queries that work on mixed-dimensional and
//!   non-manifold complexes
//! - Edge collapse / split / flip that either fully succeed or leave the
//!   complex untouched
//! - Property side-tables that resize automatically as the complex grows
//!
//! ## Usage
//! Add `simplex-mesh` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! simplex-mesh = "0.4"
//! # Optional: keep structural validation on in release builds
//! # features = ["strict-invariants"]
//! ```
//!
//! ## Quick start
//! ```rust
//! use simplex_mesh::prelude::*;
//!
//! let mut mesh = SimplicialComplex::new();
//! let v0 = mesh.add_vertex();
//! let v1 = mesh.add_vertex();
//! let v2 = mesh.add_vertex();
//! let e0 = mesh.add_edge(v0, v1);
//! let e1 = mesh.add_edge(v1, v2);
//! let e2 = mesh.add_edge(v2, v0);
//! let f = mesh.add_face(e0, e1, e2);
//! assert!(f.is_valid());
//! assert_eq!(mesh.num_faces(), 1);
//! assert_eq!(mesh.from_vertex(e0), v0);
//! assert_eq!(mesh.to_vertex(e0), v1);
//! ```
//!
//! All editing failures are reported by value: additions and surgery return
//! an invalid handle, deletions return `false`. Nothing panics on bad input
//! in release builds; debug builds additionally assert the structural
//! invariants after every public mutation.

// Re-export our major subsystems:
pub mod data;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::data::property::{
        EdgeProperty, FaceProperty, SimplexProperty, TetProperty, VertexProperty,
    };
    pub use crate::mesh_error::SimplexMeshError;
    pub use crate::topology::complex::{DuplicateSimplexMode, SimplicialComplex};
    pub use crate::topology::handles::{
        EdgeHandle, FaceHandle, Handle, SimplexKind, TetHandle, VertexHandle,
    };
    pub use crate::topology::validation::validate_complex;
}
