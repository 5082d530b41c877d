//! Top-level module for the simplicial-complex topology.
//!
//! This module provides the core types for representing oriented simplicial
//! complexes of dimension up to three. It includes:
//! - Strongly typed handles for vertices, edges, faces and tets
//! - The signed sparse incidence matrix used for all adjacency storage
//! - The [`complex::SimplicialComplex`] container with editing, traversal,
//!   orientation, boundary and manifoldness queries
//! - Topological surgery (edge collapse, edge split, edge flip)
//! - A structural validator mirroring the container's invariants
//!
//! ## Mirror consistency
//! The complex stores each incidence relation twice: once row-major from the
//! higher simplex (EV, FE, TF) and once as the exact transpose (VE, EF, FT).
//! Every public mutation leaves the two copies perfect mirrors of each other;
//! debug builds assert this after each call.

mod _debug_invariants;
pub mod complex;
pub mod handles;
pub mod incidence;
pub mod iters;
mod surgery;
pub mod validation;

pub use complex::{DuplicateSimplexMode, SimplicialComplex};
pub use handles::{EdgeHandle, FaceHandle, Handle, SimplexKind, TetHandle, VertexHandle};
pub use validation::validate_complex;
