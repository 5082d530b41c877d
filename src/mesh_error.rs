//! SimplexMeshError: Unified error type for simplex-mesh public APIs
//!
//! The editing API itself is non-exceptional: additions and surgery report
//! failure by returning an invalid handle, deletions by returning `false`.
//! This error type covers the remaining fallible surface: handle
//! construction from raw indices, and the structural validator in
//! [`crate::topology::validation`].

use thiserror::Error;

/// Unified error type for simplex-mesh operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimplexMeshError {
    /// Attempted to construct a handle from an index the i32 payload cannot hold.
    #[error("handle index {0} does not fit the handle representation")]
    HandleIndexOverflow(usize),
    /// An incidence matrix and its transpose disagree on their dimensions.
    #[error("{matrix}: dimensions disagree with the transpose")]
    TransposeShape { matrix: &'static str },
    /// An entry is present in a matrix but not mirrored in its transpose.
    #[error("{matrix}: entry ({row},{col}) is not mirrored in the transpose")]
    TransposeMismatch {
        matrix: &'static str,
        row: usize,
        col: usize,
    },
    /// A live row holds the wrong number of entries (edge 2, face 3, tet 4).
    #[error("{kind} row {row}: expected {expected} entries, found {found}")]
    RowArity {
        kind: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A live face row does not start with its smallest edge column.
    #[error("face row {row} is not rotated to its canonical form")]
    FaceRotation { row: usize },
    /// A live edge row does not store (from,-1) at position 0 and (to,+1) at 1.
    #[error("edge row {row} does not store (from,-1),(to,+1)")]
    EdgeEncoding { row: usize },
    /// A recorded simplex count disagrees with the number of live rows.
    #[error("{kind} count is {recorded} but {counted} live rows exist")]
    CountMismatch {
        kind: &'static str,
        counted: usize,
        recorded: usize,
    },
    /// A free-list entry refers to a slot that is still live, or repeats.
    #[error("{kind} free-list entry {slot} is not a unique dead slot")]
    FreeListCorrupt { kind: &'static str, slot: usize },
    /// Live simplices plus free slots do not add up to the arena size.
    #[error("{kind} slot accounting is off: {live} live + {free} free != {slots} slots")]
    SlotAccounting {
        kind: &'static str,
        live: usize,
        free: usize,
        slots: usize,
    },
    /// A registered property table is not sized to its kind's arena.
    #[error("{kind} property table has {found} slots, expected {expected}")]
    PropertySize {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
}
