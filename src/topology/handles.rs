//! Strong, zero-cost handles for simplices.
//!
//! Every simplex in a complex is referred to by an opaque handle: a typed
//! index into its kind's slot arena. `Handle<K>` wraps an `i32` where `-1`
//! is reserved as the invalid/sentinel value, and is parameterised by an
//! uninhabited kind tag so that handles of different simplex kinds can never
//! be mixed up at compile time.
//!
//! This module provides:
//! - A transparent `Handle<K>` newtype with the same layout as `i32`.
//! - The four kind tags and the sealed [`SimplexKind`] trait tying them
//!   together.
//! - Implementations of the common traits (`Debug`, `Display`, ordering,
//!   hashing) so handles can be used in maps, sets, and printed easily.

use crate::mesh_error::SimplexMeshError;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for the four simplex kinds. Sealed: the only implementors
/// are [`Vertex`], [`Edge`], [`Face`] and [`Tet`].
pub trait SimplexKind: sealed::Sealed + 'static {
    /// Kind name used in `Debug` output and validation messages.
    const NAME: &'static str;
}

/// Kind tag for 0-cells.
pub enum Vertex {}
/// Kind tag for 1-cells.
pub enum Edge {}
/// Kind tag for triangle 2-cells.
pub enum Face {}
/// Kind tag for tetrahedral 3-cells.
pub enum Tet {}

impl sealed::Sealed for Vertex {}
impl sealed::Sealed for Edge {}
impl sealed::Sealed for Face {}
impl sealed::Sealed for Tet {}

impl SimplexKind for Vertex {
    const NAME: &'static str = "vertex";
}
impl SimplexKind for Edge {
    const NAME: &'static str = "edge";
}
impl SimplexKind for Face {
    const NAME: &'static str = "face";
}
impl SimplexKind for Tet {
    const NAME: &'static str = "tet";
}

/// An opaque typed index into a simplex arena.
///
/// Handles are plain values: equality and ordering compare the index, and a
/// negative index means *invalid*. The integer must never be interpreted as
/// a position in space; it is only an arena slot, and slots are reused after
/// deletion.
#[repr(transparent)]
pub struct Handle<K: SimplexKind> {
    idx: i32,
    _kind: PhantomData<K>,
}

/// Handle for referring to a vertex.
pub type VertexHandle = Handle<Vertex>;
/// Handle for referring to an edge.
pub type EdgeHandle = Handle<Edge>;
/// Handle for referring to a face.
pub type FaceHandle = Handle<Face>;
/// Handle for referring to a tet.
pub type TetHandle = Handle<Tet>;

impl<K: SimplexKind> Handle<K> {
    /// Wrap an arena slot. Crate-internal: only the complex mints live handles.
    #[inline]
    pub(crate) const fn from_index(idx: usize) -> Self {
        Handle {
            idx: idx as i32,
            _kind: PhantomData,
        }
    }

    /// The invalid sentinel handle.
    #[inline]
    pub const fn invalid() -> Self {
        Handle {
            idx: -1,
            _kind: PhantomData,
        }
    }

    /// Whether this handle refers to an arena slot at all. A valid handle may
    /// still be dead if its simplex has since been deleted; use the
    /// complex's existence predicates for liveness.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.idx >= 0
    }

    /// The raw slot index, `-1` if invalid.
    #[inline]
    pub const fn idx(&self) -> i32 {
        self.idx
    }

    /// The slot index as `usize`. Caller must have checked validity.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        debug_assert!(self.is_valid());
        self.idx as usize
    }
}

// Manual trait impls: the derive machinery would put bounds on the phantom
// kind tag, which is never instantiated.

impl<K: SimplexKind> Clone for Handle<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<K: SimplexKind> Copy for Handle<K> {}

impl<K: SimplexKind> Default for Handle<K> {
    #[inline]
    fn default() -> Self {
        Self::invalid()
    }
}

impl<K: SimplexKind> PartialEq for Handle<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}
impl<K: SimplexKind> Eq for Handle<K> {}

impl<K: SimplexKind> PartialOrd for Handle<K> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<K: SimplexKind> Ord for Handle<K> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.idx.cmp(&other.idx)
    }
}

impl<K: SimplexKind> Hash for Handle<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
    }
}

impl<K: SimplexKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", K::NAME, self.idx)
    }
}

/// Prints the numeric slot index without any wrapper text.
impl<K: SimplexKind> fmt::Display for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.idx)
    }
}

impl<K: SimplexKind> TryFrom<usize> for Handle<K> {
    type Error = SimplexMeshError;

    /// Build a handle from a raw slot index. Fails if the index does not fit
    /// the `i32` payload.
    #[inline]
    fn try_from(raw: usize) -> Result<Self, SimplexMeshError> {
        if raw > i32::MAX as usize {
            return Err(SimplexMeshError::HandleIndexOverflow(raw));
        }
        Ok(Handle::from_index(raw))
    }
}

#[cfg(test)]
mod layout_tests {
    //! Compile-time assertion that handles have the same size as `i32`.
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(VertexHandle, i32);
    assert_eq_size!(TetHandle, i32);
    assert_eq_align!(EdgeHandle, i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid() {
        let h = VertexHandle::default();
        assert!(!h.is_valid());
        assert_eq!(h, VertexHandle::invalid());
        assert_eq!(h.idx(), -1);
    }

    #[test]
    fn try_from_and_idx() -> Result<(), SimplexMeshError> {
        let h = EdgeHandle::try_from(42usize)?;
        assert!(h.is_valid());
        assert_eq!(h.idx(), 42);
        Ok(())
    }

    #[test]
    fn try_from_overflow_fails() {
        let raw = i32::MAX as usize + 1;
        assert_eq!(
            FaceHandle::try_from(raw).unwrap_err(),
            SimplexMeshError::HandleIndexOverflow(raw)
        );
    }

    #[test]
    fn ordering_and_hash() {
        let a = TetHandle::from_index(1);
        let b = TetHandle::from_index(2);
        assert!(a < b);
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(a);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn debug_and_display() {
        let h = VertexHandle::from_index(7);
        assert_eq!(format!("{h:?}"), "vertex#7");
        assert_eq!(format!("{h}"), "7");
    }

    #[test]
    fn copy_and_eq() {
        let h = FaceHandle::from_index(5);
        let g = h;
        assert_eq!(h, g);
        assert_ne!(h, FaceHandle::invalid());
    }
}
