//! Invariant checking hook for public mutations.
//!
//! `debug_invariants!` fires in debug builds and whenever the
//! `strict-invariants` feature is enabled; it compiles to a no-op otherwise.
//! The actual checks live in [`crate::topology::validation`].

#[cfg(any(debug_assertions, feature = "strict-invariants"))]
macro_rules! debug_invariants {
    ($s:expr) => {
        $s.debug_assert_invariants();
    };
}

#[cfg(not(any(debug_assertions, feature = "strict-invariants")))]
macro_rules! debug_invariants {
    ($s:expr) => {
        ()
    };
}

pub(crate) use debug_invariants;
