//! Per-simplex data attached to a complex.
//!
//! Property side-tables are owned by the caller but registered with a
//! complex, which keeps them sized to the slot arenas as simplices are
//! added.

pub mod property;

pub use property::{EdgeProperty, FaceProperty, SimplexProperty, TetProperty, VertexProperty};
