//! Typed per-simplex side-tables.
//!
//! A property is a dense vector of user data indexed by one kind of handle.
//! Constructing one registers it with a complex; whenever the complex grows
//! that kind's slot arena, every registered table is resized to match, so a
//! property stays indexable by any live handle without manual bookkeeping.
//! After a slot is deleted and reused, the data at that index is logically
//! undefined until overwritten.
//!
//! Neither side owns the other: the property owns its data vector, the
//! complex holds only weak back-references for the resize broadcast, and
//! the property holds a weak reference to the registry so clones can
//! register themselves. Dropping a property is deregistration: its weak
//! entry stops upgrading and is pruned on the next broadcast. A property
//! that outlives its complex simply stops resizing.
//!
//! Access goes through `RefCell` guards; holding a borrow across a mutation
//! of the complex panics the same way a stale iterator would misbehave, so
//! keep guards short-lived.

use std::cell::{Ref, RefCell, RefMut};
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::topology::complex::SimplicialComplex;
use crate::topology::handles::{Edge, Face, Handle, SimplexKind, Tet, Vertex};

/// Type-erased view of a property table, used by the resize broadcast.
pub(crate) trait SlotTable {
    fn resize_slots(&self, new_len: usize);
    fn slot_len(&self) -> usize;
}

impl<T: Clone + Default> SlotTable for RefCell<Vec<T>> {
    fn resize_slots(&self, new_len: usize) {
        self.borrow_mut().resize(new_len, T::default());
    }

    fn slot_len(&self) -> usize {
        self.borrow().len()
    }
}

type RegistryTables = RefCell<Vec<Weak<dyn SlotTable>>>;

/// Per-kind list of weak back-references to registered property tables.
/// Lives inside the complex; dead entries are pruned on each broadcast.
#[derive(Debug, Default)]
#[doc(hidden)]
pub struct PropertyRegistry {
    tables: Rc<RegistryTables>,
}

impl PropertyRegistry {
    fn register(&self, table: Weak<dyn SlotTable>) {
        self.tables.borrow_mut().push(table);
    }

    /// Resize every live registered table, dropping dead registrations.
    pub(crate) fn resize_all(&self, new_len: usize) {
        self.tables.borrow_mut().retain(|weak| match weak.upgrade() {
            Some(table) => {
                table.resize_slots(new_len);
                true
            }
            None => false,
        });
    }

    /// Sizes of the live registered tables, for validation.
    pub(crate) fn live_sizes(&self) -> Vec<usize> {
        self.tables
            .borrow()
            .iter()
            .filter_map(|weak| weak.upgrade())
            .map(|table| table.slot_len())
            .collect()
    }
}

/// Ties each handle kind to its registry and arena size inside a complex.
/// Sealed through [`SimplexKind`].
pub trait PropertyKind: SimplexKind {
    #[doc(hidden)]
    fn registry(complex: &SimplicialComplex) -> &PropertyRegistry;
    #[doc(hidden)]
    fn slot_count(complex: &SimplicialComplex) -> usize;
}

impl PropertyKind for Vertex {
    fn registry(complex: &SimplicialComplex) -> &PropertyRegistry {
        &complex.vert_props
    }
    fn slot_count(complex: &SimplicialComplex) -> usize {
        complex.vertex_slots()
    }
}

impl PropertyKind for Edge {
    fn registry(complex: &SimplicialComplex) -> &PropertyRegistry {
        &complex.edge_props
    }
    fn slot_count(complex: &SimplicialComplex) -> usize {
        complex.edge_slots()
    }
}

impl PropertyKind for Face {
    fn registry(complex: &SimplicialComplex) -> &PropertyRegistry {
        &complex.face_props
    }
    fn slot_count(complex: &SimplicialComplex) -> usize {
        complex.face_slots()
    }
}

impl PropertyKind for Tet {
    fn registry(complex: &SimplicialComplex) -> &PropertyRegistry {
        &complex.tet_props
    }
    fn slot_count(complex: &SimplicialComplex) -> usize {
        complex.tet_slots()
    }
}

/// A typed side-table indexed by handles of kind `K`.
///
/// ```rust
/// use simplex_mesh::prelude::*;
///
/// let mut mesh = SimplicialComplex::new();
/// let v = mesh.add_vertex();
/// let mut ids = VertexProperty::<u32>::new(&mesh);
/// ids.set(v, 7);
/// let w = mesh.add_vertex(); // the table grows with the arena
/// assert_eq!(*ids.get(v), 7);
/// assert_eq!(*ids.get(w), 0);
/// ```
pub struct SimplexProperty<T, K: PropertyKind> {
    data: Rc<RefCell<Vec<T>>>,
    registry: Weak<RegistryTables>,
    _kind: PhantomData<K>,
}

/// Per-vertex data.
pub type VertexProperty<T> = SimplexProperty<T, Vertex>;
/// Per-edge data.
pub type EdgeProperty<T> = SimplexProperty<T, Edge>;
/// Per-face data.
pub type FaceProperty<T> = SimplexProperty<T, Face>;
/// Per-tet data.
pub type TetProperty<T> = SimplexProperty<T, Tet>;

impl<T, K> SimplexProperty<T, K>
where
    T: Clone + Default + 'static,
    K: PropertyKind,
{
    /// Create a table registered with `complex`, sized to the current
    /// arena and filled with `T::default()`.
    pub fn new(complex: &SimplicialComplex) -> Self {
        let data = Rc::new(RefCell::new(vec![T::default(); K::slot_count(complex)]));
        let registry = K::registry(complex);
        let data_dyn: Rc<dyn SlotTable> = data.clone();
        let weak: Weak<dyn SlotTable> = Rc::downgrade(&data_dyn);
        registry.register(weak);
        Self {
            data,
            registry: Rc::downgrade(&registry.tables),
            _kind: PhantomData,
        }
    }

    /// Current table length; equals the arena size of `K` while the complex
    /// is alive.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the table has no slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the value at `h`.
    ///
    /// # Panics
    /// If `h` is invalid or out of range.
    pub fn get(&self, h: Handle<K>) -> Ref<'_, T> {
        assert!(h.is_valid());
        let idx = h.index();
        Ref::map(self.data.borrow(), |data| &data[idx])
    }

    /// Mutably borrow the value at `h`.
    ///
    /// # Panics
    /// If `h` is invalid or out of range.
    pub fn get_mut(&mut self, h: Handle<K>) -> RefMut<'_, T> {
        assert!(h.is_valid());
        let idx = h.index();
        RefMut::map(self.data.borrow_mut(), |data| &mut data[idx])
    }

    /// Store `value` at `h`.
    pub fn set(&mut self, h: Handle<K>, value: T) {
        *self.get_mut(h) = value;
    }

    /// Assign `value` to every slot, live or dead.
    pub fn fill(&mut self, value: T) {
        for slot in self.data.borrow_mut().iter_mut() {
            *slot = value.clone();
        }
    }
}

/// Cloning copies the data vector and registers the copy with the same
/// complex, so both tables keep tracking arena growth independently.
impl<T, K> Clone for SimplexProperty<T, K>
where
    T: Clone + Default + 'static,
    K: PropertyKind,
{
    fn clone(&self) -> Self {
        let data = Rc::new(RefCell::new(self.data.borrow().clone()));
        if let Some(tables) = self.registry.upgrade() {
            let data_dyn: Rc<dyn SlotTable> = data.clone();
            let weak: Weak<dyn SlotTable> = Rc::downgrade(&data_dyn);
            tables.borrow_mut().push(weak);
        }
        Self {
            data,
            registry: self.registry.clone(),
            _kind: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_track_arena_growth() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let mut ids = VertexProperty::<u32>::new(&c);
        assert_eq!(ids.len(), 1);
        ids.set(v0, 5);
        let v1 = c.add_vertex();
        assert_eq!(ids.len(), 2);
        assert_eq!(*ids.get(v0), 5);
        assert_eq!(*ids.get(v1), 0);
    }

    #[test]
    fn slot_reuse_keeps_table_length() {
        let mut c = SimplicialComplex::new();
        let v = c.add_vertex();
        let mut ids = VertexProperty::<i32>::new(&c);
        ids.set(v, -3);
        assert!(c.delete_vertex(v));
        let w = c.add_vertex();
        // Same slot, stale data until overwritten.
        assert_eq!(w.idx(), v.idx());
        assert_eq!(ids.len(), 1);
        ids.set(w, 9);
        assert_eq!(*ids.get(w), 9);
    }

    #[test]
    fn clone_registers_with_the_same_complex() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let mut ids = VertexProperty::<u32>::new(&c);
        ids.set(v0, 1);
        let mut copy = ids.clone();
        copy.set(v0, 2);
        // Independent data.
        assert_eq!(*ids.get(v0), 1);
        assert_eq!(*copy.get(v0), 2);
        // Both resize with the complex.
        c.add_vertex();
        assert_eq!(ids.len(), 2);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn dropping_a_table_deregisters_it() {
        let mut c = SimplicialComplex::new();
        c.add_vertex();
        let ids = VertexProperty::<u8>::new(&c);
        drop(ids);
        // The dead registration is pruned on the next broadcast.
        c.add_vertex();
        assert_eq!(c.vert_props.live_sizes().len(), 0);
    }

    #[test]
    fn each_kind_registers_separately() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let e = c.add_edge(v0, v1);
        let mut edge_weight = EdgeProperty::<f64>::new(&c);
        edge_weight.set(e, 2.5);
        assert_eq!(*edge_weight.get(e), 2.5);
        let _faces = FaceProperty::<bool>::new(&c);
        let _tets = TetProperty::<u8>::new(&c);
        assert_eq!(_faces.len(), 0);
        assert_eq!(_tets.len(), 0);
    }

    #[test]
    fn fill_overwrites_every_slot() {
        let mut c = SimplicialComplex::new();
        let v0 = c.add_vertex();
        let v1 = c.add_vertex();
        let mut ids = VertexProperty::<u32>::new(&c);
        ids.set(v0, 1);
        ids.fill(8);
        assert_eq!(*ids.get(v0), 8);
        assert_eq!(*ids.get(v1), 8);
    }
}
