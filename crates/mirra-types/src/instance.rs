//! Live object instances
//!
//! An `Instance` is a shared reference to a live object: a class id plus a
//! set of field slots. Slots are keyed by *(declaring type, field name)*, so
//! a subclass field sharing a name with a base-class field occupies its own
//! slot and both remain independently addressable.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::registry::TypeId;
use crate::value::Value;

type SlotKey = (TypeId, String);

#[derive(Debug)]
struct InstanceData {
    class: TypeId,
    slots: RwLock<FxHashMap<SlotKey, Value>>,
}

/// A live, shared object instance
#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

impl Instance {
    /// Allocate an instance of the given class with no initialized slots
    pub fn new(class: TypeId) -> Self {
        Self(Arc::new(InstanceData {
            class,
            slots: RwLock::new(FxHashMap::default()),
        }))
    }

    /// Runtime class of this instance
    pub fn class(&self) -> TypeId {
        self.0.class
    }

    /// Read the slot declared by `declaring` under `name`, if initialized
    pub fn get(&self, declaring: TypeId, name: &str) -> Option<Value> {
        self.0
            .slots
            .read()
            .get(&(declaring, name.to_string()))
            .cloned()
    }

    /// Write the slot declared by `declaring` under `name`
    pub fn set(&self, declaring: TypeId, name: &str, value: Value) {
        self.0
            .slots
            .write()
            .insert((declaring, name.to_string()), value);
    }

    /// Identity comparison: two handles to the same live object
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.0.class)
            .field("slots", &self.0.slots.read().len())
            .finish()
    }
}
