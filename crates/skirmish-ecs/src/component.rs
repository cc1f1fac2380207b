//! Component trait and per-entity component bookkeeping

use std::collections::BTreeSet;

/// A plain data record that can be attached to an entity.
///
/// `NAME` is the key the component is reported under in errors and in
/// [`EntityInfo`](crate::EntityInfo). An entity holds at most one
/// instance per component type.
pub trait Component: hecs::Component {
    const NAME: &'static str;
}

/// Names of the components currently attached to one entity
#[derive(Debug, Clone, Default)]
pub struct ComponentNames {
    names: BTreeSet<&'static str>,
}

impl ComponentNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str) {
        self.names.insert(name);
    }

    pub fn remove(&mut self, name: &str) {
        self.names.remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Sorted component names
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().map(|n| n.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
