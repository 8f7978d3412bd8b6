/// Generic name-keyed resource storage

use std::rc::Rc;
use rustc_hash::FxHashMap;

/// Owning map from resource name to shared resource
///
/// Entries are released when removed, replaced, cleared or when the stock
/// itself is dropped (unless a caller still holds a handle).
#[derive(Debug)]
pub struct ResourceStock<T> {
    entries: FxHashMap<String, Rc<T>>,
}

impl<T> Default for ResourceStock<T> {
    fn default() -> Self {
        Self { entries: FxHashMap::default() }
    }
}

impl<T> ResourceStock<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a resource under `name`, replacing any previous entry
    pub fn add(&mut self, name: impl Into<String>, resource: T) -> &mut Self {
        self.insert(name, resource);
        self
    }

    /// Store a resource and return its shared handle
    pub fn insert(&mut self, name: impl Into<String>, resource: T) -> Rc<T> {
        let handle = Rc::new(resource);
        self.entries.insert(name.into(), handle.clone());
        handle
    }

    /// Shared handle to a resource, if present
    pub fn find(&self, name: &str) -> Option<Rc<T>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove a resource, returning its handle
    pub fn remove(&mut self, name: &str) -> Option<Rc<T>> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resource names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Iterate over (name, handle) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<T>)> {
        self.entries.iter().map(|(name, res)| (name.as_str(), res))
    }

    /// Release every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "stock_tests.rs"]
mod tests;
