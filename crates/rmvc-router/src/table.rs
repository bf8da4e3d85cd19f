//! Insertion-ordered route table
//!
//! Registration order is match priority, so routes live in a `Vec` with a
//! `HashMap` index from template to position. Re-registering a template
//! replaces the old entry at its original position.

use std::collections::HashMap;

use crate::{CompiledRoute, RouteMatch};

pub struct RouteTable<C> {
    entries: Vec<CompiledRoute<C>>,
    index: HashMap<String, usize>,
}

impl<C> RouteTable<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds a route keyed by its template
    ///
    /// Returns the route it replaced, if the template was already registered.
    pub fn insert(&mut self, route: CompiledRoute<C>) -> Option<CompiledRoute<C>> {
        if let Some(&position) = self.index.get(route.source()) {
            return Some(std::mem::replace(&mut self.entries[position], route));
        }

        self.index
            .insert(route.source().to_string(), self.entries.len());
        self.entries.push(route);
        None
    }

    /// Looks a route up by its template
    pub fn get(&self, source: &str) -> Option<&CompiledRoute<C>> {
        self.index.get(source).map(|&position| &self.entries[position])
    }

    /// First route registered under `name`
    pub fn find_by_name(&self, name: &str) -> Option<&CompiledRoute<C>> {
        self.entries.iter().find(|route| route.name() == Some(name))
    }

    /// First route, in registration order, whose matcher accepts `path`
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, C>> {
        let route = self.entries.iter().find(|route| route.pattern().is_match(path))?;
        let params = route.pattern().extract(path)?;

        Some(RouteMatch { route, params })
    }

    pub fn contains(&self, source: &str) -> bool {
        self.index.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Routes in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRoute<C>> {
        self.entries.iter()
    }

    /// Templates in registration order
    pub fn sources(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(CompiledRoute::source)
    }
}

impl<C> Default for RouteTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for RouteTable<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<C> std::fmt::Debug for RouteTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<'a, C> IntoIterator for &'a RouteTable<C> {
    type Item = &'a CompiledRoute<C>;
    type IntoIter = std::slice::Iter<'a, CompiledRoute<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
