//! Species name to constructor lookup for the importer.

use crate::unit::Body;
use std::collections::BTreeMap;
use std::fmt;
use valley_core::Species;

type Constructor = Box<dyn Fn() -> Body + Send + Sync>;

/// Constructors keyed by species name. A new species only needs a
/// registration here to become importable.
pub struct Registry {
    constructors: BTreeMap<String, Constructor>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register (or replace) the constructor for `name`
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: impl Fn() -> Body + Send + Sync + 'static,
    ) {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    pub fn build(&self, name: &str) -> Option<Body> {
        self.constructors.get(name).map(|constructor| constructor())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }
}

impl Default for Registry {
    /// Every built-in species under its exchange name
    fn default() -> Self {
        let mut registry = Self::empty();
        for species in Species::all() {
            registry.register(species.name(), move || Body::default_for(species));
        }
        registry
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Fox;

    #[test]
    fn test_default_registry() {
        let registry = Registry::default();
        for species in Species::all() {
            let body = registry.build(species.name()).unwrap();
            assert_eq!(body.species(), species);
        }
        assert_eq!(registry.names().count(), 7);
        assert!(registry.build("Unicorn").is_none());
        // Names are case sensitive
        assert!(!registry.contains("wolf"));
    }

    #[test]
    fn test_register_custom_constructor() {
        let mut registry = Registry::empty();
        registry.register("TiredFox", || {
            let mut fox = Fox::new();
            fox.animal.set_energy(3);
            Body::Fox(fox)
        });

        let body = registry.build("TiredFox").unwrap();
        assert_eq!(body.species(), Species::Fox);
        assert_eq!(body.animal().unwrap().energy(), 3);
    }
}
