use crate::compile::symbol::{classify, synthetic_name, Symbol};
use crate::config::CodegenConfig;
use indexmap::IndexMap;
use std::{borrow::Cow, rc::Rc, sync::Arc};
use tracing::trace;

/// A value that generated code can reference by name.
///
/// Values carrying an identifying attribute get a predictable natural name;
/// everything else receives an opaque synthetic one. Natural names should not
/// start with the configured synthetic prefix (`$` by default).
pub trait Linkable {
    fn natural_name(&self) -> Option<Cow<'_, str>>;
}

impl Linkable for serde_json::Value {
    fn natural_name(&self) -> Option<Cow<'_, str>> {
        match self.get("name") {
            Some(serde_json::Value::String(name)) if !name.is_empty() => {
                Some(Cow::Borrowed(name.as_str()))
            }
            _ => None,
        }
    }
}

impl<T: Linkable + ?Sized> Linkable for Rc<T> {
    fn natural_name(&self) -> Option<Cow<'_, str>> {
        (**self).natural_name()
    }
}

impl<T: Linkable + ?Sized> Linkable for Arc<T> {
    fn natural_name(&self) -> Option<Cow<'_, str>> {
        (**self).natural_name()
    }
}

impl<T: Linkable + ?Sized> Linkable for &T {
    fn natural_name(&self) -> Option<Cow<'_, str>> {
        (**self).natural_name()
    }
}

#[derive(Debug, Clone)]
pub struct LinkEntry<V> {
    name: String,
    symbol: Symbol,
    value: V,
}

impl<V> LinkEntry<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn is_synthetic(&self) -> bool {
        self.symbol.is_synthetic()
    }
}

/// Deduplicating registry of linked values, keyed by symbolic name.
#[derive(Debug, Clone)]
pub struct LinkTable<V> {
    synthetic_prefix: String,
    filler: char,
    counter: u64,
    entries: IndexMap<String, LinkEntry<V>>,
}

impl<V> Default for LinkTable<V> {
    fn default() -> Self {
        Self::with_config(&CodegenConfig::default())
    }
}

impl<V> LinkTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CodegenConfig) -> Self {
        Self {
            synthetic_prefix: config.synthetic_prefix.clone(),
            filler: config.filler,
            counter: 0,
            entries: IndexMap::new(),
        }
    }

    pub fn synthetic_prefix(&self) -> &str {
        &self.synthetic_prefix
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name).map(LinkEntry::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkEntry<V>> {
        self.entries.values()
    }

    /// Entries in compile order: synthetic names by numeric suffix, then
    /// natural names lexicographically.
    pub fn ordered(&self) -> Vec<&LinkEntry<V>> {
        let mut ordered: Vec<&LinkEntry<V>> = self.entries.values().collect();
        ordered.sort_by(|left, right| left.symbol.cmp(&right.symbol));
        ordered
    }

    fn natural(&self, attribute: &str) -> String {
        attribute
            .chars()
            .map(|c| if c.is_whitespace() { self.filler } else { c })
            .collect()
    }

    /// Slots already taken by a natural name that looks synthetic are skipped.
    fn next_synthetic(&mut self) -> String {
        loop {
            let name = synthetic_name(&self.synthetic_prefix, self.counter);
            self.counter += 1;
            if !self.entries.contains_key(&name) {
                return name;
            }
        }
    }
}

impl<V: Linkable> LinkTable<V> {
    /// Returns the symbolic name for `value`, registering it on first use.
    ///
    /// Dedup is by name only: a second value that maps onto an existing name
    /// aliases the first one and is dropped.
    pub fn link(&mut self, value: V) -> String {
        let natural = value.natural_name().map(|attribute| self.natural(&attribute));
        let synthetic = natural.is_none();
        let name = match natural {
            Some(name) => {
                if self.entries.contains_key(&name) {
                    trace!(name = %name, "link aliased");
                    return name;
                }
                name
            }
            None => self.next_synthetic(),
        };
        let symbol = classify(&self.synthetic_prefix, &name);
        trace!(name = %name, synthetic, "link registered");
        self.entries.insert(
            name.clone(),
            LinkEntry {
                name: name.clone(),
                symbol,
                value,
            },
        );
        name
    }
}
