use super::symbol::parse_cache_key;
use crate::config::DEFAULT_SYNTHETIC_PREFIX;
use crate::error::{CodegenError, CodegenResult};
use std::collections::HashMap;
use std::fmt;

/// Precompiled template: receives every linked value in compile order and
/// returns the finished procedure.
pub type Template<V, P> = Box<dyn Fn(&[V]) -> P>;

/// Cache-key to template dispatch table, produced ahead of time and injected
/// into `Environment::compile`.
pub struct TemplateTable<V, P> {
    synthetic_prefix: String,
    templates: HashMap<String, Template<V, P>>,
}

impl<V, P> Default for TemplateTable<V, P> {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_SYNTHETIC_PREFIX)
    }
}

impl<V, P> fmt::Debug for TemplateTable<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.templates.keys().collect();
        keys.sort();
        f.debug_struct("TemplateTable")
            .field("synthetic_prefix", &self.synthetic_prefix)
            .field("keys", &keys)
            .finish()
    }
}

impl<V, P> TemplateTable<V, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table whose keys use a non-default synthetic prefix; it must match the
    /// prefix of the environments compiled against it.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            synthetic_prefix: prefix.into(),
            templates: HashMap::new(),
        }
    }

    /// Inserts without validating the key.
    pub fn insert<F>(&mut self, key: impl Into<String>, template: F) -> &mut Self
    where
        F: Fn(&[V]) -> P + 'static,
    {
        self.templates.insert(key.into(), Box::new(template));
        self
    }

    /// Inserts after checking that `key` is one `compile` can actually derive.
    pub fn register<F>(&mut self, key: impl Into<String>, template: F) -> CodegenResult<&mut Self>
    where
        F: Fn(&[V]) -> P + 'static,
    {
        let key = key.into();
        if let Err(message) = parse_cache_key(&self.synthetic_prefix, &key) {
            return Err(CodegenError::InvalidTemplateKey { key, message });
        }
        Ok(self.insert(key, template))
    }

    pub fn get(&self, key: &str) -> Option<&Template<V, P>> {
        self.templates.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_accepts_derivable_keys() {
        let mut table: TemplateTable<i32, i32> = TemplateTable::new();
        table
            .register("", |_| 0)
            .unwrap()
            .register("$0,$1", |values| values.iter().sum())
            .unwrap();
        assert_eq!(table.len(), 2);
        let sum = table.get("$0,$1").unwrap();
        assert_eq!(sum(&[2, 3][..]), 5);
    }

    #[test]
    fn register_rejects_underivable_keys() {
        let mut table: TemplateTable<i32, i32> = TemplateTable::new();
        let err = table.register("Foo_Bar", |_| 0).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidTemplateKey { ref key, .. } if key == "Foo_Bar"));
        assert!(table.register("$1,$0", |_| 0).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn custom_prefix_keys() {
        let mut table: TemplateTable<i32, i32> = TemplateTable::with_prefix("_l");
        assert!(table.register("_l0,_l3", |_| 0).is_ok());
        assert!(table.register("$0", |_| 0).is_err());
        assert!(table.contains_key("_l0,_l3"));
    }

    #[test]
    fn insert_skips_validation() {
        let mut table: TemplateTable<i32, i32> = TemplateTable::new();
        table.insert("anything", |_| 1);
        assert!(table.contains_key("anything"));
        assert_eq!(format!("{table:?}"), "TemplateTable { synthetic_prefix: \"$\", keys: [\"anything\"] }");
    }
}
