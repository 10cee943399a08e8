//! Maps an environment's linked values onto a precompiled template.
//!
//! Text is never turned into code at runtime. The link table is put into a
//! canonical order, the synthetic names in that order form the cache key, and
//! the template stored under that key is invoked with every linked value.

pub mod symbol;
pub mod table;

use crate::env::{Environment, LinkEntry};
use crate::error::{CodegenError, CodegenResult};
use table::TemplateTable;
use tracing::{debug, error};

/// Joins the names of the leading synthetic run of `ordered`, up to and
/// including the last synthetic entry. Empty when nothing is synthetic.
pub fn cache_key<V>(ordered: &[&LinkEntry<V>]) -> String {
    let end = ordered
        .iter()
        .rposition(|entry| entry.is_synthetic())
        .map_or(0, |index| index + 1);
    ordered[..end]
        .iter()
        .map(|entry| entry.name())
        .collect::<Vec<_>>()
        .join(",")
}

impl<V> Environment<V> {
    /// Link names in compile order.
    pub fn ordered_names(&self) -> Vec<String> {
        self.links()
            .ordered()
            .into_iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }

    pub fn cache_key(&self) -> String {
        cache_key(&self.links().ordered())
    }
}

impl<V: Clone> Environment<V> {
    /// Resolves the template for this environment's shape and invokes it with
    /// the linked values in compile order.
    pub fn compile<P>(&self, table: &TemplateTable<V, P>) -> CodegenResult<P> {
        let ordered = self.links().ordered();
        let key = cache_key(&ordered);
        debug!(key = %key, links = ordered.len(), "resolving template");
        let Some(template) = table.get(&key) else {
            error!(key = %key, templates = table.len(), "no precompiled template");
            return Err(CodegenError::MissingTemplate { key });
        };
        let values: Vec<V> = ordered.iter().map(|entry| entry.value().clone()).collect();
        Ok(template(values.as_slice()))
    }
}
