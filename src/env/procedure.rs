use super::scope::Scope;
use indexmap::{map::Entry, IndexMap};
use std::fmt;

const PARAM_PREFIX: &str = "a";

#[derive(Debug, Clone)]
pub struct Procedure {
    name: String,
    params: Vec<String>,
    body: Scope,
}

impl Procedure {
    pub fn new(name: impl Into<String>, param_count: usize) -> Self {
        let mut procedure = Self {
            name: name.into(),
            params: Vec::with_capacity(param_count),
            body: Scope::new(),
        };
        for _ in 0..param_count {
            procedure.arg();
        }
        procedure
    }

    /// Allocates the next positional parameter.
    pub fn arg(&mut self) -> String {
        let name = format!("{PARAM_PREFIX}{}", self.params.len());
        self.params.push(name.clone());
        name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    pub fn body(&self) -> &Scope {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Scope {
        &mut self.body
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function({}) {{ {} }}", self.params.join(","), self.body)
    }
}

/// Procedures keyed by name. Re-registering a name replaces the procedure but
/// keeps its original position, so rendering order is first-registration order.
#[derive(Debug, Clone, Default)]
pub struct ProcedureRegistry {
    procedures: IndexMap<String, Procedure>,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, param_count: usize) -> &mut Procedure {
        let name = name.into();
        let procedure = Procedure::new(name.clone(), param_count);
        match self.procedures.entry(name) {
            Entry::Occupied(mut slot) => {
                slot.insert(procedure);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(procedure),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Procedure> {
        self.procedures.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.values()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}
