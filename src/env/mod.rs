pub mod block;
pub mod cond;
pub mod link;
pub mod procedure;
pub mod scope;

pub use block::{Block, Fragment};
pub use cond::Conditional;
pub use link::{LinkEntry, LinkTable, Linkable};
pub use procedure::{Procedure, ProcedureRegistry};
pub use scope::Scope;

use crate::config::CodegenConfig;

/// Anything that accepts instructions: a block, or a builder that forwards to
/// one (a scope's entry, a conditional's then branch, a procedure body).
pub trait Emit {
    fn target(&mut self) -> &mut Block;

    fn push(&mut self, fragment: impl Into<Fragment>) -> &mut Self
    where
        Self: Sized,
    {
        self.target().push(fragment);
        self
    }

    fn append<I>(&mut self, fragments: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<Fragment>,
    {
        self.target().append(fragments);
        self
    }

    fn def(&mut self) -> String {
        self.target().def()
    }

    fn def_with<I>(&mut self, parts: I) -> String
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.target().def_with(parts)
    }

    fn cond(&mut self, predicate: impl Into<String>) -> &mut Conditional
    where
        Self: Sized,
    {
        self.target().cond(predicate)
    }
}

/// Builders backed by a scope, which can capture and restore properties.
pub trait Capture {
    fn scope_mut(&mut self) -> &mut Scope;

    fn save(&mut self, container: &str, key: &str) -> String {
        self.scope_mut().save(container, key)
    }

    fn set(&mut self, container: &str, key: &str, value: &str) -> String {
        self.scope_mut().set(container, key, value)
    }
}

impl Emit for Block {
    fn target(&mut self) -> &mut Block {
        self
    }
}

impl Emit for Scope {
    fn target(&mut self) -> &mut Block {
        self.entry_mut()
    }
}

impl Emit for Conditional {
    fn target(&mut self) -> &mut Block {
        self.then_scope_mut().entry_mut()
    }
}

impl Emit for Procedure {
    fn target(&mut self) -> &mut Block {
        self.body_mut().entry_mut()
    }
}

impl Capture for Scope {
    fn scope_mut(&mut self) -> &mut Scope {
        self
    }
}

impl Capture for Conditional {
    fn scope_mut(&mut self) -> &mut Scope {
        self.then_scope_mut()
    }
}

impl Capture for Procedure {
    fn scope_mut(&mut self) -> &mut Scope {
        self.body_mut()
    }
}

/// One code-generation session: linked values, a global block and the
/// registered procedures.
#[derive(Debug, Clone)]
pub struct Environment<V> {
    config: CodegenConfig,
    links: LinkTable<V>,
    global: Block,
    procedures: ProcedureRegistry,
}

impl<V> Default for Environment<V> {
    fn default() -> Self {
        Self::with_config(CodegenConfig::default())
    }
}

impl<V> Environment<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodegenConfig) -> Self {
        Self {
            links: LinkTable::with_config(&config),
            config,
            global: Block::new(),
            procedures: ProcedureRegistry::new(),
        }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    pub fn links(&self) -> &LinkTable<V> {
        &self.links
    }

    pub fn global(&self) -> &Block {
        &self.global
    }

    pub fn global_mut(&mut self) -> &mut Block {
        &mut self.global
    }

    /// Registers a procedure, replacing any earlier one with the same name.
    pub fn proc(&mut self, name: impl Into<String>, param_count: usize) -> &mut Procedure {
        self.procedures.register(name, param_count)
    }

    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    pub fn procedure_mut(&mut self, name: &str) -> Option<&mut Procedure> {
        self.procedures.get_mut(name)
    }

    pub fn procedures(&self) -> &ProcedureRegistry {
        &self.procedures
    }

    /// Splits the environment so values can be linked while a procedure or the
    /// global block is being written.
    pub fn parts_mut(&mut self) -> (&mut LinkTable<V>, &mut Block, &mut ProcedureRegistry) {
        (&mut self.links, &mut self.global, &mut self.procedures)
    }

    /// Full program text: procedures as `var <name>=<function>;` in
    /// registration order, then the global block.
    pub fn source(&self) -> String {
        let mut out = String::new();
        for procedure in self.procedures.iter() {
            out.push_str(&format!("var {}={};", procedure.name(), procedure));
        }
        out.push_str(&self.global.render());
        out
    }

    /// Text the offline generator turns into the template for this shape:
    /// a function taking every linked value, in compile order.
    pub fn template_source(&self) -> String {
        format!(
            "function({}) {{ {} }}",
            self.ordered_names().join(","),
            self.source()
        )
    }
}

impl<V: Linkable> Environment<V> {
    pub fn link(&mut self, value: V) -> String {
        self.links.link(value)
    }
}
