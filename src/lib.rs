pub mod compile;
pub mod config;
pub mod diagnostics;
pub mod env;
pub mod error;

pub use compile::table::{Template, TemplateTable};
pub use config::{CodegenConfig, ConfigError};
pub use env::{
    Block, Capture, Conditional, Emit, Environment, Fragment, LinkEntry, LinkTable, Linkable,
    Procedure, ProcedureRegistry, Scope,
};
pub use error::{CodegenError, CodegenResult};
