use miette::Diagnostic;
use thiserror::Error;

pub type CodegenResult<T> = Result<T, CodegenError>;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("No precompiled template for cache key `{key}`")]
    #[diagnostic(
        code(codegen::missing_template),
        help("the template table is out of sync with this environment's link naming; regenerate it")
    )]
    MissingTemplate { key: String },
    #[error("Invalid template key `{key}`: {message}")]
    #[diagnostic(code(codegen::invalid_template_key))]
    InvalidTemplateKey { key: String, message: String },
}
