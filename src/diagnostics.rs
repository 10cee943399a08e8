use crate::{config::ConfigError, error::CodegenError};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(codegen::config))]
pub struct ConfigDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{message}")]
    span: Option<SourceSpan>,
    message: String,
}

impl ConfigDiagnostic {
    /// Only parse failures point into the document; other config errors have
    /// no location.
    pub fn from_error(error: &ConfigError) -> Option<Self> {
        let ConfigError::Parse {
            path,
            message,
            text,
            span,
        } = error
        else {
            return None;
        };
        Some(Self {
            src: NamedSource::new(path.display().to_string(), text.clone()),
            span: span
                .as_ref()
                .map(|range| SourceSpan::from((range.start, range.len()))),
            message: message.clone(),
        })
    }
}

pub fn render_codegen_error(error: &CodegenError) -> String {
    format!("{:?}", Report::new(error.clone()))
}

pub fn report_codegen_error(error: &CodegenError) {
    eprintln!("{}", render_codegen_error(error));
}

pub fn report_config_error(error: &ConfigError) {
    match ConfigDiagnostic::from_error(error) {
        Some(diagnostic) => eprintln!("{:?}", Report::new(diagnostic)),
        None => eprintln!("Config error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodegenConfig;

    #[test]
    fn missing_template_report_names_the_key() {
        let rendered = render_codegen_error(&CodegenError::MissingTemplate {
            key: "$0,$1".into(),
        });
        assert!(rendered.contains("$0,$1"), "{rendered}");
        assert!(rendered.contains("codegen::missing_template"), "{rendered}");
    }

    #[test]
    fn parse_errors_become_located_diagnostics() {
        let err = CodegenConfig::from_toml_str("filler = [1").unwrap_err();
        let diagnostic = ConfigDiagnostic::from_error(&err).unwrap();
        assert!(diagnostic.span.is_some());
    }

    #[test]
    fn validation_errors_have_no_location() {
        let err = CodegenConfig::from_toml_str("synthetic_prefix = \"\"").unwrap_err();
        assert!(ConfigDiagnostic::from_error(&err).is_none());
    }
}
