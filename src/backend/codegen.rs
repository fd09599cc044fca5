//! Code generation facade
//!
//! [`ApiCodegen`] runs the whole pipeline for one input file:
//!
//! ```text
//! source → SourceAnalyzer → ApiModel → ApiEmitter (quote!) → prettyplease → generated source
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apigen::backend::ApiCodegen;
//! use apigen::config::GenerateConfig;
//!
//! let config = GenerateConfig::default();
//! let generated = ApiCodegen::new(&config).try_generate(&source)?;
//! ```

use super::ApiEmitter;
use crate::config::GenerateConfig;
use crate::frontend::{ApiModel, GenerationError, SourceAnalyzer};

/// Source-to-source generator for one configuration.
pub struct ApiCodegen<'a> {
    config: &'a GenerateConfig,
}

impl<'a> ApiCodegen<'a> {
    pub fn new(config: &'a GenerateConfig) -> Self {
        Self { config }
    }

    /// Analyze `source` without emitting anything.
    pub fn analyze(&self, source: &str) -> Result<ApiModel, GenerationError> {
        SourceAnalyzer::new(self.config).analyze(source)
    }

    /// Generate the handler module for `source`.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn try_generate(&self, source: &str) -> Result<String, GenerationError> {
        let model = self.analyze(source)?;
        tracing::info!(
            receivers = model.services.len(),
            endpoints = model.endpoint_count(),
            "generating handlers"
        );
        self.generate_model(&model)
    }

    /// Emit an already analyzed model.
    pub fn generate_model(&self, model: &ApiModel) -> Result<String, GenerationError> {
        ApiEmitter::new(self.config).emit_program(model)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
pub struct MyApi;

pub struct ProfileParams {
    #[apivalidator("required")]
    pub login: String,
}

impl MyApi {
    /// apigen:api {"url": "/user/profile"}
    pub fn profile(&self, ctx: &http::Extensions, params: ProfileParams) -> Result<String, ApiError> {
        Ok(params.login)
    }
}
"#;

    #[test]
    fn test_generate_is_idempotent() {
        let config = GenerateConfig::default();
        let codegen = ApiCodegen::new(&config);
        let first = codegen.try_generate(SOURCE).unwrap();
        let second = codegen.try_generate(SOURCE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_source_parses() {
        let config = GenerateConfig::default();
        let out = ApiCodegen::new(&config).try_generate(SOURCE).unwrap();
        syn::parse_file(&out).unwrap();
    }

    #[test]
    fn test_analysis_errors_surface() {
        let config = GenerateConfig::default();
        let err = ApiCodegen::new(&config).try_generate("fn (").unwrap_err();
        assert!(matches!(err, GenerationError::Parse { .. }));
    }
}
