//! Emit the whole generated module to formatted Rust source.
//!
//! Item order is fixed: boilerplate, then for each receiver type its dispatcher followed by its handlers, then one
//! `validate` per distinct bound record in order of first reference. Every collection walked here is ordered, so
//! identical input always yields byte-identical output.
//!
//! ## Notes
//!
//! - The output is formatted using `prettyplease` after parsing the generated tokens with `syn`.
//! - Emission is codegen-only: it does not read or write files.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;

use super::ApiEmitter;
use crate::frontend::errors::GenerationError;
use crate::frontend::model::{ApiModel, RecordSpec};
use crate::version::APIGEN_VERSION;

impl ApiEmitter<'_> {
    /// Emit a complete model to formatted Rust code.
    #[tracing::instrument(skip_all, fields(services = model.services.len()))]
    pub fn emit_program(&self, model: &ApiModel) -> Result<String, GenerationError> {
        let tokens = self.emit_program_tokens(model);
        let syntax_tree: syn::File = syn::parse2(tokens).map_err(|e| GenerationError::Emit(e.to_string()))?;
        let formatted = prettyplease::unparse(&syntax_tree);

        Ok(format!(
            "// Code generated by apigen v{APIGEN_VERSION}. DO NOT EDIT.\n\n{formatted}"
        ))
    }

    /// Emit a model to a `TokenStream` (without formatting).
    pub fn emit_program_tokens(&self, model: &ApiModel) -> TokenStream {
        let boilerplate = self.emit_boilerplate(model.endpoint_count() > 0);
        let services = model.services.iter().map(|service| {
            let dispatcher = self.emit_dispatcher(service);
            let handlers = self.emit_handlers(service);
            quote! {
                #dispatcher
                #handlers
            }
        });
        let validators = bound_records(model)
            .into_iter()
            .map(|record| self.emit_validator(record));

        quote! {
            #boilerplate
            #(#services)*
            #(#validators)*
        }
    }
}

/// Distinct records bound by any endpoint, in order of first reference.
fn bound_records(model: &ApiModel) -> Vec<&RecordSpec> {
    let mut seen = HashSet::new();
    model
        .services
        .iter()
        .flat_map(|service| &service.endpoints)
        .flat_map(|endpoint| &endpoint.params)
        .filter(|record| seen.insert(record.name.as_str()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GenerateConfig;
    use crate::frontend::model::{EndpointMethod, EndpointSpec};

    fn record(name: &str) -> RecordSpec {
        RecordSpec {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    fn endpoint(receiver: &str, method_name: &str, params: Vec<RecordSpec>) -> EndpointSpec {
        EndpointSpec {
            url: format!("/{method_name}"),
            requires_auth: false,
            method: EndpointMethod::Unspecified,
            method_name: method_name.to_string(),
            receiver_type: receiver.to_string(),
            params,
        }
    }

    fn model(endpoints: Vec<EndpointSpec>) -> ApiModel {
        let mut model = ApiModel::default();
        for endpoint in endpoints {
            model.push_endpoint(endpoint);
        }
        model
    }

    #[test]
    fn test_bound_records_are_distinct_in_first_reference_order() {
        let model = model(vec![
            endpoint("MyApi", "a", vec![record("B")]),
            endpoint("OtherApi", "b", vec![record("A"), record("B")]),
            endpoint("MyApi", "c", vec![record("A")]),
        ]);
        let names: Vec<&str> = bound_records(&model).iter().map(|r| r.name.as_str()).collect();
        // MyApi's endpoints are grouped first: a(B), c(A); then OtherApi: b(A, B).
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_header_and_item_order() {
        let config = GenerateConfig::default();
        let model = model(vec![endpoint("MyApi", "profile", vec![record("ProfileParams")])]);
        let out = ApiEmitter::new(&config).emit_program(&model).unwrap();

        assert!(out.starts_with(&format!("// Code generated by apigen v{APIGEN_VERSION}. DO NOT EDIT.\n")));
        let boilerplate = out.find("fn int_param").unwrap();
        let dispatcher = out.find("pub fn serve_http").unwrap();
        let handler = out.find("fn handler_profile").unwrap();
        let validator = out.find("impl ProfileParams").unwrap();
        assert!(boilerplate < dispatcher);
        assert!(dispatcher < handler);
        assert!(handler < validator);
    }

    #[test]
    fn test_business_error_helper_only_with_endpoints() {
        let config = GenerateConfig::default();
        let emitter = ApiEmitter::new(&config);

        let empty = emitter.emit_program(&ApiModel::default()).unwrap();
        assert!(!empty.contains("write_business_error"));
        assert!(!empty.contains("serve_http"));

        let with_endpoint = emitter.emit_program(&model(vec![endpoint("MyApi", "ping", Vec::new())])).unwrap();
        assert!(with_endpoint.contains("fn write_business_error"));
    }

    #[test]
    fn test_auth_constants_follow_config() {
        let config = GenerateConfig::new().with_auth_header("X-Api-Key").with_auth_secret("s3cret");
        let out = ApiEmitter::new(&config).emit_program(&ApiModel::default()).unwrap();
        assert!(out.contains(r#"const AUTH_HEADER: &str = "X-Api-Key";"#));
        assert!(out.contains(r#"const AUTH_SECRET: &str = "s3cret";"#));
    }

    #[test]
    fn test_output_has_no_inner_attributes() {
        let config = GenerateConfig::default();
        let out = ApiEmitter::new(&config)
            .emit_program(&model(vec![endpoint("MyApi", "ping", Vec::new())]))
            .unwrap();
        assert!(!out.contains("#!["));
    }
}
