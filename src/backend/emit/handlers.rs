//! Per-endpoint handlers: read parameters, validate, call the business method, write the envelope.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::{ApiEmitter, ident};
use crate::backend::resolver::{ParamSource, param_source};
use crate::frontend::model::{EndpointSpec, FieldSpec, RecordSpec, ScalarType, ServiceSpec};

impl ApiEmitter<'_> {
    /// One `impl <Receiver>` block holding a `handler_<method>` per endpoint.
    pub(super) fn emit_handlers(&self, service: &ServiceSpec) -> TokenStream {
        let receiver = ident(&service.receiver_type);
        let handlers = service.endpoints.iter().map(|endpoint| self.emit_handler(endpoint));
        quote! {
            impl #receiver {
                #(#handlers)*
            }
        }
    }

    fn emit_handler(&self, endpoint: &EndpointSpec) -> TokenStream {
        let handler_name = ident(&endpoint.handler_name());
        let method_name = ident(&endpoint.method_name);

        // Records without fields read nothing, so the form would go unused.
        let reads_form = endpoint.params.iter().any(|record| !record.fields.is_empty());
        let form = if !reads_form {
            TokenStream::new()
        } else {
            let source = match param_source(endpoint.method) {
                ParamSource::Body => quote! { body_to_map(r.body()) },
                ParamSource::Query => quote! { query_to_map(r.uri().query()) },
                ParamSource::BodyOrQuery => quote! {
                    if *r.method() == Method::POST {
                        body_to_map(r.body())
                    } else {
                        query_to_map(r.uri().query())
                    }
                },
            };
            quote! { let form = #source; }
        };

        let inputs: Vec<Ident> = (0..endpoint.params.len()).map(input_ident).collect();
        let extractions = endpoint
            .params
            .iter()
            .zip(&inputs)
            .map(|(record, input)| emit_extraction(record, input));

        quote! {
            fn #handler_name(&self, r: &Request<Vec<u8>>) -> Response<Vec<u8>> {
                #form
                #(#extractions)*
                let ctx = r.extensions();
                match self.#method_name(ctx #(, #inputs)*) {
                    Ok(response) => write_response(Some(response), None, StatusCode::OK),
                    Err(err) => write_business_error(err.into()),
                }
            }
        }
    }
}

/// `input`, `input_2`, `input_3`, ... for the parameters of one handler.
fn input_ident(index: usize) -> Ident {
    if index == 0 {
        format_ident!("input")
    } else {
        format_ident!("input_{}", index + 1)
    }
}

/// Build the record from the form, then run its `validate`.
fn emit_extraction(record: &RecordSpec, input: &Ident) -> TokenStream {
    let record_name = ident(&record.name);
    let fields = record.fields.iter().map(emit_field_value);
    quote! {
        let mut #input = #record_name {
            #(#fields,)*
        };
        if let Err(err) = #input.validate() {
            return write_error_message(err.to_string(), StatusCode::BAD_REQUEST);
        }
    }
}

fn emit_field_value(field: &FieldSpec) -> TokenStream {
    let name = ident(&field.name);
    let key = field.external_name.as_str();
    match field.scalar_type {
        ScalarType::String => quote! { #name: string_param(&form, #key) },
        ScalarType::Int => {
            let message = format!("{} must be int", field.external_name);
            quote! {
                #name: match int_param(&form, #key) {
                    Ok(value) => value,
                    Err(_) => return write_error_message(#message, StatusCode::BAD_REQUEST),
                }
            }
        }
    }
}
