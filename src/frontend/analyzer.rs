//! Source analysis: declarations in, [`ApiModel`] out.
//!
//! Analysis runs in two stages:
//!
//! 1. `syn::parse_file` turns the input into a declaration list.
//! 2. A focused walk collects two shapes: named-field structs (the symbol table) and methods whose doc comment
//!    carries the generation marker. Marked methods are bound to their parameter records only after the whole
//!    file has been walked, so declaration order does not matter.
//!
//! ## Notes
//!
//! - Inline `mod` blocks are walked recursively; records are keyed by bare name, a later declaration replaces an
//!   earlier one.
//! - The first typed parameter of a marked method is the request context and is never modeled.
//! - A parameter whose type does not name a known record is dropped with a warning.

use std::collections::HashMap;

use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, Fields, FnArg, ImplItem, ImplItemFn, Item, ItemStruct, Lit, LitStr, Meta, Type};

use super::descriptor::{EndpointDescriptor, doc_lines, find_descriptor};
use super::errors::GenerationError;
use super::model::{ApiModel, EndpointMethod, EndpointSpec, FieldDecl, RecordDecl};
use super::tags::build_record;
use crate::config::GenerateConfig;

/// A marked method waiting for its parameter records to be resolved.
#[derive(Debug, Clone)]
struct MarkedMethod {
    receiver_type: String,
    method_name: String,
    descriptor: EndpointDescriptor,
    method: EndpointMethod,
    /// Parameter type names after the context parameter; `None` when the type is not a bare identifier.
    param_types: Vec<Option<String>>,
}

#[derive(Debug, Default)]
struct Scan {
    records: HashMap<String, RecordDecl>,
    methods: Vec<MarkedMethod>,
}

/// Walks one parsed input file.
pub struct SourceAnalyzer<'a> {
    config: &'a GenerateConfig,
}

impl<'a> SourceAnalyzer<'a> {
    pub fn new(config: &'a GenerateConfig) -> Self {
        Self { config }
    }

    /// Analyze the full text of one input file.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn analyze(&self, source: &str) -> Result<ApiModel, GenerationError> {
        let file = syn::parse_file(source).map_err(|e| GenerationError::from_syn(&e))?;

        let mut scan = Scan::default();
        self.scan_items(&file.items, &mut scan)?;

        let mut model = ApiModel {
            records: scan.records,
            services: Vec::new(),
        };
        for method in scan.methods {
            let endpoint = Self::bind(method, &model.records)?;
            model.push_endpoint(endpoint);
        }

        tracing::debug!(
            records = model.records.len(),
            endpoints = model.endpoint_count(),
            "analysis finished"
        );
        Ok(model)
    }

    fn scan_items(&self, items: &[Item], scan: &mut Scan) -> Result<(), GenerationError> {
        for item in items {
            match item {
                Item::Struct(item_struct) => {
                    if let Some(record) = self.record_decl(item_struct)? {
                        tracing::trace!(record = %record.name, fields = record.fields.len(), "found record");
                        scan.records.insert(record.name.clone(), record);
                    }
                }
                Item::Impl(item_impl) => {
                    let Some(receiver_type) = type_ident(&item_impl.self_ty) else {
                        continue;
                    };
                    for impl_item in &item_impl.items {
                        if let ImplItem::Fn(method) = impl_item {
                            if let Some(marked) = self.marked_method(&receiver_type, method)? {
                                scan.methods.push(marked);
                            }
                        }
                    }
                }
                Item::Fn(function) => {
                    let docs = doc_lines(&function.attrs);
                    if find_descriptor(&docs, &self.config.marker).is_some() {
                        tracing::warn!(
                            function = %function.sig.ident,
                            "generation marker on a free function is ignored; endpoints must be methods"
                        );
                    }
                }
                Item::Mod(module) => {
                    if let Some((_, items)) = &module.content {
                        self.scan_items(items, scan)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn record_decl(&self, item: &ItemStruct) -> Result<Option<RecordDecl>, GenerationError> {
        let Fields::Named(named) = &item.fields else {
            return Ok(None);
        };
        let name = item.ident.unraw().to_string();

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let Some(ident) = &field.ident else { continue };
            let field_name = ident.unraw().to_string();
            let line = ident.span().start().line;
            let tag = self
                .field_tag(&field.attrs)
                .ok_or_else(|| GenerationError::InvalidTag {
                    record: name.clone(),
                    field: field_name.clone(),
                    line,
                })?;
            fields.push(FieldDecl {
                name: field_name,
                type_name: type_ident(&field.ty).unwrap_or_else(|| field.ty.to_token_stream().to_string()),
                tag,
                line,
            });
        }

        Ok(Some(RecordDecl {
            name,
            fields,
            line: item.ident.span().start().line,
        }))
    }

    /// Join every tag attribute on a field with `,`. `None` when one of them is not a string literal.
    fn field_tag(&self, attrs: &[Attribute]) -> Option<String> {
        let mut parts = Vec::new();
        for attr in attrs.iter().filter(|a| a.path().is_ident(&self.config.tag_attribute)) {
            let text = match &attr.meta {
                Meta::List(_) => attr.parse_args::<LitStr>().ok()?.value(),
                Meta::NameValue(nv) => match &nv.value {
                    Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => s.value(),
                    _ => return None,
                },
                Meta::Path(_) => return None,
            };
            parts.push(text);
        }
        Some(parts.join(","))
    }

    fn marked_method(
        &self,
        receiver_type: &str,
        method: &ImplItemFn,
    ) -> Result<Option<MarkedMethod>, GenerationError> {
        let docs = doc_lines(&method.attrs);
        let Some(text) = find_descriptor(&docs, &self.config.marker) else {
            return Ok(None);
        };

        let method_name = method.sig.ident.unraw().to_string();
        let line = method.sig.ident.span().start().line;

        if method.sig.receiver().is_none() {
            return Err(GenerationError::MissingReceiver {
                method: method_name,
                line,
            });
        }

        let descriptor = EndpointDescriptor::parse(text).map_err(|e| GenerationError::MalformedDescriptor {
            method: method_name.clone(),
            line,
            message: e.to_string(),
        })?;
        let endpoint_method =
            EndpointMethod::from_descriptor(&descriptor.method).ok_or_else(|| GenerationError::UnsupportedMethod {
                method: method_name.clone(),
                value: descriptor.method.clone(),
            })?;

        let param_types = method
            .sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Typed(pat) => Some(type_ident(&pat.ty)),
                FnArg::Receiver(_) => None,
            })
            .skip(1)
            .collect();

        tracing::trace!(receiver = receiver_type, method = %method_name, url = %descriptor.url, "found endpoint");
        Ok(Some(MarkedMethod {
            receiver_type: receiver_type.to_string(),
            method_name,
            descriptor,
            method: endpoint_method,
            param_types,
        }))
    }

    fn bind(method: MarkedMethod, records: &HashMap<String, RecordDecl>) -> Result<EndpointSpec, GenerationError> {
        let mut params = Vec::with_capacity(method.param_types.len());
        for type_name in &method.param_types {
            match type_name.as_deref().and_then(|name| records.get(name)) {
                Some(record) => params.push(build_record(record)?),
                None => tracing::warn!(
                    method = %method.method_name,
                    param_type = type_name.as_deref().unwrap_or("<complex type>"),
                    "parameter type is not a record declared in the input; leaving it out"
                ),
            }
        }

        Ok(EndpointSpec {
            url: method.descriptor.url,
            requires_auth: method.descriptor.auth,
            method: method.method,
            method_name: method.method_name,
            receiver_type: method.receiver_type,
            params,
        })
    }
}

/// Name of a type written as a bare identifier (`CreateParams`, `String`), `None` for anything else.
fn type_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.get_ident().map(|ident| ident.unraw().to_string())
        }
        Type::Paren(paren) => type_ident(&paren.elem),
        Type::Group(group) => type_ident(&group.elem),
        _ => None,
    }
}
