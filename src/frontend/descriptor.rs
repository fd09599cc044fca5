//! Endpoint descriptors embedded in doc comments.
//!
//! A method is generation-tagged when one of its doc lines contains the marker; the rest of that line is a JSON
//! object:
//!
//! ```text
//! /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
//! ```

use serde::Deserialize;
use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Parsed JSON object following the generation marker. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EndpointDescriptor {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub auth: bool,
    #[serde(default)]
    pub method: String,
}

impl EndpointDescriptor {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Collect the text of `///` comments (`#[doc = "..."]` attributes) in order.
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Return the descriptor text following the first occurrence of `marker`, if any doc line carries it.
pub fn find_descriptor<'a>(docs: &'a [String], marker: &str) -> Option<&'a str> {
    docs.iter()
        .find_map(|line| line.split_once(marker).map(|(_, rest)| rest.trim()))
}
