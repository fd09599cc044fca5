//! Emit the handler module for an analyzed API.
//!
//! This module defines [`ApiEmitter`] and the small identifier/literal helpers shared by the focused submodules that
//! build each part of the output.
//!
//! ## Notes
//! - Emission produces a Rust syntax tree (`syn`) and formats it via `prettyplease`.
//! - The output is meant to be `include!`d as (or written into) a child module of the input module, so it never
//!   carries inner attributes and reaches user types through `use super::*`.
//!
//! ## See also
//! - [`program`]: item ordering, header and formatting
//! - [`boilerplate`]: runtime helpers shared by every handler
//! - [`dispatcher`]: per-receiver routing
//! - [`handlers`]: per-endpoint extraction and business calls
//! - [`validators`]: per-record `validate`

mod boilerplate;
mod dispatcher;
mod handlers;
mod program;
mod validators;

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use crate::config::GenerateConfig;

/// Emit Rust source for one [`ApiModel`](crate::frontend::model::ApiModel).
///
/// The public API is `emit_program()` (implemented in `program.rs`); the other emission helpers are implemented on
/// this type across submodules.
pub struct ApiEmitter<'a> {
    config: &'a GenerateConfig,
}

impl<'a> ApiEmitter<'a> {
    pub fn new(config: &'a GenerateConfig) -> Self {
        Self { config }
    }
}

/// Identifier for a declared name, falling back to a raw identifier for keywords (`r#type`).
pub(crate) fn ident(name: &str) -> Ident {
    match syn::parse_str::<Ident>(name) {
        Ok(ident) => ident,
        Err(_) => Ident::new_raw(name, Span::call_site()),
    }
}

/// Integer literal without a suffix; negative values become a `-` token followed by the magnitude.
pub(crate) fn int_literal(value: i64) -> TokenStream {
    let magnitude = Literal::u64_unsuffixed(value.unsigned_abs());
    if value < 0 {
        quote! { -#magnitude }
    } else {
        quote! { #magnitude }
    }
}

/// Format `tokens` as a file and drop all whitespace and trailing commas, so assertions do not depend on line
/// wrapping.
#[cfg(test)]
pub(crate) fn squashed(tokens: TokenStream) -> String {
    let file: syn::File = match syn::parse2(tokens) {
        Ok(file) => file,
        Err(err) => panic!("emitted tokens do not parse: {err}"),
    };
    squash(&prettyplease::unparse(&file))
}

#[cfg(test)]
pub(crate) fn squash(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.replace(",)", ")").replace(",]", "]").replace(",}", "}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_field_becomes_raw_ident() {
        assert_eq!(ident("login").to_string(), "login");
        assert_eq!(ident("type").to_string(), "r#type");
    }

    #[test]
    fn test_int_literal_sign() {
        assert_eq!(int_literal(128).to_string(), "128");
        assert_eq!(int_literal(-5).to_string(), "- 5");
        assert_eq!(int_literal(i64::MIN).to_string(), "- 9223372036854775808");
    }
}
