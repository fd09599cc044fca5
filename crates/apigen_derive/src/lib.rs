//! Derive macro for apigen parameter structs.
//!
//! `#[derive(ApiParams)]` registers `apivalidator` as a helper attribute, so parameter structs carrying field tags
//! compile as ordinary Rust. The derive adds no items; it only rejects tags that apigen could not read.
//!
//! # Example
//! ```ignore
//! #[derive(ApiParams)]
//! pub struct CreateParams {
//!     #[apivalidator("required,min=10")]
//!     pub login: String,
//!     #[apivalidator = "min=0,max=128"]
//!     pub age: i64,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitStr, Meta, parse_macro_input};

const TAG_ATTRIBUTE: &str = "apivalidator";

/// Tags must be string literals:
///
/// ```compile_fail
/// use apigen_derive::ApiParams;
///
/// #[derive(ApiParams)]
/// pub struct Params {
///     #[apivalidator(required)]
///     pub login: String,
/// }
/// ```
#[proc_macro_derive(ApiParams, attributes(apivalidator))]
pub fn derive_api_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    check_params(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn check_params(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "ApiParams can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "ApiParams can only be derived for structs",
            ));
        }
    };

    let mut errors: Option<syn::Error> = None;
    for attr in fields.iter().flat_map(|field| &field.attrs) {
        if let Err(err) = check_tag(attr) {
            match &mut errors {
                Some(all) => all.combine(err),
                None => errors = Some(err),
            }
        }
    }

    match errors {
        Some(err) => Err(err),
        None => Ok(TokenStream2::new()),
    }
}

/// Accept `#[apivalidator("...")]` and `#[apivalidator = "..."]`; ignore other attributes.
fn check_tag(attr: &Attribute) -> syn::Result<()> {
    if !attr.path().is_ident(TAG_ATTRIBUTE) {
        return Ok(());
    }
    match &attr.meta {
        Meta::List(_) => attr.parse_args::<LitStr>().map(|_| ()),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit { lit: Lit::Str(_), .. }) => Ok(()),
            other => Err(syn::Error::new_spanned(other, "apivalidator tag must be a string literal")),
        },
        Meta::Path(path) => Err(syn::Error::new_spanned(
            path,
            "apivalidator tag must be a string literal, e.g. #[apivalidator(\"required\")]",
        )),
    }
}
