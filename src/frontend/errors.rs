//! Define the fatal errors of a generation run.
//!
//! Every variant aborts the whole run; nothing is written when one is returned. Recoverable conditions (unresolvable
//! parameter records, non-integer `min`/`max` bounds) are not errors and are only logged.
//!
//! ## Notes
//!
//! - Messages name the offending method, field or type so users can find it without a span.
//! - `line` fields are 1-based source lines of the input file.

use miette::Diagnostic;
use thiserror::Error;

/// Fatal error while analyzing the input or building its records.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerationError {
    #[error("failed to parse input at line {line}: {message}")]
    #[diagnostic(code(apigen::parse))]
    Parse { message: String, line: usize },

    #[error("malformed endpoint descriptor on method `{method}` (line {line}): {message}")]
    #[diagnostic(
        code(apigen::descriptor),
        help("the marker must be followed by a JSON object such as {{\"url\": \"/user/create\", \"auth\": true, \"method\": \"POST\"}}")
    )]
    MalformedDescriptor { method: String, line: usize, message: String },

    #[error("unsupported method `{value}` in endpoint descriptor on method `{method}`")]
    #[diagnostic(code(apigen::descriptor_method), help("use \"GET\", \"POST\", or leave `method` empty to accept both"))]
    UnsupportedMethod { method: String, value: String },

    #[error("endpoint method `{method}` (line {line}) must take `&self`")]
    #[diagnostic(code(apigen::receiver))]
    MissingReceiver { method: String, line: usize },

    #[error("tag on field `{record}.{field}` (line {line}) must be a string literal")]
    #[diagnostic(code(apigen::tag), help("write the tag as #[apivalidator(\"required,min=3\")]"))]
    InvalidTag { record: String, field: String, line: usize },

    #[error("unknown type {type_name} of field `{record}.{field}` (line {line})")]
    #[diagnostic(code(apigen::unknown_type), help("parameter record fields must be `String` or `i64`"))]
    UnknownType { record: String, field: String, type_name: String, line: usize },

    #[error("invalid int default `{value}` for field `{record}.{field}` (line {line})")]
    #[diagnostic(code(apigen::default))]
    InvalidDefault { record: String, field: String, value: String, line: usize },

    #[error("`{rule}` is not supported for {scalar_type} field `{record}.{field}` (line {line})")]
    #[diagnostic(code(apigen::unsupported_rule))]
    UnsupportedRule {
        record: String,
        field: String,
        rule: &'static str,
        scalar_type: &'static str,
        line: usize,
    },

    #[error("failed to format generated code: {0}")]
    #[diagnostic(code(apigen::emit))]
    Emit(String),
}

impl GenerationError {
    /// Build a parse error from a `syn` error, keeping its starting line.
    pub fn from_syn(error: &syn::Error) -> Self {
        GenerationError::Parse {
            message: error.to_string(),
            line: error.span().start().line,
        }
    }
}
