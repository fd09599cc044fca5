//! apigen backend
//!
//! Turns an analyzed [`ApiModel`](crate::frontend::model::ApiModel) into formatted Rust source.
//!
//! The pipeline is:
//! 1. [`resolver`] derives per-endpoint emission facts (accepted methods, where parameters are read from)
//! 2. [`ApiEmitter`] builds the output items with `quote!`
//! 3. The token stream is re-parsed with `syn` and formatted with `prettyplease`
//!
//! ## Module Organization
//!
//! - `codegen.rs` - [`ApiCodegen`] facade: source text in, generated source out
//! - `resolver.rs` - endpoint method resolution
//! - `emit/` - token emission
//!   - `mod.rs` - [`ApiEmitter`] and identifier/literal helpers
//!   - `program.rs` - item ordering, header and formatting
//!   - `boilerplate.rs` - shared runtime helpers
//!   - `dispatcher.rs` - per-receiver `serve_http`
//!   - `handlers.rs` - per-endpoint handlers
//!   - `validators.rs` - per-record `validate`

pub mod codegen;
pub mod emit;
pub mod resolver;

pub use codegen::ApiCodegen;
pub use emit::ApiEmitter;
