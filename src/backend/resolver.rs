//! Resolve how a generated handler treats each endpoint method kind.

use crate::frontend::model::EndpointMethod;

/// Where a handler reads its parameter values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// URL-encoded request body.
    Body,
    /// URL query string.
    Query,
    /// Body for POST requests, query string for everything else.
    BodyOrQuery,
}

/// HTTP methods the dispatcher lets through for an endpoint, in check order.
pub fn accepted_methods(method: EndpointMethod) -> &'static [&'static str] {
    match method {
        EndpointMethod::Get => &["GET"],
        EndpointMethod::Post => &["POST"],
        EndpointMethod::Unspecified => &["GET", "POST"],
    }
}

pub fn param_source(method: EndpointMethod) -> ParamSource {
    match method {
        EndpointMethod::Get => ParamSource::Query,
        EndpointMethod::Post => ParamSource::Body,
        EndpointMethod::Unspecified => ParamSource::BodyOrQuery,
    }
}
