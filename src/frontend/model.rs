//! Analysis model shared by the frontend and the emitter.
//!
//! The analyzer fills an [`ApiModel`]; the field builder turns raw [`RecordDecl`]s into [`RecordSpec`]s once an
//! endpoint binds them. Nothing in here is mutated after analysis finishes.

use std::collections::HashMap;
use std::fmt;

/// Scalar kinds a bound record field may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Declared as `String`.
    String,
    /// Declared as `i64`.
    Int,
}

impl ScalarType {
    /// Resolve a declared type token. Only the two supported spellings are accepted.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(ScalarType::String),
            "i64" => Some(ScalarType::Int),
            _ => None,
        }
    }

    /// The Rust spelling used in generated code and diagnostics.
    pub fn rust_name(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int => "i64",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

/// Typed value of a `default=` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Str(String),
    Int(i64),
}

/// One validation constraint attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    Required,
    Default(DefaultValue),
    /// Accepted values, kept as raw text even for `Int` fields.
    Enum(Vec<String>),
    Min(i64),
    Max(i64),
}

impl ValidationRule {
    /// Directive keyword this rule was parsed from.
    pub fn keyword(&self) -> &'static str {
        match self {
            ValidationRule::Required => "required",
            ValidationRule::Default(_) => "default",
            ValidationRule::Enum(_) => "enum",
            ValidationRule::Min(_) => "min",
            ValidationRule::Max(_) => "max",
        }
    }
}

/// A field of a bound record, with its parsed rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as declared (without a `r#` prefix).
    pub name: String,
    pub scalar_type: ScalarType,
    /// Key used to look the value up in the query string or request body.
    pub external_name: String,
    /// Render order of the checks.
    pub rules: Vec<ValidationRule>,
}

/// A record type bound as an endpoint parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// A field as it appears in the source, before tag parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    /// Declared type rendered as text (`String`, `i64`, `Option < u8 >`, ...).
    pub type_name: String,
    /// Raw tag text, empty when the field carries no tag attribute.
    pub tag: String,
    /// 1-based source line of the field.
    pub line: usize,
}

/// A named-field struct found anywhere in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub line: usize,
}

/// HTTP method requested by an endpoint descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointMethod {
    Get,
    Post,
    /// No method (or an empty string) in the descriptor: both GET and POST are accepted.
    Unspecified,
}

impl EndpointMethod {
    /// Resolve the descriptor's `method` value. Matching is exact, as in the descriptor grammar.
    pub fn from_descriptor(value: &str) -> Option<Self> {
        match value {
            "" => Some(EndpointMethod::Unspecified),
            "GET" => Some(EndpointMethod::Get),
            "POST" => Some(EndpointMethod::Post),
            _ => None,
        }
    }
}

/// A generation-tagged method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub url: String,
    pub requires_auth: bool,
    pub method: EndpointMethod,
    /// Name of the business method the handler calls.
    pub method_name: String,
    pub receiver_type: String,
    pub params: Vec<RecordSpec>,
}

impl EndpointSpec {
    /// Name of the generated handler method.
    pub fn handler_name(&self) -> String {
        format!("handler_{}", self.method_name)
    }
}

/// All endpoints implemented by one receiver type, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub receiver_type: String,
    pub endpoints: Vec<EndpointSpec>,
}

/// Result of analyzing one input file.
#[derive(Debug, Clone, Default)]
pub struct ApiModel {
    /// Symbol table: every named-field struct, keyed by name.
    pub records: HashMap<String, RecordDecl>,
    /// Receiver types in order of first appearance.
    pub services: Vec<ServiceSpec>,
}

impl ApiModel {
    /// Total number of endpoints across all receivers.
    pub fn endpoint_count(&self) -> usize {
        self.services.iter().map(|s| s.endpoints.len()).sum()
    }

    /// Append an endpoint to its receiver's group, creating the group on first sight.
    pub fn push_endpoint(&mut self, endpoint: EndpointSpec) {
        match self
            .services
            .iter_mut()
            .find(|s| s.receiver_type == endpoint.receiver_type)
        {
            Some(service) => service.endpoints.push(endpoint),
            None => self.services.push(ServiceSpec {
                receiver_type: endpoint.receiver_type.clone(),
                endpoints: vec![endpoint],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(receiver: &str, method_name: &str) -> EndpointSpec {
        EndpointSpec {
            url: format!("/{method_name}"),
            requires_auth: false,
            method: EndpointMethod::Unspecified,
            method_name: method_name.to_string(),
            receiver_type: receiver.to_string(),
            params: Vec::new(),
        }
    }

    #[test]
    fn test_scalar_type_spellings() {
        assert_eq!(ScalarType::from_type_name("String"), Some(ScalarType::String));
        assert_eq!(ScalarType::from_type_name("i64"), Some(ScalarType::Int));
        assert_eq!(ScalarType::from_type_name("u64"), None);
        assert_eq!(ScalarType::from_type_name("str"), None);
    }

    #[test]
    fn test_endpoint_method_is_exact() {
        assert_eq!(EndpointMethod::from_descriptor(""), Some(EndpointMethod::Unspecified));
        assert_eq!(EndpointMethod::from_descriptor("POST"), Some(EndpointMethod::Post));
        assert_eq!(EndpointMethod::from_descriptor("post"), None);
        assert_eq!(EndpointMethod::from_descriptor("PUT"), None);
    }

    #[test]
    fn test_push_endpoint_groups_by_receiver_in_first_seen_order() {
        let mut model = ApiModel::default();
        model.push_endpoint(endpoint("OtherApi", "create"));
        model.push_endpoint(endpoint("MyApi", "profile"));
        model.push_endpoint(endpoint("OtherApi", "delete"));

        let receivers: Vec<&str> = model.services.iter().map(|s| s.receiver_type.as_str()).collect();
        assert_eq!(receivers, ["OtherApi", "MyApi"]);
        assert_eq!(model.services[0].endpoints[1].method_name, "delete");
        assert_eq!(model.endpoint_count(), 3);
    }

    #[test]
    fn test_handler_name() {
        assert_eq!(endpoint("MyApi", "create").handler_name(), "handler_create");
    }
}
