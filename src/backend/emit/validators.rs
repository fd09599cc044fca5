//! Per-record `validate` routines.
//!
//! Checks run field by field in declaration order, and within a field in rule order; the first failing check
//! returns its message. Defaults are written back into the record, so later checks and the business method see them.

use proc_macro2::TokenStream;
use quote::quote;

use super::{ApiEmitter, ident, int_literal};
use crate::frontend::model::{DefaultValue, FieldSpec, RecordSpec, ScalarType, ValidationRule};

impl ApiEmitter<'_> {
    /// `impl <Record> { pub fn validate(&mut self) -> Result<(), ValidationError> }`
    pub(super) fn emit_validator(&self, record: &RecordSpec) -> TokenStream {
        let record_name = ident(&record.name);
        let checks = record
            .fields
            .iter()
            .flat_map(|field| field.rules.iter().map(move |rule| render_rule(rule, field)));

        quote! {
            impl #record_name {
                pub fn validate(&mut self) -> Result<(), ValidationError> {
                    #(#checks)*
                    Ok(())
                }
            }
        }
    }
}

/// Render one rule as a statement of `validate`.
///
/// A `Min` below 1 on a `String` can never fail and renders nothing. `Max` on a `String` is rejected while parsing
/// tags and also renders nothing here.
pub(super) fn render_rule(rule: &ValidationRule, field: &FieldSpec) -> TokenStream {
    let name = ident(&field.name);
    let ext = field.external_name.as_str();

    match (rule, field.scalar_type) {
        (ValidationRule::Required, ScalarType::String) => {
            let message = format!("{ext} must me not empty");
            quote! {
                if self.#name.is_empty() {
                    return Err(ValidationError::new(#message));
                }
            }
        }
        (ValidationRule::Required, ScalarType::Int) => {
            let message = format!("{ext} must me not empty");
            quote! {
                if self.#name == 0 {
                    return Err(ValidationError::new(#message));
                }
            }
        }
        (ValidationRule::Default(DefaultValue::Str(value)), _) => quote! {
            if self.#name.is_empty() {
                self.#name = String::from(#value);
            }
        },
        (ValidationRule::Default(DefaultValue::Int(value)), _) => {
            let value = int_literal(*value);
            quote! {
                if self.#name == 0 {
                    self.#name = #value;
                }
            }
        }
        (ValidationRule::Enum(values), scalar_type) => {
            let message = format!("{ext} must be one of [{}]", values.join(", "));
            let current = match scalar_type {
                ScalarType::String => quote! { &self.#name.as_str() },
                ScalarType::Int => quote! { &self.#name.to_string().as_str() },
            };
            quote! {
                if ![#(#values),*].contains(#current) {
                    return Err(ValidationError::new(#message));
                }
            }
        }
        (ValidationRule::Min(min), ScalarType::String) => {
            if *min <= 0 {
                return TokenStream::new();
            }
            let message = format!("{ext} len must be >= {min}");
            let min = int_literal(*min);
            quote! {
                if self.#name.len() < #min {
                    return Err(ValidationError::new(#message));
                }
            }
        }
        (ValidationRule::Min(min), ScalarType::Int) => {
            let message = format!("{ext} must be >= {min}");
            let min = int_literal(*min);
            quote! {
                if self.#name < #min {
                    return Err(ValidationError::new(#message));
                }
            }
        }
        (ValidationRule::Max(max), ScalarType::Int) => {
            let message = format!("{ext} must be <= {max}");
            let max = int_literal(*max);
            quote! {
                if self.#name > #max {
                    return Err(ValidationError::new(#message));
                }
            }
        }
        (ValidationRule::Max(_), ScalarType::String) => TokenStream::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::emit::{squash, squashed};
    use crate::config::GenerateConfig;

    fn field(name: &str, scalar_type: ScalarType, rules: Vec<ValidationRule>) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            scalar_type,
            external_name: name.to_lowercase(),
            rules,
        }
    }

    fn render(fields: Vec<FieldSpec>) -> String {
        let config = GenerateConfig::default();
        let record = RecordSpec {
            name: "CreateParams".to_string(),
            fields,
        };
        squashed(ApiEmitter::new(&config).emit_validator(&record))
    }

    #[test]
    fn test_required_messages() {
        let out = render(vec![
            field("login", ScalarType::String, vec![ValidationRule::Required]),
            field("age", ScalarType::Int, vec![ValidationRule::Required]),
        ]);
        assert!(out.contains(&squash("pub fn validate(&mut self) -> Result<(), ValidationError>")));
        assert!(out.contains(&squash("if self.login.is_empty()")));
        assert!(out.contains(&squash("if self.age == 0")));
        assert!(out.contains(&squash(r#"ValidationError::new("login must me not empty")"#)));
    }

    #[test]
    fn test_default_then_enum() {
        let out = render(vec![field(
            "status",
            ScalarType::String,
            vec![
                ValidationRule::Default(DefaultValue::Str("user".to_string())),
                ValidationRule::Enum(vec!["user".to_string(), "moderator".to_string(), "admin".to_string()]),
            ],
        )]);
        let default = out.find(&squash(r#"self.status = String::from("user");"#)).unwrap();
        let enum_check = out
            .find(&squash(r#"if !["user", "moderator", "admin"].contains(&self.status.as_str())"#))
            .unwrap();
        assert!(default < enum_check);
        assert!(out.contains(&squash(r#""status must be one of [user, moderator, admin]""#)));
    }

    #[test]
    fn test_int_enum_compares_decimal_text() {
        let out = render(vec![field(
            "level",
            ScalarType::Int,
            vec![ValidationRule::Enum(vec!["1".to_string(), "2".to_string()])],
        )]);
        assert!(out.contains(&squash(r#"["1", "2"].contains(&self.level.to_string().as_str())"#)));
    }

    #[test]
    fn test_bounds() {
        let out = render(vec![
            field("login", ScalarType::String, vec![ValidationRule::Min(10)]),
            field("age", ScalarType::Int, vec![ValidationRule::Min(0), ValidationRule::Max(128)]),
        ]);
        assert!(out.contains(&squash("if self.login.len() < 10")));
        assert!(out.contains(&squash(r#""login len must be >= 10""#)));
        assert!(out.contains(&squash("if self.age < 0")));
        assert!(out.contains(&squash(r#""age must be >= 0""#)));
        assert!(out.contains(&squash("if self.age > 128")));
        assert!(out.contains(&squash(r#""age must be <= 128""#)));
    }

    #[test]
    fn test_negative_int_literals() {
        let out = render(vec![field(
            "delta",
            ScalarType::Int,
            vec![ValidationRule::Default(DefaultValue::Int(-3)), ValidationRule::Min(-10)],
        )]);
        assert!(out.contains(&squash("self.delta = -3;")));
        assert!(out.contains(&squash("if self.delta < -10")));
    }

    #[test]
    fn test_non_positive_string_min_renders_nothing() {
        let f = field("login", ScalarType::String, Vec::new());
        assert!(render_rule(&ValidationRule::Min(0), &f).is_empty());
        assert!(render_rule(&ValidationRule::Min(-2), &f).is_empty());
    }

    #[test]
    fn test_keyword_field_uses_raw_ident() {
        let out = render(vec![field("type", ScalarType::String, vec![ValidationRule::Required])]);
        assert!(out.contains(&squash("if self.r#type.is_empty()")));
    }

    #[test]
    fn test_record_without_rules_always_passes() {
        let out = render(vec![field("login", ScalarType::String, Vec::new())]);
        assert!(out.contains(&squash("pub fn validate(&mut self) -> Result<(), ValidationError> { Ok(()) }")));
    }
}
