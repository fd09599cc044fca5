//! Parse field tags into validation rules and build bound records.
//!
//! Tag grammar: comma-separated directives, each either a bare keyword or `key=value`.
//!
//! | Directive            | Effect                                                 |
//! |----------------------|--------------------------------------------------------|
//! | `required`           | appends [`ValidationRule::Required`]                   |
//! | `default=<literal>`  | inserts [`ValidationRule::Default`] at the front       |
//! | `paramname=<name>`   | overrides the external name, no rule                   |
//! | `enum=<a>\|<b>\|...` | appends [`ValidationRule::Enum`] with raw values        |
//! | `min=<int>`          | appends [`ValidationRule::Min`], bad bound reads as 0  |
//! | `max=<int>`          | appends [`ValidationRule::Max`], bad bound reads as 0  |
//!
//! Unknown keys are ignored so tags can carry directives for other tools.

use super::errors::GenerationError;
use super::model::{DefaultValue, FieldDecl, FieldSpec, RecordDecl, RecordSpec, ScalarType, ValidationRule};

/// Build a [`RecordSpec`] from its raw declaration, failing on the first bad field.
pub fn build_record(decl: &RecordDecl) -> Result<RecordSpec, GenerationError> {
    let fields = decl
        .fields
        .iter()
        .map(|field| build_field(&decl.name, field))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RecordSpec {
        name: decl.name.clone(),
        fields,
    })
}

/// Resolve a field's scalar type and parse its tag.
pub fn build_field(record: &str, decl: &FieldDecl) -> Result<FieldSpec, GenerationError> {
    let scalar_type = ScalarType::from_type_name(&decl.type_name).ok_or_else(|| GenerationError::UnknownType {
        record: record.to_string(),
        field: decl.name.clone(),
        type_name: decl.type_name.clone(),
        line: decl.line,
    })?;

    let mut rules = Vec::new();
    let mut external_name = None;

    for directive in decl.tag.split(',') {
        let directive = directive.trim();
        let (key, value) = directive.split_once('=').unwrap_or((directive, ""));
        match key.trim() {
            "required" => rules.push(ValidationRule::Required),
            "default" => {
                let default = parse_default(record, decl, scalar_type, value)?;
                // Always rendered first, ahead of any earlier rule including a previous default.
                rules.insert(0, ValidationRule::Default(default));
            }
            "paramname" => {
                if !value.is_empty() {
                    external_name = Some(value.to_string());
                }
            }
            "enum" => rules.push(ValidationRule::Enum(value.split('|').map(str::to_string).collect())),
            "min" => rules.push(ValidationRule::Min(parse_bound(decl, value))),
            "max" => {
                if scalar_type == ScalarType::String {
                    return Err(GenerationError::UnsupportedRule {
                        record: record.to_string(),
                        field: decl.name.clone(),
                        rule: "max",
                        scalar_type: scalar_type.rust_name(),
                        line: decl.line,
                    });
                }
                rules.push(ValidationRule::Max(parse_bound(decl, value)));
            }
            "" => {}
            other => tracing::trace!(field = %decl.name, directive = other, "ignoring unknown tag directive"),
        }
    }

    Ok(FieldSpec {
        name: decl.name.clone(),
        scalar_type,
        external_name: external_name.unwrap_or_else(|| decl.name.to_lowercase()),
        rules,
    })
}

fn parse_default(
    record: &str,
    decl: &FieldDecl,
    scalar_type: ScalarType,
    value: &str,
) -> Result<DefaultValue, GenerationError> {
    match scalar_type {
        ScalarType::String => Ok(DefaultValue::Str(value.to_string())),
        ScalarType::Int => value
            .parse::<i64>()
            .map(DefaultValue::Int)
            .map_err(|_| GenerationError::InvalidDefault {
                record: record.to_string(),
                field: decl.name.clone(),
                value: value.to_string(),
                line: decl.line,
            }),
    }
}

/// `min`/`max` bounds that are not integers read as 0.
fn parse_bound(decl: &FieldDecl, value: &str) -> i64 {
    value.parse().unwrap_or_else(|_| {
        tracing::debug!(field = %decl.name, bound = value, "non-integer bound, using 0");
        0
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decl(name: &str, type_name: &str, tag: &str) -> FieldDecl {
        FieldDecl {
            name: name.to_string(),
            type_name: type_name.to_string(),
            tag: tag.to_string(),
            line: 1,
        }
    }

    fn field(name: &str, type_name: &str, tag: &str) -> FieldSpec {
        build_field("Params", &decl(name, type_name, tag)).unwrap()
    }

    #[test]
    fn test_empty_tag_has_no_rules() {
        let f = field("Login", "String", "");
        assert!(f.rules.is_empty());
        assert_eq!(f.external_name, "login");
        assert_eq!(f.scalar_type, ScalarType::String);
    }

    #[test]
    fn test_rules_keep_tag_order() {
        let f = field("login", "String", "required,min=10");
        assert_eq!(f.rules, vec![ValidationRule::Required, ValidationRule::Min(10)]);
    }

    #[test]
    fn test_default_moves_to_front() {
        let f = field("status", "String", "enum=user|moderator|admin,default=user");
        assert_eq!(
            f.rules,
            vec![
                ValidationRule::Default(DefaultValue::Str("user".to_string())),
                ValidationRule::Enum(vec!["user".to_string(), "moderator".to_string(), "admin".to_string()]),
            ]
        );
    }

    #[test]
    fn test_default_keeps_all_earlier_rules() {
        let f = field("age", "i64", "required,min=1,max=9,default=5");
        assert_eq!(
            f.rules,
            vec![
                ValidationRule::Default(DefaultValue::Int(5)),
                ValidationRule::Required,
                ValidationRule::Min(1),
                ValidationRule::Max(9),
            ]
        );
    }

    #[test]
    fn test_duplicate_default_last_parsed_comes_first() {
        let f = field("class", "String", "default=warrior,required,default=rogue");
        assert_eq!(
            f.rules,
            vec![
                ValidationRule::Default(DefaultValue::Str("rogue".to_string())),
                ValidationRule::Default(DefaultValue::Str("warrior".to_string())),
                ValidationRule::Required,
            ]
        );
    }

    #[test]
    fn test_paramname_overrides_external_name() {
        let f = field("name", "String", "paramname=full_name");
        assert_eq!(f.external_name, "full_name");
        assert!(f.rules.is_empty());
    }

    #[test]
    fn test_external_name_is_lowercased() {
        assert_eq!(field("UserName", "String", "").external_name, "username");
    }

    #[test]
    fn test_enum_values_stay_raw_for_int() {
        let f = field("level", "i64", "enum=1|02|three");
        assert_eq!(
            f.rules,
            vec![ValidationRule::Enum(vec!["1".to_string(), "02".to_string(), "three".to_string()])]
        );
    }

    #[test]
    fn test_non_integer_bound_reads_as_zero() {
        let f = field("age", "i64", "min=ten,max=");
        assert_eq!(f.rules, vec![ValidationRule::Min(0), ValidationRule::Max(0)]);
    }

    #[test]
    fn test_unknown_directives_are_ignored() {
        let f = field("login", "String", "required,pattern=^a,,trim");
        assert_eq!(f.rules, vec![ValidationRule::Required]);
    }

    #[test]
    fn test_directives_are_trimmed() {
        let f = field("age", "i64", " required , min=3");
        assert_eq!(f.rules, vec![ValidationRule::Required, ValidationRule::Min(3)]);
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let err = build_field("Params", &decl("id", "u64", "")).unwrap_err();
        assert!(matches!(err, GenerationError::UnknownType { ref type_name, .. } if type_name == "u64"));
    }

    #[test]
    fn test_bad_int_default_is_fatal() {
        let err = build_field("Params", &decl("age", "i64", "default=old")).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDefault { ref value, .. } if value == "old"));
    }

    #[test]
    fn test_max_on_string_is_fatal() {
        let err = build_field("Params", &decl("login", "String", "max=5")).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedRule { rule: "max", .. }));
    }

    #[test]
    fn test_build_record_stops_at_first_bad_field() {
        let record = RecordDecl {
            name: "Params".to_string(),
            fields: vec![decl("login", "String", "required"), decl("flag", "bool", "")],
            line: 1,
        };
        let err = build_record(&record).unwrap_err();
        assert!(matches!(err, GenerationError::UnknownType { ref field, .. } if field == "flag"));
    }
}
