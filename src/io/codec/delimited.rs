//! Delimited form: fields in schema order joined by ` ; `.
//!
//! Only records without nested records can be written this way. Parts are
//! trimmed on decode, and `null` stands for an absent nullable field.

use super::{FieldKind, Fields, RawValue, Record, Value, timestamp};
use crate::{Error, Result};

/// Separator between fields.
pub const SEPARATOR: &str = " ; ";

/// Encodes a record in delimited form.
///
/// # Errors
///
/// Returns [`Error::Validation`] if a text field contains `;` or has
/// surrounding whitespace, or the schema has a nested record, since none of
/// these survive decoding.
pub fn encode<R: Record>(record: &R) -> Result<String> {
    let values = record.to_values();
    let mut parts = Vec::with_capacity(values.len());
    for (field, value) in R::FIELDS.iter().zip(values) {
        let part = match value {
            Value::Null => "null".to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => format!("{v:?}"),
            Value::Text(text) if text.contains(';') => {
                return Err(Error::validation(
                    R::TYPE_NAME,
                    format!("field '{}' cannot contain ';' in delimited form", field.name),
                ));
            },
            Value::Text(text) if text.trim() != text => {
                return Err(Error::validation(
                    R::TYPE_NAME,
                    format!(
                        "field '{}' cannot start or end with whitespace in delimited form",
                        field.name
                    ),
                ));
            },
            Value::Text(text) => text,
            Value::Enum(name) => name.to_string(),
            Value::Timestamp(at) => timestamp::format(&at),
            Value::Record(_) => {
                return Err(Error::validation(
                    R::TYPE_NAME,
                    format!("field '{}' is a record and has no delimited form", field.name),
                ));
            },
        };
        parts.push(part);
    }
    Ok(parts.join(SEPARATOR))
}

/// Decodes a record from delimited form.
///
/// # Errors
///
/// Returns [`Error::Format`] for `R` if the part count does not match the
/// schema or any part fails to convert.
pub fn decode<R: Record>(input: &str) -> Result<R> {
    decode_fields::<R>(input)
        .and_then(|fields| R::from_fields(&fields))
        .map_err(|e| Error::format(R::TYPE_NAME, input, e))
}

fn decode_fields<R: Record>(input: &str) -> Result<Fields<'_>> {
    if input.trim().is_empty() {
        return Err(Error::InvalidInput("input is empty".to_string()));
    }

    let parts: Vec<&str> = input.split(SEPARATOR).collect();
    if parts.len() != R::FIELDS.len() {
        return Err(Error::InvalidInput(format!(
            "expected {} parts separated by '{SEPARATOR}', got {}",
            R::FIELDS.len(),
            parts.len()
        )));
    }

    let mut values = Vec::with_capacity(parts.len());
    for (field, part) in R::FIELDS.iter().zip(parts) {
        let part = part.trim();
        let value = if field.nullable && part == "null" {
            RawValue::Null
        } else {
            match field.kind {
                FieldKind::Text | FieldKind::Timestamp => RawValue::Text(part.to_string()),
                FieldKind::Integer | FieldKind::Float | FieldKind::Enum if !part.is_empty() => {
                    RawValue::Token(part)
                },
                FieldKind::Integer | FieldKind::Float | FieldKind::Enum => {
                    return Err(Error::InvalidInput(format!(
                        "field '{}' is empty",
                        field.name
                    )));
                },
                FieldKind::Record => {
                    return Err(Error::InvalidInput(format!(
                        "field '{}' is a record and has no delimited form",
                        field.name
                    )));
                },
            }
        };
        values.push(value);
    }

    Ok(Fields::new(R::TYPE_NAME, R::FIELDS, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::codec::FieldSpec;

    #[derive(Debug, PartialEq)]
    struct Span {
        start: Option<i64>,
        label: String,
    }

    impl Record for Span {
        const TYPE_NAME: &'static str = "Span";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::nullable("start", FieldKind::Integer),
            FieldSpec::required("label", FieldKind::Text),
        ];

        fn to_values(&self) -> Vec<Value> {
            vec![self.start.into(), self.label.as_str().into()]
        }

        fn from_fields(fields: &Fields<'_>) -> Result<Self> {
            Ok(Self {
                start: fields.opt_number("start")?,
                label: fields.text("label")?,
            })
        }
    }

    #[test]
    fn test_encode_joins_with_separator() {
        let span = Span {
            start: None,
            label: "left edge".to_string(),
        };
        assert_eq!(encode(&span).unwrap(), "null ; left edge");
    }

    #[test]
    fn test_decode_trims_parts() {
        let span: Span = decode(" 12  ;  middle ").unwrap();
        assert_eq!(span.start, Some(12));
        assert_eq!(span.label, "middle");
    }

    #[test]
    fn test_required_text_may_read_null() {
        let span: Span = decode("null ; null").unwrap();
        assert_eq!(span.start, None);
        assert_eq!(span.label, "null");
    }

    #[test]
    fn test_encode_rejects_semicolon_in_text() {
        let span = Span {
            start: Some(1),
            label: "a;b".to_string(),
        };
        assert!(matches!(encode(&span), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_encode_rejects_untrimmed_text() {
        for label in ["trailing ", " leading", "\ttab"] {
            let span = Span {
                start: Some(1),
                label: label.to_string(),
            };
            assert!(
                matches!(encode(&span), Err(Error::Validation { .. })),
                "{label:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_rejects_wrong_part_count() {
        for input in ["", "   ", "1", "1 ; a ; b", "1;a"] {
            assert!(
                matches!(decode::<Span>(input), Err(Error::Format { entity: "Span", .. })),
                "{input:?} should be rejected"
            );
        }
    }
}
