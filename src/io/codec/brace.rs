//! Brace form: `TypeName{field=value, field2=value2}`.
//!
//! Text and timestamps are single-quoted, with `\'` and `\\` as the only
//! escapes. Numbers and enum names are bare. Nested records appear inline in
//! their own brace form. An unquoted `null` marks an absent nullable field.

use super::{FieldKind, Fields, RawValue, Record, Value, timestamp};
use crate::{Error, Result};
use std::fmt::Write as _;

/// Encodes a record in brace form.
pub fn encode<R: Record>(record: &R) -> String {
    let values = record.to_values();
    debug_assert_eq!(values.len(), R::FIELDS.len(), "{} schema drift", R::TYPE_NAME);

    let mut out = String::with_capacity(32);
    out.push_str(R::TYPE_NAME);
    out.push('{');
    for (idx, (field, value)) in R::FIELDS.iter().zip(&values).enumerate() {
        debug_assert!(
            value.fits(field),
            "{}.{} does not accept {value:?}",
            R::TYPE_NAME,
            field.name
        );
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(field.name);
        out.push('=');
        write_value(&mut out, value);
    }
    out.push('}');
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Integer(v) => {
            let _ = write!(out, "{v}");
        },
        Value::Float(v) => {
            let _ = write!(out, "{v:?}");
        },
        Value::Text(text) => write_quoted(out, text),
        Value::Enum(name) => out.push_str(name),
        Value::Timestamp(at) => write_quoted(out, &timestamp::format(at)),
        Value::Record(nested) => out.push_str(nested),
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('\'');
    for c in text.chars() {
        if matches!(c, '\'' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
}

/// Decodes a record from brace form.
///
/// # Errors
///
/// Returns [`Error::Format`] for `R` if the text does not match the schema or
/// any field fails to convert.
pub fn decode<R: Record>(input: &str) -> Result<R> {
    decode_fields::<R>(input)
        .and_then(|fields| R::from_fields(&fields))
        .map_err(|e| Error::format(R::TYPE_NAME, input, e))
}

fn decode_fields<R: Record>(input: &str) -> Result<Fields<'_>> {
    let mut scanner = Scanner::new(input);
    scanner.skip_ws();
    scanner.eat(R::TYPE_NAME)?;
    scanner.skip_ws();
    scanner.eat("{")?;

    let mut values = Vec::with_capacity(R::FIELDS.len());
    for (idx, field) in R::FIELDS.iter().enumerate() {
        scanner.skip_ws();
        if idx > 0 {
            scanner.eat(",")?;
            scanner.skip_ws();
        }
        scanner.eat(field.name)?;
        scanner.skip_ws();
        scanner.eat("=")?;
        scanner.skip_ws();

        let value = if scanner.null() {
            if !field.nullable {
                return Err(Error::validation(
                    R::TYPE_NAME,
                    format!("field '{}' must not be null", field.name),
                ));
            }
            RawValue::Null
        } else {
            match field.kind {
                FieldKind::Text | FieldKind::Timestamp => {
                    RawValue::Text(scanner.quoted()?)
                },
                FieldKind::Record => RawValue::Nested(scanner.nested()?),
                FieldKind::Integer | FieldKind::Float | FieldKind::Enum => {
                    RawValue::Token(scanner.token()?)
                },
            }
        };
        values.push(value);
    }

    scanner.skip_ws();
    scanner.eat("}")?;
    scanner.skip_ws();
    if !scanner.at_end() {
        return Err(scanner.error("end of input"));
    }

    Ok(Fields::new(R::TYPE_NAME, R::FIELDS, values))
}

/// Cursor over brace-form text.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, expected: &str) -> Error {
        Error::InvalidInput(format!("expected {expected} at offset {}", self.pos))
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, literal: &str) -> Result<()> {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(self.error(&format!("'{literal}'")))
        }
    }

    /// Consumes an unquoted `null` that ends at a delimiter.
    fn null(&mut self) -> bool {
        let Some(after) = self.rest().strip_prefix("null") else {
            return false;
        };
        let ends = after
            .chars()
            .next()
            .is_none_or(|c| c == ',' || c == '}' || c.is_whitespace());
        if ends {
            self.pos += "null".len();
        }
        ends
    }

    fn quoted(&mut self) -> Result<String> {
        self.eat("'")?;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((idx, c)) = chars.next() {
            match c {
                '\'' => {
                    self.pos += idx + 1;
                    return Ok(out);
                },
                '\\' => match chars.next() {
                    Some((_, escaped @ ('\'' | '\\'))) => out.push(escaped),
                    Some((_, other)) => {
                        return Err(Error::InvalidInput(format!(
                            "unsupported escape '\\{other}'"
                        )));
                    },
                    None => break,
                },
                other => out.push(other),
            }
        }
        Err(Error::InvalidInput("unterminated quoted text".to_string()))
    }

    fn token(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let end = rest.find([',', '}']).unwrap_or(rest.len());
        let token = rest.get(..end).unwrap_or_default().trim();
        if token.is_empty() {
            return Err(self.error("a value"));
        }
        self.pos += end;
        Ok(token)
    }

    /// Consumes a balanced `Name{...}` block, skipping braces inside quotes.
    fn nested(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let mut depth = 0usize;
        let mut in_quote = false;
        let mut escaped = false;

        for (idx, c) in rest.char_indices() {
            if in_quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '\'' {
                    in_quote = false;
                }
                continue;
            }
            match c {
                '\'' => in_quote = true,
                '{' => depth += 1,
                '}' if depth == 0 => return Err(self.error("a nested record")),
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += idx + 1;
                        return Ok(rest.get(..=idx).unwrap_or_default());
                    }
                },
                ',' if depth == 0 => return Err(self.error("a nested record")),
                _ => {},
            }
        }
        Err(Error::InvalidInput("unterminated nested record".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::codec::FieldSpec;

    #[derive(Debug, PartialEq)]
    struct Tag {
        label: String,
        weight: Option<i32>,
    }

    impl Record for Tag {
        const TYPE_NAME: &'static str = "Tag";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::required("label", FieldKind::Text),
            FieldSpec::nullable("weight", FieldKind::Integer),
        ];

        fn to_values(&self) -> Vec<Value> {
            vec![self.label.as_str().into(), self.weight.into()]
        }

        fn from_fields(fields: &Fields<'_>) -> Result<Self> {
            Ok(Self {
                label: fields.text("label")?,
                weight: fields.opt_number("weight")?,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: Tag,
        right: Option<Tag>,
    }

    impl Record for Pair {
        const TYPE_NAME: &'static str = "Pair";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::required("left", FieldKind::Record),
            FieldSpec::nullable("right", FieldKind::Record),
        ];

        fn to_values(&self) -> Vec<Value> {
            vec![
                Value::record(&self.left),
                self.right.as_ref().map_or(Value::Null, Value::record),
            ]
        }

        fn from_fields(fields: &Fields<'_>) -> Result<Self> {
            Ok(Self {
                left: fields.record("left")?,
                right: fields.opt_record("right")?,
            })
        }
    }

    #[test]
    fn test_encode_quotes_text_and_writes_null() {
        let tag = Tag {
            label: "it's {a}, b=c".to_string(),
            weight: None,
        };
        assert_eq!(encode(&tag), r"Tag{label='it\'s {a}, b=c', weight=null}");
    }

    #[test]
    fn test_decode_handles_delimiters_inside_text() {
        let tag: Tag = decode(r"Tag{label='it\'s {a}, b=c \\ d', weight=4}").unwrap();
        assert_eq!(tag.label, r"it's {a}, b=c \ d");
        assert_eq!(tag.weight, Some(4));
    }

    #[test]
    fn test_decode_nested_records() {
        let pair = Pair {
            left: Tag {
                label: "x}".to_string(),
                weight: Some(1),
            },
            right: None,
        };
        let text = encode(&pair);
        assert_eq!(text, "Pair{left=Tag{label='x}', weight=1}, right=null}");
        assert_eq!(decode::<Pair>(&text).unwrap(), pair);
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let tag: Tag = decode("  Tag{ label = 'a' ,weight= 2 }  ").unwrap();
        assert_eq!(tag.weight, Some(2));
    }

    #[test]
    fn test_quoted_null_is_text() {
        let tag: Tag = decode("Tag{label='null', weight=null}").unwrap();
        assert_eq!(tag.label, "null");
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        for input in [
            "",
            "Tag",
            "Gat{label='a', weight=1}",
            "Tag{weight=1, label='a'}",
            "Tag{label='a'}",
            "Tag{label='a', weight=1",
            "Tag{label='a, weight=1}",
            "Tag{label=null, weight=1}",
            "Tag{label='a', weight=}",
            "Tag{label='a', weight=one}",
            "Tag{label='a', weight=1} trailing",
            r"Tag{label='\n', weight=1}",
        ] {
            let err = decode::<Tag>(input).unwrap_err();
            assert!(
                matches!(&err, Error::Format { entity: "Tag", input: i, .. } if i == input),
                "{input:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_nested_error_carries_inner_cause() {
        let err = decode::<Pair>("Pair{left=Tag{label='a', weight=x}, right=null}").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid Pair format"));
        assert!(message.contains("invalid Tag format"));
        assert!(message.contains("cannot parse 'x'"));
    }
}
