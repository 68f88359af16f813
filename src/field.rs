//! Field descriptors and the codec that interprets them
//!
//! A [`Field`] describes the layout of a fixed-width piece of a config page.
//! Decoding walks the descriptor over a shared [`ByteCursor`], producing a
//! [`Value`]; encoding walks it over a [`Value`], appending exactly
//! [`Field::width`] bytes. Neither direction keeps any state in the
//! descriptor itself.

use crate::codes::CodeTable;
use crate::error::{BuildError, BuildErrorKind, DecodeError, FieldPath, PathSegment};
use crate::scalar::{self, PrecisionWarning, Quantity, Rounded};
use crate::value::Value;
use std::collections::HashSet;

#[derive(Debug)]
pub enum Field {
    /// Plain byte, rendered as an integer
    Byte,
    /// Byte named through a lookup table
    Symbolic(&'static CodeTable),
    /// Keyboard modifier bitmask
    Modifiers,
    /// Report rate in Hz, `1000 / (1 + byte)`
    PollRate,
    /// Sensor resolution, `50 * byte`
    Dpi,
    /// Fixed number of elements of one kind
    Array { elem: &'static Field, len: usize },
    /// Named fields in a fixed order
    Record(&'static [(&'static str, Field)]),
}

impl Field {
    /// Number of bytes this field occupies
    pub fn width(&self) -> usize {
        match self {
            Field::Byte | Field::Symbolic(_) | Field::Modifiers | Field::PollRate | Field::Dpi => 1,
            Field::Array { elem, len } => elem.width() * len,
            Field::Record(fields) => fields.iter().map(|(_, field)| field.width()).sum(),
        }
    }

    /// Identifier used when a leaf of this kind fails
    pub fn id(&self) -> &'static str {
        match self {
            Field::Byte => "byte",
            Field::Symbolic(table) => table.id,
            Field::Modifiers => "kbModifier",
            Field::PollRate => "pollRate",
            Field::Dpi => "dpi",
            Field::Array { .. } => "array",
            Field::Record(_) => "record",
        }
    }

    pub fn decode(&self, cursor: &mut ByteCursor<'_>) -> Result<Value, DecodeError> {
        match self {
            Field::Array { elem, len } => (0..*len)
                .map(|i| elem.decode(cursor).map_err(|e| e.within(PathSegment::Index(i))))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Field::Record(fields) => fields
                .iter()
                .map(|(name, field)| {
                    field
                        .decode(cursor)
                        .map(|value| (name.to_string(), value))
                        .map_err(|e| e.within(PathSegment::Field(*name)))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Record),
            leaf => {
                let byte = cursor.next_byte(leaf.id())?;
                Ok(leaf.leaf_value(byte))
            }
        }
    }

    /// Decode a buffer that must hold exactly this field
    pub fn decode_exact(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        let mut cursor = ByteCursor::new(bytes);
        let value = self.decode(&mut cursor)?;
        match cursor.remaining() {
            0 => Ok(value),
            count => Err(DecodeError::TrailingBytes {
                expected: self.width(),
                count,
            }),
        }
    }

    fn leaf_value(&self, byte: u8) -> Value {
        match self {
            Field::Symbolic(table) => Value::Text(scalar::symbol_to_value(table, byte)),
            Field::Modifiers => Value::Text(scalar::modifiers_to_value(byte)),
            Field::PollRate => Value::Int(scalar::poll_rate_of(byte)),
            Field::Dpi => Value::Int(scalar::dpi_of(byte)),
            _ => Value::Int(byte as i64),
        }
    }

    pub fn encode(&self, value: &Value, encoder: &mut Encoder) -> Result<(), BuildError> {
        match self {
            Field::Array { elem, len } => {
                let items = expect_list(value)?;
                if items.len() != *len {
                    return Err(BuildErrorKind::LengthMismatch {
                        expected: *len,
                        actual: items.len(),
                    }
                    .into());
                }
                for (i, item) in items.iter().enumerate() {
                    encoder
                        .scoped(PathSegment::Index(i), |encoder| elem.encode(item, encoder))
                        .map_err(|e| e.within(PathSegment::Index(i)))?;
                }
                Ok(())
            }
            Field::Record(fields) => {
                let entries = expect_record(value)?;
                check_field_names(fields, entries)?;
                for (name, field) in fields.iter() {
                    let entry = value.get(name).ok_or_else(|| {
                        BuildError::new(BuildErrorKind::FieldMismatch {
                            missing: vec![name.to_string()],
                            extra: Vec::new(),
                        })
                    })?;
                    encoder
                        .scoped(PathSegment::Field(*name), |encoder| field.encode(entry, encoder))
                        .map_err(|e| e.within(PathSegment::Field(*name)))?;
                }
                Ok(())
            }
            leaf => {
                let byte = leaf.leaf_byte(value, encoder)?;
                encoder.bytes.push(byte);
                Ok(())
            }
        }
    }

    /// Encode a value into a fresh buffer
    pub fn encode_value(&self, value: &Value) -> Result<Encoded, BuildError> {
        let mut encoder = Encoder::default();
        self.encode(value, &mut encoder)?;
        Ok(encoder.finish())
    }

    fn leaf_byte(&self, value: &Value, encoder: &mut Encoder) -> Result<u8, BuildError> {
        match self {
            Field::Symbolic(table) => Ok(scalar::symbol_from_value(table, expect_text(value)?)?),
            Field::Modifiers => Ok(scalar::modifiers_from_value(expect_text(value)?)?),
            Field::PollRate => {
                let requested = expect_int(value)?;
                let rounded = scalar::poll_rate_byte(requested)?;
                Ok(encoder.note_rounding(Quantity::PollRate, requested, rounded))
            }
            Field::Dpi => {
                let requested = expect_int(value)?;
                let rounded = scalar::dpi_byte(requested)?;
                Ok(encoder.note_rounding(Quantity::Dpi, requested, rounded))
            }
            _ => {
                let n = expect_int(value)?;
                u8::try_from(n).map_err(|_| BuildErrorKind::ByteOutOfRange(n).into())
            }
        }
    }
}

/// Both missing and unexpected names are reported in one error
fn check_field_names(
    fields: &[(&'static str, Field)],
    entries: &[(String, Value)],
) -> Result<(), BuildError> {
    let expected: HashSet<&str> = fields.iter().map(|(name, _)| *name).collect();
    let present: HashSet<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    let missing: Vec<String> = fields
        .iter()
        .filter(|(name, _)| !present.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();
    let extra: Vec<String> = entries
        .iter()
        .filter(|(name, _)| !expected.contains(name.as_str()))
        .map(|(name, _)| name.clone())
        .collect();
    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(BuildErrorKind::FieldMismatch { missing, extra }.into())
    }
}

fn wrong_type(expected: &'static str, value: &Value) -> BuildError {
    BuildErrorKind::WrongType {
        expected,
        found: value.kind(),
    }
    .into()
}

fn expect_int(value: &Value) -> Result<i64, BuildError> {
    value.as_int().ok_or_else(|| wrong_type("integer", value))
}

fn expect_text(value: &Value) -> Result<&str, BuildError> {
    value.as_str().ok_or_else(|| wrong_type("string", value))
}

fn expect_list(value: &Value) -> Result<&[Value], BuildError> {
    value.as_list().ok_or_else(|| wrong_type("list", value))
}

fn expect_record(value: &Value) -> Result<&[(String, Value)], BuildError> {
    match value {
        Value::Record(entries) => Ok(entries),
        other => Err(wrong_type("record", other)),
    }
}

/// Forward-only reader over a byte buffer, shared by nested fields
#[derive(Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn next_byte(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        let byte = self
            .bytes
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::InsufficientBytes {
                path: FieldPath::default(),
                field,
                offset: self.pos,
                needed: 1,
            })?;
        self.pos += 1;
        Ok(byte)
    }
}

/// Output of a successful encode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub warnings: Vec<PrecisionWarning>,
}

/// Accumulates bytes and rounding warnings during an encode
#[derive(Debug, Default)]
pub struct Encoder {
    bytes: Vec<u8>,
    warnings: Vec<PrecisionWarning>,
    path: FieldPath,
}

impl Encoder {
    pub fn finish(self) -> Encoded {
        Encoded {
            bytes: self.bytes,
            warnings: self.warnings,
        }
    }

    /// Run `f` with `segment` appended to the path used for warnings
    pub fn scoped<T>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    fn note_rounding(&mut self, quantity: Quantity, requested: i64, rounded: Rounded) -> u8 {
        if !rounded.is_exact(requested) {
            self.warnings.push(PrecisionWarning {
                path: self.path.clone(),
                quantity,
                requested,
                actual: rounded.actual,
            });
        }
        rounded.byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::MOUSE_SCAN_CODES;

    const PAIR: Field = Field::Record(&[("a", Field::Byte), ("b", Field::Dpi)]);
    const PAIRS: Field = Field::Array {
        elem: &PAIR,
        len: 3,
    };

    fn record(entries: &[(&str, Value)]) -> Value {
        Value::Record(
            entries
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_width() {
        assert_eq!(PAIR.width(), 2);
        assert_eq!(PAIRS.width(), 6);
        assert_eq!(Field::Symbolic(&MOUSE_SCAN_CODES).width(), 1);
    }

    #[test]
    fn test_decode_shares_cursor_across_nesting() {
        let bytes = [1, 2, 3, 4, 5, 6, 7];
        let mut cursor = ByteCursor::new(&bytes);
        let value = PAIRS.decode(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 6);
        assert_eq!(value.pointer("2/a"), Some(&Value::Int(5)));
        assert_eq!(value.pointer("2/b"), Some(&Value::Int(300)));
    }

    #[test]
    fn test_decode_insufficient_bytes_names_field() {
        let err = PAIRS.decode(&mut ByteCursor::new(&[1, 2, 3, 4, 5])).unwrap_err();
        match err {
            DecodeError::InsufficientBytes {
                path,
                field,
                offset,
                ..
            } => {
                assert_eq!(path.to_string(), "[2].b");
                assert_eq!(field, "dpi");
                assert_eq!(offset, 5);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_decode_exact_rejects_trailing_bytes() {
        assert_eq!(
            PAIR.decode_exact(&[1, 2, 3]),
            Err(DecodeError::TrailingBytes {
                expected: 2,
                count: 1
            })
        );
    }

    #[test]
    fn test_byte_round_trip() {
        let bytes = [9, 0, 255, 12, 0, 1];
        let value = PAIRS.decode_exact(&bytes).unwrap();
        let encoded = PAIRS.encode_value(&value).unwrap();
        assert_eq!(encoded.bytes, bytes);
        assert!(encoded.warnings.is_empty());
    }

    #[test]
    fn test_array_length_mismatch() {
        let value = Value::List(vec![record(&[("a", Value::Int(1)), ("b", Value::Int(50))]); 2]);
        let err = PAIRS.encode_value(&value).unwrap_err();
        assert_eq!(
            err.kind,
            BuildErrorKind::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(err.path.is_empty());
    }

    #[test]
    fn test_record_reports_missing_and_extra_together() {
        let value = record(&[("a", Value::Int(1)), ("c", Value::Int(2))]);
        let err = PAIR.encode_value(&value).unwrap_err();
        assert_eq!(
            err.kind,
            BuildErrorKind::FieldMismatch {
                missing: vec!["b".to_string()],
                extra: vec!["c".to_string()],
            }
        );
    }

    #[test]
    fn test_nested_error_path() {
        let good = record(&[("a", Value::Int(1)), ("b", Value::Int(50))]);
        let bad = record(&[("a", Value::Int(256)), ("b", Value::Int(50))]);
        let value = Value::List(vec![good.clone(), bad, good]);
        let err = PAIRS.encode_value(&value).unwrap_err();
        assert_eq!(err.path.to_string(), "[1].a");
        assert_eq!(err.kind, BuildErrorKind::ByteOutOfRange(256));
    }

    #[test]
    fn test_wrong_value_type() {
        let err = Field::Symbolic(&MOUSE_SCAN_CODES)
            .encode_value(&Value::Int(1))
            .unwrap_err();
        assert_eq!(
            err.kind,
            BuildErrorKind::WrongType {
                expected: "string",
                found: "integer"
            }
        );
    }

    #[test]
    fn test_rounding_warning_carries_path() {
        let value = Value::List(vec![
            record(&[("a", Value::Int(0)), ("b", Value::Int(100))]),
            record(&[("a", Value::Int(0)), ("b", Value::Int(1))]),
            record(&[("a", Value::Int(0)), ("b", Value::Int(0))]),
        ]);
        let encoded = PAIRS.encode_value(&value).unwrap();
        assert_eq!(encoded.bytes, [0, 2, 0, 1, 0, 0]);
        assert_eq!(encoded.warnings.len(), 1);
        let warning = &encoded.warnings[0];
        assert_eq!(warning.path.to_string(), "[1].b");
        assert_eq!((warning.requested, warning.actual), (1, 50));
    }
}
