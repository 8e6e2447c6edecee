use std::fmt;

use serde_json::{Number, Value};

/// Semantic type of a decoded JSON value.
///
/// JSON has a single number type on the wire, so `Int` and `Float64` are
/// recovered from the decoded value rather than from the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Float64,
    String,
    Bool,
    Null,
    Array,
    Object,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float64 => "float64",
            DataType::String => "string",
            DataType::Bool => "bool",
            DataType::Null => "null",
            DataType::Array => "array",
            DataType::Object => "object",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(value: &Value) -> DataType {
    match value {
        Value::Number(number) => classify_number(number),
        Value::String(_) => DataType::String,
        Value::Bool(_) => DataType::Bool,
        Value::Null => DataType::Null,
        Value::Array(_) => DataType::Array,
        Value::Object(_) => DataType::Object,
    }
}

fn classify_number(number: &Number) -> DataType {
    if number.is_i64() || number.is_u64() {
        return DataType::Int;
    }

    match number.as_f64() {
        Some(value) if has_decimals(value) => DataType::Float64,
        _ => DataType::Int,
    }
}

/// Returns true when the shortest round-trip rendering of `value` has a
/// fractional part. `Display` for f64 never switches to exponent notation,
/// so `1.0` renders as `1` and `1e-7` as `0.0000001`.
pub fn has_decimals(value: f64) -> bool {
    value.to_string().contains('.')
}
