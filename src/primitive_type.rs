use serde_json::Value;
use std::{convert::TryFrom, fmt};

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// For faster error handling in "type" keyword validator we have this enum, to match
/// with it instead of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl PrimitiveType {
    /// Classify a JSON value. Reals without a fractional part are integers, as long as their
    /// magnitude does not exceed 2^53.
    #[must_use]
    pub fn of(instance: &Value) -> PrimitiveType {
        match instance {
            Value::Array(_) => PrimitiveType::Array,
            Value::Bool(_) => PrimitiveType::Boolean,
            Value::Null => PrimitiveType::Null,
            Value::Number(number) => {
                if number.is_i64() || number.is_u64() {
                    PrimitiveType::Integer
                } else if number
                    .as_f64()
                    .map_or(false, |value| value.abs() <= MAX_SAFE_INTEGER && value.fract() == 0.)
                {
                    PrimitiveType::Integer
                } else {
                    PrimitiveType::Number
                }
            }
            Value::Object(_) => PrimitiveType::Object,
            Value::String(_) => PrimitiveType::String,
        }
    }

    /// Whether a value of type `actual` satisfies `"type": self`.
    #[inline]
    #[must_use]
    pub fn accepts(self, actual: PrimitiveType) -> bool {
        self == actual || (self == PrimitiveType::Number && actual == PrimitiveType::Integer)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

impl From<&Value> for PrimitiveType {
    fn from(instance: &Value) -> Self {
        PrimitiveType::of(instance)
    }
}
