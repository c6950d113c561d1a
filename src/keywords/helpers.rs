use serde_json::Value;

/// The largest integer an `f64` represents exactly, 2^53.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A non-negative integer limit. Whole floats like `2.0` are accepted.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn as_limit(value: &Value) -> Option<u64> {
    if let Some(limit) = value.as_u64() {
        return Some(limit);
    }
    match value.as_f64() {
        Some(limit) if limit >= 0.0 && limit.fract() == 0.0 && limit <= MAX_SAFE_INTEGER => {
            Some(limit as u64)
        }
        _ => None,
    }
}

/// Whether `value` is a number below zero.
#[inline]
pub(crate) fn is_negative(value: &Value) -> bool {
    value.as_f64().map_or(false, |value| value < 0.0)
}

#[cfg(test)]
mod tests {
    use super::{as_limit, is_negative};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(0), Some(0))]
    #[test_case(&json!(3), Some(3))]
    #[test_case(&json!(3.0), Some(3))]
    #[test_case(&json!(3.5), None)]
    #[test_case(&json!(-1), None)]
    #[test_case(&json!("3"), None)]
    fn limits(value: &Value, expected: Option<u64>) {
        assert_eq!(as_limit(value), expected);
    }

    #[test_case(&json!(-1), true)]
    #[test_case(&json!(-0.5), true)]
    #[test_case(&json!(0), false)]
    #[test_case(&json!("-1"), false)]
    fn negative(value: &Value, expected: bool) {
        assert_eq!(is_negative(value), expected);
    }
}
