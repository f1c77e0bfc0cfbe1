//! Binary and unary operator implementations.
//!
//! Dispatch is on the runtime type of the left operand (for binary tiers) or
//! of the operand (for unary prefixes). Errors carry no span; the evaluator
//! attaches the span of the element being evaluated.

use chrono::NaiveDateTime;

use crate::{
    evaluator::EvalErrorKind,
    parser::{BinaryOp, BoolOp, ComparisonOp, InfixOp, UnaryOp},
    values::Value,
};

/// Apply one `(operator, right operand)` group to the running left value.
pub(super) fn eval_binary(left: &Value, symbol: &str, right: &Value) -> Result<Value, EvalErrorKind> {
    let unsupported = || EvalErrorKind::UnsupportedOperator {
        op: symbol.to_string(),
        operand: left.value_type(),
    };
    let mismatch = || EvalErrorKind::OperandMismatch {
        op: symbol.to_string(),
        left: left.value_type(),
        right: right.value_type(),
    };

    let op = InfixOp::from_symbol(symbol).ok_or_else(unsupported)?;

    match left {
        Value::Double(l) => {
            let r = match op {
                InfixOp::Arithmetic(_) | InfixOp::Comparison(_) => {
                    right.as_number().ok_or_else(mismatch)?
                }
                InfixOp::BitAnd | InfixOp::Logical(_) => return Err(unsupported()),
            };
            match op {
                InfixOp::Arithmetic(op) => Ok(Value::Double(eval_binary_float(op, *l, r))),
                InfixOp::Comparison(op) => Ok(Value::Boolean(eval_comparison_float(op, *l, r))),
                InfixOp::BitAnd | InfixOp::Logical(_) => Err(unsupported()),
            }
        }
        Value::Integer(l) => {
            if op == InfixOp::Logical(BoolOp::Or) {
                return Err(unsupported());
            }
            let r = right.as_number().ok_or_else(mismatch)?;
            match op {
                InfixOp::Arithmetic(op) => {
                    Ok(Value::integral_or_double(eval_binary_float(op, *l as f64, r)))
                }
                InfixOp::Comparison(op) => {
                    Ok(Value::Boolean(eval_comparison_float(op, *l as f64, r)))
                }
                InfixOp::BitAnd => Ok(Value::Integer(l & truncate(right, r))),
                InfixOp::Logical(BoolOp::And) => Ok(Value::Boolean(*l > 0 && truncate(right, r) > 0)),
                InfixOp::Logical(BoolOp::Or) => Err(unsupported()),
            }
        }
        Value::Boolean(l) => match op {
            InfixOp::Logical(op) => {
                let r = right.as_bool().ok_or_else(mismatch)?;
                Ok(Value::Boolean(eval_bool(op, *l, r)))
            }
            _ => Err(unsupported()),
        },
        Value::Timestamp(l) => match op {
            InfixOp::Comparison(op) => {
                let r = right.as_timestamp().ok_or_else(mismatch)?;
                Ok(Value::Boolean(eval_comparison_timestamp(op, *l, r)))
            }
            _ => Err(unsupported()),
        },
        Value::Array(_) => Err(unsupported()),
    }
}

/// Apply a unary prefix operator.
///
/// `++` and `--` only produce the adjusted value; nothing is written back.
pub(super) fn eval_unary(symbol: &str, operand: &Value) -> Result<Value, EvalErrorKind> {
    let unsupported = || EvalErrorKind::UnsupportedOperator {
        op: symbol.to_string(),
        operand: operand.value_type(),
    };
    let op = UnaryOp::from_symbol(symbol);

    match operand {
        Value::Double(v) => match op {
            Some(UnaryOp::Plus) => Ok(Value::Double(*v)),
            Some(UnaryOp::Neg) => Ok(Value::Double(-v)),
            Some(UnaryOp::Increment) => Ok(Value::Double(v + 1.0)),
            Some(UnaryOp::Decrement) => Ok(Value::Double(v - 1.0)),
            Some(UnaryOp::Not) | None => Err(unsupported()),
        },
        Value::Integer(v) => match op {
            Some(UnaryOp::Plus) => Ok(Value::Integer(*v)),
            Some(UnaryOp::Neg) => Ok(Value::Integer(v.wrapping_neg())),
            Some(UnaryOp::Increment) => Ok(Value::Integer(v.wrapping_add(1))),
            Some(UnaryOp::Decrement) => Ok(Value::Integer(v.wrapping_sub(1))),
            Some(UnaryOp::Not) | None => Err(unsupported()),
        },
        Value::Boolean(v) => match op {
            Some(UnaryOp::Not) => Ok(Value::Boolean(!v)),
            _ => Err(unsupported()),
        },
        Value::Timestamp(v) => Ok(Value::Timestamp(*v)),
        Value::Array(_) => Err(unsupported()),
    }
}

/// Follows IEEE 754 semantics (produces inf/nan rather than panicking).
pub(super) fn eval_binary_float(op: BinaryOp, left: f64, right: f64) -> f64 {
    match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
    }
}

pub(super) fn eval_comparison_float(op: ComparisonOp, left: f64, right: f64) -> bool {
    match op {
        ComparisonOp::Lt => left < right,
        ComparisonOp::Le => left <= right,
        ComparisonOp::Ge => left >= right,
        ComparisonOp::Gt => left > right,
    }
}

pub(super) fn eval_comparison_timestamp(
    op: ComparisonOp,
    left: NaiveDateTime,
    right: NaiveDateTime,
) -> bool {
    match op {
        ComparisonOp::Lt => left < right,
        ComparisonOp::Le => left <= right,
        ComparisonOp::Ge => left >= right,
        ComparisonOp::Gt => left > right,
    }
}

pub(super) fn eval_bool(op: BoolOp, left: bool, right: bool) -> bool {
    match op {
        BoolOp::And => left && right,
        BoolOp::Or => left || right,
    }
}

/// Integer view of a numeric right operand; doubles truncate toward zero.
fn truncate(right: &Value, as_float: f64) -> i64 {
    match right {
        Value::Integer(r) => *r,
        _ => as_float as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::ValueType;
    use chrono::NaiveDate;

    fn day(d: u32) -> Value {
        Value::Timestamp(NaiveDate::from_ymd_opt(2000, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn test_double_arithmetic() {
        let l = Value::Double(1.5);
        assert_eq!(eval_binary(&l, "+", &Value::Double(2.0)), Ok(Value::Double(3.5)));
        assert_eq!(eval_binary(&l, "*", &Value::Integer(2)), Ok(Value::Double(3.0)));
        assert_eq!(eval_binary(&l, "<=", &Value::Double(1.5)), Ok(Value::Boolean(true)));
    }

    #[test]
    fn test_double_rejects_bitwise_and_logical() {
        let l = Value::Double(1.0);
        for op in ["&", "&&", "||"] {
            assert_eq!(
                eval_binary(&l, op, &Value::Double(1.0)),
                Err(EvalErrorKind::UnsupportedOperator {
                    op: op.to_string(),
                    operand: ValueType::Double
                })
            );
        }
    }

    #[test]
    fn test_int_arithmetic_coerces_back() {
        let l = Value::Integer(7);
        assert_eq!(eval_binary(&l, "+", &Value::Integer(1)), Ok(Value::Integer(8)));
        assert_eq!(eval_binary(&l, "/", &Value::Integer(7)), Ok(Value::Integer(1)));
        assert_eq!(eval_binary(&l, "/", &Value::Integer(2)), Ok(Value::Double(3.5)));
        assert_eq!(eval_binary(&l, "-", &Value::Double(0.5)), Ok(Value::Double(6.5)));
        assert_eq!(eval_binary(&l, "*", &Value::Double(2.0)), Ok(Value::Integer(14)));
    }

    #[test]
    fn test_int_division_by_zero() {
        // Computed in floating point, so the result is infinite rather than an error.
        assert_eq!(
            eval_binary(&Value::Integer(1), "/", &Value::Integer(0)),
            Ok(Value::Double(f64::INFINITY))
        );
    }

    #[test]
    fn test_int_bitwise_and() {
        assert_eq!(eval_binary(&Value::Integer(6), "&", &Value::Integer(3)), Ok(Value::Integer(2)));
        assert_eq!(eval_binary(&Value::Integer(7), "&", &Value::Double(5.9)), Ok(Value::Integer(5)));
    }

    #[test]
    fn test_int_logical_and_truthiness() {
        let and = |l: i64, r: i64| eval_binary(&Value::Integer(l), "&&", &Value::Integer(r));
        assert_eq!(and(2, 2), Ok(Value::Boolean(true)));
        assert_eq!(and(2, 0), Ok(Value::Boolean(false)));
        assert_eq!(and(-1, 3), Ok(Value::Boolean(false)));
        assert_eq!(
            eval_binary(&Value::Integer(1), "&&", &Value::Double(0.5)),
            Ok(Value::Boolean(false))
        );
    }

    #[test]
    fn test_int_rejects_logical_or() {
        assert!(matches!(
            eval_binary(&Value::Integer(1), "||", &Value::Integer(1)),
            Err(EvalErrorKind::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_bool_operators() {
        let t = Value::Boolean(true);
        let f = Value::Boolean(false);
        assert_eq!(eval_binary(&t, "&&", &f), Ok(Value::Boolean(false)));
        assert_eq!(eval_binary(&f, "||", &t), Ok(Value::Boolean(true)));
        assert!(matches!(
            eval_binary(&t, "+", &f),
            Err(EvalErrorKind::UnsupportedOperator { .. })
        ));
        assert!(matches!(
            eval_binary(&t, "<", &f),
            Err(EvalErrorKind::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_timestamp_comparisons() {
        assert_eq!(eval_binary(&day(2), "<", &day(4)), Ok(Value::Boolean(true)));
        assert_eq!(eval_binary(&day(4), "<", &day(2)), Ok(Value::Boolean(false)));
        assert_eq!(eval_binary(&day(2), ">=", &day(2)), Ok(Value::Boolean(true)));
        assert!(matches!(
            eval_binary(&day(2), "+", &day(4)),
            Err(EvalErrorKind::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_operand_mismatch() {
        assert_eq!(
            eval_binary(&Value::Integer(1), "+", &Value::Boolean(true)),
            Err(EvalErrorKind::OperandMismatch {
                op: "+".to_string(),
                left: ValueType::Integer,
                right: ValueType::Boolean,
            })
        );
        assert!(matches!(
            eval_binary(&day(1), "<", &Value::Integer(1)),
            Err(EvalErrorKind::OperandMismatch { .. })
        ));
        assert!(matches!(
            eval_binary(&Value::Boolean(true), "&&", &Value::Integer(1)),
            Err(EvalErrorKind::OperandMismatch { .. })
        ));
    }

    #[test]
    fn test_array_left_operand_rejected() {
        let array = Value::from(vec![1i64, 2]);
        assert!(matches!(
            eval_binary(&array, "+", &Value::Integer(1)),
            Err(EvalErrorKind::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_unary_numeric() {
        assert_eq!(eval_unary("-", &Value::Integer(3)), Ok(Value::Integer(-3)));
        assert_eq!(eval_unary("+", &Value::Integer(3)), Ok(Value::Integer(3)));
        assert_eq!(eval_unary("++", &Value::Integer(3)), Ok(Value::Integer(4)));
        assert_eq!(eval_unary("--", &Value::Double(3.5)), Ok(Value::Double(2.5)));
        assert_eq!(eval_unary("-", &Value::Integer(i64::MIN)), Ok(Value::Integer(i64::MIN)));
    }

    #[test]
    fn test_unary_bool_and_timestamp() {
        assert_eq!(eval_unary("!", &Value::Boolean(false)), Ok(Value::Boolean(true)));
        assert!(matches!(
            eval_unary("-", &Value::Boolean(true)),
            Err(EvalErrorKind::UnsupportedOperator { .. })
        ));
        assert_eq!(eval_unary("-", &day(3)), Ok(day(3)));
        assert!(matches!(
            eval_unary("!", &Value::Integer(5)),
            Err(EvalErrorKind::UnsupportedOperator { .. })
        ));
    }
}
