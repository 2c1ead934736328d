use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Integer semantics
///
/// One home for the machine's arithmetic so that the engine and the
/// optimizer's constant folding cannot disagree. Division and modulo
/// are floor operations: the quotient rounds toward negative infinity
/// and the remainder takes the sign of the divisor. Addition,
/// subtraction, multiplication, and negation wrap.
pub struct Operation {}

impl Operation {
    pub fn sum(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_add(rhs)
    }

    pub fn subtract(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_sub(rhs)
    }

    pub fn multiply(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_mul(rhs)
    }

    pub fn negate(val: i64) -> i64 {
        val.wrapping_neg()
    }

    pub fn divide(lhs: i64, rhs: i64) -> Result<i64> {
        if rhs == 0 {
            return Err(error!(DivisionByZero));
        }
        let quotient = lhs.wrapping_div(rhs);
        let remainder = lhs.wrapping_rem(rhs);
        if remainder != 0 && (remainder < 0) != (rhs < 0) {
            Ok(quotient.wrapping_sub(1))
        } else {
            Ok(quotient)
        }
    }

    pub fn modulo(lhs: i64, rhs: i64) -> Result<i64> {
        if rhs == 0 {
            return Err(error!(ModuloByZero));
        }
        let remainder = lhs.wrapping_rem(rhs);
        if remainder != 0 && (remainder < 0) != (rhs < 0) {
            Ok(remainder.wrapping_add(rhs))
        } else {
            Ok(remainder)
        }
    }

    pub fn equal(lhs: i64, rhs: i64) -> i64 {
        if lhs == rhs {
            1
        } else {
            0
        }
    }

    pub fn not_equal(lhs: i64, rhs: i64) -> i64 {
        if lhs != rhs {
            1
        } else {
            0
        }
    }

    pub fn less(lhs: i64, rhs: i64) -> i64 {
        if lhs < rhs {
            1
        } else {
            0
        }
    }

    pub fn greater(lhs: i64, rhs: i64) -> i64 {
        if lhs > rhs {
            1
        } else {
            0
        }
    }

    pub fn less_equal(lhs: i64, rhs: i64) -> i64 {
        if lhs <= rhs {
            1
        } else {
            0
        }
    }

    pub fn greater_equal(lhs: i64, rhs: i64) -> i64 {
        if lhs >= rhs {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_floor_division() {
        assert_eq!(Operation::divide(7, 2).unwrap(), 3);
        assert_eq!(Operation::divide(-7, 2).unwrap(), -4);
        assert_eq!(Operation::divide(7, -2).unwrap(), -4);
        assert_eq!(Operation::divide(-7, -2).unwrap(), 3);
        assert_eq!(Operation::divide(-6, 2).unwrap(), -3);
    }

    #[test]
    fn test_floor_modulo() {
        assert_eq!(Operation::modulo(7, 3).unwrap(), 1);
        assert_eq!(Operation::modulo(-7, 3).unwrap(), 2);
        assert_eq!(Operation::modulo(7, -3).unwrap(), -2);
        assert_eq!(Operation::modulo(-7, -3).unwrap(), -1);
    }

    #[test]
    fn test_zero_divisors() {
        assert_eq!(
            Operation::divide(1, 0).unwrap_err().code(),
            ErrorCode::DivisionByZero
        );
        assert_eq!(
            Operation::modulo(1, 0).unwrap_err().code(),
            ErrorCode::ModuloByZero
        );
    }

    #[test]
    fn test_extremes_do_not_panic() {
        assert_eq!(Operation::divide(i64::min_value(), -1).unwrap(), i64::min_value());
        assert_eq!(Operation::modulo(i64::min_value(), -1).unwrap(), 0);
        assert_eq!(Operation::negate(i64::min_value()), i64::min_value());
    }
}
