//! Operators on runtime values.
//!
//! Every binary operator dispatches on the left operand's type and coerces
//! the right operand to it, so `1 + 2.5` is `3` while `2.5 + 1` is `3.5`.
//! The one exception is `+` with a string on either side, which
//! concatenates.

use std::cmp::Ordering;

use crate::{ast::expressions::BinaryOperator, errors::errors::ErrorImpl};

use super::object::Object;

fn invalid(operation: &str, operand: &Object) -> ErrorImpl {
    ErrorImpl::InvalidOperation {
        operation: operation.to_string(),
        operand: operand.type_name().to_string(),
    }
}

fn wrapping_pow(mut base: i64, mut exponent: u64) -> i64 {
    let mut result: i64 = 1;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }
    result
}

/// Integer power. A negative exponent is the truncated reciprocal of the
/// positive power, so only bases 1 and -1 give a non-zero result.
fn integer_pow(base: i64, exponent: i64) -> Result<i64, ErrorImpl> {
    if exponent >= 0 {
        return Ok(wrapping_pow(base, exponent as u64));
    }

    match base {
        0 => Err(ErrorImpl::DivisionByZero),
        1 => Ok(1),
        -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => Ok(0),
    }
}

fn integer_div(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    if right == 0 {
        return Err(ErrorImpl::DivisionByZero);
    }
    Ok(left.wrapping_div(right))
}

fn integer_rem(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    if right == 0 {
        return Err(ErrorImpl::DivisionByZero);
    }
    Ok(left.wrapping_rem(right))
}

impl Object {
    /// Applies `operator` with `self` on the left.
    pub fn binary(&self, operator: BinaryOperator, right: &Object) -> Result<Object, ErrorImpl> {
        match operator {
            BinaryOperator::Add => self.add(right),
            BinaryOperator::Subtract => self.subtract(right),
            BinaryOperator::Multiply => self.multiply(right),
            BinaryOperator::Divide => self.divide(right),
            BinaryOperator::Modulus => self.modulus(right),
            BinaryOperator::Power => self.power(right),
            BinaryOperator::Equals => self.equals(right),
            BinaryOperator::NotEquals => self.not_equals(right),
            BinaryOperator::Greater => self.greater(right),
            BinaryOperator::Less => self.less(right),
            BinaryOperator::GreaterEquals => self.greater_equals(right),
            BinaryOperator::LessEquals => self.less_equals(right),
            BinaryOperator::And => self.and(right),
            BinaryOperator::Or => self.or(right),
        }
    }

    /// Right operand of an arithmetic operator as an integer.
    /// Strings and Null are never coerced here.
    fn arithmetic_integer(&self, operation: &str) -> Result<i64, ErrorImpl> {
        match self {
            Object::String(_) | Object::Null => Err(invalid(operation, self)),
            other => other.cast_integer(),
        }
    }

    fn arithmetic_double(&self, operation: &str) -> Result<f64, ErrorImpl> {
        match self {
            Object::String(_) | Object::Null => Err(invalid(operation, self)),
            other => other.cast_double(),
        }
    }

    /// Shared dispatch of the numeric operators. Booleans compute on 0/1 and
    /// stay Boolean.
    fn arithmetic(
        &self,
        right: &Object,
        operation: &str,
        integer_op: fn(i64, i64) -> Result<i64, ErrorImpl>,
        double_op: fn(f64, f64) -> f64,
    ) -> Result<Object, ErrorImpl> {
        match self {
            Object::Integer(left) => Ok(Object::Integer(integer_op(
                *left,
                right.arithmetic_integer(operation)?,
            )?)),
            Object::Double(left) => Ok(Object::Double(double_op(
                *left,
                right.arithmetic_double(operation)?,
            ))),
            Object::Boolean(left) => Ok(Object::Boolean(
                integer_op(*left as i64, right.arithmetic_integer(operation)?)? != 0,
            )),
            Object::String(_) | Object::Null => Err(invalid(operation, self)),
        }
    }

    pub fn add(&self, right: &Object) -> Result<Object, ErrorImpl> {
        if *self == Object::Null || *right == Object::Null {
            let operand = if *self == Object::Null { self } else { right };
            return Err(invalid("+", operand));
        }

        if matches!(self, Object::String(_)) || matches!(right, Object::String(_)) {
            return Ok(Object::String(self.cast_string() + &right.cast_string()));
        }

        self.arithmetic(right, "+", |a, b| Ok(a.wrapping_add(b)), |a, b| a + b)
    }

    pub fn subtract(&self, right: &Object) -> Result<Object, ErrorImpl> {
        self.arithmetic(right, "-", |a, b| Ok(a.wrapping_sub(b)), |a, b| a - b)
    }

    pub fn multiply(&self, right: &Object) -> Result<Object, ErrorImpl> {
        self.arithmetic(right, "*", |a, b| Ok(a.wrapping_mul(b)), |a, b| a * b)
    }

    pub fn divide(&self, right: &Object) -> Result<Object, ErrorImpl> {
        self.arithmetic(right, "/", integer_div, |a, b| a / b)
    }

    /// Defined for Integer and Boolean operands only.
    pub fn modulus(&self, right: &Object) -> Result<Object, ErrorImpl> {
        match right {
            Object::Double(_) | Object::String(_) | Object::Null => return Err(invalid("%", right)),
            _ => {}
        }

        match self {
            Object::Integer(left) => Ok(Object::Integer(integer_rem(*left, right.cast_integer()?)?)),
            Object::Boolean(left) => Ok(Object::Boolean(
                integer_rem(*left as i64, right.cast_integer()?)? != 0,
            )),
            _ => Err(invalid("%", self)),
        }
    }

    /// The exponent must be an Integer.
    pub fn power(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let exponent = match right {
            Object::Integer(exponent) => *exponent,
            _ => return Err(invalid("^", right)),
        };

        match self {
            Object::Integer(base) => Ok(Object::Integer(integer_pow(*base, exponent)?)),
            Object::Double(base) => Ok(Object::Double(base.powf(exponent as f64))),
            Object::Boolean(base) => Ok(Object::Boolean(integer_pow(*base as i64, exponent)? != 0)),
            Object::String(_) | Object::Null => Err(invalid("^", self)),
        }
    }

    pub fn negate(&self) -> Result<Object, ErrorImpl> {
        match self {
            Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
            Object::Double(value) => Ok(Object::Double(-value)),
            // -1 and 0 keep their truthiness
            Object::Boolean(value) => Ok(Object::Boolean(*value)),
            Object::String(_) | Object::Null => Err(invalid("-", self)),
        }
    }

    /// Orders `self` against `right` coerced to the type of `self`.
    /// `None` only for NaN doubles.
    fn compare(&self, right: &Object, operation: &str) -> Result<Option<Ordering>, ErrorImpl> {
        match self {
            Object::Integer(left) => Ok(Some(left.cmp(&right.cast_integer()?))),
            Object::Double(left) => Ok(left.partial_cmp(&right.cast_double()?)),
            Object::Boolean(left) => Ok(Some(left.cmp(&right.cast_boolean()?))),
            Object::String(left) => Ok(Some(left.as_str().cmp(right.cast_string().as_str()))),
            Object::Null => Err(invalid(operation, self)),
        }
    }

    pub fn equals(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let ordering = self.compare(right, "==")?;
        Ok(Object::Boolean(ordering == Some(Ordering::Equal)))
    }

    pub fn not_equals(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let ordering = self.compare(right, "!=")?;
        Ok(Object::Boolean(ordering != Some(Ordering::Equal)))
    }

    pub fn greater(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let ordering = self.compare(right, ">")?;
        Ok(Object::Boolean(ordering == Some(Ordering::Greater)))
    }

    pub fn less(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let ordering = self.compare(right, "<")?;
        Ok(Object::Boolean(ordering == Some(Ordering::Less)))
    }

    pub fn greater_equals(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let ordering = self.compare(right, ">=")?;
        Ok(Object::Boolean(matches!(
            ordering,
            Some(Ordering::Greater | Ordering::Equal)
        )))
    }

    pub fn less_equals(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let ordering = self.compare(right, "<=")?;
        Ok(Object::Boolean(matches!(
            ordering,
            Some(Ordering::Less | Ordering::Equal)
        )))
    }

    pub fn and(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let left = self.cast_boolean()?;
        let right = right.cast_boolean()?;
        Ok(Object::Boolean(left && right))
    }

    pub fn or(&self, right: &Object) -> Result<Object, ErrorImpl> {
        let left = self.cast_boolean()?;
        let right = right.cast_boolean()?;
        Ok(Object::Boolean(left || right))
    }
}
