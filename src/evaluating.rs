use crate::error_handling::*;
use crate::mode::Mode;
use crate::parsing::*;
use crate::variables::VariableStore;

use std::collections::HashMap;
use std::num::IntErrorKind;
use tracing::trace;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Arithmetic a postfix expression is run under.
trait Domain {
    type Number: Copy;

    const MODE: Mode;

    fn literal(content: &str) -> Result<Self::Number>;
    /// Converts the value of the variable `name` into this domain.
    fn from_value(value: f64, name: &str) -> Result<Self::Number>;
    fn unary(operator: UnaryOperator, value: Self::Number) -> Result<Self::Number>;
    fn binary(operator: BinaryOperator, left: Self::Number, right: Self::Number) -> Result<Self::Number>;
    fn into_value(number: Self::Number) -> Result<f64>;

    fn unsupported(symbol: &str) -> CalcError {
        CalcError::unsupported_operator(symbol.into(), Self::MODE.name())
    }
}

/// Real arithmetic for mathematics mode.
struct Real;

impl Domain for Real {
    type Number = f64;

    const MODE: Mode = Mode::mathematics;

    fn literal(content: &str) -> Result<f64> {
        content.parse().map_err(|_| CalcError::invalid_number(content.into()))
    }

    fn from_value(value: f64, _name: &str) -> Result<f64> {
        Ok(value)
    }

    fn unary(operator: UnaryOperator, value: f64) -> Result<f64> {
        use UnaryOperator::*;
        match operator {
            negative => Ok(-value),
            positive => Ok(value),
            complement => Err(Self::unsupported(operator.symbol())),
        }
    }

    fn binary(operator: BinaryOperator, left: f64, right: f64) -> Result<f64> {
        use BinaryOperator::*;
        match operator {
            addition => Ok(left + right),
            subtraction => Ok(left - right),
            multiplication => Ok(left * right),
            division if right == 0.0 => Err(CalcError::division_by_zero),
            division => Ok(left / right),
            exponentiation => Ok(left.powf(right)),
            _ => Err(Self::unsupported(operator.symbol())),
        }
    }

    fn into_value(number: f64) -> Result<f64> {
        if number.is_finite() {
            Ok(number)
        } else {
            Err(CalcError::overflow(number.to_string()))
        }
    }
}

/// Two's-complement 64-bit arithmetic for programming mode.
struct Integer;

/// 2^63, the first magnitude past the top of `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Truncates `value` toward zero if the result fits in an `i64`.
pub fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= -I64_LIMIT && truncated < I64_LIMIT {
        Some(truncated as i64)
    } else {
        None
    }
}

fn parse_bit_pattern(content: &str, digits: &str, radix: u32) -> Result<i64> {
    match u64::from_str_radix(digits, radix) {
        Ok(pattern) => Ok(pattern as i64),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(CalcError::overflow(content.into())),
        Err(_) => Err(CalcError::invalid_number(content.into())),
    }
}

impl Integer {
    fn checked(
        operator: BinaryOperator,
        left: i64,
        right: i64,
        operation: fn(i64, i64) -> Option<i64>,
    ) -> Result<i64> {
        operation(left, right)
            .ok_or_else(|| CalcError::overflow(format!("{left} {} {right}", operator.symbol())))
    }

    fn shift_amount(operator: BinaryOperator, left: i64, right: i64) -> Result<u32> {
        u32::try_from(right)
            .ok()
            .filter(|amount| *amount < i64::BITS)
            .ok_or_else(|| CalcError::overflow(format!("{left} {} {right}", operator.symbol())))
    }
}

impl Domain for Integer {
    type Number = i64;

    const MODE: Mode = Mode::programming;

    fn literal(content: &str) -> Result<i64> {
        let lowered = content.to_ascii_lowercase();
        if let Some(digits) = lowered.strip_prefix("0x") {
            parse_bit_pattern(content, digits, 16)
        } else if let Some(digits) = lowered.strip_prefix("0b") {
            parse_bit_pattern(content, digits, 2)
        } else if content.contains('.') {
            let value = Real::literal(content)?;
            Self::from_value(value, content)
        } else {
            content.parse::<i64>().map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow => CalcError::overflow(content.into()),
                _ => CalcError::invalid_number(content.into()),
            })
        }
    }

    fn from_value(value: f64, name: &str) -> Result<i64> {
        truncate_to_i64(value).ok_or_else(|| CalcError::overflow(name.into()))
    }

    fn unary(operator: UnaryOperator, value: i64) -> Result<i64> {
        use UnaryOperator::*;
        match operator {
            negative => value.checked_neg().ok_or_else(|| CalcError::overflow(format!("-{value}"))),
            positive => Ok(value),
            complement => Ok(!value),
        }
    }

    fn binary(operator: BinaryOperator, left: i64, right: i64) -> Result<i64> {
        use BinaryOperator::*;
        match operator {
            addition => Self::checked(operator, left, right, i64::checked_add),
            subtraction => Self::checked(operator, left, right, i64::checked_sub),
            multiplication => Self::checked(operator, left, right, i64::checked_mul),
            division | remainder if right == 0 => Err(CalcError::division_by_zero),
            division => Self::checked(operator, left, right, i64::checked_div),
            remainder => Self::checked(operator, left, right, i64::checked_rem),
            and => Ok(left & right),
            or => Ok(left | right),
            xor => Ok(left ^ right),
            shift_left => Ok(left << Self::shift_amount(operator, left, right)?),
            shift_right => Ok(left >> Self::shift_amount(operator, left, right)?),
            exponentiation => Err(Self::unsupported(operator.symbol())),
        }
    }

    fn into_value(number: i64) -> Result<f64> {
        Ok(number as f64)
    }
}

/// Evaluates expressions against a variable store.
///
/// A variable's expression is evaluated under the mode it was stored with,
/// which need not be the mode of the expression referring to it. Each
/// variable is evaluated at most once per top-level evaluation.
pub struct Evaluator<'a> {
    store: &'a VariableStore,
    max_depth: usize,
    resolving: Vec<String>,
    resolved: HashMap<String, f64>,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a VariableStore) -> Self {
        Self::with_max_depth(store, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(store: &'a VariableStore, max_depth: usize) -> Self {
        Self{store, max_depth, resolving: Vec::new(), resolved: HashMap::new()}
    }

    pub fn evaluate(&mut self, input: &str, mode: Mode) -> Result<f64> {
        if self.resolving.is_empty() {
            // the store may have changed since the previous pass
            self.resolved.clear();
        }
        let expression = parse_str(input, mode, self.max_depth)?;
        trace!(input, %mode, ?expression, "parsed");
        match mode {
            Mode::mathematics => self.run::<Real>(&expression),
            Mode::programming => self.run::<Integer>(&expression),
        }
    }

    fn run<D: Domain>(&mut self, expression: &[ExprNode]) -> Result<f64> {
        let mut slots = Vec::<D::Number>::new();
        for node in expression {
            match node {
                ExprNode::number(content) => slots.push(D::literal(content)?),

                ExprNode::variable(name) => {
                    let value = self.resolve(name)?;
                    slots.push(D::from_value(value, name)?);
                },

                ExprNode::operator(Operator::unary(operator)) => {
                    let value = slots.pop().ok_or(CalcError::abrupt_end)?;
                    slots.push(D::unary(*operator, value)?);
                },

                ExprNode::operator(Operator::binary(operator)) => {
                    let right = slots.pop().ok_or(CalcError::abrupt_end)?;
                    let left = slots.pop().ok_or(CalcError::abrupt_end)?;
                    slots.push(D::binary(*operator, left, right)?);
                },
            }
        }

        match slots.as_slice() {
            [result] => D::into_value(*result),
            [] => Err(CalcError::abrupt_end),
            _ => Err(CalcError::did_not_expect(format!("{} values", slots.len()))),
        }
    }

    fn resolve(&mut self, name: &str) -> Result<f64> {
        if let Some(value) = self.resolved.get(name) {
            return Ok(*value);
        }
        if self.resolving.iter().any(|pending| pending == name) {
            return Err(CalcError::cyclic_reference(name.into()));
        }
        if self.resolving.len() >= self.max_depth {
            return Err(CalcError::too_complex(self.max_depth));
        }
        let variable = self
            .store
            .resolve(name)
            .ok_or_else(|| CalcError::undefined(name.into()))?;

        self.resolving.push(variable.name.clone());
        let result = self.evaluate(&variable.expression, variable.mode);
        self.resolving.pop();
        trace!(name, ?result, "resolved variable");
        let value = result?;
        self.resolved.insert(name.into(), value);
        Ok(value)
    }
}

/// Evaluates `input` under `mode`, resolving identifiers through `store`.
pub fn evaluate(input: &str, mode: Mode, store: &VariableStore) -> Result<f64> {
    Evaluator::new(store).evaluate(input, mode)
}
