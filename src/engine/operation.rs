//! Operator buttons: kind + magnitude, parsed from `+3` / `-4` / `*2` / `/1.5`.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseOperationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OpKind {
    pub fn symbol(self) -> char {
        match self {
            OpKind::Add => '+',
            OpKind::Subtract => '-',
            OpKind::Multiply => '*',
            OpKind::Divide => '/',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(OpKind::Add),
            '-' => Some(OpKind::Subtract),
            '*' => Some(OpKind::Multiply),
            '/' => Some(OpKind::Divide),
            _ => None,
        }
    }
}

/// A single signed arithmetic transform applied to the running total.
///
/// Serialized in its textual form so level files read like the buttons.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Operation {
    kind: OpKind,
    magnitude: f64,
}

impl Operation {
    /// Builds an operation, rejecting negative or non-finite magnitudes.
    pub fn new(kind: OpKind, magnitude: f64) -> Result<Self, ParseOperationError> {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(ParseOperationError::OutOfRange(magnitude));
        }
        Ok(Self { kind, magnitude })
    }

    // Infallible constructors for built-in levels; callers pass literal magnitudes.
    pub(crate) const fn add(magnitude: f64) -> Self {
        Self { kind: OpKind::Add, magnitude }
    }

    pub(crate) const fn sub(magnitude: f64) -> Self {
        Self { kind: OpKind::Subtract, magnitude }
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn apply(&self, value: f64) -> f64 {
        match self.kind {
            OpKind::Add => value + self.magnitude,
            OpKind::Subtract => value - self.magnitude,
            OpKind::Multiply => value * self.magnitude,
            OpKind::Divide => value / self.magnitude,
        }
    }

    /// Signed change per press for additive operations; `None` for `*` and `/`.
    pub fn delta(&self) -> Option<f64> {
        match self.kind {
            OpKind::Add => Some(self.magnitude),
            OpKind::Subtract => Some(-self.magnitude),
            OpKind::Multiply | OpKind::Divide => None,
        }
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let first = chars.next().ok_or(ParseOperationError::Empty)?;
        let kind = OpKind::from_symbol(first).ok_or(ParseOperationError::UnknownOperator(first))?;
        let numeral = chars.as_str();
        // A second sign would make "+-3" parse as a negative magnitude.
        if numeral.starts_with(['+', '-']) {
            return Err(ParseOperationError::InvalidMagnitude(numeral.to_string()));
        }
        let magnitude: f64 = numeral
            .parse()
            .map_err(|_| ParseOperationError::InvalidMagnitude(numeral.to_string()))?;
        Operation::new(kind, magnitude)
    }
}

impl TryFrom<String> for Operation {
    type Error = ParseOperationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display already prints 3.0 as "3" and 3.9 as "3.9".
        write!(f, "{}{}", self.kind.symbol(), self.magnitude)
    }
}

/// Parses a list of textual operations, stopping at the first malformed one.
pub fn parse_operations<S: AsRef<str>>(ops: &[S]) -> Result<Vec<Operation>, ParseOperationError> {
    ops.iter().map(|s| s.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_kinds() {
        let ops = parse_operations(&["+3", "-4", "*2", "/1.5"]).unwrap();
        assert_eq!(ops[0].kind(), OpKind::Add);
        assert_eq!(ops[1].kind(), OpKind::Subtract);
        assert_eq!(ops[2].kind(), OpKind::Multiply);
        assert_eq!(ops[3].kind(), OpKind::Divide);
        assert_eq!(ops[3].magnitude(), 1.5);
    }

    #[test]
    fn test_display_matches_button_label() {
        for label in ["+3", "-4", "+3.9", "*2", "/0.5"] {
            let op: Operation = label.parse().unwrap();
            assert_eq!(op.to_string(), label);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!("".parse::<Operation>(), Err(ParseOperationError::Empty));
        assert_eq!(
            "%3".parse::<Operation>(),
            Err(ParseOperationError::UnknownOperator('%'))
        );
        assert!(matches!(
            "+abc".parse::<Operation>(),
            Err(ParseOperationError::InvalidMagnitude(_))
        ));
        assert!(matches!(
            "+-3".parse::<Operation>(),
            Err(ParseOperationError::InvalidMagnitude(_))
        ));
        assert!(matches!(
            "+inf".parse::<Operation>(),
            Err(ParseOperationError::OutOfRange(_))
        ));
        assert!(matches!(
            "+".parse::<Operation>(),
            Err(ParseOperationError::InvalidMagnitude(_))
        ));
    }

    #[test]
    fn test_apply_and_delta() {
        let add: Operation = "+3".parse().unwrap();
        let sub: Operation = "-4".parse().unwrap();
        let mul: Operation = "*2".parse().unwrap();
        let div: Operation = "/4".parse().unwrap();
        assert_eq!(add.apply(1.0), 4.0);
        assert_eq!(sub.apply(1.0), -3.0);
        assert_eq!(mul.apply(3.0), 6.0);
        assert_eq!(div.apply(2.0), 0.5);
        assert_eq!(add.delta(), Some(3.0));
        assert_eq!(sub.delta(), Some(-4.0));
        assert_eq!(mul.delta(), None);
        assert_eq!(div.delta(), None);
    }
}
