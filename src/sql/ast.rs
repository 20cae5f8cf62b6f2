//! Abstract Syntax Tree (AST) nodes for row-mutating statements.

use std::cmp::Ordering;
use std::fmt;

use crate::datum::Value;

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    /// `=`
    EqualTo,
    /// `<>`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,
}

impl CompOp {
    /// Returns true when `ordering` (left compared with right) satisfies
    /// the operator.
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            CompOp::EqualTo => ordering == Ordering::Equal,
            CompOp::NotEqual => ordering != Ordering::Equal,
            CompOp::LessThan => ordering == Ordering::Less,
            CompOp::LessEqual => ordering != Ordering::Greater,
            CompOp::GreaterThan => ordering == Ordering::Greater,
            CompOp::GreaterEqual => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompOp::EqualTo => "=",
            CompOp::NotEqual => "<>",
            CompOp::LessThan => "<",
            CompOp::LessEqual => "<=",
            CompOp::GreaterThan => ">",
            CompOp::GreaterEqual => ">=",
        };
        f.write_str(s)
    }
}

/// A possibly table-qualified attribute reference (`t.a` or `a`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelAttrSqlNode {
    /// Table qualifier; empty when unqualified.
    pub relation_name: String,
    pub attribute_name: String,
}

impl RelAttrSqlNode {
    pub fn new(attribute_name: impl Into<String>) -> Self {
        Self {
            relation_name: String::new(),
            attribute_name: attribute_name.into(),
        }
    }

    pub fn qualified(relation_name: impl Into<String>, attribute_name: impl Into<String>) -> Self {
        Self {
            relation_name: relation_name.into(),
            attribute_name: attribute_name.into(),
        }
    }
}

/// One side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionOperand {
    Attr(RelAttrSqlNode),
    Value(Value),
}

/// A single `left <op> right` condition of a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSqlNode {
    pub left: ConditionOperand,
    pub comp: CompOp,
    pub right: ConditionOperand,
}

impl ConditionSqlNode {
    /// Builds `attribute <op> value`, the most common shape.
    pub fn attr_value(attribute_name: &str, comp: CompOp, value: impl Into<Value>) -> Self {
        Self {
            left: ConditionOperand::Attr(RelAttrSqlNode::new(attribute_name)),
            comp,
            right: ConditionOperand::Value(value.into()),
        }
    }
}

/// `UPDATE relation SET attribute = value [WHERE conditions]`.
///
/// Conditions are combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSqlNode {
    pub relation_name: String,
    pub attribute_name: String,
    pub value: Value,
    pub conditions: Vec<ConditionSqlNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comp_op_matches() {
        use Ordering::*;
        let cases = [
            (CompOp::EqualTo, [false, true, false]),
            (CompOp::NotEqual, [true, false, true]),
            (CompOp::LessThan, [true, false, false]),
            (CompOp::LessEqual, [true, true, false]),
            (CompOp::GreaterThan, [false, false, true]),
            (CompOp::GreaterEqual, [false, true, true]),
        ];
        for (op, expected) in cases {
            let actual = [Less, Equal, Greater].map(|o| op.matches(o));
            assert_eq!(actual, expected, "{}", op);
        }
    }

    #[test]
    fn test_attr_value_condition() {
        let cond = ConditionSqlNode::attr_value("id", CompOp::EqualTo, 1);
        assert_eq!(
            cond.left,
            ConditionOperand::Attr(RelAttrSqlNode::new("id"))
        );
        assert_eq!(cond.right, ConditionOperand::Value(Value::Int(1)));
    }
}
