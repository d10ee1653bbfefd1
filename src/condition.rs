//! Condition trees - the declarative filter algebra.
//!
//! A [`Condition`] describes a boolean filter expression prior to SQL
//! rendering. Trees are built from plain constructors and nested freely;
//! the statement core walks them recursively, binding every literal leaf
//! as exactly one parameter. Raw-column references and function calls are
//! inlined and never bound.
//!
//! ```ignore
//! use ashlar::condition::{and, between, eq, lt, or};
//!
//! // ((`x` = :x AND `y` = :y) OR `x` < :x2 OR (`x` BETWEEN ? AND ?))
//! let cond = or([
//!     and([eq("x", 1), eq("y", 2)]),
//!     lt("x", 2),
//!     between("x", 10, 12),
//! ]);
//! ```
//!
//! String operands are classified by shape: a `$` prefix marks a reference
//! to another column (`eq("x", "$id")` renders `` `x` = `id` ``), and a
//! function-call string is passed through unquoted
//! (`lte("x", "SUM(total)")` renders `` `x` <= SUM(`total`) ``). Any other
//! scalar is parameter-bound.

use crate::normalize::is_function_call;
use crate::statement::Select;
use crate::value::Value;

/// Comparison operators, in the engine's fixed priority order.
///
/// The operator is part of the variant, so a comparison can only ever carry
/// one of them; there is no runtime operator-key scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Lt,
    Gt,
    Eq,
    Lte,
    Gte,
    Ne,
    Like,
    Regexp,
}

impl Op {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Eq => "=",
            Op::Lte => "<=",
            Op::Gte => ">=",
            Op::Ne => "!=",
            Op::Like => "LIKE",
            Op::Regexp => "REGEXP",
        }
    }
}

/// Right-hand side of a comparison.
#[derive(Debug)]
pub enum Operand {
    /// A scalar bound as a parameter.
    Value(Value),
    /// A reference to another column, quoted but never bound.
    Column(String),
    /// A function-call string inlined verbatim (arguments are quoted).
    Function(String),
    /// An embedded sub-query, inlined in parentheses with its parameters
    /// merged into the parent statement.
    SubQuery(Box<Select>),
}

impl Operand {
    /// Classify a scalar: `$name` strings become column references,
    /// function-call strings are inlined, everything else is bound.
    pub fn classify(value: Value) -> Operand {
        if let Value::String(s) = &value {
            if let Some(rest) = s.strip_prefix('$') {
                return Operand::Column(rest.to_string());
            }
            if is_function_call(s) {
                return Operand::Function(s.clone());
            }
        }
        Operand::Value(value)
    }
}

/// Source of an `IN` test.
#[derive(Debug)]
pub enum InSource {
    Values(Vec<Value>),
    SubQuery(Box<Select>),
}

/// A node in a condition tree.
#[derive(Debug)]
pub enum Condition {
    /// Children joined by ` AND `, the group wrapped in one paren pair.
    And(Vec<Condition>),
    /// Children joined by ` OR `, the group wrapped in one paren pair.
    Or(Vec<Condition>),
    /// Independent conditions joined by `, `, unparenthesized. Used to
    /// flatten several unrelated conditions at one nesting level.
    List(Vec<Condition>),
    /// `column OP operand`, with NULL operands rewriting `=` to `IS` and
    /// `!=` to `IS NOT`.
    Compare {
        column: String,
        op: Op,
        operand: Operand,
    },
    /// `column IN (...)` / `column NOT IN (...)` against a literal list or
    /// a sub-query. Empty literal lists are a build error.
    In {
        column: String,
        source: InSource,
        negated: bool,
    },
    /// `(column BETWEEN ? AND ?)`.
    Between {
        column: String,
        low: Value,
        high: Value,
    },
}

fn compare(column: impl Into<String>, op: Op, value: impl Into<Value>) -> Condition {
    Condition::Compare {
        column: column.into(),
        op,
        operand: Operand::classify(value.into()),
    }
}

/// `column = value`
pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, Op::Eq, value)
}

/// `column != value`
pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, Op::Ne, value)
}

/// `column < value`
pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, Op::Lt, value)
}

/// `column > value`
pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, Op::Gt, value)
}

/// `column <= value`
pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, Op::Lte, value)
}

/// `column >= value`
pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, Op::Gte, value)
}

/// `column LIKE pattern`
pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Condition {
    compare(column, Op::Like, pattern)
}

/// `column REGEXP pattern`
pub fn regexp(column: impl Into<String>, pattern: impl Into<Value>) -> Condition {
    compare(column, Op::Regexp, pattern)
}

/// Fully explicit comparison, bypassing operand classification.
pub fn cmp(column: impl Into<String>, op: Op, operand: Operand) -> Condition {
    Condition::Compare {
        column: column.into(),
        op,
        operand,
    }
}

/// `column OP (SELECT ...)`
pub fn cmp_select(column: impl Into<String>, op: Op, select: Select) -> Condition {
    Condition::Compare {
        column: column.into(),
        op,
        operand: Operand::SubQuery(Box::new(select)),
    }
}

/// `(c1 AND c2 ...)`
pub fn and(children: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::And(children.into_iter().collect())
}

/// `(c1 OR c2 ...)`
pub fn or(children: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::Or(children.into_iter().collect())
}

/// `c1, c2, ...` - unparenthesized independent conditions.
pub fn list(children: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::List(children.into_iter().collect())
}

/// `column IN (v1, v2, ...)`
pub fn in_values(
    column: impl Into<String>,
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Condition {
    Condition::In {
        column: column.into(),
        source: InSource::Values(values.into_iter().map(Into::into).collect()),
        negated: false,
    }
}

/// `column NOT IN (v1, v2, ...)`
pub fn not_in_values(
    column: impl Into<String>,
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Condition {
    Condition::In {
        column: column.into(),
        source: InSource::Values(values.into_iter().map(Into::into).collect()),
        negated: true,
    }
}

/// `column IN (SELECT ...)`
pub fn in_select(column: impl Into<String>, select: Select) -> Condition {
    Condition::In {
        column: column.into(),
        source: InSource::SubQuery(Box::new(select)),
        negated: false,
    }
}

/// `column NOT IN (SELECT ...)`
pub fn not_in_select(column: impl Into<String>, select: Select) -> Condition {
    Condition::In {
        column: column.into(),
        source: InSource::SubQuery(Box::new(select)),
        negated: true,
    }
}

/// `(column BETWEEN low AND high)`
pub fn between(
    column: impl Into<String>,
    low: impl Into<Value>,
    high: impl Into<Value>,
) -> Condition {
    Condition::Between {
        column: column.into(),
        low: low.into(),
        high: high.into(),
    }
}
