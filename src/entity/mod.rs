//! Entity query layer.
//!
//! Per-entity query builders on top of [`Select`]: an [`EntryQuery`] over
//! the entries table with dynamically joined per-field data tables, and a
//! [`FieldQuery`] over the field definitions table. Field-specific filter
//! and sort behavior hangs off the [`QueryAdapter`] seam; the textual
//! filter grammar (including date ranges) lowers into the condition
//! algebra.
//!
//! One query object serves one logical request: construct, chain, finalize,
//! discard.
//!
//! [`Select`]: crate::statement::Select

mod adapter;
mod date;
mod entry;
mod field;

pub use adapter::{DateAdapter, FieldAdapter, QueryAdapter};
pub use entry::EntryQuery;
pub use field::FieldQuery;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::condition::{and, eq, ne, or, Condition};
use crate::error::BuildError;
use crate::value::Value;

static NOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^not:\s*").expect("valid pattern"));

/// How multiple filter values of one call are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    #[default]
    Or,
    And,
}

impl Combine {
    pub(crate) fn group(self, children: Vec<Condition>) -> Condition {
        match self {
            Combine::Or => or(children),
            Combine::And => and(children),
        }
    }
}

impl std::str::FromStr for Combine {
    type Err = BuildError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "or" => Ok(Combine::Or),
            "and" => Ok(Combine::And),
            other => Err(BuildError::Condition(format!(
                "unknown filter combination `{other}`"
            ))),
        }
    }
}

/// Sort direction of the entity sort DSL. `Random` drops any column
/// reference and orders by `RAND()` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
    Random,
}

impl std::str::FromStr for Direction {
    type Err = BuildError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            "rand" | "random" => Ok(Direction::Random),
            other => Err(BuildError::Condition(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

/// Coerce a textual filter token: integer tokens bind as integers,
/// everything else as strings.
pub(crate) fn parse_scalar(token: &str) -> Value {
    match token.parse::<i64>() {
        Ok(n) => Value::Int(n),
        Err(_) => Value::String(token.to_string()),
    }
}

/// Lower a list of equality filter values against `column`. A `not:`
/// prefix on any value switches the whole call to inequalities joined by
/// AND; otherwise values combine per `combine`. Empty tokens are skipped.
/// Returns `None` when nothing survives.
pub(crate) fn build_equality_filter(
    column: &str,
    values: &[&str],
    combine: Combine,
) -> Option<Condition> {
    let not_mode = values.iter().any(|v| NOT_RE.is_match(v));
    let mut conditions = Vec::new();
    for raw in values {
        let token = NOT_RE.replace(raw, "");
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if not_mode {
            conditions.push(ne(column, parse_scalar(token)));
        } else {
            conditions.push(eq(column, parse_scalar(token)));
        }
    }
    if conditions.is_empty() {
        return None;
    }
    if not_mode {
        Some(and(conditions))
    } else {
        Some(combine.group(conditions))
    }
}
