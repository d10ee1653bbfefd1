//! Date filter expression parsing.
//!
//! Lowers the free-text date filter grammar into condition trees:
//!
//! - `2018-03-28` - inclusive range over that day
//! - `2018-03` / `2018/03` - inclusive range over that month
//! - `2018` - inclusive range over that year
//! - `earlier than X` / `later than X` - strict comparison against the
//!   natural start/end bound of X
//! - `equal to or earlier than X` / `equal to or later than X` - inclusive
//!   comparison
//! - `X to Y` / `from X to Y` - inclusive range from the start of X to the
//!   end of Y
//! - `not: X` - inequality against the raw token; when any value of a
//!   filter call carries the prefix, every value lowers to `!=` and the
//!   results are joined by AND
//!
//! Phrases are case-insensitive. Day bounds are `00:00:00`-`23:59:59`,
//! month bounds the first/last calendar day, year bounds Jan 1-Dec 31.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::condition::{and, cmp, gte, lte, Condition, Op, Operand};
use crate::entity::parse_scalar;
use crate::error::{BuildError, BuildResult};
use crate::value::Value;

static NOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^not:\s*").expect("valid pattern"));
static EQ_EARLIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^equal to or earlier than\s+(.+)$").expect("valid pattern"));
static EQ_LATER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^equal to or later than\s+(.+)$").expect("valid pattern"));
static EARLIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^earlier than\s+(.+)$").expect("valid pattern"));
static LATER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^later than\s+(.+)$").expect("valid pattern"));
static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:from\s+)?(.+?)\s+to\s+(.+)$").expect("valid pattern"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").expect("valid pattern"));
static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").expect("valid pattern"));

const BOUND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Start/end bounds of a calendar period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PeriodBounds {
    pub(crate) start: NaiveDateTime,
    pub(crate) end: NaiveDateTime,
}

impl PeriodBounds {
    fn day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::seconds(86_399),
        }
    }

    fn span(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start: start_date.and_time(NaiveTime::MIN),
            end: end_date.and_time(NaiveTime::MIN) + Duration::seconds(86_399),
        }
    }

    pub(crate) fn start_bound(&self) -> String {
        self.start.format(BOUND_FORMAT).to_string()
    }

    pub(crate) fn end_bound(&self) -> String {
        self.end.format(BOUND_FORMAT).to_string()
    }
}

/// Parse a single date token (`2018-03-28`, `2018-03`, `2018/03`, `2018`)
/// into its period bounds.
pub(crate) fn parse_period(token: &str) -> Option<PeriodBounds> {
    let token = token.trim().replace('/', "-");
    if let Ok(date) = NaiveDate::parse_from_str(&token, "%Y-%m-%d") {
        return Some(PeriodBounds::day(date));
    }
    if let Some(caps) = YEAR_MONTH_RE.captures(&token) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = last_day_of_month(year, month)?;
        return Some(PeriodBounds::span(first, last));
    }
    if let Some(caps) = YEAR_RE.captures(&token) {
        let year: i32 = caps[1].parse().ok()?;
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
        return Some(PeriodBounds::span(first, last));
    }
    None
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next_first - Duration::days(1))
}

/// A parsed date filter expression, prior to condition lowering.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DateExpr {
    /// Inclusive start/end range.
    Range { start: String, end: String },
    /// Single comparison against one bound.
    Cmp { op: Op, bound: String },
}

/// Parse one non-`not:` date filter value. Unparsable tokens are a
/// condition error, never a silent string equality.
pub(crate) fn parse_date_expression(input: &str) -> BuildResult<DateExpr> {
    let input = input.trim();
    let parse = |token: &str| {
        parse_period(token).ok_or_else(|| {
            BuildError::Condition(format!("`{token}` is not a valid date filter value"))
        })
    };
    if let Some(caps) = EQ_EARLIER_RE.captures(input) {
        let bounds = parse(&caps[1])?;
        return Ok(DateExpr::Cmp {
            op: Op::Lte,
            bound: bounds.end_bound(),
        });
    }
    if let Some(caps) = EQ_LATER_RE.captures(input) {
        let bounds = parse(&caps[1])?;
        return Ok(DateExpr::Cmp {
            op: Op::Gte,
            bound: bounds.start_bound(),
        });
    }
    if let Some(caps) = EARLIER_RE.captures(input) {
        let bounds = parse(&caps[1])?;
        return Ok(DateExpr::Cmp {
            op: Op::Lt,
            bound: bounds.start_bound(),
        });
    }
    if let Some(caps) = LATER_RE.captures(input) {
        let bounds = parse(&caps[1])?;
        return Ok(DateExpr::Cmp {
            op: Op::Gt,
            bound: bounds.end_bound(),
        });
    }
    if let Some(caps) = RANGE_RE.captures(input) {
        let from = parse(&caps[1])?;
        let to = parse(&caps[2])?;
        return Ok(DateExpr::Range {
            start: from.start_bound(),
            end: to.end_bound(),
        });
    }
    let bounds = parse(input)?;
    Ok(DateExpr::Range {
        start: bounds.start_bound(),
        end: bounds.end_bound(),
    })
}

impl DateExpr {
    /// Lower to a condition on `column`.
    pub(crate) fn into_condition(self, column: &str) -> Condition {
        match self {
            DateExpr::Range { start, end } => and([gte(column, start), lte(column, end)]),
            DateExpr::Cmp { op, bound } => {
                cmp(column, op, Operand::Value(Value::String(bound)))
            }
        }
    }
}

/// Conditions lowered from one date filter call.
#[derive(Debug)]
pub(crate) struct DateFilterSet {
    /// When set, `conditions` are inequalities that must be joined by AND.
    pub(crate) not_mode: bool,
    pub(crate) conditions: Vec<Condition>,
}

/// Lower a list of date filter values against `column`. The presence of a
/// single `not:` prefix switches the whole call to inequality mode; empty
/// tokens are skipped there.
pub(crate) fn build_date_conditions(column: &str, values: &[&str]) -> BuildResult<DateFilterSet> {
    let not_mode = values.iter().any(|v| NOT_RE.is_match(v));
    let mut conditions = Vec::new();
    if not_mode {
        for raw in values {
            let token = NOT_RE.replace(raw, "");
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            conditions.push(crate::condition::ne(column, parse_scalar(token)));
        }
    } else {
        for raw in values {
            conditions.push(parse_date_expression(raw)?.into_condition(column));
        }
    }
    Ok(DateFilterSet {
        not_mode,
        conditions,
    })
}
