//! Identifier and value normalization.
//!
//! Quoting rules follow the MySQL family: identifiers are wrapped in
//! backticks, string literals in single quotes with `''` escaping. Table
//! names beginning with the logical [`TABLE_SENTINEL`] are rewritten to the
//! configured physical prefix before quoting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Config, TABLE_SENTINEL};
use crate::error::{BuildError, BuildResult};
use crate::value::Value;

/// Pattern recognizing a function-call string: an identifier followed by a
/// parenthesized argument list. Matching strings are inlined, never bound.
static FCT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\((.*)\)$").expect("valid pattern"));

/// Whether `input` looks like a function call (`COUNT(*)`, `SUM(total)`).
pub fn is_function_call(input: &str) -> bool {
    FCT_PATTERN.is_match(input)
}

/// Quote an identifier, splitting on `.` so each segment is quoted
/// independently: `a.b` becomes `` `a`.`b` ``. A `*` segment and function
/// calls pass through unquoted; function arguments are quoted recursively,
/// so `SUM(e.total)` becomes ``SUM(`e`.`total`)``.
pub fn ticked(identifier: &str) -> String {
    let identifier = identifier.trim();
    if identifier == "*" {
        return "*".to_string();
    }
    if let Some(caps) = FCT_PATTERN.captures(identifier) {
        let name_end = identifier.find('(').expect("matched pattern has paren");
        let name = &identifier[..name_end];
        let args = caps.get(1).map_or("", |m| m.as_str());
        if args.is_empty() {
            return format!("{name}()");
        }
        let quoted: Vec<String> = args.split(',').map(|arg| ticked(arg.trim())).collect();
        return format!("{}({})", name, quoted.join(", "));
    }
    identifier
        .split('.')
        .map(|segment| format!("`{segment}`"))
        .collect::<Vec<_>>()
        .join(".")
}

/// Substitute the physical table prefix for the logical `tbl_` sentinel.
/// Names not starting with the sentinel pass through unchanged.
pub fn replace_prefix(name: &str, config: &Config) -> String {
    match name.strip_prefix(TABLE_SENTINEL) {
        Some(rest) => format!("{}{}", config.table_prefix, rest),
        None => name.to_string(),
    }
}

/// Derive the named-parameter key for a column path: quoting is stripped
/// and `.` separators become `_`, so `f1.date` binds as `f1_date`.
pub(crate) fn param_key(column: &str) -> String {
    column.replace('`', "").replace('.', "_")
}

/// Render a value as an inline SQL literal. Only used for DDL defaults and
/// enum value lists; everything reachable from a condition is bound instead.
pub(crate) fn quote_value(value: &Value) -> BuildResult<String> {
    match value {
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(f) => {
            if f.is_nan() || f.is_infinite() {
                return Err(BuildError::ValueType(format!(
                    "cannot inline non-finite float `{f}`"
                )));
            }
            let mut buffer = ryu::Buffer::new();
            Ok(buffer.format(*f).to_string())
        }
        Value::String(s) => Ok(format!("'{}'", s.replace('\'', "''"))),
        Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        Value::Null => Ok("NULL".to_string()),
    }
}
