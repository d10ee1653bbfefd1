//! Statement core - the ordered-parts protocol shared by every statement kind.
//!
//! A [`Statement`] accumulates SQL fragments into part categories and bound
//! values into an ordered parameter map. Each [`StatementKind`] declares a
//! fixed category order, the separator and keyword prefix of every category
//! are intrinsic to the category, and [`Statement::generate`] assembles the
//! final text as a pure function of current state. Fragments and parameters
//! stay in lock-step: every bound value has exactly one placeholder token
//! already emitted into some fragment, and vice versa.
//!
//! Builders are owned, mutated, finalized and discarded within a single
//! logical request; they are deliberately not `Clone` so an instance cannot
//! be shared across requests by accident.

mod alter;
mod create;
mod delete;
mod insert;
mod optimize;
mod select;
mod show;
mod truncate;
mod update;

pub use alter::Alter;
pub use create::Create;
pub use delete::Delete;
pub use insert::Insert;
pub use optimize::Optimize;
pub use select::{JoinKind, Select, SortDir};
pub use show::{Show, ShowMode};
pub use truncate::Truncate;
pub use update::Update;

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, trace};

use crate::condition::{Condition, InSource, Op, Operand};
use crate::config::Config;
use crate::error::{BuildError, BuildResult};
use crate::normalize::{param_key, replace_prefix, ticked};
use crate::value::{ParamKey, Params, Value};

/// Statement family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Alter,
    Create,
    Show,
    Optimize,
    Truncate,
}

/// Part category: a named bucket of SQL fragments assembled in a fixed,
/// kind-specific order to form the final statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Part {
    Keyword,
    IfNotExists,
    Optimizer,
    Projection,
    Table,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
    Columns,
    Values,
    Set,
    OnDuplicate,
    AddColumns,
    DropColumns,
    ChangeColumns,
    AddKeys,
    DropKeys,
    AddIndexes,
    DropIndexes,
    AddPrimaryKey,
    DropPrimaryKey,
    First,
    After,
    Fields,
    Keys,
    Engine,
    Charset,
    Collate,
    Like,
}

impl Part {
    /// Keyword emitted once before the joined fragments of this category.
    fn prefix(self) -> Option<&'static str> {
        match self {
            Part::From => Some("FROM "),
            Part::Where => Some("WHERE "),
            Part::GroupBy => Some("GROUP BY "),
            Part::Having => Some("HAVING "),
            Part::OrderBy => Some("ORDER BY "),
            Part::Limit => Some("LIMIT "),
            Part::Offset => Some("OFFSET "),
            Part::Values => Some("VALUES "),
            Part::Set => Some("SET "),
            Part::OnDuplicate => Some("ON DUPLICATE KEY UPDATE "),
            Part::Like => Some("LIKE "),
            _ => None,
        }
    }

    /// Separator joining multiple fragments within this category.
    fn separator(self) -> &'static str {
        match self {
            Part::Projection
            | Part::Set
            | Part::OnDuplicate
            | Part::GroupBy
            | Part::OrderBy
            | Part::AddColumns
            | Part::DropColumns
            | Part::ChangeColumns
            | Part::AddKeys
            | Part::DropKeys
            | Part::AddIndexes
            | Part::DropIndexes
            | Part::Fields
            | Part::Keys => ", ",
            Part::Where | Part::Having => " AND ",
            _ => " ",
        }
    }

    /// Human-readable category name for structural error messages.
    fn label(self) -> &'static str {
        match self {
            Part::Keyword => "statement",
            Part::IfNotExists => "if not exists",
            Part::Optimizer => "optimizer",
            Part::Projection => "projection",
            Part::Table => "table",
            Part::From => "from",
            Part::Join => "join",
            Part::Where => "where",
            Part::GroupBy => "group by",
            Part::Having => "having",
            Part::OrderBy => "order by",
            Part::Limit => "limit",
            Part::Offset => "offset",
            Part::Columns => "columns",
            Part::Values => "values",
            Part::Set => "set",
            Part::OnDuplicate => "on duplicate key update",
            Part::AddColumns => "add columns",
            Part::DropColumns => "drop columns",
            Part::ChangeColumns => "change columns",
            Part::AddKeys => "add key",
            Part::DropKeys => "drop key",
            Part::AddIndexes => "add index",
            Part::DropIndexes => "drop index",
            Part::AddPrimaryKey => "add primary key",
            Part::DropPrimaryKey => "drop primary key",
            Part::First => "first",
            Part::After => "after",
            Part::Fields => "fields",
            Part::Keys => "keys",
            Part::Engine => "engine",
            Part::Charset => "charset",
            Part::Collate => "collate",
            Part::Like => "like",
        }
    }
}

/// Fragment-cardinality rule checked by [`Statement::validate`].
pub(crate) struct Rule {
    pub(crate) part: Part,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

const fn exactly_one(part: Part) -> Rule {
    Rule {
        part,
        min: 1,
        max: Some(1),
    }
}

const fn at_most_one(part: Part) -> Rule {
    Rule {
        part,
        min: 0,
        max: Some(1),
    }
}

const fn none(part: Part) -> Rule {
    Rule {
        part,
        min: 0,
        max: Some(0),
    }
}

const SELECT_RULES: &[Rule] = &[
    at_most_one(Part::Optimizer),
    at_most_one(Part::From),
    at_most_one(Part::Limit),
    at_most_one(Part::Offset),
];
const INSERT_RULES: &[Rule] = &[
    exactly_one(Part::Table),
    exactly_one(Part::Columns),
    exactly_one(Part::Values),
    at_most_one(Part::OnDuplicate),
];
const UPDATE_RULES: &[Rule] = &[exactly_one(Part::Table), exactly_one(Part::Set)];
const DELETE_RULES: &[Rule] = &[exactly_one(Part::Table)];
const ALTER_RULES: &[Rule] = &[
    exactly_one(Part::Table),
    at_most_one(Part::First),
    at_most_one(Part::After),
    at_most_one(Part::AddPrimaryKey),
    at_most_one(Part::DropPrimaryKey),
];
const CREATE_RULES: &[Rule] = &[
    exactly_one(Part::Table),
    at_most_one(Part::IfNotExists),
    Rule {
        part: Part::Fields,
        min: 1,
        max: None,
    },
    at_most_one(Part::Engine),
    at_most_one(Part::Charset),
    at_most_one(Part::Collate),
];
const SHOW_RULES: &[Rule] = &[at_most_one(Part::From), at_most_one(Part::Like)];
const MAINTENANCE_RULES: &[Rule] = &[exactly_one(Part::Table), none(Part::Where)];

impl StatementKind {
    /// Fixed category generation order for this statement family.
    pub(crate) fn structure(self) -> &'static [Part] {
        match self {
            StatementKind::Select => &[
                Part::Keyword,
                Part::Optimizer,
                Part::Projection,
                Part::From,
                Part::Join,
                Part::Where,
                Part::GroupBy,
                Part::Having,
                Part::OrderBy,
                Part::Limit,
                Part::Offset,
            ],
            StatementKind::Insert => &[
                Part::Keyword,
                Part::Table,
                Part::Columns,
                Part::Values,
                Part::OnDuplicate,
            ],
            StatementKind::Update => &[Part::Keyword, Part::Table, Part::Set, Part::Where],
            StatementKind::Delete => &[Part::Keyword, Part::Table, Part::Where],
            StatementKind::Alter => &[
                Part::Keyword,
                Part::Table,
                Part::AddColumns,
                Part::First,
                Part::After,
                Part::DropColumns,
                Part::ChangeColumns,
                Part::AddKeys,
                Part::DropKeys,
                Part::AddIndexes,
                Part::DropIndexes,
                Part::AddPrimaryKey,
                Part::DropPrimaryKey,
            ],
            StatementKind::Create => &[
                Part::Keyword,
                Part::IfNotExists,
                Part::Table,
                Part::Fields,
                Part::Keys,
                Part::Engine,
                Part::Charset,
                Part::Collate,
            ],
            StatementKind::Show => &[Part::Keyword, Part::From, Part::Like, Part::Where],
            StatementKind::Optimize | StatementKind::Truncate => &[Part::Keyword, Part::Table],
        }
    }

    /// Cardinality rules enforced at validation time.
    pub(crate) fn rules(self) -> &'static [Rule] {
        match self {
            StatementKind::Select => SELECT_RULES,
            StatementKind::Insert => INSERT_RULES,
            StatementKind::Update => UPDATE_RULES,
            StatementKind::Delete => DELETE_RULES,
            StatementKind::Alter => ALTER_RULES,
            StatementKind::Create => CREATE_RULES,
            StatementKind::Show => SHOW_RULES,
            StatementKind::Optimize | StatementKind::Truncate => MAINTENANCE_RULES,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Alter => "ALTER",
            StatementKind::Create => "CREATE",
            StatementKind::Show => "SHOW",
            StatementKind::Optimize => "OPTIMIZE",
            StatementKind::Truncate => "TRUNCATE",
        }
    }
}

/// The assembled, validated output handed to the execution collaborator.
/// SQL text and parameter map travel together; executing one without the
/// other produces a mismatched-parameter error from the driver.
#[derive(Debug)]
pub struct Finalized {
    pub sql: String,
    pub params: Params,
}

/// The central mutable builder. Specializations wrap it and feed it
/// fragments; see the module docs for the part protocol.
#[derive(Debug)]
pub struct Statement {
    kind: StatementKind,
    parts: Vec<(Part, String)>,
    params: Params,
    placeholder_mode: bool,
    config: Arc<Config>,
}

impl Statement {
    pub(crate) fn new(kind: StatementKind, keyword: &str, config: Arc<Config>) -> Self {
        let mut stmt = Self {
            kind,
            parts: Vec::new(),
            params: Params::new(),
            placeholder_mode: false,
            config,
        };
        stmt.append(Part::Keyword, keyword);
        stmt
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Insert a fragment into a part category. Structure is deliberately not
    /// validated here; cardinality checks are deferred to [`validate`].
    ///
    /// [`validate`]: Statement::validate
    pub(crate) fn append(&mut self, part: Part, fragment: impl Into<String>) {
        self.parts.push((part, fragment.into()));
    }

    pub(crate) fn has_part(&self, part: Part) -> bool {
        self.parts.iter().any(|(p, _)| *p == part)
    }

    /// Whether an ORDER BY fragment has been emitted.
    pub(crate) fn has_order(&self) -> bool {
        self.has_part(Part::OrderBy)
    }

    fn count_part(&self, part: Part) -> usize {
        self.parts.iter().filter(|(p, _)| *p == part).count()
    }

    /// Substitute the physical table prefix and quote a table or column path.
    pub(crate) fn prefixed_ticked(&self, name: &str) -> String {
        ticked(&replace_prefix(name, &self.config))
    }

    /// Switch to positional `?` placeholders for every subsequent bind.
    pub(crate) fn use_placeholders(&mut self) {
        self.placeholder_mode = true;
    }

    /// Bind a value under a key derived from `column`, returning the
    /// placeholder token to embed in the SQL fragment. In placeholder mode
    /// the bind is positional and the token is `?`.
    pub(crate) fn bind(&mut self, column: &str, value: Value) -> String {
        if self.placeholder_mode {
            self.bind_positional(value)
        } else {
            let key = self.params.push_named(&param_key(column), value);
            trace!(key = %key, "bound named parameter");
            format!(":{key}")
        }
    }

    /// Bind a value at the next positional index, returning the `?` token.
    pub(crate) fn bind_positional(&mut self, value: Value) -> String {
        let index = self.params.push_positional(value);
        trace!(index, "bound positional parameter");
        "?".to_string()
    }

    /// Ordered parameter map; iteration order is the bind order.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Check every cardinality rule of this statement kind, reporting all
    /// violations at once.
    pub fn validate(&self) -> BuildResult<()> {
        let mut violations = Vec::new();
        for rule in self.kind.rules() {
            let count = self.count_part(rule.part);
            if count < rule.min {
                violations.push(format!(
                    "{} statement requires a {} part",
                    self.kind.as_str(),
                    rule.part.label()
                ));
            }
            if let Some(max) = rule.max {
                if count > max {
                    violations.push(format!(
                        "{} statement can hold at most {} {} part(s), got {}",
                        self.kind.as_str(),
                        max,
                        rule.part.label(),
                        count
                    ));
                }
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(BuildError::Structural { violations })
        }
    }

    /// Assemble the final SQL text. Pure function of current state: calling
    /// it repeatedly without intervening mutation yields identical strings.
    pub fn generate(&self) -> String {
        let mut rendered: Vec<(Part, String)> = Vec::new();
        for part in self.kind.structure() {
            let fragments: Vec<&str> = self
                .parts
                .iter()
                .filter(|(p, _)| p == part)
                .map(|(_, f)| f.as_str())
                .collect();
            if fragments.is_empty() {
                continue;
            }
            let body = fragments.join(part.separator());
            let text = match part.prefix() {
                Some(prefix) => format!("{prefix}{body}"),
                None => body,
            };
            rendered.push((*part, text));
        }
        match self.kind {
            // CREATE wraps its definition body in parentheses between the
            // table name and the storage options.
            StatementKind::Create => {
                let mut head = Vec::new();
                let mut body = Vec::new();
                let mut tail = Vec::new();
                for (part, text) in rendered {
                    match part {
                        Part::Fields | Part::Keys => body.push(text),
                        Part::Engine | Part::Charset | Part::Collate => tail.push(text),
                        _ => head.push(text),
                    }
                }
                if !body.is_empty() {
                    head.push(format!("({})", body.join(", ")));
                }
                head.extend(tail);
                head.join(" ")
            }
            _ => rendered
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Validate, then hand back the atomic SQL/parameters pair.
    pub fn finalize(self) -> BuildResult<Finalized> {
        self.validate()?;
        let sql = self.generate();
        debug!(
            kind = self.kind.as_str(),
            params = self.params.len(),
            "finalized statement"
        );
        Ok(Finalized {
            sql,
            params: self.params,
        })
    }

    // =========================================================================
    // Condition rendering
    // =========================================================================

    /// Recursively translate a condition tree into an SQL fragment, binding
    /// every literal leaf into the parameter map as it goes.
    pub(crate) fn render_condition(&mut self, condition: &Condition) -> BuildResult<String> {
        match condition {
            Condition::And(children) => self.render_group(children, " AND "),
            Condition::Or(children) => self.render_group(children, " OR "),
            Condition::List(children) => {
                let rendered: BuildResult<Vec<String>> = children
                    .iter()
                    .map(|child| self.render_condition(child))
                    .collect();
                Ok(rendered?.join(", "))
            }
            Condition::Compare {
                column,
                op,
                operand,
            } => self.render_compare(column, *op, operand),
            Condition::In {
                column,
                source,
                negated,
            } => self.render_in(column, source, *negated),
            Condition::Between { column, low, high } => {
                self.use_placeholders();
                let col = self.prefixed_ticked(column);
                let low_token = self.bind_positional(low.clone());
                let high_token = self.bind_positional(high.clone());
                Ok(format!("({col} BETWEEN {low_token} AND {high_token})"))
            }
        }
    }

    fn render_group(&mut self, children: &[Condition], joiner: &str) -> BuildResult<String> {
        if children.is_empty() {
            return Err(BuildError::Condition(format!(
                "logical {} group must not be empty",
                joiner.trim()
            )));
        }
        let rendered: BuildResult<Vec<String>> = children
            .iter()
            .map(|child| self.render_condition(child))
            .collect();
        Ok(format!("({})", rendered?.join(joiner)))
    }

    fn render_compare(&mut self, column: &str, op: Op, operand: &Operand) -> BuildResult<String> {
        let col = self.prefixed_ticked(column);
        match operand {
            Operand::Value(value) => {
                let token = self.bind(column, value.clone());
                let op_str = match (op, value.is_null()) {
                    (Op::Eq, true) => "IS",
                    (Op::Ne, true) => "IS NOT",
                    _ => op.as_sql(),
                };
                Ok(format!("{col} {op_str} {token}"))
            }
            Operand::Column(name) => {
                let target = self.prefixed_ticked(name);
                Ok(format!("{col} {} {target}", op.as_sql()))
            }
            Operand::Function(call) => Ok(format!("{col} {} {}", op.as_sql(), ticked(call))),
            Operand::SubQuery(select) => {
                let sql = self.merge_subquery(select)?;
                Ok(format!("{col} {} ({sql})", op.as_sql()))
            }
        }
    }

    fn render_in(&mut self, column: &str, source: &InSource, negated: bool) -> BuildResult<String> {
        let op = if negated { "NOT IN" } else { "IN" };
        let body = match source {
            InSource::Values(values) => {
                if values.is_empty() {
                    return Err(BuildError::Condition(format!(
                        "values passed to `{op}` must not be empty"
                    )));
                }
                self.use_placeholders();
                let tokens: Vec<String> = values
                    .iter()
                    .map(|value| self.bind_positional(value.clone()))
                    .collect();
                tokens.join(", ")
            }
            InSource::SubQuery(select) => self.merge_subquery(select)?,
        };
        let col = self.prefixed_ticked(column);
        Ok(format!("{col} {op} ({body})"))
    }

    /// Inline a sub-query: merge its parameters into this statement, then
    /// return its generated SQL. When key deduplication renames a merged
    /// parameter, the inlined text is rewritten to the new key so tokens and
    /// values stay in lock-step.
    fn merge_subquery(&mut self, select: &Select) -> BuildResult<String> {
        let mut sql = select.statement().generate();
        for (key, value) in select.statement().params().iter() {
            match key {
                ParamKey::Named(name) => {
                    let actual = self.params.push_named(name, value.clone());
                    if actual != *name {
                        let pattern = Regex::new(&format!(":{}\\b", regex::escape(name)))
                            .expect("valid parameter pattern");
                        sql = pattern.replace_all(&sql, format!(":{actual}")).into_owned();
                    }
                }
                ParamKey::Position(_) => {
                    self.params.push_positional(value.clone());
                }
            }
        }
        Ok(sql)
    }
}

/// Common surface of every statement specialization: access to the shared
/// core, idempotent SQL generation, and atomic finalization.
pub trait SqlStatement {
    fn statement(&self) -> &Statement;
    fn statement_mut(&mut self) -> &mut Statement;

    /// Generate the SQL text for the current builder state. Idempotent and
    /// side-effect-free.
    fn generate_sql(&self) -> String {
        self.statement().generate()
    }

    /// The ordered parameter map matching [`generate_sql`].
    ///
    /// [`generate_sql`]: SqlStatement::generate_sql
    fn params(&self) -> &Params {
        self.statement().params()
    }

    /// Validate and return the `(sql, params)` pair for execution.
    fn finalize(self) -> BuildResult<Finalized>;
}
