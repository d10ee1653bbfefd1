//! SELECT statement specialization.

use std::sync::Arc;

use crate::condition::Condition;
use crate::config::Config;
use crate::error::{BuildError, BuildResult};
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};

/// Join flavor. `Plain` emits a bare `JOIN`; the rest prepend their keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Plain,
    Inner,
    Left,
    Right,
    Outer,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Plain => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Outer => "OUTER JOIN",
        }
    }
}

/// Sort direction for ORDER BY fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn keyword(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// SELECT statement builder. Also serves as the sub-query type embeddable
/// in condition trees.
#[derive(Debug)]
pub struct Select {
    stmt: Statement,
}

impl Select {
    pub(crate) fn new(config: Arc<Config>) -> Self {
        Self {
            stmt: Statement::new(StatementKind::Select, "SELECT", config),
        }
    }

    /// Disable the query cache for this statement (`SQL_NO_CACHE`).
    pub fn no_cache(mut self) -> Self {
        self.stmt.append(Part::Optimizer, "SQL_NO_CACHE");
        self
    }

    /// Add projection columns. Plain names are quoted; function calls such
    /// as `COUNT(*)` pass through with their arguments quoted.
    pub fn projection(
        mut self,
        columns: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        for column in columns {
            let ticked = self.stmt.prefixed_ticked(column.as_ref());
            self.stmt.append(Part::Projection, ticked);
        }
        self
    }

    /// Set the FROM table.
    pub fn from(mut self, table: &str) -> Self {
        let table = self.stmt.prefixed_ticked(table);
        self.stmt.append(Part::From, table);
        self
    }

    /// Set the FROM table with an alias.
    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        let table = self.stmt.prefixed_ticked(table);
        let alias = crate::normalize::ticked(alias);
        self.stmt.append(Part::From, format!("{table} AS {alias}"));
        self
    }

    /// Join a table under an alias with an ON condition.
    pub fn join_on(
        mut self,
        kind: JoinKind,
        table: &str,
        alias: &str,
        on: Condition,
    ) -> BuildResult<Self> {
        let table = self.stmt.prefixed_ticked(table);
        let alias = crate::normalize::ticked(alias);
        let on_sql = self.stmt.render_condition(&on)?;
        self.stmt.append(
            Part::Join,
            format!("{} {table} AS {alias} ON {on_sql}", kind.keyword()),
        );
        Ok(self)
    }

    /// Append a WHERE condition. Repeat calls are joined by `AND`.
    pub fn filter(mut self, condition: Condition) -> BuildResult<Self> {
        let sql = self.stmt.render_condition(&condition)?;
        self.stmt.append(Part::Where, sql);
        Ok(self)
    }

    /// Append GROUP BY columns.
    pub fn group_by(mut self, columns: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        for column in columns {
            let ticked = self.stmt.prefixed_ticked(column.as_ref());
            self.stmt.append(Part::GroupBy, ticked);
        }
        self
    }

    /// Append a HAVING condition. Repeat calls are joined by `AND`.
    pub fn having(mut self, condition: Condition) -> BuildResult<Self> {
        let sql = self.stmt.render_condition(&condition)?;
        self.stmt.append(Part::Having, sql);
        Ok(self)
    }

    /// Append an ORDER BY column.
    pub fn order_by(mut self, column: &str, dir: SortDir) -> Self {
        let ticked = self.stmt.prefixed_ticked(column);
        self.stmt
            .append(Part::OrderBy, format!("{ticked} {}", dir.keyword()));
        self
    }

    /// Order randomly, dropping any column reference.
    pub fn order_by_random(mut self) -> Self {
        self.stmt.append(Part::OrderBy, "RAND()");
        self
    }

    /// Limit the number of returned rows.
    pub fn limit(mut self, limit: u64) -> Self {
        self.stmt.append(Part::Limit, limit.to_string());
        self
    }

    /// Skip the first `offset` rows.
    pub fn offset(mut self, offset: u64) -> Self {
        self.stmt.append(Part::Offset, offset.to_string());
        self
    }
}

impl SqlStatement for Select {
    fn statement(&self) -> &Statement {
        &self.stmt
    }

    fn statement_mut(&mut self) -> &mut Statement {
        &mut self.stmt
    }

    fn finalize(self) -> BuildResult<Finalized> {
        self.stmt.finalize()
    }
}

impl std::str::FromStr for SortDir {
    type Err = BuildError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => Err(BuildError::Condition(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}
