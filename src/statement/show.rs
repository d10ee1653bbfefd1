//! SHOW statement specialization.

use std::sync::Arc;

use crate::condition::Condition;
use crate::config::Config;
use crate::error::{BuildError, BuildResult};
use crate::normalize::replace_prefix;
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};
use crate::value::Value;

/// What the SHOW statement lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    Tables,
    Columns,
    Index,
}

impl ShowMode {
    fn keyword(self) -> &'static str {
        match self {
            ShowMode::Tables => "SHOW TABLES",
            ShowMode::Columns => "SHOW COLUMNS",
            ShowMode::Index => "SHOW INDEX",
        }
    }
}

/// SHOW statement builder. Holds at most one FROM table and one LIKE
/// pattern; WHERE conditions may repeat and are joined by `AND`.
#[derive(Debug)]
pub struct Show {
    stmt: Statement,
    mode: ShowMode,
}

impl Show {
    pub(crate) fn new(config: Arc<Config>, mode: ShowMode) -> Self {
        Self {
            stmt: Statement::new(StatementKind::Show, mode.keyword(), config),
            mode,
        }
    }

    /// Set the table to inspect (required for COLUMNS/INDEX modes).
    pub fn from(mut self, table: &str) -> Self {
        let table = self.stmt.prefixed_ticked(table);
        self.stmt.append(Part::From, table);
        self
    }

    /// Append the LIKE pattern. The pattern is table-prefix-substituted
    /// since it is typically itself a table name, and bound positionally.
    pub fn like(mut self, pattern: &str) -> Self {
        let pattern = replace_prefix(pattern, self.stmt.config());
        self.stmt.use_placeholders();
        let token = self.stmt.bind_positional(Value::String(pattern));
        self.stmt.append(Part::Like, token);
        self
    }

    /// Append a WHERE condition. Repeat calls are joined by `AND`.
    pub fn filter(mut self, condition: Condition) -> BuildResult<Self> {
        let sql = self.stmt.render_condition(&condition)?;
        self.stmt.append(Part::Where, sql);
        Ok(self)
    }
}

impl SqlStatement for Show {
    fn statement(&self) -> &Statement {
        &self.stmt
    }

    fn statement_mut(&mut self) -> &mut Statement {
        &mut self.stmt
    }

    fn finalize(self) -> BuildResult<Finalized> {
        if matches!(self.mode, ShowMode::Columns | ShowMode::Index)
            && !self.stmt.has_part(Part::From)
        {
            return Err(BuildError::structural(format!(
                "{} requires a from part",
                self.mode.keyword()
            )));
        }
        self.stmt.finalize()
    }
}
