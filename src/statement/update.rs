//! UPDATE statement specialization.

use std::sync::Arc;

use crate::condition::Condition;
use crate::config::Config;
use crate::error::BuildResult;
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};
use crate::value::Value;

/// UPDATE statement builder.
#[derive(Debug)]
pub struct Update {
    stmt: Statement,
}

impl Update {
    pub(crate) fn new(config: Arc<Config>, table: &str) -> Self {
        let mut stmt = Statement::new(StatementKind::Update, "UPDATE", config);
        let table = stmt.prefixed_ticked(table);
        stmt.append(Part::Table, table);
        Self { stmt }
    }

    /// Set columns from a values map, one named parameter per column.
    pub fn set(
        mut self,
        values: impl IntoIterator<Item = (impl Into<String>, impl Into<Value>)>,
    ) -> Self {
        for (column, value) in values {
            let column = column.into();
            let token = self.stmt.bind(&column, value.into());
            let col = crate::normalize::ticked(&column);
            self.stmt.append(Part::Set, format!("{col} = {token}"));
        }
        self
    }

    /// Append a WHERE condition. Repeat calls are joined by `AND`.
    pub fn filter(mut self, condition: Condition) -> BuildResult<Self> {
        let sql = self.stmt.render_condition(&condition)?;
        self.stmt.append(Part::Where, sql);
        Ok(self)
    }
}

impl SqlStatement for Update {
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
