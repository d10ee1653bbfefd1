//! DELETE statement specialization.

use std::sync::Arc;

use crate::condition::Condition;
use crate::config::Config;
use crate::error::BuildResult;
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};

/// DELETE statement builder.
#[derive(Debug)]
pub struct Delete {
    stmt: Statement,
}

impl Delete {
    pub(crate) fn new(config: Arc<Config>, table: &str) -> Self {
        let mut stmt = Statement::new(StatementKind::Delete, "DELETE FROM", config);
        let table = stmt.prefixed_ticked(table);
        stmt.append(Part::Table, table);
        Self { stmt }
    }

    /// Append a WHERE condition. Repeat calls are joined by `AND`.
    pub fn filter(mut self, condition: Condition) -> BuildResult<Self> {
        let sql = self.stmt.render_condition(&condition)?;
        self.stmt.append(Part::Where, sql);
        Ok(self)
    }
}

impl SqlStatement for Delete {
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
