//! OPTIMIZE TABLE statement specialization.

use std::sync::Arc;

use crate::config::Config;
use crate::error::BuildResult;
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};

/// OPTIMIZE TABLE statement: a single required table, nothing else.
#[derive(Debug)]
pub struct Optimize {
    stmt: Statement,
}

impl Optimize {
    pub(crate) fn new(config: Arc<Config>, table: &str) -> Self {
        let mut stmt = Statement::new(StatementKind::Optimize, "OPTIMIZE TABLE", config);
        let table = stmt.prefixed_ticked(table);
        stmt.append(Part::Table, table);
        Self { stmt }
    }
}

impl SqlStatement for Optimize {
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
