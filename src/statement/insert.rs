//! INSERT statement specialization.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{BuildError, BuildResult};
use crate::normalize::ticked;
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};
use crate::value::Value;

/// INSERT statement builder. The column list and placeholder list are both
/// derived from the keys of a single values map, in map order.
#[derive(Debug)]
pub struct Insert {
    stmt: Statement,
    columns: Vec<String>,
}

impl Insert {
    pub(crate) fn new(config: Arc<Config>, table: &str) -> Self {
        let mut stmt = Statement::new(StatementKind::Insert, "INSERT INTO", config);
        let table = stmt.prefixed_ticked(table);
        stmt.append(Part::Table, table);
        Self {
            stmt,
            columns: Vec::new(),
        }
    }

    /// Set the row to insert. Emits `` (`x`, `y`) VALUES (:x, :y) `` with one
    /// named parameter per column.
    pub fn values(
        mut self,
        values: impl IntoIterator<Item = (impl Into<String>, impl Into<Value>)>,
    ) -> Self {
        let mut tokens = Vec::new();
        for (column, value) in values {
            let column = column.into();
            let token = self.stmt.bind(&column, value.into());
            tokens.push(token);
            self.columns.push(column);
        }
        let column_list = self
            .columns
            .iter()
            .map(|c| ticked(c))
            .collect::<Vec<_>>()
            .join(", ");
        self.stmt.append(Part::Columns, format!("({column_list})"));
        self.stmt.append(Part::Values, format!("({})", tokens.join(", ")));
        self
    }

    /// Turn the insert into an upsert: on a duplicate key, every column is
    /// updated to its incoming value via `col = VALUES(col)`.
    pub fn update_on_duplicate_key(mut self) -> BuildResult<Self> {
        if self.columns.is_empty() {
            return Err(BuildError::structural(
                "ON DUPLICATE KEY UPDATE requires a prior values() call",
            ));
        }
        for column in &self.columns {
            let col = ticked(column);
            self.stmt
                .append(Part::OnDuplicate, format!("{col} = VALUES({col})"));
        }
        Ok(self)
    }
}

impl SqlStatement for Insert {
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
