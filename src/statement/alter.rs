//! ALTER TABLE statement specialization.

use std::sync::Arc;

use crate::config::Config;
use crate::ddl::{ColumnDef, KeyDef};
use crate::error::{BuildError, BuildResult};
use crate::normalize::ticked;
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};

/// ALTER TABLE statement builder. Each operation family is its own part
/// category; fragments within a category are joined by `, ` and categories
/// by a single space.
#[derive(Debug)]
pub struct Alter {
    stmt: Statement,
    default_collate: Option<String>,
}

impl Alter {
    pub(crate) fn new(config: Arc<Config>, table: &str) -> Self {
        let mut stmt = Statement::new(StatementKind::Alter, "ALTER TABLE", config);
        let table = stmt.prefixed_ticked(table);
        stmt.append(Part::Table, table);
        Self {
            stmt,
            default_collate: None,
        }
    }

    /// Default collation inherited by textual columns added or changed by
    /// this statement.
    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        self.default_collate = Some(collate.into());
        self
    }

    /// Position the altered column first in the table.
    pub fn first(mut self) -> Self {
        self.stmt.append(Part::First, "FIRST");
        self
    }

    /// Position the altered column after `column`.
    pub fn after(mut self, column: &str) -> Self {
        let column = ticked(column);
        self.stmt.append(Part::After, format!("AFTER {column}"));
        self
    }

    /// Append `ADD COLUMN` clauses.
    pub fn add(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> BuildResult<Self> {
        for column in columns {
            let definition = column.lower(self.default_collate.as_deref())?;
            self.stmt
                .append(Part::AddColumns, format!("ADD COLUMN {definition}"));
        }
        Ok(self)
    }

    /// Append `DROP COLUMN` clauses.
    pub fn drop(mut self, columns: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        for column in columns {
            let column = ticked(column.as_ref());
            self.stmt
                .append(Part::DropColumns, format!("DROP COLUMN {column}"));
        }
        self
    }

    /// Append `CHANGE COLUMN` clauses; old names pair with the new
    /// definitions by index.
    pub fn change(
        mut self,
        old_columns: impl IntoIterator<Item = impl AsRef<str>>,
        new_columns: impl IntoIterator<Item = ColumnDef>,
    ) -> BuildResult<Self> {
        let old: Vec<String> = old_columns
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        let new: Vec<ColumnDef> = new_columns.into_iter().collect();
        if old.len() != new.len() {
            return Err(BuildError::structural(format!(
                "change() requires matching column counts, got {} old and {} new",
                old.len(),
                new.len()
            )));
        }
        for (old_name, definition) in old.iter().zip(new) {
            let old_name = ticked(old_name);
            let definition = definition.lower(self.default_collate.as_deref())?;
            self.stmt.append(
                Part::ChangeColumns,
                format!("CHANGE COLUMN {old_name} {definition}"),
            );
        }
        Ok(self)
    }

    /// Append `ADD KEY` clauses.
    pub fn add_key(mut self, keys: impl IntoIterator<Item = KeyDef>) -> BuildResult<Self> {
        for key in keys {
            let definition = key.lower()?;
            self.stmt.append(Part::AddKeys, format!("ADD {definition}"));
        }
        Ok(self)
    }

    /// Append `DROP KEY` clauses.
    pub fn drop_key(mut self, keys: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        for key in keys {
            let key = ticked(key.as_ref());
            self.stmt.append(Part::DropKeys, format!("DROP KEY {key}"));
        }
        self
    }

    /// Append `ADD INDEX` clauses.
    pub fn add_index(mut self, keys: impl IntoIterator<Item = KeyDef>) -> BuildResult<Self> {
        for key in keys {
            let definition = key.lower()?;
            self.stmt
                .append(Part::AddIndexes, format!("ADD {definition}"));
        }
        Ok(self)
    }

    /// Append `DROP INDEX` clauses.
    pub fn drop_index(mut self, keys: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        for key in keys {
            let key = ticked(key.as_ref());
            self.stmt
                .append(Part::DropIndexes, format!("DROP INDEX {key}"));
        }
        self
    }

    /// Append the one `ADD PRIMARY KEY` clause.
    pub fn add_primary_key(
        mut self,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> BuildResult<Self> {
        let definition = KeyDef::primary(columns).lower()?;
        self.stmt
            .append(Part::AddPrimaryKey, format!("ADD {definition}"));
        Ok(self)
    }

    /// Append the one `DROP PRIMARY KEY` clause.
    pub fn drop_primary_key(mut self) -> Self {
        self.stmt.append(Part::DropPrimaryKey, "DROP PRIMARY KEY");
        self
    }
}

impl SqlStatement for Alter {
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
