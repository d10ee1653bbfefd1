//! CREATE TABLE statement specialization.

use std::sync::Arc;

use crate::config::Config;
use crate::ddl::{ColumnDef, KeyDef};
use crate::error::BuildResult;
use crate::statement::{Finalized, Part, SqlStatement, Statement, StatementKind};

/// CREATE TABLE statement builder. Column and key definitions are rendered
/// inside one parenthesized body; ENGINE/CHARSET/COLLATE options follow.
#[derive(Debug)]
pub struct Create {
    stmt: Statement,
    default_collate: Option<String>,
}

impl Create {
    pub(crate) fn new(config: Arc<Config>, table: &str) -> Self {
        let mut stmt = Statement::new(StatementKind::Create, "CREATE TABLE", config);
        let table = stmt.prefixed_ticked(table);
        stmt.append(Part::Table, table);
        Self {
            stmt,
            default_collate: None,
        }
    }

    /// Add `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.stmt.append(Part::IfNotExists, "IF NOT EXISTS");
        self
    }

    /// Default collation for the table, also inherited by textual columns
    /// without their own.
    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        let collate = collate.into();
        self.stmt
            .append(Part::Collate, format!("COLLATE={collate}"));
        self.default_collate = Some(collate);
        self
    }

    /// Storage engine option.
    pub fn engine(mut self, engine: &str) -> Self {
        self.stmt.append(Part::Engine, format!("ENGINE={engine}"));
        self
    }

    /// Default character set option.
    pub fn charset(mut self, charset: &str) -> Self {
        self.stmt
            .append(Part::Charset, format!("DEFAULT CHARSET={charset}"));
        self
    }

    /// Append column definitions.
    pub fn fields(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> BuildResult<Self> {
        for column in columns {
            let definition = column.lower(self.default_collate.as_deref())?;
            self.stmt.append(Part::Fields, definition);
        }
        Ok(self)
    }

    /// Append key definitions.
    pub fn keys(mut self, keys: impl IntoIterator<Item = KeyDef>) -> BuildResult<Self> {
        for key in keys {
            let definition = key.lower()?;
            self.stmt.append(Part::Keys, definition);
        }
        Ok(self)
    }
}

impl SqlStatement for Create {
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
