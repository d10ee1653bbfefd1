//! Statement factory - the entry point collaborators build statements from.

use std::sync::Arc;

use crate::config::Config;
use crate::entity::{EntryQuery, FieldQuery};
use crate::statement::{
    Alter, Create, Delete, Insert, Optimize, Select, Show, ShowMode, Truncate, Update,
};

/// Hands out statement builders bound to one shared, read-only
/// configuration. The factory performs no I/O; executing the finalized
/// statements belongs to the external driver collaborator.
#[derive(Debug, Clone)]
pub struct Factory {
    config: Arc<Config>,
}

impl Factory {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Factory over the default configuration (empty table prefix).
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a SELECT statement.
    pub fn select(&self) -> Select {
        Select::new(self.config.clone())
    }

    /// Start an INSERT statement on `table`.
    pub fn insert(&self, table: &str) -> Insert {
        Insert::new(self.config.clone(), table)
    }

    /// Start an UPDATE statement on `table`.
    pub fn update(&self, table: &str) -> Update {
        Update::new(self.config.clone(), table)
    }

    /// Start a DELETE statement on `table`.
    pub fn delete(&self, table: &str) -> Delete {
        Delete::new(self.config.clone(), table)
    }

    /// Start an ALTER TABLE statement on `table`.
    pub fn alter(&self, table: &str) -> Alter {
        Alter::new(self.config.clone(), table)
    }

    /// Start a CREATE TABLE statement on `table`.
    pub fn create(&self, table: &str) -> Create {
        Create::new(self.config.clone(), table)
    }

    /// Start a SHOW TABLES statement.
    pub fn show_tables(&self) -> Show {
        Show::new(self.config.clone(), ShowMode::Tables)
    }

    /// Start a SHOW COLUMNS statement.
    pub fn show_columns(&self) -> Show {
        Show::new(self.config.clone(), ShowMode::Columns)
    }

    /// Start a SHOW INDEX statement.
    pub fn show_index(&self) -> Show {
        Show::new(self.config.clone(), ShowMode::Index)
    }

    /// Start an OPTIMIZE TABLE statement on `table`.
    pub fn optimize(&self, table: &str) -> Optimize {
        Optimize::new(self.config.clone(), table)
    }

    /// Start a TRUNCATE TABLE statement on `table`.
    pub fn truncate(&self, table: &str) -> Truncate {
        Truncate::new(self.config.clone(), table)
    }

    /// Start an entry query.
    pub fn entries(&self) -> EntryQuery {
        EntryQuery::new(self.config.clone())
    }

    /// Start a field-definition query.
    pub fn fields(&self) -> FieldQuery {
        FieldQuery::new(self.config.clone())
    }
}
