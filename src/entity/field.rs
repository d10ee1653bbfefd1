//! Field-definition query builder.

use std::sync::Arc;

use crate::condition::{eq, in_values};
use crate::config::Config;
use crate::error::BuildResult;
use crate::statement::{Finalized, Select, SortDir, SqlStatement, Statement};

/// Query over the field-definitions table, aliased `f`.
#[derive(Debug)]
pub struct FieldQuery {
    select: Select,
}

impl FieldQuery {
    pub(crate) fn new(config: Arc<Config>) -> Self {
        Self {
            select: Select::new(config).no_cache().from_as("tbl_fields", "f"),
        }
    }

    /// Add projection columns (none are selected by default).
    pub fn projection(mut self, columns: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        self.select = self.select.projection(columns);
        self
    }

    /// Restrict to fields of one section.
    pub fn section(mut self, section_id: u32) -> BuildResult<Self> {
        self.select = self.select.filter(eq("f.parent_section", section_id))?;
        Ok(self)
    }

    /// Restrict to one field id.
    pub fn field(mut self, field_id: u32) -> BuildResult<Self> {
        self.select = self.select.filter(eq("f.id", field_id))?;
        Ok(self)
    }

    /// Restrict to a set of field ids.
    pub fn fields(mut self, field_ids: impl IntoIterator<Item = u32>) -> BuildResult<Self> {
        self.select = self.select.filter(in_values("f.id", field_ids))?;
        Ok(self)
    }

    /// Restrict to one field type.
    pub fn type_is(mut self, field_type: &str) -> BuildResult<Self> {
        self.select = self.select.filter(eq("f.type", field_type))?;
        Ok(self)
    }

    /// Restrict to one placement location.
    pub fn location(mut self, location: &str) -> BuildResult<Self> {
        self.select = self.select.filter(eq("f.location", location))?;
        Ok(self)
    }

    /// Sort by a column of the field table.
    pub fn sort(mut self, column: &str, dir: SortDir) -> Self {
        self.select = self.select.order_by(&format!("f.{column}"), dir);
        self
    }
}

impl SqlStatement for FieldQuery {
    fn statement(&self) -> &Statement {
        self.select.statement()
    }

    fn statement_mut(&mut self) -> &mut Statement {
        self.select.statement_mut()
    }

    fn finalize(self) -> BuildResult<Finalized> {
        self.select.finalize()
    }
}
