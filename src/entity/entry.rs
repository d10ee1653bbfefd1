//! Entry query builder.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::condition::{eq, in_values, Condition};
use crate::config::Config;
use crate::entity::adapter::{FieldAdapter, QueryAdapter};
use crate::entity::date::build_date_conditions;
use crate::entity::{build_equality_filter, Combine, Direction};
use crate::error::{BuildError, BuildResult};
use crate::statement::{Finalized, JoinKind, Select, SortDir, SqlStatement, Statement};

const CREATION_DATE_COLUMN: &str = "e.creation_date_gmt";
const MODIFICATION_DATE_COLUMN: &str = "e.modification_date_gmt";

/// Query over the entries table, aliased `e`, with per-field data tables
/// joined on demand. Joining the same field twice reuses the first join.
#[derive(Debug)]
pub struct EntryQuery {
    select: Select,
    joined_fields: BTreeMap<u32, JoinKind>,
    section_id: Option<u32>,
}

impl EntryQuery {
    pub(crate) fn new(config: Arc<Config>) -> Self {
        Self {
            select: Select::new(config).no_cache().from_as("tbl_entries", "e"),
            joined_fields: BTreeMap::new(),
            section_id: None,
        }
    }

    /// Add projection columns (none are selected by default).
    pub fn projection(mut self, columns: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        self.select = self.select.projection(columns);
        self
    }

    /// Restrict to one section.
    pub fn section(mut self, section_id: u32) -> BuildResult<Self> {
        self.section_id = Some(section_id);
        self.where_condition(eq("e.section_id", section_id))
    }

    /// The section filter applied to this query, if any.
    pub fn section_id(&self) -> Option<u32> {
        self.section_id
    }

    /// Restrict to one entry id.
    pub fn entry(self, entry_id: u32) -> BuildResult<Self> {
        self.where_condition(eq("e.id", entry_id))
    }

    /// Restrict to a set of entry ids.
    pub fn entries(self, entry_ids: impl IntoIterator<Item = u32>) -> BuildResult<Self> {
        self.where_condition(in_values("e.id", entry_ids))
    }

    /// Join a field's data table. Idempotent per field id: the alias
    /// `f{id}` is created on first reference and reused afterwards.
    pub fn join_field(self, field_id: u32, kind: JoinKind) -> BuildResult<Self> {
        self.ensure_field_join(field_id, kind)
    }

    pub fn inner_join_field(self, field_id: u32) -> BuildResult<Self> {
        self.ensure_field_join(field_id, JoinKind::Inner)
    }

    pub fn left_join_field(self, field_id: u32) -> BuildResult<Self> {
        self.ensure_field_join(field_id, JoinKind::Left)
    }

    pub fn right_join_field(self, field_id: u32) -> BuildResult<Self> {
        self.ensure_field_join(field_id, JoinKind::Right)
    }

    pub fn outer_join_field(self, field_id: u32) -> BuildResult<Self> {
        self.ensure_field_join(field_id, JoinKind::Outer)
    }

    pub(crate) fn ensure_field_join(mut self, field_id: u32, kind: JoinKind) -> BuildResult<Self> {
        if self.joined_fields.contains_key(&field_id) {
            return Ok(self);
        }
        let alias = format!("f{field_id}");
        let table = format!("tbl_entries_data_{field_id}");
        let on = eq("e.id", format!("${alias}.entry_id"));
        self.select = self.select.join_on(kind, &table, &alias, on)?;
        self.joined_fields.insert(field_id, kind);
        Ok(self)
    }

    /// Filter on a field's data table with an explicit condition, joining
    /// the table first when needed.
    pub fn where_field(self, field_id: u32, condition: Condition) -> BuildResult<Self> {
        self.ensure_field_join(field_id, JoinKind::Left)?
            .where_condition(condition)
    }

    /// Append a raw WHERE condition.
    pub fn where_condition(mut self, condition: Condition) -> BuildResult<Self> {
        self.select = self.select.filter(condition)?;
        Ok(self)
    }

    /// Apply a textual filter. `system:id` matches entry ids,
    /// `system:creation-date` / `system:modification-date` run the values
    /// through the date grammar, and a numeric handle filters that field's
    /// `value` column through the default adapter. Values combine per
    /// `combine`; a `not:` prefix switches the call to AND-joined
    /// inequalities.
    pub fn filter(self, handle: &str, values: &[&str], combine: Combine) -> BuildResult<Self> {
        match handle {
            "system:id" => match build_equality_filter("e.id", values, combine) {
                Some(condition) => self.where_condition(condition),
                None => Ok(self),
            },
            "system:creation-date" => self.filter_system_date(CREATION_DATE_COLUMN, values, combine),
            "system:modification-date" => {
                self.filter_system_date(MODIFICATION_DATE_COLUMN, values, combine)
            }
            _ => match handle.parse::<u32>() {
                Ok(field_id) => FieldAdapter::new(field_id).filter(self, values, combine),
                Err(_) => Err(BuildError::Condition(format!(
                    "unknown filter handle `{handle}`"
                ))),
            },
        }
    }

    fn filter_system_date(
        self,
        column: &str,
        values: &[&str],
        combine: Combine,
    ) -> BuildResult<Self> {
        let set = build_date_conditions(column, values)?;
        if set.conditions.is_empty() {
            return Ok(self);
        }
        if set.not_mode {
            return self.where_condition(Condition::And(set.conditions));
        }
        self.where_condition(combine.group(set.conditions))
    }

    /// Sort by a system column or a field's `value` column. Unknown handles
    /// are a build error.
    pub fn sort(self, handle: &str, direction: Direction) -> BuildResult<Self> {
        let column = match handle {
            "system:id" => "e.id",
            "system:creation-date" => CREATION_DATE_COLUMN,
            "system:modification-date" => MODIFICATION_DATE_COLUMN,
            _ => {
                return match handle.parse::<u32>() {
                    Ok(field_id) => FieldAdapter::new(field_id).sort(self, direction),
                    Err(_) => Err(BuildError::Condition(format!(
                        "invalid sort handle `{handle}`"
                    ))),
                };
            }
        };
        Ok(self.order_column(column, direction))
    }

    pub(crate) fn order_column(mut self, column: &str, direction: Direction) -> Self {
        self.select = match direction {
            Direction::Asc => self.select.order_by(column, SortDir::Asc),
            Direction::Desc => self.select.order_by(column, SortDir::Desc),
            Direction::Random => self.select.order_by_random(),
        };
        self
    }

    pub(crate) fn order_random(mut self) -> Self {
        self.select = self.select.order_by_random();
        self
    }

    fn with_default_sort(mut self) -> Self {
        if !self.select.statement().has_order() {
            self.select = self.select.order_by("e.id", SortDir::Asc);
        }
        self
    }
}

impl SqlStatement for EntryQuery {
    fn statement(&self) -> &Statement {
        self.select.statement()
    }

    fn statement_mut(&mut self) -> &mut Statement {
        self.select.statement_mut()
    }

    /// Applies the default `ORDER BY e.id ASC` when no sort was requested,
    /// then finalizes the underlying SELECT.
    fn finalize(self) -> BuildResult<Finalized> {
        self.with_default_sort().select.finalize()
    }
}
