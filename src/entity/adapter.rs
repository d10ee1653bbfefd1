//! Per-field filter/sort adapters.
//!
//! An adapter owns the query behavior of one field: which data-table column
//! it filters, how textual filter values lower into conditions, and how the
//! field sorts. [`FieldAdapter`] implements the common equality semantics;
//! [`DateAdapter`] swaps in the date filter grammar.

use crate::condition::Condition;
use crate::entity::date::build_date_conditions;
use crate::entity::{build_equality_filter, Combine, Direction, EntryQuery};
use crate::error::BuildResult;
use crate::statement::JoinKind;

/// Seam for field-specific query behavior.
pub trait QueryAdapter {
    /// Identifier of the field whose data table is joined.
    fn field_id(&self) -> u32;

    /// Data-table column targeted by filters and sorts.
    fn column(&self) -> &'static str {
        "value"
    }

    /// Lower the textual filter values into a condition on `column`.
    /// Returning `None` leaves the query untouched.
    fn build_filter(
        &self,
        column: &str,
        values: &[&str],
        combine: Combine,
    ) -> BuildResult<Option<Condition>>;

    /// Join the field's data table and apply the lowered filter.
    fn filter(
        &self,
        query: EntryQuery,
        values: &[&str],
        combine: Combine,
    ) -> BuildResult<EntryQuery> {
        let query = query.ensure_field_join(self.field_id(), JoinKind::Left)?;
        let column = format!("f{}.{}", self.field_id(), self.column());
        match self.build_filter(&column, values, combine)? {
            Some(condition) => query.where_condition(condition),
            None => Ok(query),
        }
    }

    /// Sort by the field's column. Random ordering drops the column
    /// reference, and with it the data-table join.
    fn sort(&self, query: EntryQuery, direction: Direction) -> BuildResult<EntryQuery> {
        if direction == Direction::Random {
            return Ok(query.order_random());
        }
        let query = query.ensure_field_join(self.field_id(), JoinKind::Left)?;
        let column = format!("f{}.{}", self.field_id(), self.column());
        Ok(query.order_column(&column, direction))
    }
}

/// Default adapter: equality filtering on the `value` column. Multiple
/// values combine per the caller's choice; a `not:` prefix switches the
/// call to AND-joined inequalities.
#[derive(Debug, Clone, Copy)]
pub struct FieldAdapter {
    field_id: u32,
}

impl FieldAdapter {
    pub fn new(field_id: u32) -> Self {
        Self { field_id }
    }
}

impl QueryAdapter for FieldAdapter {
    fn field_id(&self) -> u32 {
        self.field_id
    }

    fn build_filter(
        &self,
        column: &str,
        values: &[&str],
        combine: Combine,
    ) -> BuildResult<Option<Condition>> {
        Ok(build_equality_filter(column, values, combine))
    }
}

/// Date field adapter: filters the `date` column through the date filter
/// grammar. A single value applies its condition directly; multiple values
/// wrap in the combine group.
#[derive(Debug, Clone, Copy)]
pub struct DateAdapter {
    field_id: u32,
}

impl DateAdapter {
    pub fn new(field_id: u32) -> Self {
        Self { field_id }
    }
}

impl QueryAdapter for DateAdapter {
    fn field_id(&self) -> u32 {
        self.field_id
    }

    fn column(&self) -> &'static str {
        "date"
    }

    fn build_filter(
        &self,
        column: &str,
        values: &[&str],
        combine: Combine,
    ) -> BuildResult<Option<Condition>> {
        let mut set = build_date_conditions(column, values)?;
        if set.conditions.is_empty() {
            return Ok(None);
        }
        if set.not_mode {
            return Ok(Some(Condition::And(set.conditions)));
        }
        if set.conditions.len() == 1 {
            return Ok(Some(set.conditions.remove(0)));
        }
        Ok(Some(combine.group(set.conditions)))
    }
}
