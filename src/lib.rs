//! # Ashlar
//!
//! A fluent, parameter-safe SQL statement builder for MySQL-family content
//! stores. Statements are described declaratively and assembled into
//! parameterized SQL text plus an ordered parameter map; untrusted values
//! are never concatenated into the statement text.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │     Entity queries (entries, fields, filter DSL)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [condition algebra + DDL builders]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Statement core (ordered parts, ordered parameters)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [finalize]
//! ┌─────────────────────────────────────────────────────────┐
//! │        (SQL text, parameter map) → driver                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Execution, pooling and transactions belong to the driver collaborator;
//! this crate stops at [`statement::Finalized`].
//!
//! ```ignore
//! use ashlar::prelude::*;
//!
//! let factory = Factory::new(Config::new("sym_"));
//! let stmt = factory
//!     .delete("tbl_widgets")
//!     .filter(eq("x", 1))?
//!     .finalize()?;
//! assert_eq!(stmt.sql, "DELETE FROM `sym_widgets` WHERE `x` = :x");
//! ```

pub mod condition;
pub mod config;
pub mod ddl;
pub mod entity;
pub mod error;
pub mod factory;
pub mod normalize;
pub mod statement;
pub mod value;

pub use config::Config;
pub use error::{BuildError, BuildResult};
pub use factory::Factory;
pub use statement::{Finalized, SqlStatement};
pub use value::{ParamKey, Params, Value};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::condition::{
        and, between, cmp, cmp_select, eq, gt, gte, in_select, in_values, like, list, lt, lte, ne,
        not_in_select, not_in_values, or, regexp, Condition, InSource, Op, Operand,
    };
    pub use crate::config::Config;
    pub use crate::ddl::{ColumnDef, KeyDef, KeyKind};
    pub use crate::entity::{
        Combine, DateAdapter, Direction, EntryQuery, FieldAdapter, FieldQuery, QueryAdapter,
    };
    pub use crate::error::{BuildError, BuildResult};
    pub use crate::factory::Factory;
    pub use crate::statement::{
        Alter, Create, Delete, Finalized, Insert, JoinKind, Optimize, Select, Show, ShowMode,
        SortDir, SqlStatement, StatementKind, Truncate, Update,
    };
    pub use crate::value::{ParamKey, Params, Value};
}
