//! DDL fragment builders: column and key definitions.
//!
//! Definitions are constructed transiently from a declarative description at
//! ALTER/CREATE build time, immediately lowered to an SQL fragment, then
//! discarded. Lowering is dispatched on the declared SQL type prefix;
//! unknown prefixes fall through with no decoration beyond the bare type,
//! which keeps the builder open to dialect-specific types but means a typo
//! produces a silently under-decorated column.

use crate::error::{BuildError, BuildResult};
use crate::normalize::{quote_value, ticked};
use crate::value::Value;

/// A column definition for ALTER/CREATE statements.
///
/// Defaults follow the content-store conventions: columns are NOT NULL and
/// numeric columns are unsigned unless stated otherwise.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    name: String,
    sql_type: String,
    nullable: bool,
    default: Option<Value>,
    signed: bool,
    auto_increment: bool,
    enum_values: Vec<String>,
    collate: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: false,
            default: None,
            signed: false,
            auto_increment: false,
            enum_values: Vec::new(),
            collate: None,
        }
    }

    /// Accept NULL; the column renders `DEFAULT NULL` instead of `NOT NULL`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Default value, rendered inline. Only honored on NOT NULL columns.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Keep the column signed (numeric types render `unsigned` otherwise).
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// AUTO_INCREMENT; only meaningful on integer types.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Value list for enum types.
    pub fn enum_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Collation; only used for character-based columns.
    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        self.collate = Some(collate.into());
        self
    }

    /// Lower to an SQL fragment: `` `name` type [decorations] ``.
    /// `inherited_collate` is the statement-level default applied when the
    /// column does not carry its own.
    pub(crate) fn lower(&self, inherited_collate: Option<&str>) -> BuildResult<String> {
        if self.sql_type.is_empty() {
            return Err(BuildError::ValueType(format!(
                "column `{}` must declare an SQL type",
                self.name
            )));
        }
        let mut sql_type = self.sql_type.to_lowercase();

        let collate = self
            .collate
            .as_deref()
            .or(inherited_collate)
            .map(|c| format!(" COLLATE {c}"))
            .unwrap_or_default();
        let null = if self.nullable {
            " DEFAULT NULL"
        } else {
            " NOT NULL"
        };
        let default = match (&self.default, self.nullable) {
            (Some(value), false) => format!(" DEFAULT {}", quote_value(value)?),
            _ => String::new(),
        };

        if sql_type.starts_with("varchar") || sql_type.starts_with("text") {
            sql_type.push_str(&format!("{collate}{null}{default}"));
        } else if sql_type.starts_with("enum") {
            if !self.enum_values.is_empty() {
                let values: BuildResult<Vec<String>> = self
                    .enum_values
                    .iter()
                    .map(|v| quote_value(&Value::String(v.clone())))
                    .collect();
                sql_type.push_str(&format!("({})", values?.join(", ")));
            }
            sql_type.push_str(&format!("{collate}{null}{default}"));
        } else if sql_type.starts_with("int") {
            if !self.signed {
                sql_type.push_str(" unsigned");
            }
            sql_type.push_str(&format!("{null}{default}"));
            if self.auto_increment {
                sql_type.push_str(" AUTO_INCREMENT");
            }
        } else if sql_type.starts_with("datetime") {
            sql_type.push_str(&format!("{null}{default}"));
        }

        Ok(format!("{} {sql_type}", ticked(&self.name)))
    }
}

/// Key kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Key,
    Index,
    Unique,
    Primary,
}

impl KeyKind {
    fn keyword(self) -> &'static str {
        match self {
            KeyKind::Key => "KEY",
            KeyKind::Index => "INDEX",
            KeyKind::Unique => "UNIQUE KEY",
            KeyKind::Primary => "PRIMARY KEY",
        }
    }
}

/// A key/index definition. Columns default to the key name when not given.
#[derive(Debug, Clone)]
pub struct KeyDef {
    name: String,
    kind: KeyKind,
    columns: Vec<String>,
}

impl KeyDef {
    pub fn key(name: impl Into<String>) -> Self {
        Self::named(name, KeyKind::Key)
    }

    pub fn index(name: impl Into<String>) -> Self {
        Self::named(name, KeyKind::Index)
    }

    pub fn unique(name: impl Into<String>) -> Self {
        Self::named(name, KeyKind::Unique)
    }

    /// Primary keys carry no name, only columns.
    pub fn primary(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: String::new(),
            kind: KeyKind::Primary,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    fn named(name: impl Into<String>, kind: KeyKind) -> Self {
        let name = name.into();
        Self {
            columns: vec![name.clone()],
            name,
            kind,
        }
    }

    /// Override the covered columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Lower to an SQL fragment: `KIND [name] (columns...)`.
    pub(crate) fn lower(&self) -> BuildResult<String> {
        if self.columns.is_empty() {
            return Err(BuildError::ValueType(format!(
                "key `{}` must cover at least one column",
                self.name
            )));
        }
        let columns = self
            .columns
            .iter()
            .map(|c| ticked(c))
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind {
            KeyKind::Primary => Ok(format!("PRIMARY KEY ({columns})")),
            kind => Ok(format!(
                "{} {} ({columns})",
                kind.keyword(),
                ticked(&self.name)
            )),
        }
    }
}
