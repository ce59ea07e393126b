//! Column metadata for the generic add/edit forms.
//!
//! The database describes each table's columns; this module turns that raw
//! metadata into [`ColumnInfo`] values, decides which column is the primary
//! key, and picks an HTML input for every column.

use serde::Serialize;

use super::catalog::Table;

/// Column metadata as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    /// SQL type name, e.g. `character varying` or `integer`.
    pub data_type: String,
    /// Underlying type name, e.g. `varchar` or `int4`. Used for casts.
    pub udt_name: String,
    pub max_length: Option<i32>,
    pub nullable: bool,
    pub default: Option<String>,
    pub is_identity: bool,
}

impl RawColumn {
    /// Convenience constructor used by tests and fixed schemas.
    pub fn new(name: &str, data_type: &str, udt_name: &str, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            udt_name: udt_name.to_string(),
            max_length: None,
            nullable,
            default: None,
            is_identity: false,
        }
    }

    fn has_generated_value(&self) -> bool {
        self.is_identity
            || self
                .default
                .as_deref()
                .map(|d| d.trim_start().starts_with("nextval("))
                .unwrap_or(false)
    }
}

/// HTML input used to edit a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    Text,
    Textarea,
    Number,
    Checkbox,
    Date,
    DatetimeLocal,
    Time,
}

impl InputKind {
    /// Picks an input for a SQL type name.
    pub fn for_data_type(data_type: &str) -> Self {
        let dt = data_type.to_ascii_lowercase();
        match dt.as_str() {
            "smallint" | "integer" | "bigint" | "numeric" | "decimal" | "real"
            | "double precision" | "money" => InputKind::Number,
            "boolean" | "bit" => InputKind::Checkbox,
            "date" => InputKind::Date,
            "text" => InputKind::Textarea,
            _ if dt.starts_with("timestamp") => InputKind::DatetimeLocal,
            _ if dt.starts_with("time") => InputKind::Time,
            _ => InputKind::Text,
        }
    }
}

/// A column as presented on a generic form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    /// Type name used when casting bound form values.
    pub cast_type: String,
    pub max_length: Option<i32>,
    pub is_required: bool,
    pub is_primary: bool,
    pub is_auto_increment: bool,
    pub hint: Option<String>,
    pub input: InputKind,
    #[serde(skip)]
    generated: bool,
}

impl ColumnInfo {
    fn from_raw(raw: RawColumn) -> Self {
        let generated = raw.has_generated_value();
        Self {
            input: InputKind::for_data_type(&raw.data_type),
            name: raw.name,
            data_type: raw.data_type,
            cast_type: raw.udt_name,
            max_length: raw.max_length,
            is_required: !raw.nullable,
            is_primary: false,
            is_auto_increment: false,
            hint: None,
            generated,
        }
    }

    /// Builds a fixed column description.
    pub fn fixed(name: &str, data_type: &str, cast_type: &str, max_length: Option<i32>) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            cast_type: cast_type.to_string(),
            max_length,
            is_required: false,
            is_primary: false,
            is_auto_increment: false,
            hint: None,
            input: InputKind::for_data_type(data_type),
            generated: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn primary(mut self) -> Self {
        self.is_primary = true;
        self.is_auto_increment = true;
        self.is_required = true;
        self
    }

    /// Checkbox columns are sent only when ticked.
    pub fn is_boolean(&self) -> bool {
        self.input == InputKind::Checkbox
    }

    /// Whether the form should offer an input for this column.
    pub fn is_editable(&self) -> bool {
        !(self.is_primary && self.is_auto_increment)
    }
}

/// The columns of one table, with the primary key identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub table: Table,
    pub columns: Vec<ColumnInfo>,
}

impl TableSchema {
    /// Builds a schema from database metadata, marking the primary key.
    pub fn from_raw(table: Table, raw: Vec<RawColumn>) -> Self {
        let mut columns: Vec<ColumnInfo> = raw.into_iter().map(ColumnInfo::from_raw).collect();
        mark_primary_key(table.name(), &mut columns, Some(table.primary_key()));
        Self { table, columns }
    }

    /// The primary-key column, if one was identified.
    pub fn primary_key(&self) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.is_primary)
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Fixed schema for the `users` table.
    ///
    /// On edit the password is optional; leaving it blank keeps the
    /// current one.
    pub fn users(mode: FormMode) -> Self {
        let password = ColumnInfo::fixed("password", "character varying", "varchar", Some(255));
        let password = match mode {
            FormMode::Add => password.required().with_hint("Enter a secure password"),
            FormMode::Edit => password.with_hint("Leave blank to keep current password"),
        };
        Self {
            table: Table::Users,
            columns: vec![
                ColumnInfo::fixed("userid", "integer", "int4", None).primary(),
                ColumnInfo::fixed("username", "character varying", "varchar", Some(100))
                    .required(),
                password,
                ColumnInfo::fixed("level", "character varying", "varchar", Some(1))
                    .required()
                    .with_hint("M for Manager, U for User"),
            ],
        }
    }
}

/// Whether a form creates or changes a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Add,
    Edit,
}

/// Marks at most one column as the primary key.
///
/// An explicit key wins when it names an existing column. Otherwise the
/// first match of, in order: a column named `id`; a column named
/// `<table>id` or ending in `id` and containing the table name; any column
/// containing `id`.
pub fn mark_primary_key(table_name: &str, columns: &mut [ColumnInfo], explicit: Option<&str>) {
    for col in columns.iter_mut() {
        col.is_primary = false;
        col.is_auto_increment = false;
    }

    let index = explicit
        .and_then(|key| columns.iter().position(|c| c.name == key))
        .or_else(|| find_key_by_convention(table_name, columns));

    if let Some(i) = index {
        let col = &mut columns[i];
        col.is_primary = true;
        col.is_auto_increment = col.generated;
    }
}

fn find_key_by_convention(table_name: &str, columns: &[ColumnInfo]) -> Option<usize> {
    let table = table_name.to_ascii_lowercase();
    let table_id = format!("{}id", table);

    columns
        .iter()
        .position(|c| c.name.eq_ignore_ascii_case("id"))
        .or_else(|| {
            columns.iter().position(|c| {
                let name = c.name.to_ascii_lowercase();
                name == table_id || (name.ends_with("id") && name.contains(&table))
            })
        })
        .or_else(|| {
            columns
                .iter()
                .position(|c| c.name.to_ascii_lowercase().contains("id"))
        })
}
