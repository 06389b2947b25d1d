//! Table and column descriptors produced by introspection

/// Marker placed in [`ColumnDescriptor::extra`] for store-generated keys
pub const AUTO_INCREMENT: &str = "auto_increment";

/// Soft-deletion flag column (second-to-last)
pub const DELETED_COLUMN: &str = "Deleted";

/// Soft-deletion timestamp column (last)
pub const DELETED_AT_COLUMN: &str = "DeletedAt";

/// A single column as declared in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name, verbatim
    pub name: String,
    /// Declared SQL type, verbatim (e.g. `VARCHAR(36)`)
    pub declared_type: String,
    /// Whether the column is (part of) the primary key
    pub is_primary_key: bool,
    /// Driver-specific extra metadata, empty when none
    pub extra: String,
}

impl ColumnDescriptor {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        is_primary_key: bool,
        extra: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_primary_key,
            extra: extra.into(),
        }
    }

    /// Store assigns the value on insert
    pub fn is_auto_increment(&self) -> bool {
        self.extra.eq_ignore_ascii_case(AUTO_INCREMENT)
    }

    /// Text-affinity declared type (the SQL `CHAR`/`TEXT`/`CLOB` family, plus `UUID`)
    pub fn is_text(&self) -> bool {
        let upper = self.declared_type.to_ascii_uppercase();
        upper.contains("CHAR")
            || upper.contains("TEXT")
            || upper.contains("CLOB")
            || upper.starts_with("UUID")
    }

    /// Narrow integer used as a boolean (`TINYINT`, `BOOL`, `BOOLEAN`)
    pub fn is_boolean(&self) -> bool {
        let upper = self.declared_type.to_ascii_uppercase();
        upper.starts_with("TINYINT") || upper == "BOOL" || upper == "BOOLEAN"
    }
}

/// How a table's primary key gets its value on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKeyKind {
    /// Integer key assigned by the store
    AutoIncrementInteger,
    /// Text key; generated as a UUID when the caller omits it
    GeneratedString,
    /// Anything else; the caller always supplies it
    Other,
}

impl PrimaryKeyKind {
    /// The wire tag a key of this kind must carry, if constrained
    pub fn expected_tag(&self) -> Option<&'static str> {
        match self {
            PrimaryKeyKind::AutoIncrementInteger => Some("number"),
            PrimaryKeyKind::GeneratedString => Some("string"),
            PrimaryKeyKind::Other => None,
        }
    }
}

/// Ordered column list plus derived flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnDescriptor>,
    has_soft_deletion: bool,
    primary_key_kind: PrimaryKeyKind,
}

impl TableSchema {
    /// Builds a schema, deriving soft-deletion and key kind from the columns
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        let has_soft_deletion = match columns.as_slice() {
            [.., deleted, deleted_at] => {
                deleted.name == DELETED_COLUMN && deleted_at.name == DELETED_AT_COLUMN
            }
            _ => false,
        };

        let primary_key_kind = match columns.first() {
            Some(first) if first.is_primary_key && first.is_auto_increment() => {
                PrimaryKeyKind::AutoIncrementInteger
            }
            Some(first) if first.is_primary_key && first.is_text() => {
                PrimaryKeyKind::GeneratedString
            }
            _ => PrimaryKeyKind::Other,
        };

        Self {
            name: name.into(),
            columns,
            has_soft_deletion,
            primary_key_kind,
        }
    }

    /// Table name as declared in the store
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All columns in declaration order
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn has_soft_deletion(&self) -> bool {
        self.has_soft_deletion
    }

    pub fn primary_key_kind(&self) -> PrimaryKeyKind {
        self.primary_key_kind
    }

    /// The first column, when it is the primary key
    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.first().filter(|c| c.is_primary_key)
    }

    /// Columns a caller may supply values for: everything except the
    /// trailing soft-deletion pair
    pub fn insertable_columns(&self) -> &[ColumnDescriptor] {
        if self.has_soft_deletion {
            &self.columns[..self.columns.len() - 2]
        } else {
            &self.columns
        }
    }

    /// Case-insensitive column lookup
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}
