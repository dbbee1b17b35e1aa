use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::StringFormat;

/// Value class inferred for a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// No non-empty value was sampled.
    Empty,
    Boolean,
    Integer,
    Number,
    String,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Empty => "empty",
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Number => "number",
            ColumnType::String => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of one column, computed once per loaded CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeInfo {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
}

impl ColumnTypeInfo {
    pub const fn new(column_type: ColumnType) -> Self {
        Self {
            column_type,
            format: None,
        }
    }

    pub const fn empty() -> Self {
        Self::new(ColumnType::Empty)
    }

    pub const fn string_with_format(format: StringFormat) -> Self {
        Self {
            column_type: ColumnType::String,
            format: Some(format),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.column_type == ColumnType::Empty
    }
}

impl fmt::Display for ColumnTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            Some(format) => write!(f, "{} ({})", self.column_type, format),
            None => write!(f, "{}", self.column_type),
        }
    }
}
