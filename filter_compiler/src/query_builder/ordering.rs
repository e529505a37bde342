//! Sort descriptors

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CompilerError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only `DESC` (any case) sorts descending; everything else is ascending
    pub fn parse(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("DESC") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        SortOrder::parse(&value)
    }
}

impl From<SortOrder> for String {
    fn from(value: SortOrder) -> Self {
        value.to_sql().to_string()
    }
}

/// One ORDER BY key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub direction: Option<SortOrder>,
}

impl SortDescriptor {
    pub fn new(field: &str, direction: Option<SortOrder>) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }

    pub fn asc(field: &str) -> Self {
        Self::new(field, Some(SortOrder::Asc))
    }

    pub fn desc(field: &str) -> Self {
        Self::new(field, Some(SortOrder::Desc))
    }

    pub fn order(&self) -> SortOrder {
        self.direction.unwrap_or_default()
    }
}

/// Parse a JSON array of `{field, direction}` objects; `null` entries are skipped
pub fn parse_sorts(input: Value) -> Result<Vec<SortDescriptor>, CompilerError> {
    let entries: Option<Vec<Option<SortDescriptor>>> = serde_json::from_value(input)?;
    Ok(entries.unwrap_or_default().into_iter().flatten().collect())
}
