//! Filter descriptors
//!
//! One descriptor is one `field <op> value` predicate. Descriptors are
//! AND-combined by the compiler; there is no nesting.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CompilerError;
use crate::value::FilterValue;

/// Comparison operator tags accepted on filter input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    Equals,              // =
    NotEquals,           // !=
    Contains,            // LIKE / ILIKE '%v%'
    GreaterThan,         // >
    GreaterThanOrEquals, // >=
    LessThan,            // <
    LessThanOrEquals,    // <=
    In,                  // IN (...)
    NotIn,               // NOT IN (...)
    /// Unknown tag, kept verbatim; compiles as equality
    Unrecognized(String),
}

impl FilterOperator {
    /// Parse an operator tag, case-insensitively
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "EQUALS" => FilterOperator::Equals,
            "NOT_EQUALS" => FilterOperator::NotEquals,
            "CONTAINS" => FilterOperator::Contains,
            "GREATER_THAN" => FilterOperator::GreaterThan,
            "GREATER_THAN_OR_EQUALS" => FilterOperator::GreaterThanOrEquals,
            "LESS_THAN" => FilterOperator::LessThan,
            "LESS_THAN_OR_EQUALS" => FilterOperator::LessThanOrEquals,
            "IN" => FilterOperator::In,
            "NOT_IN" => FilterOperator::NotIn,
            _ => FilterOperator::Unrecognized(tag.to_string()),
        }
    }

    /// Canonical tag name
    pub fn tag(&self) -> &str {
        match self {
            FilterOperator::Equals => "EQUALS",
            FilterOperator::NotEquals => "NOT_EQUALS",
            FilterOperator::Contains => "CONTAINS",
            FilterOperator::GreaterThan => "GREATER_THAN",
            FilterOperator::GreaterThanOrEquals => "GREATER_THAN_OR_EQUALS",
            FilterOperator::LessThan => "LESS_THAN",
            FilterOperator::LessThanOrEquals => "LESS_THAN_OR_EQUALS",
            FilterOperator::In => "IN",
            FilterOperator::NotIn => "NOT_IN",
            FilterOperator::Unrecognized(tag) => tag,
        }
    }

    /// Whether the operator expands a comma-separated value into a placeholder list
    pub fn is_list(&self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }
}

impl From<String> for FilterOperator {
    fn from(value: String) -> Self {
        FilterOperator::parse(&value)
    }
}

impl From<&str> for FilterOperator {
    fn from(value: &str) -> Self {
        FilterOperator::parse(value)
    }
}

impl From<FilterOperator> for String {
    fn from(value: FilterOperator) -> Self {
        value.tag().to_string()
    }
}

/// One requested predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub field: String,
    #[serde(default)]
    pub operator: Option<FilterOperator>,
    #[serde(default)]
    pub value: Option<FilterValue>,
}

impl FilterDescriptor {
    /// Create a descriptor with an explicit operator
    pub fn new(field: &str, operator: FilterOperator, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.to_string(),
            operator: Some(operator),
            value: Some(value.into()),
        }
    }

    /// Equality with no operator tag, the shape most filter inputs arrive in
    pub fn field(field: &str, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.to_string(),
            operator: None,
            value: Some(value.into()),
        }
    }

    pub fn eq(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Equals, value)
    }

    pub fn ne(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::NotEquals, value)
    }

    pub fn contains(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Contains, value)
    }

    pub fn gt(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::GreaterThan, value)
    }

    pub fn gte(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::GreaterThanOrEquals, value)
    }

    pub fn lt(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::LessThan, value)
    }

    pub fn lte(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::LessThanOrEquals, value)
    }

    /// IN over a comma-separated list, e.g. `"1, 2,3"`
    pub fn in_list(field: &str, values: &str) -> Self {
        Self::new(field, FilterOperator::In, values)
    }

    /// NOT IN over a comma-separated list
    pub fn not_in_list(field: &str, values: &str) -> Self {
        Self::new(field, FilterOperator::NotIn, values)
    }

    /// Effective operator; a missing tag means equality
    pub fn operator(&self) -> FilterOperator {
        self.operator.clone().unwrap_or(FilterOperator::Equals)
    }

    /// Value that will be bound, or `None` when the descriptor is dropped
    pub fn bound_value(&self) -> Option<&FilterValue> {
        self.value.as_ref().filter(|value| !value.is_null())
    }

    /// Whether compiling this descriptor emits a condition.
    ///
    /// Null values and `IN` / `NOT_IN` with no items are dropped.
    pub fn reaches_sql(&self) -> bool {
        match self.bound_value() {
            Some(value) => !self.operator().is_list() || !value.list_items().is_empty(),
            None => false,
        }
    }
}

/// Parse a JSON array of `{field, operator, value}` objects.
///
/// `null` yields an empty list; `null` entries are skipped.
pub fn parse_filters(input: Value) -> Result<Vec<FilterDescriptor>, CompilerError> {
    let entries: Option<Vec<Option<FilterDescriptor>>> = serde_json::from_value(input)?;
    Ok(entries.unwrap_or_default().into_iter().flatten().collect())
}
