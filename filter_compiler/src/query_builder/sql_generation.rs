//! SQL generation for filter and sort descriptors
//!
//! Placeholders are always `?`; [`Dialect::rebind`] converts them for drivers
//! that number their parameters.

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::query_builder::filter::{FilterDescriptor, FilterOperator};
use crate::query_builder::ordering::SortDescriptor;
use crate::validation::{FieldAllowList, ValidationError};
use crate::value::FilterValue;

/// Output of one compilation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    /// `WHERE ...` or empty
    pub where_clause: String,
    /// `ORDER BY ...` or empty
    pub order_clause: String,
    /// Bound values, in placeholder order
    pub params: Vec<FilterValue>,
}

impl CompiledQuery {
    pub fn has_where(&self) -> bool {
        !self.where_clause.is_empty()
    }

    pub fn has_order(&self) -> bool {
        !self.order_clause.is_empty()
    }

    pub fn placeholder_count(&self) -> usize {
        self.where_clause.matches('?').count()
    }
}

pub struct SqlGenerator;

impl SqlGenerator {
    /// Compile filters and sorts into WHERE / ORDER BY fragments.
    ///
    /// Field names are written into the SQL as given. Only values are bound.
    pub fn compile(
        filters: &[FilterDescriptor],
        sorts: &[SortDescriptor],
        dialect: Dialect,
    ) -> CompiledQuery {
        let (where_clause, params) = Self::build_where_clause(filters, dialect);
        let order_clause = Self::build_order_clause(sorts);

        CompiledQuery {
            where_clause,
            order_clause,
            params,
        }
    }

    /// Same as [`SqlGenerator::compile`], but every field that would reach the
    /// SQL text must be on `allowed`.
    pub fn compile_checked(
        filters: &[FilterDescriptor],
        sorts: &[SortDescriptor],
        dialect: Dialect,
        allowed: &FieldAllowList,
    ) -> Result<CompiledQuery, ValidationError> {
        for filter in filters.iter().filter(|f| f.reaches_sql()) {
            allowed.check(&filter.field)?;
        }
        for sort in sorts.iter().filter(|s| !s.field.is_empty()) {
            allowed.check(&sort.field)?;
        }

        Ok(Self::compile(filters, sorts, dialect))
    }

    /// Build WHERE clause from filter descriptors
    pub fn build_where_clause(
        filters: &[FilterDescriptor],
        dialect: Dialect,
    ) -> (String, Vec<FilterValue>) {
        let mut values = Vec::new();

        let clauses: Vec<String> = filters
            .iter()
            .filter_map(|filter| Self::build_condition_sql(filter, dialect, &mut values))
            .collect();

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!("WHERE {}", clauses.join(" AND ")), values)
        }
    }

    fn build_condition_sql(
        filter: &FilterDescriptor,
        dialect: Dialect,
        values: &mut Vec<FilterValue>,
    ) -> Option<String> {
        let Some(value) = filter.bound_value() else {
            tracing::trace!(field = %filter.field, "dropping filter without value");
            return None;
        };
        let field = &filter.field;

        let op = match filter.operator() {
            FilterOperator::Equals | FilterOperator::Unrecognized(_) => "=",
            FilterOperator::NotEquals => "!=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::GreaterThanOrEquals => ">=",
            FilterOperator::LessThan => "<",
            FilterOperator::LessThanOrEquals => "<=",
            FilterOperator::Contains => {
                values.push(FilterValue::Text(format!("%{}%", value.as_text())));
                return Some(format!("{} {} ?", field, dialect.like_operator()));
            }
            list_op @ (FilterOperator::In | FilterOperator::NotIn) => {
                let items = value.list_items();
                if items.is_empty() {
                    tracing::trace!(field = %field, "dropping list filter with no items");
                    return None;
                }

                let keyword = if list_op == FilterOperator::In {
                    "IN"
                } else {
                    "NOT IN"
                };
                let placeholders = vec!["?"; items.len()].join(",");

                values.extend(items.into_iter().map(FilterValue::Text));
                return Some(format!("{} {} ({})", field, keyword, placeholders));
            }
        };

        values.push(value.clone());
        Some(format!("{} {} ?", field, op))
    }

    /// Build ORDER BY clause; descriptors without a field are skipped
    pub fn build_order_clause(sorts: &[SortDescriptor]) -> String {
        let order_items: Vec<String> = sorts
            .iter()
            .filter(|sort| !sort.field.is_empty())
            .map(|sort| format!("{} {}", sort.field, sort.order().to_sql()))
            .collect();

        if order_items.is_empty() {
            return String::new();
        }

        format!("ORDER BY {}", order_items.join(", "))
    }
}
