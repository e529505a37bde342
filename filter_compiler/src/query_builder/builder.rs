//! Fluent collector for filter, sort and pagination inputs

use crate::dialect::Dialect;
use crate::query_builder::filter::FilterDescriptor;
use crate::query_builder::ordering::{SortDescriptor, SortOrder};
use crate::query_builder::pagination::{Pagination, PaginationArgs};
use crate::query_builder::sql_generation::{CompiledQuery, SqlGenerator};

/// Query builder gathering the inputs of one list query
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) filters: Vec<FilterDescriptor>,
    pub(crate) sorts: Vec<SortDescriptor>,
    pub(crate) pagination: PaginationArgs,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter descriptor
    pub fn filter(mut self, filter: FilterDescriptor) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: impl IntoIterator<Item = FilterDescriptor>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Add ordering
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sorts.push(SortDescriptor::new(field, Some(order)));
        self
    }

    /// Add multiple sort descriptors, applied in order
    pub fn sorts(mut self, sorts: impl IntoIterator<Item = SortDescriptor>) -> Self {
        self.sorts.extend(sorts);
        self
    }

    /// Replace pagination arguments
    pub fn paginate(mut self, args: PaginationArgs) -> Self {
        self.pagination = args;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.pagination.page = Some(page);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.pagination.offset = Some(offset);
        self
    }

    pub fn filter_list(&self) -> &[FilterDescriptor] {
        &self.filters
    }

    pub fn sort_list(&self) -> &[SortDescriptor] {
        &self.sorts
    }

    pub fn pagination_args(&self) -> PaginationArgs {
        self.pagination
    }

    /// Compile WHERE / ORDER BY fragments
    pub fn compile(&self, dialect: Dialect) -> CompiledQuery {
        SqlGenerator::compile(&self.filters, &self.sorts, dialect)
    }

    /// Compile fragments and resolve the pagination window
    pub fn build(&self, dialect: Dialect) -> (CompiledQuery, Pagination) {
        (self.compile(dialect), self.pagination.resolve())
    }
}
