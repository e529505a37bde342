//! Query builder utilities
//!
//! Filter/sort compilation and pagination resolution.

pub mod builder;
pub mod filter;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;


pub use builder::QueryBuilder;
pub use filter::{parse_filters, FilterDescriptor, FilterOperator};
pub use ordering::{parse_sorts, SortDescriptor, SortOrder};
pub use pagination::{PageClampPolicy, PageInfo, Pagination, PaginationArgs};
pub use sql_generation::{CompiledQuery, SqlGenerator};

use crate::dialect::Dialect;

/// Compile filters and sorts for `dialect`
pub fn compile(
    filters: &[FilterDescriptor],
    sorts: &[SortDescriptor],
    dialect: Dialect,
) -> CompiledQuery {
    SqlGenerator::compile(filters, sorts, dialect)
}

/// Resolve pagination arguments to (limit, page, offset)
pub fn resolve(args: &PaginationArgs) -> Pagination {
    args.resolve()
}
