//! Convenience re-exports for common filter-compiler usage

// Compiler entry points
pub use crate::query_builder::{compile, resolve, CompiledQuery, QueryBuilder, SqlGenerator};

// Descriptors
pub use crate::query_builder::{FilterDescriptor, FilterOperator, SortDescriptor, SortOrder};

// Pagination
pub use crate::query_builder::{PageClampPolicy, PageInfo, Pagination, PaginationArgs};

// Values and dialects
pub use crate::dialect::Dialect;
pub use crate::value::FilterValue;

// Validation
pub use crate::validation::{
    FieldAllowList, ValidatedFieldName, ValidatedTableName, ValidationError,
};

// Error types
pub use crate::errors::CompilerError;
