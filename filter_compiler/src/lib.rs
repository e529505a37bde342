//! Filter Compiler - filter/sort to SQL compilation for QueryKit
//!
//! This crate turns flat lists of filter and sort descriptors into a
//! parameterized `WHERE` / `ORDER BY` fragment pair plus the ordered list of
//! bound values, and resolves page/limit/offset arguments into a concrete
//! window. Everything here is pure: no I/O, no shared state.
//!
//! # Trust boundary
//!
//! Only filter *values* are parameterized. Field names are interpolated into
//! the SQL text as given. Callers must only pass names taken from a known
//! schema; passing free-form end-user text as a field name is a SQL injection
//! vector. [`SqlGenerator::compile_checked`] with a [`FieldAllowList`] is
//! available for callers that want the check done here.
//!
//! ```rust
//! use filter_compiler::prelude::*;
//!
//! let compiled = compile(
//!     &[FilterDescriptor::contains("name", "bo")],
//!     &[SortDescriptor::desc("age")],
//!     Dialect::PostgresLike,
//! );
//! assert_eq!(compiled.where_clause, "WHERE name ILIKE ?");
//! assert_eq!(compiled.order_clause, "ORDER BY age DESC");
//! ```

pub mod dialect;
pub mod errors;
pub mod prelude;
pub mod query_builder;
pub mod validation;
pub mod value;

pub use dialect::Dialect;
pub use errors::CompilerError;
pub use query_builder::{
    compile, resolve, CompiledQuery, FilterDescriptor, FilterOperator, PageClampPolicy, PageInfo,
    Pagination, PaginationArgs, QueryBuilder, SortDescriptor, SortOrder, SqlGenerator,
};
pub use validation::{FieldAllowList, ValidatedFieldName, ValidatedTableName, ValidationError};
pub use value::FilterValue;
