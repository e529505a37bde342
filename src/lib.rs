//! # QueryKit
//!
//! Filter/sort-to-SQL compilation and pagination for admin-console list
//! queries. A resolver layer hands QueryKit the caller's filters, sorts and
//! pagination arguments; QueryKit returns a data statement, a count statement
//! and the positional parameters for both.
//!
//! ## Quick Start
//!
//! ```rust
//! use querykit::prelude::*;
//!
//! let kit = QueryKit::new(QueryConfig::new("postgres".to_string(), PageClamp::FloorAtOne, 1))?;
//!
//! let list = kit.list_query(
//!     "admin",
//!     &["admin_id", "name", "email"],
//!     &[FilterDescriptor::contains("name", "bo")],
//!     &[SortDescriptor::asc("name")],
//!     &PaginationArgs::new().with_page(2),
//! )?;
//!
//! assert_eq!(
//!     list.data_sql,
//!     "SELECT admin_id, name, email FROM admin WHERE name ILIKE $1 ORDER BY name ASC LIMIT $2 OFFSET $3"
//! );
//! assert_eq!(list.count_sql, "SELECT COUNT(*) FROM admin WHERE name ILIKE $1");
//! # Ok::<(), QueryKitError>(())
//! ```
//!
//! ## Trust boundary
//!
//! Only filter values are bound as parameters. Field names go into the SQL
//! text verbatim, so a caller that lets end-user text reach a field name
//! without an allow-list check opens a SQL injection vector. Configure
//! `allowed_fields` for a table to have [`QueryKit`] enforce one.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;
pub mod statement;

// Re-export the main public types for convenience
pub use crate::core::QueryKit;
pub use crate::errors::QueryKitError;
pub use crate::statement::{bind_values, ListQuery, ListStatement};

// Re-export centralized config
pub use config::{AppConfig, PageClamp, QueryConfig};

// Re-export internal crates used in the public API
pub use filter_compiler;

// Re-export external dependencies used in public API
pub use sqlx;
