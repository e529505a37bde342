//! Convenience re-exports for common QueryKit usage
//!
//! # Example
//!
//! ```rust
//! use querykit::prelude::*;
//!
//! let compiled = compile(&[FilterDescriptor::field("name", "Bob")], &[], Dialect::Standard);
//! assert_eq!(compiled.where_clause, "WHERE name = ?");
//! ```

// Core QueryKit components
pub use crate::core::QueryKit;
pub use crate::errors::QueryKitError;
pub use crate::statement::{bind_values, ListQuery, ListStatement};

// Re-export centralized config
pub use config::{AppConfig, ConfigError, PageClamp, QueryConfig};

// Compiler, resolver and descriptor types
pub use filter_compiler::prelude::*;

// Common external dependencies
pub use anyhow;
pub use sqlx;
