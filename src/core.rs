//! Core QueryKit functionality
//!
//! This module contains the main QueryKit struct, which applies the
//! configured caller policy (dialect, page clamping, field allow lists) around
//! the pure compiler and resolver.

use std::collections::HashMap;

use config::{AppConfig, PageClamp, QueryConfig};
use filter_compiler::{
    Dialect, FieldAllowList, FilterDescriptor, PageClampPolicy, PageInfo, Pagination,
    PaginationArgs, SortDescriptor, SqlGenerator,
};
use filter_compiler::query_builder::{parse_filters, parse_sorts};
use serde_json::Value;

use crate::errors::QueryKitError;
use crate::statement::{ListQuery, ListStatement};

/// Main QueryKit coordinator for list queries
#[derive(Debug, Clone)]
pub struct QueryKit {
    dialect: Dialect,
    page_clamp: PageClampPolicy,
    page_window: i64,
    allow_lists: HashMap<String, FieldAllowList>,
}

impl QueryKit {
    /// Create a QueryKit from query configuration; allow lists are validated here
    pub fn new(config: QueryConfig) -> Result<Self, QueryKitError> {
        let allow_lists = config
            .allowed_fields
            .iter()
            .map(|(table, fields)| -> Result<_, QueryKitError> {
                Ok((table.clone(), FieldAllowList::new(fields)?))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            dialect: Dialect::from_name(&config.dialect),
            page_clamp: match config.page_clamp {
                PageClamp::None => PageClampPolicy::None,
                PageClamp::FloorAtOne => PageClampPolicy::FloorAtOne,
            },
            page_window: config.page_window,
            allow_lists,
        })
    }

    pub fn from_config(config: AppConfig) -> Result<Self, QueryKitError> {
        Self::new(config.query)
    }

    /// Load configuration from the environment / default file
    pub fn load() -> Result<Self, QueryKitError> {
        Self::from_config(AppConfig::load()?)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn page_clamp(&self) -> PageClampPolicy {
        self.page_clamp
    }

    /// Allow list configured for `table`, if any
    pub fn allow_list(&self, table: &str) -> Option<&FieldAllowList> {
        self.allow_lists.get(table)
    }

    /// Resolve pagination after applying the configured clamp policy
    pub fn pagination(&self, args: &PaginationArgs) -> Pagination {
        args.with_clamp(self.page_clamp).resolve()
    }

    /// Build the data and count statements for one list request.
    ///
    /// Fields are checked against the table's allow list when one is
    /// configured; otherwise they are trusted as given.
    pub fn list_query(
        &self,
        table: &str,
        columns: &[&str],
        filters: &[FilterDescriptor],
        sorts: &[SortDescriptor],
        args: &PaginationArgs,
    ) -> Result<ListQuery, QueryKitError> {
        let statement = ListStatement::new(table, columns)?;
        let pagination = self.pagination(args);

        let compiled = match self.allow_list(table) {
            Some(allowed) => {
                SqlGenerator::compile_checked(filters, sorts, self.dialect, allowed)?
            }
            None => {
                trace_log!("[LIST] No allow list for table {}", table);
                SqlGenerator::compile(filters, sorts, self.dialect)
            }
        };

        Ok(statement.build(&compiled, &pagination, self.dialect))
    }

    /// Same as [`QueryKit::list_query`], taking GraphQL-style JSON input.
    ///
    /// `filter` and `order_by` are arrays of `{field, operator, value}` and
    /// `{field, direction}`; `pagination` is `{limit, size, page, offset}`.
    /// Any of them may be `null`.
    pub fn list_query_json(
        &self,
        table: &str,
        columns: &[&str],
        filter: Value,
        order_by: Value,
        pagination: Value,
    ) -> Result<ListQuery, QueryKitError> {
        let filters = parse_filters(filter)?;
        let sorts = parse_sorts(order_by)?;
        let args: Option<PaginationArgs> = serde_json::from_value(pagination)
            .map_err(filter_compiler::CompilerError::from)?;

        self.list_query(table, columns, &filters, &sorts, &args.unwrap_or_default())
    }

    /// Page metadata for a count result, using the configured window
    pub fn page_info(&self, total_items: i64, pagination: &Pagination) -> PageInfo {
        PageInfo::new(total_items, pagination, self.page_window)
    }
}

impl Default for QueryKit {
    fn default() -> Self {
        Self {
            dialect: Dialect::Standard,
            page_clamp: PageClampPolicy::None,
            page_window: 1,
            allow_lists: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_compiler::{FilterValue, ValidationError};
    use serde_json::json;

    fn postgres_kit() -> QueryKit {
        QueryKit::new(
            QueryConfig::new("postgres".to_string(), PageClamp::FloorAtOne, 1)
                .with_allowed_fields("admin", &["name", "username", "active"]),
        )
        .unwrap()
    }

    #[test]
    fn test_default_kit() {
        let kit = QueryKit::default();
        assert_eq!(kit.dialect(), Dialect::Standard);
        assert_eq!(kit.page_clamp(), PageClampPolicy::None);
        assert!(kit.allow_list("admin").is_none());
    }

    #[test]
    fn test_config_mapping() {
        let kit = postgres_kit();
        assert_eq!(kit.dialect(), Dialect::PostgresLike);
        assert_eq!(kit.page_clamp(), PageClampPolicy::FloorAtOne);
        assert_eq!(kit.allow_list("admin").map(FieldAllowList::len), Some(3));
    }

    #[test]
    fn test_invalid_allow_list_rejected() {
        let result = QueryKit::new(
            QueryConfig::new("mysql".to_string(), PageClamp::None, 1)
                .with_allowed_fields("admin", &["name; --"]),
        );
        assert!(matches!(result, Err(QueryKitError::Validation(_))));
    }

    #[test]
    fn test_allow_list_with_type_named_columns() {
        let kit = QueryKit::new(
            QueryConfig::new("postgres".to_string(), PageClamp::None, 1)
                .with_allowed_fields("message", &["date", "time"]),
        )
        .unwrap();

        let list = kit
            .list_query(
                "message",
                &["message_id", "date"],
                &[FilterDescriptor::gte("date", "2024-01-01")],
                &[SortDescriptor::desc("time")],
                &PaginationArgs::new(),
            )
            .unwrap();
        assert_eq!(
            list.data_sql,
            "SELECT message_id, date FROM message WHERE date >= $1 ORDER BY time DESC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_clamp_policy_applied_by_kit_only() {
        let args = PaginationArgs::new().with_page(-4);

        assert_eq!(postgres_kit().pagination(&args).offset, 0);
        assert_eq!(QueryKit::default().pagination(&args).offset, -50);
    }

    #[test]
    fn test_list_query_checks_allow_list() {
        let kit = postgres_kit();

        let ok = kit.list_query(
            "admin",
            &["admin_id", "name"],
            &[FilterDescriptor::contains("name", "bo")],
            &[SortDescriptor::asc("username")],
            &PaginationArgs::new(),
        );
        assert!(ok.is_ok());

        let err = kit
            .list_query(
                "admin",
                &[],
                &[FilterDescriptor::field("password", "x")],
                &[],
                &PaginationArgs::new(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            QueryKitError::Validation(ValidationError::FieldNotAllowed(_))
        ));
    }

    #[test]
    fn test_list_query_unchecked_table() {
        let kit = postgres_kit();
        let list = kit
            .list_query(
                "message",
                &[],
                &[FilterDescriptor::field("is_read", false)],
                &[],
                &PaginationArgs::new().with_size(5).with_page(2),
            )
            .unwrap();

        assert_eq!(
            list.data_sql,
            "SELECT * FROM message WHERE is_read = $1 LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            list.data_params,
            vec![
                FilterValue::Bool(false),
                FilterValue::Int(5),
                FilterValue::Int(5)
            ]
        );
    }

    #[test]
    fn test_list_query_json() {
        let kit = QueryKit::default();
        let list = kit
            .list_query_json(
                "notification",
                &["notification_id", "subject"],
                json!([{"field": "level", "operator": "IN", "value": "1, 2"}]),
                json!([{"field": "time_create", "direction": "desc"}]),
                json!({"page": 3}),
            )
            .unwrap();

        assert_eq!(
            list.data_sql,
            "SELECT notification_id, subject FROM notification WHERE level IN (?,?) ORDER BY time_create DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(list.pagination.offset, 20);
    }

    #[test]
    fn test_list_query_json_null_inputs() {
        let list = QueryKit::default()
            .list_query_json("message", &[], Value::Null, Value::Null, Value::Null)
            .unwrap();
        assert_eq!(list.data_sql, "SELECT * FROM message LIMIT ? OFFSET ?");
        assert_eq!(list.pagination, Pagination::default());
    }

    #[test]
    fn test_list_query_json_bad_input() {
        let result = QueryKit::default().list_query_json(
            "message",
            &[],
            json!("not a list"),
            Value::Null,
            Value::Null,
        );
        assert!(matches!(result, Err(QueryKitError::Input(_))));
    }

    #[test]
    fn test_page_info_uses_window() {
        let kit = QueryKit::new(QueryConfig::new("standard".to_string(), PageClamp::None, 2))
            .unwrap();
        let pagination = kit.pagination(&PaginationArgs::new().with_page(5));
        let info = kit.page_info(100, &pagination);
        assert_eq!(info.start_page, 3);
        assert_eq!(info.end_page, 7);
        assert_eq!(info.total_pages, 10);
    }

    #[test]
    fn test_page_info_from_extreme_json_page() {
        let kit = QueryKit::default();
        let list = kit
            .list_query_json(
                "message",
                &[],
                Value::Null,
                Value::Null,
                json!({"page": i64::MAX}),
            )
            .unwrap();
        assert_eq!(list.pagination.offset, i64::MAX);

        let info = kit.page_info(100, &list.pagination);
        assert_eq!(info.total_pages, 10);
        assert_eq!(info.next_page, i64::MAX);
        assert!(info.window_pages().is_empty());
    }
}
