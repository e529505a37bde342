//! Statement assembly
//!
//! Combines compiled WHERE / ORDER BY fragments with a resolved pagination
//! window into the data and count statements a list view runs.

use filter_compiler::{
    CompiledQuery, Dialect, FilterValue, Pagination, ValidatedFieldName, ValidatedTableName,
    ValidationError,
};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use sqlx::{Database, Encode, Type};

/// Target table and selected columns of a list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStatement {
    table: ValidatedTableName,
    columns: Vec<ValidatedFieldName>,
}

/// Data and count statements with their positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// `SELECT <cols> FROM <table> [WHERE] [ORDER BY] LIMIT ? OFFSET ?`
    pub data_sql: String,
    /// WHERE params followed by limit and offset
    pub data_params: Vec<FilterValue>,
    /// `SELECT COUNT(*) FROM <table> [WHERE]`
    pub count_sql: String,
    /// WHERE params only
    pub count_params: Vec<FilterValue>,
    pub pagination: Pagination,
}

impl ListStatement {
    /// An empty column list (or `*`) selects every column
    pub fn new(table: &str, columns: &[&str]) -> Result<Self, ValidationError> {
        let table = ValidatedTableName::new(table)?;
        let columns = columns
            .iter()
            .filter(|column| **column != "*")
            .map(|column| ValidatedFieldName::new(column))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { table, columns })
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    fn select_list(&self) -> String {
        if self.columns.is_empty() {
            return "*".to_string();
        }
        self.columns
            .iter()
            .map(ValidatedFieldName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Assemble data and count statements.
    ///
    /// Placeholders are rebound for `dialect`, so Postgres-like output uses
    /// `$n` numbering with limit and offset last.
    pub fn build(
        &self,
        compiled: &CompiledQuery,
        pagination: &Pagination,
        dialect: Dialect,
    ) -> ListQuery {
        let mut count_parts = vec![format!("SELECT COUNT(*) FROM {}", self.table)];
        let mut data_parts = vec![format!("SELECT {} FROM {}", self.select_list(), self.table)];

        if compiled.has_where() {
            count_parts.push(compiled.where_clause.clone());
            data_parts.push(compiled.where_clause.clone());
        }
        if compiled.has_order() {
            data_parts.push(compiled.order_clause.clone());
        }
        data_parts.push("LIMIT ? OFFSET ?".to_string());

        let data_sql = dialect.rebind(&data_parts.join(" "));
        let count_sql = dialect.rebind(&count_parts.join(" "));

        let count_params = compiled.params.clone();
        let mut data_params = Vec::with_capacity(count_params.len() + 2);
        data_params.extend(count_params.iter().cloned());
        data_params.push(FilterValue::Int(pagination.limit));
        data_params.push(FilterValue::Int(pagination.offset));

        debug_log!("[LIST] Table: {}", self.table);
        debug_log!("[LIST] SQL: {}", data_sql);
        debug_log!("[LIST] WHERE params count: {}", count_params.len());

        ListQuery {
            data_sql,
            data_params,
            count_sql,
            count_params,
            pagination: *pagination,
        }
    }
}

impl ListQuery {
    /// Data statement with parameters bound, for a PostgreSQL pool.
    ///
    /// Parameters keep their [`FilterValue`] type, and PostgreSQL does not
    /// coerce a typed parameter. `Text` values, which include every `IN` /
    /// `NOT_IN` item, bind as `TEXT`, so comparing them with an integer
    /// column fails with `operator does not exist: integer = text`. Filter
    /// such columns with typed scalar values (`FilterValue::Int`), or on a
    /// table without an allow list, cast the column in the field name
    /// (`admin_level_id::text`).
    pub fn data_query(&self) -> Query<'_, Postgres, PgArguments> {
        bind_values(sqlx::query(&self.data_sql), &self.data_params)
    }

    /// Count statement with parameters bound, for a PostgreSQL pool.
    ///
    /// Binds the same way as [`ListQuery::data_query`].
    pub fn count_query(&self) -> Query<'_, Postgres, PgArguments> {
        bind_values(sqlx::query(&self.count_sql), &self.count_params)
    }
}

/// Bind values positionally onto a query, in order.
///
/// `Null` binds as a NULL text value; lists bind as their comma-joined text.
/// `Text` always binds as text, never as a number parsed out of it.
pub fn bind_values<'q, DB>(
    mut query: Query<'q, DB, <DB as Database>::Arguments<'q>>,
    values: &[FilterValue],
) -> Query<'q, DB, <DB as Database>::Arguments<'q>>
where
    DB: Database,
    String: Encode<'q, DB> + Type<DB>,
    Option<String>: Encode<'q, DB> + Type<DB>,
    i64: Encode<'q, DB> + Type<DB>,
    f64: Encode<'q, DB> + Type<DB>,
    bool: Encode<'q, DB> + Type<DB>,
{
    for value in values {
        query = match value {
            FilterValue::Null => query.bind(None::<String>),
            FilterValue::Bool(b) => query.bind(*b),
            FilterValue::Int(i) => query.bind(*i),
            FilterValue::Float(f) => query.bind(*f),
            FilterValue::Text(s) => query.bind(s.clone()),
            FilterValue::List(_) => query.bind(value.as_text()),
        };
    }
    query
}
