//! SQL dialects
//!
//! The compiler only needs to know which case-insensitive substring operator a
//! database understands; the statement layer also uses the dialect to pick a
//! placeholder style.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Dialect {
    /// MySQL/MariaDB/SQLite style: `LIKE`, `?` placeholders
    #[default]
    Standard,
    /// PostgreSQL style: `ILIKE`, `$n` placeholders
    PostgresLike,
}

impl Dialect {
    /// Resolve a driver or dialect name. Anything mentioning `postgre` is Postgres-like.
    pub fn from_name(name: &str) -> Self {
        if name.to_ascii_lowercase().contains("postgre") {
            Dialect::PostgresLike
        } else {
            Dialect::Standard
        }
    }

    pub fn is_postgres_like(&self) -> bool {
        matches!(self, Dialect::PostgresLike)
    }

    /// Operator used for `CONTAINS` filters
    pub fn like_operator(&self) -> &'static str {
        match self {
            Dialect::Standard => "LIKE",
            Dialect::PostgresLike => "ILIKE",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Standard => "standard",
            Dialect::PostgresLike => "postgres",
        }
    }

    /// Rewrite `?` placeholders into the dialect's native form.
    ///
    /// Standard SQL is returned unchanged. For Postgres-like dialects each `?`
    /// outside a quoted segment becomes `$1`, `$2`, ... in order of appearance.
    pub fn rebind(&self, sql: &str) -> String {
        if !self.is_postgres_like() {
            return sql.to_string();
        }

        let mut out = String::with_capacity(sql.len() + 8);
        let mut counter = 1;
        let mut quote: Option<char> = None;

        for c in sql.chars() {
            match quote {
                Some(q) => {
                    if c == q {
                        quote = None;
                    }
                    out.push(c);
                }
                None => match c {
                    '\'' | '"' => {
                        quote = Some(c);
                        out.push(c);
                    }
                    '?' => {
                        out.push('$');
                        out.push_str(&counter.to_string());
                        counter += 1;
                    }
                    _ => out.push(c),
                },
            }
        }

        out
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<String> for Dialect {
    fn from(value: String) -> Self {
        Dialect::from_name(&value)
    }
}

impl From<&str> for Dialect {
    fn from(value: &str) -> Self {
        Dialect::from_name(value)
    }
}

impl From<Dialect> for String {
    fn from(value: Dialect) -> Self {
        value.name().to_string()
    }
}
