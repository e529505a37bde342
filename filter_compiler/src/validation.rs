//! Identifier validation
//!
//! The compiler writes field names straight into SQL text. These types let a
//! caller check names against identifier rules and an explicit allow list
//! before they get that far.

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Validation errors for database identifiers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name contains invalid characters (only alphanumeric and underscore allowed)
    #[error("Invalid characters in name '{0}': only alphanumeric characters and underscores are allowed")]
    InvalidCharacters(String),
    /// Name is too long (PostgreSQL limit is 63 characters)
    #[error("Name '{name}' is too long: {length} characters (max {max_length})")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    /// Name is empty
    #[error("Name cannot be empty")]
    Empty,
    /// Name starts with invalid character (must start with letter or underscore)
    #[error("Name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),
    /// Name is a reserved SQL keyword
    #[error("Name '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
    /// Field is not on the caller's allow list
    #[error("Field '{0}' is not allowed in filters or sorts")]
    FieldNotAllowed(String),
}

/// PostgreSQL identifier length limit
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Length, first-character and character-set rules shared by table and field names
fn validate_identifier_shape(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    // Must start with letter or underscore
    let first_char = name.chars().next().ok_or(ValidationError::Empty)?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    Ok(())
}

/// Keywords that cannot appear unquoted as a column reference.
///
/// Type names and non-reserved words (`date`, `time`, `text`, `key`) are
/// ordinary column names in both PostgreSQL and MySQL.
fn is_reserved_column_keyword(name: &str) -> bool {
    const RESERVED_COLUMN_KEYWORDS: &[&str] = &[
        "ALL", "AND", "ANY", "AS", "ASC", "BETWEEN", "BOTH", "BY", "CASE", "CAST", "CHECK",
        "COLUMN", "CONSTRAINT", "CREATE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP",
        "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FOREIGN", "FROM", "GRANT",
        "GROUP", "HAVING", "IN", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "LIKE", "LIMIT",
        "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES", "SELECT",
        "TABLE", "THEN", "TO", "TRUE", "UNION", "UNIQUE", "UPDATE", "USING", "WHEN", "WHERE",
        "WITH",
    ];

    RESERVED_COLUMN_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

/// A validated table name that is safe to use in SQL queries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    /// Create a new validated table name
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Self::validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    /// Get the validated name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the validated name as a String
    pub fn into_string(self) -> String {
        self.0
    }

    /// Table names must also avoid every keyword and type name
    fn validate_identifier(name: &str) -> Result<(), ValidationError> {
        validate_identifier_shape(name)?;

        if Self::is_reserved_keyword(name) {
            return Err(ValidationError::ReservedKeyword(name.to_string()));
        }

        Ok(())
    }

    /// Check if a name is a reserved SQL keyword
    fn is_reserved_keyword(name: &str) -> bool {
        const RESERVED_KEYWORDS: &[&str] = &[
            // SQL Standard keywords
            "SELECT",
            "INSERT",
            "UPDATE",
            "DELETE",
            "FROM",
            "WHERE",
            "JOIN",
            "INNER",
            "LEFT",
            "RIGHT",
            "FULL",
            "OUTER",
            "ON",
            "AS",
            "AND",
            "OR",
            "NOT",
            "NULL",
            "TRUE",
            "FALSE",
            "CASE",
            "WHEN",
            "THEN",
            "ELSE",
            "END",
            "IF",
            "EXISTS",
            "IN",
            "LIKE",
            "BETWEEN",
            "ORDER",
            "BY",
            "GROUP",
            "HAVING",
            "LIMIT",
            "OFFSET",
            "UNION",
            "ALL",
            "DISTINCT",
            "COUNT",
            "SUM",
            "AVG",
            "MIN",
            "MAX",
            "CREATE",
            "DROP",
            "ALTER",
            "TABLE",
            "INDEX",
            "VIEW",
            "DATABASE",
            "SCHEMA",
            "PRIMARY",
            "KEY",
            "FOREIGN",
            "REFERENCES",
            "UNIQUE",
            "CHECK",
            "DEFAULT",
            "CONSTRAINT",
            "COLUMN",
            "ADD",
            "MODIFY",
            "RENAME",
            "TO",
            // PostgreSQL specific keywords
            "SERIAL",
            "BIGSERIAL",
            "SMALLSERIAL",
            "TEXT",
            "VARCHAR",
            "CHAR",
            "INTEGER",
            "BIGINT",
            "SMALLINT",
            "DECIMAL",
            "NUMERIC",
            "REAL",
            "DOUBLE",
            "PRECISION",
            "BOOLEAN",
            "DATE",
            "TIME",
            "TIMESTAMP",
            "TIMESTAMPTZ",
            "INTERVAL",
            "UUID",
            "JSON",
            "JSONB",
            "ARRAY",
            "RETURNING",
            "CONFLICT",
            "NOTHING",
            "EXCLUDED",
            "GENERATED",
            "ALWAYS",
            "STORED",
            "IDENTITY",
            "CYCLE",
            "RESTART",
            "CACHE",
            "OWNED",
            "SEQUENCE",
            "TRIGGER",
            "FUNCTION",
            "PROCEDURE",
            "LANGUAGE",
            "PLPGSQL",
            "SECURITY",
            "DEFINER",
            "INVOKER",
            "STABLE",
            "IMMUTABLE",
            "VOLATILE",
            "STRICT",
            "CALLED",
            "RETURNS",
            "DECLARE",
            "BEGIN",
            "EXCEPTION",
        ];

        RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
    }
}

impl fmt::Display for ValidatedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated field name that is safe to use in SQL queries.
///
/// Qualified names (`alias.column`) are accepted; each segment is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    /// Create a new validated field name
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }
        for segment in name.split('.') {
            validate_identifier_shape(segment)?;
            if is_reserved_column_keyword(segment) {
                return Err(ValidationError::ReservedKeyword(segment.to_string()));
            }
        }
        Ok(Self(name.to_string()))
    }

    /// Get the validated name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the validated name as a String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of field names a caller permits in filters and sorts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAllowList {
    fields: BTreeSet<ValidatedFieldName>,
}

impl FieldAllowList {
    /// Build an allow list; every name must be a valid identifier
    pub fn new<I, S>(fields: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .map(|field| ValidatedFieldName::new(field.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { fields })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|allowed| allowed.as_str() == field)
    }

    /// Fail with [`ValidationError::FieldNotAllowed`] unless `field` is listed
    pub fn check(&self, field: &str) -> Result<(), ValidationError> {
        if self.contains(field) {
            Ok(())
        } else {
            Err(ValidationError::FieldNotAllowed(field.to_string()))
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_names() {
        let valid_names = [
            "admin",
            "admin_level",
            "Notification",
            "_private_table",
            "message123",
            "a",
            &"a".repeat(63), // Max length
        ];

        for name in valid_names {
            assert!(
                ValidatedTableName::new(name).is_ok(),
                "Should accept valid name: {}",
                name
            );
        }
    }

    #[test]
    fn test_invalid_table_names() {
        let test_cases = [
            ("", ValidationError::Empty),
            (
                "123table",
                ValidationError::InvalidStartCharacter("123table".to_string()),
            ),
            (
                "admin-level",
                ValidationError::InvalidCharacters("admin-level".to_string()),
            ),
            (
                "admin level",
                ValidationError::InvalidCharacters("admin level".to_string()),
            ),
            (
                "SELECT",
                ValidationError::ReservedKeyword("SELECT".to_string()),
            ),
            (
                "select",
                ValidationError::ReservedKeyword("select".to_string()),
            ),
        ];

        for (name, expected_error) in test_cases {
            let result = ValidatedTableName::new(name);
            assert!(result.is_err(), "Should reject invalid name: {}", name);
            assert_eq!(result.unwrap_err(), expected_error);
        }
    }

    #[test]
    fn test_too_long_name() {
        let long_name = "a".repeat(64);
        let result = ValidatedTableName::new(&long_name);

        match result.unwrap_err() {
            ValidationError::TooLong {
                length, max_length, ..
            } => {
                assert_eq!(length, 64);
                assert_eq!(max_length, 63);
            }
            other => panic!("Expected TooLong error, got {:?}", other),
        }
    }

    #[test]
    fn test_field_name_validation() {
        assert!(ValidatedFieldName::new("admin_id").is_ok());
        assert!(ValidatedFieldName::new("a.name").is_ok());
        assert!(ValidatedFieldName::new("123field").is_err());
        assert!(ValidatedFieldName::new("SELECT").is_err());
        assert!(ValidatedFieldName::new("a.").is_err());
        assert!(ValidatedFieldName::new("").is_err());
    }

    #[test]
    fn test_sql_injection_rejected() {
        let malicious_names = [
            "name; DROP TABLE admin; --",
            "name' OR '1'='1",
            "name/**/UNION/**/SELECT",
            "name\"; DELETE FROM admin; --",
        ];

        for name in malicious_names {
            assert!(
                ValidatedFieldName::new(name).is_err(),
                "Should reject malicious name: {}",
                name
            );
        }
    }

    #[test]
    fn test_allow_list() {
        let allowed = FieldAllowList::new(["name", "email", "a.active"]).unwrap();
        assert_eq!(allowed.len(), 3);
        assert!(allowed.contains("email"));
        assert!(allowed.check("a.active").is_ok());
        assert_eq!(
            allowed.check("password"),
            Err(ValidationError::FieldNotAllowed("password".to_string()))
        );
    }

    #[test]
    fn test_allow_list_rejects_invalid_entries() {
        assert!(FieldAllowList::new(["name", "bad-name"]).is_err());
        assert!(FieldAllowList::new(Vec::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ValidationError::FieldNotAllowed("x".to_string()).to_string(),
            "Field 'x' is not allowed in filters or sorts"
        );
        assert_eq!(ValidationError::Empty.to_string(), "Name cannot be empty");
        assert_eq!(
            format!("{}", ValidatedTableName::new("admin").unwrap()),
            "admin"
        );
    }

    #[test]
    fn test_type_names_accepted_as_fields() {
        for name in ["date", "time", "text", "key", "timestamp", "uuid", "m.date"] {
            assert!(
                ValidatedFieldName::new(name).is_ok(),
                "Should accept column name: {}",
                name
            );
        }
        assert!(FieldAllowList::new(["date", "time"]).is_ok());

        // Still keywords for table names
        assert_eq!(
            ValidatedTableName::new("date"),
            Err(ValidationError::ReservedKeyword("date".to_string()))
        );
    }

    #[test]
    fn test_reserved_words_rejected_as_fields() {
        for name in ["select", "FROM", "order", "a.where", "null"] {
            assert!(
                matches!(
                    ValidatedFieldName::new(name),
                    Err(ValidationError::ReservedKeyword(_))
                ),
                "Should reject reserved word: {}",
                name
            );
        }
    }
}
