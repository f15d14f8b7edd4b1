//! DuckDB-backed table source
//!
//! Attaches PostgreSQL, MySQL, SQLite or DuckDB databases through DuckDB
//! extensions and samples rows of one table as documents.

use super::types::DocumentSource;
use crate::document::{value_from_json, Document, ExtJsonOptions, Value};
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate};
use duckdb::types::{TimeUnit, Value as DuckValue};
use duckdb::Connection;
use std::collections::VecDeque;
use std::path::Path;
use url::Url;

/// Kind of database behind a URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Mysql,
    Sqlite,
    Duckdb,
}

impl DatabaseKind {
    /// Split a URI into the database kind and the string DuckDB attaches
    ///
    /// Accepts `postgres://`, `postgresql://`, `mysql://`, `sqlite://path`,
    /// `duckdb://path`, or a bare file path with a known extension.
    pub fn parse_uri(uri: &str) -> Result<(Self, String)> {
        if uri.starts_with("postgres://") || uri.starts_with("postgresql://") {
            Url::parse(uri)?;
            return Ok((DatabaseKind::Postgres, uri.to_string()));
        }
        if uri.starts_with("mysql://") {
            Url::parse(uri)?;
            return Ok((DatabaseKind::Mysql, uri.to_string()));
        }
        if let Some(path) = uri.strip_prefix("sqlite://") {
            return Ok((DatabaseKind::Sqlite, path.to_string()));
        }
        if let Some(path) = uri.strip_prefix("duckdb://") {
            return Ok((DatabaseKind::Duckdb, path.to_string()));
        }

        let extension = Path::new(uri)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("sqlite" | "sqlite3" | "db") => Ok((DatabaseKind::Sqlite, uri.to_string())),
            Some("duckdb" | "ddb") => Ok((DatabaseKind::Duckdb, uri.to_string())),
            _ => Err(Error::invalid_value(
                "uri",
                format!("unsupported database URI '{uri}'"),
            )),
        }
    }

    fn extension(self) -> Option<&'static str> {
        match self {
            DatabaseKind::Postgres => Some("postgres"),
            DatabaseKind::Mysql => Some("mysql"),
            DatabaseKind::Sqlite => Some("sqlite"),
            DatabaseKind::Duckdb => None,
        }
    }

    fn attach_type(self) -> &'static str {
        match self {
            DatabaseKind::Postgres => "TYPE POSTGRES, READ_ONLY",
            DatabaseKind::Mysql => "TYPE MYSQL, READ_ONLY",
            DatabaseKind::Sqlite => "TYPE SQLITE, READ_ONLY",
            DatabaseKind::Duckdb => "READ_ONLY",
        }
    }
}

/// Rows of one table, sampled up front and handed out as documents
pub struct DatabaseSource {
    conn: Connection,
    kind: DatabaseKind,
    connection_string: String,
    rows: VecDeque<Document>,
}

impl DatabaseSource {
    /// Attach the database behind `uri`
    pub fn connect(uri: &str) -> Result<Self> {
        let (kind, connection_string) = DatabaseKind::parse_uri(uri)?;
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database(format!("Failed to create DuckDB connection: {e}")))?;

        let source = Self {
            conn,
            kind,
            connection_string,
            rows: VecDeque::new(),
        };
        source.attach()?;

        tracing::info!(
            kind = ?source.kind,
            connection = %source.connection_info(),
            "Attached database"
        );
        Ok(source)
    }

    fn attach(&self) -> Result<()> {
        if let Some(extension) = self.kind.extension() {
            self.conn
                .execute_batch(&format!("INSTALL {extension}; LOAD {extension};"))
                .map_err(|e| {
                    Error::database(format!("Failed to load {extension} extension: {e}"))
                })?;
        }

        let attach_sql = format!(
            "ATTACH '{}' AS source_db ({});",
            self.connection_string.replace('\'', "''"),
            self.kind.attach_type()
        );
        self.conn
            .execute_batch(&attach_sql)
            .map_err(|e| Error::database(format!("Failed to attach {:?}: {e}", self.kind)))
    }

    /// Tables (collections) in the attached database
    pub fn list_collections(&self) -> Result<Vec<String>> {
        let query = match self.kind {
            DatabaseKind::Postgres => {
                "SELECT table_schema || '.' || table_name AS full_name
                 FROM source_db.information_schema.tables
                 WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
                 ORDER BY table_schema, table_name"
            }
            DatabaseKind::Mysql => {
                "SELECT CONCAT(table_schema, '.', table_name) AS full_name
                 FROM source_db.information_schema.tables
                 WHERE table_schema NOT IN ('mysql', 'information_schema', 'performance_schema', 'sys')
                 ORDER BY table_schema, table_name"
            }
            DatabaseKind::Sqlite | DatabaseKind::Duckdb => {
                "SELECT table_name AS full_name
                 FROM information_schema.tables
                 WHERE table_catalog = 'source_db'
                 ORDER BY table_schema, table_name"
            }
        };

        let mut stmt = self
            .conn
            .prepare(query)
            .map_err(|e| Error::database(format!("Failed to prepare query: {e}")))?;

        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::database(format!("Failed to query tables: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::database(format!("Failed to read table name: {e}")))?;

        Ok(tables)
    }

    /// Load a sample of `collection` into the source
    ///
    /// A `sample_size` of zero reads every row.
    pub fn sample(&mut self, collection: &str, sample_size: usize) -> Result<usize> {
        let table = self.qualified_table(collection);
        let base = if sample_size == 0 {
            format!("SELECT * FROM {table}")
        } else {
            format!("SELECT * FROM {table} USING SAMPLE {sample_size} ROWS")
        };

        let columns = self.describe(&base)?;
        let projection = columns
            .iter()
            .map(|(name, nested)| {
                let ident = quote_ident(name);
                if *nested {
                    format!("to_json({ident})::VARCHAR AS {ident}")
                } else {
                    ident
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!("SELECT {projection} FROM ({base}) AS sampled");

        tracing::debug!("Executing query: {}", query);

        let mut stmt = self
            .conn
            .prepare(&query)
            .map_err(|e| Error::database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                (0..columns.len())
                    .map(|i| row.get::<_, DuckValue>(i))
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .map_err(|e| Error::database(format!("Failed to query {collection}: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::database(format!("Failed to read row: {e}")))?;

        let count = rows.len();
        for (ordinal, row) in rows.into_iter().enumerate() {
            let mut doc = Document::new();
            for ((name, nested), value) in columns.iter().zip(row) {
                let value = if *nested {
                    json_column_value(value)
                        .map_err(|e| Error::source_read(ordinal + 1, e.to_string()))?
                } else {
                    duckdb_value_to_document(value)
                };
                doc.insert(name.clone(), value);
            }
            self.rows.push_back(doc);
        }

        tracing::info!(collection, rows = count, "Sampled collection");
        Ok(count)
    }

    /// Column names of a query, flagged when the type is nested
    fn describe(&self, query: &str) -> Result<Vec<(String, bool)>> {
        let mut stmt = self
            .conn
            .prepare(&format!("DESCRIBE {query}"))
            .map_err(|e| Error::database(format!("Failed to describe query: {e}")))?;

        let columns = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let column_type: String = row.get(1)?;
                Ok((name, is_nested_type(&column_type)))
            })
            .map_err(|e| Error::database(format!("Failed to describe query: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::database(format!("Failed to read column: {e}")))?;

        Ok(columns)
    }

    fn qualified_table(&self, collection: &str) -> String {
        let mut parts: Vec<String> = vec!["source_db".to_string()];
        if !collection.contains('.') && self.kind == DatabaseKind::Postgres {
            parts.push("public".to_string());
        }
        parts.extend(collection.split('.').map(quote_ident));
        parts.join(".")
    }

    /// Database kind
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// Connection string with the password masked, for logging
    pub fn connection_info(&self) -> String {
        mask_password(&self.connection_string)
    }
}

impl DocumentSource for DatabaseSource {
    fn next_document(&mut self) -> Result<Option<Document>> {
        Ok(self.rows.pop_front())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn is_nested_type(column_type: &str) -> bool {
    let upper = column_type.to_uppercase();
    upper.ends_with(']')
        || upper.starts_with("STRUCT")
        || upper.starts_with("MAP")
        || upper.starts_with("UNION")
        || upper == "JSON"
}

fn mask_password(connection_string: &str) -> String {
    match Url::parse(connection_string) {
        Ok(mut url) if url.password().is_some() => {
            if url.set_password(Some("****")).is_ok() {
                url.to_string()
            } else {
                connection_string.to_string()
            }
        }
        _ => connection_string.to_string(),
    }
}

fn json_column_value(value: DuckValue) -> Result<Value> {
    match value {
        DuckValue::Text(text) => {
            let json: serde_json::Value = serde_json::from_str(&text)?;
            value_from_json(json, ExtJsonOptions::plain())
        }
        other => Ok(duckdb_value_to_document(other)),
    }
}

/// Convert a DuckDB value to a document value
pub(crate) fn duckdb_value_to_document(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Boolean(b),
        DuckValue::TinyInt(i) => Value::Int32(i32::from(i)),
        DuckValue::SmallInt(i) => Value::Int32(i32::from(i)),
        DuckValue::Int(i) => Value::Int32(i),
        DuckValue::UTinyInt(i) => Value::Int32(i32::from(i)),
        DuckValue::USmallInt(i) => Value::Int32(i32::from(i)),
        DuckValue::UInt(i) => Value::Int64(i64::from(i)),
        DuckValue::BigInt(i) => Value::Int64(i),
        DuckValue::UBigInt(i) => i64::try_from(i).map_or_else(
            |_| Value::Decimal128(i.to_string()),
            Value::Int64,
        ),
        DuckValue::HugeInt(i) => i64::try_from(i).map_or_else(
            |_| Value::Decimal128(i.to_string()),
            Value::Int64,
        ),
        DuckValue::Float(f) => Value::Double(f64::from(f)),
        DuckValue::Double(f) => Value::Double(f),
        DuckValue::Decimal(d) => Value::Decimal128(d.to_string()),
        DuckValue::Text(s) | DuckValue::Enum(s) => Value::String(s),
        DuckValue::Blob(bytes) => Value::Binary { subtype: 0, bytes },
        DuckValue::Timestamp(unit, t) => {
            let micros = match unit {
                TimeUnit::Second => t.saturating_mul(1_000_000),
                TimeUnit::Millisecond => t.saturating_mul(1_000),
                TimeUnit::Microsecond => t,
                TimeUnit::Nanosecond => t / 1_000,
            };
            DateTime::from_timestamp_micros(micros).map_or(Value::Int64(t), Value::DateTime)
        }
        DuckValue::Date32(d) => {
            // Days since epoch (719163 is the number of days from 1 CE to 1970-01-01)
            NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map_or(Value::Int32(d), |dt| Value::DateTime(dt.and_utc()))
        }
        DuckValue::Time64(_, t) => {
            // Microseconds since midnight
            let secs = t / 1_000_000;
            let micros = t % 1_000_000;
            Value::String(format!(
                "{:02}:{:02}:{:02}.{:06}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60,
                micros
            ))
        }
        DuckValue::List(items) | DuckValue::Array(items) => {
            Value::Array(items.into_iter().map(duckdb_value_to_document).collect())
        }
        _ => Value::Undefined,
    }
}
