//! Persistence capability consumed by the interpreter.
//!
//! `EntityStore` is the narrow seam each action handler talks to; the
//! table-driven `SqliteStore` is the only in-repo implementation. Rows
//! surface as JSON objects so handlers and renderers never touch SQL types.

use crate::core::db::now_epoch_z;
use crate::core::error::TallerError;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex, MutexGuard};
use ulid::Ulid;

/// One persisted row, keyed by column name in table order.
pub type Record = serde_json::Map<String, JsonValue>;

/// Per-entity persistence capability.
pub trait EntityStore: Send + Sync {
    fn find_all(&self) -> Result<Vec<Record>, TallerError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Record>, TallerError>;
    /// All rows whose `column` equals `value`. `column` must be a declared
    /// column of the table; callers pass schema constants, never user input.
    fn find_by_field(&self, column: &str, value: &str) -> Result<Vec<Record>, TallerError>;
    /// Inserts a row; returns the new id. Unknown columns are dropped.
    fn create(&self, fields: &[(String, JsonValue)]) -> Result<i64, TallerError>;
    /// Returns false when no row has `id`.
    fn update(&self, id: i64, fields: &[(String, JsonValue)]) -> Result<bool, TallerError>;
    fn delete(&self, id: i64) -> Result<bool, TallerError>;
    fn count(&self) -> Result<i64, TallerError>;
    fn count_by_field(&self, column: &str, value: &str) -> Result<i64, TallerError>;
    /// Prefix for generated business codes, when the entity carries one.
    fn code_prefix(&self) -> Option<&'static str> {
        None
    }
    /// A fresh business code (`CIT-…`, `ORD-…`), or `None` for entities
    /// without one.
    fn generate_code(&self) -> Option<String> {
        self.code_prefix().map(|p| format!("{}-{}", p, Ulid::new()))
    }
}

/// Generic SQLite-backed store over one table and its writable columns.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    table: &'static str,
    columns: &'static [&'static str],
    code_prefix: Option<&'static str>,
}

impl SqliteStore {
    pub fn new(
        conn: Arc<Mutex<Connection>>,
        table: &'static str,
        columns: &'static [&'static str],
        code_prefix: Option<&'static str>,
    ) -> SqliteStore {
        SqliteStore {
            conn,
            table,
            columns,
            code_prefix,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, TallerError> {
        self.conn
            .lock()
            .map_err(|_| TallerError::Internal("conexión a base de datos envenenada".into()))
    }

    fn query_records(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Record>, TallerError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
            let mut record = Record::new();
            for (i, name) in names.iter().enumerate() {
                let value: SqlValue = row.get(i)?;
                record.insert(name.clone(), sql_to_json(value));
            }
            Ok(record)
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn retained<'a>(
        &self,
        fields: &'a [(String, JsonValue)],
    ) -> Vec<(&'a str, SqlValue)> {
        fields
            .iter()
            .filter(|(name, _)| name != "id" && self.columns.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), json_to_sql(value)))
            .collect()
    }
}

impl EntityStore for SqliteStore {
    fn find_all(&self) -> Result<Vec<Record>, TallerError> {
        self.query_records(&format!("SELECT * FROM {}", self.table), &[])
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Record>, TallerError> {
        let mut rows = self.query_records(
            &format!("SELECT * FROM {} WHERE id = ?1", self.table),
            &[SqlValue::Integer(id)],
        )?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    fn find_by_field(&self, column: &str, value: &str) -> Result<Vec<Record>, TallerError> {
        self.query_records(
            &format!("SELECT * FROM {} WHERE {} = ?1", self.table, column),
            &[SqlValue::Text(value.to_string())],
        )
    }

    fn create(&self, fields: &[(String, JsonValue)]) -> Result<i64, TallerError> {
        let retained = self.retained(fields);
        if retained.is_empty() {
            return Err(TallerError::Validation(
                "sin campos válidos para crear".into(),
            ));
        }
        let columns: Vec<&str> = retained.iter().map(|(n, _)| *n).collect();
        let placeholders: Vec<String> =
            (1..=retained.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );
        let conn = self.lock()?;
        conn.execute(
            &sql,
            params_from_iter(retained.iter().map(|(_, v)| v)),
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, id: i64, fields: &[(String, JsonValue)]) -> Result<bool, TallerError> {
        let retained = self.retained(fields);
        if retained.is_empty() {
            return Ok(false);
        }
        let assignments: Vec<String> = retained
            .iter()
            .enumerate()
            .map(|(i, (n, _))| format!("{} = ?{}", n, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            self.table,
            assignments.join(", "),
            retained.len() + 1
        );
        let mut args: Vec<SqlValue> = retained.into_iter().map(|(_, v)| v).collect();
        args.push(SqlValue::Integer(id));
        let conn = self.lock()?;
        let affected = conn.execute(&sql, params_from_iter(args.iter()))?;
        Ok(affected > 0)
    }

    fn delete(&self, id: i64) -> Result<bool, TallerError> {
        let conn = self.lock()?;
        let affected = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.table),
            [id],
        )?;
        Ok(affected > 0)
    }

    fn count(&self) -> Result<i64, TallerError> {
        let conn = self.lock()?;
        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn count_by_field(&self, column: &str, value: &str) -> Result<i64, TallerError> {
        let conn = self.lock()?;
        let total: Option<i64> = conn
            .query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {} = ?1",
                    self.table, column
                ),
                [value],
                |row| row.get(0),
            )
            .optional()?;
        Ok(total.unwrap_or(0))
    }

    fn code_prefix(&self) -> Option<&'static str> {
        self.code_prefix
    }
}

fn sql_to_json(value: SqlValue) -> JsonValue {
    match value {
        SqlValue::Null => JsonValue::Null,
        SqlValue::Integer(i) => JsonValue::from(i),
        SqlValue::Real(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        SqlValue::Text(s) => JsonValue::String(s),
        SqlValue::Blob(_) => JsonValue::Null,
    }
}

fn json_to_sql(value: &JsonValue) -> SqlValue {
    match value {
        JsonValue::Null => SqlValue::Null,
        JsonValue::Bool(b) => SqlValue::Integer(*b as i64),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Integer(i)
            } else {
                SqlValue::Real(n.as_f64().unwrap_or(0.0))
            }
        }
        JsonValue::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Audit timestamp pair for freshly written rows.
pub fn audit_timestamps() -> [(String, JsonValue); 2] {
    let now = now_epoch_z();
    [
        ("created_at".to_string(), JsonValue::from(now.clone())),
        ("updated_at".to_string(), JsonValue::from(now)),
    ]
}
