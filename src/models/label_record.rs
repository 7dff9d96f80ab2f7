//! Saved label model
//!
//! A saved label is an immutable snapshot: it can be created, read and
//! deleted, never updated.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::LabelState;
use crate::db::{DbError, DbResult};

/// Name used when the product name is blank
pub const UNTITLED_LABEL: &str = "Untitled Label";

/// A persisted label snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRecord {
    pub id: i64,
    pub name: String,
    /// JSON snapshot of the label state
    pub data: String,
    pub created_at: String,
}

/// Listing entry without the snapshot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSummary {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// Record name for a snapshot
pub fn label_name(state: &LabelState) -> String {
    let name = state.nutrition.product_name.trim();
    if name.is_empty() {
        UNTITLED_LABEL.to_string()
    } else {
        name.to_string()
    }
}

impl LabelRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            data: row.get("data")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Parse the stored snapshot
    pub fn state(&self) -> DbResult<LabelState> {
        Ok(LabelState::from_json(&self.data)?)
    }

    pub fn summary(&self) -> LabelSummary {
        LabelSummary {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at.clone(),
        }
    }

    /// Save a snapshot as a new record
    pub fn create(conn: &Connection, state: &LabelState) -> DbResult<Self> {
        let data = state.to_json()?;
        conn.execute(
            "INSERT INTO labels (name, data) VALUES (?1, ?2)",
            params![label_name(state), data],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a label by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM labels WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List labels, newest first
    pub fn list(conn: &Connection, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM labels
            ORDER BY created_at DESC, id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )?;

        let records = stmt
            .query_map([limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM labels", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a label. Returns whether a row was removed.
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM labels WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn state(product: &str, sodium: &str) -> LabelState {
        let mut state = LabelState::default();
        state.nutrition.product_name = product.to_string();
        state.nutrition.sodium = sodium.to_string();
        state
    }

    #[test]
    fn test_create_and_get() {
        let conn = test_conn();
        let saved = LabelRecord::create(&conn, &state("  Granola ", "140")).unwrap();
        assert_eq!(saved.name, "Granola");

        let loaded = LabelRecord::get_by_id(&conn, saved.id).unwrap().unwrap();
        assert_eq!(loaded.data, saved.data);
        let restored = loaded.state().unwrap();
        assert_eq!(restored.nutrition.sodium, "140");
        assert_eq!(restored.nutrition.product_name, "  Granola ");
    }

    #[test]
    fn test_blank_product_name_is_untitled() {
        let conn = test_conn();
        let saved = LabelRecord::create(&conn, &state("   ", "")).unwrap();
        assert_eq!(saved.name, UNTITLED_LABEL);
    }

    #[test]
    fn test_missing_label() {
        let conn = test_conn();
        assert!(LabelRecord::get_by_id(&conn, 42).unwrap().is_none());
        assert!(!LabelRecord::delete(&conn, 42).unwrap());
    }

    #[test]
    fn test_list_newest_first_and_delete() {
        let conn = test_conn();
        let first = LabelRecord::create(&conn, &state("First", "1")).unwrap();
        let second = LabelRecord::create(&conn, &state("Second", "2")).unwrap();
        conn.execute(
            "UPDATE labels SET created_at = '2020-01-01 00:00:00' WHERE id = ?1",
            [first.id],
        )
        .unwrap();

        let names: Vec<String> = LabelRecord::list(&conn, 10, 0)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
        assert_eq!(LabelRecord::count(&conn).unwrap(), 2);

        assert!(LabelRecord::delete(&conn, second.id).unwrap());
        assert_eq!(LabelRecord::count(&conn).unwrap(), 1);
        assert!(LabelRecord::get_by_id(&conn, second.id).unwrap().is_none());
    }

    #[test]
    fn test_same_timestamp_orders_by_id() {
        let conn = test_conn();
        let a = LabelRecord::create(&conn, &state("A", "")).unwrap();
        let b = LabelRecord::create(&conn, &state("B", "")).unwrap();
        conn.execute("UPDATE labels SET created_at = '2024-05-01 12:00:00'", [])
            .unwrap();
        let ids: Vec<i64> = LabelRecord::list(&conn, 10, 0).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let conn = test_conn();
        conn.execute("INSERT INTO labels (name, data) VALUES ('bad', 'not json')", [])
            .unwrap();
        let record = LabelRecord::get_by_id(&conn, conn.last_insert_rowid()).unwrap().unwrap();
        assert!(matches!(record.state(), Err(DbError::Json(_))));
    }
}
