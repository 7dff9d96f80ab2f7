//! Saved label tools
//!
//! Save, fetch, list and delete label snapshots.

use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::models::{LabelRecord, LabelState, LabelSummary};

/// Response for save_label
#[derive(Debug, Serialize)]
pub struct SaveLabelResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// Full saved label with its parsed snapshot
#[derive(Debug, Serialize)]
pub struct LabelDetail {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub data: LabelState,
}

/// Response for list_labels
#[derive(Debug, Serialize)]
pub struct ListLabelsResponse {
    pub labels: Vec<LabelSummary>,
    pub count: usize,
    pub total: i64,
}

/// Response for delete_label
#[derive(Debug, Serialize)]
pub struct DeleteLabelResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

/// Parse a snapshot sent by a client. Missing keys take their defaults.
pub fn parse_state(value: serde_json::Value) -> Result<LabelState, String> {
    serde_json::from_value(value).map_err(|e| format!("Invalid label data: {}", e))
}

/// Save a label snapshot
pub fn save_label(db: &Database, state: &LabelState) -> Result<SaveLabelResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let record = LabelRecord::create(&conn, state)
        .map_err(|e| format!("Failed to save label: {}", e))?;
    info!(id = record.id, name = %record.name, "saved label");

    Ok(SaveLabelResponse {
        id: record.id,
        name: record.name,
        created_at: record.created_at,
    })
}

/// Load a saved label's snapshot
pub fn load_label_state(db: &Database, id: i64) -> Result<Option<(LabelRecord, LabelState)>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let record = LabelRecord::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get label: {}", e))?;

    match record {
        Some(record) => {
            let state = record
                .state()
                .map_err(|e| format!("Saved label {} is unreadable: {}", id, e))?;
            Ok(Some((record, state)))
        }
        None => Ok(None),
    }
}

/// Get a saved label by ID
pub fn get_label(db: &Database, id: i64) -> Result<Option<LabelDetail>, String> {
    Ok(load_label_state(db, id)?.map(|(record, data)| LabelDetail {
        id: record.id,
        name: record.name,
        created_at: record.created_at,
        data,
    }))
}

/// List saved labels, newest first
pub fn list_labels(db: &Database, limit: i64, offset: i64) -> Result<ListLabelsResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let records = LabelRecord::list(&conn, limit, offset)
        .map_err(|e| format!("Failed to list labels: {}", e))?;
    let total = LabelRecord::count(&conn).map_err(|e| format!("Failed to count labels: {}", e))?;

    let labels: Vec<LabelSummary> = records.iter().map(LabelRecord::summary).collect();
    let count = labels.len();

    Ok(ListLabelsResponse { labels, count, total })
}

/// Delete a saved label
pub fn delete_label(db: &Database, id: i64) -> Result<DeleteLabelResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = LabelRecord::delete(&conn, id)
        .map_err(|e| format!("Failed to delete label: {}", e))?;

    if deleted {
        info!(id, "deleted label");
        Ok(DeleteLabelResponse {
            success: true,
            id,
            message: "Label deleted".to_string(),
        })
    } else {
        Ok(DeleteLabelResponse {
            success: false,
            id,
            message: format!("Label not found with id: {}", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use serde_json::json;

    fn test_db() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_save_get_delete() {
        let db = test_db();
        let state = parse_state(json!({"productName": "Trail Mix", "protein": "6"})).unwrap();

        let saved = save_label(&db, &state).unwrap();
        assert_eq!(saved.name, "Trail Mix");

        let detail = get_label(&db, saved.id).unwrap().unwrap();
        assert_eq!(detail.data.nutrition.protein, "6");
        assert!(detail.data.other_styles.show_calories);

        let deleted = delete_label(&db, saved.id).unwrap();
        assert!(deleted.success);
        assert!(get_label(&db, saved.id).unwrap().is_none());

        let again = delete_label(&db, saved.id).unwrap();
        assert!(!again.success);
    }

    #[test]
    fn test_list_labels() {
        let db = test_db();
        for name in ["One", "Two", "Three"] {
            let state = parse_state(json!({ "productName": name })).unwrap();
            save_label(&db, &state).unwrap();
        }

        let page = list_labels(&db, 2, 0).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.labels[0].name, "Three");

        let rest = list_labels(&db, 2, 2).unwrap();
        assert_eq!(rest.count, 1);
        assert_eq!(rest.labels[0].name, "One");
    }

    #[test]
    fn test_parse_state_rejects_wrong_types() {
        assert!(parse_state(json!({"otherStyles": {"showCalories": "yes"}})).is_err());
        assert!(parse_state(json!([1, 2, 3])).is_err());
    }
}
