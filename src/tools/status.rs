//! Labeler Status Tool
//!
//! Runtime status of the labeler service and the usage guide handed to
//! assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::Database;
use crate::models::LabelRecord;

/// Label building instructions for AI assistants
pub const LABEL_INSTRUCTIONS: &str = r#"
# Nutrition Labeler Instructions

This guide explains how to build, save and export nutrition facts labels.

## Overview

A label is a JSON snapshot with four parts:
1. **Nutrition fields** - product name, serving info and nutrient amounts (top level keys)
2. **textStyle** - font sizes, font family and text color
3. **labelText** - title and daily value footnote
4. **otherStyles** - display toggles

Amounts are strings exactly as printed on the package. Blank or non-numeric
amounts render as 0 and are never rewritten.

## Nutrient Keys and Units

| Key | Unit | Daily Value |
|-----|------|-------------|
| totalFat | g | 78 |
| saturatedFat | g | 20 |
| transFat | g | - |
| polyunsaturatedFat | g | - |
| monounsaturatedFat | g | - |
| cholesterol | mg | 300 |
| sodium | mg | 2300 |
| totalCarbs | g | 275 |
| dietaryFiber | g | 28 |
| totalSugars | g | - |
| addedSugars | g | 50 |
| sugarAlcohol | g | - |
| protein | g | 50 |
| vitaminD | mcg | 20 |
| calcium | mg | 1300 |
| iron | mg | 18 |
| potassium | mg | 4700 |

% Daily Value = amount / daily value x 100, rounded to one decimal.

## Formats

| Format | Width | Heading | Calories |
|--------|-------|---------|----------|
| vertical | 300px | 40px | 30px |
| horizontal | 800px | 35px | 25px |
| linear | 500px | 30px | 14px |

Switching format resets width, heading size and calories size to that
format's defaults. Other style choices are kept.

## Workflow

1. `preview_label(state, format)` to see the resolved label
2. `edit_label(session, action, field, value, unit)` for step by step edits
   - actions: set_format, reset, set_width, set_font_size, set_font_family,
     set_color, set_title, set_footnote, set_field, toggle, set_option, set_units
3. `save_label(state)` to store the snapshot
4. `export_label(label_id, export_format: "png" | "jpg" | "pdf")` to write a file

## Units

Widths accept px, in, cm, mm and pt (96 px per inch). Font sizes accept px
and pt (1pt = 4/3 px). Widths are clamped to 200-1000px.

## Display Toggles

| Toggle | Effect |
|--------|--------|
| productName | Show the product name line |
| showCalories | Show the calories row |
| compactVitamin | Two-column micronutrient grid |
| justifyFootText | Justify the footnote |
| showUnsaturatedFats | Poly/monounsaturated fat rows |
| showSugarAlcohols | Sugar alcohol row |
| showProteinPercent | % DV for protein |
| shortenFootNote | Short footnote text |
"#;

/// Runtime status of the labeler service
#[derive(Debug, Clone, Serialize)]
pub struct LabelerStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub saved_labels: Option<i64>,

    pub export_dir: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    export_dir: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, export_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            export_dir,
        }
    }

    /// Get the current status
    pub fn get_status(&self, db: &Database) -> LabelerStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());
        let saved_labels = db.with_conn(|conn| LabelRecord::count(conn)).ok();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        LabelerStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            saved_labels,
            export_dir: self.export_dir.display().to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_status_reports_label_count() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();

        let tracker = StatusTracker::new(PathBuf::from("missing.db"), PathBuf::from("exports"));
        let status = tracker.get_status(&db);
        assert_eq!(status.saved_labels, Some(0));
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.export_dir, "exports");
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_instructions_cover_every_format() {
        for format in ["vertical", "horizontal", "linear"] {
            assert!(LABEL_INSTRUCTIONS.contains(format));
        }
    }
}
