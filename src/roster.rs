use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

pub const PASS_THRESHOLD: f64 = 5.0;

/// Pass/fail verdict derived from a student's average. Pure and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }
}

pub fn classify(average: f64) -> Status {
    if average >= PASS_THRESHOLD {
        Status::Passed
    } else {
        Status::Failed
    }
}

/// One roster row. The two derived fields (`media`, `status`) are computed
/// once at load time; rows are immutable afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: String,
    pub class_label: String,
    pub ea: f64,
    pub ec: f64,
    pub ed: f64,
    pub media: f64,
    pub status: Status,
}

impl Student {
    pub fn probe(&self, probe: Probe) -> f64 {
        match probe {
            Probe::Ea => self.ea,
            Probe::Ec => self.ec,
            Probe::Ed => self.ed,
        }
    }
}

/// The three named assessment scores carried per student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Probe {
    Ea,
    Ec,
    Ed,
}

impl Probe {
    pub const ALL: [Probe; 3] = [Probe::Ea, Probe::Ec, Probe::Ed];

    pub fn as_str(self) -> &'static str {
        match self {
            Probe::Ea => "Ea",
            Probe::Ec => "Ec",
            Probe::Ed => "Ed",
        }
    }

    pub fn parse(s: &str) -> Option<Probe> {
        match s {
            "Ea" => Some(Probe::Ea),
            "Ec" => Some(Probe::Ec),
            "Ed" => Some(Probe::Ed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LoadError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// A loaded roster. `dataset_id` changes on every (re)load so the front end
/// can detect stale views.
#[derive(Debug, Clone)]
pub struct Roster {
    pub dataset_id: Uuid,
    pub students: Vec<Student>,
}

struct ColumnMap {
    name: Option<usize>,
    class: usize,
    ea: usize,
    ec: usize,
    ed: usize,
    media: Option<usize>,
}

fn map_columns(headers: &csv::StringRecord) -> Result<ColumnMap, LoadError> {
    let find = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    };

    let mut missing: Vec<&str> = Vec::new();
    let class = find("Clasa");
    let ea = find("Ea");
    let ec = find("Ec");
    let ed = find("Ed");
    for (col, name) in [(class, "Clasa"), (ea, "Ea"), (ec, "Ec"), (ed, "Ed")] {
        if col.is_none() {
            missing.push(name);
        }
    }
    if !missing.is_empty() {
        return Err(
            LoadError::new("invalid_input", "missing required columns")
                .with_details(json!({ "missing": missing })),
        );
    }

    Ok(ColumnMap {
        name: find("Nume"),
        class: class.unwrap_or(0),
        ea: ea.unwrap_or(0),
        ec: ec.unwrap_or(0),
        ed: ed.unwrap_or(0),
        media: find("Media"),
    })
}

fn numeric_cell(record: &csv::StringRecord, col: usize, name: &str, row: usize) -> Result<f64, LoadError> {
    let raw = record.get(col).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| {
        LoadError::new("invalid_input", format!("non-numeric value in column {}", name))
            .with_details(json!({ "column": name, "row": row, "value": raw }))
    })
}

pub fn load_csv_reader<R: Read>(reader: R) -> Result<Roster, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| LoadError::new("invalid_input", e.to_string()))?
        .clone();
    let cols = map_columns(&headers)?;

    let mut students: Vec<Student> = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| {
            LoadError::new("invalid_input", e.to_string()).with_details(json!({ "row": i + 1 }))
        })?;
        let row = i + 1;

        let ea = numeric_cell(&record, cols.ea, "Ea", row)?;
        let ec = numeric_cell(&record, cols.ec, "Ec", row)?;
        let ed = numeric_cell(&record, cols.ed, "Ed", row)?;
        // Use the precomputed average when the workbook carries one.
        let media = match cols.media {
            Some(col) if !record.get(col).unwrap_or("").trim().is_empty() => {
                numeric_cell(&record, col, "Media", row)?
            }
            _ => (ea + ec + ed) / 3.0,
        };

        students.push(Student {
            name: cols
                .name
                .and_then(|c| record.get(c))
                .unwrap_or("")
                .to_string(),
            class_label: record.get(cols.class).unwrap_or("").to_string(),
            ea,
            ec,
            ed,
            media,
            status: classify(media),
        });
    }

    Ok(Roster {
        dataset_id: Uuid::new_v4(),
        students,
    })
}

pub fn load_csv_file(path: &Path) -> Result<Roster, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| {
        LoadError::new("file_open_failed", e.to_string())
            .with_details(json!({ "path": path.to_string_lossy() }))
    })?;
    load_csv_reader(file)
}

impl Roster {
    /// Distinct class labels, ascending.
    pub fn classes(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.students.iter().map(|s| s.class_label.as_str()).collect();
        set.into_iter().map(|s| s.to_string()).collect()
    }

    /// Borrowed view filtered by class label; `None` keeps every row.
    /// Recomputed fully per call, nothing cached.
    pub fn filtered(&self, class: Option<&str>) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| class.map(|c| s.class_label == c).unwrap_or(true))
            .collect()
    }
}
