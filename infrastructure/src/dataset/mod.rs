//! Dataset and report files
//!
//! Datasets are JSON, either `{"calls": [...]}` or a bare array of records
//! `{id?, customer_input, type}`. Reports are written as pretty-printed JSON.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use triage_application::{EvaluationItem, EvaluationReport};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Wrapped { calls: Vec<DatasetRecord> },
    Bare(Vec<DatasetRecord>),
}

#[derive(Deserialize)]
struct DatasetRecord {
    #[serde(default)]
    id: Option<RecordId>,
    customer_input: String,
    #[serde(rename = "type")]
    ground_truth: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    fn into_string(self) -> String {
        match self {
            RecordId::Text(s) => s,
            RecordId::Number(n) => n.to_string(),
        }
    }
}

/// Parse dataset JSON already in memory
pub fn parse_dataset(json: &str) -> Result<Vec<EvaluationItem>, serde_json::Error> {
    let records = match serde_json::from_str::<DatasetFile>(json)? {
        DatasetFile::Wrapped { calls } => calls,
        DatasetFile::Bare(records) => records,
    };

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record
                .id
                .map(RecordId::into_string)
                .unwrap_or_else(|| (index + 1).to_string());
            EvaluationItem::new(id, record.customer_input, record.ground_truth)
        })
        .collect())
}

pub fn load_dataset(path: &Path) -> Result<Vec<EvaluationItem>, DatasetError> {
    let json = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(&json).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `report` as pretty JSON, creating parent directories as needed
pub fn save_report(report: &EvaluationReport, path: &Path) -> Result<(), DatasetError> {
    let json = serde_json::to_string_pretty(report).map_err(DatasetError::Serialize)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DatasetError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_report(path: &Path) -> Result<EvaluationReport, DatasetError> {
    let json = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
