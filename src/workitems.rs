//! Work item access.
//!
//! A work item is a unit of queued input or output: a payload of named
//! variables plus attached files. The run reads its parameters from the
//! input item and hands the report over by creating an output item.
//!
//! [`FileWorkItemStore`] reads and writes the JSON layout used for local
//! work item files:
//!
//! ```json
//! [{"payload": {"search_phrase": "tax"}, "files": {"news_data.xlsx": "/output/news_data.xlsx"}}]
//! ```

use crate::error::{NewsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Environment variable naming the input work item file
pub const INPUT_PATH_ENV: &str = "RPA_INPUT_WORKITEM_PATH";
/// Environment variable naming the output work item file
pub const OUTPUT_PATH_ENV: &str = "RPA_OUTPUT_WORKITEM_PATH";

/// Source of run parameters and sink for the produced file
pub trait WorkItemStore: Send + Sync {
    /// Value of a variable from the input work item
    fn variable(&self, key: &str) -> Result<String>;

    /// Create an output work item with `attachment` attached to it
    fn create_output(&self, attachment: &Path) -> Result<()>;
}

/// One work item as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default)]
    pub payload: Map<String, Value>,

    /// Attachment name to file path
    #[serde(default)]
    pub files: BTreeMap<String, PathBuf>,
}

/// Work items backed by JSON files
#[derive(Debug)]
pub struct FileWorkItemStore {
    input: WorkItem,
    output_path: PathBuf,
}

impl FileWorkItemStore {
    /// Load the first work item of the input file
    pub fn open(input_path: impl AsRef<Path>, output_path: impl Into<PathBuf>) -> Result<Self> {
        let input_path = input_path.as_ref();
        let contents = std::fs::read_to_string(input_path).map_err(|e| {
            NewsError::ConfigurationMissing(format!(
                "input work item {} not found: {}",
                input_path.display(),
                e
            ))
        })?;

        let items: Vec<WorkItem> = serde_json::from_str(&contents).map_err(|e| {
            NewsError::ConfigurationMissing(format!(
                "input work item {} unreadable: {}",
                input_path.display(),
                e
            ))
        })?;

        let input = items.into_iter().next().ok_or_else(|| {
            NewsError::ConfigurationMissing(format!(
                "input work item file {} holds no items",
                input_path.display()
            ))
        })?;

        ::log::debug!(
            "Loaded input work item from {} with {} variables",
            input_path.display(),
            input.payload.len()
        );

        Ok(Self {
            input,
            output_path: output_path.into(),
        })
    }
}

impl WorkItemStore for FileWorkItemStore {
    fn variable(&self, key: &str) -> Result<String> {
        payload_variable(&self.input.payload, key)
    }

    fn create_output(&self, attachment: &Path) -> Result<()> {
        let item = output_item(attachment)?;
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.output_path, serde_json::to_string_pretty(&[item])?)?;

        ::log::info!(
            "Created output work item {} with attachment {}",
            self.output_path.display(),
            attachment.display()
        );
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryWorkItemStore {
    payload: Map<String, Value>,
    outputs: Mutex<Vec<WorkItem>>,
}

impl MemoryWorkItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// Output items created so far
    pub fn outputs(&self) -> Vec<WorkItem> {
        self.outputs
            .lock()
            .map(|outputs| outputs.clone())
            .unwrap_or_default()
    }
}

impl WorkItemStore for MemoryWorkItemStore {
    fn variable(&self, key: &str) -> Result<String> {
        payload_variable(&self.payload, key)
    }

    fn create_output(&self, attachment: &Path) -> Result<()> {
        let item = output_item(attachment)?;
        self.outputs
            .lock()
            .map_err(|_| NewsError::WorkItem("output list poisoned".to_string()))?
            .push(item);
        Ok(())
    }
}

/// Strings are returned as is, numbers and booleans in their JSON form
fn payload_variable(payload: &Map<String, Value>, key: &str) -> Result<String> {
    match payload.get(key) {
        None | Some(Value::Null) => Err(NewsError::ConfigurationMissing(format!(
            "work item variable `{}`",
            key
        ))),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(NewsError::ConfigurationInvalid {
            key: key.to_string(),
            value: other.to_string(),
        }),
    }
}

fn output_item(attachment: &Path) -> Result<WorkItem> {
    let name = attachment
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            NewsError::WorkItem(format!("attachment {} has no file name", attachment.display()))
        })?;

    let mut item = WorkItem::default();
    item.files.insert(name, attachment.to_path_buf());
    Ok(item)
}
