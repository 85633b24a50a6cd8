//! Domain DTOs for the taskboard API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//! `UpdateTask` skips `None` fields during serialization so partial updates
//! put exactly the touched fields on the wire — a completion toggle sends
//! only `{"completed": ...}`, an edit-save only title and description.

use serde::{Deserialize, Serialize};

/// A single task returned by the API. The id is server-assigned and
/// immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Request payload for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating an existing task. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTask {
    /// Payload for flipping the completion flag, leaving text fields alone.
    pub fn toggle(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Payload for saving an edited title and description, leaving the
    /// completion flag alone.
    pub fn edit(title: String, description: String) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            completed: None,
        }
    }
}
