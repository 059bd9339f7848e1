use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Project,
    Global,
}

/// An uploaded text or markdown document.
///
/// Documents are never edited after upload: the only lifecycle events are
/// creation and removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Uploaded file name, display only. Duplicates are allowed.
    pub name: String,
    pub content: String,
}

impl Document {
    pub fn new(id: String, name: String, content: String) -> Self {
        Self { id, name, content }
    }
}

/// A named grouping of annotations that belongs to exactly one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSet {
    pub id: String,
    pub document_id: String,
    pub name: String,
}

impl AnnotationSet {
    pub fn new(id: String, document_id: String, name: String) -> Self {
        Self {
            id,
            document_id,
            name,
        }
    }
}

/// Selection pointers saved between CLI invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub selected_document_id: Option<String>,
    #[serde(default)]
    pub selected_set_id: Option<String>,
}
