//! Annotator display.
//!
//! Placeholder for the annotation widget: it shows which document and set are
//! active and the raw document content. Annotations themselves are not
//! modeled yet.

use crate::model::{AnnotationSet, Document};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatorView {
    pub document: Option<Document>,
    pub annotation_set: Option<AnnotationSet>,
}

impl AnnotatorView {
    pub fn new(document: Option<&Document>, annotation_set: Option<&AnnotationSet>) -> Self {
        Self {
            document: document.cloned(),
            annotation_set: annotation_set.cloned(),
        }
    }

    pub fn set_label(&self) -> &str {
        self.annotation_set
            .as_ref()
            .map(|set| set.name.as_str())
            .unwrap_or("None")
    }

    /// Plain-text rendering of the panel.
    pub fn render(&self) -> String {
        let Some(document) = &self.document else {
            return "No document selected.".to_string();
        };
        format!(
            "Displaying: {}\nCurrent Set: {}\n\n{}",
            document.name,
            self.set_label(),
            document.content
        )
    }
}
