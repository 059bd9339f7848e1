use super::KeyValueStore;
use crate::error::{CraicError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl KeyValueStore for InMemoryStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CraicError::Store("Simulated write error".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::config::{DEFAULT_ANNOTATION_SETS_KEY, DEFAULT_DOCUMENTS_KEY};
    use crate::model::{AnnotationSet, Document};

    /// Seeds an [`InMemoryStore`] under the default keys.
    pub struct StoreFixture {
        pub store: InMemoryStore,
        documents: Vec<Document>,
        sets: Vec<AnnotationSet>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                documents: Vec::new(),
                sets: Vec::new(),
            }
        }

        pub fn with_document(mut self, id: &str, name: &str, content: &str) -> Self {
            self.documents
                .push(Document::new(id.into(), name.into(), content.into()));
            self.store.set(DEFAULT_DOCUMENTS_KEY, &self.documents).unwrap();
            self
        }

        pub fn with_documents(mut self, count: usize) -> Self {
            for _ in 0..count {
                let n = self.documents.len() + 1;
                self = self.with_document(
                    &format!("doc-{}", n),
                    &format!("doc-{}.md", n),
                    &format!("Content for document {}", n),
                );
            }
            self
        }

        pub fn with_set(mut self, id: &str, document_id: &str, name: &str) -> Self {
            self.sets
                .push(AnnotationSet::new(id.into(), document_id.into(), name.into()));
            self.store.set(DEFAULT_ANNOTATION_SETS_KEY, &self.sets).unwrap();
            self
        }

        pub fn build(self) -> InMemoryStore {
            self.store
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::model::Document;

    #[test]
    fn simulated_write_error_blocks_writes() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);

        let err = store.write_raw("documents", "[]").unwrap_err();
        assert!(matches!(err, CraicError::Store(_)));
        assert_eq!(store.read_raw("documents").unwrap(), None);

        store.set_simulate_write_error(false);
        store.write_raw("documents", "[]").unwrap();
        assert_eq!(store.keys(), vec!["documents"]);
    }

    #[test]
    fn fixture_seeds_default_keys() {
        let store = StoreFixture::new()
            .with_documents(2)
            .with_set("set-1", "doc-1", "Set 1")
            .build();

        let docs: Vec<Document> = store.get("documents", Vec::new()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].name, "doc-2.md");
        assert_eq!(store.keys(), vec!["annotationSets", "documents"]);
    }
}
