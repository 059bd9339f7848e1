//! # Document Store
//!
//! Owns the persisted list of uploaded documents and the in-memory selection
//! pointer. Every mutation is read-modify-write against the backing
//! [`KeyValueStore`]: the list is re-read, changed, and written back whole.
//! The in-memory copy only changes after the write succeeds, so a failed
//! write leaves the store exactly as it was.
//!
//! Selection is deliberately loose: [`DocumentStore::select_document`] does
//! not check that the id exists, and [`DocumentStore::current_document`] is
//! simply `None` when it doesn't.

use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::Document;
use crate::store::KeyValueStore;

#[derive(Debug, Clone)]
pub struct DocumentStore {
    key: String,
    documents: Vec<Document>,
    selected_id: Option<String>,
}

impl DocumentStore {
    /// Load the document list stored under `key`. A missing key is an empty list.
    pub fn open<S: KeyValueStore>(kv: &S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let documents: Vec<Document> = kv.get(&key, Vec::new())?;
        tracing::debug!(key = %key, count = documents.len(), "loaded documents");
        Ok(Self {
            key,
            documents,
            selected_id: None,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The first document whose id matches the selection.
    pub fn current_document(&self) -> Option<&Document> {
        let selected = self.selected_id.as_deref()?;
        self.find(selected)
    }

    pub fn find(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Re-read the persisted list, picking up writes made through other handles.
    pub fn refresh<S: KeyValueStore>(&mut self, kv: &S) -> Result<()> {
        self.documents = kv.get(&self.key, Vec::new())?;
        Ok(())
    }

    /// Append a new document and select it.
    pub fn add_document<S, G>(
        &mut self,
        kv: &mut S,
        ids: &mut G,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Document>
    where
        S: KeyValueStore,
        G: IdGenerator,
    {
        let document = Document::new(ids.next_id(), name.into(), content.into());

        let mut documents: Vec<Document> = kv.get(&self.key, Vec::new())?;
        documents.push(document.clone());
        kv.set(&self.key, &documents)?;

        self.documents = documents;
        self.selected_id = Some(document.id.clone());
        tracing::info!(id = %document.id, name = %document.name, "added document");
        Ok(document)
    }

    /// Remove the document with `id`, clearing the selection if it pointed there.
    ///
    /// Annotation sets that reference the document are left alone.
    /// Returns the removed document, or `None` if no document had that id.
    pub fn remove_document<S: KeyValueStore>(
        &mut self,
        kv: &mut S,
        id: &str,
    ) -> Result<Option<Document>> {
        let mut documents: Vec<Document> = kv.get(&self.key, Vec::new())?;
        let removed = documents.iter().find(|doc| doc.id == id).cloned();

        if removed.is_some() {
            documents.retain(|doc| doc.id != id);
            kv.set(&self.key, &documents)?;
            tracing::info!(id, "removed document");
        }
        self.documents = documents;

        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        Ok(removed)
    }

    pub fn select_document(&mut self, id: Option<&str>) {
        self.selected_id = id.map(str::to_string);
    }
}
