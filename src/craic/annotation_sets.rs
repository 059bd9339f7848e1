//! # Annotation Set Store
//!
//! Every annotation set lives in one global persisted list, tagged with the
//! id of the document it belongs to. The store views that list through a
//! document context (`set_document`): [`AnnotationSetStore::annotation_sets`]
//! only returns the sets of the context document.
//!
//! The selection pointer is scoped to that view. After every mutation and
//! every context change the store re-checks it, and a selected id that is no
//! longer in the view is cleared. This covers removal of the selected set,
//! switching documents, and selecting an id that belongs elsewhere.

use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::AnnotationSet;
use crate::store::KeyValueStore;

#[derive(Debug, Clone)]
pub struct AnnotationSetStore {
    key: String,
    sets: Vec<AnnotationSet>,
    document_id: Option<String>,
    selected_id: Option<String>,
}

impl AnnotationSetStore {
    pub fn open<S: KeyValueStore>(
        kv: &S,
        key: impl Into<String>,
        document_id: Option<&str>,
    ) -> Result<Self> {
        let key = key.into();
        let sets: Vec<AnnotationSet> = kv.get(&key, Vec::new())?;
        tracing::debug!(key = %key, count = sets.len(), "loaded annotation sets");
        Ok(Self {
            key,
            sets,
            document_id: document_id.map(str::to_string),
            selected_id: None,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Every stored set, across all documents.
    pub fn all_sets(&self) -> &[AnnotationSet] {
        &self.sets
    }

    /// Sets belonging to the context document. Empty without a context.
    pub fn annotation_sets(&self) -> Vec<&AnnotationSet> {
        match self.document_id.as_deref() {
            Some(doc_id) => self
                .sets
                .iter()
                .filter(|set| set.document_id == doc_id)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn current_annotation_set(&self) -> Option<&AnnotationSet> {
        let selected = self.selected_id.as_deref()?;
        self.annotation_sets()
            .into_iter()
            .find(|set| set.id == selected)
    }

    /// Switch the document context. Returns true if this cleared the selection.
    pub fn set_document(&mut self, document_id: Option<&str>) -> bool {
        if self.document_id.as_deref() != document_id {
            tracing::debug!(
                from = ?self.document_id,
                to = ?document_id,
                "switching document context"
            );
            self.document_id = document_id.map(str::to_string);
        }
        self.normalize_selection()
    }

    pub fn refresh<S: KeyValueStore>(&mut self, kv: &S) -> Result<()> {
        self.sets = kv.get(&self.key, Vec::new())?;
        self.normalize_selection();
        Ok(())
    }

    /// Create a set for the context document and select it.
    ///
    /// Without a context document this does nothing and returns `Ok(None)`.
    pub fn add_annotation_set<S, G>(
        &mut self,
        kv: &mut S,
        ids: &mut G,
        name: impl Into<String>,
    ) -> Result<Option<AnnotationSet>>
    where
        S: KeyValueStore,
        G: IdGenerator,
    {
        let Some(document_id) = self.document_id.clone() else {
            tracing::debug!("no document selected, not adding annotation set");
            return Ok(None);
        };

        let set = AnnotationSet::new(ids.next_id(), document_id, name.into());

        let mut sets: Vec<AnnotationSet> = kv.get(&self.key, Vec::new())?;
        sets.push(set.clone());
        kv.set(&self.key, &sets)?;

        self.sets = sets;
        self.selected_id = Some(set.id.clone());
        tracing::info!(
            id = %set.id,
            document_id = %set.document_id,
            name = %set.name,
            "added annotation set"
        );
        Ok(Some(set))
    }

    /// Remove the set with `id` from the global list, whatever its document.
    pub fn remove_annotation_set<S: KeyValueStore>(
        &mut self,
        kv: &mut S,
        id: &str,
    ) -> Result<Option<AnnotationSet>> {
        let mut sets: Vec<AnnotationSet> = kv.get(&self.key, Vec::new())?;
        let removed = sets.iter().find(|set| set.id == id).cloned();

        if removed.is_some() {
            sets.retain(|set| set.id != id);
            kv.set(&self.key, &sets)?;
            tracing::info!(id, "removed annotation set");
        }
        self.sets = sets;

        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        self.normalize_selection();
        Ok(removed)
    }

    /// Point the selection at `id`. Ids outside the current view do not stick.
    pub fn select_annotation_set(&mut self, id: Option<&str>) {
        self.selected_id = id.map(str::to_string);
        self.normalize_selection();
    }

    fn normalize_selection(&mut self) -> bool {
        let Some(selected) = self.selected_id.as_deref() else {
            return false;
        };
        let visible = self
            .annotation_sets()
            .iter()
            .any(|set| set.id == selected);
        if visible {
            return false;
        }
        tracing::warn!(id = selected, "annotation set not in current document, clearing selection");
        self.selected_id = None;
        true
    }
}
