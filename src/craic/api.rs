//! # API Facade
//!
//! The API layer composes the two stores and is the single entry point for
//! every craic operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Wires** user actions to store mutators
//! - **Keeps the set store's document context** in step with the document
//!   selection, so switching or removing a document clears the set selection
//! - **Normalizes inputs** (list positions or ids → entities)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Store logic**: that belongs in `documents.rs` and `annotation_sets.rs`
//! - **Terminal I/O**: no stdout, stderr, or colors
//!
//! ## Generic Over Storage and Ids
//!
//! `CraicApi<S: KeyValueStore, G: IdGenerator>`:
//! - Production: `CraicApi<FileStore, UuidIds>`
//! - Testing: `CraicApi<InMemoryStore, SequentialIds>`
//!
//! ## Error Handling
//!
//! Upload rejections and read failures are recovered here: they come back as
//! an error-level [`CmdMessage`] with no state change. Persistence failures
//! and unresolvable references are returned as `Err`.

use crate::annotation_sets::AnnotationSetStore;
use crate::annotator::AnnotatorView;
use crate::commands;
use crate::config::{CraicConfig, SESSION_KEY};
use crate::documents::DocumentStore;
use crate::error::{CraicError, Result};
use crate::ids::IdGenerator;
use crate::index::{list_documents, list_sets, Reference};
use crate::model::{AnnotationSet, Document, Scope, Session};
use crate::reader::{self, Upload};
use crate::store::KeyValueStore;
use std::io::Read;
use std::path::Path;

/// The main API facade for craic operations.
pub struct CraicApi<S: KeyValueStore, G: IdGenerator> {
    store: S,
    ids: G,
    paths: commands::CraicPaths,
    scope: Scope,
    config: CraicConfig,
    documents: DocumentStore,
    sets: AnnotationSetStore,
    saved_session: Session,
}

impl<S: KeyValueStore, G: IdGenerator> CraicApi<S, G> {
    pub fn new(
        store: S,
        ids: G,
        paths: commands::CraicPaths,
        scope: Scope,
        config: CraicConfig,
    ) -> Result<Self> {
        let documents = DocumentStore::open(&store, config.documents_key.clone())?;
        let sets = AnnotationSetStore::open(&store, config.annotation_sets_key.clone(), None)?;
        Ok(Self {
            store,
            ids,
            paths,
            scope,
            config,
            documents,
            sets,
            saved_session: Session::default(),
        })
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn annotation_sets(&self) -> &AnnotationSetStore {
        &self.sets
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn paths(&self) -> &commands::CraicPaths {
        &self.paths
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.documents.current_document()
    }

    pub fn current_annotation_set(&self) -> Option<&AnnotationSet> {
        self.sets.current_annotation_set()
    }

    // --- Session ---

    pub fn session(&self) -> Session {
        Session {
            selected_document_id: self.documents.selected_id().map(str::to_string),
            selected_set_id: self.sets.selected_id().map(str::to_string),
        }
    }

    /// Re-apply the selection saved by a previous invocation.
    ///
    /// Goes through the regular select operations, so a saved set id that no
    /// longer belongs to the saved document is dropped.
    pub fn restore_session(&mut self) -> Result<()> {
        let session: Session = self.store.get(SESSION_KEY, Session::default())?;
        self.documents.select_document(session.selected_document_id.as_deref());
        self.sync_set_context();
        self.sets.select_annotation_set(session.selected_set_id.as_deref());
        self.saved_session = session;
        Ok(())
    }

    /// Persist the current selection if it changed since the last save or restore.
    pub fn save_session(&mut self) -> Result<()> {
        let session = self.session();
        if session != self.saved_session {
            self.store.set(SESSION_KEY, &session)?;
            self.saved_session = session;
        }
        Ok(())
    }

    // --- Documents ---

    pub fn add_document(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<commands::CmdResult> {
        let document = self
            .documents
            .add_document(&mut self.store, &mut self.ids, name, content)?;
        self.sync_set_context();

        let mut result = commands::CmdResult::default();
        result.add_message(commands::CmdMessage::success(format!(
            "Uploaded {} ({})",
            document.name, document.id
        )));
        result.affected_documents.push(document);
        Ok(result)
    }

    /// Validate and read `path`, then add it as a document.
    pub fn upload_file(
        &mut self,
        path: &Path,
        name: Option<&str>,
        mime: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let read = reader::read_file(path, name, mime, &self.config.accepted_extensions);
        self.finish_upload(read)
    }

    /// Like [`CraicApi::upload_file`], reading content from `source`.
    pub fn upload_reader<R: Read>(
        &mut self,
        source: R,
        name: &str,
        mime: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let read = reader::read_from(source, name, mime, &self.config.accepted_extensions);
        self.finish_upload(read)
    }

    fn finish_upload(&mut self, read: Result<Upload>) -> Result<commands::CmdResult> {
        match read {
            Ok(upload) => self.add_document(upload.name, upload.content),
            Err(e @ (CraicError::UnsupportedFileType { .. } | CraicError::FileRead { .. })) => {
                Ok(commands::CmdResult::default()
                    .with_message(commands::CmdMessage::error(e.to_string())))
            }
            Err(e) => Err(e),
        }
    }

    pub fn list_documents(&self) -> Result<commands::CmdResult> {
        let listed = list_documents(self.documents.documents(), self.documents.selected_id());
        let mut result = commands::CmdResult::default().with_listed_documents(listed);
        if let Some(id) = self.documents.selected_id() {
            if self.documents.current_document().is_none() {
                result.add_message(commands::CmdMessage::warning(format!(
                    "Selected document {} does not exist.",
                    id
                )));
            }
        }
        Ok(result)
    }

    /// Select a document by position or id; `None` clears the selection.
    ///
    /// Ids are taken as given, without an existence check. Positions must
    /// resolve.
    pub fn select_document(&mut self, reference: Option<&str>) -> Result<commands::CmdResult> {
        let id = match reference {
            None => None,
            Some(raw) => Some(self.document_id_for(raw)?),
        };

        let had_set = self.sets.selected_id().is_some();
        self.documents.select_document(id.as_deref());
        let cleared = self.sync_set_context();

        let mut result = commands::CmdResult::default();
        match self.documents.current_document() {
            Some(doc) => {
                result.add_message(commands::CmdMessage::success(format!(
                    "Selected {}",
                    doc.name
                )));
                result.affected_documents.push(doc.clone());
            }
            None => match id {
                Some(id) => result.add_message(commands::CmdMessage::warning(format!(
                    "Selected {}, but no such document exists.",
                    id
                ))),
                None => result.add_message(commands::CmdMessage::info("No document selected.")),
            },
        }
        if had_set && cleared {
            result.add_message(commands::CmdMessage::info(
                "Annotation set selection cleared.",
            ));
        }
        Ok(result)
    }

    /// Remove a document. Its annotation sets are kept (see `doctor`).
    pub fn remove_document(&mut self, reference: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_document(reference)?.id.clone();
        let removed = self.documents.remove_document(&mut self.store, &id)?;
        self.sync_set_context();

        let mut result = commands::CmdResult::default();
        if let Some(doc) = removed {
            result.add_message(commands::CmdMessage::success(format!(
                "Removed {}",
                doc.name
            )));
            let remaining = self
                .sets
                .all_sets()
                .iter()
                .filter(|set| set.document_id == doc.id)
                .count();
            if remaining > 0 {
                result.add_message(commands::CmdMessage::warning(format!(
                    "{} annotation set(s) still reference it; run `craic doctor`.",
                    remaining
                )));
            }
            result.affected_documents.push(doc);
        }
        Ok(result)
    }

    // --- Annotation sets ---

    pub fn list_sets(&self) -> Result<commands::CmdResult> {
        let visible = self.sets.annotation_sets();
        let listed = list_sets(&visible, self.sets.selected_id());
        let mut result = commands::CmdResult::default().with_listed_sets(listed);
        if self.documents.selected_id().is_none() {
            result.add_message(commands::CmdMessage::warning("No document selected."));
        }
        Ok(result)
    }

    /// Add a set to the current document. Without a name the set is called
    /// `Set {n + 1}`, n being the document's current set count.
    pub fn add_annotation_set(&mut self, name: Option<String>) -> Result<commands::CmdResult> {
        let name =
            name.unwrap_or_else(|| format!("Set {}", self.sets.annotation_sets().len() + 1));
        let added = self
            .sets
            .add_annotation_set(&mut self.store, &mut self.ids, name)?;

        let mut result = commands::CmdResult::default();
        match added {
            Some(set) => {
                result.add_message(commands::CmdMessage::success(format!(
                    "Added annotation set {}",
                    set.name
                )));
                result.affected_sets.push(set);
            }
            None => result.add_message(commands::CmdMessage::warning(
                "Select a document before adding an annotation set.",
            )),
        }
        Ok(result)
    }

    pub fn select_annotation_set(
        &mut self,
        reference: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let mut result = commands::CmdResult::default();
        match reference {
            None => {
                self.sets.select_annotation_set(None);
                result.add_message(commands::CmdMessage::info("No annotation set selected."));
            }
            Some(raw) => {
                let set = self.resolve_set(raw)?.clone();
                self.sets.select_annotation_set(Some(&set.id));
                result.add_message(commands::CmdMessage::success(format!(
                    "Selected annotation set {}",
                    set.name
                )));
                result.affected_sets.push(set);
            }
        }
        Ok(result)
    }

    /// Remove a set by reference, or the selected set when `reference` is `None`.
    pub fn remove_annotation_set(
        &mut self,
        reference: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let id = match reference {
            Some(raw) => self.resolve_set(raw)?.id.clone(),
            None => match self.sets.selected_id() {
                Some(id) => id.to_string(),
                None => {
                    return Ok(commands::CmdResult::default().with_message(
                        commands::CmdMessage::warning("No annotation set selected."),
                    ))
                }
            },
        };

        let removed = self.sets.remove_annotation_set(&mut self.store, &id)?;
        let mut result = commands::CmdResult::default();
        if let Some(set) = removed {
            result.add_message(commands::CmdMessage::success(format!(
                "Removed annotation set {}",
                set.name
            )));
            result.affected_sets.push(set);
        }
        Ok(result)
    }

    // --- Display ---

    pub fn current_view(&self) -> AnnotatorView {
        AnnotatorView::new(self.current_document(), self.current_annotation_set())
    }

    pub fn view(&self) -> Result<commands::CmdResult> {
        Ok(commands::CmdResult::default().with_view(self.current_view()))
    }

    // --- Maintenance ---

    pub fn doctor(&mut self, prune: bool) -> Result<commands::CmdResult> {
        self.documents.refresh(&self.store)?;
        self.sets.refresh(&self.store)?;
        commands::doctor::run(&mut self.store, &self.documents, &mut self.sets, prune)
    }

    pub fn config(&self, action: commands::config::ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, self.scope, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths, self.scope)
    }

    // --- Helpers ---

    fn sync_set_context(&mut self) -> bool {
        self.sets.set_document(self.documents.selected_id())
    }

    fn resolve_document(&self, raw: &str) -> Result<&Document> {
        let reference = parse_reference(raw);
        let docs: Vec<&Document> = self.documents.documents().iter().collect();
        reference
            .resolve(&docs, |d| d.id.as_str())
            .ok_or_else(|| CraicError::DocumentNotFound(raw.to_string()))
    }

    fn document_id_for(&self, raw: &str) -> Result<String> {
        match parse_reference(raw) {
            Reference::Id(id) => Ok(id),
            Reference::Position(_) => Ok(self.resolve_document(raw)?.id.clone()),
        }
    }

    fn resolve_set(&self, raw: &str) -> Result<&AnnotationSet> {
        let reference = parse_reference(raw);
        reference
            .resolve(&self.sets.annotation_sets(), |s| s.id.as_str())
            .ok_or_else(|| CraicError::AnnotationSetNotFound(raw.to_string()))
    }
}

fn parse_reference(raw: &str) -> Reference {
    match raw.parse() {
        Ok(reference) => reference,
        Err(never) => match never {},
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, CraicPaths, MessageLevel};
