use crate::annotator::AnnotatorView;
use crate::config::CraicConfig;
use crate::error::{CraicError, Result};
use crate::index::{ListedDocument, ListedSet};
use crate::model::{AnnotationSet, Document, Scope};
use std::path::PathBuf;

pub mod config;
pub mod doctor;
pub mod init;

#[derive(Debug, Clone)]
pub struct CraicPaths {
    pub project: Option<PathBuf>,
    pub global: PathBuf,
}

impl CraicPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => self
                .project
                .clone()
                .ok_or_else(|| CraicError::Store("Project scope is not available".to_string())),
            Scope::Global => Ok(self.global.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_documents: Vec<Document>,
    pub affected_sets: Vec<AnnotationSet>,
    pub listed_documents: Vec<ListedDocument>,
    pub listed_sets: Vec<ListedSet>,
    pub view: Option<AnnotatorView>,
    pub config: Option<CraicConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_documents(mut self, docs: Vec<ListedDocument>) -> Self {
        self.listed_documents = docs;
        self
    }

    pub fn with_listed_sets(mut self, sets: Vec<ListedSet>) -> Self {
        self.listed_sets = sets;
        self
    }

    pub fn with_view(mut self, view: AnnotatorView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_config(mut self, config: CraicConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
