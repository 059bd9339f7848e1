//! # Display Positions
//!
//! Ids are long and opaque, so listings number their entries from 1 and the
//! CLI accepts either form when a command needs a document or set:
//!
//! - `2`: the second entry of the current listing
//! - `3f9c...`: an exact id
//!
//! Positions are assigned in list order (upload order for documents, creation
//! order for sets) and are only meaningful for the listing they came from.

use crate::model::{AnnotationSet, Document};
use std::convert::Infallible;
use std::str::FromStr;

/// A user reference to a document or set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Position(usize),
    Id(String),
}

impl FromStr for Reference {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Reference::Position(n)),
            _ => Ok(Reference::Id(s.to_string())),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Position(n) => write!(f, "{}", n),
            Reference::Id(id) => write!(f, "{}", id),
        }
    }
}

impl Reference {
    /// Find the referenced entry among `items`.
    pub fn resolve<'a, T, F>(&self, items: &[&'a T], id_of: F) -> Option<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        match self {
            Reference::Position(n) => items.get(n - 1).copied(),
            Reference::Id(id) => items
                .iter()
                .copied()
                .find(|item| id_of(*item) == id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedDocument {
    pub position: usize,
    pub document: Document,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedSet {
    pub position: usize,
    pub set: AnnotationSet,
    pub selected: bool,
}

pub fn list_documents(documents: &[Document], selected: Option<&str>) -> Vec<ListedDocument> {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| ListedDocument {
            position: i + 1,
            document: doc.clone(),
            selected: selected == Some(doc.id.as_str()),
        })
        .collect()
}

pub fn list_sets(sets: &[&AnnotationSet], selected: Option<&str>) -> Vec<ListedSet> {
    sets.iter()
        .enumerate()
        .map(|(i, set)| ListedSet {
            position: i + 1,
            set: (*set).clone(),
            selected: selected == Some(set.id.as_str()),
        })
        .collect()
}
