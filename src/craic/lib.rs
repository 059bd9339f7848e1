//! # Craic Architecture
//!
//! Craic is a **UI-agnostic document annotation library**. You upload text or
//! markdown documents, group annotations into named sets per document, and
//! keep track of which document and set you are working on. The CLI is one
//! client of the library.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Persists the selection between invocations               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Composes the document and annotation set stores          │
//! │  - Normalizes inputs (list positions → ids → entities)      │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stores (documents.rs, annotation_sets.rs, commands/)       │
//! │  - Entity lists plus selection pointers                     │
//! │  - Read-modify-write against the key-value store            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KeyValueStore trait                             │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Selection
//!
//! Each store holds a nullable pointer to its selected entity. The pointers
//! are not foreign keys: a selected document id may name nothing, in which
//! case the current document is simply `None`. The annotation set pointer is
//! stricter and is reset whenever it falls outside the current document's sets.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Failures come back as [`error::CraicError`]; user feedback
//! comes back as messages inside a [`commands::CmdResult`].
//!
//! ## Testing Strategy
//!
//! 1. **Stores** (`documents.rs`, `annotation_sets.rs`): thorough unit tests
//!    against `InMemoryStore` and deterministic ids.
//! 2. **API** (`api.rs`): wiring between the stores and user-facing messages.
//! 3. **CLI** (`tests/`): end-to-end runs of the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`documents`]: Document list and selection
//! - [`annotation_sets`]: Per-document annotation sets and selection
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`reader`]: Upload validation and text decoding
//! - [`annotator`]: Placeholder annotator view
//! - [`index`]: List positions and reference resolution
//! - [`commands`]: Result types plus config, init and doctor
//! - [`config`]: Configuration management
//! - [`ids`]: Id generation
//! - [`init`]: Scope resolution and context setup
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod annotation_sets;
pub mod annotator;
pub mod api;
pub mod commands;
pub mod config;
pub mod documents;
pub mod error;
pub mod ids;
pub mod index;
pub mod init;
pub mod model;
pub mod reader;
pub mod store;
