//! Stockroom Core - Shared domain types.
//!
//! This crate provides the types used across all Stockroom components:
//! - `admin` - The inventory editor web server
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure state machines - no I/O, no
//! database access, no HTTP clients. Validation lives here so that the
//! persistence layer, the write handlers and the edit session all run the
//! exact same checks.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, route targets, drafts and validation
//! - [`session`] - The edit-session state machine for a single product form

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod session;
pub mod types;

pub use session::{Confirm, DELETE_CONFIRMATION, EditSession, Submission, TitleState};
pub use types::*;
