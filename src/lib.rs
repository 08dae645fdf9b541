//! Health Assistant Chat Widget
//!
//! A chat widget for a health assistant backend: it sends user input to the
//! chat endpoint, renders replies, and creates and lists reminders.
//!
//! # Architecture
//!
//! - **Widget**: [`widget::ChatWidget`] owns the transcript, input, request
//!   phase and reminder modal
//! - **Backend**: [`api::ChatBackend`] trait with a reqwest-based [`api::Client`]
//! - **Rendering**: [`surface::Surface`] trait; [`terminal::TerminalSurface`]
//!   draws on a terminal
//!
//! # Modules
//!
//! - [`api`]: Backend client and wire types
//! - [`config`]: Layered configuration
//! - [`reply`]: Chat reply parsing
//! - [`surface`]: Rendering notifications
//! - [`terminal`]: Terminal rendering
//! - [`widget`]: The widget itself

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod config;
pub mod error;
pub mod reply;
pub mod surface;
pub mod terminal;
pub mod widget;

pub use error::{Error, Result};
