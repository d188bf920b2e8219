//! Interactive chat with the research-advisor service.
//!
//! This module provides the session controller and the pieces a terminal
//! front end needs around it:
//!
//! - Mode selection, file attachment, and the single-request send gate
//! - Rendering of student, professor, research-advisor, and system messages
//! - Slash commands for session control
//! - Configurable service URL, timeout, and output styling
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: session state and the exchange with the service
//! - [`render`]: output abstraction and plain-text implementation
//! - [`commands`]: slash command parsing

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{OutputEntry, PlainTextRenderer, RecordingRenderer, Renderer};
pub use session::{ChatSession, PendingProbe, SendOutcome, SessionState, failure_notice};
