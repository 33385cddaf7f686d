//! Ghost app installer library.
//!
//! This crate provides the installation and lifecycle-management logic for
//! the Ghost app. It is used by the `ghost` CLI binary and can be consumed
//! programmatically for testing or custom provisioning workflows.
//!
//! # Modules
//!
//! - [`admin`] - Admin credential collection and validation
//! - [`cli`] - Command-line argument definitions
//! - [`envfile`] - Environment document parsing and generation
//! - [`error`] - Semantic error types with recovery hints
//! - [`exec`] - External command execution abstraction
//! - [`fsops`] - Filesystem failure classification and conflict resolution
//! - [`install_flow`] - Sequential install orchestration
//! - [`lifecycle`] - Start/update/restart/stop/uninstall command bodies
//! - [`output`] - Stderr writers and coloured diagnostics
//! - [`pipeline`] - Build pipeline orchestration
//! - [`platform`] - Platform detection and install-target resolution
//! - [`prereqs`] - Host prerequisite validation
//! - [`prompt`] - Interactive prompting abstraction
//! - [`provision`] - Data directory provisioning
//! - [`receipt`] - Typed install receipt persistence
//! - [`secret`] - Signing secret generation
//! - [`source`] - Git-based source acquisition
//! - [`store`] - Admin account persistence

pub mod admin;
pub mod cli;
pub mod envfile;
pub mod error;
pub mod exec;
pub mod fsops;
pub mod install_flow;
pub mod lifecycle;
pub mod output;
pub mod pipeline;
pub mod platform;
pub mod prereqs;
pub mod prompt;
pub mod provision;
pub mod receipt;
pub mod secret;
pub mod source;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
