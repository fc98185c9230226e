//! Classpath closure for tern modules
//!
//! Given a module in a [`tern_graph::ModuleGraph`], this crate computes the
//! transitive set of build inputs needed to compile and package it:
//! - External library files (archives and class files) found under library roots
//! - Output directories of the modules it depends on, packaged or raw depending
//!   on the dependency's role
//!
//! It also carries the thin adapters the surrounding builder uses next to the
//! closure: build messages ([`diagnostics`]), toolchain target parsing
//! ([`toolchain`]) and path helpers ([`paths`]).

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod paths;
pub mod resolver;
pub mod scan;
pub mod toolchain;

pub use config::{ClasspathConfig, DEFAULT_PACKAGED_DIR};
pub use diagnostics::{BuildMessage, MessageSink, Severity, ToolMessageKind};
pub use error::{ClasspathError, Result};
pub use resolver::{Classpath, ClasspathResolver, Wants};
