//! Module dependency graph for tern
//!
//! This crate provides the read-only view of a project that classpath
//! computation walks:
//! - Modules, libraries and toolchains ([`model`])
//! - The [`ModuleGraph`] and [`RoleLookup`] traits, plus the in-memory
//!   [`ProjectGraph`] implementation ([`graph`])
//! - `tern.kdl` project descriptions that build a [`ProjectGraph`] ([`project`])

pub mod graph;
pub mod model;
pub mod project;

pub use graph::{GraphError, ModuleGraph, ProjectGraph, RoleLookup};
pub use model::{
    ClasspathKind, Dependency, DependencyTarget, Library, Module, Role, Scope, Toolchain,
};
pub use project::{ClasspathNode, PROJECT_FILE_NAME, ProjectError, ProjectManifest};
