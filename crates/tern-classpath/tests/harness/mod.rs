//! Test harness for tern-classpath integration tests
//!
//! Provides an isolated project directory where tests lay out library roots
//! and module output directories, then load a tern.kdl describing them.

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use tempfile::TempDir;
use tern_graph::{PROJECT_FILE_NAME, ProjectGraph, ProjectManifest};

/// A temp directory standing in for a project checkout
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create project temp dir"),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        Utf8Path::from_path(self.dir.path()).expect("temp dir is not UTF-8")
    }

    /// Absolute path of `rel` inside the project
    pub fn path(&self, rel: &str) -> Utf8PathBuf {
        self.root().join(rel)
    }

    /// Create a file (and its parents) inside the project
    pub fn file(&self, rel: &str) -> Utf8PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).expect("failed to create parent dir");
        std::fs::write(&path, rel).expect("failed to write file");
        path
    }

    /// Create a directory (and its parents) inside the project
    pub fn dir(&self, rel: &str) -> Utf8PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(&path).expect("failed to create dir");
        path
    }

    /// Write tern.kdl and load it into a graph
    pub fn load(&self, kdl: &str) -> (ProjectManifest, ProjectGraph) {
        let manifest_path = self.path(PROJECT_FILE_NAME);
        std::fs::write(&manifest_path, kdl).expect("failed to write tern.kdl");
        ProjectManifest::load(&manifest_path).expect("failed to load tern.kdl")
    }

    /// Project-absolute paths of `rels`, as a set
    pub fn set(&self, rels: &[&str]) -> BTreeSet<Utf8PathBuf> {
        rels.iter().map(|rel| self.path(rel)).collect()
    }
}
