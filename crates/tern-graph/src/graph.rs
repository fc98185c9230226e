//! Read-only graph access
//!
//! [`ModuleGraph`] is the shape classpath computation needs from a host;
//! [`ProjectGraph`] is the owned implementation used by `tern.kdl` projects
//! and by tests.

use std::collections::HashMap;

use camino::Utf8Path;
use thiserror::Error;

use crate::model::{ClasspathKind, Dependency, DependencyTarget, Library, Module, Role, Toolchain};

/// Errors during graph construction and validation
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("module '{0}' is declared more than once")]
    DuplicateModule(String),

    #[error("library '{0}' is declared more than once")]
    DuplicateLibrary(String),

    #[error("toolchain '{0}' is declared more than once")]
    DuplicateToolchain(String),

    #[error("module '{module}' depends on unknown module '{name}'")]
    UnknownModule { module: String, name: String },

    #[error("module '{module}' depends on unknown library '{name}'")]
    UnknownLibrary { module: String, name: String },

    #[error("module '{module}' depends on unknown toolchain '{name}'")]
    UnknownToolchain { module: String, name: String },
}

/// A read-only view of modules and what they depend on.
///
/// Implementations must be free of side effects and must not change while a
/// caller is walking them.
pub trait ModuleGraph {
    fn module(&self, name: &str) -> Option<&Module>;

    fn library(&self, name: &str) -> Option<&Library>;

    fn toolchain(&self, name: &str) -> Option<&Toolchain>;

    /// Dependency edges of `module` visible in `kind`, in declaration order.
    ///
    /// With `exported_only`, edges that are not exported are left out.
    fn dependencies<'m>(
        &self,
        module: &'m Module,
        kind: ClasspathKind,
        exported_only: bool,
    ) -> Vec<&'m Dependency> {
        module
            .dependencies
            .iter()
            .filter(|dep| kind.includes(dep.scope))
            .filter(|dep| !exported_only || dep.exported)
            .collect()
    }

    /// Directory compiled output of `module` is written to.
    fn output_dir<'m>(&self, module: &'m Module) -> Option<&'m Utf8Path> {
        module.output_dir.as_deref()
    }
}

/// Looks up the role attached to a module.
pub trait RoleLookup {
    fn role_of(&self, module: &Module) -> Option<Role>;
}

/// Owned, in-memory project graph
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    modules: HashMap<String, Module>,
    libraries: HashMap<String, Library>,
    toolchains: HashMap<String, Toolchain>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: Module) -> Result<(), GraphError> {
        if self.modules.contains_key(&module.name) {
            return Err(GraphError::DuplicateModule(module.name));
        }
        self.modules.insert(module.name.clone(), module);
        Ok(())
    }

    pub fn add_library(&mut self, library: Library) -> Result<(), GraphError> {
        if self.libraries.contains_key(&library.name) {
            return Err(GraphError::DuplicateLibrary(library.name));
        }
        self.libraries.insert(library.name.clone(), library);
        Ok(())
    }

    pub fn add_toolchain(&mut self, toolchain: Toolchain) -> Result<(), GraphError> {
        if self.toolchains.contains_key(&toolchain.name) {
            return Err(GraphError::DuplicateToolchain(toolchain.name));
        }
        self.toolchains.insert(toolchain.name.clone(), toolchain);
        Ok(())
    }

    /// Iterate modules sorted by name
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        let mut modules: Vec<&Module> = self.modules.values().collect();
        modules.sort_by(|a, b| a.name.cmp(&b.name));
        modules.into_iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Check that every dependency edge points at something declared.
    ///
    /// Modules are checked in name order so the reported error is stable.
    pub fn validate(&self) -> Result<(), GraphError> {
        for module in self.modules() {
            for dep in &module.dependencies {
                match &dep.target {
                    DependencyTarget::Module(name) if !self.modules.contains_key(name) => {
                        return Err(GraphError::UnknownModule {
                            module: module.name.clone(),
                            name: name.clone(),
                        });
                    }
                    DependencyTarget::Library(name) if !self.libraries.contains_key(name) => {
                        return Err(GraphError::UnknownLibrary {
                            module: module.name.clone(),
                            name: name.clone(),
                        });
                    }
                    DependencyTarget::Toolchain(name) if !self.toolchains.contains_key(name) => {
                        return Err(GraphError::UnknownToolchain {
                            module: module.name.clone(),
                            name: name.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl ModuleGraph for ProjectGraph {
    fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }

    fn toolchain(&self, name: &str) -> Option<&Toolchain> {
        self.toolchains.get(name)
    }
}

impl RoleLookup for ProjectGraph {
    fn role_of(&self, module: &Module) -> Option<Role> {
        module.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scope;

    fn sample_graph() -> ProjectGraph {
        let mut graph = ProjectGraph::new();
        graph
            .add_module(
                Module::new("app")
                    .with_dependency(Dependency::module("core"))
                    .with_dependency(Dependency::library("gson").exported())
                    .with_dependency(Dependency::library("junit").with_scope(Scope::Test))
                    .with_dependency(Dependency::toolchain("sdk").with_scope(Scope::Provided)),
            )
            .unwrap();
        graph.add_module(Module::new("core")).unwrap();
        graph.add_library(Library::new("gson")).unwrap();
        graph.add_library(Library::new("junit")).unwrap();
        graph.add_toolchain(Toolchain::new("sdk", "/sdk")).unwrap();
        graph
    }

    fn target_names(deps: &[&Dependency]) -> Vec<String> {
        deps.iter().map(|d| d.target.name().to_string()).collect()
    }

    #[test]
    fn test_dependencies_filter_by_kind() {
        let graph = sample_graph();
        let app = graph.module("app").unwrap();

        let compile = graph.dependencies(app, ClasspathKind::ProductionCompile, false);
        assert_eq!(target_names(&compile), vec!["core", "gson", "sdk"]);

        let tests = graph.dependencies(app, ClasspathKind::TestCompile, false);
        assert_eq!(target_names(&tests), vec!["core", "gson", "junit", "sdk"]);
    }

    #[test]
    fn test_dependencies_exported_only() {
        let graph = sample_graph();
        let app = graph.module("app").unwrap();

        let exported = graph.dependencies(app, ClasspathKind::ProductionCompile, true);
        assert_eq!(target_names(&exported), vec!["gson"]);
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let mut graph = sample_graph();
        let err = graph.add_module(Module::new("core")).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateModule(name) if name == "core"));
    }

    #[test]
    fn test_validate_accepts_complete_graph() {
        sample_graph().validate().unwrap();
    }

    #[test]
    fn test_validate_reports_dangling_library() {
        let mut graph = sample_graph();
        graph
            .add_module(Module::new("broken").with_dependency(Dependency::library("missing")))
            .unwrap();

        let err = graph.validate().unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnknownLibrary { ref module, ref name } if module == "broken" && name == "missing"
        ));
    }

    #[test]
    fn test_role_lookup_reads_declared_role() {
        let mut graph = ProjectGraph::new();
        graph
            .add_module(Module::new("lib").with_role(Role::Library))
            .unwrap();
        graph.add_module(Module::new("plain")).unwrap();

        assert_eq!(graph.role_of(graph.module("lib").unwrap()), Some(Role::Library));
        assert_eq!(graph.role_of(graph.module("plain").unwrap()), None);
    }

    #[test]
    fn test_modules_sorted_by_name() {
        let graph = sample_graph();
        let names: Vec<&str> = graph.modules().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["app", "core"]);
        assert_eq!(graph.len(), 2);
    }
}
