//! tern.kdl project description parsing
//!
//! A project file lists modules, libraries and toolchains:
//!
//! ```kdl
//! classpath packaged-dir="classes.jar"
//! module name="app" role="application" output="out/app" {
//!     dep module="lib-a"
//!     dep library="gson" visibility="exported"
//! }
//! library name="gson" {
//!     root path="/repo/gson-2.8.jar"
//! }
//! toolchain name="android-33" home="/sdk" target="android-33"
//! ```
//!
//! Relative `output`, `root` and `home` paths are resolved against the
//! directory containing the project file.

use camino::{Utf8Path, Utf8PathBuf};
use facet_kdl as kdl;
use thiserror::Error;

use crate::graph::{GraphError, ProjectGraph};
use crate::model::{Dependency, DependencyTarget, Library, Module, Role, Scope, Toolchain};

/// File name of a project description
pub const PROJECT_FILE_NAME: &str = "tern.kdl";

/// Errors during tern.kdl parsing
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tern.kdl: {0}")]
    ParseError(String),

    #[error("invalid value for {property}: {reason}")]
    InvalidValue {
        property: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Resolver settings
#[derive(Debug, Clone, Default, facet::Facet)]
pub struct ClasspathNode {
    /// Name of the packaged-classes directory inside a library module's output
    #[facet(kdl::property, rename = "packaged-dir", default)]
    pub packaged_dir: Option<String>,
}

/// A `dep` node: exactly one of `module`, `library`, `toolchain`
#[derive(Debug, Clone, facet::Facet)]
pub struct DepNode {
    #[facet(kdl::property, default)]
    pub module: Option<String>,
    #[facet(kdl::property, default)]
    pub library: Option<String>,
    #[facet(kdl::property, default)]
    pub toolchain: Option<String>,
    /// `exported` or `private` (default)
    #[facet(kdl::property, default)]
    pub visibility: Option<String>,
    #[facet(kdl::property, default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, facet::Facet)]
pub struct ModuleNode {
    #[facet(kdl::property)]
    pub name: String,
    #[facet(kdl::property, default)]
    pub role: Option<String>,
    #[facet(kdl::property, default)]
    pub output: Option<String>,
    #[facet(kdl::children, rename = "dep", default)]
    pub deps: Vec<DepNode>,
}

#[derive(Debug, Clone, facet::Facet)]
pub struct RootNode {
    #[facet(kdl::property)]
    pub path: String,
}

#[derive(Debug, Clone, facet::Facet)]
pub struct LibraryNode {
    #[facet(kdl::property)]
    pub name: String,
    #[facet(kdl::children, rename = "root", default)]
    pub roots: Vec<RootNode>,
}

#[derive(Debug, Clone, facet::Facet)]
pub struct ToolchainNode {
    #[facet(kdl::property)]
    pub name: String,
    #[facet(kdl::property, default)]
    pub home: Option<String>,
    #[facet(kdl::property, default)]
    pub target: Option<String>,
    #[facet(kdl::children, rename = "root", default)]
    pub roots: Vec<RootNode>,
}

/// Top-level tern.kdl manifest
#[derive(Debug, Clone, facet::Facet)]
pub struct ProjectManifest {
    #[facet(kdl::child, default)]
    pub classpath: Option<ClasspathNode>,
    #[facet(kdl::children, rename = "module", default)]
    pub modules: Vec<ModuleNode>,
    #[facet(kdl::children, rename = "library", default)]
    pub libraries: Vec<LibraryNode>,
    #[facet(kdl::children, rename = "toolchain", default)]
    pub toolchains: Vec<ToolchainNode>,
}

impl ProjectManifest {
    /// Parse tern.kdl from a file path
    pub fn from_path(path: &Utf8Path) -> Result<Self, ProjectError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ProjectError::ReadError {
            path: path.to_owned(),
            source: e,
        })?;

        Self::parse(&contents)
    }

    /// Parse tern.kdl from a string
    pub fn parse(source: &str) -> Result<Self, ProjectError> {
        facet_kdl::from_str(source).map_err(|e| ProjectError::ParseError(e.to_string()))
    }

    /// Find tern.kdl starting from the given directory and searching upward
    pub fn find(start_path: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current = start_path;
        loop {
            let candidate = current.join(PROJECT_FILE_NAME);
            if candidate.exists() {
                return Some(candidate);
            }

            current = current.parent()?;
        }
    }

    /// Load a project file and build its graph in one step.
    ///
    /// Relative paths are resolved against the file's directory.
    pub fn load(path: &Utf8Path) -> Result<(Self, ProjectGraph), ProjectError> {
        let manifest = Self::from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
        let graph = manifest.to_graph(base_dir)?;
        Ok((manifest, graph))
    }

    /// Check names and enumerated values without touching the filesystem
    pub fn validate(&self) -> Result<(), ProjectError> {
        for module in &self.modules {
            if module.name.is_empty() {
                return Err(ProjectError::InvalidValue {
                    property: "module.name",
                    reason: "name cannot be empty".to_string(),
                });
            }
            parse_role(module)?;
            for dep in &module.deps {
                parse_dep(&module.name, dep)?;
            }
        }

        for library in &self.libraries {
            if library.name.is_empty() {
                return Err(ProjectError::InvalidValue {
                    property: "library.name",
                    reason: "name cannot be empty".to_string(),
                });
            }
        }

        for toolchain in &self.toolchains {
            if toolchain.name.is_empty() {
                return Err(ProjectError::InvalidValue {
                    property: "toolchain.name",
                    reason: "name cannot be empty".to_string(),
                });
            }
        }

        if let Some(classpath) = &self.classpath {
            if classpath.packaged_dir.as_deref() == Some("") {
                return Err(ProjectError::InvalidValue {
                    property: "classpath.packaged-dir",
                    reason: "directory name cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Build a validated [`ProjectGraph`] from this manifest
    pub fn to_graph(&self, base_dir: &Utf8Path) -> Result<ProjectGraph, ProjectError> {
        self.validate()?;

        let mut graph = ProjectGraph::new();

        for node in &self.modules {
            let mut module = Module::new(&node.name);
            module.role = parse_role(node)?;
            module.output_dir = node.output.as_deref().map(|p| resolve_path(base_dir, p));
            for dep in &node.deps {
                module.dependencies.push(parse_dep(&node.name, dep)?);
            }
            graph.add_module(module)?;
        }

        for node in &self.libraries {
            let mut library = Library::new(&node.name);
            library.roots = node
                .roots
                .iter()
                .map(|r| resolve_path(base_dir, &r.path))
                .collect();
            graph.add_library(library)?;
        }

        for node in &self.toolchains {
            let home = node
                .home
                .as_deref()
                .map(|p| resolve_path(base_dir, p))
                .unwrap_or_else(|| base_dir.to_owned());
            let mut toolchain = Toolchain::new(&node.name, home);
            toolchain.build_target = node.target.clone();
            toolchain.roots = node
                .roots
                .iter()
                .map(|r| resolve_path(base_dir, &r.path))
                .collect();
            graph.add_toolchain(toolchain)?;
        }

        graph.validate()?;
        Ok(graph)
    }
}

fn parse_role(node: &ModuleNode) -> Result<Option<Role>, ProjectError> {
    match node.role.as_deref() {
        None => Ok(None),
        Some(s) => Role::parse(s)
            .map(Some)
            .ok_or_else(|| ProjectError::InvalidValue {
                property: "module.role",
                reason: format!("unknown role '{s}' on module '{}'", node.name),
            }),
    }
}

fn parse_dep(module: &str, node: &DepNode) -> Result<Dependency, ProjectError> {
    let mut targets = Vec::new();
    if let Some(name) = &node.module {
        targets.push(DependencyTarget::Module(name.clone()));
    }
    if let Some(name) = &node.library {
        targets.push(DependencyTarget::Library(name.clone()));
    }
    if let Some(name) = &node.toolchain {
        targets.push(DependencyTarget::Toolchain(name.clone()));
    }

    let target = match targets.len() {
        1 => targets.remove(0),
        n => {
            return Err(ProjectError::InvalidValue {
                property: "dep",
                reason: format!(
                    "dependency of '{module}' must name exactly one of module, library, toolchain (found {n})"
                ),
            });
        }
    };

    let exported = match node.visibility.as_deref() {
        None | Some("private") => false,
        Some("exported") => true,
        Some(other) => {
            return Err(ProjectError::InvalidValue {
                property: "dep.visibility",
                reason: format!("expected 'exported' or 'private', got '{other}'"),
            });
        }
    };

    let scope = match node.scope.as_deref() {
        None => Scope::default(),
        Some(s) => Scope::parse(s).ok_or_else(|| ProjectError::InvalidValue {
            property: "dep.scope",
            reason: format!("unknown scope '{s}'"),
        })?,
    };

    Ok(Dependency {
        target,
        exported,
        scope,
    })
}

fn resolve_path(base_dir: &Utf8Path, path: &str) -> Utf8PathBuf {
    let path = Utf8Path::new(path);
    if path.is_absolute() {
        path.to_owned()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ModuleGraph, RoleLookup};

    const SAMPLE: &str = r#"
        classpath packaged-dir="packaged"
        module name="app" role="application" output="out/app" {
            dep module="lib-a"
            dep library="gson" visibility="exported"
            dep toolchain="android-33" scope="provided"
        }
        module name="lib-a" role="library" output="/abs/out/lib-a" {
            dep library="guava" visibility="exported"
        }
        library name="gson" {
            root path="/repo/gson-2.8.jar"
        }
        library name="guava" {
            root path="libs/guava-30.jar"
        }
        toolchain name="android-33" home="sdk" target="android-33"
    "#;

    #[test]
    fn test_parse_project() {
        let manifest = ProjectManifest::parse(SAMPLE).unwrap();
        assert_eq!(manifest.modules.len(), 2);
        assert_eq!(manifest.libraries.len(), 2);
        assert_eq!(manifest.toolchains.len(), 1);
        assert_eq!(manifest.modules[0].name, "app");
        assert_eq!(manifest.modules[0].deps.len(), 3);
        assert_eq!(
            manifest.classpath.as_ref().and_then(|c| c.packaged_dir.as_deref()),
            Some("packaged")
        );
    }

    #[test]
    fn test_to_graph_resolves_relative_paths() {
        let manifest = ProjectManifest::parse(SAMPLE).unwrap();
        let graph = manifest.to_graph(Utf8Path::new("/project")).unwrap();

        let app = graph.module("app").unwrap();
        assert_eq!(graph.output_dir(app), Some(Utf8Path::new("/project/out/app")));
        assert_eq!(graph.role_of(app), Some(Role::Application));
        assert_eq!(
            app.dependencies[1],
            Dependency::library("gson").exported()
        );
        assert_eq!(
            app.dependencies[2],
            Dependency::toolchain("android-33").with_scope(Scope::Provided)
        );

        let lib_a = graph.module("lib-a").unwrap();
        assert_eq!(graph.output_dir(lib_a), Some(Utf8Path::new("/abs/out/lib-a")));

        let guava = graph.library("guava").unwrap();
        assert_eq!(guava.roots, vec![Utf8PathBuf::from("/project/libs/guava-30.jar")]);

        let sdk = graph.toolchain("android-33").unwrap();
        assert_eq!(sdk.home(), Utf8Path::new("/project/sdk"));
        assert_eq!(sdk.build_target.as_deref(), Some("android-33"));
    }

    #[test]
    fn test_reject_unknown_role() {
        let manifest = ProjectManifest::parse(r#"module name="app" role="service""#).unwrap();
        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, ProjectError::InvalidValue { property: "module.role", .. }));
    }

    #[test]
    fn test_reject_dep_without_target() {
        let kdl = r#"
            module name="app" {
                dep visibility="exported"
            }
        "#;
        let manifest = ProjectManifest::parse(kdl).unwrap();
        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, ProjectError::InvalidValue { property: "dep", .. }));
    }

    #[test]
    fn test_reject_dep_with_two_targets() {
        let kdl = r#"
            module name="app" {
                dep module="core" library="gson"
            }
        "#;
        let manifest = ProjectManifest::parse(kdl).unwrap();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_reject_unknown_visibility() {
        let kdl = r#"
            module name="app" {
                dep library="gson" visibility="public"
            }
            library name="gson"
        "#;
        let manifest = ProjectManifest::parse(kdl).unwrap();
        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, ProjectError::InvalidValue { property: "dep.visibility", .. }));
    }

    #[test]
    fn test_dangling_reference_fails_graph_build() {
        let kdl = r#"
            module name="app" {
                dep module="ghost"
            }
        "#;
        let manifest = ProjectManifest::parse(kdl).unwrap();
        let err = manifest.to_graph(Utf8Path::new("/project")).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Graph(GraphError::UnknownModule { .. })
        ));
    }

    #[test]
    fn test_duplicate_module_fails_graph_build() {
        let kdl = r#"
            module name="app"
            module name="app"
        "#;
        let manifest = ProjectManifest::parse(kdl).unwrap();
        let err = manifest.to_graph(Utf8Path::new("/project")).unwrap_err();
        assert!(matches!(err, ProjectError::Graph(GraphError::DuplicateModule(_))));
    }

    #[test]
    fn test_load_and_find_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        std::fs::write(
            base.join(PROJECT_FILE_NAME),
            r#"module name="core" output="out/core""#,
        )
        .unwrap();
        let nested = base.join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        let found = ProjectManifest::find(&nested).unwrap();
        assert_eq!(found, base.join(PROJECT_FILE_NAME));

        let (manifest, graph) = ProjectManifest::load(&found).unwrap();
        assert!(manifest.classpath.is_none());
        let core = graph.module("core").unwrap();
        let expected = base.join("out/core");
        assert_eq!(graph.output_dir(core), Some(expected.as_path()));
    }

    #[test]
    fn test_read_error_keeps_path() {
        let err = ProjectManifest::from_path(Utf8Path::new("/nonexistent/tern.kdl")).unwrap_err();
        assert!(matches!(err, ProjectError::ReadError { ref path, .. } if path == "/nonexistent/tern.kdl"));
    }
}
