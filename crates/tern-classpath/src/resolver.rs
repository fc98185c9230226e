//! Transitive classpath closure
//!
//! Starting from one module, the resolver walks compile-scope dependencies
//! depth-first and collects:
//! - Library files: archives and class files under the roots of every library
//!   the walk can see
//! - Output directories: the compiled output of every module the walk reaches
//!
//! ## Visibility
//!
//! The start module sees all of its library dependencies. When the walk
//! steps into a module that is not a library module, only the *exported*
//! library dependencies of that module (and of everything below it) are
//! collected. Stepping into a library module keeps the current visibility.
//! Module edges themselves are always followed, exported or not.
//!
//! ## Output directories
//!
//! - Library module: `<output>/<packaged dir>` if that is a directory
//! - Module without a role: `<output>` if it is a directory
//! - Application module: nothing (applications cannot compile against
//!   each other)
//!
//! Each module is visited once per call, so cycles terminate and a module
//! reached along several paths contributes only through the first one.

use std::collections::{BTreeSet, HashSet};

use camino::Utf8PathBuf;
use tern_graph::{ClasspathKind, DependencyTarget, Module, ModuleGraph, Role, RoleLookup};

use crate::config::ClasspathConfig;
use crate::error::{ClasspathError, Result};
use crate::scan::collect_library_files;

/// Which result sets a call should fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wants {
    pub libraries: bool,
    pub output_dirs: bool,
}

impl Wants {
    pub const LIBRARIES: Wants = Wants {
        libraries: true,
        output_dirs: false,
    };

    pub const OUTPUT_DIRS: Wants = Wants {
        libraries: false,
        output_dirs: true,
    };

    pub const ALL: Wants = Wants {
        libraries: true,
        output_dirs: true,
    };
}

/// Result of one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    /// Archive and class files from external libraries
    pub libraries: BTreeSet<Utf8PathBuf>,
    /// Output directories of dependent modules
    pub output_dirs: BTreeSet<Utf8PathBuf>,
}

/// Computes classpath closures over a module graph.
///
/// The resolver holds no per-call state and can be shared between threads
/// when the graph can.
pub struct ClasspathResolver<'g, G: ?Sized> {
    graph: &'g G,
    config: ClasspathConfig,
}

/// State owned by a single resolution call
struct Walk<'g> {
    wants: Wants,
    visited: HashSet<&'g str>,
    classpath: Classpath,
}

impl<'g, G> ClasspathResolver<'g, G>
where
    G: ModuleGraph + RoleLookup + ?Sized,
{
    pub fn new(graph: &'g G) -> Self {
        Self::with_config(graph, ClasspathConfig::default())
    }

    pub fn with_config(graph: &'g G, config: ClasspathConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> &ClasspathConfig {
        &self.config
    }

    /// Compute the closure of `start`, filling the sets selected by `wants`.
    pub fn resolve(&self, start: &str, wants: Wants) -> Result<Classpath> {
        let graph: &'g G = self.graph;
        let module = graph
            .module(start)
            .ok_or_else(|| ClasspathError::StartModuleNotFound(start.to_string()))?;

        let mut walk = Walk {
            wants,
            visited: HashSet::new(),
            classpath: Classpath::default(),
        };
        self.visit(module, false, &mut walk)?;

        tracing::debug!(
            module = start,
            visited = walk.visited.len(),
            libraries = walk.classpath.libraries.len(),
            output_dirs = walk.classpath.output_dirs.len(),
            "resolved classpath"
        );

        Ok(walk.classpath)
    }

    /// Library files in the closure of `start`
    pub fn external_libraries(&self, start: &str) -> Result<BTreeSet<Utf8PathBuf>> {
        Ok(self.resolve(start, Wants::LIBRARIES)?.libraries)
    }

    /// Output directories of modules in the closure of `start`
    pub fn dependent_output_dirs(&self, start: &str) -> Result<BTreeSet<Utf8PathBuf>> {
        Ok(self.resolve(start, Wants::OUTPUT_DIRS)?.output_dirs)
    }

    fn visit(&self, module: &'g Module, exported_only: bool, walk: &mut Walk<'g>) -> Result<()> {
        let graph: &'g G = self.graph;

        if !walk.visited.insert(module.name.as_str()) {
            return Ok(());
        }
        tracing::trace!(module = %module.name, exported_only, "visiting module");

        if walk.wants.libraries {
            for dep in graph.dependencies(module, ClasspathKind::ProductionCompile, exported_only) {
                let DependencyTarget::Library(name) = &dep.target else {
                    continue;
                };
                let library = graph
                    .library(name)
                    .ok_or_else(|| ClasspathError::UnknownLibrary {
                        module: module.name.clone(),
                        name: name.clone(),
                    })?;

                for root in &library.roots {
                    if root.exists() {
                        collect_library_files(root, &self.config, &mut walk.classpath.libraries);
                    } else {
                        tracing::debug!(library = %library.name, %root, "library root does not exist");
                    }
                }
            }
        }

        for dep in graph.dependencies(module, ClasspathKind::ProductionCompile, false) {
            let DependencyTarget::Module(name) = &dep.target else {
                continue;
            };
            let dep_module = graph
                .module(name)
                .ok_or_else(|| ClasspathError::UnknownModule {
                    module: module.name.clone(),
                    name: name.clone(),
                })?;

            let role = graph.role_of(dep_module);

            if walk.wants.output_dirs {
                if let Some(output_dir) = graph.output_dir(dep_module) {
                    match role {
                        Some(Role::Library) => {
                            let packaged = output_dir.join(self.config.packaged_dir());
                            if packaged.is_dir() {
                                walk.classpath.output_dirs.insert(packaged);
                            }
                        }
                        None => {
                            if output_dir.is_dir() {
                                walk.classpath.output_dirs.insert(output_dir.to_owned());
                            }
                        }
                        Some(Role::Application) => {}
                    }
                }
            }

            let dep_is_library = role == Some(Role::Library);
            self.visit(dep_module, !dep_is_library || exported_only, walk)?;
        }

        Ok(())
    }
}
