//! Entities of a project graph
//!
//! Everything here is a plain owned value. A graph hands out shared
//! references for the duration of one classpath computation and nothing
//! in this workspace mutates them while that computation runs.

use camino::{Utf8Path, Utf8PathBuf};

/// How a module's compiled output is consumed by the modules depending on it.
///
/// A module without a role is a plain module: its raw output directory is a
/// valid classpath entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Output is repackaged into a single archive directory
    Library,
    /// A final application; other applications cannot compile against it
    Application,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Library => "library",
            Role::Application => "application",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "library" => Some(Role::Library),
            "application" => Some(Role::Application),
            _ => None,
        }
    }
}

/// Scope a dependency is declared with
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    Compile,
    /// Needed to compile, supplied by the runtime environment
    Provided,
    Runtime,
    Test,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "compile" => Some(Scope::Compile),
            "provided" => Some(Scope::Provided),
            "runtime" => Some(Scope::Runtime),
            "test" => Some(Scope::Test),
            _ => None,
        }
    }
}

/// The view of a module's dependencies a graph is queried with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClasspathKind {
    ProductionCompile,
    ProductionRuntime,
    TestCompile,
    TestRuntime,
}

impl ClasspathKind {
    /// Returns true if edges declared with `scope` are part of this view.
    pub fn includes(&self, scope: Scope) -> bool {
        match self {
            ClasspathKind::ProductionCompile => {
                matches!(scope, Scope::Compile | Scope::Provided)
            }
            ClasspathKind::ProductionRuntime => matches!(scope, Scope::Compile | Scope::Runtime),
            ClasspathKind::TestCompile => {
                matches!(scope, Scope::Compile | Scope::Provided | Scope::Test)
            }
            ClasspathKind::TestRuntime => true,
        }
    }
}

/// What a dependency edge points at, by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyTarget {
    Module(String),
    Library(String),
    /// SDK-like dependency; never part of the library closure
    Toolchain(String),
}

impl DependencyTarget {
    pub fn name(&self) -> &str {
        match self {
            DependencyTarget::Module(name)
            | DependencyTarget::Library(name)
            | DependencyTarget::Toolchain(name) => name,
        }
    }
}

/// A dependency edge of a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub target: DependencyTarget,
    /// Visible to modules that depend on the owning module, not just to it
    pub exported: bool,
    pub scope: Scope,
}

impl Dependency {
    fn new(target: DependencyTarget) -> Self {
        Self {
            target,
            exported: false,
            scope: Scope::Compile,
        }
    }

    /// A private compile-scope dependency on another module
    pub fn module(name: impl Into<String>) -> Self {
        Self::new(DependencyTarget::Module(name.into()))
    }

    /// A private compile-scope dependency on a library
    pub fn library(name: impl Into<String>) -> Self {
        Self::new(DependencyTarget::Library(name.into()))
    }

    /// A private compile-scope dependency on a toolchain
    pub fn toolchain(name: impl Into<String>) -> Self {
        Self::new(DependencyTarget::Toolchain(name.into()))
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

/// A node in the project graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Unique within a graph
    pub name: String,
    pub role: Option<Role>,
    /// Absent when the module produces no compiled output
    pub output_dir: Option<Utf8PathBuf>,
    /// Declaration order is traversal order
    pub dependencies: Vec<Dependency>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            output_dir: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }
}

/// An external library made of files and directories on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    pub roots: Vec<Utf8PathBuf>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
        }
    }

    pub fn with_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }
}

/// A platform SDK a module compiles against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub name: String,
    /// SDK installation directory
    pub home: Utf8PathBuf,
    /// Identifier of the platform target inside the SDK, e.g. `android-33`
    pub build_target: Option<String>,
    pub roots: Vec<Utf8PathBuf>,
}

impl Toolchain {
    pub fn new(name: impl Into<String>, home: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            home: home.into(),
            build_target: None,
            roots: Vec::new(),
        }
    }

    pub fn with_build_target(mut self, target: impl Into<String>) -> Self {
        self.build_target = Some(target.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn home(&self) -> &Utf8Path {
        &self.home
    }
}
