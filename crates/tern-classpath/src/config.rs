//! Resolver configuration

use tern_graph::ClasspathNode;

/// Default name of the directory a library module's classes are packaged into
pub const DEFAULT_PACKAGED_DIR: &str = "classes.jar";

/// Settings for one [`crate::ClasspathResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathConfig {
    packaged_dir: String,
    archive_extensions: Vec<String>,
    class_extensions: Vec<String>,
}

impl Default for ClasspathConfig {
    fn default() -> Self {
        Self {
            packaged_dir: DEFAULT_PACKAGED_DIR.to_string(),
            archive_extensions: vec!["jar".to_string()],
            class_extensions: vec!["class".to_string()],
        }
    }
}

impl ClasspathConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the `classpath` node of a tern.kdl, if any
    pub fn from_node(node: Option<&ClasspathNode>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = node.and_then(|n| n.packaged_dir.as_deref()) {
            config.packaged_dir = dir.to_string();
        }
        config
    }

    pub fn with_packaged_dir(mut self, name: impl Into<String>) -> Self {
        self.packaged_dir = name.into();
        self
    }

    pub fn with_archive_extension(mut self, ext: impl Into<String>) -> Self {
        self.archive_extensions.push(ext.into());
        self
    }

    pub fn with_class_extension(mut self, ext: impl Into<String>) -> Self {
        self.class_extensions.push(ext.into());
        self
    }

    pub fn packaged_dir(&self) -> &str {
        &self.packaged_dir
    }

    /// Exact, case-sensitive match against archive and class extensions
    pub fn is_classpath_extension(&self, ext: &str) -> bool {
        self.archive_extensions.iter().any(|e| e == ext)
            || self.class_extensions.iter().any(|e| e == ext)
    }
}
