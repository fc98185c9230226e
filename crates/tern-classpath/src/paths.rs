//! Small path and module helpers used by builders around the closure

use camino::{Utf8Path, Utf8PathBuf};
use tern_graph::{Module, ModuleGraph, RoleLookup};

/// Render paths as owned strings, preserving order
pub fn to_paths(paths: &[Utf8PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

/// Append the immediate child directories of `base_dir` to `output`.
///
/// Files are skipped. An unreadable or missing `base_dir` adds nothing.
pub fn add_subdirectories(base_dir: &Utf8Path, output: &mut Vec<Utf8PathBuf>) {
    let Ok(entries) = base_dir.read_dir_utf8() else {
        return;
    };

    let mut found: Vec<Utf8PathBuf> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.path().to_owned())
        .collect();
    // Sort for determinism
    found.sort();
    output.extend(found);
}

/// Directory packaged artifacts of `module` are written to.
///
/// This is the module's output directory.
pub fn packaged_output_dir<'m, G>(graph: &G, module: &'m Module) -> Option<&'m Utf8Path>
where
    G: ModuleGraph + ?Sized,
{
    graph.output_dir(module)
}

/// Returns true if any of `modules` carries a role.
pub fn contains_role<'a, L>(lookup: &L, modules: impl IntoIterator<Item = &'a Module>) -> bool
where
    L: RoleLookup + ?Sized,
{
    modules
        .into_iter()
        .any(|module| lookup.role_of(module).is_some())
}
