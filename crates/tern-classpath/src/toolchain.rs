//! Toolchain target lookup
//!
//! Reading an SDK installation is the host's job. This module only walks the
//! three ways that can go wrong and turns each into an error message for the
//! build log.

use camino::Utf8Path;
use tern_graph::Toolchain;

use crate::diagnostics::{BuildMessage, MessageSink};

/// Targets installed in one SDK
pub trait TargetCatalog {
    type Target;

    /// Look up a target by its identifier, e.g. `android-33`
    fn target(&self, id: &str) -> Option<Self::Target>;
}

/// Opens the target catalog of an SDK installation.
pub trait TargetCatalogLoader {
    type Catalog: TargetCatalog;

    /// On failure, returns whatever the SDK reader logged (possibly empty).
    fn load(&self, home: &Utf8Path) -> Result<Self::Catalog, String>;
}

/// Resolve the platform target a toolchain builds against.
///
/// Every failure is reported to `sink` as an error attributed to `builder`
/// and yields `None`.
pub fn parse_toolchain_target<L: TargetCatalogLoader>(
    toolchain: &Toolchain,
    loader: &L,
    sink: &mut dyn MessageSink,
    builder: &str,
) -> Option<<L::Catalog as TargetCatalog>::Target> {
    let Some(target_id) = toolchain.build_target.as_deref() else {
        sink.process_message(BuildMessage::error(
            builder,
            format!(
                "Cannot parse SDK {}: build target is not specified",
                toolchain.name
            ),
        ));
        return None;
    };

    let catalog = match loader.load(toolchain.home()) {
        Ok(catalog) => catalog,
        Err(log) => {
            let mut text = "SDK is parsed incorrectly.".to_string();
            if !log.is_empty() {
                text.push_str(" Parsing log:\n");
                text.push_str(&log);
            }
            sink.process_message(BuildMessage::error(builder, text));
            return None;
        }
    };

    let target = catalog.target(target_id);
    if target.is_none() {
        sink.process_message(BuildMessage::error(
            builder,
            format!(
                "Cannot parse SDK '{}': unknown target {target_id}",
                toolchain.name
            ),
        ));
    }
    target
}
