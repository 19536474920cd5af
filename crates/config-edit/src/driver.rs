//! Host-facing operations: overrides, edits and the batch driver.

use indexmap::IndexSet;
use tracing::{debug, info_span};

use crate::collection::{CollectionRegistry, Upsert};
use crate::engine::EditEngine;
use crate::overlay::{ConfigEdit, ConfigOverride, Overlay};
use crate::report::{Diagnostic, DiagnosticKind, OverlayContext, Report};

impl EditEngine {
    /// Insert or replace a whole root. Returns whether the registry changed.
    pub fn apply_override(
        &self,
        ctx: &OverlayContext,
        registry: &mut CollectionRegistry,
        config_override: ConfigOverride,
        report: &mut Report,
    ) -> bool {
        let ConfigOverride { collection, key, root } = config_override;
        let Some(target) = registry.collection_mut(&collection) else {
            report.push(Diagnostic::collection(
                ctx,
                &collection,
                &key,
                DiagnosticKind::Attempt,
                format!("attempts to override config {key} of unknown type {collection}"),
            ));
            return false;
        };
        match target.upsert(&key, root) {
            Ok(Upsert::Replaced) => {
                report.push(Diagnostic::collection(
                    ctx,
                    &collection,
                    &key,
                    DiagnosticKind::Edit,
                    format!("replaces config {key} of type {collection}"),
                ));
                true
            }
            Ok(Upsert::Inserted) => {
                report.push(Diagnostic::collection(
                    ctx,
                    &collection,
                    &key,
                    DiagnosticKind::Edit,
                    format!("injects additional config {key} of type {collection}"),
                ));
                true
            }
            Err(err) => {
                report.push(Diagnostic::collection(
                    ctx,
                    &collection,
                    &key,
                    DiagnosticKind::Attempt,
                    format!("attempts to override config {key} of type {collection}: {err}"),
                ));
                false
            }
        }
    }

    /// Run the directives of `edit` against its root, or delete the root if
    /// the edit says so. Returns whether the registry was touched.
    pub fn apply_edit(
        &self,
        ctx: &OverlayContext,
        registry: &mut CollectionRegistry,
        edit: &ConfigEdit,
        report: &mut Report,
    ) -> bool {
        let collection = edit.collection.as_str();
        let key = edit.key.as_str();
        let Some(target) = registry.collection_mut(collection) else {
            report.push(Diagnostic::collection(
                ctx,
                collection,
                key,
                DiagnosticKind::Attempt,
                format!("attempts to edit config {key} of unknown type {collection}"),
            ));
            return false;
        };
        if !target.contains_key(key) {
            report.push(Diagnostic::collection(
                ctx,
                collection,
                key,
                DiagnosticKind::Attempt,
                format!("attempts to edit config {key} of type {collection}, which doesn't exist"),
            ));
            return false;
        }
        if edit.removed {
            report.push(Diagnostic::collection(
                ctx,
                collection,
                key,
                DiagnosticKind::Edit,
                format!("removes config {key} of type {collection}"),
            ));
            return target.remove(key);
        }
        if edit.edits.is_empty() {
            return false;
        }
        let Some(root) = target.root_mut(key) else {
            return false;
        };

        report.push(Diagnostic::collection(
            ctx,
            collection,
            key,
            DiagnosticKind::Edit,
            format!("edits config {key} of type {collection}"),
        ));
        let count = edit.edits.len();
        for (i, directive) in edit.edits.iter().enumerate() {
            report.push(Diagnostic::collection(
                ctx,
                collection,
                key,
                DiagnosticKind::Notice,
                format!("applying edit {} of {count} to config {key}", i + 1),
            ));
            let outcome = self.apply_directive(&mut *root, directive);
            report.record_outcome(ctx, collection, key, &directive.path, outcome);
        }
        true
    }

    /// Apply `overlays` in priority order and collect every diagnostic.
    ///
    /// Within an overlay, overrides go first, then edits, each in document
    /// order. Collections touched by the batch get their
    /// [`finish_batch`](crate::ConfigCollection::finish_batch) hooks run
    /// once at the end.
    pub fn apply_overlays(
        &self,
        registry: &mut CollectionRegistry,
        overlays: impl IntoIterator<Item = Overlay>,
    ) -> Report {
        let mut report = Report::new();
        if !self.config().enabled {
            debug!("edit engine disabled, skipping overlays");
            return report;
        }

        let mut touched: IndexSet<String> = IndexSet::new();
        for (index, overlay) in overlays.into_iter().enumerate() {
            let span = info_span!("overlay", id = %overlay.id, index);
            let _guard = span.enter();
            let ctx = OverlayContext::new(overlay.id, index);

            for config_override in overlay.overrides {
                let collection = config_override.collection.clone();
                if self.apply_override(&ctx, registry, config_override, &mut report) {
                    touched.insert(collection);
                }
            }

            let count = overlay.edits.len();
            for (i, edit) in overlay.edits.iter().enumerate() {
                report.push(Diagnostic::collection(
                    &ctx,
                    &edit.collection,
                    &edit.key,
                    DiagnosticKind::Notice,
                    format!(
                        "applying edit script {} of {count}: <key={};type={};source={}>",
                        i + 1,
                        edit.key,
                        edit.collection,
                        edit.source.as_deref().unwrap_or("-")
                    ),
                ));
                if self.apply_edit(&ctx, registry, edit, &mut report) {
                    touched.insert(edit.collection.clone());
                }
            }
        }

        for name in &touched {
            if let Some(collection) = registry.collection_mut(name) {
                debug!(collection = %name, entries = collection.len(), "running after-edit hooks");
                collection.finish_batch();
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;

    fn registry() -> CollectionRegistry {
        let mut registry = CollectionRegistry::new();
        registry.register(Collection::<i32>::new("Numbers").with_entry("one", 1));
        registry
    }

    #[test]
    fn test_override_of_wrong_type_is_ignored() {
        let engine = EditEngine::default();
        let mut registry = registry();
        let mut report = Report::new();
        let ctx = OverlayContext::new("o", 0);
        let applied = engine.apply_override(
            &ctx,
            &mut registry,
            ConfigOverride::new("Numbers", "one", "text".to_string()),
            &mut report,
        );
        assert!(!applied);
        assert_eq!(registry.get::<i32>("Numbers").and_then(|c| c.get("one")), Some(&1));
        assert_eq!(report.attempts().count(), 1);
    }

    #[test]
    fn test_edit_of_unknown_collection() {
        let engine = EditEngine::default();
        let mut registry = registry();
        let mut report = Report::new();
        let ctx = OverlayContext::new("o", 0);
        let edit = ConfigEdit::new("Words", "one").with_directive("x", "1");
        assert!(!engine.apply_edit(&ctx, &mut registry, &edit, &mut report));
        assert_eq!(
            report.diagnostics()[0].to_string(),
            "Overlay 0 (o) attempts to edit config one of unknown type Words"
        );
    }

    #[test]
    fn test_empty_edit_list_is_silent() {
        let engine = EditEngine::default();
        let mut registry = registry();
        let mut report = Report::new();
        let ctx = OverlayContext::new("o", 0);
        assert!(!engine.apply_edit(
            &ctx,
            &mut registry,
            &ConfigEdit::new("Numbers", "one"),
            &mut report
        ));
        assert!(report.is_empty());
    }

    #[test]
    fn test_disabled_engine_skips_batch() {
        let mut config = crate::EngineConfig::default();
        config.enabled = false;
        let engine = EditEngine::new(config);
        let mut registry = registry();
        let overlay = Overlay::new("o").with_edit(ConfigEdit::new("Numbers", "one").removing());
        let report = engine.apply_overlays(&mut registry, vec![overlay]);
        assert!(report.is_empty());
        assert!(registry.collection("Numbers").is_some_and(|c| c.contains_key("one")));
    }
}
