//! Apply textual edit directives to live configuration graphs.
//!
//! A directive is a dotted field path plus a raw string value, optionally
//! ending in an operator token:
//!
//! | Raw value     | Operation                                   |
//! |---------------|---------------------------------------------|
//! | `5`           | overwrite the addressed slot                |
//! | `heavy !+`    | insert (list element, map key, set member)  |
//! | `!-`          | remove (list element, map key, set member)  |
//! | `!d`, `!Tag !d` | reset to a default instance, optionally of a tagged type |
//!
//! [`EditEngine::apply_directive`] walks the path through any graph whose
//! types implement [`config_edit_reflect::Reflect`], applies the mutation
//! and reports what happened as a [`DirectiveOutcome`]. Failures are values,
//! never panics: a bad directive leaves the graph as it found it (apart from
//! collection changes made before the failing step) and the next directive
//! proceeds.
//!
//! On top of the engine sit the host operations: [`CollectionRegistry`]
//! holds named collections of roots, [`Overlay`]s bundle overrides and
//! edits, and [`EditEngine::apply_overlays`] runs a whole batch into a
//! [`Report`] of [`Diagnostic`]s.
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use config_edit::{Collection, CollectionRegistry, ConfigEdit, EditEngine, Overlay};
//! use config_edit_reflect::reflect_record;
//!
//! #[derive(Debug, Default)]
//! struct Preset {
//!     count: i32,
//!     tags: BTreeSet<String>,
//! }
//!
//! reflect_record!(Preset { count, tags });
//!
//! let mut registry = CollectionRegistry::new();
//! registry.register(Collection::new("Preset").with_entry("mech_a", Preset::default()));
//!
//! let overlay = Overlay::new("better-mechs").with_edit(
//!     ConfigEdit::new("Preset", "mech_a")
//!         .with_directive("count", "5")
//!         .with_directive("tags", "heavy !+"),
//! );
//!
//! let report = EditEngine::default().apply_overlays(&mut registry, vec![overlay]);
//! assert!(report.is_clean());
//!
//! let preset = registry.get::<Preset>("Preset").and_then(|c| c.get("mech_a")).unwrap();
//! assert_eq!(preset.count, 5);
//! assert!(preset.tags.contains("heavy"));
//! ```

pub mod collection;
pub mod config;
pub mod defaults;
mod driver;
pub mod engine;
pub mod mutate;
pub mod operator;
pub mod overlay;
pub mod report;
pub mod slot;
pub mod types;
pub mod updaters;
pub mod walk;

pub use collection::{Collection, CollectionRegistry, ConfigCollection, Upsert};
pub use config::{ConfigError, EngineConfig, OperatorTokens};
pub use defaults::TagRegistry;
pub use engine::EditEngine;
pub use operator::OperatorTable;
pub use overlay::{ConfigEdit, ConfigOverride, Overlay, OverlayError};
pub use report::{Diagnostic, DiagnosticKind, OverlayContext, Report};
pub use slot::Slot;
pub use types::{
    Address, DirectiveOutcome, EditDirective, EditError, EditOperation, ErrorCategory, Note,
    NoteKind, ParseIssue, Status,
};
pub use updaters::{UpdateContext, Updater, UpdaterTable};
