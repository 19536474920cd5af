//! The edit engine: one directive against one root.

use config_edit_path::{parse_field_path, validate_field_path};
use config_edit_reflect::{Reflect, Typed};

use crate::config::EngineConfig;
use crate::defaults::{assign_default, TagRegistry};
use crate::operator::OperatorTable;
use crate::types::{DirectiveOutcome, EditDirective, EditError, EditOperation, Note, Status};
use crate::updaters::{UpdateContext, UpdaterTable};
use crate::walk::{walk, Walked};

/// Applies edit directives to reflected configuration graphs.
///
/// The engine owns its operator, updater and tag tables; nothing is global.
/// Applying a directive never panics and never returns an error past
/// [`DirectiveOutcome`].
///
/// ```
/// use config_edit::EditEngine;
/// use config_edit_reflect::reflect_record;
///
/// #[derive(Debug, Default)]
/// struct Turret {
///     name: String,
///     barrels: i32,
/// }
///
/// reflect_record!(Turret { name, barrels });
///
/// let engine = EditEngine::default();
/// let mut turret = Turret::default();
/// assert!(engine.apply(&mut turret, "barrels", "3").is_edited());
/// assert!(engine.apply(&mut turret, "barrels", "three").error().is_some());
/// assert_eq!(turret.barrels, 3);
/// ```
#[derive(Debug, Clone)]
pub struct EditEngine {
    config: EngineConfig,
    operators: OperatorTable,
    updaters: UpdaterTable,
    tags: TagRegistry,
}

impl EditEngine {
    pub fn new(config: EngineConfig) -> Self {
        EditEngine {
            operators: OperatorTable::new(&config.operators),
            updaters: UpdaterTable::default(),
            tags: TagRegistry::new(config.tag_marker.clone()),
            config,
        }
    }

    /// Register `T` under `tag` for tagged default-value directives.
    pub fn with_tag<T: Typed>(mut self, tag: impl Into<String>) -> Self {
        self.tags.register::<T>(tag);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagRegistry {
        &mut self.tags
    }

    pub fn updaters_mut(&mut self) -> &mut UpdaterTable {
        &mut self.updaters
    }

    /// Apply one directive to `root`.
    pub fn apply_directive(
        &self,
        root: &mut dyn Reflect,
        directive: &EditDirective,
    ) -> DirectiveOutcome {
        let mut notes = Vec::new();
        let result = self.run(root, directive, &mut notes);
        DirectiveOutcome { result, notes }
    }

    pub fn apply(&self, root: &mut dyn Reflect, path: &str, value: &str) -> DirectiveOutcome {
        self.apply_directive(root, &EditDirective::new(path, value))
    }

    /// Apply directives in order; later ones observe earlier mutations.
    pub fn apply_all<'d>(
        &self,
        root: &mut dyn Reflect,
        directives: impl IntoIterator<Item = &'d EditDirective>,
    ) -> Vec<DirectiveOutcome> {
        directives
            .into_iter()
            .map(|directive| self.apply_directive(root, directive))
            .collect()
    }

    fn run(
        &self,
        root: &mut dyn Reflect,
        directive: &EditDirective,
        notes: &mut Vec<Note>,
    ) -> Result<Status, EditError> {
        if directive.path.is_empty() || directive.value.is_empty() {
            return Ok(Status::Skipped);
        }
        validate_field_path(&directive.path).map_err(|source| EditError::InvalidPath {
            path: directive.path.clone(),
            source,
        })?;
        let (op, value) = self.operators.parse(&directive.value);
        let segments = parse_field_path(&directive.path);

        let mut slot = match walk(root, &segments, op, value, notes)? {
            Walked::Finished(status) => return Ok(status),
            Walked::Slot(slot) => slot,
        };

        let shape = slot.declared_shape().resolved();
        if let Some(updater) = self.updaters.get(shape.kind()) {
            let mut ctx = UpdateContext {
                value,
                op,
                slot: &mut slot,
                operators: &self.operators,
                notes,
            };
            return updater(&mut ctx);
        }
        if op != EditOperation::DefaultValue {
            return Err(EditError::UnsupportedOperation {
                operation: op,
                type_name: shape.name(),
                reason: format!(
                    "no string parsing implementation, use the {} keyword to fill it with a default instance",
                    self.operators.token(EditOperation::DefaultValue)
                ),
            });
        }
        assign_default(&mut slot, value, &self.tags, notes)
    }
}

impl Default for EditEngine {
    fn default() -> Self {
        EditEngine::new(EngineConfig::default())
    }
}
