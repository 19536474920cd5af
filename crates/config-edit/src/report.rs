//! Structured diagnostics for overlay application.

use std::fmt;

use tracing::{debug, info, warn};

use crate::types::{DirectiveOutcome, Note, NoteKind, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The graph was changed.
    Edit,
    /// A request was refused or ignored.
    Attempt,
    /// Progress and skipped work.
    Notice,
}

impl DiagnosticKind {
    pub fn verb(&self) -> &'static str {
        match self {
            DiagnosticKind::Edit => "edits",
            DiagnosticKind::Attempt => "attempts to edit",
            DiagnosticKind::Notice => "skips",
        }
    }
}

impl From<NoteKind> for DiagnosticKind {
    fn from(kind: NoteKind) -> Self {
        match kind {
            NoteKind::Edit => DiagnosticKind::Edit,
            NoteKind::Attempt => DiagnosticKind::Attempt,
        }
    }
}

/// Which overlay a diagnostic came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayContext {
    pub overlay: String,
    /// Position of the overlay in the batch's priority order.
    pub overlay_index: usize,
}

impl OverlayContext {
    pub fn new(overlay: impl Into<String>, overlay_index: usize) -> Self {
        OverlayContext {
            overlay: overlay.into(),
            overlay_index,
        }
    }
}

/// One reported outcome.
///
/// Field-level lines render as
/// `Overlay {index} ({id}) {verb} config {key} of type {collection}, field {path} | {message}`;
/// collection-level lines (no path) render as `Overlay {index} ({id}) {message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub overlay: String,
    pub overlay_index: usize,
    pub collection: String,
    pub key: String,
    pub path: Option<String>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn collection(
        ctx: &OverlayContext,
        collection: &str,
        key: &str,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            overlay: ctx.overlay.clone(),
            overlay_index: ctx.overlay_index,
            collection: collection.to_string(),
            key: key.to_string(),
            path: None,
            kind,
            message: message.into(),
        }
    }

    pub fn field(
        ctx: &OverlayContext,
        collection: &str,
        key: &str,
        path: &str,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            path: Some(path.to_string()),
            ..Diagnostic::collection(ctx, collection, key, kind, message)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Overlay {} ({}) ", self.overlay_index, self.overlay)?;
        match &self.path {
            Some(path) => write!(
                f,
                "{} config {} of type {}, field {} | {}",
                self.kind.verb(),
                self.key,
                self.collection,
                path,
                self.message
            ),
            None => f.write_str(&self.message),
        }
    }
}

/// Ordered diagnostics of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    /// Record a diagnostic and emit it through `tracing`.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        let d = &diagnostic;
        let path = d.path.as_deref().unwrap_or("");
        match d.kind {
            DiagnosticKind::Edit => info!(
                overlay = %d.overlay,
                overlay_index = d.overlay_index,
                collection = %d.collection,
                key = %d.key,
                path,
                "{d}"
            ),
            DiagnosticKind::Attempt => warn!(
                overlay = %d.overlay,
                overlay_index = d.overlay_index,
                collection = %d.collection,
                key = %d.key,
                path,
                "{d}"
            ),
            DiagnosticKind::Notice => debug!(
                overlay = %d.overlay,
                overlay_index = d.overlay_index,
                collection = %d.collection,
                key = %d.key,
                path,
                "{d}"
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Convert a directive outcome into field-level diagnostics.
    pub fn record_outcome(
        &mut self,
        ctx: &OverlayContext,
        collection: &str,
        key: &str,
        path: &str,
        outcome: DirectiveOutcome,
    ) {
        for Note { kind, message } in outcome.notes {
            self.push(Diagnostic::field(ctx, collection, key, path, kind.into(), message));
        }
        match outcome.result {
            Ok(Status::Edited) | Ok(Status::Unchanged) => {}
            Ok(Status::Skipped) => self.push(Diagnostic::field(
                ctx,
                collection,
                key,
                path,
                DiagnosticKind::Notice,
                "directive has an empty path or value",
            )),
            Err(err) => self.push(Diagnostic::field(
                ctx,
                collection,
                key,
                path,
                DiagnosticKind::Attempt,
                err.to_string(),
            )),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn edits(&self) -> impl Iterator<Item = &Diagnostic> {
        self.of_kind(DiagnosticKind::Edit)
    }

    pub fn attempts(&self) -> impl Iterator<Item = &Diagnostic> {
        self.of_kind(DiagnosticKind::Attempt)
    }

    pub fn notices(&self) -> impl Iterator<Item = &Diagnostic> {
        self.of_kind(DiagnosticKind::Notice)
    }

    fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// No request was refused.
    pub fn is_clean(&self) -> bool {
        self.attempts().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EditError;

    fn ctx() -> OverlayContext {
        OverlayContext::new("better-turrets", 2)
    }

    #[test]
    fn test_field_line_format() {
        let d = Diagnostic::field(
            &ctx(),
            "UnitPreset",
            "mech_a",
            "slots.a.enabled",
            DiagnosticKind::Edit,
            "Bool field modified with value true",
        );
        assert_eq!(
            d.to_string(),
            "Overlay 2 (better-turrets) edits config mech_a of type UnitPreset, field slots.a.enabled | Bool field modified with value true"
        );
    }

    #[test]
    fn test_collection_line_format() {
        let d = Diagnostic::collection(
            &ctx(),
            "UnitPreset",
            "mech_a",
            DiagnosticKind::Edit,
            "removes config mech_a of type UnitPreset",
        );
        assert_eq!(
            d.to_string(),
            "Overlay 2 (better-turrets) removes config mech_a of type UnitPreset"
        );
    }

    #[test]
    fn test_record_outcome_keeps_notes_before_error() {
        let mut report = Report::new();
        let outcome = DirectiveOutcome {
            result: Err(EditError::UnknownTag { tag: "!X".into() }),
            notes: vec![Note::edit("Adding key b (step 1) to target dictionary")],
        };
        report.record_outcome(&ctx(), "UnitPreset", "mech_a", "slots.b", outcome);
        assert_eq!(report.len(), 2);
        assert_eq!(report.edits().count(), 1);
        assert_eq!(
            report.attempts().next().map(|d| d.message.as_str()),
            Some("there is no type associated with tag !X")
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_skipped_is_notice() {
        let mut report = Report::new();
        let outcome = DirectiveOutcome { result: Ok(Status::Skipped), notes: Vec::new() };
        report.record_outcome(&ctx(), "UnitPreset", "mech_a", "", outcome);
        assert_eq!(report.notices().count(), 1);
        assert!(report.is_clean());
    }
}
