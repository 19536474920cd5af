//! Core types for the edit engine.

use std::fmt;

use config_edit_path::ValidationError;
use config_edit_reflect::ReflectError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Operation ─────────────────────────────────────────────────────────────

/// The mutation a directive requests, selected by a trailing operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOperation {
    Overwrite,
    Insert,
    Remove,
    DefaultValue,
}

impl EditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOperation::Overwrite => "overwrite",
            EditOperation::Insert => "insert",
            EditOperation::Remove => "remove",
            EditOperation::DefaultValue => "default value",
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Directive ─────────────────────────────────────────────────────────────

/// One path plus raw value instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDirective {
    pub path: String,
    #[serde(default)]
    pub value: String,
}

impl EditDirective {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        EditDirective {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// The single addressing datum of a resolved slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Index(usize),
    Key(String),
    Field(String),
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Index(i) => write!(f, "list index {i}"),
            Address::Key(k) => write!(f, "map key {k}"),
            Address::Field(n) => write!(f, "field {n}"),
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────

/// Result of a directive that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The graph was mutated.
    Edited,
    /// A reported no-op: the requested state already held.
    Unchanged,
    /// Empty path or empty value; nothing was attempted.
    Skipped,
}

/// Whether a note describes a mutation or a refused/ignored request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    Edit,
    Attempt,
}

/// A human-readable line produced while applying a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub kind: NoteKind,
    pub message: String,
}

impl Note {
    pub fn edit(message: impl Into<String>) -> Self {
        Note {
            kind: NoteKind::Edit,
            message: message.into(),
        }
    }

    pub fn attempt(message: impl Into<String>) -> Self {
        Note {
            kind: NoteKind::Attempt,
            message: message.into(),
        }
    }
}

/// Everything one directive produced.
///
/// Notes are kept even when the directive fails: a list insertion followed
/// by a value that doesn't parse leaves the new element in place, and both
/// facts are reported.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveOutcome {
    pub result: Result<Status, EditError>,
    pub notes: Vec<Note>,
}

impl DirectiveOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_edited(&self) -> bool {
        matches!(self.result, Ok(Status::Edited))
    }

    pub fn error(&self) -> Option<&EditError> {
        self.result.as_ref().err()
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

/// What went wrong while parsing a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseIssue {
    Malformed,
    MissingParentheses,
    WrongArity { expected: usize, found: usize },
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIssue::Malformed => f.write_str("malformed literal"),
            ParseIssue::MissingParentheses => f.write_str("missing parentheses"),
            ParseIssue::WrongArity { expected, found } => {
                write!(f, "expected {expected} elements, found {found}")
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("path {path} is invalid: {source}")]
    InvalidPath {
        path: String,
        source: ValidationError,
    },
    #[error("can't proceed past {segment} (step {step}), current target reference is null")]
    NullTarget { step: usize, segment: String },
    #[error("field {segment} (step {step}) could not be found on type {type_name}")]
    FieldNotFound {
        step: usize,
        segment: String,
        type_name: String,
    },
    #[error("index {segment} (step {step}) can't be parsed or is negative")]
    InvalidIndex { step: usize, segment: String },
    #[error("index {index} (step {step}) is out of bounds for list size {len}")]
    IndexOutOfBounds { step: usize, index: usize, len: usize },
    #[error("key {key} (step {step}) doesn't exist in the target map")]
    KeyNotFound { step: usize, key: String },
    #[error("can't add key {key} (step {step}) - only string keys are supported, map uses {key_type}")]
    UnsupportedKeyType {
        step: usize,
        key: String,
        key_type: String,
    },
    #[error("can't parse raw value {value} as {type_name}: {issue}")]
    Parse {
        value: String,
        type_name: String,
        issue: ParseIssue,
    },
    #[error("{operation} is not supported on type {type_name} - {reason}")]
    UnsupportedOperation {
        operation: EditOperation,
        type_name: String,
        reason: String,
    },
    #[error("there is no type associated with tag {tag}")]
    UnknownTag { tag: String },
    #[error("type {type_name} has no default instance")]
    NoDefaultInstance { type_name: String },
    #[error("walk terminated inconsistently: {parent} can't be addressed by {address}")]
    InconsistentSlot { parent: String, address: String },
    #[error("write failed: {0}")]
    Write(#[from] ReflectError),
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    PathResolution,
    Parse,
    UnsupportedOperation,
    UnknownTag,
    Internal,
}

impl EditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EditError::InvalidPath { .. }
            | EditError::NullTarget { .. }
            | EditError::FieldNotFound { .. }
            | EditError::InvalidIndex { .. }
            | EditError::IndexOutOfBounds { .. }
            | EditError::KeyNotFound { .. } => ErrorCategory::PathResolution,
            EditError::Parse { .. } => ErrorCategory::Parse,
            EditError::UnsupportedKeyType { .. }
            | EditError::UnsupportedOperation { .. }
            | EditError::NoDefaultInstance { .. }
            | EditError::Write(ReflectError::TypeMismatch { .. }) => {
                ErrorCategory::UnsupportedOperation
            }
            EditError::UnknownTag { .. } => ErrorCategory::UnknownTag,
            EditError::InconsistentSlot { .. } | EditError::Write(_) => ErrorCategory::Internal,
        }
    }
}
