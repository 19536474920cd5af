//! Typed value updaters, dispatched on the slot's declared value kind.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use config_edit_reflect::{Reflect, Typed, ValueKind, Vector2, Vector3, Vector4};

use crate::operator::OperatorTable;
use crate::slot::Slot;
use crate::types::{EditError, EditOperation, Note, ParseIssue, Status};

/// Everything an updater may look at or touch.
pub struct UpdateContext<'c, 'a> {
    /// The raw value with its operator token stripped.
    pub value: &'c str,
    pub op: EditOperation,
    pub slot: &'c mut Slot<'a>,
    pub operators: &'c OperatorTable,
    pub notes: &'c mut Vec<Note>,
}

impl UpdateContext<'_, '_> {
    /// Display name of the slot's type, without nullable wrappers.
    pub fn type_name(&self) -> String {
        self.slot.declared_shape().resolved().name()
    }

    pub fn write<T: Reflect>(&mut self, value: T) -> Result<(), EditError> {
        self.slot.write(Box::new(value))?;
        Ok(())
    }

    pub fn edited(&mut self, message: impl Into<String>) -> Result<Status, EditError> {
        self.notes.push(Note::edit(message));
        Ok(Status::Edited)
    }

    pub fn unchanged(&mut self, message: impl Into<String>) -> Result<Status, EditError> {
        self.notes.push(Note::attempt(message));
        Ok(Status::Unchanged)
    }

    fn parse_error(&self, issue: ParseIssue) -> EditError {
        EditError::Parse {
            value: self.value.to_string(),
            type_name: self.type_name(),
            issue,
        }
    }
}

pub type Updater = fn(&mut UpdateContext<'_, '_>) -> Result<Status, EditError>;

/// Value kind to updater table.
#[derive(Clone)]
pub struct UpdaterTable {
    updaters: HashMap<ValueKind, Updater>,
}

impl UpdaterTable {
    /// A table with no updaters.
    pub fn empty() -> Self {
        UpdaterTable {
            updaters: HashMap::new(),
        }
    }

    /// Register `updater` for `kind`, returning the one it replaces.
    pub fn register(&mut self, kind: ValueKind, updater: Updater) -> Option<Updater> {
        self.updaters.insert(kind, updater)
    }

    pub fn get(&self, kind: ValueKind) -> Option<Updater> {
        self.updaters.get(&kind).copied()
    }

    pub fn contains(&self, kind: ValueKind) -> bool {
        self.updaters.contains_key(&kind)
    }
}

impl Default for UpdaterTable {
    fn default() -> Self {
        let mut table = UpdaterTable::empty();
        table.register(ValueKind::String, update_string);
        table.register(ValueKind::Bool, update_bool);
        table.register(ValueKind::Int, update_int);
        table.register(ValueKind::Float, update_float);
        table.register(ValueKind::Vector2, update_vector::<Vector2, 2>);
        table.register(ValueKind::Vector3, update_vector::<Vector3, 3>);
        table.register(ValueKind::Vector4, update_vector::<Vector4, 4>);
        table.register(ValueKind::StringSet, update_string_set);
        table
    }
}

impl fmt::Debug for UpdaterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.updaters.keys()).finish()
    }
}

// ── Literal parsing ───────────────────────────────────────────────────────

/// Case-insensitive match against `true`; anything else is `false`.
pub fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Invariant 32-bit integer: surrounding whitespace and a sign allowed.
pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn is_float_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')
}

/// Invariant float: digits, sign, decimal point and exponent, or one of the
/// `NaN` / `Infinity` symbols. Surrounding whitespace is allowed.
pub fn parse_float(raw: &str) -> Option<f32> {
    let s = raw.trim();
    match s {
        "NaN" => Some(f32::NAN),
        "Infinity" | "+Infinity" => Some(f32::INFINITY),
        "-Infinity" => Some(f32::NEG_INFINITY),
        _ if s.bytes().all(is_float_byte) => s.parse().ok(),
        _ => None,
    }
}

/// Parse `(n1,n2,...)` with exactly `N` components.
///
/// ```
/// use config_edit::updaters::parse_vector;
/// use config_edit::ParseIssue;
///
/// assert_eq!(parse_vector::<3>("(1,2,3)"), Ok([1.0, 2.0, 3.0]));
/// assert_eq!(parse_vector::<3>("(1,2)"), Err(ParseIssue::WrongArity { expected: 3, found: 2 }));
/// assert_eq!(parse_vector::<3>("1,2,3"), Err(ParseIssue::MissingParentheses));
/// ```
pub fn parse_vector<const N: usize>(raw: &str) -> Result<[f32; N], ParseIssue> {
    let inner = raw
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or(ParseIssue::MissingParentheses)?;
    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() != N {
        return Err(ParseIssue::WrongArity {
            expected: N,
            found: parts.len(),
        });
    }
    let mut out = [0.0; N];
    for (component, part) in out.iter_mut().zip(parts) {
        *component = parse_float(part).ok_or(ParseIssue::Malformed)?;
    }
    Ok(out)
}

// ── Updaters ──────────────────────────────────────────────────────────────

fn update_string(ctx: &mut UpdateContext<'_, '_>) -> Result<Status, EditError> {
    if ctx.op != EditOperation::DefaultValue {
        let value = ctx.value.to_string();
        ctx.write(value.clone())?;
        return ctx.edited(format!("String field modified with value {value}"));
    }
    if ctx.slot.declared_shape().is_nullable() {
        ctx.write(None::<String>)?;
        return ctx.edited("String field reset to null");
    }
    ctx.write(String::new())?;
    ctx.edited("String field reset to empty")
}

fn update_bool(ctx: &mut UpdateContext<'_, '_>) -> Result<Status, EditError> {
    let v = ctx.op != EditOperation::DefaultValue && parse_bool(ctx.value);
    ctx.write(v)?;
    ctx.edited(format!("Bool field modified with value {v}"))
}

fn update_int(ctx: &mut UpdateContext<'_, '_>) -> Result<Status, EditError> {
    let v = match ctx.op {
        EditOperation::DefaultValue => 0,
        _ => parse_int(ctx.value).ok_or_else(|| ctx.parse_error(ParseIssue::Malformed))?,
    };
    ctx.write(v)?;
    ctx.edited(format!("Integer field modified with value {v}"))
}

fn update_float(ctx: &mut UpdateContext<'_, '_>) -> Result<Status, EditError> {
    let v = match ctx.op {
        EditOperation::DefaultValue => 0.0,
        _ => parse_float(ctx.value).ok_or_else(|| ctx.parse_error(ParseIssue::Malformed))?,
    };
    ctx.write(v)?;
    ctx.edited(format!("Float field modified with value {v}"))
}

/// Components are parsed into a scratch array; the slot is written once,
/// only after every component parsed.
fn update_vector<V, const N: usize>(ctx: &mut UpdateContext<'_, '_>) -> Result<Status, EditError>
where
    V: Typed + From<[f32; N]> + fmt::Display,
{
    let components = match ctx.op {
        EditOperation::DefaultValue => [0.0; N],
        _ => parse_vector::<N>(ctx.value).map_err(|issue| ctx.parse_error(issue))?,
    };
    let v = V::from(components);
    let message = format!("Vector{N} field modified with value {v}");
    ctx.write(v)?;
    ctx.edited(message)
}

/// Only insert and remove are meaningful on a set. The current set is
/// copied, changed and written back once; an empty nullable set counts as
/// empty.
fn update_string_set(ctx: &mut UpdateContext<'_, '_>) -> Result<Status, EditError> {
    if !matches!(ctx.op, EditOperation::Insert | EditOperation::Remove) {
        return Err(EditError::UnsupportedOperation {
            operation: ctx.op,
            type_name: ctx.type_name(),
            reason: "no addition or removal keywords detected, no other operations are supported on sets"
                .to_string(),
        });
    }
    let mut set: BTreeSet<String> = ctx
        .slot
        .target()
        .and_then(|target| target.value_ref::<BTreeSet<String>>())
        .cloned()
        .unwrap_or_default();
    let value = ctx.value.to_string();
    let token = ctx.operators.token(ctx.op).to_string();
    if ctx.op == EditOperation::Insert {
        if !set.insert(value.clone()) {
            return ctx.unchanged(format!(
                "Value {value} already exists in target set, ignoring addition command prompted by {token} keyword"
            ));
        }
        ctx.write(set)?;
        ctx.edited(format!("Value {value} is added to target set due to {token} keyword"))
    } else {
        if !set.remove(&value) {
            return ctx.unchanged(format!(
                "Value {value} doesn't exist in target set, ignoring removal command prompted by {token} keyword"
            ));
        }
        ctx.write(set)?;
        ctx.edited(format!("Value {value} is removed from target set due to {token} keyword"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("true"));
        assert!(!parse_bool("yes"));
        assert!(!parse_bool(" true"));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(" -12 "), Some(-12));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("1.0"), None);
        assert_eq!(parse_int("1_000"), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("2.5"), Some(2.5));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float(" -.5 "), Some(-0.5));
        assert_eq!(parse_float("Infinity"), Some(f32::INFINITY));
        assert!(parse_float("NaN").is_some_and(f32::is_nan));
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("1,5"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn test_parse_vector_elements() {
        assert_eq!(parse_vector::<2>("( 1 , 2 )"), Ok([1.0, 2.0]));
        assert_eq!(parse_vector::<2>("(1,x)"), Err(ParseIssue::Malformed));
        assert_eq!(parse_vector::<2>("(1,2"), Err(ParseIssue::MissingParentheses));
        assert_eq!(parse_vector::<4>("()"), Err(ParseIssue::WrongArity { expected: 4, found: 1 }));
    }

    #[test]
    fn test_default_table_kinds() {
        let table = UpdaterTable::default();
        assert!(table.contains(ValueKind::StringSet));
        assert!(!table.contains(ValueKind::Record));
        assert!(!table.contains(ValueKind::Dynamic));
    }
}
